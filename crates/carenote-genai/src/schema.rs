//! Response schemas sent with each generation request.
//!
//! The model is constrained to JSON matching these shapes; the same shapes
//! are the serde models in `carenote_core`, so a conforming response parses
//! directly into them.

use serde_json::{Value, json};

use carenote_core::models::face_sheet::FaceSheetField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Extraction,
    CarePlan,
}

/// Face sheet fields the extraction schema asks for, with the guidance given
/// to the model for each.
pub const EXTRACTION_FACE_SHEET_FIELDS: &[(FaceSheetField, &str)] = &[
    (FaceSheetField::MedicalHistory, "Medical history and primary conditions"),
    (FaceSheetField::UserAspiration, "The person's own wishes and intentions"),
    (FaceSheetField::FamilyAspiration, "The family's wishes and requests"),
    (
        FaceSheetField::PhysicalIndependence,
        "Daily-living independence of the disabled elderly (one of J1, J2, A1, A2, B1, B2, C1, C2)",
    ),
    (
        FaceSheetField::CognitiveIndependence,
        "Daily-living independence of the elderly with dementia (one of independent, I, IIa, IIb, IIIa, IIIb, IV, M)",
    ),
    (
        FaceSheetField::MedicationStatus,
        "Medication management (one of independent, family-managed, visiting pharmacist, partial assistance, full assistance)",
    ),
    (FaceSheetField::CurrentSituation, "Current living situation"),
    (FaceSheetField::ServiceUtilization, "Care services and community resources in use"),
    (
        FaceSheetField::HousingType,
        "Housing (one of owned (detached), owned (apartment), rented, public housing, other)",
    ),
    (FaceSheetField::ToiletType, "Toilet (one of western, japanese, portable)"),
    (
        FaceSheetField::HasSteps,
        "Steps in the home (one of no, yes (throughout), yes (some places))",
    ),
    (
        FaceSheetField::HasRenovation,
        "Home modifications (one of no, yes (handrails etc.), planned)",
    ),
];

pub fn response_schema(kind: SchemaKind) -> Value {
    match kind {
        SchemaKind::Extraction => extraction_schema(),
        SchemaKind::CarePlan => care_plan_schema(),
    }
}

fn string(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn extraction_schema() -> Value {
    let face_sheet: serde_json::Map<String, Value> = EXTRACTION_FACE_SHEET_FIELDS
        .iter()
        .map(|(field, description)| (field.key().to_string(), string(description)))
        .collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "assessment": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "situation": string("The concrete situation, in one short sentence"),
                        "judgment": string("The most fitting judgment from the item's options"),
                        "strengths": string(
                            "The person's strengths, positive factors and community resources in use, in one short sentence"
                        ),
                    },
                    "required": ["id", "situation", "judgment", "strengths"],
                },
            },
            "faceSheet": {
                "type": "OBJECT",
                "properties": face_sheet,
            },
        },
        "required": ["assessment", "faceSheet"],
    })
}

fn care_plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "analysisResult": string(
                "Table 1: result of the needs analysis reflecting the person's wishes (about 200 to 250 characters)"
            ),
            "comprehensivePolicy": string(
                "Table 1: overall support policy (about 200 to 250 characters)"
            ),
            "planItems": {
                "type": "ARRAY",
                "description": "Table 2: goals and services for each need to be addressed",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "need": string("Need to be addressed"),
                        "longTermGoal": string("Long-term goal"),
                        "shortTermGoal": string("Short-term goal"),
                        "services": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "serviceType": string("Service type (e.g. home help, day service)"),
                                    "contentItems": {
                                        "type": "ARRAY",
                                        "items": { "type": "STRING" },
                                        "description": "Concrete support content as bullet points (3 to 4 per service)",
                                    },
                                },
                                "required": ["serviceType", "contentItems"],
                            },
                        },
                    },
                    "required": ["need", "longTermGoal", "shortTermGoal", "services"],
                },
            },
            "utilizingStrengths": string("Strengths and community resources to draw on"),
        },
        "required": ["analysisResult", "comprehensivePolicy", "planItems", "utilizingStrengths"],
    })
}
