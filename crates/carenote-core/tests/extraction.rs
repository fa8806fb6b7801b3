use carenote_core::catalog::all_entries;
use carenote_core::models::extraction::{AssessmentPatch, ExtractionResult};

fn full_result() -> ExtractionResult {
    ExtractionResult {
        assessment: all_entries()
            .iter()
            .map(|e| AssessmentPatch {
                id: e.id.clone(),
                situation: "observed".to_string(),
                judgment: e.judgment_options[0].clone(),
                strengths: String::new(),
            })
            .collect(),
        face_sheet: Default::default(),
    }
}

#[test]
fn well_formed_result_covers_catalog() {
    let coverage = full_result().coverage(all_entries());
    assert!(coverage.is_complete());
    assert_eq!(coverage.expected, all_entries().len());
    assert_eq!(coverage.returned, all_entries().len());
    assert!(coverage.missing_ids.is_empty());
    assert!(coverage.invalid_judgments.is_empty());
}

#[test]
fn coverage_reports_gaps() {
    let mut result = full_result();
    result.assessment.retain(|p| p.id != "12-9");
    result.assessment.push(AssessmentPatch {
        id: "99-1".to_string(),
        ..Default::default()
    });
    if let Some(p) = result.assessment.iter_mut().find(|p| p.id == "11-1") {
        p.judgment = "bedridden".to_string();
    }

    let coverage = result.coverage(all_entries());
    assert!(!coverage.is_complete());
    assert_eq!(coverage.missing_ids, vec!["12-9".to_string()]);
    assert_eq!(coverage.unknown_ids, vec!["99-1".to_string()]);
    assert_eq!(
        coverage.invalid_judgments,
        vec![("11-1".to_string(), "bedridden".to_string())]
    );
}

#[test]
fn missing_sections_deserialize_as_empty() {
    let result: ExtractionResult = serde_json::from_str("{}").unwrap();
    assert!(result.is_empty());

    let result: ExtractionResult =
        serde_json::from_str(r#"{"assessment": [{"id": "10-1"}]}"#).unwrap();
    assert_eq!(result.assessment[0].situation, "");
    assert!(result.face_sheet.is_empty());
}

#[test]
fn null_fields_read_as_empty() {
    let json = r#"{
        "assessment": [
            {"id": "11-1", "situation": "walks with a cane", "judgment": "independent", "strengths": null},
            {"id": "11-2", "situation": "needs help bathing", "judgment": null}
        ],
        "faceSheet": null
    }"#;
    let result: ExtractionResult = serde_json::from_str(json).unwrap();

    assert_eq!(result.assessment.len(), 2);
    assert_eq!(result.assessment[0].strengths, "");
    assert_eq!(result.assessment[1].situation, "needs help bathing");
    assert_eq!(result.assessment[1].judgment, "");
    assert!(result.face_sheet.is_empty());
}

#[test]
fn null_sections_read_as_empty() {
    let result: ExtractionResult =
        serde_json::from_str(r#"{"assessment": null, "faceSheet": null}"#).unwrap();
    assert!(result.is_empty());
}
