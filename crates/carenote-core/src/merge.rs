//! Applying extraction results to a case.
//!
//! The merge is additive: a value from the model only ever replaces a field
//! when it carries text, so anything the care manager typed survives unless
//! the model has something to say about that exact field. Rows and keys the
//! record does not know about are dropped.

use tracing::debug;

use crate::models::assessment::AssessmentItem;
use crate::models::extraction::{AssessmentPatch, ExtractionResult, FaceSheetPatch};
use crate::models::face_sheet::FaceSheetData;
use crate::models::record::CaseRecord;

/// Return a new record with `result` applied to `prior`.
///
/// The care plan is carried over unchanged.
pub fn merge_extraction(prior: &CaseRecord, result: &ExtractionResult) -> CaseRecord {
    for patch in &result.assessment {
        if prior.item(&patch.id).is_none() {
            debug!(item_id = %patch.id, "dropping assessment entry for unknown item");
        }
    }

    CaseRecord {
        assessment: merge_assessment(&prior.assessment, &result.assessment),
        face_sheet: merge_face_sheet(&prior.face_sheet, &result.face_sheet),
        care_plan: prior.care_plan.clone(),
    }
}

pub fn merge_assessment(prior: &[AssessmentItem], patches: &[AssessmentPatch]) -> Vec<AssessmentItem> {
    prior
        .iter()
        .map(|item| match patches.iter().find(|p| p.id == item.id) {
            Some(patch) => apply_patch(item, patch),
            None => item.clone(),
        })
        .collect()
}

fn apply_patch(item: &AssessmentItem, patch: &AssessmentPatch) -> AssessmentItem {
    let mut merged = item.clone();
    if !patch.situation.is_empty() {
        merged.situation = patch.situation.clone();
    }
    if !patch.judgment.is_empty() {
        if item.allows(&patch.judgment) {
            merged.judgment = patch.judgment.clone();
        } else {
            debug!(
                item_id = %item.id,
                judgment = %patch.judgment,
                "ignoring judgment outside the allowed options"
            );
        }
    }
    if !patch.strengths.is_empty() {
        merged.strengths = patch.strengths.clone();
    }
    merged
}

pub fn merge_face_sheet(prior: &FaceSheetData, patch: &FaceSheetPatch) -> FaceSheetData {
    let mut merged = prior.clone();
    for (field, value) in patch.applicable() {
        merged.set(field, value);
    }
    for key in patch.unknown_keys() {
        debug!(key, "dropping unknown face sheet key");
    }
    merged
}
