use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::assessment::{AssessmentItem, initial_assessment};
use super::care_plan::CarePlan;
use super::face_sheet::FaceSheetData;

/// Everything known about the case being assessed in this session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CaseRecord {
    pub assessment: Vec<AssessmentItem>,
    pub face_sheet: FaceSheetData,
    pub care_plan: Option<CarePlan>,
}

impl CaseRecord {
    /// A blank case: one empty row per catalog entry, a default face sheet,
    /// and no plan.
    pub fn new() -> Self {
        Self {
            assessment: initial_assessment(),
            face_sheet: FaceSheetData::default(),
            care_plan: None,
        }
    }

    pub fn item(&self, id: &str) -> Option<&AssessmentItem> {
        self.assessment.iter().find(|i| i.id == id)
    }

    pub fn item_mut(&mut self, id: &str) -> Option<&mut AssessmentItem> {
        self.assessment.iter_mut().find(|i| i.id == id)
    }
}

impl Default for CaseRecord {
    fn default() -> Self {
        Self::new()
    }
}
