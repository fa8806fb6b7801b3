use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{self, CatalogEntry};
use crate::error::CoreError;

/// One row of the assessment sheet: a catalog entry plus the values the
/// care manager (or the model) recorded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AssessmentItem {
    pub id: String,
    pub category: String,
    pub item_name: String,
    pub judgment_options: Vec<String>,
    pub situation: String,
    pub judgment: String,
    pub strengths: String,
}

/// The editable columns of an assessment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AssessmentField {
    Situation,
    Judgment,
    Strengths,
}

impl AssessmentItem {
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            category: entry.category.clone(),
            item_name: entry.item_name.clone(),
            judgment_options: entry.judgment_options.clone(),
            situation: String::new(),
            judgment: String::new(),
            strengths: String::new(),
        }
    }

    pub fn allows(&self, judgment: &str) -> bool {
        judgment.is_empty() || self.judgment_options.iter().any(|o| o == judgment)
    }

    /// Whether anything has been recorded in the situation or judgment
    /// columns.
    pub fn is_assessed(&self) -> bool {
        !self.situation.is_empty() || !self.judgment.is_empty()
    }

    pub fn get(&self, field: AssessmentField) -> &str {
        match field {
            AssessmentField::Situation => &self.situation,
            AssessmentField::Judgment => &self.judgment,
            AssessmentField::Strengths => &self.strengths,
        }
    }

    /// Set one editable column. A judgment must be empty or one of the
    /// item's options.
    pub fn set_field(&mut self, field: AssessmentField, value: String) -> Result<(), CoreError> {
        match field {
            AssessmentField::Situation => self.situation = value,
            AssessmentField::Judgment => {
                if !self.allows(&value) {
                    return Err(CoreError::InvalidJudgment {
                        item_id: self.id.clone(),
                        value,
                    });
                }
                self.judgment = value;
            }
            AssessmentField::Strengths => self.strengths = value,
        }
        Ok(())
    }
}

/// A fresh assessment sheet with one empty row per catalog entry.
pub fn initial_assessment() -> Vec<AssessmentItem> {
    catalog::all_entries()
        .iter()
        .map(AssessmentItem::from_entry)
        .collect()
}
