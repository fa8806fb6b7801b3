use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::catalog::CatalogEntry;

use super::face_sheet::FaceSheetField;

/// Partial case details extracted from interview evidence.
///
/// This is what the model returns; nothing in it is trusted until it has
/// gone through [`crate::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExtractionResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub assessment: Vec<AssessmentPatch>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub face_sheet: FaceSheetPatch,
}

/// Proposed values for one assessment row. Empty strings mean "no value";
/// a missing key or `null` in the response reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentPatch {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub situation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub judgment: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strengths: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Proposed face sheet values keyed by wire name.
///
/// Kept as raw JSON so an unexpected key or value type in a response cannot
/// fail the whole parse; keys are resolved against [`FaceSheetField`] when
/// the patch is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct FaceSheetPatch(pub BTreeMap<String, serde_json::Value>);

impl FaceSheetPatch {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0
            .insert(key.into(), serde_json::Value::String(value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The entries that may be applied: the key names an allow-listed,
    /// non-derived field and the value carries text.
    pub fn applicable(&self) -> impl Iterator<Item = (FaceSheetField, String)> + '_ {
        self.0.iter().filter_map(|(key, value)| {
            let field = FaceSheetField::from_key(key)?;
            if field.is_derived() {
                return None;
            }
            Some((field, value_text(value)?))
        })
    }

    /// Keys that do not name a face sheet field.
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|k| FaceSheetField::from_key(k).is_none())
    }
}

/// Text for a patch value, or `None` when the value carries nothing:
/// null, an empty string, zero, or a non-scalar.
fn value_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

impl ExtractionResult {
    /// The result used when a response cannot be parsed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.assessment.is_empty() && self.face_sheet.is_empty()
    }

    /// Compare the assessment entries against the catalog.
    pub fn coverage(&self, catalog: &[CatalogEntry]) -> Coverage {
        let returned: HashSet<&str> = self.assessment.iter().map(|p| p.id.as_str()).collect();

        let missing_ids = catalog
            .iter()
            .filter(|e| !returned.contains(e.id.as_str()))
            .map(|e| e.id.clone())
            .collect();

        let mut unknown_ids = Vec::new();
        let mut invalid_judgments = Vec::new();
        for patch in &self.assessment {
            match catalog.iter().find(|e| e.id == patch.id) {
                None => unknown_ids.push(patch.id.clone()),
                Some(entry) if !entry.allows(&patch.judgment) => {
                    invalid_judgments.push((patch.id.clone(), patch.judgment.clone()));
                }
                Some(_) => {}
            }
        }

        Coverage {
            expected: catalog.len(),
            returned: self.assessment.len(),
            missing_ids,
            unknown_ids,
            invalid_judgments,
        }
    }
}

/// How well an extraction's assessment entries line up with the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coverage {
    pub expected: usize,
    pub returned: usize,
    pub missing_ids: Vec<String>,
    pub unknown_ids: Vec<String>,
    /// (item id, judgment) pairs whose judgment is not an allowed option.
    pub invalid_judgments: Vec<(String, String)>,
}

impl Coverage {
    /// Exactly one entry per catalog item, each with an allowed judgment.
    pub fn is_complete(&self) -> bool {
        self.missing_ids.is_empty()
            && self.unknown_ids.is_empty()
            && self.invalid_judgments.is_empty()
            && self.returned == self.expected
    }
}
