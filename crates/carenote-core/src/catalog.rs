//! The assessment item catalog.
//!
//! Static reference data: every assessment sheet is instantiated from these
//! entries, and every AI result is checked against them. Entries are ordered
//! the way the sheet is presented, which is also the order the model is asked
//! to emit them in.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One assessment item definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogEntry {
    /// Stable identifier, e.g. `"11-1"`.
    pub id: String,
    pub category: String,
    pub item_name: String,
    /// The judgments a user or the model may record for this item, in
    /// display order.
    pub judgment_options: Vec<String>,
}

impl CatalogEntry {
    /// Whether `judgment` may be recorded for this item. An empty judgment
    /// (not yet assessed) is always allowed.
    pub fn allows(&self, judgment: &str) -> bool {
        judgment.is_empty() || self.judgment_options.iter().any(|o| o == judgment)
    }
}

const CAPABILITY: &[&str] = &["independent", "with assistance"];
const POSTURE: &[&str] = &["maintains independently", "cannot maintain"];
const WALKING: &[&str] = &["walks independently", "escorted", "cannot walk"];
const SELF_CARE: &[&str] = &["independent", "supervision and prompting", "assistance"];
const IADL: &[&str] = &["independent", "partial assistance", "full assistance"];
const IMPAIRMENT: &[&str] = &["no difficulty", "some difficulty"];
const PRESENCE: &[&str] = &["no", "yes"];
const SKIN: &[&str] = &["normal", "needs monitoring", "abnormal"];

/// (id, category, item name, judgment options)
const ENTRIES: &[(&str, &str, &str, &[&str])] = &[
    ("10-1", "Health", "Subjective symptoms", PRESENCE),
    ("11-1", "ADL", "Rolling over", CAPABILITY),
    ("11-2", "ADL", "Sitting up", CAPABILITY),
    ("11-3", "ADL", "Sitting balance", POSTURE),
    ("11-4", "ADL", "Standing balance", POSTURE),
    ("11-5", "ADL", "Standing up", CAPABILITY),
    ("11-6", "ADL", "Transfers", CAPABILITY),
    ("11-7", "ADL", "Walking (indoors)", WALKING),
    ("11-8", "ADL", "Walking (outdoors)", WALKING),
    ("11-9", "ADL", "Eating", SELF_CARE),
    ("11-10", "ADL", "Grooming", SELF_CARE),
    ("11-11", "ADL", "Dressing", SELF_CARE),
    ("11-12", "ADL", "Bathing", SELF_CARE),
    ("11-13", "ADL", "Toileting", SELF_CARE),
    ("12-1", "IADL", "Cooking", IADL),
    ("12-2", "IADL", "Cleaning", IADL),
    ("12-3", "IADL", "Laundry", IADL),
    ("12-4", "IADL", "Shopping", IADL),
    ("12-5", "IADL", "Medication management", IADL),
    ("12-6", "IADL", "Money management", IADL),
    ("12-7", "IADL", "Telephone use", IADL),
    ("12-8", "IADL", "Public transport", IADL),
    ("12-9", "IADL", "Driving", &["drives", "does not drive"]),
    ("13-1", "Cognition and judgment", "Cognitive function", IMPAIRMENT),
    ("13-2", "Cognition and judgment", "Decision making", IMPAIRMENT),
    (
        "14-1",
        "Communication",
        "Vision",
        &["normal", "large print only", "barely sees", "blind"],
    ),
    (
        "14-2",
        "Communication",
        "Hearing",
        &["normal", "loud voice only", "barely hears", "deaf"],
    ),
    (
        "14-3",
        "Communication",
        "Making needs known",
        &["able", "somewhat limited", "only in the moment", "unable"],
    ),
    (
        "14-4",
        "Communication",
        "Conversation",
        &["able", "somewhat limited", "unclear", "unable"],
    ),
    (
        "15-1",
        "Social engagement",
        "Motivation for social activity",
        &["motivated", "maintaining", "unmotivated"],
    ),
    (
        "15-2",
        "Social engagement",
        "Contact with neighbors",
        &["frequent", "occasional", "none"],
    ),
    ("15-3", "Social engagement", "Sense of isolation", PRESENCE),
    (
        "16-1",
        "Continence",
        "Bladder and bowel awareness",
        &["present", "unclear", "absent"],
    ),
    ("16-2", "Continence", "Incontinence", &["none", "occasional", "frequent"]),
    ("17-1", "Skin", "Pressure ulcers", SKIN),
    ("17-2", "Skin", "Skin hygiene", SKIN),
    ("18-1", "Oral", "Oral care", SELF_CARE),
    ("18-2", "Oral", "Swallowing", &["good", "slightly reduced", "poor"]),
    (
        "19-1",
        "Nutrition",
        "Diet texture (staple)",
        &["regular", "porridge", "puree"],
    ),
    (
        "19-2",
        "Nutrition",
        "Diet texture (sides)",
        &["regular", "bite-sized", "minced", "blended", "puree", "thickened"],
    ),
    ("19-3", "Nutrition", "Intake amount", &["large", "normal", "small"]),
    ("21-1", "Caregiver capacity", "Primary caregiver", &["yes", "no"]),
    (
        "21-2",
        "Caregiver capacity",
        "Caregiver burden",
        &["light", "somewhat light", "moderate", "somewhat heavy", "heavy"],
    ),
    ("21-3", "Caregiver capacity", "Willingness to continue caregiving", &["yes", "no"]),
    ("20-1", "Behavioral symptoms", "Behavioral and psychological symptoms", PRESENCE),
    ("22-1", "Living environment", "Problems in the home environment", PRESENCE),
    (
        "23-1",
        "Special circumstances",
        "Special circumstances (medical care etc.)",
        PRESENCE,
    ),
];

static CATALOG: LazyLock<Vec<CatalogEntry>> = LazyLock::new(|| {
    ENTRIES
        .iter()
        .map(|(id, category, item_name, options)| CatalogEntry {
            id: id.to_string(),
            category: category.to_string(),
            item_name: item_name.to_string(),
            judgment_options: options.iter().map(|o| o.to_string()).collect(),
        })
        .collect()
});

/// Return every catalog entry in sheet order.
pub fn all_entries() -> &'static [CatalogEntry] {
    &CATALOG
}

/// Look up a catalog entry by ID.
pub fn get_entry(id: &str) -> Option<&'static CatalogEntry> {
    all_entries().iter().find(|e| e.id == id)
}

pub fn is_catalog_id(id: &str) -> bool {
    get_entry(id).is_some()
}
