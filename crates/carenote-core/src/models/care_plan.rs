use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A generated care plan draft.
///
/// The first table carries the analysis and overall policy; the second
/// carries one row per need with its goals and the services that address
/// it. Plans are only ever replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CarePlan {
    pub analysis_result: String,
    pub comprehensive_policy: String,
    pub plan_items: Vec<CarePlanItem>,
    pub utilizing_strengths: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CarePlanItem {
    pub need: String,
    pub long_term_goal: String,
    pub short_term_goal: String,
    pub services: Vec<CarePlanService>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CarePlanService {
    pub service_type: String,
    /// Imperative action phrases, ready to paste into case management
    /// software.
    pub content_items: Vec<String>,
}
