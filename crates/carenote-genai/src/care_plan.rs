//! Care plan drafting from a completed assessment.
//!
//! The prompt is built deterministically from the face sheet and the
//! assessed items, so the same case always produces the same request. The
//! response must parse as a [`CarePlan`]; unlike extraction there is no
//! fallback, because an empty plan is never a usable draft.

use tracing::info;
use uuid::Uuid;

use carenote_core::models::assessment::AssessmentItem;
use carenote_core::models::care_plan::CarePlan;
use carenote_core::models::face_sheet::{FaceSheetData, FamilyMember};

use crate::assistant::CaseAssistant;
use crate::error::GenAiError;
use crate::request::Part;
use crate::schema::SchemaKind;
use crate::transaction::{TransactionResult, TransactionType};

const NOT_RECORDED: &str = "not recorded";

const AUTHORING_DIRECTIVES: &str = "\
[Analysis method: issue summary matrix]
Before writing the plan, analyze the case internally with an issue summary matrix (do not output it).
1. Obstacles: identify obstacles in body function and disease, and also environmental factors \
(housing, limited caregiving capacity) and personal factors (personality, loss of roles).
2. Strengths: find concrete strengths such as remaining abilities, the person's motivation, \
family support and community resources.
3. Needs: state the difficulty in daily life each obstacle causes, framed as \"cannot do X, so \
cannot live Y\" rather than just \"cannot do X\".

[Output rules]
- Do not use proper nouns. Write \"hospital\", \"clinic\", \"day facility\" or \"local gathering\" \
instead of names of hospitals, facilities or places.
- Do not infer anything that is not stated in the information above, such as features of the \
neighborhood or kinds of community activity.
- Base every statement only on the face sheet and the assessment results.

1. Table 1 \"Result of needs analysis reflecting the person's wishes\" (about 200 to 300 characters)
   - Explain why support is needed, including cause and effect, not just the situation.
   - Cover how strengths will be used as well as the obstacles.
   - Combine the person's own wishes with the needs seen from a professional standpoint.
2. Table 1 \"Overall support policy\" (about 200 to 300 characters)
   - Give the goals and policy the whole team shares, in positive and concrete language.
   - Aim at independence and quality of life, not only safety and reassurance.
3. Table 2 \"Needs to be addressed\"
   - Pick the highest-priority needs.
   - Phrase them positively (\"becomes able to\", \"maintains\") or as arrangements of the environment.
   - Long-term and short-term goals must not include a period such as \"in 6 months\" or \
\"in 3 months\". State only the goal itself.
   - Goals must be achievable and measurable.
4. Table 2 \"Service content\"
   - Write only concrete support actions as bullet points (\"carry out\", \"check\", \"encourage\"), \
with no purpose clause (\"in order to\"), so they can be copied into care-management software.
   - Keep to the support the assessment shows is essential.

Respond in JSON following the given schema.";

/// The living-situation sentence for a family list.
///
/// Rows with a blank name are ignored.
pub fn living_situation(family: &[FamilyMember]) -> String {
    let members = family
        .iter()
        .filter(|m| !m.name.trim().is_empty())
        .map(|m| {
            format!(
                "{} ({}, {})",
                m.relationship,
                m.age,
                or_not_recorded(&m.health_status)
            )
        })
        .collect::<Vec<_>>();

    if members.is_empty() {
        "living alone".to_string()
    } else {
        format!("living with family: yes ({})", members.join(", "))
    }
}

/// The face sheet block of the care plan prompt.
pub fn case_summary(face_sheet: &FaceSheetData) -> String {
    let steps = if face_sheet.has_steps.trim().starts_with("yes") {
        "steps present"
    } else {
        "no steps"
    };
    let age = match face_sheet.user_age.trim() {
        "" => NOT_RECORDED.to_string(),
        age => format!("{age} years"),
    };

    format!(
        "[Basic information (face sheet)]
- Name: {} ({}, {})
- Care level: {}
- Housing: {}, {}, {}
- Living situation: {}
- Current situation: {}
- Medical history: {}
- Medication: {}
- Person's wishes: {}
- Family's wishes: {}",
        or_not_recorded(&face_sheet.user_name),
        age,
        or_not_recorded(&face_sheet.user_gender),
        or_not_recorded(&face_sheet.care_level),
        or_not_recorded(&face_sheet.housing_type),
        steps,
        or_not_recorded(&face_sheet.housing_ownership),
        living_situation(&face_sheet.family_members),
        or_not_recorded(&face_sheet.current_situation),
        or_not_recorded(&face_sheet.medical_history),
        or_not_recorded(&face_sheet.medication_status),
        or_not_recorded(&face_sheet.user_aspiration),
        or_not_recorded(&face_sheet.family_aspiration),
    )
}

/// One entry per assessed item; unassessed items are left out.
pub fn assessment_summary(items: &[AssessmentItem]) -> String {
    items
        .iter()
        .filter(|i| i.is_assessed())
        .map(|i| {
            format!(
                "[{}] {}:\n    - Judgment: {}\n    - Situation: {}\n    - Strengths: {}",
                i.category, i.item_name, i.judgment, i.situation, i.strengths
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The full care plan prompt.
pub fn care_plan_prompt(
    items: &[AssessmentItem],
    face_sheet: &FaceSheetData,
    instructions: Option<&str>,
) -> String {
    let mut prompt = String::from(
        "You are a senior care manager with deep knowledge of the long-term care insurance system. \
Using the face sheet, the assessment results and this request's instructions below, draft a \
high-quality home care service plan that supports the person's independence.\n\n",
    );

    prompt.push_str(&case_summary(face_sheet));
    prompt.push_str("\n\n[Assessment results]\n");
    prompt.push_str(&assessment_summary(items));
    prompt.push_str("\n\n");

    if let Some(instructions) = instructions.filter(|i| !i.trim().is_empty()) {
        prompt.push_str("[Instructions for this plan]\n");
        prompt.push_str(instructions);
        prompt.push_str("\n\n");
    }

    prompt.push_str(AUTHORING_DIRECTIVES);
    prompt
}

fn or_not_recorded(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_RECORDED
    } else {
        value
    }
}

impl CaseAssistant {
    /// Draft a care plan for the case.
    pub async fn generate_care_plan(
        &self,
        items: &[AssessmentItem],
        face_sheet: &FaceSheetData,
        instructions: Option<&str>,
    ) -> Result<TransactionResult<CarePlan>, GenAiError> {
        let credential = self.config().api_key()?;

        let transaction_id = Uuid::new_v4();
        let model = &self.config().model;
        info!(
            transaction_id = %transaction_id,
            model = %model,
            assessed_items = items.iter().filter(|i| i.is_assessed()).count(),
            "starting care plan generation"
        );

        let prompt = care_plan_prompt(items, face_sheet, instructions);
        let (text, usage) = self
            .invoke(&credential, vec![Part::text(prompt)], SchemaKind::CarePlan)
            .await?;

        let plan: CarePlan = serde_json::from_str(&text).map_err(|e| {
            GenAiError::SchemaParse(format!("failed to parse CarePlan: {e}. Response: {text}"))
        })?;

        info!(
            transaction_id = %transaction_id,
            plan_items = plan.plan_items.len(),
            input_tokens = usage.tokens.input,
            output_tokens = usage.tokens.output,
            "care plan generation complete"
        );

        Ok(TransactionResult::new(
            transaction_id,
            TransactionType::CarePlanGeneration,
            model,
            usage,
            plan,
        ))
    }
}
