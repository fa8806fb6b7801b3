//! Case detail extraction from interview evidence.
//!
//! Sends recordings, documents and notes to the model together with the
//! full assessment catalog and asks for one entry per catalog item plus
//! whatever face sheet fields can be read from the evidence. A response
//! that cannot be parsed yields an empty result rather than an error, so a
//! bad generation never blocks the care manager.

use tracing::{info, warn};
use uuid::Uuid;

use carenote_core::catalog::{CatalogEntry, all_entries};
use carenote_core::models::extraction::ExtractionResult;

use crate::assistant::CaseAssistant;
use crate::error::GenAiError;
use crate::request::{Artifact, Part, build_parts};
use crate::schema::SchemaKind;
use crate::transaction::{TransactionResult, TransactionType};

/// The instruction part for an extraction request over `catalog`.
pub fn extraction_prompt(catalog: &[CatalogEntry]) -> String {
    let total = catalog.len();
    let items = catalog
        .iter()
        .map(|e| {
            format!(
                "ID: {}, Item: {}, Options: [{}]",
                e.id,
                e.item_name,
                e.judgment_options.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a highly skilled care manager. From the provided audio recordings or \
documents (PDF, text, etc.) and the consultation notes, analyze all {total} assessment \
items and the face sheet (basic information) in one pass.

[Required output]
1. Output every one of the {total} defined items, in ID order, without omission. Do not stop partway.
2. Do not skip items that lack information: give what the context suggests, or write \
\"no information\" as the situation and leave the judgment empty.

[Assessment rules]
1. \"situation\" describes the concrete situation in one short sentence.
2. \"judgment\" is the closest match from the item's options, copied exactly.
3. \"strengths\" is one short sentence on positive factors the care plan can build on.

[Face sheet rules]
Extract basic information such as medical history, wishes, independence levels and the \
living environment as far as the evidence allows. Leave fields that cannot be read blank \
(null or an empty string).

[Assessment items]
{items}

Respond in JSON following the given schema."
    )
}

impl CaseAssistant {
    /// Extract assessment entries and face sheet values from `artifacts`
    /// and an optional consultation note.
    ///
    /// Nothing is merged here; the result is applied with
    /// `carenote_core::merge::merge_extraction`.
    pub async fn extract_case_details(
        &self,
        artifacts: &[Artifact],
        note: Option<&str>,
    ) -> Result<TransactionResult<ExtractionResult>, GenAiError> {
        let has_note = note.is_some_and(|n| !n.trim().is_empty());
        if artifacts.is_empty() && !has_note {
            return Err(GenAiError::EmptyInput);
        }

        let credential = self.config().api_key()?;

        let transaction_id = Uuid::new_v4();
        let model = &self.config().model;
        info!(
            transaction_id = %transaction_id,
            model = %model,
            artifacts = artifacts.len(),
            has_note,
            "starting case extraction"
        );

        let catalog = all_entries();
        let mut parts = build_parts(self.transport(), &credential, artifacts, note).await?;
        parts.push(Part::text(extraction_prompt(catalog)));

        let (text, usage) = self.invoke(&credential, parts, SchemaKind::Extraction).await?;

        let output = parse_extraction(&text);
        let coverage = output.coverage(catalog);
        if !coverage.is_complete() {
            warn!(
                transaction_id = %transaction_id,
                expected = coverage.expected,
                returned = coverage.returned,
                missing = coverage.missing_ids.len(),
                unknown = coverage.unknown_ids.len(),
                invalid_judgments = coverage.invalid_judgments.len(),
                "extraction does not cover the catalog"
            );
        }

        info!(
            transaction_id = %transaction_id,
            input_tokens = usage.tokens.input,
            output_tokens = usage.tokens.output,
            "case extraction complete"
        );

        Ok(TransactionResult::new(
            transaction_id,
            TransactionType::Extraction,
            model,
            usage,
            output,
        ))
    }
}

/// Parse the model's JSON, falling back to an empty result.
pub fn parse_extraction(text: &str) -> ExtractionResult {
    if text.trim().is_empty() {
        warn!("empty extraction response, using empty result");
        return ExtractionResult::empty();
    }
    match serde_json::from_str(text) {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "unparseable extraction response, using empty result");
            ExtractionResult::empty()
        }
    }
}
