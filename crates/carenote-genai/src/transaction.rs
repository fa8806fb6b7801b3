use serde::Serialize;
use uuid::Uuid;

use carenote_core::models::usage::TokenUsage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Extraction,
    CarePlanGeneration,
}

/// The result of one generation transaction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResult<T> {
    pub id: Uuid,
    pub transaction_type: TransactionType,
    pub model_id: String,
    pub usage: TokenUsage,
    pub completed_at: jiff::Timestamp,
    pub output: T,
}

impl<T> TransactionResult<T> {
    pub fn new(
        id: Uuid,
        transaction_type: TransactionType,
        model_id: &str,
        usage: TokenUsage,
        output: T,
    ) -> Self {
        Self {
            id,
            transaction_type,
            model_id: model_id.to_string(),
            usage,
            completed_at: jiff::Timestamp::now(),
            output,
        }
    }

    pub fn into_output(self) -> T {
        self.output
    }
}
