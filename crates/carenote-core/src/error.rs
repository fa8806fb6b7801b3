use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown assessment item: {0}")]
    UnknownItem(String),

    #[error("judgment '{value}' is not an allowed option for item {item_id}")]
    InvalidJudgment { item_id: String, value: String },

    #[error("unknown face sheet field: {0}")]
    UnknownField(String),

    #[error("a {0} request is already in progress")]
    Busy(&'static str),
}
