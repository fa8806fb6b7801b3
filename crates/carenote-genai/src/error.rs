use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenAiError {
    /// No API key could be resolved. The message explains how to set one up.
    #[error("{0}")]
    Configuration(String),

    #[error("nothing to analyze: attach a file or enter consultation notes")]
    EmptyInput,

    #[error("file too large: {filename} ({size_mib:.1} MiB). Files must be {limit_mib} MiB or smaller")]
    SizeLimit {
        filename: String,
        size_mib: f64,
        limit_mib: u64,
    },

    #[error("rate limited (HTTP {status}): {message}")]
    RateLimited { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("upstream error (HTTP {status}): {message}")]
    Upstream {
        status: u16,
        /// `error.code` from the provider's error body.
        code: Option<i64>,
        /// `error.status` from the provider's error body, e.g. `INTERNAL`.
        provider_status: Option<String>,
        message: String,
    },

    #[error("file upload failed: {0}")]
    Upload(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("response did not conform to expected schema: {0}")]
    SchemaParse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for GenAiError {
    fn from(e: reqwest::Error) -> Self {
        GenAiError::Transport(format_err_chain(&e))
    }
}

/// Walk the full error chain and join all causes into one string.
///
/// reqwest's top-level `Display` is often just "error sending request"; the
/// useful detail is further down the source chain.
pub fn format_err_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
