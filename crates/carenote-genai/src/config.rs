use serde::{Deserialize, Serialize};

use crate::error::GenAiError;
use crate::retry::RetryPolicy;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Largest artifact accepted for a request, inline or uploaded.
pub const MAX_ARTIFACT_BYTES: u64 = 20 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenAiConfig {
    pub model: String,
    pub base_url: String,
    pub api_key: ApiKeySource,
    pub retry: RetryPolicy,
    pub attachments: AttachmentMode,
    pub request_timeout_secs: u64,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: ApiKeySource::default(),
            retry: RetryPolicy::default(),
            attachments: AttachmentMode::default(),
            request_timeout_secs: 300,
        }
    }
}

/// Where the Gemini API key comes from. Resolved at call time, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApiKeySource {
    Env { var: String },
    Inline { api_key: String },
}

impl Default for ApiKeySource {
    fn default() -> Self {
        ApiKeySource::Env {
            var: DEFAULT_API_KEY_VAR.to_string(),
        }
    }
}

/// How artifact bytes travel to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttachmentMode {
    /// Base64 inside the generation request.
    Inline,
    /// Resumable upload to the Files API, referenced by URI.
    Upload,
    /// Inline up to `inline_limit_bytes`, upload above it.
    Auto { inline_limit_bytes: u64 },
}

impl Default for AttachmentMode {
    fn default() -> Self {
        AttachmentMode::Auto {
            inline_limit_bytes: MAX_ARTIFACT_BYTES,
        }
    }
}

/// A resolved API key. `Debug` never prints the secret.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey({})", redact_api_key(&self.0))
    }
}

/// Redacted config info safe to send to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigInfo {
    pub model: String,
    pub base_url: String,
    pub key_source: String,
    pub key_hint: Option<String>,
    pub configured: bool,
}

impl GenAiConfig {
    /// Parse a (possibly partial) JSON config over the defaults.
    pub fn from_json(json: &str) -> Result<Self, GenAiError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve the API key, or explain how to configure one.
    pub fn api_key(&self) -> Result<ApiKey, GenAiError> {
        let (key, var) = match &self.api_key {
            ApiKeySource::Env { var } => (std::env::var(var).ok(), var.as_str()),
            ApiKeySource::Inline { api_key } => (Some(api_key.clone()), DEFAULT_API_KEY_VAR),
        };

        match key.map(|k| k.trim().to_string()) {
            Some(k) if !k.is_empty() => Ok(ApiKey(k)),
            _ => Err(GenAiError::Configuration(missing_key_message(var))),
        }
    }

    pub fn info(&self) -> ConfigInfo {
        let (key_source, key_hint) = match &self.api_key {
            ApiKeySource::Env { var } => (
                format!("env:{var}"),
                std::env::var(var).ok().map(|k| redact_api_key(&k)),
            ),
            ApiKeySource::Inline { api_key } => ("inline".to_string(), Some(redact_api_key(api_key))),
        };

        ConfigInfo {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            key_source,
            configured: self.api_key().is_ok(),
            key_hint,
        }
    }
}

fn missing_key_message(var: &str) -> String {
    format!(
        "Gemini API key is not configured.\n\
         To set it up:\n  \
         1. Create an API key in Google AI Studio (https://aistudio.google.com/app/apikey).\n  \
         2. Set the {var} environment variable to that key for the process that runs the app \
         (for a local checkout, add `{var}=<your key>` to the environment or your .env file).\n  \
         3. On a hosted deployment, add {var} to the deployment's environment variables \
         for every environment and redeploy.\n  \
         4. Restart the app so the new value is picked up."
    )
}

pub fn redact_api_key(key: &str) -> String {
    if key.len() <= 8 || !key.is_ascii() {
        return "****".to_string();
    }
    let prefix = &key[..4];
    let suffix = &key[key.len() - 4..];
    format!("{prefix}...{suffix}")
}
