//! The generation call: one `generateContent` request with a response
//! schema, returning the raw JSON text and token counts.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use carenote_core::models::usage::TokenCount;

use crate::config::{ApiKey, GenAiConfig};
use crate::error::GenAiError;
use crate::request::Part;
use crate::schema::{SchemaKind, response_schema};
use crate::transport::BoxFuture;

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model: String,
    pub parts: Vec<Part>,
    pub schema: SchemaKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResponse {
    /// The model's JSON output, not yet parsed.
    pub text: String,
    pub usage: TokenCount,
}

/// Issues generation requests.
///
/// Methods return boxed futures for dyn compatibility.
pub trait GenerationClient: Send + Sync {
    fn generate<'a>(
        &'a self,
        credential: &'a ApiKey,
        request: &'a GenerationRequest,
    ) -> BoxFuture<'a, Result<GenerationResponse, GenAiError>>;
}

/// Gemini `generateContent` over HTTPS.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &GenAiConfig) -> Result<Self, GenAiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_http(http, &config.base_url))
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    async fn generate_content(
        &self,
        credential: &ApiKey,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenAiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, request.model
        );
        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: &request.parts,
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(request.schema),
            },
        };

        debug!(model = %request.model, parts = request.parts.len(), "sending generateContent");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", credential.expose())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let raw = response.text().await?;
        parse_generate_response(&raw)
    }
}

impl GenerationClient for GeminiClient {
    fn generate<'a>(
        &'a self,
        credential: &'a ApiKey,
        request: &'a GenerationRequest,
    ) -> BoxFuture<'a, Result<GenerationResponse, GenAiError>> {
        Box::pin(self.generate_content(credential, request))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: &'a [Part],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

/// Pull the response text and token counts out of a `generateContent` body.
pub fn parse_generate_response(raw: &str) -> Result<GenerationResponse, GenAiError> {
    let response: GenerateContentResponse = serde_json::from_str(raw)
        .map_err(|e| GenAiError::ResponseParse(format!("invalid generateContent body: {e}")))?;

    let content = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .ok_or_else(|| GenAiError::ResponseParse("no candidate in response".to_string()))?;

    let text = content
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");

    let usage = response
        .usage_metadata
        .map(|u| TokenCount {
            input: u.prompt_token_count,
            output: u.candidates_token_count,
        })
        .unwrap_or_default();

    Ok(GenerationResponse { text, usage })
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// Map a non-2xx response to an error, reading the provider's
/// `{"error": {code, message, status}}` body when there is one.
pub(crate) async fn error_from_response(response: reqwest::Response) -> GenAiError {
    let status = response.status().as_u16();
    let raw = response.text().await.unwrap_or_default();
    error_from_body(status, &raw)
}

pub fn error_from_body(status: u16, raw: &str) -> GenAiError {
    let body = serde_json::from_str::<ErrorEnvelope>(raw).ok().map(|e| e.error);
    let message = body
        .as_ref()
        .and_then(|b| b.message.clone())
        .unwrap_or_else(|| raw.trim().to_string());

    if status == 429 {
        return GenAiError::RateLimited { status, message };
    }

    GenAiError::Upstream {
        status,
        code: body.as_ref().and_then(|b| b.code),
        provider_status: body.and_then(|b| b.status),
        message,
    }
}
