//! How artifact bytes reach the model.
//!
//! Small files travel inline as base64. Larger ones go through the Gemini
//! Files API resumable upload and are referenced by URI, which keeps the
//! generation request itself small.

use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;
use tracing::info;

use crate::client::error_from_response;
use crate::config::{ApiKey, AttachmentMode, GenAiConfig};
use crate::error::GenAiError;
use crate::request::{Artifact, FileData, InlineData, Part};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Turns one artifact into a request part.
///
/// Methods return boxed futures for dyn compatibility.
pub trait AttachmentTransport: Send + Sync {
    /// Short name for logs (e.g. "inline", "upload").
    fn name(&self) -> &str;

    fn attach<'a>(
        &'a self,
        credential: &'a ApiKey,
        artifact: &'a Artifact,
        mime_type: &'a str,
    ) -> BoxFuture<'a, Result<Part, GenAiError>>;
}

/// Base64-encodes the bytes into the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineTransport;

impl AttachmentTransport for InlineTransport {
    fn name(&self) -> &str {
        "inline"
    }

    fn attach<'a>(
        &'a self,
        _credential: &'a ApiKey,
        artifact: &'a Artifact,
        mime_type: &'a str,
    ) -> BoxFuture<'a, Result<Part, GenAiError>> {
        Box::pin(async move { Ok(Part::InlineData(InlineData::encode(mime_type, &artifact.bytes))) })
    }
}

/// Uploads the bytes with the Files API resumable protocol: a `start` call
/// that returns an upload URL, then a single `upload, finalize` call with
/// the whole body.
#[derive(Debug, Clone)]
pub struct ResumableUploadTransport {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    file: UploadedFile,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadedFile {
    uri: String,
    #[serde(default)]
    mime_type: Option<String>,
}

impl ResumableUploadTransport {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn upload(
        &self,
        credential: &ApiKey,
        artifact: &Artifact,
        mime_type: &str,
    ) -> Result<Part, GenAiError> {
        let start = self
            .http
            .post(format!("{}/upload/v1beta/files", self.base_url))
            .header("x-goog-api-key", credential.expose())
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", artifact.size())
            .header("X-Goog-Upload-Header-Content-Type", mime_type)
            .json(&serde_json::json!({ "file": { "displayName": artifact.name } }))
            .send()
            .await?;

        if !start.status().is_success() {
            return Err(error_from_response(start).await);
        }

        let upload_url = start
            .headers()
            .get("x-goog-upload-url")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| GenAiError::Upload(format!("no upload URL returned for {}", artifact.name)))?;

        let finish = self
            .http
            .post(&upload_url)
            .header("x-goog-api-key", credential.expose())
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .body(artifact.bytes.clone())
            .send()
            .await?;

        if !finish.status().is_success() {
            return Err(error_from_response(finish).await);
        }

        let uploaded: UploadResponse = finish
            .json()
            .await
            .map_err(|e| GenAiError::Upload(format!("unreadable upload response for {}: {e}", artifact.name)))?;

        info!(filename = %artifact.name, uri = %uploaded.file.uri, "artifact uploaded");

        Ok(Part::FileData(FileData {
            mime_type: uploaded.file.mime_type.unwrap_or_else(|| mime_type.to_string()),
            file_uri: uploaded.file.uri,
        }))
    }
}

impl AttachmentTransport for ResumableUploadTransport {
    fn name(&self) -> &str {
        "upload"
    }

    fn attach<'a>(
        &'a self,
        credential: &'a ApiKey,
        artifact: &'a Artifact,
        mime_type: &'a str,
    ) -> BoxFuture<'a, Result<Part, GenAiError>> {
        Box::pin(self.upload(credential, artifact, mime_type))
    }
}

/// Inline at or below `inline_limit_bytes`, upload above.
pub struct SizeRoutedTransport {
    inline: InlineTransport,
    upload: Box<dyn AttachmentTransport>,
    inline_limit_bytes: u64,
}

impl SizeRoutedTransport {
    pub fn new(upload: Box<dyn AttachmentTransport>, inline_limit_bytes: u64) -> Self {
        Self {
            inline: InlineTransport,
            upload,
            inline_limit_bytes,
        }
    }
}

impl AttachmentTransport for SizeRoutedTransport {
    fn name(&self) -> &str {
        "auto"
    }

    fn attach<'a>(
        &'a self,
        credential: &'a ApiKey,
        artifact: &'a Artifact,
        mime_type: &'a str,
    ) -> BoxFuture<'a, Result<Part, GenAiError>> {
        if artifact.size() <= self.inline_limit_bytes {
            self.inline.attach(credential, artifact, mime_type)
        } else {
            self.upload.attach(credential, artifact, mime_type)
        }
    }
}

/// The transport selected by `config.attachments`.
pub fn transport_for(config: &GenAiConfig, http: reqwest::Client) -> Box<dyn AttachmentTransport> {
    match config.attachments {
        AttachmentMode::Inline => Box::new(InlineTransport),
        AttachmentMode::Upload => Box::new(ResumableUploadTransport::new(http, &config.base_url)),
        AttachmentMode::Auto { inline_limit_bytes } => Box::new(SizeRoutedTransport::new(
            Box::new(ResumableUploadTransport::new(http, &config.base_url)),
            inline_limit_bytes,
        )),
    }
}
