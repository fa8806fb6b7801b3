//! Multi-modal request assembly.
//!
//! Turns the evidence a care manager supplies (interview recordings,
//! documents, typed notes) into the ordered content parts of one generation
//! request. Every artifact is size-checked before any of them is encoded or
//! uploaded, so an oversized file fails the request without network traffic.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ApiKey, MAX_ARTIFACT_BYTES};
use crate::error::GenAiError;
use crate::mime::resolve_mime_type;
use crate::transport::AttachmentTransport;

/// A user-supplied file offered as evidence.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub name: String,
    /// The type reported by whatever picked the file; may be missing or
    /// generic.
    pub declared_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(name: impl Into<String>, declared_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.map(str::to_string),
            bytes,
        }
    }

    /// Read an artifact from disk. The declared type is left empty so the
    /// extension decides.
    pub async fn read(path: &Path) -> Result<Self, GenAiError> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, None, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn mime_type(&self) -> String {
        resolve_mime_type(self.declared_type.as_deref(), &self.name)
    }
}

/// One content part of a Gemini request, serialized in the API's
/// externally-tagged form (`{"text": ...}`, `{"inlineData": {...}}`,
/// `{"fileData": {...}}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    Text(String),
    InlineData(InlineData),
    FileData(FileData),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64 of the artifact bytes.
    pub data: String,
}

impl InlineData {
    pub fn encode(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub mime_type: String,
    pub file_uri: String,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Reject the first artifact larger than [`MAX_ARTIFACT_BYTES`].
pub fn check_sizes(artifacts: &[Artifact]) -> Result<(), GenAiError> {
    match artifacts.iter().find(|a| a.size() > MAX_ARTIFACT_BYTES) {
        Some(a) => Err(GenAiError::SizeLimit {
            filename: a.name.clone(),
            size_mib: a.size() as f64 / (1024.0 * 1024.0),
            limit_mib: MAX_ARTIFACT_BYTES / (1024 * 1024),
        }),
        None => Ok(()),
    }
}

/// The part carrying the care manager's typed notes, if there are any.
pub fn note_part(note: Option<&str>) -> Option<Part> {
    let note = note?;
    if note.trim().is_empty() {
        return None;
    }
    Some(Part::text(format!("Supplementary consultation notes:\n{note}")))
}

/// Build the evidence parts of a request: one part per artifact in input
/// order, then the note part. The caller appends its instruction part.
///
/// Artifacts are attached concurrently; the request they end up in is still
/// a single call.
pub async fn build_parts(
    transport: &dyn AttachmentTransport,
    credential: &ApiKey,
    artifacts: &[Artifact],
    note: Option<&str>,
) -> Result<Vec<Part>, GenAiError> {
    check_sizes(artifacts)?;

    let attachments = artifacts.iter().map(|artifact| {
        let mime_type = artifact.mime_type();
        debug!(
            filename = %artifact.name,
            mime_type = %mime_type,
            size = artifact.size(),
            transport = transport.name(),
            "attaching artifact"
        );
        async move { transport.attach(credential, artifact, &mime_type).await }
    });

    let mut parts = try_join_all(attachments).await?;
    parts.extend(note_part(note));
    Ok(parts)
}
