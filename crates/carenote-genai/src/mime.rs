//! MIME type resolution for artifacts.
//!
//! Browsers and file pickers often report audio files with an empty type or
//! as `application/octet-stream`, which Gemini rejects. When the declared
//! type is not usable the extension decides.

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Resolve the MIME type to send for a file.
pub fn resolve_mime_type(declared: Option<&str>, filename: &str) -> String {
    match declared.map(str::trim) {
        Some(t) if !t.is_empty() && !t.eq_ignore_ascii_case(OCTET_STREAM) => t.to_string(),
        _ => mime_for_filename(filename).unwrap_or(OCTET_STREAM).to_string(),
    }
}

/// Map a filename's extension to a MIME type.
///
/// Returns `None` for extensions that aren't supported evidence formats.
pub fn mime_for_filename(filename: &str) -> Option<&'static str> {
    let (_, ext) = filename.rsplit_once('.')?;
    match ext.to_lowercase().as_str() {
        "mp3" => Some("audio/mp3"),
        "wav" => Some("audio/wav"),
        "m4a" => Some("audio/mp4"),
        "aac" => Some("audio/aac"),
        "flac" => Some("audio/flac"),
        "ogg" => Some("audio/ogg"),
        "pdf" => Some("application/pdf"),
        "txt" => Some("text/plain"),
        "csv" => Some("text/csv"),
        _ => None,
    }
}

/// Whether a file is acceptable interview evidence: audio, PDF, plain text
/// or CSV, judged by declared type or extension.
pub fn is_supported_artifact(declared: Option<&str>, filename: &str) -> bool {
    let declared = declared.unwrap_or("");
    declared.starts_with("audio/")
        || declared == "application/pdf"
        || declared.starts_with("text/")
        || mime_for_filename(filename).is_some()
}
