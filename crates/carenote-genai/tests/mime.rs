use carenote_genai::mime::{OCTET_STREAM, is_supported_artifact, resolve_mime_type};

#[test]
fn generic_or_missing_type_falls_back_to_extension() {
    assert_eq!(resolve_mime_type(None, "note.mp3"), "audio/mp3");
    assert_eq!(resolve_mime_type(Some(""), "note.mp3"), "audio/mp3");
    assert_eq!(resolve_mime_type(Some(OCTET_STREAM), "note.mp3"), "audio/mp3");
    assert_eq!(resolve_mime_type(Some(OCTET_STREAM), "Visit.M4A"), "audio/mp4");
}

#[test]
fn declared_type_wins_when_specific() {
    assert_eq!(resolve_mime_type(Some("audio/mpeg"), "note.mp3"), "audio/mpeg");
    assert_eq!(resolve_mime_type(Some("application/pdf"), "scan"), "application/pdf");
}

#[test]
fn extension_table() {
    let cases = [
        ("a.wav", "audio/wav"),
        ("a.aac", "audio/aac"),
        ("a.flac", "audio/flac"),
        ("a.ogg", "audio/ogg"),
        ("a.pdf", "application/pdf"),
        ("a.txt", "text/plain"),
        ("a.csv", "text/csv"),
    ];
    for (name, expected) in cases {
        assert_eq!(resolve_mime_type(None, name), expected, "{name}");
    }
}

#[test]
fn unknown_extension_is_octet_stream() {
    assert_eq!(resolve_mime_type(None, "data.xyz"), OCTET_STREAM);
    assert_eq!(resolve_mime_type(None, "no_extension"), OCTET_STREAM);
}

#[test]
fn supported_artifacts() {
    assert!(is_supported_artifact(Some("audio/webm"), "recording"));
    assert!(is_supported_artifact(None, "intake.PDF"));
    assert!(is_supported_artifact(Some(""), "notes.csv"));
    assert!(!is_supported_artifact(Some("image/png"), "photo.png"));
    assert!(!is_supported_artifact(None, "archive.zip"));
}
