use carenote_genai::config::{
    ApiKey, ApiKeySource, AttachmentMode, DEFAULT_BASE_URL, DEFAULT_MODEL, GenAiConfig,
    MAX_ARTIFACT_BYTES, redact_api_key,
};
use carenote_genai::error::GenAiError;

#[test]
fn defaults() {
    let config = GenAiConfig::default();
    assert_eq!(config.model, DEFAULT_MODEL);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.retry.base_delay_ms, 2000);
    assert_eq!(
        config.attachments,
        AttachmentMode::Auto {
            inline_limit_bytes: MAX_ARTIFACT_BYTES
        }
    );
    assert!(matches!(config.api_key, ApiKeySource::Env { ref var } if var == "GEMINI_API_KEY"));
}

#[test]
fn partial_json_keeps_defaults() {
    let config = GenAiConfig::from_json(
        r#"{"model": "gemini-2.5-flash", "retry": {"max_attempts": 5}, "attachments": {"type": "upload"}}"#,
    )
    .unwrap();

    assert_eq!(config.model, "gemini-2.5-flash");
    assert_eq!(config.retry.max_attempts, 5);
    assert_eq!(config.retry.base_delay_ms, 2000);
    assert_eq!(config.attachments, AttachmentMode::Upload);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
}

#[test]
fn inline_key_is_trimmed() {
    let config = GenAiConfig {
        api_key: ApiKeySource::Inline {
            api_key: "  AIzaSyExample1234  ".to_string(),
        },
        ..GenAiConfig::default()
    };
    assert_eq!(config.api_key().unwrap().expose(), "AIzaSyExample1234");
}

#[test]
fn unset_env_var_explains_setup() {
    let config = GenAiConfig {
        api_key: ApiKeySource::Env {
            var: "CARENOTE_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
        },
        ..GenAiConfig::default()
    };

    match config.api_key() {
        Err(GenAiError::Configuration(message)) => {
            assert!(message.contains("CARENOTE_TEST_KEY_THAT_IS_NEVER_SET"));
            assert!(message.contains("aistudio.google.com"));
            assert!(message.contains("Restart"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!config.info().configured);
}

#[test]
fn redaction() {
    assert_eq!(redact_api_key("AIzaSyExample1234"), "AIza...1234");
    assert_eq!(redact_api_key("short"), "****");
    assert_eq!(
        format!("{:?}", ApiKey::new("AIzaSyExample1234")),
        "ApiKey(AIza...1234)"
    );
}

#[test]
fn info_never_exposes_the_key() {
    let config = GenAiConfig {
        api_key: ApiKeySource::Inline {
            api_key: "AIzaSyExample1234".to_string(),
        },
        ..GenAiConfig::default()
    };
    let info = config.info();
    assert!(info.configured);
    assert_eq!(info.key_source, "inline");
    assert_eq!(info.key_hint.as_deref(), Some("AIza...1234"));
    let json = serde_json::to_string(&info).unwrap();
    assert!(!json.contains("AIzaSyExample1234"));
}
