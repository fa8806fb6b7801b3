use carenote_core::models::usage::TokenCount;
use carenote_genai::tokens::{get_pricing, usage_for};

#[test]
fn flash_lite_is_not_priced_as_flash() {
    let lite = get_pricing("gemini-2.0-flash-lite").unwrap();
    let flash = get_pricing("gemini-2.0-flash-001").unwrap();
    assert!(lite.input_per_million < flash.input_per_million);
    assert_eq!(get_pricing("models/gemini-2.0-flash"), Some(flash));
}

#[test]
fn usage_is_priced_per_million() {
    let usage = usage_for(
        "gemini-2.0-flash",
        TokenCount {
            input: 1_000_000,
            output: 500_000,
        },
    );
    assert!((usage.cost_usd - 0.30).abs() < 1e-9);
    assert_eq!(usage.tokens.total(), 1_500_000);
}

#[test]
fn unknown_models_cost_nothing() {
    assert!(get_pricing("some-other-model").is_none());
    let usage = usage_for("some-other-model", TokenCount { input: 10, output: 10 });
    assert_eq!(usage.cost_usd, 0.0);
}
