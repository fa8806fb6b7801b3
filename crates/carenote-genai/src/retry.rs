//! Rate-limit retry with exponential backoff.
//!
//! Only failures the classifier recognizes as rate limiting are retried;
//! anything else is returned on first occurrence. The wait before retry `n`
//! (0-based) is `base_delay * 2^n`, without jitter.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::GenAiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 2000,
        }
    }
}

impl RetryPolicy {
    /// Wait before retrying after failed attempt `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        Duration::from_millis(
            self.base_delay_ms
                .saturating_mul(2u64.saturating_pow(attempt)),
        )
    }
}

/// Decides whether a failure is a rate limit worth waiting out.
///
/// Providers signal this in different places (status line, nested error
/// code, message text), so the predicate is pluggable rather than built into
/// the retry loop.
pub trait RateLimitClassifier: Send + Sync {
    fn is_rate_limited(&self, err: &GenAiError) -> bool;
}

impl<F> RateLimitClassifier for F
where
    F: Fn(&GenAiError) -> bool + Send + Sync,
{
    fn is_rate_limited(&self, err: &GenAiError) -> bool {
        self(err)
    }
}

/// Classifier that looks for rate-limit signals in every field an error
/// exposes: HTTP status, the provider's nested code and status, and the
/// message text.
#[derive(Debug, Clone)]
pub struct RateLimitSignals {
    pub status_codes: Vec<u16>,
    /// Matched case-insensitively against message and provider status text.
    pub phrases: Vec<String>,
}

impl Default for RateLimitSignals {
    fn default() -> Self {
        Self {
            status_codes: vec![429],
            phrases: vec![
                "429".to_string(),
                "resource exhausted".to_string(),
                "resource_exhausted".to_string(),
                "resource has been exhausted".to_string(),
            ],
        }
    }
}

impl RateLimitSignals {
    fn text_matches(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.phrases
            .iter()
            .any(|p| lower.contains(&p.to_lowercase()))
    }

    fn code_matches(&self, code: i64) -> bool {
        self.status_codes.iter().any(|c| i64::from(*c) == code)
    }
}

impl RateLimitClassifier for RateLimitSignals {
    fn is_rate_limited(&self, err: &GenAiError) -> bool {
        match err {
            GenAiError::RateLimited { .. } => true,
            GenAiError::Upstream {
                status,
                code,
                provider_status,
                message,
            } => {
                self.status_codes.contains(status)
                    || code.is_some_and(|c| self.code_matches(c))
                    || provider_status
                        .as_deref()
                        .is_some_and(|s| self.text_matches(s))
                    || self.text_matches(message)
            }
            GenAiError::Transport(message) => self.text_matches(message),
            _ => false,
        }
    }
}

/// Run `operation`, retrying rate-limited failures according to `policy`.
///
/// When attempts run out the last error is returned as-is.
pub async fn run_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    classifier: &dyn RateLimitClassifier,
    mut operation: F,
) -> Result<T, GenAiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GenAiError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !classifier.is_rate_limited(&err) {
            return Err(err);
        }

        if attempt + 1 >= max_attempts {
            warn!(attempts = max_attempts, error = %err, "rate limited, giving up");
            return Err(err);
        }

        let delay = policy.delay_for(attempt);
        warn!(
            attempt = attempt + 1,
            max_attempts,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "rate limited, retrying"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
