#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use carenote_core::models::usage::TokenCount;
use carenote_genai::client::{GenerationClient, GenerationRequest, GenerationResponse};
use carenote_genai::config::{ApiKey, ApiKeySource, GenAiConfig};
use carenote_genai::error::GenAiError;
use carenote_genai::request::{Artifact, Part};
use carenote_genai::retry::RetryPolicy;
use carenote_genai::transport::{AttachmentTransport, BoxFuture};

/// A generation client that replays canned responses and records requests.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    responses: Arc<Mutex<VecDeque<Result<GenerationResponse, GenAiError>>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl ScriptedClient {
    pub fn replying(text: &str) -> Self {
        let client = Self::default();
        client.push_text(text);
        client
    }

    pub fn push_text(&self, text: &str) {
        self.push(Ok(GenerationResponse {
            text: text.to_string(),
            usage: TokenCount {
                input: 1200,
                output: 300,
            },
        }));
    }

    pub fn push(&self, response: Result<GenerationResponse, GenAiError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl GenerationClient for ScriptedClient {
    fn generate<'a>(
        &'a self,
        _credential: &'a ApiKey,
        request: &'a GenerationRequest,
    ) -> BoxFuture<'a, Result<GenerationResponse, GenAiError>> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.responses.lock().unwrap().pop_front();
        Box::pin(async move {
            next.unwrap_or_else(|| Err(GenAiError::Transport("no scripted response".to_string())))
        })
    }
}

/// A transport that emits a text marker per artifact and counts calls.
#[derive(Clone, Default)]
pub struct CountingTransport {
    calls: Arc<AtomicUsize>,
}

impl CountingTransport {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AttachmentTransport for CountingTransport {
    fn name(&self) -> &str {
        "counting"
    }

    fn attach<'a>(
        &'a self,
        _credential: &'a ApiKey,
        artifact: &'a Artifact,
        mime_type: &'a str,
    ) -> BoxFuture<'a, Result<Part, GenAiError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(Part::text(format!("{}|{}", artifact.name, mime_type))) })
    }
}

pub fn test_config() -> GenAiConfig {
    GenAiConfig {
        api_key: ApiKeySource::Inline {
            api_key: "test-key-0123456789".to_string(),
        },
        retry: RetryPolicy {
            max_attempts: 3,
            base_delay_ms: 1,
        },
        ..GenAiConfig::default()
    }
}

pub fn unconfigured() -> GenAiConfig {
    GenAiConfig {
        api_key: ApiKeySource::Inline {
            api_key: "   ".to_string(),
        },
        ..test_config()
    }
}

pub fn rate_limited() -> GenAiError {
    GenAiError::RateLimited {
        status: 429,
        message: "Resource has been exhausted".to_string(),
    }
}
