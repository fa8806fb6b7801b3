use carenote_core::models::usage::TokenUsage;

use crate::client::{GeminiClient, GenerationClient, GenerationRequest};
use crate::config::{ApiKey, GenAiConfig};
use crate::error::GenAiError;
use crate::request::Part;
use crate::retry::{RateLimitClassifier, RateLimitSignals, run_with_retry};
use crate::schema::SchemaKind;
use crate::tokens;
use crate::transport::{AttachmentTransport, transport_for};

/// Entry point for the two generation workflows: extracting case details
/// from interview evidence and drafting a care plan.
///
/// The client, attachment transport and rate-limit classifier are swappable
/// so the workflows can run against fakes.
pub struct CaseAssistant {
    config: GenAiConfig,
    client: Box<dyn GenerationClient>,
    transport: Box<dyn AttachmentTransport>,
    classifier: Box<dyn RateLimitClassifier>,
}

impl CaseAssistant {
    /// Build an assistant talking to Gemini, with the attachment transport
    /// chosen by `config.attachments`.
    pub fn new(config: GenAiConfig) -> Result<Self, GenAiError> {
        let client = GeminiClient::new(&config)?;
        let transport = transport_for(&config, client.http().clone());
        Ok(Self::with_parts(config, Box::new(client), transport))
    }

    pub fn with_parts(
        config: GenAiConfig,
        client: Box<dyn GenerationClient>,
        transport: Box<dyn AttachmentTransport>,
    ) -> Self {
        Self {
            config,
            client,
            transport,
            classifier: Box::new(RateLimitSignals::default()),
        }
    }

    pub fn with_classifier(mut self, classifier: impl RateLimitClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn config(&self) -> &GenAiConfig {
        &self.config
    }

    pub(crate) fn transport(&self) -> &dyn AttachmentTransport {
        self.transport.as_ref()
    }

    /// Send one schema-constrained request, retrying rate limits.
    /// Returns the response text and costed token usage.
    pub(crate) async fn invoke(
        &self,
        credential: &ApiKey,
        parts: Vec<Part>,
        schema: SchemaKind,
    ) -> Result<(String, TokenUsage), GenAiError> {
        let request = GenerationRequest {
            model: self.config.model.clone(),
            parts,
            schema,
        };

        let response = run_with_retry(&self.config.retry, self.classifier.as_ref(), || {
            self.client.generate(credential, &request)
        })
        .await?;

        let usage = tokens::usage_for(&self.config.model, response.usage);
        Ok((response.text, usage))
    }
}
