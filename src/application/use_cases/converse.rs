use std::sync::Arc;

use tracing::{debug, info};

use crate::application::ChatClient;
use crate::domain::{DomainError, Generation, GenerationOptions, Message, Prompt};

/// Translates a conversation into a single call to an injected [`ChatClient`]
/// and returns the client's generations untouched.
///
/// The service is stateless: each call builds an ephemeral [`Prompt`], makes
/// exactly one outbound call, and returns the results in collaborator order.
/// Failures from the client are propagated unchanged; there is no retry,
/// caching, or error translation here.
///
/// An empty conversation is accepted and forwarded as-is; whether that is an
/// error is the collaborator's decision.
pub struct ConversationService {
    client: Arc<dyn ChatClient>,
}

impl ConversationService {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self { client }
    }

    /// Converse with default (all-unset) [`GenerationOptions`].
    ///
    /// Behaves identically to
    /// `converse_with_options(messages, GenerationOptions::default())`.
    pub async fn converse(&self, messages: Vec<Message>) -> Result<Vec<Generation>, DomainError> {
        self.converse_with_options(messages, GenerationOptions::default())
            .await
    }

    /// Converse with caller-supplied options, overriding model parameters
    /// for this call only.
    pub async fn converse_with_options(
        &self,
        messages: Vec<Message>,
        options: GenerationOptions,
    ) -> Result<Vec<Generation>, DomainError> {
        info!(
            "Conversing with {} messages (model={})",
            messages.len(),
            options.model().unwrap_or("default"),
        );

        let prompt = Prompt::new(messages, options);
        let response = self.client.call(&prompt).await?;

        debug!(
            "Received {} generations (model={})",
            response.generations().len(),
            response.model().unwrap_or("unknown"),
        );

        Ok(response.into_generations())
    }
}
