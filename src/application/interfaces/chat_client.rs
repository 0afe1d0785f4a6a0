use async_trait::async_trait;

use crate::domain::{ChatResponse, DomainError, Prompt};

/// An interface for submitting a prompt to a chat model and receiving its
/// generations.
///
/// Implementors own transport, authentication, serialization, and
/// option validation. Consumers (e.g. [`crate::ConversationService`]) stay
/// decoupled from any particular provider or HTTP client library.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Submit one prompt and return the model's response, or fail.
    ///
    /// Implementations must return the candidate generations in the order
    /// the upstream model produced them.
    async fn call(&self, prompt: &Prompt) -> Result<ChatResponse, DomainError>;
}
