use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ChatClient;
use crate::domain::{ChatResponse, DomainError, Generation, Prompt};

/// An in-process [`ChatClient`] for tests.
///
/// Replays a scripted queue of responses (one per call, last response repeats
/// when the queue runs dry) and records every prompt it receives so tests can
/// assert on message order, options, and call counts. When scripted with an
/// error, the error is returned instead of a response.
pub struct MockChatClient {
    responses: Mutex<Vec<Result<ChatResponse, String>>>,
    prompts: Mutex<Vec<Prompt>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(vec![]),
            prompts: Mutex::new(vec![]),
        }
    }

    /// Build a mock that answers every call with a single generation.
    pub fn replying(text: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.push_response(ChatResponse::new(vec![Generation::new(text)]));
        mock
    }

    /// Build a mock whose every call fails with an upstream error.
    pub fn failing(message: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.responses
            .lock()
            .unwrap()
            .push(Err(message.into()));
        mock
    }

    /// Queue a response; queued responses are consumed first-in first-out.
    pub fn push_response(&self, response: ChatResponse) {
        self.responses.lock().unwrap().push(Ok(response));
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, in call order.
    pub fn recorded_prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }

    /// The most recent prompt, if any call was made.
    pub fn last_prompt(&self) -> Option<Prompt> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn call(&self, prompt: &Prompt) -> Result<ChatResponse, DomainError> {
        self.prompts.lock().unwrap().push(prompt.clone());

        let mut responses = self.responses.lock().unwrap();
        let scripted = if responses.len() > 1 {
            responses.remove(0)
        } else {
            responses
                .first()
                .cloned()
                .unwrap_or_else(|| Ok(ChatResponse::new(vec![])))
        };

        scripted.map_err(DomainError::upstream)
    }
}
