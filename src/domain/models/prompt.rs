use serde::{Deserialize, Serialize};

use super::{GenerationOptions, Message};

/// The combined request unit sent to a chat client: an ordered conversation
/// plus the options governing the call.
///
/// Message order is the conversation order. A prompt never reorders, filters,
/// or otherwise edits the messages it was built from; it lives for one call
/// and is discarded afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    messages: Vec<Message>,
    options: GenerationOptions,
}

impl Prompt {
    pub fn new(messages: Vec<Message>, options: GenerationOptions) -> Self {
        Self { messages, options }
    }

    /// Build a prompt with default (all-unset) options.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self::new(messages, GenerationOptions::default())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}
