pub mod application;
pub mod connector;
pub mod domain;

pub use application::{ChatClient, ConversationService};

pub use connector::{MockChatClient, OpenAiCompatClient};

pub use domain::{
    ChatResponse, DomainError, Generation, GenerationOptions, Message, Prompt, Role, TokenUsage,
};
