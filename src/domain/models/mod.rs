mod generation;
mod message;
mod options;
mod prompt;

pub use generation::{ChatResponse, Generation, TokenUsage};
pub use message::{Message, Role};
pub use options::GenerationOptions;
pub use prompt::Prompt;
