//! # Application Layer
//!
//! The chat-client port and the conversation service orchestrating it.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
