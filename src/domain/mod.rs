//! # Domain Layer
//!
//! Conversation data model and errors, independent of any transport or
//! provider.

pub mod error;
pub mod models;

pub use error::DomainError;
pub use models::*;
