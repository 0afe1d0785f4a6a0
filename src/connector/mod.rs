//! # Connector Layer
//!
//! Chat-client implementations of the application port:
//! - OpenAI-compatible HTTP endpoints (OpenAI, LM Studio, Groq, vLLM)
//! - An in-process mock for tests

pub mod adapter;

pub use adapter::*;
