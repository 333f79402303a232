//! Services layer for the relevance engine
//!
//! Provides the text completion seam and its Anthropic-backed implementation.

pub mod llm;

pub use llm::{AnthropicCompletion, TextCompletion};
