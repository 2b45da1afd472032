//! Remote LLM scoring.
//!
//! [`LlmScorer`] builds a bounded prompt, calls a [`ChatBackend`] with a per-attempt
//! timeout and linear-backoff retries, and parses an integer score out of the answer.
//! Failures never escape: they degrade to `None`.

pub mod backend;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod parse;
pub mod prompt;
pub mod retry;
pub mod scorer;

#[cfg(test)]
mod tests;

pub use backend::{ChatBackend, ChatRequest, OpenAiChatBackend};
pub use error::RemoteError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockChatBackend, MockReply};
pub use parse::parse_score;
pub use prompt::{build_scoring_prompt, truncate_chars};
pub use retry::RetryPolicy;
pub use scorer::{BatchScore, LlmScorer, RemoteConfig, RemoteScorer};
