//! Hybrid scoring: local first, remote LLM override on a configurable share of calls.

mod orchestrator;
mod random;


pub use orchestrator::{HybridOrchestrator, HybridStats};
#[cfg(any(test, feature = "mock"))]
pub use random::FixedRandom;
pub use random::{RandomSource, ThreadRandom};
