//! Embedding + model utilities.
//!
//! - [`encoder`] turns texts into vectors ([`TextEncoder`]).
//! - [`hashing`] backs the stub encoder used offline and in tests.

/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Text encoder and model source resolution.
pub mod encoder;
mod error;
/// Lexical feature-hashing backend.
pub mod hashing;
/// BERT / DistilBERT checkpoints with mean pooling.
pub mod model;
/// Tokenizer loading helpers.
pub mod utils;

pub use device::{DevicePreference, select_device};
pub use encoder::{EncoderConfig, ModelSource, TextEncoder, is_model_dir};
pub use error::EmbeddingError;
pub use hashing::LexicalHasher;
pub use model::{ModelKind, SentenceModel};
