//! Cross-cutting, shared constants.
//!
//! Defaults for the encoder, the remote scorer and the ranking operations live here so that
//! configuration, services and the CLI agree on them.

use std::time::Duration;

/// Pretrained encoder used when no local model directory resolves.
pub const DEFAULT_ENCODER_NAME: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Local model directory produced by the training pipeline (`latest` alias).
pub const DEFAULT_MODEL_DIR: &str = "./models/latest";

/// Files whose presence marks a directory as a loadable encoder source.
pub const MODEL_DESCRIPTOR_FILES: [&str; 3] = [
    "config.json",
    "modules.json",
    "config_sentence_transformers.json",
];

pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Max tokens fed to the encoder per text.
pub const ENCODER_MAX_SEQ_LEN: usize = 512;

/// Output dimension of the lexical stub encoder (matches MiniLM).
pub const STUB_EMBEDDING_DIM: usize = 384;

/// Denominator used by cosine similarity when a vector has zero norm.
pub const SIMILARITY_EPSILON: f32 = 1e-12;

pub const DEFAULT_RECOMMEND_TOP_K: i64 = 5;
pub const DEFAULT_RANK_TOP_K: i64 = 10;

pub const DEFAULT_REMOTE_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);
pub const REMOTE_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const REMOTE_MAX_OUTPUT_TOKENS: u32 = 10;
pub const REMOTE_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_REMOTE_RATIO: f64 = 1.0;

/// Prompt budget for the synthesized job text, in characters.
pub const PROMPT_JOB_CHARS: usize = 1500;

/// Prompt budget for the CV text, in characters.
pub const PROMPT_CV_CHARS: usize = 2500;

/// Environment variable holding the remote API credential.
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
