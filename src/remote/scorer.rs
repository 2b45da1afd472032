use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::constants::{
    DEFAULT_REMOTE_MODEL, ENV_API_KEY, REMOTE_MAX_OUTPUT_TOKENS, REMOTE_REQUEST_TIMEOUT,
    REMOTE_TEMPERATURE,
};
use crate::document::{CvInput, DocumentReader, FsDocumentReader};
use crate::text::OfferInput;

use super::backend::{ChatBackend, ChatRequest, OpenAiChatBackend};
use super::error::RemoteError;
use super::parse::parse_score;
use super::prompt::build_scoring_prompt;
use super::retry::RetryPolicy;

/// Remote scorer settings.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API credential; required by [`LlmScorer::new`].
    pub api_key: Option<String>,
    /// Chat model id.
    pub model: String,
    /// OpenAI-compatible endpoint override.
    pub api_base: Option<String>,
    pub retry: RetryPolicy,
    /// Per-attempt timeout.
    pub request_timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_REMOTE_MODEL.to_string(),
            api_base: None,
            retry: RetryPolicy::default(),
            request_timeout: REMOTE_REQUEST_TIMEOUT,
            temperature: REMOTE_TEMPERATURE,
            max_tokens: REMOTE_MAX_OUTPUT_TOKENS,
        }
    }
}

#[async_trait]
/// A provider that can score a CV against an offer, or decline to.
pub trait RemoteScorer: Send + Sync {
    /// Returns a `0..=100` score, or `None` when no score could be obtained.
    async fn score_cv_vs_offer(&self, cv: &CvInput, offer: &OfferInput) -> Option<u8>;
}

/// One entry of [`LlmScorer::batch_score`].
#[derive(Debug, Clone, PartialEq)]
pub struct BatchScore {
    pub cv: CvInput,
    pub score: Option<u8>,
    pub index: usize,
}

/// LLM-backed scorer: bounded prompt, lenient parsing, retries. Never fails its caller.
pub struct LlmScorer<B = OpenAiChatBackend> {
    backend: B,
    config: RemoteConfig,
    reader: Arc<dyn DocumentReader>,
}

impl<B> std::fmt::Debug for LlmScorer<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmScorer")
            .field("model", &self.config.model)
            .field("retry", &self.config.retry)
            .field("request_timeout", &self.config.request_timeout)
            .finish()
    }
}

impl LlmScorer<OpenAiChatBackend> {
    /// Builds a scorer for the OpenAI-compatible API. A missing credential is fatal.
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(RemoteError::MissingCredential { var: ENV_API_KEY })?;

        let backend = OpenAiChatBackend::new(api_key, config.api_base.as_deref());
        info!(model = %config.model, "Remote scorer ready");
        Ok(Self::with_backend(backend, config))
    }
}

impl<B: ChatBackend> LlmScorer<B> {
    /// Builds a scorer over any chat backend.
    pub fn with_backend(backend: B, config: RemoteConfig) -> Self {
        Self {
            backend,
            config,
            reader: Arc::new(FsDocumentReader),
        }
    }

    /// Replaces the document reader used for path CVs.
    pub fn with_reader(mut self, reader: Arc<dyn DocumentReader>) -> Self {
        self.reader = reader;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Scores a CV against an offer. Unreadable CVs and exhausted retries yield `None`.
    pub async fn score(&self, cv: &CvInput, offer: &OfferInput) -> Option<u8> {
        let cv_text = match cv.resolve_text(self.reader.as_ref()) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Remote scorer could not read CV");
                return None;
            }
        };

        let prompt = build_scoring_prompt(&cv_text, &offer.prompt_text());
        self.score_prompt(prompt).await
    }

    /// Sends a prebuilt prompt with retries and parses the answer.
    pub async fn score_prompt(&self, prompt: String) -> Option<u8> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            prompt,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };
        let max_attempts = self.config.retry.max_attempts();

        let mut attempt = 0u32;
        loop {
            attempt += 1;

            let outcome =
                match tokio::time::timeout(self.config.request_timeout, self.backend.complete(&request))
                    .await
                {
                    Ok(res) => res,
                    Err(_) => Err(RemoteError::Timeout {
                        after: self.config.request_timeout,
                    }),
                };

            match outcome {
                Ok(content) => {
                    // A scoreless answer is final.
                    let score = parse_score(&content);
                    match score {
                        Some(score) => debug!(attempt, score, "Remote score received"),
                        None => warn!(attempt, response = %content.trim(), "Remote response had no score"),
                    }
                    return score;
                }
                Err(e) => {
                    warn!(attempt, max_attempts, error = %e, "Remote scoring attempt failed");
                    match self.config.retry.delay_after(attempt) {
                        Some(delay) => tokio::time::sleep(delay).await,
                        None => return None,
                    }
                }
            }
        }
    }

    /// Scores CVs one after another, waiting `delay` between consecutive calls.
    pub async fn batch_score(
        &self,
        cvs: &[CvInput],
        offer: &OfferInput,
        delay: Duration,
    ) -> Vec<BatchScore> {
        let mut results = Vec::with_capacity(cvs.len());

        for (index, cv) in cvs.iter().enumerate() {
            let score = self.score(cv, offer).await;
            results.push(BatchScore {
                cv: cv.clone(),
                score,
                index,
            });

            if !delay.is_zero() && index + 1 < cvs.len() {
                tokio::time::sleep(delay).await;
            }
        }

        results
    }
}

#[async_trait]
impl<B: ChatBackend> RemoteScorer for LlmScorer<B> {
    async fn score_cv_vs_offer(&self, cv: &CvInput, offer: &OfferInput) -> Option<u8> {
        self.score(cv, offer).await
    }
}
