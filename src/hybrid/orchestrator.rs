use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::document::CvInput;
use crate::remote::{LlmScorer, RemoteScorer};
use crate::scoring::{HybridScore, LocalScoringService, ScoreRecord, ScoringError, ScoringMethod, rank_top_k};
use crate::text::OfferInput;

use super::random::{RandomSource, ThreadRandom};

/// Snapshot of the orchestrator's provider setup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HybridStats {
    pub remote_available: bool,
    pub remote_ratio: f64,
    pub local_model: String,
}

/// Local scoring first, then an optional remote override chosen per call.
pub struct HybridOrchestrator {
    local: Arc<LocalScoringService>,
    remote: Option<Arc<dyn RemoteScorer>>,
    remote_ratio: f64,
    rng: Arc<dyn RandomSource>,
}

impl std::fmt::Debug for HybridOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridOrchestrator")
            .field("local", &self.local)
            .field("remote_available", &self.remote.is_some())
            .field("remote_ratio", &self.remote_ratio)
            .finish()
    }
}

impl HybridOrchestrator {
    pub fn new(
        local: Arc<LocalScoringService>,
        remote: Option<Arc<dyn RemoteScorer>>,
        remote_ratio: f64,
    ) -> Self {
        Self {
            local,
            remote,
            remote_ratio,
            rng: Arc::new(ThreadRandom),
        }
    }

    /// Wires the remote scorer when a credential is configured.
    ///
    /// A remote construction failure is logged and demotes the orchestrator to local-only.
    pub fn from_config(config: &Config, local: Arc<LocalScoringService>) -> Self {
        let remote: Option<Arc<dyn RemoteScorer>> = if config.remote_enabled() {
            match LlmScorer::new(config.remote_config()) {
                Ok(scorer) => Some(Arc::new(scorer.with_reader(local.reader()))),
                Err(e) => {
                    warn!(error = %e, "Remote scorer unavailable, using local scoring only");
                    None
                }
            }
        } else {
            info!("No remote credential configured, using local scoring only");
            None
        };

        Self::new(local, remote, config.remote_ratio)
    }

    /// Replaces the random source used for provider selection.
    pub fn with_random(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn local(&self) -> &LocalScoringService {
        &self.local
    }

    pub fn remote_available(&self) -> bool {
        self.remote.is_some()
    }

    /// Decides whether this call should try the remote scorer.
    pub fn should_use_remote(&self) -> bool {
        if self.remote.is_none() || self.remote_ratio <= 0.0 {
            return false;
        }
        if self.remote_ratio >= 1.0 {
            return true;
        }
        self.rng.draw() < self.remote_ratio
    }

    /// Scores locally, then lets the remote score replace it when one is obtained.
    pub async fn score_cv_vs_offer(
        &self,
        cv: &CvInput,
        offer: &OfferInput,
    ) -> Result<HybridScore, ScoringError> {
        let local = self.local.score_cv_vs_offer(cv, offer)?;

        let remote_score = match &self.remote {
            Some(remote) if self.should_use_remote() => remote.score_cv_vs_offer(cv, offer).await,
            _ => None,
        };

        let result = compose(local, remote_score);
        debug!(
            method = %result.method,
            score = result.score,
            local_score = result.local_score,
            remote_score = result.remote_score,
            "Hybrid score"
        );
        Ok(result)
    }

    /// Ranks CVs for an offer through the hybrid path.
    pub async fn rank_candidates_for_offer(
        &self,
        offer: &OfferInput,
        cvs: &[CvInput],
        top_k: i64,
    ) -> Result<Vec<HybridScore>, ScoringError> {
        let mut scored = Vec::with_capacity(cvs.len());
        for (i, cv) in cvs.iter().enumerate() {
            let mut result = self.score_cv_vs_offer(cv, offer).await?;
            result.identifier = Some(cv.candidate_id(i));
            scored.push(result);
        }
        Ok(rank_top_k(scored, top_k))
    }

    /// Ranks offers for a CV through the hybrid path.
    pub async fn recommend_offers_for_cv(
        &self,
        cv: &CvInput,
        offers: &[OfferInput],
        top_k: i64,
    ) -> Result<Vec<HybridScore>, ScoringError> {
        let mut scored = Vec::with_capacity(offers.len());
        for offer in offers {
            let mut result = self.score_cv_vs_offer(cv, offer).await?;
            result.identifier = offer.id();
            scored.push(result);
        }
        Ok(rank_top_k(scored, top_k))
    }

    pub fn stats(&self) -> HybridStats {
        HybridStats {
            remote_available: self.remote_available(),
            remote_ratio: self.remote_ratio,
            local_model: self.local.encoder().name().to_string(),
        }
    }
}

fn compose(local: ScoreRecord, remote_score: Option<u8>) -> HybridScore {
    let (score, method) = match remote_score {
        Some(remote) => (f32::from(remote), ScoringMethod::Remote),
        None => (local.score, ScoringMethod::Local),
    };

    let mut metadata = Map::new();
    metadata.insert("method".to_string(), Value::String(method.to_string()));
    metadata.insert("local".to_string(), Value::Object(local.metadata));

    HybridScore {
        score,
        similarity: local.similarity,
        local_score: local.score,
        remote_score,
        method,
        identifier: local.identifier,
        metadata,
    }
}
