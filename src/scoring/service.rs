use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::document::{CvInput, DocumentReader, FsDocumentReader, discover_cv_files};
use crate::embedding::{EncoderConfig, TextEncoder};
use crate::text::OfferInput;

use super::error::ScoringError;
use super::ranking::rank_top_k;
use super::similarity::{cosine_similarity, to_score};
use super::types::{DirectoryRanking, ScoreRecord};

/// Local scorer: normalizer, encoder and cosine similarity.
pub struct LocalScoringService {
    encoder: Arc<TextEncoder>,
    reader: Arc<dyn DocumentReader>,
}

impl std::fmt::Debug for LocalScoringService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalScoringService")
            .field("encoder", &self.encoder)
            .finish()
    }
}

impl LocalScoringService {
    /// Loads the encoder. Failure is fatal.
    pub fn new(config: EncoderConfig) -> Result<Self, ScoringError> {
        let encoder = TextEncoder::load(config)?;
        info!(encoder = encoder.name(), "Local scoring service ready");
        Ok(Self::with_encoder(Arc::new(encoder)))
    }

    /// Builds a service around an already loaded encoder.
    pub fn with_encoder(encoder: Arc<TextEncoder>) -> Self {
        Self {
            encoder,
            reader: Arc::new(FsDocumentReader),
        }
    }

    /// Service backed by the lexical stub encoder.
    pub fn stub() -> Self {
        Self::with_encoder(Arc::new(TextEncoder::stub()))
    }

    /// Replaces the document reader.
    pub fn with_reader(mut self, reader: Arc<dyn DocumentReader>) -> Self {
        self.reader = reader;
        self
    }

    pub fn encoder(&self) -> &TextEncoder {
        &self.encoder
    }

    pub fn reader(&self) -> Arc<dyn DocumentReader> {
        Arc::clone(&self.reader)
    }

    fn metadata(&self) -> Map<String, Value> {
        let mut meta = Map::new();
        meta.insert(
            "encoder".to_string(),
            Value::String(self.encoder.name().to_string()),
        );
        meta
    }

    fn record(&self, cv_vec: &[f32], other: &[f32], identifier: Option<String>) -> ScoreRecord {
        let similarity = cosine_similarity(cv_vec, other);
        ScoreRecord {
            score: to_score(similarity),
            similarity: Some(similarity),
            identifier,
            metadata: self.metadata(),
        }
    }

    fn encode_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ScoringError> {
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        Ok(self.encoder.encode(&refs, self.encoder.batch_size(), true)?)
    }

    /// Scores one CV against one offer.
    pub fn score_cv_vs_offer(
        &self,
        cv: &CvInput,
        offer: &OfferInput,
    ) -> Result<ScoreRecord, ScoringError> {
        let cv_text = cv.resolve_text(self.reader.as_ref())?;
        let job_text = offer.job_text();

        let cv_vec = self.encoder.encode_one(&cv_text, true)?;
        let job_vec = self.encoder.encode_one(&job_text, true)?;
        let record = self.record(&cv_vec, &job_vec, offer.id());

        debug!(
            cv_len = cv_text.len(),
            job_len = job_text.len(),
            similarity = record.similarity,
            score = record.score,
            "Scored CV against offer"
        );

        Ok(record)
    }

    /// Ranks offers for one CV; the CV is encoded once and offers in batches.
    pub fn recommend_offers_for_cv(
        &self,
        cv: &CvInput,
        offers: &[OfferInput],
        top_k: i64,
    ) -> Result<Vec<ScoreRecord>, ScoringError> {
        let cv_text = cv.resolve_text(self.reader.as_ref())?;
        let cv_vec = self.encoder.encode_one(&cv_text, true)?;

        let job_texts: Vec<String> = offers.iter().map(OfferInput::job_text).collect();
        let job_vecs = self.encode_many(&job_texts)?;

        let scored: Vec<ScoreRecord> = job_vecs
            .iter()
            .zip(offers)
            .map(|(job_vec, offer)| self.record(&cv_vec, job_vec, offer.id()))
            .collect();

        debug!(offers = offers.len(), top_k, "Recommended offers for CV");
        Ok(rank_top_k(scored, top_k))
    }

    /// Ranks CVs for one offer; the offer is encoded once and CVs in batches.
    pub fn rank_candidates_for_offer(
        &self,
        offer: &OfferInput,
        cvs: &[CvInput],
        top_k: i64,
    ) -> Result<Vec<ScoreRecord>, ScoringError> {
        let job_vec = self.encoder.encode_one(&offer.job_text(), true)?;

        let cv_texts = cvs
            .iter()
            .map(|cv| cv.resolve_text(self.reader.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let cv_vecs = self.encode_many(&cv_texts)?;

        let scored: Vec<ScoreRecord> = cv_vecs
            .iter()
            .zip(cvs)
            .enumerate()
            .map(|(i, (cv_vec, cv))| self.record(cv_vec, &job_vec, Some(cv.candidate_id(i))))
            .collect();

        debug!(candidates = cvs.len(), top_k, "Ranked candidates for offer");
        Ok(rank_top_k(scored, top_k))
    }

    /// Ranks the CV files found in `dir`.
    pub fn rank_candidates_in_dir(
        &self,
        offer: &OfferInput,
        dir: &Path,
        top_k: i64,
    ) -> Result<DirectoryRanking, ScoringError> {
        let files = discover_cv_files(dir)?;
        if files.is_empty() {
            info!(dir = %dir.display(), "No CV files to rank");
            return Ok(DirectoryRanking::NoCandidates {
                dir: dir.to_path_buf(),
            });
        }

        let cvs: Vec<CvInput> = files.into_iter().map(CvInput::Path).collect();
        Ok(DirectoryRanking::Ranked(
            self.rank_candidates_for_offer(offer, &cvs, top_k)?,
        ))
    }
}
