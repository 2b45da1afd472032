use super::*;
use crate::document::{CvInput, DocumentError, DocumentReader};
use crate::text::{OfferInput, OfferRecord};
use proptest::prelude::*;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn record(score: f32, id: &str) -> ScoreRecord {
    ScoreRecord {
        score,
        similarity: None,
        identifier: Some(id.to_string()),
        metadata: Default::default(),
    }
}

fn offer(value: serde_json::Value) -> OfferInput {
    serde_json::from_value(value).expect("valid offer")
}

fn python_offer() -> OfferInput {
    offer(json!({
        "id": 1,
        "title": "Senior Python Developer",
        "keywords": ["python", "machine learning"],
    }))
}

fn accountant_offer() -> OfferInput {
    offer(json!({
        "id": "acc-2",
        "title": "Senior Accountant",
        "keywords": ["excel", "audit"],
    }))
}

const PYTHON_CV: &str = "Python developer, 3 years, machine learning, PyTorch";

/// Serves fixed text for any path.
struct FixedReader(&'static str);

impl DocumentReader for FixedReader {
    fn read_any(&self, _path: &Path) -> Result<String, DocumentError> {
        Ok(self.0.to_string())
    }
}

mod similarity_tests {
    use super::*;

    #[test]
    fn test_to_score_anchors() {
        assert_eq!(to_score(-1.0), 0.0);
        assert_eq!(to_score(0.0), 50.0);
        assert_eq!(to_score(1.0), 100.0);
    }

    #[test]
    fn test_to_score_clamps() {
        assert_eq!(to_score(-3.0), 0.0);
        assert_eq!(to_score(1.5), 100.0);
    }

    #[test]
    fn test_cosine_identical_and_opposite() {
        let v = [0.3, -1.2, 4.0];
        let neg: Vec<f32> = v.iter().map(|x| -x).collect();

        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
        assert!((cosine_similarity(&v, &neg) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_cosine_does_not_assume_unit_vectors() {
        assert!((cosine_similarity(&[2.0, 0.0], &[5.0, 0.0]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_uses_shared_prefix() {
        let sim = cosine_similarity(&[1.0, 0.0, 9.0], &[1.0, 0.0]);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_to_score_in_range(s in -10.0f32..10.0) {
            let score = to_score(s);
            prop_assert!((0.0..=100.0).contains(&score));
        }

        #[test]
        fn prop_to_score_monotonic(a in -2.0f32..2.0, b in -2.0f32..2.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(to_score(lo) <= to_score(hi));
        }

        #[test]
        fn prop_cosine_self_is_one(v in proptest::collection::vec(0.1f32..10.0, 1..32)) {
            prop_assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-4);
        }
    }
}

mod ranking_tests {
    use super::*;

    #[test]
    fn test_stable_descending_sort() {
        let ranked = rank_top_k(
            vec![record(70.0, "A"), record(90.0, "B"), record(70.0, "C")],
            3,
        );
        let ids: Vec<_> = ranked.iter().map(|r| r.identifier.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_top_k_coerced_to_one() {
        for top_k in [0, -5] {
            let ranked = rank_top_k(vec![record(10.0, "A"), record(20.0, "B")], top_k);
            assert_eq!(ranked.len(), 1);
            assert_eq!(ranked[0].identifier.as_deref(), Some("B"));
        }
    }

    #[test]
    fn test_top_k_larger_than_input() {
        let ranked = rank_top_k(vec![record(10.0, "A")], 50);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_clamp_top_k() {
        assert_eq!(clamp_top_k(-1), 1);
        assert_eq!(clamp_top_k(0), 1);
        assert_eq!(clamp_top_k(7), 7);
    }

    #[test]
    fn test_directory_ranking_helpers() {
        let empty: DirectoryRanking = DirectoryRanking::NoCandidates {
            dir: PathBuf::from("/cvs"),
        };
        assert!(empty.is_empty_dir());
        assert!(empty.records().is_none());
        assert_eq!(empty.to_string(), "No CV found in /cvs");

        let ranked: DirectoryRanking = DirectoryRanking::Ranked(vec![]);
        assert!(!ranked.is_empty_dir());
        assert_eq!(ranked.records().map(<[_]>::len), Some(0));
    }

    #[test]
    fn test_scoring_method_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(ScoringMethod::Remote).unwrap(),
            json!("remote")
        );
        assert_eq!(ScoringMethod::Local.to_string(), "local");
    }
}

mod service_tests {
    use super::*;

    #[test]
    fn test_python_cv_prefers_python_offer() {
        let service = LocalScoringService::stub();
        let cv = CvInput::from(PYTHON_CV);

        let python = service.score_cv_vs_offer(&cv, &python_offer()).unwrap();
        let accountant = service.score_cv_vs_offer(&cv, &accountant_offer()).unwrap();

        assert!(python.score > accountant.score);
        assert_eq!(python.identifier.as_deref(), Some("1"));
        assert_eq!(accountant.identifier.as_deref(), Some("acc-2"));
    }

    #[test]
    fn test_record_shape() {
        let service = LocalScoringService::stub();
        let result = service
            .score_cv_vs_offer(&CvInput::from(PYTHON_CV), &OfferInput::from("Python"))
            .unwrap();

        let similarity = result.similarity.expect("local scores carry similarity");
        assert!((-1.0..=1.0).contains(&similarity));
        assert!((result.score - to_score(similarity)).abs() < 1e-4);
        assert!(result.identifier.is_none());
        assert_eq!(
            result.metadata.get("encoder").and_then(|v| v.as_str()),
            Some(service.encoder().name())
        );
    }

    #[test]
    fn test_recommend_offers_sorted_and_truncated() {
        let service = LocalScoringService::stub();
        let offers = vec![
            accountant_offer(),
            python_offer(),
            OfferInput::Record(OfferRecord::titled("Gardener")),
        ];

        let results = service
            .recommend_offers_for_cv(&CvInput::from(PYTHON_CV), &offers, 2)
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].identifier.as_deref(), Some("1"));
        assert!(results[0].score >= results[1].score);
    }

    #[test]
    fn test_recommend_matches_single_scores() {
        let service = LocalScoringService::stub();
        let cv = CvInput::from(PYTHON_CV);
        let offers = vec![python_offer(), accountant_offer()];

        let batch = service.recommend_offers_for_cv(&cv, &offers, 10).unwrap();
        let single = service.score_cv_vs_offer(&cv, &python_offer()).unwrap();

        assert!((batch[0].score - single.score).abs() < 1e-5);
    }

    #[test]
    fn test_recommend_zero_top_k_returns_one() {
        let service = LocalScoringService::stub();
        let offers = vec![python_offer(), accountant_offer()];

        let results = service
            .recommend_offers_for_cv(&CvInput::from(PYTHON_CV), &offers, 0)
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_rank_candidates_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alice.txt");
        std::fs::write(&path, "Senior Python developer machine learning").unwrap();

        let service = LocalScoringService::stub();
        let cvs = vec![
            CvInput::from("Accountant with audit and excel experience"),
            CvInput::Path(path),
        ];

        let results = service
            .rank_candidates_for_offer(&python_offer(), &cvs, 10)
            .unwrap();

        let ids: Vec<_> = results.iter().map(|r| r.identifier.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["alice", "cv_0"]);
    }

    #[test]
    fn test_unreadable_cv_propagates() {
        let service = LocalScoringService::stub();
        let cv = CvInput::Path(PathBuf::from("/nonexistent/cv.txt"));

        let err = service.score_cv_vs_offer(&cv, &python_offer()).unwrap_err();
        assert!(matches!(err, ScoringError::Document(_)));
    }

    #[test]
    fn test_injected_reader() {
        let service = LocalScoringService::stub().with_reader(Arc::new(FixedReader(PYTHON_CV)));
        let via_reader = service
            .score_cv_vs_offer(&CvInput::Path(PathBuf::from("virtual.pdf")), &python_offer())
            .unwrap();
        let via_text = service
            .score_cv_vs_offer(&CvInput::from(PYTHON_CV), &python_offer())
            .unwrap();

        assert_eq!(via_reader.score, via_text.score);
    }

    #[test]
    fn test_rank_empty_directory() {
        let dir = TempDir::new().unwrap();
        let service = LocalScoringService::stub();

        let ranking = service
            .rank_candidates_in_dir(&python_offer(), dir.path(), 10)
            .unwrap();
        assert!(ranking.is_empty_dir());
    }

    #[test]
    fn test_rank_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bob.txt"), "excel audit accountant").unwrap();
        std::fs::write(dir.path().join("alice.txt"), "python machine learning").unwrap();

        let service = LocalScoringService::stub();
        let ranking = service
            .rank_candidates_in_dir(&python_offer(), dir.path(), 1)
            .unwrap();

        let records = ranking.records().expect("ranked");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identifier.as_deref(), Some("alice"));
    }
}
