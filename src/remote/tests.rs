use super::*;
use crate::document::CvInput;
use crate::text::{OfferInput, OfferRecord};
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;

fn config(attempts: u32) -> RemoteConfig {
    RemoteConfig {
        api_key: Some("sk-test".to_string()),
        retry: RetryPolicy::immediate(attempts),
        ..RemoteConfig::default()
    }
}

fn offer() -> OfferInput {
    serde_json::from_value(json!({
        "title": "Senior Python Developer",
        "description": "Python for AI projects",
        "keywords": ["python", "machine learning", "api"],
    }))
    .unwrap()
}

mod parse_tests {
    use super::*;

    #[test]
    fn test_plain_integer() {
        assert_eq!(parse_score("85"), Some(85));
        assert_eq!(parse_score("  42\n"), Some(42));
    }

    #[test]
    fn test_zero_is_valid() {
        assert_eq!(parse_score("0"), Some(0));
    }

    #[test]
    fn test_bounds() {
        assert_eq!(parse_score("100"), Some(100));
        assert_eq!(parse_score("101"), None);
    }

    #[test]
    fn test_embedded_number() {
        assert_eq!(parse_score("Score: 78/100"), Some(78));
        assert_eq!(parse_score("I would say 250 then 64"), Some(64));
    }

    #[test]
    fn test_negative_falls_back_to_digits() {
        assert_eq!(parse_score("-5"), Some(5));
    }

    #[test]
    fn test_long_numbers_are_not_split() {
        assert_eq!(parse_score("12345"), None);
    }

    #[test]
    fn test_no_number() {
        assert_eq!(parse_score("excellent match"), None);
        assert_eq!(parse_score(""), None);
    }
}

mod prompt_tests {
    use super::*;

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_prompt_truncates_inputs() {
        let job = "j".repeat(2000);
        let cv = "é".repeat(3000);

        let prompt = build_scoring_prompt(&cv, &job);

        assert!(prompt.contains(&"j".repeat(1500)));
        assert!(!prompt.contains(&"j".repeat(1501)));
        assert!(prompt.contains(&"é".repeat(2500)));
        assert!(!prompt.contains(&"é".repeat(2501)));
    }

    #[test]
    fn test_prompt_contains_bands() {
        let prompt = build_scoring_prompt("cv", "job");
        for band in ["90-100", "75-89", "60-74", "40-59", "20-39", "0-19"] {
            assert!(prompt.contains(band), "missing band {band}");
        }
        assert!(prompt.contains("integer between 0 and 100"));
    }
}

mod retry_tests {
    use super::*;

    #[test]
    fn test_linear_backoff() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        assert_eq!(policy.delay_after(1), Some(Duration::from_secs(1)));
        assert_eq!(policy.delay_after(2), Some(Duration::from_secs(2)));
        assert_eq!(policy.delay_after(3), None);
    }

    #[test]
    fn test_at_least_one_attempt() {
        let policy = RetryPolicy::new(0, Duration::from_secs(1));
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.delay_after(1), None);
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.base_delay(), Duration::from_secs(1));
    }
}

mod scorer_tests {
    use super::*;

    #[test]
    fn test_missing_credential_is_fatal() {
        let result = LlmScorer::new(RemoteConfig::default());
        assert!(matches!(result, Err(RemoteError::MissingCredential { .. })));

        let blank = RemoteConfig {
            api_key: Some("  ".to_string()),
            ..RemoteConfig::default()
        };
        assert!(LlmScorer::new(blank).is_err());
    }

    #[tokio::test]
    async fn test_score_success() {
        let scorer = LlmScorer::with_backend(MockChatBackend::replying("82"), config(3));

        let score = scorer
            .score(&CvInput::from("Python developer, PyTorch"), &offer())
            .await;

        assert_eq!(score, Some(82));
        assert_eq!(scorer.backend().calls(), 1);
    }

    #[tokio::test]
    async fn test_request_shape() {
        let scorer = LlmScorer::with_backend(MockChatBackend::replying("50"), config(1));
        scorer
            .score(&CvInput::from("Python developer"), &offer())
            .await;

        let request = scorer.backend().last_request().expect("request recorded");
        assert_eq!(request.model, "gpt-3.5-turbo");
        assert_eq!(request.max_tokens, 10);
        assert!((request.temperature - 0.1).abs() < f32::EPSILON);
        assert!(request.prompt.contains("Title: Senior Python Developer"));
        assert!(request.prompt.contains("Keywords: python, machine learning, api"));
        assert!(request.prompt.contains("Python developer"));
    }

    #[tokio::test]
    async fn test_retries_then_succeeds() {
        let backend = MockChatBackend::new(
            vec![MockReply::Fail, MockReply::Fail],
            MockReply::Text("70".to_string()),
        );
        let scorer = LlmScorer::with_backend(backend, config(3));

        let score = scorer.score(&CvInput::from("cv"), &offer()).await;

        assert_eq!(score, Some(70));
        assert_eq!(scorer.backend().calls(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_retries_yield_none() {
        let scorer = LlmScorer::with_backend(MockChatBackend::failing(), config(3));

        let score = scorer.score(&CvInput::from("cv"), &offer()).await;

        assert_eq!(score, None);
        assert_eq!(scorer.backend().calls(), 3);
    }

    #[tokio::test]
    async fn test_scoreless_answer_is_not_retried() {
        let scorer = LlmScorer::with_backend(MockChatBackend::replying("great fit"), config(3));

        let score = scorer.score(&CvInput::from("cv"), &offer()).await;

        assert_eq!(score, None);
        assert_eq!(scorer.backend().calls(), 1);
    }

    #[tokio::test]
    async fn test_timeout_counts_as_failure() {
        let backend = MockChatBackend::new(
            vec![MockReply::Delayed(Duration::from_secs(5), "99".to_string())],
            MockReply::Text("40".to_string()),
        );
        let remote = RemoteConfig {
            request_timeout: Duration::from_millis(20),
            ..config(2)
        };
        let scorer = LlmScorer::with_backend(backend, remote);

        let score = scorer.score(&CvInput::from("cv"), &offer()).await;

        assert_eq!(score, Some(40));
        assert_eq!(scorer.backend().calls(), 2);
    }

    #[tokio::test]
    async fn test_unreadable_cv_yields_none_without_call() {
        let scorer = LlmScorer::with_backend(MockChatBackend::replying("90"), config(3));

        let score = scorer
            .score(&CvInput::Path(PathBuf::from("/nonexistent/cv.pdf")), &offer())
            .await;

        assert_eq!(score, None);
        assert_eq!(scorer.backend().calls(), 0);
    }

    #[tokio::test]
    async fn test_batch_score_preserves_order() {
        let backend = MockChatBackend::new(
            vec![
                MockReply::Text("10".to_string()),
                MockReply::Text("nothing".to_string()),
            ],
            MockReply::Text("30".to_string()),
        );
        let scorer = LlmScorer::with_backend(backend, config(1));
        let cvs = vec![CvInput::from("a"), CvInput::from("b"), CvInput::from("c")];

        let results = scorer
            .batch_score(&cvs, &OfferInput::Record(OfferRecord::titled("Dev")), Duration::ZERO)
            .await;

        let scores: Vec<_> = results.iter().map(|r| (r.index, r.score)).collect();
        assert_eq!(scores, vec![(0, Some(10)), (1, None), (2, Some(30))]);
        assert_eq!(results[1].cv, CvInput::from("b"));
    }

    #[tokio::test]
    async fn test_remote_scorer_trait_object() {
        let scorer: std::sync::Arc<dyn RemoteScorer> = std::sync::Arc::new(
            LlmScorer::with_backend(MockChatBackend::replying("66"), config(1)),
        );

        let score = scorer
            .score_cv_vs_offer(&CvInput::from("cv"), &offer())
            .await;
        assert_eq!(score, Some(66));
    }
}
