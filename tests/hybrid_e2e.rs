//! Hybrid orchestration against scripted remote backends.

mod common;

use std::sync::Arc;

use common::fixtures::{PYTHON_CV, python_offer};
use cvmatch::{
    Config, CvInput, FixedRandom, HybridOrchestrator, LlmScorer, LocalScoringService,
    MockChatBackend, RemoteConfig, RemoteScorer, RetryPolicy, ScoringMethod,
};

fn remote(backend: MockChatBackend) -> Arc<dyn RemoteScorer> {
    let config = RemoteConfig {
        api_key: Some("sk-test".to_string()),
        retry: RetryPolicy::immediate(3),
        ..RemoteConfig::default()
    };
    Arc::new(LlmScorer::with_backend(backend, config))
}

#[tokio::test]
async fn test_failing_remote_falls_back_to_local() {
    let local = Arc::new(LocalScoringService::stub());
    let hybrid = HybridOrchestrator::new(local.clone(), Some(remote(MockChatBackend::failing())), 1.0);
    let cv = CvInput::from(PYTHON_CV);

    let result = hybrid.score_cv_vs_offer(&cv, &python_offer()).await.unwrap();
    let expected = local.score_cv_vs_offer(&cv, &python_offer()).unwrap();

    assert_eq!(result.method, ScoringMethod::Local);
    assert_eq!(result.score, expected.score);
    assert_eq!(result.similarity, expected.similarity);
}

#[tokio::test]
async fn test_remote_override_keeps_local_estimate() {
    let local = Arc::new(LocalScoringService::stub());
    let hybrid = HybridOrchestrator::new(local, Some(remote(MockChatBackend::replying("Score: 91"))), 0.5)
        .with_random(Arc::new(FixedRandom(0.2)));

    let result = hybrid
        .score_cv_vs_offer(&CvInput::from(PYTHON_CV), &python_offer())
        .await
        .unwrap();

    assert_eq!(result.method, ScoringMethod::Remote);
    assert_eq!(result.score, 91.0);
    assert!(result.local_score > 50.0);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["method"], "remote");
    assert_eq!(json["metadata"]["method"], "remote");
    assert_eq!(json["metadata"]["local"]["encoder"], "lexical-stub-384");
}

#[tokio::test]
async fn test_config_without_credential_is_local_only() {
    let config = Config {
        api_key: None,
        ..Config::default()
    };
    let hybrid = HybridOrchestrator::from_config(&config, Arc::new(LocalScoringService::stub()));

    assert!(!hybrid.remote_available());
    let result = hybrid
        .score_cv_vs_offer(&CvInput::from(PYTHON_CV), &python_offer())
        .await
        .unwrap();
    assert_eq!(result.method, ScoringMethod::Local);
    assert_eq!(result.remote_score, None);
}
