use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::backend::{ChatBackend, ChatRequest};
use super::error::RemoteError;

/// One scripted backend behavior.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Respond with this content.
    Text(String),
    /// Fail with a transport error.
    Fail,
    /// Sleep before responding with the content (drives timeouts).
    Delayed(Duration, String),
}

/// Scripted [`ChatBackend`]: replays `script` in order, then repeats `fallback`.
pub struct MockChatBackend {
    script: Mutex<VecDeque<MockReply>>,
    fallback: MockReply,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatRequest>>,
}

impl MockChatBackend {
    pub fn new(script: Vec<MockReply>, fallback: MockReply) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Always answers `content`.
    pub fn replying(content: &str) -> Self {
        Self::new(vec![], MockReply::Text(content.to_string()))
    }

    /// Always fails.
    pub fn failing() -> Self {
        Self::new(vec![], MockReply::Fail)
    }

    /// Number of `complete` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn next_reply(&self) -> MockReply {
        let mut script = self
            .script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        script.pop_front().unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<String, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        match self.next_reply() {
            MockReply::Text(content) => Ok(content),
            MockReply::Fail => Err(RemoteError::Transport {
                reason: "mock backend failure".to_string(),
            }),
            MockReply::Delayed(delay, content) => {
                tokio::time::sleep(delay).await;
                Ok(content)
            }
        }
    }
}
