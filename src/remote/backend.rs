use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;

use super::error::RemoteError;

/// A single-message chat completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
/// Chat-completion transport used by the remote scorer.
pub trait ChatBackend: Send + Sync {
    /// Sends the request and returns the first choice's text content.
    async fn complete(&self, request: &ChatRequest) -> Result<String, RemoteError>;
}

/// OpenAI-compatible chat completion API.
pub struct OpenAiChatBackend {
    client: Client<OpenAIConfig>,
}

impl std::fmt::Debug for OpenAiChatBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatBackend").finish_non_exhaustive()
    }
}

impl OpenAiChatBackend {
    pub fn new(api_key: &str, api_base: Option<&str>) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base) = api_base {
            config = config.with_api_base(base);
        }

        Self {
            client: Client::with_config(config),
        }
    }
}

#[async_trait]
impl ChatBackend for OpenAiChatBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<String, RemoteError> {
        let invalid = |e: async_openai::error::OpenAIError| RemoteError::InvalidRequest {
            reason: e.to_string(),
        };

        let message: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
            .content(request.prompt.as_str())
            .build()
            .map_err(invalid)?
            .into();

        let body = CreateChatCompletionRequestArgs::default()
            .model(request.model.as_str())
            .messages([message])
            .max_completion_tokens(request.max_tokens)
            .temperature(request.temperature)
            .build()
            .map_err(invalid)?;

        let response = self
            .client
            .chat()
            .create(body)
            .await
            .map_err(|e| RemoteError::Transport {
                reason: e.to_string(),
            })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(RemoteError::EmptyResponse)
    }
}
