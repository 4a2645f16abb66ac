use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

#[cfg(feature = "openai-client")]
use crate::error::AutoflowError;
#[cfg(feature = "openai-client")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "openai-client")]
use tracing::instrument;

const DEFAULT_TEMPERATURE: f32 = 0.3;

/// One text-generation call: a user prompt, an optional system framing,
/// and a sampling temperature. That is all the content agents need.
#[derive(Clone, Debug)]
pub struct LlmRequest {
    pub system: Option<String>,
    pub user: String,
    pub temperature: f32,
}

impl LlmRequest {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            system: None,
            user: user.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate text for one request, returning only the model's reply.
    async fn complete(&self, request: &LlmRequest) -> Result<String>;
}

pub type DynLlmClient = Arc<dyn LlmClient>;

/// Offline stand-in that replies with the prompt itself. Lets tests and
/// demos exercise the content pipeline without a credential.
#[derive(Default, Clone)]
pub struct LocalEchoClient;

#[async_trait]
impl LlmClient for LocalEchoClient {
    async fn complete(&self, request: &LlmRequest) -> Result<String> {
        Ok(request.user.clone())
    }
}

#[cfg(feature = "openai-client")]
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[cfg(feature = "openai-client")]
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[cfg(feature = "openai-client")]
#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[cfg(feature = "openai-client")]
#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[cfg(feature = "openai-client")]
#[derive(Deserialize)]
struct ChatReply {
    content: String,
}

/// chat-completions 客户端。凭证校验发生在构造之前（见 ContentCreationAgent）。
#[cfg(feature = "openai-client")]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[cfg(feature = "openai-client")]
impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(feature = "openai-client")]
#[async_trait]
impl LlmClient for OpenAiClient {
    #[instrument(skip(self))]
    async fn complete(&self, request: &LlmRequest) -> Result<String> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.user,
        });
        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AutoflowError::Execution(format!("text generation request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AutoflowError::Execution(format!(
                "text generation service returned status {status}"
            )));
        }

        let completion: ChatCompletion = response.json().await.map_err(|e| {
            AutoflowError::Execution(format!("unreadable completion payload: {e}"))
        })?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AutoflowError::Execution("completion contained no choices".to_string()))
    }
}
