use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{AutoflowError, Result};
use crate::llm::{DynLlmClient, LlmRequest};
use crate::utils::text::summarize;

#[cfg(feature = "openai-client")]
use crate::llm::OpenAiClient;

use super::agent::{Agent, AgentParams};
use super::registry::AgentRegistry;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// 内容生成 Agent：调用文本生成模型，凭证缺失时在任何网络调用前报错。
pub struct ContentCreationAgent {
    config: AgentParams,
    client: Option<DynLlmClient>,
}

impl ContentCreationAgent {
    pub fn new(config: AgentParams) -> Self {
        Self {
            config,
            client: None,
        }
    }

    /// Use a caller-supplied client instead of building one from the
    /// environment. Tests pair this with `LocalEchoClient`.
    pub fn with_client(config: AgentParams, client: DynLlmClient) -> Self {
        Self {
            config,
            client: Some(client),
        }
    }

    fn prompt(&self) -> String {
        if let Some(prompt) = self.config.get("prompt").and_then(Value::as_str) {
            return prompt.to_string();
        }
        let content_type = self
            .config
            .get("content_type")
            .and_then(Value::as_str)
            .unwrap_or("post");
        let audience = self
            .config
            .get("audience")
            .and_then(Value::as_str)
            .unwrap_or("a general audience");
        let tone = self
            .config
            .get("tone")
            .and_then(Value::as_str)
            .unwrap_or("neutral");
        format!("Write a {content_type} for {audience} in a {tone} tone.")
    }

    fn client(&self) -> Result<DynLlmClient> {
        match &self.client {
            Some(client) => Ok(Arc::clone(client)),
            None => self.env_client(),
        }
    }

    #[cfg(feature = "openai-client")]
    fn env_client(&self) -> Result<DynLlmClient> {
        let api_key = std::env::var(OPENAI_API_KEY).map_err(|_| {
            AutoflowError::Configuration(format!(
                "{OPENAI_API_KEY} is not set; ContentCreationAgent cannot call the model"
            ))
        })?;
        let model = self
            .config
            .get("model")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_MODEL)
            .to_string();
        Ok(Arc::new(OpenAiClient::new(api_key, model)) as DynLlmClient)
    }

    #[cfg(not(feature = "openai-client"))]
    fn env_client(&self) -> Result<DynLlmClient> {
        Err(AutoflowError::Configuration(
            "built without the `openai-client` feature; supply a client via with_client".into(),
        ))
    }
}

#[async_trait]
impl Agent for ContentCreationAgent {
    fn name(&self) -> &'static str {
        "ContentCreationAgent"
    }

    fn config(&self) -> &AgentParams {
        &self.config
    }

    async fn run(&self) -> Result<Value> {
        self.validate()?;
        let client = self.client()?;
        self.log("Generating content");
        let mut request =
            LlmRequest::new(self.prompt()).with_system("You are a content creation assistant.");
        if let Some(temperature) = self.config.get("temperature").and_then(Value::as_f64) {
            request = request.with_temperature(temperature as f32);
        }
        let content = client.complete(&request).await?;
        Ok(json!({ "content": content.trim() }))
    }
}

/// 内容编辑 Agent：纯占位实现，无外部依赖。
pub struct EditContentAgent {
    config: AgentParams,
}

impl EditContentAgent {
    pub fn new(config: AgentParams) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Agent for EditContentAgent {
    fn name(&self) -> &'static str {
        "EditContentAgent"
    }

    fn config(&self) -> &AgentParams {
        &self.config
    }

    async fn run(&self) -> Result<Value> {
        self.validate()?;
        self.log("Editing content");
        match self.config.get("content") {
            None | Some(Value::Null) => Ok(json!({ "edited": true })),
            Some(Value::String(content)) => {
                Ok(json!({ "content": format!("Edited: {}", summarize(content)) }))
            }
            Some(_) => Err(AutoflowError::Configuration(
                "`content` must be a string".into(),
            )),
        }
    }
}

/// 内容发布 Agent：占位实现，只记录目标平台。
pub struct PostContentAgent {
    config: AgentParams,
}

impl PostContentAgent {
    pub fn new(config: AgentParams) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Agent for PostContentAgent {
    fn name(&self) -> &'static str {
        "PostContentAgent"
    }

    fn config(&self) -> &AgentParams {
        &self.config
    }

    fn required_parameters(&self) -> &'static [&'static str] {
        &["platform"]
    }

    async fn run(&self) -> Result<Value> {
        self.validate()?;
        let platform = match self.config.get("platform").and_then(Value::as_str) {
            Some(platform) => platform.to_string(),
            None => {
                return Err(AutoflowError::Configuration(
                    "`platform` must be a string".into(),
                ))
            }
        };
        let content = self
            .config
            .get("content")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        self.log(&format!("Posting to {platform}"));
        Ok(json!({
            "posted": true,
            "platform": platform,
            "content": content,
        }))
    }
}

pub fn register_builtin_agent_factories(registry: &mut AgentRegistry) {
    registry.register(
        "ContentCreationAgent",
        Arc::new(|params| Ok(Arc::new(ContentCreationAgent::new(params)) as Arc<dyn Agent>)),
    );

    registry.register(
        "EditContentAgent",
        Arc::new(|params| Ok(Arc::new(EditContentAgent::new(params)) as Arc<dyn Agent>)),
    );

    registry.register(
        "PostContentAgent",
        Arc::new(|params| Ok(Arc::new(PostContentAgent::new(params)) as Arc<dyn Agent>)),
    );
}
