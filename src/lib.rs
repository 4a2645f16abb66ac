pub mod agent;
pub mod error;
pub mod flow;
pub mod llm;
pub mod runtime;
pub mod utils;

pub use agent::{
    register_builtin_agent_factories, Agent, AgentFactory, AgentParams, AgentRegistry,
    ContentCreationAgent, EditContentAgent, PostContentAgent, OPENAI_API_KEY,
};
pub use error::{AutoflowError, Result};
pub use flow::{
    load_workflow_from_path, load_workflow_from_str, load_workflow_from_value, StepConfig,
};
pub use llm::{DynLlmClient, LlmClient, LlmRequest, LocalEchoClient};
pub use runtime::{execute_step, StepResult, WorkflowRunner};

#[cfg(feature = "openai-client")]
pub use llm::OpenAiClient;
