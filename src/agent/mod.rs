pub mod agent;
pub mod builtin;
pub mod registry;

pub use agent::{Agent, AgentParams};
pub use builtin::{
    register_builtin_agent_factories, ContentCreationAgent, EditContentAgent, PostContentAgent,
    OPENAI_API_KEY,
};
pub use registry::{AgentFactory, AgentRegistry};
