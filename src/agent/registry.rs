use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{AutoflowError, Result};

use super::agent::{Agent, AgentParams};
use super::builtin::register_builtin_agent_factories;

pub type AgentFactory = Arc<dyn Fn(AgentParams) -> Result<Arc<dyn Agent>> + Send + Sync>;

/// Agent 注册表：名称到构造器的映射，启动时构建一次，此后只读。
#[derive(Default, Clone)]
pub struct AgentRegistry {
    factories: HashMap<String, AgentFactory>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry pre-populated with every builtin agent.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        register_builtin_agent_factories(&mut registry);
        registry
    }

    pub fn register<T: Into<String>>(&mut self, name: T, factory: AgentFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn resolve(&self, name: &str) -> Result<&AgentFactory> {
        self.factories
            .get(name)
            .ok_or_else(|| AutoflowError::UnknownAgent {
                name: name.to_string(),
                known: self.known_agents(),
            })
    }

    /// Construct a fresh agent instance for one step.
    pub fn build(&self, name: &str, params: AgentParams) -> Result<Arc<dyn Agent>> {
        let factory = self.resolve(name)?;
        factory(params)
    }

    pub fn has_agent(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered agent names, sorted for stable error messages.
    pub fn known_agents(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }
}
