use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::{AutoflowError, Result};

/// Parameter mapping passed to an agent at construction time.
pub type AgentParams = Map<String, Value>;

#[async_trait]
pub trait Agent: Send + Sync {
    fn name(&self) -> &'static str;

    /// The parameter mapping stored at construction.
    fn config(&self) -> &AgentParams;

    /// Parameter names that must be present before `run` does any work.
    fn required_parameters(&self) -> &'static [&'static str] {
        &[]
    }

    /// Perform the agent's unit of work. Construction must not do I/O;
    /// this is the only place side effects happen.
    async fn run(&self) -> Result<Value>;

    fn validate(&self) -> Result<()> {
        let missing: Vec<&'static str> = self
            .required_parameters()
            .iter()
            .copied()
            .filter(|field| !self.config().contains_key(*field))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AutoflowError::MissingParameters {
                agent: self.name(),
                fields: missing,
            })
        }
    }

    /// Trace line tagged with the agent's identity. Side effect only.
    fn log(&self, message: &str) {
        tracing::info!(agent = self.name(), "{message}");
    }
}
