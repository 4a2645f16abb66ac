use std::path::Path;

use tracing::info;

use crate::agent::AgentRegistry;
use crate::error::Result;
use crate::flow::{load_workflow_from_path, load_workflow_from_str, StepConfig};

use super::executor::{execute_step, StepResult};

/// 工作流运行器：按顺序驱动所有步骤，单步失败不会中断后续步骤。
pub struct WorkflowRunner {
    registry: AgentRegistry,
}

impl WorkflowRunner {
    pub fn new(registry: AgentRegistry) -> Self {
        Self { registry }
    }

    pub fn with_builtin_agents() -> Self {
        Self::new(AgentRegistry::builtin())
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub async fn run_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<StepResult>> {
        let steps = load_workflow_from_path(path)?;
        self.run_steps(&steps).await
    }

    pub async fn run_str(&self, text: &str) -> Result<Vec<StepResult>> {
        let steps = load_workflow_from_str(text)?;
        self.run_steps(&steps).await
    }

    /// Run every step in ascending index order, accumulating one result per
    /// step. Only structural errors abort the run.
    pub async fn run_steps(&self, steps: &[StepConfig]) -> Result<Vec<StepResult>> {
        info!(steps = steps.len(), "running workflow");
        let mut results = Vec::with_capacity(steps.len());
        for (i, step) in steps.iter().enumerate() {
            let result = execute_step(&self.registry, i + 1, step).await?;
            results.push(result);
        }
        Ok(results)
    }

    /// Re-execute one step and return a replacement result for its index.
    /// Interactive callers use this to retry a failed step after fixing its
    /// parameters, without re-running the whole workflow.
    pub async fn rerun_step(&self, index: usize, step: &StepConfig) -> Result<StepResult> {
        info!(step = index, agent = %step.agent, "re-running step");
        execute_step(&self.registry, index, step).await
    }
}
