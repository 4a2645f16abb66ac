use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::agent::{AgentParams, AgentRegistry};
use crate::error::Result;
use crate::flow::StepConfig;

/// 单个步骤的执行结果。每个步骤恰好产生一条，顺序与工作流一致。
#[derive(Clone, Debug, Serialize)]
pub struct StepResult {
    /// 1-based position in the workflow.
    pub index: usize,
    pub agent: String,
    pub parameters: AgentParams,
    pub output: Option<Value>,
    pub success: bool,
    pub error: Option<String>,
    pub elapsed: Duration,
}

/// Execute one step and capture its outcome.
///
/// Structural failures (unknown agent) propagate to the caller; anything
/// raised from the agent's `run` is contained in the returned result so a
/// failing step never aborts the rest of the workflow.
pub async fn execute_step(
    registry: &AgentRegistry,
    index: usize,
    step: &StepConfig,
) -> Result<StepResult> {
    let agent = registry.build(&step.agent, step.parameters.clone())?;
    agent.log(&format!("Executing step {index}"));

    let started = Instant::now();
    let outcome = agent.run().await;
    let elapsed = started.elapsed();

    match outcome {
        Ok(output) => {
            debug!(step = index, agent = %step.agent, ?elapsed, "step finished");
            Ok(StepResult {
                index,
                agent: step.agent.clone(),
                parameters: step.parameters.clone(),
                output: Some(output),
                success: true,
                error: None,
                elapsed,
            })
        }
        Err(err) => {
            warn!(step = index, agent = %step.agent, error = %err, "step failed");
            Ok(StepResult {
                index,
                agent: step.agent.clone(),
                parameters: step.parameters.clone(),
                output: None,
                success: false,
                error: Some(err.to_string()),
                elapsed,
            })
        }
    }
}
