use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::agent::AgentParams;
use crate::error::{AutoflowError, Result};

/// 工作流中的一个步骤：Agent 类型名加参数映射。
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StepConfig {
    pub agent: String,
    #[serde(default)]
    pub parameters: AgentParams,
}

impl StepConfig {
    pub fn new<T: Into<String>>(agent: T, parameters: AgentParams) -> Self {
        Self {
            agent: agent.into(),
            parameters,
        }
    }

    /// Validate one raw step element. `index` is 1-based, for messages.
    fn from_value(index: usize, raw: &Value) -> Result<Self> {
        let step = raw.as_object().ok_or_else(|| {
            AutoflowError::MalformedWorkflow(format!("step {index} must be a mapping"))
        })?;
        let agent = match step.get("agent") {
            None => {
                return Err(AutoflowError::MalformedWorkflow(format!(
                    "step {index} missing `agent` key"
                )))
            }
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            Some(_) => {
                return Err(AutoflowError::MalformedWorkflow(format!(
                    "step {index} `agent` must be a non-empty string"
                )))
            }
        };
        let parameters = match step.get("parameters") {
            None | Some(Value::Null) => AgentParams::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(_) => {
                return Err(AutoflowError::MalformedWorkflow(format!(
                    "step {index} `parameters` must be a mapping"
                )))
            }
        };
        Ok(Self { agent, parameters })
    }
}

/// 从 YAML 文本加载步骤序列。缺失的 `steps` 键视为空工作流。
pub fn load_workflow_from_str(text: &str) -> Result<Vec<StepConfig>> {
    let doc: Value = serde_yaml::from_str(text)
        .map_err(|e| AutoflowError::MalformedWorkflow(format!("invalid YAML: {e}")))?;
    load_workflow_from_value(&doc)
}

pub fn load_workflow_from_value(doc: &Value) -> Result<Vec<StepConfig>> {
    let root = match doc {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        _ => {
            return Err(AutoflowError::MalformedWorkflow(
                "workflow root must be a mapping".to_string(),
            ))
        }
    };
    let steps = match root.get("steps") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(steps)) => steps,
        Some(_) => {
            return Err(AutoflowError::MalformedWorkflow(
                "`steps` must be a sequence".to_string(),
            ))
        }
    };
    steps
        .iter()
        .enumerate()
        .map(|(i, raw)| StepConfig::from_value(i + 1, raw))
        .collect()
}

pub fn load_workflow_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<StepConfig>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        AutoflowError::MalformedWorkflow(format!(
            "cannot read workflow file `{}`: {e}",
            path.display()
        ))
    })?;
    load_workflow_from_str(&text)
}
