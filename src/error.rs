use thiserror::Error;

pub type Result<T> = std::result::Result<T, AutoflowError>;

#[derive(Debug, Error)]
pub enum AutoflowError {
    #[error("agent `{agent}` missing required parameters: {}", .fields.join(", "))]
    MissingParameters {
        agent: &'static str,
        fields: Vec<&'static str>,
    },
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("malformed workflow: {0}")]
    MalformedWorkflow(String),
    #[error("agent `{name}` not registered; known agents: {}", .known.join(", "))]
    UnknownAgent { name: String, known: Vec<String> },
    #[error("agent execution failed: {0}")]
    Execution(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AutoflowError {
    /// 结构级错误中止整个工作流；Agent 级错误由执行器捕获进结果。
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            AutoflowError::MalformedWorkflow(_) | AutoflowError::UnknownAgent { .. }
        )
    }
}
