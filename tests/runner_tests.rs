use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use autoflow::{
    Agent, AgentParams, AgentRegistry, AutoflowError, Result, StepConfig, WorkflowRunner,
};
use serde_json::{json, Value};

/// Fails iff its `fail` parameter is true; otherwise echoes its config.
struct FlakyAgent {
    config: AgentParams,
}

#[async_trait]
impl Agent for FlakyAgent {
    fn name(&self) -> &'static str {
        "flaky"
    }

    fn config(&self) -> &AgentParams {
        &self.config
    }

    async fn run(&self) -> Result<Value> {
        if self
            .config
            .get("fail")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            return Err(AutoflowError::Execution("flaky agent exploded".into()));
        }
        Ok(json!({ "echo": self.config }))
    }
}

/// Records its `label` parameter into a shared log, to observe ordering.
struct RecorderAgent {
    config: AgentParams,
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Agent for RecorderAgent {
    fn name(&self) -> &'static str {
        "recorder"
    }

    fn config(&self) -> &AgentParams {
        &self.config
    }

    async fn run(&self) -> Result<Value> {
        let label = self
            .config
            .get("label")
            .and_then(Value::as_str)
            .unwrap_or("?")
            .to_string();
        self.log.lock().unwrap().push(label.clone());
        Ok(json!({ "label": label }))
    }
}

fn test_registry() -> AgentRegistry {
    let mut registry = AgentRegistry::new();
    registry.register(
        "flaky",
        Arc::new(|params| Ok(Arc::new(FlakyAgent { config: params }) as Arc<dyn Agent>)),
    );
    registry
}

fn recording_registry(log: Arc<Mutex<Vec<String>>>) -> AgentRegistry {
    let mut registry = test_registry();
    registry.register(
        "recorder",
        Arc::new(move |params| {
            Ok(Arc::new(RecorderAgent {
                config: params,
                log: Arc::clone(&log),
            }) as Arc<dyn Agent>)
        }),
    );
    registry
}

fn step(agent: &str, params: Value) -> StepConfig {
    let params = match params {
        Value::Object(map) => map,
        Value::Null => AgentParams::new(),
        other => panic!("test step parameters must be a mapping, got {other}"),
    };
    StepConfig::new(agent, params)
}

#[tokio::test]
async fn produces_one_result_per_step_in_index_order() {
    let runner = WorkflowRunner::new(test_registry());
    let steps = vec![
        step("flaky", json!({ "label": "a" })),
        step("flaky", json!({ "fail": true })),
        step("flaky", json!({ "label": "c" })),
    ];

    let results = runner.run_steps(&steps).await.unwrap();
    assert_eq!(results.len(), 3);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.index, i + 1);
        assert_eq!(result.agent, "flaky");
    }
}

#[tokio::test]
async fn failing_step_is_contained_and_later_steps_still_run() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let runner = WorkflowRunner::new(recording_registry(Arc::clone(&log)));
    let steps = vec![
        step("recorder", json!({ "label": "first" })),
        step("flaky", json!({ "fail": true })),
        step("recorder", json!({ "label": "last" })),
    ];

    let results = runner.run_steps(&steps).await.unwrap();
    assert_eq!(results.len(), 3);

    assert!(results[0].success);
    assert!(!results[1].success);
    assert!(results[1].output.is_none());
    let error = results[1].error.as_deref().unwrap();
    assert!(error.contains("flaky agent exploded"));
    assert!(results[2].success);

    // failure in the middle must not disturb execution order
    assert_eq!(*log.lock().unwrap(), vec!["first", "last"]);
}

#[tokio::test]
async fn empty_workflow_yields_empty_result_sequence() {
    let runner = WorkflowRunner::new(test_registry());
    assert!(runner.run_str("").await.unwrap().is_empty());
    assert!(runner.run_str("steps: []").await.unwrap().is_empty());
    assert!(runner
        .run_str("description: no steps key")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn unknown_agent_aborts_the_whole_run() {
    let runner = WorkflowRunner::new(test_registry());
    let steps = vec![
        step("flaky", json!({})),
        step("does-not-exist", json!({})),
    ];

    let err = runner.run_steps(&steps).await.unwrap_err();
    assert!(matches!(err, AutoflowError::UnknownAgent { .. }));
    assert!(err.is_structural());
    let message = err.to_string();
    assert!(message.contains("does-not-exist"));
    assert!(message.contains("flaky"));
}

#[tokio::test]
async fn malformed_workflow_aborts_before_any_step_runs() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let runner = WorkflowRunner::new(recording_registry(Arc::clone(&log)));
    let source = "steps:\n  - agent: recorder\n    parameters:\n      label: x\n  - not-a-mapping\n";

    let err = runner.run_str(source).await.unwrap_err();
    assert!(matches!(err, AutoflowError::MalformedWorkflow(_)));
    assert!(err.is_structural());
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn rerun_step_yields_a_replacement_for_one_index() {
    let runner = WorkflowRunner::new(test_registry());
    let steps = vec![
        step("flaky", json!({ "label": "a" })),
        step("flaky", json!({ "fail": true })),
    ];

    let mut results = runner.run_steps(&steps).await.unwrap();
    assert!(!results[1].success);

    // caller fixes the parameters and retries just that step
    let fixed = step("flaky", json!({ "fail": false }));
    let replacement = runner.rerun_step(2, &fixed).await.unwrap();
    assert_eq!(replacement.index, 2);
    assert!(replacement.success);

    let first_before = results[0].clone();
    results[1] = replacement;
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.success));
    assert_eq!(results[0].index, first_before.index);
    assert_eq!(results[0].output, first_before.output);
}

#[tokio::test]
async fn deterministic_workflows_are_idempotent_modulo_elapsed() {
    let runner = WorkflowRunner::new(test_registry());
    let steps = vec![
        step("flaky", json!({ "label": "a" })),
        step("flaky", json!({ "fail": true })),
        step("flaky", json!({ "label": "c" })),
    ];

    let first = runner.run_steps(&steps).await.unwrap();
    let second = runner.run_steps(&steps).await.unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.index, b.index);
        assert_eq!(a.agent, b.agent);
        assert_eq!(a.parameters, b.parameters);
        assert_eq!(a.success, b.success);
        assert_eq!(a.output, b.output);
        assert_eq!(a.error, b.error);
    }
}

#[tokio::test]
async fn runs_workflow_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "steps:\n  - agent: flaky\n    parameters:\n      label: from-file\n"
    )
    .unwrap();

    let runner = WorkflowRunner::new(test_registry());
    let results = runner.run_path(file.path()).await.unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].success);
    assert_eq!(
        results[0].output.as_ref().unwrap()["echo"]["label"],
        json!("from-file")
    );
}
