pub mod loader;

pub use loader::{
    load_workflow_from_path, load_workflow_from_str, load_workflow_from_value, StepConfig,
};
