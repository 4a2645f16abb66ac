pub mod executor;
pub mod runner;

pub use executor::{execute_step, StepResult};
pub use runner::WorkflowRunner;
