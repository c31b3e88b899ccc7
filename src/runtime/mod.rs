/// Runtime orchestrator module - Gateway

mod orchestrator;
mod workflow;

pub use orchestrator::Orchestrator;
pub use workflow::{is_quit, IterationReport, Outcome, Step, Workflow, PIPELINE};
