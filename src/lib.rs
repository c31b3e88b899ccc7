pub mod agents;
pub mod app;
pub mod cli;
pub mod constants;
pub mod models;
pub mod ollama;
pub mod runtime;
pub mod session;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use app::{load_config, Config};
pub use models::{ModelFactory, Oracle, PlanGenerator};
pub use runtime::{Orchestrator, Workflow};
pub use utils::GitmateError;
