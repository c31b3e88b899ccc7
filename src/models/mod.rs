// Gateway module for models - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod factory;
mod ollama_chat;
mod planner;
mod traits;
mod types;

// Public re-exports - the ONLY way to access model functionality
pub use factory::ModelFactory;
pub use ollama_chat::OllamaChat;
pub use planner::{policy_prompt, PlanGenerator};
pub use traits::Oracle;
pub use types::{ChatMessage, MessageRole, ModelConfig};
