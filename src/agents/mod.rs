// Gateway module for agents - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod executor;
mod git;
mod parser;
mod policy;
mod types;

// Public re-exports - the ONLY way to access agent functionality
pub use executor::{shell_quote, CommandExecutor, Shell, SystemShell};
pub use git::{RepoInspector, RepositoryState};
pub use parser::{parse_plan, Plan};
pub use policy::{CommandPolicy, PolicyViolation};
pub use types::{CommandOrigin, CommandOutput, CommandRecord};
