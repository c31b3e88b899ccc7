/// CLI argument parsing, subcommands and terminal input - Gateway
mod args;
mod commands;
mod prompt;

pub use args::{Cli, Commands};
pub use commands::{handle_command, show_version};
pub use prompt::{PromptKind, Prompter, StdinPrompter};
