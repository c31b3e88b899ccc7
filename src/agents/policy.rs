use std::fmt;

use crate::constants::{ALLOWED_COMMANDS, SHELL_METACHARACTERS};

/// Why a planned command falls outside the allow-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyViolation {
    /// Does not start with any allowed command
    NotAllowed,
    /// Contains a character sequence that chains, pipes, redirects or substitutes
    ShellMetacharacter(&'static str),
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyViolation::NotAllowed => write!(f, "command is not on the allow-list"),
            PolicyViolation::ShellMetacharacter(seq) => {
                write!(f, "command contains shell metacharacter {:?}", seq)
            }
        }
    }
}

/// Allow-list for oracle-proposed commands
///
/// Always classifies; only blocks when `enforce` is set. Commands the
/// workflow issues itself never pass through here.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandPolicy {
    enforce: bool,
}

impl CommandPolicy {
    pub fn new(enforce: bool) -> Self {
        Self { enforce }
    }

    pub fn is_enforced(&self) -> bool {
        self.enforce
    }

    pub fn check(&self, command: &str) -> Result<(), PolicyViolation> {
        let command = command.trim();

        if let Some(seq) = SHELL_METACHARACTERS
            .iter()
            .find(|seq| command.contains(**seq))
        {
            return Err(PolicyViolation::ShellMetacharacter(*seq));
        }

        let allowed = ALLOWED_COMMANDS.iter().any(|prefix| {
            command == *prefix
                || command
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with(char::is_whitespace))
        });

        if allowed {
            Ok(())
        } else {
            Err(PolicyViolation::NotAllowed)
        }
    }
}
