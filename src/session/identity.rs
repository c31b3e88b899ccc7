use anyhow::Result;
use tracing::info;

use super::credentials::{CredentialStore, Identity};
use crate::agents::{shell_quote, CommandExecutor};
use crate::cli::{PromptKind, Prompter};
use crate::utils::GitmateError;

/// Make sure a git identity exists and apply it globally
///
/// Runs once before the main loop. Missing values are asked for and the
/// credential file is rewritten; the global git config is always reapplied.
pub async fn ensure_identity(
    store: &CredentialStore,
    prompter: &mut dyn Prompter,
    executor: &CommandExecutor,
) -> Result<Identity> {
    let mut credentials = store.load()?;

    let identity = match credentials.identity() {
        Some(identity) => identity,
        None => {
            let identity = Identity {
                name: ask(prompter, "Git username: ").await?,
                email: ask(prompter, "Git email: ").await?,
            };
            credentials.set_identity(&identity);
            store.save(&credentials)?;
            info!(path = %store.path().display(), "saved git identity");
            identity
        }
    };

    executor
        .run(&format!("git config --global user.name {}", shell_quote(&identity.name)))
        .await;
    executor
        .run(&format!("git config --global user.email {}", shell_quote(&identity.email)))
        .await;

    Ok(identity)
}

async fn ask(prompter: &mut dyn Prompter, prompt: &str) -> Result<String> {
    match prompter.ask(PromptKind::Setup, prompt).await? {
        Some(answer) => Ok(answer.trim().to_string()),
        None => Err(GitmateError::InputClosed(prompt.trim_end_matches([' ', ':']).to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeRepoShell, ScriptedPrompter};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_prompts_and_persists_when_missing() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::new(dir.path().join(".env"));
        let shell = Arc::new(FakeRepoShell::new(dir.path()));
        let executor = CommandExecutor::new(shell.clone());
        let mut prompter = ScriptedPrompter::new(["  Ada Lovelace ", "ada@example.com"]);

        let identity = ensure_identity(&store, &mut prompter, &executor).await.unwrap();

        assert_eq!(identity.name, "Ada Lovelace");
        assert_eq!(prompter.asked(), vec!["Git username: ", "Git email: "]);
        assert_eq!(store.load().unwrap().identity(), Some(identity));
        assert_eq!(
            shell.mutations(),
            vec![
                "git config --global user.name 'Ada Lovelace'",
                "git config --global user.email ada@example.com",
            ]
        );
    }

    #[tokio::test]
    async fn test_existing_identity_reapplied_without_prompting_or_rewriting() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "GIT_EMAIL=ada@example.com\nGIT_USERNAME=ada\nEXTRA=1").unwrap();
        let store = CredentialStore::new(&path);
        let shell = Arc::new(FakeRepoShell::new(dir.path()));
        let executor = CommandExecutor::new(shell.clone());
        let mut prompter = ScriptedPrompter::new(Vec::<&str>::new());

        ensure_identity(&store, &mut prompter, &executor).await.unwrap();

        assert!(prompter.asked().is_empty());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "GIT_EMAIL=ada@example.com\nGIT_USERNAME=ada\nEXTRA=1"
        );
        assert_eq!(shell.mutations().len(), 2);
    }

    #[tokio::test]
    async fn test_closed_input_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::new(dir.path().join(".env"));
        let executor = CommandExecutor::new(Arc::new(FakeRepoShell::new(dir.path())));
        let mut prompter = ScriptedPrompter::new(Vec::<&str>::new());

        let err = ensure_identity(&store, &mut prompter, &executor).await.unwrap_err();
        assert!(err.to_string().contains("Git username"));
        assert!(!store.path().exists());
    }
}
