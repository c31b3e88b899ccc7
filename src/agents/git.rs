use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use super::executor::{shell_quote, Shell};
use crate::app::GitSettings;

/// Read-only summary of the working tree, rebuilt at every checkpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryState {
    pub is_initialized: bool,
    pub current_branch: String,
    pub has_remote: bool,
    /// Empty when no remote is configured
    pub remote_url: String,
    pub hosting_cli_available: bool,
    pub is_dirty: bool,
}

impl RepositoryState {
    /// Whether the workflow has to ask the user for a remote URL
    pub fn needs_manual_remote(&self) -> bool {
        !self.has_remote && !self.hosting_cli_available
    }
}

/// Builds [`RepositoryState`] snapshots from git queries and a PATH probe
#[derive(Clone)]
pub struct RepoInspector {
    shell: Arc<dyn Shell>,
    root: PathBuf,
    settings: GitSettings,
}

impl RepoInspector {
    pub fn new(shell: Arc<dyn Shell>, root: impl Into<PathBuf>, settings: GitSettings) -> Self {
        Self {
            shell,
            root: root.into(),
            settings,
        }
    }

    /// Take a fresh snapshot. No side effects; query failures become defaults.
    pub async fn snapshot(&self) -> RepositoryState {
        let is_initialized = self.root.join(&self.settings.metadata_dir).exists();
        let current_branch = self.current_branch().await;
        let remote_url = self.remote_url().await.unwrap_or_default();
        let hosting_cli_available = self.shell.is_available(&self.settings.hosting_cli);
        let is_dirty = self.is_dirty().await;

        let state = RepositoryState {
            is_initialized,
            current_branch,
            has_remote: !remote_url.is_empty(),
            remote_url,
            hosting_cli_available,
            is_dirty,
        };
        debug!(?state, "repository snapshot");
        state
    }

    async fn current_branch(&self) -> String {
        let output = self.shell.capture("git branch --show-current").await;
        let branch = output.stdout_trimmed();
        if output.success() && !branch.is_empty() {
            branch.to_string()
        } else {
            // Outside a repo, or detached HEAD
            self.settings.default_branch.clone()
        }
    }

    async fn remote_url(&self) -> Option<String> {
        let command = format!("git remote get-url {}", shell_quote(&self.settings.remote));
        let output = self.shell.capture(&command).await;
        let url = output.stdout_trimmed();
        (output.success() && !url.is_empty()).then(|| url.to_string())
    }

    async fn is_dirty(&self) -> bool {
        let output = self.shell.capture("git status --porcelain").await;
        !output.stdout_trimmed().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::SystemShell;
    use crate::test_support::FakeRepoShell;
    use std::path::Path;
    use tempfile::TempDir;

    fn inspector(shell: Arc<dyn Shell>, root: &Path) -> RepoInspector {
        RepoInspector::new(shell, root, GitSettings::default())
    }

    #[tokio::test]
    async fn test_fresh_directory_snapshot() {
        let dir = TempDir::new().unwrap();
        let state = inspector(Arc::new(SystemShell::new(dir.path())), dir.path())
            .snapshot()
            .await;

        assert!(!state.is_initialized);
        assert!(!state.has_remote);
        assert_eq!(state.remote_url, "");
        assert!(!state.is_dirty);
        assert_eq!(state.current_branch, "main");
    }

    #[tokio::test]
    async fn test_initialized_after_init() {
        let dir = TempDir::new().unwrap();
        let inspector = inspector(Arc::new(SystemShell::new(dir.path())), dir.path());
        assert!(!inspector.snapshot().await.is_initialized);

        git2::Repository::init(dir.path()).unwrap();

        let state = inspector.snapshot().await;
        assert!(state.is_initialized);
        assert!(!state.has_remote);
    }

    #[tokio::test]
    async fn test_remote_and_dirty_detected() {
        let dir = TempDir::new().unwrap();
        let shell = Arc::new(
            FakeRepoShell::new(dir.path())
                .initialized("develop")
                .with_remote("git@github.com:me/demo.git")
                .dirty(),
        );
        let state = inspector(shell, dir.path()).snapshot().await;

        assert!(state.is_initialized);
        assert_eq!(state.current_branch, "develop");
        assert!(state.has_remote);
        assert_eq!(state.remote_url, "git@github.com:me/demo.git");
        assert!(state.is_dirty);
        assert!(!state.hosting_cli_available);
    }

    #[tokio::test]
    async fn test_hosting_cli_probe_and_manual_remote_need() {
        let dir = TempDir::new().unwrap();
        let with_cli = Arc::new(FakeRepoShell::new(dir.path()).with_program("gh"));
        let state = inspector(with_cli, dir.path()).snapshot().await;
        assert!(state.hosting_cli_available);
        assert!(!state.needs_manual_remote());

        let without_cli = Arc::new(FakeRepoShell::new(dir.path()));
        let state = inspector(without_cli, dir.path()).snapshot().await;
        assert!(state.needs_manual_remote());
    }

    #[tokio::test]
    async fn test_snapshot_is_read_only_and_idempotent() {
        let dir = TempDir::new().unwrap();
        let shell = Arc::new(FakeRepoShell::new(dir.path()).initialized("main").dirty());
        let inspector = inspector(shell.clone(), dir.path());

        let first = inspector.snapshot().await;
        let second = inspector.snapshot().await;
        assert_eq!(first, second);
        assert!(shell.mutations().is_empty());
    }
}
