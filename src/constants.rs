/// Constants module to avoid magic numbers in the codebase

// Oracle Configuration
pub const DEFAULT_OLLAMA_HOST: &str = "localhost";
pub const DEFAULT_OLLAMA_PORT: u16 = 11434;
pub const DEFAULT_MODEL: &str = "qwen:4b";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

// Git Workflow
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Initial commit";
pub const DEFAULT_HOSTING_CLI: &str = "gh";
pub const GIT_METADATA_DIR: &str = ".git";

// Credentials
pub const DEFAULT_CREDENTIALS_FILE: &str = ".env";
pub const CREDENTIAL_USERNAME_KEY: &str = "GIT_USERNAME";
pub const CREDENTIAL_EMAIL_KEY: &str = "GIT_EMAIL";

// Interactive surface
pub const INPUT_PROMPT: &str = "> ";
pub const QUIT_TOKENS: &[&str] = &["exit", "quit"];

// Commands the oracle is allowed to propose (prefix match)
pub const ALLOWED_COMMANDS: &[&str] = &[
    "git init",
    "git status",
    "git add",
    "git commit",
    "git branch",
    "git checkout",
    "git switch",
    "git remote",
    "git push",
    "git pull",
    "git log",
    "gh repo create",
    "gh auth login",
];

// Shell metacharacters that chain, pipe, redirect or substitute
pub const SHELL_METACHARACTERS: &[&str] = &[";", "&", "|", "`", "$(", ">", "<", "\n"];
