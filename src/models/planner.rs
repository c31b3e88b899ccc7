use anyhow::Result;
use tracing::info;

use super::traits::Oracle;
use super::types::ChatMessage;
use crate::app::GitSettings;
use crate::constants::ALLOWED_COMMANDS;

/// Build the fixed system policy sent ahead of every instruction
pub fn policy_prompt(settings: &GitSettings) -> String {
    format!(
        r#"You are a git assistant for beginners. Always follow this workflow automatically:

1. Initialize repo if missing: <git init>
2. Stage all changes: <git add .>
3. Commit all changes: <git commit -m "{message}">
4. If no remote {remote} exists and the {cli} CLI exists, create the hosted repository and push in one step:
   <{cli} repo create REPO_NAME --source=. --push>
   Replace REPO_NAME with the repository name from the user's sentence.
5. Push the current branch to {remote}: <git push -u {remote} BRANCH>
   Replace BRANCH with the actual current branch name, never a placeholder.

Rules:
- Only output commands wrapped in < >. No explanations.
- One command per < > pair; multiple commands means multiple < > pairs.
- Only use these commands: {allowed}."#,
        message = settings.commit_message,
        remote = settings.remote,
        cli = settings.hosting_cli,
        allowed = ALLOWED_COMMANDS.join(", "),
    )
}

/// Turns a user instruction into raw plan text
///
/// No retries and no validation: the response goes back verbatim and oracle
/// failures propagate to the caller.
pub struct PlanGenerator {
    oracle: Box<dyn Oracle>,
    policy: String,
}

impl PlanGenerator {
    pub fn new(oracle: Box<dyn Oracle>, settings: &GitSettings) -> Self {
        Self {
            oracle,
            policy: policy_prompt(settings),
        }
    }

    pub async fn generate(&self, instruction: &str) -> Result<String> {
        let messages = [
            ChatMessage::system(self.policy.as_str()),
            ChatMessage::user(instruction),
        ];
        let response = self.oracle.chat(&messages).await?;
        info!(commands_hint = response.matches('<').count(), "plan text received");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::traits::MockOracle;
    use crate::models::MessageRole;

    #[test]
    fn test_policy_mentions_workflow_and_allow_list() {
        let policy = policy_prompt(&GitSettings::default());
        assert!(policy.contains("<git init>"));
        assert!(policy.contains("<git add .>"));
        assert!(policy.contains("<git commit -m \"Initial commit\">"));
        assert!(policy.contains("<gh repo create REPO_NAME --source=. --push>"));
        assert!(policy.contains("<git push -u origin BRANCH>"));
        assert!(policy.contains("gh auth login"));
        // No nested delimiters that would confuse the parser if echoed back
        assert_eq!(
            crate::agents::parse_plan(&policy)
                .iter()
                .filter(|c| c.contains('<'))
                .count(),
            0
        );
    }

    #[tokio::test]
    async fn test_sends_policy_then_instruction_and_returns_verbatim() {
        let mut oracle = MockOracle::new();
        oracle
            .expect_chat()
            .withf(|messages| {
                messages.len() == 2
                    && messages[0].role == MessageRole::System
                    && messages[0].content.contains("git assistant")
                    && messages[1].role == MessageRole::User
                    && messages[1].content == "publish demo"
            })
            .times(1)
            .returning(|_| Ok("  <git init>\n<git push -u origin main>  ".to_string()));

        let generator = PlanGenerator::new(Box::new(oracle), &GitSettings::default());
        let raw = generator.generate("publish demo").await.unwrap();
        assert_eq!(raw, "  <git init>\n<git push -u origin main>  ");
    }

    #[tokio::test]
    async fn test_oracle_failure_propagates() {
        let mut oracle = MockOracle::new();
        oracle
            .expect_chat()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("connection refused")));

        let generator = PlanGenerator::new(Box::new(oracle), &GitSettings::default());
        let err = generator.generate("anything").await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
