use anyhow::Result;
use std::process::Command;

/// Check if Ollama is installed on the system
pub fn is_installed() -> bool {
    which::which("ollama").is_ok()
}

/// Get list of installed Ollama models
pub fn list_models() -> Result<Vec<String>> {
    let output = Command::new("ollama").arg("list").output();

    match output {
        Ok(output) if output.status.success() => {
            Ok(parse_model_list(&String::from_utf8_lossy(&output.stdout)))
        }
        _ => Ok(Vec::new()),
    }
}

/// Model names from `ollama list` output (first column, header skipped)
fn parse_model_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().next().map(|s| s.to_string()))
        .collect()
}

/// Whether `wanted` is among `installed`, treating a missing tag as `latest`
pub fn has_model(installed: &[String], wanted: &str) -> bool {
    let wanted = if wanted.contains(':') {
        wanted.to_string()
    } else {
        format!("{}:latest", wanted)
    };
    installed.iter().any(|m| *m == wanted)
}
