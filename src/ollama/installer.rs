use anyhow::Result;
use std::process::{Command, Stdio};

use super::detector;
use super::guide;

/// Install an Ollama model with progress display
pub async fn install_model(model: &str) -> Result<()> {
    println!("[DOWNLOADING] Pulling {} model...", model);

    let status = tokio::task::spawn_blocking({
        let model = model.to_string();
        move || {
            Command::new("ollama")
                .arg("pull")
                .arg(&model)
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
        }
    })
    .await??;

    if !status.success() {
        anyhow::bail!("Failed to install {} model", model);
    }

    Ok(())
}

/// Ensure the Ollama model is available, pulling it if allowed
pub async fn ensure_model(model: &str, no_auto_install: bool) -> Result<()> {
    if !detector::is_installed() {
        guide::detect_and_guide();
        anyhow::bail!("Ollama is not installed");
    }

    let models = detector::list_models()?;
    if detector::has_model(&models, model) {
        return Ok(());
    }

    if no_auto_install {
        println!("[WARNING] Model '{}' not found locally.", model);
        println!("   Run: ollama pull {}", model);
        anyhow::bail!("Model '{}' is not installed", model);
    }

    println!("[SETUP] First time setup: installing {}...", model);
    println!("   This is a one-time download. Use --no-auto-install to skip.\n");
    install_model(model).await?;
    println!("\n[OK] {} installed successfully!", model);

    Ok(())
}
