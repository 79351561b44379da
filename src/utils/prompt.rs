//! Interactive prompts.
//!
//! dialoguer is synchronous, so each prompt runs on the blocking pool.
//! Without a TTY, confirmations fall back to their default and path input
//! fails so scripted runs never hang.

use anyhow::{Context, Result, bail};
use console::Term;
use std::path::PathBuf;

/// Ask a yes/no question; non-TTY sessions get `default_yes`.
pub async fn prompt_confirmation(message: &str, default_yes: bool) -> Result<bool> {
    let message = message.to_string();
    tokio::task::spawn_blocking(move || prompt_confirmation_sync(&message, default_yes))
        .await
        .context("Confirmation prompt panicked")?
}

fn prompt_confirmation_sync(message: &str, default_yes: bool) -> Result<bool> {
    if !Term::stdout().is_term() {
        return Ok(default_yes);
    }

    let suffix = if default_yes { "[Y/n]" } else { "[y/N]" };

    // Esc/q cancels, which counts as "no" regardless of the default
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(format!("{message} {suffix}"))
        .default(default_yes)
        .show_default(false)
        .interact_opt()?
        .unwrap_or(false);

    Ok(confirmed)
}

/// Ask for an existing directory, re-prompting until one is given.
pub async fn prompt_directory(message: &str) -> Result<PathBuf> {
    let message = message.to_string();
    tokio::task::spawn_blocking(move || prompt_directory_sync(&message))
        .await
        .context("Path prompt panicked")?
}

fn prompt_directory_sync(message: &str) -> Result<PathBuf> {
    if !Term::stdout().is_term() {
        bail!("Cannot ask for the gallery folder without a terminal; pass PATH instead");
    }

    let input: String = dialoguer::Input::new()
        .with_prompt(message)
        .validate_with(|input: &String| -> Result<(), &str> {
            if PathBuf::from(input.trim()).is_dir() {
                Ok(())
            } else {
                Err("Path is not valid")
            }
        })
        .interact_text()?;

    Ok(PathBuf::from(input.trim()))
}
