//! Shared helpers for command handlers.

use std::io::IsTerminal;

use dialoguer::Input;
use secrecy::SecretString;

use parkly_core::{Controller, Id, Identity, Notice};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Parse a user-supplied identifier; numeric strings become numeric ids.
pub fn parse_id(raw: &str) -> Id {
    let Ok(id) = raw.trim().parse::<Id>();
    id
}

/// Fetch the identity and load its collections; fail when not signed in.
pub async fn require_session(controller: &Controller) -> Result<Identity, CliError> {
    let identity = controller.initialize().await?;
    if identity.is_authenticated() {
        Ok(identity)
    } else {
        Err(CliError::AuthFailed {
            message: "Not logged in".into(),
        })
    }
}

/// Print an accepted mutation's notice, then warn if a reload after it
/// failed. The backend already applied the change either way.
pub fn report_mutation(controller: &Controller, notice: &Notice, global: &GlobalOpts) {
    output::print_notice(notice, global);
    if let Some(reason) = controller.store().error() {
        output::print_hint(&format!("Listing not refreshed: {reason}"), global);
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Ask for a line of text; `label` names the missing value in errors.
pub fn prompt_text(prompt: &str, label: &str) -> Result<String, CliError> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::Validation {
            field: label.into(),
            reason: format!("no {label} given and stdin is not a terminal"),
        });
    }
    let value: String = Input::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(prompt_err)?;
    non_empty(value.trim().to_owned(), label)
}

/// Ask for a secret without echoing it.
pub fn prompt_password(prompt: &str) -> Result<SecretString, CliError> {
    let value = rpassword::prompt_password(prompt).map_err(prompt_err)?;
    non_empty(value, "password").map(SecretString::from)
}

fn non_empty(value: String, label: &str) -> Result<String, CliError> {
    if value.is_empty() {
        return Err(CliError::Validation {
            field: label.into(),
            reason: format!("{label} cannot be empty"),
        });
    }
    Ok(value)
}

/// Optional text cell.
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}
