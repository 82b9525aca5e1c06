//! Shared helpers for command handlers.

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// In a non-interactive context the prompt cannot run, so the error
/// tells the caller to pass `--yes` explicitly.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|_| CliError::ConfirmationRequired {
            action: action.to_owned(),
        })
}

/// Parse an inline JSON argument into an object payload.
pub fn parse_json_object(raw: &str) -> Result<serde_json::Value, CliError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(CliError::Validation {
            message: "the JSON payload must be an object".to_owned(),
        })
    }
}
