//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help
//! text. The auth/data split from the core carries through to exit codes.

use miette::Diagnostic;
use thiserror::Error;

use tramita_core::CoreError;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const DATA: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(tramita::auth_failed),
        help(
            "The session was discarded. Sign in again with: tramita login --token <token>\n\
             Check that your user is enabled on the backend."
        )
    )]
    AuthFailed { message: String },

    #[error("Not signed in")]
    #[diagnostic(
        code(tramita::not_signed_in),
        help("Run: tramita login --token <token>  (or set TRAMITA_TOKEN)")
    )]
    NotSignedIn,

    #[error("Forbidden: {message}")]
    #[diagnostic(
        code(tramita::forbidden),
        help("This command is restricted to administrator accounts.")
    )]
    Forbidden { message: String },

    #[error("Data error: {message}")]
    #[diagnostic(
        code(tramita::data_error),
        help("The session is still valid -- retry the command. The backend detail is above.")
    )]
    Data { message: String },

    #[error("Validation failed: {message}")]
    #[diagnostic(code(tramita::validation))]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(tramita::config),
        help("Set the API base with --api-base, TRAMITA_API_BASE, or the config file.")
    )]
    Config { message: String },

    #[error("Operation '{action}' requires confirmation")]
    #[diagnostic(
        code(tramita::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    ConfirmationRequired { action: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(tramita::json), help("Check the JSON argument and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } | Self::NotSignedIn | Self::Forbidden { .. } => {
                exit_code::AUTH
            }
            Self::Data { .. } => exit_code::DATA,
            Self::Validation { .. } | Self::ConfirmationRequired { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::Data { message } => CliError::Data { message },
            CoreError::ValidationFailed { message } => CliError::Validation { message },
            CoreError::SignedOut => CliError::NotSignedIn,
            CoreError::Config { message } => CliError::Config { message },
            CoreError::Internal(message) => CliError::Data { message },
        }
    }
}
