//! Session command handlers and session establishment for data commands.

use secrecy::SecretString;
use tracing::warn;

use tramita_core::{Console, CoreError};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Ensure an authenticated session before a data command runs.
///
/// An explicit `--token` / `TRAMITA_TOKEN` wins and goes through a full
/// sign-in; otherwise the persisted session is restored, which revalidates
/// the stored token against the identity endpoint. A degraded bootstrap
/// (identity proven, data load failed) does not block the command: the
/// command surfaces whatever error it actually hits.
pub async fn establish(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    let outcome = match global.token {
        Some(ref token) => console
            .sign_in(SecretString::from(token.clone()))
            .await
            .map(|()| true),
        None => console.restore().await,
    };

    match outcome {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::NotSignedIn),
        Err(CoreError::Data { message }) => {
            warn!(%message, "authenticated, but the data bootstrap failed");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn login(
    console: &Console,
    token: Option<String>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let token = token
        .or_else(|| global.token.clone())
        .ok_or_else(|| CliError::Validation {
            message: "provide a credential token via --token or TRAMITA_TOKEN".to_owned(),
        })?;

    match console.sign_in(SecretString::from(token)).await {
        Ok(()) => {}
        // The token is valid and persisted; only the data preload failed.
        Err(CoreError::Data { message }) => {
            warn!(%message, "signed in, but the data preload failed");
        }
        Err(e) => return Err(e.into()),
    }

    let label = console
        .identity()
        .map_or_else(|| "Autenticado".to_owned(), |id| id.label());
    eprintln!("Signed in as {label}");
    Ok(())
}

pub async fn logout(console: &Console) -> Result<(), CliError> {
    console.sign_out().await;
    eprintln!("Signed out");
    Ok(())
}

pub async fn whoami(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    establish(console, global).await?;

    let Some(identity) = console.identity() else {
        return Err(CliError::NotSignedIn);
    };

    println!("{}", output::field("nombre", identity.nombre.as_deref().unwrap_or("")));
    println!("{}", output::field("email", identity.email.as_deref().unwrap_or("")));
    println!("{}", output::field("rol", identity.rol.as_deref().unwrap_or("")));
    println!(
        "{}",
        output::field("admin", if console.is_admin() { "yes" } else { "no" })
    );
    Ok(())
}
