//! Command dispatch: bridges CLI args -> console operations -> output.

pub mod catalogos;
pub mod gestiones;
pub mod session;
pub mod usuarios;
pub mod util;

use tramita_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(
    cmd: Command,
    console: &Console,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login { token } => session::login(console, token, global).await,
        Command::Logout => session::logout(console).await,
        Command::Whoami => session::whoami(console, global).await,
        Command::List(args) => gestiones::list(console, args, global).await,
        Command::Show { id } => gestiones::show(console, &id, global).await,
        Command::New(args) => gestiones::create(console, args, global).await,
        Command::SetEstado(args) => gestiones::set_estado(console, args, global).await,
        Command::Delete { id, yes } => gestiones::delete(console, &id, yes, global).await,
        Command::Eventos { id } => gestiones::eventos(console, &id, global).await,
        Command::Usuarios(args) => usuarios::handle(console, args, global).await,
        Command::Catalogos => catalogos::handle(console, global).await,
    }
}
