//! Admin user command handlers.
//!
//! Gated on the admin role; the core negotiates the backend's user
//! endpoint shape on first use.

use tabled::Tabled;

use tramita_api::fields;
use tramita_api::models::Row;
use tramita_core::Console;

use crate::cli::{GlobalOpts, UsuariosArgs, UsuariosCommand};
use crate::error::CliError;
use crate::output;

use super::{session, util};

#[derive(Tabled)]
struct UsuarioRow {
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Nombre")]
    nombre: String,
    #[tabled(rename = "Rol")]
    rol: String,
    #[tabled(rename = "Activo")]
    activo: String,
}

impl From<&Row> for UsuarioRow {
    fn from(row: &Row) -> Self {
        Self {
            email: fields::resolve_display(row, &["email", "correo"]),
            nombre: fields::resolve_display(row, &["nombre", "nombre_completo"]),
            rol: fields::resolve_display(row, &["rol", "role"]),
            activo: fields::resolve_display(row, &["activo", "habilitado"]),
        }
    }
}

pub async fn handle(
    console: &Console,
    args: UsuariosArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    session::establish(console, global).await?;

    if !console.is_admin() {
        return Err(CliError::Forbidden {
            message: "user management requires the admin role".to_owned(),
        });
    }

    match args.command {
        UsuariosCommand::List => {
            let users = console.usuarios().await?;
            let rows: Vec<UsuarioRow> = users.iter().map(UsuarioRow::from).collect();
            println!("{}", output::table(rows));
            Ok(())
        }

        UsuariosCommand::Create { json } => {
            let payload = util::parse_json_object(&json)?;
            let created = console.create_usuario(&payload).await?;
            println!("{}", serde_json::to_string_pretty(&created)?);
            Ok(())
        }

        UsuariosCommand::Update { json } => {
            let payload = util::parse_json_object(&json)?;
            let updated = console.update_usuario(&payload).await?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
            Ok(())
        }
    }
}
