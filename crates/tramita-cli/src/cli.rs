//! Argument definitions (clap derive).

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "tramita",
    version,
    about = "Consola de gestiones: list, inspect, and manage administrative case records"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// API base URL (overrides config file)
    #[arg(long, global = true, env = "TRAMITA_API_BASE")]
    pub api_base: Option<String>,

    /// Bearer token (skips the persisted session)
    #[arg(long, global = true, env = "TRAMITA_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Accept invalid TLS certificates (development backends)
    #[arg(short = 'k', long, global = true)]
    pub insecure: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in: validate a credential token and persist the session
    Login {
        /// Credential token (falls back to --token / TRAMITA_TOKEN)
        token: Option<String>,
    },

    /// Sign out and forget the persisted session
    Logout,

    /// Show the validated identity for the current session
    Whoami,

    /// List gestiones with optional filters and paging
    List(ListArgs),

    /// Show one gestion
    Show { id: String },

    /// Create a gestion
    New(NewArgs),

    /// Change a gestion's state
    SetEstado(SetEstadoArgs),

    /// Soft-delete a gestion
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Event history for a gestion, newest first
    Eventos { id: String },

    /// Admin user management (endpoint shape negotiated at runtime)
    Usuarios(UsuariosArgs),

    /// List the reference catalogs
    Catalogos,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub estado: Option<String>,
    #[arg(long)]
    pub ministerio: Option<String>,
    #[arg(long)]
    pub categoria: Option<String>,
    #[arg(long)]
    pub departamento: Option<String>,
    #[arg(long)]
    pub localidad: Option<String>,

    /// Server-side search (paginates with the result set)
    #[arg(long)]
    pub query: Option<String>,

    /// Client-side substring search over the fetched page only
    #[arg(long)]
    pub buscar: Option<String>,

    #[arg(long, default_value_t = 50)]
    pub limit: u32,
    #[arg(long, default_value_t = 0)]
    pub offset: u64,
}

#[derive(Debug, Args)]
pub struct NewArgs {
    #[arg(long)]
    pub ministerio: String,
    #[arg(long)]
    pub categoria: String,
    #[arg(long)]
    pub departamento: String,
    #[arg(long)]
    pub localidad: String,
    #[arg(long)]
    pub detalle: String,
    #[arg(long)]
    pub urgencia: Option<String>,
    #[arg(long)]
    pub observaciones: Option<String>,
    #[arg(long)]
    pub direccion: Option<String>,
    #[arg(long)]
    pub expediente: Option<String>,
    #[arg(long)]
    pub costo: Option<String>,
    #[arg(long)]
    pub moneda: Option<String>,
}

#[derive(Debug, Args)]
pub struct SetEstadoArgs {
    pub id: String,
    pub nuevo_estado: String,
    #[arg(long)]
    pub comentario: Option<String>,
    #[arg(long)]
    pub derivado_a: Option<String>,
    #[arg(long)]
    pub acciones: Option<String>,
}

#[derive(Debug, Args)]
pub struct UsuariosArgs {
    #[command(subcommand)]
    pub command: UsuariosCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsuariosCommand {
    /// List admin users
    List,
    /// Create an admin user from a JSON payload
    Create {
        /// Inline JSON payload
        json: String,
    },
    /// Update an admin user from a JSON payload
    Update {
        /// Inline JSON payload
        json: String,
    },
}
