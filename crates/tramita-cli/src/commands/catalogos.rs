//! Reference catalog listing.

use tramita_core::Console;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::session;

pub async fn handle(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    session::establish(console, global).await?;

    let catalogs = console.catalogs().await?;

    println!("{}", output::heading("Estados"));
    for e in &catalogs.estados {
        println!("  {}", e.nombre);
    }

    println!("\n{}", output::heading("Urgencias"));
    for u in &catalogs.urgencias {
        println!("  {}", u.nombre);
    }

    println!("\n{}", output::heading("Ministerios / agencias"));
    for m in &catalogs.ministerios {
        println!("  {} \u{b7} {}", m.id, m.nombre);
    }

    println!("\n{}", output::heading("Categorias"));
    for c in &catalogs.categorias {
        println!("  {} \u{b7} {}", c.id, c.nombre);
    }

    println!("\n{}", output::heading("Departamentos"));
    for d in &catalogs.departamentos {
        println!("  {d}");
    }

    Ok(())
}
