//! Gestion command handlers: listing, detail, mutations, event history.

use std::sync::Arc;

use tabled::Tabled;

use tramita_api::fields;
use tramita_api::models::{CambioEstado, Evento, Row};
use tramita_core::list::Filters;
use tramita_core::{Catalogs, Console, GestionDraft};

use crate::cli::{GlobalOpts, ListArgs, NewArgs, SetEstadoArgs};
use crate::error::CliError;
use crate::output;

use super::{session, util};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct GestionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Estado")]
    estado: String,
    #[tabled(rename = "Urgencia")]
    urgencia: String,
    #[tabled(rename = "Ministerio")]
    ministerio: String,
    #[tabled(rename = "Categoria")]
    categoria: String,
    #[tabled(rename = "Departamento")]
    departamento: String,
    #[tabled(rename = "Localidad")]
    localidad: String,
    #[tabled(rename = "Detalle")]
    detalle: String,
    #[tabled(rename = "Expediente")]
    expediente: String,
}

impl GestionRow {
    fn from_row(row: &Row, catalogs: Option<&Arc<Catalogs>>) -> Self {
        Self {
            id: fields::resolve_display(row, &["id_gestion", "id"]),
            estado: fields::resolve_display(row, &["estado"]),
            urgencia: fields::resolve_display(row, &["urgencia"]),
            ministerio: fk_display(row, &["ministerio_agencia_id", "ministerio"], catalogs, Catalogs::ministerio_name),
            categoria: fk_display(row, &["categoria_general_id", "categoria"], catalogs, Catalogs::categoria_name),
            departamento: fields::resolve_display(row, &["departamento"]),
            localidad: fields::resolve_display(row, &["localidad"]),
            detalle: fields::resolve_display(row, &["detalle"]),
            expediente: fields::resolve_display(row, &["nro_expediente"]),
        }
    }
}

/// Render a foreign-key field as "id · nombre" when the catalog knows the
/// id, or the raw value when it does not (or the catalogs never loaded).
fn fk_display(
    row: &Row,
    candidates: &[&str],
    catalogs: Option<&Arc<Catalogs>>,
    lookup: for<'a> fn(&'a Catalogs, &str) -> Option<&'a str>,
) -> String {
    let raw = fields::resolve_display(row, candidates);
    if raw.is_empty() {
        return raw;
    }
    match catalogs.and_then(|c| lookup(c, &raw)) {
        Some(name) => format!("{raw} \u{b7} {name}"),
        None => raw,
    }
}

#[derive(Tabled)]
struct EventoRow {
    #[tabled(rename = "Fecha")]
    fecha: String,
    #[tabled(rename = "Tipo")]
    tipo: String,
    #[tabled(rename = "Transicion")]
    transicion: String,
    #[tabled(rename = "Usuario")]
    usuario: String,
    #[tabled(rename = "Comentario")]
    comentario: String,
}

impl From<&Evento> for EventoRow {
    fn from(e: &Evento) -> Self {
        let transicion = match (e.estado_anterior.as_deref(), e.estado_nuevo.as_deref()) {
            (Some(a), Some(n)) => format!("{a} -> {n}"),
            (None, Some(n)) => n.to_owned(),
            _ => String::new(),
        };
        Self {
            fecha: e
                .fecha_evento
                .map(|f| f.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            tipo: e.tipo_evento.clone().unwrap_or_default(),
            transicion,
            usuario: e.usuario.clone().unwrap_or_default(),
            comentario: e.comentario.clone().unwrap_or_default(),
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(console: &Console, args: ListArgs, global: &GlobalOpts) -> Result<(), CliError> {
    session::establish(console, global).await?;

    let filters = Filters {
        estado: args.estado,
        ministerio: args.ministerio,
        categoria: args.categoria,
        departamento: args.departamento,
        localidad: args.localidad,
        remote_query: args.query,
    };
    console
        .edit_list(move |list| {
            list.set_filters(filters);
            list.set_limit(args.limit);
            list.set_offset(args.offset);
            list.set_search(args.buscar);
        })
        .await;

    let rows = console.refresh_gestiones().await?;
    let catalogs = console.catalogs().await.ok();

    let table_rows: Vec<GestionRow> = rows
        .iter()
        .map(|r| GestionRow::from_row(r, catalogs.as_ref()))
        .collect();
    println!("{}", output::table(table_rows));

    let (offset, total, has_next) = console
        .edit_list(|list| (list.offset(), list.total(), list.has_next()))
        .await;
    match total {
        Some(total) => eprintln!(
            "{} de {total} (offset {offset}{})",
            rows.len(),
            if has_next { ", hay mas" } else { "" }
        ),
        None if has_next => eprintln!("{} (offset {offset}, hay mas)", rows.len()),
        None => eprintln!("{} (offset {offset})", rows.len()),
    }
    Ok(())
}

pub async fn show(console: &Console, id: &str, global: &GlobalOpts) -> Result<(), CliError> {
    session::establish(console, global).await?;

    let row = console.gestion(id).await?;
    let catalogs = console.catalogs().await.ok();

    let detail: &[(&str, &[&str])] = &[
        ("id", &["id_gestion", "id"]),
        ("estado", &["estado"]),
        ("urgencia", &["urgencia"]),
        ("departamento", &["departamento"]),
        ("localidad", &["localidad"]),
        ("direccion", &["direccion"]),
        ("detalle", &["detalle"]),
        ("observaciones", &["observaciones"]),
        ("expediente", &["nro_expediente"]),
        ("costo", &["costo_estimado"]),
        ("moneda", &["costo_moneda"]),
        ("creada", &["fecha_creacion", "created_at"]),
    ];

    println!(
        "{}",
        output::field(
            "ministerio",
            &fk_display(&row, &["ministerio_agencia_id", "ministerio"], catalogs.as_ref(), Catalogs::ministerio_name),
        )
    );
    println!(
        "{}",
        output::field(
            "categoria",
            &fk_display(&row, &["categoria_general_id", "categoria"], catalogs.as_ref(), Catalogs::categoria_name),
        )
    );
    for (label, candidates) in detail {
        println!("{}", output::field(label, &fields::resolve_display(&row, candidates)));
    }
    Ok(())
}

pub async fn create(console: &Console, args: NewArgs, global: &GlobalOpts) -> Result<(), CliError> {
    session::establish(console, global).await?;

    let draft = GestionDraft {
        ministerio_agencia_id: args.ministerio,
        categoria_general_id: args.categoria,
        urgencia: args.urgencia,
        detalle: args.detalle,
        observaciones: args.observaciones,
        departamento: args.departamento,
        localidad: args.localidad,
        direccion: args.direccion,
        nro_expediente: args.expediente,
        costo_estimado: args.costo,
        costo_moneda: args.moneda,
    };

    let id = console.create_gestion(&draft).await?;
    println!("{id}");
    eprintln!("Gestion created");
    Ok(())
}

pub async fn set_estado(
    console: &Console,
    args: SetEstadoArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    session::establish(console, global).await?;

    let cambio = CambioEstado {
        nuevo_estado: args.nuevo_estado,
        comentario: args.comentario,
        derivado_a: args.derivado_a,
        acciones_implementadas: args.acciones,
    };
    console.change_state(&args.id, &cambio).await?;
    eprintln!("Estado updated");
    Ok(())
}

pub async fn delete(
    console: &Console,
    id: &str,
    yes: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    session::establish(console, global).await?;

    if !util::confirm(
        &format!("Delete gestion '{id}'? It will disappear from the listing."),
        "delete",
        yes,
    )? {
        eprintln!("Aborted");
        return Ok(());
    }

    console.delete_gestion(id).await?;
    eprintln!("Gestion deleted");
    Ok(())
}

pub async fn eventos(console: &Console, id: &str, global: &GlobalOpts) -> Result<(), CliError> {
    session::establish(console, global).await?;

    let eventos = console.eventos(id).await?;
    let rows: Vec<EventoRow> = eventos.iter().map(EventoRow::from).collect();
    println!("{}", output::table(rows));
    Ok(())
}
