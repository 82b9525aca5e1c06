// Client-side validation for gestion mutations.
//
// Required fields block the request entirely: no network call is made for
// an invalid draft. The state-change comment rule mirrors the backend's so
// the user gets the rejection before the round-trip.

use tramita_api::models::{CambioEstado, GestionCreate};

use crate::error::CoreError;

/// States whose transition requires a non-blank comment.
const COMMENT_REQUIRED: &[&str] = &["ARCHIVADO", "NO REMITE SUAC"];

const DEFAULT_URGENCIA: &str = "Media";

/// User input for a new gestion, before validation.
#[derive(Debug, Clone, Default)]
pub struct GestionDraft {
    pub ministerio_agencia_id: String,
    pub categoria_general_id: String,
    /// Defaults to "Media" when left empty.
    pub urgencia: Option<String>,
    pub detalle: String,
    pub observaciones: Option<String>,
    pub departamento: String,
    pub localidad: String,
    pub direccion: Option<String>,
    pub nro_expediente: Option<String>,
    pub costo_estimado: Option<String>,
    pub costo_moneda: Option<String>,
}

impl GestionDraft {
    /// Validate the draft into a create payload.
    pub fn validate(&self) -> Result<GestionCreate, CoreError> {
        if self.ministerio_agencia_id.is_empty() {
            return Err(missing("seleccion\u{e1} un ministerio/agencia"));
        }
        if self.categoria_general_id.is_empty() {
            return Err(missing("seleccion\u{e1} una categor\u{ed}a"));
        }
        if self.departamento.is_empty() {
            return Err(missing("seleccion\u{e1} un departamento"));
        }
        if self.localidad.is_empty() {
            return Err(missing("seleccion\u{e1} una localidad"));
        }
        if self.detalle.trim().is_empty() {
            return Err(missing("detalle es obligatorio"));
        }

        let urgencia = self
            .urgencia
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_URGENCIA)
            .to_owned();

        Ok(GestionCreate {
            ministerio_agencia_id: self.ministerio_agencia_id.clone(),
            categoria_general_id: self.categoria_general_id.clone(),
            urgencia,
            detalle: self.detalle.clone(),
            observaciones: self.observaciones.clone(),
            departamento: self.departamento.clone(),
            localidad: self.localidad.clone(),
            direccion: self.direccion.clone(),
            nro_expediente: self.nro_expediente.clone(),
            costo_estimado: self.costo_estimado.clone(),
            costo_moneda: self.costo_moneda.clone(),
        })
    }
}

/// Validate a state change before sending it.
pub fn validate_cambio(cambio: &CambioEstado) -> Result<(), CoreError> {
    if cambio.nuevo_estado.is_empty() {
        return Err(missing("seleccion\u{e1} un estado"));
    }

    let requires_comment = COMMENT_REQUIRED
        .iter()
        .any(|e| cambio.nuevo_estado.to_uppercase() == *e);
    let comment_blank = cambio
        .comentario
        .as_deref()
        .is_none_or(|c| c.trim().is_empty());

    if requires_comment && comment_blank {
        return Err(missing(
            "comentario obligatorio para estado ARCHIVADO / NO REMITE SUAC",
        ));
    }

    Ok(())
}

fn missing(message: &str) -> CoreError {
    CoreError::ValidationFailed {
        message: message.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> GestionDraft {
        GestionDraft {
            ministerio_agencia_id: "MIN-01".to_owned(),
            categoria_general_id: "CAT-02".to_owned(),
            detalle: "Bache en ruta 5".to_owned(),
            departamento: "Colonia".to_owned(),
            localidad: "Carmelo".to_owned(),
            ..GestionDraft::default()
        }
    }

    #[test]
    fn valid_draft_defaults_urgencia() {
        let payload = valid_draft().validate().expect("draft should validate");
        assert_eq!(payload.urgencia, "Media");
    }

    #[test]
    fn blank_detalle_is_rejected() {
        let mut draft = valid_draft();
        draft.detalle = "   ".to_owned();
        let err = draft.validate().expect_err("whitespace detalle");
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
    }

    #[test]
    fn each_required_field_is_enforced() {
        for strip in ["ministerio", "categoria", "departamento", "localidad"] {
            let mut draft = valid_draft();
            match strip {
                "ministerio" => draft.ministerio_agencia_id.clear(),
                "categoria" => draft.categoria_general_id.clear(),
                "departamento" => draft.departamento.clear(),
                _ => draft.localidad.clear(),
            }
            assert!(draft.validate().is_err(), "missing {strip} must fail");
        }
    }

    #[test]
    fn archive_states_require_a_comment() {
        for estado in ["ARCHIVADO", "archivado", "No Remite Suac"] {
            let cambio = CambioEstado {
                nuevo_estado: estado.to_owned(),
                comentario: None,
                ..CambioEstado::default()
            };
            assert!(validate_cambio(&cambio).is_err(), "estado {estado}");

            let with_blank = CambioEstado {
                comentario: Some("  ".to_owned()),
                ..cambio.clone()
            };
            assert!(validate_cambio(&with_blank).is_err());

            let with_comment = CambioEstado {
                comentario: Some("se archiva por duplicado".to_owned()),
                ..cambio
            };
            assert!(validate_cambio(&with_comment).is_ok());
        }
    }

    #[test]
    fn ordinary_states_do_not_require_a_comment() {
        let cambio = CambioEstado {
            nuevo_estado: "EN PROCESO".to_owned(),
            comentario: None,
            ..CambioEstado::default()
        };
        assert!(validate_cambio(&cambio).is_ok());
    }
}
