// Defensive field resolution over loosely shaped rows
//
// The upstream data source does not guarantee consistent field casing or
// naming across deployments. Rendering must degrade to a blank cell rather
// than fail, so lookups go through an explicit multi-key resolver instead
// of a static schema.

use serde_json::Value;

use crate::models::Row;

/// Resolve a logical field against a row, first match wins:
///
/// 1. exact key match, per candidate in order;
/// 2. case-insensitive match against any existing key;
/// 3. structural variants of each candidate (UPPERCASE, lowercase,
///    snake_case converted to camelCase), matched case-insensitively.
///
/// Returns `None` when no candidate matches by any rule.
pub fn resolve<'a>(row: &'a Row, candidates: &[&str]) -> Option<&'a Value> {
    for c in candidates {
        if let Some(v) = row.get(*c) {
            return Some(v);
        }
    }

    for c in candidates {
        if let Some(v) = get_ci(row, c) {
            return Some(v);
        }
    }

    for c in candidates {
        let variants = [c.to_uppercase(), c.to_lowercase(), snake_to_camel(c)];
        for variant in &variants {
            if let Some(v) = get_ci(row, variant) {
                return Some(v);
            }
        }
    }

    None
}

/// Resolve a field and render it for display. Strings pass through,
/// null and missing fields render empty, everything else via JSON.
pub fn resolve_display(row: &Row, candidates: &[&str]) -> String {
    match resolve(row, candidates) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn get_ci<'a>(row: &'a Row, key: &str) -> Option<&'a Value> {
    let lowered = key.to_lowercase();
    row.iter()
        .find(|(k, _)| k.to_lowercase() == lowered)
        .map(|(_, v)| v)
}

/// `id_gestion` -> `idGestion`. Segments after the first are capitalized.
fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, segment) in name.split('_').enumerate() {
        if i == 0 {
            out.push_str(segment);
        } else {
            let mut chars = segment.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(key: &str) -> Row {
        let mut row = Row::new();
        row.insert(key.to_owned(), json!("valor"));
        row.insert("otro_campo".to_owned(), json!(42));
        row
    }

    #[test]
    fn resolves_the_same_value_under_every_naming_variant() {
        for key in ["id_gestion", "ID_GESTION", "Id_Gestion", "idGestion"] {
            let r = row(key);
            let v = resolve(&r, &["id_gestion"]);
            assert_eq!(v, Some(&json!("valor")), "payload key {key}");
        }
    }

    #[test]
    fn exact_match_wins_over_later_candidates() {
        let mut r = Row::new();
        r.insert("estado".to_owned(), json!("exacto"));
        r.insert("ESTADO_ACTUAL".to_owned(), json!("variante"));
        let v = resolve(&r, &["estado", "estado_actual"]);
        assert_eq!(v, Some(&json!("exacto")));
    }

    #[test]
    fn earlier_candidate_variant_beats_later_candidate_exact() {
        // Rule order is per-rule across all candidates: an exact match on a
        // later candidate still beats a case-insensitive one on the first.
        let mut r = Row::new();
        r.insert("DEPARTAMENTO".to_owned(), json!("ci"));
        r.insert("depto".to_owned(), json!("exact-later"));
        let v = resolve(&r, &["departamento", "depto"]);
        assert_eq!(v, Some(&json!("exact-later")));
    }

    #[test]
    fn unresolvable_field_is_none_and_renders_blank() {
        let r = row("algo");
        assert!(resolve(&r, &["inexistente"]).is_none());
        assert_eq!(resolve_display(&r, &["inexistente"]), "");
    }

    #[test]
    fn display_rendering() {
        let mut r = Row::new();
        r.insert("detalle".to_owned(), json!("Bache en ruta 5"));
        r.insert("dias".to_owned(), json!(12));
        r.insert("costo".to_owned(), Value::Null);
        assert_eq!(resolve_display(&r, &["detalle"]), "Bache en ruta 5");
        assert_eq!(resolve_display(&r, &["dias"]), "12");
        assert_eq!(resolve_display(&r, &["costo"]), "");
    }

    #[test]
    fn snake_to_camel_conversion() {
        assert_eq!(snake_to_camel("id_gestion"), "idGestion");
        assert_eq!(snake_to_camel("dias_transcurridos"), "diasTranscurridos");
        assert_eq!(snake_to_camel("detalle"), "detalle");
    }
}
