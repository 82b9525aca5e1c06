// Integration tests for `ApiClient` using wiremock.
#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tramita_api::models::{CambioEstado, GestionCreate, ListQuery};
use tramita_api::{ApiClient, Body, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Request shaping ─────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_attached_when_present() {
    let (server, client) = setup().await;
    client.set_token(SecretString::from("tok-123"));

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nombre": "Ana", "email": "ana@example.gov", "rol": "Admin"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let me = client.me().await.unwrap();
    assert_eq!(me.rol.as_deref(), Some("Admin"));
    assert_eq!(me.label(), "Ana \u{b7} ana@example.gov \u{b7} Admin");
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let (server, client) = setup().await;

    // Mounted matcher requires the header; the anonymous call must fall
    // through to the 404 default, proving the header was omitted.
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let result = client.me().await;
    assert!(matches!(result, Err(Error::Http { status: 404, .. })));
}

#[tokio::test]
async fn test_base_url_path_prefix_is_preserved() {
    let server = MockServer::start().await;
    // The API mounted under a path prefix: /me must become /api/me.
    let client =
        ApiClient::from_reqwest(&format!("{}/api", server.uri()), reqwest::Client::new()).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rol": "Consulta" })))
        .expect(1)
        .mount(&server)
        .await;

    let me = client.me().await.unwrap();
    assert_eq!(me.rol.as_deref(), Some("Consulta"));
}

#[tokio::test]
async fn test_cache_suppression_header_always_sent() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("Cache-Control", "no-store"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rol": "Consulta" })))
        .expect(1)
        .mount(&server)
        .await;

    client.me().await.unwrap();
}

#[tokio::test]
async fn test_token_cleared_after_sign_out() {
    let (server, client) = setup().await;
    client.set_token(SecretString::from("tok-123"));
    assert!(client.has_token());
    client.clear_token();
    assert!(!client.has_token());

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let _ = client.me().await;
}

// ── Response decoding ───────────────────────────────────────────────

#[tokio::test]
async fn test_http_error_carries_status_and_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(401).set_body_string("usuario no habilitado"))
        .mount(&server)
        .await;

    let err = client.me().await.unwrap_err();
    match &err {
        Error::Http {
            status,
            status_text,
            body,
        } => {
            assert_eq!(*status, 401);
            assert_eq!(status_text, "Unauthorized");
            assert_eq!(body, "usuario no habilitado");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_declared_json_that_fails_to_parse_degrades_to_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string("not { json"),
        )
        .mount(&server)
        .await;

    let body = client
        .send(reqwest::Method::GET, "/raw", &[], None)
        .await
        .unwrap();
    match body {
        Body::Text(text) => assert_eq!(text, "not { json"),
        Body::Json(v) => panic!("expected text fallback, got JSON: {v}"),
    }
}

#[tokio::test]
async fn test_non_json_content_type_returns_raw_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/plano"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/plain")
                .set_body_string("ok"),
        )
        .mount(&server)
        .await;

    let body = client
        .send(reqwest::Method::GET, "/plano", &[], None)
        .await
        .unwrap();
    assert!(matches!(body, Body::Text(ref t) if t == "ok"));
}

// ── Listing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_gestiones_normalizes_envelope_and_page_info() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/gestiones"))
        .and(query_param("estado", "INGRESADO"))
        .and(query_param("limit", "50"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id_gestion": "g-1", "estado": "INGRESADO" },
                { "id_gestion": "g-2", "estado": "INGRESADO" },
            ],
            "total": 120,
            "limit": 50,
            "offset": 0
        })))
        .mount(&server)
        .await;

    let query = ListQuery {
        estado: Some("INGRESADO".to_owned()),
        ..ListQuery::default()
    };
    let (rows, page) = client.list_gestiones(&query).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id_gestion"], "g-1");
    assert_eq!(page.total, Some(120));
    assert_eq!(page.offset, Some(0));
}

#[tokio::test]
async fn test_empty_scoping_filters_are_not_serialized() {
    let query = ListQuery {
        estado: Some(String::new()),
        departamento: Some("Colonia".to_owned()),
        ..ListQuery::default()
    };
    let pairs = query.pairs();
    assert!(pairs.iter().all(|(k, _)| *k != "estado"));
    assert!(
        pairs
            .iter()
            .any(|(k, v)| *k == "departamento" && v == "Colonia")
    );
    assert!(pairs.iter().any(|(k, v)| *k == "limit" && v == "50"));
    assert!(pairs.iter().any(|(k, v)| *k == "offset" && v == "0"));
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_gestion_round_trip() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/gestiones"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id_gestion": "nueva-123" })),
        )
        .mount(&server)
        .await;

    let payload = GestionCreate {
        ministerio_agencia_id: "MIN-01".to_owned(),
        categoria_general_id: "CAT-02".to_owned(),
        urgencia: "Media".to_owned(),
        detalle: "Bache en ruta 5".to_owned(),
        departamento: "Colonia".to_owned(),
        localidad: "Carmelo".to_owned(),
        ..GestionCreate::default()
    };

    let created = client.create_gestion(&payload).await.unwrap();
    assert_eq!(created.id_gestion, "nueva-123");
}

#[tokio::test]
async fn test_cambiar_estado_posts_to_record_path() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/gestiones/g-9/cambiar-estado"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true, "id_gestion": "g-9", "estado": "EN PROCESO"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cambio = CambioEstado {
        nuevo_estado: "EN PROCESO".to_owned(),
        comentario: Some("derivado".to_owned()),
        ..CambioEstado::default()
    };
    client.cambiar_estado("g-9", &cambio).await.unwrap();
}

#[tokio::test]
async fn test_delete_gestion() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/gestiones/g-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_gestion("g-9").await.unwrap();
}

// ── Probing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_probe_reports_endpoint_existence_without_failing() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/usuarios/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(!client.probe("/usuarios").await);
    assert!(client.probe("/usuarios/roles").await);
}
