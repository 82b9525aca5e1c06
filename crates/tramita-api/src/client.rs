// HTTP client wrapper
//
// Wraps `reqwest::Client` with bearer-token injection, cache suppression,
// JSON body handling, and error normalization. Endpoint modules are
// implemented as inherent methods via separate files to keep this module
// focused on transport mechanics.

use std::sync::RwLock;

use reqwest::Method;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Decoded response body.
///
/// A response that declares a JSON content type is parsed; if parsing
/// fails despite the declared type, the raw text is returned instead of
/// an error. Non-JSON content types pass through unchanged.
#[derive(Debug, Clone)]
pub enum Body {
    Json(Value),
    Text(String),
}

impl Body {
    /// The JSON value, or `Null` for a text body (callers that need the
    /// raw text should match on the enum).
    pub fn into_json(self) -> Value {
        match self {
            Self::Json(v) => v,
            Self::Text(_) => Value::Null,
        }
    }
}

/// Raw HTTP client for the gestiones REST API.
///
/// Holds the base URL and the current bearer token. The token is shared
/// mutable state owned by the session layer: it is set before identity
/// validation (so concurrent requests during validation already carry it)
/// and cleared on sign-out or auth failure.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<SecretString>>,
}

impl ApiClient {
    /// Create a client from a base URL and transport config.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            base_url: normalize_base(base_url),
            token: RwLock::new(None),
        })
    }

    /// Create a client with a pre-built `reqwest::Client` (tests).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: normalize_base(Url::parse(base_url)?),
            token: RwLock::new(None),
        })
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Token management ─────────────────────────────────────────────

    /// Install the bearer token. Every subsequent request carries it.
    pub fn set_token(&self, token: SecretString) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token);
        }
    }

    /// Remove the bearer token. Subsequent requests are anonymous.
    pub fn clear_token(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.read().map(|t| t.is_some()).unwrap_or(false)
    }

    fn current_token(&self) -> Option<SecretString> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    // ── Request plumbing ─────────────────────────────────────────────

    /// Send a request and decode the response body.
    ///
    /// Always sends `Cache-Control: no-store` -- every call must reflect
    /// current server state, and the identity check in particular must
    /// never be answered from a cache. Non-2xx responses become
    /// [`Error::Http`] carrying the status, status text, and raw body.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Body, Error> {
        // Endpoint paths are root-anchored ("/me"); joined relative so a
        // base of https://host/api yields https://host/api/me, not
        // https://host/me.
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        debug!(%method, %url, "api request");

        let mut req = self
            .http
            .request(method, url)
            .header(CACHE_CONTROL, "no-store");

        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(token) = self.current_token() {
            req = req.bearer_auth(token.expose_secret());
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(Error::Transport)?;

        let status = resp.status();
        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));
        let text = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_owned(),
                body: text,
            });
        }

        if is_json {
            // Declared JSON but unparseable: degrade to raw text.
            match serde_json::from_str(&text) {
                Ok(v) => Ok(Body::Json(v)),
                Err(_) => Ok(Body::Text(text)),
            }
        } else {
            Ok(Body::Text(text))
        }
    }

    /// GET returning the decoded JSON value.
    pub async fn get_value(&self, path: &str, query: &[(&str, String)]) -> Result<Value, Error> {
        Ok(self.send(Method::GET, path, query, None).await?.into_json())
    }

    /// GET decoded into a typed response.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let value = self.get_value(path, query).await?;
        decode(value)
    }

    /// POST a JSON body, decoding the typed response.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        let body = serde_json::to_value(body).map_err(|e| Error::Deserialization {
            message: format!("failed to serialize request body: {e}"),
            body: String::new(),
        })?;
        let value = self
            .send(Method::POST, path, &[], Some(&body))
            .await?
            .into_json();
        decode(value)
    }

    /// PUT a JSON body, decoding the typed response.
    pub async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        let body = serde_json::to_value(body).map_err(|e| Error::Deserialization {
            message: format!("failed to serialize request body: {e}"),
            body: String::new(),
        })?;
        let value = self
            .send(Method::PUT, path, &[], Some(&body))
            .await?
            .into_json();
        decode(value)
    }

    /// DELETE, discarding the response body.
    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        self.send(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    /// Non-aborting existence probe: does this endpoint answer a GET?
    ///
    /// Used for capability negotiation (auto-detecting which of several
    /// candidate admin-user API shapes the backend exposes) where a miss
    /// must not abort the larger flow.
    pub async fn probe(&self, path: &str) -> bool {
        match self.send(Method::GET, path, &[], None).await {
            Ok(_) => true,
            Err(e) => {
                debug!(path, error = %e, "probe miss");
                false
            }
        }
    }
}

/// Ensure the base path ends with '/' so joins keep any path prefix the
/// deployment mounts the API under.
fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }
    url
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    let body = value.to_string();
    serde_json::from_value(value).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}
