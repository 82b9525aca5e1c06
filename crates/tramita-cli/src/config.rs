//! CLI configuration and session persistence.
//!
//! Settings come from a TOML file layered under `TRAMITA_*` env vars and
//! CLI flags (figment). The bearer token lives in a separate state file,
//! the CLI's equivalent of the browser's tab-scoped session storage: a
//! later invocation restores the session, wiping the file ends it.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use tramita_api::transport::{TlsMode, TransportConfig};
use tramita_core::SessionStore;

use crate::cli::GlobalOpts;
use crate::error::CliError;

const DEFAULT_API_BASE: &str = "http://localhost:8080";

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// API base URL.
    pub api_base: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Accept invalid TLS certificates.
    pub insecure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            timeout: 30,
            insecure: false,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "tramita")
}

pub fn config_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("tramita.toml"))
}

/// Load config: defaults <- TOML file <- TRAMITA_* env <- CLI flags.
pub fn load_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("TRAMITA_"));

    if let Some(ref api_base) = global.api_base {
        figment = figment.merge(Serialized::default("api_base", api_base));
    }
    if let Some(timeout) = global.timeout {
        figment = figment.merge(Serialized::default("timeout", timeout));
    }
    if global.insecure {
        figment = figment.merge(Serialized::default("insecure", true));
    }

    figment.extract().map_err(|e| CliError::Config {
        message: e.to_string(),
    })
}

impl Config {
    pub fn base_url(&self) -> Result<Url, CliError> {
        self.api_base.parse().map_err(|e| CliError::Config {
            message: format!("invalid api_base '{}': {e}", self.api_base),
        })
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: if self.insecure {
                TlsMode::DangerAcceptInvalid
            } else {
                TlsMode::System
            },
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

// ── Session file store ───────────────────────────────────────────────

/// Token persistence in a state file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn at_default_path() -> Self {
        let path = project_dirs()
            .map(|dirs| dirs.data_local_dir().join("session-token"))
            .unwrap_or_else(|| PathBuf::from(".tramita-session"));
        Self { path }
    }

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, token: Option<&str>) {
        match token.filter(|t| !t.is_empty()) {
            Some(token) => {
                if let Some(parent) = self.path.parent() {
                    let _ = fs::create_dir_all(parent);
                }
                if let Err(e) = fs::write(&self.path, token) {
                    debug!(path = %self.path.display(), error = %e, "failed to persist session token");
                }
            }
            None => {
                let _ = fs::remove_file(&self.path);
            }
        }
    }

    fn read(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_store_round_trip_and_clear() {
        let dir = tempdir().expect("tempdir");
        let store = FileSessionStore::new(dir.path().join("session-token"));

        assert_eq!(store.read(), None);

        store.save(Some("tok-abc"));
        assert_eq!(store.read().as_deref(), Some("tok-abc"));

        store.save(None);
        assert_eq!(store.read(), None);
    }

    #[test]
    fn file_store_never_persists_an_empty_token() {
        let dir = tempdir().expect("tempdir");
        let store = FileSessionStore::new(dir.path().join("session-token"));
        store.save(Some(""));
        assert_eq!(store.read(), None);
    }
}
