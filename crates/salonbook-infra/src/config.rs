//! Application configuration.
//!
//! Settings load from an optional TOML file, with every field defaulting to
//! a sensible value so a bare `salonbook serve` works out of the box. The
//! data directory falls back to `SALONBOOK_DATA_DIR`, then `~/.salonbook`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration for the server binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// SQLite database URL. Defaults to `<data_dir>/salonbook.db`.
    pub database_url: Option<String>,
    /// Directory where uploaded images are written.
    /// Defaults to `<data_dir>/uploads`.
    pub uploads_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8700".to_string(),
            database_url: None,
            uploads_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, or defaults when `path` is
    /// absent, the file does not exist, or the file fails to parse.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        match toml::from_str(&raw) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "malformed config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Resolved database URL, creating the default under the data dir.
    pub fn database_url(&self) -> String {
        self.database_url.clone().unwrap_or_else(|| {
            format!(
                "sqlite://{}?mode=rwc",
                data_dir().join("salonbook.db").display()
            )
        })
    }

    /// Resolved uploads directory.
    pub fn uploads_dir(&self) -> PathBuf {
        self.uploads_dir
            .clone()
            .unwrap_or_else(|| data_dir().join("uploads"))
    }
}

/// The platform data directory: `SALONBOOK_DATA_DIR` if set, else
/// `~/.salonbook`.
pub fn data_dir() -> PathBuf {
    match std::env::var("SALONBOOK_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".salonbook")
        }
    }
}
