use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Which resolution strategy the service runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverMode {
    /// Look contacts up in an external directory.
    Directory(DirectoryBackend),
    /// No directory: derive a placeholder contact from the company name.
    Synthetic,
}

/// Where the contact directory lives when running in `ResolverMode::Directory`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryBackend {
    Postgres { database_url: String },
    Rest { base_url: String, api_key: String },
    File { path: PathBuf },
}

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable required by the selected backend is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub resolver_mode: ResolverMode,
    pub lookup_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so parsing can be tested
    /// without touching the process environment.
    fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            get(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let resolver_mode = match get("RESOLVER_MODE").as_deref().unwrap_or("directory") {
            "synthetic" => ResolverMode::Synthetic,
            "directory" => {
                let backend = match get("DIRECTORY_BACKEND").as_deref().unwrap_or("postgres") {
                    "postgres" => DirectoryBackend::Postgres {
                        database_url: require("DATABASE_URL")?,
                    },
                    "rest" => DirectoryBackend::Rest {
                        base_url: require("DIRECTORY_REST_URL")?,
                        api_key: require("DIRECTORY_API_KEY")?,
                    },
                    "file" => DirectoryBackend::File {
                        path: PathBuf::from(require("CONTACTS_FILE")?),
                    },
                    other => bail!(
                        "DIRECTORY_BACKEND must be 'postgres', 'rest' or 'file', got '{other}'"
                    ),
                };
                ResolverMode::Directory(backend)
            }
            other => bail!("RESOLVER_MODE must be 'directory' or 'synthetic', got '{other}'"),
        };

        let lookup_timeout_secs = get("LOOKUP_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u64>()
            .context("LOOKUP_TIMEOUT_SECS must be a whole number of seconds")?;
        if lookup_timeout_secs == 0 {
            bail!("LOOKUP_TIMEOUT_SECS must be at least 1 second");
        }

        Ok(Config {
            resolver_mode,
            lookup_timeout: Duration::from_secs(lookup_timeout_secs),
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
