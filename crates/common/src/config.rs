//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables once at startup and
//! passed by value into the application; nothing reads the environment after
//! that.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ADAPTER_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Only writable path inside an AWS Lambda execution environment
pub const LAMBDA_STORAGE_ROOT: &str = "/tmp";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Public origin used to build artifact URLs. When unset, the request's
    /// `Host` header is used instead.
    pub public_base_url: Option<String>,

    /// Directory under which `images/` and `audio/` are created
    pub storage_root: PathBuf,

    /// Optional pipeline stages to run (`poster`, `narration`)
    pub optional_stages: Vec<String>,

    /// Upper bound on any single adapter call
    pub adapter_timeout_secs: u64,

    /// Comma-separated CORS origins; permissive when unset
    pub cors_allowed_origins: Option<String>,

    /// Request body limit
    pub max_body_bytes: usize,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public_base_url: None,
            storage_root: PathBuf::from("."),
            optional_stages: Vec::new(),
            adapter_timeout_secs: DEFAULT_ADAPTER_TIMEOUT_SECS,
            cors_allowed_origins: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            rust_log: "castwright=info".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_defaults(Self::default())
    }

    /// Defaults for the Lambda runtime: artifacts go under [`LAMBDA_STORAGE_ROOT`]
    pub fn lambda_defaults() -> Self {
        Self {
            storage_root: PathBuf::from(LAMBDA_STORAGE_ROOT),
            ..Self::default()
        }
    }

    /// Load configuration, taking unset variables from `defaults`
    pub fn from_env_with_defaults(defaults: Self) -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let port = match non_empty_var("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got {raw}"))?,
            None => defaults.port,
        };

        let adapter_timeout_secs = match non_empty_var("ADAPTER_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| {
                anyhow::anyhow!("ADAPTER_TIMEOUT_SECS must be a whole number, got {raw}")
            })?,
            None => defaults.adapter_timeout_secs,
        };
        if adapter_timeout_secs == 0 {
            anyhow::bail!("ADAPTER_TIMEOUT_SECS must be greater than zero");
        }

        let max_body_bytes = match non_empty_var("MAX_BODY_BYTES") {
            Some(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_BODY_BYTES must be a whole number, got {raw}"))?,
            None => defaults.max_body_bytes,
        };

        let optional_stages = non_empty_var("PIPELINE_OPTIONAL_STAGES")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_ascii_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.optional_stages);

        let config = Self {
            public_base_url: non_empty_var("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .or(defaults.public_base_url),
            storage_root: non_empty_var("STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_root),
            optional_stages,
            adapter_timeout_secs,
            cors_allowed_origins: non_empty_var("CORS_ALLOWED_ORIGINS")
                .or(defaults.cors_allowed_origins),
            max_body_bytes,
            rust_log: env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            port,
        };

        Ok(config)
    }

    pub fn adapter_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.adapter_timeout_secs)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
