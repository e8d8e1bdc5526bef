//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! - `DATABASE_URL` - SQLite connection string (default: `sqlite://data/links.db`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BASE_URL` - Public base for short URLs, e.g. `https://sho.rt`
//!   (default: derived from the request `Host` header)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_CONNECT_TIMEOUT` - Pool acquire timeout in seconds (default: 30)
//!
//! ## Shortener variables
//!
//! - `CODE_LENGTH` - Length of generated codes (default: 6)
//! - `CODE_ALPHABET` - Symbols used for generated codes (default: `[A-Za-z0-9]`)
//! - `REUSE_EXISTING_FOR_TARGET` - Return the existing code for a known target
//!   (default: `true`)
//! - `MAX_RETRIES` - Collision retries at the configured length (default: 10)
//! - `OPERATION_TIMEOUT_MS` - Deadline for a single shorten/resolve call,
//!   `0` disables it (default: 5000)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::utils::code_generator::{CodeGenerator, DEFAULT_ALPHABET};

/// Configuration of the shortening core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenerConfig {
    /// Length of generated codes before any escalation.
    pub code_length: usize,
    /// Symbols generated codes are drawn from.
    pub alphabet: String,
    /// When `true`, shortening a target that already has an auto-generated
    /// code returns that code instead of minting a new one.
    pub reuse_existing_for_target: bool,
    /// Collision retries at `code_length` before the length is escalated.
    pub max_retries: usize,
    /// Default deadline for a single shorten/resolve call.
    pub operation_timeout: Option<Duration>,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            alphabet: DEFAULT_ALPHABET.to_string(),
            reuse_existing_for_target: true,
            max_retries: 10,
            operation_timeout: Some(Duration::from_secs(5)),
        }
    }
}

impl ShortenerConfig {
    /// Loads shortener options from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let operation_timeout = match parse_var::<u64>("OPERATION_TIMEOUT_MS")? {
            Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
            None => defaults.operation_timeout,
        };

        Ok(Self {
            code_length: parse_var("CODE_LENGTH")?.unwrap_or(defaults.code_length),
            alphabet: env::var("CODE_ALPHABET").unwrap_or(defaults.alphabet),
            reuse_existing_for_target: parse_bool_var("REUSE_EXISTING_FOR_TARGET")?
                .unwrap_or(defaults.reuse_existing_for_target),
            max_retries: parse_var("MAX_RETRIES")?.unwrap_or(defaults.max_retries),
            operation_timeout,
        })
    }

    /// Validates the shortener options.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `code_length` is not between 1 and 32
    /// - `max_retries` is 0
    /// - `alphabet` is empty or contains symbols that are not URL-safe
    pub fn validate(&self) -> Result<()> {
        if self.code_length == 0 || self.code_length > 32 {
            anyhow::bail!(
                "CODE_LENGTH must be between 1 and 32, got {}",
                self.code_length
            );
        }

        if self.max_retries == 0 {
            anyhow::bail!("MAX_RETRIES must be at least 1");
        }

        CodeGenerator::new(&self.alphabet).context("CODE_ALPHABET is invalid")?;

        Ok(())
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Public base URL for short links; `None` derives it from the request.
    pub base_url: Option<String>,
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 5).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
    pub shortener: ShortenerConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/links.db".to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let base_url = env::var("BASE_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        let db_max_connections = parse_var("DB_MAX_CONNECTIONS")?.unwrap_or(5);
        let db_connect_timeout = parse_var("DB_CONNECT_TIMEOUT")?.unwrap_or(30);

        let shortener =
            ShortenerConfig::from_env().context("Failed to load shortener configuration")?;

        Ok(Self {
            database_url,
            listen_addr,
            log_level,
            log_format,
            base_url,
            db_max_connections,
            db_connect_timeout,
            shortener,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `database_url` is not a SQLite URL
    /// - `base_url` is not an http(s) URL
    /// - pool settings are zero
    /// - shortener options are invalid
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if let Some(ref base_url) = self.base_url
            && !base_url.starts_with("http://")
            && !base_url.starts_with("https://")
        {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                base_url
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        self.shortener.validate()
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        match self.base_url {
            Some(ref base_url) => tracing::info!("  Base URL: {}", base_url),
            None => tracing::info!("  Base URL: from Host header"),
        }
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Codes: length {}, {} symbols, {} retries, reuse {}",
            self.shortener.code_length,
            self.shortener.alphabet.chars().count(),
            self.shortener.max_retries,
            self.shortener.reuse_existing_for_target
        );
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| anyhow::anyhow!("{name} has an invalid value: '{v}'")),
        Err(_) => Ok(None),
    }
}

/// Accepts `true`/`false`/`1`/`0`, case-insensitive, surrounding whitespace ignored.
fn parse_bool_var(name: &str) -> Result<Option<bool>> {
    match env::var(name) {
        Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            _ => anyhow::bail!("{name} has an invalid value: '{v}'"),
        },
        Err(_) => Ok(None),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
