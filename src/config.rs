//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Session store
//!
//! ### Method 1: Full URL
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! ```
//!
//! ### Method 2: Individual components
//!
//! ```bash
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! Without either, sessions are kept in process memory.
//!
//! ## Required Variables
//!
//! - `AUTH_API_URL` - Base URL of the remote authentication service
//! - `SESSION_SECRET` - HMAC key used to derive session storage keys
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `AUTH_API_TIMEOUT_SECONDS` - Sign-in request timeout (default: 10)
//! - `SESSION_TTL_SECONDS` - Lifetime of stored session keys (default: 86400)
//! - `COOKIE_SECURE` - Set the `Secure` flag on cookies (default: false)
//! - `BEHIND_PROXY` - Rate-limit by forwarded client IP (default: false)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub auth_api_url: String,
    pub auth_api_timeout_seconds: u64,
    pub redis_url: Option<String>,
    pub session_ttl_seconds: u64,
    /// HMAC key for session storage keys. Loaded from `SESSION_SECRET`. Must be non-empty.
    pub session_secret: String,
    pub cookie_secure: bool,
    /// Take the client IP for rate limiting from `X-Forwarded-For` / `X-Real-IP`.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `AUTH_API_URL` or `SESSION_SECRET` is missing.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let auth_api_url = env::var("AUTH_API_URL").context("AUTH_API_URL must be set")?;

        let auth_api_timeout_seconds = env::var("AUTH_API_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let redis_url = Self::load_redis_url();

        let session_ttl_seconds = env::var("SESSION_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        let session_secret = env::var("SESSION_SECRET").context("SESSION_SECRET must be set")?;

        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            listen_addr,
            auth_api_url,
            auth_api_timeout_seconds,
            redis_url,
            session_ttl_seconds,
            session_secret,
            cookie_secure,
            behind_proxy,
            log_level,
            log_format,
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let url = match password {
            // Empty password means no authentication
            Some(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        };

        Some(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `auth_api_url` is not an http(s) URL
    /// - a timeout or TTL is zero
    /// - `session_secret` is empty
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

        if !self.auth_api_url.starts_with("http://") && !self.auth_api_url.starts_with("https://")
        {
            anyhow::bail!(
                "AUTH_API_URL must start with 'http://' or 'https://', got '{}'",
                self.auth_api_url
            );
        }

        if self.auth_api_timeout_seconds == 0 {
            anyhow::bail!("AUTH_API_TIMEOUT_SECONDS must be greater than 0");
        }

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(redis_url)
            );
        }

        if self.session_ttl_seconds == 0 {
            anyhow::bail!("SESSION_TTL_SECONDS must be greater than 0");
        }

        if self.session_secret.is_empty() {
            anyhow::bail!("SESSION_SECRET must not be empty");
        }

        Ok(())
    }

    pub fn auth_api_timeout(&self) -> Duration {
        Duration::from_secs(self.auth_api_timeout_seconds)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!(
            "  Auth API: {} (timeout {}s)",
            self.auth_api_url,
            self.auth_api_timeout_seconds
        );

        if let Some(ref redis_url) = self.redis_url {
            tracing::info!("  Session store: {} (Redis)", mask_connection_string(redis_url));
        } else {
            tracing::info!("  Session store: memory");
        }

        tracing::info!("  Session TTL: {}s", self.session_ttl_seconds);
        tracing::info!("  Secure cookies: {}", self.cookie_secure);
        tracing::info!("  Behind proxy: {}", self.behind_proxy);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Masks the password in connection strings for logging.
///
/// - `redis://:password@host:port/db` → `redis://:***@host:port/db`
pub fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// Expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn valid_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            auth_api_url: "https://api.example.com".to_string(),
            auth_api_timeout_seconds: 10,
            redis_url: None,
            session_ttl_seconds: 86_400,
            session_secret: "test-secret".to_string(),
            cookie_secure: false,
            behind_proxy: false,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }

    #[test]
    fn test_mask_connection_string() {
        assert_eq!(
            mask_connection_string("redis://:password@localhost:6379/0"),
            "redis://:***@localhost:6379/0"
        );

        assert_eq!(
            mask_connection_string("redis://localhost:6379/0"),
            "redis://localhost:6379/0"
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "0.0.0.0:3000".to_string();

        config.auth_api_url = "ftp://api.example.com".to_string();
        assert!(config.validate().is_err());
        config.auth_api_url = "http://localhost:8080".to_string();
        assert!(config.validate().is_ok());

        config.redis_url = Some("memcached://localhost".to_string());
        assert!(config.validate().is_err());
        config.redis_url = Some("rediss://cache:6380/0".to_string());
        assert!(config.validate().is_ok());

        config.session_secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_durations_rejected() {
        let mut config = valid_config();
        config.auth_api_timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.session_ttl_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_load_redis_url_from_components() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("REDIS_HOST", "redis-host");
            env::set_var("REDIS_PORT", "6380");
            env::set_var("REDIS_DB", "1");
        }

        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://redis-host:6380/1");

        unsafe {
            env::set_var("REDIS_PASSWORD", "secret");
        }
        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://:secret@redis-host:6380/1");

        unsafe {
            env::set_var("REDIS_PASSWORD", "");
        }
        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://redis-host:6380/1");

        unsafe {
            env::remove_var("REDIS_HOST");
            env::remove_var("REDIS_PORT");
            env::remove_var("REDIS_DB");
            env::remove_var("REDIS_PASSWORD");
        }
    }

    #[test]
    #[serial]
    fn test_redis_unset_means_memory_store() {
        // SAFETY: Tests are run serially
        unsafe {
            env::remove_var("REDIS_URL");
            env::remove_var("REDIS_HOST");
        }

        assert!(Config::load_redis_url().is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_requires_auth_api_url() {
        // SAFETY: Tests are run serially
        unsafe {
            env::remove_var("AUTH_API_URL");
            env::set_var("SESSION_SECRET", "s");
        }

        assert!(Config::from_env().is_err());

        unsafe {
            env::set_var("AUTH_API_URL", "https://api.example.com");
            env::set_var("COOKIE_SECURE", "TRUE");
            env::set_var("BEHIND_PROXY", "1");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.auth_api_url, "https://api.example.com");
        assert!(config.cookie_secure);
        assert!(config.behind_proxy);
        assert_eq!(config.auth_api_timeout(), Duration::from_secs(10));

        unsafe {
            env::remove_var("AUTH_API_URL");
            env::remove_var("SESSION_SECRET");
            env::remove_var("COOKIE_SECURE");
            env::remove_var("BEHIND_PROXY");
        }
    }
}
