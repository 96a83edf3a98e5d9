//! Server configuration loaded from environment variables.

use crate::error::ConfigError;
use std::str::FromStr;

pub const MEMORY_DATABASE_URL: &str = "memory";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// PostgreSQL URL, or `memory` for the in-process store.
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Prefix all product routes are mounted under, e.g. `/api`. Empty mounts at the root.
    pub context_path: String,
    pub max_connections: u32,
    pub pretty_json: bool,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/products".into(),
            host: "0.0.0.0".into(),
            port: 8080,
            context_path: "/api".into(),
            max_connections: 5,
            pretty_json: true,
            body_limit_bytes: 64 * 1024,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATABASE_URL` (default: `postgres://localhost/products`)
    /// - `SERVER_HOST` (default: `0.0.0.0`)
    /// - `SERVER_PORT` (default: 8080)
    /// - `CONTEXT_PATH` (default: `/api`)
    /// - `DB_MAX_CONNECTIONS` (default: 5)
    /// - `PRETTY_JSON` (default: true)
    /// - `BODY_LIMIT_BYTES` (default: 65536)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            host: lookup("SERVER_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "SERVER_PORT", defaults.port)?,
            context_path: lookup("CONTEXT_PATH")
                .map(|raw| normalize_context_path(&raw))
                .unwrap_or(defaults.context_path),
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections)?,
            pretty_json: match lookup("PRETTY_JSON") {
                Some(raw) => parse_bool("PRETTY_JSON", &raw)?,
                None => defaults.pretty_json,
            },
            body_limit_bytes: parse_or(&lookup, "BODY_LIMIT_BYTES", defaults.body_limit_bytes)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url.eq_ignore_ascii_case(MEMORY_DATABASE_URL)
    }
}

/// Turn a servlet-style mapping such as `/api/*` into a route prefix (`/api`).
pub fn normalize_context_path(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix("/*").unwrap_or(trimmed);
    let trimmed = trimmed.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(default),
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(load(&[]).unwrap(), ServerConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("SERVER_PORT", "9090"),
            ("CONTEXT_PATH", "/shop/*"),
            ("DATABASE_URL", "memory"),
            ("PRETTY_JSON", "off"),
        ])
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.bind_addr(), "0.0.0.0:9090");
        assert_eq!(config.context_path, "/shop");
        assert!(config.uses_memory_store());
        assert!(!config.pretty_json);
    }

    #[test]
    fn invalid_number_is_an_error() {
        let err = load(&[("SERVER_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "SERVER_PORT", .. }));
    }

    #[test]
    fn invalid_bool_is_an_error() {
        assert!(load(&[("PRETTY_JSON", "maybe")]).is_err());
    }

    #[test]
    fn context_path_normalization() {
        assert_eq!(normalize_context_path("/api/*"), "/api");
        assert_eq!(normalize_context_path("api/"), "/api");
        assert_eq!(normalize_context_path("/v1/api"), "/v1/api");
        assert_eq!(normalize_context_path("/*"), "");
        assert_eq!(normalize_context_path("/"), "");
    }
}
