//! Configuration loading and representation.
//!
//! Everything comes from environment variables. Parsing goes through a
//! lookup closure so tests can feed a map instead of mutating the process
//! environment.

use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};

use thiserror::Error;

pub use storegate_observability::LogFormat;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;
pub const DEFAULT_MEMORY_BUCKETS: &str = "uploads";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Which adapters back the HTTP surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// MySQL + MongoDB + S3.
    Live,
    /// Process-local fakes (dev/test).
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MySqlConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Validated to `[A-Za-z0-9_]+`; it is interpolated into DDL/DML.
    pub database: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Config {
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    pub endpoint: Option<String>,
}

impl S3Config {
    /// Static credentials, when both halves of the key pair are set.
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub backend: StoreBackend,
    pub log_format: LogFormat,
    pub max_upload_bytes: usize,
    /// Buckets created at boot when `backend` is `Memory`.
    pub memory_buckets: Vec<String>,
    pub mysql: MySqlConfig,
    pub mongo: MongoConfig,
    pub s3: S3Config,
}

impl AppConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration from an explicit key/value map.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = parse_or(&var, "PORT", DEFAULT_PORT)?;
        let backend = match var("STORE_BACKEND").as_deref() {
            None | Some("live") => StoreBackend::Live,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::invalid("STORE_BACKEND", other, "expected live or memory"));
            }
        };
        let log_format = match var("LOG_FORMAT").as_deref() {
            None | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => {
                return Err(ConfigError::invalid("LOG_FORMAT", other, "expected json or pretty"));
            }
        };

        let database = var("DB_NAME").unwrap_or_else(|| "loja".to_string());
        validate_identifier("DB_NAME", &database)?;

        let mysql = MySqlConfig {
            host: var("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_or(&var, "DB_PORT", 3306)?,
            user: var("DB_USER").unwrap_or_else(|| "root".to_string()),
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            database,
            max_connections: parse_or(&var, "DB_MAX_CONNECTIONS", 10)?,
        };

        let mongo = MongoConfig {
            uri: var("MONGODB_URI").unwrap_or_else(|| "mongodb://localhost:27017".to_string()),
            database: var("MONGODB_DATABASE").unwrap_or_else(|| "storegate".to_string()),
            collection: var("MONGODB_COLLECTION").unwrap_or_else(|| "users".to_string()),
        };

        let s3 = S3Config {
            region: var("REGION").unwrap_or_else(|| "us-east-1".to_string()),
            access_key_id: var("ACCESS_KEY_ID"),
            secret_access_key: var("SECRET_ACCESS_KEY"),
            session_token: var("SESSION_TOKEN"),
            endpoint: var("S3_ENDPOINT"),
        };

        Ok(Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            backend,
            log_format,
            max_upload_bytes: parse_or(&var, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            memory_buckets: split_list(
                var("MEMORY_BUCKETS")
                    .as_deref()
                    .unwrap_or(DEFAULT_MEMORY_BUCKETS),
            ),
            mysql,
            mongo,
            s3,
        })
    }
}

fn parse_or<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::invalid(key, &raw, e.to_string())),
    }
}

/// Comma-separated list; blank entries are skipped.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_identifier(key: &'static str, value: &str) -> Result<(), ConfigError> {
    let ok = !value.is_empty()
        && value.len() <= 64
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if ok {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            key,
            value,
            "only ASCII letters, digits and '_' are allowed (max 64)",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_to_an_empty_environment() {
        let cfg = AppConfig::from_map(&HashMap::new()).unwrap();
        assert_eq!(cfg.bind_addr.port(), DEFAULT_PORT);
        assert_eq!(cfg.backend, StoreBackend::Live);
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert_eq!(cfg.mysql.database, "loja");
        assert_eq!(cfg.mysql.port, 3306);
        assert_eq!(cfg.mongo.collection, "users");
        assert_eq!(cfg.s3.region, "us-east-1");
        assert!(cfg.s3.static_credentials().is_none());
        assert_eq!(cfg.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(cfg.memory_buckets, vec!["uploads"]);
    }

    #[test]
    fn memory_buckets_are_a_comma_separated_list() {
        let cfg = AppConfig::from_map(&vars(&[("MEMORY_BUCKETS", " fotos, ,videos ")])).unwrap();
        assert_eq!(cfg.memory_buckets, vec!["fotos", "videos"]);
    }

    #[test]
    fn overrides_are_read() {
        let cfg = AppConfig::from_map(&vars(&[
            ("PORT", "8081"),
            ("STORE_BACKEND", "memory"),
            ("LOG_FORMAT", "pretty"),
            ("DB_NAME", "catalogo_2"),
            ("DB_PASSWORD", "s3cr3t"),
            ("MONGODB_URI", "mongodb://db:27017"),
            ("REGION", "sa-east-1"),
            ("ACCESS_KEY_ID", "AKIA"),
            ("SECRET_ACCESS_KEY", "shh"),
        ]))
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 8081);
        assert_eq!(cfg.backend, StoreBackend::Memory);
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert_eq!(cfg.mysql.database, "catalogo_2");
        assert_eq!(cfg.mysql.password, "s3cr3t");
        assert_eq!(cfg.mongo.uri, "mongodb://db:27017");
        assert_eq!(cfg.s3.static_credentials(), Some(("AKIA", "shh")));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = AppConfig::from_map(&vars(&[("PORT", "  "), ("DB_NAME", "")])).unwrap();
        assert_eq!(cfg.bind_addr.port(), DEFAULT_PORT);
        assert_eq!(cfg.mysql.database, "loja");
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let err = AppConfig::from_map(&vars(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let err = AppConfig::from_map(&vars(&[("STORE_BACKEND", "redis")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "STORE_BACKEND", .. }));
    }

    #[test]
    fn database_name_cannot_break_out_of_quoting() {
        let err = AppConfig::from_map(&vars(&[("DB_NAME", "loja`; DROP TABLE produto")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_NAME", .. }));
    }
}
