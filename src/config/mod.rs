//! Application configuration loaded from environment.

use std::net::SocketAddr;

/// Development-only signing secret. Rejected in production posture.
pub const DEV_SECRET: &str = "dev";

/// Minimum secret length (bytes) accepted in production.
pub const MIN_SECRET_LEN: usize = 32;

const DEFAULT_SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Deployment posture, from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

/// Application configuration loaded from `.env` and environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g. `127.0.0.1:3000`).
    pub server_addr: SocketAddr,
    /// SQLite database file, or `:memory:`.
    pub sqlite_path: String,
    /// Secret for signing session cookies.
    pub secret_key: String,
    pub environment: Environment,
    /// Session lifetime in seconds.
    pub session_ttl_secs: i64,
    pub hash_cost: HashCost,
    /// Log level: `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment. Call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| "127.0.0.1:3000".to_string());
        let server_addr: SocketAddr = server_addr
            .parse()
            .map_err(|_| ConfigLoadError::InvalidServerAddr)?;

        let sqlite_path =
            lookup("SQLITE_PATH").unwrap_or_else(|| "DATABASE.sqlite3".to_string());
        let secret_key = lookup("SECRET_KEY").unwrap_or_else(|| DEV_SECRET.to_string());
        let environment = lookup("APP_ENV")
            .map(|v| Environment::parse(&v))
            .unwrap_or(Environment::Development);

        let session_ttl_secs = match lookup("SESSION_TTL_SECS") {
            Some(v) => v
                .parse::<i64>()
                .ok()
                .filter(|ttl| *ttl > 0)
                .ok_or(ConfigLoadError::InvalidNumber("SESSION_TTL_SECS"))?,
            None => DEFAULT_SESSION_TTL_SECS,
        };

        let defaults = HashCost::default();
        let hash_cost = HashCost {
            memory_kib: parse_u32(&lookup, "HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_u32(&lookup, "HASH_ITERATIONS", defaults.iterations)?,
            parallelism: parse_u32(&lookup, "HASH_PARALLELISM", defaults.parallelism)?,
        };

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let config = Self {
            server_addr,
            sqlite_path,
            secret_key,
            environment,
            session_ttl_secs,
            hash_cost,
            log_level,
        };
        config.check_secret()?;
        Ok(config)
    }

    /// True when the signing secret is the dev default or too short to be trusted.
    pub fn has_weak_secret(&self) -> bool {
        self.secret_key == DEV_SECRET || self.secret_key.len() < MIN_SECRET_LEN
    }

    fn check_secret(&self) -> Result<(), ConfigLoadError> {
        if self.secret_key.is_empty() {
            return Err(ConfigLoadError::InsecureSecret);
        }
        if self.environment.is_production() && self.has_weak_secret() {
            return Err(ConfigLoadError::InsecureSecret);
        }
        Ok(())
    }
}

fn parse_u32<F>(lookup: &F, key: &'static str, default: u32) -> Result<u32, ConfigLoadError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigLoadError::InvalidNumber(key)),
        None => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Invalid SERVER_ADDR")]
    InvalidServerAddr,
    #[error("Invalid numeric value for {0}")]
    InvalidNumber(&'static str),
    #[error("SECRET_KEY must be a random value of at least 32 bytes in production")]
    InsecureSecret,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigLoadError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_in_development() {
        let config = load(&[]).unwrap();
        assert_eq!(config.server_addr.port(), 3000);
        assert_eq!(config.sqlite_path, "DATABASE.sqlite3");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.session_ttl_secs, DEFAULT_SESSION_TTL_SECS);
        assert_eq!(config.hash_cost, HashCost::default());
        assert!(config.has_weak_secret());
    }

    #[test]
    fn production_rejects_dev_secret() {
        let err = load(&[("APP_ENV", "production")]).unwrap_err();
        assert!(matches!(err, ConfigLoadError::InsecureSecret));
    }

    #[test]
    fn production_rejects_short_secret() {
        let err = load(&[("APP_ENV", "production"), ("SECRET_KEY", "hunter2")]).unwrap_err();
        assert!(matches!(err, ConfigLoadError::InsecureSecret));
    }

    #[test]
    fn production_accepts_strong_secret() {
        let secret = "k".repeat(MIN_SECRET_LEN);
        let config = load(&[("APP_ENV", "Production"), ("SECRET_KEY", &secret)]).unwrap();
        assert!(config.environment.is_production());
        assert!(!config.has_weak_secret());
    }

    #[test]
    fn empty_secret_is_always_rejected() {
        assert!(matches!(
            load(&[("SECRET_KEY", "")]).unwrap_err(),
            ConfigLoadError::InsecureSecret
        ));
    }

    #[test]
    fn invalid_numbers_are_reported_by_name() {
        let err = load(&[("SESSION_TTL_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigLoadError::InvalidNumber("SESSION_TTL_SECS")));

        let err = load(&[("HASH_ITERATIONS", "many")]).unwrap_err();
        assert!(matches!(err, ConfigLoadError::InvalidNumber("HASH_ITERATIONS")));
    }

    #[test]
    fn invalid_server_addr() {
        assert!(matches!(
            load(&[("SERVER_ADDR", "nope")]).unwrap_err(),
            ConfigLoadError::InvalidServerAddr
        ));
    }
}
