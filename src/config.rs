use std::env;

/// Runtime configuration sourced from the environment.
///
/// A `.env` file is honored when present (loaded in main); every key has a
/// local-development fallback, so the loader itself never fails.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection URL (`DB_URL`).
    pub db_url: String,
    /// Database user (`DB_USER`).
    pub db_user: String,
    /// Database credential (`DB_PASS`); empty by default.
    pub db_password: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            db_url: env_or("DB_URL", "postgres://localhost:5432/transactions"),
            db_user: env_or("DB_USER", "postgres"),
            db_password: env_or("DB_PASS", ""),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}
