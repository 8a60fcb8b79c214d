//! Process configuration, read once from the environment at startup.
//!
//! `main` loads a `.env` file from the working directory before anything else
//! reads the environment; real environment variables take precedence over it.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub app_port: u16,
    pub database: DatabaseConfig,
    /// How long shutdown waits for in-flight requests.
    pub shutdown_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Full connection string; takes priority over the individual parts.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub name: String,
    pub password: String,
    pub ssl_mode: String,
    pub pool_size: u32,
}

/// Load `.env` into the process environment without overriding variables that
/// are already set. Returns the file that was read, if one was found.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &'static str| lookup(key).filter(|v| !v.is_empty());

        let url = var("DATABASE_URL");
        // The individual parts are only required when no full URL is given.
        let required = |key: &'static str| match (&url, var(key)) {
            (_, Some(value)) => Ok(value),
            (Some(_), None) => Ok(String::new()),
            (None, None) => Err(ConfigError::Missing(key)),
        };

        let database = DatabaseConfig {
            host: var("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_or("DB_PORT", var("DB_PORT"), 5432)?,
            user: required("DB_USERNAME")?,
            name: required("DB_NAME")?,
            password: var("DB_PASSWORD").unwrap_or_default(),
            ssl_mode: var("SSL_MODE").unwrap_or_else(|| "disable".to_string()),
            pool_size: parse_or("DB_POOL_SIZE", var("DB_POOL_SIZE"), 10)?,
            url,
        };
        if database.pool_size == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_POOL_SIZE",
                value: "0".to_string(),
            });
        }

        Ok(Config {
            app_port: parse_or("APP_PORT", var("APP_PORT"), 8080)?,
            database,
            shutdown_timeout: Duration::from_secs(parse_or(
                "SHUTDOWN_TIMEOUT_SECS",
                var("SHUTDOWN_TIMEOUT_SECS"),
                15,
            )?),
        })
    }
}

fn parse_or<T: FromStr>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

impl DatabaseConfig {
    /// Connection string handed to libpq: either `DATABASE_URL` verbatim or a
    /// keyword/value string built from the parts.
    pub fn connection_string(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        let port = self.port.to_string();
        [
            ("host", self.host.as_str()),
            ("port", port.as_str()),
            ("user", self.user.as_str()),
            ("dbname", self.name.as_str()),
            ("password", self.password.as_str()),
            ("sslmode", self.ssl_mode.as_str()),
        ]
        .iter()
        .map(|(key, value)| format!("{key}={}", quote_conninfo_value(value)))
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// libpq needs single quotes around empty values and values with spaces;
/// quotes and backslashes inside are backslash-escaped.
fn quote_conninfo_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '\\');
    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_env_file_is_optional() {
        // Searched upward from the working directory; usually absent in tests
        if let Some(path) = load_dotenv() {
            assert!(path.ends_with(".env"));
        }
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("DB_USERNAME", "postgres"), ("DB_NAME", "recipes")]).unwrap();
        assert_eq!(config.app_port, 8080);
        assert_eq!(config.shutdown_timeout, Duration::from_secs(15));
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.ssl_mode, "disable");
        assert_eq!(config.database.pool_size, 10);
    }

    #[test]
    fn test_missing_database_user() {
        let err = config_from(&[("DB_NAME", "recipes")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DB_USERNAME")));
    }

    #[test]
    fn test_database_url_makes_parts_optional() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/recipes")]).unwrap();
        assert_eq!(
            config.database.connection_string(),
            "postgres://localhost/recipes"
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[
            ("APP_PORT", "eighty"),
            ("DB_USERNAME", "postgres"),
            ("DB_NAME", "recipes"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "APP_PORT", .. }));
    }

    #[test]
    fn test_zero_pool_size_is_invalid() {
        let err = config_from(&[
            ("DB_USERNAME", "postgres"),
            ("DB_NAME", "recipes"),
            ("DB_POOL_SIZE", "0"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "DB_POOL_SIZE", .. }));
    }

    #[test]
    fn test_connection_string_from_parts() {
        let config = config_from(&[
            ("APP_PORT", "9000"),
            ("DB_HOST", "db"),
            ("DB_PORT", "6543"),
            ("DB_USERNAME", "chef"),
            ("DB_NAME", "recipes"),
            ("DB_PASSWORD", "it's secret"),
            ("SSL_MODE", "require"),
        ])
        .unwrap();
        assert_eq!(config.app_port, 9000);
        assert_eq!(
            config.database.connection_string(),
            r"host=db port=6543 user=chef dbname=recipes password='it\'s secret' sslmode=require"
        );
    }

    #[test]
    fn test_empty_password_is_quoted() {
        assert_eq!(quote_conninfo_value(""), "''");
        assert_eq!(quote_conninfo_value("plain"), "plain");
        assert_eq!(quote_conninfo_value(r"a\b"), r"'a\\b'");
    }
}
