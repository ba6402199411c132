//! Application configuration
//!
//! Every setting is read from environment variables with a sensible default,
//! then validated before the server starts.

use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Configuration trait implemented by every config section
pub trait AppConfigTrait: Sized {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self, ConfigError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError>;

    /// Get configuration source information for debugging
    fn config_sources(&self) -> HashMap<String, ConfigSource>;
}

/// Where a configuration value came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    EnvVar(String),
    Nested,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: '{value}', expected {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Validation failed for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },
}

impl ConfigError {
    fn validation<F: Into<String>, R: Into<String>>(field: F, reason: R) -> Self {
        ConfigError::ValidationFailed {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Testing,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "testing" | "test" => Ok(Environment::Testing),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue {
                field: "environment".to_string(),
                value: s.to_string(),
                expected: "development, testing, or production".to_string(),
            }),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub name: String,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub http: HttpConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Connection pool settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Connections kept open while idle
    pub min_connections: u32,
    pub max_lifetime: Option<Duration>,
    pub idle_timeout: Option<Duration>,
    pub acquire_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub request_timeout: Duration,
    pub max_request_size: usize,
    pub cors_permissive: bool,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl AppConfig {
    /// Configuration for tests: a single in-memory SQLite connection and a
    /// cheap bcrypt cost.
    pub fn testing() -> Self {
        AppConfig {
            name: "todo-api".to_string(),
            environment: Environment::Testing,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                min_connections: 1,
                max_lifetime: None,
                idle_timeout: None,
                acquire_timeout: Duration::from_secs(5),
            },
            http: HttpConfig::default(),
            auth: AuthConfig { bcrypt_cost: 4 },
            logging: LoggingConfig {
                level: "error".to_string(),
                format: "compact".to_string(),
            },
        }
    }
}

impl AppConfigTrait for AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let name = get_env_or_default("APP_NAME", "todo-api");
        let environment = Environment::from_str(&get_env_or_default("APP_ENV", "development"))?;

        Ok(AppConfig {
            name,
            environment,
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            http: HttpConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::validation("name", "App name cannot be empty"));
        }

        self.server.validate()?;
        self.database.validate()?;
        self.http.validate()?;
        self.auth.validate()?;
        self.logging.validate()?;

        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert("name".to_string(), ConfigSource::EnvVar("APP_NAME".to_string()));
        sources.insert(
            "environment".to_string(),
            ConfigSource::EnvVar("APP_ENV".to_string()),
        );
        for nested in ["server", "database", "http", "auth", "logging"] {
            sources.insert(nested.to_string(), ConfigSource::Nested);
        }
        sources
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfigTrait for ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(ServerConfig {
            host: get_env_or_default("SERVER_HOST", "0.0.0.0"),
            port: parse_env("SERVER_PORT", "8080", "port", "valid port number (1-65535)")?,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::validation("host", "Host cannot be empty"));
        }
        if self.port == 0 {
            return Err(ConfigError::validation("port", "Port cannot be 0"));
        }
        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        env_sources(&[("host", "SERVER_HOST"), ("port", "SERVER_PORT")])
    }
}

impl AppConfigTrait for DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let max_lifetime: u64 = parse_env(
            "DATABASE_MAX_LIFETIME_SECS",
            "300",
            "max_lifetime",
            "number of seconds (0 disables)",
        )?;
        let idle_timeout: u64 = parse_env(
            "DATABASE_IDLE_TIMEOUT_SECS",
            "600",
            "idle_timeout",
            "number of seconds (0 disables)",
        )?;
        let acquire_timeout: u64 = parse_env(
            "DATABASE_ACQUIRE_TIMEOUT_SECS",
            "30",
            "acquire_timeout",
            "number of seconds",
        )?;

        Ok(DatabaseConfig {
            url: get_env_or_default("DATABASE_URL", "sqlite://todo.db?mode=rwc"),
            max_connections: parse_env(
                "DATABASE_MAX_CONNECTIONS",
                "10",
                "max_connections",
                "valid number",
            )?,
            min_connections: parse_env(
                "DATABASE_MIN_CONNECTIONS",
                "5",
                "min_connections",
                "valid number",
            )?,
            max_lifetime: non_zero_secs(max_lifetime),
            idle_timeout: non_zero_secs(idle_timeout),
            acquire_timeout: Duration::from_secs(acquire_timeout),
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation("url", "Database URL cannot be empty"));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "max_connections",
                "Pool must allow at least one connection",
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "min_connections",
                "Cannot exceed max_connections",
            ));
        }
        if self.acquire_timeout.is_zero() {
            return Err(ConfigError::validation(
                "acquire_timeout",
                "Acquire timeout must be greater than 0",
            ));
        }
        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        env_sources(&[
            ("url", "DATABASE_URL"),
            ("max_connections", "DATABASE_MAX_CONNECTIONS"),
            ("min_connections", "DATABASE_MIN_CONNECTIONS"),
            ("max_lifetime", "DATABASE_MAX_LIFETIME_SECS"),
            ("idle_timeout", "DATABASE_IDLE_TIMEOUT_SECS"),
            ("acquire_timeout", "DATABASE_ACQUIRE_TIMEOUT_SECS"),
        ])
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_request_size: 1024 * 1024,
            cors_permissive: true,
        }
    }
}

impl AppConfigTrait for HttpConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let request_timeout: u64 = parse_env(
            "HTTP_REQUEST_TIMEOUT",
            "30",
            "request_timeout",
            "valid number of seconds",
        )?;

        Ok(HttpConfig {
            request_timeout: Duration::from_secs(request_timeout),
            max_request_size: parse_env(
                "HTTP_MAX_REQUEST_SIZE",
                "1048576",
                "max_request_size",
                "valid number of bytes",
            )?,
            cors_permissive: parse_env(
                "HTTP_CORS_PERMISSIVE",
                "true",
                "cors_permissive",
                "true or false",
            )?,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout.is_zero() {
            return Err(ConfigError::validation(
                "request_timeout",
                "Request timeout must be greater than 0",
            ));
        }
        if self.max_request_size == 0 {
            return Err(ConfigError::validation(
                "max_request_size",
                "Maximum request size must be greater than 0",
            ));
        }
        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        env_sources(&[
            ("request_timeout", "HTTP_REQUEST_TIMEOUT"),
            ("max_request_size", "HTTP_MAX_REQUEST_SIZE"),
            ("cors_permissive", "HTTP_CORS_PERMISSIVE"),
        ])
    }
}

impl AppConfigTrait for AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(AuthConfig {
            bcrypt_cost: parse_env("AUTH_BCRYPT_COST", "14", "bcrypt_cost", "number between 4 and 31")?,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                field: "bcrypt_cost".to_string(),
                value: self.bcrypt_cost.to_string(),
                expected: "number between 4 and 31".to_string(),
            });
        }
        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        env_sources(&[("bcrypt_cost", "AUTH_BCRYPT_COST")])
    }
}

impl AppConfigTrait for LoggingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(LoggingConfig {
            level: get_env_or_default("LOG_LEVEL", "info"),
            format: get_env_or_default("LOG_FORMAT", "compact"),
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "level".to_string(),
                value: self.level.clone(),
                expected: "trace, debug, info, warn, or error".to_string(),
            });
        }

        let valid_formats = ["compact", "pretty", "json"];
        if !valid_formats.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "format".to_string(),
                value: self.format.clone(),
                expected: "compact, pretty, or json".to_string(),
            });
        }

        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        env_sources(&[("level", "LOG_LEVEL"), ("format", "LOG_FORMAT")])
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: FromStr>(
    key: &str,
    default: &str,
    field: &str,
    expected: &str,
) -> Result<T, ConfigError> {
    let raw = get_env_or_default(key, default);
    raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        value: raw.clone(),
        expected: expected.to_string(),
    })
}

fn non_zero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn env_sources(pairs: &[(&str, &str)]) -> HashMap<String, ConfigSource> {
    pairs
        .iter()
        .map(|(field, var)| (field.to_string(), ConfigSource::EnvVar(var.to_string())))
        .collect()
}
