use std::env;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while assembling configuration at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub auth: BasicAuthConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest request body accepted on /api/feedback
    pub max_request_size_bytes: usize,
}

/// Credentials expected in the `Authorization: Basic` header
#[derive(Clone)]
pub struct BasicAuthConfig {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for BasicAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// Seconds to wait when acquiring a connection
    pub connection_timeout: u64,
}

impl DatabaseConfig {
    pub const DEFAULT_PORT: u16 = 5432;

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("max_connections", &self.max_connections)
            .field("connection_timeout", &self.connection_timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

/// Pool and security defaults that depend on the deployment environment
struct Defaults {
    max_connections: u32,
    connection_timeout: u64,
    max_request_size_bytes: usize,
    cors_origins: Vec<String>,
}

impl Environment {
    fn from_env() -> Self {
        match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        }
    }

    fn defaults(self) -> Defaults {
        match self {
            Environment::Development => Defaults {
                max_connections: 5,
                connection_timeout: 30,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
            Environment::Staging => Defaults {
                max_connections: 10,
                connection_timeout: 10,
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            Environment::Production => Defaults {
                max_connections: 20,
                connection_timeout: 5,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

impl AppConfig {
    /// Build configuration from the process environment.
    ///
    /// Secrets (`BASIC_AUTH_*`, `POSTGRES_*`) are required; everything else
    /// falls back to environment-specific defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let defaults = environment.defaults();

        let server = ServerConfig {
            host: optional("FEEDBACK_API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: match optional("FEEDBACK_API_PORT").or_else(|| optional("PORT")) {
                Some(v) => parse("FEEDBACK_API_PORT", v)?,
                None => 8000,
            },
            max_request_size_bytes: parse_or(
                "API_MAX_REQUEST_SIZE_BYTES",
                defaults.max_request_size_bytes,
            )?,
        };

        let auth = BasicAuthConfig {
            username: required("BASIC_AUTH_USERNAME")?,
            password: required("BASIC_AUTH_PASSWORD")?,
        };

        let database = DatabaseConfig {
            name: required("POSTGRES_DB")?,
            user: required("POSTGRES_USER")?,
            password: required("POSTGRES_PASSWORD")?,
            host: required("POSTGRES_HOST")?,
            port: parse_or("POSTGRES_PORT", DatabaseConfig::DEFAULT_PORT)?,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
            connection_timeout: parse_or("DATABASE_CONNECTION_TIMEOUT", defaults.connection_timeout)?,
        };

        let security = SecurityConfig {
            enable_cors: parse_or("SECURITY_ENABLE_CORS", true)?,
            cors_origins: optional("SECURITY_CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
        };

        Ok(Self {
            environment,
            server,
            auth,
            database,
            security,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(v) => parse(name, v),
        None => Ok(default),
    }
}
