//! Process configuration. Every setting is a flag that falls back to an environment variable
//! (optionally seeded from `.env`) and then to a default.

use std::time::Duration;

use clap::Args;

#[derive(Debug, Clone, PartialEq, Args)]
pub struct Config {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", default_value = "postgres://localhost/products")]
    pub database_url: String,

    /// The only origin allowed by CORS; unset or blank allows no cross-origin callers
    #[arg(long, env = "FRONTEND_URL")]
    pub frontend_url: Option<String>,

    /// Server host address
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "PORT", default_value = "4000")]
    pub port: u16,

    /// Database pool size
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value = "5")]
    pub max_connections: u32,

    /// Seconds a request waits for a pooled connection before failing
    #[arg(long = "acquire-timeout-secs", env = "DATABASE_ACQUIRE_TIMEOUT_SECS", default_value = "5")]
    pub acquire_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: "postgres://localhost/products".into(),
            frontend_url: None,
            host: "0.0.0.0".into(),
            port: 4000,
            max_connections: 5,
            acquire_timeout_secs: 5,
        }
    }
}

impl Config {
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// The configured CORS origin, ignoring a blank value.
    #[must_use]
    pub fn frontend_origin(&self) -> Option<&str> {
        self.frontend_url
            .as_deref()
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
    }
}
