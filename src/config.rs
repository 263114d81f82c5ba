use std::net::SocketAddr;
use tracing::warn;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Process configuration, read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string. The in-memory repository is used when unset.
    pub database_url: Option<String>,
    pub bind_address: SocketAddr,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unparsable values fall back to
    /// their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let bind_address = lookup("BIND_ADDRESS")
            .and_then(|raw| match raw.parse::<SocketAddr>() {
                Ok(addr) => Some(addr),
                Err(_) => {
                    warn!(value = %raw, "Invalid BIND_ADDRESS, using default");
                    None
                }
            })
            .unwrap_or_else(default_bind_address);

        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        Self {
            database_url,
            bind_address,
            max_connections,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 50051))
}
