use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Server configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub database_url: String,
    /// JSON file replacing the built-in category taxonomy.
    pub categories_path: Option<PathBuf>,
    pub payment_delay: Duration,
    pub seed_fixtures: bool,
}

impl Config {
    /// Load configuration from environment variables.
    /// DATABASE_URL defaults to "sqlite://eventhub.db"
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = var("DATABASE_URL").unwrap_or_else(|| "sqlite://eventhub.db".to_string());

        let listen_addr = var("LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("LISTEN_ADDR", "must be a valid socket address"))?;

        let categories_path = var("CATEGORIES_PATH")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let payment_delay_ms: u64 = var("PAYMENT_DELAY_MS")
            .unwrap_or_else(|| "1500".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("PAYMENT_DELAY_MS", "must be a whole number"))?;

        let seed_fixtures = match var("SEED_FIXTURES").as_deref() {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(_) => {
                return Err(ConfigError::Invalid("SEED_FIXTURES", "must be true or false"));
            }
        };

        Ok(Config {
            listen_addr,
            database_url,
            categories_path,
            payment_delay: Duration::from_millis(payment_delay_ms),
            seed_fixtures,
        })
    }
}
