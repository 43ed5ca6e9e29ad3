use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::FixedOffset;
use thiserror::Error;

use crate::shared::core::account::AccountContext;
use crate::shared::infrastructure::graphql_client::in_memory::StoredTicket;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TICKET_LOG_ADDR {value:?}: {source}")]
    InvalidAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("invalid TICKET_LOG_UTC_OFFSET_MINUTES {0:?}: expected whole minutes within ±1439")]
    InvalidOffset(String),

    #[error("cannot read seed file {path}: {source}")]
    SeedRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse seed file {path}: {source}")]
    SeedParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub account: AccountContext,
    pub seed_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr_value = lookup("TICKET_LOG_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr_value
            .parse()
            .map_err(|source| ConfigError::InvalidAddr {
                value: addr_value.clone(),
                source,
            })?;

        let utc_offset = match lookup("TICKET_LOG_UTC_OFFSET_MINUTES") {
            Some(raw) => parse_offset(&raw).ok_or(ConfigError::InvalidOffset(raw))?,
            None => AccountContext::default().utc_offset,
        };

        Ok(Self {
            addr,
            account: AccountContext::new(utc_offset),
            seed_file: lookup("TICKET_LOG_SEED_FILE")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn load_seed(&self) -> Result<Vec<StoredTicket>, ConfigError> {
        let Some(path) = &self.seed_file else {
            return Ok(Vec::new());
        };
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::SeedRead {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::SeedParse {
            path: path.clone(),
            source,
        })
    }
}

fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let minutes = raw.trim().parse::<i32>().ok()?;
    if minutes.abs() >= 24 * 60 {
        return None;
    }
    FixedOffset::east_opt(minutes * 60)
}
