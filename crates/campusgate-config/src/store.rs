use std::env;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_REGION: &str = "ap-south-1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Memory,
    DynamoDb,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "dynamodb" | "dynamo" => Ok(Self::DynamoDb),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::DynamoDb => f.write_str("dynamodb"),
        }
    }
}

/// Document store settings.
///
/// - `STORE_BACKEND`: `memory` or `dynamodb` (default: memory)
/// - `AWS_REGION`: default ap-south-1
/// - `DYNAMODB_ENDPOINT`: optional endpoint override, e.g. DynamoDB Local
/// - `TABLE_PREFIX`: optional prefix for every table name
/// - `CAS_MAX_ATTEMPTS`: bound on optimistic-concurrency retries (default: 5)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub region: String,
    pub endpoint: Option<String>,
    pub table_prefix: Option<String>,
    pub cas_max_attempts: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
            table_prefix: None,
            cas_max_attempts: 5,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: env::var("STORE_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.backend),
            region: env::var("AWS_REGION").unwrap_or(defaults.region),
            endpoint: env::var("DYNAMODB_ENDPOINT").ok().filter(|v| !v.is_empty()),
            table_prefix: env::var("TABLE_PREFIX").ok().filter(|v| !v.is_empty()),
            cas_max_attempts: env::var("CAS_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.cas_max_attempts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        assert_eq!("DynamoDB".parse::<StoreBackend>(), Ok(StoreBackend::DynamoDb));
        assert_eq!("memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("postgres".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.region, "ap-south-1");
        assert_eq!(config.cas_max_attempts, 5);
        assert_eq!(config.backend.to_string(), "memory");
    }
}
