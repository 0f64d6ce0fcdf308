use std::{net::SocketAddr, str::FromStr};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value}")]
    InvalidVar { name: &'static str, value: String },
}

#[derive(Debug, PartialEq)]
pub struct AppConfig {
    pub api_addr: SocketAddr,
    /// Without a database url people are kept in memory.
    pub database_url: Option<String>,
    /// Milliseconds allowed for each database call.
    pub database_timeout: u64,
    pub locale: String,
}

fn parse_var<T: FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: &str,
) -> Result<T, ConfigError> {
    let value = raw.unwrap_or_else(|| default.to_string());
    value
        .parse()
        .map_err(|_| ConfigError::InvalidVar { name, value })
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_addr: parse_var("API_ADDR", lookup("API_ADDR"), "0.0.0.0:3000")?,
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            database_timeout: parse_var("DATABASE_TIMEOUT", lookup("DATABASE_TIMEOUT"), "100")?,
            locale: lookup("APP_LOCALE").unwrap_or_else(|| "en".to_string()),
        })
    }
}
