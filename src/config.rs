use std::env;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://ws.audioscrobbler.com/2.0/";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is not valid: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Process-wide settings, resolved once at startup and shared through the
/// router state.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub api_key: String,
    pub default_user: Option<String>,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = get("LASTFM_API_KEY").ok_or(ConfigError::Missing("LASTFM_API_KEY"))?;
        let api_base = get("LASTFM_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let default_user = get("LASTFM_USERNAME").map(|user| user.trim().to_string());

        let port = match get("PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_base,
            api_key,
            default_user,
            port,
        })
    }
}
