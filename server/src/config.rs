//! Server configuration parsed from environment variables.
//!
//! Variables (all optional):
//! - `BIND_ADDR`: listen address, default `0.0.0.0`
//! - `PORT`: listen port, default `3000`
//! - `RELAY_CHANNEL_CAPACITY`: per-client outbound queue depth, default `1024`
//!
//! A `.env` file in the working directory is loaded first by `main`.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var} '{value}': {reason}")]
    Invalid { var: &'static str, value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Frames queued per client before the relay starts dropping for it.
    pub channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: DEFAULT_BIND_ADDR, port: DEFAULT_PORT, channel_capacity: DEFAULT_CHANNEL_CAPACITY }
    }
}

impl ServerConfig {
    /// Build typed config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for values that do not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for values that do not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: parse_bind_addr(lookup("BIND_ADDR").as_deref())?,
            port: parse_port(lookup("PORT").as_deref())?,
            channel_capacity: parse_capacity(lookup("RELAY_CHANNEL_CAPACITY").as_deref())?,
        })
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn invalid(var: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid { var, value: value.to_owned(), reason: reason.to_string() }
}

fn parse_bind_addr(raw: Option<&str>) -> Result<IpAddr, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_BIND_ADDR),
        Some(value) => value.parse().map_err(|e| invalid("BIND_ADDR", value, e)),
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => value.parse().map_err(|e| invalid("PORT", value, e)),
    }
}

fn parse_capacity(raw: Option<&str>) -> Result<usize, ConfigError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_CHANNEL_CAPACITY);
    };
    match value.parse::<usize>() {
        Ok(0) => Err(invalid("RELAY_CHANNEL_CAPACITY", value, "must be at least 1")),
        Ok(capacity) => Ok(capacity),
        Err(e) => Err(invalid("RELAY_CHANNEL_CAPACITY", value, e)),
    }
}
