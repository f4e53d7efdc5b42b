//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use lanchat_protocol::DEFAULT_MAX_LINE_LEN;

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 4000;

/// Environment variable holding the listening port.
pub const ENV_PORT: &str = "PORT";
/// Environment variable holding the listening interface.
pub const ENV_HOST: &str = "LANCHAT_HOST";
/// Environment variable holding the line-length cap in bytes.
pub const ENV_MAX_LINE: &str = "LANCHAT_MAX_LINE";

/// A configuration value that could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Settings for a chat server instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Interface to listen on.
    pub host: IpAddr,

    /// TCP port to listen on.
    pub port: u16,

    /// Longest line a client may send before being disconnected.
    pub max_line_len: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

impl ChatConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Unset variables fall back to [`ChatConfig::default`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            host: parse_or(&lookup, ENV_HOST, defaults.host)?,
            port: parse_or(&lookup, ENV_PORT, defaults.port)?,
            max_line_len: parse_or(&lookup, ENV_MAX_LINE, defaults.max_line_len)?,
        })
    }

    /// The socket address to bind.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
