//! Host address resolution

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Socket file name used when no host address is configured
pub const DEFAULT_SOCKET_NAME: &str = "recorder-bridge.sock";

/// Error when a host address string is malformed
#[derive(Debug, Clone, Error)]
#[error("Invalid host address: \"{input}\". Expected unix:<path>, tcp:<host>:<port>, or a socket path")]
pub struct HostAddressError {
    pub input: String,
}

/// Where the recording host listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAddress {
    /// Unix domain socket path
    Unix(PathBuf),
    /// `host:port`
    Tcp(String),
}

impl HostAddress {
    /// Default socket, preferring XDG_RUNTIME_DIR
    pub fn default_socket() -> Self {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join(DEFAULT_SOCKET_NAME))
            .unwrap_or_else(|_| std::env::temp_dir().join(DEFAULT_SOCKET_NAME));
        Self::Unix(path)
    }
}

impl Default for HostAddress {
    fn default() -> Self {
        Self::default_socket()
    }
}

impl FromStr for HostAddress {
    type Err = HostAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let err = || HostAddressError {
            input: s.to_string(),
        };

        if let Some(addr) = input.strip_prefix("tcp:") {
            match addr.rsplit_once(':') {
                Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => {
                    Ok(Self::Tcp(addr.to_string()))
                }
                _ => Err(err()),
            }
        } else {
            let path = input.strip_prefix("unix:").unwrap_or(input);
            if path.is_empty() {
                return Err(err());
            }
            Ok(Self::Unix(PathBuf::from(path)))
        }
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix(path) => write!(f, "unix:{}", path.display()),
            Self::Tcp(addr) => write!(f, "tcp:{}", addr),
        }
    }
}
