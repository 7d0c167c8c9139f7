//! Server configuration from environment variables
//!
//! | variable             | default   |
//! |----------------------|-----------|
//! | `BIND_ADDR`          | `0.0.0.0` |
//! | `PORT`               | `3000`    |
//! | `MAX_HORIZON_MONTHS` | `60`      |
//!
//! Log filtering is controlled separately through `RUST_LOG`.

use anyhow::{Context, Result};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::predictor::DEFAULT_MAX_HORIZON;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub max_horizon_months: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_horizon_months: DEFAULT_MAX_HORIZON,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults, malformed
    /// values are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("Invalid BIND_ADDR: {}", addr))?;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("Invalid PORT: {}", port))?;
        }
        if let Some(horizon) = lookup("MAX_HORIZON_MONTHS") {
            config.max_horizon_months = horizon
                .parse()
                .with_context(|| format!("Invalid MAX_HORIZON_MONTHS: {}", horizon))?;
            if config.max_horizon_months == 0 {
                anyhow::bail!("MAX_HORIZON_MONTHS must be at least 1");
            }
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("BIND_ADDR", "127.0.0.1"),
            ("PORT", "8080"),
            ("MAX_HORIZON_MONTHS", "24"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.max_horizon_months, 24);
    }

    #[test]
    fn test_malformed_values_rejected() {
        assert!(ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).is_err());
        assert!(ServerConfig::from_lookup(lookup_from(&[("MAX_HORIZON_MONTHS", "0")])).is_err());
        assert!(ServerConfig::from_lookup(lookup_from(&[("BIND_ADDR", "localhost:1")])).is_err());
    }
}
