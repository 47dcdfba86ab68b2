//! Environment-supplied settings with fixed defaults.

use std::env;
use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Settings for the HTTP server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl ServerConfig {
    /// Reads `PORTA`; anything unset or unparsable falls back to the
    /// default.
    pub fn from_env() -> Self {
        Self {
            port: env_u16("PORTA", DEFAULT_PORT),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Base URL the console client talks to, from `CATALOGO_URL`.
pub fn client_base_url() -> String {
    env::var("CATALOGO_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_matches_the_contract() {
        assert_eq!(ServerConfig::default().port, 5000);
    }

    #[test]
    fn env_u16_parses_or_falls_back() {
        env::set_var("CATALOGO_TEST_PORT_OK", "8080");
        assert_eq!(env_u16("CATALOGO_TEST_PORT_OK", 5000), 8080);

        env::set_var("CATALOGO_TEST_PORT_BAD", "oitenta");
        assert_eq!(env_u16("CATALOGO_TEST_PORT_BAD", 5000), 5000);

        assert_eq!(env_u16("CATALOGO_TEST_PORT_UNSET", 5000), 5000);
    }

    #[test]
    fn bind_addr_uses_the_configured_port() {
        let config = ServerConfig { port: 8081 };
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8081");
    }
}
