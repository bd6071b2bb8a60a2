//! HTTP listener configuration.

use std::net::SocketAddr;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address, `host:port`.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Site origin used to resolve notification targets.
    #[serde(default = "default_public_origin")]
    pub public_origin: String,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_public_origin() -> String {
    "http://localhost:3000".to_string()
}

impl ServerConfig {
    /// Parsed listen address.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind.parse()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            public_origin: default_public_origin(),
        }
    }
}
