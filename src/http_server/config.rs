//! HTTP Server Configuration
//!
//! Bind address, the public base URL used to build serving URLs, and CORS.

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to; a name, an IPv4 or an IPv6 address (default: "0.0.0.0")
    pub host: String,

    /// Port to bind to (default: 8000)
    pub port: u16,

    /// Public base address prepended to `/serve/<model_id>` (default: "")
    pub public_base_url: String,

    /// CORS allowed origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_base_url: String::new(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Builder-style public base URL; a trailing slash is dropped
    pub fn public_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.public_base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Builder-style CORS allow list; empty allows any origin
    pub fn cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// `host:port`, with IPv6 hosts bracketed
    pub fn socket_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}
