//! Startup configuration
//!
//! Every setting can come from a command-line flag or an environment
//! variable, flags taking precedence.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use clap::Parser;

use crate::error::AppError;

/// Default WebSocket relay address
pub const DEFAULT_WS_ADDR: &str = "127.0.0.1:8080";

/// Default HTTP query surface address
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:5000";

/// Default browser origin allowed by CORS
pub const DEFAULT_CLIENT_URL: &str = "http://localhost:5173";

/// Server configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "market_chat")]
#[command(about = "Real-time marketplace chat relay")]
pub struct Config {
    /// Address for the WebSocket event relay
    #[arg(long, env = "MARKET_WS_ADDR", default_value = DEFAULT_WS_ADDR)]
    pub ws_addr: SocketAddr,

    /// Address for the HTTP query endpoints
    #[arg(long, env = "MARKET_HTTP_ADDR", default_value = DEFAULT_HTTP_ADDR)]
    pub http_addr: SocketAddr,

    /// Browser origin allowed to call the HTTP endpoints
    #[arg(long, env = "CLIENT_URL", default_value = DEFAULT_CLIENT_URL)]
    pub client_url: String,

    /// Command queue depth for the chat server actor
    #[arg(long, env = "MARKET_CHANNEL_BUFFER", default_value_t = 256)]
    pub channel_buffer: usize,
}

impl Config {
    /// The configured client URL as a CORS origin header
    pub fn client_origin(&self) -> Result<HeaderValue, AppError> {
        HeaderValue::from_str(self.client_url.trim_end_matches('/'))
            .map_err(|_| AppError::InvalidOrigin(self.client_url.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["market_chat"]).unwrap();
        assert_eq!(config.ws_addr, DEFAULT_WS_ADDR.parse().unwrap());
        assert_eq!(config.http_addr, DEFAULT_HTTP_ADDR.parse().unwrap());
        assert_eq!(config.channel_buffer, 256);
    }

    #[test]
    fn test_flags_override() {
        let config = Config::try_parse_from([
            "market_chat",
            "--ws-addr",
            "0.0.0.0:9001",
            "--client-url",
            "https://shop.example/",
        ])
        .unwrap();
        assert_eq!(config.ws_addr.port(), 9001);
        assert_eq!(config.client_origin().unwrap(), "https://shop.example");
    }

    #[test]
    fn test_bad_address_rejected() {
        assert!(Config::try_parse_from(["market_chat", "--http-addr", "nowhere"]).is_err());
    }

    #[test]
    fn test_invalid_origin() {
        let mut config = Config::try_parse_from(["market_chat"]).unwrap();
        config.client_url = "bad\norigin".to_string();
        assert!(matches!(
            config.client_origin(),
            Err(AppError::InvalidOrigin(_))
        ));
    }
}
