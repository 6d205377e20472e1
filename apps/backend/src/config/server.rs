//! Bind address and admin gating.

use std::env;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Connections presenting this token (out of band, at upgrade time) may
    /// request server statistics. None disables the stats intent entirely.
    pub admin_token: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("OMI_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("OMI_PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .map_err(|_| "OMI_PORT must be a valid port number".to_string())?;
        let admin_token = env::var("OMI_ADMIN_TOKEN").ok().filter(|t| !t.is_empty());
        Ok(Self {
            host,
            port,
            admin_token,
        })
    }
}
