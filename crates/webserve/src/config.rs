use std::{env, net::SocketAddr, path::PathBuf};

use crate::ServeError;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DIR: &str = ".";

/// Runtime settings for the static file server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServeConfig {
    pub addr: SocketAddr,
    pub dir: PathBuf,
}

impl ServeConfig {
    /// Reads `WEBSERVE_ADDR` and `WEBSERVE_DIR`, falling back to defaults.
    pub fn from_env() -> Result<Self, ServeError> {
        Self::from_values(env::var("WEBSERVE_ADDR").ok(), env::var("WEBSERVE_DIR").ok())
    }

    pub fn from_values(addr: Option<String>, dir: Option<String>) -> Result<Self, ServeError> {
        let addr = addr.unwrap_or_else(|| DEFAULT_ADDR.to_string());
        // A bare ":port" listens on all interfaces.
        let normalized = if addr.starts_with(':') {
            format!("0.0.0.0{addr}")
        } else {
            addr.clone()
        };
        let addr = normalized
            .parse()
            .map_err(|_| ServeError::Config(format!("invalid listen address `{addr}`")))?;
        let dir = PathBuf::from(dir.unwrap_or_else(|| DEFAULT_DIR.to_string()));
        Ok(Self { addr, dir })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ServeConfig::from_values(None, None).unwrap();
        assert_eq!(cfg.addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.dir, PathBuf::from("."));
    }

    #[test]
    fn port_only_address() {
        let cfg = ServeConfig::from_values(Some(":9000".into()), Some("dist".into())).unwrap();
        assert_eq!(cfg.addr.port(), 9000);
        assert_eq!(cfg.dir, PathBuf::from("dist"));
    }

    #[test]
    fn bad_address_is_config_error() {
        assert!(matches!(
            ServeConfig::from_values(Some("localhost".into()), None),
            Err(ServeError::Config(_))
        ));
    }
}
