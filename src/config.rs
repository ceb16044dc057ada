use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Port most bitcoin-style wallet daemons are told to serve JSON-RPC
/// on in this setup; `rpcport` in the conf file overrides it.
pub const DEFAULT_RPC_PORT: u16 = 41337;

const KEY_RPC_USER: &str = "rpcuser";
const KEY_RPC_PASSWORD: &str = "rpcpassword";
const KEY_RPC_PORT: &str = "rpcport";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("wallet config file not found at \"{}\"", path.display())]
    NotFound { path: PathBuf },

    #[error("wallet config file must contain an \"{key}\" entry")]
    MissingKey { key: &'static str },

    #[error("invalid rpcport value \"{value}\"")]
    InvalidPort { value: String },

    #[error("failed to read wallet config: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses the wallet daemon's conf file into a key/value map.
///
/// One `key=value` per line, split at the first `=`, both sides
/// trimmed. Lines without `=` are skipped, which drops blanks and
/// comments without erroring.
pub fn parse_conf(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;

    let mut cfg = HashMap::new();
    for line in contents.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        cfg.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(cfg)
}

/// Credentials and port for the wallet daemon's JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct RpcCredentials {
    pub user: String,
    pub password: String,
    pub port: u16,
}

impl RpcCredentials {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_conf(&parse_conf(path)?)
    }

    pub fn from_conf(cfg: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let user = cfg
            .get(KEY_RPC_USER)
            .ok_or(ConfigError::MissingKey { key: KEY_RPC_USER })?;
        let password = cfg.get(KEY_RPC_PASSWORD).ok_or(ConfigError::MissingKey {
            key: KEY_RPC_PASSWORD,
        })?;
        let port = match cfg.get(KEY_RPC_PORT) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidPort {
                value: value.clone(),
            })?,
            None => DEFAULT_RPC_PORT,
        };
        Ok(Self {
            user: user.clone(),
            password: password.clone(),
            port,
        })
    }
}
