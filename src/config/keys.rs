//! Wallet key list loading.
//!
//! # Security
//! - Keys come from a JSON file or the `CLAIMER_PRIVATE_KEYS` environment variable
//! - Error messages name the entry index, never the key material

use std::fs;
use std::path::Path;

use crate::blockchain::wallet::Wallet;
use crate::config::loader::ConfigError;
use crate::config::schema::WalletsConfig;

/// Environment variable holding comma-separated private keys.
pub const PRIVATE_KEYS_ENV_VAR: &str = "CLAIMER_PRIVATE_KEYS";

/// Parse a JSON array of private keys.
pub fn parse_private_keys(content: &str) -> Result<Vec<String>, ConfigError> {
    let keys: Vec<String> = serde_json::from_str(content)
        .map_err(|e| ConfigError::Keys(format!("expected a JSON array of strings: {}", e)))?;
    check_keys(keys)
}

/// Read the key list file.
pub fn load_private_keys(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_private_keys(&content)
}

fn keys_from_env() -> Option<Result<Vec<String>, ConfigError>> {
    let raw = std::env::var(PRIVATE_KEYS_ENV_VAR).ok()?;
    let keys = raw.split(',').map(|k| k.trim().to_string()).collect();
    Some(check_keys(keys))
}

fn check_keys(keys: Vec<String>) -> Result<Vec<String>, ConfigError> {
    if keys.is_empty() {
        return Err(ConfigError::Keys("no private keys configured".to_string()));
    }
    if let Some(i) = keys.iter().position(|k| k.trim().is_empty()) {
        return Err(ConfigError::Keys(format!("entry {} is empty", i + 1)));
    }
    Ok(keys)
}

/// Turn raw keys into wallets, preserving order.
pub fn wallets_from_keys(keys: &[String]) -> Result<Vec<Wallet>, ConfigError> {
    keys.iter()
        .enumerate()
        .map(|(i, key)| {
            Wallet::from_private_key(key.trim())
                .map_err(|e| ConfigError::Keys(format!("entry {}: {}", i + 1, e)))
        })
        .collect()
}

/// Load every configured wallet. The environment variable wins over the file.
pub fn load_wallets(config: &WalletsConfig) -> Result<Vec<Wallet>, ConfigError> {
    let keys = match keys_from_env() {
        Some(keys) => {
            tracing::info!(source = PRIVATE_KEYS_ENV_VAR, "Loading wallet keys from environment");
            keys?
        }
        None => {
            tracing::info!(path = %config.keys_path, "Loading wallet keys from file");
            load_private_keys(Path::new(&config.keys_path))?
        }
    };
    wallets_from_keys(&keys)
}
