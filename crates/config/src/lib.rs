//! Configuration types for the token manager.
//!
//! This crate provides:
//! - Network presets (mainnet, Sepolia, local development node)
//! - Token deployment parameters for in-process ledgers
//! - TOML loading with typed errors

pub mod network;
pub mod token;

pub use network::{NetworkConfig, NetworkConfigBuilder, NetworkType};
pub use token::TokenParams;

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid TOML for the expected type
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A value parsed but is not usable
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Read and deserialize a TOML file.
pub fn load_toml<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
