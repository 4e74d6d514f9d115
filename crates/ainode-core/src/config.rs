//! Adapter configuration loaded from the environment.
//!
//! `.env` があれば先に読み込みます（`dotenvy`）。
//!
//! - `AINODE_MODEL_STORAGE_DIR`: モデル格納ディレクトリ（既定: `models`）
//! - `AINODE_DEVICE`: `cpu` | `cuda` | `gpu`（既定: `cpu`）

use std::path::PathBuf;

use crate::domain::errors::ValidationError;
use crate::schema::{BaseInput, Device};

pub const MODEL_STORAGE_DIR_VAR: &str = "AINODE_MODEL_STORAGE_DIR";
pub const DEVICE_VAR: &str = "AINODE_DEVICE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {source}")]
    InvalidVar {
        var: &'static str,
        #[source]
        source: ValidationError,
    },
}

/// Values every input inherits unless the caller overrides them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub model_storage_directory: PathBuf,
    pub device: Device,
}

impl AdapterConfig {
    /// Reads `.env` (if present) and then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        // .env が無いのは正常
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let model_storage_directory = get(MODEL_STORAGE_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(BaseInput::DEFAULT_MODEL_STORAGE_DIRECTORY));

        let device = match get(DEVICE_VAR) {
            Some(raw) => raw.parse::<Device>().map_err(|source| ConfigError::InvalidVar {
                var: DEVICE_VAR,
                source,
            })?,
            None => Device::default(),
        };

        Ok(Self {
            model_storage_directory,
            device,
        })
    }

    pub fn base_input(&self) -> BaseInput {
        BaseInput::new(self.model_storage_directory.clone(), self.device)
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        let base = BaseInput::default();
        Self {
            model_storage_directory: base.model_storage_directory,
            device: base.device,
        }
    }
}
