//! Engine configuration.
//!
//! Loaded from TOML; every section and key is optional and falls back to
//! the defaults below.
//!
//! ```toml
//! [codec]
//! unknown_fields = "reject"
//!
//! [list]
//! default_page_size = 25
//! max_page_size = 200
//! ```

use resmask_core::{codec::CodecPolicy, query::ListPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {reason}")]
    Invalid { reason: String },
}

///
/// EngineConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub codec: CodecPolicy,
    pub list: ListPolicy,
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    /// Check the semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let list = &self.list;
        let invalid = |reason: String| Err(ConfigError::Invalid { reason });

        if list.max_page_size == 0 {
            return invalid("list.max_page_size must be at least 1".to_string());
        }
        if list.default_page_size == 0 {
            return invalid("list.default_page_size must be at least 1".to_string());
        }
        if list.default_page_size > list.max_page_size {
            return invalid(format!(
                "list.default_page_size ({}) exceeds list.max_page_size ({})",
                list.default_page_size, list.max_page_size
            ));
        }
        if list.max_filter_len == 0 {
            return invalid("list.max_filter_len must be at least 1".to_string());
        }

        Ok(())
    }
}

///
/// TESTS
///
