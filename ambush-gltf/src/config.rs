//! Loader configuration
//!
//! Settings are plain data and can be read from TOML:
//!
//! ```toml
//! max_container_bytes = 67108864
//! trailing_chunks = "validate"
//! allow_data_uris = false
//! ```

use serde::{Deserialize, Serialize};

use crate::error::GltfError;

/// How chunks after the JSON and BIN chunks are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChunkPolicy {
    /// Leave them unread
    #[default]
    Ignore,
    /// Walk their headers and fail if any overruns the container
    Validate,
}

/// Limits and policies applied while loading an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Largest declared container length accepted (default: u32::MAX)
    #[serde(default = "default_max_container_bytes")]
    pub max_container_bytes: u64,
    /// Treatment of chunks beyond the second (default: Ignore)
    #[serde(default)]
    pub trailing_chunks: ChunkPolicy,
    /// Decode `data:` base64 buffer URIs (default: true)
    #[serde(default = "default_true")]
    pub allow_data_uris: bool,
}

fn default_max_container_bytes() -> u64 {
    u32::MAX as u64
}

fn default_true() -> bool {
    true
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            max_container_bytes: default_max_container_bytes(),
            trailing_chunks: ChunkPolicy::default(),
            allow_data_uris: true,
        }
    }
}

impl LoadConfig {
    /// Parse a config from TOML text; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, GltfError> {
        Ok(toml::from_str(text)?)
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> Result<String, GltfError> {
        toml::to_string_pretty(self).map_err(|e| GltfError::Config(e.to_string()))
    }
}
