//! Run configuration: defaults per the external-interfaces option table,
//! overridable by an optional TOML file and then by CLI flags.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

fn default_pos_tags() -> HashSet<String> {
    ["N", "Np", "V", "A", "Nc", "M", "R", "P"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pos_filter_enabled: bool,
    #[serde(default = "default_pos_tags")]
    pub pos_filter_tags: HashSet<String>,

    pub similarity_threshold: f64,
    pub top_k: usize,
    pub use_fast_index: bool,
    /// Word count above which `use_fast_index` switches to the indexed
    /// nearest-neighbor search rather than brute-force matrix multiplication.
    pub fast_index_threshold: usize,

    pub beam_width: usize,
    pub max_depth: usize,
    pub max_paths: usize,

    pub auto_save_graph: bool,
    pub auto_save_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pos_filter_enabled: true,
            pos_filter_tags: default_pos_tags(),
            similarity_threshold: 0.85,
            top_k: 5,
            use_fast_index: false,
            fast_index_threshold: 10_000,
            beam_width: 10,
            max_depth: 6,
            max_paths: 20,
            auto_save_graph: false,
            auto_save_path: None,
        }
    }
}

impl Config {
    /// Load a config from a TOML file, falling back to defaults for any
    /// field the file omits.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text)?;
        Ok(config)
    }

    /// Substitute `{timestamp}` in `auto_save_path` with the given value.
    pub fn resolved_save_path(&self, timestamp: &str) -> Option<String> {
        self.auto_save_path
            .as_ref()
            .map(|p| p.replace("{timestamp}", timestamp))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
