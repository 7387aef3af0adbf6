//! Bridge configuration, loaded from a TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Launch parameters for the tracker process and the frame loop pace.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct BridgeConfig {
    /// Executable used to run the tracker, e.g. `python3`.
    pub executable: String,

    /// Arguments passed to the executable, typically the script path.
    pub args: Vec<String>,

    /// Working directory for the tracker; inherited when unset.
    pub working_dir: Option<PathBuf>,

    /// Frame tick interval in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            executable: "python3".to_string(),
            args: vec!["hand_control.py".to_string()],
            working_dir: None,
            tick_interval_ms: 16, // ~60 ticks/sec
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl BridgeConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Loads configuration, falling back to defaults.
    ///
    /// A missing or unreadable file is logged and replaced by the
    /// defaults; the bridge should come up either way.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                info!("using config file {}", path.display());
                config
            }
            Err(e) => {
                warn!(
                    "no usable config at {} ({}), using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}
