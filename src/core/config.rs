//! Coordinator configuration.
//!
//! Settings layer as: defaults → config file → environment variables.
//! Every field is optional; `None` means "use the built-in default".

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding [`FlowConfig::deck_path`].
pub const ENV_DECK_PATH: &str = "TAROT_DECK_PATH";
/// Environment variable overriding [`FlowConfig::store_path`].
pub const ENV_STORE_PATH: &str = "TAROT_STORE_PATH";
/// Environment variable overriding [`FlowConfig::seed`].
pub const ENV_SEED: &str = "TAROT_SEED";

/// Directory name under the platform data dir.
pub const APP_DIR_NAME: &str = "tarot-flow";
/// File name of the info-screen record store.
pub const STORE_FILE_NAME: &str = "info_screens.json";

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Could not read the config file.
    #[error("config I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`FlowConfig`].
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An environment override has an unusable value.
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Reading flow configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConfig {
    /// JSON deck resource. `None` uses the built-in 78-card deck.
    #[serde(default)]
    pub deck_path: Option<PathBuf>,

    /// Info-screen record file. `None` uses the platform data dir.
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Shuffle seed. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl FlowConfig {
    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: FlowConfig = serde_json::from_str(&contents)?;
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Apply environment overrides on top of this config.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(path) = get(ENV_DECK_PATH) {
            self.deck_path = Some(PathBuf::from(path));
        }
        if let Some(path) = get(ENV_STORE_PATH) {
            self.store_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = get(ENV_SEED) {
            let seed = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_SEED,
                value: raw.clone(),
            })?;
            self.seed = Some(seed);
        }
        Ok(self)
    }

    /// Set the deck resource path.
    #[must_use]
    pub fn with_deck_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.deck_path = Some(path.into());
        self
    }

    /// Set the info-screen store path.
    #[must_use]
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = Some(path.into());
        self
    }

    /// Set a fixed shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Store path, falling back to `<data_local_dir>/tarot-flow/info_screens.json`.
    ///
    /// Returns `None` only if no path is configured and the platform has
    /// no data directory.
    #[must_use]
    pub fn resolved_store_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.store_path {
            return Some(path.clone());
        }
        let dir = dirs::data_local_dir();
        if dir.is_none() {
            warn!("Could not determine local data directory");
        }
        dir.map(|d| d.join(APP_DIR_NAME).join(STORE_FILE_NAME))
    }
}
