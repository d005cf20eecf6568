//! # jobsgate-config
//!
//! Layered configuration loading for jobsgate using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`JOBSGATE_*` prefix, `__` as separator)
//! 2. Project-level `.jobsgate.toml`
//! 3. User-level `~/.config/jobsgate/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `JOBSGATE_REVIEW__BASE_REF` -> `review.base_ref`,
//! `JOBSGATE_REVIEW__README_PATH` -> `review.readme_path`. The `__`
//! (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use jobsgate_config::JobsgateConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = JobsgateConfig::load_with_dotenv().expect("config");
//! assert!(!config.review.base_ref.is_empty());
//! ```

mod error;
mod review;

pub use error::ConfigError;
pub use review::ReviewConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JobsgateConfig {
    #[serde(default)]
    pub review: ReviewConfig,
}

impl JobsgateConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` for the current directory before building the
    /// figment. This is the typical entry point for the CLI.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".jobsgate.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("JOBSGATE_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("jobsgate").join("config.toml"))
    }
}
