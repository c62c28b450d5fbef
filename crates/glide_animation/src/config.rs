//! Scheduler configuration
//!
//! Loaded from TOML, e.g.:
//!
//! ```toml
//! pool_capacity = 64
//! default_ease = "EaseOutQuad"
//!
//! [presets.fade]
//! duration = 0.25
//! ease = "EaseInOutSine"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::easing::Easing;
use crate::tween::TweenConfig;

/// Errors loading a [`SchedulerConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scheduler config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunables for a [`crate::TweenScheduler`]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SchedulerConfig {
    /// Idle instances kept for reuse
    #[serde(default = "default_pool_capacity")]
    pub pool_capacity: usize,
    /// Initial capacity of each callback list buffer
    #[serde(default = "default_register_capacity")]
    pub register_capacity: usize,
    /// Spare callback buffers kept after their tween was dropped
    #[serde(default = "default_spare_register_limit")]
    pub spare_register_limit: usize,
    /// Ease given to freshly acquired tweens
    #[serde(default)]
    pub default_ease: Easing,
    /// Named tween parameter sets
    #[serde(default)]
    pub presets: BTreeMap<String, TweenConfig>,
}

fn default_pool_capacity() -> usize {
    10
}

fn default_register_capacity() -> usize {
    10
}

fn default_spare_register_limit() -> usize {
    64
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            pool_capacity: default_pool_capacity(),
            register_capacity: default_register_capacity(),
            spare_register_limit: default_spare_register_limit(),
            default_ease: Easing::Linear,
            presets: BTreeMap::new(),
        }
    }
}

impl SchedulerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), pool = config.pool_capacity, "loaded scheduler config");
        Ok(config)
    }

    pub fn preset(&self, name: &str) -> Option<&TweenConfig> {
        self.presets.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = SchedulerConfig::from_toml_str("").unwrap();
        assert_eq!(config, SchedulerConfig::default());
        assert_eq!(config.pool_capacity, 10);
        assert_eq!(config.register_capacity, 10);
    }

    #[test]
    fn test_presets() {
        let config = SchedulerConfig::from_toml_str(
            r#"
            pool_capacity = 32
            default_ease = "EaseOutQuad"

            [presets.fade]
            duration = 0.25
            ease = "EaseInOutSine"

            [presets.pulse]
            duration = 0.5
            loops = 3
            ping_pong = true
            "#,
        )
        .unwrap();

        assert_eq!(config.pool_capacity, 32);
        assert_eq!(config.default_ease, Easing::EaseOutQuad);
        assert_eq!(
            config.preset("fade"),
            Some(&TweenConfig::new(0.25).with_ease(Easing::EaseInOutSine))
        );
        assert_eq!(config.preset("pulse").map(|p| p.loops), Some(3));
        assert!(config.preset("missing").is_none());
    }

    #[test]
    fn test_parse_error() {
        let err = SchedulerConfig::from_toml_str("pool_capacity = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SchedulerConfig::load("/nonexistent/glide.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("glide.toml"));
    }
}
