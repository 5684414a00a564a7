//! Difficulty configuration loading.
//!
//! A configuration file is plain TOML mirroring [`DifficultyConfig`]. Tables
//! and keys that are left out keep their compiled defaults, so a file only
//! needs to name the values it changes:
//!
//! ```toml
//! [enemy]
//! base_cols = 6
//!
//! [difficulty]
//! max_missiles = 4
//! ```

use std::{fs, path::Path};

use anyhow::{Context, Result};
use squadron_core::config::DifficultyConfig;

/// Resolves the configuration a session runs with.
///
/// Without a path the defaults are used. A file that cannot be read, parsed
/// or validated is reported and replaced by the defaults.
pub(crate) fn resolve(path: Option<&Path>) -> DifficultyConfig {
    let Some(path) = path else {
        tracing::debug!("no configuration file given, using defaults");
        return DifficultyConfig::default();
    };
    match load(path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded configuration");
            config
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), "{error:#}; using default configuration");
            DifficultyConfig::default()
        }
    }
}

fn load(path: &Path) -> Result<DifficultyConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration file {}", path.display()))?;
    parse(&contents)
}

fn parse(contents: &str) -> Result<DifficultyConfig> {
    let config: DifficultyConfig =
        toml::from_str(contents).context("failed to parse configuration toml")?;
    config.validate().context("configuration rejected")?;
    Ok(config)
}
