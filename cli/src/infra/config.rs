//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::application::ports::ConfigStore;
use crate::domain::config::{HkConfig, validate_config};

/// Production implementation of `ConfigStore` that uses a YAML file on disk,
/// overlaid with `HEROKU_*` environment variables.
pub struct YamlConfigStore;

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<HkConfig> {
        let path = self.path()?;
        load_from(&path, |k| std::env::var(k).ok().filter(|v| !v.is_empty()))
    }

    fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var("HK_CONFIG") {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".hk").join("config.yaml"))
    }
}

/// Read `path` (defaults when missing), apply overrides from `lookup`, and
/// validate the result.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed, or the
/// merged configuration is invalid.
pub fn load_from(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> Result<HkConfig> {
    let file_config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))?
    } else {
        tracing::debug!(path = %path.display(), "no config file; using defaults");
        HkConfig::default()
    };
    let config = file_config.with_env(lookup);
    validate_config(&config).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}
