// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::scroll::DEFAULT_SCROLL_THRESHOLD;
use crate::storage::FileStore;
use anyhow::Result;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_scroll_threshold() -> u32 {
    DEFAULT_SCROLL_THRESHOLD
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Events list used when `--events` is not given.
    #[serde(default)]
    pub events_file: Option<String>,
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            events_file: None,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the configuration from disk. A missing file yields the defaults.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        FileStore::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            FileStore::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// Unknown level names fall back to `Warn`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Warn)
    }

    pub fn events_path(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        match &self.events_file {
            Some(p) => Ok(PathBuf::from(p)),
            None => ctx.get_default_events_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn test_missing_config_is_default() {
        let ctx = TestContext::new();
        assert_eq!(Config::load(&ctx).unwrap(), Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let ctx = TestContext::new();
        let config = Config {
            events_file: Some("/srv/site/events.json".to_string()),
            scroll_threshold: 120,
            log_level: "debug".to_string(),
        };
        config.save(&ctx).unwrap();
        let loaded = Config::load(&ctx).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.level_filter(), LevelFilter::Debug);
        assert_eq!(
            loaded.events_path(&ctx).unwrap(),
            PathBuf::from("/srv/site/events.json")
        );
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let ctx = TestContext::new();
        fs::write(ctx.get_config_file_path().unwrap(), "log_level = \"nonsense\"\n").unwrap();
        let config = Config::load(&ctx).unwrap();
        assert_eq!(config.scroll_threshold, DEFAULT_SCROLL_THRESHOLD);
        assert_eq!(config.level_filter(), LevelFilter::Warn);
        assert_eq!(
            config.events_path(&ctx).unwrap(),
            ctx.get_default_events_path().unwrap()
        );
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let ctx = TestContext::new();
        fs::write(ctx.get_config_file_path().unwrap(), "scroll_threshold = [").unwrap();
        assert!(Config::load(&ctx).is_err());
    }
}
