use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::Cadence;

fn default_flexible_threshold() -> f64 {
    0.70
}
fn default_daily_window() -> u32 {
    7
}
fn default_weekly_window() -> u32 {
    4
}
fn default_history_limit() -> u32 {
    14
}

/// Pass/fail tuning. The 70% flexible threshold and the 7-day / 4-week
/// windows are deliberate constants, surfaced here rather than derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingConfig {
    #[serde(default = "default_flexible_threshold")]
    pub flexible_threshold: f64,
    #[serde(default = "default_daily_window")]
    pub daily_window: u32,
    #[serde(default = "default_weekly_window")]
    pub weekly_window: u32,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            flexible_threshold: default_flexible_threshold(),
            daily_window: default_daily_window(),
            weekly_window: default_weekly_window(),
        }
    }
}

impl GradingConfig {
    /// Window length for a cadence.
    pub fn window_len(&self, cadence: Cadence) -> u32 {
        match cadence {
            Cadence::Daily => self.daily_window,
            Cadence::Weekly => self.weekly_window,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub grading: GradingConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "stride").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("stride.db"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.grading.flexible_threshold, 0.70);
        assert_eq!(config.grading.daily_window, 7);
        assert_eq!(config.grading.weekly_window, 4);
        assert_eq!(config.ui.history_limit, 14);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config: AppConfig =
            toml::from_str("[grading]\nflexible_threshold = 0.5\n").unwrap();
        assert_eq!(config.grading.flexible_threshold, 0.5);
        assert_eq!(config.grading.daily_window, 7);
    }
}
