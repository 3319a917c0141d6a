use crate::error::Result;
use crate::paths;
use crate::reminder::NEUTRAL_COLOR;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Color treated as "no status" for reminders.
    #[serde(default = "default_neutral_color")]
    pub neutral_color: String,
    /// Weeks shown before the current week.
    #[serde(default = "default_past_weeks")]
    pub past_weeks: usize,
    /// Weeks shown after the current week.
    #[serde(default = "default_future_weeks")]
    pub future_weeks: usize,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_neutral_color() -> String {
    NEUTRAL_COLOR.to_string()
}

fn default_past_weeks() -> usize {
    10
}

fn default_future_weeks() -> usize {
    10
}

fn default_port() -> u16 {
    3141
}

impl Default for Config {
    fn default() -> Self {
        Self {
            neutral_color: default_neutral_color(),
            past_weeks: default_past_weeks(),
            future_weeks: default_future_weeks(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load `.weekplan/config.yaml`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        if self.neutral_color.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "neutral_color is empty; it must differ from the unset color".into(),
            });
        }
        if self.past_weeks + self.future_weeks > 104 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "week window spans {} weeks; more than two years is unusual",
                    self.past_weeks + self.future_weeks + 1
                ),
            });
        }
        warnings
    }
}
