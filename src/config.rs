use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Run settings. Evaluation thresholds are fixed and not part of this file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Frame rate used to show segments in seconds when a track has none.
    pub fps: f32,
    pub output: OutputFormat,
    /// Whether text reports list what went well.
    pub include_perfect: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fps: 30.0,
            output: OutputFormat::Json,
            include_perfect: true,
        }
    }
}

impl AnalysisConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).context("failed to encode config")?;
        fs::write(path, content)
            .with_context(|| format!("failed to write config {}", path.display()))
    }
}
