//! Configuration types for regimegate

use serde::Deserialize;

use crate::backtest::SimulatorConfig;
use crate::behavior::BehaviorConfig;
use crate::chaos::ChaosConfig;
use crate::meta::MetaConfig;
use crate::micro::MicrostructureConfig;

/// Root configuration structure
///
/// Every section has full defaults, so a missing or partial file still
/// yields a working configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulator: SimulatorConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub chaos: ChaosConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub micro: MicrostructureConfig,
    #[serde(default)]
    pub meta: MetaConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Shared analysis window settings
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Trailing bars fed to the chaos and microstructure engines
    #[serde(default = "default_window_bars")]
    pub window_bars: usize,
}

fn default_window_bars() -> usize {
    100
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_bars: default_window_bars(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
