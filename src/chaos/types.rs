//! Chaos metric types

use serde::{Deserialize, Serialize};

/// Regime classification thresholds on the chaos index.
///
/// Load-bearing constants: downstream sizing and gating assume these
/// exact cut points.
pub const TREND_THRESHOLD: f64 = 0.30;
pub const CHAOTIC_THRESHOLD: f64 = 0.70;

/// Coarse market-state classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Regime {
    Trend,
    Neutral,
    Chaotic,
}

impl Regime {
    /// Classify a chaos index: < 0.30 TREND, <= 0.70 NEUTRAL, else CHAOTIC
    pub fn classify(chaos_index: f64) -> Self {
        if chaos_index < TREND_THRESHOLD {
            Regime::Trend
        } else if chaos_index <= CHAOTIC_THRESHOLD {
            Regime::Neutral
        } else {
            Regime::Chaotic
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Regime::Trend => "TREND",
            Regime::Neutral => "NEUTRAL",
            Regime::Chaotic => "CHAOTIC",
        }
    }
}

/// Chaos metrics over a price window
///
/// Stateless: recomputed on demand, no persisted identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChaosMetrics {
    /// Bounded unpredictability score in [0, 1]
    pub chaos_index: f64,
    /// Standard deviation of log returns over the window
    pub volatility: f64,
    /// std(second difference of close) / std(first difference)
    pub noise_to_signal_ratio: f64,
    pub regime: Regime,
}

/// Chaos engine tuning
///
/// The weights and reference scales are a reconstruction; they are
/// configurable so they can be recalibrated against reference outputs.
#[derive(Debug, Clone, Deserialize)]
pub struct ChaosConfig {
    /// Forward horizon (bars) for divergence tracking
    #[serde(default = "default_lyapunov_horizon")]
    pub lyapunov_horizon: usize,
    /// Weight on normalized volatility
    #[serde(default = "default_volatility_weight")]
    pub volatility_weight: f64,
    /// Weight on the normalized Lyapunov exponent
    #[serde(default = "default_lyapunov_weight")]
    pub lyapunov_weight: f64,
    /// Weight on the normalized noise-to-signal ratio
    #[serde(default = "default_noise_weight")]
    pub noise_weight: f64,
    /// Log-return std mapping to a volatility component of 1.0
    #[serde(default = "default_volatility_scale")]
    pub volatility_scale: f64,
    /// Lyapunov exponent mapping to a component of 1.0
    #[serde(default = "default_lyapunov_scale")]
    pub lyapunov_scale: f64,
    /// Noise-to-signal ratio mapping to a component of 1.0
    #[serde(default = "default_noise_scale")]
    pub noise_scale: f64,
    /// Ratio reported when first differences are flat but noise is not
    #[serde(default = "default_noise_sentinel")]
    pub noise_sentinel: f64,
}

fn default_lyapunov_horizon() -> usize {
    5
}
fn default_volatility_weight() -> f64 {
    0.40
}
fn default_lyapunov_weight() -> f64 {
    0.35
}
fn default_noise_weight() -> f64 {
    0.25
}
fn default_volatility_scale() -> f64 {
    0.05
}
fn default_lyapunov_scale() -> f64 {
    0.5
}
fn default_noise_scale() -> f64 {
    3.0
}
fn default_noise_sentinel() -> f64 {
    10.0
}

impl Default for ChaosConfig {
    fn default() -> Self {
        Self {
            lyapunov_horizon: default_lyapunov_horizon(),
            volatility_weight: default_volatility_weight(),
            lyapunov_weight: default_lyapunov_weight(),
            noise_weight: default_noise_weight(),
            volatility_scale: default_volatility_scale(),
            lyapunov_scale: default_lyapunov_scale(),
            noise_scale: default_noise_scale(),
            noise_sentinel: default_noise_sentinel(),
        }
    }
}
