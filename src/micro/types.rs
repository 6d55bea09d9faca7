//! Microstructure metric types

use serde::{Deserialize, Serialize};

/// Microstructure risk metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MicrostructureMetrics {
    /// 0-1, share of window volume from outsized bars
    pub whale_activity_index: f64,
    /// 0-1, combined open-interest and volatility risk
    pub leverage_risk_index: f64,
    /// Set when open interest was unavailable and the leverage index
    /// fell back to a volatility-only estimate
    pub reduced_confidence: bool,
}

/// Microstructure engine tuning
#[derive(Debug, Clone, Deserialize)]
pub struct MicrostructureConfig {
    /// A bar's volume above this multiple of the window median counts
    /// as whale activity
    #[serde(default = "default_whale_volume_multiple")]
    pub whale_volume_multiple: f64,
    /// Mean absolute OI rate-of-change mapping to a component of 1.0
    #[serde(default = "default_oi_roc_scale")]
    pub oi_roc_scale: f64,
    /// Log-return std mapping to a volatility component of 1.0
    #[serde(default = "default_volatility_scale")]
    pub volatility_scale: f64,
}

fn default_whale_volume_multiple() -> f64 {
    3.0
}
fn default_oi_roc_scale() -> f64 {
    0.05
}
fn default_volatility_scale() -> f64 {
    0.05
}

impl Default for MicrostructureConfig {
    fn default() -> Self {
        Self {
            whale_volume_multiple: default_whale_volume_multiple(),
            oi_roc_scale: default_oi_roc_scale(),
            volatility_scale: default_volatility_scale(),
        }
    }
}
