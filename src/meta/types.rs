//! Fusion decision types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chaos::Regime;

/// Fused trading decision
///
/// Computed fresh on every fusion call; never cached across inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeDecision {
    pub regime: Regime,
    pub chaos_index: f64,
    pub whale_activity_index: f64,
    pub leverage_risk_index: f64,
    /// Position-sizing multiplier, floor-bounded, never negative
    pub position_multiplier: f64,
    /// Gate controlling whether new trades may open
    pub allow_new_trades: bool,
    /// Which gate conditions triggered plus the current multiplier,
    /// keyed for downstream display
    pub recommendations: BTreeMap<String, String>,
}

/// Fusion tuning
#[derive(Debug, Clone, Deserialize)]
pub struct MetaConfig {
    /// The multiplier never drops below this
    #[serde(default = "default_multiplier_floor")]
    pub multiplier_floor: f64,
    /// Multiplier reduction per unit of chaos index
    #[serde(default = "default_chaos_weight")]
    pub chaos_weight: f64,
    /// Multiplier reduction per unit of leverage risk
    #[serde(default = "default_leverage_weight")]
    pub leverage_weight: f64,
    /// Multiplier reduction per unit of impulsiveness
    #[serde(default = "default_impulsiveness_weight")]
    pub impulsiveness_weight: f64,
    /// Multiplier reduction per unit of chase/sell-off index
    #[serde(default = "default_chase_weight")]
    pub chase_weight: f64,
    /// Leverage risk above this in a CHAOTIC regime closes the gate
    #[serde(default = "default_high_leverage_threshold")]
    pub high_leverage_threshold: f64,
    /// Losing streak length that closes the gate
    #[serde(default = "default_consecutive_loss_cap")]
    pub consecutive_loss_cap: usize,
    /// Chase/sell-off index above this closes the gate
    #[serde(default = "default_chase_ceiling")]
    pub chase_ceiling: f64,
}

fn default_multiplier_floor() -> f64 {
    0.2
}
fn default_chaos_weight() -> f64 {
    0.5
}
fn default_leverage_weight() -> f64 {
    0.3
}
fn default_impulsiveness_weight() -> f64 {
    0.2
}
fn default_chase_weight() -> f64 {
    0.2
}
fn default_high_leverage_threshold() -> f64 {
    0.7
}
fn default_consecutive_loss_cap() -> usize {
    5
}
fn default_chase_ceiling() -> f64 {
    0.6
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            multiplier_floor: default_multiplier_floor(),
            chaos_weight: default_chaos_weight(),
            leverage_weight: default_leverage_weight(),
            impulsiveness_weight: default_impulsiveness_weight(),
            chase_weight: default_chase_weight(),
            high_leverage_threshold: default_high_leverage_threshold(),
            consecutive_loss_cap: default_consecutive_loss_cap(),
            chase_ceiling: default_chase_ceiling(),
        }
    }
}
