//! Behavior metric types

use serde::{Deserialize, Serialize};

/// Behavior metrics derived from a trade log
///
/// An empty log produces the all-zero neutral value; the engine never
/// fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorMetrics {
    /// 0-1, higher means shorter gaps between operations
    pub impulsiveness_index: f64,
    /// 0-1, fraction of trades classified as reactive
    pub chase_selloff_index: f64,
    /// Length of the losing run ending at the most recent trade
    pub consecutive_losses: usize,
    /// Mean gap between one exit and the next entry, seconds
    pub avg_operation_interval_secs: f64,
}

/// Behavior engine tuning
#[derive(Debug, Clone, Deserialize)]
pub struct BehaviorConfig {
    /// Intervals at or below this are fully impulsive (seconds)
    #[serde(default = "default_min_interval_secs")]
    pub min_interval_secs: f64,
    /// Intervals at or above this are fully deliberate (seconds)
    #[serde(default = "default_baseline_interval_secs")]
    pub baseline_interval_secs: f64,
    /// Price move over the lookback that marks an entry/exit as reactive
    #[serde(default = "default_reactive_move_threshold")]
    pub reactive_move_threshold: f64,
    /// Bars of lookback for the reactive-move check
    #[serde(default = "default_reactive_lookback_bars")]
    pub reactive_lookback_bars: usize,
}

fn default_min_interval_secs() -> f64 {
    60.0
}
fn default_baseline_interval_secs() -> f64 {
    3600.0
}
fn default_reactive_move_threshold() -> f64 {
    0.02
}
fn default_reactive_lookback_bars() -> usize {
    5
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            min_interval_secs: default_min_interval_secs(),
            baseline_interval_secs: default_baseline_interval_secs(),
            reactive_move_threshold: default_reactive_move_threshold(),
            reactive_lookback_bars: default_reactive_lookback_bars(),
        }
    }
}
