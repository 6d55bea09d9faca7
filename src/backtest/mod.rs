//! Backtest simulator
//!
//! Turns a strategy's signal sequence into a capital trajectory with a
//! single-position FLAT/LONG state machine, fee and slippage costs, and
//! per-bar equity tracking.

mod metrics;
mod runner;
mod simulator;
mod types;

pub use metrics::compute_metrics;
pub use runner::{run_all, RunOutcome};
pub use simulator::BacktestSimulator;
pub use types::{BacktestResult, EquityPoint, PerformanceMetrics, Trade};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::market::Timeframe;

/// Simulator cost and capital configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorConfig {
    /// Starting capital
    #[serde(default = "default_initial_capital")]
    pub initial_capital: Decimal,
    /// Per-side fee rate on notional (0.001 = 0.1%)
    #[serde(default = "default_fee_rate")]
    pub fee_rate: Decimal,
    /// Adverse fill adjustment per side (0.0005 = 0.05%)
    #[serde(default = "default_slippage_rate")]
    pub slippage_rate: Decimal,
    /// Bar timeframe, drives annualization
    #[serde(default)]
    pub timeframe: Timeframe,
    /// Record the end-of-data forced close in the trade log.
    ///
    /// Off by default: the forced close exists for mark-to-market
    /// metrics, not as a strategy decision.
    #[serde(default)]
    pub log_forced_exit: bool,
}

fn default_initial_capital() -> Decimal {
    dec!(10000)
}
fn default_fee_rate() -> Decimal {
    dec!(0.001)
}
fn default_slippage_rate() -> Decimal {
    dec!(0.0005)
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            initial_capital: default_initial_capital(),
            fee_rate: default_fee_rate(),
            slippage_rate: default_slippage_rate(),
            timeframe: Timeframe::OneHour,
            log_forced_exit: false,
        }
    }
}
