//! Multi-strategy backtest runner
//!
//! Runs are embarrassingly parallel: each gets isolated simulator
//! state, results come back in input order, and one strategy's failure
//! never aborts its siblings.

use rayon::prelude::*;

use super::{BacktestResult, BacktestSimulator, SimulatorConfig};
use crate::error::{Error, Result};
use crate::market::Bar;
use crate::strategy::{create_strategy, StrategyConfig};

/// Per-run status for one strategy in a batch
#[derive(Debug)]
pub struct RunOutcome {
    pub config_id: String,
    pub result: Result<BacktestResult>,
}

/// Run every strategy against the same bar history.
///
/// Output order matches `configs` regardless of execution order.
pub fn run_all(
    configs: &[StrategyConfig],
    bars: &[Bar],
    sim_config: &SimulatorConfig,
) -> Vec<RunOutcome> {
    configs
        .par_iter()
        .map(|config| RunOutcome {
            config_id: config.id.clone(),
            result: run_one(config, bars, sim_config),
        })
        .collect()
}

/// Run a single strategy end to end
pub fn run_one(
    config: &StrategyConfig,
    bars: &[Bar],
    sim_config: &SimulatorConfig,
) -> Result<BacktestResult> {
    let strategy = create_strategy(config)?;
    if bars.len() < strategy.min_lookback() {
        return Err(Error::InsufficientData {
            required: strategy.min_lookback(),
            available: bars.len(),
        });
    }
    let signals = strategy.generate_signals(bars)?;
    tracing::info!(
        config_id = %config.id,
        strategy = strategy.type_name(),
        signals = signals.len(),
        "running backtest"
    );
    BacktestSimulator::new(sim_config.clone()).run(&config.id, bars, &signals)
}
