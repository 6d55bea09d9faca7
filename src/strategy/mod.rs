//! Strategy abstraction and built-in strategies
//!
//! A strategy is a pure function from a bar history to an ordered
//! signal sequence. Construction validates parameters against the
//! strategy's schema; generation itself never fails on parameter
//! grounds.

mod generator;
mod ma_cluster;
mod ma_crossover;
mod registry;
mod types;

pub use generator::{Language, RuleBasedGenerator, StrategyGenerator};
pub use ma_cluster::{MaClusterDensityStrategy, MaClusterParams};
pub use ma_crossover::{MaCrossoverParams, MaCrossoverStrategy};
pub use registry::{InMemoryRegistry, StrategyRepository};
pub use types::{ParamValue, Signal, SignalAction, StrategyConfig, StrategyType};

use rust_decimal::Decimal;

use crate::error::Result;
use crate::market::Bar;

/// A trading strategy
///
/// `generate_signals` is deterministic and side-effect free: the same
/// bars always produce the same signals.
pub trait Strategy: Send + Sync {
    /// Generate the ordered signal sequence for a bar history
    fn generate_signals(&self, bars: &[Bar]) -> Result<Vec<Signal>>;

    /// Minimum number of bars needed before any signal can be emitted
    fn min_lookback(&self) -> usize;

    /// Strategy type name for logging
    fn type_name(&self) -> &'static str;
}

/// Instantiate a strategy from its configuration
pub fn create_strategy(config: &StrategyConfig) -> Result<Box<dyn Strategy>> {
    match config.strategy_type {
        StrategyType::MaCrossover => Ok(Box::new(MaCrossoverStrategy::from_config(config)?)),
        StrategyType::MaClusterDensity => {
            Ok(Box::new(MaClusterDensityStrategy::from_config(config)?))
        }
    }
}

/// Simple moving average over closes, aligned to the input.
///
/// `out[i]` is `Some` once `window` closes ending at `i` are available.
pub(crate) fn sma(closes: &[Decimal], window: usize) -> Vec<Option<Decimal>> {
    let mut out = vec![None; closes.len()];
    if window == 0 || closes.len() < window {
        return out;
    }
    let divisor = Decimal::from(window as u64);
    let mut running: Decimal = closes[..window].iter().sum();
    out[window - 1] = Some(running / divisor);
    for i in window..closes.len() {
        running += closes[i] - closes[i - window];
        out[i] = Some(running / divisor);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sma_alignment() {
        let closes = vec![dec!(1), dec!(2), dec!(3), dec!(4)];
        let out = sma(&closes, 2);
        assert_eq!(out[0], None);
        assert_eq!(out[1], Some(dec!(1.5)));
        assert_eq!(out[2], Some(dec!(2.5)));
        assert_eq!(out[3], Some(dec!(3.5)));
    }

    #[test]
    fn test_sma_window_larger_than_input() {
        let closes = vec![dec!(1), dec!(2)];
        assert!(sma(&closes, 5).iter().all(Option::is_none));
    }
}
