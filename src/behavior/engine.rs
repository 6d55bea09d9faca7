//! Behavior metric computation

use chrono::{DateTime, Utc};

use super::{BehaviorConfig, BehaviorMetrics};
use crate::backtest::Trade;
use crate::market::Bar;

/// Stateless behavior engine
pub struct BehaviorEngine {
    config: BehaviorConfig,
}

impl BehaviorEngine {
    pub fn new(config: BehaviorConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(BehaviorConfig::default())
    }

    /// Compute behavior metrics from a trade log.
    ///
    /// `bars` is the price history the trades were taken on, used for
    /// the chase/sell-off classification. Empty trades return the
    /// neutral all-zero metrics.
    pub fn compute(&self, trades: &[Trade], bars: &[Bar]) -> BehaviorMetrics {
        if trades.is_empty() {
            return BehaviorMetrics::default();
        }

        let avg_interval = average_interval(trades);
        BehaviorMetrics {
            impulsiveness_index: self.impulsiveness(trades, avg_interval),
            chase_selloff_index: self.chase_selloff(trades, bars),
            consecutive_losses: consecutive_losses(trades),
            avg_operation_interval_secs: avg_interval.unwrap_or(0.0),
        }
    }

    /// Decreasing normalization of the average operation interval
    fn impulsiveness(&self, trades: &[Trade], avg_interval: Option<f64>) -> f64 {
        if trades.len() < 2 {
            return 0.0;
        }
        let Some(avg) = avg_interval else { return 0.0 };
        let min = self.config.min_interval_secs;
        let baseline = self.config.baseline_interval_secs;
        if avg <= min {
            1.0
        } else if avg >= baseline {
            0.0
        } else {
            1.0 - (avg - min) / (baseline - min)
        }
    }

    /// Fraction of trades entered into a run-up or exited into a drop
    fn chase_selloff(&self, trades: &[Trade], bars: &[Bar]) -> f64 {
        if bars.is_empty() {
            return 0.0;
        }
        let lookback = self.config.reactive_lookback_bars;
        let threshold = self.config.reactive_move_threshold;

        let move_over_lookback = |timestamp: DateTime<Utc>| -> Option<f64> {
            let idx = bar_index(bars, timestamp)?;
            if idx < lookback {
                return None;
            }
            let now = f64::try_from(bars[idx].close).ok()?;
            let then = f64::try_from(bars[idx - lookback].close).ok()?;
            if then > 0.0 {
                Some(now / then - 1.0)
            } else {
                None
            }
        };

        let reactive = trades
            .iter()
            .filter(|trade| {
                let chased_entry = move_over_lookback(trade.entry_time)
                    .is_some_and(|m| m > threshold);
                let panicked_exit = move_over_lookback(trade.exit_time)
                    .is_some_and(|m| m < -threshold);
                chased_entry || panicked_exit
            })
            .count();

        reactive as f64 / trades.len() as f64
    }
}

/// Mean gap between consecutive operations (exit to next entry)
fn average_interval(trades: &[Trade]) -> Option<f64> {
    if trades.len() < 2 {
        return None;
    }
    let mut total = 0.0;
    for pair in trades.windows(2) {
        total += (pair[1].entry_time - pair[0].exit_time)
            .num_milliseconds() as f64
            / 1000.0;
    }
    Some(total / (trades.len() - 1) as f64)
}

/// Longest losing run ending at the most recent trade
fn consecutive_losses(trades: &[Trade]) -> usize {
    trades.iter().rev().take_while(|t| !t.is_win).count()
}

/// Index of the bar holding `timestamp`, by exact match
fn bar_index(bars: &[Bar], timestamp: DateTime<Utc>) -> Option<usize> {
    bars.binary_search_by_key(&timestamp, |b| b.timestamp).ok()
}
