//! Backtest simulation engine

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{compute_metrics, BacktestResult, EquityPoint, SimulatorConfig, Trade};
use crate::error::{Error, Result};
use crate::market::{validate_bars, Bar};
use crate::strategy::{Signal, SignalAction};

/// Open position bookkeeping
struct OpenPosition {
    units: Decimal,
    entry_time: DateTime<Utc>,
    entry_price: Decimal,
    size_fraction: Decimal,
    /// Cash outlay at entry; the entry fee is funded from it
    cost_basis: Decimal,
}

/// Single-position FLAT/LONG state
enum PositionState {
    Flat,
    Long(OpenPosition),
}

/// Runs a signal sequence against a bar history
///
/// The simulator holds only its configuration; every `run` call uses
/// fully isolated state, so one simulator can serve concurrent runs.
pub struct BacktestSimulator {
    config: SimulatorConfig,
}

impl BacktestSimulator {
    /// Create a new simulator
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Create a simulator with default costs
    pub fn with_defaults() -> Self {
        Self::new(SimulatorConfig::default())
    }

    /// Run the backtest
    ///
    /// ENTER_LONG while LONG and EXIT_LONG while FLAT are no-ops. Any
    /// position still open after the last bar is marked to market at
    /// that bar's close; the trade log is untouched unless
    /// `log_forced_exit` is set.
    pub fn run(
        &self,
        config_id: &str,
        bars: &[Bar],
        signals: &[Signal],
    ) -> Result<BacktestResult> {
        if bars.is_empty() {
            return Err(Error::InsufficientData {
                required: 1,
                available: 0,
            });
        }
        validate_bars(bars)?;
        validate_signals(signals, bars)?;

        let one = Decimal::ONE;
        let mut cash = self.config.initial_capital;
        let mut state = PositionState::Flat;
        let mut trades: Vec<Trade> = Vec::new();
        let mut equity_curve: Vec<EquityPoint> = Vec::with_capacity(bars.len());
        let mut peak = self.config.initial_capital;
        let mut signal_idx = 0usize;

        for bar in bars {
            // Apply every signal stamped with this bar's timestamp.
            while signal_idx < signals.len() && signals[signal_idx].timestamp == bar.timestamp {
                let signal = &signals[signal_idx];
                signal_idx += 1;

                match (&state, signal.action) {
                    (PositionState::Flat, SignalAction::EnterLong) => {
                        let entry_price = bar.close * (one + self.config.slippage_rate);
                        let allocation = cash * signal.size_fraction;
                        if allocation <= Decimal::ZERO {
                            continue;
                        }
                        // The fee comes out of the allocation, so cash
                        // never drops below zero even at full size.
                        let fee = allocation * self.config.fee_rate;
                        let units = (allocation - fee) / entry_price;
                        cash -= allocation;
                        state = PositionState::Long(OpenPosition {
                            units,
                            entry_time: bar.timestamp,
                            entry_price,
                            size_fraction: signal.size_fraction,
                            cost_basis: allocation,
                        });
                    }
                    (PositionState::Long(position), SignalAction::ExitLong) => {
                        let exit_price = bar.close * (one - self.config.slippage_rate);
                        let (trade, proceeds) =
                            close_position(position, exit_price, bar.timestamp, self.config.fee_rate);
                        cash += proceeds;
                        trades.push(trade);
                        state = PositionState::Flat;
                    }
                    // Re-entries, exits while flat, and holds are no-ops.
                    _ => {}
                }
            }

            let equity = match &state {
                PositionState::Flat => cash,
                PositionState::Long(position) => cash + position.units * bar.close,
            };
            if equity > peak {
                peak = equity;
            }
            let drawdown = if peak > Decimal::ZERO {
                (peak - equity) / peak
            } else {
                Decimal::ZERO
            };
            equity_curve.push(EquityPoint {
                timestamp: bar.timestamp,
                equity,
                drawdown,
            });
        }

        // Mark-to-market close of any open position at the final bar.
        let last = bars.last().expect("bars checked non-empty");
        let final_capital = match state {
            PositionState::Flat => cash,
            PositionState::Long(position) => {
                if self.config.log_forced_exit {
                    let exit_price = last.close * (one - self.config.slippage_rate);
                    let (trade, proceeds) =
                        close_position(&position, exit_price, last.timestamp, self.config.fee_rate);
                    trades.push(trade);
                    cash + proceeds
                } else {
                    cash + position.units * last.close
                }
            }
        };

        let metrics = compute_metrics(
            &equity_curve,
            &trades,
            self.config.initial_capital,
            final_capital,
            self.config.timeframe,
        );

        tracing::debug!(
            config_id,
            trades = trades.len(),
            total_return = metrics.total_return,
            "backtest run complete"
        );

        Ok(BacktestResult {
            config_id: config_id.to_string(),
            initial_capital: self.config.initial_capital,
            final_capital,
            metrics,
            equity_curve,
            trades,
        })
    }
}

/// Realize an open position at the given fill
fn close_position(
    position: &OpenPosition,
    exit_price: Decimal,
    exit_time: DateTime<Utc>,
    fee_rate: Decimal,
) -> (Trade, Decimal) {
    let proceeds_gross = position.units * exit_price;
    let fee = proceeds_gross * fee_rate;
    let proceeds = proceeds_gross - fee;
    let pnl = proceeds - position.cost_basis;
    let trade = Trade {
        entry_time: position.entry_time,
        exit_time,
        entry_price: position.entry_price,
        exit_price,
        size_fraction: position.size_fraction,
        pnl,
        is_win: pnl > Decimal::ZERO,
    };
    (trade, proceeds)
}

/// Signals must be time-ordered, reference bar timestamps, and carry a
/// size fraction in (0, 1]
fn validate_signals(signals: &[Signal], bars: &[Bar]) -> Result<()> {
    let mut bar_idx = 0usize;
    let mut prev: Option<DateTime<Utc>> = None;
    for signal in signals {
        if signal.size_fraction <= Decimal::ZERO || signal.size_fraction > Decimal::ONE {
            return Err(Error::validation(format!(
                "signal at {}: size_fraction {} outside (0, 1]",
                signal.timestamp, signal.size_fraction
            )));
        }
        if let Some(prev_ts) = prev {
            if signal.timestamp < prev_ts {
                return Err(Error::validation(format!(
                    "signal at {} out of order",
                    signal.timestamp
                )));
            }
        }
        prev = Some(signal.timestamp);
        // Both sequences are ordered, so a single forward scan suffices.
        while bar_idx < bars.len() && bars[bar_idx].timestamp < signal.timestamp {
            bar_idx += 1;
        }
        if bar_idx >= bars.len() || bars[bar_idx].timestamp != signal.timestamp {
            return Err(Error::validation(format!(
                "signal at {} does not reference a bar timestamp",
                signal.timestamp
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let close = Decimal::try_from(c).unwrap();
                Bar {
                    timestamp: base + Duration::hours(i as i64),
                    open: close,
                    high: close + dec!(1),
                    low: close - dec!(1),
                    close,
                    volume: dec!(1000),
                }
            })
            .collect()
    }

    fn signal(bars: &[Bar], idx: usize, action: SignalAction) -> Signal {
        Signal {
            timestamp: bars[idx].timestamp,
            action,
            size_fraction: dec!(1),
        }
    }

    #[test]
    fn test_empty_bars_is_insufficient_data() {
        let sim = BacktestSimulator::with_defaults();
        assert!(matches!(
            sim.run("x", &[], &[]),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_round_trip_pnl_with_costs() {
        // Enter at close=100, exit at close=110, full size. The entry
        // fee is funded from the allocation:
        // units = 9990 / 100.05, proceeds = units * 109.945 * 0.999,
        // pnl = proceeds - 10000 = 967.0385...
        let bars = bars_from_closes(&[100.0, 105.0, 110.0]);
        let signals = vec![
            signal(&bars, 0, SignalAction::EnterLong),
            signal(&bars, 2, SignalAction::ExitLong),
        ];
        let sim = BacktestSimulator::with_defaults();
        let result = sim.run("roundtrip", &bars, &signals).unwrap();

        assert_eq!(result.metrics.total_trades, 1);
        assert_eq!(result.metrics.win_rate, 1.0);
        let pnl = f64::try_from(result.trades[0].pnl).unwrap();
        assert!((pnl - 967.0385).abs() < 0.01, "pnl was {pnl}");
        assert!(result.trades[0].is_win);
    }

    #[test]
    fn test_full_size_entry_keeps_cash_non_negative() {
        // Near-total collapse after a full-size entry: equity must stay
        // non-negative and drawdown within [0, 1].
        let bars = bars_from_closes(&[100.0, 0.01]);
        let signals = vec![signal(&bars, 0, SignalAction::EnterLong)];
        let result = BacktestSimulator::with_defaults()
            .run("crash", &bars, &signals)
            .unwrap();
        for point in &result.equity_curve {
            assert!(point.equity >= dec!(0), "equity {} negative", point.equity);
            assert!(
                point.drawdown >= dec!(0) && point.drawdown <= dec!(1),
                "drawdown {} out of range",
                point.drawdown
            );
        }
        assert!(result.final_capital >= dec!(0));
    }

    #[test]
    fn test_enter_while_long_is_noop() {
        let bars = bars_from_closes(&[100.0, 101.0, 102.0, 103.0]);
        let signals = vec![
            signal(&bars, 0, SignalAction::EnterLong),
            signal(&bars, 1, SignalAction::EnterLong),
            signal(&bars, 3, SignalAction::ExitLong),
        ];
        let result = BacktestSimulator::with_defaults()
            .run("noop", &bars, &signals)
            .unwrap();
        assert_eq!(result.trades.len(), 1);
    }

    #[test]
    fn test_exit_while_flat_is_noop() {
        let bars = bars_from_closes(&[100.0, 101.0]);
        let signals = vec![signal(&bars, 0, SignalAction::ExitLong)];
        let result = BacktestSimulator::with_defaults()
            .run("flat", &bars, &signals)
            .unwrap();
        assert!(result.trades.is_empty());
        assert_eq!(result.final_capital, dec!(10000));
    }

    #[test]
    fn test_open_position_marked_to_market() {
        let bars = bars_from_closes(&[100.0, 120.0]);
        let signals = vec![signal(&bars, 0, SignalAction::EnterLong)];
        let result = BacktestSimulator::with_defaults()
            .run("mtm", &bars, &signals)
            .unwrap();
        // No trade logged, but final capital reflects the open gain.
        assert!(result.trades.is_empty());
        assert!(result.final_capital > dec!(10000));
    }

    #[test]
    fn test_forced_exit_logged_when_configured() {
        let bars = bars_from_closes(&[100.0, 120.0]);
        let signals = vec![signal(&bars, 0, SignalAction::EnterLong)];
        let sim = BacktestSimulator::new(SimulatorConfig {
            log_forced_exit: true,
            ..SimulatorConfig::default()
        });
        let result = sim.run("forced", &bars, &signals).unwrap();
        assert_eq!(result.trades.len(), 1);
        assert_eq!(result.trades[0].exit_time, bars[1].timestamp);
    }

    #[test]
    fn test_drawdown_bounds() {
        let closes: Vec<f64> = (0..50)
            .map(|i| 100.0 + 20.0 * ((i as f64) * 0.5).sin())
            .collect();
        let bars = bars_from_closes(&closes);
        let signals = vec![
            signal(&bars, 0, SignalAction::EnterLong),
            signal(&bars, 49, SignalAction::ExitLong),
        ];
        let result = BacktestSimulator::with_defaults()
            .run("dd", &bars, &signals)
            .unwrap();
        for point in &result.equity_curve {
            assert!(point.drawdown >= dec!(0) && point.drawdown <= dec!(1));
        }
    }

    #[test]
    fn test_determinism() {
        let closes: Vec<f64> = (0..100)
            .map(|i| 100.0 + 15.0 * ((i as f64) * 0.37).sin())
            .collect();
        let bars = bars_from_closes(&closes);
        let signals = vec![
            signal(&bars, 3, SignalAction::EnterLong),
            signal(&bars, 40, SignalAction::ExitLong),
            signal(&bars, 55, SignalAction::EnterLong),
            signal(&bars, 90, SignalAction::ExitLong),
        ];
        let sim = BacktestSimulator::with_defaults();
        let a = sim.run("det", &bars, &signals).unwrap();
        let b = sim.run("det", &bars, &signals).unwrap();
        assert_eq!(a.final_capital, b.final_capital);
        assert_eq!(a.trades, b.trades);
        assert_eq!(a.equity_curve, b.equity_curve);
        assert_eq!(a.metrics, b.metrics);
    }

    #[test]
    fn test_rejects_signal_off_grid() {
        let bars = bars_from_closes(&[100.0, 101.0]);
        let signals = vec![Signal {
            timestamp: bars[1].timestamp + Duration::minutes(30),
            action: SignalAction::EnterLong,
            size_fraction: dec!(0.5),
        }];
        assert!(matches!(
            BacktestSimulator::with_defaults().run("grid", &bars, &signals),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_fraction() {
        // A fraction above 1 would borrow capital at zero cost.
        let bars = bars_from_closes(&[100.0, 110.0]);
        let signals = vec![Signal {
            timestamp: bars[0].timestamp,
            action: SignalAction::EnterLong,
            size_fraction: dec!(1.5),
        }];
        assert!(matches!(
            BacktestSimulator::with_defaults().run("oversize", &bars, &signals),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_fraction() {
        let bars = bars_from_closes(&[100.0, 110.0]);
        let signals = vec![Signal {
            timestamp: bars[0].timestamp,
            action: SignalAction::EnterLong,
            size_fraction: dec!(0),
        }];
        assert!(matches!(
            BacktestSimulator::with_defaults().run("zerosize", &bars, &signals),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_unordered_signals() {
        let bars = bars_from_closes(&[100.0, 101.0, 102.0]);
        let signals = vec![
            signal(&bars, 2, SignalAction::EnterLong),
            signal(&bars, 0, SignalAction::ExitLong),
        ];
        assert!(BacktestSimulator::with_defaults()
            .run("order", &bars, &signals)
            .is_err());
    }
}
