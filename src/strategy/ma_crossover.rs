//! Moving average crossover strategy
//!
//! Long-only: enters when the short SMA crosses above the long SMA,
//! exits on the reverse cross. Emits nothing until `long_window` bars
//! are available.

use rust_decimal::Decimal;

use super::{sma, Signal, SignalAction, Strategy, StrategyConfig};
use crate::error::{Error, Result};
use crate::market::Bar;

const ALLOWED_PARAMS: &[&str] = &["short_window", "long_window", "size_fraction"];

/// Validated MA crossover parameters
#[derive(Debug, Clone)]
pub struct MaCrossoverParams {
    pub short_window: usize,
    pub long_window: usize,
    pub size_fraction: Decimal,
}

impl MaCrossoverParams {
    /// Build from a raw config, rejecting unknown and out-of-domain keys
    pub fn from_config(config: &StrategyConfig) -> Result<Self> {
        config.reject_unknown(ALLOWED_PARAMS)?;

        let short_window = config.scalar_or("short_window", 10.0)? as usize;
        let long_window = config.scalar_or("long_window", 30.0)? as usize;
        let size_fraction = config.scalar_or("size_fraction", 0.1)?;

        if short_window == 0 {
            return Err(Error::config("short_window must be at least 1"));
        }
        if short_window >= long_window {
            return Err(Error::config(format!(
                "short_window ({short_window}) must be less than long_window ({long_window})"
            )));
        }
        if !(size_fraction > 0.0 && size_fraction <= 1.0) {
            return Err(Error::config("size_fraction must be in (0, 1]"));
        }

        Ok(Self {
            short_window,
            long_window,
            size_fraction: Decimal::try_from(size_fraction)
                .map_err(|e| Error::config(format!("size_fraction: {e}")))?,
        })
    }
}

/// MA crossover strategy
pub struct MaCrossoverStrategy {
    params: MaCrossoverParams,
}

impl MaCrossoverStrategy {
    pub fn from_config(config: &StrategyConfig) -> Result<Self> {
        Ok(Self {
            params: MaCrossoverParams::from_config(config)?,
        })
    }

    pub fn new(params: MaCrossoverParams) -> Self {
        Self { params }
    }
}

impl Strategy for MaCrossoverStrategy {
    fn generate_signals(&self, bars: &[Bar]) -> Result<Vec<Signal>> {
        let closes: Vec<Decimal> = bars.iter().map(|b| b.close).collect();
        let short = sma(&closes, self.params.short_window);
        let long = sma(&closes, self.params.long_window);

        let mut signals = Vec::new();
        // Cross detection needs both MAs at i-1 and i, so the first
        // candidate bar is index long_window.
        for i in self.params.long_window..bars.len() {
            let (Some(sp), Some(lp)) = (short[i - 1], long[i - 1]) else {
                continue;
            };
            let (Some(sc), Some(lc)) = (short[i], long[i]) else {
                continue;
            };

            let action = if sp <= lp && sc > lc {
                Some(SignalAction::EnterLong)
            } else if sp >= lp && sc < lc {
                Some(SignalAction::ExitLong)
            } else {
                None
            };

            if let Some(action) = action {
                signals.push(Signal {
                    timestamp: bars[i].timestamp,
                    action,
                    size_fraction: self.params.size_fraction,
                });
            }
        }
        Ok(signals)
    }

    fn min_lookback(&self) -> usize {
        self.params.long_window
    }

    fn type_name(&self) -> &'static str {
        "ma_crossover"
    }
}
