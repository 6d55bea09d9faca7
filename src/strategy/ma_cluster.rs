//! MA cluster density strategy
//!
//! Watches a fan of moving averages. When they compress into a tight
//! cluster and price then closes above the top of the cluster, that
//! breakout is taken long. The position is closed on a break below the
//! bottom of the fan or after a maximum holding period.

use rust_decimal::Decimal;

use super::{sma, Signal, SignalAction, Strategy, StrategyConfig};
use crate::error::{Error, Result};
use crate::market::Bar;

const ALLOWED_PARAMS: &[&str] = &[
    "ma_windows",
    "cluster_tolerance",
    "max_hold_bars",
    "size_fraction",
];

const DEFAULT_WINDOWS: &[f64] = &[5.0, 10.0, 20.0, 30.0, 50.0];

/// Validated MA cluster parameters
#[derive(Debug, Clone)]
pub struct MaClusterParams {
    pub ma_windows: Vec<usize>,
    /// Maximum relative spread for the fan to count as clustered
    pub cluster_tolerance: f64,
    pub max_hold_bars: usize,
    pub size_fraction: Decimal,
}

impl MaClusterParams {
    /// Build from a raw config, rejecting unknown and out-of-domain keys
    pub fn from_config(config: &StrategyConfig) -> Result<Self> {
        config.reject_unknown(ALLOWED_PARAMS)?;

        let raw_windows = config.list_or("ma_windows", DEFAULT_WINDOWS)?;
        let cluster_tolerance = config.scalar_or("cluster_tolerance", 0.02)?;
        let max_hold_bars = config.scalar_or("max_hold_bars", 48.0)? as usize;
        let size_fraction = config.scalar_or("size_fraction", 0.1)?;

        let mut ma_windows: Vec<usize> = Vec::with_capacity(raw_windows.len());
        for w in &raw_windows {
            if *w < 1.0 || w.fract() != 0.0 {
                return Err(Error::config(format!("ma_windows entry {w} is not a positive integer")));
            }
            ma_windows.push(*w as usize);
        }
        ma_windows.sort_unstable();
        ma_windows.dedup();
        if ma_windows.len() < 2 {
            return Err(Error::config("ma_windows needs at least 2 distinct windows"));
        }
        if cluster_tolerance <= 0.0 {
            return Err(Error::config("cluster_tolerance must be positive"));
        }
        if max_hold_bars == 0 {
            return Err(Error::config("max_hold_bars must be at least 1"));
        }
        if !(size_fraction > 0.0 && size_fraction <= 1.0) {
            return Err(Error::config("size_fraction must be in (0, 1]"));
        }

        Ok(Self {
            ma_windows,
            cluster_tolerance,
            max_hold_bars,
            size_fraction: Decimal::try_from(size_fraction)
                .map_err(|e| Error::config(format!("size_fraction: {e}")))?,
        })
    }
}

/// MA cluster density strategy
pub struct MaClusterDensityStrategy {
    params: MaClusterParams,
}

impl MaClusterDensityStrategy {
    pub fn from_config(config: &StrategyConfig) -> Result<Self> {
        Ok(Self {
            params: MaClusterParams::from_config(config)?,
        })
    }

    pub fn new(params: MaClusterParams) -> Self {
        Self { params }
    }

    /// Maximum pairwise relative spread of the fan, `(max - min) / mean`
    fn spread(mas: &[Decimal]) -> f64 {
        let min = mas.iter().min().copied().unwrap_or_default();
        let max = mas.iter().max().copied().unwrap_or_default();
        let mean: Decimal = mas.iter().sum::<Decimal>() / Decimal::from(mas.len() as u64);
        if mean.is_zero() {
            return f64::MAX;
        }
        f64::try_from((max - min) / mean).unwrap_or(f64::MAX)
    }
}

impl Strategy for MaClusterDensityStrategy {
    fn generate_signals(&self, bars: &[Bar]) -> Result<Vec<Signal>> {
        let closes: Vec<Decimal> = bars.iter().map(|b| b.close).collect();
        let fans: Vec<Vec<Option<Decimal>>> = self
            .params
            .ma_windows
            .iter()
            .map(|&w| sma(&closes, w))
            .collect();
        let longest = *self.params.ma_windows.last().unwrap_or(&1);

        let mut signals = Vec::new();
        let mut clustered_prev = false;
        let mut entry_bar: Option<usize> = None;

        for i in longest.saturating_sub(1)..bars.len() {
            let mas: Vec<Decimal> = match fans.iter().map(|f| f[i]).collect() {
                Some(mas) => mas,
                None => continue,
            };
            let ma_max = mas.iter().max().copied().unwrap();
            let ma_min = mas.iter().min().copied().unwrap();
            let clustered = Self::spread(&mas) < self.params.cluster_tolerance;

            match entry_bar {
                None => {
                    // Breakout confirmation: fan was clustered on the
                    // previous bar and price now closes above it.
                    if clustered_prev && closes[i] > ma_max {
                        signals.push(Signal {
                            timestamp: bars[i].timestamp,
                            action: SignalAction::EnterLong,
                            size_fraction: self.params.size_fraction,
                        });
                        entry_bar = Some(i);
                    }
                }
                Some(entered) => {
                    let held = i - entered;
                    if closes[i] < ma_min || held >= self.params.max_hold_bars {
                        signals.push(Signal {
                            timestamp: bars[i].timestamp,
                            action: SignalAction::ExitLong,
                            size_fraction: self.params.size_fraction,
                        });
                        entry_bar = None;
                    }
                }
            }

            clustered_prev = clustered;
        }
        Ok(signals)
    }

    fn min_lookback(&self) -> usize {
        *self.params.ma_windows.last().unwrap_or(&1)
    }

    fn type_name(&self) -> &'static str {
        "ma_cluster_density"
    }
}
