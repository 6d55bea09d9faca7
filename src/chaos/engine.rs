//! Chaos metric computation
//!
//! Works on the log-return trajectory of the most recent window. All
//! components are scale-free, so the chaos index is invariant under a
//! uniform positive scaling of prices.

use super::{ChaosConfig, ChaosMetrics, Regime};
use crate::error::{Error, Result};
use crate::market::Bar;

/// Smallest window the estimators are meaningful on
const MIN_WINDOW: usize = 10;

/// Distances below this are treated as coincident points
const NEIGHBOR_EPSILON: f64 = 1e-10;

/// Stateless chaos/regime engine
pub struct ChaosEngine {
    config: ChaosConfig,
}

impl ChaosEngine {
    pub fn new(config: ChaosConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ChaosConfig::default())
    }

    /// Compute chaos metrics over the most recent `window` bars
    pub fn compute(&self, bars: &[Bar], window: usize) -> Result<ChaosMetrics> {
        if window < MIN_WINDOW {
            return Err(Error::config(format!(
                "chaos window must be at least {MIN_WINDOW}"
            )));
        }
        if bars.len() < window {
            return Err(Error::InsufficientData {
                required: window,
                available: bars.len(),
            });
        }

        let recent = &bars[bars.len() - window..];
        let closes: Vec<f64> = recent
            .iter()
            .map(|b| f64::try_from(b.close).unwrap_or(0.0))
            .collect();
        let returns = log_returns(&closes);

        let volatility = std_dev(&returns);
        let lyapunov = self.lyapunov_exponent(&returns);
        let noise_to_signal_ratio = self.noise_to_signal(&closes);

        let chaos_index = self.config.volatility_weight
            * clamp01(volatility / self.config.volatility_scale)
            + self.config.lyapunov_weight
                * clamp01(lyapunov.max(0.0) / self.config.lyapunov_scale)
            + self.config.noise_weight
                * clamp01(noise_to_signal_ratio / self.config.noise_scale);
        let chaos_index = clamp01(chaos_index);

        Ok(ChaosMetrics {
            chaos_index,
            volatility,
            noise_to_signal_ratio,
            regime: Regime::classify(chaos_index),
        })
    }

    /// Largest-Lyapunov approximation over a 1-D return trajectory.
    ///
    /// For each point, the nearest neighbor by value (adjacent indices
    /// excluded) is tracked over a fixed forward horizon; the exponent
    /// is the mean of ln(distance ratio)/horizon across valid points.
    fn lyapunov_exponent(&self, returns: &[f64]) -> f64 {
        let horizon = self.config.lyapunov_horizon;
        if returns.len() <= horizon + 2 {
            return 0.0;
        }

        let mut divergences = Vec::new();
        let last_start = returns.len() - horizon;

        for i in 0..last_start {
            let mut nearest: Option<(usize, f64)> = None;
            for j in 0..last_start {
                // Exclude the point itself and its immediate neighbors.
                if j.abs_diff(i) <= 1 {
                    continue;
                }
                let distance = (returns[i] - returns[j]).abs();
                if nearest.is_none_or(|(_, best)| distance < best) {
                    nearest = Some((j, distance));
                }
            }
            let Some((j, initial)) = nearest else { continue };
            if initial < NEIGHBOR_EPSILON {
                continue;
            }
            let grown = (returns[i + horizon] - returns[j + horizon]).abs();
            if grown <= 0.0 {
                continue;
            }
            divergences.push((grown / initial).ln() / horizon as f64);
        }

        if divergences.is_empty() {
            return 0.0;
        }
        divergences.iter().sum::<f64>() / divergences.len() as f64
    }

    /// std of the second difference of close over std of the first.
    ///
    /// Both flat: 0. Flat first difference with residual noise: the
    /// configured sentinel.
    fn noise_to_signal(&self, closes: &[f64]) -> f64 {
        if closes.len() < 3 {
            return 0.0;
        }
        let first: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
        let second: Vec<f64> = first.windows(2).map(|w| w[1] - w[0]).collect();
        let signal = std_dev(&first);
        let noise = std_dev(&second);
        if signal == 0.0 {
            if noise == 0.0 {
                0.0
            } else {
                self.config.noise_sentinel
            }
        } else {
            noise / signal
        }
    }
}

fn log_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .filter(|w| w[0] > 0.0 && w[1] > 0.0)
        .map(|w| (w[1] / w[0]).ln())
        .collect()
}

fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
