//! Microstructure metric computation

use super::{MicrostructureConfig, MicrostructureMetrics};
use crate::market::Bar;

/// Stateless microstructure engine
pub struct MicrostructureEngine {
    config: MicrostructureConfig,
}

impl MicrostructureEngine {
    pub fn new(config: MicrostructureConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(MicrostructureConfig::default())
    }

    /// Compute microstructure metrics over the given window.
    ///
    /// `open_interest` is a per-bar series when available; without it
    /// the leverage index degrades to a volatility-only estimate and
    /// `reduced_confidence` is set.
    pub fn compute(
        &self,
        bars: &[Bar],
        open_interest: Option<&[f64]>,
    ) -> MicrostructureMetrics {
        let whale_activity_index = self.whale_activity(bars);
        let volatility_component = clamp01(volatility(bars) / self.config.volatility_scale);

        let (leverage_risk_index, reduced_confidence) = match open_interest {
            Some(series) if series.len() >= 2 => {
                let oi_component = clamp01(mean_abs_roc(series) / self.config.oi_roc_scale);
                (
                    clamp01(0.5 * oi_component + 0.5 * volatility_component),
                    false,
                )
            }
            _ => (volatility_component, true),
        };

        MicrostructureMetrics {
            whale_activity_index,
            leverage_risk_index,
            reduced_confidence,
        }
    }

    /// Share of total window volume contributed by outsized bars
    fn whale_activity(&self, bars: &[Bar]) -> f64 {
        let volumes: Vec<f64> = bars
            .iter()
            .map(|b| f64::try_from(b.volume).unwrap_or(0.0))
            .collect();
        let total: f64 = volumes.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        let threshold = median(&volumes) * self.config.whale_volume_multiple;
        let concentrated: f64 = volumes.iter().filter(|&&v| v > threshold).sum();
        clamp01(concentrated / total)
    }
}

fn volatility(bars: &[Bar]) -> f64 {
    let closes: Vec<f64> = bars
        .iter()
        .map(|b| f64::try_from(b.close).unwrap_or(0.0))
        .collect();
    let returns: Vec<f64> = closes
        .windows(2)
        .filter(|w| w[0] > 0.0 && w[1] > 0.0)
        .map(|w| (w[1] / w[0]).ln())
        .collect();
    if returns.len() < 2 {
        return 0.0;
    }
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    (returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n).sqrt()
}

/// Mean absolute per-step rate of change
fn mean_abs_roc(series: &[f64]) -> f64 {
    let rocs: Vec<f64> = series
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] / w[0] - 1.0).abs())
        .collect();
    if rocs.is_empty() {
        return 0.0;
    }
    rocs.iter().sum::<f64>() / rocs.len() as f64
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn bars(closes_volumes: &[(f64, f64)]) -> Vec<Bar> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        closes_volumes
            .iter()
            .enumerate()
            .map(|(i, &(c, v))| {
                let close = Decimal::try_from(c).unwrap();
                Bar {
                    timestamp: base + Duration::hours(i as i64),
                    open: close,
                    high: close + dec!(1),
                    low: close - dec!(1),
                    close,
                    volume: Decimal::try_from(v).unwrap(),
                }
            })
            .collect()
    }

    #[test]
    fn test_uniform_volume_no_whales() {
        let window: Vec<(f64, f64)> = (0..50).map(|_| (100.0, 1000.0)).collect();
        let metrics = MicrostructureEngine::with_defaults().compute(&bars(&window), None);
        assert_eq!(metrics.whale_activity_index, 0.0);
    }

    #[test]
    fn test_volume_spikes_detected() {
        let mut window: Vec<(f64, f64)> = (0..50).map(|_| (100.0, 1000.0)).collect();
        window[10].1 = 20_000.0;
        window[30].1 = 15_000.0;
        let metrics = MicrostructureEngine::with_defaults().compute(&bars(&window), None);
        // 35k of 83k total comes from the two spike bars.
        assert!(metrics.whale_activity_index > 0.4);
        assert!(metrics.whale_activity_index <= 1.0);
    }

    #[test]
    fn test_missing_oi_reduces_confidence() {
        let window: Vec<(f64, f64)> = (0..50).map(|i| (100.0 + i as f64, 1000.0)).collect();
        let metrics = MicrostructureEngine::with_defaults().compute(&bars(&window), None);
        assert!(metrics.reduced_confidence);
    }

    #[test]
    fn test_oi_swings_raise_leverage_risk() {
        let window: Vec<(f64, f64)> = (0..50).map(|_| (100.0, 1000.0)).collect();
        let b = bars(&window);
        let engine = MicrostructureEngine::with_defaults();

        let flat_oi = vec![1_000.0; 50];
        let calm = engine.compute(&b, Some(&flat_oi));
        assert!(!calm.reduced_confidence);

        let swinging: Vec<f64> = (0..50)
            .map(|i| if i % 2 == 0 { 1_000.0 } else { 1_200.0 })
            .collect();
        let risky = engine.compute(&b, Some(&swinging));
        assert!(risky.leverage_risk_index > calm.leverage_risk_index);
    }

    #[test]
    fn test_zero_volume_window() {
        let window: Vec<(f64, f64)> = (0..20).map(|_| (100.0, 0.0)).collect();
        let metrics = MicrostructureEngine::with_defaults().compute(&bars(&window), None);
        assert_eq!(metrics.whale_activity_index, 0.0);
    }
}
