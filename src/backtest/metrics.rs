//! Performance metric calculation

use rust_decimal::Decimal;

use super::{EquityPoint, PerformanceMetrics, Trade};
use crate::market::Timeframe;

/// Compute metrics for a completed run.
///
/// Degenerate inputs produce well-defined neutral values: zero return
/// variance gives a Sharpe of 0, an empty trade log a win rate of 0.
pub fn compute_metrics(
    equity_curve: &[EquityPoint],
    trades: &[Trade],
    initial_capital: Decimal,
    final_capital: Decimal,
    timeframe: Timeframe,
) -> PerformanceMetrics {
    let initial = f64::try_from(initial_capital).unwrap_or(0.0);
    let final_ = f64::try_from(final_capital).unwrap_or(0.0);
    let num_bars = equity_curve.len();

    let total_return = if initial > 0.0 {
        final_ / initial - 1.0
    } else {
        0.0
    };

    let periods_per_year = timeframe.periods_per_year();
    let annualized_return = if num_bars > 0 && total_return > -1.0 {
        (1.0 + total_return).powf(periods_per_year / num_bars as f64) - 1.0
    } else {
        0.0
    };

    let sharpe_ratio = sharpe(equity_curve, periods_per_year);

    let max_drawdown = equity_curve
        .iter()
        .map(|p| f64::try_from(p.drawdown).unwrap_or(0.0))
        .fold(0.0, f64::max);

    let wins = trades.iter().filter(|t| t.is_win).count();
    let win_rate = if trades.is_empty() {
        0.0
    } else {
        wins as f64 / trades.len() as f64
    };

    PerformanceMetrics {
        total_return,
        annualized_return,
        sharpe_ratio,
        max_drawdown,
        win_rate,
        total_trades: trades.len(),
    }
}

/// Annualized Sharpe over per-bar equity returns, 0 when variance is 0
fn sharpe(equity_curve: &[EquityPoint], periods_per_year: f64) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }
    let mut returns = Vec::with_capacity(equity_curve.len() - 1);
    for pair in equity_curve.windows(2) {
        let prev = f64::try_from(pair[0].equity).unwrap_or(0.0);
        let curr = f64::try_from(pair[1].equity).unwrap_or(0.0);
        if prev > 0.0 {
            returns.push(curr / prev - 1.0);
        }
    }
    if returns.is_empty() {
        return 0.0;
    }
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();
    if std == 0.0 {
        return 0.0;
    }
    mean / std * periods_per_year.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn curve(equities: &[f64]) -> Vec<EquityPoint> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut peak = f64::MIN;
        equities
            .iter()
            .enumerate()
            .map(|(i, &e)| {
                peak = peak.max(e);
                EquityPoint {
                    timestamp: base + Duration::hours(i as i64),
                    equity: Decimal::try_from(e).unwrap(),
                    drawdown: Decimal::try_from((peak - e) / peak).unwrap(),
                }
            })
            .collect()
    }

    #[test]
    fn test_flat_curve_neutral_metrics() {
        let points = curve(&[10000.0; 24]);
        let m = compute_metrics(&points, &[], dec!(10000), dec!(10000), Timeframe::OneHour);
        assert_eq!(m.total_return, 0.0);
        assert_eq!(m.sharpe_ratio, 0.0);
        assert_eq!(m.win_rate, 0.0);
        assert_eq!(m.max_drawdown, 0.0);
    }

    #[test]
    fn test_total_and_annualized_return() {
        // 10% over one full year of hourly bars: annualized == total.
        let points = curve(&[10000.0; 8760]);
        let m = compute_metrics(&points, &[], dec!(10000), dec!(11000), Timeframe::OneHour);
        assert!((m.total_return - 0.10).abs() < 1e-12);
        assert!((m.annualized_return - 0.10).abs() < 1e-9);
    }

    #[test]
    fn test_max_drawdown_picks_trough() {
        let points = curve(&[10000.0, 11000.0, 9900.0, 10500.0]);
        let m = compute_metrics(&points, &[], dec!(10000), dec!(10500), Timeframe::OneHour);
        assert!((m.max_drawdown - (11000.0 - 9900.0) / 11000.0).abs() < 1e-12);
    }

    #[test]
    fn test_win_rate() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let trade = |pnl: Decimal| Trade {
            entry_time: base,
            exit_time: base + Duration::hours(1),
            entry_price: dec!(100),
            exit_price: dec!(101),
            size_fraction: dec!(1),
            pnl,
            is_win: pnl > dec!(0),
        };
        let trades = vec![trade(dec!(10)), trade(dec!(-5)), trade(dec!(3)), trade(dec!(1))];
        let points = curve(&[10000.0, 10009.0]);
        let m = compute_metrics(&points, &trades, dec!(10000), dec!(10009), Timeframe::OneHour);
        assert_eq!(m.win_rate, 0.75);
        assert_eq!(m.total_trades, 4);
    }
}
