//! Backtest result types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A completed round trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
    /// Fill price including adverse slippage
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    /// Fraction of available cash committed at entry
    pub size_fraction: Decimal,
    /// Net of fees on both sides
    pub pnl: Decimal,
    pub is_win: bool,
}

/// One point on the mark-to-market equity curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub equity: Decimal,
    /// Fractional decline from the running peak, in [0, 1]
    pub drawdown: Decimal,
}

/// Summary statistics for a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_return: f64,
    pub annualized_return: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub total_trades: usize,
}

/// Full output of one backtest run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub config_id: String,
    pub initial_capital: Decimal,
    pub final_capital: Decimal,
    pub metrics: PerformanceMetrics,
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<Trade>,
}

impl BacktestResult {
    /// Format as a human-readable table
    pub fn format_table(&self) -> String {
        format!(
            r#"
══════════════════════════════════════════════════════
               BACKTEST RESULTS
══════════════════════════════════════════════════════
Strategy:         {}

PERFORMANCE
───────────────────────────────────────────────────────
Initial Capital:  {:.2}
Final Capital:    {:.2}
Total Return:     {:+.2}%
Annualized:       {:+.2}%
Sharpe Ratio:     {:.2}
Max Drawdown:     {:.2}%
Win Rate:         {:.1}%

ACTIVITY
───────────────────────────────────────────────────────
Total Trades:     {}
══════════════════════════════════════════════════════
"#,
            self.config_id,
            self.initial_capital,
            self.final_capital,
            self.metrics.total_return * 100.0,
            self.metrics.annualized_return * 100.0,
            self.metrics.sharpe_ratio,
            self.metrics.max_drawdown * 100.0,
            self.metrics.win_rate * 100.0,
            self.metrics.total_trades,
        )
    }
}
