//! CLI interface for regimegate
//!
//! Provides subcommands for:
//! - `backtest`: Run strategy backtests on demo data
//! - `analyze`: Run the risk engines and print the fused decision
//! - `generate`: Turn a text description into a strategy config
//! - `config`: Show configuration

mod analyze;
mod backtest;
mod generate;

pub use analyze::AnalyzeArgs;
pub use backtest::BacktestArgs;
pub use generate::GenerateArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "regimegate")]
#[command(about = "Market-regime risk analysis and strategy backtesting")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run strategy backtests on demo data
    Backtest(BacktestArgs),
    /// Run chaos/behavior/microstructure analysis and the fused decision
    Analyze(AnalyzeArgs),
    /// Turn a text description into a strategy configuration
    Generate(GenerateArgs),
    /// Show configuration
    Config,
}
