//! Backtest command implementation

use clap::Args;
use rust_decimal::Decimal;

use crate::backtest::{run_all, SimulatorConfig};
use crate::config::Config;
use crate::data::{generate_demo_bars, DemoDataConfig};
use crate::market::Timeframe;
use crate::strategy::{
    Language, RuleBasedGenerator, StrategyConfig, StrategyGenerator, StrategyType,
};

#[derive(Args, Debug)]
pub struct BacktestArgs {
    /// Free-text strategy description (overrides --strategy)
    #[arg(long)]
    pub describe: Option<String>,

    /// Built-in strategy: ma_crossover or ma_cluster_density
    #[arg(long, default_value = "ma_crossover")]
    pub strategy: String,

    /// Number of demo bars to generate
    #[arg(long, default_value = "720")]
    pub bars: usize,

    /// Demo data seed
    #[arg(long, default_value = "7")]
    pub seed: u64,

    /// Initial capital (overrides config)
    #[arg(long)]
    pub capital: Option<Decimal>,

    /// Bar timeframe, e.g. 1h or 1d (overrides config)
    #[arg(long)]
    pub timeframe: Option<String>,

    /// Output format: json or table
    #[arg(long, default_value = "table")]
    pub format: String,
}

impl BacktestArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let strategy_config = self.resolve_strategy()?;
        let timeframe = match &self.timeframe {
            Some(label) => Timeframe::parse(label)?,
            None => config.simulator.timeframe,
        };
        let bars = generate_demo_bars(&DemoDataConfig {
            num_bars: self.bars,
            seed: self.seed,
            timeframe,
            ..DemoDataConfig::default()
        });

        let sim_config = SimulatorConfig {
            initial_capital: self.capital.unwrap_or(config.simulator.initial_capital),
            timeframe,
            ..config.simulator.clone()
        };

        tracing::info!(
            strategy = %strategy_config.name,
            bars = bars.len(),
            "starting backtest"
        );

        let configs = vec![strategy_config];
        for outcome in run_all(&configs, &bars, &sim_config) {
            match outcome.result {
                Ok(result) => {
                    if self.format == "json" {
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    } else {
                        println!("{}", result.format_table());
                    }
                }
                Err(e) => {
                    tracing::error!(config_id = %outcome.config_id, error = %e, "backtest failed");
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }

    fn resolve_strategy(&self) -> anyhow::Result<StrategyConfig> {
        if let Some(description) = &self.describe {
            let config = RuleBasedGenerator.generate(description, Language::English)?;
            return Ok(config);
        }
        match self.strategy.as_str() {
            "ma_crossover" => Ok(StrategyConfig::new(
                StrategyType::MaCrossover,
                "ma-crossover-demo",
            )),
            "ma_cluster_density" => Ok(StrategyConfig::new(
                StrategyType::MaClusterDensity,
                "ma-cluster-demo",
            )),
            other => anyhow::bail!("unknown strategy type: {other}"),
        }
    }
}
