//! Analyze command implementation
//!
//! Runs the full pipeline on demo data: a reference backtest produces a
//! trade log, the three engines score the market and the log, and the
//! meta engine fuses them into a decision.

use clap::Args;

use crate::backtest::{run_all, RunOutcome};
use crate::behavior::BehaviorEngine;
use crate::chaos::ChaosEngine;
use crate::config::Config;
use crate::data::{generate_demo_bars, DemoDataConfig};
use crate::meta::MetaEngine;
use crate::micro::MicrostructureEngine;
use crate::strategy::{StrategyConfig, StrategyType};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Number of demo bars to generate
    #[arg(long, default_value = "720")]
    pub bars: usize,

    /// Demo data seed
    #[arg(long, default_value = "7")]
    pub seed: u64,

    /// Analysis window in bars (overrides config)
    #[arg(long)]
    pub window: Option<usize>,

    /// Output format: json or table
    #[arg(long, default_value = "table")]
    pub format: String,
}

impl AnalyzeArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let bars = generate_demo_bars(&DemoDataConfig {
            num_bars: self.bars,
            seed: self.seed,
            timeframe: config.simulator.timeframe,
            ..DemoDataConfig::default()
        });
        let window = self.window.unwrap_or(config.analysis.window_bars);

        // Reference backtest supplies the trade log for behavior scoring.
        let configs = vec![StrategyConfig::new(
            StrategyType::MaCrossover,
            "analysis-reference",
        )];
        let outcomes = run_all(&configs, &bars, &config.simulator);
        let trades = match outcomes.as_slice() {
            [RunOutcome {
                result: Ok(result), ..
            }] => result.trades.clone(),
            _ => {
                tracing::warn!("reference backtest failed, behavior metrics default to neutral");
                Vec::new()
            }
        };

        let chaos = ChaosEngine::new(config.chaos.clone())
            .compute(&bars, window)
            .ok();
        let behavior = BehaviorEngine::new(config.behavior.clone()).compute(&trades, &bars);
        let tail = &bars[bars.len().saturating_sub(window)..];
        let micro = MicrostructureEngine::new(config.micro.clone()).compute(tail, None);

        let decision = MetaEngine::new(config.meta.clone()).fuse(
            chaos.as_ref(),
            Some(&behavior),
            Some(&micro),
        );

        if self.format == "json" {
            println!("{}", serde_json::to_string_pretty(&decision)?);
        } else {
            println!(
                r#"
══════════════════════════════════════════════════════
               REGIME DECISION
══════════════════════════════════════════════════════
Regime:              {}
Chaos Index:         {:.3}
Whale Activity:      {:.3}
Leverage Risk:       {:.3}
Position Multiplier: {:.2}
New Trades Allowed:  {}
"#,
                decision.regime.label(),
                decision.chaos_index,
                decision.whale_activity_index,
                decision.leverage_risk_index,
                decision.position_multiplier,
                if decision.allow_new_trades { "yes" } else { "no" },
            );
            for (key, value) in &decision.recommendations {
                println!("  {key}: {value}");
            }
        }
        Ok(())
    }
}
