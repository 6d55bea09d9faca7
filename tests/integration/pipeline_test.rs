//! End-to-end pipeline tests
//!
//! Demo data through strategy generation, backtesting, the three risk
//! engines, and the fused decision.

use regimegate::backtest::{run_all, SimulatorConfig};
use regimegate::behavior::BehaviorEngine;
use regimegate::chaos::{ChaosEngine, Regime};
use regimegate::data::{generate_demo_bars, DemoDataConfig};
use regimegate::meta::MetaEngine;
use regimegate::micro::MicrostructureEngine;
use regimegate::strategy::{
    InMemoryRegistry, Language, RuleBasedGenerator, StrategyGenerator, StrategyRepository,
};

fn demo_bars(num_bars: usize) -> Vec<regimegate::market::Bar> {
    generate_demo_bars(&DemoDataConfig {
        num_bars,
        seed: 42,
        ..DemoDataConfig::default()
    })
}

#[test]
fn test_description_to_decision() {
    let bars = demo_bars(500);

    // Text description to validated strategy configs.
    let generator = RuleBasedGenerator;
    let crossover = generator
        .generate("ma crossover with 5 and 20 windows", Language::English)
        .unwrap();
    let cluster = generator.generate("均线密集", Language::Chinese).unwrap();

    // Persist and retrieve through the repository seam.
    let registry = InMemoryRegistry::new();
    registry.create(crossover.clone()).unwrap();
    registry.create(cluster.clone()).unwrap();
    assert_eq!(registry.list().len(), 2);
    let stored = registry.get(&crossover.id).unwrap();
    assert_eq!(stored.name, crossover.name);

    // Backtest both strategies in one batch.
    let configs = vec![crossover, cluster];
    let outcomes = run_all(&configs, &bars, &SimulatorConfig::default());
    assert_eq!(outcomes.len(), 2);
    for (config, outcome) in configs.iter().zip(&outcomes) {
        assert_eq!(config.id, outcome.config_id);
        let result = outcome.result.as_ref().unwrap();
        assert_eq!(result.equity_curve.len(), bars.len());
        assert!(result.final_capital > rust_decimal::Decimal::ZERO);
    }

    // Score market and trade log, then fuse.
    let trades = &outcomes[0].result.as_ref().unwrap().trades;
    let chaos = ChaosEngine::with_defaults().compute(&bars, 100).unwrap();
    let behavior = BehaviorEngine::with_defaults().compute(trades, &bars);
    let micro = MicrostructureEngine::with_defaults().compute(&bars[bars.len() - 100..], None);

    assert!((0.0..=1.0).contains(&chaos.chaos_index));
    assert!(micro.reduced_confidence);

    let decision =
        MetaEngine::with_defaults().fuse(Some(&chaos), Some(&behavior), Some(&micro));
    assert!((0.2..=1.0).contains(&decision.position_multiplier));
    assert_eq!(decision.regime, Regime::classify(chaos.chaos_index));
}

#[test]
fn test_pipeline_is_deterministic() {
    let run = || {
        let bars = demo_bars(300);
        let config = RuleBasedGenerator
            .generate("ma crossover 8 21", Language::English)
            .unwrap();
        let outcomes = run_all(
            &[config],
            &bars,
            &SimulatorConfig::default(),
        );
        let result = outcomes[0].result.as_ref().unwrap();
        (result.final_capital, result.trades.len())
    };
    assert_eq!(run(), run());
}

#[test]
fn test_missing_engine_input_halts_trading() {
    let bars = demo_bars(300);
    let micro = MicrostructureEngine::with_defaults().compute(&bars[bars.len() - 100..], None);
    let decision = MetaEngine::with_defaults().fuse(None, None, Some(&micro));
    assert!(!decision.allow_new_trades);
    assert_eq!(decision.position_multiplier, 0.2);
}

#[test]
fn test_decision_serializes_to_json() {
    let bars = demo_bars(300);
    let chaos = ChaosEngine::with_defaults().compute(&bars, 100).unwrap();
    let behavior = BehaviorEngine::with_defaults().compute(&[], &bars);
    let micro = MicrostructureEngine::with_defaults().compute(&bars[bars.len() - 100..], None);
    let decision =
        MetaEngine::with_defaults().fuse(Some(&chaos), Some(&behavior), Some(&micro));

    let json = serde_json::to_string(&decision).unwrap();
    assert!(json.contains("position_multiplier"));
    assert!(json.contains("allow_new_trades"));
}
