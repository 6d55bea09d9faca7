//! Configuration integration tests

use regimegate::config::Config;
use rust_decimal_macros::dec;

#[test]
fn test_full_config_round_trip() {
    let toml = r#"
        [simulator]
        initial_capital = 25000
        fee_rate = 0.0015
        slippage_rate = 0.0002
        timeframe = "4h"
        log_forced_exit = true

        [analysis]
        window_bars = 150

        [chaos]
        lyapunov_horizon = 8
        volatility_weight = 0.5
        lyapunov_weight = 0.3
        noise_weight = 0.2

        [behavior]
        min_interval_secs = 30.0
        baseline_interval_secs = 7200.0

        [micro]
        whale_volume_multiple = 4.0

        [meta]
        multiplier_floor = 0.15
        consecutive_loss_cap = 3

        [telemetry]
        log_level = "warn"
    "#;

    let config: Config = toml::from_str(toml).unwrap();
    assert_eq!(config.simulator.initial_capital, dec!(25000));
    assert!(config.simulator.log_forced_exit);
    assert_eq!(config.analysis.window_bars, 150);
    assert_eq!(config.chaos.lyapunov_horizon, 8);
    assert_eq!(config.behavior.min_interval_secs, 30.0);
    assert_eq!(config.micro.whale_volume_multiple, 4.0);
    assert_eq!(config.meta.consecutive_loss_cap, 3);
    assert_eq!(config.telemetry.log_level, "warn");
}

#[test]
fn test_defaults_cover_every_section() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.simulator.fee_rate, dec!(0.001));
    assert_eq!(config.chaos.volatility_weight, 0.40);
    assert_eq!(config.meta.multiplier_floor, 0.2);
}
