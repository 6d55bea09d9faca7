use clap::Parser;
use regimegate::cli::{Cli, Commands};
use regimegate::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing config file falls back to defaults; every section has
    // a complete default set.
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    regimegate::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Backtest(args) => {
            tracing::info!("Starting backtest");
            args.execute(&config)?;
        }
        Commands::Analyze(args) => {
            tracing::info!("Starting regime analysis");
            args.execute(&config)?;
        }
        Commands::Generate(args) => {
            args.execute()?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Simulator: capital={}, fee={}, slippage={}",
                config.simulator.initial_capital,
                config.simulator.fee_rate,
                config.simulator.slippage_rate
            );
            println!("  Analysis window: {} bars", config.analysis.window_bars);
            println!(
                "  Chaos weights: vol={}, lyapunov={}, noise={}",
                config.chaos.volatility_weight,
                config.chaos.lyapunov_weight,
                config.chaos.noise_weight
            );
            println!(
                "  Meta: floor={}, loss cap={}",
                config.meta.multiplier_floor, config.meta.consecutive_loss_cap
            );
        }
    }

    Ok(())
}
