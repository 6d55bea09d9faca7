//! regimegate: market-regime risk analysis and strategy backtesting
//!
//! This library provides the core components for:
//! - OHLCV bar modelling and validation
//! - Strategy abstraction with built-in MA crossover and MA cluster
//!   strategies, plus text-description strategy generation
//! - An event-driven backtest simulator with fee and slippage costs
//! - Chaos analysis (volatility, Lyapunov divergence, noise-to-signal)
//!   with regime classification
//! - Trading-behavior and market-microstructure scoring
//! - Meta-strategy fusion into a position multiplier and trade gate

pub mod backtest;
pub mod behavior;
pub mod chaos;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod market;
pub mod meta;
pub mod micro;
pub mod strategy;
pub mod telemetry;

pub use error::{Error, Result};
