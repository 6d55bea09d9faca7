//! Market microstructure analysis
//!
//! Volume-concentration (whale) and leverage-risk estimation from
//! OHLCV bars plus an optional open-interest series.

mod engine;
mod types;

pub use engine::MicrostructureEngine;
pub use types::{MicrostructureConfig, MicrostructureMetrics};
