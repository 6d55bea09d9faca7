//! Chaos and regime analysis
//!
//! Quantifies how unpredictable the recent price window is and maps
//! that onto a coarse market regime.

mod engine;
mod types;

pub use engine::ChaosEngine;
pub use types::{ChaosConfig, ChaosMetrics, Regime};
