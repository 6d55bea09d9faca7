//! Meta-strategy fusion
//!
//! Combines chaos, behavior, and microstructure metrics into one
//! position-sizing multiplier and a trade-permission gate.

mod engine;
mod types;

pub use engine::MetaEngine;
pub use types::{MetaConfig, RegimeDecision};
