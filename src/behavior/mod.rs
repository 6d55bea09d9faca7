//! Trading-behavior analysis
//!
//! Scores how a trade log looks from a discipline standpoint:
//! operation pacing, reactive entries/exits, and losing streaks.

mod engine;
mod types;

pub use engine::BehaviorEngine;
pub use types::{BehaviorConfig, BehaviorMetrics};
