//! Synthetic market data
//!
//! On-disk loading and parsing belong to external collaborators; this
//! module only generates plausible bar series for the CLI and tests.

mod demo;

pub use demo::{generate_demo_bars, DemoDataConfig};
