//! Integration test harness

mod config_test;
mod pipeline_test;
