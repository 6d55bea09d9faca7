//! Natural-language strategy generation
//!
//! Maps a free-text description to a `StrategyConfig`. The default
//! backend is a rule/keyword mapping; the trait seam exists so a real
//! language-model backend can be swapped in without touching the core.

use super::{StrategyConfig, StrategyType};
use crate::error::{Error, Result};

/// Description language tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Chinese,
}

/// Produces a strategy configuration from a free-text description
pub trait StrategyGenerator: Send + Sync {
    /// Map a description to a valid config, or fail with `Validation`
    fn generate(&self, description: &str, language: Language) -> Result<StrategyConfig>;
}

/// Keyword-based generator
///
/// Recognizes the built-in strategy families by keyword and pulls
/// window lengths out of any numbers present in the text.
#[derive(Debug, Default)]
pub struct RuleBasedGenerator;

const CROSSOVER_KEYWORDS: &[&str] = &["ma crossover", "moving average crossover", "均线交叉"];
const CLUSTER_KEYWORDS: &[&str] = &["ma cluster", "moving average cluster", "均线密集", "均线聚合"];

impl RuleBasedGenerator {
    /// Extract positive integers from the description, in order
    fn extract_numbers(text: &str) -> Vec<u32> {
        let mut numbers = Vec::new();
        let mut current = String::new();
        for ch in text.chars() {
            if ch.is_ascii_digit() {
                current.push(ch);
            } else if !current.is_empty() {
                if let Ok(n) = current.parse() {
                    numbers.push(n);
                }
                current.clear();
            }
        }
        if let Ok(n) = current.parse() {
            numbers.push(n);
        }
        numbers
    }
}

impl StrategyGenerator for RuleBasedGenerator {
    fn generate(&self, description: &str, _language: Language) -> Result<StrategyConfig> {
        let lower = description.to_lowercase();

        if CROSSOVER_KEYWORDS.iter().any(|k| lower.contains(k)) {
            let numbers = Self::extract_numbers(&lower);
            let (short, long) = match numbers.as_slice() {
                [short, long, ..] if short < long => (*short as f64, *long as f64),
                _ => (10.0, 30.0),
            };
            let mut config = StrategyConfig::new(StrategyType::MaCrossover, "MA Crossover (generated)")
                .with_param("short_window", short)
                .with_param("long_window", long);
            config.description = Some(description.to_string());
            return Ok(config);
        }

        if CLUSTER_KEYWORDS.iter().any(|k| lower.contains(k)) {
            let mut config = StrategyConfig::new(
                StrategyType::MaClusterDensity,
                "MA Cluster Density (generated)",
            )
            .with_list_param("ma_windows", vec![5.0, 10.0, 20.0, 30.0, 50.0])
            .with_param("cluster_tolerance", 0.02);
            config.description = Some(description.to_string());
            return Ok(config);
        }

        Err(Error::validation(format!(
            "no known strategy matches description: {description}"
        )))
    }
}
