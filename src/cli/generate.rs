//! Generate command implementation

use clap::Args;

use crate::strategy::{Language, RuleBasedGenerator, StrategyGenerator};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Strategy description, e.g. "ma crossover 5 20"
    pub description: String,

    /// Description language: en or zh
    #[arg(long, default_value = "en")]
    pub language: String,
}

impl GenerateArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let language = match self.language.as_str() {
            "zh" => Language::Chinese,
            _ => Language::English,
        };
        let config = RuleBasedGenerator.generate(&self.description, language)?;
        println!("{}", serde_json::to_string_pretty(&config)?);
        Ok(())
    }
}
