//! Strategy configuration repository
//!
//! The engines never reach into the registry; it exists for the
//! orchestration layer that owns strategy lifecycles.

use std::collections::HashMap;
use std::sync::RwLock;

use super::StrategyConfig;
use crate::error::{Error, Result};

/// Read/write access to stored strategy configurations
pub trait StrategyRepository: Send + Sync {
    fn create(&self, config: StrategyConfig) -> Result<()>;
    fn get(&self, id: &str) -> Result<StrategyConfig>;
    fn list(&self) -> Vec<StrategyConfig>;
    fn delete(&self, id: &str) -> Result<()>;
}

/// In-memory repository
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    configs: RwLock<HashMap<String, StrategyConfig>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StrategyRepository for InMemoryRegistry {
    fn create(&self, config: StrategyConfig) -> Result<()> {
        let mut configs = self.configs.write().expect("registry lock poisoned");
        if configs.contains_key(&config.id) {
            return Err(Error::validation(format!(
                "strategy `{}` already exists",
                config.id
            )));
        }
        configs.insert(config.id.clone(), config);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<StrategyConfig> {
        self.configs
            .read()
            .expect("registry lock poisoned")
            .get(id)
            .cloned()
            .ok_or_else(|| Error::validation(format!("strategy `{id}` not found")))
    }

    fn list(&self) -> Vec<StrategyConfig> {
        let mut configs: Vec<StrategyConfig> = self
            .configs
            .read()
            .expect("registry lock poisoned")
            .values()
            .cloned()
            .collect();
        configs.sort_by(|a, b| a.id.cmp(&b.id));
        configs
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.configs
            .write()
            .expect("registry lock poisoned")
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::validation(format!("strategy `{id}` not found")))
    }
}
