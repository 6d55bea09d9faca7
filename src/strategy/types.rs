//! Strategy types

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Trade action emitted by a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalAction {
    EnterLong,
    ExitLong,
    Hold,
}

/// A single strategy signal
///
/// Signals reference timestamps present in the bar sequence they were
/// generated from, in non-decreasing time order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub timestamp: DateTime<Utc>,
    pub action: SignalAction,
    /// Fraction of available capital to deploy, in (0, 1]
    pub size_fraction: Decimal,
}

/// Strategy type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    MaCrossover,
    MaClusterDensity,
}

/// A strategy parameter value
///
/// Parameters are a free-form name/value mapping at the transport
/// boundary; each strategy validates them into a typed struct at
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(f64),
    List(Vec<f64>),
}

impl ParamValue {
    /// Interpret as a scalar
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            ParamValue::Scalar(v) => Some(*v),
            ParamValue::List(_) => None,
        }
    }

    /// Interpret as a list
    pub fn as_list(&self) -> Option<&[f64]> {
        match self {
            ParamValue::Scalar(_) => None,
            ParamValue::List(v) => Some(v),
        }
    }
}

/// Strategy configuration
///
/// Owned by the caller and immutable once a backtest run starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub id: String,
    pub strategy_type: StrategyType,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: BTreeMap<String, ParamValue>,
}

impl StrategyConfig {
    /// Create a config with a freshly generated id
    pub fn new(strategy_type: StrategyType, name: impl Into<String>) -> Self {
        Self {
            id: format!("strategy_{}", Uuid::new_v4().simple()),
            strategy_type,
            name: name.into(),
            description: None,
            parameters: BTreeMap::new(),
        }
    }

    /// Set a scalar parameter
    pub fn with_param(mut self, key: impl Into<String>, value: f64) -> Self {
        self.parameters.insert(key.into(), ParamValue::Scalar(value));
        self
    }

    /// Set a list parameter
    pub fn with_list_param(mut self, key: impl Into<String>, values: Vec<f64>) -> Self {
        self.parameters.insert(key.into(), ParamValue::List(values));
        self
    }

    /// Fetch a required scalar parameter
    pub fn scalar(&self, key: &str) -> Result<f64> {
        self.parameters
            .get(key)
            .and_then(ParamValue::as_scalar)
            .ok_or_else(|| Error::config(format!("missing scalar parameter `{key}`")))
    }

    /// Fetch a scalar parameter with a default
    pub fn scalar_or(&self, key: &str, default: f64) -> Result<f64> {
        match self.parameters.get(key) {
            None => Ok(default),
            Some(v) => v
                .as_scalar()
                .ok_or_else(|| Error::config(format!("parameter `{key}` must be a scalar"))),
        }
    }

    /// Fetch a list parameter with a default
    pub fn list_or(&self, key: &str, default: &[f64]) -> Result<Vec<f64>> {
        match self.parameters.get(key) {
            None => Ok(default.to_vec()),
            Some(v) => v
                .as_list()
                .map(<[f64]>::to_vec)
                .ok_or_else(|| Error::config(format!("parameter `{key}` must be a list"))),
        }
    }

    /// Reject parameters outside the strategy's schema.
    ///
    /// Unknown keys fail at construction rather than being silently
    /// ignored at use.
    pub fn reject_unknown(&self, allowed: &[&str]) -> Result<()> {
        for key in self.parameters.keys() {
            if !allowed.contains(&key.as_str()) {
                return Err(Error::config(format!("unknown parameter `{key}`")));
            }
        }
        Ok(())
    }
}
