//! Market data types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One OHLCV price observation
///
/// Immutable once constructed; bar sequences are ordered by timestamp
/// with unique timestamps (see [`super::validate_bars`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar open time
    pub timestamp: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

/// Bar timeframe
///
/// Drives the annualization factor used in performance metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl Timeframe {
    /// Number of bars of this timeframe in one year
    pub fn periods_per_year(&self) -> f64 {
        match self {
            Timeframe::OneMinute => 525_600.0,
            Timeframe::FiveMinutes => 105_120.0,
            Timeframe::FifteenMinutes => 35_040.0,
            Timeframe::OneHour => 8_760.0,
            Timeframe::FourHours => 2_190.0,
            Timeframe::OneDay => 365.0,
        }
    }

    /// Parse a timeframe label such as `"1h"` or `"1d"`
    pub fn parse(label: &str) -> Result<Self> {
        match label {
            "1m" => Ok(Timeframe::OneMinute),
            "5m" => Ok(Timeframe::FiveMinutes),
            "15m" => Ok(Timeframe::FifteenMinutes),
            "1h" => Ok(Timeframe::OneHour),
            "4h" => Ok(Timeframe::FourHours),
            "1d" => Ok(Timeframe::OneDay),
            other => Err(Error::config(format!("unknown timeframe: {other}"))),
        }
    }

    /// Label form, inverse of [`Timeframe::parse`]
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::OneMinute => "1m",
            Timeframe::FiveMinutes => "5m",
            Timeframe::FifteenMinutes => "15m",
            Timeframe::OneHour => "1h",
            Timeframe::FourHours => "4h",
            Timeframe::OneDay => "1d",
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::OneHour
    }
}
