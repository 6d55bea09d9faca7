//! Market data model
//!
//! OHLCV bars are the source of truth for every price-derived
//! computation in the crate.

mod types;

pub use types::{Bar, Timeframe};

use crate::error::{Error, Result};

/// Validate an ordered bar sequence.
///
/// Timestamps must be strictly increasing and OHLC must satisfy
/// `low <= {open, close} <= high`. Engines assume these invariants and
/// callers are expected to run this once per input series.
pub fn validate_bars(bars: &[Bar]) -> Result<()> {
    for (i, bar) in bars.iter().enumerate() {
        if bar.low > bar.open || bar.low > bar.close || bar.open > bar.high || bar.close > bar.high
        {
            return Err(Error::validation(format!(
                "bar {} at {}: OHLC out of order (o={} h={} l={} c={})",
                i, bar.timestamp, bar.open, bar.high, bar.low, bar.close
            )));
        }
        if i > 0 && bar.timestamp <= bars[i - 1].timestamp {
            return Err(Error::validation(format!(
                "bar {} at {}: timestamp not strictly increasing",
                i, bar.timestamp
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    fn bar(offset_hours: i64) -> Bar {
        Bar {
            timestamp: Utc::now() + Duration::hours(offset_hours),
            open: dec!(100),
            high: dec!(101),
            low: dec!(99),
            close: dec!(100),
            volume: dec!(1000),
        }
    }

    #[test]
    fn test_validate_bars_ok() {
        let bars: Vec<Bar> = (0..5).map(bar).collect();
        assert!(validate_bars(&bars).is_ok());
    }

    #[test]
    fn test_validate_bars_rejects_duplicate_timestamp() {
        let mut bars: Vec<Bar> = (0..3).map(bar).collect();
        bars[2].timestamp = bars[1].timestamp;
        assert!(validate_bars(&bars).is_err());
    }

    #[test]
    fn test_validate_bars_rejects_bad_ohlc() {
        let mut bars: Vec<Bar> = (0..2).map(bar).collect();
        bars[1].low = dec!(102); // low above close
        assert!(validate_bars(&bars).is_err());
    }

    #[test]
    fn test_validate_empty_is_ok() {
        assert!(validate_bars(&[]).is_ok());
    }
}
