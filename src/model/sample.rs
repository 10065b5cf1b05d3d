use crate::hyperliquid::types::FundingHistoryEntry;

/// One observed funding-rate event. `rate` is a fraction as reported by the
/// source; sign indicates the payment direction between longs and shorts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundingSample {
    pub time_ms: i64,
    pub rate: f64,
}

impl FundingSample {
    pub fn new(time_ms: i64, rate: f64) -> Self {
        Self { time_ms, rate }
    }

    /// Rate as a percentage (fraction * 100), the unit used for display and
    /// threshold comparisons.
    pub fn rate_pct(&self) -> f64 {
        self.rate * 100.0
    }
}

impl From<FundingHistoryEntry> for FundingSample {
    fn from(entry: FundingHistoryEntry) -> Self {
        Self {
            time_ms: entry.time,
            rate: entry.funding_rate,
        }
    }
}
