use crate::model::FundingSample;

/// A sample whose rate-as-percent exceeded the configured threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighRateEvent {
    pub time_ms: i64,
    pub rate_pct: f64,
}

#[derive(Debug, Clone, Default)]
pub struct HighRateSummary {
    /// All events, sorted descending by rate (stable for ties).
    pub events: Vec<HighRateEvent>,
    pub count: usize,
    /// Events as a percentage of the window, 0 for an empty window.
    pub share_pct: f64,
    /// Largest observed rate in percent, 0 when there are no events.
    pub max_rate_pct: f64,
}

impl HighRateSummary {
    /// The events surfaced in reports.
    pub fn top(&self, n: usize) -> &[HighRateEvent] {
        &self.events[..self.events.len().min(n)]
    }
}

/// Extract every sample with `rate_pct > threshold_pct` (strict comparison;
/// a sample exactly at the threshold does not count).
pub fn high_rate_events(window: &[FundingSample], threshold_pct: f64) -> HighRateSummary {
    let mut events: Vec<HighRateEvent> = window
        .iter()
        .filter(|s| s.rate_pct() > threshold_pct)
        .map(|s| HighRateEvent {
            time_ms: s.time_ms,
            rate_pct: s.rate_pct(),
        })
        .collect();
    events.sort_by(|a, b| b.rate_pct.total_cmp(&a.rate_pct));

    let count = events.len();
    let share_pct = if window.is_empty() {
        0.0
    } else {
        count as f64 / window.len() as f64 * 100.0
    };
    let max_rate_pct = events.first().map(|e| e.rate_pct).unwrap_or(0.0);

    HighRateSummary {
        events,
        count,
        share_pct,
        max_rate_pct,
    }
}
