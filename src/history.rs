use std::time::Duration;

use anyhow::Result;

use crate::hyperliquid::types::FundingHistoryEntry;
use crate::hyperliquid::InfoClient;

/// Seam over the funding-history query so the fetch loop can run against a
/// mock in tests.
pub trait FundingSource {
    fn funding_history(&self, coin: &str, start_time_ms: i64) -> Result<Vec<FundingHistoryEntry>>;
}

impl FundingSource for InfoClient {
    fn funding_history(&self, coin: &str, start_time_ms: i64) -> Result<Vec<FundingHistoryEntry>> {
        InfoClient::funding_history(self, coin, start_time_ms)
    }
}

/// Retrieves a token's full funding history in fixed-width backward chunks.
pub struct HistoryFetcher<'a, S: FundingSource> {
    source: &'a S,
    chunk_width_ms: i64,
    request_delay: Duration,
}

impl<'a, S: FundingSource> HistoryFetcher<'a, S> {
    pub fn new(source: &'a S, chunk_width_ms: i64, request_delay: Duration) -> Self {
        assert!(chunk_width_ms > 0, "chunk width must be > 0");
        Self {
            source,
            chunk_width_ms,
            request_delay,
        }
    }

    /// Probe from a fixed early epoch; the launch time is the minimum
    /// timestamp among the returned records. An empty result means the token
    /// has no known history.
    pub fn resolve_launch_time(&self, coin: &str, probe_epoch_ms: i64) -> Result<Option<i64>> {
        let records = self.source.funding_history(coin, probe_epoch_ms)?;
        let launch = records.iter().map(|r| r.time).min();
        match launch {
            Some(ms) => tracing::debug!(coin, launch_ms = ms, "resolved launch time"),
            None => tracing::debug!(coin, "no funding records at probe epoch"),
        }
        Ok(launch)
    }

    /// Walk backward from `now_ms` toward `launch_ms` in fixed windows, one
    /// request per window with `startTime` at the window's lower bound,
    /// pausing between successive requests. Records from overlapping windows
    /// are returned as-is; canonicalization is the caller's concern.
    ///
    /// The server's own page size is trusted to cover each window; if the
    /// true limit is a record count rather than a time span, densely-sampled
    /// periods could be short-read. Any request error aborts the fetch for
    /// this token.
    pub fn fetch_history(
        &self,
        coin: &str,
        launch_ms: i64,
        now_ms: i64,
    ) -> Result<Vec<FundingHistoryEntry>> {
        let mut records = Vec::new();
        let mut upper = now_ms;
        let mut chunks = 0usize;

        loop {
            let lower = upper - self.chunk_width_ms;
            let page = self.source.funding_history(coin, lower)?;
            records.extend(page);
            chunks += 1;

            if lower <= launch_ms {
                break;
            }
            upper = lower;
            if !self.request_delay.is_zero() {
                std::thread::sleep(self.request_delay);
            }
        }

        tracing::info!(coin, chunks, records = records.len(), "funding history fetched");
        Ok(records)
    }
}
