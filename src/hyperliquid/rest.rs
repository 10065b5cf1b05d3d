use anyhow::{Context, Result};

use crate::error::AppError;

use super::types::{FundingHistoryEntry, InfoRequest, PerpMeta};

/// Blocking client for the Hyperliquid /info endpoint.
///
/// No client-side timeout is configured; transport limits are whatever the
/// underlying HTTP client defaults to.
pub struct InfoClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl InfoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn post_info<T: serde::de::DeserializeOwned>(&self, request: &InfoRequest) -> Result<T> {
        let url = format!("{}/info", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .context("info request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        resp.json().context("failed to decode info response")
    }

    /// Names of all listed perp tokens, delisted assets excluded.
    pub fn perp_universe(&self) -> Result<Vec<String>> {
        let meta: PerpMeta = self.post_info(&InfoRequest::Meta)?;
        let names: Vec<String> = meta
            .universe
            .into_iter()
            .filter(|asset| !asset.is_delisted)
            .map(|asset| asset.name)
            .collect();
        tracing::debug!(tokens = names.len(), "fetched perp universe");
        Ok(names)
    }

    /// One page of funding history for `coin` from `start_time_ms` onward.
    /// The server decides the page size.
    pub fn funding_history(
        &self,
        coin: &str,
        start_time_ms: i64,
    ) -> Result<Vec<FundingHistoryEntry>> {
        let records: Vec<FundingHistoryEntry> = self.post_info(&InfoRequest::FundingHistory {
            coin: coin.to_string(),
            start_time: start_time_ms,
        })?;
        tracing::debug!(coin, start_time_ms, records = records.len(), "funding history page");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let client = InfoClient::new("https://api.hyperliquid.xyz/");
        assert_eq!(client.base_url, "https://api.hyperliquid.xyz");
    }
}
