use serde::{Deserialize, Serialize};

/// Deserialize Hyperliquid string-encoded numbers to f64.
pub fn string_to_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<f64>().map_err(serde::de::Error::custom)
}

/// Request body for POST /info.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InfoRequest {
    Meta,
    #[serde(rename_all = "camelCase")]
    FundingHistory {
        coin: String,
        start_time: i64,
    },
}

/// Perp metadata response (POST /info, type=meta).
#[derive(Debug, Deserialize)]
pub struct PerpMeta {
    pub universe: Vec<AssetMeta>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssetMeta {
    pub name: String,
    #[serde(default)]
    pub sz_decimals: u32,
    #[serde(default)]
    pub is_delisted: bool,
}

/// Funding history record (POST /info, type=fundingHistory).
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FundingHistoryEntry {
    pub coin: String,
    #[serde(deserialize_with = "string_to_f64")]
    pub funding_rate: f64,
    /// Milliseconds since epoch.
    pub time: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_meta_request() {
        let body = serde_json::to_value(InfoRequest::Meta).unwrap();
        assert_eq!(body, serde_json::json!({ "type": "meta" }));
    }

    #[test]
    fn serialize_funding_history_request() {
        let body = serde_json::to_value(InfoRequest::FundingHistory {
            coin: "ETH".to_string(),
            start_time: 1683849600000,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "type": "fundingHistory",
                "coin": "ETH",
                "startTime": 1683849600000i64
            })
        );
    }

    #[test]
    fn deserialize_perp_meta() {
        let json = r#"{
            "universe": [
                { "name": "BTC", "szDecimals": 5, "maxLeverage": 50 },
                { "name": "ETH", "szDecimals": 4, "maxLeverage": 50, "isDelisted": true }
            ]
        }"#;
        let meta: PerpMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.universe.len(), 2);
        assert_eq!(meta.universe[0].name, "BTC");
        assert!(!meta.universe[0].is_delisted);
        assert!(meta.universe[1].is_delisted);
    }

    #[test]
    fn deserialize_funding_history_entry() {
        let json = r#"{
            "coin": "BTC",
            "fundingRate": "0.0000125",
            "premium": "0.00012",
            "time": 1683849600000
        }"#;
        let entry: FundingHistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.coin, "BTC");
        assert!((entry.funding_rate - 0.0000125).abs() < 1e-12);
        assert_eq!(entry.time, 1683849600000);
    }

    #[test]
    fn funding_rate_must_be_numeric() {
        let json = r#"{ "coin": "BTC", "fundingRate": "abc", "time": 1 }"#;
        assert!(serde_json::from_str::<FundingHistoryEntry>(json).is_err());
    }
}
