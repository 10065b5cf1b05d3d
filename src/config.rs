use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub hyperliquid: HyperliquidConfig,
    pub analysis: AnalysisConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HyperliquidConfig {
    pub base_url: String,
    /// Pause between successive chunk requests, in milliseconds.
    pub request_delay_ms: u64,
    /// Probe epoch for launch-time resolution, ms since epoch.
    /// Must predate the oldest possible token launch (2020-01-01T00:00:00Z).
    pub launch_probe_epoch_ms: i64,
}

impl Default for HyperliquidConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.hyperliquid.xyz".to_string(),
            request_delay_ms: 500,
            launch_probe_epoch_ms: 1_577_836_800_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Width of one backward fetch window, in hours.
    pub chunk_hours: i64,
    /// Sample count of the "recent" analysis window.
    pub recent_window: usize,
    /// High-rate threshold in percent units; comparison is strict `>`.
    pub high_rate_threshold_pct: f64,
    /// Autocorrelation is computed for lags 1..=N (one sample per hour assumed).
    pub autocorr_max_lag: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            chunk_hours: 500,
            recent_window: 500,
            high_rate_threshold_pct: 0.1,
            autocorr_max_lag: 24,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_dir: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: "output".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn chunk_width_ms(&self) -> i64 {
        self.chunk_hours * 3_600_000
    }

    /// Window label used in report file names, e.g. "last_500".
    pub fn recent_window_label(&self) -> String {
        format!("last_{}", self.recent_window)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_hours <= 0 {
            bail!("analysis.chunk_hours must be > 0");
        }
        if self.recent_window == 0 {
            bail!("analysis.recent_window must be > 0");
        }
        if self.high_rate_threshold_pct < 0.0 {
            bail!("analysis.high_rate_threshold_pct must be >= 0");
        }
        if self.autocorr_max_lag == 0 {
            bail!("analysis.autocorr_max_lag must be > 0");
        }
        Ok(())
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from(Path::new("config/default.toml"))
    }

    /// Missing config file falls back to built-in defaults so the tool runs
    /// with zero setup; a present but malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Config = if path.exists() {
            let config_str = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&config_str)
                .with_context(|| format!("failed to parse {}", path.display()))?
        } else {
            Config::default()
        };

        config.analysis.validate()?;
        if config.hyperliquid.base_url.trim().is_empty() {
            bail!("hyperliquid.base_url must not be empty");
        }
        Ok(config)
    }
}
