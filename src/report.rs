use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::DateTime;

use crate::analysis::WindowStats;

/// How many high-rate events a report surfaces.
pub const TOP_EVENTS: usize = 10;

/// One report line: statistics are emitted as structured records and rendered
/// once, never re-parsed from display text.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRecord {
    pub section: String,
    pub metric: String,
    pub value: String,
}

impl StatRecord {
    fn new(section: &str, metric: &str, value: String) -> Self {
        Self {
            section: section.to_string(),
            metric: metric.to_string(),
            value,
        }
    }
}

/// Flatten one window's statistics into report records.
pub fn stat_records(stats: &WindowStats) -> Vec<StatRecord> {
    let mut records = Vec::new();
    let d = &stats.descriptive;

    records.push(StatRecord::new("descriptive", "count", d.count.to_string()));
    records.push(StatRecord::new("descriptive", "mean_pct", fmt_f64(d.mean)));
    records.push(StatRecord::new("descriptive", "median_pct", fmt_f64(d.median)));
    records.push(StatRecord::new("descriptive", "std_dev_pct", fmt_f64(d.std_dev)));
    records.push(StatRecord::new("descriptive", "max_pct", fmt_f64(d.max)));
    records.push(StatRecord::new("descriptive", "min_pct", fmt_f64(d.min)));
    records.push(StatRecord::new("descriptive", "positive_mean_pct", fmt_f64(d.positive_mean)));
    records.push(StatRecord::new("descriptive", "negative_mean_pct", fmt_f64(d.negative_mean)));
    records.push(StatRecord::new(
        "descriptive",
        "positive_share_pct",
        fmt_f64(d.positive_share * 100.0),
    ));

    let h = &stats.high_rate;
    records.push(StatRecord::new("high_rate", "count", h.count.to_string()));
    records.push(StatRecord::new("high_rate", "share_pct", fmt_f64(h.share_pct)));
    records.push(StatRecord::new("high_rate", "max_rate_pct", fmt_f64(h.max_rate_pct)));
    for (i, event) in h.top(TOP_EVENTS).iter().enumerate() {
        records.push(StatRecord::new(
            "high_rate",
            &format!("top_{}", i + 1),
            format!("{} @ {}", fmt_f64(event.rate_pct), fmt_time(event.time_ms)),
        ));
    }

    records.push(StatRecord::new(
        "persistence",
        "positive_mean_streak",
        fmt_f64(stats.positive_persistence),
    ));
    records.push(StatRecord::new(
        "persistence",
        "non_positive_mean_streak",
        fmt_f64(stats.negative_persistence),
    ));

    for (lag, r) in &stats.autocorrelation {
        records.push(StatRecord::new(
            "autocorrelation",
            &format!("lag_{}", lag),
            fmt_f64(*r),
        ));
    }

    records
}

/// One consolidated summary line: a token/window pair.
#[derive(Debug, Clone)]
pub struct SummaryRow {
    pub token: String,
    pub count: usize,
    pub mean_pct: f64,
    pub median_pct: f64,
    pub std_dev_pct: f64,
    pub max_pct: f64,
    pub min_pct: f64,
    pub positive_mean_pct: f64,
    pub negative_mean_pct: f64,
    pub positive_share_pct: f64,
    pub high_rate_count: usize,
    pub high_rate_share_pct: f64,
    pub high_rate_max_pct: f64,
    pub positive_persistence: f64,
    pub negative_persistence: f64,
}

impl SummaryRow {
    pub fn from_stats(token: &str, stats: &WindowStats) -> Self {
        let d = &stats.descriptive;
        let h = &stats.high_rate;
        Self {
            token: token.to_string(),
            count: d.count,
            mean_pct: d.mean,
            median_pct: d.median,
            std_dev_pct: d.std_dev,
            max_pct: d.max,
            min_pct: d.min,
            positive_mean_pct: d.positive_mean,
            negative_mean_pct: d.negative_mean,
            positive_share_pct: d.positive_share * 100.0,
            high_rate_count: h.count,
            high_rate_share_pct: h.share_pct,
            high_rate_max_pct: h.max_rate_pct,
            positive_persistence: stats.positive_persistence,
            negative_persistence: stats.negative_persistence,
        }
    }

    pub fn csv_header() -> &'static str {
        "token,count,mean_pct,median_pct,std_dev_pct,max_pct,min_pct,\
         positive_mean_pct,negative_mean_pct,positive_share_pct,\
         high_rate_count,high_rate_share_pct,high_rate_max_pct,\
         positive_persistence,negative_persistence"
    }

    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            csv_escape(&self.token),
            self.count,
            fmt_f64(self.mean_pct),
            fmt_f64(self.median_pct),
            fmt_f64(self.std_dev_pct),
            fmt_f64(self.max_pct),
            fmt_f64(self.min_pct),
            fmt_f64(self.positive_mean_pct),
            fmt_f64(self.negative_mean_pct),
            fmt_f64(self.positive_share_pct),
            self.high_rate_count,
            fmt_f64(self.high_rate_share_pct),
            fmt_f64(self.high_rate_max_pct),
            fmt_f64(self.positive_persistence),
            fmt_f64(self.negative_persistence),
        )
    }
}

/// `{token_lowercase}_{window}_terminal_stats.csv`
pub fn terminal_stats_path(out_dir: &Path, token: &str, window_label: &str) -> PathBuf {
    out_dir.join(format!(
        "{}_{}_terminal_stats.csv",
        token.to_lowercase(),
        window_label
    ))
}

/// `all_tokens_{window}_stats.csv`
pub fn consolidated_path(out_dir: &Path, window_label: &str) -> PathBuf {
    out_dir.join(format!("all_tokens_{}_stats.csv", window_label))
}

/// `{token_lowercase}_detailed_analysis.png`
pub fn plot_path(out_dir: &Path, token: &str) -> PathBuf {
    out_dir.join(format!("{}_detailed_analysis.png", token.to_lowercase()))
}

pub fn write_stat_records_csv(path: &Path, records: &[StatRecord]) -> Result<()> {
    let mut out = String::from("section,metric,value\n");
    for record in records {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_escape(&record.section),
            csv_escape(&record.metric),
            csv_escape(&record.value)
        ));
    }
    write_file(path, &out)
}

pub fn write_summary_csv(path: &Path, rows: &[SummaryRow]) -> Result<()> {
    let mut out = String::from(SummaryRow::csv_header());
    out.push('\n');
    for row in rows {
        out.push_str(&row.to_csv_line());
        out.push('\n');
    }
    write_file(path, &out)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn fmt_f64(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.6}", value)
    }
}

fn fmt_time(time_ms: i64) -> String {
    DateTime::from_timestamp_millis(time_ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| time_ms.to_string())
}

/// Quote a CSV field if it contains a delimiter, quote, or newline.
pub fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_naming_scheme() {
        let dir = Path::new("output");
        assert_eq!(
            terminal_stats_path(dir, "BTC", "full_history"),
            Path::new("output/btc_full_history_terminal_stats.csv")
        );
        assert_eq!(
            terminal_stats_path(dir, "kPEPE", "last_500"),
            Path::new("output/kpepe_last_500_terminal_stats.csv")
        );
        assert_eq!(
            consolidated_path(dir, "full_history"),
            Path::new("output/all_tokens_full_history_stats.csv")
        );
        assert_eq!(
            plot_path(dir, "ETH"),
            Path::new("output/eth_detailed_analysis.png")
        );
    }

    #[test]
    fn csv_escape_quotes_delimiters() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn nan_renders_as_literal() {
        assert_eq!(fmt_f64(f64::NAN), "NaN");
        assert_eq!(fmt_f64(0.5), "0.500000");
    }
}
