use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use funding_stats::analysis::{analyze_window, WindowStats};
use funding_stats::config::Config;
use funding_stats::history::HistoryFetcher;
use funding_stats::hyperliquid::InfoClient;
use funding_stats::model::TokenSeries;
use funding_stats::report;

fn main() -> Result<()> {
    // Install rustls crypto provider (required by rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                config
                    .logging
                    .level
                    .parse()
                    .unwrap_or_else(|_| "info".parse().unwrap())
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        base_url = %config.hyperliquid.base_url,
        output_dir = %config.report.output_dir,
        "Starting funding-stats"
    );

    let client = InfoClient::new(&config.hyperliquid.base_url);

    // A failed universe query is an explicit empty result, not a fallback to
    // some default token.
    let tokens = match client.perp_universe() {
        Ok(tokens) => tokens,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "universe query failed");
            Vec::new()
        }
    };
    if tokens.is_empty() {
        tracing::warn!("no tokens to analyze; exiting");
        return Ok(());
    }
    tracing::info!(tokens = tokens.len(), "token universe fetched");

    let out_dir = Path::new(&config.report.output_dir).to_path_buf();
    std::fs::create_dir_all(&out_dir)?;

    let fetcher = HistoryFetcher::new(
        &client,
        config.analysis.chunk_width_ms(),
        Duration::from_millis(config.hyperliquid.request_delay_ms),
    );
    let recent_label = config.analysis.recent_window_label();

    let mut full_rows: Vec<report::SummaryRow> = Vec::new();
    let mut recent_rows: Vec<report::SummaryRow> = Vec::new();

    for token in &tokens {
        let token = token.as_str();
        match analyze_token(token, &fetcher, &config, &out_dir, &recent_label) {
            Ok(Some((full, recent))) => {
                full_rows.push(report::SummaryRow::from_stats(token, &full));
                recent_rows.push(report::SummaryRow::from_stats(token, &recent));
            }
            Ok(None) => {
                tracing::info!(token, "skipped: no analyzable history");
            }
            Err(e) => {
                tracing::error!(token, error = %format!("{:#}", e), "token analysis failed");
            }
        }
    }

    report::write_summary_csv(
        &report::consolidated_path(&out_dir, "full_history"),
        &full_rows,
    )?;
    report::write_summary_csv(&report::consolidated_path(&out_dir, &recent_label), &recent_rows)?;

    tracing::info!(
        analyzed = full_rows.len(),
        skipped = tokens.len() - full_rows.len(),
        "run complete"
    );
    Ok(())
}

/// Full pipeline for one token: launch resolution, chunked fetch,
/// canonicalization, per-window analysis, per-token reports. Transport
/// failures are logged here and reported as "no data" so the run continues
/// with the remaining tokens.
fn analyze_token(
    token: &str,
    fetcher: &HistoryFetcher<'_, InfoClient>,
    config: &Config,
    out_dir: &Path,
    recent_label: &str,
) -> Result<Option<(WindowStats, WindowStats)>> {
    let launch_ms =
        match fetcher.resolve_launch_time(token, config.hyperliquid.launch_probe_epoch_ms) {
            Ok(Some(ms)) => ms,
            Ok(None) => return Ok(None),
            Err(e) => {
                tracing::warn!(token, error = %format!("{:#}", e), "launch probe failed");
                return Ok(None);
            }
        };

    let now_ms = chrono::Utc::now().timestamp_millis();
    let raw = match fetcher.fetch_history(token, launch_ms, now_ms) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(token, error = %format!("{:#}", e), "history fetch aborted");
            return Ok(None);
        }
    };

    let series = TokenSeries::canonicalize(raw.into_iter().map(Into::into).collect());
    if series.is_empty() {
        return Ok(None);
    }
    tracing::info!(token, samples = series.len(), "series canonicalized");

    let full = analyze_window(
        "full_history",
        series.full_window(),
        config.analysis.high_rate_threshold_pct,
        config.analysis.autocorr_max_lag,
    );
    let recent = analyze_window(
        recent_label,
        series.recent_window(config.analysis.recent_window),
        config.analysis.high_rate_threshold_pct,
        config.analysis.autocorr_max_lag,
    );

    report::write_stat_records_csv(
        &report::terminal_stats_path(out_dir, token, &full.label),
        &report::stat_records(&full),
    )?;
    report::write_stat_records_csv(
        &report::terminal_stats_path(out_dir, token, &recent.label),
        &report::stat_records(&recent),
    )?;

    #[cfg(feature = "plot")]
    funding_stats::plot::render_detailed_analysis(
        &report::plot_path(out_dir, token),
        token,
        series.full_window(),
        &full,
        series.recent_window(config.analysis.recent_window),
        &recent,
    )?;

    Ok(Some((full, recent)))
}
