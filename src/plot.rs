use std::path::Path;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use plotters::prelude::*;

use crate::analysis::descriptive::percentile;
use crate::analysis::WindowStats;
use crate::model::FundingSample;

const HIST_BINS: usize = 40;

/// Render the per-token analysis chart: rate series with high-rate events
/// highlighted plus a rate histogram with median/p90 markers, for the full
/// history (top row) and the recent window (bottom row).
pub fn render_detailed_analysis(
    path: &Path,
    token: &str,
    full_window: &[FundingSample],
    full_stats: &WindowStats,
    recent_window: &[FundingSample],
    recent_stats: &WindowStats,
) -> Result<()> {
    let root = BitMapBackend::new(path, (1280, 960)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| anyhow!("plot error: {}", e))?;
    let areas = root.split_evenly((2, 2));

    draw_rate_series(
        &areas[0],
        &format!("{} funding rate ({})", token, full_stats.label),
        full_window,
        full_stats,
    )?;
    draw_histogram(
        &areas[1],
        &format!("{} rate histogram ({})", token, full_stats.label),
        full_window,
    )?;
    draw_rate_series(
        &areas[2],
        &format!("{} funding rate ({})", token, recent_stats.label),
        recent_window,
        recent_stats,
    )?;
    draw_histogram(
        &areas[3],
        &format!("{} rate histogram ({})", token, recent_stats.label),
        recent_window,
    )?;

    root.present().map_err(|e| anyhow!("plot error: {}", e))?;
    tracing::debug!(token, path = %path.display(), "chart written");
    Ok(())
}

fn draw_rate_series(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    title: &str,
    window: &[FundingSample],
    stats: &WindowStats,
) -> Result<()> {
    if window.len() < 2 {
        return Ok(());
    }

    let to_dt = |ms: i64| DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or_default();
    let x_range = to_dt(window[0].time_ms)..to_dt(window[window.len() - 1].time_ms);
    let (y_min, y_max) = padded_range(
        window.iter().map(|s| s.rate_pct()).fold(f64::INFINITY, f64::min),
        window.iter().map(|s| s.rate_pct()).fold(f64::NEG_INFINITY, f64::max),
    );

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_min..y_max)
        .map_err(|e| anyhow!("plot error: {}", e))?;
    chart
        .configure_mesh()
        .y_desc("rate %")
        .x_labels(6)
        .draw()
        .map_err(|e| anyhow!("plot error: {}", e))?;

    chart
        .draw_series(LineSeries::new(
            window.iter().map(|s| (to_dt(s.time_ms), s.rate_pct())),
            &BLUE,
        ))
        .map_err(|e| anyhow!("plot error: {}", e))?;

    chart
        .draw_series(
            stats
                .high_rate
                .events
                .iter()
                .map(|e| Circle::new((to_dt(e.time_ms), e.rate_pct), 3, RED.filled())),
        )
        .map_err(|e| anyhow!("plot error: {}", e))?;

    Ok(())
}

fn draw_histogram(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    title: &str,
    window: &[FundingSample],
) -> Result<()> {
    if window.is_empty() {
        return Ok(());
    }

    let rates: Vec<f64> = window.iter().map(|s| s.rate_pct()).collect();
    let (lo, hi) = padded_range(
        rates.iter().copied().fold(f64::INFINITY, f64::min),
        rates.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    );
    let bin_width = (hi - lo) / HIST_BINS as f64;

    let mut counts = vec![0usize; HIST_BINS];
    for &rate in &rates {
        let idx = (((rate - lo) / bin_width) as usize).min(HIST_BINS - 1);
        counts[idx] += 1;
    }
    let y_max = counts.iter().copied().max().unwrap_or(1).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(lo..hi, 0.0..y_max)
        .map_err(|e| anyhow!("plot error: {}", e))?;
    chart
        .configure_mesh()
        .x_desc("rate %")
        .y_desc("samples")
        .draw()
        .map_err(|e| anyhow!("plot error: {}", e))?;

    chart
        .draw_series(counts.iter().enumerate().map(|(i, &count)| {
            let x0 = lo + i as f64 * bin_width;
            let x1 = x0 + bin_width;
            Rectangle::new([(x0, 0.0), (x1, count as f64)], BLUE.mix(0.5).filled())
        }))
        .map_err(|e| anyhow!("plot error: {}", e))?;

    // Percentile markers: median and 90th.
    for (q, color) in [(0.5, &GREEN), (0.9, &RED)] {
        let x = percentile(&rates, q);
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x, 0.0), (x, y_max)],
                color.stroke_width(2),
            )))
            .map_err(|e| anyhow!("plot error: {}", e))?;
    }

    Ok(())
}

/// Widen a degenerate [min, max] range so plotters always gets a non-empty
/// axis span.
fn padded_range(min: f64, max: f64) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        return (-1.0, 1.0);
    }
    if (max - min).abs() < 1e-9 {
        (min - 1e-3, max + 1e-3)
    } else {
        let pad = (max - min) * 0.05;
        (min - pad, max + pad)
    }
}
