/// Pearson autocorrelation of a series against itself at lags 1..=max_lag,
/// using pairwise-complete observations. Lags with fewer than two pairs, or
/// with zero variance on either side, yield NaN.
pub fn autocorrelation(rates_pct: &[f64], max_lag: usize) -> Vec<(usize, f64)> {
    (1..=max_lag)
        .map(|lag| (lag, lagged_pearson(rates_pct, lag)))
        .collect()
}

fn lagged_pearson(values: &[f64], lag: usize) -> f64 {
    if values.len() <= lag {
        return f64::NAN;
    }
    let n = values.len() - lag;
    if n < 2 {
        return f64::NAN;
    }

    let xs = &values[..n];
    let ys = &values[lag..];
    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = xs[i] - mean_x;
        let dy = ys[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}
