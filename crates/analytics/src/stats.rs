//! Windowed statistics over plain `f64` slices.
//!
//! Every helper returns one output per input, with `None` wherever the
//! statistic is not yet defined, so results stay aligned with the price rows.

/// Simple returns: `values[i] / values[i - 1] - 1`. The first entry is `None`,
/// as is any entry whose previous value is zero.
pub fn simple_returns(values: &[f64]) -> Vec<Option<f64>> {
    let mut returns = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        if i == 0 {
            returns.push(None);
            continue;
        }

        let previous = values[i - 1];
        if previous != 0.0 {
            returns.push(Some(values[i] / previous - 1.0));
        } else {
            returns.push(None);
        }
    }

    returns
}

/// Trailing arithmetic mean over exactly `window` values.
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut means = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        if window == 0 || i + 1 < window {
            means.push(None);
            continue;
        }

        let sum: f64 = values[i + 1 - window..=i].iter().sum();
        means.push(Some(sum / window as f64));
    }

    means
}

/// Running maximum. Never decreases.
pub fn running_max(values: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    values
        .iter()
        .map(|&value| {
            if value > peak {
                peak = value;
            }
            peak
        })
        .collect()
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator). Needs at least two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let mean = mean(values)?;
    let variance = values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;

    Some(variance.sqrt())
}

/// Sample standard deviation over a trailing window of optional values.
///
/// A window containing any `None` yields `None`, so a leading undefined
/// return keeps the first `window` rows undefined.
pub fn rolling_sample_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut stds = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        if window == 0 || i + 1 < window {
            stds.push(None);
            continue;
        }

        let defined: Option<Vec<f64>> = values[i + 1 - window..=i].iter().copied().collect();
        stds.push(defined.and_then(|w| sample_std(&w)));
    }

    stds
}
