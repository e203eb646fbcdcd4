//! Descriptive statistics over `f64` slices
//!
//! Callers pass only present observations; missing values are dropped before
//! they reach these functions. Every function returns `None` instead of a
//! substituted value when the statistic is undefined.

use shared::FiveNumberSummary;

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator), `None` below two values
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Ascending copy of the input
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Median of an ascending slice; midpoint of the two centre values for even length
pub fn median_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

pub fn median(values: &[f64]) -> Option<f64> {
    median_sorted(&sorted(values))
}

/// Linearly interpolated quantile of an ascending slice
///
/// Position `h = n * q - 0.5` (zero-based), clamped to the first and last
/// order statistics and interpolated between its neighbours. This is the
/// box-plot "linear" quartile rule; `q = 0.5` agrees with `median_sorted`.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let last = sorted.len() - 1;
    let h = sorted.len() as f64 * q - 0.5;
    if h <= 0.0 {
        return Some(sorted[0]);
    }
    if h >= last as f64 {
        return Some(sorted[last]);
    }

    let lower = h.floor() as usize;
    let fraction = h - lower as f64;
    if fraction == 0.0 {
        return Some(sorted[lower]);
    }
    Some(sorted[lower] + (sorted[lower + 1] - sorted[lower]) * fraction)
}

/// Min, quartiles, median and max; `None` for an empty slice
pub fn five_number_summary(values: &[f64]) -> Option<FiveNumberSummary> {
    let sorted = sorted(values);
    Some(FiveNumberSummary {
        min: *sorted.first()?,
        q1: quantile_sorted(&sorted, 0.25)?,
        median: median_sorted(&sorted)?,
        q3: quantile_sorted(&sorted, 0.75)?,
        max: *sorted.last()?,
    })
}

/// At least two observations that are not all identical
pub fn has_variance(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.len() >= 2 && values.iter().any(|v| v != first),
        None => false,
    }
}

/// Pearson correlation of paired observations
///
/// `None` with fewer than two pairs or when either side is constant.
/// The result is clamped to `[-1, 1]` to absorb rounding.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || !has_variance(xs) || !has_variance(ys) {
        return None;
    }

    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let r = sxy / (sxx.sqrt() * syy.sqrt());
    if r.is_finite() { Some(r.clamp(-1.0, 1.0)) } else { None }
}
