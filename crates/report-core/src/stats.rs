//! Numeric statistics over in-memory series.
//!
//! Everything operates on plain `&[f64]` slices; callers collect the column
//! they care about and pass it in. Degenerate inputs (empty series, zero
//! variance) yield `None` or `0.0` rather than NaN so the report never
//! prints non-numeric values.

/// Arithmetic mean. `None` on an empty series.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Arithmetic mean with a `0.0` fallback for empty series.
pub fn mean_or_zero(values: &[f64]) -> f64 {
    mean(values).unwrap_or(0.0)
}

/// Sample standard deviation (n - 1 denominator). `None` for fewer than two
/// observations.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Median. `None` on an empty series.
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, 0.5)
}

/// Linearly interpolated quantile over an already-sorted series.
///
/// `q` is a fraction in `[0, 1]`; `q = 0.5` is the median. `None` on an
/// empty series.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Pearson correlation coefficient between two paired series.
///
/// Returns `0.0` when fewer than two pairs are available or when either
/// series has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }
    let mx = xs[..n].iter().sum::<f64>() / n as f64;
    let my = ys[..n].iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = xs[i] - mx;
        let dy = ys[i] - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    cov / denom
}

/// Round to a fixed number of decimal digits.
///
/// # Examples
///
/// ```
/// use report_core::stats::round_to;
///
/// assert_eq!(round_to(2.675, 2), 2.68);
/// assert_eq!(round_to(66.66666, 1), 66.7);
/// assert_eq!(round_to(5.0, 2), 5.0);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    // Nudge by half an ULP at the target precision so exact midpoints stored
    // just below their decimal value still round up.
    let epsilon = f64::EPSILON * value.abs() * factor;
    ((value * factor) + epsilon.copysign(value)).round() / factor
}

// ── DescriptiveStats ──────────────────────────────────────────────────────────

/// Summary statistics for one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Compute the eight-number summary of a series. `None` on an empty series.
pub fn describe(values: &[f64]) -> Option<DescriptiveStats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    Some(DescriptiveStats {
        count: sorted.len(),
        mean: mean(&sorted)?,
        std: std_dev(&sorted).unwrap_or(0.0),
        min: sorted[0],
        q25: quantile_sorted(&sorted, 0.25)?,
        median: quantile_sorted(&sorted, 0.5)?,
        q75: quantile_sorted(&sorted, 0.75)?,
        max: sorted[sorted.len() - 1],
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── mean / std_dev ────────────────────────────────────────────────────────

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean_or_zero(&[]), 0.0);
    }

    #[test]
    fn test_std_dev_sample() {
        // Sample std of [2, 4, 4, 4, 5, 5, 7, 9] is ~2.138.
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let std = std_dev(&values).unwrap();
        assert!((std - 2.13809).abs() < 1e-4);
    }

    #[test]
    fn test_std_dev_needs_two_points() {
        assert_eq!(std_dev(&[]), None);
        assert_eq!(std_dev(&[5.0]), None);
    }

    // ── median / quantile ─────────────────────────────────────────────────────

    #[test]
    fn test_median_odd_count() {
        assert_eq!(median(&[100.0, 300.0, 200.0]), Some(200.0));
    }

    #[test]
    fn test_median_even_count_interpolates() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
    }

    #[test]
    fn test_median_empty() {
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_quantile_endpoints() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile_sorted(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&sorted, 1.0), Some(5.0));
    }

    #[test]
    fn test_quantile_interpolated() {
        // 25% of [1..4] sits a quarter of the way between 1 and 2.
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&sorted, 0.25), Some(1.75));
    }

    // ── pearson ───────────────────────────────────────────────────────────────

    #[test]
    fn test_pearson_perfect_positive() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        assert!((pearson(&xs, &ys) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [6.0, 4.0, 2.0];
        assert!((pearson(&xs, &ys) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_zero_variance_is_zero() {
        let xs = [3.0, 3.0, 3.0];
        let ys = [1.0, 2.0, 3.0];
        assert_eq!(pearson(&xs, &ys), 0.0);
    }

    #[test]
    fn test_pearson_too_few_pairs() {
        assert_eq!(pearson(&[1.0], &[2.0]), 0.0);
        assert_eq!(pearson(&[], &[]), 0.0);
    }

    #[test]
    fn test_pearson_self_correlation_is_one() {
        let xs = [1.0, 5.0, 2.0, 8.0];
        assert!((pearson(&xs, &xs) - 1.0).abs() < 1e-12);
    }

    // ── round_to ──────────────────────────────────────────────────────────────

    #[test]
    fn test_round_to_two_decimals() {
        assert_eq!(round_to(12345.6789, 2), 12345.68);
    }

    #[test]
    fn test_round_to_one_decimal() {
        assert_eq!(round_to(66.66666, 1), 66.7);
    }

    #[test]
    fn test_round_to_negative() {
        assert_eq!(round_to(-2.675, 2), -2.68);
    }

    // ── describe ──────────────────────────────────────────────────────────────

    #[test]
    fn test_describe_basic() {
        let stats = describe(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.count, 5);
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q25, 2.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q75, 4.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_describe_empty() {
        assert_eq!(describe(&[]), None);
    }

    #[test]
    fn test_describe_single_value() {
        let stats = describe(&[7.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 7.0);
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.min, 7.0);
        assert_eq!(stats.max, 7.0);
    }
}
