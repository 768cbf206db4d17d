use anyhow::{Result, bail};

/// Descriptive summary of one measurement series.
/// Invariant: lower_quartile <= median <= upper_quartile and
/// iqr = upper_quartile - lower_quartile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesSummary {
    pub median: f64,
    pub lower_quartile: f64,
    pub upper_quartile: f64,
    pub iqr: f64,
}

/// Percentile with linear interpolation between closest ranks, the default
/// rule of the common statistics libraries: rank = p/100 * (n - 1), then
/// interpolate between the neighbouring sorted values.
///
/// `sorted` must be ascending and non-empty; `p` in 0..=100.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Median and quartiles of a series. Sorts a copy; the caller's values are
/// left untouched, so the result is independent of input order.
pub fn summarize(values: &[f64]) -> Result<SeriesSummary> {
    if values.is_empty() {
        bail!("cannot summarize an empty series");
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let median = percentile(&sorted, 50.0);
    let lower_quartile = percentile(&sorted, 25.0);
    let upper_quartile = percentile(&sorted, 75.0);
    Ok(SeriesSummary {
        median,
        lower_quartile,
        upper_quartile,
        iqr: upper_quartile - lower_quartile,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn quartiles_interpolate_linearly() {
        // ranks for n=4: lq at 0.75, median at 1.5, uq at 2.25
        let s = summarize(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!(close(s.lower_quartile, 1.75));
        assert!(close(s.median, 2.5));
        assert!(close(s.upper_quartile, 3.25));
        assert!(close(s.iqr, 1.5));
    }

    #[test]
    fn quartiles_are_ordered_with_nonnegative_iqr() {
        let s = summarize(&[9.0, 1.0, 4.0, 4.0, 7.0, 2.0, 8.0]).unwrap();
        assert!(s.lower_quartile <= s.median);
        assert!(s.median <= s.upper_quartile);
        assert!(s.iqr >= 0.0);
        assert!(close(s.iqr, s.upper_quartile - s.lower_quartile));
    }

    #[test]
    fn summary_is_order_independent() {
        let forward = summarize(&[5.0, 1.0, 3.0, 2.0, 4.0]).unwrap();
        let reversed = summarize(&[4.0, 2.0, 3.0, 1.0, 5.0]).unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn summary_scales_with_positive_constant() {
        let base = [1.0, 2.0, 5.0, 9.0, 12.0];
        let scaled: Vec<f64> = base.iter().map(|v| v * 3.0).collect();
        let a = summarize(&base).unwrap();
        let b = summarize(&scaled).unwrap();
        assert!(close(b.median, a.median * 3.0));
        assert!(close(b.lower_quartile, a.lower_quartile * 3.0));
        assert!(close(b.upper_quartile, a.upper_quartile * 3.0));
        assert!(close(b.iqr, a.iqr * 3.0));
    }

    #[test]
    fn single_value_collapses_all_quartiles() {
        let s = summarize(&[42.0]).unwrap();
        assert_eq!(s.median, 42.0);
        assert_eq!(s.lower_quartile, 42.0);
        assert_eq!(s.upper_quartile, 42.0);
        assert_eq!(s.iqr, 0.0);
    }

    #[test]
    fn empty_series_is_an_error() {
        assert!(summarize(&[]).is_err());
    }

    #[test]
    fn summarize_does_not_mutate_input() {
        let values = vec![3.0, 1.0, 2.0];
        summarize(&values).unwrap();
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }
}
