//! Axis scale sanity checking

use super::Scale;

/// Downgrade a requested log scale to linear when the data cannot support
/// it (any value ≤ 0), independently for each axis.
///
/// The third return is `Some(true)` when at least one axis was downgraded
/// and `None` otherwise; the caller uses it to surface a one-time notice to
/// the user, so the tri-state (never `Some(false)`) is deliberate. Empty
/// series are treated as having no non-positive values.
pub fn check_scale(
    x: &[f64],
    y: &[f64],
    x_scale: Scale,
    y_scale: Scale,
) -> (Scale, Scale, Option<bool>) {
    let mut downgraded = None;

    let x_scale = if x_scale == Scale::Log && has_non_positive(x) {
        downgraded = Some(true);
        Scale::Linear
    } else {
        x_scale
    };

    let y_scale = if y_scale == Scale::Log && has_non_positive(y) {
        downgraded = Some(true);
        Scale::Linear
    } else {
        y_scale
    };

    (x_scale, y_scale, downgraded)
}

fn has_non_positive(values: &[f64]) -> bool {
    values.iter().any(|&v| v <= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(lo: i32, hi: i32) -> Vec<f64> {
        (lo..hi).map(f64::from).collect()
    }

    #[test]
    fn log_with_zero_in_data_downgrades_both_axes() {
        let (xs, ys, err) = check_scale(&range(0, 5), &range(0, 5), Scale::Log, Scale::Log);
        assert_eq!(xs, Scale::Linear);
        assert_eq!(ys, Scale::Linear);
        assert_eq!(err, Some(true));
    }

    #[test]
    fn log_with_positive_data_is_kept() {
        let (xs, ys, err) = check_scale(&range(1, 5), &range(1, 5), Scale::Log, Scale::Log);
        assert_eq!(xs, Scale::Log);
        assert_eq!(ys, Scale::Log);
        assert_eq!(err, None);
    }

    #[test]
    fn linear_is_never_touched() {
        let (xs, ys, err) = check_scale(&range(1, 5), &range(1, 5), Scale::Linear, Scale::Linear);
        assert_eq!(xs, Scale::Linear);
        assert_eq!(ys, Scale::Linear);
        assert_eq!(err, None);
    }

    #[test]
    fn negative_data_downgrades_only_the_log_axis() {
        let (xs, ys, err) = check_scale(&range(-5, -1), &range(-5, -1), Scale::Linear, Scale::Log);
        assert_eq!(xs, Scale::Linear);
        assert_eq!(ys, Scale::Linear);
        assert_eq!(err, Some(true));
    }

    #[test]
    fn empty_series_do_not_downgrade() {
        let (xs, ys, err) = check_scale(&[], &[], Scale::Log, Scale::Log);
        assert_eq!(xs, Scale::Log);
        assert_eq!(ys, Scale::Log);
        assert_eq!(err, None);
    }
}
