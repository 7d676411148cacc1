//! Axis-limit resolution and in-bounds point counting

use serde::{Deserialize, Serialize};

use crate::error::BoundsError;

/// The four axis-limit fields exactly as they arrive from the request:
/// free-form strings that may or may not parse as numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLimits {
    pub x1: String,
    pub x2: String,
    pub y1: String,
    pub y2: String,
}

impl RawLimits {
    pub fn new(
        x1: impl Into<String>,
        x2: impl Into<String>,
        y1: impl Into<String>,
        y2: impl Into<String>,
    ) -> Self {
        Self {
            x1: x1.into(),
            x2: x2.into(),
            y1: y1.into(),
            y2: y2.into(),
        }
    }
}

/// Resolve the raw limits against the data, slot by slot: anything that
/// does not parse as a number falls back to the corresponding series
/// extremum (x1 → min x, x2 → max x, y1 → min y, y2 → max y).
///
/// No ordering is imposed on each (low, high) pair; a reversed axis is a
/// valid user choice (e.g. temperature decreasing left to right). The
/// outputs are finite for non-empty series.
pub fn resolve_limits(raw: &RawLimits, x: &[f64], y: &[f64]) -> [f64; 4] {
    [
        parse_or(&raw.x1, || series_min(x)),
        parse_or(&raw.x2, || series_max(x)),
        parse_or(&raw.y1, || series_min(y)),
        parse_or(&raw.y2, || series_max(y)),
    ]
}

fn parse_or(value: &str, fallback: impl FnOnce() -> f64) -> f64 {
    value.trim().parse::<f64>().unwrap_or_else(|_| fallback())
}

fn series_min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn series_max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Count the (x, y) pairs strictly inside the rectangle spanned by the two
/// limit pairs. Each pair is canonicalized (sorted) first, so callers may
/// pass either order; boundary points are excluded.
///
/// A limit slice whose length is not 2 is a programming error and fails
/// with [`BoundsError::InvalidLength`].
pub fn count_in_bounds(
    x: &[f64],
    y: &[f64],
    x_limits: &[f64],
    y_limits: &[f64],
) -> Result<usize, BoundsError> {
    let (x_lo, x_hi) = ordered_pair(x_limits)?;
    let (y_lo, y_hi) = ordered_pair(y_limits)?;
    Ok(x.iter()
        .zip(y)
        .filter(|&(&xi, &yi)| x_lo < xi && xi < x_hi && y_lo < yi && yi < y_hi)
        .count())
}

fn ordered_pair(limits: &[f64]) -> Result<(f64, f64), BoundsError> {
    match limits {
        &[a, b] => Ok((a.min(b), a.max(b))),
        other => Err(BoundsError::InvalidLength(other.len())),
    }
}
