//! Point coloring: fixed named colors and quantile-based bucketing

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SelectionError;

/// The 11-step viridis palette used for discrete bucket coloring.
pub const VIRIDIS11: [&str; 11] = [
    "#440154", "#482575", "#414287", "#35578C", "#2B748E", "#21908D", "#22A784", "#42BE71",
    "#79D151", "#BADE30", "#FDE724",
];

/// Fixed color choices offered for plots without a color-by axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamedColor {
    #[default]
    Blue,
    Orange,
    Green,
    Red,
    Purple,
}

impl NamedColor {
    pub const ALL: [NamedColor; 5] = [
        NamedColor::Blue,
        NamedColor::Orange,
        NamedColor::Green,
        NamedColor::Red,
        NamedColor::Purple,
    ];

    pub fn hex(self) -> &'static str {
        match self {
            NamedColor::Blue => "#1f77b4",
            NamedColor::Orange => "#ff7f0e",
            NamedColor::Green => "#2ca02c",
            NamedColor::Red => "#d62728",
            NamedColor::Purple => "#9467bd",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NamedColor::Blue => "Blue",
            NamedColor::Orange => "Orange",
            NamedColor::Green => "Green",
            NamedColor::Red => "Red",
            NamedColor::Purple => "Purple",
        }
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamedColor {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NamedColor::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| SelectionError::UnknownColor(s.to_string()))
    }
}

/// Quantile bucket assignment for a color-by series.
///
/// `edges` holds the de-duplicated quantile cut points (`buckets + 1`
/// values), `codes` the per-row bucket index, `colors` the palette hex per
/// row, and `bar_range` the raw (min, max) of the series for a continuous
/// color-bar legend next to the discrete point colors.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColorBuckets {
    pub edges: Vec<f64>,
    pub codes: Vec<usize>,
    pub colors: Vec<&'static str>,
    pub bar_range: (f64, f64),
}

impl ColorBuckets {
    pub fn bucket_count(&self) -> usize {
        self.edges.len().saturating_sub(1).max(1)
    }
}

/// Cut a series into at most `palette.len()` equal-population buckets.
///
/// Heavily tied data collapses duplicate quantile edges, so fewer buckets
/// than palette entries is a normal outcome, not an error; fully constant
/// data yields a single bucket. Each row's code indexes into the palette
/// spread across the surviving buckets.
pub fn quantile_buckets(z: &[f64], palette: &[&'static str]) -> ColorBuckets {
    if z.is_empty() || palette.is_empty() {
        return ColorBuckets {
            edges: Vec::new(),
            codes: Vec::new(),
            colors: Vec::new(),
            bar_range: (0.0, 0.0),
        };
    }

    let mut sorted = z.to_vec();
    sorted.sort_by(f64::total_cmp);
    let (z_min, z_max) = (sorted[0], sorted[sorted.len() - 1]);

    let k = palette.len();
    let mut edges: Vec<f64> = (0..=k)
        .map(|i| percentile(&sorted, i as f64 / k as f64))
        .collect();
    edges.dedup();
    if edges.len() == 1 {
        // Constant series: a single degenerate bucket.
        edges.push(edges[0]);
    }
    let buckets = edges.len() - 1;

    let codes: Vec<usize> = z.iter().map(|&v| bucket_code(&edges, buckets, v)).collect();
    let colors: Vec<&'static str> = codes
        .iter()
        .map(|&code| palette[palette_index(code, buckets, k)])
        .collect();

    ColorBuckets {
        edges,
        codes,
        colors,
        bar_range: (z_min, z_max),
    }
}

/// Linear-interpolated percentile over a sorted slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

/// Interval membership with qcut semantics: buckets are left-open,
/// right-closed, except the first bucket also contains the minimum.
fn bucket_code(edges: &[f64], buckets: usize, v: f64) -> usize {
    let uppers = &edges[1..];
    uppers
        .iter()
        .take(buckets)
        .filter(|&&upper| upper < v)
        .count()
        .min(buckets - 1)
}

/// Spread the surviving buckets across the full palette width.
fn palette_index(code: usize, buckets: usize, palette_len: usize) -> usize {
    if buckets <= 1 {
        0
    } else {
        code * (palette_len - 1) / (buckets - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_color_round_trip() {
        for color in NamedColor::ALL {
            assert_eq!(color.as_str().parse::<NamedColor>().unwrap(), color);
        }
        assert!("Cyan".parse::<NamedColor>().is_err());
    }

    #[test]
    fn distinct_values_fill_the_palette() {
        let z: Vec<f64> = (0..110).map(f64::from).collect();
        let b = quantile_buckets(&z, &VIRIDIS11);

        assert_eq!(b.bucket_count(), 11);
        assert_eq!(b.codes.len(), z.len());
        assert_eq!(b.bar_range, (0.0, 109.0));
        // Roughly equal-population buckets.
        for code in 0..11 {
            let population = b.codes.iter().filter(|&&c| c == code).count();
            assert!((9..=11).contains(&population), "bucket {code}: {population}");
        }
    }

    #[test]
    fn bucket_codes_are_monotone_in_value() {
        let z = [5.0, 1.0, 3.0, 9.0, 7.0, 2.0, 8.0, 4.0, 6.0, 0.0, 10.0];
        let b = quantile_buckets(&z, &VIRIDIS11);

        let mut pairs: Vec<(f64, usize)> = z.iter().copied().zip(b.codes.clone()).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in pairs.windows(2) {
            assert!(pair[0].1 <= pair[1].1);
        }
    }

    #[test]
    fn tied_data_collapses_duplicate_edges() {
        // Mostly one value: most quantile cut points coincide.
        let mut z = vec![1.0; 100];
        z.extend([2.0, 3.0]);
        let b = quantile_buckets(&z, &VIRIDIS11);

        assert!(b.bucket_count() < 11);
        assert_eq!(b.codes.len(), z.len());
        assert_eq!(b.bar_range, (1.0, 3.0));
    }

    #[test]
    fn constant_data_yields_a_single_bucket() {
        let z = [4.2; 25];
        let b = quantile_buckets(&z, &VIRIDIS11);

        assert_eq!(b.bucket_count(), 1);
        assert!(b.codes.iter().all(|&c| c == 0));
        assert!(b.colors.iter().all(|&c| c == VIRIDIS11[0]));
    }

    #[test]
    fn minimum_belongs_to_the_first_bucket() {
        let z = [1.0, 2.0, 3.0, 4.0];
        let b = quantile_buckets(&z, &VIRIDIS11);

        assert_eq!(b.codes[0], 0);
    }

    #[test]
    fn empty_series_produces_no_buckets() {
        let b = quantile_buckets(&[], &VIRIDIS11);
        assert!(b.codes.is_empty());
        assert!(b.colors.is_empty());
    }
}
