//! Adaptive marginal histograms

use serde::Serialize;

use super::Scale;

/// A binned histogram plus the padded render ceiling for the tallest bin.
///
/// `edges` always holds one more value than `counts`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Histogram {
    pub counts: Vec<u64>,
    pub edges: Vec<f64>,
    pub scaled_max: f64,
}

/// Default fallback interval for a log histogram over an empty series,
/// 10^0 .. 10^1.
const LOG_FALLBACK_DECADES: (f64, f64) = (0.0, 1.0);

/// Bin a data series with an adaptive bin count: one bin per 50 visible
/// points, floored at 5 so sparse plots still get a readable histogram.
///
/// Linear bins are equal-width over the data's own range (not the chosen
/// axis bounds); log bins are log-spaced between `log10(min)` and
/// `log10(max)`. Both scales produce `bins + 1` edges, so the edge/count
/// arrays stay length-paired regardless of scale. `scaled_max` is
/// `1.1 × max(count)`, the ceiling the renderer pads the bar range to.
pub fn scaled_histogram(data: &[f64], num_points: usize, scale: Scale) -> Histogram {
    let bins = (num_points / 50).max(5);

    let edges: Vec<f64> = match scale {
        Scale::Linear => {
            let (lo, hi) = linear_range(data);
            linspace(lo, hi, bins)
        }
        Scale::Log => {
            let span = match (series_min(data), series_max(data)) {
                (Some(min), Some(max)) => Some((min, max)),
                _ => None,
            };
            let (lo, hi) = span.map_or(LOG_FALLBACK_DECADES, |(min, max)| {
                (min.log10(), max.log10())
            });
            let mut edges: Vec<f64> = linspace(lo, hi, bins)
                .into_iter()
                .map(|e| 10f64.powf(e))
                .collect();
            // Exponentiating rounds the endpoints; snap them back onto the
            // data extrema so no boundary value falls outside the span.
            if let Some((min, max)) = span {
                edges[0] = min;
                let last = edges.len() - 1;
                edges[last] = max;
            }
            edges
        }
    };

    let counts = bin_counts(data, &edges, bins);
    let scaled_max = counts.iter().max().copied().unwrap_or(0) as f64 * 1.1;

    Histogram {
        counts,
        edges,
        scaled_max,
    }
}

/// Linear bin range: the data's min/max, widened by 0.5 on each side when
/// the series is constant, and 0..1 when it is empty.
fn linear_range(data: &[f64]) -> (f64, f64) {
    match (series_min(data), series_max(data)) {
        (Some(min), Some(max)) if min == max => (min - 0.5, max + 0.5),
        (Some(min), Some(max)) => (min, max),
        _ => (0.0, 1.0),
    }
}

/// `bins + 1` evenly spaced values from `lo` to `hi`, endpoints exact.
fn linspace(lo: f64, hi: f64, bins: usize) -> Vec<f64> {
    let step = (hi - lo) / bins as f64;
    (0..=bins)
        .map(|i| {
            if i == bins {
                hi
            } else {
                lo + step * i as f64
            }
        })
        .collect()
}

/// Count values per bin: half-open `[e_i, e_i+1)` intervals with the last
/// bin closed, values outside the edge span ignored.
fn bin_counts(data: &[f64], edges: &[f64], bins: usize) -> Vec<u64> {
    let mut counts = vec![0u64; bins];
    let (first, last) = (edges[0], edges[edges.len() - 1]);
    for &v in data {
        if v < first.min(last) || v > first.max(last) {
            continue;
        }
        let idx = if v == last {
            bins - 1
        } else {
            edges.partition_point(|&e| e <= v).saturating_sub(1).min(bins - 1)
        };
        counts[idx] += 1;
    }
    counts
}

fn series_min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

fn series_max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}
