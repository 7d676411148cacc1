//! The interactive plot-data pipeline
//!
//! Turns a validated plot request plus a catalog snapshot into a fully
//! resolved [`PlotSpec`]: filtered rows, x/y/z series, axis bounds, sanity-
//! checked scales, marginal histograms and color buckets. The [`PlotSpec`]
//! is the whole contract with the rendering layer; nothing here touches HTML or
//! chart-library objects.

pub mod color;
pub mod extract;
pub mod histogram;
pub mod limits;
pub mod pipeline;
pub mod scale;

pub use color::{ColorBuckets, NamedColor, VIRIDIS11, quantile_buckets};
pub use extract::{Extracted, extract};
pub use histogram::{Histogram, scaled_histogram};
pub use limits::{RawLimits, count_in_bounds, resolve_limits};
pub use pipeline::{PlotForm, PlotPage, PlotSelection, PlotSpec, build_plot};
pub use scale::check_scale;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SelectionError;

/// Axis scale for plots and marginal histograms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

impl Scale {
    pub fn as_str(self) -> &'static str {
        match self {
            Scale::Linear => "linear",
            Scale::Log => "log",
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scale {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Scale::Linear),
            "log" => Ok(Scale::Log),
            other => Err(SelectionError::UnknownScale(other.to_string())),
        }
    }
}

/// A named numeric series extracted from the catalog, null-free.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisSeries {
    pub name: String,
    pub values: Vec<f64>,
}

impl AxisSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// How points are colored: a fixed named color, or discrete quantile
/// buckets over a third variable (plus the continuous color-bar range).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColorSpec {
    Fixed { name: NamedColor, hex: &'static str },
    Buckets(ColorBuckets),
}
