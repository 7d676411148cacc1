//! Error types for the catalog and plot pipeline

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog frame error: {0}")]
    Frame(#[from] polars::error::PolarsError),

    #[error("catalog is missing required column '{0}'")]
    MissingColumn(String),
}

/// Errors from the plot-data pipeline proper.
///
/// User-recoverable conditions (bad column names, malformed limits,
/// log-scale on non-positive data) never surface here; they are handled by
/// [`SelectionError`], limit fallbacks, and scale downgrading respectively.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("plot frame error: {0}")]
    Frame(#[from] polars::error::PolarsError),

    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

/// Rejection signal for an invalid plot request.
///
/// The server answers these with a redirect back to the originating plot
/// endpoint rather than an error page.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("'{0}' is not a plottable column")]
    UnknownColumn(String),

    #[error("'{0}' is not a known color name")]
    UnknownColor(String),

    #[error("'{0}' is not a known axis scale")]
    UnknownScale(String),

    #[error("'{0}' is not a known checkbox value")]
    UnknownCheckbox(String),
}

/// A malformed bounding box handed to the point counter.
///
/// This is a caller bug rather than user input, so it is fatal to the call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoundsError {
    #[error("axis limits must hold exactly 2 values, got {0}")]
    InvalidLength(usize),
}

#[derive(Debug, Error, PartialEq)]
pub enum AstroError {
    #[error("only positive stellar masses allowed, got {0}")]
    NonPositiveMass(f64),

    #[error("only positive planetary masses allowed, got {0}")]
    NonPositivePlanetMass(f64),
}
