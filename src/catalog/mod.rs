//! Catalog snapshots, loading, and the cached provider

pub mod load;
pub mod provider;

use polars::prelude::DataFrame;

pub use provider::{CatalogProvider, FileCatalog};

/// Identifier column; unique, never null.
pub const STAR: &str = "Star";
/// Homogeneous-analysis marker column, boolean after loading.
pub const FLAG: &str = "flag";

/// An immutable view of a loaded catalog: the frame plus the whitelist of
/// column names a request may plot. Axis validation happens against
/// `columns`, never against the frame's full schema.
#[derive(Clone, Debug)]
pub struct CatalogSnapshot {
    pub df: DataFrame,
    pub columns: Vec<String>,
}

impl CatalogSnapshot {
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_plottable(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}
