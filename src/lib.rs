//! SWEETer-Cat core library
//!
//! The catalog data model (SWEET-Cat stellar parameters, optionally merged
//! with the exoplanet.eu table) and the plot-data pipeline that turns a
//! request's axis/scale/limit parameters into a fully resolved, serializable
//! plot specification. Web routing and chart rendering live in the
//! `sweetercat-server` crate; everything here is synchronous and pure with
//! respect to a passed-in catalog snapshot.

pub mod astro;
pub mod catalog;
pub mod error;
pub mod plot;

pub mod prelude {
    pub use crate::catalog::{CatalogProvider, CatalogSnapshot, FileCatalog};
    pub use crate::error::{BoundsError, CatalogError, PlotError, SelectionError};
    pub use crate::plot::{
        AxisSeries, ColorSpec, Histogram, NamedColor, PlotForm, PlotPage, PlotSelection, PlotSpec,
        Scale, build_plot,
    };
}
