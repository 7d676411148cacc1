//! HTTP API handlers

pub mod plot;
pub mod portal;
pub mod star;
pub mod table;

use std::sync::Arc;

use axum::Router;

use crate::AppState;

/// Build the combined JSON API router, mounted under `/api/v1`
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(plot::router())
        .merge(star::router())
        .merge(table::router())
}
