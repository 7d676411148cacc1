//! Portal page handlers
//!
//! Each page is a static shell; the data arrives from the JSON API under
//! `/api/v1`.

use axum::response::{Html, IntoResponse};

/// GET / - Catalog home page
pub async fn index() -> impl IntoResponse {
    Html(include_str!("../../static/index.html"))
}

/// GET /plot - Catalog plot page
pub async fn plot() -> impl IntoResponse {
    Html(include_str!("../../static/plot.html"))
}

/// GET /plot-exo - Exoplanet plot page
pub async fn plot_exo() -> impl IntoResponse {
    Html(include_str!("../../static/plot-exo.html"))
}

/// GET /star/{name} - Star detail page
pub async fn star() -> impl IntoResponse {
    Html(include_str!("../../static/star.html"))
}
