//! Plot API handlers
//!
//! GET serves a plot built from the page defaults; POST rebuilds it from a
//! submitted form. A form that fails validation redirects back to the page
//! instead of erroring, so a stale or hand-edited form never takes the
//! dashboard down.

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Serialize;
use tracing::warn;

use sweetercat::prelude::*;

use crate::AppState;
use crate::error::Result;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/plot", get(plot_catalog).post(plot_catalog_form))
        .route("/plot-exo", get(plot_exoplanets).post(plot_exoplanets_form))
}

/// Everything the plot page needs: the resolved spec plus the column
/// whitelist that populates the axis dropdowns.
#[derive(Serialize)]
pub struct PlotPageResponse {
    pub page: PlotPage,
    pub columns: Vec<String>,
    pub spec: PlotSpec,
}

/// GET /api/v1/plot - catalog plot with default selection
async fn plot_catalog(State(state): State<Arc<AppState>>) -> Result<Response> {
    let snapshot = state.provider.stars()?;
    let selection = PlotSelection::defaults(PlotPage::Catalog);
    respond(PlotPage::Catalog, &snapshot, &selection)
}

/// POST /api/v1/plot - catalog plot from a submitted form
async fn plot_catalog_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PlotForm>,
) -> Result<Response> {
    let snapshot = state.provider.stars()?;
    respond_form(PlotPage::Catalog, &snapshot, &form)
}

/// GET /api/v1/plot-exo - exoplanet plot with default selection
async fn plot_exoplanets(State(state): State<Arc<AppState>>) -> Result<Response> {
    let snapshot = state.provider.merged()?;
    let selection = PlotSelection::defaults(PlotPage::Exoplanets);
    respond(PlotPage::Exoplanets, &snapshot, &selection)
}

/// POST /api/v1/plot-exo - exoplanet plot from a submitted form
async fn plot_exoplanets_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PlotForm>,
) -> Result<Response> {
    let snapshot = state.provider.merged()?;
    respond_form(PlotPage::Exoplanets, &snapshot, &form)
}

fn respond_form(page: PlotPage, snapshot: &CatalogSnapshot, form: &PlotForm) -> Result<Response> {
    match PlotSelection::from_form(form, &snapshot.columns) {
        Ok(selection) => respond(page, snapshot, &selection),
        Err(e) => {
            warn!(error = %e, endpoint = page.endpoint(), "rejected plot form");
            Ok(Redirect::to(page.endpoint()).into_response())
        }
    }
}

fn respond(page: PlotPage, snapshot: &CatalogSnapshot, selection: &PlotSelection) -> Result<Response> {
    let spec = build_plot(snapshot, selection)?;
    Ok(Json(PlotPageResponse {
        page,
        columns: snapshot.columns.clone(),
        spec,
    })
    .into_response())
}
