//! Star detail API handler

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use polars::prelude::{ChunkCompareEq, DataFrame, DataType};
use serde::Serialize;

use sweetercat::astro::{HzModel, habitable_zone};
use sweetercat::catalog::{STAR, load::STAR_PLOT_COLUMNS};

use crate::AppState;
use crate::error::{Result, ServerError};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/star/{name}", get(star_detail))
}

/// One planet row of the merged table, as shown on the detail page.
#[derive(Serialize)]
pub struct PlanetSummary {
    pub name: Option<String>,
    pub mass: Option<f64>,
    pub radius: Option<f64>,
    pub period: Option<f64>,
    pub sma: Option<f64>,
    pub discovered: Option<f64>,
}

#[derive(Serialize)]
pub struct StarDetail {
    pub name: String,
    /// Non-null stellar parameters, keyed by catalog column name.
    pub parameters: BTreeMap<String, f64>,
    /// Habitable-zone inner edge (runaway greenhouse), AU.
    pub hz1: Option<f64>,
    /// Habitable-zone outer edge (maximum greenhouse), AU.
    pub hz2: Option<f64>,
    pub planets: Vec<PlanetSummary>,
}

/// GET /api/v1/star/{name} - stellar parameters and known planets
async fn star_detail(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<StarDetail>> {
    let snapshot = state.provider.merged()?;

    let mask = snapshot
        .df
        .column(STAR)?
        .as_materialized_series()
        .str()?
        .equal(name.as_str());
    let rows = snapshot.df.filter(&mask)?;

    if rows.height() == 0 {
        return Err(ServerError::NotFound(name));
    }

    let mut parameters = BTreeMap::new();
    for column in STAR_PLOT_COLUMNS {
        if let Some(value) = float_at(&rows, column, 0) {
            parameters.insert(column.to_string(), value);
        }
    }

    let lum = parameters.get("lum").copied();
    let teff = parameters.get("teff").copied();
    let (hz1, hz2) = match (teff, lum) {
        (Some(teff), Some(lum)) => (
            habitable_zone(teff, lum, HzModel::RunawayGreenhouse),
            habitable_zone(teff, lum, HzModel::MaximumGreenhouse),
        ),
        _ => (None, None),
    };

    let planets = (0..rows.height())
        .map(|i| PlanetSummary {
            name: string_at(&rows, "plName", i),
            mass: float_at(&rows, "plMass", i),
            radius: float_at(&rows, "plRadius", i),
            period: float_at(&rows, "period", i),
            sma: float_at(&rows, "sma", i),
            discovered: float_at(&rows, "discovered", i),
        })
        .collect();

    Ok(Json(StarDetail {
        name,
        parameters,
        hz1,
        hz2,
        planets,
    }))
}

fn float_at(df: &DataFrame, name: &str, row: usize) -> Option<f64> {
    df.column(name)
        .ok()?
        .as_materialized_series()
        .cast(&DataType::Float64)
        .ok()?
        .f64()
        .ok()?
        .get(row)
}

fn string_at(df: &DataFrame, name: &str, row: usize) -> Option<String> {
    df.column(name)
        .ok()?
        .as_materialized_series()
        .str()
        .ok()?
        .get(row)
        .map(String::from)
}
