//! Error types for the server

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use sweetercat::error::{CatalogError, PlotError};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Star not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Plot error: {0}")]
    Plot(#[from] PlotError),

    #[error("Dataframe error: {0}")]
    Frame(#[from] polars::error::PolarsError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Catalog(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ServerError::Plot(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ServerError::Frame(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ServerError::Serialization(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
