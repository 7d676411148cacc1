//! Catalog table and download handlers

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use polars::prelude::{AnyValue, CsvWriter, DataFrame, SerWriter};
use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::AppState;
use crate::error::{Result, ServerError};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/catalog", get(catalog_records))
        .route("/download", get(download))
}

/// GET /api/v1/catalog - the full SWEET-Cat table as JSON records
async fn catalog_records(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Value>>> {
    let snapshot = state.provider.stars()?;
    Ok(Json(frame_to_records(&snapshot.df)?))
}

#[derive(Deserialize)]
struct DownloadQuery {
    fmt: String,
}

/// GET /api/v1/download?fmt=csv|tsv - the catalog as a file attachment
async fn download(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response> {
    let (separator, content_type, filename) = match query.fmt.as_str() {
        "csv" => (b',', "text/csv", "sweet-cat.csv"),
        "tsv" => (b'\t', "text/tab-separated-values", "sweet-cat.tsv"),
        other => {
            return Err(ServerError::BadRequest(format!(
                "Unsupported download format: {other}"
            )));
        }
    };

    let snapshot = state.provider.stars()?;
    let mut df = snapshot.df.clone();
    let mut buf = Vec::new();
    CsvWriter::new(&mut buf)
        .with_separator(separator)
        .finish(&mut df)?;

    let headers = [
        (header::CONTENT_TYPE, content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, buf).into_response())
}

/// Convert a frame to row-major JSON objects, one per star.
fn frame_to_records(df: &DataFrame) -> Result<Vec<Value>> {
    let columns = df.get_columns();
    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut record = Map::with_capacity(columns.len());
        for column in columns {
            let value = any_value_to_json(column.get(row)?);
            record.insert(column.name().to_string(), value);
        }
        records.push(Value::Object(record));
    }
    Ok(records)
}

fn any_value_to_json(value: AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::Int64(v) => Value::Number(v.into()),
        AnyValue::Int32(v) => Value::Number(v.into()),
        AnyValue::Float64(v) => Number::from_f64(v).map_or(Value::Null, Value::Number),
        AnyValue::Float32(v) => Number::from_f64(v as f64).map_or(Value::Null, Value::Number),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        other => Value::String(other.to_string()),
    }
}
