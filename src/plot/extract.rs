//! Column extraction and null-dropping for a plot request

use std::collections::HashSet;

use polars::prelude::{BooleanChunked, DataFrame, DataType};

use super::AxisSeries;
use crate::catalog::{FLAG, STAR};
use crate::error::PlotError;

/// The reduced frame plus the series a plot needs, all null-free.
#[derive(Clone, Debug)]
pub struct Extracted {
    pub frame: DataFrame,
    pub stars: Vec<String>,
    pub x: AxisSeries,
    pub y: AxisSeries,
    pub z: Option<AxisSeries>,
}

/// Reduce the catalog frame to the columns one plot needs.
///
/// With `homogeneous` set, rows are first restricted to the homogeneously
/// analyzed subset (boolean `flag` column). The selection is the
/// de-duplicated set {Star, x, y, z?, flag} — never more than five columns —
/// and rows with a null in any selected column are dropped, so the returned
/// series are dense. When `z` is `None` no z column takes part in either
/// the selection or the null-drop.
pub fn extract(
    df: &DataFrame,
    x: &str,
    y: &str,
    z: Option<&str>,
    homogeneous: bool,
) -> Result<Extracted, PlotError> {
    let df = if homogeneous {
        let flag = df.column(FLAG)?.as_materialized_series().bool()?.clone();
        df.filter(&flag)?
    } else {
        df.clone()
    };

    let mut names: Vec<&str> = vec![STAR, x, y];
    if let Some(z) = z {
        names.push(z);
    }
    names.push(FLAG);
    let mut seen = HashSet::new();
    names.retain(|name| seen.insert(*name));

    let selected = df.select(names.iter().copied())?;
    let reduced = drop_null_rows(&selected)?;

    Ok(Extracted {
        stars: string_values(&reduced, STAR)?,
        x: AxisSeries::new(x, numeric_values(&reduced, x)?),
        y: AxisSeries::new(y, numeric_values(&reduced, y)?),
        z: match z {
            Some(z) => Some(AxisSeries::new(z, numeric_values(&reduced, z)?)),
            None => None,
        },
        frame: reduced,
    })
}

/// Keep only rows with no null in any column.
fn drop_null_rows(df: &DataFrame) -> Result<DataFrame, PlotError> {
    let mut mask: Option<BooleanChunked> = None;
    for col in df.get_columns() {
        let not_null = col.is_not_null();
        mask = Some(match mask {
            Some(m) => m & not_null,
            None => not_null,
        });
    }
    match mask {
        Some(mask) => Ok(df.filter(&mask)?),
        None => Ok(df.clone()),
    }
}

/// A column's values as dense f64, casting integer columns as needed.
/// Callers must have dropped nulls first.
fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, PlotError> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.into_no_null_iter().collect())
}

fn string_values(df: &DataFrame, name: &str) -> Result<Vec<String>, PlotError> {
    Ok(df
        .column(name)?
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|opt| opt.unwrap_or_default().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;

    fn sample_frame() -> DataFrame {
        df! {
            STAR => &["HD 1", "HD 2", "HD 3", "HD 4", "HD 5", "HD 6"],
            "teff" => &[Some(5777.0), Some(4500.0), None, Some(6100.0), Some(5250.0), Some(4900.0)],
            "mass" => &[Some(1.0), Some(0.8), Some(1.2), None, Some(0.9), Some(1.1)],
            "logg" => &[Some(4.44), Some(4.6), Some(4.2), Some(4.3), None, Some(4.5)],
            "feh" => &[Some(0.0), Some(-0.2), Some(0.3), Some(0.1), Some(-0.1), Some(0.2)],
            FLAG => &[true, false, true, true, false, true],
        }
        .unwrap()
    }

    #[test]
    fn drops_rows_with_nulls_in_selected_columns_only() {
        let df = sample_frame();
        let out = extract(&df, "teff", "mass", None, false).unwrap();

        // HD 3 (null teff) and HD 4 (null mass) drop; HD 5's null logg is
        // outside the selection and does not.
        assert_eq!(out.stars, vec!["HD 1", "HD 2", "HD 5", "HD 6"]);
        assert_eq!(out.x.values.len(), 4);
        assert_eq!(out.y.values.len(), 4);
        assert!(out.z.is_none());
    }

    #[test]
    fn z_column_joins_selection_and_null_drop() {
        let df = sample_frame();
        let out = extract(&df, "teff", "mass", Some("logg"), false).unwrap();

        assert_eq!(out.stars, vec!["HD 1", "HD 2", "HD 6"]);
        let z = out.z.unwrap();
        assert_eq!(z.name, "logg");
        assert_eq!(z.values, vec![4.44, 4.6, 4.5]);
    }

    #[test]
    fn homogeneous_subset_is_a_strict_subset_with_flag_set() {
        let df = sample_frame();
        let all = extract(&df, "teff", "mass", None, false).unwrap();
        let homo = extract(&df, "teff", "mass", None, true).unwrap();

        assert!(homo.frame.height() < all.frame.height());
        let flags = homo.frame.column(FLAG).unwrap().as_materialized_series();
        let flags = flags.bool().unwrap();
        assert!(flags.into_no_null_iter().all(|f| f));
        for star in &homo.stars {
            assert!(all.stars.contains(star));
        }
    }

    #[test]
    fn selection_never_exceeds_five_columns() {
        let df = sample_frame();

        let with_z = extract(&df, "teff", "mass", Some("logg"), false).unwrap();
        assert_eq!(with_z.frame.width(), 5);

        let without_z = extract(&df, "teff", "mass", None, false).unwrap();
        assert_eq!(without_z.frame.width(), 4);

        // Repeated axis names collapse.
        let repeated = extract(&df, "teff", "teff", Some("teff"), false).unwrap();
        assert_eq!(repeated.frame.width(), 3);
        assert_eq!(repeated.x.values, repeated.y.values);
    }

    #[test]
    fn extraction_is_deterministic() {
        let df = sample_frame();
        let a = extract(&df, "teff", "feh", Some("mass"), true).unwrap();
        let b = extract(&df, "teff", "feh", Some("mass"), true).unwrap();

        assert_eq!(a.stars, b.stars);
        assert_eq!(a.x, b.x);
        assert_eq!(a.y, b.y);
        assert_eq!(a.z, b.z);
    }

    #[test]
    fn unknown_column_is_a_frame_error() {
        let df = sample_frame();
        assert!(extract(&df, "nope", "mass", None, false).is_err());
    }
}
