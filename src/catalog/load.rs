//! Reading and preparing the SWEET-Cat and exoplanet.eu tables

use std::collections::{HashMap, HashSet};
use std::path::Path;

use polars::prelude::{
    BooleanChunked, ChunkCompareEq, Column, CsvParseOptions, CsvReadOptions, DataFrame, DataType,
    Float64Chunked, IdxCa, IntoColumn, IntoSeries, NullValues, SerReader, StringChunked,
};

use super::{CatalogSnapshot, FLAG, STAR};
use crate::astro;
use crate::error::CatalogError;

/// SWEET-Cat columns offered for plotting, including the derived `Vabs`
/// and `lum`.
pub const STAR_PLOT_COLUMNS: [&str; 18] = [
    "Vmag", "Vmagerr", "Vabs", "par", "parerr", "teff", "tefferr", "logg", "loggerr", "logglc",
    "logglcerr", "vt", "vterr", "feh", "feherr", "mass", "masserr", "lum",
];

/// Exoplanet columns added to the whitelist on the merged pages.
pub const PLANET_PLOT_COLUMNS: [&str; 15] = [
    "plMass",
    "plRadius",
    "period",
    "sma",
    "eccentricity",
    "inclination",
    "discovered",
    "dist",
    "b",
    "mag_v",
    "mag_i",
    "mag_j",
    "mag_h",
    "mag_k",
    "plDensity",
];

/// Raw exoplanet.eu column names and the short names the rest of the app
/// uses.
const EXOPLANET_RENAMES: [(&str, &str); 16] = [
    ("name", "plName"),
    ("star_name", "stName"),
    ("mass", "plMass"),
    ("radius", "plRadius"),
    ("orbital_period", "period"),
    ("semi_major_axis", "sma"),
    ("eccentricity", "eccentricity"),
    ("inclination", "inclination"),
    ("discovered", "discovered"),
    ("impact_parameter", "b"),
    ("star_distance", "dist"),
    ("mag_v", "mag_v"),
    ("mag_i", "mag_i"),
    ("mag_j", "mag_j"),
    ("mag_h", "mag_h"),
    ("mag_k", "mag_k"),
];

/// Load the SWEET-Cat table and derive its computed columns.
pub fn read_sweetcat(path: &Path) -> Result<CatalogSnapshot, CatalogError> {
    let df = read_delimited(path, b'\t')?;
    let df = prepare_sweetcat(df)?;
    Ok(CatalogSnapshot {
        df,
        columns: STAR_PLOT_COLUMNS.map(String::from).to_vec(),
    })
}

/// Load both tables and inner-join planets onto their host stars.
pub fn read_merged(sweetcat: &Path, exoplanets: &Path) -> Result<CatalogSnapshot, CatalogError> {
    let stars = read_sweetcat(sweetcat)?;
    let planets = prepare_exoplanets(read_delimited(exoplanets, b',')?)?;
    let df = merge_planet_and_star(&stars.df, &planets)?;

    let mut columns = stars.columns;
    columns.extend(PLANET_PLOT_COLUMNS.map(String::from));
    Ok(CatalogSnapshot { df, columns })
}

fn read_delimited(path: &Path, separator: u8) -> Result<DataFrame, CatalogError> {
    let parse = CsvParseOptions::default()
        .with_separator(separator)
        .with_null_values(Some(NullValues::AllColumns(vec![
            "".into(),
            "~".into(),
            "...".into(),
            "NULL".into(),
        ])));
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(parse)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Clean the raw SWEET-Cat frame: drop the vestigial `tmp` column, coerce
/// `flag` to boolean, strip star names, and add the derived `Vabs` and
/// `lum` columns.
pub(crate) fn prepare_sweetcat(mut df: DataFrame) -> Result<DataFrame, CatalogError> {
    if df.column("tmp").is_ok() {
        df = df.drop("tmp")?;
    }

    let flag = df
        .column(FLAG)
        .map_err(|_| CatalogError::MissingColumn(FLAG.into()))?
        .as_materialized_series()
        .cast(&DataType::Int64)?;
    let flag: BooleanChunked = flag.i64()?.equal(1);
    df.with_column(flag.into_series().with_name(FLAG.into()).into_column())?;

    let trimmed: StringChunked = df
        .column(STAR)
        .map_err(|_| CatalogError::MissingColumn(STAR.into()))?
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|opt| opt.map(|s| s.trim().to_string()))
        .collect();
    df.with_column(trimmed.into_series().with_name(STAR.into()).into_column())?;

    let par = float_options(&df, "par")?;
    let vmag = float_options(&df, "Vmag")?;
    let vabs: Float64Chunked = par
        .iter()
        .zip(&vmag)
        .map(|(p, m)| match (p, m) {
            (Some(p), Some(m)) if *p > 0.0 => Some(astro::absolute_magnitude(*p, *m)),
            _ => None,
        })
        .collect();
    df.with_column(vabs.into_series().with_name("Vabs".into()).into_column())?;

    let mass = float_options(&df, "mass")?;
    let teff = float_options(&df, "teff")?;
    let logg = float_options(&df, "logg")?;
    let lum: Float64Chunked = mass
        .iter()
        .zip(teff.iter().zip(&logg))
        .map(|(m, (t, g))| match (m, t, g) {
            (Some(m), Some(t), Some(g)) => Some(astro::luminosity(*m, *t, *g)),
            _ => None,
        })
        .collect();
    df.with_column(lum.into_series().with_name("lum".into()).into_column())?;

    Ok(df)
}

/// Normalize the exoplanet.eu frame: short column names, host-star name
/// derived from the planet name, and the `plDensity` column.
pub(crate) fn prepare_exoplanets(mut df: DataFrame) -> Result<DataFrame, CatalogError> {
    for (raw, short) in EXOPLANET_RENAMES {
        if raw != short && df.column(raw).is_ok() {
            df.rename(raw, short.into())?;
        }
    }

    let host: StringChunked = df
        .column("plName")
        .map_err(|_| CatalogError::MissingColumn("plName".into()))?
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|opt| opt.map(|name| host_star_name(name).to_string()))
        .collect();
    df.with_column(host.into_series().with_name("stName".into()).into_column())?;

    let mass = float_options(&df, "plMass")?;
    let radius = float_options(&df, "plRadius")?;
    let density: Float64Chunked = mass
        .iter()
        .zip(&radius)
        .map(|(m, r)| match (m, r) {
            (Some(m), Some(r)) if *r > 0.0 => Some(astro::planet_density(*m, *r)),
            _ => None,
        })
        .collect();
    df.with_column(
        density
            .into_series()
            .with_name("plDensity".into())
            .into_column(),
    )?;

    Ok(df)
}

/// Strip a trailing planet-letter suffix (" b" through " h") to recover
/// the host star's name; names without one are already host names.
fn host_star_name(planet: &str) -> &str {
    let planet = planet.trim();
    for letter in ['b', 'c', 'd', 'e', 'f', 'g', 'h'] {
        if let Some(host) = planet.strip_suffix(&format!(" {letter}")) {
            return host;
        }
    }
    planet
}

/// Inner-join planets onto stars on `Star == stName`, keeping every star
/// column and appending the planet columns that do not collide.
pub(crate) fn merge_planet_and_star(
    stars: &DataFrame,
    planets: &DataFrame,
) -> Result<DataFrame, CatalogError> {
    let star_names = stars
        .column(STAR)
        .map_err(|_| CatalogError::MissingColumn(STAR.into()))?
        .as_materialized_series()
        .str()?
        .clone();
    let mut by_name: HashMap<&str, Vec<u32>> = HashMap::new();
    for (row, name) in star_names.into_iter().enumerate() {
        if let Some(name) = name {
            by_name.entry(name).or_default().push(row as u32);
        }
    }

    let hosts = planets
        .column("stName")
        .map_err(|_| CatalogError::MissingColumn("stName".into()))?
        .as_materialized_series()
        .str()?
        .clone();
    let mut star_rows: Vec<u32> = Vec::new();
    let mut planet_rows: Vec<u32> = Vec::new();
    for (row, host) in hosts.into_iter().enumerate() {
        if let Some(host) = host {
            if let Some(matches) = by_name.get(host) {
                for &star_row in matches {
                    star_rows.push(star_row);
                    planet_rows.push(row as u32);
                }
            }
        }
    }

    let left = stars.take(&IdxCa::from_vec("idx".into(), star_rows))?;
    let right = planets.take(&IdxCa::from_vec("idx".into(), planet_rows))?;

    let existing: HashSet<String> = left
        .get_column_names_str()
        .into_iter()
        .map(String::from)
        .collect();
    let appended: Vec<Column> = right
        .get_columns()
        .iter()
        .filter(|col| col.name().as_str() != "stName" && !existing.contains(col.name().as_str()))
        .cloned()
        .collect();

    Ok(left.hstack(&appended)?)
}

fn float_options(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, CatalogError> {
    let series = df
        .column(name)
        .map_err(|_| CatalogError::MissingColumn(name.into()))?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}
