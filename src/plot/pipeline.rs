//! Request orchestration: defaults, validation, and plot-spec assembly

use serde::{Deserialize, Serialize};

use super::color::{NamedColor, VIRIDIS11, quantile_buckets};
use super::extract::extract;
use super::histogram::{Histogram, scaled_histogram};
use super::limits::{RawLimits, count_in_bounds, resolve_limits};
use super::scale::check_scale;
use super::{AxisSeries, ColorSpec, Scale};
use crate::catalog::CatalogSnapshot;
use crate::error::{PlotError, SelectionError};

/// Which plot page a request is for; each has its own GET defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotPage {
    /// SWEET-Cat stellar parameters only.
    Catalog,
    /// SWEET-Cat merged with the exoplanet.eu table.
    Exoplanets,
}

impl PlotPage {
    /// The endpoint an invalid selection redirects back to.
    pub fn endpoint(self) -> &'static str {
        match self {
            PlotPage::Catalog => "/plot",
            PlotPage::Exoplanets => "/plot-exo",
        }
    }
}

/// The plot form exactly as submitted: every field a string, including the
/// `"None"` sentinel for "no z axis". Nothing downstream of
/// [`PlotSelection::from_form`] ever sees these raw values.
#[derive(Clone, Debug, Deserialize)]
pub struct PlotForm {
    pub color: String,
    pub x: String,
    pub y: String,
    pub z: String,
    #[serde(default)]
    pub x1: String,
    #[serde(default)]
    pub x2: String,
    #[serde(default)]
    pub y1: String,
    #[serde(default)]
    pub y2: String,
    pub xscale: String,
    pub yscale: String,
    #[serde(default)]
    pub checkboxes: String,
}

/// A validated plot request: the only way into [`build_plot`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlotSelection {
    pub x: String,
    pub y: String,
    pub z: Option<String>,
    pub color: NamedColor,
    pub xscale: Scale,
    pub yscale: Scale,
    pub limits: RawLimits,
    pub homogeneous: bool,
}

impl PlotSelection {
    /// The fixed defaults served on a GET request.
    pub fn defaults(page: PlotPage) -> Self {
        match page {
            PlotPage::Catalog => Self {
                x: "teff".into(),
                y: "Vabs".into(),
                z: Some("logg".into()),
                color: NamedColor::Blue,
                xscale: Scale::Linear,
                yscale: Scale::Linear,
                // Reversed on purpose: hot stars left, bright stars up.
                limits: RawLimits::new("8000", "2500", "33", "10"),
                homogeneous: false,
            },
            PlotPage::Exoplanets => Self {
                x: "discovered".into(),
                y: "plMass".into(),
                z: None,
                color: NamedColor::Blue,
                xscale: Scale::Linear,
                yscale: Scale::Log,
                limits: RawLimits::new("1985", "2020", "0.0001", "200"),
                homogeneous: false,
            },
        }
    }

    /// Validate a submitted form against the snapshot's plottable columns.
    ///
    /// The `"None"` z sentinel becomes `Option::None` here; axis names must
    /// be whitelisted; color, scales and the checkbox value must come from
    /// their fixed enumerations. Any mismatch is a [`SelectionError`] — the
    /// rejection signal the server turns into a redirect.
    pub fn from_form(form: &PlotForm, columns: &[String]) -> Result<Self, SelectionError> {
        let z = match form.z.as_str() {
            "None" => None,
            name => Some(name.to_string()),
        };

        for axis in [Some(&form.x), Some(&form.y), z.as_ref()].into_iter().flatten() {
            if !columns.iter().any(|c| c == axis) {
                return Err(SelectionError::UnknownColumn(axis.clone()));
            }
        }

        let homogeneous = match form.checkboxes.as_str() {
            "" => false,
            "homo" => true,
            other => return Err(SelectionError::UnknownCheckbox(other.to_string())),
        };

        Ok(Self {
            x: form.x.clone(),
            y: form.y.clone(),
            z,
            color: form.color.parse()?,
            xscale: form.xscale.parse()?,
            yscale: form.yscale.parse()?,
            limits: RawLimits::new(&form.x1, &form.x2, &form.y1, &form.y2),
            homogeneous,
        })
    }
}

/// The fully resolved plot specification: the single contract with the
/// rendering layer.
#[derive(Clone, Debug, Serialize)]
pub struct PlotSpec {
    pub title: String,
    pub stars: Vec<String>,
    pub x: AxisSeries,
    pub y: AxisSeries,
    pub z: Option<AxisSeries>,
    /// Resolved bounds in user order; may be reversed to invert an axis.
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub xscale: Scale,
    pub yscale: Scale,
    /// `Some(true)` when a log request was downgraded to linear; drives a
    /// one-time user notice, nothing else.
    pub scale_downgraded: Option<bool>,
    pub num_points: usize,
    pub x_hist: Histogram,
    pub y_hist: Histogram,
    pub color: ColorSpec,
    pub homogeneous: bool,
}

/// Run the whole pipeline for one request: extraction, limit resolution,
/// scale checking, in-bounds counting, both marginal histograms and the
/// color assignment. Pure with respect to the snapshot; one pass, no
/// retries.
pub fn build_plot(
    snapshot: &CatalogSnapshot,
    selection: &PlotSelection,
) -> Result<PlotSpec, PlotError> {
    let extracted = extract(
        &snapshot.df,
        &selection.x,
        &selection.y,
        selection.z.as_deref(),
        selection.homogeneous,
    )?;

    let [x1, x2, y1, y2] = resolve_limits(&selection.limits, &extracted.x.values, &extracted.y.values);
    let (xscale, yscale, scale_downgraded) = check_scale(
        &extracted.x.values,
        &extracted.y.values,
        selection.xscale,
        selection.yscale,
    );

    let num_points = count_in_bounds(
        &extracted.x.values,
        &extracted.y.values,
        &[x1, x2],
        &[y1, y2],
    )?;

    let x_hist = scaled_histogram(&extracted.x.values, num_points, xscale);
    let y_hist = scaled_histogram(&extracted.y.values, num_points, yscale);

    let color = match &extracted.z {
        Some(z) => ColorSpec::Buckets(quantile_buckets(&z.values, &VIRIDIS11)),
        None => ColorSpec::Fixed {
            name: selection.color,
            hex: selection.color.hex(),
        },
    };

    let title = format!(
        "{} vs. {}:\tNumber of objects in plot: {}",
        extracted.x.name, extracted.y.name, num_points
    );

    Ok(PlotSpec {
        title,
        stars: extracted.stars,
        x: extracted.x,
        y: extracted.y,
        z: extracted.z,
        x_range: (x1, x2),
        y_range: (y1, y2),
        xscale,
        yscale,
        scale_downgraded,
        num_points,
        x_hist,
        y_hist,
        color,
        homogeneous: selection.homogeneous,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{DataFrame, df};

    use crate::catalog::{FLAG, STAR};

    fn snapshot() -> CatalogSnapshot {
        let n = 40;
        let stars: Vec<String> = (0..n).map(|i| format!("HD {i}")).collect();
        let teff: Vec<f64> = (0..n).map(|i| 4000.0 + 60.0 * i as f64).collect();
        let vabs: Vec<f64> = (0..n).map(|i| 2.0 + 0.2 * i as f64).collect();
        let logg: Vec<f64> = (0..n).map(|i| 4.0 + 0.01 * i as f64).collect();
        let feh: Vec<f64> = (0..n).map(|i| -0.5 + 0.02 * i as f64).collect();
        let flag: Vec<bool> = (0..n).map(|i| i % 2 == 0).collect();
        let df: DataFrame = df! {
            STAR => stars,
            "teff" => teff,
            "Vabs" => vabs,
            "logg" => logg,
            "feh" => feh,
            FLAG => flag,
        }
        .unwrap();
        CatalogSnapshot {
            df,
            columns: ["teff", "Vabs", "logg", "feh"]
                .map(String::from)
                .to_vec(),
        }
    }

    fn form() -> PlotForm {
        PlotForm {
            color: "Blue".into(),
            x: "teff".into(),
            y: "Vabs".into(),
            z: "None".into(),
            x1: "".into(),
            x2: "".into(),
            y1: "".into(),
            y2: "".into(),
            xscale: "linear".into(),
            yscale: "linear".into(),
            checkboxes: "".into(),
        }
    }

    #[test]
    fn get_defaults_build_a_full_spec() {
        let snap = snapshot();
        let spec = build_plot(&snap, &PlotSelection::defaults(PlotPage::Catalog)).unwrap();

        assert_eq!(spec.x.name, "teff");
        assert_eq!(spec.y.name, "Vabs");
        assert_eq!(spec.z.as_ref().unwrap().name, "logg");
        // Default axis bounds are deliberately reversed.
        assert_eq!(spec.x_range, (8000.0, 2500.0));
        assert_eq!(spec.y_range, (33.0, 10.0));
        assert!(matches!(spec.color, ColorSpec::Buckets(_)));
        assert_eq!(spec.x_hist.edges.len(), spec.x_hist.counts.len() + 1);
        assert!(spec.title.contains("teff vs. Vabs"));
        assert!(spec.title.contains(&spec.num_points.to_string()));
    }

    #[test]
    fn sentinel_z_becomes_none_and_fixed_color() {
        let snap = snapshot();
        let selection = PlotSelection::from_form(&form(), &snap.columns).unwrap();
        assert_eq!(selection.z, None);

        let spec = build_plot(&snap, &selection).unwrap();
        assert!(spec.z.is_none());
        assert_eq!(
            spec.color,
            ColorSpec::Fixed {
                name: NamedColor::Blue,
                hex: "#1f77b4"
            }
        );
    }

    #[test]
    fn invalid_axis_selection_is_rejected() {
        let snap = snapshot();
        let mut bad = form();
        bad.x = "period".into();
        assert_eq!(
            PlotSelection::from_form(&bad, &snap.columns),
            Err(SelectionError::UnknownColumn("period".into()))
        );

        let mut bad_z = form();
        bad_z.z = "Star".into();
        assert_eq!(
            PlotSelection::from_form(&bad_z, &snap.columns),
            Err(SelectionError::UnknownColumn("Star".into()))
        );
    }

    #[test]
    fn invalid_scale_color_and_checkbox_are_rejected() {
        let snap = snapshot();

        let mut bad = form();
        bad.xscale = "cubic".into();
        assert_eq!(
            PlotSelection::from_form(&bad, &snap.columns),
            Err(SelectionError::UnknownScale("cubic".into()))
        );

        let mut bad = form();
        bad.color = "Magenta".into();
        assert_eq!(
            PlotSelection::from_form(&bad, &snap.columns),
            Err(SelectionError::UnknownColor("Magenta".into()))
        );

        let mut bad = form();
        bad.checkboxes = "hetero".into();
        assert_eq!(
            PlotSelection::from_form(&bad, &snap.columns),
            Err(SelectionError::UnknownCheckbox("hetero".into()))
        );
    }

    #[test]
    fn empty_limits_resolve_to_data_extrema() {
        let snap = snapshot();
        let selection = PlotSelection::from_form(&form(), &snap.columns).unwrap();
        let spec = build_plot(&snap, &selection).unwrap();

        assert_eq!(spec.x_range, (4000.0, 4000.0 + 60.0 * 39.0));
        assert_eq!(spec.y_range, (2.0, 2.0 + 0.2 * 39.0));
    }

    #[test]
    fn log_request_on_non_positive_data_downgrades_with_notice() {
        let snap = snapshot();
        let mut f = form();
        f.x = "feh".into(); // spans negative values
        f.xscale = "log".into();
        let selection = PlotSelection::from_form(&f, &snap.columns).unwrap();
        let spec = build_plot(&snap, &selection).unwrap();

        assert_eq!(spec.xscale, Scale::Linear);
        assert_eq!(spec.scale_downgraded, Some(true));
    }

    #[test]
    fn homogeneous_checkbox_filters_rows() {
        let snap = snapshot();
        let mut f = form();
        f.checkboxes = "homo".into();
        let homo = build_plot(&snap, &PlotSelection::from_form(&f, &snap.columns).unwrap()).unwrap();
        let all =
            build_plot(&snap, &PlotSelection::from_form(&form(), &snap.columns).unwrap()).unwrap();

        assert!(homo.stars.len() < all.stars.len());
        assert!(homo.homogeneous);
    }

    #[test]
    fn pipeline_is_deterministic() {
        let snap = snapshot();
        let selection = PlotSelection::defaults(PlotPage::Catalog);
        let a = build_plot(&snap, &selection).unwrap();
        let b = build_plot(&snap, &selection).unwrap();

        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    #[test]
    fn exoplanet_defaults_use_log_mass_axis() {
        let sel = PlotSelection::defaults(PlotPage::Exoplanets);
        assert_eq!(sel.x, "discovered");
        assert_eq!(sel.y, "plMass");
        assert_eq!(sel.z, None);
        assert_eq!(sel.yscale, Scale::Log);
        assert_eq!(sel.limits, RawLimits::new("1985", "2020", "0.0001", "200"));
    }
}
