//! Derived astrophysical quantities
//!
//! Small closed-form models used to enrich the raw SWEET-Cat columns:
//! absolute magnitude and luminosity for the catalog itself, planet density
//! for the merged exoplanet table, and the Kopparapu habitable-zone limits
//! shown on the star detail page.

use crate::error::AstroError;

/// Jupiter mass in grams.
const M_JUP_CGS: f64 = 1.8986e30;
/// Jupiter radius in centimeters.
const R_JUP_CGS: f64 = 6.9911e9;
/// Solar effective temperature in K.
const TEFF_SUN: f64 = 5777.0;
/// Solar surface gravity, log cgs.
const LOGG_SUN: f64 = 4.44;

/// Absolute magnitude from parallax (mas) and apparent magnitude.
pub fn absolute_magnitude(parallax_mas: f64, apparent_mag: f64) -> f64 {
    let d = 1.0 / (parallax_mas * 1e-3);
    let mu = 5.0 * d.log10() - 5.0;
    apparent_mag - mu
}

/// Stellar luminosity in solar units from mass (solar), teff (K) and logg
/// (cgs), via `L = M (T/T_sun)^4 10^(logg_sun - logg)`.
pub fn luminosity(mass: f64, teff: f64, logg: f64) -> f64 {
    mass * (teff / TEFF_SUN).powi(4) * 10f64.powf(LOGG_SUN - logg)
}

/// Stellar luminosity in solar units from parallax (mas) and apparent
/// magnitude, via the distance modulus against the Sun.
pub fn luminosity_from_parallax(parallax_mas: f64, apparent_mag: f64) -> f64 {
    let d_sun_pc = 4.848136811133344e-06;
    let m_sun = -26.74;
    let d = 1.0 / (parallax_mas * 1e-3);
    (d / d_sun_pc).powi(2) * 10f64.powf((m_sun - apparent_mag) / 2.5)
}

/// Planet density in g/cm^3, from mass and radius in Jupiter units.
pub fn planet_density(mass_jup: f64, radius_jup: f64) -> f64 {
    3.0 * M_JUP_CGS * mass_jup / (4.0 * std::f64::consts::PI * (R_JUP_CGS * radius_jup).powi(3))
}

/// Stellar radius in solar units from mass (solar) and logg (cgs).
pub fn stellar_radius(mass: f64, logg: f64) -> Result<f64, AstroError> {
    if mass <= 0.0 {
        return Err(AstroError::NonPositiveMass(mass));
    }
    Ok(mass / 10f64.powf(logg - LOGG_SUN))
}

/// Planetary radius in Jupiter units, falling back to a mass-dependent
/// density estimate when no measured radius exists.
///
/// Rocky density below 0.01 Mjup, Neptune-like up to 0.5 Mjup, Jupiter-like
/// above.
pub fn planetary_radius(mass: Option<f64>, radius: Option<f64>) -> Result<Option<f64>, AstroError> {
    let mass = match mass {
        Some(m) => m,
        None => return Ok(radius),
    };
    if mass < 0.0 {
        return Err(AstroError::NonPositivePlanetMass(mass));
    }
    if let Some(r) = radius {
        return Ok(Some(r));
    }
    let rho = if mass < 0.01 {
        5.51 // Earth
    } else if mass <= 0.5 {
        1.64 // Neptune
    } else {
        M_JUP_CGS / (4.0 / 3.0 * std::f64::consts::PI * R_JUP_CGS.powi(3))
    };
    let r_cm = (mass * M_JUP_CGS / (4.0 / 3.0 * std::f64::consts::PI * rho)).cbrt();
    Ok(Some(r_cm / R_JUP_CGS))
}

/// Habitable-zone flux models from Kopparapu et al. 2013 (ApJ 765, 131).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HzModel {
    RecentVenus,
    RunawayGreenhouse,
    MoistGreenhouse,
    MaximumGreenhouse,
    EarlyMars,
}

impl HzModel {
    fn coefficients(self) -> [f64; 5] {
        match self {
            HzModel::RecentVenus => [1.7753, 1.4316e-4, 2.9875e-9, -7.5702e-12, -1.1635e-15],
            HzModel::RunawayGreenhouse => [1.0512, 1.3242e-4, 1.5418e-9, -7.9895e-12, -1.8328e-15],
            HzModel::MoistGreenhouse => [1.0140, 8.1774e-5, 1.7063e-9, -4.3241e-12, -6.6462e-16],
            HzModel::MaximumGreenhouse => [0.3438, 5.8942e-5, 1.6558e-9, -3.0045e-12, -5.2983e-16],
            HzModel::EarlyMars => [0.3179, 5.4513e-5, 1.5313e-9, -2.7786e-12, -4.8997e-16],
        }
    }
}

/// Habitable-zone distance in AU for a star of the given teff (K) and
/// luminosity (solar units). The polynomial fits are only valid for
/// 2500 K < teff < 7200 K; outside that window there is no estimate.
pub fn habitable_zone(teff: f64, lum: f64, model: HzModel) -> Option<f64> {
    if teff <= 2500.0 || teff >= 7200.0 {
        return None;
    }
    if !teff.is_finite() || !lum.is_finite() {
        return None;
    }
    let [seff_sun, a, b, c, d] = model.coefficients();
    let ts = teff - 5780.0;
    let seff = seff_sun + a * ts + b * ts.powi(2) + c * ts.powi(3) + d * ts.powi(4);
    Some((lum / seff).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_magnitude_of_the_sun_like_case() {
        // A star at 10 pc (parallax 100 mas) has M == m.
        let m = absolute_magnitude(100.0, 4.83);
        assert!((m - 4.83).abs() < 1e-12);
    }

    #[test]
    fn solar_luminosity_is_unity() {
        let l = luminosity(1.0, TEFF_SUN, LOGG_SUN);
        assert!((l - 1.0).abs() < 1e-12);
    }

    #[test]
    fn stellar_radius_solar_values() {
        let r = stellar_radius(1.0, LOGG_SUN).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn stellar_radius_rejects_non_positive_mass() {
        assert_eq!(
            stellar_radius(-1.0, 4.4),
            Err(AstroError::NonPositiveMass(-1.0))
        );
    }

    #[test]
    fn planet_density_of_jupiter() {
        let rho = planet_density(1.0, 1.0);
        // Jupiter's bulk density, ~1.33 g/cm^3
        assert!((rho - 1.326).abs() < 0.01);
    }

    #[test]
    fn planetary_radius_uses_measured_value_when_present() {
        assert_eq!(planetary_radius(Some(1.0), Some(1.2)).unwrap(), Some(1.2));
        assert_eq!(planetary_radius(None, Some(0.9)).unwrap(), Some(0.9));
        assert_eq!(planetary_radius(None, None).unwrap(), None);
    }

    #[test]
    fn planetary_radius_estimates_missing_radius() {
        let r = planetary_radius(Some(1.0), None).unwrap().unwrap();
        // Jupiter-density fallback reproduces Jupiter's radius.
        assert!((r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn habitable_zone_respects_teff_validity_window() {
        assert!(habitable_zone(5777.0, 1.0, HzModel::RunawayGreenhouse).is_some());
        assert_eq!(habitable_zone(2400.0, 1.0, HzModel::RecentVenus), None);
        assert_eq!(habitable_zone(7300.0, 1.0, HzModel::EarlyMars), None);
    }

    #[test]
    fn habitable_zone_inner_edge_is_inside_outer_edge() {
        let inner = habitable_zone(5777.0, 1.0, HzModel::RunawayGreenhouse).unwrap();
        let outer = habitable_zone(5777.0, 1.0, HzModel::MaximumGreenhouse).unwrap();
        assert!(inner < outer);
        // Sun-like star: inner edge near 1 AU.
        assert!((0.9..1.1).contains(&inner));
    }
}
