//! Ellipsoidal polar stereographic projection (variant B, true scale
//! at ±70°).
//!
//! # References
//!
//! 1. Snyder, Map Projections: A Working Manual, USGS PP 1395, §21.

use super::{Hemisphere, WGS84_A, WGS84_F};
use geo::geometry::Coord;
use std::f64::consts::FRAC_PI_4;

/// Latitude of true scale, degrees from the equator.
const STANDARD_PARALLEL_DEG: f64 = 70.0;

/// Straight vertical longitude of EPSG:3413.
const NORTH_LON0_DEG: f64 = -45.0;

/// Straight vertical longitude of EPSG:3976.
const SOUTH_LON0_DEG: f64 = 0.0;

pub(super) fn forward(lat: f64, lon: f64, hemisphere: Hemisphere) -> Coord<f64> {
    // The south grid is the north one with every sign flipped.
    let (sign, lon0) = match hemisphere {
        Hemisphere::North => (1.0, NORTH_LON0_DEG),
        Hemisphere::South => (-1.0, SOUTH_LON0_DEG),
    };
    let e = (WGS84_F * (2.0 - WGS84_F)).sqrt();

    let phi = (sign * lat).to_radians();
    let phi_c = STANDARD_PARALLEL_DEG.to_radians();
    let dlambda = (sign * lon - sign * lon0).to_radians();

    let t = |phi: f64| {
        let es = e * phi.sin();
        (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - es) / (1.0 + es)).powf(e / 2.0)
    };
    let m_c = phi_c.cos() / (1.0 - (e * phi_c.sin()).powi(2)).sqrt();
    let rho = WGS84_A * m_c * t(phi) / t(phi_c);

    Coord {
        x: sign * rho * dlambda.sin(),
        y: -sign * rho * dlambda.cos(),
    }
}
