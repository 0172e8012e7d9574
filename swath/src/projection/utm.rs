//! Transverse Mercator forward projection using Krüger's series.
//!
//! # References
//!
//! 1. [Karney, Transverse Mercator with an accuracy of a few nanometers](https://arxiv.org/abs/1002.1417)

use super::{Hemisphere, WGS84_A, WGS84_F};
use geo::geometry::Coord;

const K0: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Returns the UTM zone for a point, including the Norway and
/// Svalbard exceptions.
pub(super) fn zone(lat: f64, lon: f64) -> u8 {
    // Normalize to [-180, 180).
    let lon = (lon + 180.0).rem_euclid(360.0) - 180.0;

    if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        return 32;
    }
    if (72.0..84.0).contains(&lat) && (0.0..42.0).contains(&lon) {
        return match lon {
            l if l < 9.0 => 31,
            l if l < 21.0 => 33,
            l if l < 33.0 => 35,
            _ => 37,
        };
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let zone = ((lon + 180.0) / 6.0).floor() as u8 + 1;
    zone.clamp(1, 60)
}

fn central_meridian(zone: u8) -> f64 {
    f64::from(zone) * 6.0 - 183.0
}

#[allow(clippy::many_single_char_names)]
pub(super) fn forward(lat: f64, lon: f64, zone: u8, hemisphere: Hemisphere) -> Coord<f64> {
    let n = WGS84_F / (2.0 - WGS84_F);
    let (n2, n3) = (n * n, n * n * n);
    let a = WGS84_A / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0);
    let alpha = [
        n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0,
        13.0 * n2 / 48.0 - 3.0 * n3 / 5.0,
        61.0 * n3 / 240.0,
    ];

    let phi = lat.to_radians();
    let lambda = (lon - central_meridian(zone)).to_radians();
    // Keep longitudes that wrapped the antimeridian next to the zone.
    let lambda = (lambda + std::f64::consts::PI).rem_euclid(std::f64::consts::TAU)
        - std::f64::consts::PI;

    let k = 2.0 * n.sqrt() / (1.0 + n);
    let t = (phi.sin().atanh() - k * (k * phi.sin()).atanh()).sinh();
    let xi = t.atan2(lambda.cos());
    let eta = (lambda.sin() / (1.0 + t * t).sqrt()).atanh();

    let (mut x, mut y) = (eta, xi);
    for (j, alpha) in alpha.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let m = 2.0 * (j + 1) as f64;
        x += alpha * (m * xi).cos() * (m * eta).sinh();
        y += alpha * (m * xi).sin() * (m * eta).cosh();
    }

    let false_northing = match hemisphere {
        Hemisphere::North => 0.0,
        Hemisphere::South => FALSE_NORTHING_SOUTH,
    };

    Coord {
        x: FALSE_EASTING + K0 * a * x,
        y: false_northing + K0 * a * y,
    }
}

#[cfg(test)]
mod tests {
    use super::{forward, zone};
    use crate::projection::Hemisphere;
    use approx::assert_relative_eq;

    #[test]
    fn test_zone() {
        assert_eq!(zone(32.5, -106.5), 13);
        assert_eq!(zone(0.0, -180.0), 1);
        assert_eq!(zone(0.0, 179.9), 60);
        assert_eq!(zone(0.0, 180.0), 1);
        // Norway.
        assert_eq!(zone(60.0, 5.0), 32);
        // Svalbard.
        assert_eq!(zone(78.0, 15.0), 33);
        assert_eq!(zone(78.0, 25.0), 35);
    }

    #[test]
    fn test_central_meridian() {
        let c = forward(40.0, -105.0, 13, Hemisphere::North);
        assert_relative_eq!(c.x, 500_000.0, epsilon = 1e-6);
        assert_relative_eq!(c.y, 4_427_757.218_698_518, epsilon = 1e-3);

        let c = forward(0.0, 3.0, 31, Hemisphere::North);
        assert_relative_eq!(c.x, 500_000.0, epsilon = 1e-6);
        assert_relative_eq!(c.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_off_meridian() {
        let c = forward(40.5, -104.0, 13, Hemisphere::North);
        assert_relative_eq!(c.x, 584_734.538_897_791, epsilon = 1e-3);
        assert_relative_eq!(c.y, 4_483_734.991_543_899, epsilon = 1e-3);

        let c = forward(-33.9, 18.4, 34, Hemisphere::South);
        assert_relative_eq!(c.x, 259_583.221_666_521, epsilon = 1e-3);
        assert_relative_eq!(c.y, 6_245_888.045_463_849, epsilon = 1e-3);

        let c = forward(64.0, -21.9, 27, Hemisphere::North);
        assert_relative_eq!(c.x, 455_980.161_903_427, epsilon = 1e-3);
        assert_relative_eq!(c.y, 7_097_324.912_424_705, epsilon = 1e-3);
    }
}
