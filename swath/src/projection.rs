//! Geodetic to planar projection.
//!
//! Mid-latitude tracks go to UTM, tracks over the caps to the NSIDC
//! polar stereographic grids. One [`Projection`] is selected from the
//! photons of an invocation and reused for its land segments.

mod polar;
mod utm;

use geo::geometry::Coord;
use std::fmt;

/// WGS-84 semi-major axis (m).
const WGS84_A: f64 = 6_378_137.0;

/// WGS-84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// Latitudes above this use the north polar grid.
const NORTH_CAP_DEG: f64 = 84.0;

/// Latitudes below this use the south polar grid.
const SOUTH_CAP_DEG: f64 = -80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    pub fn of(lat: f64) -> Self {
        if lat >= 0.0 {
            Hemisphere::North
        } else {
            Hemisphere::South
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hemisphere::North => f.write_str("N"),
            Hemisphere::South => f.write_str("S"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Projection {
    /// Universal Transverse Mercator, zone 1-60.
    Utm { zone: u8, hemisphere: Hemisphere },

    /// NSIDC polar stereographic: EPSG:3413 north, EPSG:3976 south.
    PolarStereo(Hemisphere),
}

impl Projection {
    /// Selects a projection for the mean position of a track.
    ///
    /// Returns `None` for an empty track.
    pub fn for_track(lat: &[f64], lon: &[f64]) -> Option<Self> {
        let (lat, lon) = mean_position(lat, lon)?;
        Some(Self::for_point(lat, lon))
    }

    pub fn for_point(lat: f64, lon: f64) -> Self {
        if lat > NORTH_CAP_DEG {
            Projection::PolarStereo(Hemisphere::North)
        } else if lat < SOUTH_CAP_DEG {
            Projection::PolarStereo(Hemisphere::South)
        } else {
            Projection::Utm {
                zone: utm::zone(lat, lon),
                hemisphere: Hemisphere::of(lat),
            }
        }
    }

    pub fn epsg(&self) -> u16 {
        match self {
            Projection::Utm {
                zone,
                hemisphere: Hemisphere::North,
            } => 32600 + u16::from(*zone),
            Projection::Utm {
                zone,
                hemisphere: Hemisphere::South,
            } => 32700 + u16::from(*zone),
            Projection::PolarStereo(Hemisphere::North) => 3413,
            Projection::PolarStereo(Hemisphere::South) => 3976,
        }
    }

    pub fn hemisphere(&self) -> Hemisphere {
        match self {
            Projection::Utm { hemisphere, .. } | Projection::PolarStereo(hemisphere) => *hemisphere,
        }
    }

    pub fn is_polar(&self) -> bool {
        matches!(self, Projection::PolarStereo(_))
    }

    /// UTM zone number, or the EPSG code for polar grids.
    pub fn zone_label(&self) -> String {
        match self {
            Projection::Utm { zone, .. } => zone.to_string(),
            Projection::PolarStereo(_) => self.epsg().to_string(),
        }
    }

    /// Projects one point; `x` is easting, `y` northing.
    pub fn forward(&self, lat: f64, lon: f64) -> Coord<f64> {
        match self {
            Projection::Utm { zone, hemisphere } => utm::forward(lat, lon, *zone, *hemisphere),
            Projection::PolarStereo(hemisphere) => polar::forward(lat, lon, *hemisphere),
        }
    }

    /// Projects a track into `(easting, northing)` arrays.
    pub fn project(&self, lat: &[f64], lon: &[f64]) -> (Vec<f64>, Vec<f64>) {
        lat.iter()
            .zip(lon)
            .map(|(&lat, &lon)| {
                let Coord { x, y } = self.forward(lat, lon);
                (x, y)
            })
            .unzip()
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::Utm { zone, hemisphere } => write!(f, "UTM {zone}{hemisphere}"),
            Projection::PolarStereo(hemisphere) => {
                write!(f, "polar stereographic {hemisphere} (EPSG:{})", self.epsg())
            }
        }
    }
}

/// Mean latitude and circular mean longitude, ignoring NaN.
fn mean_position(lat: &[f64], lon: &[f64]) -> Option<(f64, f64)> {
    let (mut n, mut sum_lat, mut sum_sin, mut sum_cos) = (0_usize, 0.0, 0.0, 0.0);
    for (&lat, &lon) in lat.iter().zip(lon) {
        if lat.is_nan() || lon.is_nan() {
            continue;
        }
        let (sin, cos) = lon.to_radians().sin_cos();
        n += 1;
        sum_lat += lat;
        sum_sin += sin;
        sum_cos += cos;
    }
    if n == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = n as f64;
    Some((sum_lat / n, sum_sin.atan2(sum_cos).to_degrees()))
}

#[cfg(test)]
mod tests {
    use super::{mean_position, Hemisphere, Projection};
    use approx::assert_relative_eq;

    #[test]
    fn test_select() {
        assert_eq!(
            Projection::for_point(32.5, -106.5),
            Projection::Utm {
                zone: 13,
                hemisphere: Hemisphere::North
            }
        );
        assert_eq!(
            Projection::for_point(-33.9, 18.4),
            Projection::Utm {
                zone: 34,
                hemisphere: Hemisphere::South
            }
        );
        assert_eq!(
            Projection::for_point(86.0, 10.0),
            Projection::PolarStereo(Hemisphere::North)
        );
        assert_eq!(
            Projection::for_point(-81.0, 120.0),
            Projection::PolarStereo(Hemisphere::South)
        );
    }

    #[test]
    fn test_epsg() {
        assert_eq!(Projection::for_point(32.5, -106.5).epsg(), 32613);
        assert_eq!(Projection::for_point(-33.9, 18.4).epsg(), 32734);
        assert_eq!(Projection::for_point(88.0, 0.0).epsg(), 3413);
        assert_eq!(Projection::for_point(-88.0, 0.0).epsg(), 3976);
        assert_eq!(Projection::for_point(-88.0, 0.0).zone_label(), "3976");
    }

    #[test]
    fn test_mean_position_across_antimeridian() {
        let (lat, lon) = mean_position(&[10.0, 12.0], &[179.0, -179.0]).unwrap();
        assert_relative_eq!(lat, 11.0);
        assert_relative_eq!(lon.abs(), 180.0, epsilon = 1e-9);
        assert!(mean_position(&[], &[]).is_none());
    }

    #[test]
    fn test_project_track() {
        let proj = Projection::for_track(&[32.5, 32.6], &[-106.5, -106.5]).unwrap();
        let (easting, northing) = proj.project(&[32.5], &[-106.5]);
        assert_relative_eq!(easting[0], 359_084.388_853_804, epsilon = 1e-3);
        assert_relative_eq!(northing[0], 3_596_850.344_653_646, epsilon = 1e-3);
    }
}
