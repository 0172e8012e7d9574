//! Named reference regions used for automatic trimming.
//!
//! The table is plain text, one region per line:
//!
//! ```text
//! # name, lat_min, lat_max, lon_min, lon_max
//! WSMR, 32.2, 33.0, -106.7, -106.2
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use crate::SwathError;
use geo::geometry::{Coord, Rect};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRegion {
    pub name: String,

    /// `x` is longitude, `y` latitude.
    pub bounds: Rect<f64>,
}

impl ReferenceRegion {
    pub fn new(name: impl Into<String>, lat: (f64, f64), lon: (f64, f64)) -> Self {
        Self {
            name: name.into(),
            bounds: Rect::new(Coord { x: lon.0, y: lat.0 }, Coord { x: lon.1, y: lat.1 }),
        }
    }

    /// Returns `true` if `(lat, lon)` lies inside the closed bounds.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        let (min, max) = (self.bounds.min(), self.bounds.max());
        (min.y..=max.y).contains(&lat) && (min.x..=max.x).contains(&lon)
    }

    /// Returns `true` if any photon lies inside the bounds.
    pub fn intersects_track(&self, lat: &[f64], lon: &[f64]) -> bool {
        lat.iter()
            .zip(lon)
            .any(|(&lat, &lon)| self.contains(lat, lon))
    }
}

/// Reads a region table from `path`, keeping file order.
pub fn load_regions<P: AsRef<Path>>(path: P) -> Result<Vec<ReferenceRegion>, SwathError> {
    let path = path.as_ref();
    let rdr = BufReader::new(File::open(path)?);
    let mut regions = Vec::new();
    for (n, line) in rdr.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let region = parse_region(line).map_err(|reason| SwathError::RegionTable {
            path: path.to_owned(),
            line: n + 1,
            reason,
        })?;
        regions.push(region);
    }
    Ok(regions)
}

fn parse_region(line: &str) -> Result<ReferenceRegion, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 5 {
        return Err(format!("expected 5 fields, found {}", fields.len()));
    }
    let num = |s: &str| {
        s.parse::<f64>()
            .map_err(|e| format!("invalid bound '{s}': {e}"))
    };
    let lat = (num(fields[1])?, num(fields[2])?);
    let lon = (num(fields[3])?, num(fields[4])?);
    Ok(ReferenceRegion::new(fields[0], lat, lon))
}

#[cfg(test)]
mod tests {
    use super::{load_regions, parse_region, ReferenceRegion};
    use std::io::Write;

    #[test]
    fn test_contains_is_closed() {
        let region = ReferenceRegion::new("A", (10.0, 12.0), (50.0, 52.0));
        assert!(region.contains(11.0, 51.0));
        assert!(region.contains(10.0, 52.0));
        assert!(!region.contains(12.1, 51.0));
        assert!(!region.contains(11.0, 49.9));
    }

    #[test]
    fn test_parse_region() {
        let region = parse_region("A, 10, 12, 50, 52").unwrap();
        assert_eq!(region, ReferenceRegion::new("A", (10.0, 12.0), (50.0, 52.0)));
        assert!(parse_region("A, 10, 12, 50").is_err());
        assert!(parse_region("A, ten, 12, 50, 52").is_err());
    }

    #[test]
    fn test_load_regions() {
        let path = std::env::temp_dir().join(format!("regions-{}.txt", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "# name, lat_min, lat_max, lon_min, lon_max").unwrap();
            writeln!(file, "A, 10, 12, 50, 52").unwrap();
            writeln!(file).unwrap();
            writeln!(file, "B, -1, 1, -1, 1").unwrap();
        }
        let regions = load_regions(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let names: Vec<&str> = regions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
