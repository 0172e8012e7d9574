//! Spatial and temporal trimming of a swath.
//!
//! Exactly one [`TrimSpec`] is active per invocation. Stages always run
//! in the same order: manual bounds, then the sentinel filter on land
//! segments, then the reference region match.

use crate::{
    record::{LandSegmentRecord, PhotonRecord},
    region::ReferenceRegion,
    SwathError,
};
use log::{debug, info, warn};
use std::fmt;

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn mask(&self, values: &[f64]) -> Vec<bool> {
        values.iter().map(|&v| self.contains(v)).collect()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// User supplied bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ManualTrim {
    LonLat { lon: Bounds, lat: Bounds },
    Lat(Bounds),
    Lon(Bounds),
    /// Seconds since the first photon.
    Time(Bounds),
}

impl ManualTrim {
    pub fn photon_mask(&self, photons: &PhotonRecord) -> Vec<bool> {
        self.mask(&photons.lat, &photons.lon, &photons.time)
    }

    pub fn segment_mask(&self, segments: &LandSegmentRecord) -> Vec<bool> {
        self.mask(&segments.lat, &segments.lon, &segments.time)
    }

    fn mask(&self, lat: &[f64], lon: &[f64], time: &[f64]) -> Vec<bool> {
        match self {
            ManualTrim::LonLat {
                lon: lon_bounds,
                lat: lat_bounds,
            } => lat
                .iter()
                .zip(lon)
                .map(|(&lat, &lon)| lat_bounds.contains(lat) && lon_bounds.contains(lon))
                .collect(),
            ManualTrim::Lat(bounds) => bounds.mask(lat),
            ManualTrim::Lon(bounds) => bounds.mask(lon),
            ManualTrim::Time(bounds) => bounds.mask(time),
        }
    }
}

impl fmt::Display for ManualTrim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManualTrim::LonLat { lon, lat } => write!(f, "lon {lon}, lat {lat}"),
            ManualTrim::Lat(bounds) => write!(f, "lat {bounds}"),
            ManualTrim::Lon(bounds) => write!(f, "lon {bounds}"),
            ManualTrim::Time(bounds) => write!(f, "time {bounds}"),
        }
    }
}

/// Trim policy of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrimSpec {
    #[default]
    None,
    Manual(ManualTrim),
    Auto,
}

impl TrimSpec {
    /// Parses the compact form used on the command line.
    ///
    /// - `none`
    /// - `auto`
    /// - `manual,lat,MIN,MAX` (also `lon` and `time`)
    /// - `manual,lonlat,LON_MIN,LON_MAX,LAT_MIN,LAT_MAX`
    ///
    /// Anything else degrades to [`TrimSpec::None`] with a warning.
    pub fn parse(s: &str) -> Self {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        match parts[0].to_ascii_lowercase().as_str() {
            "none" => TrimSpec::None,
            "auto" => TrimSpec::Auto,
            "manual" => match parse_manual(&parts[1..]) {
                Ok(manual) => TrimSpec::Manual(manual),
                Err(reason) => {
                    warn!("manual trim '{s}' {reason}, not trimming data");
                    TrimSpec::None
                }
            },
            _ => {
                warn!("unknown trim mode '{s}', not trimming data");
                TrimSpec::None
            }
        }
    }
}

fn parse_manual(args: &[&str]) -> Result<ManualTrim, String> {
    let kind = args
        .first()
        .ok_or_else(|| "is missing its kind".to_string())?
        .to_ascii_lowercase();
    let bounds = args[1..]
        .iter()
        .map(|v| v.parse::<f64>().map_err(|e| format!("has bad bound '{v}': {e}")))
        .collect::<Result<Vec<f64>, String>>()?;
    let want = if kind == "lonlat" { 4 } else { 2 };
    if bounds.len() != want {
        return Err(format!("needs {want} bounds, found {}", bounds.len()));
    }
    let pair = |i: usize| Bounds::new(bounds[i], bounds[i + 1]);
    match kind.as_str() {
        "lonlat" => Ok(ManualTrim::LonLat {
            lon: pair(0),
            lat: pair(2),
        }),
        "lat" => Ok(ManualTrim::Lat(pair(0))),
        "lon" => Ok(ManualTrim::Lon(pair(0))),
        "time" => Ok(ManualTrim::Time(pair(0))),
        other => Err(format!("has unknown kind '{other}'")),
    }
}

/// The trim that ended up being applied.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppliedTrim {
    None,
    Manual(ManualTrim),
    Region(String),
}

/// Result of the trim stages.
#[derive(Debug, Clone, PartialEq)]
pub enum TrimOutcome {
    Trimmed(AppliedTrim),

    /// Manual bounds removed every photon.
    Emptied,
}

/// Keeps segments with at least one height estimate below `sentinel`.
pub fn sentinel_mask(segments: &LandSegmentRecord, sentinel: f64) -> Vec<bool> {
    segments
        .max_canopy
        .iter()
        .zip(&segments.te_best_fit)
        .zip(&segments.te_median)
        .map(|((&canopy, &best_fit), &median)| {
            canopy < sentinel || best_fit < sentinel || median < sentinel
        })
        .collect()
}

/// Returns the first region, in table order, the track passes through.
pub fn match_region<'a>(
    regions: &'a [ReferenceRegion],
    lat: &[f64],
    lon: &[f64],
) -> Option<&'a ReferenceRegion> {
    regions.iter().find(|r| r.intersects_track(lat, lon))
}

fn region_mask(region: &ReferenceRegion, lat: &[f64], lon: &[f64]) -> Vec<bool> {
    lat.iter()
        .zip(lon)
        .map(|(&lat, &lon)| region.contains(lat, lon))
        .collect()
}

/// Runs the trim stages over both datasets.
///
/// `load_regions` is only called for [`TrimSpec::Auto`].
pub fn trim<F>(
    spec: &TrimSpec,
    load_regions: F,
    sentinel: f64,
    photons: &mut PhotonRecord,
    mut segments: Option<&mut LandSegmentRecord>,
) -> TrimOutcome
where
    F: FnOnce() -> Result<Vec<ReferenceRegion>, SwathError>,
{
    let mut applied = AppliedTrim::None;

    if let TrimSpec::Manual(manual) = spec {
        info!("manual trim; {manual}");
        let mask = manual.photon_mask(photons);
        if !mask.contains(&true) {
            info!("manual trim left no photons");
            return TrimOutcome::Emptied;
        }
        photons.retain(&mask);
        if let Some(segments) = segments.as_deref_mut() {
            let mask = manual.segment_mask(segments);
            segments.retain(&mask);
        }
        applied = AppliedTrim::Manual(*manual);
    }

    if let Some(segments) = segments.as_deref_mut() {
        let before = segments.len();
        let mask = sentinel_mask(segments, sentinel);
        segments.retain(&mask);
        debug!("sentinel filter; kept {} of {before} segments", segments.len());
    }

    if let TrimSpec::Auto = spec {
        match load_regions() {
            Ok(regions) => match match_region(&regions, &photons.lat, &photons.lon) {
                Some(region) => {
                    info!("auto trim; reference region {}", region.name);
                    let mask = region_mask(region, &photons.lat, &photons.lon);
                    photons.retain(&mask);
                    if let Some(segments) = segments.as_deref_mut() {
                        let mask = region_mask(region, &segments.lat, &segments.lon);
                        segments.retain(&mask);
                    }
                    applied = AppliedTrim::Region(region.name.clone());
                }
                None => warn!("no reference region found, not trimming data"),
            },
            Err(e) => warn!("reference regions unavailable, not trimming data; {e}"),
        }
    }

    TrimOutcome::Trimmed(applied)
}
