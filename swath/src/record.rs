//! Struct-of-arrays records for photons and land segments.
//!
//! Index `i` of every field refers to the same photon (or segment).
//! Trimming removes the same indices from every field at once.

use crate::{error::check_len, SwathError};

/// Projected and track-relative coordinates, filled by the
/// projection stage.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanarCoords {
    pub easting: Vec<f64>,
    pub northing: Vec<f64>,
    pub cross_track: Vec<f64>,
    pub along_track: Vec<f64>,
}

impl PlanarCoords {
    pub fn len(&self) -> usize {
        self.easting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.easting.is_empty()
    }

    fn check(&self, expected: usize) -> Result<(), SwathError> {
        check_len("easting", expected, self.easting.len())?;
        check_len("northing", expected, self.northing.len())?;
        check_len("cross_track", expected, self.cross_track.len())?;
        check_len("along_track", expected, self.along_track.len())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhotonRecord {
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,

    /// Height above the WGS-84 ellipsoid (m).
    pub height: Vec<f64>,

    /// Height above mean sea level (m); NaN without a geoid.
    pub height_msl: Vec<f64>,

    /// Seconds since the first photon of the beam.
    pub time: Vec<f64>,

    /// Seconds since the product epoch.
    pub delta_time: Vec<f64>,

    pub signal_conf: Vec<i8>,
    pub classification: Vec<i8>,
    pub intensity: Vec<u16>,

    /// Degrees; NaN where the solar series has gaps.
    pub solar_elevation: Vec<f64>,

    /// Geolocation segment each photon falls in, if known.
    pub segment_id: Vec<Option<i64>>,

    pub planar: PlanarCoords,
}

impl PhotonRecord {
    pub fn len(&self) -> usize {
        self.lat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lat.is_empty()
    }

    /// Checks that every geodetic field has the same length, and the
    /// planar fields too once projected.
    pub fn check_aligned(&self) -> Result<(), SwathError> {
        let n = self.len();
        check_len("lon", n, self.lon.len())?;
        check_len("height", n, self.height.len())?;
        check_len("height_msl", n, self.height_msl.len())?;
        check_len("time", n, self.time.len())?;
        check_len("delta_time", n, self.delta_time.len())?;
        check_len("signal_conf", n, self.signal_conf.len())?;
        check_len("classification", n, self.classification.len())?;
        check_len("intensity", n, self.intensity.len())?;
        check_len("solar_elevation", n, self.solar_elevation.len())?;
        check_len("segment_id", n, self.segment_id.len())?;
        if !self.planar.is_empty() {
            self.planar.check(n)?;
        }
        Ok(())
    }

    /// Shortens every field to `len`.
    pub fn truncate(&mut self, len: usize) {
        self.lat.truncate(len);
        self.lon.truncate(len);
        self.height.truncate(len);
        self.height_msl.truncate(len);
        self.time.truncate(len);
        self.delta_time.truncate(len);
        self.signal_conf.truncate(len);
        self.classification.truncate(len);
        self.intensity.truncate(len);
        self.solar_elevation.truncate(len);
        self.segment_id.truncate(len);
    }

    /// Keeps photons whose `mask` entry is `true`.
    ///
    /// Must run before projection.
    pub fn retain(&mut self, mask: &[bool]) {
        debug_assert_eq!(mask.len(), self.len());
        debug_assert!(self.planar.is_empty());
        retain(&mut self.lat, mask);
        retain(&mut self.lon, mask);
        retain(&mut self.height, mask);
        retain(&mut self.height_msl, mask);
        retain(&mut self.time, mask);
        retain(&mut self.delta_time, mask);
        retain(&mut self.signal_conf, mask);
        retain(&mut self.classification, mask);
        retain(&mut self.intensity, mask);
        retain(&mut self.solar_elevation, mask);
        retain(&mut self.segment_id, mask);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LandSegmentRecord {
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,

    /// Ellipsoidal heights (m), [`crate::SENTINEL_HEIGHT`] when absent.
    pub max_canopy: Vec<f64>,
    pub te_best_fit: Vec<f64>,
    pub te_median: Vec<f64>,

    /// The same heights relative to mean sea level.
    pub max_canopy_msl: Vec<f64>,
    pub te_best_fit_msl: Vec<f64>,
    pub te_median_msl: Vec<f64>,

    /// Seconds since the first photon of the beam.
    pub time: Vec<f64>,
    pub delta_time: Vec<f64>,

    pub signal_conf: Vec<i8>,
    pub classification: Vec<i8>,
    pub intensity: Vec<u16>,

    pub planar: PlanarCoords,
}

impl LandSegmentRecord {
    pub fn len(&self) -> usize {
        self.lat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lat.is_empty()
    }

    pub fn check_aligned(&self) -> Result<(), SwathError> {
        let n = self.len();
        check_len("lon", n, self.lon.len())?;
        check_len("max_canopy", n, self.max_canopy.len())?;
        check_len("te_best_fit", n, self.te_best_fit.len())?;
        check_len("te_median", n, self.te_median.len())?;
        check_len("max_canopy_msl", n, self.max_canopy_msl.len())?;
        check_len("te_best_fit_msl", n, self.te_best_fit_msl.len())?;
        check_len("te_median_msl", n, self.te_median_msl.len())?;
        check_len("time", n, self.time.len())?;
        check_len("delta_time", n, self.delta_time.len())?;
        check_len("signal_conf", n, self.signal_conf.len())?;
        check_len("classification", n, self.classification.len())?;
        check_len("intensity", n, self.intensity.len())?;
        if !self.planar.is_empty() {
            self.planar.check(n)?;
        }
        Ok(())
    }

    /// Keeps segments whose `mask` entry is `true`.
    ///
    /// Must run before projection.
    pub fn retain(&mut self, mask: &[bool]) {
        debug_assert_eq!(mask.len(), self.len());
        debug_assert!(self.planar.is_empty());
        retain(&mut self.lat, mask);
        retain(&mut self.lon, mask);
        retain(&mut self.max_canopy, mask);
        retain(&mut self.te_best_fit, mask);
        retain(&mut self.te_median, mask);
        retain(&mut self.max_canopy_msl, mask);
        retain(&mut self.te_best_fit_msl, mask);
        retain(&mut self.te_median_msl, mask);
        retain(&mut self.time, mask);
        retain(&mut self.delta_time, mask);
        retain(&mut self.signal_conf, mask);
        retain(&mut self.classification, mask);
        retain(&mut self.intensity, mask);
    }
}

fn retain<T>(values: &mut Vec<T>, mask: &[bool]) {
    let mut keep = mask.iter();
    values.retain(|_| keep.next().copied().unwrap_or(false));
}

#[cfg(test)]
mod tests {
    use super::{LandSegmentRecord, PhotonRecord};

    fn photons(n: usize) -> PhotonRecord {
        let ramp: Vec<f64> = (0..n).map(|i| i as f64).collect();
        PhotonRecord {
            lat: ramp.clone(),
            lon: ramp.clone(),
            height: ramp.clone(),
            height_msl: ramp.clone(),
            time: ramp.clone(),
            delta_time: ramp.clone(),
            signal_conf: vec![4; n],
            classification: vec![1; n],
            intensity: vec![0; n],
            solar_elevation: ramp,
            segment_id: (0..n).map(|i| Some(i as i64)).collect(),
            planar: Default::default(),
        }
    }

    #[test]
    fn test_retain_keeps_alignment() {
        let mut record = photons(5);
        record.retain(&[true, false, true, false, true]);
        record.check_aligned().unwrap();
        assert_eq!(record.lat, vec![0.0, 2.0, 4.0]);
        assert_eq!(record.segment_id, vec![Some(0), Some(2), Some(4)]);
    }

    #[test]
    fn test_truncate() {
        let mut record = photons(5);
        record.truncate(2);
        record.check_aligned().unwrap();
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_misaligned() {
        let mut record = photons(3);
        record.height.pop();
        assert!(record.check_aligned().is_err());

        let segments = LandSegmentRecord {
            lat: vec![1.0],
            ..Default::default()
        };
        assert!(segments.check_aligned().is_err());
    }
}
