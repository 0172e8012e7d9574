//! Raw per-beam inputs, as handed over by a product reader.
//!
//! Readers fill these from the named fields of the two source
//! products. A field the source lacks is left empty; the pipeline
//! decides which empty fields are fatal.

/// Per-photon product for one ground track.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhotonProduct {
    /// `heights/lat_ph`
    #[cfg_attr(feature = "serde", serde(rename = "lat_ph"))]
    pub lat: Vec<f64>,

    /// `heights/lon_ph`
    #[cfg_attr(feature = "serde", serde(rename = "lon_ph"))]
    pub lon: Vec<f64>,

    /// `heights/h_ph`, meters above the WGS-84 ellipsoid.
    #[cfg_attr(feature = "serde", serde(rename = "h_ph"))]
    pub height: Vec<f64>,

    /// `heights/delta_time`, seconds since the product epoch.
    pub delta_time: Vec<f64>,

    /// `heights/signal_conf_ph`, land surface column.
    #[cfg_attr(feature = "serde", serde(rename = "signal_conf_ph"))]
    pub signal_conf: Vec<i8>,

    /// `geophys_corr/geoid`
    pub geoid: Vec<f64>,

    /// `geophys_corr/delta_time`
    pub geoid_delta_time: Vec<f64>,

    /// `geolocation/solar_elevation`
    pub solar_elevation: Vec<f64>,

    /// `geolocation/delta_time`
    pub solar_delta_time: Vec<f64>,

    /// `geolocation/ph_index_beg`, 1-based; 0 marks a segment without
    /// photons.
    pub ph_index_beg: Vec<i64>,

    /// `geolocation/segment_id`
    pub segment_id: Vec<i64>,

    /// `geolocation/delta_time`, one per geolocation segment.
    pub segment_delta_time: Vec<f64>,
}

impl PhotonProduct {
    /// Returns the names of required fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.lat.is_empty() {
            missing.push("Latitude (lat_ph)");
        }
        if self.lon.is_empty() {
            missing.push("Longitude (lon_ph)");
        }
        if self.height.is_empty() {
            missing.push("Height (h_ph)");
        }
        if self.delta_time.is_empty() {
            missing.push("Delta Time (delta_time)");
        }
        if self.signal_conf.is_empty() {
            missing.push("Signal Confidence (signal_conf_ph)");
        }
        missing
    }
}

/// Per-land-segment product for one ground track.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LandProduct {
    /// `land_segments/latitude`
    #[cfg_attr(feature = "serde", serde(rename = "latitude"))]
    pub lat: Vec<f64>,

    /// `land_segments/longitude`
    #[cfg_attr(feature = "serde", serde(rename = "longitude"))]
    pub lon: Vec<f64>,

    /// `land_segments/canopy/h_max_canopy_abs`
    #[cfg_attr(feature = "serde", serde(rename = "h_max_canopy_abs"))]
    pub max_canopy: Vec<f64>,

    /// `land_segments/terrain/h_te_best_fit`
    #[cfg_attr(feature = "serde", serde(rename = "h_te_best_fit"))]
    pub te_best_fit: Vec<f64>,

    /// `land_segments/terrain/h_te_median`
    #[cfg_attr(feature = "serde", serde(rename = "h_te_median"))]
    pub te_median: Vec<f64>,

    /// `land_segments/delta_time`
    pub delta_time: Vec<f64>,

    /// `signal_photons/classed_pc_indx`, 1-based photon index within
    /// its geolocation segment.
    pub classed_pc_indx: Vec<i64>,

    /// `signal_photons/classed_pc_flag`
    pub classed_pc_flag: Vec<i8>,

    /// `signal_photons/ph_segment_id`
    pub ph_segment_id: Vec<i64>,
}

impl LandProduct {
    /// Segments without coordinates, heights or times cannot be placed
    /// on the track.
    pub fn is_usable(&self) -> bool {
        [
            &self.lat,
            &self.lon,
            &self.max_canopy,
            &self.te_best_fit,
            &self.te_median,
            &self.delta_time,
        ]
        .iter()
        .all(|field| !field.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::{LandProduct, PhotonProduct};

    #[test]
    fn test_missing_fields() {
        let product = PhotonProduct {
            lat: vec![1.0],
            delta_time: vec![0.0],
            ..Default::default()
        };
        assert_eq!(
            product.missing_fields(),
            vec![
                "Longitude (lon_ph)",
                "Height (h_ph)",
                "Signal Confidence (signal_conf_ph)"
            ]
        );
    }

    #[test]
    fn test_land_usable() {
        let mut land = LandProduct::default();
        assert!(!land.is_usable());
        land.lat = vec![1.0];
        land.lon = vec![2.0];
        assert!(!land.is_usable());
        land.max_canopy = vec![10.0];
        land.te_best_fit = vec![5.0];
        land.te_median = vec![5.5];
        land.delta_time = vec![100.0];
        assert!(land.is_usable());
        land.te_best_fit.clear();
        assert!(!land.is_usable());
    }
}
