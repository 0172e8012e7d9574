//! JSON granule reader.
//!
//! A granule holds one product for up to six ground tracks:
//!
//! ```json
//! {
//!   "sc_orient": 0,
//!   "beams": {
//!     "gt1r": { "lat_ph": [...], "lon_ph": [...], ... }
//!   }
//! }
//! ```
//!
//! Field names inside a beam follow the source product. Absent fields
//! read as empty.

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Deserialize};
use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};
use swath::GroundTrack;

#[derive(Debug, Deserialize)]
#[serde(bound = "B: DeserializeOwned")]
pub struct Granule<B> {
    /// Spacecraft orientation flag; 0 backward, 1 forward, 2 in
    /// transition.
    #[serde(default)]
    pub sc_orient: Option<i32>,

    #[serde(default)]
    pub beams: BTreeMap<GroundTrack, B>,
}

impl<B: DeserializeOwned> Granule<B> {
    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::Granule;
    use swath::{GroundTrack, LandProduct, PhotonProduct};

    #[test]
    fn test_photon_granule() {
        let json = r#"{
            "sc_orient": 1,
            "beams": {
                "gt2l": {
                    "lat_ph": [32.0, 32.1],
                    "lon_ph": [-106.5, -106.5],
                    "h_ph": [1200.0, 1201.5],
                    "delta_time": [100.0, 100.5],
                    "signal_conf_ph": [4, 3],
                    "ph_index_beg": [1],
                    "segment_id": [500]
                }
            }
        }"#;
        let granule: Granule<PhotonProduct> = serde_json::from_str(json).unwrap();
        assert_eq!(granule.sc_orient, Some(1));
        let beam = &granule.beams[&GroundTrack::Gt2l];
        assert_eq!(beam.height, vec![1200.0, 1201.5]);
        assert_eq!(beam.signal_conf, vec![4, 3]);
        assert!(beam.geoid.is_empty());
    }

    #[test]
    fn test_land_granule() {
        let json = r#"{
            "beams": {
                "gt1r": {
                    "latitude": [32.0],
                    "longitude": [-106.5],
                    "h_te_best_fit": [1199.0],
                    "classed_pc_flag": [1, -1]
                }
            }
        }"#;
        let granule: Granule<LandProduct> = serde_json::from_str(json).unwrap();
        assert_eq!(granule.sc_orient, None);
        let beam = &granule.beams[&GroundTrack::Gt1r];
        assert_eq!(beam.te_best_fit, vec![1199.0]);
        assert_eq!(beam.classed_pc_flag, vec![1, -1]);
        assert!(beam.max_canopy.is_empty());
    }
}
