pub mod csv;
pub mod kml;
pub mod las;

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Opens `path` for buffered writing.
pub fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Writes through `write` into a new file at `path`.
pub fn write_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let mut wtr = create(path)?;
    write(&mut wtr)?;
    wtr.flush()?;
    Ok(())
}

/// Picks the sample nearest to each whole `step` from the first
/// time through one step past the last.
///
/// `time` must be ascending. Returns indices into `time`; consecutive
/// duplicates are kept so every step has an entry.
pub fn sample_track(time: &[f64], step: f64) -> Vec<usize> {
    let (Some(&first), Some(&last)) = (time.first(), time.last()) else {
        return Vec::new();
    };
    let mut indices = Vec::new();
    let mut t = first;
    while t < last + step {
        let idx = time.partition_point(|&x| x < t);
        let nearest = match idx {
            0 => 0,
            i if i == time.len() => i - 1,
            i if (time[i] - t) < (t - time[i - 1]) => i,
            i => i - 1,
        };
        indices.push(nearest);
        t += step;
    }
    indices
}

#[cfg(test)]
pub(crate) mod fixtures {
    use swath::{GroundTrack, LandProduct, Orientation, PhotonProduct, Swath};

    /// Six photons and two land segments heading north over southern
    /// New Mexico.
    pub fn swath(lat0: f64) -> Swath {
        let n = 6;
        let photons = PhotonProduct {
            lat: (0..n).map(|i| lat0 + 0.001 * i as f64).collect(),
            lon: vec![-106.5; n],
            height: (0..n).map(|i| 1200.0 + i as f64).collect(),
            delta_time: (0..n).map(|i| 100.0 + 0.5 * i as f64).collect(),
            signal_conf: vec![4; n],
            geoid: vec![-20.0; 4],
            geoid_delta_time: vec![100.0, 101.0, 102.0, 103.0],
            solar_elevation: vec![30.0; 4],
            solar_delta_time: vec![100.0, 101.0, 102.0, 103.0],
            ph_index_beg: vec![1, 4],
            segment_id: vec![700, 701],
            segment_delta_time: vec![100.0, 101.5],
        };
        let land = LandProduct {
            lat: vec![lat0 + 0.001, lat0 + 0.004],
            lon: vec![-106.5; 2],
            max_canopy: vec![1215.0, 1216.0],
            te_best_fit: vec![1201.0, 1204.0],
            te_median: vec![1201.5, 1204.5],
            delta_time: vec![100.5, 102.0],
            classed_pc_indx: vec![1, 2, 3, 3],
            classed_pc_flag: vec![1, 1, 2, 3],
            ph_segment_id: vec![700, 700, 700, 701],
        };
        Swath::builder()
            .photons(photons)
            .land(land)
            .ground_track(GroundTrack::Gt1l)
            .orientation(Orientation::Backward)
            .build()
            .unwrap()
            .unwrap()
    }
}
