use anyhow::Result;
use std::io::Write;
use swath::{LandSegmentRecord, Swath};

/// Beam and projection columns repeated on every row.
struct Labels {
    ground_track: &'static str,
    beam_number: String,
    beam_type: String,
    zone: String,
    hemisphere: String,
}

impl Labels {
    fn new(swath: &Swath) -> Self {
        let beam = swath.beam();
        let projection = swath.projection();
        Self {
            ground_track: beam.ground_track.as_str(),
            beam_number: beam
                .beam_number
                .map_or_else(|| "NaN".to_string(), |n| n.to_string()),
            beam_type: beam
                .strength
                .map_or_else(|| "NaN".to_string(), |s| s.to_string()),
            zone: projection.zone_label(),
            hemisphere: projection.hemisphere().to_string(),
        }
    }
}

fn planar_header(swath: &Swath) -> &'static str {
    if swath.projection().is_polar() {
        "Polar Stereo X (m),Polar Stereo Y (m),EPSG Code,Hemisphere"
    } else {
        "UTM Easting (m),UTM Northing (m),UTM Zone,UTM Hemisphere"
    }
}

/// Writes one row per photon.
pub fn write_photons(out: &mut impl Write, swath: &Swath) -> Result<()> {
    let labels = Labels::new(swath);
    let p = swath.photons();
    writeln!(
        out,
        "Time (sec),Delta Time (sec),Segment ID,GT Num,Beam Num,Beam Type,Latitude (deg),Longitude (deg),{},Cross-Track (m),Along-Track (m),Height (m HAE),Height (m MSL),Classification,Signal Confidence,Solar Elevation (deg)",
        planar_header(swath)
    )?;
    for i in 0..p.len() {
        let segment_id = p.segment_id[i].map_or_else(|| "NaN".to_string(), |id| id.to_string());
        writeln!(
            out,
            "{},{},{segment_id},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            p.time[i],
            p.delta_time[i],
            labels.ground_track,
            labels.beam_number,
            labels.beam_type,
            p.lat[i],
            p.lon[i],
            p.planar.easting[i],
            p.planar.northing[i],
            labels.zone,
            labels.hemisphere,
            p.planar.cross_track[i],
            p.planar.along_track[i],
            p.height[i],
            p.height_msl[i],
            p.classification[i],
            p.signal_conf[i],
            p.solar_elevation[i],
        )?;
    }
    Ok(())
}

/// Writes one row per land segment.
pub fn write_segments(
    out: &mut impl Write,
    swath: &Swath,
    segments: &LandSegmentRecord,
) -> Result<()> {
    let labels = Labels::new(swath);
    let s = segments;
    writeln!(
        out,
        "Time (sec),Delta Time (sec),GT Num,Beam Num,Beam Type,Latitude (deg),Longitude (deg),{},Cross-Track (m),Along-Track (m),Max Canopy (m),Terrain Best Fit (m),Terrain Median (m),Max Canopy (m MSL),Terrain Best Fit (m MSL),Terrain Median (m MSL)",
        planar_header(swath)
    )?;
    for i in 0..s.len() {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            s.time[i],
            s.delta_time[i],
            labels.ground_track,
            labels.beam_number,
            labels.beam_type,
            s.lat[i],
            s.lon[i],
            s.planar.easting[i],
            s.planar.northing[i],
            labels.zone,
            labels.hemisphere,
            s.planar.cross_track[i],
            s.planar.along_track[i],
            s.max_canopy[i],
            s.te_best_fit[i],
            s.te_median[i],
            s.max_canopy_msl[i],
            s.te_best_fit_msl[i],
            s.te_median_msl[i],
        )?;
    }
    Ok(())
}
