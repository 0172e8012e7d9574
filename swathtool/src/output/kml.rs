use super::sample_track;
use anyhow::Result;
use kml::{
    types::{Coord, Geometry, LineString, Placemark},
    Kml, KmlDocument, KmlVersion, KmlWriter,
};
use std::{collections::HashMap, io::Write};

/// Seconds between track vertices.
const TRACK_STEP_S: f64 = 1.0;

/// Writes the track as a single line string, one vertex per second
/// at the nearest sample.
pub fn write_track(
    out: &mut impl Write,
    name: &str,
    time: &[f64],
    lat: &[f64],
    lon: &[f64],
) -> Result<()> {
    let coords: Vec<Coord> = sample_track(time, TRACK_STEP_S)
        .into_iter()
        .map(|i| Coord {
            x: lon[i],
            y: lat[i],
            z: None,
        })
        .collect();

    let placemark = Placemark {
        name: Some(name.to_string()),
        geometry: Some(Geometry::LineString(LineString::from(coords))),
        ..Default::default()
    };
    let doc = Kml::KmlDocument(KmlDocument {
        version: KmlVersion::V22,
        attrs: HashMap::from([(
            "xmlns".to_string(),
            "http://www.opengis.net/kml/2.2".to_string(),
        )]),
        elements: vec![Kml::Document {
            attrs: HashMap::new(),
            elements: vec![Kml::Placemark(placemark)],
        }],
    });

    KmlWriter::from_writer(out).write(&doc)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_track;
    use crate::output::fixtures;

    #[test]
    fn test_write_track() {
        let swath = fixtures::swath(32.0);
        let p = swath.photons();
        let mut out = Vec::new();
        write_track(&mut out, "ATL03_gt1l", &p.time, &p.lat, &p.lon).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("<name>ATL03_gt1l</name>"));
        assert!(text.contains("<LineString>"));
        assert!(text.contains("<coordinates>"));
        assert!(text.contains("-106.5"));
    }
}
