//! LAS 1.2 point cloud writer.
//!
//! Points use record format 0. The projection is carried in a
//! GeoKeyDirectoryTag VLR.
//!
//! # References
//!
//! 1. [LAS Specification 1.2](https://www.asprs.org/a/society/committees/standards/asprs_las_format_v12.pdf)

use anyhow::{bail, Result};
use byteorder::{LittleEndian as LE, WriteBytesExt};
use std::io::Write;
use swath::{Projection, Swath};

const HEADER_SIZE: u16 = 227;
const VLR_HEADER_SIZE: u32 = 54;
const POINT_RECORD_LEN: u16 = 20;
const SCALE: f64 = 0.01;

/// Writes every photon of `swath`, projected coordinates and
/// ellipsoidal height.
pub fn write_photons(out: &mut impl Write, swath: &Swath) -> Result<()> {
    let p = swath.photons();
    let n = u32::try_from(p.len())?;
    let geokeys = geokeys(swath.projection());
    #[allow(clippy::cast_possible_truncation)]
    let geokeys_len = (geokeys.len() * 2) as u16;

    let (min, max) = extent(&p.planar.easting, &p.planar.northing, &p.height);
    let offset = [
        (min[0] / 1000.0).floor() * 1000.0,
        (min[1] / 1000.0).floor() * 1000.0,
        0.0,
    ];

    // Public header block.
    out.write_all(b"LASF")?;
    out.write_u16::<LE>(0)?; // file source id
    out.write_u16::<LE>(0)?; // global encoding
    out.write_all(&[0; 16])?; // project id
    out.write_u8(1)?;
    out.write_u8(2)?;
    out.write_all(&padded::<32>("swathtool"))?;
    out.write_all(&padded::<32>(concat!("swathtool ", env!("CARGO_PKG_VERSION"))))?;
    out.write_u16::<LE>(0)?; // creation day of year
    out.write_u16::<LE>(0)?; // creation year
    out.write_u16::<LE>(HEADER_SIZE)?;
    out.write_u32::<LE>(u32::from(HEADER_SIZE) + VLR_HEADER_SIZE + u32::from(geokeys_len))?;
    out.write_u32::<LE>(1)?; // number of VLRs
    out.write_u8(0)?; // point data format
    out.write_u16::<LE>(POINT_RECORD_LEN)?;
    out.write_u32::<LE>(n)?;
    out.write_u32::<LE>(n)?;
    for _ in 0..4 {
        out.write_u32::<LE>(0)?;
    }
    for _ in 0..3 {
        out.write_f64::<LE>(SCALE)?;
    }
    for o in offset {
        out.write_f64::<LE>(o)?;
    }
    for axis in 0..3 {
        out.write_f64::<LE>(max[axis])?;
        out.write_f64::<LE>(min[axis])?;
    }

    // GeoKeyDirectoryTag.
    out.write_u16::<LE>(0)?;
    out.write_all(&padded::<16>("LASF_Projection"))?;
    out.write_u16::<LE>(34735)?;
    out.write_u16::<LE>(geokeys_len)?;
    out.write_all(&padded::<32>("GeoKeyDirectoryTag"))?;
    for key in geokeys {
        out.write_u16::<LE>(key)?;
    }

    for i in 0..p.len() {
        out.write_i32::<LE>(scaled(p.planar.easting[i], offset[0])?)?;
        out.write_i32::<LE>(scaled(p.planar.northing[i], offset[1])?)?;
        out.write_i32::<LE>(scaled(p.height[i], offset[2])?)?;
        out.write_u16::<LE>(p.intensity[i])?;
        // Single return: return number 1 of 1.
        out.write_u8(0b0000_1001)?;
        out.write_u8(u8::try_from(p.classification[i]).unwrap_or(0))?;
        out.write_i8(0)?; // scan angle rank
        out.write_u8(u8::try_from(p.signal_conf[i]).unwrap_or(0))?;
        out.write_u16::<LE>(0)?; // point source id
    }
    Ok(())
}

/// GeoKey directory declaring a projected system by EPSG code.
fn geokeys(projection: Projection) -> Vec<u16> {
    vec![
        // Directory version, key revision, minor revision, key count.
        1,
        1,
        0,
        4,
        // GTModelTypeGeoKey: projected.
        1024,
        0,
        1,
        1,
        // GTRasterTypeGeoKey: pixel is area.
        1025,
        0,
        1,
        1,
        // ProjectedCSTypeGeoKey.
        3072,
        0,
        1,
        projection.epsg(),
        // ProjLinearUnitsGeoKey: meter.
        3076,
        0,
        1,
        9001,
    ]
}

fn extent(x: &[f64], y: &[f64], z: &[f64]) -> ([f64; 3], [f64; 3]) {
    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    for ((&x, &y), &z) in x.iter().zip(y).zip(z) {
        for (axis, v) in [x, y, z].into_iter().enumerate() {
            min[axis] = min[axis].min(v);
            max[axis] = max[axis].max(v);
        }
    }
    (min, max)
}

fn scaled(value: f64, offset: f64) -> Result<i32> {
    let v = ((value - offset) / SCALE).round();
    if !(f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&v) {
        bail!("coordinate {value} out of range for LAS offset {offset}");
    }
    #[allow(clippy::cast_possible_truncation)]
    Ok(v as i32)
}

fn padded<const N: usize>(s: &str) -> [u8; N] {
    let mut buf = [0; N];
    let len = s.len().min(N);
    buf[..len].copy_from_slice(&s.as_bytes()[..len]);
    buf
}

#[cfg(test)]
mod tests {
    use super::{write_photons, HEADER_SIZE};
    use crate::output::fixtures;
    use byteorder::{LittleEndian as LE, ReadBytesExt};
    use std::io::{Cursor, Seek, SeekFrom};

    #[test]
    fn test_write_photons() {
        let swath = fixtures::swath(32.0);
        let mut buf = Vec::new();
        write_photons(&mut buf, &swath).unwrap();

        let n = swath.photons().len();
        let data_offset = 227 + 54 + 40;
        assert_eq!(buf.len(), data_offset + 20 * n);
        assert_eq!(&buf[0..4], b"LASF");

        let mut rdr = Cursor::new(&buf);
        rdr.seek(SeekFrom::Start(94)).unwrap();
        assert_eq!(rdr.read_u16::<LE>().unwrap(), HEADER_SIZE);
        assert_eq!(rdr.read_u32::<LE>().unwrap(), data_offset as u32);
        assert_eq!(rdr.read_u32::<LE>().unwrap(), 1);
        assert_eq!(rdr.read_u8().unwrap(), 0);
        assert_eq!(rdr.read_u16::<LE>().unwrap(), 20);
        assert_eq!(rdr.read_u32::<LE>().unwrap(), n as u32);

        // ProjectedCSTypeGeoKey value, third key of four.
        rdr.seek(SeekFrom::Start(data_offset as u64 - 10)).unwrap();
        assert_eq!(rdr.read_u16::<LE>().unwrap(), 32613);

        // First point: height and classification.
        rdr.seek(SeekFrom::Start(data_offset as u64 + 8)).unwrap();
        assert_eq!(rdr.read_i32::<LE>().unwrap(), 120_000);
        rdr.seek(SeekFrom::Current(3)).unwrap();
        assert_eq!(rdr.read_u8().unwrap(), 1);
        rdr.seek(SeekFrom::Current(1)).unwrap();
        assert_eq!(rdr.read_u8().unwrap(), 4);
    }
}
