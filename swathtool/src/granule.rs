//! Granule file name metadata.
//!
//! Names look like `ATL03_20190928175636_00280506_002_01`, optionally
//! followed by subsetting suffixes such as `_sreq_3002`.

use anyhow::{anyhow, bail, Result};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GranuleName {
    /// Product short name, e.g. `ATL03`.
    pub product: String,

    /// Acquisition start, `YYYYMMDDhhmmss` UTC.
    pub acquired: String,

    /// Reference ground track.
    pub track: u16,

    /// Orbital cycle.
    pub cycle: u8,

    /// Granule region.
    pub region: u8,

    pub release: String,

    pub version: String,
}

impl GranuleName {
    /// Acquisition start as `YYYY-MM-DD hh:mm:ss`.
    pub fn acquired_iso(&self) -> String {
        let a = &self.acquired;
        format!(
            "{}-{}-{} {}:{}:{}",
            &a[0..4],
            &a[4..6],
            &a[6..8],
            &a[8..10],
            &a[10..12],
            &a[12..14]
        )
    }
}

impl FromStr for GranuleName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('_').collect();
        if parts.len() < 5 {
            bail!("granule name '{s}' has too few fields");
        }
        let (product, acquired, rgt, release, version) =
            (parts[0], parts[1], parts[2], parts[3], parts[4]);

        if !product.starts_with("ATL") {
            bail!("granule name '{s}' has unknown product '{product}'");
        }
        if acquired.len() != 14 || !acquired.bytes().all(|b| b.is_ascii_digit()) {
            bail!("granule name '{s}' has bad timestamp '{acquired}'");
        }
        if rgt.len() != 8 || !rgt.is_ascii() {
            bail!("granule name '{s}' has bad track field '{rgt}'");
        }
        let num = |field: &str| {
            field
                .parse::<u16>()
                .map_err(|e| anyhow!("granule name '{s}' has bad field '{field}': {e}"))
        };
        let track = num(&rgt[0..4])?;
        let cycle = u8::try_from(num(&rgt[4..6])?)?;
        let region = u8::try_from(num(&rgt[6..8])?)?;

        Ok(Self {
            product: product.to_string(),
            acquired: acquired.to_string(),
            track,
            cycle,
            region,
            release: release.to_string(),
            version: version.to_string(),
        })
    }
}

impl fmt::Display for GranuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{:04}{:02}{:02}_{}_{}",
            self.product,
            self.acquired,
            self.track,
            self.cycle,
            self.region,
            self.release,
            self.version
        )
    }
}
