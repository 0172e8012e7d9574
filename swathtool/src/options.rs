use clap::Parser;
use std::path::PathBuf;
use swath::GroundTrack;

/// Align photon and land segment granules into track-relative swaths.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Photon granule (JSON).
    #[arg(long)]
    pub atl03: PathBuf,

    /// Land segment granule (JSON) of the same pass.
    #[arg(long)]
    pub atl08: Option<PathBuf>,

    /// Output directory.
    #[arg(short, long)]
    pub out_dir: PathBuf,

    /// Ground tracks to process, e.g. "gt1r,gt2r". Defaults to every
    /// track in the photon granule.
    #[arg(short, long, value_delimiter = ',')]
    pub ground_tracks: Vec<GroundTrack>,

    /// Trim mode: "none", "auto", "manual,lat,MIN,MAX",
    /// "manual,lon,MIN,MAX", "manual,time,MIN,MAX" or
    /// "manual,lonlat,LON_MIN,LON_MAX,LAT_MIN,LAT_MAX".
    #[arg(short, long, default_value = "none")]
    pub trim: String,

    /// Reference region table used by auto trim.
    #[arg(long, default_value = "kmlBounds.txt")]
    pub region_table: PathBuf,

    /// Write a LAS point cloud of the photons.
    #[arg(long, default_value_t = false)]
    pub las: bool,

    /// Write 1 Hz KML track lines.
    #[arg(long, default_value_t = false)]
    pub kml: bool,

    /// Write CSV tables of photons and land segments.
    #[arg(long, default_value_t = false)]
    pub csv: bool,
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use swath::GroundTrack;

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "swathtool",
            "--atl03",
            "ATL03_20190928175636_00280506_002_01.json",
            "--out-dir",
            "out",
            "-g",
            "gt1r,GT3L",
            "--trim",
            "manual,lat,32.1,32.6",
            "--csv",
        ])
        .unwrap();
        assert_eq!(cli.ground_tracks, vec![GroundTrack::Gt1r, GroundTrack::Gt3l]);
        assert_eq!(cli.trim, "manual,lat,32.1,32.6");
        assert!(cli.atl08.is_none());
        assert!(cli.csv && !cli.las && !cli.kml);
        assert_eq!(cli.region_table.to_str(), Some("kmlBounds.txt"));
    }

    #[test]
    fn test_bad_ground_track() {
        assert!(Cli::try_parse_from([
            "swathtool",
            "--atl03",
            "a.json",
            "--out-dir",
            "out",
            "-g",
            "gt9x"
        ])
        .is_err());
    }
}
