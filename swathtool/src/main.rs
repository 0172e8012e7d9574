mod granule;
mod input;
mod options;
mod output;

use anyhow::{bail, Result};
use clap::Parser;
use granule::GranuleName;
use input::Granule;
use itertools::Itertools;
use log::{error, info, warn};
use options::Cli;
use rayon::prelude::*;
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
    time::Instant,
};
use swath::{GroundTrack, LandProduct, Orientation, PhotonProduct, Swath, TrimSpec};

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::init();

    for path in std::iter::once(&cli.atl03).chain(cli.atl08.as_ref()) {
        if !path.is_file() {
            bail!("input granule {} does not exist", path.display());
        }
    }
    fs::create_dir_all(&cli.out_dir)?;

    let trim = TrimSpec::parse(&cli.trim);
    let atl03_name = output_stem(&cli.atl03);
    let atl08_name = cli.atl08.as_deref().map(output_stem);

    let mut atl03: Granule<PhotonProduct> = Granule::read(&cli.atl03)?;
    let mut atl08: Option<Granule<LandProduct>> =
        cli.atl08.as_deref().map(Granule::read).transpose()?;
    let orientation = atl03.sc_orient.and_then(Orientation::from_flag);
    if orientation.is_none() {
        warn!("spacecraft orientation unknown, beam numbers unavailable");
    }

    let ground_tracks: Vec<GroundTrack> = if cli.ground_tracks.is_empty() {
        atl03.beams.keys().copied().collect()
    } else {
        cli.ground_tracks.iter().copied().unique().collect()
    };

    let jobs: Vec<Job> = ground_tracks
        .into_iter()
        .filter_map(|ground_track| {
            let Some(photons) = atl03.beams.remove(&ground_track) else {
                warn!("{ground_track} not in photon granule, skipping");
                return None;
            };
            let land = atl08.as_mut().and_then(|g| g.beams.remove(&ground_track));
            Some(Job {
                ground_track,
                photons,
                land,
            })
        })
        .collect();

    let ctx = Context {
        cli: &cli,
        trim,
        orientation,
        atl03_name,
        atl08_name,
    };
    let failed: Vec<GroundTrack> = jobs
        .into_par_iter()
        .filter_map(|job| {
            let ground_track = job.ground_track;
            match ctx.run(job) {
                Ok(()) => None,
                Err(e) => {
                    error!("{ground_track}: {e:#}");
                    Some(ground_track)
                }
            }
        })
        .collect();

    if !failed.is_empty() {
        bail!("could not process {}", failed.iter().join(", "));
    }
    Ok(())
}

/// One ground track's worth of input.
struct Job {
    ground_track: GroundTrack,
    photons: PhotonProduct,
    land: Option<LandProduct>,
}

/// Settings shared by every job of a run.
struct Context<'a> {
    cli: &'a Cli,
    trim: TrimSpec,
    orientation: Option<Orientation>,
    atl03_name: String,
    atl08_name: Option<String>,
}

impl Context<'_> {
    fn run(&self, job: Job) -> Result<()> {
        let Job {
            ground_track,
            photons,
            land,
        } = job;
        let now = Instant::now();

        let mut builder = Swath::builder()
            .photons(photons)
            .ground_track(ground_track)
            .trim(self.trim)
            .region_table(&self.cli.region_table);
        if let Some(orientation) = self.orientation {
            builder = builder.orientation(orientation);
        }
        if let Some(land) = land {
            builder = builder.land(land);
        }

        let Some(swath) = builder.build()? else {
            info!("{ground_track}: no photons left after trimming, nothing written");
            return Ok(());
        };
        info!(
            "{ground_track}: {} photons, {} land segments, {}",
            swath.photons().len(),
            swath.segments().map_or(0, |s| s.len()),
            swath.projection()
        );

        self.write_outputs(&swath)?;
        info!("{ground_track}: completed in {:?}", now.elapsed());
        Ok(())
    }

    fn write_outputs(&self, swath: &Swath) -> Result<()> {
        let gt = swath.beam().ground_track;
        let atl03_stem = format!("{}_{gt}", self.atl03_name);
        let p = swath.photons();

        if self.cli.las {
            output::write_file(&self.out_path(&atl03_stem, "las"), |w| {
                output::las::write_photons(w, swath)
            })?;
        }
        if self.cli.kml {
            output::write_file(&self.out_path(&atl03_stem, "kml"), |w| {
                output::kml::write_track(w, &atl03_stem, &p.time, &p.lat, &p.lon)
            })?;
        }
        if self.cli.csv {
            output::write_file(&self.out_path(&atl03_stem, "csv"), |w| {
                output::csv::write_photons(w, swath)
            })?;
        }

        if let (Some(segments), Some(atl08_name)) = (swath.segments(), &self.atl08_name) {
            let atl08_stem = format!("{atl08_name}_{gt}");
            if self.cli.kml {
                output::write_file(&self.out_path(&atl08_stem, "kml"), |w| {
                    output::kml::write_track(
                        w,
                        &atl08_stem,
                        &segments.time,
                        &segments.lat,
                        &segments.lon,
                    )
                })?;
            }
            if self.cli.csv {
                output::write_file(&self.out_path(&atl08_stem, "csv"), |w| {
                    output::csv::write_segments(w, swath, segments)
                })?;
            }
        }
        Ok(())
    }

    fn out_path(&self, stem: &str, ext: &str) -> PathBuf {
        self.cli.out_dir.join(format!("{stem}.{ext}"))
    }
}

/// Output name for a granule: its canonical name when it parses, its
/// file stem otherwise.
fn output_stem(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("granule");
    match stem.parse::<GranuleName>() {
        Ok(name) => {
            info!(
                "{}; acquired: {}, track: {}, cycle: {}, region: {}, release: {}",
                name.product,
                name.acquired_iso(),
                name.track,
                name.cycle,
                name.region,
                name.release
            );
            name.to_string()
        }
        Err(e) => {
            warn!("{e}, naming outputs after the file");
            stem.to_string()
        }
    }
}
