use crate::{
    beam::{BeamInfo, GroundTrack, Orientation},
    classify::{normalize_labels, PhotonClasses},
    config::SwathConfig,
    error::check_len,
    interp::{interp_or_missing, round_ids},
    product::{LandProduct, PhotonProduct},
    projection::Projection,
    record::{LandSegmentRecord, PhotonRecord, PlanarCoords},
    region::{load_regions, ReferenceRegion},
    rotation::RotationFrame,
    trim::{trim, AppliedTrim, TrimOutcome, TrimSpec},
    SwathError,
};
use log::{debug, info, warn};
use std::{fmt, path::PathBuf, time::Instant};

/// Direction of travel, from the first and last raw photon latitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackDirection {
    Ascending,
    Descending,
}

impl TrackDirection {
    /// `Ascending` when the track ends at least as far from the equator
    /// as it starts.
    pub fn of(lat: &[f64]) -> Self {
        match (lat.first(), lat.last()) {
            (Some(first), Some(last)) if last.abs() < first.abs() => TrackDirection::Descending,
            _ => TrackDirection::Ascending,
        }
    }
}

impl fmt::Display for TrackDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackDirection::Ascending => f.write_str("Ascending"),
            TrackDirection::Descending => f.write_str("Descending"),
        }
    }
}

/// Which optional stages produced data.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwathDiagnostics {
    /// `false` when mean sea level heights are all NaN.
    pub geoid_available: bool,

    /// `false` when solar elevations are all NaN.
    pub solar_available: bool,

    /// `true` when photon classes came from the land segment product.
    pub data_is_mapped: bool,

    pub trim: AppliedTrim,
}

/// Aligned, projected and rotated photon and land segment datasets of
/// one ground track.
#[derive(Debug, Clone)]
pub struct Swath {
    photons: PhotonRecord,
    segments: Option<LandSegmentRecord>,
    projection: Projection,
    rotation: RotationFrame,
    direction: TrackDirection,
    beam: BeamInfo,
    diagnostics: SwathDiagnostics,
}

impl Swath {
    pub fn builder() -> SwathBuilder {
        SwathBuilder {
            photons: None,
            land: None,
            ground_track: None,
            orientation: None,
            trim: TrimSpec::None,
            regions: RegionSource::Unset,
            config: SwathConfig::default(),
        }
    }

    pub fn photons(&self) -> &PhotonRecord {
        &self.photons
    }

    /// `None` without a usable land segment product.
    pub fn segments(&self) -> Option<&LandSegmentRecord> {
        self.segments.as_ref()
    }

    /// Shared by photons and segments.
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Fitted on the photons, applied to both datasets.
    pub fn rotation(&self) -> &RotationFrame {
        &self.rotation
    }

    pub fn direction(&self) -> TrackDirection {
        self.direction
    }

    pub fn beam(&self) -> &BeamInfo {
        &self.beam
    }

    pub fn diagnostics(&self) -> &SwathDiagnostics {
        &self.diagnostics
    }
}

enum RegionSource {
    Unset,
    File(PathBuf),
    Table(Vec<ReferenceRegion>),
}

impl RegionSource {
    fn load(self) -> Result<Vec<ReferenceRegion>, SwathError> {
        match self {
            RegionSource::Unset => Err(SwathError::Builder("region_table")),
            RegionSource::File(path) => load_regions(path),
            RegionSource::Table(regions) => Ok(regions),
        }
    }
}

pub struct SwathBuilder {
    photons: Option<PhotonProduct>,

    land: Option<LandProduct>,

    ground_track: Option<GroundTrack>,

    /// Spacecraft orientation; beam number and strength stay unknown
    /// without it.
    orientation: Option<Orientation>,

    trim: TrimSpec,

    /// Only consulted for [`TrimSpec::Auto`].
    regions: RegionSource,

    config: SwathConfig,
}

impl SwathBuilder {
    pub fn photons(mut self, product: PhotonProduct) -> Self {
        self.photons = Some(product);
        self
    }

    pub fn land(mut self, product: LandProduct) -> Self {
        self.land = Some(product);
        self
    }

    pub fn ground_track(mut self, ground_track: GroundTrack) -> Self {
        self.ground_track = Some(ground_track);
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn trim(mut self, spec: TrimSpec) -> Self {
        self.trim = spec;
        self
    }

    /// Reads reference regions from `path`, lazily, at build time.
    pub fn region_table<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.regions = RegionSource::File(path.into());
        self
    }

    pub fn regions(mut self, regions: Vec<ReferenceRegion>) -> Self {
        self.regions = RegionSource::Table(regions);
        self
    }

    pub fn config(mut self, config: SwathConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the pipeline.
    ///
    /// Returns `Ok(None)` when a manual trim keeps no photons.
    pub fn build(self) -> Result<Option<Swath>, SwathError> {
        let SwathBuilder {
            photons,
            land,
            ground_track,
            orientation,
            trim: trim_spec,
            regions,
            config,
        } = self;

        let product = photons.ok_or(SwathError::Builder("photons"))?;
        let ground_track = ground_track.ok_or(SwathError::Builder("ground_track"))?;

        let missing = product.missing_fields();
        if !missing.is_empty() {
            return Err(SwathError::MissingFields(missing));
        }

        let beam = BeamInfo::new(ground_track, orientation);
        let direction = TrackDirection::of(&product.lat);
        info!(
            "{ground_track}; beam: {}, strength: {}, direction: {direction}",
            beam.beam_number
                .map_or_else(|| "unknown".to_string(), |n| n.to_string()),
            beam.strength
                .map_or_else(|| "unknown".to_string(), |s| s.to_string()),
        );

        let land = match land {
            Some(land) if land.is_usable() => Some(land),
            Some(_) => {
                warn!("land segment product has no usable data");
                None
            }
            None => None,
        };

        let (mut photons, mut segments, geoid_available, solar_available, align_runtime) = {
            let now = Instant::now();
            let Aligned {
                photons,
                segments,
                geoid_available,
                solar_available,
            } = align(&product, land.as_ref(), &config)?;
            (
                photons,
                segments,
                geoid_available,
                solar_available,
                now.elapsed(),
            )
        };

        let (data_is_mapped, classify_runtime) = {
            let now = Instant::now();
            let n = photons.len();
            let classes = match &land {
                Some(land) => match PhotonClasses::map(
                    &product.ph_index_beg,
                    &product.segment_id,
                    &land.classed_pc_indx,
                    &land.classed_pc_flag,
                    &land.ph_segment_id,
                    n,
                ) {
                    Ok(classes) => Some(classes),
                    Err(e) => {
                        warn!("could not map land segment classes onto photons; {e}");
                        None
                    }
                },
                None => None,
            };
            let data_is_mapped = classes.is_some();
            let classes = classes.unwrap_or_else(|| PhotonClasses::unclassified(n));
            photons.truncate(classes.len());
            photons.classification = classes.into_inner();
            photons.check_aligned()?;
            (data_is_mapped, now.elapsed())
        };

        let (applied, trim_runtime) = {
            let now = Instant::now();
            let outcome = trim(
                &trim_spec,
                || regions.load(),
                config.sentinel,
                &mut photons,
                segments.as_mut(),
            );
            match outcome {
                TrimOutcome::Trimmed(applied) => (applied, now.elapsed()),
                TrimOutcome::Emptied => return Ok(None),
            }
        };

        let (projection, rotation, project_runtime) = {
            let now = Instant::now();
            let projection = Projection::for_track(&photons.lat, &photons.lon)
                .ok_or(SwathError::Projection("no finite photon positions"))?;
            let (easting, northing) = projection.project(&photons.lat, &photons.lon);
            let rotation = RotationFrame::fit(&easting, &northing, config.target_angle_deg)?;
            photons.planar = planar(&rotation, easting, northing);

            if let Some(segments) = segments.as_mut() {
                let (easting, northing) = projection.project(&segments.lat, &segments.lon);
                segments.planar = planar(&rotation, easting, northing);
            }
            (projection, rotation, now.elapsed())
        };

        normalize_labels(&mut photons.classification);
        photons.check_aligned()?;
        if let Some(segments) = &segments {
            segments.check_aligned()?;
        }

        debug!(
            "swath; photons: {}, segments: {}, projection: {projection}, phi: {:.4}, align_exec: {:?}, classify_exec: {:?}, trim_exec: {:?}, project_exec: {:?}",
            photons.len(),
            segments.as_ref().map_or(0, LandSegmentRecord::len),
            rotation.phi_deg,
            align_runtime,
            classify_runtime,
            trim_runtime,
            project_runtime,
        );

        Ok(Some(Swath {
            photons,
            segments,
            projection,
            rotation,
            direction,
            beam,
            diagnostics: SwathDiagnostics {
                geoid_available,
                solar_available,
                data_is_mapped,
                trim: applied,
            },
        }))
    }
}

struct Aligned {
    photons: PhotonRecord,
    segments: Option<LandSegmentRecord>,
    geoid_available: bool,
    solar_available: bool,
}

/// Puts both products on the photon time base and attaches the
/// interpolated corrections.
fn align(
    product: &PhotonProduct,
    land: Option<&LandProduct>,
    config: &SwathConfig,
) -> Result<Aligned, SwathError> {
    let n = product.lat.len();
    check_len("lon_ph", n, product.lon.len())?;
    check_len("h_ph", n, product.height.len())?;
    check_len("delta_time", n, product.delta_time.len())?;
    check_len("signal_conf_ph", n, product.signal_conf.len())?;

    let t0 = product
        .delta_time
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let gap = Some(config.gap_threshold_s);

    let (geoid, geoid_available) = interp_or_missing(
        "geoid",
        &product.geoid_delta_time,
        &product.geoid,
        &product.delta_time,
        gap,
    );
    let (solar_elevation, solar_available) = interp_or_missing(
        "solar elevation",
        &product.solar_delta_time,
        &product.solar_elevation,
        &product.delta_time,
        gap,
    );

    #[allow(clippy::cast_precision_loss)]
    let segment_ids: Vec<f64> = product.segment_id.iter().map(|&id| id as f64).collect();
    let (segment_id, _) = interp_or_missing(
        "segment id",
        &product.segment_delta_time,
        &segment_ids,
        &product.delta_time,
        None,
    );

    let photons = PhotonRecord {
        lat: product.lat.clone(),
        lon: product.lon.clone(),
        height: product.height.clone(),
        height_msl: msl(&product.height, &geoid),
        time: product.delta_time.iter().map(|t| t - t0).collect(),
        delta_time: product.delta_time.clone(),
        signal_conf: product.signal_conf.clone(),
        classification: vec![0; n],
        intensity: vec![0; n],
        solar_elevation,
        segment_id: round_ids(&segment_id),
        planar: PlanarCoords::default(),
    };

    let segments = match land {
        Some(land) => {
            let m = land.lat.len();
            check_len("longitude", m, land.lon.len())?;
            check_len("h_max_canopy_abs", m, land.max_canopy.len())?;
            check_len("h_te_best_fit", m, land.te_best_fit.len())?;
            check_len("h_te_median", m, land.te_median.len())?;
            check_len("land_segments/delta_time", m, land.delta_time.len())?;

            let (geoid, _) = interp_or_missing(
                "segment geoid",
                &product.geoid_delta_time,
                &product.geoid,
                &land.delta_time,
                gap,
            );
            Some(LandSegmentRecord {
                lat: land.lat.clone(),
                lon: land.lon.clone(),
                max_canopy: land.max_canopy.clone(),
                te_best_fit: land.te_best_fit.clone(),
                te_median: land.te_median.clone(),
                max_canopy_msl: msl(&land.max_canopy, &geoid),
                te_best_fit_msl: msl(&land.te_best_fit, &geoid),
                te_median_msl: msl(&land.te_median, &geoid),
                time: land.delta_time.iter().map(|t| t - t0).collect(),
                delta_time: land.delta_time.clone(),
                signal_conf: vec![0; m],
                classification: vec![0; m],
                intensity: vec![0; m],
                planar: PlanarCoords::default(),
            })
        }
        None => None,
    };

    Ok(Aligned {
        photons,
        segments,
        geoid_available,
        solar_available,
    })
}

fn msl(heights: &[f64], geoid: &[f64]) -> Vec<f64> {
    heights.iter().zip(geoid).map(|(h, g)| h - g).collect()
}

fn planar(rotation: &RotationFrame, easting: Vec<f64>, northing: Vec<f64>) -> PlanarCoords {
    let (cross_track, along_track) = rotation.apply(&easting, &northing);
    PlanarCoords {
        easting,
        northing,
        cross_track,
        along_track,
    }
}
