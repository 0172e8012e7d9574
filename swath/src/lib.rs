//! Photon and land-segment swath alignment.
//!
//! A [`Swath`] is built from the photon product of one ground track and,
//! optionally, the matching land segment product. Building aligns the
//! correction series onto the photon time base, joins segment
//! classifications onto photons, trims, projects and finally rotates
//! both datasets into a track-relative frame.

mod beam;
mod classify;
mod config;
mod error;
mod interp;
mod product;
mod projection;
mod record;
mod region;
mod rotation;
mod swath;
mod trim;

pub use crate::{
    beam::{BeamInfo, BeamStrength, GroundTrack, Orientation},
    classify::{normalize_labels, PhotonClasses, UNCLASSIFIED, WITHHELD},
    config::{SwathConfig, DEFAULT_GAP_THRESHOLD_S, SENTINEL_HEIGHT, TARGET_AXIS_ANGLE_DEG},
    error::SwathError,
    interp::{interp_or_missing, interp_vals, round_ids, Series},
    product::{LandProduct, PhotonProduct},
    projection::{Hemisphere, Projection},
    record::{LandSegmentRecord, PhotonRecord, PlanarCoords},
    region::{load_regions, ReferenceRegion},
    rotation::RotationFrame,
    swath::{Swath, SwathBuilder, SwathDiagnostics, TrackDirection},
    trim::{
        match_region, sentinel_mask, trim, AppliedTrim, Bounds, ManualTrim, TrimOutcome, TrimSpec,
    },
};
pub use geo;
