//! Maps land-segment photon classifications onto the photon stream.
//!
//! The land product records, per classified photon, the geolocation
//! segment it fell in and its 1-based index within that segment. The
//! photon product records, per geolocation segment, the 1-based stream
//! index of the segment's first photon. Joining the two on segment id
//! gives absolute stream positions.

use crate::{error::check_len, SwathError};
use log::debug;
use std::collections::HashMap;

/// Label for photons no classified offset covers.
pub const UNCLASSIFIED: i8 = 0;

/// Source code for withheld photons, folded into [`UNCLASSIFIED`].
pub const WITHHELD: i8 = -1;

/// One classification label per photon of the joined stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotonClasses {
    labels: Vec<i8>,
}

impl PhotonClasses {
    /// Every photon of an `n` photon stream unclassified.
    pub fn unclassified(n: usize) -> Self {
        Self {
            labels: vec![UNCLASSIFIED; n],
        }
    }

    /// Joins classified offsets onto the photon stream.
    ///
    /// The result covers the photon stream up to the last classified
    /// photon, bounded by `n_photons`; callers shorten the photon
    /// fields to [`PhotonClasses::len`].
    ///
    /// Segments are visited in ascending id order. When two entries
    /// land on the same photon, the later one wins.
    pub fn map(
        ph_index_beg: &[i64],
        segment_id: &[i64],
        classed_pc_indx: &[i64],
        classed_pc_flag: &[i8],
        ph_segment_id: &[i64],
        n_photons: usize,
    ) -> Result<Self, SwathError> {
        check_len("segment_id", ph_index_beg.len(), segment_id.len())?;
        check_len("classed_pc_flag", classed_pc_indx.len(), classed_pc_flag.len())?;
        check_len("ph_segment_id", classed_pc_indx.len(), ph_segment_id.len())?;

        let mut segment_start: HashMap<i64, i64> = HashMap::with_capacity(segment_id.len());
        for (&id, &beg) in segment_id.iter().zip(ph_index_beg) {
            if beg != 0 {
                segment_start.entry(id).or_insert(beg);
            }
        }

        let mut joined: Vec<(i64, i64, i8)> = ph_segment_id
            .iter()
            .zip(classed_pc_indx)
            .zip(classed_pc_flag)
            .filter_map(|((id, indx), &flag)| {
                segment_start
                    .get(id)
                    .map(|beg| (*id, beg + indx - 2, flag))
            })
            .collect();

        if joined.is_empty() {
            return Err(SwathError::Mapping("no segment ids shared by both products"));
        }

        joined.sort_by_key(|&(id, _, _)| id);

        let mapped_len = joined
            .iter()
            .map(|&(_, pos, _)| pos)
            .max()
            .map_or(0, |pos| usize::try_from(pos + 1).unwrap_or(0));
        let len = mapped_len.min(n_photons);

        let mut labels = vec![UNCLASSIFIED; len];
        let mut dropped = 0_usize;
        for (_, pos, flag) in joined {
            match usize::try_from(pos) {
                Ok(pos) if pos < len => labels[pos] = flag,
                _ => dropped += 1,
            }
        }
        normalize_labels(&mut labels);

        debug!(
            "classification join; photons: {n_photons}, mapped: {mapped_len}, kept: {len}, dropped offsets: {dropped}"
        );

        Ok(Self { labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn as_slice(&self) -> &[i8] {
        &self.labels
    }

    pub fn into_inner(self) -> Vec<i8> {
        self.labels
    }
}

/// Folds the withheld code into unclassified. Idempotent.
pub fn normalize_labels(labels: &mut [i8]) {
    for label in labels.iter_mut().filter(|l| **l == WITHHELD) {
        *label = UNCLASSIFIED;
    }
}
