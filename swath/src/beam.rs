//! Ground track identifiers and beam metadata.

use crate::SwathError;
use std::{fmt, str::FromStr};

/// One of the instrument's six ground tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GroundTrack {
    Gt1l,
    Gt1r,
    Gt2l,
    Gt2r,
    Gt3l,
    Gt3r,
}

impl GroundTrack {
    pub const ALL: [GroundTrack; 6] = [
        GroundTrack::Gt1l,
        GroundTrack::Gt1r,
        GroundTrack::Gt2l,
        GroundTrack::Gt2r,
        GroundTrack::Gt3l,
        GroundTrack::Gt3r,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GroundTrack::Gt1l => "gt1l",
            GroundTrack::Gt1r => "gt1r",
            GroundTrack::Gt2l => "gt2l",
            GroundTrack::Gt2r => "gt2r",
            GroundTrack::Gt3l => "gt3l",
            GroundTrack::Gt3r => "gt3r",
        }
    }

    /// Index of this track counted left to right, 0 through 5.
    fn position(self) -> u8 {
        match self {
            GroundTrack::Gt1l => 0,
            GroundTrack::Gt1r => 1,
            GroundTrack::Gt2l => 2,
            GroundTrack::Gt2r => 3,
            GroundTrack::Gt3l => 4,
            GroundTrack::Gt3r => 5,
        }
    }

    /// Returns the laser spot number (1-6) illuminating this track.
    pub fn beam_number(self, orientation: Orientation) -> u8 {
        match orientation {
            Orientation::Backward => self.position() + 1,
            Orientation::Forward => 6 - self.position(),
        }
    }

    /// Returns whether this track is fed by a strong or weak beam.
    ///
    /// Odd spot numbers are the strong beams.
    pub fn beam_strength(self, orientation: Orientation) -> BeamStrength {
        if self.beam_number(orientation) % 2 == 1 {
            BeamStrength::Strong
        } else {
            BeamStrength::Weak
        }
    }
}

impl fmt::Display for GroundTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroundTrack {
    type Err = SwathError;

    fn from_str(s: &str) -> Result<Self, SwathError> {
        GroundTrack::ALL
            .into_iter()
            .find(|gt| gt.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SwathError::GroundTrack(s.to_string()))
    }
}

/// Spacecraft yaw orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Backward,
    Forward,
}

impl Orientation {
    /// Decodes the products' `sc_orient` flag. Transition states map
    /// to `None`.
    pub fn from_flag(flag: i32) -> Option<Self> {
        match flag {
            0 => Some(Orientation::Backward),
            1 => Some(Orientation::Forward),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BeamStrength {
    Strong,
    Weak,
}

impl fmt::Display for BeamStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeamStrength::Strong => f.write_str("Strong"),
            BeamStrength::Weak => f.write_str("Weak"),
        }
    }
}

/// Beam identity of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeamInfo {
    pub ground_track: GroundTrack,

    /// `None` when spacecraft orientation is unknown.
    pub beam_number: Option<u8>,

    /// `None` when spacecraft orientation is unknown.
    pub strength: Option<BeamStrength>,
}

impl BeamInfo {
    pub fn new(ground_track: GroundTrack, orientation: Option<Orientation>) -> Self {
        Self {
            ground_track,
            beam_number: orientation.map(|o| ground_track.beam_number(o)),
            strength: orientation.map(|o| ground_track.beam_strength(o)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BeamInfo, BeamStrength, GroundTrack, Orientation};

    #[test]
    fn test_parse_ground_track() {
        assert_eq!("gt2r".parse::<GroundTrack>().unwrap(), GroundTrack::Gt2r);
        assert_eq!("GT1L".parse::<GroundTrack>().unwrap(), GroundTrack::Gt1l);
        assert!("gt4l".parse::<GroundTrack>().is_err());
    }

    #[test]
    fn test_beam_numbers() {
        assert_eq!(GroundTrack::Gt1l.beam_number(Orientation::Backward), 1);
        assert_eq!(GroundTrack::Gt3r.beam_number(Orientation::Backward), 6);
        assert_eq!(GroundTrack::Gt1l.beam_number(Orientation::Forward), 6);
        assert_eq!(GroundTrack::Gt1r.beam_number(Orientation::Forward), 5);
    }

    #[test]
    fn test_beam_strength() {
        // Backward: left beams strong. Forward: right beams strong.
        assert_eq!(
            GroundTrack::Gt2l.beam_strength(Orientation::Backward),
            BeamStrength::Strong
        );
        assert_eq!(
            GroundTrack::Gt2l.beam_strength(Orientation::Forward),
            BeamStrength::Weak
        );
        assert_eq!(
            GroundTrack::Gt2r.beam_strength(Orientation::Forward),
            BeamStrength::Strong
        );
    }

    #[test]
    fn test_unknown_orientation() {
        let info = BeamInfo::new(GroundTrack::Gt3l, Orientation::from_flag(2));
        assert_eq!(info.beam_number, None);
        assert_eq!(info.strength, None);
    }
}
