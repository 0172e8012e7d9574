//! Tunable constants for a swath invocation.

/// Land segment heights at or above this value carry no estimate.
pub const SENTINEL_HEIGHT: f64 = 1e30;

/// Largest distance (seconds) between a target time and its nearest
/// correction sample before the interpolated value is discarded.
pub const DEFAULT_GAP_THRESHOLD_S: f64 = 1.0;

/// Axis the along-track direction is rotated onto (degrees).
pub const TARGET_AXIS_ANGLE_DEG: f64 = 90.0;

/// Constants threaded through the pipeline stages.
///
/// Defaults match the source products; tests override individual
/// fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwathConfig {
    /// See [`SENTINEL_HEIGHT`].
    pub sentinel: f64,

    /// See [`DEFAULT_GAP_THRESHOLD_S`].
    pub gap_threshold_s: f64,

    /// See [`TARGET_AXIS_ANGLE_DEG`].
    pub target_angle_deg: f64,
}

impl Default for SwathConfig {
    fn default() -> Self {
        Self {
            sentinel: SENTINEL_HEIGHT,
            gap_threshold_s: DEFAULT_GAP_THRESHOLD_S,
            target_angle_deg: TARGET_AXIS_ANGLE_DEG,
        }
    }
}
