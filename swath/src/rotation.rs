//! Track-relative rotation of projected coordinates.

use crate::SwathError;
use geo::geometry::Coord;

/// A rigid rotation about a pivot, fitted once per invocation.
///
/// Rotated `x` is the across-track offset and rotated `y` the
/// along-track offset.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationFrame {
    /// Row-major 2×2 rotation matrix.
    pub matrix: [[f64; 2]; 2],

    /// Projected point the rotation is applied about.
    pub pivot: Coord<f64>,

    /// Axis the track direction is rotated onto (degrees).
    pub target_angle_deg: f64,

    /// Rotation applied (degrees, counter-clockwise).
    pub phi_deg: f64,
}

impl RotationFrame {
    /// Fits a frame from the first and last projected points of a
    /// track, pivoting on the first.
    pub fn fit(
        easting: &[f64],
        northing: &[f64],
        target_angle_deg: f64,
    ) -> Result<Self, SwathError> {
        let first = easting.first().zip(northing.first());
        let last = easting.last().zip(northing.last());
        let (first, last) = match (first, last) {
            (Some((&x1, &y1)), Some((&x2, &y2))) => {
                (Coord { x: x1, y: y1 }, Coord { x: x2, y: y2 })
            }
            _ => return Err(SwathError::Rotation("no points to fit")),
        };

        let bearing = (last.y - first.y).atan2(last.x - first.x);
        let phi = target_angle_deg.to_radians() - bearing;
        let (sin, cos) = phi.sin_cos();

        Ok(Self {
            matrix: [[cos, -sin], [sin, cos]],
            pivot: first,
            target_angle_deg,
            phi_deg: phi.to_degrees(),
        })
    }

    /// Rotates one projected point into `(cross_track, along_track)`.
    pub fn apply_point(&self, point: Coord<f64>) -> Coord<f64> {
        let Coord { x, y } = point - self.pivot;
        let [[r00, r01], [r10, r11]] = self.matrix;
        Coord {
            x: r00 * x + r01 * y,
            y: r10 * x + r11 * y,
        }
    }

    /// Rotates projected arrays into `(cross_track, along_track)`.
    pub fn apply(&self, easting: &[f64], northing: &[f64]) -> (Vec<f64>, Vec<f64>) {
        easting
            .iter()
            .zip(northing)
            .map(|(&x, &y)| {
                let Coord { x, y } = self.apply_point(Coord { x, y });
                (x, y)
            })
            .unzip()
    }
}

#[cfg(test)]
mod tests {
    use super::RotationFrame;
    use crate::TARGET_AXIS_ANGLE_DEG;
    use approx::assert_relative_eq;

    #[test]
    fn test_endpoints() {
        let easting = [1000.0, 1300.0, 1600.0, 1900.0];
        let northing = [5000.0, 4600.0, 4200.0, 3800.0];
        let frame = RotationFrame::fit(&easting, &northing, TARGET_AXIS_ANGLE_DEG).unwrap();
        let (cross, along) = frame.apply(&easting, &northing);

        assert_relative_eq!(along[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(along[3], 1500.0, epsilon = 1e-6);
        assert!(along.windows(2).all(|w| w[0] < w[1]));
        for ct in cross {
            assert_relative_eq!(ct, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_offset_point() {
        // Track heads due north; already on the target axis.
        let frame = RotationFrame::fit(&[0.0, 0.0], &[0.0, 10.0], TARGET_AXIS_ANGLE_DEG).unwrap();
        assert_relative_eq!(frame.phi_deg, 0.0, epsilon = 1e-12);
        let (cross, along) = frame.apply(&[3.0], &[4.0]);
        assert_relative_eq!(cross[0], 3.0, epsilon = 1e-12);
        assert_relative_eq!(along[0], 4.0, epsilon = 1e-12);

        // Track heads due east; rotated a quarter turn.
        let frame = RotationFrame::fit(&[0.0, 10.0], &[0.0, 0.0], TARGET_AXIS_ANGLE_DEG).unwrap();
        assert_relative_eq!(frame.phi_deg, 90.0, epsilon = 1e-12);
        let (cross, along) = frame.apply(&[5.0, 5.0], &[0.0, -2.0]);
        assert_relative_eq!(along[0], 5.0, epsilon = 1e-12);
        assert_relative_eq!(cross[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(cross[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let frame = RotationFrame::fit(&[10.0, 25.0], &[7.0, -30.0], TARGET_AXIS_ANGLE_DEG).unwrap();
        let a = frame.apply(&[12.5, 12.5], &[3.25, 3.25]);
        assert_eq!(a.0[0], a.0[1]);
        assert_eq!(a.1[0], a.1[1]);
    }

    #[test]
    fn test_empty() {
        assert!(RotationFrame::fit(&[], &[], TARGET_AXIS_ANGLE_DEG).is_err());
    }
}
