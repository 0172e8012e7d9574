//! Aligns slow-cadence correction series onto the photon time base.

use crate::SwathError;
use log::warn;
use num_traits::Float;
use std::cmp::Ordering;

/// A sorted, de-duplicated `(time, value)` series.
#[derive(Debug, Clone)]
pub struct Series<T> {
    times: Vec<T>,
    values: Vec<T>,
}

impl<T: Float> Series<T> {
    /// Builds a series from parallel sample arrays.
    ///
    /// Samples are sorted by time. Where times repeat, the first
    /// sample wins. Samples with a NaN time are dropped.
    pub fn new(times: &[T], values: &[T]) -> Result<Self, SwathError> {
        if times.len() != values.len() {
            return Err(SwathError::Interp("time and value lengths differ"));
        }

        let mut pairs: Vec<(T, T)> = times
            .iter()
            .zip(values)
            .filter(|(t, _)| !t.is_nan())
            .map(|(&t, &v)| (t, v))
            .collect();
        // Stable, so the first of equal times stays first.
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        pairs.dedup_by(|later, earlier| later.0 == earlier.0);

        if pairs.len() < 2 {
            return Err(SwathError::Interp("fewer than two distinct samples"));
        }

        let (times, values) = pairs.into_iter().unzip();
        Ok(Self { times, values })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the value at `t`.
    ///
    /// Inside the series this is the linear interpolation between the
    /// bracketing samples; outside it the end segments are extended.
    /// With `gap` set, a `t` farther than `gap` from both bracketing
    /// samples yields NaN.
    pub fn sample(&self, t: T, gap: Option<T>) -> T {
        if t.is_nan() {
            return T::nan();
        }
        let n = self.times.len();
        let idx = self.times.partition_point(|&x| x <= t);
        // Segment used for the line; clamped so the ends extrapolate.
        let hi = idx.clamp(1, n - 1);
        let lo = hi - 1;

        if let Some(gap) = gap {
            let nearest = match idx {
                0 => self.times[0] - t,
                i if i == n => t - self.times[n - 1],
                i => (t - self.times[i - 1]).min(self.times[i] - t),
            };
            if nearest > gap {
                return T::nan();
            }
        }

        let (x0, x1) = (self.times[lo], self.times[hi]);
        let (y0, y1) = (self.values[lo], self.values[hi]);
        y0 + (y1 - y0) * (t - x0) / (x1 - x0)
    }

    /// Samples every target time.
    pub fn resample(&self, targets: &[T], gap: Option<T>) -> Vec<T> {
        targets.iter().map(|&t| self.sample(t, gap)).collect()
    }
}

/// Interpolates `(times, values)` onto `targets`.
pub fn interp_vals<T: Float>(
    times: &[T],
    values: &[T],
    targets: &[T],
    gap: Option<T>,
) -> Result<Vec<T>, SwathError> {
    Ok(Series::new(times, values)?.resample(targets, gap))
}

/// Like [`interp_vals`], but degrades to an all-NaN result instead of
/// failing.
///
/// The flag is `false` when the series was unusable.
pub fn interp_or_missing<T: Float>(
    name: &str,
    times: &[T],
    values: &[T],
    targets: &[T],
    gap: Option<T>,
) -> (Vec<T>, bool) {
    match interp_vals(times, values, targets, gap) {
        Ok(out) => (out, true),
        Err(e) => {
            warn!("{name} correction unavailable; {e}");
            (vec![T::nan(); targets.len()], false)
        }
    }
}

/// Rounds interpolated ids to the nearest integer, NaN to `None`.
pub fn round_ids<T: Float>(ids: &[T]) -> Vec<Option<i64>> {
    ids.iter().map(|id| id.round().to_i64()).collect()
}
