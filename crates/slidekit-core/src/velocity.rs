//! Pointer sample history and release velocity estimation.
//!
//! The velocity of a swipe is the slope of a least-squares line through
//! the recent pointer samples (coordinate against elapsed time).

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Samples kept while dragging.
pub const MAX_SAMPLES: usize = 20;

/// Only samples this recent contribute to the release velocity.
pub const VELOCITY_WINDOW_MS: u64 = 500;

/// One pointer reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
    /// Milliseconds on the slider's clock
    pub timestamp_ms: u64,
}

impl Sample {
    /// Create a sample.
    #[must_use]
    pub const fn new(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self { x, y, timestamp_ms }
    }
}

/// Bounded, chronologically ordered sample history.
#[derive(Debug, Clone, Default)]
pub struct SampleBuffer {
    samples: VecDeque<Sample>,
}

impl SampleBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(MAX_SAMPLES),
        }
    }

    /// Buffered samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Drop every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Whether moving to `x` turns around relative to the newest two samples.
    ///
    /// Needs at least three buffered samples.
    #[must_use]
    pub fn reverses_at(&self, x: f64) -> bool {
        let len = self.samples.len();
        if len < 3 {
            return false;
        }
        let older = self.samples[len - 2].x;
        let newest = self.samples[len - 1].x;
        (older < newest && newest > x) || (older > newest && newest < x)
    }

    /// Record a sample.
    ///
    /// A reversal clears the history first, so the release velocity only
    /// reflects the last sub-swipe. The oldest sample is dropped to stay
    /// within [`MAX_SAMPLES`].
    pub fn push(&mut self, sample: Sample) {
        if self.reverses_at(sample.x) {
            log::trace!("direction reversal at x={}, clearing samples", sample.x);
            self.samples.clear();
        }
        if self.samples.len() >= MAX_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Drop samples recorded before `cutoff_ms`.
    pub fn retain_since(&mut self, cutoff_ms: u64) {
        while self
            .samples
            .front()
            .is_some_and(|sample| sample.timestamp_ms < cutoff_ms)
        {
            self.samples.pop_front();
        }
    }

    /// Least-squares fit of `x / scale` against time since the first sample.
    #[must_use]
    pub fn fit(&self, scale: f64) -> Option<LinearFit> {
        least_squares(self.samples.iter().copied(), scale)
    }
}

/// Line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Change of the normalized coordinate per millisecond.
    pub slope: f64,
    /// Normalized coordinate at the first sample.
    pub intercept: f64,
}

/// Ordinary least squares over `(elapsed_ms, x / scale)`.
///
/// Returns `None` with fewer than two samples, or when the samples do not
/// determine a line (all at the same instant, non-positive scale).
pub fn least_squares(samples: impl IntoIterator<Item = Sample>, scale: f64) -> Option<LinearFit> {
    if !(scale.is_finite() && scale > 0.0) {
        return None;
    }

    let mut samples = samples.into_iter();
    let first = samples.next()?;
    let (mut n, mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0f64, 0.0, 0.0, 0.0, 0.0);

    for sample in std::iter::once(first).chain(samples) {
        let x = sample.timestamp_ms.saturating_sub(first.timestamp_ms) as f64;
        let y = sample.x / scale;
        n += 1.0;
        sum_x += x;
        sum_xx += x * x;
        sum_y += y;
        sum_xy += x * y;
    }

    if n < 2.0 {
        return None;
    }

    let denominator = n.mul_add(sum_xx, -(sum_x * sum_x));
    let slope = n.mul_add(sum_xy, -(sum_x * sum_y)) / denominator;
    let intercept = sum_y.mul_add(sum_xx, -(sum_x * sum_xy)) / denominator;

    if slope.is_finite() && intercept.is_finite() {
        Some(LinearFit { slope, intercept })
    } else {
        log::debug!(
            "degenerate velocity fit: n={n} sum_x={sum_x} sum_xx={sum_xx} sum_y={sum_y} sum_xy={sum_xy}"
        );
        None
    }
}

/// Velocity of the pointer at release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseVelocity {
    /// Signed velocity along the drag axis, px/ms.
    pub velocity: f64,
    /// Absolute velocity.
    pub speed: f64,
    /// `-1.0` when the coordinate was decreasing, else `1.0`.
    pub direction: f64,
}

impl ReleaseVelocity {
    /// No movement.
    pub const ZERO: Self = Self {
        velocity: 0.0,
        speed: 0.0,
        direction: 1.0,
    };

    /// Estimate from buffered samples.
    ///
    /// Coordinates are normalized by half the viewport width before
    /// fitting and the slope is scaled back, so the result is in px/ms.
    /// Degenerate input yields [`ReleaseVelocity::ZERO`].
    #[must_use]
    pub fn from_samples(samples: &SampleBuffer, viewport_width: f64) -> Self {
        let scale = viewport_width / 2.0;
        samples
            .fit(scale)
            .map_or(Self::ZERO, |fit| Self::from_velocity(fit.slope * scale))
    }

    /// Wrap a signed velocity. Non-finite input is treated as zero.
    #[must_use]
    pub fn from_velocity(velocity: f64) -> Self {
        if !velocity.is_finite() {
            return Self::ZERO;
        }
        Self {
            velocity,
            speed: velocity.abs(),
            direction: if velocity < 0.0 { -1.0 } else { 1.0 },
        }
    }

    /// Extra displacement, in positions, that the release carries.
    ///
    /// `sqrt(speed * 0.5 * floor(panels_visible))` pointing against the
    /// pointer direction: a pointer moving towards lower coordinates pushes
    /// the slider forward.
    #[must_use]
    pub fn inertia(&self, panels_visible: f64) -> f64 {
        let visible = panels_visible.floor().max(0.0);
        (self.speed * 0.5 * visible).sqrt() * -self.direction
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use proptest::prelude::*;

    fn buffer(samples: &[(f64, f64, u64)]) -> SampleBuffer {
        let mut buffer = SampleBuffer::new();
        for &(x, y, t) in samples {
            buffer.push(Sample::new(x, y, t));
        }
        buffer
    }

    #[test]
    fn test_fit_linear_motion() {
        let samples = buffer(&[(0.0, 0.0, 0), (10.0, 0.0, 100), (20.0, 0.0, 200)]);
        let fit = samples.fit(150.0).unwrap();
        assert!((fit.slope - 1.0 / 1500.0).abs() < 1e-12);
        assert!(fit.intercept.abs() < 1e-12);
    }

    #[test]
    fn test_release_velocity_reference_swipe() {
        let samples = buffer(&[(0.0, 0.0, 0), (10.0, 0.0, 100), (20.0, 0.0, 200)]);
        let release = ReleaseVelocity::from_samples(&samples, 300.0);
        assert!((release.velocity - 0.1).abs() < 1e-12);
        assert!((release.speed - 0.1).abs() < 1e-12);
        assert_eq!(release.direction, 1.0);
        assert!((release.inertia(1.0) + 0.05f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_release_velocity_leftward() {
        let samples = buffer(&[(300.0, 0.0, 1000), (240.0, 5.0, 1020), (180.0, 9.0, 1040)]);
        let release = ReleaseVelocity::from_samples(&samples, 400.0);
        assert!((release.velocity + 3.0).abs() < 1e-9);
        assert_eq!(release.direction, -1.0);
        // sqrt(3 * 0.5 * 2) = sqrt(3), forward
        assert!((release.inertia(2.7) - 3.0f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_fit_needs_two_samples() {
        assert!(buffer(&[]).fit(100.0).is_none());
        assert!(buffer(&[(5.0, 0.0, 10)]).fit(100.0).is_none());
        let release = ReleaseVelocity::from_samples(&buffer(&[(5.0, 0.0, 10)]), 300.0);
        assert_eq!(release, ReleaseVelocity::ZERO);
    }

    #[test]
    fn test_fit_same_timestamp_is_degenerate() {
        let samples = buffer(&[(0.0, 0.0, 50), (30.0, 0.0, 50)]);
        assert!(samples.fit(100.0).is_none());
        let release = ReleaseVelocity::from_samples(&samples, 200.0);
        assert_eq!(release.speed, 0.0);
    }

    #[test]
    fn test_fit_zero_viewport_is_degenerate() {
        let samples = buffer(&[(0.0, 0.0, 0), (30.0, 0.0, 10)]);
        assert!(samples.fit(0.0).is_none());
        assert_eq!(
            ReleaseVelocity::from_samples(&samples, 0.0),
            ReleaseVelocity::ZERO
        );
        assert_eq!(
            ReleaseVelocity::from_samples(&samples, f64::NAN),
            ReleaseVelocity::ZERO
        );
    }

    #[test]
    fn test_from_velocity_non_finite() {
        assert_eq!(ReleaseVelocity::from_velocity(f64::NAN), ReleaseVelocity::ZERO);
        assert_eq!(
            ReleaseVelocity::from_velocity(f64::NEG_INFINITY),
            ReleaseVelocity::ZERO
        );
    }

    #[test]
    fn test_inertia_below_one_panel_is_zero() {
        let release = ReleaseVelocity::from_velocity(-2.0);
        assert_eq!(release.inertia(0.5), 0.0);
    }

    #[test]
    fn test_reversal_clears_history() {
        let mut samples = buffer(&[(0.0, 0.0, 0), (10.0, 0.0, 10), (20.0, 0.0, 20)]);
        assert!(samples.reverses_at(15.0));
        assert!(!samples.reverses_at(25.0));
        samples.push(Sample::new(15.0, 0.0, 30));
        assert_eq!(samples.len(), 1);
        assert_eq!(samples.iter().next().unwrap().x, 15.0);
    }

    #[test]
    fn test_reversal_needs_three_samples() {
        let mut samples = buffer(&[(0.0, 0.0, 0), (10.0, 0.0, 10)]);
        assert!(!samples.reverses_at(5.0));
        samples.push(Sample::new(5.0, 0.0, 20));
        assert_eq!(samples.len(), 3);
    }

    #[test]
    fn test_flat_samples_never_reverse() {
        let samples = buffer(&[(10.0, 0.0, 0), (10.0, 3.0, 10), (10.0, 6.0, 20)]);
        assert!(!samples.reverses_at(0.0));
        assert!(!samples.reverses_at(20.0));
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut samples = SampleBuffer::new();
        for i in 0..25u64 {
            samples.push(Sample::new(i as f64, 0.0, i));
        }
        assert_eq!(samples.len(), MAX_SAMPLES);
        assert_eq!(samples.iter().next().unwrap().timestamp_ms, 5);
    }

    #[test]
    fn test_retain_since() {
        let mut samples = buffer(&[(0.0, 0.0, 100), (1.0, 0.0, 400), (2.0, 0.0, 700)]);
        samples.retain_since(400);
        assert_eq!(samples.len(), 2);
        samples.retain_since(10_000);
        assert!(samples.is_empty());
    }

    proptest! {
        #[test]
        fn prop_buffer_never_exceeds_capacity(
            xs in proptest::collection::vec(-500.0f64..500.0, 0..80),
        ) {
            let mut samples = SampleBuffer::new();
            for (i, x) in xs.into_iter().enumerate() {
                samples.push(Sample::new(x, 0.0, i as u64 * 16));
                prop_assert!(samples.len() <= MAX_SAMPLES);
            }
        }

        #[test]
        fn prop_constant_velocity_recovered(
            start in -1000.0f64..1000.0,
            velocity in -5.0f64..5.0,
            count in 2usize..20,
            width in 100.0f64..2000.0,
        ) {
            let mut samples = SampleBuffer::new();
            for i in 0..count {
                let t = i as u64 * 16;
                samples.push(Sample::new(start + velocity * t as f64, 0.0, t));
            }
            let release = ReleaseVelocity::from_samples(&samples, width);
            prop_assert!((release.velocity - velocity).abs() < 1e-6);
        }
    }
}
