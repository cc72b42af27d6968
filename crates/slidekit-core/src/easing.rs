//! Easing curves and the release animation policy.

use crate::host::AnimationRequest;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// =============================================================================
// Easing Functions
// =============================================================================

/// Easing curves used when a released slider settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    /// Exponential ease out
    #[serde(rename = "exponential-out")]
    ExpoOut,
    /// Bounce at end
    BounceOut,
}

/// Bounce-out parabolas as `(segment end, vertex, floor)`, all in
/// normalized time. Each segment is `BOUNCE_STIFFNESS * (t - vertex)^2 + floor`.
const BOUNCE_SEGMENTS: [(f64, f64, f64); 4] = [
    (1.0 / 2.75, 0.0, 0.0),
    (2.0 / 2.75, 1.5 / 2.75, 0.75),
    (2.5 / 2.75, 2.25 / 2.75, 0.9375),
    (f64::INFINITY, 2.625 / 2.75, 0.984_375),
];

const BOUNCE_STIFFNESS: f64 = 7.5625;

impl Easing {
    /// Progress along the curve at normalized time `t`.
    ///
    /// `t` is clamped to `[0, 1]`; every curve maps 0 to 0 and 1 to 1.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::ExpoOut if t >= 1.0 => 1.0,
            Self::ExpoOut => 1.0 - (-10.0 * t).exp2(),
            Self::BounceOut => {
                let (_, vertex, floor) = BOUNCE_SEGMENTS
                    .into_iter()
                    .find(|(end, _, _)| t < *end)
                    .unwrap_or(BOUNCE_SEGMENTS[3]);
                let d = t - vertex;
                BOUNCE_STIFFNESS.mul_add(d * d, floor)
            }
        }
    }

    /// Curve name as hosts usually spell it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::ExpoOut => "exponential-out",
            Self::BounceOut => "bounce-out",
        }
    }
}

// =============================================================================
// Settle Policy
// =============================================================================

/// Below this release speed (px/ms) the settle animation bounces.
pub const BOUNCE_SPEED_LIMIT: f64 = 0.375;

/// Offsets up to this many positions count as a short settle.
pub const SHORT_SETTLE_DISTANCE: f64 = 0.5;

/// Duration bounds (ms) for a short settle.
pub const SHORT_SETTLE_MS: (f64, f64) = (600.0, 2000.0);

/// Duration bounds (ms) for a settle across at least one panel.
pub const LONG_SETTLE_MS: (f64, f64) = (1200.0, 9000.0);

/// Build the relative animation that settles a released slider.
///
/// Duration scales with `speed^1.5`, clamped to bounds chosen by the
/// distance left to travel. A zero offset gives an instant linear
/// animation. Slow releases bounce, fast ones ease out exponentially.
#[must_use]
pub fn settle_animation(speed: f64, offset: f64) -> AnimationRequest {
    let speed = if speed.is_finite() && speed > 0.0 {
        speed
    } else {
        0.0
    };
    let delta = offset.abs();

    let (easing, duration_ms) = if delta > 0.0 {
        let easing = if speed < BOUNCE_SPEED_LIMIT {
            Easing::BounceOut
        } else {
            Easing::ExpoOut
        };
        let (min, max) = if delta > SHORT_SETTLE_DISTANCE {
            LONG_SETTLE_MS
        } else {
            SHORT_SETTLE_MS
        };
        (easing, (100.0 * speed.powf(1.5)).clamp(min, max))
    } else {
        (Easing::Linear, 0.0)
    };

    AnimationRequest {
        offset,
        relative: true,
        duration: Duration::from_micros((duration_ms * 1000.0).round() as u64),
        easing,
    }
}
