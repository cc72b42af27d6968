//! The surface a slider host implements.
//!
//! The core never touches pixels or a display tree. It asks the host to
//! translate between positions and offsets, to commit positions, and to
//! run animations.

use crate::easing::Easing;
use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// An animation handed to the host after a release.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationRequest {
    /// Distance to travel in position units, or the target when
    /// `relative` is false.
    pub offset: f64,
    /// Whether `offset` is relative to the current position.
    pub relative: bool,
    /// Animation length.
    pub duration: Duration,
    /// Easing curve.
    pub easing: Easing,
}

impl AnimationRequest {
    /// Where the animation ends when it starts at `start`.
    #[must_use]
    pub fn target(&self, start: f64) -> f64 {
        if self.relative {
            start + self.offset
        } else {
            self.offset
        }
    }

    /// Position `elapsed` into the animation, eased.
    ///
    /// Reaches [`target`](Self::target) exactly once `elapsed` covers the
    /// duration, and at once for zero-length animations.
    #[must_use]
    pub fn position_at(&self, start: f64, elapsed: Duration) -> f64 {
        let end = self.target(start);
        if elapsed >= self.duration {
            return end;
        }
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (end - start).mul_add(self.easing.apply(progress), start)
    }
}

/// Host hooks required by the slider core.
pub trait SliderHost {
    /// Viewport origin in the same coordinate space as pointer events.
    fn viewport_offset(&self) -> Point;

    /// Viewport extent along the sliding axis, in pixels.
    fn viewport_width(&self) -> f64;

    /// Scroll offset of the panel container inside the viewport.
    fn container_offset(&self) -> f64 {
        0.0
    }

    /// Position rendered at pixel `offset`.
    ///
    /// With `allow_out_of_bounds` the host must extrapolate past the first
    /// and last panel instead of clamping.
    fn position_by_offset(&self, offset: f64, allow_out_of_bounds: bool) -> f64;

    /// Pixel offset at which `position` is rendered.
    fn offset_by_position(&self, position: f64, allow_out_of_bounds: bool) -> f64;

    /// Commit a new position and redraw.
    fn set_position(&mut self, position: f64);

    /// Start an animation. The host calls
    /// [`SliderCore::animation_complete`](crate::SliderCore::animation_complete)
    /// when it ends.
    fn animate(&mut self, request: AnimationRequest);

    /// Stop any running animation where it is.
    fn abort_animation(&mut self);

    /// Pause automatic sliding, if the host has any.
    fn auto_slide_pause(&mut self) {}
}
