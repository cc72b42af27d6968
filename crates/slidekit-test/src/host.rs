//! A host that lays panels out on a straight strip and records every call.

use slidekit_core::{AnimationRequest, Point, SliderHost};

/// A call the slider made on its host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    /// `set_position`
    SetPosition(f64),
    /// `animate`
    Animate(AnimationRequest),
    /// `abort_animation`
    AbortAnimation,
    /// `auto_slide_pause`
    AutoSlidePause,
    /// A frame of a running animation was rendered at this position.
    AnimationFrame(f64),
}

/// Panels of equal width laid out left to right.
///
/// Position `p` renders at offset `-p * panel_width`, so moving the pointer
/// left advances the slider. Bounded lookups clamp positions to
/// [`with_bounds`](Self::with_bounds) when set.
#[derive(Debug, Clone)]
pub struct LinearHost {
    panel_width: f64,
    viewport_width: f64,
    viewport_origin: Point,
    container_offset: f64,
    bounds: Option<(f64, f64)>,
    calls: Vec<HostCall>,
}

impl LinearHost {
    /// One panel per viewport, `panel_width` pixels wide.
    pub fn new(panel_width: f64) -> Self {
        Self {
            panel_width,
            viewport_width: panel_width,
            viewport_origin: Point::ORIGIN,
            container_offset: 0.0,
            bounds: None,
            calls: Vec::new(),
        }
    }

    /// Set the viewport width.
    #[must_use]
    pub const fn with_viewport_width(mut self, width: f64) -> Self {
        self.viewport_width = width;
        self
    }

    /// Set the viewport origin in pointer coordinates.
    #[must_use]
    pub const fn with_viewport_origin(mut self, origin: Point) -> Self {
        self.viewport_origin = origin;
        self
    }

    /// Set the container scroll offset.
    #[must_use]
    pub const fn with_container_offset(mut self, offset: f64) -> Self {
        self.container_offset = offset;
        self
    }

    /// Clamp bounded lookups to `[min, max]`.
    #[must_use]
    pub const fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.bounds = Some((min, max));
        self
    }

    /// Panel width in pixels.
    pub const fn panel_width(&self) -> f64 {
        self.panel_width
    }

    /// Every recorded call, oldest first.
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Forget recorded calls.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Positions passed to `set_position`.
    pub fn positions(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::SetPosition(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    /// Animations passed to `animate`.
    pub fn animations(&self) -> Vec<AnimationRequest> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Animate(request) => Some(*request),
                _ => None,
            })
            .collect()
    }

    /// Render one frame of a running animation.
    pub fn animation_frame(&mut self, position: f64) {
        self.calls.push(HostCall::AnimationFrame(position));
    }

    /// Positions rendered by animation frames.
    pub fn animation_frames(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::AnimationFrame(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    /// The most recent animation.
    pub fn last_animation(&self) -> Option<AnimationRequest> {
        self.animations().pop()
    }

    /// Number of `abort_animation` calls.
    pub fn abort_count(&self) -> usize {
        self.count(&HostCall::AbortAnimation)
    }

    /// Number of `auto_slide_pause` calls.
    pub fn pause_count(&self) -> usize {
        self.count(&HostCall::AutoSlidePause)
    }

    fn count(&self, wanted: &HostCall) -> usize {
        self.calls.iter().filter(|call| *call == wanted).count()
    }

    fn clamp(&self, position: f64, allow_out_of_bounds: bool) -> f64 {
        match self.bounds {
            Some((min, max)) if !allow_out_of_bounds => position.clamp(min, max),
            _ => position,
        }
    }
}

impl SliderHost for LinearHost {
    fn viewport_offset(&self) -> Point {
        self.viewport_origin
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn container_offset(&self) -> f64 {
        self.container_offset
    }

    fn position_by_offset(&self, offset: f64, allow_out_of_bounds: bool) -> f64 {
        self.clamp(-offset / self.panel_width, allow_out_of_bounds)
    }

    fn offset_by_position(&self, position: f64, allow_out_of_bounds: bool) -> f64 {
        -self.clamp(position, allow_out_of_bounds) * self.panel_width
    }

    fn set_position(&mut self, position: f64) {
        self.calls.push(HostCall::SetPosition(position));
    }

    fn animate(&mut self, request: AnimationRequest) {
        self.calls.push(HostCall::Animate(request));
    }

    fn abort_animation(&mut self) {
        self.calls.push(HostCall::AbortAnimation);
    }

    fn auto_slide_pause(&mut self) {
        self.calls.push(HostCall::AutoSlidePause);
    }
}
