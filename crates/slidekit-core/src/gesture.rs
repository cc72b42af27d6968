//! Swipe gesture tracking.
//!
//! A gesture starts undecided. Once the pointer has travelled more than
//! `swipe_threshold` pixels along one axis it locks: horizontal travel makes
//! it a drag that moves the slider, vertical travel hands it to native
//! scrolling. The lock never changes for the rest of the gesture.
//!
//! On release the tracker estimates the pointer velocity, converts it into
//! inertia, snaps the resulting target to whole panels (or panel groups)
//! and hands a relative settle animation to the host.

use crate::easing::settle_animation;
use crate::event::SliderEvent;
use crate::geometry::Point;
use crate::host::{AnimationRequest, SliderHost};
use crate::mapper::{align_to_whole, final_offset};
use crate::slider::SliderContext;
use crate::velocity::{ReleaseVelocity, Sample, SampleBuffer, VELOCITY_WINDOW_MS};

// =============================================================================
// Drag Session
// =============================================================================

/// Axis a gesture has been locked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisLock {
    /// Threshold not yet exceeded on either axis.
    #[default]
    Undecided,
    /// Horizontal: the slider follows the pointer.
    Drag,
    /// Vertical: the host scrolls natively.
    Scroll,
}

/// State of one gesture, from press to release.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Recent pointer samples.
    pub samples: SampleBuffer,
    /// Pointer x at press.
    pub start_drag_coord: f64,
    /// Pointer y at press.
    pub start_scroll_coord: f64,
    /// Locked axis.
    pub axis: AxisLock,
    /// Pixel delta not yet folded into the position.
    pub pending_pixel_offset: f64,
    /// Total position change caused by this drag.
    pub cumulative_position_delta: f64,
    /// Slider position at press.
    pub start_position: f64,
    /// Position under the pointer at press.
    pub start_drag_anchor_position: f64,
    /// Pixel distance from the pointer to the rendered position at press.
    pub start_offset_residual: f64,
    /// Most recent pointer coordinates.
    pub last_pointer: Point,
}

impl DragSession {
    /// Open a session for a press at `(x, y)`.
    #[must_use]
    pub fn new(x: f64, y: f64, start_position: f64) -> Self {
        Self {
            samples: SampleBuffer::new(),
            start_drag_coord: x,
            start_scroll_coord: y,
            axis: AxisLock::Undecided,
            pending_pixel_offset: 0.0,
            cumulative_position_delta: 0.0,
            start_position,
            start_drag_anchor_position: start_position,
            start_offset_residual: 0.0,
            last_pointer: Point::new(x, y),
        }
    }

    /// Whether the gesture is locked as a drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.axis == AxisLock::Drag
    }

    /// Lock the axis once the pointer passes `threshold` on either axis.
    ///
    /// Horizontal travel is checked first. A decided lock is kept.
    pub fn decide_axis(&mut self, x: f64, y: f64, threshold: f64) -> AxisLock {
        if self.axis == AxisLock::Undecided {
            if (self.start_drag_coord - x).abs() > threshold {
                self.axis = AxisLock::Drag;
            } else if (self.start_scroll_coord - y).abs() > threshold {
                self.axis = AxisLock::Scroll;
            }
        }
        self.axis
    }
}

// =============================================================================
// Gesture Handler
// =============================================================================

/// What the host should do with the native pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResponse {
    /// Let the host handle the event (scroll, text selection, ...).
    PassThrough,
    /// The slider consumed the event.
    Suppress,
}

impl MoveResponse {
    /// Whether the host should prevent its default handling.
    #[must_use]
    pub const fn suppresses_default(self) -> bool {
        matches!(self, Self::Suppress)
    }
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureRelease {
    /// The gesture moved the slider; hosts should not treat it as a click.
    pub was_drag: bool,
    /// Pointer velocity at release.
    pub velocity: ReleaseVelocity,
    /// Displacement added by the release velocity, in positions.
    pub inertia: f64,
    /// Relative distance the settle animation travels.
    pub offset: f64,
    /// Animation handed to the host, `None` when no gesture was active.
    pub animation: Option<AnimationRequest>,
}

impl GestureRelease {
    /// Release of a gesture that never started.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            was_drag: false,
            velocity: ReleaseVelocity::ZERO,
            inertia: 0.0,
            offset: 0.0,
            animation: None,
        }
    }
}

/// Pointer gesture strategy plugged into a [`SliderCore`](crate::SliderCore).
pub trait GestureHandler<H: SliderHost> {
    /// Pointer pressed at `(x, y)`.
    fn start(&mut self, slider: &mut SliderContext<H>, x: f64, y: f64);

    /// Pointer moved to `(x, y)`, `(dx, dy)` since the previous event.
    fn move_to(
        &mut self,
        slider: &mut SliderContext<H>,
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
    ) -> MoveResponse;

    /// Pointer released at `(x, y)`.
    fn stop(&mut self, slider: &mut SliderContext<H>, x: f64, y: f64) -> GestureRelease;

    /// A deferred redraw requested through the scheduler is due.
    fn frame(&mut self, slider: &mut SliderContext<H>);

    /// Whether a gesture is in progress.
    fn is_active(&self) -> bool;
}

/// Swipe tracker with inertia and panel snapping.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    session: Option<DragSession>,
}

impl SwipeTracker {
    /// Create an idle tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self { session: None }
    }

    /// The running session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }
}

impl<H: SliderHost> GestureHandler<H> for SwipeTracker {
    fn start(&mut self, slider: &mut SliderContext<H>, x: f64, y: f64) {
        if slider.state().locked {
            log::warn!("gesture started while the slider is locked, replacing session");
            slider.cancel_redraw();
        }

        slider.host_mut().auto_slide_pause();
        slider.lock();
        slider.reset_redraw_timing();

        let position = slider.position();
        let mut session = DragSession::new(x, y, position);

        let host = slider.host();
        let pointer_offset = host.container_offset() + x - host.viewport_offset().x;
        session.start_drag_anchor_position = host.position_by_offset(pointer_offset, false);
        session.start_offset_residual = host.offset_by_position(position, false) - pointer_offset;

        log::debug!(
            "swipe start at ({x}, {y}) position={position:.3} anchor={:.3}",
            session.start_drag_anchor_position
        );
        self.session = Some(session);

        slider.abort_animations();
        slider.emit(&SliderEvent::Start { x, y });
    }

    fn move_to(
        &mut self,
        slider: &mut SliderContext<H>,
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
    ) -> MoveResponse {
        match self.session.as_mut() {
            Some(session) => track(session, slider, x, y, dx, dy),
            None => {
                log::trace!("pointer move without an active gesture");
                MoveResponse::PassThrough
            }
        }
    }

    fn stop(&mut self, slider: &mut SliderContext<H>, x: f64, y: f64) -> GestureRelease {
        slider.abort_animations();

        let Some(mut session) = self.session.take() else {
            log::debug!("pointer release without an active gesture");
            return GestureRelease::idle();
        };

        track(&mut session, slider, x, y, 0.0, 0.0);
        slider.cancel_redraw();
        if session.is_dragging() {
            slider.flush_redraw(&mut session);
        }

        let now = slider.now_ms();
        session
            .samples
            .retain_since(now.saturating_sub(VELOCITY_WINDOW_MS));

        let velocity = if Point::new(x, y).is_origin() {
            ReleaseVelocity::ZERO
        } else {
            ReleaseVelocity::from_samples(&session.samples, slider.host().viewport_width())
        };

        let config = slider.config();
        let inertia = velocity.inertia(config.panels_visible);
        let offset = final_offset(
            session.start_position,
            session.cumulative_position_delta,
            inertia,
            config.snap_group(),
        );

        let position = slider.position();
        let offset = align_to_whole(position, offset);
        let offset = slider.range().bound_position(position + offset) - position;

        slider.unlock();
        slider.abort_animations();
        slider.emit(&SliderEvent::Finish { x, y });

        let animation = settle_animation(velocity.speed, offset);
        let was_drag = session.is_dragging();
        log::debug!(
            "swipe release speed={:.4} inertia={inertia:.4} offset={offset:.4} duration={:?} easing={}",
            velocity.speed,
            animation.duration,
            animation.easing.name()
        );

        slider.host_mut().animate(animation);
        slider.emit(&SliderEvent::Stop { x, y, was_drag });

        GestureRelease {
            was_drag,
            velocity,
            inertia,
            offset,
            animation: Some(animation),
        }
    }

    fn frame(&mut self, slider: &mut SliderContext<H>) {
        if let Some(session) = self.session.as_mut() {
            if session.is_dragging() {
                slider.flush_redraw(session);
            }
        }
    }

    fn is_active(&self) -> bool {
        self.session.is_some()
    }
}

fn track<H: SliderHost>(
    session: &mut DragSession,
    slider: &mut SliderContext<H>,
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
) -> MoveResponse {
    slider.set_swiping(true);
    session.last_pointer = Point::new(x, y);
    session.pending_pixel_offset += dx;

    if session.axis == AxisLock::Undecided {
        let axis = session.decide_axis(x, y, slider.config().swipe_threshold);
        if axis != AxisLock::Undecided {
            log::debug!("swipe axis locked: {axis:?}");
        }
    }

    let now = slider.now_ms();
    session.samples.push(Sample::new(x, y, now));
    slider.emit(&SliderEvent::Move { x, y, dx, dy });

    if !session.is_dragging() {
        return MoveResponse::PassThrough;
    }

    slider.request_redraw(session);
    MoveResponse::Suppress
}
