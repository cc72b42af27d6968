//! Frame-rate throttling for drag redraws.
//!
//! Pointer events can arrive far faster than a host wants to repaint. The
//! tracker asks the [`FrameThrottle`] whether a redraw may happen now; if
//! not, a single deferred redraw is requested from the host's
//! [`RedrawScheduler`] and the pixel deltas keep accumulating until it
//! fires. Releasing the pointer cancels whatever is still pending.

use std::time::Duration;

/// Host timer used for deferred redraws.
///
/// When the delay elapses the host calls
/// [`SliderCore::on_frame`](crate::SliderCore::on_frame).
pub trait RedrawScheduler {
    /// Request one callback after `delay`. Replaces any earlier request.
    fn schedule(&mut self, delay: Duration);

    /// Drop the outstanding request, if any.
    fn cancel(&mut self);
}

/// Outcome of a redraw request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawDecision {
    /// Draw immediately.
    Now,
    /// Schedule a redraw after the given delay.
    Deferred(Duration),
    /// A deferred redraw is already scheduled.
    AlreadyPending,
}

/// Limits redraws to one per frame interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameThrottle {
    interval_ms: Option<u64>,
    last_draw_ms: Option<u64>,
    pending: bool,
}

impl FrameThrottle {
    /// Throttle to `fps` frames per second. `vsync` or a non-positive
    /// rate disables throttling.
    #[must_use]
    pub fn new(fps: f64, vsync: bool) -> Self {
        let interval_ms = if vsync || fps.is_nan() || fps <= 0.0 {
            None
        } else {
            Some((1000.0 / fps).round().max(1.0) as u64)
        };
        Self {
            interval_ms,
            last_draw_ms: None,
            pending: false,
        }
    }

    /// A throttle that always draws immediately.
    #[must_use]
    pub const fn unthrottled() -> Self {
        Self {
            interval_ms: None,
            last_draw_ms: None,
            pending: false,
        }
    }

    /// Frame interval, if throttling.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.interval_ms.map(Duration::from_millis)
    }

    /// Whether a deferred redraw is outstanding.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Decide how to serve a redraw requested at `now_ms`.
    pub fn request(&mut self, now_ms: u64) -> RedrawDecision {
        let Some(interval) = self.interval_ms else {
            return RedrawDecision::Now;
        };
        if self.pending {
            return RedrawDecision::AlreadyPending;
        }
        match self.last_draw_ms {
            Some(last) if now_ms.saturating_sub(last) < interval => {
                self.pending = true;
                let wait = interval - now_ms.saturating_sub(last);
                RedrawDecision::Deferred(Duration::from_millis(wait))
            }
            _ => RedrawDecision::Now,
        }
    }

    /// Record a completed redraw.
    pub fn mark_drawn(&mut self, now_ms: u64) {
        self.last_draw_ms = Some(now_ms);
        self.pending = false;
    }

    /// Forget the pending redraw. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }

    /// Clear all timing state, for a new gesture.
    pub fn reset(&mut self) {
        self.last_draw_ms = None;
        self.pending = false;
    }
}
