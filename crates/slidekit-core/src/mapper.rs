//! Index and offset mapping.
//!
//! Three coordinate systems meet here:
//! - *position*: real-valued slide index, fractional while dragging or
//!   animating;
//! - *panel index*: integer index into the clone-extended panel sequence;
//! - *slide index*: integer index into the real slides.
//!
//! Pixel offsets are owned by the host; this module only combines them
//! through [`SliderHost`].

use crate::gesture::DragSession;
use crate::host::SliderHost;

/// Round half to even, so `snap` never drifts in one direction on ties.
#[inline]
#[must_use]
pub fn round_half_even(value: f64) -> f64 {
    value.round_ties_even()
}

/// Snap `value` to the nearest multiple of `grid` offset by `base`.
///
/// A zero or non-finite `grid` is treated as 1, a non-finite `base` as 0.
#[must_use]
pub fn snap(value: f64, grid: f64, base: f64) -> f64 {
    let grid = if grid == 0.0 || !grid.is_finite() {
        1.0
    } else {
        grid
    };
    let base = if base.is_finite() { base } else { 0.0 };
    grid * round_half_even((value - base) / grid) + base
}

/// Correction to animate after a release.
///
/// Aligns the drag start to a whole position (the anchor), projects where
/// drag plus inertia would end up, snaps that onto a grid of `group` panels
/// counted from the anchor, and returns the remaining distance from the
/// currently dragged position `start + drag_delta`.
#[must_use]
pub fn final_offset(start: f64, drag_delta: f64, inertia: f64, group: f64) -> f64 {
    let anchor = snap(start, 1.0, 0.0);
    let projected = start + drag_delta + inertia;
    let target = snap(projected, group, anchor);
    target - drag_delta - start
}

/// Adjust `offset` so `position + offset` lands on a whole position.
///
/// Only changes anything when grouping made the target fractional.
#[must_use]
pub fn align_to_whole(position: f64, offset: f64) -> f64 {
    round_half_even(position + offset) - position
}

/// Bounds of valid panel indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelRange {
    panel_min: i64,
    panel_max: i64,
    slide_count: i64,
    carousel: bool,
}

impl PanelRange {
    /// Range for `slide_count` real slides starting at panel `panel_min`
    /// (the number of clones before the first slide).
    #[must_use]
    pub fn new(panel_min: i64, slide_count: i64, carousel: bool) -> Self {
        Self {
            panel_min,
            panel_max: panel_min.saturating_add((slide_count - 1).max(0)),
            slide_count,
            carousel,
        }
    }

    /// Lowest valid panel index.
    #[must_use]
    pub const fn panel_min(&self) -> i64 {
        self.panel_min
    }

    /// Highest valid panel index.
    #[must_use]
    pub const fn panel_max(&self) -> i64 {
        self.panel_max
    }

    /// Real slide count.
    #[must_use]
    pub const fn slide_count(&self) -> i64 {
        self.slide_count
    }

    /// Whether indices wrap instead of clamping.
    #[must_use]
    pub const fn is_carousel(&self) -> bool {
        self.carousel
    }

    /// Normalize any panel index into `[panel_min, panel_max]`.
    ///
    /// Carousel mode wraps modulo the slide count (0 when there are no
    /// slides); otherwise the index is clamped. Defined for every `i64`.
    #[must_use]
    pub fn panel_index_of(&self, raw: i64) -> i64 {
        self.normalize_wide(i128::from(raw))
    }

    /// Panel showing slide `slide`.
    #[must_use]
    pub fn slide_index_to_panel_index(&self, slide: i64) -> i64 {
        self.normalize_wide(i128::from(slide) + i128::from(self.panel_min))
    }

    // `raw - panel_min` needs more than 64 bits at the extremes.
    fn normalize_wide(&self, raw: i128) -> i64 {
        let min = i128::from(self.panel_min);
        let index = if self.carousel {
            if self.slide_count <= 0 {
                return 0;
            }
            (raw - min).rem_euclid(i128::from(self.slide_count)) + min
        } else {
            raw.clamp(min, i128::from(self.panel_max))
        };
        i64::try_from(index).unwrap_or(self.panel_min)
    }

    /// Slide shown by panel `panel`.
    #[must_use]
    pub fn panel_index_to_slide_index(&self, panel: i64) -> i64 {
        self.panel_index_of(panel) - self.panel_min
    }

    /// Round-trip a slide index through normalization.
    #[must_use]
    pub fn slide_index_to_slide_index(&self, slide: i64) -> i64 {
        self.panel_index_to_slide_index(self.slide_index_to_panel_index(slide))
    }

    /// Wrap a position into `[0, slide_count)` in carousel mode.
    ///
    /// Non-carousel positions pass through untouched so a drag can
    /// overshoot the edges before snapping back.
    #[must_use]
    pub fn normalize_position(&self, position: f64) -> f64 {
        if !self.carousel || self.slide_count <= 0 {
            return position;
        }
        let count = self.slide_count as f64;
        let wrapped = position.rem_euclid(count);
        // rem_euclid can round up to `count` for tiny negative inputs
        if wrapped >= count {
            0.0
        } else {
            wrapped
        }
    }

    /// Clamp a settle target to the slide range outside carousel mode.
    ///
    /// Carousel targets may leave `[0, slide_count)`; they wrap once the
    /// animation completes.
    #[must_use]
    pub fn bound_position(&self, position: f64) -> f64 {
        if self.carousel {
            position
        } else {
            position.clamp(0.0, (self.slide_count - 1).max(0) as f64)
        }
    }

    /// Bring a settled position back into the valid slide range.
    #[must_use]
    pub fn settle_position(&self, position: f64) -> f64 {
        if self.carousel {
            self.normalize_position(position)
        } else {
            position.clamp(0.0, (self.slide_count - 1).max(0) as f64)
        }
    }
}

/// Fold the session's pending pixel delta into the slider position.
///
/// Uses the out-of-bounds variants of the host mapping so a live drag can
/// overshoot. The raw position change is added to the session's cumulative
/// delta before the position is normalized and committed to the host.
/// Returns the committed position.
pub fn apply_pending_offset<H: SliderHost>(
    host: &mut H,
    range: &PanelRange,
    position: f64,
    session: &mut DragSession,
) -> f64 {
    let offset = host.offset_by_position(position, true) + session.pending_pixel_offset;
    let moved = host.position_by_offset(offset, true);
    session.cumulative_position_delta += moved - position;
    session.pending_pixel_offset = 0.0;

    let committed = range.normalize_position(moved);
    log::trace!("drag redraw {position:.4} -> {committed:.4}");
    host.set_position(committed);
    committed
}
