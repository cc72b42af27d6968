//! Clone planning for carousel mode.
//!
//! A carousel duplicates some slides on both sides of the real ones so the
//! viewport never shows an empty edge while the position wraps around.
//! Clones before the first slide come from the end of the slide list,
//! clones after the last slide from its beginning. Counts larger than the
//! slide count repeat whole sets.

use crate::config::{CloneCount, SliderConfig};
use crate::mapper::PanelRange;

/// Number of cloned panels on each side of the real slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClonePlan {
    /// Clones placed before the first slide.
    pub before: usize,
    /// Clones placed after the last slide.
    pub after: usize,
    /// Real (uncloned) slides.
    pub slide_count: usize,
}

impl ClonePlan {
    /// Derive the plan from the configuration.
    ///
    /// Nothing is cloned outside carousel mode or without slides.
    #[must_use]
    pub fn from_config(config: &SliderConfig, slide_count: usize) -> Self {
        if !config.carousel || slide_count == 0 {
            return Self {
                before: 0,
                after: 0,
                slide_count,
            };
        }

        let total = match config.clone_panels {
            CloneCount::Toggle(true) => config.panels_visible.ceil(),
            CloneCount::Toggle(false) => 0.0,
            CloneCount::Count(n) => round_count(n),
        };
        let align = config.align_viewport_ratio();

        Self {
            before: side_count(config.clone_before, total * align),
            after: side_count(config.clone_after, total * (1.0 - align)),
            slide_count,
        }
    }

    /// Panels including clones.
    #[must_use]
    pub const fn panel_count(&self) -> usize {
        self.before + self.slide_count + self.after
    }

    /// Whether `panel` is a clone rather than a real slide.
    #[must_use]
    pub const fn is_clone(&self, panel: usize) -> bool {
        panel < self.before || panel >= self.before + self.slide_count
    }

    /// The real slide shown by `panel`, clones included.
    ///
    /// Returns `None` for panels past the end or when there are no slides.
    #[must_use]
    pub fn source_slide(&self, panel: usize) -> Option<usize> {
        if self.slide_count == 0 || panel >= self.panel_count() {
            return None;
        }
        let offset = panel as i64 - self.before as i64;
        Some(offset.rem_euclid(self.slide_count as i64) as usize)
    }

    /// Valid panel index range for this plan.
    #[must_use]
    pub fn range(&self, carousel: bool) -> PanelRange {
        PanelRange::new(self.before as i64, self.slide_count as i64, carousel)
    }
}

fn round_count(n: f64) -> f64 {
    if n.is_finite() {
        (n + 0.5).floor().max(0.0)
    } else {
        0.0
    }
}

// Per-side numbers are not rounded; fractions drop like a slice length.
fn side_count(option: CloneCount, auto: f64) -> usize {
    let count = match option {
        CloneCount::Toggle(true) => auto.ceil(),
        CloneCount::Toggle(false) => 0.0,
        CloneCount::Count(n) if n.is_finite() => n.trunc(),
        CloneCount::Count(_) => 0.0,
    };
    count.max(0.0) as usize
}
