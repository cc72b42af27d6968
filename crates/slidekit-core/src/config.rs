//! Slider configuration.
//!
//! Option names follow the camelCase keys hosts already use in markup and
//! manifests (`swipeThreshold`, `panelsVisible`, ...). Every field has a
//! default, so a document only needs the keys it changes.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Pixels the pointer must travel before the gesture axis is fixed.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 5.0;
/// Redraw rate used while dragging.
pub const DEFAULT_FPS: f64 = 25.0;
/// Alignment used when nothing valid is configured (centered).
pub const DEFAULT_ALIGN: f64 = 0.5;

/// Alignment of panels relative to the viewport.
///
/// Either a ratio (0.0 = leading edge, 1.0 = trailing edge, values outside
/// that range are allowed) or a name such as `"left"`, `"center"`,
/// `"bottom"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Align {
    /// Explicit ratio.
    Ratio(f64),
    /// Named edge, or a number written as a string.
    Named(String),
}

impl Align {
    /// Resolve to a ratio, using `preset` when the value is not usable.
    ///
    /// Names are matched on their first letter: `l`/`t` -> 0.0,
    /// `c`/`m` -> 0.5, `r`/`b` -> 1.0.
    #[must_use]
    pub fn resolve(&self, preset: f64) -> f64 {
        match self {
            Self::Ratio(value) if value.is_finite() => *value,
            Self::Ratio(_) => preset,
            Self::Named(name) => {
                let name = name.trim();
                match name.chars().next().map(|c| c.to_ascii_lowercase()) {
                    Some('l' | 't') => 0.0,
                    Some('c' | 'm') => 0.5,
                    Some('r' | 'b') => 1.0,
                    _ => name
                        .parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .unwrap_or(preset),
                }
            }
        }
    }
}

impl Default for Align {
    fn default() -> Self {
        Self::Named("center".to_string())
    }
}

/// How many panels to clone: `true` derives the count, `false` disables
/// cloning, a number is taken as-is (rounded).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CloneCount {
    /// Derive automatically (`true`) or disable (`false`).
    Toggle(bool),
    /// Fixed count.
    Count(f64),
}

impl Default for CloneCount {
    fn default() -> Self {
        Self::Toggle(true)
    }
}

/// Configuration for a slider instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SliderConfig {
    /// Pixel distance before the gesture axis (drag or scroll) is fixed.
    pub swipe_threshold: f64,
    /// Number of panels visible at once, may be fractional.
    pub panels_visible: f64,
    /// Snap by groups of `floor(panels_visible)` panels.
    pub group_panels: bool,
    /// Endless carousel with cloned panels.
    pub carousel: bool,
    /// Panel alignment to the position.
    pub align: Align,
    /// Panel alignment along the sliding axis, inherits `align` when absent.
    pub align_panel_dim: Option<Align>,
    /// Panel alignment across the sliding axis, inherits `align` when absent.
    pub align_panel_opp: Option<Align>,
    /// Viewport alignment, inherits `align` when absent.
    pub align_viewport: Option<Align>,
    /// First slide shown after construction.
    pub slide_first: i64,
    /// Frames per second while dragging.
    pub fps: f64,
    /// Draw as soon as requested instead of throttling to `fps`.
    pub vsync: bool,
    /// Total panels to clone in carousel mode.
    pub clone_panels: CloneCount,
    /// Clones placed before the first slide.
    pub clone_before: CloneCount,
    /// Clones placed after the last slide.
    pub clone_after: CloneCount,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            panels_visible: 1.0,
            group_panels: false,
            carousel: false,
            align: Align::default(),
            align_panel_dim: None,
            align_panel_opp: None,
            align_viewport: None,
            slide_first: 0,
            fps: DEFAULT_FPS,
            vsync: false,
            clone_panels: CloneCount::default(),
            clone_before: CloneCount::default(),
            clone_after: CloneCount::default(),
        }
    }
}

/// A configuration hook run once, in registration order, before the
/// slider is built.
pub type ConfigMutator = Box<dyn FnOnce(&mut SliderConfig)>;

impl SliderConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yaml_ng::from_str(source)?;
        config.normalize();
        Ok(config)
    }

    /// Parse a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(source)?;
        config.normalize();
        Ok(config)
    }

    /// Apply mutators in order, then normalize.
    pub fn apply_mutators(&mut self, mutators: impl IntoIterator<Item = ConfigMutator>) {
        for mutate in mutators {
            mutate(self);
        }
        self.normalize();
    }

    /// Repair values that would break the gesture math.
    pub fn normalize(&mut self) {
        if !self.panels_visible.is_finite() || self.panels_visible <= 0.0 {
            log::warn!(
                "panelsVisible {} is not usable, falling back to 1",
                self.panels_visible
            );
            self.panels_visible = 1.0;
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            log::warn!(
                "swipeThreshold {} is not usable, falling back to {DEFAULT_SWIPE_THRESHOLD}",
                self.swipe_threshold
            );
            self.swipe_threshold = DEFAULT_SWIPE_THRESHOLD;
        }
        if !self.fps.is_finite() {
            log::warn!("fps {} is not usable, falling back to {DEFAULT_FPS}", self.fps);
            self.fps = DEFAULT_FPS;
        }
    }

    /// Resolved `align` ratio.
    #[must_use]
    pub fn align_ratio(&self) -> f64 {
        self.align.resolve(DEFAULT_ALIGN)
    }

    /// Resolved viewport alignment ratio, inheriting from `align`.
    #[must_use]
    pub fn align_viewport_ratio(&self) -> f64 {
        self.inherit_align(self.align_viewport.as_ref())
    }

    /// Resolved panel alignment along the sliding axis.
    #[must_use]
    pub fn align_panel_dim_ratio(&self) -> f64 {
        self.inherit_align(self.align_panel_dim.as_ref())
    }

    /// Resolved panel alignment across the sliding axis.
    #[must_use]
    pub fn align_panel_opp_ratio(&self) -> f64 {
        self.inherit_align(self.align_panel_opp.as_ref())
    }

    fn inherit_align(&self, align: Option<&Align>) -> f64 {
        let preset = self.align_ratio();
        align.map_or(preset, |align| align.resolve(preset))
    }

    /// Whole panels used as one snapping unit.
    ///
    /// `floor(panels_visible)` when grouping, otherwise 1. Never 0.
    #[must_use]
    pub fn snap_group(&self) -> f64 {
        if self.group_panels {
            self.panels_visible.floor().max(1.0)
        } else {
            1.0
        }
    }
}
