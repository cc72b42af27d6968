//! Swipe physics and panel index mapping for slider widgets.
//!
//! This crate holds the rendering-independent half of a slider:
//! - Gesture tracking: [`SwipeTracker`] locks a pointer gesture to drag or
//!   scroll, samples it and turns the release velocity into inertia
//! - Index mapping: [`PanelRange`] converts between positions, panel
//!   indices and slide indices, wrapping in carousel mode
//! - Carousel clones: [`ClonePlan`]
//! - Settle animations: [`settle_animation`] picks easing and duration
//! - Redraw throttling: [`FrameThrottle`] and [`RedrawScheduler`]
//! - Events: [`EventBus`] with typed [`SliderEvent`]s
//!
//! Hosts implement [`SliderHost`] and feed pointer events to a
//! [`SliderCore`] built with [`SliderBuilder`].

mod clock;
mod config;
mod easing;
mod error;
mod event;
mod geometry;
mod gesture;
mod host;
mod mapper;
mod panels;
mod scheduler;
mod slider;
mod velocity;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    Align, CloneCount, ConfigMutator, SliderConfig, DEFAULT_ALIGN, DEFAULT_FPS,
    DEFAULT_SWIPE_THRESHOLD,
};
pub use easing::{
    settle_animation, Easing, BOUNCE_SPEED_LIMIT, LONG_SETTLE_MS, SHORT_SETTLE_DISTANCE,
    SHORT_SETTLE_MS,
};
pub use error::ConfigError;
pub use event::{EventBus, EventKind, Listener, SliderEvent, SubscriptionId};
pub use geometry::Point;
pub use gesture::{
    AxisLock, DragSession, GestureHandler, GestureRelease, MoveResponse, SwipeTracker,
};
pub use host::{AnimationRequest, SliderHost};
pub use mapper::{
    align_to_whole, apply_pending_offset, final_offset, round_half_even, snap, PanelRange,
};
pub use panels::ClonePlan;
pub use scheduler::{FrameThrottle, RedrawDecision, RedrawScheduler};
pub use slider::{SliderBuilder, SliderContext, SliderCore, SliderState};
pub use velocity::{
    least_squares, LinearFit, ReleaseVelocity, Sample, SampleBuffer, MAX_SAMPLES,
    VELOCITY_WINDOW_MS,
};
