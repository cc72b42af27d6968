//! The slider core: configuration, state, events and gesture dispatch.

use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigMutator, SliderConfig};
use crate::event::{EventBus, EventKind, SliderEvent};
use crate::gesture::{DragSession, GestureHandler, GestureRelease, SwipeTracker};
use crate::host::SliderHost;
use crate::mapper::{apply_pending_offset, PanelRange};
use crate::panels::ClonePlan;
use crate::scheduler::{FrameThrottle, RedrawDecision, RedrawScheduler};
use std::fmt;

/// Mutable slider state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SliderState {
    /// Current position, fractional while dragging.
    pub position: f64,
    /// A gesture holds the slider.
    pub locked: bool,
    /// The pointer moved during the last gesture and its settle animation
    /// has not completed yet.
    pub swiping: bool,
    /// The host reported all resources loaded.
    pub ready: bool,
}

// =============================================================================
// Slider Context
// =============================================================================

/// Everything a [`GestureHandler`] may read or drive.
pub struct SliderContext<H> {
    config: SliderConfig,
    state: SliderState,
    plan: ClonePlan,
    range: PanelRange,
    host: H,
    events: EventBus,
    throttle: FrameThrottle,
    scheduler: Option<Box<dyn RedrawScheduler>>,
    clock: Box<dyn Clock>,
}

impl<H: fmt::Debug> fmt::Debug for SliderContext<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderContext")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("plan", &self.plan)
            .field("range", &self.range)
            .field("host", &self.host)
            .field("events", &self.events)
            .field("throttle", &self.throttle)
            .field("scheduler", &self.scheduler.is_some())
            .finish_non_exhaustive()
    }
}

impl<H: SliderHost> SliderContext<H> {
    /// Active configuration.
    pub const fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// Current state.
    pub const fn state(&self) -> &SliderState {
        &self.state
    }

    /// Current position.
    pub const fn position(&self) -> f64 {
        self.state.position
    }

    /// Valid panel range.
    pub const fn range(&self) -> &PanelRange {
        &self.range
    }

    /// Panel clone plan.
    pub const fn clone_plan(&self) -> &ClonePlan {
        &self.plan
    }

    /// The host.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Current time from the slider clock.
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Deliver an event to listeners.
    pub fn emit(&mut self, event: &SliderEvent) {
        self.events.emit(event);
    }

    /// Take the gesture lock.
    pub fn lock(&mut self) {
        self.state.locked = true;
    }

    /// Release the gesture lock.
    pub fn unlock(&mut self) {
        self.state.locked = false;
    }

    /// Set or clear the swiping flag.
    pub fn set_swiping(&mut self, swiping: bool) {
        self.state.swiping = swiping;
    }

    /// Stop host animations and announce it.
    pub fn abort_animations(&mut self) {
        self.host.abort_animation();
        self.events.emit(&SliderEvent::AbortAnimation);
    }

    /// Redraw the drag now, or defer it to the next frame slot.
    pub fn request_redraw(&mut self, session: &mut DragSession) {
        let decision = self.throttle.request(self.clock.now_ms());
        match (decision, self.scheduler.as_mut()) {
            (RedrawDecision::Deferred(delay), Some(scheduler)) => {
                log::trace!("redraw deferred by {delay:?}");
                scheduler.schedule(delay);
            }
            (RedrawDecision::AlreadyPending, Some(_)) => {}
            _ => self.flush_redraw(session),
        }
    }

    /// Fold the session's pending offset into the position immediately.
    pub fn flush_redraw(&mut self, session: &mut DragSession) {
        self.state.position =
            apply_pending_offset(&mut self.host, &self.range, self.state.position, session);
        self.throttle.mark_drawn(self.clock.now_ms());
    }

    /// Cancel the deferred redraw, if one is scheduled.
    pub fn cancel_redraw(&mut self) {
        if self.throttle.cancel() {
            log::trace!("deferred redraw cancelled");
            if let Some(scheduler) = self.scheduler.as_mut() {
                scheduler.cancel();
            }
        }
    }

    /// Forget redraw timing so the next request draws at once.
    pub fn reset_redraw_timing(&mut self) {
        self.throttle.reset();
    }

    fn relayout(&mut self) {
        self.plan = ClonePlan::from_config(&self.config, self.plan.slide_count);
        self.range = self.plan.range(self.config.carousel);
        self.throttle = throttle_for(&self.config, self.scheduler.is_some());
        self.state.position = self.range.settle_position(self.state.position);
        self.host.set_position(self.state.position);
    }
}

fn throttle_for(config: &SliderConfig, has_scheduler: bool) -> FrameThrottle {
    if has_scheduler {
        FrameThrottle::new(config.fps, config.vsync)
    } else {
        FrameThrottle::unthrottled()
    }
}

// =============================================================================
// Slider Core
// =============================================================================

/// A slider driven by host pointer events.
///
/// The host forwards press, move and release events, calls
/// [`on_frame`](Self::on_frame) when a deferred redraw is due and
/// [`animation_complete`](Self::animation_complete) when a settle
/// animation ends.
pub struct SliderCore<H, G = SwipeTracker> {
    ctx: SliderContext<H>,
    gesture: G,
    last_release: Option<GestureRelease>,
}

impl<H: fmt::Debug, G: fmt::Debug> fmt::Debug for SliderCore<H, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderCore")
            .field("ctx", &self.ctx)
            .field("gesture", &self.gesture)
            .field("last_release", &self.last_release)
            .finish()
    }
}

impl<H: SliderHost, G: GestureHandler<H>> SliderCore<H, G> {
    /// Pointer pressed.
    pub fn on_gesture_start(&mut self, x: f64, y: f64) {
        self.gesture.start(&mut self.ctx, x, y);
    }

    /// Pointer moved. Returns whether the host should suppress its
    /// default handling of the event.
    pub fn on_gesture_move(&mut self, x: f64, y: f64, dx: f64, dy: f64) -> bool {
        self.gesture
            .move_to(&mut self.ctx, x, y, dx, dy)
            .suppresses_default()
    }

    /// Pointer released. Returns whether the gesture was a drag.
    pub fn on_gesture_end(&mut self, x: f64, y: f64) -> bool {
        let release = self.gesture.stop(&mut self.ctx, x, y);
        self.last_release = Some(release);
        release.was_drag
    }

    /// A deferred redraw is due.
    pub fn on_frame(&mut self) {
        self.gesture.frame(&mut self.ctx);
    }

    /// The settle animation finished at `position`.
    ///
    /// The position is wrapped (carousel) or clamped into the slide range.
    pub fn animation_complete(&mut self, position: f64) {
        self.ctx.state.position = self.ctx.range.settle_position(position);
        self.ctx.state.swiping = false;
    }

    /// Host resources finished loading. Emits `Ready` once.
    pub fn mark_ready(&mut self) {
        if self.ctx.state.ready {
            return;
        }
        self.ctx.state.ready = true;
        self.ctx.emit(&SliderEvent::Ready);
    }

    /// Change the configuration and recompute the layout.
    ///
    /// Refused while a gesture holds the lock.
    pub fn update(&mut self, mutate: impl FnOnce(&mut SliderConfig)) -> bool {
        if self.ctx.state.locked || self.gesture.is_active() {
            log::warn!("configuration update refused while a gesture is active");
            return false;
        }
        self.ctx.emit(&SliderEvent::Updating);
        mutate(&mut self.ctx.config);
        self.ctx.config.normalize();
        self.ctx.relayout();
        log::debug!(
            "layout updated: panels {}..={} carousel={}",
            self.ctx.range.panel_min(),
            self.ctx.range.panel_max(),
            self.ctx.range.is_carousel()
        );
        self.ctx.emit(&SliderEvent::Layout);
        true
    }
}

impl<H, G> SliderCore<H, G> {
    /// Current position.
    pub const fn position(&self) -> f64 {
        self.ctx.state.position
    }

    /// Current state.
    pub const fn state(&self) -> &SliderState {
        &self.ctx.state
    }

    /// Active configuration.
    pub const fn config(&self) -> &SliderConfig {
        &self.ctx.config
    }

    /// Valid panel range.
    pub const fn range(&self) -> &PanelRange {
        &self.ctx.range
    }

    /// Panel clone plan.
    pub const fn clone_plan(&self) -> &ClonePlan {
        &self.ctx.plan
    }

    /// Slide nearest to the current position.
    pub fn current_slide(&self) -> i64 {
        let nearest = crate::mapper::round_half_even(self.ctx.state.position) as i64;
        self.ctx.range.slide_index_to_slide_index(nearest)
    }

    /// Outcome of the most recent release.
    pub const fn last_release(&self) -> Option<&GestureRelease> {
        self.last_release.as_ref()
    }

    /// The gesture handler.
    pub const fn gesture(&self) -> &G {
        &self.gesture
    }

    /// The host.
    pub const fn host(&self) -> &H {
        &self.ctx.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.ctx.host
    }

    /// The event bus, for adding or removing listeners later.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.ctx.events
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`SliderCore`].
pub struct SliderBuilder {
    slide_count: usize,
    config: SliderConfig,
    mutators: Vec<ConfigMutator>,
    events: EventBus,
    scheduler: Option<Box<dyn RedrawScheduler>>,
    clock: Option<Box<dyn Clock>>,
}

impl fmt::Debug for SliderBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderBuilder")
            .field("slide_count", &self.slide_count)
            .field("config", &self.config)
            .field("mutators", &self.mutators.len())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl SliderBuilder {
    /// Start building a slider over `slide_count` real slides.
    pub fn new(slide_count: usize) -> Self {
        Self {
            slide_count,
            config: SliderConfig::default(),
            mutators: Vec::new(),
            events: EventBus::new(),
            scheduler: None,
            clock: None,
        }
    }

    /// Replace the base configuration.
    pub fn config(mut self, config: SliderConfig) -> Self {
        self.config = config;
        self
    }

    /// Queue a configuration mutator. Mutators run once, in order.
    pub fn configure(mut self, mutate: impl FnOnce(&mut SliderConfig) + 'static) -> Self {
        self.mutators.push(Box::new(mutate));
        self
    }

    /// Listen for one kind of event.
    pub fn on(mut self, kind: EventKind, listener: impl FnMut(&SliderEvent) + 'static) -> Self {
        self.events.subscribe(kind, listener);
        self
    }

    /// Listen for every event.
    pub fn on_all(mut self, listener: impl FnMut(&SliderEvent) + 'static) -> Self {
        self.events.subscribe_all(listener);
        self
    }

    /// Defer drag redraws through `scheduler`, throttled to `fps`.
    ///
    /// Without a scheduler every redraw happens immediately.
    pub fn scheduler(mut self, scheduler: impl RedrawScheduler + 'static) -> Self {
        self.scheduler = Some(Box::new(scheduler));
        self
    }

    /// Clock used for sample timestamps. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Build with the default [`SwipeTracker`].
    pub fn build<H: SliderHost>(self, host: H) -> SliderCore<H> {
        self.build_with(host, SwipeTracker::new())
    }

    /// Build with a custom gesture handler.
    pub fn build_with<H: SliderHost, G: GestureHandler<H>>(
        self,
        host: H,
        gesture: G,
    ) -> SliderCore<H, G> {
        let Self {
            slide_count,
            mut config,
            mutators,
            events,
            scheduler,
            clock,
        } = self;

        config.apply_mutators(mutators);
        let plan = ClonePlan::from_config(&config, slide_count);
        let range = plan.range(config.carousel);
        let position = range.slide_index_to_slide_index(config.slide_first) as f64;
        let throttle = throttle_for(&config, scheduler.is_some());

        log::debug!(
            "slider built: {slide_count} slides, clones {}+{}, start at {position}",
            plan.before,
            plan.after
        );

        let mut ctx = SliderContext {
            config,
            state: SliderState {
                position,
                ..SliderState::default()
            },
            plan,
            range,
            host,
            events,
            throttle,
            scheduler,
            clock: clock.unwrap_or_else(|| Box::new(SystemClock::new())),
        };
        ctx.emit(&SliderEvent::Loading);

        SliderCore {
            ctx,
            gesture,
            last_release: None,
        }
    }
}
