//! Gesture harness for slidekit sliders.
//!
//! Drives a [`SliderCore`] over a [`LinearHost`] with a manual clock: every
//! pointer step advances time by one frame interval, deferred redraws fire
//! when their delay has elapsed, and settle animations play out frame by frame
//! on demand.

use crate::host::LinearHost;
use crate::scheduler::RecordingScheduler;
use slidekit_core::{
    Clock, EventKind, GestureRelease, ManualClock, Point, SliderBuilder, SliderConfig, SliderCore,
    SliderEvent,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Default time between simulated pointer events.
pub const DEFAULT_FRAME_MS: u64 = 16;

/// Test harness for driving a slider with simulated pointer input.
pub struct Harness {
    slider: SliderCore<LinearHost>,
    clock: ManualClock,
    timers: Option<RecordingScheduler>,
    timer_due_ms: Option<u64>,
    events: Rc<RefCell<Vec<SliderEvent>>>,
    pointer: Point,
    frame_ms: u64,
    last_move_suppressed: Option<bool>,
    unsettled: bool,
}

impl Harness {
    /// Slider over `slide_count` slides, `panel_width` pixels each, default
    /// configuration, redraws drawn immediately.
    pub fn new(slide_count: usize, panel_width: f64) -> Self {
        Self::with_config(slide_count, panel_width, SliderConfig::default())
    }

    /// Slider with `config`, redraws drawn immediately.
    pub fn with_config(slide_count: usize, panel_width: f64, config: SliderConfig) -> Self {
        let host = viewport_host(panel_width, &config);
        Self::from_builder(SliderBuilder::new(slide_count).config(config), host, None)
    }

    /// Slider with `config` whose redraws go through a [`RecordingScheduler`].
    pub fn throttled(slide_count: usize, panel_width: f64, config: SliderConfig) -> Self {
        let host = viewport_host(panel_width, &config);
        Self::from_builder(
            SliderBuilder::new(slide_count).config(config),
            host,
            Some(RecordingScheduler::new()),
        )
    }

    /// Finish `builder` with the harness clock, an event recorder and,
    /// optionally, a recording scheduler.
    pub fn from_builder(
        builder: SliderBuilder,
        host: LinearHost,
        timers: Option<RecordingScheduler>,
    ) -> Self {
        let clock = ManualClock::new(0);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);

        let mut builder = builder
            .clock(clock.clone())
            .on_all(move |event| sink.borrow_mut().push(event.clone()));
        if let Some(timers) = &timers {
            builder = builder.scheduler(timers.clone());
        }

        Self {
            slider: builder.build(host),
            clock,
            timers,
            timer_due_ms: None,
            events,
            pointer: Point::ORIGIN,
            frame_ms: DEFAULT_FRAME_MS,
            last_move_suppressed: None,
            unsettled: false,
        }
    }

    /// Set the time between simulated pointer events.
    #[must_use]
    pub const fn frame_interval(mut self, ms: u64) -> Self {
        self.frame_ms = ms;
        self
    }

    // === Pointer Simulation ===

    /// Press the pointer at `(x, y)`.
    pub fn press(&mut self, x: f64, y: f64) -> &mut Self {
        self.pointer = Point::new(x, y);
        self.slider.on_gesture_start(x, y);
        self.track_timer();
        self
    }

    /// Move the pointer to `(x, y)`, one frame after the previous event.
    pub fn drag_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.wait(self.frame_ms);
        let delta = Point::new(x, y) - self.pointer;
        self.pointer = Point::new(x, y);
        let suppressed = self.slider.on_gesture_move(x, y, delta.x, delta.y);
        self.last_move_suppressed = Some(suppressed);
        self.track_timer();
        self
    }

    /// Move the pointer by `(dx, dy)`.
    pub fn drag_by(&mut self, dx: f64, dy: f64) -> &mut Self {
        let target = self.pointer + Point::new(dx, dy);
        self.drag_to(target.x, target.y)
    }

    /// Release the pointer where it is, one frame after the previous event.
    pub fn release(&mut self) -> &mut Self {
        self.wait(self.frame_ms);
        let Point { x, y } = self.pointer;
        self.slider.on_gesture_end(x, y);
        self.unsettled = true;
        self.track_timer();
        self
    }

    /// Release the pointer at `(x, y)` without moving there first.
    pub fn release_at(&mut self, x: f64, y: f64) -> &mut Self {
        self.pointer = Point::new(x, y);
        self.release()
    }

    /// Press at `from`, drag to `to` in `steps` equal moves, release.
    pub fn swipe(&mut self, from: Point, to: Point, steps: u32) -> &mut Self {
        self.press(from.x, from.y);
        let steps = steps.max(1);
        for i in 1..=steps {
            let t = f64::from(i) / f64::from(steps);
            self.drag_to(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
        }
        self.release()
    }

    /// Let `ms` pass, firing a deferred redraw that falls due.
    pub fn wait(&mut self, ms: u64) -> &mut Self {
        self.clock.advance(ms);
        let now = self.clock.now_ms();
        if self.timer_due_ms.is_some_and(|due| due <= now)
            && self
                .timers
                .as_ref()
                .and_then(RecordingScheduler::fire)
                .is_some()
        {
            self.timer_due_ms = None;
            self.slider.on_frame();
            self.track_timer();
        }
        self
    }

    /// Play the settle animation of the last release to its end.
    ///
    /// Frames are rendered on the host every frame interval along the
    /// animation's easing curve, then the slider is told the animation
    /// completed at its target.
    pub fn settle(&mut self) -> &mut Self {
        if !self.unsettled {
            return self;
        }
        self.unsettled = false;
        let Some(animation) = self.slider.host().last_animation() else {
            return self;
        };

        let start = self.slider.position();
        let step = Duration::from_millis(self.frame_ms.max(1));
        let mut elapsed = Duration::ZERO;
        while elapsed < animation.duration {
            let next = (elapsed + step).min(animation.duration);
            self.clock
                .advance(u64::try_from((next - elapsed).as_millis()).unwrap_or(u64::MAX));
            elapsed = next;
            let frame = animation.position_at(start, elapsed);
            self.slider.host_mut().animation_frame(frame);
        }
        self.slider.animation_complete(animation.target(start));
        self
    }

    fn track_timer(&mut self) {
        let Some(timers) = &self.timers else {
            return;
        };
        match timers.outstanding() {
            Some(delay) if self.timer_due_ms.is_none() => {
                let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                self.timer_due_ms = Some(self.clock.now_ms().saturating_add(delay_ms));
            }
            Some(_) => {}
            None => self.timer_due_ms = None,
        }
    }

    // === Queries ===

    /// The slider under test.
    pub const fn slider(&self) -> &SliderCore<LinearHost> {
        &self.slider
    }

    /// The slider under test, mutably.
    pub fn slider_mut(&mut self) -> &mut SliderCore<LinearHost> {
        &mut self.slider
    }

    /// The recording host.
    pub const fn host(&self) -> &LinearHost {
        self.slider.host()
    }

    /// Current slider position.
    pub const fn position(&self) -> f64 {
        self.slider.position()
    }

    /// Current harness time.
    pub fn now(&self) -> u64 {
        self.clock.now_ms()
    }

    /// The recording scheduler, when throttled.
    pub const fn timers(&self) -> Option<&RecordingScheduler> {
        self.timers.as_ref()
    }

    /// Whether the last move asked the host to suppress its default.
    pub const fn last_move_suppressed(&self) -> Option<bool> {
        self.last_move_suppressed
    }

    /// Outcome of the most recent release.
    pub fn last_release(&self) -> Option<GestureRelease> {
        self.slider.last_release().copied()
    }

    /// Events emitted so far.
    pub fn events(&self) -> Vec<SliderEvent> {
        self.events.borrow().clone()
    }

    /// Kinds of the events emitted so far.
    pub fn event_kinds(&self) -> Vec<EventKind> {
        self.events.borrow().iter().map(SliderEvent::kind).collect()
    }

    /// Forget recorded events.
    pub fn clear_events(&mut self) -> &mut Self {
        self.events.borrow_mut().clear();
        self
    }

    // === Assertions ===

    /// Assert the slider position, within `1e-9`.
    ///
    /// # Panics
    ///
    /// Panics if the position differs.
    pub fn assert_position(&self, expected: f64) -> &Self {
        let actual = self.position();
        assert!(
            (actual - expected).abs() < 1e-9,
            "Expected position {expected} but got {actual}"
        );
        self
    }

    /// Assert the slide nearest to the position.
    ///
    /// # Panics
    ///
    /// Panics if the slide differs.
    pub fn assert_current_slide(&self, expected: i64) -> &Self {
        let actual = self.slider.current_slide();
        assert_eq!(
            actual, expected,
            "Expected current slide {expected} but got {actual}"
        );
        self
    }

    /// Assert whether a gesture holds the lock.
    ///
    /// # Panics
    ///
    /// Panics if the lock state differs.
    pub fn assert_locked(&self, expected: bool) -> &Self {
        let actual = self.slider.state().locked;
        assert_eq!(actual, expected, "Expected locked={expected} but got {actual}");
        self
    }

    /// Assert the kinds of the recorded events, in order.
    ///
    /// # Panics
    ///
    /// Panics if the sequence differs.
    pub fn assert_event_kinds(&self, expected: &[EventKind]) -> &Self {
        let actual = self.event_kinds();
        assert_eq!(actual, expected, "Unexpected event sequence");
        self
    }
}

fn viewport_host(panel_width: f64, config: &SliderConfig) -> LinearHost {
    let visible = if config.panels_visible.is_finite() && config.panels_visible > 0.0 {
        config.panels_visible
    } else {
        1.0
    };
    LinearHost::new(panel_width).with_viewport_width(panel_width * visible)
}
