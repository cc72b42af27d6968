//! Slider lifecycle events and a typed observer bus.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Events emitted by the slider core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SliderEvent {
    /// Slider constructed, resources may still be loading.
    Loading,
    /// Host reported all resources loaded.
    Ready,
    /// Pointer pressed, a gesture begins.
    Start {
        /// Pointer x
        x: f64,
        /// Pointer y
        y: f64,
    },
    /// Pointer moved during a gesture.
    Move {
        /// Pointer x
        x: f64,
        /// Pointer y
        y: f64,
        /// Horizontal delta since the previous move
        dx: f64,
        /// Vertical delta since the previous move
        dy: f64,
    },
    /// Gesture ended and the settle animation was handed to the host.
    Stop {
        /// Pointer x
        x: f64,
        /// Pointer y
        y: f64,
        /// Whether the gesture was a drag rather than a scroll or tap
        was_drag: bool,
    },
    /// Slider unlocked after a gesture, before the settle animation starts.
    Finish {
        /// Pointer x
        x: f64,
        /// Pointer y
        y: f64,
    },
    /// Running animations were aborted.
    AbortAnimation,
    /// Configuration is about to change.
    Updating,
    /// Configuration changed and the panel layout was recomputed.
    Layout,
}

impl SliderEvent {
    /// Kind of this event, for filtered subscriptions.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Loading => EventKind::Loading,
            Self::Ready => EventKind::Ready,
            Self::Start { .. } => EventKind::Start,
            Self::Move { .. } => EventKind::Move,
            Self::Stop { .. } => EventKind::Stop,
            Self::Finish { .. } => EventKind::Finish,
            Self::AbortAnimation => EventKind::AbortAnimation,
            Self::Updating => EventKind::Updating,
            Self::Layout => EventKind::Layout,
        }
    }
}

/// Discriminant of [`SliderEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// See [`SliderEvent::Loading`]
    Loading,
    /// See [`SliderEvent::Ready`]
    Ready,
    /// See [`SliderEvent::Start`]
    Start,
    /// See [`SliderEvent::Move`]
    Move,
    /// See [`SliderEvent::Stop`]
    Stop,
    /// See [`SliderEvent::Finish`]
    Finish,
    /// See [`SliderEvent::AbortAnimation`]
    AbortAnimation,
    /// See [`SliderEvent::Updating`]
    Updating,
    /// See [`SliderEvent::Layout`]
    Layout,
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Event listener callback.
pub type Listener = Box<dyn FnMut(&SliderEvent)>;

struct Subscription {
    id: SubscriptionId,
    filter: Option<EventKind>,
    listener: Listener,
}

/// Dispatches events to listeners in subscription order.
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.subscriptions.len())
            .finish()
    }
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for one kind of event.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&SliderEvent) + 'static,
    ) -> SubscriptionId {
        self.insert(Some(kind), Box::new(listener))
    }

    /// Listen for every event.
    pub fn subscribe_all(&mut self, listener: impl FnMut(&SliderEvent) + 'static) -> SubscriptionId {
        self.insert(None, Box::new(listener))
    }

    fn insert(&mut self, filter: Option<EventKind>, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            filter,
            listener,
        });
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Deliver `event` to every matching listener.
    pub fn emit(&mut self, event: &SliderEvent) {
        let kind = event.kind();
        for subscription in &mut self.subscriptions {
            if subscription.filter.map_or(true, |filter| filter == kind) {
                (subscription.listener)(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<SliderEvent>>>, impl FnMut(&SliderEvent)) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |e: &SliderEvent| sink.borrow_mut().push(e.clone()))
    }

    #[test]
    fn test_event_kind() {
        assert_eq!(SliderEvent::Loading.kind(), EventKind::Loading);
        assert_eq!(
            SliderEvent::Move {
                x: 1.0,
                y: 2.0,
                dx: 0.0,
                dy: 0.0
            }
            .kind(),
            EventKind::Move
        );
        assert_eq!(
            SliderEvent::Stop {
                x: 0.0,
                y: 0.0,
                was_drag: true
            }
            .kind(),
            EventKind::Stop
        );
    }

    #[test]
    fn test_filtered_subscription() {
        let mut bus = EventBus::new();
        let (finishes, listener) = recorder();
        bus.subscribe(EventKind::Finish, listener);

        bus.emit(&SliderEvent::Start { x: 1.0, y: 1.0 });
        bus.emit(&SliderEvent::Finish { x: 2.0, y: 3.0 });
        bus.emit(&SliderEvent::AbortAnimation);

        assert_eq!(
            *finishes.borrow(),
            vec![SliderEvent::Finish { x: 2.0, y: 3.0 }]
        );
    }

    #[test]
    fn test_subscribe_all_in_order() {
        let mut bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&order);
        let second = Rc::clone(&order);
        bus.subscribe_all(move |_| first.borrow_mut().push("first"));
        bus.subscribe(EventKind::Ready, move |_| second.borrow_mut().push("second"));

        bus.emit(&SliderEvent::Ready);
        bus.emit(&SliderEvent::Loading);

        assert_eq!(*order.borrow(), vec!["first", "second", "first"]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::new();
        let (events, listener) = recorder();
        let id = bus.subscribe_all(listener);
        assert_eq!(bus.listener_count(), 1);

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(&SliderEvent::Ready);

        assert!(events.borrow().is_empty());
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_event_bus_debug() {
        let mut bus = EventBus::new();
        bus.subscribe_all(|_| {});
        assert!(format!("{bus:?}").contains("listeners: 1"));
    }

    #[test]
    fn test_event_serde_roundtrip() {
        let event = SliderEvent::Stop {
            x: 4.0,
            y: 5.0,
            was_drag: false,
        };
        let json = serde_json::to_string(&event).expect("serialize");
        let back: SliderEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, event);
    }
}
