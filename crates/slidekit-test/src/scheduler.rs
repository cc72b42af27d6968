//! A redraw scheduler that only records what it was asked to do.

use slidekit_core::RedrawScheduler;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// A call made on the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCall {
    /// `schedule(delay)`
    Schedule(Duration),
    /// `cancel()`
    Cancel,
    /// The outstanding request was fired by the test.
    Fired,
}

/// Records schedule and cancel requests. Clones share the log, so a test
/// keeps one handle while the slider owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingScheduler {
    log: Rc<RefCell<Vec<TimerCall>>>,
}

impl RecordingScheduler {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded call, oldest first.
    pub fn calls(&self) -> Vec<TimerCall> {
        self.log.borrow().clone()
    }

    /// Number of `schedule` calls.
    pub fn scheduled(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|call| matches!(call, TimerCall::Schedule(_)))
            .count()
    }

    /// Number of `cancel` calls.
    pub fn cancels(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|call| **call == TimerCall::Cancel)
            .count()
    }

    /// Delay of the outstanding request, if the last call scheduled one.
    pub fn outstanding(&self) -> Option<Duration> {
        match self.log.borrow().last() {
            Some(TimerCall::Schedule(delay)) => Some(*delay),
            _ => None,
        }
    }

    /// Mark the outstanding request as fired.
    pub fn fire(&self) -> Option<Duration> {
        let delay = self.outstanding()?;
        self.log.borrow_mut().push(TimerCall::Fired);
        Some(delay)
    }
}

impl RedrawScheduler for RecordingScheduler {
    fn schedule(&mut self, delay: Duration) {
        self.log.borrow_mut().push(TimerCall::Schedule(delay));
    }

    fn cancel(&mut self) {
        self.log.borrow_mut().push(TimerCall::Cancel);
    }
}
