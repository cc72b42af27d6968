#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::new_without_default)]
#![allow(clippy::float_cmp)]
//! Testing harness for slidekit sliders.
//!
//! - [`LinearHost`]: fixed-width panels on a strip, records every host call
//! - [`RecordingScheduler`]: records deferred redraw requests
//! - [`Harness`]: drives press/move/release sequences on a manual clock
//!
//! ```
//! use slidekit_core::Point;
//! use slidekit_test::Harness;
//!
//! let mut harness = Harness::new(5, 300.0);
//! harness
//!     .swipe(Point::new(200.0, 100.0), Point::new(110.0, 100.0), 3)
//!     .settle();
//! harness.assert_current_slide(1);
//! ```

mod harness;
mod host;
mod scheduler;

pub use harness::{Harness, DEFAULT_FRAME_MS};
pub use host::{HostCall, LinearHost};
pub use scheduler::{RecordingScheduler, TimerCall};
