//! One thread owns the windows; any thread drives them.
//!
//! Window systems demand that a single thread create, destroy, and pump
//! events for every native window. `wisp` hides that thread — the *ghost
//! thread* — behind a small marshalling protocol: caller threads issue
//! synchronous commands (create, destroy) and receive asynchronous
//! [`Notification`]s (close requests, input, resizes) on a channel of their
//! own, while the ghost thread alone touches window state and keeps the pump
//! spinning.
//!
//! The primary surface is [`Ghost`], an explicit supervisor constructed over
//! any [`WindowSystem`]. The free functions in this module wrap one
//! process-wide supervisor over the built-in [`HeadlessSystem`] for programs
//! that want the classic `initialize`/`create`/`close` shape.
//!
//! ```
//! let ready = wisp::initialize();
//! assert_eq!(ready, wisp::initialize()); // idempotent
//!
//! if ready {
//!   let window = wisp::create("main", 800, 600).unwrap();
//!   wisp::close(&window).unwrap();
//! }
//! ```

#![forbid(unsafe_code)]

use std::sync::OnceLock;

use crossbeam::channel::Receiver;
use tracing::*;

pub mod error;
pub mod ghost;
pub mod message;
pub mod prelude;
pub mod system;
pub mod window;

pub use error::{WindowError, WindowResult};
pub use ghost::Ghost;
pub use message::Notification;
pub use system::{
  headless::{Driver, HeadlessSystem},
  RawWindow, SystemEvent, WindowSystem,
};
pub use window::{Position, Size, Style, Window, WindowSettings};

static GHOST: OnceLock<Option<(Ghost, Driver)>> = OnceLock::new();

/// Spawn the process-wide ghost thread over a [`HeadlessSystem`] and block
/// until it is ready, or report the readiness decided by an earlier call.
///
/// Safe to call from any number of threads; the first caller does the work
/// and everyone observes the same answer.
pub fn initialize() -> bool {
  GHOST
    .get_or_init(|| {
      let system = HeadlessSystem::new();
      let driver = system.driver();
      match Ghost::initialize(system) {
        Ok(ghost) => Some((ghost, driver)),
        Err(error) => {
          error!("{error}");
          None
        }
      }
    })
    .is_some()
}

/// Create a window through the process-wide ghost thread.
pub fn create(title: &str, width: u32, height: u32) -> WindowResult<Window> {
  ghost()?.create(
    WindowSettings::default()
      .with_title(title)
      .with_size((width, height)),
  )
}

/// Destroy a window created through the process-wide ghost thread.
pub fn close(window: &Window) -> WindowResult<()> {
  ghost()?.close(window)
}

/// Number of live windows owned by the process-wide ghost thread.
pub fn window_count() -> WindowResult<usize> {
  Ok(ghost()?.window_count())
}

/// The process-wide notification stream, if `initialize` has succeeded.
pub fn notifications() -> Option<Receiver<Notification>> {
  match GHOST.get() {
    Some(Some((ghost, _))) => Some(ghost.notifications()),
    _ => None,
  }
}

/// The injection handle for the process-wide headless system, if
/// `initialize` has succeeded. Mostly useful in tests and demos.
pub fn driver() -> Option<Driver> {
  match GHOST.get() {
    Some(Some((_, driver))) => Some(driver.clone()),
    _ => None,
  }
}

fn ghost() -> WindowResult<&'static Ghost> {
  match GHOST.get() {
    Some(Some((ghost, _))) => Ok(ghost),
    _ => Err(WindowError::NotReady),
  }
}
