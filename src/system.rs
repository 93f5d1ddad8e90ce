use std::{fmt, num::NonZeroU64};

use crossbeam::channel::Receiver;

use crate::window::CreateContext;

pub mod headless;

/// An opaque window id handed out by a [`WindowSystem`].
///
/// Zero is never a valid id, so an absent window is `Option<RawWindow>` rather
/// than a null sentinel.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RawWindow(NonZeroU64);

impl RawWindow {
  pub fn from_id(id: u64) -> Option<Self> {
    NonZeroU64::new(id).map(Self)
  }

  pub fn id(&self) -> u64 {
    self.0.get()
  }
}

impl fmt::Display for RawWindow {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "0x{:x}", self.0.get())
  }
}

/// An event observed by the window system's queue, before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemEvent {
  /// The user or the system asked for the window to close. Nothing has been
  /// destroyed yet.
  CloseRequested(RawWindow),
  /// The window no longer exists.
  Destroyed(RawWindow),
  Resized {
    window: RawWindow,
    width: u32,
    height: u32,
  },
  Moved {
    window: RawWindow,
    x: i32,
    y: i32,
  },
  Paint(RawWindow),
  /// Raw character input, delivered per thread rather than per window.
  Character(char),
  /// The event queue is shutting down.
  Quit,
}

impl SystemEvent {
  /// The window this event is addressed to, if it is addressed at all.
  pub fn window(&self) -> Option<RawWindow> {
    match *self {
      SystemEvent::CloseRequested(window)
      | SystemEvent::Destroyed(window)
      | SystemEvent::Resized { window, .. }
      | SystemEvent::Moved { window, .. }
      | SystemEvent::Paint(window) => Some(window),
      SystemEvent::Character(_) | SystemEvent::Quit => None,
    }
  }
}

/// The host windowing subsystem.
///
/// An implementation is handed to [`Ghost::initialize`](crate::Ghost) and from
/// then on is touched exclusively by the ghost thread; that single-ownership
/// rule is what lets implementations skip interior locking entirely.
pub trait WindowSystem: Send + 'static {
  /// Register a window class. Returns `false` if the class already existed.
  fn register_class(&mut self, name: &str) -> bool;

  /// Create a window from the given parameters, or `None` if the system
  /// refuses.
  fn create_window(&mut self, context: &CreateContext) -> Option<RawWindow>;

  /// Destroy a window. Returns whether anything was actually destroyed.
  fn destroy_window(&mut self, window: RawWindow) -> bool;

  /// The queue of incoming events. The receiver is cloneable so the ghost
  /// loop can select over it while the system retains its own end.
  fn events(&self) -> &Receiver<SystemEvent>;

  /// The default procedure: consume an event the ghost thread has no interest
  /// in.
  fn default_handle(&mut self, event: &SystemEvent);
}
