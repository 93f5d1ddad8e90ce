use std::{
  collections::{HashMap, HashSet},
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
};

use crossbeam::channel::{unbounded, Receiver, Sender};

use super::{RawWindow, SystemEvent, WindowSystem};
use crate::window::{CreateContext, Position, Size, Style};

/// An in-process window system with no display attached.
///
/// Windows are rows in a table and events are whatever a [`Driver`] injects,
/// which makes the whole marshalling path runnable and observable on a
/// machine with no windowing environment at all.
pub struct HeadlessSystem {
  classes: HashSet<String>,
  windows: HashMap<RawWindow, WindowRecord>,
  next_id: u64,
  event_sender: Sender<SystemEvent>,
  event_receiver: Receiver<SystemEvent>,
  refuse_creates: Arc<AtomicBool>,
}

/// Creation parameters recorded for a live headless window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
  pub class: String,
  pub title: String,
  pub style: Style,
  pub position: Position,
  pub size: Size,
  pub parent: Option<RawWindow>,
}

impl HeadlessSystem {
  pub fn new() -> Self {
    let (event_sender, event_receiver) = unbounded();
    Self {
      classes: HashSet::new(),
      windows: HashMap::new(),
      next_id: 1,
      event_sender,
      event_receiver,
      refuse_creates: Arc::new(AtomicBool::new(false)),
    }
  }

  /// Refuse every window creation until toggled back. Applies to the control
  /// window too, so this is also how startup failure is exercised.
  pub fn refuse_window_creation(self, refuse: bool) -> Self {
    self.refuse_creates.store(refuse, Ordering::Release);
    self
  }

  /// Look up the recorded creation parameters of a live window.
  pub fn record(&self, window: RawWindow) -> Option<&WindowRecord> {
    self.windows.get(&window)
  }

  /// An injection handle for this system. Grab it before the system is handed
  /// to the ghost thread; the system itself becomes unreachable after that.
  pub fn driver(&self) -> Driver {
    Driver {
      events: self.event_sender.clone(),
      refuse_creates: Arc::clone(&self.refuse_creates),
    }
  }
}

impl Default for HeadlessSystem {
  fn default() -> Self {
    Self::new()
  }
}

impl WindowSystem for HeadlessSystem {
  fn register_class(&mut self, name: &str) -> bool {
    self.classes.insert(name.to_owned())
  }

  fn create_window(&mut self, context: &CreateContext) -> Option<RawWindow> {
    if self.refuse_creates.load(Ordering::Acquire) {
      tracing::trace!("[headless]: refusing to create `{}`", context.title);
      return None;
    }
    if !self.classes.contains(&context.class) {
      tracing::trace!("[headless]: unregistered class `{}`", context.class);
      return None;
    }

    let id = self.next_id;
    self.next_id += 1;
    // ids start at 1, so the constructor cannot fail here
    let window = RawWindow::from_id(id)?;
    self.windows.insert(window, WindowRecord {
      class: context.class.clone(),
      title: context.title.clone(),
      style: context.style,
      position: context.position,
      size: context.size,
      parent: context.parent,
    });
    tracing::trace!("[headless]: created window {window} (`{}`)", context.title);
    Some(window)
  }

  fn destroy_window(&mut self, window: RawWindow) -> bool {
    match self.windows.remove(&window) {
      Some(record) => {
        tracing::trace!("[headless]: destroyed window {window} (`{}`)", record.title);
        // a real system reports destruction back through its event queue
        let _ = self.event_sender.send(SystemEvent::Destroyed(window));
        true
      }
      None => false,
    }
  }

  fn events(&self) -> &Receiver<SystemEvent> {
    &self.event_receiver
  }

  fn default_handle(&mut self, event: &SystemEvent) {
    tracing::trace!("[headless]: default handling {event:?}");
  }
}

/// Injects events into a [`HeadlessSystem`] from outside the ghost thread,
/// standing in for the user and the display server.
#[derive(Clone)]
pub struct Driver {
  events: Sender<SystemEvent>,
  refuse_creates: Arc<AtomicBool>,
}

impl Driver {
  pub fn request_close(&self, window: RawWindow) {
    self.inject(SystemEvent::CloseRequested(window));
  }

  pub fn resize(&self, window: RawWindow, width: u32, height: u32) {
    self.inject(SystemEvent::Resized {
      window,
      width,
      height,
    });
  }

  pub fn send_character(&self, character: char) {
    self.inject(SystemEvent::Character(character));
  }

  pub fn post_quit(&self) {
    self.inject(SystemEvent::Quit);
  }

  pub fn paint(&self, window: RawWindow) {
    self.inject(SystemEvent::Paint(window));
  }

  /// Toggle creation refusal while the system is already running.
  pub fn refuse_window_creation(&self, refuse: bool) {
    self.refuse_creates.store(refuse, Ordering::Release);
  }

  fn inject(&self, event: SystemEvent) {
    if self.events.send(event).is_err() {
      tracing::trace!("[headless]: event dropped, system is gone");
    }
  }
}
