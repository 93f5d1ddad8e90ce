use std::{
  sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
  },
  thread::JoinHandle,
};

use crossbeam::channel::{bounded, unbounded, Receiver, Sender};
use tracing::*;

use crate::{
  error::{WindowError, WindowResult},
  message::Notification,
  system::{RawWindow, WindowSystem},
  window::{Window, WindowSettings},
};

pub(crate) mod command;
pub(crate) mod procedure;
pub(crate) mod runner;
pub(crate) mod stage;

use command::Command;

/// State shared between the supervisor and the ghost thread.
///
/// The window count and both flags are written only by the ghost thread;
/// everyone else just reads. No lock guards any window state, because no
/// window state ever leaves the ghost thread.
pub(crate) struct Shared {
  ready: AtomicBool,
  running: AtomicBool,
  windows_active: AtomicUsize,
}

impl Shared {
  pub fn new() -> Self {
    Self {
      ready: AtomicBool::new(false),
      running: AtomicBool::new(false),
      windows_active: AtomicUsize::new(0),
    }
  }

  pub fn ready(&self) -> bool {
    self.ready.load(Ordering::Acquire)
  }

  pub fn set_ready(&self, ready: bool) {
    self.ready.store(ready, Ordering::Release);
  }

  pub fn running(&self) -> bool {
    self.running.load(Ordering::Acquire)
  }

  pub fn set_running(&self, running: bool) {
    self.running.store(running, Ordering::Release);
  }

  pub fn window_count(&self) -> usize {
    self.windows_active.load(Ordering::Acquire)
  }

  pub fn add_window(&self) {
    self.windows_active.fetch_add(1, Ordering::AcqRel);
  }

  pub fn remove_window(&self) {
    self.windows_active.fetch_sub(1, Ordering::AcqRel);
  }
}

/// Supervisor for one ghost thread.
///
/// Construct it once per window system and pass it by reference to anything
/// that needs to drive windows; there is no hidden global behind it, so tests
/// can run as many independent instances as they like. The process-wide
/// convenience surface in the crate root is a thin layer over one of these.
pub struct Ghost {
  shared: Arc<Shared>,
  commands: Option<Sender<Command>>,
  notifications: Receiver<Notification>,
  thread: Option<JoinHandle<()>>,
}

impl Ghost {
  /// Spawn the ghost thread over `system` and block until it has registered
  /// its window classes and created the hidden control window.
  ///
  /// The wait has no timeout: a window system that wedges during setup wedges
  /// this call with it. Startup failure comes back as
  /// [`WindowError::Startup`] instead of taking the process down.
  pub fn initialize<S: WindowSystem>(system: S) -> WindowResult<Self> {
    let shared = Arc::new(Shared::new());
    let (command_sender, command_receiver) = unbounded();
    let (notify_sender, notify_receiver) = unbounded();
    let (rendezvous_sender, rendezvous_receiver) = bounded(1);

    let thread = std::thread::Builder::new()
      .name("ghost".to_owned())
      .spawn({
        let shared = Arc::clone(&shared);
        move || runner::run(system, shared, command_receiver, notify_sender, rendezvous_sender)
      })
      .map_err(|error| WindowError::Startup(error.to_string()))?;

    // one-shot rendezvous; the sender signals exactly once and is dropped
    match rendezvous_receiver.recv() {
      Ok(Ok(control)) => {
        trace!("[ghost]: supervisor rendezvous complete, control window {control}");
        Ok(Self {
          shared,
          commands: Some(command_sender),
          notifications: notify_receiver,
          thread: Some(thread),
        })
      }
      Ok(Err(reason)) => {
        let _ = thread.join();
        Err(WindowError::Startup(reason))
      }
      Err(_) => {
        let _ = thread.join();
        Err(WindowError::Startup(
          "ghost thread exited before signalling readiness".into(),
        ))
      }
    }
  }

  /// Whether one-time setup completed. Always true for a constructed `Ghost`;
  /// present for callers holding the supervisor behind the crate-root
  /// surface.
  pub fn ready(&self) -> bool {
    self.shared.ready()
  }

  /// Whether the event pump is still accepting commands.
  pub fn running(&self) -> bool {
    self.shared.running()
  }

  /// Number of live display windows. Never counts the control window.
  pub fn window_count(&self) -> usize {
    self.shared.window_count()
  }

  /// The registered notification stream. Receivers are cheap to clone, so
  /// more than one listener is fine.
  pub fn notifications(&self) -> Receiver<Notification> {
    self.notifications.clone()
  }

  /// Marshal a create command to the ghost thread and block for the handle.
  pub fn create(&self, settings: WindowSettings) -> WindowResult<Window> {
    if !self.running() {
      return Err(WindowError::NotRunning);
    }

    let size = settings.size;
    let (result_sender, result_slot) = bounded(1);
    self
      .sender()?
      .send(Command::Create {
        context: settings.into(),
        result: result_sender,
      })
      .map_err(|_| WindowError::NotRunning)?;

    let raw = result_slot.recv().map_err(|_| WindowError::NotRunning)??;
    Ok(Window::new(raw, size))
  }

  /// Marshal a destroy command for `window` and block for the outcome.
  ///
  /// This is the imperative path; a [`Notification::CloseRequested`] is only
  /// ever advisory, and nothing is destroyed until someone calls this.
  pub fn close(&self, window: &Window) -> WindowResult<()> {
    self.close_raw(window.raw())
  }

  /// [`close`](Self::close) by bare handle, for callers answering a
  /// [`Notification::CloseRequested`] that carries one.
  pub fn close_raw(&self, window: RawWindow) -> WindowResult<()> {
    if !self.running() {
      return Err(WindowError::NotRunning);
    }

    let (result_sender, result_slot) = bounded(1);
    self
      .sender()?
      .send(Command::Destroy {
        window,
        result: result_sender,
      })
      .map_err(|_| WindowError::NotRunning)?;

    result_slot.recv().map_err(|_| WindowError::NotRunning)?
  }

  fn sender(&self) -> WindowResult<&Sender<Command>> {
    // only ever None mid-drop
    self.commands.as_ref().ok_or(WindowError::NotRunning)
  }
}

impl Drop for Ghost {
  fn drop(&mut self) {
    // disconnect the command channel first or the pump never winds down
    self.commands.take();
    if let Some(thread) = self.thread.take() {
      trace!("[ghost]: joining ghost thread");
      let _ = thread.join();
      trace!("[ghost]: joined ghost thread");
    }
  }
}
