use std::{collections::HashSet, sync::Arc};

use tracing::*;

use super::{command::Command, Shared};
use crate::{
  error::WindowError,
  message::Notification,
  system::{RawWindow, SystemEvent, WindowSystem},
};

/// Where an incoming event goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dispatch {
  /// Post to the registered listener and keep pumping.
  Forward(Notification),
  /// Hand to the window system's default procedure.
  Default,
  /// Terminate the pump loop.
  Quit,
}

/// The display/thread procedure, reduced to a pure classification.
///
/// Close requests and destroy reports are forwarded rather than acted on:
/// a close request is advisory, and only an explicit destroy command actually
/// takes a window down. Events addressed to the control window and anything
/// not on the forwarding list fall through to the default procedure.
pub(crate) fn classify(control: RawWindow, event: &SystemEvent) -> Dispatch {
  if event.window() == Some(control) {
    return Dispatch::Default;
  }

  match *event {
    SystemEvent::CloseRequested(window) => {
      Dispatch::Forward(Notification::CloseRequested(window))
    }
    SystemEvent::Destroyed(window) => Dispatch::Forward(Notification::Destroyed(window)),
    SystemEvent::Resized {
      window,
      width,
      height,
    } => Dispatch::Forward(Notification::Resized {
      window,
      width,
      height,
    }),
    SystemEvent::Character(character) => {
      Dispatch::Forward(Notification::Character(character))
    }
    SystemEvent::Quit => Dispatch::Quit,
    SystemEvent::Moved { .. } | SystemEvent::Paint(_) => Dispatch::Default,
  }
}

/// The control window's procedure: executes create/destroy commands against
/// the window system, synchronously, one at a time.
///
/// Owns the live handle set; the shared window count is only ever written
/// from here, on the ghost thread.
pub(crate) struct GhostProc<S: WindowSystem> {
  pub system: S,
  pub live: HashSet<RawWindow>,
  pub shared: Arc<Shared>,
}

impl<S: WindowSystem> GhostProc<S> {
  pub fn new(system: S, shared: Arc<Shared>) -> Self {
    Self {
      system,
      live: HashSet::new(),
      shared,
    }
  }

  pub fn handle(&mut self, command: Command) {
    match command {
      Command::Create { context, result } => {
        let reply = match self.system.create_window(&context) {
          Some(window) => {
            self.live.insert(window);
            self.shared.add_window();
            trace!("[ghost]: created window {window} (`{}`)", context.title);
            Ok(window)
          }
          None => {
            trace!("[ghost]: window system refused `{}`", context.title);
            Err(WindowError::CreationFailed)
          }
        };
        // a disconnected result slot means the caller gave up; nothing to do
        let _ = result.send(reply);
      }
      Command::Destroy { window, result } => {
        let reply = if !self.live.contains(&window) {
          Err(WindowError::UnknownHandle(window))
        } else if self.system.destroy_window(window) {
          self.forget(window);
          trace!("[ghost]: destroyed window {window}");
          Ok(())
        } else {
          // the system lost track of it before we did
          self.forget(window);
          Err(WindowError::UnknownHandle(window))
        };
        let _ = result.send(reply);
      }
    }
  }

  /// Drop a window from the live set, if present, and keep the count in step.
  /// Safe to call twice for the same handle.
  pub fn forget(&mut self, window: RawWindow) {
    if self.live.remove(&window) {
      self.shared.remove_window();
    }
  }
}

#[cfg(test)]
mod tests {
  use crossbeam::channel::{bounded, Receiver};

  use super::*;
  use crate::{
    error::WindowResult,
    system::headless::HeadlessSystem,
    window::{CreateContext, WindowSettings, DISPLAY_CLASS},
  };

  fn proc_under_test() -> GhostProc<HeadlessSystem> {
    let mut system = HeadlessSystem::new();
    system.register_class(DISPLAY_CLASS);
    GhostProc::new(system, Arc::new(Shared::new()))
  }

  fn create_command() -> (Command, Receiver<WindowResult<RawWindow>>) {
    let (result, slot) = bounded(1);
    let command = Command::Create {
      context: CreateContext::from(WindowSettings::default()),
      result,
    };
    (command, slot)
  }

  #[test]
  fn create_increments_the_live_count() {
    let mut proc = proc_under_test();
    let (command, slot) = create_command();
    proc.handle(command);

    let window = slot.recv().unwrap().unwrap();
    assert!(proc.live.contains(&window));
    assert_eq!(proc.shared.window_count(), 1);
  }

  #[test]
  fn refused_create_leaves_the_count_alone() {
    let mut proc = proc_under_test();
    proc.system.driver().refuse_window_creation(true);

    let (command, slot) = create_command();
    proc.handle(command);

    assert_eq!(slot.recv().unwrap(), Err(WindowError::CreationFailed));
    assert_eq!(proc.shared.window_count(), 0);
  }

  #[test]
  fn destroying_an_unknown_handle_is_an_error_and_never_goes_negative() {
    let mut proc = proc_under_test();
    let stranger = RawWindow::from_id(999).unwrap();

    let (result, slot) = bounded(1);
    proc.handle(Command::Destroy {
      window: stranger,
      result,
    });

    assert_eq!(slot.recv().unwrap(), Err(WindowError::UnknownHandle(stranger)));
    assert_eq!(proc.shared.window_count(), 0);
  }

  #[test]
  fn destroy_after_create_returns_the_count_to_zero() {
    let mut proc = proc_under_test();
    let (command, slot) = create_command();
    proc.handle(command);
    let window = slot.recv().unwrap().unwrap();

    let (result, slot) = bounded(1);
    proc.handle(Command::Destroy { window, result });
    assert_eq!(slot.recv().unwrap(), Ok(()));
    assert_eq!(proc.shared.window_count(), 0);

    // the handle is stale now
    let (result, slot) = bounded(1);
    proc.handle(Command::Destroy { window, result });
    assert_eq!(slot.recv().unwrap(), Err(WindowError::UnknownHandle(window)));
  }

  #[test]
  fn classification_forwards_the_lifecycle_and_input_events() {
    let control = RawWindow::from_id(1).unwrap();
    let display = RawWindow::from_id(2).unwrap();

    assert_eq!(
      classify(control, &SystemEvent::CloseRequested(display)),
      Dispatch::Forward(Notification::CloseRequested(display)),
    );
    assert_eq!(
      classify(control, &SystemEvent::Destroyed(display)),
      Dispatch::Forward(Notification::Destroyed(display)),
    );
    assert_eq!(
      classify(control, &SystemEvent::Resized {
        window: display,
        width: 640,
        height: 480,
      }),
      Dispatch::Forward(Notification::Resized {
        window: display,
        width: 640,
        height: 480,
      }),
    );
    assert_eq!(
      classify(control, &SystemEvent::Character('w')),
      Dispatch::Forward(Notification::Character('w')),
    );
    assert_eq!(classify(control, &SystemEvent::Quit), Dispatch::Quit);
  }

  #[test]
  fn classification_defaults_everything_else() {
    let control = RawWindow::from_id(1).unwrap();
    let display = RawWindow::from_id(2).unwrap();

    assert_eq!(classify(control, &SystemEvent::Paint(display)), Dispatch::Default);
    assert_eq!(
      classify(control, &SystemEvent::Moved {
        window: display,
        x: 10,
        y: 20,
      }),
      Dispatch::Default,
    );
    // the control window handles its own mail
    assert_eq!(
      classify(control, &SystemEvent::CloseRequested(control)),
      Dispatch::Default,
    );
  }
}
