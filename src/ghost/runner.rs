use std::sync::Arc;

use crossbeam::channel::{Receiver, Sender};
use tracing::*;

use super::{
  command::Command,
  procedure::{classify, Dispatch, GhostProc},
  stage::Stage,
  Shared,
};
use crate::{
  message::Notification,
  system::{RawWindow, WindowSystem},
  window::{CreateContext, DISPLAY_CLASS, GHOST_CLASS},
};

/// The ghost thread's entry point: one-time setup, then the event pump.
///
/// The rendezvous sender is signalled exactly once, success or failure, so
/// the supervisor's blocking wait can never hang on a setup path.
pub(crate) fn run<S: WindowSystem>(
  mut system: S,
  shared: Arc<Shared>,
  commands: Receiver<Command>,
  notifier: Sender<Notification>,
  rendezvous: Sender<Result<RawWindow, String>>,
) {
  trace!("[ghost]: {}", Stage::Initializing);

  if !system.register_class(GHOST_CLASS) {
    trace!("[ghost]: class `{GHOST_CLASS}` was already registered");
  }
  if !system.register_class(DISPLAY_CLASS) {
    trace!("[ghost]: class `{DISPLAY_CLASS}` was already registered");
  }

  let control = match system.create_window(&CreateContext::control()) {
    Some(control) => control,
    None => {
      error!("[ghost]: window system refused the control window");
      let _ = rendezvous.send(Err("window system refused the control window".into()));
      return;
    }
  };

  shared.set_ready(true);
  shared.set_running(true);
  trace!("[ghost]: {}, control window {control}", Stage::Ready);
  let _ = rendezvous.send(Ok(control));
  drop(rendezvous);

  let events = system.events().clone();
  let mut proc = GhostProc::new(system, Arc::clone(&shared));

  trace!("[ghost]: {}", Stage::Running);
  loop {
    crossbeam::select! {
      recv(commands) -> command => match command {
        Ok(command) => proc.handle(command),
        // every supervisor handle is gone; nobody is left to serve
        Err(_) => break,
      },
      recv(events) -> event => match event {
        Ok(event) => match classify(control, &event) {
          Dispatch::Forward(Notification::Destroyed(window)) => {
            // keep the live set in step even when destruction did not come
            // through a destroy command
            proc.forget(window);
            forward(&notifier, Notification::Destroyed(window));
          }
          Dispatch::Forward(notification) => forward(&notifier, notification),
          Dispatch::Default => proc.system.default_handle(&event),
          Dispatch::Quit => {
            trace!("[ghost]: {}", Stage::Terminating);
            forward(&notifier, Notification::Quit);
            break;
          }
        },
        Err(_) => break,
      },
    }
  }

  shared.set_running(false);
  trace!("[ghost]: event pump terminated");
}

fn forward(notifier: &Sender<Notification>, notification: Notification) {
  if notifier.send(notification).is_err() {
    trace!("[ghost]: notification listener is gone");
  }
}
