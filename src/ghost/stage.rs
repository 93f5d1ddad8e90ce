use strum::Display;

/// Lifecycle of the ghost thread's event pump.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
  /// Registering window classes and creating the control window.
  Initializing,
  /// One-time setup finished; the rendezvous is about to be signalled.
  Ready,
  /// Pumping commands and events.
  Running,
  /// A quit event arrived; the pump is winding down.
  Terminating,
}
