use thiserror::Error;

use crate::system::RawWindow;

pub type WindowResult<T> = Result<T, WindowError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
  /// The ghost thread failed its one-time setup; no commands were ever
  /// accepted.
  #[error("ghost thread failed to start: {0}")]
  Startup(String),
  /// A window operation was attempted before `initialize` succeeded.
  #[error("windowing has not been initialized")]
  NotReady,
  /// The ghost thread's event pump has terminated; commands can no longer be
  /// delivered.
  #[error("ghost thread is no longer running")]
  NotRunning,
  /// The window system refused to create the requested window.
  #[error("window system refused to create the window")]
  CreationFailed,
  /// The handle does not refer to a live window owned by the ghost thread.
  #[error("unknown window handle {0}")]
  UnknownHandle(RawWindow),
}
