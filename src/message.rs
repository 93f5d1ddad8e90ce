use crate::system::RawWindow;

/// An event forwarded from the ghost thread to the registered listener.
///
/// Notifications are posted fire-and-forget: the ghost thread keeps pumping
/// and never waits for the listener to consume them. Delivery order matches
/// the order the ghost thread observed the underlying events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
  /// The user or the system asked for this window to close. Advisory only:
  /// the window is still alive and stays alive until the listener issues an
  /// explicit [`close`](crate::Ghost::close).
  CloseRequested(RawWindow),
  /// The window was destroyed; the handle is no longer valid.
  Destroyed(RawWindow),
  Resized {
    window: RawWindow,
    width: u32,
    height: u32,
  },
  Character(char),
  /// The ghost thread's event pump has terminated. No further commands will
  /// be accepted.
  Quit,
}
