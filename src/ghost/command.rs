use crossbeam::channel::Sender;

use crate::{
  error::WindowResult,
  system::RawWindow,
  window::CreateContext,
};

/// A synchronous cross-thread request to the ghost thread.
///
/// Each command carries its own bounded(1) result slot; the issuing call
/// blocks on that slot until the ghost thread's procedure has executed the
/// request. Notifications take the opposite shape: posted, never awaited.
#[derive(Debug)]
pub(crate) enum Command {
  Create {
    context: CreateContext,
    result: Sender<WindowResult<RawWindow>>,
  },
  Destroy {
    window: RawWindow,
    result: Sender<WindowResult<()>>,
  },
}
