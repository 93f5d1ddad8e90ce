pub use crate::{
  error::{WindowError, WindowResult},
  ghost::Ghost,
  message::Notification,
  system::{
    headless::{Driver, HeadlessSystem},
    RawWindow, SystemEvent, WindowSystem,
  },
  window::{Position, Size, Style, Window, WindowSettings},
};
