use crate::system::RawWindow;

/// Class name for the hidden control window owned by the ghost thread.
pub(crate) const GHOST_CLASS: &str = "wisp.ghost";
/// Class name for real, visible windows created on behalf of callers.
pub(crate) const DISPLAY_CLASS: &str = "wisp.display";

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Size {
  pub width: u32,
  pub height: u32,
}

impl Size {
  pub fn new(width: u32, height: u32) -> Self {
    Self { width, height }
  }
}

impl Default for Size {
  fn default() -> Self {
    Self {
      width: 800,
      height: 600,
    }
  }
}

impl From<(u32, u32)> for Size {
  fn from(value: (u32, u32)) -> Self {
    Self {
      width: value.0,
      height: value.1,
    }
  }
}

#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Position {
  pub x: i32,
  pub y: i32,
}

impl Position {
  pub fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }
}

impl From<(i32, i32)> for Position {
  fn from(value: (i32, i32)) -> Self {
    Self {
      x: value.0,
      y: value.1,
    }
  }
}

/// Style flags applied at creation time.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Style {
  pub visible: bool,
  pub resizable: bool,
  pub decorated: bool,
}

impl Style {
  /// The control window carries no styling at all, which is what keeps it off
  /// screen.
  pub(crate) fn hidden() -> Self {
    Self {
      visible: false,
      resizable: false,
      decorated: false,
    }
  }
}

impl Default for Style {
  fn default() -> Self {
    Self {
      visible: true,
      resizable: true,
      decorated: true,
    }
  }
}

/// Caller-facing creation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSettings {
  pub title: String,
  pub size: Size,
  pub position: Position,
  pub style: Style,
  pub parent: Option<RawWindow>,
  /// Opaque word passed through to the window system untouched.
  pub user_data: u64,
}

impl Default for WindowSettings {
  fn default() -> Self {
    Self {
      title: "Window".into(),
      size: Size::default(),
      position: Position::default(),
      style: Style::default(),
      parent: None,
      user_data: 0,
    }
  }
}

impl WindowSettings {
  pub fn with_title(mut self, title: impl Into<String>) -> Self {
    self.title = title.into();
    self
  }

  pub fn with_size(mut self, size: impl Into<Size>) -> Self {
    self.size = size.into();
    self
  }

  pub fn with_position(mut self, position: impl Into<Position>) -> Self {
    self.position = position.into();
    self
  }

  pub fn with_style(mut self, style: Style) -> Self {
    self.style = style;
    self
  }

  pub fn with_parent(mut self, parent: RawWindow) -> Self {
    self.parent = Some(parent);
    self
  }

  pub fn with_user_data(mut self, user_data: u64) -> Self {
    self.user_data = user_data;
    self
  }
}

/// The full creation payload handed to the window system.
///
/// Crosses to the ghost thread by value inside a command, so there is no
/// lifetime to keep alive on the caller's side while the command is in
/// flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateContext {
  pub class: String,
  pub title: String,
  pub style: Style,
  pub position: Position,
  pub size: Size,
  pub parent: Option<RawWindow>,
  pub user_data: u64,
}

impl CreateContext {
  pub(crate) fn control() -> Self {
    Self {
      class: GHOST_CLASS.into(),
      title: "Ghost Window".into(),
      style: Style::hidden(),
      position: Position::default(),
      size: Size::default(),
      parent: None,
      user_data: 0,
    }
  }
}

impl From<WindowSettings> for CreateContext {
  fn from(settings: WindowSettings) -> Self {
    Self {
      class: DISPLAY_CLASS.into(),
      title: settings.title,
      style: settings.style,
      position: settings.position,
      size: settings.size,
      parent: settings.parent,
      user_data: settings.user_data,
    }
  }
}

/// A live window owned by the caller.
///
/// Holds the handle and the dimensions it was created with. Dropping a
/// `Window` does not destroy anything; destruction is always an explicit
/// [`close`](crate::Ghost::close).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
  raw: RawWindow,
  width: u32,
  height: u32,
}

impl Window {
  pub(crate) fn new(raw: RawWindow, size: Size) -> Self {
    Self {
      raw,
      width: size.width,
      height: size.height,
    }
  }

  pub fn raw(&self) -> RawWindow {
    self.raw
  }

  pub fn width(&self) -> u32 {
    self.width
  }

  pub fn height(&self) -> u32 {
    self.height
  }

  pub fn size(&self) -> Size {
    Size::new(self.width, self.height)
  }
}
