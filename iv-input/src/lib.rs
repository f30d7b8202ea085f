//! iv-input: map winit window events to viewer commands
//!
//! This crate provides [`InputDispatcher`], which tracks the cursor and keyboard
//! modifiers and translates each relevant window event into exactly one
//! [`ViewerCommand`] for the event loop to apply to the viewport engine.

mod keyboard;
mod mouse;
mod shortcuts;

use std::fmt;
use tracing::trace;
use winit::event::WindowEvent;

pub use keyboard::{active_modifiers, format_key_name, parse_key_name, Modifier};
pub use mouse::{MouseState, WheelDirection};
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutError, ShortcutsConfig};

/// A typed request for the viewport engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    /// Close the viewer
    Quit,
    /// The window's inner size changed
    Resize { width: u32, height: u32 },
    /// One wheel notch in, at the cursor
    ZoomIn { x: i32, y: i32 },
    /// One wheel notch out, at the cursor
    ZoomOut { x: i32, y: i32 },
    /// The cursor moved; pans when the image is zoomed
    Pan { x: i32, y: i32 },
    /// Advance to the next flip mode
    ToggleFlip,
    /// Stretch the whole image over the window
    ScaleToFit,
}

impl fmt::Display for ViewerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quit => write!(f, "Quit"),
            Self::Resize { width, height } => write!(f, "Resize({}x{})", width, height),
            Self::ZoomIn { x, y } => write!(f, "ZoomIn({}, {})", x, y),
            Self::ZoomOut { x, y } => write!(f, "ZoomOut({}, {})", x, y),
            Self::Pan { x, y } => write!(f, "Pan({}, {})", x, y),
            Self::ToggleFlip => write!(f, "ToggleFlip"),
            Self::ScaleToFit => write!(f, "ScaleToFit"),
        }
    }
}

impl From<ShortcutAction> for ViewerCommand {
    fn from(action: ShortcutAction) -> Self {
        match action {
            ShortcutAction::ToggleFlip => Self::ToggleFlip,
            ShortcutAction::ScaleToFit => Self::ScaleToFit,
            ShortcutAction::Quit => Self::Quit,
        }
    }
}

/// Input dispatcher state and helpers.
#[derive(Debug, Clone, Default)]
pub struct InputDispatcher {
    mouse: MouseState,
    shortcuts: ShortcutsConfig,
}

impl InputDispatcher {
    /// Create a new dispatcher with the default key bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with custom key bindings.
    pub fn with_shortcuts(shortcuts: ShortcutsConfig) -> Self {
        Self {
            mouse: MouseState::default(),
            shortcuts,
        }
    }

    /// Last known cursor position in window coordinates.
    pub fn cursor_position(&self) -> (i32, i32) {
        self.mouse.pos()
    }

    /// Handle a winit WindowEvent and return the command it maps to, if any.
    pub fn handle_window_event(&mut self, event: &WindowEvent<'_>) -> Option<ViewerCommand> {
        use WindowEvent::*;

        let command = match event {
            CloseRequested => Some(ViewerCommand::Quit),
            Resized(size) => Some(ViewerCommand::Resize {
                width: size.width,
                height: size.height,
            }),
            ScaleFactorChanged { new_inner_size, .. } => Some(ViewerCommand::Resize {
                width: new_inner_size.width,
                height: new_inner_size.height,
            }),
            CursorMoved { position, .. } => {
                let (x, y) = (position.x as i32, position.y as i32);
                self.mouse.set_pos(x, y);
                Some(ViewerCommand::Pan { x, y })
            }
            MouseWheel { delta, .. } => {
                let (x, y) = self.mouse.pos();
                WheelDirection::from_delta(delta).map(|direction| match direction {
                    WheelDirection::Up => ViewerCommand::ZoomIn { x, y },
                    WheelDirection::Down => ViewerCommand::ZoomOut { x, y },
                })
            }
            ModifiersChanged(modifiers) => {
                self.mouse.set_modifiers(*modifiers);
                None
            }
            KeyboardInput { input, .. } => {
                let modifiers = active_modifiers(self.mouse.modifiers);
                self.shortcuts
                    .process_key_input(input, &modifiers)
                    .map(ViewerCommand::from)
            }
            _ => None,
        };

        if let Some(command) = &command {
            trace!("Window event mapped to {}", command);
        }
        command
    }
}
