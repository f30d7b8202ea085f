use winit::event::{ModifiersState, MouseScrollDelta};

/// Direction of one wheel notch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    /// Rotated away from the user
    Up,
    /// Rotated toward the user
    Down,
}

impl WheelDirection {
    /// Vertical direction of a scroll delta; `None` for purely horizontal scrolling.
    pub fn from_delta(delta: &MouseScrollDelta) -> Option<Self> {
        let y = match delta {
            MouseScrollDelta::LineDelta(_, y) => *y as f64,
            MouseScrollDelta::PixelDelta(pos) => pos.y,
        };
        if y > 0.0 {
            Some(Self::Up)
        } else if y < 0.0 {
            Some(Self::Down)
        } else {
            None
        }
    }
}

/// Tracks the last known cursor position and keyboard modifiers.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    x: i32,
    y: i32,
    pub modifiers: ModifiersState,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update position.
    pub fn set_pos(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Get current position.
    pub fn pos(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Set keyboard modifiers.
    pub fn set_modifiers(&mut self, m: ModifiersState) {
        self.modifiers = m;
    }
}
