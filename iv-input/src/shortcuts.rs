//! Keyboard shortcuts for viewer actions.
//!
//! Each action is bound to a single key pressed without modifiers, so `Ctrl+Q` and
//! friends stay free for the window system.

use crate::keyboard::{format_key_name, parse_key_name, Modifier};
use std::collections::HashMap;
use thiserror::Error;
use tracing::trace;
use winit::event::{ElementState, KeyboardInput, VirtualKeyCode};

/// Errors raised while building a shortcut table.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShortcutError {
    #[error("unknown key name '{0}'")]
    UnknownKey(String),

    #[error("key {key} is bound to both {first} and {second}")]
    Conflict {
        key: String,
        first: ShortcutAction,
        second: ShortcutAction,
    },
}

/// Actions that can be triggered by keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutAction {
    /// Advance to the next flip mode
    ToggleFlip,
    /// Stretch the whole image over the window
    ScaleToFit,
    /// Exit the viewer
    Quit,
}

impl std::fmt::Display for ShortcutAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ToggleFlip => write!(f, "flip"),
            Self::ScaleToFit => write!(f, "scale to fit"),
            Self::Quit => write!(f, "quit"),
        }
    }
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcut {
    /// Required modifiers
    pub modifiers: Vec<Modifier>,
    /// The key that must be pressed
    pub key: VirtualKeyCode,
}

impl Shortcut {
    /// Create shortcut with no modifiers.
    pub fn key_only(key: VirtualKeyCode) -> Self {
        Self {
            modifiers: Vec::new(),
            key,
        }
    }

    /// Check if this shortcut matches the current key combination.
    pub fn matches(&self, key: VirtualKeyCode, active_modifiers: &[Modifier]) -> bool {
        if self.key != key {
            return false;
        }

        // Strict matching: exactly the required modifiers
        self.modifiers.iter().all(|m| active_modifiers.contains(m))
            && active_modifiers.len() == self.modifiers.len()
    }
}

/// Configuration and management of keyboard shortcuts.
#[derive(Debug, Clone)]
pub struct ShortcutsConfig {
    shortcuts: HashMap<Shortcut, ShortcutAction>,
}

impl Default for ShortcutsConfig {
    /// `f` flips, `s` scales to fit, `q` quits.
    fn default() -> Self {
        let mut config = Self {
            shortcuts: HashMap::new(),
        };
        config.add_shortcut(Shortcut::key_only(VirtualKeyCode::F), ShortcutAction::ToggleFlip);
        config.add_shortcut(Shortcut::key_only(VirtualKeyCode::S), ShortcutAction::ScaleToFit);
        config.add_shortcut(Shortcut::key_only(VirtualKeyCode::Q), ShortcutAction::Quit);
        config
    }
}

impl ShortcutsConfig {
    /// Build a table from configured key names.
    pub fn from_key_names(flip: &str, fit: &str, quit: &str) -> Result<Self, ShortcutError> {
        let mut config = Self {
            shortcuts: HashMap::new(),
        };

        for (name, action) in [
            (flip, ShortcutAction::ToggleFlip),
            (fit, ShortcutAction::ScaleToFit),
            (quit, ShortcutAction::Quit),
        ] {
            let key = parse_key_name(name).ok_or_else(|| ShortcutError::UnknownKey(name.to_string()))?;
            let shortcut = Shortcut::key_only(key);
            if let Some(&existing) = config.shortcuts.get(&shortcut) {
                return Err(ShortcutError::Conflict {
                    key: format_key_name(key),
                    first: existing,
                    second: action,
                });
            }
            config.add_shortcut(shortcut, action);
        }

        Ok(config)
    }

    /// Add or update a shortcut.
    pub fn add_shortcut(&mut self, shortcut: Shortcut, action: ShortcutAction) {
        self.shortcuts.insert(shortcut, action);
    }

    /// Get all shortcuts for a specific action.
    pub fn shortcuts_for_action(&self, action: ShortcutAction) -> Vec<&Shortcut> {
        self.shortcuts
            .iter()
            .filter(|(_, &a)| a == action)
            .map(|(s, _)| s)
            .collect()
    }

    /// Action bound to `key` with exactly `active_modifiers` held.
    pub fn action_for_key(
        &self,
        key: VirtualKeyCode,
        active_modifiers: &[Modifier],
    ) -> Option<ShortcutAction> {
        self.shortcuts
            .iter()
            .find(|(shortcut, _)| shortcut.matches(key, active_modifiers))
            .map(|(shortcut, &action)| {
                trace!("Shortcut triggered: {:?} -> {:?}", shortcut, action);
                action
            })
    }

    /// Process a keyboard input and return the triggered action, if any.
    ///
    /// Only key presses trigger actions; releases are ignored.
    pub fn process_key_input(
        &self,
        input: &KeyboardInput,
        active_modifiers: &[Modifier],
    ) -> Option<ShortcutAction> {
        if !matches!(input.state, ElementState::Pressed) {
            return None;
        }
        self.action_for_key(input.virtual_keycode?, active_modifiers)
    }
}
