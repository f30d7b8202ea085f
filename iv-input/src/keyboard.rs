//! Key names and modifier tracking.

use winit::event::{ModifiersState, VirtualKeyCode};

/// Keyboard modifiers that take part in shortcut matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Shift,
    Control,
    Alt,
    Super, // Windows/Command key
}

/// Modifiers held according to a winit modifier state, in a fixed order.
pub fn active_modifiers(state: ModifiersState) -> Vec<Modifier> {
    let mut active = Vec::new();
    if state.shift() {
        active.push(Modifier::Shift);
    }
    if state.ctrl() {
        active.push(Modifier::Control);
    }
    if state.alt() {
        active.push(Modifier::Alt);
    }
    if state.logo() {
        active.push(Modifier::Super);
    }
    active
}

/// Parse a configuration key name such as `"F"`, `"q"`, `"7"`, `"Escape"` or `"F11"`.
///
/// Letters and digits are case-insensitive.
pub fn parse_key_name(name: &str) -> Option<VirtualKeyCode> {
    use VirtualKeyCode as VK;

    let name = name.trim();
    let mut chars = name.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return match ch.to_ascii_uppercase() {
            'A' => Some(VK::A),
            'B' => Some(VK::B),
            'C' => Some(VK::C),
            'D' => Some(VK::D),
            'E' => Some(VK::E),
            'F' => Some(VK::F),
            'G' => Some(VK::G),
            'H' => Some(VK::H),
            'I' => Some(VK::I),
            'J' => Some(VK::J),
            'K' => Some(VK::K),
            'L' => Some(VK::L),
            'M' => Some(VK::M),
            'N' => Some(VK::N),
            'O' => Some(VK::O),
            'P' => Some(VK::P),
            'Q' => Some(VK::Q),
            'R' => Some(VK::R),
            'S' => Some(VK::S),
            'T' => Some(VK::T),
            'U' => Some(VK::U),
            'V' => Some(VK::V),
            'W' => Some(VK::W),
            'X' => Some(VK::X),
            'Y' => Some(VK::Y),
            'Z' => Some(VK::Z),
            '0' => Some(VK::Key0),
            '1' => Some(VK::Key1),
            '2' => Some(VK::Key2),
            '3' => Some(VK::Key3),
            '4' => Some(VK::Key4),
            '5' => Some(VK::Key5),
            '6' => Some(VK::Key6),
            '7' => Some(VK::Key7),
            '8' => Some(VK::Key8),
            '9' => Some(VK::Key9),
            _ => None,
        };
    }

    match name.to_ascii_lowercase().as_str() {
        "escape" | "esc" => Some(VK::Escape),
        "space" => Some(VK::Space),
        "return" | "enter" => Some(VK::Return),
        "tab" => Some(VK::Tab),
        "f1" => Some(VK::F1),
        "f2" => Some(VK::F2),
        "f3" => Some(VK::F3),
        "f4" => Some(VK::F4),
        "f5" => Some(VK::F5),
        "f6" => Some(VK::F6),
        "f7" => Some(VK::F7),
        "f8" => Some(VK::F8),
        "f9" => Some(VK::F9),
        "f10" => Some(VK::F10),
        "f11" => Some(VK::F11),
        "f12" => Some(VK::F12),
        _ => None,
    }
}

/// Format a key name for display.
pub fn format_key_name(key: VirtualKeyCode) -> String {
    use VirtualKeyCode::*;
    match key {
        Key0 => "0".to_string(),
        Key1 => "1".to_string(),
        Key2 => "2".to_string(),
        Key3 => "3".to_string(),
        Key4 => "4".to_string(),
        Key5 => "5".to_string(),
        Key6 => "6".to_string(),
        Key7 => "7".to_string(),
        Key8 => "8".to_string(),
        Key9 => "9".to_string(),
        Return => "Enter".to_string(),
        Escape => "Esc".to_string(),
        _ => format!("{:?}", key),
    }
}
