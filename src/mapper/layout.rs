//! Emulated keyboard and joystick layout
//!
//! Lists every logical event the directory creates at startup together with
//! the host input it is bound to by default.

use super::scancode::Scancode;

/// A key of the emulated PC keyboard, delivered to the keyboard sink
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KbdKey {
    Esc,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Grave,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Digit0,
    Minus,
    Equals,
    Backspace,
    Tab,
    Q,
    W,
    E,
    R,
    T,
    Y,
    U,
    I,
    O,
    P,
    LeftBracket,
    RightBracket,
    Enter,
    CapsLock,
    A,
    S,
    D,
    F,
    G,
    H,
    J,
    K,
    L,
    Semicolon,
    Quote,
    Backslash,
    LeftShift,
    LessThan,
    Z,
    X,
    C,
    V,
    B,
    N,
    M,
    Comma,
    Period,
    Slash,
    RightShift,
    LeftCtrl,
    LeftAlt,
    Space,
    RightAlt,
    RightCtrl,
    PrintScreen,
    ScrollLock,
    Pause,
    Insert,
    Home,
    PageUp,
    Delete,
    End,
    PageDown,
    Up,
    Left,
    Down,
    Right,
    NumLock,
    KpDivide,
    KpMultiply,
    KpMinus,
    Kp7,
    Kp8,
    Kp9,
    KpPlus,
    Kp4,
    Kp5,
    Kp6,
    Kp1,
    Kp2,
    Kp3,
    KpEnter,
    Kp0,
    KpPeriod,
}

/// One emulated key: its event suffix, identity and default host key
#[derive(Clone, Copy, Debug)]
pub struct KeyEntry {
    pub name: &'static str,
    pub key: KbdKey,
    pub default_scancode: Scancode,
}

const fn entry(name: &'static str, key: KbdKey, default_scancode: Scancode) -> KeyEntry {
    KeyEntry {
        name,
        key,
        default_scancode,
    }
}

/// Keyboard events in on-screen order; event names are `key_<name>`
pub const KEY_LAYOUT: &[KeyEntry] = &[
    entry("esc", KbdKey::Esc, Scancode::ESCAPE),
    entry("f1", KbdKey::F1, Scancode::F1),
    entry("f2", KbdKey::F2, Scancode::F2),
    entry("f3", KbdKey::F3, Scancode::F3),
    entry("f4", KbdKey::F4, Scancode::F4),
    entry("f5", KbdKey::F5, Scancode::F5),
    entry("f6", KbdKey::F6, Scancode::F6),
    entry("f7", KbdKey::F7, Scancode::F7),
    entry("f8", KbdKey::F8, Scancode::F8),
    entry("f9", KbdKey::F9, Scancode::F9),
    entry("f10", KbdKey::F10, Scancode::F10),
    entry("f11", KbdKey::F11, Scancode::F11),
    entry("f12", KbdKey::F12, Scancode::F12),
    entry("grave", KbdKey::Grave, Scancode::GRAVE),
    entry("1", KbdKey::Digit1, Scancode::DIGIT1),
    entry("2", KbdKey::Digit2, Scancode::DIGIT2),
    entry("3", KbdKey::Digit3, Scancode::DIGIT3),
    entry("4", KbdKey::Digit4, Scancode::DIGIT4),
    entry("5", KbdKey::Digit5, Scancode::DIGIT5),
    entry("6", KbdKey::Digit6, Scancode::DIGIT6),
    entry("7", KbdKey::Digit7, Scancode::DIGIT7),
    entry("8", KbdKey::Digit8, Scancode::DIGIT8),
    entry("9", KbdKey::Digit9, Scancode::DIGIT9),
    entry("0", KbdKey::Digit0, Scancode::DIGIT0),
    entry("minus", KbdKey::Minus, Scancode::MINUS),
    entry("equals", KbdKey::Equals, Scancode::EQUALS),
    entry("bspace", KbdKey::Backspace, Scancode::BACKSPACE),
    entry("tab", KbdKey::Tab, Scancode::TAB),
    entry("q", KbdKey::Q, Scancode::Q),
    entry("w", KbdKey::W, Scancode::W),
    entry("e", KbdKey::E, Scancode::E),
    entry("r", KbdKey::R, Scancode::R),
    entry("t", KbdKey::T, Scancode::T),
    entry("y", KbdKey::Y, Scancode::Y),
    entry("u", KbdKey::U, Scancode::U),
    entry("i", KbdKey::I, Scancode::I),
    entry("o", KbdKey::O, Scancode::O),
    entry("p", KbdKey::P, Scancode::P),
    entry("lbracket", KbdKey::LeftBracket, Scancode::LEFTBRACKET),
    entry("rbracket", KbdKey::RightBracket, Scancode::RIGHTBRACKET),
    entry("enter", KbdKey::Enter, Scancode::RETURN),
    entry("capslock", KbdKey::CapsLock, Scancode::CAPSLOCK),
    entry("a", KbdKey::A, Scancode::A),
    entry("s", KbdKey::S, Scancode::S),
    entry("d", KbdKey::D, Scancode::D),
    entry("f", KbdKey::F, Scancode::F),
    entry("g", KbdKey::G, Scancode::G),
    entry("h", KbdKey::H, Scancode::H),
    entry("j", KbdKey::J, Scancode::J),
    entry("k", KbdKey::K, Scancode::K),
    entry("l", KbdKey::L, Scancode::L),
    entry("semicolon", KbdKey::Semicolon, Scancode::SEMICOLON),
    entry("quote", KbdKey::Quote, Scancode::APOSTROPHE),
    entry("backslash", KbdKey::Backslash, Scancode::BACKSLASH),
    entry("lshift", KbdKey::LeftShift, Scancode::LSHIFT),
    entry("lessthan", KbdKey::LessThan, Scancode::NONUSBACKSLASH),
    entry("z", KbdKey::Z, Scancode::Z),
    entry("x", KbdKey::X, Scancode::X),
    entry("c", KbdKey::C, Scancode::C),
    entry("v", KbdKey::V, Scancode::V),
    entry("b", KbdKey::B, Scancode::B),
    entry("n", KbdKey::N, Scancode::N),
    entry("m", KbdKey::M, Scancode::M),
    entry("comma", KbdKey::Comma, Scancode::COMMA),
    entry("period", KbdKey::Period, Scancode::PERIOD),
    entry("slash", KbdKey::Slash, Scancode::SLASH),
    entry("rshift", KbdKey::RightShift, Scancode::RSHIFT),
    entry("lctrl", KbdKey::LeftCtrl, Scancode::LCTRL),
    entry("lalt", KbdKey::LeftAlt, Scancode::LALT),
    entry("space", KbdKey::Space, Scancode::SPACE),
    entry("ralt", KbdKey::RightAlt, Scancode::RALT),
    entry("rctrl", KbdKey::RightCtrl, Scancode::RCTRL),
    entry("printscreen", KbdKey::PrintScreen, Scancode::PRINTSCREEN),
    entry("scrolllock", KbdKey::ScrollLock, Scancode::SCROLLLOCK),
    entry("pause", KbdKey::Pause, Scancode::PAUSE),
    entry("insert", KbdKey::Insert, Scancode::INSERT),
    entry("home", KbdKey::Home, Scancode::HOME),
    entry("pageup", KbdKey::PageUp, Scancode::PAGEUP),
    entry("delete", KbdKey::Delete, Scancode::DELETE),
    entry("end", KbdKey::End, Scancode::END),
    entry("pagedown", KbdKey::PageDown, Scancode::PAGEDOWN),
    entry("up", KbdKey::Up, Scancode::UP),
    entry("left", KbdKey::Left, Scancode::LEFT),
    entry("down", KbdKey::Down, Scancode::DOWN),
    entry("right", KbdKey::Right, Scancode::RIGHT),
    entry("numlock", KbdKey::NumLock, Scancode::NUMLOCK),
    entry("kp_divide", KbdKey::KpDivide, Scancode::KP_DIVIDE),
    entry("kp_multiply", KbdKey::KpMultiply, Scancode::KP_MULTIPLY),
    entry("kp_minus", KbdKey::KpMinus, Scancode::KP_MINUS),
    entry("kp_7", KbdKey::Kp7, Scancode::KP_7),
    entry("kp_8", KbdKey::Kp8, Scancode::KP_8),
    entry("kp_9", KbdKey::Kp9, Scancode::KP_9),
    entry("kp_plus", KbdKey::KpPlus, Scancode::KP_PLUS),
    entry("kp_4", KbdKey::Kp4, Scancode::KP_4),
    entry("kp_5", KbdKey::Kp5, Scancode::KP_5),
    entry("kp_6", KbdKey::Kp6, Scancode::KP_6),
    entry("kp_1", KbdKey::Kp1, Scancode::KP_1),
    entry("kp_2", KbdKey::Kp2, Scancode::KP_2),
    entry("kp_3", KbdKey::Kp3, Scancode::KP_3),
    entry("kp_enter", KbdKey::KpEnter, Scancode::KP_ENTER),
    entry("kp_0", KbdKey::Kp0, Scancode::KP_0),
    entry("kp_period", KbdKey::KpPeriod, Scancode::KP_PERIOD),
];

/// Events whose state survives focus loss
pub const LOCK_KEY_EVENTS: [&str; 2] = ["key_capslock", "key_numlock"];

/// Maximum length of an event name
pub const MAX_EVENT_NAME: usize = 16;

/// Number of emulated joysticks
pub const MAX_STICKS: usize = 2;
/// Buttons per emulated joystick
pub const MAX_VJOY_BUTTONS: usize = 8;
/// Axes per emulated joystick
pub const MAX_VJOY_AXES: usize = 8;
/// Hat direction slots per emulated joystick (four per hat)
pub const MAX_VJOY_HAT_SLOTS: usize = 16;

/// Joystick events per emulated stick: (buttons, axes, hats)
pub const JOYSTICK_LAYOUT: [(u8, u8, u8); MAX_STICKS] = [(6, 4, 1), (2, 2, 0)];

/// Host inputs the modifier events listen to by default
pub const MODIFIER_DEFAULTS: [(&str, [Scancode; 2]); 2] = [
    ("mod_1", [Scancode::RCTRL, Scancode::LCTRL]),
    ("mod_2", [Scancode::RALT, Scancode::LALT]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_names_are_unique_and_short() {
        let mut seen = HashSet::new();
        for entry in KEY_LAYOUT {
            assert!(seen.insert(entry.name), "duplicate key {}", entry.name);
            assert!(format!("key_{}", entry.name).len() <= MAX_EVENT_NAME);
        }
    }

    #[test]
    fn test_default_scancodes_are_unique() {
        let mut seen = HashSet::new();
        for entry in KEY_LAYOUT {
            assert!(
                seen.insert(entry.default_scancode),
                "{} shares its default host key",
                entry.name
            );
        }
    }
}
