//! Adapter from winit window events to raw mapper events

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::raw::RawEvent;
use super::scancode::Scancode;

/// Map a winit physical key to its USB HID usage code.
///
/// Returns None for keys outside the emulated keyboard.
pub fn scancode_from_physical(key: PhysicalKey) -> Option<Scancode> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };

    let scancode = match code {
        KeyCode::KeyA => Scancode::A,
        KeyCode::KeyB => Scancode::B,
        KeyCode::KeyC => Scancode::C,
        KeyCode::KeyD => Scancode::D,
        KeyCode::KeyE => Scancode::E,
        KeyCode::KeyF => Scancode::F,
        KeyCode::KeyG => Scancode::G,
        KeyCode::KeyH => Scancode::H,
        KeyCode::KeyI => Scancode::I,
        KeyCode::KeyJ => Scancode::J,
        KeyCode::KeyK => Scancode::K,
        KeyCode::KeyL => Scancode::L,
        KeyCode::KeyM => Scancode::M,
        KeyCode::KeyN => Scancode::N,
        KeyCode::KeyO => Scancode::O,
        KeyCode::KeyP => Scancode::P,
        KeyCode::KeyQ => Scancode::Q,
        KeyCode::KeyR => Scancode::R,
        KeyCode::KeyS => Scancode::S,
        KeyCode::KeyT => Scancode::T,
        KeyCode::KeyU => Scancode::U,
        KeyCode::KeyV => Scancode::V,
        KeyCode::KeyW => Scancode::W,
        KeyCode::KeyX => Scancode::X,
        KeyCode::KeyY => Scancode::Y,
        KeyCode::KeyZ => Scancode::Z,

        KeyCode::Digit1 => Scancode::DIGIT1,
        KeyCode::Digit2 => Scancode::DIGIT2,
        KeyCode::Digit3 => Scancode::DIGIT3,
        KeyCode::Digit4 => Scancode::DIGIT4,
        KeyCode::Digit5 => Scancode::DIGIT5,
        KeyCode::Digit6 => Scancode::DIGIT6,
        KeyCode::Digit7 => Scancode::DIGIT7,
        KeyCode::Digit8 => Scancode::DIGIT8,
        KeyCode::Digit9 => Scancode::DIGIT9,
        KeyCode::Digit0 => Scancode::DIGIT0,

        KeyCode::Enter => Scancode::RETURN,
        KeyCode::Escape => Scancode::ESCAPE,
        KeyCode::Backspace => Scancode::BACKSPACE,
        KeyCode::Tab => Scancode::TAB,
        KeyCode::Space => Scancode::SPACE,
        KeyCode::Minus => Scancode::MINUS,
        KeyCode::Equal => Scancode::EQUALS,
        KeyCode::BracketLeft => Scancode::LEFTBRACKET,
        KeyCode::BracketRight => Scancode::RIGHTBRACKET,
        KeyCode::Backslash => Scancode::BACKSLASH,
        KeyCode::Semicolon => Scancode::SEMICOLON,
        KeyCode::Quote => Scancode::APOSTROPHE,
        KeyCode::Backquote => Scancode::GRAVE,
        KeyCode::Comma => Scancode::COMMA,
        KeyCode::Period => Scancode::PERIOD,
        KeyCode::Slash => Scancode::SLASH,
        KeyCode::CapsLock => Scancode::CAPSLOCK,
        KeyCode::IntlBackslash => Scancode::NONUSBACKSLASH,

        KeyCode::F1 => Scancode::F1,
        KeyCode::F2 => Scancode::F2,
        KeyCode::F3 => Scancode::F3,
        KeyCode::F4 => Scancode::F4,
        KeyCode::F5 => Scancode::F5,
        KeyCode::F6 => Scancode::F6,
        KeyCode::F7 => Scancode::F7,
        KeyCode::F8 => Scancode::F8,
        KeyCode::F9 => Scancode::F9,
        KeyCode::F10 => Scancode::F10,
        KeyCode::F11 => Scancode::F11,
        KeyCode::F12 => Scancode::F12,

        // Navigation block
        KeyCode::PrintScreen => Scancode::PRINTSCREEN,
        KeyCode::ScrollLock => Scancode::SCROLLLOCK,
        KeyCode::Pause => Scancode::PAUSE,
        KeyCode::Insert => Scancode::INSERT,
        KeyCode::Home => Scancode::HOME,
        KeyCode::PageUp => Scancode::PAGEUP,
        KeyCode::Delete => Scancode::DELETE,
        KeyCode::End => Scancode::END,
        KeyCode::PageDown => Scancode::PAGEDOWN,
        KeyCode::ArrowRight => Scancode::RIGHT,
        KeyCode::ArrowLeft => Scancode::LEFT,
        KeyCode::ArrowDown => Scancode::DOWN,
        KeyCode::ArrowUp => Scancode::UP,

        // Keypad
        KeyCode::NumLock => Scancode::NUMLOCK,
        KeyCode::NumpadDivide => Scancode::KP_DIVIDE,
        KeyCode::NumpadMultiply => Scancode::KP_MULTIPLY,
        KeyCode::NumpadSubtract => Scancode::KP_MINUS,
        KeyCode::NumpadAdd => Scancode::KP_PLUS,
        KeyCode::NumpadEnter => Scancode::KP_ENTER,
        KeyCode::Numpad1 => Scancode::KP_1,
        KeyCode::Numpad2 => Scancode::KP_2,
        KeyCode::Numpad3 => Scancode::KP_3,
        KeyCode::Numpad4 => Scancode::KP_4,
        KeyCode::Numpad5 => Scancode::KP_5,
        KeyCode::Numpad6 => Scancode::KP_6,
        KeyCode::Numpad7 => Scancode::KP_7,
        KeyCode::Numpad8 => Scancode::KP_8,
        KeyCode::Numpad9 => Scancode::KP_9,
        KeyCode::Numpad0 => Scancode::KP_0,
        KeyCode::NumpadDecimal => Scancode::KP_PERIOD,

        // Modifiers
        KeyCode::ControlLeft => Scancode::LCTRL,
        KeyCode::ShiftLeft => Scancode::LSHIFT,
        KeyCode::AltLeft => Scancode::LALT,
        KeyCode::SuperLeft => Scancode::LGUI,
        KeyCode::ControlRight => Scancode::RCTRL,
        KeyCode::ShiftRight => Scancode::RSHIFT,
        KeyCode::AltRight => Scancode::RALT,
        KeyCode::SuperRight => Scancode::RGUI,

        _ => return None,
    };
    Some(scancode)
}

/// Convert a window event into a raw mapper event.
///
/// Key repeats are dropped: the emulated keyboard generates its own.
pub fn raw_event_from_window_event(event: &WindowEvent) -> Option<RawEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            if event.repeat {
                return None;
            }
            let scancode = scancode_from_physical(event.physical_key)?;
            Some(match event.state {
                ElementState::Pressed => RawEvent::KeyDown { scancode },
                ElementState::Released => RawEvent::KeyUp { scancode },
            })
        }
        WindowEvent::Focused(false) => Some(RawEvent::FocusLost),
        WindowEvent::CloseRequested | WindowEvent::Destroyed => Some(RawEvent::Quit),
        _ => None,
    }
}
