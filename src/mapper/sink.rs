//! Effect sinks: where activated events land
//!
//! The directory owns one keyboard sink and one joystick sink. Emulator
//! front ends implement these traits on their device models; the crate
//! ships a logging sink and a recorder for tests and the replay command.

use std::cell::RefCell;
use std::rc::Rc;

use super::layout::KbdKey;

/// Receiver for emulated keyboard input
pub trait KeyboardSink {
    fn add_key(&mut self, key: KbdKey, pressed: bool);

    /// Drop queued keystrokes, called when the editor opens
    fn clear_buffer(&mut self) {}
}

/// Receiver for the emulated gameport
pub trait JoystickSink {
    /// `position` is normalized to `[-1.0, 1.0]`
    fn move_axis(&mut self, stick: u8, axis: u8, position: f32);
    fn set_button(&mut self, stick: u8, button: u8, pressed: bool);
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl KeyboardSink for NullSink {
    fn add_key(&mut self, _key: KbdKey, _pressed: bool) {}
}

impl JoystickSink for NullSink {
    fn move_axis(&mut self, _stick: u8, _axis: u8, _position: f32) {}
    fn set_button(&mut self, _stick: u8, _button: u8, _pressed: bool) {}
}

/// Sink that reports every call through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl KeyboardSink for TracingSink {
    fn add_key(&mut self, key: KbdKey, pressed: bool) {
        tracing::info!(target: "keymapper::sink", ?key, pressed, "keyboard");
    }

    fn clear_buffer(&mut self) {
        tracing::info!(target: "keymapper::sink", "keyboard buffer cleared");
    }
}

impl JoystickSink for TracingSink {
    fn move_axis(&mut self, stick: u8, axis: u8, position: f32) {
        tracing::info!(target: "keymapper::sink", stick, axis, position, "joystick axis");
    }

    fn set_button(&mut self, stick: u8, button: u8, pressed: bool) {
        tracing::info!(target: "keymapper::sink", stick, button, pressed, "joystick button");
    }
}

/// One call received by a [`Recorder`]
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Key { key: KbdKey, pressed: bool },
    ClearBuffer,
    Axis { stick: u8, axis: u8, position: f32 },
    Button { stick: u8, button: u8, pressed: bool },
}

impl std::fmt::Display for SinkCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkCall::Key { key, pressed } => {
                write!(f, "key {:?} {}", key, if *pressed { "down" } else { "up" })
            }
            SinkCall::ClearBuffer => write!(f, "clear keyboard buffer"),
            SinkCall::Axis {
                stick,
                axis,
                position,
            } => write!(f, "stick {} axis {} {:.3}", stick, axis, position),
            SinkCall::Button {
                stick,
                button,
                pressed,
            } => write!(
                f,
                "stick {} button {} {}",
                stick,
                button,
                if *pressed { "down" } else { "up" }
            ),
        }
    }
}

/// Shared log of sink calls; clones append to the same list
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    calls: Rc<RefCell<Vec<SinkCall>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.borrow().clone()
    }

    /// Return and forget everything recorded so far
    pub fn take(&self) -> Vec<SinkCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    /// Keyboard calls only, as (key, pressed)
    pub fn keys(&self) -> Vec<(KbdKey, bool)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                SinkCall::Key { key, pressed } => Some((*key, *pressed)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, call: SinkCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl KeyboardSink for Recorder {
    fn add_key(&mut self, key: KbdKey, pressed: bool) {
        self.push(SinkCall::Key { key, pressed });
    }

    fn clear_buffer(&mut self) {
        self.push(SinkCall::ClearBuffer);
    }
}

impl JoystickSink for Recorder {
    fn move_axis(&mut self, stick: u8, axis: u8, position: f32) {
        self.push(SinkCall::Axis {
            stick,
            axis,
            position,
        });
    }

    fn set_button(&mut self, stick: u8, button: u8, pressed: bool) {
        self.push(SinkCall::Button {
            stick,
            button,
            pressed,
        });
    }
}
