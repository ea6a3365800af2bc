//! Raw host input events and the source trait that yields them

use std::collections::VecDeque;

use super::scancode::Scancode;

/// A host input event, before any binding is applied
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawEvent {
    KeyDown { scancode: Scancode },
    KeyUp { scancode: Scancode },
    AxisMotion { stick: u8, axis: u8, value: i16 },
    ButtonDown { stick: u8, button: u8 },
    ButtonUp { stick: u8, button: u8 },
    /// `value` is a hat mask: up 1, right 2, down 4, left 8
    HatMotion { stick: u8, hat: u8, value: u8 },
    FocusLost,
    Quit,
}

impl RawEvent {
    /// Physical stick this event comes from, if any
    pub fn stick(&self) -> Option<u8> {
        match *self {
            RawEvent::AxisMotion { stick, .. }
            | RawEvent::ButtonDown { stick, .. }
            | RawEvent::ButtonUp { stick, .. }
            | RawEvent::HatMotion { stick, .. } => Some(stick),
            _ => None,
        }
    }
}

/// Something that can be drained of pending raw events
pub trait EventSource {
    fn poll_event(&mut self) -> Option<RawEvent>;
}

impl EventSource for VecDeque<RawEvent> {
    fn poll_event(&mut self) -> Option<RawEvent> {
        self.pop_front()
    }
}

/// Description of a host joystick as reported by the platform
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostStick {
    pub name: String,
    pub axes: u8,
    pub buttons: u8,
    pub hats: u8,
}

impl HostStick {
    pub fn new(name: impl Into<String>, axes: u8, buttons: u8, hats: u8) -> Self {
        Self {
            name: name.into(),
            axes,
            buttons,
            hats,
        }
    }

    /// A stick with no axes and no buttons cannot drive anything
    pub fn is_usable(&self) -> bool {
        self.axes > 0 || self.buttons > 0
    }
}
