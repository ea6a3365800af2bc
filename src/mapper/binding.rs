//! Bind: one physical input attached to one logical event

use super::scancode::{CanonicalKey, Scancode};
use super::types::{BindFlags, EventId, HatDirection, Modifiers, ACTIVATION_THRESHOLD};

/// The physical input a bind listens to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindInput {
    Key {
        scancode: Scancode,
        key: CanonicalKey,
    },
    Axis {
        stick: u8,
        axis: u8,
        positive: bool,
    },
    Button {
        stick: u8,
        button: u8,
    },
    Hat {
        stick: u8,
        hat: u8,
        direction: HatDirection,
    },
}

impl BindInput {
    /// Keys, buttons and hats report edges; axes report magnitudes
    pub fn is_edge_triggered(&self) -> bool {
        !matches!(self, BindInput::Axis { .. })
    }

    /// Descriptor written to mapper files, without flags
    pub fn config_name(&self) -> String {
        match *self {
            BindInput::Key { scancode, .. } => format!("key {}", scancode.0),
            BindInput::Axis {
                stick,
                axis,
                positive,
            } => format!("stick_{} axis {} {}", stick, axis, u8::from(positive)),
            BindInput::Button { stick, button } => format!("stick_{} button {}", stick, button),
            BindInput::Hat {
                stick,
                hat,
                direction,
            } => format!("stick_{} hat {} {}", stick, hat, direction.mask()),
        }
    }

    /// Label shown in the editor; `device` names the stick for joystick inputs
    pub fn bind_name(&self, device: &str) -> String {
        match *self {
            BindInput::Key { scancode, .. } => match scancode.name() {
                Some(name) => format!("Key {}", name),
                None => format!("Key {}", scancode.0),
            },
            BindInput::Axis { axis, positive, .. } => {
                format!("{} Axis {}{}", device, axis, if positive { "+" } else { "-" })
            }
            BindInput::Button { button, .. } => format!("{} Button {}", device, button),
            BindInput::Hat { hat, direction, .. } => {
                format!("{} Hat {} {}", device, hat, direction.name())
            }
        }
    }
}

/// Parse `mod1`/`mod2`/`mod3`/`hold`, case-insensitive, skipping anything else
pub fn parse_flags<'a>(words: impl IntoIterator<Item = &'a str>) -> (Modifiers, BindFlags) {
    let mut mods = Modifiers::NONE;
    let mut flags = BindFlags::NONE;
    for word in words {
        match word.to_ascii_lowercase().as_str() {
            "mod1" => mods = mods | Modifiers::MOD1,
            "mod2" => mods = mods | Modifiers::MOD2,
            "mod3" => mods = mods | Modifiers::MOD3,
            "hold" => flags = flags.union(BindFlags::HOLD),
            _ => {}
        }
    }
    (mods, flags)
}

/// Outcome of feeding a press or release into a triggered bind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BindStep {
    /// Nothing changes for the event
    Idle,
    /// The bind starts contributing to its event
    Engage,
    /// The bind stops contributing to its event
    Release,
    /// Released while hold is set: keeps contributing until the next release
    Latch,
}

#[derive(Clone, Debug)]
pub struct Bind {
    pub event: EventId,
    pub input: BindInput,
    pub mods: Modifiers,
    pub flags: BindFlags,
    /// Index of the group whose bind list holds this bind
    pub(crate) group: usize,
    active: bool,
    holding: bool,
}

impl Bind {
    pub(crate) fn new(event: EventId, input: BindInput, group: usize) -> Self {
        Self {
            event,
            input,
            mods: Modifiers::NONE,
            flags: BindFlags::NONE,
            group,
            active: false,
            holding: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True while a hold bind is latched after its first release
    pub fn is_holding(&self) -> bool {
        self.holding
    }

    /// Whether the bind currently contributes to its event's activity
    pub(crate) fn is_contributing(&self) -> bool {
        self.active || self.holding
    }

    /// Press transition for binds on triggered events.
    ///
    /// Re-pressing a latched hold bind re-arms its release without counting
    /// the event a second time.
    pub(crate) fn press(&mut self, value: i32) -> BindStep {
        if value > ACTIVATION_THRESHOLD {
            if self.active {
                return BindStep::Idle;
            }
            self.active = true;
            if self.holding {
                BindStep::Idle
            } else {
                BindStep::Engage
            }
        } else if self.active {
            self.active = false;
            self.holding = false;
            BindStep::Release
        } else {
            BindStep::Idle
        }
    }

    /// Release transition for binds on triggered events
    pub(crate) fn release(&mut self) -> BindStep {
        if !self.active {
            return BindStep::Idle;
        }
        self.active = false;
        if self.flags.contains(BindFlags::HOLD) && !self.holding {
            self.holding = true;
            return BindStep::Latch;
        }
        self.holding = false;
        BindStep::Release
    }

    /// Drop all press state, returning whether the event must be released
    pub(crate) fn reset(&mut self) -> bool {
        let contributing = self.is_contributing();
        self.active = false;
        self.holding = false;
        contributing
    }

    /// Flag suffix for mapper files, e.g. ` mod1 hold`
    pub fn flags_string(&self) -> String {
        let mut out = String::new();
        for flag in Modifiers::ALL {
            if self.mods.contains(flag) {
                if let Some(word) = flag.config_word() {
                    out.push(' ');
                    out.push_str(word);
                }
            }
        }
        if self.flags.contains(BindFlags::HOLD) {
            out.push_str(" hold");
        }
        out
    }

    /// Full mapper-file token: descriptor followed by flags
    pub fn config_token(&self) -> String {
        format!("{}{}", self.input.config_name(), self.flags_string())
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Same input, requirements and behaviour
    pub(crate) fn same_binding(&self, other: &Bind) -> bool {
        self.event == other.event
            && self.input == other.input
            && self.mods == other.mods
            && self.flags == other.flags
    }
}
