//! Joystick bind groups and the emulated gameport they drive
//!
//! A stick group listens to one host joystick, activates the bind lists of
//! its axes, buttons and hats, and after every dispatch folds the virtual
//! joystick state written by joystick events into gameport output. The
//! output layout depends on the emulated topology:
//!
//! ```text
//! 2axis    virtual stick N  → gameport stick N (X, Y, 2 buttons)
//! 4axis    virtual stick 0  → both gameport sticks (4 axes, 4 buttons)
//! fcs      as 4axis, hat 0 encodes the second stick's Y axis
//! ch       as 4axis, 6 buttons + hat priority-encoded onto 4 buttons
//! ```

use serde::{Deserialize, Serialize};

use super::binding::BindInput;
use super::group::{ListAction, ListOp};
use super::layout::{MAX_STICKS, MAX_VJOY_AXES, MAX_VJOY_BUTTONS, MAX_VJOY_HAT_SLOTS};
use super::raw::{HostStick, RawEvent};
use super::sink::JoystickSink;
use super::types::{BindId, HatDirection, ACTIVATION_THRESHOLD, FULL_MAGNITUDE};

/// Host axes tracked per stick
pub const MAX_AXIS: usize = 8;
/// Host hats tracked per stick
pub const MAX_HAT: usize = 2;
/// Host buttons tracked per stick
pub const MAX_BUTTON: usize = 32;
/// Host buttons kept when button wrapping is on
pub const MAX_BUTTON_CAP: usize = 16;

/// Emulated joystick type, as written in the settings file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoystickType {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "none")]
    None,
    #[serde(rename = "2axis")]
    TwoAxis,
    #[serde(rename = "4axis")]
    FourAxis,
    #[serde(rename = "4axis_2")]
    FourAxisSecond,
    #[serde(rename = "fcs")]
    Fcs,
    #[serde(rename = "ch")]
    Ch,
}

impl JoystickType {
    /// Resolve `Auto` against the sticks the host reports
    pub fn resolve(self, sticks: &[HostStick]) -> JoystickType {
        if self != JoystickType::Auto {
            return self;
        }
        match sticks {
            [] => JoystickType::None,
            [only] => {
                if only.is_usable() {
                    tracing::info!("One joystick reported, initializing with 4axis");
                    JoystickType::FourAxis
                } else {
                    JoystickType::None
                }
            }
            [first, second, ..] => {
                let usable = |s: &HostStick| s.axes > 1 || s.buttons > 0;
                match (usable(first), usable(second)) {
                    (true, true) => {
                        tracing::info!("Two or more joysticks reported, initializing with 2axis");
                        JoystickType::TwoAxis
                    }
                    (true, false) => {
                        tracing::info!("One joystick reported, initializing with 4axis");
                        JoystickType::FourAxis
                    }
                    (false, true) => {
                        tracing::info!("One joystick reported, initializing with 4axis_2");
                        JoystickType::FourAxisSecond
                    }
                    (false, false) => JoystickType::None,
                }
            }
        }
    }
}

/// Topology a stick group emulates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StickKind {
    TwoAxis,
    FourAxis,
    /// Four-axis emulation fed by the second host stick
    FourAxisDual,
    /// Thrustmaster FCS: hat drives the second stick's Y axis
    FlightStick,
    /// CH Flightstick Pro: buttons and hat share the four gameport buttons
    GameportHub,
}

impl StickKind {
    /// Emulated (axes, buttons, hats)
    pub const fn emulated(self) -> (usize, usize, usize) {
        match self {
            StickKind::TwoAxis => (2, 2, 0),
            StickKind::FourAxis | StickKind::FourAxisDual => (4, 4, 0),
            StickKind::FlightStick => (4, 4, 1),
            StickKind::GameportHub => (4, 6, 1),
        }
    }
}

/// State written by joystick events for one emulated stick
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VirtualJoystick {
    pub axis_pos: [i16; MAX_VJOY_AXES],
    pub button_pressed: [bool; MAX_VJOY_BUTTONS],
    pub hat_pressed: [bool; MAX_VJOY_HAT_SLOTS],
}

const CH_BUTTON_MAGIC: [u16; 6] = [0x02, 0x04, 0x10, 0x100, 0x20, 0x200];
const CH_HAT_MAGIC: [u16; 4] = [0x8000, 0x800, 0x80, 0x08];

#[derive(Debug, Clone)]
pub struct StickGroup {
    kind: StickKind,
    /// Host stick index
    stick: u8,
    /// Emulated stick index, used in `stick_N` config tokens
    emustick: u8,
    /// Host device name; `None` for groups without a host stick
    device: Option<String>,
    axes: usize,
    buttons: usize,
    hats: usize,
    button_wrap: usize,

    pos_axis_lists: Vec<Vec<BindId>>,
    neg_axis_lists: Vec<Vec<BindId>>,
    button_lists: Vec<Vec<BindId>>,
    hat_lists: Vec<Vec<BindId>>,

    button_state: u32,
    old_pos_axis: [bool; MAX_AXIS],
    old_neg_axis: [bool; MAX_AXIS],
    old_wrapped_buttons: u32,
    old_hat_state: [u8; MAX_HAT],

    autofire_counters: [u8; MAX_VJOY_BUTTONS],
    pushed_axes: [[Option<f32>; 2]; 2],
    pushed_buttons: [[Option<bool>; 2]; 2],
    old_hat_position: u8,
}

impl StickGroup {
    /// Group for host stick `stick` emulating `emustick`.
    ///
    /// Without a host stick the group only parses config tokens, so binds for
    /// an absent device survive a load/save cycle.
    pub fn new(
        kind: StickKind,
        stick: u8,
        emustick: u8,
        host: Option<&HostStick>,
        button_wrapping: bool,
    ) -> Self {
        let (emulated_axes, emulated_buttons, emulated_hats) = kind.emulated();
        let (axes, mut buttons, hats) = match host {
            Some(host) => (
                (host.axes as usize).min(MAX_AXIS),
                (host.buttons as usize).min(MAX_BUTTON),
                (host.hats as usize).min(MAX_HAT),
            ),
            None => (emulated_axes, emulated_buttons, emulated_hats),
        };

        let button_wrap = if host.is_none() {
            emulated_buttons
        } else if button_wrapping {
            buttons = buttons.min(MAX_BUTTON_CAP);
            emulated_buttons
        } else {
            buttons.max(1)
        };

        Self {
            kind,
            stick,
            emustick,
            device: host.map(|h| h.name.clone()),
            axes,
            buttons,
            hats,
            button_wrap,
            pos_axis_lists: vec![Vec::new(); axes],
            neg_axis_lists: vec![Vec::new(); axes],
            button_lists: vec![Vec::new(); button_wrap],
            hat_lists: vec![Vec::new(); hats * 4],
            button_state: 0,
            old_pos_axis: [false; MAX_AXIS],
            old_neg_axis: [false; MAX_AXIS],
            old_wrapped_buttons: 0,
            old_hat_state: [0; MAX_HAT],
            autofire_counters: [0; MAX_VJOY_BUTTONS],
            pushed_axes: [[None; 2]; 2],
            pushed_buttons: [[None; 2]; 2],
            old_hat_position: 0,
        }
    }

    pub fn kind(&self) -> StickKind {
        self.kind
    }

    pub fn emustick(&self) -> u8 {
        self.emustick
    }

    pub fn is_dummy(&self) -> bool {
        self.device.is_none()
    }

    pub fn button_wrap(&self) -> usize {
        self.button_wrap
    }

    pub fn config_start(&self) -> String {
        format!("stick_{}", self.emustick)
    }

    pub fn bind_start(&self) -> String {
        self.device
            .clone()
            .unwrap_or_else(|| "[missing joystick]".to_string())
    }

    /// Turn host state changes into bind list activations
    pub(crate) fn check_event(&mut self, event: &RawEvent) -> Option<Vec<ListAction>> {
        if self.is_dummy() || event.stick() != Some(self.stick) {
            return None;
        }

        let mut actions = Vec::new();
        match *event {
            RawEvent::AxisMotion { axis, value, .. } => {
                let axis = axis as usize;
                if axis < self.axes {
                    self.axis_moved(axis, value, &mut actions);
                } else {
                    tracing::debug!("Dropping motion of unknown axis {} on stick {}", axis, self.stick);
                }
            }
            RawEvent::ButtonDown { button, .. } | RawEvent::ButtonUp { button, .. } => {
                let button = button as usize;
                if button < self.buttons {
                    let bit = 1u32 << button;
                    if matches!(event, RawEvent::ButtonDown { .. }) {
                        self.button_state |= bit;
                    } else {
                        self.button_state &= !bit;
                    }
                    self.buttons_changed(&mut actions);
                } else {
                    tracing::debug!("Dropping unknown button {} on stick {}", button, self.stick);
                }
            }
            RawEvent::HatMotion { hat, value, .. } => {
                let hat = hat as usize;
                if hat < self.hats {
                    self.hat_moved(hat, value, &mut actions);
                } else {
                    tracing::debug!("Dropping unknown hat {} on stick {}", hat, self.stick);
                }
            }
            _ => return None,
        }
        Some(actions)
    }

    fn axis_moved(&mut self, axis: usize, value: i16, actions: &mut Vec<ListAction>) {
        let release = |list: &Vec<BindId>, actions: &mut Vec<ListAction>| {
            actions.push(ListAction {
                binds: list.clone(),
                op: ListOp::Deactivate { edge: false },
            })
        };

        if value > 1 {
            if self.old_neg_axis[axis] {
                release(&self.neg_axis_lists[axis], actions);
                self.old_neg_axis[axis] = false;
            }
            actions.push(ListAction {
                binds: self.pos_axis_lists[axis].clone(),
                op: ListOp::Activate {
                    value: value as i32,
                    edge: false,
                },
            });
            self.old_pos_axis[axis] = true;
        } else if value < -1 {
            if self.old_pos_axis[axis] {
                release(&self.pos_axis_lists[axis], actions);
                self.old_pos_axis[axis] = false;
            }
            let magnitude = (value as i32).abs().min(FULL_MAGNITUDE);
            actions.push(ListAction {
                binds: self.neg_axis_lists[axis].clone(),
                op: ListOp::Activate {
                    value: magnitude,
                    edge: false,
                },
            });
            self.old_neg_axis[axis] = true;
        } else {
            if self.old_pos_axis[axis] {
                release(&self.pos_axis_lists[axis], actions);
                self.old_pos_axis[axis] = false;
            }
            if self.old_neg_axis[axis] {
                release(&self.neg_axis_lists[axis], actions);
                self.old_neg_axis[axis] = false;
            }
        }
    }

    fn buttons_changed(&mut self, actions: &mut Vec<ListAction>) {
        let mut wrapped = 0u32;
        for button in 0..self.buttons {
            if self.button_state & (1 << button) != 0 {
                wrapped |= 1 << (button % self.button_wrap);
            }
        }

        let changed = wrapped ^ self.old_wrapped_buttons;
        for slot in 0..self.button_wrap {
            if changed & (1 << slot) == 0 {
                continue;
            }
            let op = if wrapped & (1 << slot) != 0 {
                ListOp::Activate {
                    value: FULL_MAGNITUDE,
                    edge: true,
                }
            } else {
                ListOp::Deactivate { edge: true }
            };
            actions.push(ListAction {
                binds: self.button_lists[slot].clone(),
                op,
            });
        }
        self.old_wrapped_buttons = wrapped;
    }

    fn hat_moved(&mut self, hat: usize, value: u8, actions: &mut Vec<ListAction>) {
        let old = self.old_hat_state[hat];
        for dir in HatDirection::ALL {
            let bit = dir.mask();
            if (value & bit) == (old & bit) {
                continue;
            }
            let op = if value & bit != 0 {
                ListOp::Activate {
                    value: FULL_MAGNITUDE,
                    edge: true,
                }
            } else {
                ListOp::Deactivate { edge: true }
            };
            actions.push(ListAction {
                binds: self.hat_lists[(hat << 2) + dir.index()].clone(),
                op,
            });
        }
        self.old_hat_state[hat] = value;
    }

    /// Bind input for the editor from a host event
    pub(crate) fn create_event_bind(&self, event: &RawEvent) -> Option<BindInput> {
        if self.is_dummy() || event.stick() != Some(self.stick) {
            return None;
        }
        match *event {
            RawEvent::AxisMotion { axis, value, .. } => {
                if (value as i32).abs() < ACTIVATION_THRESHOLD || axis as usize >= self.axes {
                    return None;
                }
                Some(BindInput::Axis {
                    stick: self.emustick,
                    axis,
                    positive: value > 0,
                })
            }
            RawEvent::ButtonDown { button, .. } => {
                if button as usize >= self.buttons {
                    return None;
                }
                Some(BindInput::Button {
                    stick: self.emustick,
                    button: (button as usize % self.button_wrap) as u8,
                })
            }
            RawEvent::HatMotion { hat, value, .. } => {
                if hat as usize >= self.hats {
                    return None;
                }
                HatDirection::from_mask(value).map(|direction| BindInput::Hat {
                    stick: self.emustick,
                    hat,
                    direction,
                })
            }
            _ => None,
        }
    }

    /// Parse the words after `stick_N`; returns the input and words consumed
    pub(crate) fn parse_config(&self, words: &[&str]) -> Option<(BindInput, usize)> {
        let number = |idx: usize| words.get(idx).and_then(|w| w.parse::<i64>().ok());
        let kind = words.first()?.to_ascii_lowercase();
        match kind.as_str() {
            "axis" => {
                let axis = number(1)?;
                let positive = number(2)? > 0;
                if axis < 0 || axis as usize >= self.axes {
                    return None;
                }
                Some((
                    BindInput::Axis {
                        stick: self.emustick,
                        axis: axis as u8,
                        positive,
                    },
                    3,
                ))
            }
            "button" => {
                let button = number(1)?;
                if button < 0 || button as usize >= self.button_wrap {
                    return None;
                }
                Some((
                    BindInput::Button {
                        stick: self.emustick,
                        button: button as u8,
                    },
                    2,
                ))
            }
            "hat" => {
                let hat = number(1)?;
                let mask = number(2)?;
                if hat < 0 || hat as usize >= self.hats || !(0..=255).contains(&mask) {
                    return None;
                }
                let direction = HatDirection::from_mask(mask as u8)?;
                Some((
                    BindInput::Hat {
                        stick: self.emustick,
                        hat: hat as u8,
                        direction,
                    },
                    3,
                ))
            }
            _ => None,
        }
    }

    pub(crate) fn list_mut(&mut self, input: &BindInput) -> Option<&mut Vec<BindId>> {
        match *input {
            BindInput::Axis {
                stick,
                axis,
                positive,
            } if stick == self.emustick => {
                let lists = if positive {
                    &mut self.pos_axis_lists
                } else {
                    &mut self.neg_axis_lists
                };
                lists.get_mut(axis as usize)
            }
            BindInput::Button { stick, button } if stick == self.emustick => {
                self.button_lists.get_mut(button as usize)
            }
            BindInput::Hat {
                stick,
                hat,
                direction,
            } if stick == self.emustick => self
                .hat_lists
                .get_mut(((hat as usize) << 2) + direction.index()),
            _ => None,
        }
    }

    pub(crate) fn clear_lists(&mut self) {
        for list in self
            .pos_axis_lists
            .iter_mut()
            .chain(self.neg_axis_lists.iter_mut())
            .chain(self.button_lists.iter_mut())
            .chain(self.hat_lists.iter_mut())
        {
            list.clear();
        }
    }

    /// Push virtual joystick state to the gameport, only what changed.
    ///
    /// `advance_autofire` toggles held autofire buttons; it is set once per
    /// poll cycle, not per event.
    pub(crate) fn update(
        &mut self,
        vjoy: &[VirtualJoystick; MAX_STICKS],
        sink: &mut dyn JoystickSink,
        autofire: bool,
        advance_autofire: bool,
    ) {
        if self.is_dummy() {
            return;
        }
        let Some(joy) = vjoy.get(self.emustick as usize) else {
            return;
        };

        let mut pressed = [false; MAX_BUTTON];
        for (i, &down) in joy.button_pressed.iter().enumerate() {
            if down {
                pressed[i % self.button_wrap] = true;
            }
        }
        let axis = |i: usize| joy.axis_pos[i] as f32 / 32768.0;

        match self.kind {
            StickKind::TwoAxis => {
                let (_, emulated_buttons, _) = self.kind.emulated();
                for i in 0..emulated_buttons {
                    let state = self.autofire_state(i, pressed[i], autofire, advance_autofire);
                    self.push_button(sink, self.emustick, i as u8, state);
                }
                self.push_axis(sink, self.emustick, 0, axis(0));
                self.push_axis(sink, self.emustick, 1, axis(1));
            }
            StickKind::FourAxis | StickKind::FourAxisDual | StickKind::FlightStick => {
                for i in 0..4 {
                    let state = self.autofire_state(i, pressed[i], autofire, advance_autofire);
                    self.push_button(sink, (i >> 1) as u8, (i & 1) as u8, state);
                }
                self.push_axis(sink, 0, 0, axis(0));
                self.push_axis(sink, 0, 1, axis(1));
                self.push_axis(sink, 1, 0, axis(2));
                if self.kind == StickKind::FlightStick {
                    self.update_fcs_hat(joy, sink);
                } else {
                    self.push_axis(sink, 1, 1, axis(3));
                }
            }
            StickKind::GameportHub => {
                self.push_axis(sink, 0, 0, axis(0));
                self.push_axis(sink, 0, 1, axis(1));
                self.push_axis(sink, 1, 0, axis(2));
                self.push_axis(sink, 1, 1, axis(3));

                let mut state = 0u16;
                for (i, magic) in CH_BUTTON_MAGIC.iter().enumerate() {
                    if pressed[i] {
                        state |= magic;
                    }
                }
                for (i, magic) in CH_HAT_MAGIC.iter().enumerate() {
                    if joy.hat_pressed[i] {
                        state |= magic;
                    }
                }
                let code = (0..16).find(|bit| state & (1 << bit) != 0).unwrap_or(16);
                self.push_button(sink, 0, 0, code & 1 != 0);
                self.push_button(sink, 0, 1, code & 2 != 0);
                self.push_button(sink, 1, 0, code & 4 != 0);
                self.push_button(sink, 1, 1, code & 8 != 0);
            }
        }
    }

    fn autofire_state(&mut self, button: usize, pressed: bool, autofire: bool, advance: bool) -> bool {
        if !(autofire && pressed) {
            return pressed;
        }
        let counter = &mut self.autofire_counters[button];
        if advance {
            *counter = counter.wrapping_add(1);
        }
        *counter & 1 == 1
    }

    fn update_fcs_hat(&mut self, joy: &VirtualJoystick, sink: &mut dyn JoystickSink) {
        let mut hat_pos = 0u8;
        if joy.hat_pressed[HatDirection::Up.index()] {
            hat_pos |= HatDirection::Up.mask();
        } else if joy.hat_pressed[HatDirection::Down.index()] {
            hat_pos |= HatDirection::Down.mask();
        }
        if joy.hat_pressed[HatDirection::Left.index()] {
            hat_pos |= HatDirection::Left.mask();
        } else if joy.hat_pressed[HatDirection::Right.index()] {
            hat_pos |= HatDirection::Right.mask();
        }

        if hat_pos == self.old_hat_position {
            return;
        }
        self.old_hat_position = hat_pos;

        let y = self.pushed_axes[1][1].unwrap_or(0.0);
        let position = fcs_hat_position(hat_pos, y);
        self.push_axis(sink, 1, 1, position);
    }

    fn push_axis(&mut self, sink: &mut dyn JoystickSink, stick: u8, axis: u8, position: f32) {
        let slot = &mut self.pushed_axes[stick as usize & 1][axis as usize & 1];
        if *slot != Some(position) {
            *slot = Some(position);
            sink.move_axis(stick, axis, position);
        }
    }

    fn push_button(&mut self, sink: &mut dyn JoystickSink, stick: u8, button: u8, pressed: bool) {
        let slot = &mut self.pushed_buttons[stick as usize & 1][button as usize & 1];
        if *slot != Some(pressed) {
            *slot = Some(pressed);
            sink.set_button(stick, button, pressed);
        }
    }
}

/// Second-stick Y position encoding an FCS hat; diagonals depend on where
/// the axis currently sits.
fn fcs_hat_position(hat_pos: u8, y: f32) -> f32 {
    const UP: u8 = HatDirection::Up.mask();
    const RIGHT: u8 = HatDirection::Right.mask();
    const DOWN: u8 = HatDirection::Down.mask();
    const LEFT: u8 = HatDirection::Left.mask();

    match hat_pos {
        UP => -1.0,
        RIGHT => -0.5,
        DOWN => 0.0,
        LEFT => 0.5,
        p if p == UP | LEFT => {
            if y < 0.0 {
                0.5
            } else {
                -1.0
            }
        }
        p if p == UP | RIGHT => {
            if y < -0.7 {
                -0.5
            } else {
                -1.0
            }
        }
        p if p == DOWN | RIGHT => {
            if y < -0.2 {
                0.0
            } else {
                -0.5
            }
        }
        p if p == DOWN | LEFT => {
            if y > 0.2 {
                0.0
            } else {
                0.5
            }
        }
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::sink::{Recorder, SinkCall};

    fn pad(axes: u8, buttons: u8, hats: u8) -> HostStick {
        HostStick::new("Test Pad", axes, buttons, hats)
    }

    #[test]
    fn test_auto_type_resolution() {
        let usable = pad(2, 4, 0);
        let weak = pad(1, 0, 0);
        assert_eq!(JoystickType::Auto.resolve(&[]), JoystickType::None);
        assert_eq!(
            JoystickType::Auto.resolve(&[usable.clone()]),
            JoystickType::FourAxis
        );
        assert_eq!(
            JoystickType::Auto.resolve(&[weak.clone()]),
            JoystickType::FourAxis
        );
        assert_eq!(
            JoystickType::Auto.resolve(&[usable.clone(), usable.clone()]),
            JoystickType::TwoAxis
        );
        assert_eq!(
            JoystickType::Auto.resolve(&[weak.clone(), usable.clone()]),
            JoystickType::FourAxisSecond
        );
        assert_eq!(
            JoystickType::Auto.resolve(&[usable, weak.clone()]),
            JoystickType::FourAxis
        );
        assert_eq!(JoystickType::Auto.resolve(&[pad(0, 0, 1)]), JoystickType::None);
        assert_eq!(JoystickType::Fcs.resolve(&[]), JoystickType::Fcs);
    }

    #[test]
    fn test_button_wrap() {
        let wrapped = StickGroup::new(StickKind::TwoAxis, 0, 0, Some(&pad(2, 12, 0)), true);
        assert_eq!(wrapped.button_wrap(), 2);
        let unwrapped = StickGroup::new(StickKind::TwoAxis, 0, 0, Some(&pad(2, 12, 0)), false);
        assert_eq!(unwrapped.button_wrap(), 12);
        let no_buttons = StickGroup::new(StickKind::TwoAxis, 0, 0, Some(&pad(2, 0, 0)), false);
        assert_eq!(no_buttons.button_wrap(), 1);
    }

    #[test]
    fn test_axis_motion_switches_direction_lists() {
        let mut group = StickGroup::new(StickKind::TwoAxis, 0, 0, Some(&pad(2, 2, 0)), true);
        let motion = |value| RawEvent::AxisMotion {
            stick: 0,
            axis: 0,
            value,
        };

        let actions = group.check_event(&motion(20000)).unwrap();
        assert_eq!(actions.len(), 1);
        assert!(matches!(
            actions[0].op,
            ListOp::Activate {
                value: 20000,
                edge: false
            }
        ));

        let actions = group.check_event(&motion(i16::MIN)).unwrap();
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[0].op, ListOp::Deactivate { edge: false }));
        assert!(matches!(
            actions[1].op,
            ListOp::Activate {
                value: FULL_MAGNITUDE,
                ..
            }
        ));

        let actions = group.check_event(&motion(0)).unwrap();
        assert_eq!(actions.len(), 1);
        assert!(group.check_event(&motion(1)).unwrap().is_empty());
    }

    #[test]
    fn test_other_stick_not_claimed() {
        let mut group = StickGroup::new(StickKind::TwoAxis, 0, 0, Some(&pad(2, 2, 0)), true);
        let event = RawEvent::ButtonDown {
            stick: 1,
            button: 0,
        };
        assert!(group.check_event(&event).is_none());
        let key = RawEvent::FocusLost;
        assert!(group.check_event(&key).is_none());
    }

    #[test]
    fn test_wrapped_buttons_share_a_list() {
        let mut group = StickGroup::new(StickKind::TwoAxis, 0, 0, Some(&pad(2, 4, 0)), true);
        let down = |button| RawEvent::ButtonDown { stick: 0, button };
        let up = |button| RawEvent::ButtonUp { stick: 0, button };

        assert_eq!(group.check_event(&down(0)).unwrap().len(), 1);
        // Button 2 wraps onto slot 0, already pressed
        assert!(group.check_event(&down(2)).unwrap().is_empty());
        assert!(group.check_event(&up(0)).unwrap().is_empty());
        let actions = group.check_event(&up(2)).unwrap();
        assert!(matches!(actions[0].op, ListOp::Deactivate { edge: true }));
    }

    #[test]
    fn test_hat_diagonal_emits_per_direction() {
        let mut group = StickGroup::new(StickKind::FlightStick, 0, 0, Some(&pad(4, 4, 1)), true);
        let hat = |value| RawEvent::HatMotion {
            stick: 0,
            hat: 0,
            value,
        };
        assert_eq!(group.check_event(&hat(0x03)).unwrap().len(), 2);
        assert_eq!(group.check_event(&hat(0x02)).unwrap().len(), 1);
        assert_eq!(group.check_event(&hat(0x00)).unwrap().len(), 1);
    }

    #[test]
    fn test_create_event_bind() {
        let group = StickGroup::new(StickKind::TwoAxis, 0, 1, Some(&pad(2, 4, 1)), true);
        let weak = RawEvent::AxisMotion {
            stick: 0,
            axis: 1,
            value: 1000,
        };
        assert_eq!(group.create_event_bind(&weak), None);
        let strong = RawEvent::AxisMotion {
            stick: 0,
            axis: 1,
            value: -30000,
        };
        assert_eq!(
            group.create_event_bind(&strong),
            Some(BindInput::Axis {
                stick: 1,
                axis: 1,
                positive: false
            })
        );
        let button = RawEvent::ButtonDown {
            stick: 0,
            button: 3,
        };
        assert_eq!(
            group.create_event_bind(&button),
            Some(BindInput::Button {
                stick: 1,
                button: 1
            })
        );
        let diagonal = RawEvent::HatMotion {
            stick: 0,
            hat: 0,
            value: 0x0c,
        };
        assert_eq!(
            group.create_event_bind(&diagonal),
            Some(BindInput::Hat {
                stick: 1,
                hat: 0,
                direction: HatDirection::Down
            })
        );
    }

    #[test]
    fn test_parse_config_bounds() {
        let group = StickGroup::new(StickKind::TwoAxis, 0, 0, None, true);
        assert_eq!(
            group.parse_config(&["axis", "1", "0"]),
            Some((
                BindInput::Axis {
                    stick: 0,
                    axis: 1,
                    positive: false
                },
                3
            ))
        );
        assert_eq!(group.parse_config(&["axis", "2", "1"]), None);
        assert_eq!(group.parse_config(&["button", "2"]), None);
        assert_eq!(group.parse_config(&["button", "x"]), None);
        assert_eq!(group.parse_config(&["hat", "0", "1"]), None);

        let fcs = StickGroup::new(StickKind::FlightStick, 0, 0, None, true);
        assert_eq!(
            fcs.parse_config(&["HAT", "0", "8"]),
            Some((
                BindInput::Hat {
                    stick: 0,
                    hat: 0,
                    direction: HatDirection::Left
                },
                3
            ))
        );
        assert_eq!(fcs.parse_config(&["hat", "0", "0"]), None);
    }

    #[test]
    fn test_two_axis_update_pushes_changes_only() {
        let mut group = StickGroup::new(StickKind::TwoAxis, 0, 1, Some(&pad(2, 2, 0)), true);
        let recorder = Recorder::new();
        let mut sink = recorder.clone();
        let mut vjoy: [VirtualJoystick; MAX_STICKS] = Default::default();

        group.update(&vjoy, &mut sink, false, false);
        assert_eq!(recorder.take().len(), 4);

        vjoy[1].button_pressed[3] = true;
        vjoy[1].axis_pos[0] = -16384;
        group.update(&vjoy, &mut sink, false, false);
        assert_eq!(
            recorder.take(),
            vec![
                SinkCall::Button {
                    stick: 1,
                    button: 1,
                    pressed: true
                },
                SinkCall::Axis {
                    stick: 1,
                    axis: 0,
                    position: -0.5
                },
            ]
        );

        group.update(&vjoy, &mut sink, false, false);
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn test_autofire_toggles_on_tick() {
        let mut group = StickGroup::new(StickKind::TwoAxis, 0, 0, Some(&pad(2, 2, 0)), true);
        let recorder = Recorder::new();
        let mut sink = recorder.clone();
        let mut vjoy: [VirtualJoystick; MAX_STICKS] = Default::default();
        vjoy[0].button_pressed[0] = true;

        group.update(&vjoy, &mut sink, true, true);
        recorder.take();
        group.update(&vjoy, &mut sink, true, false);
        assert!(recorder.take().is_empty());
        group.update(&vjoy, &mut sink, true, true);
        assert_eq!(
            recorder.take(),
            vec![SinkCall::Button {
                stick: 0,
                button: 0,
                pressed: false
            }]
        );
    }

    #[test]
    fn test_dummy_group_never_pushes() {
        let mut group = StickGroup::new(StickKind::TwoAxis, 1, 1, None, true);
        let recorder = Recorder::new();
        let mut sink = recorder.clone();
        let vjoy: [VirtualJoystick; MAX_STICKS] = Default::default();
        group.update(&vjoy, &mut sink, false, true);
        assert!(recorder.calls().is_empty());
        assert_eq!(group.bind_start(), "[missing joystick]");
    }

    #[test]
    fn test_fcs_hat_positions() {
        assert_eq!(fcs_hat_position(0, 0.0), 1.0);
        assert_eq!(fcs_hat_position(0x01, 0.0), -1.0);
        assert_eq!(fcs_hat_position(0x02, 0.0), -0.5);
        assert_eq!(fcs_hat_position(0x04, 0.0), 0.0);
        assert_eq!(fcs_hat_position(0x08, 0.0), 0.5);
        assert_eq!(fcs_hat_position(0x09, -1.0), 0.5);
        assert_eq!(fcs_hat_position(0x09, 0.5), -1.0);
        assert_eq!(fcs_hat_position(0x0c, 0.5), 0.0);
    }

    #[test]
    fn test_ch_hub_encodes_lowest_bit() {
        let mut group = StickGroup::new(StickKind::GameportHub, 0, 0, Some(&pad(4, 6, 1)), true);
        let recorder = Recorder::new();
        let mut sink = recorder.clone();
        let mut vjoy: [VirtualJoystick; MAX_STICKS] = Default::default();
        group.update(&vjoy, &mut sink, false, false);
        recorder.take();

        // Button 2 is 0x10: lowest set bit 4 → second stick, first button
        vjoy[0].button_pressed[2] = true;
        group.update(&vjoy, &mut sink, false, false);
        assert_eq!(
            recorder.take(),
            vec![SinkCall::Button {
                stick: 1,
                button: 0,
                pressed: true
            }]
        );

        // Button 0 is 0x02 and wins over button 2: code 1
        vjoy[0].button_pressed[0] = true;
        group.update(&vjoy, &mut sink, false, false);
        assert_eq!(
            recorder.take(),
            vec![
                SinkCall::Button {
                    stick: 0,
                    button: 0,
                    pressed: true
                },
                SinkCall::Button {
                    stick: 1,
                    button: 0,
                    pressed: false
                },
            ]
        );
    }
}
