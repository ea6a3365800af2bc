//! Event: a named logical input of the emulated machine

use super::layout::KbdKey;
use super::types::{BindId, EventId, HatDirection, Modifiers, MAX_ACTIVITY};

/// What an event drives when it turns on or off
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventAction {
    /// Key of the emulated keyboard
    Key(KbdKey),
    /// One of the mapper modifiers
    Modifier(Modifiers),
    /// Registered handler, by slot in the handler table
    Handler(usize),
    JoyButton {
        stick: u8,
        button: u8,
    },
    JoyAxis {
        stick: u8,
        axis: u8,
        positive: bool,
    },
    JoyHat {
        stick: u8,
        hat: u8,
        direction: HatDirection,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// Digital: on above the threshold, off when every contributor clears
    Triggered,
    /// Analog axis direction paired with its opposite
    Continuous,
}

/// Result of releasing a continuous event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AxisRelease {
    Idle,
    /// Report the axis as centered
    Center,
    /// The opposite direction is still held; report it again
    RepostOpposite,
}

#[derive(Clone, Debug)]
pub struct Event {
    name: String,
    action: EventAction,
    /// Newest bind first
    pub(crate) binds: Vec<BindId>,
    activity: u16,
    value: i32,
    opposite: Option<EventId>,
}

impl Event {
    pub(crate) fn new(name: String, action: EventAction) -> Self {
        Self {
            name,
            action,
            binds: Vec::new(),
            activity: 0,
            value: 0,
            opposite: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action(&self) -> EventAction {
        self.action
    }

    pub fn kind(&self) -> EventKind {
        match self.action {
            EventAction::JoyAxis { .. } => EventKind::Continuous,
            _ => EventKind::Triggered,
        }
    }

    pub fn binds(&self) -> &[BindId] {
        &self.binds
    }

    pub fn activity(&self) -> u16 {
        self.activity
    }

    pub fn is_active(&self) -> bool {
        self.activity > 0
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub(crate) fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    pub fn opposite(&self) -> Option<EventId> {
        self.opposite
    }

    pub(crate) fn set_opposite(&mut self, opposite: EventId) {
        self.opposite = Some(opposite);
    }

    pub(crate) fn add_bind(&mut self, bind: BindId) {
        self.binds.insert(0, bind);
    }

    pub(crate) fn remove_bind(&mut self, bind: BindId) -> Option<usize> {
        let pos = self.binds.iter().position(|&id| id == bind)?;
        self.binds.remove(pos);
        Some(pos)
    }

    /// A contributor crossed the threshold.
    ///
    /// Returns `Some(true)` on the inactive → active transition unless the
    /// effect is suppressed.
    pub(crate) fn trigger_on(&mut self, skip_effect: bool) -> Option<bool> {
        let fire = (self.activity == 0 && !skip_effect).then_some(true);
        if self.activity < MAX_ACTIVITY {
            self.activity += 1;
        }
        fire
    }

    /// A contributor cleared. Returns `Some(false)` when the last one goes.
    pub(crate) fn trigger_off(&mut self) -> Option<bool> {
        if self.activity == 0 {
            return None;
        }
        self.activity -= 1;
        (self.activity == 0).then_some(false)
    }

    /// Axis activation; `opposite_activity` is the paired direction's count.
    pub(crate) fn axis_on(&mut self, edge: bool, skip_effect: bool, opposite_activity: u16) -> bool {
        if edge {
            if self.activity < MAX_ACTIVITY {
                self.activity += 1;
            }
            !skip_effect
        } else {
            (self.activity | opposite_activity) == 0
        }
    }

    pub(crate) fn axis_off(&mut self, edge: bool, opposite_activity: u16) -> AxisRelease {
        if edge {
            if self.activity > 0 {
                self.activity -= 1;
            }
            if self.activity > 0 {
                AxisRelease::Idle
            } else if opposite_activity > 0 {
                AxisRelease::RepostOpposite
            } else {
                AxisRelease::Center
            }
        } else if (self.activity | opposite_activity) == 0 {
            AxisRelease::Center
        } else {
            AxisRelease::Idle
        }
    }

    /// Forget contributors whose binds vanished, e.g. after clearing binds
    pub(crate) fn reset_activity(&mut self) {
        self.activity = 0;
        self.value = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event() -> Event {
        Event::new("key_a".into(), EventAction::Key(KbdKey::A))
    }

    fn axis_event() -> Event {
        Event::new(
            "jaxis_0_0+".into(),
            EventAction::JoyAxis {
                stick: 0,
                axis: 0,
                positive: true,
            },
        )
    }

    #[test]
    fn test_triggered_fires_once_per_transition() {
        let mut ev = key_event();
        assert_eq!(ev.trigger_on(false), Some(true));
        assert_eq!(ev.trigger_on(false), None);
        assert_eq!(ev.activity(), 2);
        assert_eq!(ev.trigger_off(), None);
        assert_eq!(ev.trigger_off(), Some(false));
        assert_eq!(ev.trigger_off(), None);
        assert_eq!(ev.activity(), 0);
    }

    #[test]
    fn test_triggered_skip_effect_still_counts() {
        let mut ev = key_event();
        assert_eq!(ev.trigger_on(true), None);
        assert!(ev.is_active());
        assert_eq!(ev.trigger_off(), Some(false));
    }

    #[test]
    fn test_activity_saturates() {
        let mut ev = key_event();
        for _ in 0..(MAX_ACTIVITY as u32 + 10) {
            ev.trigger_on(false);
        }
        assert_eq!(ev.activity(), MAX_ACTIVITY);
    }

    #[test]
    fn test_axis_edge_release_reposts_opposite() {
        let mut ev = axis_event();
        assert!(ev.axis_on(true, false, 0));
        assert_eq!(ev.axis_off(true, 1), AxisRelease::RepostOpposite);
        assert!(ev.axis_on(true, false, 0));
        assert_eq!(ev.axis_off(true, 0), AxisRelease::Center);
    }

    #[test]
    fn test_axis_analog_defers_to_edge_contributors() {
        let mut ev = axis_event();
        assert!(ev.axis_on(false, false, 0));
        assert!(!ev.axis_on(false, false, 1));
        assert_eq!(ev.axis_off(false, 1), AxisRelease::Idle);
        assert_eq!(ev.axis_off(false, 0), AxisRelease::Center);
    }

    #[test]
    fn test_binds_newest_first() {
        let mut ev = key_event();
        ev.add_bind(BindId(1));
        ev.add_bind(BindId(2));
        assert_eq!(ev.binds(), &[BindId(2), BindId(1)]);
        assert_eq!(ev.remove_bind(BindId(1)), Some(1));
        assert_eq!(ev.remove_bind(BindId(7)), None);
    }

    #[test]
    fn test_kind() {
        assert_eq!(key_event().kind(), EventKind::Triggered);
        assert_eq!(axis_event().kind(), EventKind::Continuous);
    }
}
