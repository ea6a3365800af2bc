//! Dispatch tests across groups, events and sinks

use std::cell::RefCell;
use std::rc::Rc;

use super::*;

fn keyboard_only() -> (BindingDirectory, Recorder) {
    let keys = Recorder::new();
    let options = MapperOptions {
        translation: Translation::Scancodes(HostLayout::Xorg),
        ..Default::default()
    };
    let dir = BindingDirectory::new(options, Box::new(keys.clone()), Box::new(NullSink));
    (dir, keys)
}

fn with_pad() -> (BindingDirectory, Recorder) {
    let pad = Recorder::new();
    let options = MapperOptions {
        translation: Translation::Scancodes(HostLayout::Xorg),
        joystick_type: JoystickType::FourAxis,
        sticks: vec![HostStick::new("Pad", 4, 6, 1)],
        ..Default::default()
    };
    let mut dir = BindingDirectory::new(options, Box::new(NullSink), Box::new(pad.clone()));
    dir.init(None);
    dir.tick();
    pad.take();
    (dir, pad)
}

fn down(dir: &mut BindingDirectory, scancode: Scancode) {
    dir.process_raw_event(&RawEvent::KeyDown { scancode });
}

fn up(dir: &mut BindingDirectory, scancode: Scancode) {
    dir.process_raw_event(&RawEvent::KeyUp { scancode });
}

fn bind(dir: &mut BindingDirectory, event: &str, token: &str) -> BindId {
    let id = dir.find_event(event).unwrap();
    dir.bind_from_token(id, token).unwrap()
}

fn is_active(dir: &BindingDirectory, event: &str) -> bool {
    let id = dir.find_event(event).unwrap();
    dir.event(id).unwrap().is_active()
}

#[test]
fn test_key_press_and_release() {
    let (mut dir, keys) = keyboard_only();
    dir.init(None);
    down(&mut dir, Scancode::A);
    up(&mut dir, Scancode::A);
    assert_eq!(keys.keys(), vec![(KbdKey::A, true), (KbdKey::A, false)]);
}

#[test]
fn test_two_binds_count_as_one_press() {
    let (mut dir, keys) = keyboard_only();
    bind(&mut dir, "key_a", "key 4");
    bind(&mut dir, "key_a", "key 5");

    down(&mut dir, Scancode::A);
    down(&mut dir, Scancode::B);
    up(&mut dir, Scancode::A);
    assert!(is_active(&dir, "key_a"));
    up(&mut dir, Scancode::B);

    assert_eq!(keys.keys(), vec![(KbdKey::A, true), (KbdKey::A, false)]);
}

#[test]
fn test_modifier_bind_shadows_plain_bind() {
    let (mut dir, keys) = keyboard_only();
    dir.init(None);
    bind(&mut dir, "key_b", "key 4 mod1");

    down(&mut dir, Scancode::LCTRL);
    assert!(dir.modifiers().contains(Modifiers::MOD1));
    down(&mut dir, Scancode::A);
    up(&mut dir, Scancode::A);
    up(&mut dir, Scancode::LCTRL);
    assert!(dir.modifiers().is_empty());

    assert_eq!(
        keys.keys(),
        vec![
            (KbdKey::LeftCtrl, true),
            (KbdKey::B, true),
            (KbdKey::B, false),
            (KbdKey::LeftCtrl, false),
        ]
    );

    keys.take();
    down(&mut dir, Scancode::A);
    assert_eq!(keys.keys(), vec![(KbdKey::A, true)]);
}

#[test]
fn test_hold_bind_latches() {
    let (mut dir, keys) = keyboard_only();
    let id = bind(&mut dir, "key_c", "key 6 hold");

    down(&mut dir, Scancode::C);
    up(&mut dir, Scancode::C);
    assert!(dir.is_latched(id));
    assert_eq!(keys.keys(), vec![(KbdKey::C, true)]);

    down(&mut dir, Scancode::C);
    assert!(is_active(&dir, "key_c"));
    up(&mut dir, Scancode::C);
    assert!(!dir.is_latched(id));
    assert_eq!(keys.keys(), vec![(KbdKey::C, true), (KbdKey::C, false)]);
}

#[test]
fn test_plain_release_keeps_latched_event_pressed() {
    let (mut dir, keys) = keyboard_only();
    let latched = bind(&mut dir, "key_a", "key 4 hold");
    bind(&mut dir, "key_a", "key 5");

    down(&mut dir, Scancode::A);
    up(&mut dir, Scancode::A);
    assert!(dir.is_latched(latched));
    down(&mut dir, Scancode::B);
    up(&mut dir, Scancode::B);
    assert!(is_active(&dir, "key_a"));
    assert_eq!(keys.keys(), vec![(KbdKey::A, true)]);

    down(&mut dir, Scancode::A);
    up(&mut dir, Scancode::A);
    assert!(!is_active(&dir, "key_a"));
    assert_eq!(keys.keys(), vec![(KbdKey::A, true), (KbdKey::A, false)]);
}

#[test]
fn test_clearing_hold_on_latched_bind_releases_it() {
    let (mut dir, keys) = keyboard_only();
    let id = bind(&mut dir, "key_c", "key 6 hold");
    down(&mut dir, Scancode::C);
    up(&mut dir, Scancode::C);
    assert!(dir.is_latched(id));

    let event = dir.find_event("key_c").unwrap();
    assert!(dir.editor_select_event(event));
    assert!(dir.editor_toggle_hold());
    assert!(!dir.is_latched(id));
    assert!(!dir.bind(id).unwrap().is_holding());
    assert!(!is_active(&dir, "key_c"));
    assert_eq!(keys.take().len(), 2);

    for _ in 0..3 {
        down(&mut dir, Scancode::C);
        up(&mut dir, Scancode::C);
    }
    let presses = keys.keys().iter().filter(|(_, pressed)| *pressed).count();
    assert_eq!(presses, 3);
    assert!(!is_active(&dir, "key_c"));
}

#[test]
fn test_keys_on_axis_repost_opposite_direction() {
    let (mut dir, _) = keyboard_only();
    bind(&mut dir, "jaxis_0_0-", "key 80");
    bind(&mut dir, "jaxis_0_0+", "key 79");
    let axis = |dir: &BindingDirectory| dir.virtual_joystick(0).unwrap().axis_pos[0];

    down(&mut dir, Scancode::LEFT);
    assert_eq!(axis(&dir), -32767);
    down(&mut dir, Scancode::RIGHT);
    assert_eq!(axis(&dir), 32767);
    up(&mut dir, Scancode::RIGHT);
    assert_eq!(axis(&dir), -32767);
    up(&mut dir, Scancode::LEFT);
    assert_eq!(axis(&dir), 0);
}

#[test]
fn test_analog_axis_reaches_gameport() {
    let (mut dir, pad) = with_pad();
    dir.process_raw_event(&RawEvent::AxisMotion {
        stick: 0,
        axis: 0,
        value: -16384,
    });
    assert_eq!(dir.virtual_joystick(0).unwrap().axis_pos[0], -16384);
    assert_eq!(
        pad.take(),
        vec![SinkCall::Axis {
            stick: 0,
            axis: 0,
            position: -0.5
        }]
    );

    dir.process_raw_event(&RawEvent::AxisMotion {
        stick: 0,
        axis: 0,
        value: 0,
    });
    assert_eq!(
        pad.take(),
        vec![SinkCall::Axis {
            stick: 0,
            axis: 0,
            position: 0.0
        }]
    );
}

#[test]
fn test_buttons_reach_gameport() {
    let (mut dir, pad) = with_pad();
    dir.process_raw_event(&RawEvent::ButtonDown {
        stick: 0,
        button: 3,
    });
    assert_eq!(
        pad.take(),
        vec![SinkCall::Button {
            stick: 1,
            button: 1,
            pressed: true
        }]
    );
    dir.process_raw_event(&RawEvent::ButtonUp {
        stick: 0,
        button: 3,
    });
    assert!(!dir.virtual_joystick(0).unwrap().button_pressed[3]);
}

#[test]
fn test_unbound_stick_is_ignored() {
    let (mut dir, pad) = with_pad();
    let claimed = dir.process_raw_event(&RawEvent::ButtonDown {
        stick: 1,
        button: 0,
    });
    assert!(!claimed);
    assert!(pad.calls().is_empty());
}

#[test]
fn test_focus_lost_keeps_lock_keys() {
    let (mut dir, keys) = keyboard_only();
    dir.init(None);
    down(&mut dir, Scancode::A);
    down(&mut dir, Scancode::CAPSLOCK);
    keys.take();

    dir.process_raw_event(&RawEvent::FocusLost);
    assert_eq!(keys.keys(), vec![(KbdKey::A, false)]);
    assert!(is_active(&dir, "key_capslock"));
    assert!(!is_active(&dir, "key_a"));
}

#[test]
fn test_focus_lost_releases_latched_hold() {
    let (mut dir, keys) = keyboard_only();
    let id = bind(&mut dir, "key_c", "key 6 hold");
    down(&mut dir, Scancode::C);
    up(&mut dir, Scancode::C);
    keys.take();

    dir.process_raw_event(&RawEvent::FocusLost);
    assert_eq!(keys.keys(), vec![(KbdKey::C, false)]);
    assert!(!dir.is_latched(id));
    assert!(!is_active(&dir, "key_c"));

    down(&mut dir, Scancode::C);
    assert_eq!(keys.keys(), vec![(KbdKey::C, false), (KbdKey::C, true)]);
}

#[test]
fn test_lock_state_replay() {
    let (mut dir, keys) = keyboard_only();
    dir.init(None);
    dir.replay_lock_state(true, false, false);
    assert_eq!(
        keys.take(),
        vec![
            SinkCall::Key {
                key: KbdKey::CapsLock,
                pressed: true
            },
            SinkCall::Key {
                key: KbdKey::CapsLock,
                pressed: false
            },
        ]
    );

    dir.replay_lock_state(false, true, true);
    assert!(keys.calls().is_empty());
    assert!(is_active(&dir, "key_numlock"));
}

#[test]
fn test_handler_runs_on_press_and_release() {
    let (mut dir, keys) = keyboard_only();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let log = calls.clone();
    dir.register_handler(
        move |pressed| log.borrow_mut().push(pressed),
        Scancode::F9,
        Modifiers::MOD1,
        "shutdown",
        "Shutdown",
    );
    dir.init(None);

    down(&mut dir, Scancode::RCTRL);
    down(&mut dir, Scancode::F9);
    up(&mut dir, Scancode::F9);
    assert_eq!(*calls.borrow(), vec![true, false]);
    assert!(!keys.keys().iter().any(|(key, _)| *key == KbdKey::F9));
}

#[test]
fn test_mapper_handler_requests_editor_on_release() {
    let (mut dir, _) = keyboard_only();
    dir.init(None);
    down(&mut dir, Scancode::LCTRL);
    down(&mut dir, Scancode::F1);
    assert!(!dir.take_editor_request());
    up(&mut dir, Scancode::F1);
    assert!(dir.take_editor_request());
    assert!(!dir.take_editor_request());
}

#[test]
fn test_open_editor_releases_held_keys() {
    let (mut dir, keys) = keyboard_only();
    dir.init(None);
    down(&mut dir, Scancode::A);
    keys.take();
    dir.open_editor();
    assert_eq!(
        keys.take(),
        vec![
            SinkCall::ClearBuffer,
            SinkCall::Key {
                key: KbdKey::A,
                pressed: false
            },
        ]
    );
}

#[test]
fn test_autofire_toggles_per_tick() {
    let pad = Recorder::new();
    let options = MapperOptions {
        joystick_type: JoystickType::TwoAxis,
        sticks: vec![HostStick::new("Pad", 2, 2, 0)],
        autofire: true,
        ..Default::default()
    };
    let mut dir = BindingDirectory::new(options, Box::new(NullSink), Box::new(pad.clone()));
    dir.init(None);
    dir.process_raw_event(&RawEvent::ButtonDown {
        stick: 0,
        button: 0,
    });
    pad.take();

    let mut states = Vec::new();
    for _ in 0..3 {
        dir.tick();
        for call in pad.take() {
            if let SinkCall::Button { pressed, .. } = call {
                states.push(pressed);
            }
        }
    }
    assert_eq!(states, vec![true, false, true]);
}

#[test]
fn test_poll_stops_at_quit() {
    let (mut dir, keys) = keyboard_only();
    dir.init(None);
    let mut source: std::collections::VecDeque<RawEvent> = [
        RawEvent::KeyDown {
            scancode: Scancode::A,
        },
        RawEvent::Quit,
        RawEvent::KeyUp {
            scancode: Scancode::A,
        },
    ]
    .into();
    assert_eq!(dir.poll_and_dispatch_all(&mut source), PollOutcome::Quit);
    assert_eq!(keys.keys(), vec![(KbdKey::A, true)]);
    assert_eq!(source.len(), 1);
}
