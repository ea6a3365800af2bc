//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use keymapper::mapper::{
    BindingDirectory, EventId, HostLayout, HostStick, JoystickType, MapperOptions, RawEvent,
    Recorder, Scancode, Translation,
};

/// Directory with a keyboard only, recording into one recorder
pub fn keyboard_directory() -> (BindingDirectory, Recorder) {
    directory_with(MapperOptions {
        translation: Translation::Scancodes(HostLayout::Xorg),
        ..Default::default()
    })
}

/// Directory with one 4axis stick (4 axes, 6 buttons, 1 hat)
pub fn pad_directory() -> (BindingDirectory, Recorder) {
    directory_with(MapperOptions {
        translation: Translation::Scancodes(HostLayout::Xorg),
        joystick_type: JoystickType::FourAxis,
        sticks: vec![HostStick::new("Test pad", 4, 6, 1)],
        ..Default::default()
    })
}

pub fn directory_with(options: MapperOptions) -> (BindingDirectory, Recorder) {
    let recorder = Recorder::new();
    let dir = BindingDirectory::new(
        options,
        Box::new(recorder.clone()),
        Box::new(recorder.clone()),
    );
    (dir, recorder)
}

pub fn event(dir: &BindingDirectory, name: &str) -> EventId {
    dir.find_event(name)
        .unwrap_or_else(|| panic!("no event named {}", name))
}

/// Config tokens of an event's binds, newest first
pub fn tokens(dir: &BindingDirectory, name: &str) -> Vec<String> {
    let id = event(dir, name);
    dir.binds_of(id).map(|b| b.config_token()).collect()
}

pub fn tap(dir: &mut BindingDirectory, scancode: Scancode) {
    dir.process_raw_event(&RawEvent::KeyDown { scancode });
    dir.process_raw_event(&RawEvent::KeyUp { scancode });
}
