//! Input mapper: host keyboards and joysticks onto emulated PC input
//!
//! Physical inputs are attached to named logical events through binds.
//! Events drive the emulated keyboard, the mapper modifiers, registered
//! handlers, or two virtual joysticks that are pushed to the gameport.
//!
//! # Architecture
//!
//! ```text
//! winit::WindowEvent ─┐
//! replay script ──────┴→ RawEvent → BindGroup::check_event() → bind lists
//!                                                                  │
//!                      BindingDirectory::activate/deactivate ←─────┘
//!                                   │
//!        ┌──────────────┬───────────┼──────────────┬────────────────┐
//!   KeyboardSink    Modifiers    handlers    VirtualJoystick → JoystickSink
//! ```
//!
//! # Bindings
//!
//! ```ignore
//! let mut mapper = BindingDirectory::new(options, Box::new(keyboard), Box::new(gameport));
//! mapper.init(Some(&mapper_file));
//! mapper.poll_and_dispatch_all(&mut source);
//! ```

mod binding;
mod defaults;
mod directory;
mod editor;
mod event;
mod file;
mod group;
mod layout;
mod raw;
mod scancode;
mod sink;
mod stick;
mod types;
mod winit_adapter;

pub use binding::{parse_flags, Bind, BindInput};
pub use defaults::{default_bindings, HandlerDefault};
pub use directory::{BindingDirectory, HandlerFn, InitSource, MapperOptions, PollOutcome};
pub use editor::{
    EditorState, STATUS_AWAITING_INPUT, STATUS_SAVED, STATUS_SELECT_BIND, STATUS_SELECT_EVENT,
};
pub use event::{Event, EventAction, EventKind};
pub use file::{LoadReport, MapperFileError};
pub use group::{BindGroup, KeyGroup};
pub use layout::{
    KbdKey, KeyEntry, JOYSTICK_LAYOUT, KEY_LAYOUT, LOCK_KEY_EVENTS, MAX_EVENT_NAME, MAX_STICKS,
};
pub use raw::{EventSource, HostStick, RawEvent};
pub use scancode::{CanonicalKey, HostLayout, Scancode, ScancodeTranslator, Translation};
pub use sink::{JoystickSink, KeyboardSink, NullSink, Recorder, SinkCall, TracingSink};
pub use stick::{JoystickType, StickGroup, StickKind, VirtualJoystick};
pub use types::{
    BindFlags, BindId, EventId, HatDirection, Modifiers, ACTIVATION_THRESHOLD, FULL_MAGNITUDE,
    MAX_ACTIVITY,
};
pub use winit_adapter::{raw_event_from_window_event, scancode_from_physical};

#[cfg(test)]
mod tests;
