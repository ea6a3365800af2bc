//! keymapper - input mapper for emulated PC keyboards and gameport joysticks
//!
//! This crate binds host keyboard keys and joystick inputs to the logical
//! events of an emulated machine, persists those bindings in a mapper file,
//! and dispatches host input through them.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod mapper;
pub mod replay;
pub mod tracing;

// Re-export commonly used types
pub use config::MapperSettings;
pub use mapper::{BindingDirectory, MapperOptions, RawEvent};
