//! Command-line argument parsing
//!
//! Supports:
//! - Dumping, saving and resetting the mapper file
//! - Replaying a raw-event script through the mapper
//! - Watching live keyboard input in a window
//! - Describing host sticks, since the binary has no joystick backend

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::mapper::HostStick;

/// Input mapper for emulated PC keyboards and gameport joysticks
#[derive(Parser, Debug)]
#[command(
    name = "keymapper",
    version,
    about = "Input mapper for emulated PC keyboards and gameport joysticks"
)]
pub struct CliArgs {
    /// Settings file (default: ~/.config/keymapper/config.yaml)
    #[arg(long, value_name = "FILE", global = true)]
    pub settings: Option<PathBuf>,

    /// Mapper file, overriding the settings
    #[arg(long, value_name = "FILE", global = true)]
    pub mapperfile: Option<PathBuf>,

    /// Host joystick as AXES,BUTTONS,HATS; repeat for more sticks
    #[arg(
        long = "stick",
        value_name = "AXES,BUTTONS,HATS",
        value_parser = parse_stick,
        global = true
    )]
    pub sticks: Vec<(u8, u8, u8)>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the effective mapper file
    Dump,
    /// Write the effective bindings to the mapper file
    Save,
    /// Delete the mapper file so defaults apply on next start
    Reset,
    /// Feed a raw-event script through the mapper and print every effect
    Replay {
        /// Script file, one event per line
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Host Caps Lock is on at start
        #[arg(long)]
        caps_lock: bool,

        /// Host Num Lock is on at start
        #[arg(long)]
        num_lock: bool,
    },
    /// Open a window and log mapped keyboard input until it closes
    Watch,
    /// Print the effective settings
    Settings {
        /// Also write them to the settings file
        #[arg(long)]
        write: bool,
    },
}

/// Parse `AXES,BUTTONS,HATS`
pub fn parse_stick(value: &str) -> Result<(u8, u8, u8), String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let &[axes, buttons, hats] = parts.as_slice() else {
        return Err(format!("expected AXES,BUTTONS,HATS, got '{}'", value));
    };
    let number = |s: &str| {
        s.parse::<u8>()
            .map_err(|_| format!("invalid count '{}' in '{}'", s, value))
    };
    Ok((number(axes)?, number(buttons)?, number(hats)?))
}

impl CliArgs {
    /// Host sticks described on the command line, in order
    pub fn host_sticks(&self) -> Vec<HostStick> {
        self.sticks
            .iter()
            .enumerate()
            .map(|(i, &(axes, buttons, hats))| {
                HostStick::new(format!("Joystick {}", i), axes, buttons, hats)
            })
            .collect()
    }
}
