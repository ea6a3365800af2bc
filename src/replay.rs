//! Replay scripts: raw input events written as text
//!
//! ```text
//! # press and release A
//! down 4
//! up 4
//! axis 0 1 -20000
//! press 0 2
//! release 0 2
//! hat 0 0 1
//! focus-lost
//! quit
//! ```
//!
//! Keys are USB HID usage codes, as in mapper files.

use std::collections::VecDeque;
use std::fmt;

use crate::mapper::{EventSource, RawEvent, Scancode};

/// A script line that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ScriptError {}

fn number<T: std::str::FromStr>(word: Option<&str>, what: &str) -> Result<T, String> {
    let word = word.ok_or_else(|| format!("missing {}", what))?;
    word.parse()
        .map_err(|_| format!("invalid {} '{}'", what, word))
}

fn parse_script_line(line: &str) -> Result<Option<RawEvent>, String> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };

    let event = match command.to_ascii_lowercase().as_str() {
        "down" => RawEvent::KeyDown {
            scancode: Scancode(number(words.next(), "scancode")?),
        },
        "up" => RawEvent::KeyUp {
            scancode: Scancode(number(words.next(), "scancode")?),
        },
        "axis" => RawEvent::AxisMotion {
            stick: number(words.next(), "stick")?,
            axis: number(words.next(), "axis")?,
            value: number(words.next(), "axis value")?,
        },
        "press" => RawEvent::ButtonDown {
            stick: number(words.next(), "stick")?,
            button: number(words.next(), "button")?,
        },
        "release" => RawEvent::ButtonUp {
            stick: number(words.next(), "stick")?,
            button: number(words.next(), "button")?,
        },
        "hat" => RawEvent::HatMotion {
            stick: number(words.next(), "stick")?,
            hat: number(words.next(), "hat")?,
            value: number(words.next(), "hat mask")?,
        },
        "focus-lost" => RawEvent::FocusLost,
        "quit" => RawEvent::Quit,
        other => return Err(format!("unknown command '{}'", other)),
    };

    if let Some(extra) = words.next() {
        return Err(format!("unexpected '{}'", extra));
    }
    Ok(Some(event))
}

/// Parse a whole script, stopping at the first bad line
pub fn parse_script(text: &str) -> Result<Vec<RawEvent>, ScriptError> {
    let mut events = Vec::new();
    for (index, line) in text.lines().enumerate() {
        match parse_script_line(line) {
            Ok(Some(event)) => events.push(event),
            Ok(None) => {}
            Err(message) => {
                return Err(ScriptError {
                    line: index + 1,
                    message,
                })
            }
        }
    }
    Ok(events)
}

/// Event source fed from a parsed script
#[derive(Debug, Clone, Default)]
pub struct ScriptSource {
    pending: VecDeque<RawEvent>,
}

impl ScriptSource {
    pub fn new(events: Vec<RawEvent>) -> Self {
        Self {
            pending: events.into(),
        }
    }

    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        parse_script(text).map(Self::new)
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl EventSource for ScriptSource {
    fn poll_event(&mut self) -> Option<RawEvent> {
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_commands() {
        let events = parse_script(
            "# comment\n\
             down 4\n\
             UP 4   # trailing\n\
             axis 0 1 -20000\n\
             press 1 0\n\
             release 1 0\n\
             hat 0 0 12\n\
             \n\
             focus-lost\n\
             quit\n",
        )
        .unwrap();
        assert_eq!(
            events,
            vec![
                RawEvent::KeyDown {
                    scancode: Scancode::A
                },
                RawEvent::KeyUp {
                    scancode: Scancode::A
                },
                RawEvent::AxisMotion {
                    stick: 0,
                    axis: 1,
                    value: -20000
                },
                RawEvent::ButtonDown {
                    stick: 1,
                    button: 0
                },
                RawEvent::ButtonUp {
                    stick: 1,
                    button: 0
                },
                RawEvent::HatMotion {
                    stick: 0,
                    hat: 0,
                    value: 12
                },
                RawEvent::FocusLost,
                RawEvent::Quit,
            ]
        );
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse_script("down 4\nwiggle 3\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.to_string(), "line 2: unknown command 'wiggle'");

        let err = parse_script("axis 0 1 40000").unwrap_err();
        assert_eq!(err.message, "invalid axis value '40000'");

        let err = parse_script("press 0").unwrap_err();
        assert_eq!(err.message, "missing button");

        let err = parse_script("up 4 5").unwrap_err();
        assert_eq!(err.message, "unexpected '5'");
    }

    #[test]
    fn test_script_source_drains_in_order() {
        let mut source = ScriptSource::parse("down 4\nup 4").unwrap();
        assert_eq!(source.remaining(), 2);
        assert!(matches!(source.poll_event(), Some(RawEvent::KeyDown { .. })));
        assert!(matches!(source.poll_event(), Some(RawEvent::KeyUp { .. })));
        assert!(source.poll_event().is_none());
    }
}
