//! Mapper file format
//!
//! ```text
//! key_a "key 4" "key 30 mod1 hold"
//! jaxis_0_1- "stick_0 axis 1 0"
//! ```
//!
//! One event per line: the event name followed by one quoted token per bind.
//! A token is a group keyword, its descriptor words and optional flags.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Errors reading or writing a mapper file
#[derive(Debug)]
pub enum MapperFileError {
    IoError(String),
}

impl fmt::Display for MapperFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapperFileError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for MapperFileError {}

/// Counters from loading a mapper file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Non-empty lines read
    pub lines: usize,
    /// Binds created
    pub binds: usize,
    /// Lines skipped because their event does not exist
    pub unknown_events: usize,
    /// Tokens no group accepted
    pub rejected_tokens: usize,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.unknown_events == 0 && self.rejected_tokens == 0
    }
}

/// Split the next word off `rest`. Double quotes group words; the quotes
/// are not part of the result.
pub(crate) fn strip_word<'a>(rest: &mut &'a str) -> Option<&'a str> {
    let text = rest.trim_start();
    if text.is_empty() {
        *rest = text;
        return None;
    }

    if let Some(quoted) = text.strip_prefix('"') {
        match quoted.find('"') {
            Some(end) => {
                *rest = &quoted[end + 1..];
                Some(&quoted[..end])
            }
            None => {
                *rest = "";
                Some(quoted)
            }
        }
    } else {
        let end = text.find(char::is_whitespace).unwrap_or(text.len());
        *rest = &text[end..];
        Some(&text[..end])
    }
}

/// A mapper file line split into its event name and bind tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MapperLine<'a> {
    pub event: &'a str,
    pub tokens: Vec<&'a str>,
}

pub(crate) fn parse_line(line: &str) -> Option<MapperLine<'_>> {
    let mut rest = line.trim();
    let event = strip_word(&mut rest)?;
    let mut tokens = Vec::new();
    while let Some(token) = strip_word(&mut rest) {
        if !token.trim().is_empty() {
            tokens.push(token);
        }
    }
    Some(MapperLine { event, tokens })
}

/// Format one event line
pub(crate) fn format_line<'a>(event: &str, tokens: impl IntoIterator<Item = &'a str>) -> String {
    let mut line = event.to_string();
    for token in tokens {
        line.push_str(" \"");
        line.push_str(token);
        line.push('"');
    }
    line
}

/// Replace `path` with `contents` through a temporary sibling file, so a
/// failed write leaves the previous file intact.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), MapperFileError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            MapperFileError::IoError(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let result = fs::File::create(tmp_path)
        .and_then(|mut file| {
            file.write_all(contents.as_bytes())?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(tmp_path, path));

    result.map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        MapperFileError::IoError(format!("Failed to write {}: {}", path.display(), e))
    })
}
