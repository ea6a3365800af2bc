//! Bind groups: one adapter per class of physical input
//!
//! Groups own the bind lists indexed by physical input, recognize raw events
//! of their class, and create binds from raw events (editor) or from mapper
//! file tokens (load).

use super::binding::BindInput;
use super::raw::RawEvent;
use super::scancode::{Scancode, ScancodeTranslator};
use super::stick::StickGroup;
use super::types::{BindId, FULL_MAGNITUDE};

/// What to do with one bind list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ListOp {
    Activate { value: i32, edge: bool },
    Deactivate { edge: bool },
}

/// A bind list snapshot plus the operation to apply to it
#[derive(Clone, Debug)]
pub(crate) struct ListAction {
    pub binds: Vec<BindId>,
    pub op: ListOp,
}

/// Keyboard adapter: one bind list per canonical key
#[derive(Debug, Clone)]
pub struct KeyGroup {
    lists: Vec<Vec<BindId>>,
}

impl KeyGroup {
    pub fn new(key_count: usize) -> Self {
        Self {
            lists: vec![Vec::new(); key_count],
        }
    }

    fn check_event(&self, event: &RawEvent, translator: &ScancodeTranslator) -> Option<Vec<ListAction>> {
        let (scancode, op) = match *event {
            RawEvent::KeyDown { scancode } => (
                scancode,
                ListOp::Activate {
                    value: FULL_MAGNITUDE,
                    edge: true,
                },
            ),
            RawEvent::KeyUp { scancode } => (scancode, ListOp::Deactivate { edge: true }),
            _ => return None,
        };

        let key = translator.to_canonical(scancode);
        if key.is_unknown() {
            tracing::debug!("Dropping unmapped scancode {}", scancode.0);
            return Some(Vec::new());
        }
        let binds = self.lists.get(key.index()).cloned().unwrap_or_default();
        Some(vec![ListAction { binds, op }])
    }

    fn create_event_bind(&self, event: &RawEvent, translator: &ScancodeTranslator) -> Option<BindInput> {
        let RawEvent::KeyDown { scancode } = *event else {
            return None;
        };
        key_input(scancode, translator)
    }

    fn parse_config(&self, words: &[&str], translator: &ScancodeTranslator) -> Option<(BindInput, usize)> {
        let code: u16 = words.first()?.parse().ok()?;
        key_input(Scancode(code), translator).map(|input| (input, 1))
    }

    fn list_mut(&mut self, input: &BindInput) -> Option<&mut Vec<BindId>> {
        match *input {
            BindInput::Key { key, .. } => self.lists.get_mut(key.index()),
            _ => None,
        }
    }
}

fn key_input(scancode: Scancode, translator: &ScancodeTranslator) -> Option<BindInput> {
    let key = translator.to_canonical(scancode);
    (!key.is_unknown()).then_some(BindInput::Key { scancode, key })
}

/// Closed set of input adapters, dispatched in registration order
#[derive(Debug, Clone)]
pub enum BindGroup {
    Keyboard(KeyGroup),
    Stick(StickGroup),
}

impl BindGroup {
    /// Keyword that starts this group's mapper file tokens
    pub fn config_start(&self) -> String {
        match self {
            BindGroup::Keyboard(_) => "key".to_string(),
            BindGroup::Stick(stick) => stick.config_start(),
        }
    }

    /// Device label used in bind names
    pub fn bind_start(&self) -> String {
        match self {
            BindGroup::Keyboard(_) => "Key".to_string(),
            BindGroup::Stick(stick) => stick.bind_start(),
        }
    }

    /// Claim a raw event; `Some` stops the search even when nothing changes
    pub(crate) fn check_event(
        &mut self,
        event: &RawEvent,
        translator: &ScancodeTranslator,
    ) -> Option<Vec<ListAction>> {
        match self {
            BindGroup::Keyboard(keys) => keys.check_event(event, translator),
            BindGroup::Stick(stick) => stick.check_event(event),
        }
    }

    pub(crate) fn create_event_bind(
        &self,
        event: &RawEvent,
        translator: &ScancodeTranslator,
    ) -> Option<BindInput> {
        match self {
            BindGroup::Keyboard(keys) => keys.create_event_bind(event, translator),
            BindGroup::Stick(stick) => stick.create_event_bind(event),
        }
    }

    /// Parse a token split into words. On success returns the input and how
    /// many words it used, keyword included; the rest are flags.
    pub(crate) fn parse_config(
        &self,
        words: &[&str],
        translator: &ScancodeTranslator,
    ) -> Option<(BindInput, usize)> {
        let (keyword, rest) = words.split_first()?;
        if !keyword.eq_ignore_ascii_case(&self.config_start()) {
            return None;
        }
        let (input, used) = match self {
            BindGroup::Keyboard(keys) => keys.parse_config(rest, translator)?,
            BindGroup::Stick(stick) => stick.parse_config(rest)?,
        };
        Some((input, used + 1))
    }

    pub(crate) fn list_mut(&mut self, input: &BindInput) -> Option<&mut Vec<BindId>> {
        match self {
            BindGroup::Keyboard(keys) => keys.list_mut(input),
            BindGroup::Stick(stick) => stick.list_mut(input),
        }
    }

    pub(crate) fn clear_lists(&mut self) {
        match self {
            BindGroup::Keyboard(keys) => keys.lists.iter_mut().for_each(Vec::clear),
            BindGroup::Stick(stick) => stick.clear_lists(),
        }
    }
}
