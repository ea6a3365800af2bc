//! Headless binding editor
//!
//! The state a mapper UI drives: one selected event, one selected bind of
//! that event, and an "add" mode in which the next usable raw event becomes
//! a new bind. Rendering is left to the front end; it reads the status text
//! and selection and calls the operations below.

use std::path::Path;

use super::directory::BindingDirectory;
use super::file::MapperFileError;
use super::raw::RawEvent;
use super::types::{BindFlags, BindId, EventId, Modifiers};

pub const STATUS_SELECT_EVENT: &str = "Select an event to change.";
pub const STATUS_SELECT_BIND: &str = "Select a different input for this event.";
pub const STATUS_AWAITING_INPUT: &str = "Press a key/joystick button or move the joystick.";
pub const STATUS_SAVED: &str = "Mapper file saved.";

#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub(crate) open: bool,
    pub(crate) selected_event: Option<EventId>,
    pub(crate) selected_bind: Option<BindId>,
    pub(crate) awaiting_input: bool,
    pub(crate) status: String,
}

impl EditorState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected_event(&self) -> Option<EventId> {
        self.selected_event
    }

    pub fn selected_bind(&self) -> Option<BindId> {
        self.selected_bind
    }

    pub fn is_awaiting_input(&self) -> bool {
        self.awaiting_input
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

impl BindingDirectory {
    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    /// Open the editor. Queued keystrokes are dropped and every held event
    /// is released so nothing stays pressed behind the editor.
    pub fn open_editor(&mut self) {
        self.clear_keyboard_buffer();
        self.notify_focus_lost();
        self.editor.open = true;
        self.editor.awaiting_input = false;
        self.editor.status = match self.editor.selected_event {
            Some(_) => STATUS_SELECT_BIND.to_string(),
            None => STATUS_SELECT_EVENT.to_string(),
        };
        tracing::debug!("Mapper editor opened");
    }

    pub fn close_editor(&mut self) {
        self.editor.open = false;
        self.editor.awaiting_input = false;
        tracing::debug!("Mapper editor closed");
    }

    /// Select an event and its most recent bind
    pub fn editor_select_event(&mut self, event: EventId) -> bool {
        let Some(first) = self.event(event).map(|e| e.binds().first().copied()) else {
            return false;
        };
        self.editor.selected_event = Some(event);
        self.editor.selected_bind = first;
        self.editor.awaiting_input = false;
        self.editor.status = STATUS_SELECT_BIND.to_string();
        true
    }

    /// Wait for the next raw event to bind to the selected event
    pub fn editor_add(&mut self) -> bool {
        if self.editor.selected_event.is_none() {
            return false;
        }
        self.editor.awaiting_input = true;
        self.editor.selected_bind = None;
        self.editor.status = STATUS_AWAITING_INPUT.to_string();
        true
    }

    /// Offer a raw event to the editor while it waits for input. The first
    /// group that can bind it wins; other events fall through to dispatch.
    pub(crate) fn editor_capture(&mut self, raw: &RawEvent) -> bool {
        let Some(event) = self.editor.selected_event else {
            self.editor.awaiting_input = false;
            return false;
        };
        let Some(input) = self
            .groups()
            .iter()
            .find_map(|g| g.create_event_bind(raw, self.translator()))
        else {
            return false;
        };
        let Some(bind) = self.add_bind(event, input, Modifiers::NONE, BindFlags::NONE) else {
            return false;
        };
        self.editor.selected_bind = Some(bind);
        self.editor.awaiting_input = false;
        self.editor.status = STATUS_SELECT_BIND.to_string();
        tracing::debug!("Editor added bind {:?}", self.bind_name(bind));
        true
    }

    /// Delete the selected bind and select the one after it, wrapping
    pub fn editor_delete(&mut self) -> bool {
        let (Some(event), Some(bind)) = (self.editor.selected_event, self.editor.selected_bind)
        else {
            return false;
        };
        let position = self
            .event(event)
            .and_then(|e| e.binds().iter().position(|b| *b == bind));
        if !self.remove_bind(bind) {
            return false;
        }
        let binds = self.event(event).map(|e| e.binds()).unwrap_or_default();
        self.editor.selected_bind = position
            .and_then(|p| binds.get(p))
            .or_else(|| binds.first())
            .copied();
        true
    }

    /// Step to the next bind of the selected event, wrapping
    pub fn editor_next(&mut self) -> Option<BindId> {
        let event = self.editor.selected_event?;
        let binds = self.event(event)?.binds();
        let next = match self
            .editor
            .selected_bind
            .and_then(|current| binds.iter().position(|b| *b == current))
        {
            Some(p) => binds.get((p + 1) % binds.len()),
            None => binds.first(),
        }
        .copied();
        self.editor.selected_bind = next;
        next
    }

    /// Toggle a modifier requirement on the selected bind
    pub fn editor_toggle_mod(&mut self, flag: Modifiers) -> bool {
        self.edit_selected(|bind| bind.mods = bind.mods.toggled(flag))
    }

    pub fn editor_toggle_hold(&mut self) -> bool {
        self.edit_selected(|bind| bind.flags = bind.flags.toggled(BindFlags::HOLD))
    }

    pub fn editor_save(&mut self, path: &Path) -> Result<(), MapperFileError> {
        self.save_bindings(path)?;
        self.editor.status = STATUS_SAVED.to_string();
        Ok(())
    }

    /// Title of the bind panel, e.g. `Bind: Key A (Mod1, hold)`
    pub fn editor_bind_title(&self) -> String {
        let Some(bind) = self.editor.selected_bind.and_then(|id| self.bind(id)) else {
            return "Bind: None".to_string();
        };
        let name = self
            .editor
            .selected_bind
            .and_then(|id| self.bind_name(id))
            .unwrap_or_default();
        let mut extras = Vec::new();
        if !bind.mods.is_empty() {
            extras.push(bind.mods.to_string());
        }
        if bind.flags.contains(BindFlags::HOLD) {
            extras.push("hold".to_string());
        }
        if extras.is_empty() {
            format!("Bind: {}", name)
        } else {
            format!("Bind: {} ({})", name, extras.join(", "))
        }
    }
}
