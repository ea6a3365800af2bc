//! Binding directory: owns events, binds, groups and the virtual joysticks
//!
//! Every raw event goes through [`BindingDirectory::process_raw_event`]. The
//! first group that claims it hands back bind list snapshots; those are then
//! activated or deactivated here, which may fire event effects into the
//! keyboard sink, the modifier state, a handler, or a virtual joystick.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use super::binding::{parse_flags, Bind, BindInput, BindStep};
use super::defaults::{default_bindings, HandlerDefault};
use super::editor::EditorState;
use super::event::{AxisRelease, Event, EventAction, EventKind};
use super::file::{format_line, parse_line, write_atomic, LoadReport, MapperFileError};
use super::group::{BindGroup, KeyGroup, ListOp};
use super::layout::{
    JOYSTICK_LAYOUT, KEY_LAYOUT, LOCK_KEY_EVENTS, MAX_EVENT_NAME, MAX_STICKS,
};
use super::raw::{EventSource, HostStick, RawEvent};
use super::scancode::{Scancode, ScancodeTranslator, Translation};
use super::sink::{JoystickSink, KeyboardSink};
use super::stick::{JoystickType, StickGroup, StickKind, VirtualJoystick};
use super::types::{
    BindFlags, BindId, EventId, HatDirection, Modifiers, ACTIVATION_THRESHOLD, FULL_MAGNITUDE,
};

/// Callback run when a handler event turns on (`true`) or off (`false`)
pub type HandlerFn = Box<dyn FnMut(bool)>;

/// How the directory is put together
#[derive(Debug, Clone, Default)]
pub struct MapperOptions {
    pub translation: Translation,
    pub joystick_type: JoystickType,
    /// Host sticks in platform order
    pub sticks: Vec<HostStick>,
    pub autofire: bool,
    /// Fold host buttons onto the emulated ones instead of dropping extras
    pub button_wrap: bool,
}

/// Result of draining an event source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Continue,
    Quit,
}

/// Where the active bindings came from at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitSource {
    MapperFile(LoadReport),
    Defaults,
}

enum HandlerAction {
    /// The built-in editor toggle
    OpenEditor,
    Callback(HandlerFn),
}

struct Handler {
    label: String,
    event: EventId,
    default_key: Scancode,
    default_mods: Modifiers,
    action: HandlerAction,
}

pub struct BindingDirectory {
    translator: ScancodeTranslator,
    events: Vec<Event>,
    /// Lowercased event name -> event
    event_index: HashMap<String, EventId>,
    binds: HashMap<BindId, Bind>,
    next_bind: u32,
    groups: Vec<BindGroup>,
    mods: Modifiers,
    /// Hold binds latched on after their first release
    hold_list: HashSet<BindId>,
    handlers: Vec<Handler>,
    vjoy: [VirtualJoystick; MAX_STICKS],
    keyboard: Box<dyn KeyboardSink>,
    joystick: Box<dyn JoystickSink>,
    autofire: bool,
    pub(crate) editor: EditorState,
    editor_requested: bool,
}

impl BindingDirectory {
    pub fn new(
        options: MapperOptions,
        keyboard: Box<dyn KeyboardSink>,
        joystick: Box<dyn JoystickSink>,
    ) -> Self {
        let translator = ScancodeTranslator::new(options.translation);
        let groups = create_groups(&options, &translator);

        let mut directory = Self {
            translator,
            events: Vec::new(),
            event_index: HashMap::new(),
            binds: HashMap::new(),
            next_bind: 0,
            groups,
            mods: Modifiers::NONE,
            hold_list: HashSet::new(),
            handlers: Vec::new(),
            vjoy: Default::default(),
            keyboard,
            joystick,
            autofire: options.autofire,
            editor: EditorState::default(),
            editor_requested: false,
        };
        directory.create_layout();
        directory.add_handler(
            HandlerAction::OpenEditor,
            Scancode::F1,
            Modifiers::MOD1,
            "mapper",
            "Mapper",
        );
        directory
    }

    fn create_layout(&mut self) {
        for entry in KEY_LAYOUT {
            self.add_event(format!("key_{}", entry.name), EventAction::Key(entry.key));
        }

        for (i, flag) in Modifiers::ALL.into_iter().enumerate() {
            self.add_event(format!("mod_{}", i + 1), EventAction::Modifier(flag));
        }

        for (stick, &(buttons, axes, hats)) in JOYSTICK_LAYOUT.iter().enumerate() {
            let stick = stick as u8;
            for button in 0..buttons {
                self.add_event(
                    format!("jbutton_{}_{}", stick, button),
                    EventAction::JoyButton { stick, button },
                );
            }
            for axis in 0..axes {
                let negative = self.add_event(
                    format!("jaxis_{}_{}-", stick, axis),
                    EventAction::JoyAxis {
                        stick,
                        axis,
                        positive: false,
                    },
                );
                let positive = self.add_event(
                    format!("jaxis_{}_{}+", stick, axis),
                    EventAction::JoyAxis {
                        stick,
                        axis,
                        positive: true,
                    },
                );
                self.events[negative.0].set_opposite(positive);
                self.events[positive.0].set_opposite(negative);
            }
            for hat in 0..hats {
                for direction in HatDirection::ALL {
                    self.add_event(
                        format!("jhat_{}_{}_{}", stick, hat, direction.index()),
                        EventAction::JoyHat {
                            stick,
                            hat,
                            direction,
                        },
                    );
                }
            }
        }
    }

    fn add_event(&mut self, mut name: String, action: EventAction) -> EventId {
        if let Some((cut, _)) = name.char_indices().nth(MAX_EVENT_NAME) {
            tracing::warn!("Event name '{}' too long, truncating", name);
            name.truncate(cut);
        }
        let id = EventId(self.events.len());
        self.event_index.entry(name.to_ascii_lowercase()).or_insert(id);
        self.events.push(Event::new(name, action));
        id
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn translator(&self) -> &ScancodeTranslator {
        &self.translator
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.get(id.0)
    }

    /// Find an event by name, ignoring ASCII case
    pub fn find_event(&self, name: &str) -> Option<EventId> {
        self.event_index.get(&name.to_ascii_lowercase()).copied()
    }

    pub fn bind(&self, id: BindId) -> Option<&Bind> {
        self.binds.get(&id)
    }

    /// Binds of an event, most recently added first
    pub fn binds_of(&self, event: EventId) -> impl Iterator<Item = &Bind> + '_ {
        self.events
            .get(event.0)
            .map(|e| e.binds.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.binds.get(id))
    }

    pub fn bind_count(&self) -> usize {
        self.binds.len()
    }

    pub fn groups(&self) -> &[BindGroup] {
        &self.groups
    }

    pub fn modifiers(&self) -> Modifiers {
        self.mods
    }

    pub fn is_latched(&self, id: BindId) -> bool {
        self.hold_list.contains(&id)
    }

    pub fn virtual_joystick(&self, stick: usize) -> Option<&VirtualJoystick> {
        self.vjoy.get(stick)
    }

    /// Editor label of a bind, e.g. `Key A` or `Gamepad Axis 1-`
    pub fn bind_name(&self, id: BindId) -> Option<String> {
        let bind = self.binds.get(&id)?;
        let group = self.groups.get(bind.group)?;
        Some(bind.input.bind_name(&group.bind_start()))
    }

    // =========================================================================
    // Handlers
    // =========================================================================

    /// Register an action that can be bound like any other event.
    ///
    /// The event is named `hand_<name>`. A second registration with the same
    /// label returns the existing event. Handlers registered after
    /// [`init`](Self::init) only get their default key from the next
    /// [`apply_default_bindings`](Self::apply_default_bindings).
    pub fn register_handler(
        &mut self,
        callback: impl FnMut(bool) + 'static,
        default_key: Scancode,
        default_mods: Modifiers,
        name: &str,
        label: &str,
    ) -> EventId {
        self.add_handler(
            HandlerAction::Callback(Box::new(callback)),
            default_key,
            default_mods,
            name,
            label,
        )
    }

    fn add_handler(
        &mut self,
        action: HandlerAction,
        default_key: Scancode,
        default_mods: Modifiers,
        name: &str,
        label: &str,
    ) -> EventId {
        if let Some(existing) = self.handlers.iter().find(|h| h.label == label) {
            return existing.event;
        }
        let slot = self.handlers.len();
        let event = self.add_event(format!("hand_{}", name), EventAction::Handler(slot));
        self.handlers.push(Handler {
            label: label.to_string(),
            event,
            default_key,
            default_mods,
            action,
        });
        event
    }

    /// Button label of a handler event
    pub fn handler_label(&self, event: EventId) -> Option<&str> {
        match self.events.get(event.0)?.action() {
            EventAction::Handler(slot) => self.handlers.get(slot).map(|h| h.label.as_str()),
            _ => None,
        }
    }

    pub(crate) fn clear_keyboard_buffer(&mut self) {
        self.keyboard.clear_buffer();
    }

    /// Apply `edit` to the bind selected in the editor. The bind is released
    /// first, so a latched hold never outlives its flag.
    pub(crate) fn edit_selected(&mut self, edit: impl FnOnce(&mut Bind)) -> bool {
        let Some(id) = self
            .editor
            .selected_bind
            .filter(|id| self.binds.contains_key(id))
        else {
            return false;
        };
        self.release_bind_fully(id);
        match self.binds.get_mut(&id) {
            Some(bind) => {
                edit(bind);
                true
            }
            None => false,
        }
    }

    /// True once after the editor handler was released
    pub fn take_editor_request(&mut self) -> bool {
        std::mem::take(&mut self.editor_requested)
    }

    // =========================================================================
    // Binds
    // =========================================================================

    /// Attach `input` to `event`. An identical existing bind is returned
    /// instead of adding a duplicate; `None` if no group owns the input.
    pub fn add_bind(
        &mut self,
        event: EventId,
        input: BindInput,
        mods: Modifiers,
        flags: BindFlags,
    ) -> Option<BindId> {
        self.events.get(event.0)?;

        let group = self
            .groups
            .iter_mut()
            .position(|g| g.list_mut(&input).is_some())?;

        let mut bind = Bind::new(event, input, group);
        bind.mods = mods;
        bind.flags = flags;

        if let Some(existing) = self.events[event.0]
            .binds
            .iter()
            .copied()
            .find(|id| self.binds.get(id).is_some_and(|b| b.same_binding(&bind)))
        {
            return Some(existing);
        }

        let id = BindId(self.next_bind);
        self.next_bind = self.next_bind.wrapping_add(1);
        if let Some(list) = self.groups[group].list_mut(&input) {
            list.push(id);
        }
        self.events[event.0].add_bind(id);
        self.binds.insert(id, bind);
        Some(id)
    }

    /// Create a bind from a mapper file token such as `key 4 mod1 hold`
    pub fn bind_from_token(&mut self, event: EventId, token: &str) -> Option<BindId> {
        let words: Vec<&str> = token.split_whitespace().collect();
        let (input, used) = self
            .groups
            .iter()
            .find_map(|g| g.parse_config(&words, &self.translator))?;
        let (mods, flags) = parse_flags(words[used..].iter().copied());
        self.add_bind(event, input, mods, flags)
    }

    /// Remove a bind, first releasing its event if the bind was holding it on
    pub fn remove_bind(&mut self, id: BindId) -> bool {
        if !self.binds.contains_key(&id) {
            return false;
        }
        self.release_bind_fully(id);

        let Some(bind) = self.binds.remove(&id) else {
            return false;
        };
        self.hold_list.remove(&id);
        if let Some(event) = self.events.get_mut(bind.event.0) {
            event.remove_bind(id);
        }
        if let Some(list) = self
            .groups
            .get_mut(bind.group)
            .and_then(|g| g.list_mut(&bind.input))
        {
            list.retain(|b| *b != id);
        }
        if self.editor.selected_bind == Some(id) {
            self.editor.selected_bind = None;
        }
        true
    }

    /// Remove every bind, releasing anything they held on
    pub fn clear_bindings(&mut self) {
        let ids: Vec<BindId> = self.binds.keys().copied().collect();
        for id in ids {
            self.release_bind_fully(id);
        }
        self.binds.clear();
        self.hold_list.clear();
        for event in &mut self.events {
            event.binds.clear();
            event.reset_activity();
        }
        for group in &mut self.groups {
            group.clear_lists();
        }
        self.editor.selected_bind = None;
    }

    /// Bind the default layout. Tokens for absent sticks are skipped.
    pub fn apply_default_bindings(&mut self) -> usize {
        let handlers: Vec<HandlerDefault> = self
            .handlers
            .iter()
            .map(|h| HandlerDefault {
                event: self.events[h.event.0].name().to_string(),
                key: h.default_key,
                mods: h.default_mods,
            })
            .collect();

        let mut added = 0;
        for (name, token) in default_bindings(&handlers) {
            let Some(event) = self.find_event(&name) else {
                continue;
            };
            if self.bind_from_token(event, &token).is_some() {
                added += 1;
            } else {
                tracing::debug!("No group for default bind {} \"{}\"", name, token);
            }
        }
        added
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Mapper file contents for the current bindings, one line per event
    pub fn to_mapper_file(&self) -> String {
        let mut out = String::new();
        for event in &self.events {
            let tokens: Vec<String> = event
                .binds
                .iter()
                .filter_map(|id| self.binds.get(id))
                .map(Bind::config_token)
                .collect();
            out.push_str(&format_line(
                event.name(),
                tokens.iter().map(String::as_str),
            ));
            out.push('\n');
        }
        out
    }

    pub fn save_bindings(&self, path: &Path) -> Result<(), MapperFileError> {
        write_atomic(path, &self.to_mapper_file())?;
        tracing::info!("Saved mapper file {}", path.display());
        Ok(())
    }

    /// Add the bindings in `text` to the current ones
    pub fn load_bindings_from_str(&mut self, text: &str) -> LoadReport {
        let mut report = LoadReport::default();
        for line in text.lines() {
            let Some(parsed) = parse_line(line) else {
                continue;
            };
            report.lines += 1;
            let Some(event) = self.find_event(parsed.event) else {
                tracing::warn!("Can't find matching event for {}", parsed.event);
                report.unknown_events += 1;
                continue;
            };
            // Binds are kept newest first, so add them back to front
            for &token in parsed.tokens.iter().rev() {
                if self.bind_from_token(event, token).is_some() {
                    report.binds += 1;
                } else {
                    tracing::warn!("Ignoring bind \"{}\" for {}", token, parsed.event);
                    report.rejected_tokens += 1;
                }
            }
        }
        report
    }

    /// Replace the current bindings with a mapper file. If the file cannot
    /// be read the current bindings stay untouched.
    pub fn load_bindings(&mut self, path: &Path) -> Result<LoadReport, MapperFileError> {
        let text = fs::read_to_string(path).map_err(|e| {
            MapperFileError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        self.clear_bindings();
        let report = self.load_bindings_from_str(&text);
        tracing::info!(
            "Loaded mapper file {} ({} binds, {} unknown events, {} rejected)",
            path.display(),
            report.binds,
            report.unknown_events,
            report.rejected_tokens
        );
        Ok(report)
    }

    /// Startup: the mapper file if it loads, the default layout otherwise
    pub fn init(&mut self, mapper_file: Option<&Path>) -> InitSource {
        if let Some(path) = mapper_file {
            match self.load_bindings(path) {
                Ok(report) => return InitSource::MapperFile(report),
                Err(e) => tracing::info!("{}, using default bindings", e),
            }
        }
        self.clear_bindings();
        let added = self.apply_default_bindings();
        tracing::debug!("Applied {} default binds", added);
        InitSource::Defaults
    }

    /// Bring lock-key events in line with the host lock state.
    ///
    /// With `skip_effect` the events count as active without sending the
    /// keystroke, for hosts whose guest already sees the lock engaged.
    /// Otherwise each engaged lock key is tapped once.
    pub fn replay_lock_state(&mut self, caps_lock: bool, num_lock: bool, skip_effect: bool) {
        for (engaged, name) in [(caps_lock, LOCK_KEY_EVENTS[0]), (num_lock, LOCK_KEY_EVENTS[1])] {
            if !engaged {
                continue;
            }
            let Some(event) = self.find_event(name) else {
                continue;
            };
            for id in self.events[event.0].binds.clone() {
                self.activate_bind(id, FULL_MAGNITUDE, true, skip_effect);
                if !skip_effect {
                    self.deactivate_bind(id, false);
                }
            }
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Route one raw event. Returns whether anything claimed it.
    pub fn process_raw_event(&mut self, raw: &RawEvent) -> bool {
        match raw {
            RawEvent::FocusLost => {
                self.notify_focus_lost();
                return true;
            }
            RawEvent::Quit => return false,
            _ => {}
        }

        if self.editor.awaiting_input && self.editor_capture(raw) {
            return true;
        }

        let mut claimed = None;
        for group in &mut self.groups {
            if let Some(actions) = group.check_event(raw, &self.translator) {
                claimed = Some(actions);
                break;
            }
        }
        let Some(actions) = claimed else {
            tracing::trace!("Unclaimed raw event {:?}", raw);
            return false;
        };

        for action in actions {
            match action.op {
                ListOp::Activate { value, edge } => {
                    self.activate_bind_list(&action.binds, value, edge)
                }
                ListOp::Deactivate { edge } => self.deactivate_bind_list(&action.binds, edge),
            }
        }
        self.update_joysticks(false);
        true
    }

    /// Drain `source`, then push joystick state once with autofire advanced
    pub fn poll_and_dispatch_all(&mut self, source: &mut dyn EventSource) -> PollOutcome {
        while let Some(raw) = source.poll_event() {
            if raw == RawEvent::Quit {
                return PollOutcome::Quit;
            }
            self.process_raw_event(&raw);
        }
        self.tick();
        PollOutcome::Continue
    }

    /// Per-frame joystick update; advances autofire
    pub fn tick(&mut self) {
        self.update_joysticks(true);
    }

    /// Release everything except lock keys, whose state the host keeps
    pub fn notify_focus_lost(&mut self) {
        for index in 0..self.events.len() {
            if LOCK_KEY_EVENTS.contains(&self.events[index].name()) {
                continue;
            }
            for id in self.events[index].binds.clone() {
                if self.hold_list.contains(&id) {
                    self.release_bind_fully(id);
                } else {
                    self.deactivate_bind(id, true);
                }
            }
        }
    }

    fn update_joysticks(&mut self, advance_autofire: bool) {
        for group in &mut self.groups {
            if let BindGroup::Stick(stick) = group {
                stick.update(
                    &self.vjoy,
                    &mut *self.joystick,
                    self.autofire,
                    advance_autofire,
                );
            }
        }
    }

    /// Only the binds whose modifier mask is the largest one currently held
    /// get activated, so `mod1`+A shadows a plain A.
    fn activate_bind_list(&mut self, binds: &[BindId], value: i32, edge: bool) {
        let mut valid = Modifiers::NONE;
        for bind in binds.iter().filter_map(|id| self.binds.get(id)) {
            if self.mods.contains(bind.mods) && bind.mods > valid {
                valid = bind.mods;
            }
        }
        for &id in binds {
            if self.binds.get(&id).is_some_and(|b| b.mods == valid) {
                self.activate_bind(id, value, edge, false);
            }
        }
    }

    fn deactivate_bind_list(&mut self, binds: &[BindId], edge: bool) {
        for &id in binds {
            self.deactivate_bind(id, edge);
        }
    }

    pub(crate) fn activate_bind(&mut self, id: BindId, value: i32, edge: bool, skip_effect: bool) {
        let Some(event_id) = self.binds.get(&id).map(|b| b.event) else {
            return;
        };

        match self.events[event_id.0].kind() {
            EventKind::Triggered => {
                let Some(step) = self.binds.get_mut(&id).map(|b| b.press(value)) else {
                    return;
                };
                if value > ACTIVATION_THRESHOLD {
                    self.events[event_id.0].set_value(value);
                }
                match step {
                    BindStep::Engage => {
                        if let Some(on) = self.events[event_id.0].trigger_on(skip_effect) {
                            self.fire(event_id, on);
                        }
                    }
                    BindStep::Release => {
                        self.hold_list.remove(&id);
                        self.release_event(event_id);
                    }
                    BindStep::Idle | BindStep::Latch => {}
                }
            }
            EventKind::Continuous => {
                if let Some(bind) = self.binds.get_mut(&id) {
                    bind.set_active(true);
                }
                let opposite = self.opposite_activity(event_id);
                let event = &mut self.events[event_id.0];
                event.set_value(value);
                if event.axis_on(edge, skip_effect, opposite) {
                    self.fire(event_id, true);
                }
            }
        }
    }

    pub(crate) fn deactivate_bind(&mut self, id: BindId, edge: bool) {
        let Some(event_id) = self.binds.get(&id).map(|b| b.event) else {
            return;
        };

        match self.events[event_id.0].kind() {
            EventKind::Triggered => {
                let Some(step) = self.binds.get_mut(&id).map(Bind::release) else {
                    return;
                };
                match step {
                    BindStep::Latch => {
                        self.hold_list.insert(id);
                    }
                    BindStep::Release => {
                        self.hold_list.remove(&id);
                        self.release_event(event_id);
                    }
                    BindStep::Idle | BindStep::Engage => {}
                }
            }
            EventKind::Continuous => {
                if let Some(bind) = self.binds.get_mut(&id) {
                    bind.set_active(false);
                }
                self.release_axis(event_id, edge);
            }
        }
    }

    /// Undo whatever a bind contributes, hold latch included
    fn release_bind_fully(&mut self, id: BindId) {
        let Some(bind) = self.binds.get_mut(&id) else {
            return;
        };
        let event_id = bind.event;
        let edge = bind.input.is_edge_triggered();
        if !bind.reset() {
            return;
        }
        self.hold_list.remove(&id);
        match self.events[event_id.0].kind() {
            EventKind::Triggered => self.release_event(event_id),
            EventKind::Continuous => self.release_axis(event_id, edge),
        }
    }

    fn release_event(&mut self, event_id: EventId) {
        if let Some(on) = self.events[event_id.0].trigger_off() {
            self.fire(event_id, on);
        }
    }

    fn release_axis(&mut self, event_id: EventId, edge: bool) {
        let opposite = self.opposite_activity(event_id);
        let event = &mut self.events[event_id.0];
        event.set_value(0);
        match event.axis_off(edge, opposite) {
            AxisRelease::Center => self.fire(event_id, false),
            AxisRelease::RepostOpposite => {
                if let Some(other) = self.events[event_id.0].opposite() {
                    self.fire(other, true);
                }
            }
            AxisRelease::Idle => {}
        }
    }

    fn opposite_activity(&self, event_id: EventId) -> u16 {
        self.events[event_id.0]
            .opposite()
            .and_then(|o| self.events.get(o.0))
            .map_or(0, Event::activity)
    }

    /// Apply an event's effect
    fn fire(&mut self, event_id: EventId, on: bool) {
        let Some(event) = self.events.get(event_id.0) else {
            return;
        };
        let value = event.value();
        tracing::debug!(event = event.name(), on, value, "event fired");

        match event.action() {
            EventAction::Key(key) => self.keyboard.add_key(key, on),
            EventAction::Modifier(flag) => {
                self.mods = if on {
                    self.mods | flag
                } else {
                    self.mods.without(flag)
                };
            }
            EventAction::Handler(slot) => {
                if let Some(handler) = self.handlers.get_mut(slot) {
                    match &mut handler.action {
                        HandlerAction::OpenEditor => {
                            if !on {
                                self.editor_requested = true;
                            }
                        }
                        HandlerAction::Callback(callback) => callback(on),
                    }
                }
            }
            EventAction::JoyButton { stick, button } => {
                if let Some(slot) = self
                    .vjoy
                    .get_mut(stick as usize)
                    .and_then(|j| j.button_pressed.get_mut(button as usize))
                {
                    *slot = on;
                }
            }
            EventAction::JoyHat {
                stick,
                hat,
                direction,
            } => {
                let index = hat as usize * 4 + direction.index();
                if let Some(slot) = self
                    .vjoy
                    .get_mut(stick as usize)
                    .and_then(|j| j.hat_pressed.get_mut(index))
                {
                    *slot = on;
                }
            }
            EventAction::JoyAxis {
                stick,
                axis,
                positive,
            } => {
                let magnitude = value.clamp(0, FULL_MAGNITUDE) as i16;
                if let Some(slot) = self
                    .vjoy
                    .get_mut(stick as usize)
                    .and_then(|j| j.axis_pos.get_mut(axis as usize))
                {
                    *slot = if positive { magnitude } else { -magnitude };
                }
            }
        }
    }
}

/// Keyboard group first, then stick groups for the resolved joystick type.
/// Without host sticks no stick group exists.
fn create_groups(options: &MapperOptions, translator: &ScancodeTranslator) -> Vec<BindGroup> {
    let mut groups = vec![BindGroup::Keyboard(KeyGroup::new(translator.key_count()))];
    if options.sticks.is_empty() {
        return groups;
    }

    let wrap = options.button_wrap;
    let real = |kind, stick: u8, emustick: u8| {
        BindGroup::Stick(StickGroup::new(
            kind,
            stick,
            emustick,
            options.sticks.get(stick as usize),
            wrap,
        ))
    };
    let dummy = |stick: u8, emustick: u8| {
        BindGroup::Stick(StickGroup::new(StickKind::TwoAxis, stick, emustick, None, wrap))
    };

    match options.joystick_type.resolve(&options.sticks) {
        JoystickType::Auto | JoystickType::None => {}
        JoystickType::TwoAxis => {
            groups.push(real(StickKind::TwoAxis, 0, 0));
            groups.push(real(StickKind::TwoAxis, 1, 1));
        }
        JoystickType::FourAxis => {
            groups.push(real(StickKind::FourAxis, 0, 0));
            groups.push(dummy(1, 1));
        }
        JoystickType::FourAxisSecond => {
            groups.push(real(StickKind::FourAxisDual, 1, 0));
            groups.push(dummy(0, 1));
        }
        JoystickType::Fcs => {
            groups.push(real(StickKind::FlightStick, 0, 0));
            groups.push(dummy(1, 1));
        }
        JoystickType::Ch => {
            groups.push(real(StickKind::GameportHub, 0, 0));
            groups.push(dummy(1, 1));
        }
    }
    groups
}
