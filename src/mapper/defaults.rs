//! Default bindings, used when no mapper file exists

use super::layout::{JOYSTICK_LAYOUT, KEY_LAYOUT, MODIFIER_DEFAULTS};
use super::scancode::Scancode;
use super::types::{HatDirection, Modifiers};

/// Default key and modifiers of a handler event
#[derive(Debug, Clone)]
pub struct HandlerDefault {
    pub event: String,
    pub key: Scancode,
    pub mods: Modifiers,
}

fn key_token(scancode: Scancode, mods: Modifiers) -> String {
    let mut token = format!("key {}", scancode.0);
    for flag in Modifiers::ALL {
        if mods.contains(flag) {
            if let Some(word) = flag.config_word() {
                token.push(' ');
                token.push_str(word);
            }
        }
    }
    token
}

/// (event name, bind token) pairs of the default layout
pub fn default_bindings(handlers: &[HandlerDefault]) -> Vec<(String, String)> {
    let mut out = Vec::new();

    for entry in KEY_LAYOUT {
        out.push((
            format!("key_{}", entry.name),
            key_token(entry.default_scancode, Modifiers::NONE),
        ));
    }

    for (event, keys) in MODIFIER_DEFAULTS {
        for key in keys {
            out.push((event.to_string(), key_token(key, Modifiers::NONE)));
        }
    }

    for handler in handlers {
        if !handler.key.is_unknown() {
            out.push((handler.event.clone(), key_token(handler.key, handler.mods)));
        }
    }

    for (stick, &(buttons, axes, hats)) in JOYSTICK_LAYOUT.iter().enumerate() {
        for button in 0..buttons {
            out.push((
                format!("jbutton_{}_{}", stick, button),
                format!("stick_{} button {}", stick, button),
            ));
        }
        for axis in 0..axes {
            out.push((
                format!("jaxis_{}_{}-", stick, axis),
                format!("stick_{} axis {} 0", stick, axis),
            ));
            out.push((
                format!("jaxis_{}_{}+", stick, axis),
                format!("stick_{} axis {} 1", stick, axis),
            ));
        }
        for hat in 0..hats {
            for dir in HatDirection::ALL {
                out.push((
                    format!("jhat_{}_{}_{}", stick, hat, dir.index()),
                    format!("stick_{} hat {} {}", stick, hat, dir.mask()),
                ));
            }
        }
    }

    out
}
