//! Platform scancode ⇄ canonical key translation
//!
//! Platform scancodes are USB HID usage ids, the numbering winit and SDL2
//! report for physical keys. Canonical keys are the bind-list indices used by
//! the keyboard group: in scancode mode they follow the PC/XT set-1 layout,
//! with a per-host extension for the keys that set 1 only reaches through
//! `E0` prefixes. In bypass mode the platform code is used as-is.

use serde::{Deserialize, Serialize};

/// Number of platform scancodes tracked
pub const NUM_SCANCODES: usize = 512;

/// Number of canonical keys in scancode mode
pub const NUM_CANONICAL_KEYS: usize = 212;

/// A host key identified by its USB HID usage id
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scancode(pub u16);

impl Scancode {
    pub const UNKNOWN: Scancode = Scancode(0);

    pub const A: Scancode = Scancode(4);
    pub const B: Scancode = Scancode(5);
    pub const C: Scancode = Scancode(6);
    pub const D: Scancode = Scancode(7);
    pub const E: Scancode = Scancode(8);
    pub const F: Scancode = Scancode(9);
    pub const G: Scancode = Scancode(10);
    pub const H: Scancode = Scancode(11);
    pub const I: Scancode = Scancode(12);
    pub const J: Scancode = Scancode(13);
    pub const K: Scancode = Scancode(14);
    pub const L: Scancode = Scancode(15);
    pub const M: Scancode = Scancode(16);
    pub const N: Scancode = Scancode(17);
    pub const O: Scancode = Scancode(18);
    pub const P: Scancode = Scancode(19);
    pub const Q: Scancode = Scancode(20);
    pub const R: Scancode = Scancode(21);
    pub const S: Scancode = Scancode(22);
    pub const T: Scancode = Scancode(23);
    pub const U: Scancode = Scancode(24);
    pub const V: Scancode = Scancode(25);
    pub const W: Scancode = Scancode(26);
    pub const X: Scancode = Scancode(27);
    pub const Y: Scancode = Scancode(28);
    pub const Z: Scancode = Scancode(29);

    pub const DIGIT1: Scancode = Scancode(30);
    pub const DIGIT2: Scancode = Scancode(31);
    pub const DIGIT3: Scancode = Scancode(32);
    pub const DIGIT4: Scancode = Scancode(33);
    pub const DIGIT5: Scancode = Scancode(34);
    pub const DIGIT6: Scancode = Scancode(35);
    pub const DIGIT7: Scancode = Scancode(36);
    pub const DIGIT8: Scancode = Scancode(37);
    pub const DIGIT9: Scancode = Scancode(38);
    pub const DIGIT0: Scancode = Scancode(39);

    pub const RETURN: Scancode = Scancode(40);
    pub const ESCAPE: Scancode = Scancode(41);
    pub const BACKSPACE: Scancode = Scancode(42);
    pub const TAB: Scancode = Scancode(43);
    pub const SPACE: Scancode = Scancode(44);
    pub const MINUS: Scancode = Scancode(45);
    pub const EQUALS: Scancode = Scancode(46);
    pub const LEFTBRACKET: Scancode = Scancode(47);
    pub const RIGHTBRACKET: Scancode = Scancode(48);
    pub const BACKSLASH: Scancode = Scancode(49);
    pub const SEMICOLON: Scancode = Scancode(51);
    pub const APOSTROPHE: Scancode = Scancode(52);
    pub const GRAVE: Scancode = Scancode(53);
    pub const COMMA: Scancode = Scancode(54);
    pub const PERIOD: Scancode = Scancode(55);
    pub const SLASH: Scancode = Scancode(56);
    pub const CAPSLOCK: Scancode = Scancode(57);

    pub const F1: Scancode = Scancode(58);
    pub const F2: Scancode = Scancode(59);
    pub const F3: Scancode = Scancode(60);
    pub const F4: Scancode = Scancode(61);
    pub const F5: Scancode = Scancode(62);
    pub const F6: Scancode = Scancode(63);
    pub const F7: Scancode = Scancode(64);
    pub const F8: Scancode = Scancode(65);
    pub const F9: Scancode = Scancode(66);
    pub const F10: Scancode = Scancode(67);
    pub const F11: Scancode = Scancode(68);
    pub const F12: Scancode = Scancode(69);

    pub const PRINTSCREEN: Scancode = Scancode(70);
    pub const SCROLLLOCK: Scancode = Scancode(71);
    pub const PAUSE: Scancode = Scancode(72);
    pub const INSERT: Scancode = Scancode(73);
    pub const HOME: Scancode = Scancode(74);
    pub const PAGEUP: Scancode = Scancode(75);
    pub const DELETE: Scancode = Scancode(76);
    pub const END: Scancode = Scancode(77);
    pub const PAGEDOWN: Scancode = Scancode(78);
    pub const RIGHT: Scancode = Scancode(79);
    pub const LEFT: Scancode = Scancode(80);
    pub const DOWN: Scancode = Scancode(81);
    pub const UP: Scancode = Scancode(82);

    pub const NUMLOCK: Scancode = Scancode(83);
    pub const KP_DIVIDE: Scancode = Scancode(84);
    pub const KP_MULTIPLY: Scancode = Scancode(85);
    pub const KP_MINUS: Scancode = Scancode(86);
    pub const KP_PLUS: Scancode = Scancode(87);
    pub const KP_ENTER: Scancode = Scancode(88);
    pub const KP_1: Scancode = Scancode(89);
    pub const KP_2: Scancode = Scancode(90);
    pub const KP_3: Scancode = Scancode(91);
    pub const KP_4: Scancode = Scancode(92);
    pub const KP_5: Scancode = Scancode(93);
    pub const KP_6: Scancode = Scancode(94);
    pub const KP_7: Scancode = Scancode(95);
    pub const KP_8: Scancode = Scancode(96);
    pub const KP_9: Scancode = Scancode(97);
    pub const KP_0: Scancode = Scancode(98);
    pub const KP_PERIOD: Scancode = Scancode(99);
    pub const NONUSBACKSLASH: Scancode = Scancode(100);

    pub const LCTRL: Scancode = Scancode(224);
    pub const LSHIFT: Scancode = Scancode(225);
    pub const LALT: Scancode = Scancode(226);
    pub const LGUI: Scancode = Scancode(227);
    pub const RCTRL: Scancode = Scancode(228);
    pub const RSHIFT: Scancode = Scancode(229);
    pub const RALT: Scancode = Scancode(230);
    pub const RGUI: Scancode = Scancode(231);

    pub const fn is_unknown(self) -> bool {
        self.0 == 0
    }

    /// Human-readable key name, `None` for codes without one
    pub fn name(self) -> Option<&'static str> {
        const LETTERS: [&str; 26] = [
            "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q",
            "R", "S", "T", "U", "V", "W", "X", "Y", "Z",
        ];
        const DIGITS: [&str; 10] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"];
        const FUNCTION: [&str; 12] = [
            "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12",
        ];
        const KEYPAD: [&str; 10] = [
            "Keypad 1", "Keypad 2", "Keypad 3", "Keypad 4", "Keypad 5", "Keypad 6", "Keypad 7",
            "Keypad 8", "Keypad 9", "Keypad 0",
        ];

        let code = self.0 as usize;
        match self.0 {
            4..=29 => Some(LETTERS[code - 4]),
            30..=39 => Some(DIGITS[code - 30]),
            58..=69 => Some(FUNCTION[code - 58]),
            89..=98 => Some(KEYPAD[code - 89]),
            40 => Some("Return"),
            41 => Some("Escape"),
            42 => Some("Backspace"),
            43 => Some("Tab"),
            44 => Some("Space"),
            45 => Some("-"),
            46 => Some("="),
            47 => Some("["),
            48 => Some("]"),
            49 => Some("\\"),
            51 => Some(";"),
            52 => Some("'"),
            53 => Some("`"),
            54 => Some(","),
            55 => Some("."),
            56 => Some("/"),
            57 => Some("CapsLock"),
            70 => Some("PrintScreen"),
            71 => Some("ScrollLock"),
            72 => Some("Pause"),
            73 => Some("Insert"),
            74 => Some("Home"),
            75 => Some("PageUp"),
            76 => Some("Delete"),
            77 => Some("End"),
            78 => Some("PageDown"),
            79 => Some("Right"),
            80 => Some("Left"),
            81 => Some("Down"),
            82 => Some("Up"),
            83 => Some("Numlock"),
            84 => Some("Keypad /"),
            85 => Some("Keypad *"),
            86 => Some("Keypad -"),
            87 => Some("Keypad +"),
            88 => Some("Keypad Enter"),
            99 => Some("Keypad ."),
            100 => Some("<>"),
            224 => Some("Left Ctrl"),
            225 => Some("Left Shift"),
            226 => Some("Left Alt"),
            227 => Some("Left GUI"),
            228 => Some("Right Ctrl"),
            229 => Some("Right Shift"),
            230 => Some("Right Alt"),
            231 => Some("Right GUI"),
            _ => None,
        }
    }
}

/// Bind-list index of a key inside the keyboard group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(pub u16);

impl CanonicalKey {
    pub const UNKNOWN: CanonicalKey = CanonicalKey(0);

    pub const fn is_unknown(self) -> bool {
        self.0 == 0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Host keyboard driver whose extended-key numbering the translator follows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostLayout {
    Xorg,
    Evdev,
    Windows,
    Os2,
}

impl Default for HostLayout {
    fn default() -> Self {
        if cfg!(target_os = "windows") {
            HostLayout::Windows
        } else {
            HostLayout::Xorg
        }
    }
}

/// How platform scancodes become canonical keys
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Translation {
    /// Translate through the set-1 table plus the host extension
    Scancodes(HostLayout),
    /// Use platform codes directly
    Bypass,
}

impl Default for Translation {
    fn default() -> Self {
        Translation::Scancodes(HostLayout::default())
    }
}

/// Set-1 layout of the main keyboard block, canonical → platform
const BASE_LAYOUT: &[(u16, Scancode)] = &[
    (0x01, Scancode::ESCAPE),
    (0x02, Scancode::DIGIT1),
    (0x03, Scancode::DIGIT2),
    (0x04, Scancode::DIGIT3),
    (0x05, Scancode::DIGIT4),
    (0x06, Scancode::DIGIT5),
    (0x07, Scancode::DIGIT6),
    (0x08, Scancode::DIGIT7),
    (0x09, Scancode::DIGIT8),
    (0x0a, Scancode::DIGIT9),
    (0x0b, Scancode::DIGIT0),
    (0x0c, Scancode::MINUS),
    (0x0d, Scancode::EQUALS),
    (0x0e, Scancode::BACKSPACE),
    (0x0f, Scancode::TAB),
    (0x10, Scancode::Q),
    (0x11, Scancode::W),
    (0x12, Scancode::E),
    (0x13, Scancode::R),
    (0x14, Scancode::T),
    (0x15, Scancode::Y),
    (0x16, Scancode::U),
    (0x17, Scancode::I),
    (0x18, Scancode::O),
    (0x19, Scancode::P),
    (0x1a, Scancode::LEFTBRACKET),
    (0x1b, Scancode::RIGHTBRACKET),
    (0x1c, Scancode::RETURN),
    (0x1d, Scancode::LCTRL),
    (0x1e, Scancode::A),
    (0x1f, Scancode::S),
    (0x20, Scancode::D),
    (0x21, Scancode::F),
    (0x22, Scancode::G),
    (0x23, Scancode::H),
    (0x24, Scancode::J),
    (0x25, Scancode::K),
    (0x26, Scancode::L),
    (0x27, Scancode::SEMICOLON),
    (0x28, Scancode::APOSTROPHE),
    (0x29, Scancode::GRAVE),
    (0x2a, Scancode::LSHIFT),
    (0x2b, Scancode::BACKSLASH),
    (0x2c, Scancode::Z),
    (0x2d, Scancode::X),
    (0x2e, Scancode::C),
    (0x2f, Scancode::V),
    (0x30, Scancode::B),
    (0x31, Scancode::N),
    (0x32, Scancode::M),
    (0x33, Scancode::COMMA),
    (0x34, Scancode::PERIOD),
    (0x35, Scancode::SLASH),
    (0x36, Scancode::RSHIFT),
    (0x37, Scancode::KP_MULTIPLY),
    (0x38, Scancode::LALT),
    (0x39, Scancode::SPACE),
    (0x3a, Scancode::CAPSLOCK),
    (0x3b, Scancode::F1),
    (0x3c, Scancode::F2),
    (0x3d, Scancode::F3),
    (0x3e, Scancode::F4),
    (0x3f, Scancode::F5),
    (0x40, Scancode::F6),
    (0x41, Scancode::F7),
    (0x42, Scancode::F8),
    (0x43, Scancode::F9),
    (0x44, Scancode::F10),
    (0x45, Scancode::NUMLOCK),
    (0x46, Scancode::SCROLLLOCK),
    (0x47, Scancode::KP_7),
    (0x48, Scancode::KP_8),
    (0x49, Scancode::KP_9),
    (0x4a, Scancode::KP_MINUS),
    (0x4b, Scancode::KP_4),
    (0x4c, Scancode::KP_5),
    (0x4d, Scancode::KP_6),
    (0x4e, Scancode::KP_PLUS),
    (0x4f, Scancode::KP_1),
    (0x50, Scancode::KP_2),
    (0x51, Scancode::KP_3),
    (0x52, Scancode::KP_0),
    (0x53, Scancode::KP_PERIOD),
    (0x56, Scancode::NONUSBACKSLASH),
    (0x57, Scancode::F11),
    (0x58, Scancode::F12),
];

const XORG_EXTENSION: &[(u16, Scancode)] = &[
    (0x59, Scancode::HOME),
    (0x5a, Scancode::UP),
    (0x5b, Scancode::PAGEUP),
    (0x5c, Scancode::LEFT),
    (0x5e, Scancode::RIGHT),
    (0x5f, Scancode::END),
    (0x60, Scancode::DOWN),
    (0x61, Scancode::PAGEDOWN),
    (0x62, Scancode::INSERT),
    (0x63, Scancode::DELETE),
    (0x64, Scancode::KP_ENTER),
    (0x65, Scancode::RCTRL),
    (0x66, Scancode::PAUSE),
    (0x67, Scancode::PRINTSCREEN),
    (0x68, Scancode::KP_DIVIDE),
    (0x69, Scancode::RALT),
];

const EVDEV_EXTENSION: &[(u16, Scancode)] = &[
    (0x60, Scancode::KP_ENTER),
    (0x61, Scancode::RCTRL),
    (0x62, Scancode::KP_DIVIDE),
    (0x63, Scancode::PRINTSCREEN),
    (0x64, Scancode::RALT),
    (0x66, Scancode::HOME),
    (0x67, Scancode::UP),
    (0x68, Scancode::PAGEUP),
    (0x69, Scancode::LEFT),
    (0x6a, Scancode::RIGHT),
    (0x6b, Scancode::END),
    (0x6c, Scancode::DOWN),
    (0x6d, Scancode::PAGEDOWN),
    (0x6e, Scancode::INSERT),
    (0x6f, Scancode::DELETE),
    (0x77, Scancode::PAUSE),
];

const WINDOWS_EXTENSION: &[(u16, Scancode)] = &[
    (0x9c, Scancode::KP_ENTER),
    (0x9d, Scancode::RCTRL),
    (0xb5, Scancode::KP_DIVIDE),
    (0xb7, Scancode::PRINTSCREEN),
    (0xb8, Scancode::RALT),
    (0xc5, Scancode::PAUSE),
    (0xc7, Scancode::HOME),
    (0xc8, Scancode::UP),
    (0xc9, Scancode::PAGEUP),
    (0xcb, Scancode::LEFT),
    (0xcd, Scancode::RIGHT),
    (0xcf, Scancode::END),
    (0xd0, Scancode::DOWN),
    (0xd1, Scancode::PAGEDOWN),
    (0xd2, Scancode::INSERT),
    (0xd3, Scancode::DELETE),
];

const OS2_EXTENSION: &[(u16, Scancode)] = &[
    (0x5a, Scancode::KP_ENTER),
    (0x5b, Scancode::RCTRL),
    (0x5c, Scancode::KP_DIVIDE),
    (0x5e, Scancode::RALT),
    (0x5f, Scancode::PAUSE),
    (0x60, Scancode::HOME),
    (0x61, Scancode::UP),
    (0x62, Scancode::PAGEUP),
    (0x63, Scancode::LEFT),
    (0x64, Scancode::RIGHT),
    (0x65, Scancode::END),
    (0x66, Scancode::DOWN),
    (0x67, Scancode::PAGEDOWN),
    (0x68, Scancode::INSERT),
    (0x69, Scancode::DELETE),
];

impl HostLayout {
    fn extension(self) -> &'static [(u16, Scancode)] {
        match self {
            HostLayout::Xorg => XORG_EXTENSION,
            HostLayout::Evdev => EVDEV_EXTENSION,
            HostLayout::Windows => WINDOWS_EXTENSION,
            HostLayout::Os2 => OS2_EXTENSION,
        }
    }
}

/// Bidirectional platform/canonical lookup
#[derive(Debug, Clone)]
pub struct ScancodeTranslator {
    translation: Translation,
    /// Indexed by platform scancode
    to_canonical: Vec<CanonicalKey>,
    /// Indexed by canonical key
    to_platform: Vec<Scancode>,
}

impl ScancodeTranslator {
    pub fn new(translation: Translation) -> Self {
        match translation {
            Translation::Bypass => Self {
                translation,
                to_canonical: (0..NUM_SCANCODES as u16).map(CanonicalKey).collect(),
                to_platform: (0..NUM_SCANCODES as u16).map(Scancode).collect(),
            },
            Translation::Scancodes(layout) => {
                let mut to_platform = vec![Scancode::UNKNOWN; NUM_CANONICAL_KEYS];
                for &(canonical, scancode) in BASE_LAYOUT.iter().chain(layout.extension()) {
                    to_platform[canonical as usize] = scancode;
                }

                // Ascending fill: on a shared platform code the higher canonical key wins
                let mut to_canonical = vec![CanonicalKey::UNKNOWN; NUM_SCANCODES];
                for (canonical, scancode) in to_platform.iter().enumerate() {
                    if !scancode.is_unknown() {
                        to_canonical[scancode.0 as usize] = CanonicalKey(canonical as u16);
                    }
                }

                Self {
                    translation,
                    to_canonical,
                    to_platform,
                }
            }
        }
    }

    pub fn translation(&self) -> Translation {
        self.translation
    }

    /// Number of canonical key slots, i.e. keyboard bind lists
    pub fn key_count(&self) -> usize {
        self.to_platform.len()
    }

    /// Platform → canonical, `CanonicalKey::UNKNOWN` when unmapped
    pub fn to_canonical(&self, scancode: Scancode) -> CanonicalKey {
        self.to_canonical
            .get(scancode.0 as usize)
            .copied()
            .unwrap_or(CanonicalKey::UNKNOWN)
    }

    /// Canonical → platform, `Scancode::UNKNOWN` when unmapped
    pub fn to_platform(&self, key: CanonicalKey) -> Scancode {
        self.to_platform
            .get(key.index())
            .copied()
            .unwrap_or(Scancode::UNKNOWN)
    }
}

impl Default for ScancodeTranslator {
    fn default() -> Self {
        Self::new(Translation::Scancodes(HostLayout::default()))
    }
}
