//! Core types for the binding engine: Modifiers, BindFlags, HatDirection, handles

use std::fmt;

/// Magnitude above which a digital event counts as pressed
pub const ACTIVATION_THRESHOLD: i32 = 25000;

/// Magnitude reported for fully pressed keys and buttons
pub const FULL_MAGNITUDE: i32 = 32767;

/// Upper bound of an event's contributor count
pub const MAX_ACTIVITY: u16 = 32767;

/// Mapper modifier flags as a bitfield.
///
/// These are binding qualifiers, not the emulated keyboard's shift state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const MOD1: Modifiers = Modifiers(0b001);
    pub const MOD2: Modifiers = Modifiers(0b010);
    pub const MOD3: Modifiers = Modifiers(0b100);

    /// All modifiers in persistence order
    pub const ALL: [Modifiers; 3] = [Modifiers::MOD1, Modifiers::MOD2, Modifiers::MOD3];

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    #[inline]
    pub const fn without(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }

    #[inline]
    pub const fn toggled(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 ^ other.0)
    }

    /// Flag word used in mapper files (`mod1`, `mod2`, `mod3`)
    pub fn config_word(self) -> Option<&'static str> {
        match self.0 {
            0b001 => Some("mod1"),
            0b010 => Some("mod2"),
            0b100 => Some("mod3"),
            _ => None,
        }
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [
            (Modifiers::MOD1, "Mod1"),
            (Modifiers::MOD2, "Mod2"),
            (Modifiers::MOD3, "Mod3"),
        ]
        .iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| *name)
        .collect();
        write!(f, "{}", parts.join("+"))
    }
}

/// Behaviour flags carried by a bind
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BindFlags(u8);

impl BindFlags {
    pub const NONE: BindFlags = BindFlags(0);
    /// First release latches the bind, the next release lets go
    pub const HOLD: BindFlags = BindFlags(0b001);
    /// Reserved for key repeat; persisted but not acted on
    pub const REPEAT: BindFlags = BindFlags(0b100);

    #[inline]
    pub const fn contains(self, other: BindFlags) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn toggled(self, other: BindFlags) -> BindFlags {
        BindFlags(self.0 ^ other.0)
    }

    #[inline]
    pub const fn union(self, other: BindFlags) -> BindFlags {
        BindFlags(self.0 | other.0)
    }
}

/// One of the four cardinal hat directions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HatDirection {
    Up,
    Right,
    Down,
    Left,
}

impl HatDirection {
    pub const ALL: [HatDirection; 4] = [
        HatDirection::Up,
        HatDirection::Right,
        HatDirection::Down,
        HatDirection::Left,
    ];

    /// Bit used for this direction in a hat state mask
    pub const fn mask(self) -> u8 {
        match self {
            HatDirection::Up => 0x01,
            HatDirection::Right => 0x02,
            HatDirection::Down => 0x04,
            HatDirection::Left => 0x08,
        }
    }

    /// Slot offset within a hat's four bind lists
    pub const fn index(self) -> usize {
        match self {
            HatDirection::Up => 0,
            HatDirection::Right => 1,
            HatDirection::Down => 2,
            HatDirection::Left => 3,
        }
    }

    /// Pick one direction from a hat mask, up > right > down > left.
    ///
    /// Diagonals resolve to their higher-priority component; a centered
    /// hat yields `None`.
    pub fn from_mask(mask: u8) -> Option<HatDirection> {
        HatDirection::ALL
            .into_iter()
            .find(|dir| mask & dir.mask() != 0)
    }

    pub const fn name(self) -> &'static str {
        match self {
            HatDirection::Up => "up",
            HatDirection::Right => "right",
            HatDirection::Down => "down",
            HatDirection::Left => "left",
        }
    }
}

/// Stable handle of a bind in the directory's arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindId(pub(crate) u32);

/// Index of an event in the directory's registry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub(crate) usize);

impl EventId {
    pub const fn index(self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_contains_subset() {
        let held = Modifiers::MOD1 | Modifiers::MOD2;
        assert!(held.contains(Modifiers::MOD1));
        assert!(held.contains(Modifiers::NONE));
        assert!(!held.contains(Modifiers::MOD3));
        assert!(!Modifiers::MOD1.contains(held));
    }

    #[test]
    fn test_modifiers_without_and_toggle() {
        let held = Modifiers::MOD1 | Modifiers::MOD3;
        assert_eq!(held.without(Modifiers::MOD1), Modifiers::MOD3);
        assert_eq!(held.toggled(Modifiers::MOD2).bits(), 0b111);
        assert_eq!(held.toggled(Modifiers::MOD3), Modifiers::MOD1);
    }

    #[test]
    fn test_modifiers_ordering_follows_bits() {
        assert!(Modifiers::MOD1 < Modifiers::MOD2);
        assert!(Modifiers::MOD2 < (Modifiers::MOD1 | Modifiers::MOD2));
        assert!((Modifiers::MOD1 | Modifiers::MOD2) < Modifiers::MOD3);
    }

    #[test]
    fn test_modifiers_display() {
        assert_eq!(Modifiers::NONE.to_string(), "");
        assert_eq!((Modifiers::MOD1 | Modifiers::MOD3).to_string(), "Mod1+Mod3");
    }

    #[test]
    fn test_bind_flags() {
        let flags = BindFlags::NONE.toggled(BindFlags::HOLD);
        assert!(flags.contains(BindFlags::HOLD));
        assert!(!flags.contains(BindFlags::REPEAT));
        assert!(!flags.toggled(BindFlags::HOLD).contains(BindFlags::HOLD));
    }

    #[test]
    fn test_hat_from_mask_priority() {
        assert_eq!(HatDirection::from_mask(0), None);
        assert_eq!(HatDirection::from_mask(0x01), Some(HatDirection::Up));
        assert_eq!(HatDirection::from_mask(0x03), Some(HatDirection::Up));
        assert_eq!(HatDirection::from_mask(0x06), Some(HatDirection::Right));
        assert_eq!(HatDirection::from_mask(0x0c), Some(HatDirection::Down));
        assert_eq!(HatDirection::from_mask(0x08), Some(HatDirection::Left));
        assert_eq!(HatDirection::from_mask(0xf0), None);
    }

    #[test]
    fn test_hat_mask_and_index_agree() {
        for dir in HatDirection::ALL {
            assert_eq!(dir.mask(), 1 << dir.index());
        }
    }
}
