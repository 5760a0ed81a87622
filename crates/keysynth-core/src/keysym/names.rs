//! Symbolic names for the function and modifier keysyms this crate deals with.
//!
//! Names follow `X11/keysymdef.h` without the `XK_` prefix.  The table is only
//! used for log output and for parsing CLI arguments; the mapping rules in
//! [`super::map_code_point`] never consult it.

use super::Keysym;

/// `(name, keysym)` pairs.  Lookups are linear; the table is tiny.
const NAMED_KEYSYMS: &[(&str, Keysym)] = &[
    ("BackSpace", Keysym(0xFF08)),
    ("Tab", Keysym(0xFF09)),
    ("Return", Keysym::RETURN),
    ("Escape", Keysym::ESCAPE),
    ("Delete", Keysym::DELETE),
    ("Home", Keysym(0xFF50)),
    ("Left", Keysym(0xFF51)),
    ("Up", Keysym(0xFF52)),
    ("Right", Keysym(0xFF53)),
    ("Down", Keysym(0xFF54)),
    ("Page_Up", Keysym(0xFF55)),
    ("Page_Down", Keysym(0xFF56)),
    ("End", Keysym::END),
    ("Insert", Keysym(0xFF63)),
    ("KP_End", Keysym::KP_END),
    ("Shift_L", Keysym::SHIFT_L),
    ("Shift_R", Keysym::SHIFT_R),
    ("Control_L", Keysym::CONTROL_L),
    ("Control_R", Keysym::CONTROL_R),
    ("Meta_L", Keysym::META_L),
    ("Meta_R", Keysym::META_R),
    ("Alt_L", Keysym::ALT_L),
    ("Alt_R", Keysym::ALT_R),
    ("ISO_Level3_Shift", Keysym::ISO_LEVEL3_SHIFT),
    ("space", Keysym(0x0020)),
];

/// Returns the name of `keysym`, if it is in the table.
pub fn name_of(keysym: Keysym) -> Option<&'static str> {
    NAMED_KEYSYMS
        .iter()
        .find(|(_, k)| *k == keysym)
        .map(|(name, _)| *name)
}

/// Looks up a keysym by name.  Matching is case-sensitive, like keysymdef.h.
pub fn from_name(name: &str) -> Option<Keysym> {
    NAMED_KEYSYMS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, k)| *k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_round_trips() {
        for (name, keysym) in NAMED_KEYSYMS {
            assert_eq!(from_name(name), Some(*keysym));
            assert_eq!(name_of(*keysym), Some(*name));
        }
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert_eq!(from_name("end"), None);
        assert_eq!(from_name("End"), Some(Keysym::END));
    }
}
