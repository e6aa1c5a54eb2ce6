//! KeyCode naming and serialization
//!
//! One table drives both directions, so config files and scene scripts
//! always agree on key names.

use serde::Deserialize;
use winit::keyboard::KeyCode;

const KEY_NAMES: &[(KeyCode, &str)] = &[
    (KeyCode::KeyA, "A"),
    (KeyCode::KeyB, "B"),
    (KeyCode::KeyC, "C"),
    (KeyCode::KeyD, "D"),
    (KeyCode::KeyE, "E"),
    (KeyCode::KeyF, "F"),
    (KeyCode::KeyG, "G"),
    (KeyCode::KeyH, "H"),
    (KeyCode::KeyI, "I"),
    (KeyCode::KeyJ, "J"),
    (KeyCode::KeyK, "K"),
    (KeyCode::KeyL, "L"),
    (KeyCode::KeyM, "M"),
    (KeyCode::KeyN, "N"),
    (KeyCode::KeyO, "O"),
    (KeyCode::KeyP, "P"),
    (KeyCode::KeyQ, "Q"),
    (KeyCode::KeyR, "R"),
    (KeyCode::KeyS, "S"),
    (KeyCode::KeyT, "T"),
    (KeyCode::KeyU, "U"),
    (KeyCode::KeyV, "V"),
    (KeyCode::KeyW, "W"),
    (KeyCode::KeyX, "X"),
    (KeyCode::KeyY, "Y"),
    (KeyCode::KeyZ, "Z"),
    (KeyCode::Digit0, "0"),
    (KeyCode::Digit1, "1"),
    (KeyCode::Digit2, "2"),
    (KeyCode::Digit3, "3"),
    (KeyCode::Digit4, "4"),
    (KeyCode::Digit5, "5"),
    (KeyCode::Digit6, "6"),
    (KeyCode::Digit7, "7"),
    (KeyCode::Digit8, "8"),
    (KeyCode::Digit9, "9"),
    (KeyCode::ArrowUp, "ArrowUp"),
    (KeyCode::ArrowDown, "ArrowDown"),
    (KeyCode::ArrowLeft, "ArrowLeft"),
    (KeyCode::ArrowRight, "ArrowRight"),
    (KeyCode::ShiftLeft, "ShiftLeft"),
    (KeyCode::ShiftRight, "ShiftRight"),
    (KeyCode::ControlLeft, "ControlLeft"),
    (KeyCode::ControlRight, "ControlRight"),
    (KeyCode::AltLeft, "AltLeft"),
    (KeyCode::AltRight, "AltRight"),
    (KeyCode::Space, "Space"),
    (KeyCode::Enter, "Enter"),
    (KeyCode::Escape, "Escape"),
    (KeyCode::Tab, "Tab"),
    (KeyCode::Home, "Home"),
    (KeyCode::End, "End"),
    (KeyCode::PageUp, "PageUp"),
    (KeyCode::PageDown, "PageDown"),
    (KeyCode::F1, "F1"),
    (KeyCode::F2, "F2"),
    (KeyCode::F3, "F3"),
    (KeyCode::F4, "F4"),
    (KeyCode::F5, "F5"),
    (KeyCode::F6, "F6"),
    (KeyCode::F7, "F7"),
    (KeyCode::F8, "F8"),
    (KeyCode::F9, "F9"),
    (KeyCode::F10, "F10"),
    (KeyCode::F11, "F11"),
    (KeyCode::F12, "F12"),
];

/// Short lowercase spellings accepted in scene scripts.
const KEY_ALIASES: &[(&str, KeyCode)] = &[
    ("shift", KeyCode::ShiftLeft),
    ("ctrl", KeyCode::ControlLeft),
    ("control", KeyCode::ControlLeft),
    ("alt", KeyCode::AltLeft),
    ("space", KeyCode::Space),
    ("esc", KeyCode::Escape),
    ("escape", KeyCode::Escape),
    ("enter", KeyCode::Enter),
    ("home", KeyCode::Home),
    ("up", KeyCode::ArrowUp),
    ("down", KeyCode::ArrowDown),
    ("left", KeyCode::ArrowLeft),
    ("right", KeyCode::ArrowRight),
];

/// Human-readable name for `key`, or `"Unknown"`
pub fn keycode_to_string(key: &KeyCode) -> &'static str {
    KEY_NAMES
        .iter()
        .find(|(code, _)| code == key)
        .map_or("Unknown", |(_, name)| *name)
}

/// Exact-name lookup, the inverse of [`keycode_to_string`]
pub fn string_to_keycode(s: &str) -> Option<KeyCode> {
    KEY_NAMES
        .iter()
        .find(|(_, name)| *name == s)
        .map(|(code, _)| *code)
}

/// Lenient lookup for script tokens: aliases first, then a
/// case-insensitive match against the canonical names.
pub fn parse_key_token(token: &str) -> Option<KeyCode> {
    let token = token.trim();
    let lower = token.to_lowercase();
    KEY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map(|(_, code)| *code)
        .or_else(|| {
            KEY_NAMES
                .iter()
                .find(|(_, name)| name.eq_ignore_ascii_case(token))
                .map(|(code, _)| *code)
        })
}

/// Serialize a KeyCode as a string
pub(crate) fn serialize_keycode<S>(key: &KeyCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(keycode_to_string(key))
}

/// Deserialize a KeyCode from a string
pub(crate) fn deserialize_keycode<'de, D>(deserializer: D) -> Result<KeyCode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_key_token(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("Unknown key name: '{}'", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_roundtrips() {
        for (code, name) in KEY_NAMES {
            assert_eq!(keycode_to_string(code), *name);
            assert_eq!(string_to_keycode(name), Some(*code));
        }
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(keycode_to_string(&KeyCode::NumLock), "Unknown");
        assert_eq!(string_to_keycode("NumLock"), None);
    }

    #[test]
    fn test_script_tokens() {
        assert_eq!(parse_key_token("a"), Some(KeyCode::KeyA));
        assert_eq!(parse_key_token(" Shift "), Some(KeyCode::ShiftLeft));
        assert_eq!(parse_key_token("arrowleft"), Some(KeyCode::ArrowLeft));
        assert_eq!(parse_key_token("left"), Some(KeyCode::ArrowLeft));
        assert_eq!(parse_key_token("f5"), Some(KeyCode::F5));
        assert_eq!(parse_key_token("jump"), None);
    }
}
