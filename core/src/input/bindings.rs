//! Keyboard bindings for scene controls

use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use super::keycode_serde::{deserialize_keycode, keycode_to_string, serialize_keycode};

/// Keyboard bindings with string-based serialization.
///
/// Missing entries in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Move forward; with the modifier, rise
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub forward: KeyCode,
    /// Move back; with the modifier, sink
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub back: KeyCode,
    /// Turn left; with the modifier, strafe left
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub left: KeyCode,
    /// Turn right; with the modifier, strafe right
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub right: KeyCode,
    /// Switches turn keys to strafe and forward/back to rise/sink
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub modifier: KeyCode,
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub modifier_alt: KeyCode,
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub scale_up: KeyCode,
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub scale_down: KeyCode,
    /// Teleport to a random spot (press once)
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub randomize: KeyCode,
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub points: KeyCode,
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub lines: KeyCode,
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub triangles: KeyCode,
    /// Toggle first/third person (press once)
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub camera_toggle: KeyCode,
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub light_toggle: KeyCode,
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub bumper_cars: KeyCode,
    /// Reset the camera into first person at its home angles
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub camera_home: KeyCode,
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub orbit_left: KeyCode,
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub orbit_right: KeyCode,
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub orbit_up: KeyCode,
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub orbit_down: KeyCode,
    #[serde(
        serialize_with = "serialize_keycode",
        deserialize_with = "deserialize_keycode"
    )]
    pub exit: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            modifier: KeyCode::ShiftLeft,
            modifier_alt: KeyCode::ShiftRight,
            scale_up: KeyCode::KeyU,
            scale_down: KeyCode::KeyJ,
            randomize: KeyCode::Space,
            points: KeyCode::KeyP,
            lines: KeyCode::KeyL,
            triangles: KeyCode::KeyT,
            camera_toggle: KeyCode::KeyC,
            light_toggle: KeyCode::KeyO,
            bumper_cars: KeyCode::KeyB,
            camera_home: KeyCode::Home,
            orbit_left: KeyCode::ArrowLeft,
            orbit_right: KeyCode::ArrowRight,
            orbit_up: KeyCode::ArrowUp,
            orbit_down: KeyCode::ArrowDown,
            exit: KeyCode::Escape,
        }
    }
}

impl KeyBindings {
    /// Every binding with its config field name
    pub fn entries(&self) -> [(&'static str, KeyCode); 21] {
        [
            ("forward", self.forward),
            ("back", self.back),
            ("left", self.left),
            ("right", self.right),
            ("modifier", self.modifier),
            ("modifier_alt", self.modifier_alt),
            ("scale_up", self.scale_up),
            ("scale_down", self.scale_down),
            ("randomize", self.randomize),
            ("points", self.points),
            ("lines", self.lines),
            ("triangles", self.triangles),
            ("camera_toggle", self.camera_toggle),
            ("light_toggle", self.light_toggle),
            ("bumper_cars", self.bumper_cars),
            ("camera_home", self.camera_home),
            ("orbit_left", self.orbit_left),
            ("orbit_right", self.orbit_right),
            ("orbit_up", self.orbit_up),
            ("orbit_down", self.orbit_down),
            ("exit", self.exit),
        ]
    }

    /// Warnings for keys bound to more than one action.
    pub fn conflicts(&self) -> Vec<String> {
        let entries = self.entries();
        let mut warnings = Vec::new();
        for (i, (name, key)) in entries.iter().enumerate() {
            if let Some((other, _)) = entries[..i].iter().find(|(_, k)| k == key) {
                warnings.push(format!(
                    "keys.{} '{}' conflicts with keys.{}",
                    name,
                    keycode_to_string(key),
                    other
                ));
            }
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_no_conflicts() {
        assert!(KeyBindings::default().conflicts().is_empty());
    }

    #[test]
    fn test_conflict_detected() {
        let bindings = KeyBindings {
            light_toggle: KeyCode::KeyP,
            ..KeyBindings::default()
        };
        let warnings = bindings.conflicts();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("keys.light_toggle"));
        assert!(warnings[0].contains("keys.points"));
    }

    #[test]
    fn test_toml_uses_key_names() {
        let toml_str = toml::to_string(&KeyBindings::default()).unwrap();
        assert!(toml_str.contains("forward = \"W\""));
        assert!(toml_str.contains("camera_home = \"Home\""));
    }

    #[test]
    fn test_partial_override() {
        let bindings: KeyBindings = toml::from_str("randomize = \"R\"\nexit = \"q\"").unwrap();
        assert_eq!(bindings.randomize, KeyCode::KeyR);
        assert_eq!(bindings.exit, KeyCode::KeyQ);
        assert_eq!(bindings.forward, KeyCode::KeyW);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<KeyBindings, _> = toml::from_str("randomize = \"Hyper\"");
        assert!(result.is_err());
    }
}
