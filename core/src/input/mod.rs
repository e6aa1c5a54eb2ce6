//! Input sampling for keyboard and mouse
//!
//! The window provider hands over one [`FrameInput`] snapshot per frame; the
//! [`InputSampler`] turns it into [`SceneState`](crate::scene::SceneState)
//! changes.

mod bindings;
mod edge;
pub(crate) mod keycode_serde;
mod sampler;

pub use bindings::KeyBindings;
pub use edge::EdgeTrigger;
pub use keycode_serde::{keycode_to_string, parse_key_token, string_to_keycode};
pub use sampler::InputSampler;

use hashbrown::HashSet;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Per-frame snapshot delivered by the window/input provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Keys held down this frame
    pub keys: HashSet<KeyCode>,
    /// Mouse buttons held down this frame
    pub mouse_buttons: HashSet<MouseButton>,
    /// Cursor position in window pixels
    pub cursor: (f64, f64),
    /// Seconds since the previous frame
    pub dt: f32,
}

impl FrameInput {
    /// No keys or buttons held
    pub fn idle(dt: f32) -> Self {
        Self {
            dt,
            ..Self::default()
        }
    }

    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.keys.insert(key);
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.mouse_buttons.insert(button);
        self
    }

    pub fn at_cursor(mut self, x: f64, y: f64) -> Self {
        self.cursor = (x, y);
        self
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    pub fn is_held(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }
}

/// Lowercase name of a mouse button as used in scene scripts
pub fn mouse_button_name(button: MouseButton) -> &'static str {
    match button {
        MouseButton::Left => "left",
        MouseButton::Right => "right",
        MouseButton::Middle => "middle",
        MouseButton::Back => "back",
        MouseButton::Forward => "forward",
        MouseButton::Other(_) => "other",
    }
}

/// Parses a script mouse-button name
pub fn parse_mouse_button(name: &str) -> Option<MouseButton> {
    match name.trim().to_lowercase().as_str() {
        "left" | "primary" => Some(MouseButton::Left),
        "right" | "secondary" => Some(MouseButton::Right),
        "middle" => Some(MouseButton::Middle),
        "back" => Some(MouseButton::Back),
        "forward" => Some(MouseButton::Forward),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let input = FrameInput::idle(0.016)
            .with_key(KeyCode::KeyW)
            .with_button(MouseButton::Left)
            .at_cursor(10.0, 20.0);
        assert!(input.is_pressed(KeyCode::KeyW));
        assert!(!input.is_pressed(KeyCode::KeyS));
        assert!(input.is_held(MouseButton::Left));
        assert_eq!(input.cursor, (10.0, 20.0));
        assert_eq!(input.dt, 0.016);
    }

    #[test]
    fn test_mouse_button_names() {
        for button in [MouseButton::Left, MouseButton::Right, MouseButton::Middle] {
            assert_eq!(parse_mouse_button(mouse_button_name(button)), Some(button));
        }
        assert_eq!(parse_mouse_button("wheel"), None);
    }
}
