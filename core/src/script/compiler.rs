//! Script compiler
//!
//! Expands a [`SceneScript`] into one [`CompiledFrame`] per executed frame.
//! Frames not covered by an entry are idle; the cursor holds its last
//! scripted position.

use super::ScriptError;
use super::ast::{AssertCondition, SceneScript};
use super::parser::{parse_buttons, parse_keys};
use crate::input::FrameInput;

/// Assertion ready for evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledAssertion {
    /// Original condition text, for reports
    pub condition: String,
    pub parsed: AssertCondition,
}

/// Input and checks for a single frame
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFrame {
    pub input: FrameInput,
    /// Readable input description for snapshots
    pub label: String,
    pub snap: bool,
    pub assertions: Vec<CompiledAssertion>,
}

/// Frame-by-frame timeline of a script
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledScript {
    pub frames: Vec<CompiledFrame>,
}

impl CompiledScript {
    pub fn frame_count(&self) -> u64 {
        self.frames.len() as u64
    }
}

impl SceneScript {
    /// Expand entries into a per-frame timeline.
    ///
    /// Later entries override earlier ones where their spans overlap.
    pub fn compile(&self) -> Result<CompiledScript, ScriptError> {
        let count = self.frame_count()? as usize;
        let mut frames: Vec<CompiledFrame> = (0..count)
            .map(|_| CompiledFrame {
                input: FrameInput::idle(self.dt),
                label: "idle".to_string(),
                snap: false,
                assertions: Vec::new(),
            })
            .collect();
        let mut cursors: Vec<Option<(f64, f64)>> = vec![None; count];

        for entry in &self.frames {
            let keys = entry
                .keys
                .as_deref()
                .map(|k| parse_keys(k, entry.f))
                .transpose()?
                .unwrap_or_default();
            let buttons = entry
                .mouse
                .as_ref()
                .map(|m| parse_buttons(m, entry.f))
                .transpose()?
                .unwrap_or_default();
            let label = describe(entry.keys.as_deref(), entry.mouse.as_ref().map(|m| m.buttons.as_slice()));

            // Bounded by frame_count above
            let last_frame = entry.last_frame().unwrap_or(entry.f);
            for frame in entry.f..=last_frame {
                let slot = &mut frames[frame as usize];
                slot.input.keys = keys.clone();
                slot.input.mouse_buttons = buttons.clone();
                slot.label = label.clone();
                cursors[frame as usize] = entry.mouse.as_ref().map(|m| (m.x, m.y));
            }

            let last = &mut frames[last_frame as usize];
            last.snap |= entry.snap;
            if let Some(condition) = &entry.assert {
                last.assertions.push(CompiledAssertion {
                    condition: condition.clone(),
                    parsed: AssertCondition::parse(condition)?,
                });
            }
        }

        let mut cursor = (0.0, 0.0);
        for (frame, scripted) in frames.iter_mut().zip(cursors) {
            if let Some(position) = scripted {
                cursor = position;
            }
            frame.input.cursor = cursor;
        }

        Ok(CompiledScript { frames })
    }
}

fn describe(keys: Option<&str>, buttons: Option<&[String]>) -> String {
    let mut parts: Vec<String> = keys
        .into_iter()
        .flat_map(|k| k.split('+'))
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty() && k != "idle")
        .collect();
    parts.extend(buttons.unwrap_or_default().iter().map(|b| format!("mouse_{}", b.to_lowercase())));
    if parts.is_empty() {
        "idle".to_string()
    } else {
        parts.join("+")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{AssertValue, MAX_SCRIPT_FRAMES};
    use winit::event::MouseButton;
    use winit::keyboard::KeyCode;

    fn compile(toml_str: &str) -> CompiledScript {
        SceneScript::from_toml(toml_str).unwrap().compile().unwrap()
    }

    #[test]
    fn test_unlisted_frames_are_idle() {
        let script = compile("frames = [{ f = 3, keys = \"w\" }]");
        assert_eq!(script.frame_count(), 4);
        for frame in &script.frames[..3] {
            assert!(frame.input.keys.is_empty());
            assert_eq!(frame.label, "idle");
        }
        assert!(script.frames[3].input.is_pressed(KeyCode::KeyW));
        assert_eq!(script.frames[3].label, "w");
    }

    #[test]
    fn test_repeat_holds_input_and_checks_last_frame() {
        let script = compile(
            r#"frames = [{ f = 2, keys = "shift+w", repeat = 5, snap = true, assert = "$root_y > 0" }]"#,
        );
        assert_eq!(script.frame_count(), 7);
        for frame in &script.frames[2..7] {
            assert!(frame.input.is_pressed(KeyCode::ShiftLeft));
            assert!(frame.input.is_pressed(KeyCode::KeyW));
        }
        assert!(!script.frames[5].snap);
        assert!(script.frames[6].snap);
        assert_eq!(script.frames[6].assertions.len(), 1);
        assert_eq!(script.frames[6].assertions[0].parsed.value, AssertValue::Number(0.0));
    }

    #[test]
    fn test_cursor_holds_last_position() {
        let script = compile(
            r#"frames = [
  { f = 1, mouse = { x = 10.0, y = 5.0, buttons = ["right"] } },
  { f = 4, keys = "idle" },
]"#,
        );
        assert_eq!(script.frames[0].input.cursor, (0.0, 0.0));
        assert_eq!(script.frames[1].input.cursor, (10.0, 5.0));
        assert!(script.frames[1].input.is_held(MouseButton::Right));
        assert!(!script.frames[2].input.is_held(MouseButton::Right));
        assert_eq!(script.frames[4].input.cursor, (10.0, 5.0));
        assert_eq!(script.frames[1].label, "mouse_right");
    }

    #[test]
    fn test_dt_applied_to_every_frame() {
        let script = compile("dt = 0.1\nframes = [{ f = 2 }]");
        assert!(script.frames.iter().all(|f| f.input.dt == 0.1));
    }

    #[test]
    fn test_invalid_assertion_fails_compile() {
        let script = SceneScript::from_toml(r#"frames = [{ f = 0, assert = "$x ~ 1" }]"#).unwrap();
        assert!(matches!(script.compile(), Err(ScriptError::InvalidAssertion(_))));
    }

    #[test]
    fn test_frame_number_overflow_is_an_error() {
        let far = SceneScript::from_toml("frames = [{ f = 18446744073709551615 }]").unwrap();
        assert!(matches!(far.compile(), Err(ScriptError::FrameLimit { frame: u64::MAX, .. })));

        let long = SceneScript::from_toml("frames = [{ f = 5, repeat = 18446744073709551615 }]").unwrap();
        assert_eq!(long.frames[0].last_frame(), None);
        assert!(matches!(long.compile(), Err(ScriptError::FrameLimit { frame: 5, .. })));
    }

    #[test]
    fn test_frame_limit() {
        let at_limit = SceneScript::from_toml(&format!("frames = [{{ f = {} }}]", MAX_SCRIPT_FRAMES - 1)).unwrap();
        assert_eq!(at_limit.frame_count().unwrap(), MAX_SCRIPT_FRAMES);

        let past = SceneScript::from_toml("frames = [{ f = 0 }, { f = 4000000000, keys = \"w\" }]").unwrap();
        let err = past.compile().unwrap_err();
        assert!(matches!(err, ScriptError::FrameLimit { frame: 4_000_000_000, limit: MAX_SCRIPT_FRAMES }));
    }

    #[test]
    fn test_empty_script() {
        let script = compile("frames = []");
        assert_eq!(script.frame_count(), 0);
    }
}
