//! TOML scene script parser
//!
//! Parses script files into a structured representation.

use std::path::Path;

use hashbrown::HashSet;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use super::ScriptError;
use super::ast::{AssertCondition, AssertValue, CompareOp, MouseInput, SceneScript};
use crate::input::{parse_key_token, parse_mouse_button};
use crate::scene::RenderMode;

impl SceneScript {
    /// Parse a TOML scene script from a string
    pub fn from_toml(toml_str: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Parse a TOML scene script from a file
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String, ScriptError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Comparison tokens, two-character forms first so `<=` never reads as `<`
const OPERATORS: [(&str, CompareOp); 6] = [
    ("==", CompareOp::Eq),
    ("!=", CompareOp::Ne),
    ("<=", CompareOp::Le),
    (">=", CompareOp::Ge),
    ("<", CompareOp::Lt),
    (">", CompareOp::Gt),
];

/// Split `lhs op rhs` at the first comparison character.
fn split_operator(s: &str) -> Option<(&str, CompareOp, &str)> {
    let pos = s.find(['=', '!', '<', '>'])?;
    let rest = &s[pos..];
    OPERATORS
        .iter()
        .find(|(token, _)| rest.starts_with(token))
        .map(|&(token, op)| (&s[..pos], op, &rest[token.len()..]))
}

impl AssertCondition {
    /// Parse an assertion string like "$root_x > 1.0"
    pub fn parse(s: &str) -> Result<Self, ScriptError> {
        let s = s.trim();
        let (variable, operator, value) = split_operator(s)
            .ok_or_else(|| ScriptError::InvalidAssertion(format!("no operator found in: {s}")))?;

        let variable = variable.trim();
        if !variable.starts_with('$') || variable.len() < 2 {
            return Err(ScriptError::InvalidAssertion(format!(
                "left side must be a $variable: {s}"
            )));
        }

        Ok(Self {
            variable: variable.to_string(),
            operator,
            value: AssertValue::parse(value)?,
        })
    }
}

impl AssertValue {
    /// Parse the right side of an assertion.
    ///
    /// Besides numbers and variables this accepts the scene's symbolic
    /// values: `on`/`off`/`true`/`false` for flags and the render mode names.
    pub fn parse(s: &str) -> Result<Self, ScriptError> {
        let s = s.trim();
        if let Some(name) = s.strip_prefix("$prev_") {
            return Ok(AssertValue::PrevValue(name.to_string()));
        }
        if s.starts_with('$') {
            return Ok(AssertValue::Variable(s.to_string()));
        }
        if let Some(value) = symbolic_value(s) {
            return Ok(AssertValue::Number(value));
        }
        s.parse()
            .map(AssertValue::Number)
            .map_err(|_| ScriptError::InvalidAssertion(format!("invalid number: {s}")))
    }
}

fn symbolic_value(s: &str) -> Option<f64> {
    let value = match s.to_ascii_lowercase().as_str() {
        "true" | "on" => 1.0,
        "false" | "off" => 0.0,
        "points" => RenderMode::Points.code().into(),
        "lines" => RenderMode::Lines.code().into(),
        "triangles" => RenderMode::Triangles.code().into(),
        _ => return None,
    };
    Some(value)
}

/// Parse symbolic keys like `"shift+a"`. `"idle"` and `""` hold nothing.
pub fn parse_keys(s: &str, frame: u64) -> Result<HashSet<KeyCode>, ScriptError> {
    s.split('+')
        .map(str::trim)
        .filter(|token| !token.is_empty() && !token.eq_ignore_ascii_case("idle"))
        .map(|token| {
            parse_key_token(token).ok_or_else(|| ScriptError::InvalidKey {
                frame,
                key: token.to_string(),
            })
        })
        .collect()
}

/// Parse the held buttons of a mouse entry
pub fn parse_buttons(mouse: &MouseInput, frame: u64) -> Result<HashSet<MouseButton>, ScriptError> {
    mouse
        .buttons
        .iter()
        .map(|name| {
            parse_mouse_button(name).ok_or_else(|| ScriptError::InvalidButton {
                frame,
                button: name.clone(),
            })
        })
        .collect()
}
