//! Scene script AST types.

use serde::{Deserialize, Serialize};

use super::ScriptError;
use crate::scene::FigureKind;

/// Longest timeline a script may compile to
pub const MAX_SCRIPT_FRAMES: u64 = 1_000_000;

/// Complete scene script file (TOML structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneScript {
    /// Figure to drive; the configured figure when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figure: Option<FigureKind>,

    /// Seed for the randomize action; the configured seed when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Seconds per frame
    #[serde(default = "default_dt")]
    pub dt: f32,

    /// Frame entries
    pub frames: Vec<FrameEntry>,
}

fn default_dt() -> f32 {
    1.0 / 60.0
}

/// Single frame entry in the script
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameEntry {
    /// Frame number
    pub f: u64,

    /// Held keys: `"idle"`, `"w"`, `"shift+a"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<String>,

    /// Cursor position and held buttons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mouse: Option<MouseInput>,

    /// Hold this input for `repeat` consecutive frames
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<u64>,

    /// Capture scene variables before and after the frame
    #[serde(default)]
    pub snap: bool,

    /// Assertion condition (e.g., "$root_x > 1.0")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assert: Option<String>,
}

impl FrameEntry {
    /// Number of frames this entry covers (at least one)
    pub fn span(&self) -> u64 {
        self.repeat.unwrap_or(1).max(1)
    }

    /// Last frame the entry covers; snapshots and assertions land here.
    ///
    /// `None` when the span does not fit in a frame number.
    pub fn last_frame(&self) -> Option<u64> {
        self.f.checked_add(self.span() - 1)
    }
}

/// Mouse state for a frame entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MouseInput {
    pub x: f64,
    pub y: f64,
    /// Held buttons: `["left"]`, `["right", "middle"]`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<String>,
}

/// Parsed assertion condition
#[derive(Debug, Clone, PartialEq)]
pub struct AssertCondition {
    /// Variable name (e.g., "$root_x")
    pub variable: String,
    /// Comparison operator
    pub operator: CompareOp,
    /// Value to compare against
    pub value: AssertValue,
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// ==
    Eq,
    /// !=
    Ne,
    /// <
    Lt,
    /// >
    Gt,
    /// <=
    Le,
    /// >=
    Ge,
}

impl CompareOp {
    /// Applies the operator; equality uses a small absolute tolerance.
    pub fn compare(self, actual: f64, expected: f64) -> bool {
        const TOLERANCE: f64 = 1e-4;
        match self {
            CompareOp::Eq => (actual - expected).abs() < TOLERANCE,
            CompareOp::Ne => (actual - expected).abs() >= TOLERANCE,
            CompareOp::Lt => actual < expected,
            CompareOp::Gt => actual > expected,
            CompareOp::Le => actual <= expected,
            CompareOp::Ge => actual >= expected,
        }
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Ne => write!(f, "!="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Le => write!(f, "<="),
            CompareOp::Ge => write!(f, ">="),
        }
    }
}

/// Value in an assertion
#[derive(Debug, Clone, PartialEq)]
pub enum AssertValue {
    /// Numeric literal (`true`/`false` become 1/0)
    Number(f64),
    /// Another variable
    Variable(String),
    /// Previous frame value, stored without the `$prev_` prefix
    PrevValue(String),
}

impl SceneScript {
    /// Number of frames the script runs for.
    ///
    /// Fails when any entry reaches past [`MAX_SCRIPT_FRAMES`].
    pub fn frame_count(&self) -> Result<u64, ScriptError> {
        self.frames.iter().try_fold(0, |count: u64, entry| -> Result<u64, ScriptError> {
            let end = entry
                .last_frame()
                .and_then(|last| last.checked_add(1))
                .filter(|&end| end <= MAX_SCRIPT_FRAMES)
                .ok_or(ScriptError::FrameLimit {
                    frame: entry.f,
                    limit: MAX_SCRIPT_FRAMES,
                })?;
            Ok(count.max(end))
        })
    }

    /// Get frames that have snap enabled
    pub fn snap_frames(&self) -> impl Iterator<Item = &FrameEntry> {
        self.frames.iter().filter(|f| f.snap)
    }

    /// Get frames that have assertions
    pub fn assert_frames(&self) -> impl Iterator<Item = &FrameEntry> {
        self.frames.iter().filter(|f| f.assert.is_some())
    }
}
