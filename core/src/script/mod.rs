//! Scene scripts
//!
//! A scene script is a human-readable TOML file that drives the input
//! sampler frame by frame, for regression tests and CI runs without a
//! window.
//!
//! # Example Script
//!
//! ```toml
//! figure = "car"
//! seed = 12345
//!
//! frames = [
//!   { f = 0, keys = "idle", snap = true },
//!   { f = 1, keys = "w", repeat = 60, snap = true, assert = "$root_z > 5" },
//!   { f = 61, mouse = { x = 40.0, y = 0.0, buttons = ["right"] } },
//!   { f = 62, mouse = { x = 80.0, y = 0.0, buttons = ["right"] }, assert = "$cam_h != $prev_cam_h" },
//! ]
//! ```
//!
//! # Keys
//!
//! Keys are joined with `+`: `"idle"`, `"w"`, `"shift+a"`, `"up+left"`.
//! Names match the config file's key names; `shift`, `ctrl`, `alt`,
//! `space`, `esc`, `home` and the arrow directions are accepted too.

mod ast;
mod compiler;
mod parser;
mod report;
mod runner;

pub use ast::{AssertCondition, AssertValue, CompareOp, FrameEntry, MAX_SCRIPT_FRAMES, MouseInput, SceneScript};
pub use compiler::{CompiledAssertion, CompiledFrame, CompiledScript};
pub use parser::{parse_buttons, parse_keys};
pub use report::{AssertionResult, ExecutionReport, ReportSummary, Snapshot};
pub use runner::{HeadlessConfig, HeadlessRunner, SCENE_VARIABLES, scene_variables};

use crate::backend::BackendError;

/// Errors from loading, compiling or running a scene script
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse script: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to serialize script: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("frame {frame}: unknown key '{key}'")]
    InvalidKey { frame: u64, key: String },
    #[error("frame {frame}: unknown mouse button '{button}'")]
    InvalidButton { frame: u64, button: String },
    #[error("frame {frame}: entry runs past the {limit}-frame limit")]
    FrameLimit { frame: u64, limit: u64 },
    #[error("invalid assertion: {0}")]
    InvalidAssertion(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
}
