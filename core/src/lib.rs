//! Rigview Core - hierarchical model viewer
//!
//! This crate turns a few scalars of scene state into the matrices needed to
//! draw an articulated figure over a ground grid, and advances that state from
//! per-frame keyboard and mouse snapshots.
//!
//! # Architecture
//!
//! - [`SceneState`] - Everything that persists between frames
//! - [`transform`] - Root and part matrix composition, figure tables, ground grid
//! - [`camera`] - Orbit and first-person view, projection, light-space matrices
//! - [`InputSampler`] - Edge-triggered actions and continuous movement
//! - [`FrameComposer`] - Per-frame draw list, dispatched through [`backend`] traits
//! - [`SceneRuntime`] - Single-threaded poll/advance/compose/submit loop
//! - [`script`] - TOML scene scripts and the headless runner

pub mod backend;
pub mod camera;
pub mod config;
pub mod frame;
pub mod input;
pub mod runtime;
pub mod scene;
pub mod script;
pub mod transform;

pub use backend::{
    AssetError, AssetLoader, BackendError, DrawDispatcher, InputProvider, MeshHandle, MeshTable,
    RecordingBackend, ShaderBackend, UniformNaming,
};
pub use camera::{CameraFrame, LightFrame};
pub use config::{Config, ConfigError};
pub use frame::{DrawGroup, DrawItem, FrameComposer, FrameOutput};
pub use input::{EdgeTrigger, FrameInput, InputSampler, KeyBindings};
pub use runtime::SceneRuntime;
pub use scene::{FigureKind, RenderMode, SceneState};
pub use script::{ExecutionReport, HeadlessConfig, HeadlessRunner, SceneScript, ScriptError};
pub use transform::{Figure, MeshKind, PartMatrix, PartOffset};
