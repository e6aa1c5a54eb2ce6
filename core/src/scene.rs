//! Mutable per-frame scene state
//!
//! `SceneState` is the only value that survives from one frame to the next.
//! Model and view matrices are derived from it fresh every frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;

/// Primitive assembly mode for figure draws. Exclusive, last key wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Points,
    Lines,
    #[default]
    Triangles,
}

impl RenderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Points => "points",
            RenderMode::Lines => "lines",
            RenderMode::Triangles => "triangles",
        }
    }

    /// Numeric code used by script variables
    pub fn code(self) -> u8 {
        match self {
            RenderMode::Points => 0,
            RenderMode::Lines => 1,
            RenderMode::Triangles => 2,
        }
    }
}

/// Which articulated figure the user controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureKind {
    #[default]
    Snowman,
    Car,
}

impl FigureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FigureKind::Snowman => "snowman",
            FigureKind::Car => "car",
        }
    }
}

impl std::str::FromStr for FigureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "snowman" | "olaf" => Ok(FigureKind::Snowman),
            "car" | "vehicle" => Ok(FigureKind::Car),
            other => Err(format!("unknown figure '{}'", other)),
        }
    }
}

/// Mutable per-frame state driving all transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    /// Controlled figure
    pub figure: FigureKind,
    /// World-space position of the figure root (unbounded)
    pub root_position: Vec3,
    /// Heading in degrees, kept in `[0, 360)` by [`SceneState::turn`]
    pub root_yaw_degrees: f32,
    /// Multiplies every part scale
    pub uniform_scale: f32,
    pub camera_horizontal_degrees: f32,
    pub camera_vertical_degrees: f32,
    /// Subtracted from the nominal orbit radius
    pub orbit_radius_offset: f32,
    pub first_person: bool,
    pub render_mode: RenderMode,
    pub light_enabled: bool,
    /// Decorative ring of extra cars
    pub bumper_cars: bool,
    /// Accumulated wheel rotation, `[0, 360)`
    pub wheel_spin_degrees: f32,
    /// Set by the exit key, checked once per frame by the runtime
    pub exit_requested: bool,
}

impl SceneState {
    /// Startup state for `figure` with the camera at its configured home.
    pub fn new(figure: FigureKind, camera: &CameraConfig) -> Self {
        Self {
            figure,
            root_position: Vec3::ZERO,
            root_yaw_degrees: 0.0,
            uniform_scale: 1.0,
            camera_horizontal_degrees: camera.default_horizontal_degrees,
            camera_vertical_degrees: camera.default_vertical_degrees,
            orbit_radius_offset: 0.0,
            first_person: false,
            render_mode: RenderMode::default(),
            light_enabled: true,
            bumper_cars: false,
            wheel_spin_degrees: 0.0,
            exit_requested: false,
        }
    }

    /// Adds `degrees` to the heading, wrapping modulo 360.
    pub fn turn(&mut self, degrees: f32) {
        self.root_yaw_degrees = wrap_degrees(self.root_yaw_degrees + degrees);
    }

    /// Restores the camera angles and zoom to their configured home.
    pub fn reset_camera(&mut self, camera: &CameraConfig) {
        self.camera_horizontal_degrees = camera.default_horizontal_degrees;
        self.camera_vertical_degrees = camera.default_vertical_degrees;
        self.orbit_radius_offset = 0.0;
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(FigureKind::default(), &CameraConfig::default())
    }
}

/// Wraps an angle into `[0, 360)`.
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
