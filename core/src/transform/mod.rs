//! Hierarchical model-matrix composition
//!
//! Every drawable part of a figure is placed by one matrix:
//!
//! ```text
//! M = RootT(position) * RootR(yaw) * RootS(scale)
//!   * PartT * PartR * PartS * LocalOffsetT
//!   * Correction?
//! ```
//!
//! Translation before rotation before scale at each level, so parts orbit
//! the root as it turns and scales. The figure's axis correction is the
//! outermost post-multiplication and rotates with the whole figure.
//!
//! Zero scale components are legal; decorative grid lines rely on them and
//! the resulting degenerate matrices are never inverted.

mod grid;
mod parts;

pub use grid::{GridSpec, ground_grid};
pub use parts::{CAR, Figure, SNOWMAN};

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::scene::SceneState;

/// Mesh a part is drawn with. Resolved to a loaded handle by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshKind {
    Sphere,
    Cube,
    Cone,
    Cylinder,
    Line,
    AxisX,
    AxisY,
    AxisZ,
    Plane,
}

impl MeshKind {
    pub const ALL: [MeshKind; 9] = [
        MeshKind::Sphere,
        MeshKind::Cube,
        MeshKind::Cone,
        MeshKind::Cylinder,
        MeshKind::Line,
        MeshKind::AxisX,
        MeshKind::AxisY,
        MeshKind::AxisZ,
        MeshKind::Plane,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MeshKind::Sphere => "sphere",
            MeshKind::Cube => "cube",
            MeshKind::Cone => "cone",
            MeshKind::Cylinder => "cylinder",
            MeshKind::Line => "line",
            MeshKind::AxisX => "axis_x",
            MeshKind::AxisY => "axis_y",
            MeshKind::AxisZ => "axis_z",
            MeshKind::Plane => "plane",
        }
    }
}

/// Rotation of `degrees` about `axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRotation {
    pub degrees: f32,
    pub axis: Vec3,
}

impl AxisRotation {
    pub const fn new(degrees: f32, axis: Vec3) -> Self {
        Self { degrees, axis }
    }

    /// Rotation matrix; a zero axis yields identity.
    pub fn matrix(&self) -> Mat4 {
        match self.axis.try_normalize() {
            Some(axis) => Mat4::from_axis_angle(axis, self.degrees.to_radians()),
            None => Mat4::IDENTITY,
        }
    }
}

/// Fixed local transform of one named sub-part relative to the figure root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartOffset {
    pub name: &'static str,
    pub mesh: MeshKind,
    pub translation: Vec3,
    pub rotation: Option<AxisRotation>,
    pub scale: Vec3,
    /// Applied after the part scale, in scaled units (paired parts share
    /// translation and scale and differ only here)
    pub local_offset: Vec3,
    /// Axis the part spins about by `SceneState::wheel_spin_degrees`
    pub spin_axis: Option<Vec3>,
}

impl PartOffset {
    /// `PartT * PartR * Spin * PartS * LocalOffsetT`
    pub fn local_matrix(&self, spin_degrees: f32) -> Mat4 {
        let rotation = self.rotation.map_or(Mat4::IDENTITY, |r| r.matrix());
        let spin = self.spin_axis.map_or(Mat4::IDENTITY, |axis| {
            AxisRotation::new(spin_degrees, axis).matrix()
        });
        Mat4::from_translation(self.translation)
            * rotation
            * spin
            * Mat4::from_scale(self.scale)
            * Mat4::from_translation(self.local_offset)
    }
}

/// One composed part ready for drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartMatrix {
    pub name: &'static str,
    pub mesh: MeshKind,
    pub model: Mat4,
}

/// `T(position) * R_y(yaw) * S(scale)`
pub fn root_matrix(position: Vec3, yaw_degrees: f32, scale: f32) -> Mat4 {
    Mat4::from_translation(position)
        * Mat4::from_rotation_y(yaw_degrees.to_radians())
        * Mat4::from_scale(Vec3::splat(scale))
}

/// Root transform of the controlled figure, including its base scale.
pub fn scene_root(state: &SceneState) -> Mat4 {
    let figure = state.figure.figure();
    root_matrix(
        state.root_position,
        state.root_yaw_degrees,
        state.uniform_scale * figure.base_scale,
    )
}

/// Composes one part under `root`.
pub fn compose_part(
    root: Mat4,
    part: &PartOffset,
    spin_degrees: f32,
    correction: Option<&AxisRotation>,
) -> Mat4 {
    let model = root * part.local_matrix(spin_degrees);
    match correction {
        Some(c) => model * c.matrix(),
        None => model,
    }
}

/// Model matrix for `part_name` of the state's figure, or `None` if the
/// figure has no such part.
pub fn part_matrix(state: &SceneState, part_name: &str) -> Option<Mat4> {
    let figure = state.figure.figure();
    let part = figure.part(part_name)?;
    Some(compose_part(
        scene_root(state),
        part,
        state.wheel_spin_degrees,
        figure.correction.as_ref(),
    ))
}

/// All part matrices of `figure` placed under an arbitrary root.
pub fn compose_figure_at(figure: &Figure, root: Mat4, spin_degrees: f32) -> SmallVec<[PartMatrix; 16]> {
    figure
        .parts
        .iter()
        .map(|part| PartMatrix {
            name: part.name,
            mesh: part.mesh,
            model: compose_part(root, part, spin_degrees, figure.correction.as_ref()),
        })
        .collect()
}

/// All part matrices of the controlled figure.
pub fn compose_figure(state: &SceneState) -> SmallVec<[PartMatrix; 16]> {
    compose_figure_at(
        state.figure.figure(),
        scene_root(state),
        state.wheel_spin_degrees,
    )
}
