//! Procedural floor grid, world axes and ground plane
//!
//! Regenerated every frame from the line count and spacing; nothing here is
//! cached between frames.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::{MeshKind, PartMatrix};

/// Lines sit just above the ground plane so they are not z-fought away.
const GRID_LIFT: f32 = -0.02;
const GROUND_LIFT: f32 = -0.01;
const GROUND_THICKNESS: f32 = 0.02;

/// Floor grid parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Lines per direction (default: 100)
    #[serde(default = "default_line_count")]
    pub line_count: u32,
    /// World units between adjacent lines (default: 1.0)
    #[serde(default = "default_spacing")]
    pub spacing: f32,
}

fn default_line_count() -> u32 {
    100
}
fn default_spacing() -> f32 {
    1.0
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            line_count: default_line_count(),
            spacing: default_spacing(),
        }
    }
}

impl GridSpec {
    /// Distance from the origin to the outermost line
    pub fn half_extent(&self) -> f32 {
        self.line_count as f32 * 0.5 * self.spacing
    }
}

/// Grid lines in both directions, the three world axes and the ground
/// plane, in that order.
pub fn ground_grid(spec: &GridSpec) -> Vec<PartMatrix> {
    let half = spec.half_extent();
    // Unit line mesh spans x in [-1, 1]; y and z are flattened on purpose
    let stretch = Mat4::from_scale(Vec3::new(half, 0.0, 0.0));
    let quarter_turn = Mat4::from_rotation_y(90f32.to_radians());

    let mut out = Vec::with_capacity(spec.line_count as usize * 2 + 4);
    for i in 0..spec.line_count {
        let offset = -half + i as f32 * spec.spacing;
        out.push(PartMatrix {
            name: "grid_x",
            mesh: MeshKind::Line,
            model: Mat4::from_translation(Vec3::new(0.0, GRID_LIFT, offset)) * stretch,
        });
        out.push(PartMatrix {
            name: "grid_z",
            mesh: MeshKind::Line,
            model: Mat4::from_translation(Vec3::new(offset, GRID_LIFT, 0.0)) * quarter_turn * stretch,
        });
    }

    for (name, mesh) in [
        ("axis_x", MeshKind::AxisX),
        ("axis_y", MeshKind::AxisY),
        ("axis_z", MeshKind::AxisZ),
    ] {
        out.push(PartMatrix {
            name,
            mesh,
            model: Mat4::IDENTITY,
        });
    }

    out.push(PartMatrix {
        name: "ground",
        mesh: MeshKind::Plane,
        model: Mat4::from_translation(Vec3::new(0.0, GROUND_LIFT, 0.0))
            * Mat4::from_scale(Vec3::new(2.0 * half, GROUND_THICKNESS, 2.0 * half)),
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_counts() {
        let items = ground_grid(&GridSpec::default());
        assert_eq!(items.len(), 204);
        assert_eq!(items.iter().filter(|p| p.name == "grid_x").count(), 100);
        assert_eq!(items.iter().filter(|p| p.name == "grid_z").count(), 100);
        assert_eq!(items.last().map(|p| p.mesh), Some(MeshKind::Plane));
    }

    #[test]
    fn test_grid_line_placement() {
        let items = ground_grid(&GridSpec::default());
        let first = items[0].model.transform_point3(Vec3::ZERO);
        assert!(first.abs_diff_eq(Vec3::new(0.0, -0.02, -50.0), 1e-5));
        // Line endpoint reaches the half extent
        let end = items[0].model.transform_point3(Vec3::X);
        assert!((end.x - 50.0).abs() < 1e-4);

        let cross = items[1].model.transform_point3(Vec3::X);
        assert!(cross.abs_diff_eq(Vec3::new(-50.0, -0.02, -50.0), 1e-4));
    }

    #[test]
    fn test_lines_are_flattened() {
        let items = ground_grid(&GridSpec {
            line_count: 4,
            spacing: 2.0,
        });
        for item in items.iter().filter(|p| p.mesh == MeshKind::Line) {
            assert_eq!(item.model.determinant(), 0.0);
            assert!(item.model.is_finite());
        }
    }

    #[test]
    fn test_ground_plane_extent() {
        let items = ground_grid(&GridSpec::default());
        let ground = items.last().unwrap().model;
        let corner = ground.transform_point3(Vec3::new(0.5, 0.0, 0.5));
        assert!(corner.abs_diff_eq(Vec3::new(50.0, -0.01, 50.0), 1e-4));
    }

    #[test]
    fn test_empty_grid_still_has_axes() {
        let items = ground_grid(&GridSpec {
            line_count: 0,
            spacing: 1.0,
        });
        assert_eq!(items.len(), 4);
    }
}
