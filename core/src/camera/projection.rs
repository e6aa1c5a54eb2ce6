//! Projection and light-space matrices

use glam::{Mat4, Vec3};

use crate::config::{CameraConfig, LightConfig};

/// OpenGL-style perspective projection for the main camera.
pub fn perspective(camera: &CameraConfig, aspect_ratio: f32) -> Mat4 {
    Mat4::perspective_rh_gl(
        camera.fov_degrees.to_radians(),
        aspect_ratio,
        camera.near,
        camera.far,
    )
}

/// Matrices of the spot light that casts the figure's shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightFrame {
    pub position: Vec3,
    pub focus: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
    /// `projection * view`, uploaded for the shadow pass
    pub light_space: Mat4,
}

/// Light hovering `light.height` above `root`, looking straight down.
///
/// Up is +Z because +Y is parallel to the view direction.
pub fn light_frame(root: Vec3, light: &LightConfig) -> LightFrame {
    let position = root + Vec3::new(0.0, light.height, 0.0);
    let view = Mat4::look_at_rh(position, root, Vec3::Z);
    let projection = Mat4::perspective_rh_gl(light.fov_degrees.to_radians(), 1.0, light.near, light.far);
    LightFrame {
        position,
        focus: root,
        view,
        projection,
        light_space: projection * view,
    }
}
