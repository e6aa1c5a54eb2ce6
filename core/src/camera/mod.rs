//! Camera resolver
//!
//! Turns the camera angles, zoom offset and figure placement in
//! [`SceneState`] into one look-at view matrix per frame. Never fails:
//! a radius driven negative by zooming just puts the eye on the far side
//! of the target.

mod projection;

pub use projection::{LightFrame, light_frame, perspective};

use glam::{Mat4, Quat, Vec3};

use crate::config::{CameraConfig, ZoomBand};
use crate::scene::SceneState;

/// Eye, target and up vector of one resolved view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraFrame {
    /// Right-handed look-at matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Unit direction for the given camera angles:
/// `(cos φ cos θ, sin φ, -cos φ sin θ)`.
pub fn look_direction(horizontal_degrees: f32, vertical_degrees: f32) -> Vec3 {
    let theta = horizontal_degrees.to_radians();
    let phi = vertical_degrees.to_radians();
    Vec3::new(phi.cos() * theta.cos(), phi.sin(), -phi.cos() * theta.sin())
}

/// Vertical limit for the active mode, in degrees.
pub fn pitch_limit(camera: &CameraConfig, first_person: bool) -> f32 {
    if first_person {
        camera.first_person_pitch_limit
    } else {
        camera.orbit_pitch_limit
    }
}

/// Clamps a vertical angle to `[-limit, limit]`.
pub fn clamp_vertical(degrees: f32, limit: f32) -> f32 {
    let limit = limit.abs();
    degrees.clamp(-limit, limit)
}

/// One corrective step toward `[-360, 360]`; per-frame deltas are small
/// enough that a single step keeps the angle in range.
pub fn wrap_horizontal(degrees: f32) -> f32 {
    if degrees > 360.0 {
        degrees - 360.0
    } else if degrees < -360.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

/// Effective orbit radius: nominal radius minus the accumulated offset.
pub fn orbit_radius(camera: &CameraConfig, radius_offset: f32) -> f32 {
    camera.nominal_radius() - radius_offset
}

/// Applies one frame of click-drag zoom.
///
/// Inside the open band the step is always accepted. At or beyond `max`
/// only steps that shrink the radius are accepted, at or below `min` only
/// steps that grow it. The band is checked against the radius before the
/// step, so one large step may overshoot once.
pub fn apply_zoom_drag(radius_offset: f32, step: f32, nominal_radius: f32, band: ZoomBand) -> f32 {
    let radius = nominal_radius - radius_offset;
    let accept = if radius > band.min && radius < band.max {
        true
    } else if radius >= band.max {
        step > 0.0
    } else {
        step < 0.0
    };
    if accept { radius_offset + step } else { radius_offset }
}

/// Third-person frame orbiting the lifted figure root.
pub fn orbit_frame(state: &SceneState, camera: &CameraConfig) -> CameraFrame {
    let vertical = clamp_vertical(state.camera_vertical_degrees, camera.orbit_pitch_limit);
    let direction = look_direction(state.camera_horizontal_degrees, vertical);
    let target = state.root_position + Vec3::new(0.0, camera.target_lift, 0.0);
    let radius = orbit_radius(camera, state.orbit_radius_offset);
    CameraFrame {
        eye: target - radius * direction,
        target,
        up: Vec3::Y,
    }
}

/// First-person frame anchored to the figure.
///
/// The driver offset and the look direction are both expressed in the
/// figure's local frame, so the view turns with the figure.
pub fn first_person_frame(state: &SceneState, camera: &CameraConfig) -> CameraFrame {
    let heading = Quat::from_rotation_y(state.root_yaw_degrees.to_radians());
    let vertical = clamp_vertical(state.camera_vertical_degrees, camera.first_person_pitch_limit);
    let direction = heading * look_direction(state.camera_horizontal_degrees, vertical);
    let eye = state.root_position + heading * (camera.driver_offset() * state.uniform_scale);
    CameraFrame {
        eye,
        target: eye + direction,
        up: Vec3::Y,
    }
}

/// Resolves the frame for whichever mode `state` is in.
pub fn resolve(state: &SceneState, camera: &CameraConfig) -> CameraFrame {
    if state.first_person {
        first_person_frame(state, camera)
    } else {
        orbit_frame(state, camera)
    }
}

/// View matrix for `state`.
pub fn view_matrix(state: &SceneState, camera: &CameraConfig) -> Mat4 {
    resolve(state, camera).view_matrix()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_look_direction_home() {
        let dir = look_direction(90.0, -30.0);
        assert!(dir.abs_diff_eq(Vec3::new(0.0, -0.5, -(3f32.sqrt() / 2.0)), EPS));
        assert!((dir.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_orbit_home_sits_behind_and_above() {
        let camera = CameraConfig::default();
        let state = SceneState::default();
        let frame = orbit_frame(&state, &camera);
        assert!(frame.target.abs_diff_eq(Vec3::new(0.0, 3.0, 0.0), EPS));
        assert!(frame.eye.y > frame.target.y);
        assert!(frame.eye.z > 0.0);
        assert!((frame.eye.distance(frame.target) - camera.nominal_radius()).abs() < EPS);
    }

    #[test]
    fn test_orbit_follows_root() {
        let camera = CameraConfig::default();
        let mut state = SceneState::default();
        let before = orbit_frame(&state, &camera);
        state.root_position = Vec3::new(5.0, 1.0, -2.0);
        let after = orbit_frame(&state, &camera);
        assert!((after.eye - before.eye).abs_diff_eq(state.root_position, EPS));
    }

    #[test]
    fn test_negative_radius_passes_through() {
        let camera = CameraConfig::default();
        let mut state = SceneState::default();
        state.orbit_radius_offset = camera.nominal_radius() + 10.0;
        let frame = orbit_frame(&state, &camera);
        assert!(frame.eye.z < 0.0);
        assert!(frame.view_matrix().is_finite());
    }

    #[test]
    fn test_wrap_horizontal_single_step() {
        assert_eq!(wrap_horizontal(361.0), 1.0);
        assert_eq!(wrap_horizontal(-361.0), -1.0);
        assert_eq!(wrap_horizontal(360.0), 360.0);
        assert_eq!(wrap_horizontal(800.0), 440.0);
    }

    #[test]
    fn test_clamp_vertical() {
        assert_eq!(clamp_vertical(200.0, 85.0), 85.0);
        assert_eq!(clamp_vertical(-200.0, 85.0), -85.0);
        assert_eq!(clamp_vertical(-200.0, -30.0), -30.0);
        assert_eq!(clamp_vertical(12.0, 85.0), 12.0);
    }

    #[test]
    fn test_pitch_limit_is_mode_specific() {
        let camera = CameraConfig::default();
        assert_eq!(pitch_limit(&camera, false), 85.0);
        assert_eq!(pitch_limit(&camera, true), 30.0);
    }

    #[test]
    fn test_zoom_inside_band_is_free() {
        let band = ZoomBand::default();
        assert_eq!(apply_zoom_drag(0.0, 1.5, 30.0, band), 1.5);
        assert_eq!(apply_zoom_drag(0.0, -1.5, 30.0, band), -1.5);
    }

    #[test]
    fn test_zoom_below_band_only_grows() {
        let band = ZoomBand::default();
        // radius = 30 - 25 = 5, at the edge
        assert_eq!(apply_zoom_drag(25.0, 0.5, 30.0, band), 25.0);
        assert_eq!(apply_zoom_drag(25.0, -0.5, 30.0, band), 24.5);
    }

    #[test]
    fn test_zoom_above_band_only_shrinks() {
        let band = ZoomBand::default();
        // radius = 30 + 20 = 50, at the edge
        assert_eq!(apply_zoom_drag(-20.0, -0.5, 30.0, band), -20.0);
        assert_eq!(apply_zoom_drag(-20.0, 0.5, 30.0, band), -19.5);
    }

    #[test]
    fn test_first_person_turns_with_figure() {
        let camera = CameraConfig {
            driver_offset: [0.0, 2.0, 1.0],
            ..CameraConfig::default()
        };
        let mut state = SceneState {
            first_person: true,
            ..SceneState::default()
        };
        let facing_z = resolve(&state, &camera);
        assert!(facing_z.eye.abs_diff_eq(Vec3::new(0.0, 2.0, 1.0), EPS));

        state.root_yaw_degrees = 90.0;
        let facing_x = resolve(&state, &camera);
        assert!(facing_x.eye.abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), EPS));

        let before = facing_z.target - facing_z.eye;
        let after = facing_x.target - facing_x.eye;
        let turned = Quat::from_rotation_y(90f32.to_radians()) * before;
        assert!(after.abs_diff_eq(turned, EPS));
    }

    #[test]
    fn test_first_person_uses_narrow_clamp() {
        let camera = CameraConfig::default();
        let state = SceneState {
            first_person: true,
            camera_vertical_degrees: -80.0,
            ..SceneState::default()
        };
        let frame = resolve(&state, &camera);
        let dir = (frame.target - frame.eye).normalize();
        assert!((dir.y - (-30f32).to_radians().sin()).abs() < EPS);
    }
}
