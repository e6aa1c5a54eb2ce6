//! Per-frame input to scene-state mapping
//!
//! Movement is object-relative: forward follows the figure's heading and
//! the modifier switches the turn keys to strafing. Rates are per second
//! and scaled by the frame delta.

use glam::Vec3;
use rand::Rng;
use tracing::debug;
use winit::event::MouseButton;

use super::{EdgeTrigger, FrameInput, KeyBindings};
use crate::camera::{apply_zoom_drag, clamp_vertical, pitch_limit, wrap_horizontal};
use crate::config::{CameraConfig, ControlsConfig};
use crate::scene::{RenderMode, SceneState, wrap_degrees};

/// Latches for every press-once action
#[derive(Debug, Clone, Default)]
struct Latches {
    randomize: EdgeTrigger,
    points: EdgeTrigger,
    lines: EdgeTrigger,
    triangles: EdgeTrigger,
    camera_toggle: EdgeTrigger,
    light: EdgeTrigger,
    bumper_cars: EdgeTrigger,
    camera_home: EdgeTrigger,
    exit: EdgeTrigger,
}

/// Maps [`FrameInput`] snapshots onto [`SceneState`].
#[derive(Debug, Clone)]
pub struct InputSampler {
    bindings: KeyBindings,
    controls: ControlsConfig,
    camera: CameraConfig,
    latches: Latches,
    last_cursor: Option<(f64, f64)>,
}

impl InputSampler {
    pub fn new(bindings: KeyBindings, controls: ControlsConfig, camera: CameraConfig) -> Self {
        Self {
            bindings,
            controls,
            camera,
            latches: Latches::default(),
            last_cursor: None,
        }
    }

    /// Applies one frame of input to `state`.
    pub fn advance<R: Rng>(&mut self, state: &mut SceneState, input: &FrameInput, rng: &mut R) {
        let dt = input.dt.max(0.0);
        self.apply_movement(state, input, dt);
        self.apply_scale(state, input, dt);
        self.apply_actions(state, input, rng);
        self.apply_camera(state, input, dt);
        state.wheel_spin_degrees = wrap_degrees(state.wheel_spin_degrees + self.controls.wheel_spin_speed * dt);
    }

    fn modifier_held(&self, input: &FrameInput) -> bool {
        input.is_pressed(self.bindings.modifier) || input.is_pressed(self.bindings.modifier_alt)
    }

    fn apply_movement(&self, state: &mut SceneState, input: &FrameInput, dt: f32) {
        let keys = &self.bindings;
        let shift = self.modifier_held(input);
        let yaw = state.root_yaw_degrees.to_radians();
        let forward = Vec3::new(yaw.sin(), 0.0, yaw.cos());
        // Figure-local +X in world space
        let side = Vec3::new(yaw.cos(), 0.0, -yaw.sin());
        let step = self.controls.move_speed * dt;

        if input.is_pressed(keys.left) {
            if shift {
                state.root_position -= side * step;
            } else {
                state.turn(self.controls.turn_speed * dt);
            }
        }
        if input.is_pressed(keys.right) {
            if shift {
                state.root_position += side * step;
            } else {
                state.turn(-self.controls.turn_speed * dt);
            }
        }

        if input.is_pressed(keys.forward) {
            if shift {
                state.root_position.y += self.controls.vertical_speed * dt;
            } else {
                state.root_position += forward * step;
            }
        }
        if input.is_pressed(keys.back) {
            if shift {
                state.root_position.y -= self.controls.vertical_speed * dt;
            } else {
                state.root_position -= forward * step;
            }
        }
    }

    fn apply_scale(&self, state: &mut SceneState, input: &FrameInput, dt: f32) {
        let delta = self.controls.scale_rate * dt;
        if input.is_pressed(self.bindings.scale_up) {
            state.uniform_scale += delta;
        }
        if input.is_pressed(self.bindings.scale_down) {
            state.uniform_scale -= delta;
        }
        state.uniform_scale = state.uniform_scale.max(self.controls.min_scale);
    }

    fn apply_actions<R: Rng>(&mut self, state: &mut SceneState, input: &FrameInput, rng: &mut R) {
        let keys = &self.bindings;
        let latches = &mut self.latches;

        if latches.randomize.fire(input.is_pressed(keys.randomize)) {
            let extent = self.controls.randomize_extent.abs();
            let mut coordinate = || {
                let magnitude = rng.random_range(0.0..=extent);
                if rng.random_bool(0.5) { magnitude } else { -magnitude }
            };
            state.root_position.x = coordinate();
            state.root_position.z = coordinate();
            debug!(
                "randomized position to ({:.2}, {:.2})",
                state.root_position.x, state.root_position.z
            );
        }

        // Later keys win when several fire on the same frame
        for (trigger, key, mode) in [
            (&mut latches.points, keys.points, RenderMode::Points),
            (&mut latches.lines, keys.lines, RenderMode::Lines),
            (&mut latches.triangles, keys.triangles, RenderMode::Triangles),
        ] {
            if trigger.fire(input.is_pressed(key)) {
                state.render_mode = mode;
                debug!("render mode {}", mode.as_str());
            }
        }

        if latches.camera_toggle.fire(input.is_pressed(keys.camera_toggle)) {
            state.first_person = !state.first_person;
            debug!("first person: {}", state.first_person);
        }
        if latches.light.fire(input.is_pressed(keys.light_toggle)) {
            state.light_enabled = !state.light_enabled;
            debug!("light enabled: {}", state.light_enabled);
        }
        if latches.bumper_cars.fire(input.is_pressed(keys.bumper_cars)) {
            state.bumper_cars = !state.bumper_cars;
            debug!("bumper cars: {}", state.bumper_cars);
        }
        if latches.camera_home.fire(input.is_pressed(keys.camera_home)) {
            state.reset_camera(&self.camera);
            state.first_person = true;
            debug!("camera home");
        }
        if latches.exit.fire(input.is_pressed(keys.exit)) {
            state.exit_requested = true;
            debug!("exit requested");
        }
    }

    fn apply_camera(&mut self, state: &mut SceneState, input: &FrameInput, dt: f32) {
        let keys = &self.bindings;
        let (cursor_dx, cursor_dy) = match self.last_cursor {
            Some((x, y)) => ((input.cursor.0 - x) as f32, (input.cursor.1 - y) as f32),
            None => (0.0, 0.0),
        };
        self.last_cursor = Some(input.cursor);

        let mut dx = 0.0;
        let mut dy = 0.0;
        if input.is_held(MouseButton::Right) {
            dx = cursor_dx;
            state.first_person = false;
        }
        if input.is_held(MouseButton::Middle) {
            dy = cursor_dy;
            state.first_person = false;
        }

        let nudge = self.camera.key_nudge;
        for (key, ndx, ndy) in [
            (keys.orbit_left, -nudge, 0.0),
            (keys.orbit_right, nudge, 0.0),
            (keys.orbit_up, 0.0, -nudge),
            (keys.orbit_down, 0.0, nudge),
        ] {
            if input.is_pressed(key) {
                dx += ndx;
                dy += ndy;
                state.first_person = false;
            }
        }

        let speed = self.camera.angular_speed * dt;
        state.camera_horizontal_degrees = wrap_horizontal(state.camera_horizontal_degrees - dx * speed);
        state.camera_vertical_degrees = clamp_vertical(
            state.camera_vertical_degrees - dy * speed,
            pitch_limit(&self.camera, state.first_person),
        );

        if input.is_held(MouseButton::Left) && !state.first_person {
            state.orbit_radius_offset = apply_zoom_drag(
                state.orbit_radius_offset,
                cursor_dy * self.camera.drag_sensitivity,
                self.camera.nominal_radius(),
                self.camera.zoom_band,
            );
        }
    }
}
