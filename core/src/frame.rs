//! Per-frame composition and dispatch
//!
//! [`FrameComposer::compose`] is a pure function of [`SceneState`]: it
//! yields the view, projection, optional light frame and one draw item per
//! grid line, axis, figure part and bumper car part. [`submit`] then feeds
//! those to the shader backend and draw dispatcher in a fixed order.

use glam::{Mat4, Quat, Vec3};

use crate::backend::{
    BackendError, DrawDispatcher, MeshTable, ProgramHandle, ShaderBackend, UniformNaming,
    UniformSlot, to_uniform,
};
use crate::camera::{self, CameraFrame, LightFrame};
use crate::config::{BumperCarsConfig, CameraConfig, Config, LightConfig};
use crate::scene::{FigureKind, RenderMode, SceneState};
use crate::transform::{self, GridSpec, MeshKind, PartMatrix, root_matrix};

/// What a draw item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawGroup {
    /// Grid lines, axes and ground plane
    Ground,
    /// The controlled figure
    Figure,
    /// Bumper car with its ring index
    BumperCar(u32),
}

/// One draw call's worth of data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub label: &'static str,
    pub group: DrawGroup,
    pub mesh: MeshKind,
    pub model: Mat4,
    pub mode: RenderMode,
}

/// Everything needed to render one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub camera: CameraFrame,
    pub view: Mat4,
    pub projection: Mat4,
    /// Present while the light is enabled
    pub light: Option<LightFrame>,
    pub draws: Vec<DrawItem>,
}

impl FrameOutput {
    /// Draws belonging to the controlled figure
    pub fn figure_draws(&self) -> impl Iterator<Item = &DrawItem> {
        self.draws.iter().filter(|d| d.group == DrawGroup::Figure)
    }

    pub fn draw(&self, label: &str) -> Option<&DrawItem> {
        self.draws
            .iter()
            .find(|d| d.group == DrawGroup::Figure && d.label == label)
    }
}

/// Builds [`FrameOutput`]s from scene state
#[derive(Debug, Clone)]
pub struct FrameComposer {
    camera: CameraConfig,
    light: LightConfig,
    grid: GridSpec,
    bumper_cars: BumperCarsConfig,
    aspect_ratio: f32,
}

impl FrameComposer {
    pub fn new(
        camera: CameraConfig,
        light: LightConfig,
        grid: GridSpec,
        bumper_cars: BumperCarsConfig,
        aspect_ratio: f32,
    ) -> Self {
        Self {
            camera,
            light,
            grid,
            bumper_cars,
            aspect_ratio,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.camera.clone(),
            config.light.clone(),
            config.scene.grid,
            config.scene.bumper_cars,
            config.window.aspect_ratio(),
        )
    }

    pub fn camera(&self) -> &CameraConfig {
        &self.camera
    }

    pub fn compose(&self, state: &SceneState) -> FrameOutput {
        let eye = camera::resolve(state, &self.camera);
        let light = state
            .light_enabled
            .then(|| camera::light_frame(state.root_position, &self.light));

        let mut draws = Vec::new();
        draws.extend(transform::ground_grid(&self.grid).into_iter().map(|p| DrawItem {
            label: p.name,
            group: DrawGroup::Ground,
            mesh: p.mesh,
            model: p.model,
            mode: RenderMode::Lines,
        }));
        // Ground plane is a filled quad
        if let Some(ground) = draws.last_mut().filter(|d| d.mesh == MeshKind::Plane) {
            ground.mode = RenderMode::Triangles;
        }

        draws.extend(
            transform::compose_figure(state)
                .into_iter()
                .map(|p| figure_item(p, DrawGroup::Figure, state.render_mode)),
        );

        if state.bumper_cars {
            for (index, root) in self.bumper_roots().into_iter().enumerate() {
                let group = DrawGroup::BumperCar(index as u32);
                let parts = transform::compose_figure_at(FigureKind::Car.figure(), root, state.wheel_spin_degrees);
                draws.extend(parts.into_iter().map(|p| figure_item(p, group, state.render_mode)));
            }
        }

        tracing::trace!("composed {} draws", draws.len());
        FrameOutput {
            view: eye.view_matrix(),
            camera: eye,
            projection: camera::perspective(&self.camera, self.aspect_ratio),
            light,
            draws,
        }
    }

    /// Roots of the decorative cars, evenly spaced on a ring around the
    /// origin and facing along it.
    pub fn bumper_roots(&self) -> Vec<Mat4> {
        let count = self.bumper_cars.count;
        let base_scale = FigureKind::Car.figure().base_scale;
        (0..count)
            .map(|i| {
                let yaw = i as f32 * 360.0 / count as f32;
                let position =
                    Quat::from_rotation_y(yaw.to_radians()) * Vec3::new(self.bumper_cars.ring_radius, 0.0, 0.0);
                root_matrix(position, yaw, base_scale)
            })
            .collect()
    }
}

fn figure_item(part: PartMatrix, group: DrawGroup, mode: RenderMode) -> DrawItem {
    DrawItem {
        label: part.name,
        group,
        mesh: part.mesh,
        model: part.model,
        mode,
    }
}

/// Uploads the frame's shared uniforms, then each draw's model matrix
/// followed by its draw call. Returns the number of draws issued.
///
/// # Errors
///
/// Stops at the first failed upload or draw.
pub fn submit<B>(
    frame: &FrameOutput,
    program: ProgramHandle,
    naming: UniformNaming,
    meshes: &MeshTable,
    backend: &mut B,
) -> Result<usize, BackendError>
where
    B: ShaderBackend + DrawDispatcher,
{
    backend.set_uniform_matrix4(program, naming.name(UniformSlot::View), &to_uniform(&frame.view))?;
    backend.set_uniform_matrix4(
        program,
        naming.name(UniformSlot::Projection),
        &to_uniform(&frame.projection),
    )?;
    if let Some(light) = &frame.light {
        backend.set_uniform_matrix4(
            program,
            naming.name(UniformSlot::LightSpace),
            &to_uniform(&light.light_space),
        )?;
    }

    let model_name = naming.name(UniformSlot::Model);
    for item in &frame.draws {
        let mesh = meshes.get(item.mesh)?;
        backend.set_uniform_matrix4(program, model_name, &to_uniform(&item.model))?;
        backend.draw(mesh, &item.model, item.mode)?;
    }
    Ok(frame.draws.len())
}
