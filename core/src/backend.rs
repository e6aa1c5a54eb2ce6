//! Collaborator seams: window input, shader uniforms, draws and assets
//!
//! The core never talks to a graphics API. A window/input provider feeds it
//! [`FrameInput`] snapshots, and composed frames are handed to whatever
//! implements [`ShaderBackend`] and [`DrawDispatcher`]. Asset loading happens
//! once at startup through [`AssetLoader`]; any failure there aborts startup.

use std::path::{Path, PathBuf};

use glam::Mat4;
use hashbrown::HashMap;
use rigview_shared::UniformMatrix4;
use rigview_shared::constants::{
    LEGACY_UNIFORMS, UNIFORM_LIGHT_SPACE, UNIFORM_MODEL, UNIFORM_PROJECTION, UNIFORM_VIEW,
};
use serde::{Deserialize, Serialize};

use crate::input::FrameInput;
use crate::scene::RenderMode;
use crate::transform::MeshKind;

/// Opaque shader program handle
pub type ProgramHandle = u32;

/// Errors reported by a shader backend or draw dispatcher
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("uniform '{name}' upload failed: {reason}")]
    Uniform { name: String, reason: String },
    #[error("no mesh loaded for '{0}'")]
    UnknownMesh(&'static str),
    #[error("draw failed: {0}")]
    Draw(String),
}

/// Errors from the asset loader. Any of these aborts startup.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to decode {}: {}", .path.display(), .reason)]
    Decode { path: PathBuf, reason: String },
    #[error("no asset listed for mesh '{0}'")]
    Missing(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Loaded mesh: an opaque handle plus the vertex count to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshHandle {
    pub id: u32,
    pub vertex_count: u32,
}

/// Loaded texture handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Well-known uniform slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformSlot {
    Model,
    View,
    Projection,
    LightSpace,
}

/// Uniform naming convention expected by the shaders.
///
/// Snake case is canonical; camel case matches older shader sources that
/// use `worldMatrix` for the model matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniformNaming {
    #[default]
    SnakeCase,
    CamelCase,
}

impl UniformNaming {
    pub fn name(self, slot: UniformSlot) -> &'static str {
        match self {
            UniformNaming::SnakeCase => match slot {
                UniformSlot::Model => UNIFORM_MODEL,
                UniformSlot::View => UNIFORM_VIEW,
                UniformSlot::Projection => UNIFORM_PROJECTION,
                UniformSlot::LightSpace => UNIFORM_LIGHT_SPACE,
            },
            UniformNaming::CamelCase => match slot {
                UniformSlot::Model => LEGACY_UNIFORMS[0],
                UniformSlot::View => LEGACY_UNIFORMS[1],
                UniformSlot::Projection => LEGACY_UNIFORMS[2],
                UniformSlot::LightSpace => LEGACY_UNIFORMS[3],
            },
        }
    }
}

/// Source of per-frame input. Returning `None` ends the frame loop.
pub trait InputProvider {
    fn poll(&mut self) -> Option<FrameInput>;
}

/// Accepts 4x4 matrices for named uniform slots.
pub trait ShaderBackend {
    fn set_uniform_matrix4(
        &mut self,
        program: ProgramHandle,
        name: &str,
        matrix: &UniformMatrix4,
    ) -> Result<(), BackendError>;
}

/// Issues one draw call for a bound mesh.
pub trait DrawDispatcher {
    fn draw(&mut self, mesh: &MeshHandle, model: &Mat4, mode: RenderMode) -> Result<(), BackendError>;
}

/// Loads meshes and textures from disk.
pub trait AssetLoader {
    fn load_mesh(&mut self, path: &Path) -> Result<MeshHandle, AssetError>;
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, AssetError>;
}

/// Converts a glam matrix to the upload layout
pub fn to_uniform(matrix: &Mat4) -> UniformMatrix4 {
    UniformMatrix4::from_cols_array(matrix.to_cols_array())
}

/// Mesh handles by kind, resolved once at startup
#[derive(Debug, Clone, Default)]
pub struct MeshTable {
    meshes: HashMap<MeshKind, MeshHandle>,
}

impl MeshTable {
    /// Loads every mesh in `manifest`.
    ///
    /// # Errors
    ///
    /// Fails on the first asset that cannot be loaded, or if the manifest
    /// leaves any [`MeshKind`] without a file.
    pub fn load<L: AssetLoader>(loader: &mut L, manifest: &[(MeshKind, PathBuf)]) -> Result<Self, AssetError> {
        let mut meshes = HashMap::new();
        for (kind, path) in manifest {
            let handle = loader.load_mesh(path)?;
            tracing::debug!("loaded {} from {} ({} vertices)", kind.as_str(), path.display(), handle.vertex_count);
            meshes.insert(*kind, handle);
        }
        if let Some(missing) = MeshKind::ALL.iter().find(|k| !meshes.contains_key(*k)) {
            return Err(AssetError::Missing(missing.as_str()));
        }
        Ok(Self { meshes })
    }

    /// Sequential fake handles for every kind, for headless runs.
    pub fn placeholder() -> Self {
        let meshes = MeshKind::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                (
                    *kind,
                    MeshHandle {
                        id: i as u32 + 1,
                        vertex_count: 36,
                    },
                )
            })
            .collect();
        Self { meshes }
    }

    pub fn get(&self, kind: MeshKind) -> Result<&MeshHandle, BackendError> {
        self.meshes
            .get(&kind)
            .ok_or(BackendError::UnknownMesh(kind.as_str()))
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

/// One draw captured by [`RecordingBackend`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordedDraw {
    pub mesh: MeshHandle,
    pub model: UniformMatrix4,
    pub mode: RenderMode,
}

/// Backend that records uniform uploads and draws instead of rendering.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    pub uploads: Vec<(String, UniformMatrix4)>,
    pub draws: Vec<RecordedDraw>,
    /// Uniform name whose upload should fail, for exercising error paths
    pub reject_uniform: Option<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.uploads.clear();
        self.draws.clear();
    }

    /// Most recent upload to `name`
    pub fn last_upload(&self, name: &str) -> Option<&UniformMatrix4> {
        self.uploads
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, m)| m)
    }
}

impl ShaderBackend for RecordingBackend {
    fn set_uniform_matrix4(
        &mut self,
        _program: ProgramHandle,
        name: &str,
        matrix: &UniformMatrix4,
    ) -> Result<(), BackendError> {
        if self.reject_uniform.as_deref() == Some(name) {
            return Err(BackendError::Uniform {
                name: name.to_string(),
                reason: "rejected".to_string(),
            });
        }
        self.uploads.push((name.to_string(), *matrix));
        Ok(())
    }
}

impl DrawDispatcher for RecordingBackend {
    fn draw(&mut self, mesh: &MeshHandle, model: &Mat4, mode: RenderMode) -> Result<(), BackendError> {
        self.draws.push(RecordedDraw {
            mesh: *mesh,
            model: to_uniform(model),
            mode,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DirLoader {
        next: u32,
    }

    impl AssetLoader for DirLoader {
        fn load_mesh(&mut self, path: &Path) -> Result<MeshHandle, AssetError> {
            let bytes = std::fs::read(path).map_err(|_| AssetError::NotFound(path.to_path_buf()))?;
            self.next += 1;
            Ok(MeshHandle {
                id: self.next,
                vertex_count: bytes.len() as u32,
            })
        }

        fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, AssetError> {
            Err(AssetError::NotFound(path.to_path_buf()))
        }
    }

    fn manifest(dir: &Path) -> Vec<(MeshKind, PathBuf)> {
        MeshKind::ALL
            .iter()
            .map(|kind| (*kind, dir.join(format!("{}.obj", kind.as_str()))))
            .collect()
    }

    #[test]
    fn test_uniform_naming() {
        assert_eq!(UniformNaming::SnakeCase.name(UniformSlot::Model), "model_matrix");
        assert_eq!(UniformNaming::CamelCase.name(UniformSlot::Model), "worldMatrix");
        assert_eq!(UniformNaming::CamelCase.name(UniformSlot::View), "viewMatrix");
        assert_eq!(
            UniformNaming::SnakeCase.name(UniformSlot::LightSpace),
            "light_space_matrix"
        );
    }

    #[test]
    fn test_mesh_table_loads_all() {
        let dir = tempfile::tempdir().unwrap();
        for (_, path) in manifest(dir.path()) {
            std::fs::write(path, b"v 0 0 0\n").unwrap();
        }
        let mut loader = DirLoader { next: 0 };
        let table = MeshTable::load(&mut loader, &manifest(dir.path())).unwrap();
        assert_eq!(table.len(), MeshKind::ALL.len());
        assert_eq!(table.get(MeshKind::Sphere).unwrap().vertex_count, 8);
    }

    #[test]
    fn test_mesh_table_fails_fast_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = DirLoader { next: 0 };
        let result = MeshTable::load(&mut loader, &manifest(dir.path()));
        assert!(matches!(result, Err(AssetError::NotFound(_))));
        assert_eq!(loader.next, 0);
    }

    #[test]
    fn test_mesh_table_requires_every_kind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sphere.obj");
        std::fs::write(&path, b"v").unwrap();
        let mut loader = DirLoader { next: 0 };
        let result = MeshTable::load(&mut loader, &[(MeshKind::Sphere, path)]);
        assert!(matches!(result, Err(AssetError::Missing(_))));
    }

    #[test]
    fn test_placeholder_covers_every_kind() {
        let table = MeshTable::placeholder();
        for kind in MeshKind::ALL {
            assert!(table.get(kind).is_ok());
        }
        assert!(MeshTable::default().get(MeshKind::Cube).is_err());
    }

    #[test]
    fn test_recording_backend() {
        let mut backend = RecordingBackend::new();
        backend
            .set_uniform_matrix4(1, "view_matrix", &UniformMatrix4::IDENTITY)
            .unwrap();
        let mesh = MeshHandle { id: 3, vertex_count: 6 };
        backend
            .draw(&mesh, &Mat4::from_translation(glam::Vec3::X), RenderMode::Lines)
            .unwrap();
        assert_eq!(backend.last_upload("view_matrix"), Some(&UniformMatrix4::IDENTITY));
        assert_eq!(backend.draws[0].model.translation(), [1.0, 0.0, 0.0]);

        backend.reject_uniform = Some("view_matrix".to_string());
        assert!(
            backend
                .set_uniform_matrix4(1, "view_matrix", &UniformMatrix4::IDENTITY)
                .is_err()
        );
    }
}
