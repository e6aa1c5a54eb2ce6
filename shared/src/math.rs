//! Math types for rigview
//!
//! Provides POD (Plain Old Data) math types that are serializable and
//! can be shared across crates without requiring glam as a dependency.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 4x4 matrix in column-major order (POD type)
///
/// Memory layout (64 bytes): four columns of `[x, y, z, w]`. This is the
/// layout OpenGL-style `setUniformMatrix4` calls expect with transpose off,
/// and the layout glam uses for `Mat4::to_cols_array_2d`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct UniformMatrix4 {
    /// Columns 0..4, each `[x, y, z, w]`
    pub cols: [[f32; 4]; 4],
}

impl UniformMatrix4 {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Create from a flat column-major array
    pub fn from_cols_array(arr: [f32; 16]) -> Self {
        bytemuck::cast(arr)
    }

    /// Convert to a flat column-major array for upload
    pub fn to_cols_array(&self) -> [f32; 16] {
        bytemuck::cast(*self)
    }

    /// Translation column as `[x, y, z]`
    pub fn translation(&self) -> [f32; 3] {
        let [x, y, z, _] = self.cols[3];
        [x, y, z]
    }

    /// Raw bytes in upload order
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for UniformMatrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// 3-component vector (POD type)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Vec3Pod {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3Pod {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vec3Pod {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}
