//! Centralized constants for rigview.
//!
//! Single source of truth for window defaults and the canonical shader
//! uniform names shared by the core and any rendering backend.

/// Default window width in pixels.
pub const DEFAULT_WINDOW_WIDTH: u32 = 1024;

/// Default window height in pixels.
pub const DEFAULT_WINDOW_HEIGHT: u32 = 768;

/// Default window title.
pub const DEFAULT_WINDOW_TITLE: &str = "rigview";

/// Canonical uniform name for the per-draw model matrix.
pub const UNIFORM_MODEL: &str = "model_matrix";

/// Canonical uniform name for the view matrix.
pub const UNIFORM_VIEW: &str = "view_matrix";

/// Canonical uniform name for the projection matrix.
pub const UNIFORM_PROJECTION: &str = "projection_matrix";

/// Canonical uniform name for the light-space (shadow) matrix.
pub const UNIFORM_LIGHT_SPACE: &str = "light_space_matrix";

/// Legacy camelCase uniform names, in the order model, view, projection,
/// light-space.
pub const LEGACY_UNIFORMS: [&str; 4] = [
    "worldMatrix",
    "viewMatrix",
    "projectionMatrix",
    "lightSpaceMatrix",
];
