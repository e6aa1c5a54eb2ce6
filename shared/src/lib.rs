//! Shared types for the rigview scene viewer.
//!
//! Plain-data values that cross crate boundaries (uniform uploads, reports,
//! CLI output) without pulling in the math crate.

pub mod constants;
pub mod math;

pub use math::{UniformMatrix4, Vec3Pod};
