//! Part tables for the controllable figures

use glam::Vec3;

use super::{AxisRotation, MeshKind, PartOffset};
use crate::scene::FigureKind;

/// A named set of parts sharing one root transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    pub kind: FigureKind,
    /// Multiplied into the user-controlled uniform scale
    pub base_scale: f32,
    pub parts: &'static [PartOffset],
    /// Aligns the authored meshes with world-forward (+Z)
    pub correction: Option<AxisRotation>,
}

impl Figure {
    pub fn part(&self, name: &str) -> Option<&'static PartOffset> {
        self.parts.iter().find(|p| p.name == name)
    }
}

impl FigureKind {
    pub fn figure(self) -> &'static Figure {
        match self {
            FigureKind::Snowman => &SNOWMAN,
            FigureKind::Car => &CAR,
        }
    }
}

const fn part(
    name: &'static str,
    mesh: MeshKind,
    translation: Vec3,
    scale: Vec3,
    local_offset: Vec3,
) -> PartOffset {
    PartOffset {
        name,
        mesh,
        translation,
        rotation: None,
        scale,
        local_offset,
        spin_axis: None,
    }
}

const fn tilted(base: PartOffset, degrees: f32, axis: Vec3) -> PartOffset {
    PartOffset {
        rotation: Some(AxisRotation::new(degrees, axis)),
        ..base
    }
}

const fn spinning(base: PartOffset, axis: Vec3) -> PartOffset {
    PartOffset {
        spin_axis: Some(axis),
        ..base
    }
}

// =============================================================
// Snowman: faces +Z, feet on y = 0
// =============================================================

const HEAD: Vec3 = Vec3::new(0.0, 3.4, 0.0);
const HAIR: Vec3 = Vec3::new(0.0, 4.0, 0.0);
const SHOULDERS: Vec3 = Vec3::new(0.0, 2.8, 0.0);
const FEET: Vec3 = Vec3::new(0.0, 0.25, 0.0);
const HAIR_SCALE: Vec3 = Vec3::new(0.05, 0.65, 0.05);
const ARM_SCALE: Vec3 = Vec3::new(2.0, 0.2, 0.2);

static SNOWMAN_PARTS: [PartOffset; 13] = [
    part("body", MeshKind::Sphere, Vec3::new(0.0, 1.5, 0.0), Vec3::splat(0.8), Vec3::ZERO),
    part("midbody", MeshKind::Sphere, SHOULDERS, Vec3::splat(0.5), Vec3::ZERO),
    part("head", MeshKind::Sphere, HEAD, Vec3::splat(0.4), Vec3::ZERO),
    part("eye_left", MeshKind::Sphere, HEAD, Vec3::splat(0.2), Vec3::new(1.3, 0.3, 2.0)),
    part("eye_right", MeshKind::Sphere, HEAD, Vec3::splat(0.2), Vec3::new(-1.3, 0.3, 2.0)),
    part("nose", MeshKind::Cone, HEAD, Vec3::new(0.2, 0.2, 0.4), Vec3::new(0.0, -0.5, 1.2)),
    part("hair_center", MeshKind::Cube, HAIR, HAIR_SCALE, Vec3::ZERO),
    part("hair_left", MeshKind::Cube, HAIR, HAIR_SCALE, Vec3::new(2.0, 0.0, 0.0)),
    part("hair_right", MeshKind::Cube, HAIR, HAIR_SCALE, Vec3::new(-2.0, 0.0, 0.0)),
    part("arm_left", MeshKind::Cube, SHOULDERS, ARM_SCALE, Vec3::new(0.65, 0.0, 0.0)),
    part("arm_right", MeshKind::Cube, SHOULDERS, ARM_SCALE, Vec3::new(-0.65, 0.0, 0.0)),
    part("foot_left", MeshKind::Sphere, FEET, Vec3::splat(0.5), Vec3::new(0.75, 0.0, 0.0)),
    part("foot_right", MeshKind::Sphere, FEET, Vec3::splat(0.5), Vec3::new(-0.75, 0.0, 0.0)),
];

pub static SNOWMAN: Figure = Figure {
    kind: FigureKind::Snowman,
    base_scale: 1.0,
    parts: &SNOWMAN_PARTS,
    correction: None,
};

// =============================================================
// Car: layout faces +Z; meshes are authored facing +X
// =============================================================

const WHEEL_SCALE: Vec3 = Vec3::new(1.0, 2.0, 2.0);

static CAR_PARTS: [PartOffset; 10] = [
    part("chassis", MeshKind::Cube, Vec3::new(0.0, 1.0, 0.0), Vec3::new(4.0, 0.75, 6.0), Vec3::ZERO),
    part("roof", MeshKind::Cube, Vec3::new(0.0, 1.675, 0.0), Vec3::new(2.0, 1.0, 3.0), Vec3::ZERO),
    tilted(
        part("hood", MeshKind::Cube, Vec3::new(0.0, 0.75, 4.2), Vec3::new(2.0, 0.25, 3.0), Vec3::ZERO),
        15.0,
        Vec3::X,
    ),
    tilted(
        part("trunk", MeshKind::Cube, Vec3::new(0.0, 0.75, -4.2), Vec3::new(2.0, 0.25, 3.0), Vec3::ZERO),
        -15.0,
        Vec3::X,
    ),
    spinning(
        part("wheel_front_left", MeshKind::Cylinder, Vec3::new(2.3, 0.75, 2.5), WHEEL_SCALE, Vec3::ZERO),
        Vec3::X,
    ),
    spinning(
        part("wheel_front_right", MeshKind::Cylinder, Vec3::new(-2.3, 0.75, 2.5), WHEEL_SCALE, Vec3::ZERO),
        Vec3::X,
    ),
    spinning(
        part("wheel_rear_left", MeshKind::Cylinder, Vec3::new(2.3, 0.75, -2.5), WHEEL_SCALE, Vec3::ZERO),
        Vec3::X,
    ),
    spinning(
        part("wheel_rear_right", MeshKind::Cylinder, Vec3::new(-2.3, 0.75, -2.5), WHEEL_SCALE, Vec3::ZERO),
        Vec3::X,
    ),
    part("headlight_left", MeshKind::Sphere, Vec3::new(1.2, 1.0, 3.05), Vec3::splat(0.3), Vec3::ZERO),
    part("headlight_right", MeshKind::Sphere, Vec3::new(-1.2, 1.0, 3.05), Vec3::splat(0.3), Vec3::ZERO),
];

pub static CAR: Figure = Figure {
    kind: FigureKind::Car,
    base_scale: 2.0,
    parts: &CAR_PARTS,
    correction: Some(AxisRotation::new(90.0, Vec3::NEG_Y)),
};

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    #[test]
    fn test_part_names_unique() {
        for figure in [&SNOWMAN, &CAR] {
            let mut names: Vec<_> = figure.parts.iter().map(|p| p.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), figure.parts.len(), "{:?}", figure.kind);
        }
    }

    #[test]
    fn test_figure_lookup() {
        assert_eq!(FigureKind::Snowman.figure().kind, FigureKind::Snowman);
        assert_eq!(FigureKind::Car.figure().kind, FigureKind::Car);
        assert!(SNOWMAN.part("nose").is_some());
        assert!(CAR.part("nose").is_none());
    }

    #[test]
    fn test_eyes_sit_in_front_of_head() {
        let head = SNOWMAN.part("head").unwrap().local_matrix(0.0);
        let eye = SNOWMAN.part("eye_left").unwrap().local_matrix(0.0);
        let head_z = head.transform_point3(Vec3::ZERO).z;
        let eye_z = eye.transform_point3(Vec3::ZERO).z;
        assert!(eye_z > head_z);
    }

    #[test]
    fn test_only_wheels_spin() {
        for p in CAR.parts {
            assert_eq!(p.spin_axis.is_some(), p.name.starts_with("wheel"), "{}", p.name);
        }
        assert!(SNOWMAN.parts.iter().all(|p| p.spin_axis.is_none()));
    }

    #[test]
    fn test_wheel_spin_keeps_hub_fixed() {
        let wheel = CAR.part("wheel_front_left").unwrap();
        let at_rest = wheel.local_matrix(0.0).transform_point3(Vec3::ZERO);
        let spun = wheel.local_matrix(123.0).transform_point3(Vec3::ZERO);
        assert!(at_rest.abs_diff_eq(spun, 1e-5));
        assert_ne!(wheel.local_matrix(0.0), wheel.local_matrix(90.0));
    }

    #[test]
    fn test_car_correction_maps_authored_forward() {
        let correction = CAR.correction.unwrap().matrix();
        let forward = correction.transform_vector3(Vec3::X);
        assert!(forward.abs_diff_eq(Vec3::Z, 1e-5));
        assert_ne!(correction, Mat4::IDENTITY);
    }
}
