//! Print the model matrices of a posed figure

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use glam::Vec3;
use rigview_core::backend::to_uniform;
use rigview_core::transform::{self, PartMatrix};
use rigview_core::{FigureKind, SceneState};
use rigview_shared::{UniformMatrix4, Vec3Pod};
use serde::Serialize;

#[derive(Args)]
pub struct InspectArgs {
    /// Figure to pose (snowman or car)
    #[arg(long, default_value = "snowman")]
    pub figure: FigureKind,

    /// Root position X
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub x: f32,

    /// Root position Y
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub y: f32,

    /// Root position Z
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub z: f32,

    /// Heading in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub yaw: f32,

    /// Uniform scale (zero and negative values are accepted)
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub scale: f32,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Config file to use instead of the platform config
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Serialize)]
struct PartReport {
    name: &'static str,
    mesh: &'static str,
    origin: Vec3Pod,
    model: UniformMatrix4,
}

impl From<&PartMatrix> for PartReport {
    fn from(part: &PartMatrix) -> Self {
        Self {
            name: part.name,
            mesh: part.mesh.as_str(),
            origin: part.model.transform_point3(Vec3::ZERO).to_array().into(),
            model: to_uniform(&part.model),
        }
    }
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let config = crate::load_config(args.config.as_deref())?;
    let state = SceneState {
        root_position: Vec3::new(args.x, args.y, args.z),
        root_yaw_degrees: args.yaw,
        uniform_scale: args.scale,
        ..SceneState::new(args.figure, &config.camera)
    };
    let parts: Vec<PartReport> = transform::compose_figure(&state).iter().map(PartReport::from).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&parts)?);
        return Ok(());
    }

    println!(
        "{} at ({}, {}, {}), yaw {}, scale {}",
        args.figure.as_str(),
        args.x,
        args.y,
        args.z,
        args.yaw,
        args.scale
    );
    for part in &parts {
        let Vec3Pod { x, y, z } = part.origin;
        println!();
        println!("{:<12} {:<9} origin ({x:>8.3}, {y:>8.3}, {z:>8.3})", part.name, part.mesh);
        // Row-major for reading; storage stays column-major
        for row in 0..4 {
            let c = &part.model.cols;
            println!(
                "    [{:>8.3} {:>8.3} {:>8.3} {:>8.3}]",
                c[0][row], c[1][row], c[2][row], c[3][row]
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_report_origin() {
        let state = SceneState {
            root_position: Vec3::new(2.0, 0.0, 3.0),
            ..SceneState::default()
        };
        let parts = transform::compose_figure(&state);
        let body = parts.iter().find(|p| p.name == "body").unwrap();
        let report = PartReport::from(body);
        assert_eq!(report.mesh, "sphere");
        assert_eq!(report.origin.to_array(), body.model.transform_point3(Vec3::ZERO).to_array());
        assert_eq!(report.model.translation(), report.origin.to_array());
    }

    #[test]
    fn test_inspect_json_runs() {
        let dir = tempfile::tempdir().unwrap();
        execute(InspectArgs {
            figure: FigureKind::Car,
            x: 1.0,
            y: 0.0,
            z: -1.0,
            yaw: 45.0,
            scale: 2.0,
            json: true,
            config: Some(crate::default_config_file(dir.path())),
        })
        .unwrap();
    }

    #[test]
    fn test_inspect_mirrored_pose() {
        let dir = tempfile::tempdir().unwrap();
        execute(InspectArgs {
            figure: FigureKind::Snowman,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            yaw: 0.0,
            scale: -1.0,
            json: false,
            config: Some(crate::default_config_file(dir.path())),
        })
        .unwrap();
    }
}
