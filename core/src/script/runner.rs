//! Headless script execution
//!
//! Drives a [`SceneRuntime`] through a compiled script with a
//! [`RecordingBackend`] standing in for the GPU, capturing snapshots and
//! assertion results into an [`ExecutionReport`].

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use super::ScriptError;
use super::ast::{AssertValue, SceneScript};
use super::compiler::{CompiledAssertion, CompiledScript};
use super::report::{AssertionResult, ExecutionReport, ReportSummary, Snapshot, compute_delta};
use crate::backend::{MeshTable, RecordingBackend, to_uniform};
use crate::camera;
use crate::config::{CameraConfig, Config};
use crate::runtime::SceneRuntime;
use crate::scene::SceneState;

/// Variables scripts can reference in assertions
pub const SCENE_VARIABLES: &[&str] = &[
    "$root_x",
    "$root_y",
    "$root_z",
    "$yaw",
    "$scale",
    "$cam_h",
    "$cam_v",
    "$radius",
    "$radius_offset",
    "$first_person",
    "$render_mode",
    "$light",
    "$bumper_cars",
    "$draws",
    "$frame",
];

/// Headless runner configuration
#[derive(Debug, Clone, Default)]
pub struct HeadlessConfig {
    /// Stop on first assertion failure
    pub fail_fast: bool,
    /// Script file path (for reporting)
    pub script_path: Option<String>,
}

/// Headless script runner
pub struct HeadlessRunner {
    script: CompiledScript,
    config: HeadlessConfig,
    runtime: SceneRuntime,
    meshes: MeshTable,
    backend: RecordingBackend,
    seed: u64,
}

impl HeadlessRunner {
    /// Compile `script` against `base`, with the script's figure and seed
    /// taking precedence.
    pub fn new(script: &SceneScript, base: &Config, config: HeadlessConfig) -> Result<Self, ScriptError> {
        let compiled = script.compile()?;
        let mut scene_config = base.clone();
        if let Some(figure) = script.figure {
            scene_config.scene.figure = figure;
        }
        if let Some(seed) = script.seed {
            scene_config.scene.seed = seed;
        }

        Ok(Self {
            script: compiled,
            config,
            runtime: SceneRuntime::new(&scene_config),
            meshes: MeshTable::placeholder(),
            backend: RecordingBackend::new(),
            seed: scene_config.scene.seed,
        })
    }

    /// Create from a TOML script file
    pub fn from_file(path: &Path, base: &Config, config: HeadlessConfig) -> Result<Self, ScriptError> {
        let script = SceneScript::from_file(path)?;
        let config = HeadlessConfig {
            script_path: Some(path.display().to_string()),
            ..config
        };
        Self::new(&script, base, config)
    }

    pub fn runtime(&self) -> &SceneRuntime {
        &self.runtime
    }

    /// Run every frame of the script.
    ///
    /// Stops early on an exit request, or on the first failed assertion
    /// with `fail_fast`.
    pub fn execute(&mut self) -> Result<ExecutionReport, ScriptError> {
        let started = Instant::now();
        let executed_at = chrono::Utc::now().to_rfc3339();
        let total_frames = self.script.frame_count();
        info!(frames = total_frames, seed = self.seed, "executing scene script");

        let mut snapshots = Vec::new();
        let mut assertions = Vec::new();
        let mut last_draws = 0;
        let mut frames_executed = 0;
        let mut prev_values = scene_variables(self.runtime.state(), self.runtime.composer().camera(), 0, 0);

        for (index, frame) in self.script.frames.iter().enumerate() {
            let index = index as u64;
            let pre = frame
                .snap
                .then(|| scene_variables(self.runtime.state(), self.runtime.composer().camera(), last_draws, index));

            self.backend.clear();
            let output = self.runtime.step(&frame.input);
            let draws = self.runtime.submit(&output, &self.meshes, &mut self.backend)?;
            last_draws = draws;
            frames_executed += 1;

            let post = scene_variables(self.runtime.state(), self.runtime.composer().camera(), draws, index);
            if let Some(pre) = pre {
                snapshots.push(Snapshot {
                    frame: index,
                    input: frame.label.clone(),
                    delta: compute_delta(&pre, &post),
                    pre,
                    post: post.clone(),
                    view: to_uniform(&output.view),
                    draws,
                });
            }

            let mut failed = false;
            for assertion in &frame.assertions {
                let result = evaluate_assertion(assertion, &post, &prev_values, index);
                if !result.passed {
                    warn!(frame = index, condition = %result.condition, "assertion failed");
                    failed = true;
                }
                assertions.push(result);
            }
            prev_values = post;

            if failed && self.config.fail_fast {
                info!(frame = index, "stopping on first failure");
                break;
            }
            if self.runtime.exit_requested() {
                info!(frame = index, "script requested exit");
                break;
            }
        }

        let summary = ReportSummary::new(&snapshots, &assertions);
        info!(
            frames = frames_executed,
            passed = summary.assertions_passed,
            failed = summary.assertions_failed,
            "scene script finished"
        );

        Ok(ExecutionReport {
            version: "1.0".to_string(),
            script: self.config.script_path.clone(),
            executed_at,
            duration_ms: started.elapsed().as_millis() as u64,
            figure: self.runtime.state().figure.as_str().to_string(),
            seed: self.seed,
            frames_executed,
            total_frames,
            exit_requested: self.runtime.exit_requested(),
            snapshots,
            assertions,
            summary,
        })
    }
}

/// Current values of every [`SCENE_VARIABLES`] entry
pub fn scene_variables(
    state: &SceneState,
    camera_config: &CameraConfig,
    draws: usize,
    frame: u64,
) -> BTreeMap<String, f64> {
    let flag = |b: bool| if b { 1.0 } else { 0.0 };
    let values = [
        state.root_position.x as f64,
        state.root_position.y as f64,
        state.root_position.z as f64,
        state.root_yaw_degrees as f64,
        state.uniform_scale as f64,
        state.camera_horizontal_degrees as f64,
        state.camera_vertical_degrees as f64,
        camera::orbit_radius(camera_config, state.orbit_radius_offset) as f64,
        state.orbit_radius_offset as f64,
        flag(state.first_person),
        state.render_mode.code() as f64,
        flag(state.light_enabled),
        flag(state.bumper_cars),
        draws as f64,
        frame as f64,
    ];
    SCENE_VARIABLES
        .iter()
        .zip(values)
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn lookup(values: &BTreeMap<String, f64>, name: &str) -> Option<f64> {
    let value = values.get(name).copied();
    if value.is_none() {
        warn!(variable = name, "unknown scene variable");
    }
    value
}

fn evaluate_assertion(
    assertion: &CompiledAssertion,
    values: &BTreeMap<String, f64>,
    prev_values: &BTreeMap<String, f64>,
    frame: u64,
) -> AssertionResult {
    let condition = &assertion.parsed;
    let actual = lookup(values, &condition.variable);
    let expected = match &condition.value {
        AssertValue::Number(n) => Some(*n),
        AssertValue::Variable(name) => lookup(values, name),
        AssertValue::PrevValue(name) => lookup(prev_values, &format!("${name}")),
    };

    let passed = match (actual, expected) {
        (Some(a), Some(e)) => condition.operator.compare(a, e),
        _ => false,
    };

    AssertionResult {
        frame,
        condition: assertion.condition.clone(),
        passed,
        actual,
        expected: (!passed).then(|| format!("{} {}", condition.operator, format_expected(&condition.value, expected))),
    }
}

fn format_expected(value: &AssertValue, resolved: Option<f64>) -> String {
    let resolved = resolved.map_or_else(|| "undefined".to_string(), |v| v.to_string());
    match value {
        AssertValue::Number(n) => n.to_string(),
        AssertValue::Variable(name) => format!("{name} ({resolved})"),
        AssertValue::PrevValue(name) => format!("$prev_{name} ({resolved})"),
    }
}
