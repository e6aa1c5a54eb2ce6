//! Single-threaded frame loop
//!
//! One owner for [`SceneState`]: poll input, advance state, compose
//! matrices, submit draws, in that order, once per frame. The exit flag is
//! checked once per frame; there is no other cancellation.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use tracing::{info, trace};

use crate::backend::{
    BackendError, DrawDispatcher, InputProvider, MeshTable, ProgramHandle, ShaderBackend,
    UniformNaming,
};
use crate::config::Config;
use crate::frame::{FrameComposer, FrameOutput, submit};
use crate::input::{FrameInput, InputSampler};
use crate::scene::SceneState;

/// Owns the scene state and everything that advances it.
#[derive(Debug, Clone)]
pub struct SceneRuntime {
    state: SceneState,
    sampler: InputSampler,
    composer: FrameComposer,
    rng: Pcg32,
    naming: UniformNaming,
    program: ProgramHandle,
    frame: u64,
}

impl SceneRuntime {
    pub fn new(config: &Config) -> Self {
        Self {
            state: SceneState::new(config.scene.figure, &config.camera),
            sampler: InputSampler::new(config.keys.clone(), config.controls.clone(), config.camera.clone()),
            composer: FrameComposer::from_config(config),
            rng: Pcg32::seed_from_u64(config.scene.seed),
            naming: config.scene.uniform_naming,
            program: 0,
            frame: 0,
        }
    }

    /// Program handle passed along with every uniform upload
    pub fn with_program(mut self, program: ProgramHandle) -> Self {
        self.program = program;
        self
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SceneState {
        &mut self.state
    }

    pub fn composer(&self) -> &FrameComposer {
        &self.composer
    }

    /// Frames advanced so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn exit_requested(&self) -> bool {
        self.state.exit_requested
    }

    /// Advances one frame and composes its matrices.
    pub fn step(&mut self, input: &FrameInput) -> FrameOutput {
        self.sampler.advance(&mut self.state, input, &mut self.rng);
        self.frame += 1;
        let output = self.composer.compose(&self.state);
        trace!(frame = self.frame, draws = output.draws.len(), "frame composed");
        output
    }

    /// Hands a composed frame to the backend.
    pub fn submit<B>(&self, frame: &FrameOutput, meshes: &MeshTable, backend: &mut B) -> Result<usize, BackendError>
    where
        B: ShaderBackend + DrawDispatcher,
    {
        submit(frame, self.program, self.naming, meshes, backend)
    }

    /// Runs until the provider runs dry or exit is requested.
    ///
    /// Returns the number of frames executed.
    ///
    /// # Errors
    ///
    /// Stops at the first backend error.
    pub fn run<P, B>(&mut self, provider: &mut P, meshes: &MeshTable, backend: &mut B) -> Result<u64, BackendError>
    where
        P: InputProvider,
        B: ShaderBackend + DrawDispatcher,
    {
        info!(figure = self.state.figure.as_str(), "scene loop started");
        let start = self.frame;
        while !self.state.exit_requested {
            let Some(input) = provider.poll() else {
                break;
            };
            let frame = self.step(&input);
            self.submit(&frame, meshes, backend)?;
        }
        let executed = self.frame - start;
        info!(frames = executed, exit_requested = self.state.exit_requested, "scene loop finished");
        Ok(executed)
    }
}
