use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::heightgrid::HeightGrid;
use crate::orientation::OrientationSample;
use crate::rover::{DriveInput, ResetRequest, RoverConfig, RoverController, RoverPose, RoverTick};
use crate::stability::StabilityState;
use crate::terrain::{TerrainConfig, TerrainError, TerrainGenerator};

/// Snapshot of the simulation for the host UI: current stability
/// classification, attitude readout, and which prompts to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub state: StabilityState,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    pub accepts_motion: bool,
    pub show_flipped_prompt: bool,
    pub show_recovery_banner: bool,
    pub paused: bool,
    pub sim_time: f32,
}

/// Result of a restart, borrowed for the host to act on: the freshly
/// published grid, its vertical scale, and the pose/velocity reset the
/// external integrator must apply.
#[derive(Debug)]
pub struct RestartOutcome<'a> {
    pub grid: &'a HeightGrid,
    pub depth: f32,
    pub reset: ResetRequest,
}

/// Ties terrain generation and the rover controller together behind
/// the lifecycle surface a menu collaborator drives: restart, pause,
/// resume, tick. The session owns no clock; hosts pass `dt` in and the
/// session simply declines to step while paused.
pub struct Session {
    terrain_config: TerrainConfig,
    rover: RoverController,
    seeds: Rng,
    grid: Option<HeightGrid>,
    paused: bool,
    sim_time: f32,
}

impl Session {
    /// Validates the terrain description up front so a misconfigured
    /// session cannot exist, then waits for the first `restart` before
    /// publishing any terrain.
    pub fn new(
        terrain_config: TerrainConfig,
        rover_config: RoverConfig,
        start_pose: RoverPose,
        seed: u64,
    ) -> Result<Self, TerrainError> {
        TerrainGenerator::new(terrain_config.clone(), 0)?;
        Ok(Self {
            terrain_config,
            rover: RoverController::new(rover_config, start_pose),
            seeds: Rng::with_seed(seed),
            grid: None,
            paused: false,
            sim_time: 0.0,
        })
    }

    pub fn grid(&self) -> Option<&HeightGrid> {
        self.grid.as_ref()
    }

    pub fn depth(&self) -> f32 {
        self.terrain_config.depth
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn sim_time(&self) -> f32 {
        self.sim_time
    }

    pub fn rover(&self) -> &RoverController {
        &self.rover
    }

    /// Regenerates terrain and resets the rover. The new grid is built
    /// in full before it replaces the published one, so readers never
    /// observe a partially generated surface. Safe to call repeatedly.
    pub fn restart(&mut self) -> Result<RestartOutcome<'_>, TerrainError> {
        let generator = TerrainGenerator::new(self.terrain_config.clone(), self.seeds.u32(..))?;
        let fresh = generator.generate();

        let reset = self.rover.reset();
        self.sim_time = 0.0;

        Ok(RestartOutcome {
            grid: self.grid.insert(fresh),
            depth: self.terrain_config.depth,
            reset,
        })
    }

    /// Idempotent; a paused session ignores `tick` entirely.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Idempotent counterpart to `pause`.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Fixed-step update. Returns `None` while paused or before the
    /// first restart has published terrain.
    pub fn tick(
        &mut self,
        dt: f32,
        input: DriveInput,
        sample: OrientationSample,
    ) -> Option<RoverTick> {
        if self.paused || self.grid.is_none() {
            return None;
        }
        self.sim_time += dt;
        Some(self.rover.tick(sample, input, dt))
    }

    pub fn view(&self) -> ViewModel {
        let state = self.rover.state();
        let orientation = self.rover.last_orientation();
        ViewModel {
            state,
            pitch: orientation.pitch,
            yaw: orientation.yaw,
            roll: orientation.roll,
            accepts_motion: self.rover.accepts_motion(),
            show_flipped_prompt: state == StabilityState::Flipped,
            show_recovery_banner: state == StabilityState::SelfCorrected,
            paused: self.paused,
            sim_time: self.sim_time,
        }
    }
}
