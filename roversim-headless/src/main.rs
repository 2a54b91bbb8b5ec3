use std::error::Error;

use roversim_core::{
    DriveInput, HeightGrid, OrientationSample, ResetRequest, RoverConfig, RoverPose, Session,
    TerrainConfig, perimeter_walls,
};

const FIXED_STEP_SECONDS: f32 = 1.0 / 60.0;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_TICKS: u32 = 600;

/// World-space extent of the terrain patch along x and z.
const WORLD_SIZE: f32 = 128.0;
const WALL_HEIGHT: f32 = 5.0;
const WALL_THICKNESS: f32 = 1.0;

/// Toy kinematic stand-in for the external rigid-body integrator. It
/// applies the core's motion requests directly and keeps the body glued
/// to the terrain surface; good enough to exercise the interfaces,
/// nothing more.
struct KinematicBody {
    position: [f32; 3],
    yaw: f32,
}

impl KinematicBody {
    fn apply_reset(&mut self, reset: &ResetRequest) {
        self.position = reset.pose.position;
        self.yaw = reset.pose.rotation[1];
    }

    fn apply_motion(&mut self, forward_step: f32, yaw_delta: f32) {
        self.yaw += yaw_delta;
        let yaw_rad = self.yaw.to_radians();
        self.position[0] += yaw_rad.sin() * forward_step;
        self.position[2] += yaw_rad.cos() * forward_step;
        self.position[0] = self.position[0].clamp(0.0, WORLD_SIZE);
        self.position[2] = self.position[2].clamp(0.0, WORLD_SIZE);
    }

    fn settle_on_terrain(&mut self, grid: &HeightGrid, depth: f32) {
        let (gx, gy) = self.grid_position(grid);
        self.position[1] = grid.sample(gx, gy) * depth;
    }

    fn grid_position(&self, grid: &HeightGrid) -> (f32, f32) {
        let span = (grid.width() - 1) as f32;
        (
            self.position[0] / WORLD_SIZE * span,
            self.position[2] / WORLD_SIZE * span,
        )
    }

    /// Derives pitch/roll from the heightfield slope under the body via
    /// central differences, the way a real integrator would report the
    /// chassis attitude.
    fn orientation(&self, grid: &HeightGrid, depth: f32) -> OrientationSample {
        let (gx, gy) = self.grid_position(grid);
        let cell_world = WORLD_SIZE / (grid.width() - 1) as f32;

        let slope_x = (grid.sample(gx + 1.0, gy) - grid.sample(gx - 1.0, gy)) * depth
            / (2.0 * cell_world);
        let slope_z = (grid.sample(gx, gy + 1.0) - grid.sample(gx, gy - 1.0)) * depth
            / (2.0 * cell_world);

        let yaw_rad = self.yaw.to_radians();
        let forward_slope = slope_x * yaw_rad.sin() + slope_z * yaw_rad.cos();
        let right_slope = slope_x * yaw_rad.cos() - slope_z * yaw_rad.sin();

        OrientationSample::new(
            (-forward_slope).atan().to_degrees(),
            self.yaw,
            right_slope.atan().to_degrees(),
        )
    }
}

fn parse_args() -> Result<(u64, u32), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(raw) => raw.parse()?,
        None => DEFAULT_SEED,
    };
    let ticks = match args.next() {
        Some(raw) => raw.parse()?,
        None => DEFAULT_TICKS,
    };
    Ok((seed, ticks))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let (seed, ticks) = parse_args()?;

    let start_pose = RoverPose::new([WORLD_SIZE / 2.0, 0.0, WORLD_SIZE / 2.0], [0.0, 0.0, 0.0]);
    let mut session = Session::new(
        TerrainConfig::default(),
        RoverConfig::default(),
        start_pose,
        seed,
    )?;

    let walls = perimeter_walls(WORLD_SIZE, WORLD_SIZE, WALL_HEIGHT, WALL_THICKNESS);
    println!("{}", serde_json::to_string(&walls)?);

    let mut body = KinematicBody {
        position: start_pose.position,
        yaw: start_pose.rotation[1],
    };

    // The consumer takes the grid by value; the session keeps its own copy.
    let (grid, depth) = {
        let outcome = session.restart()?;
        body.apply_reset(&outcome.reset);
        (outcome.grid.clone(), outcome.depth)
    };
    body.settle_on_terrain(&grid, depth);
    log::info!("session seed {seed}, running {ticks} ticks");

    for tick_index in 0..ticks {
        // Scripted drive: full throttle with a slow weaving turn.
        let t = tick_index as f32 * FIXED_STEP_SECONDS;
        let input = DriveInput::new(1.0, (t * 0.4).sin() * 0.5);
        let sample = body.orientation(&grid, depth);

        if let Some(result) = session.tick(FIXED_STEP_SECONDS, input, sample) {
            if let Some(motion) = result.motion {
                body.apply_motion(motion.forward_step, motion.yaw_delta);
                body.settle_on_terrain(&grid, depth);
            }
        }

        println!("{}", serde_json::to_string(&session.view())?);
    }

    Ok(())
}
