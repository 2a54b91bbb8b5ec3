pub mod heightgrid;
pub mod orientation;
pub mod rover;
pub mod session;
pub mod stability;
pub mod terrain;
pub mod walls;

pub use heightgrid::{GridError, HeightGrid};
pub use orientation::{OrientationSample, normalize_degrees};
pub use rover::{
    DriveInput, MotionRequest, ResetRequest, RoverConfig, RoverController, RoverPose, RoverTick,
};
pub use session::{RestartOutcome, Session, ViewModel};
pub use stability::{
    HYSTERESIS_DEGREES, RECOVERY_DELAY_SECONDS, StabilityMonitor, StabilityState,
};
pub use terrain::{DropOffSpec, TerrainConfig, TerrainError, TerrainGenerator};
pub use walls::{WallSpec, perimeter_walls};
