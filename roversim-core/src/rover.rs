use serde::{Deserialize, Serialize};

use crate::orientation::OrientationSample;
use crate::stability::{StabilityMonitor, StabilityState};

/// Position plus pitch/yaw/roll rotation in degrees. Captured once at
/// controller construction and restored verbatim on reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoverPose {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
}

impl RoverPose {
    pub fn new(position: [f32; 3], rotation: [f32; 3]) -> Self {
        Self { position, rotation }
    }
}

/// Host-supplied drive axes, each in [-1, 1]. Values outside the range
/// are clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DriveInput {
    pub forward_axis: f32,
    pub turn_axis: f32,
}

impl DriveInput {
    pub fn new(forward_axis: f32, turn_axis: f32) -> Self {
        Self {
            forward_axis: forward_axis.clamp(-1.0, 1.0),
            turn_axis: turn_axis.clamp(-1.0, 1.0),
        }
    }

    pub fn idle() -> Self {
        Self::default()
    }
}

/// Displacement request handed to the external physics integrator.
/// The core never moves the body itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionRequest {
    /// Distance to advance along the vehicle's forward axis.
    pub forward_step: f32,
    /// Yaw rotation to apply, in degrees.
    pub yaw_delta: f32,
}

/// Asks the integrator to restore a pose and zero all velocities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResetRequest {
    pub pose: RoverPose,
    pub zero_velocities: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoverConfig {
    /// Forward/backward speed in world units per second.
    pub move_speed: f32,
    /// Turning speed in degrees per second.
    pub turn_speed: f32,
    /// Pitch/roll magnitude beyond which the rover counts as flipped.
    pub stability_threshold: f32,
}

impl Default for RoverConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            turn_speed: 100.0,
            stability_threshold: 45.0,
        }
    }
}

/// Per-tick controller output for the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoverTick {
    pub state: StabilityState,
    pub orientation: OrientationSample,
    pub accepts_motion: bool,
    /// Present only while motion commands are accepted.
    pub motion: Option<MotionRequest>,
}

pub struct RoverController {
    config: RoverConfig,
    monitor: StabilityMonitor,
    initial_pose: RoverPose,
    last_orientation: OrientationSample,
}

impl RoverController {
    pub fn new(config: RoverConfig, initial_pose: RoverPose) -> Self {
        let threshold = config.stability_threshold;
        let [pitch, yaw, roll] = initial_pose.rotation;
        Self {
            config,
            monitor: StabilityMonitor::new(threshold),
            initial_pose,
            last_orientation: OrientationSample::new(pitch, yaw, roll),
        }
    }

    pub fn config(&self) -> &RoverConfig {
        &self.config
    }

    pub fn state(&self) -> StabilityState {
        self.monitor.state()
    }

    pub fn initial_pose(&self) -> RoverPose {
        self.initial_pose
    }

    pub fn last_orientation(&self) -> OrientationSample {
        self.last_orientation
    }

    pub fn accepts_motion(&self) -> bool {
        self.monitor.accepts_motion()
    }

    /// Fixed-step update: classify the sample, then translate the drive
    /// axes into a motion request unless control is locked out.
    pub fn tick(&mut self, sample: OrientationSample, input: DriveInput, dt: f32) -> RoverTick {
        let state = self.monitor.tick(&sample, dt);
        if !sample.is_indeterminate() {
            self.last_orientation = sample;
        }

        let motion = if self.monitor.accepts_motion() {
            Some(MotionRequest {
                forward_step: self.config.move_speed * input.forward_axis.clamp(-1.0, 1.0) * dt,
                yaw_delta: self.config.turn_speed * input.turn_axis.clamp(-1.0, 1.0) * dt,
            })
        } else {
            None
        };

        RoverTick {
            state,
            orientation: self.last_orientation,
            accepts_motion: motion.is_some(),
            motion,
        }
    }

    /// Restores the captured initial pose and forces the monitor back
    /// to stable. The returned request is for the external integrator.
    pub fn reset(&mut self) -> ResetRequest {
        self.monitor.reset();
        let [pitch, yaw, roll] = self.initial_pose.rotation;
        self.last_orientation = OrientationSample::new(pitch, yaw, roll);
        ResetRequest {
            pose: self.initial_pose,
            zero_velocities: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn start_pose() -> RoverPose {
        RoverPose::new([64.0, 2.5, 64.0], [0.0, 90.0, 0.0])
    }

    fn controller() -> RoverController {
        RoverController::new(RoverConfig::default(), start_pose())
    }

    #[test]
    fn motion_request_scales_with_axes_and_dt() {
        let mut controller = controller();
        let tick = controller.tick(
            OrientationSample::level(90.0),
            DriveInput::new(1.0, -0.5),
            0.1,
        );

        let motion = tick.motion.unwrap();
        assert!((motion.forward_step - 5.0 * 0.1).abs() < 1e-6);
        assert!((motion.yaw_delta - 100.0 * -0.5 * 0.1).abs() < 1e-6);
    }

    #[test]
    fn drive_axes_are_clamped() {
        let input = DriveInput::new(3.0, -7.0);
        assert_eq!(input.forward_axis, 1.0);
        assert_eq!(input.turn_axis, -1.0);
    }

    #[test]
    fn flipping_suppresses_motion_requests() {
        let mut controller = controller();
        let tipped = OrientationSample::new(60.0, 90.0, 0.0);
        let tick = controller.tick(tipped, DriveInput::new(1.0, 1.0), DT);

        assert_eq!(tick.state, StabilityState::Flipped);
        assert!(!tick.accepts_motion);
        assert_eq!(tick.motion, None);
    }

    #[test]
    fn motion_resumes_after_self_correction() {
        let mut controller = controller();
        controller.tick(OrientationSample::new(60.0, 90.0, 0.0), DriveInput::idle(), DT);
        let tick = controller.tick(
            OrientationSample::new(5.0, 90.0, 5.0),
            DriveInput::new(1.0, 0.0),
            DT,
        );

        assert_eq!(tick.state, StabilityState::SelfCorrected);
        assert!(tick.accepts_motion);
        assert!(tick.motion.is_some());
    }

    #[test]
    fn indeterminate_sample_reports_last_good_orientation() {
        let mut controller = controller();
        let good = OrientationSample::new(12.0, 45.0, -3.0);
        controller.tick(good, DriveInput::idle(), DT);
        let tick = controller.tick(
            OrientationSample::new(f32::NAN, 0.0, 0.0),
            DriveInput::idle(),
            DT,
        );
        assert_eq!(tick.orientation, good);
    }

    #[test]
    fn reset_restores_captured_pose_exactly() {
        let mut controller = controller();
        controller.tick(OrientationSample::new(120.0, 0.0, 0.0), DriveInput::idle(), DT);
        assert_eq!(controller.state(), StabilityState::Flipped);

        let reset = controller.reset();
        assert_eq!(reset.pose, start_pose());
        assert!(reset.zero_velocities);
        assert_eq!(controller.state(), StabilityState::Stable);
        assert!(controller.accepts_motion());
    }
}
