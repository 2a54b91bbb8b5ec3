use serde::{Deserialize, Serialize};

use crate::orientation::OrientationSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StabilityState {
    Stable,
    Flipped,
    SelfCorrected,
}

/// Margin below the threshold required to count as stabilized again,
/// preventing chatter when the vehicle sits near the boundary.
pub const HYSTERESIS_DEGREES: f32 = 5.0;

/// How long the self-corrected notification stays up before the state
/// returns to stable on its own.
pub const RECOVERY_DELAY_SECONDS: f32 = 10.0;

/// Classifies per-tick orientation samples into a stability state and
/// decides whether motion commands may be applied. The recovery
/// countdown is driven by the `dt` passed into `tick`; the monitor
/// never reads a clock of its own.
#[derive(Debug, Clone)]
pub struct StabilityMonitor {
    state: StabilityState,
    threshold: f32,
    countdown: f32,
}

impl StabilityMonitor {
    pub fn new(threshold_degrees: f32) -> Self {
        Self {
            state: StabilityState::Stable,
            threshold: threshold_degrees,
            countdown: 0.0,
        }
    }

    pub fn state(&self) -> StabilityState {
        self.state
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Motion commands are suppressed only while flipped.
    pub fn accepts_motion(&self) -> bool {
        self.state != StabilityState::Flipped
    }

    pub fn tick(&mut self, sample: &OrientationSample, dt: f32) -> StabilityState {
        if sample.is_indeterminate() {
            // Bad input holds the previous state; the countdown does not
            // advance either, so no transition can ride on garbage data.
            log::warn!("indeterminate orientation sample, holding {:?}", self.state);
            return self.state;
        }

        let tilted = sample.pitch.abs() > self.threshold || sample.roll.abs() > self.threshold;
        let settled = sample.pitch.abs() < self.threshold - HYSTERESIS_DEGREES
            && sample.roll.abs() < self.threshold - HYSTERESIS_DEGREES;

        match self.state {
            StabilityState::Stable => {
                if tilted {
                    self.enter(StabilityState::Flipped);
                }
            }
            StabilityState::Flipped => {
                if settled {
                    self.countdown = RECOVERY_DELAY_SECONDS;
                    self.enter(StabilityState::SelfCorrected);
                }
            }
            StabilityState::SelfCorrected => {
                // Instability takes priority over the countdown.
                if tilted {
                    self.enter(StabilityState::Flipped);
                } else {
                    self.countdown -= dt;
                    if self.countdown <= 0.0 {
                        self.countdown = 0.0;
                        self.enter(StabilityState::Stable);
                    }
                }
            }
        }

        self.state
    }

    /// Explicit reset: forces stable from any state and cancels the
    /// recovery countdown.
    pub fn reset(&mut self) {
        self.countdown = 0.0;
        if self.state != StabilityState::Stable {
            self.enter(StabilityState::Stable);
        }
    }

    fn enter(&mut self, next: StabilityState) {
        log::debug!("stability {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
