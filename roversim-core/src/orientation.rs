use serde::{Deserialize, Serialize};

/// Wraps an angle in degrees into (-180, 180].
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

/// Vehicle attitude in degrees. Pitch and roll are normalized into
/// (-180, 180]; yaw is passed through untouched since stability
/// classification never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationSample {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl OrientationSample {
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self {
            pitch: normalize_degrees(pitch),
            yaw,
            roll: normalize_degrees(roll),
        }
    }

    pub fn level(yaw: f32) -> Self {
        Self::new(0.0, yaw, 0.0)
    }

    /// A sample with non-finite pitch or roll violates the caller
    /// contract; the monitor holds its state instead of transitioning.
    pub fn is_indeterminate(&self) -> bool {
        !self.pitch.is_finite() || !self.roll.is_finite()
    }
}
