//! Per-tick control intents

use bitflags::bitflags;
use serde::{Serialize, Deserialize};

bitflags! {
    /// Boolean control intents sampled at the start of a tick
    ///
    /// Toggle and camera-mode flags are one-shot: set them only on the tick
    /// the triggering key went down.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Intents: u32 {
        /// Increase speed toward the forward limit
        const ACCELERATE = 1 << 0;
        /// Decrease speed toward the reverse limit
        const BRAKE = 1 << 1;
        /// Turn the steering wheel left
        const STEER_LEFT = 1 << 2;
        /// Turn the steering wheel right
        const STEER_RIGHT = 1 << 3;
        /// Flip the left door target
        const TOGGLE_LEFT_DOOR = 1 << 4;
        /// Flip the right door target
        const TOGGLE_RIGHT_DOOR = 1 << 5;
        /// Flip the garage door target
        const TOGGLE_GATE = 1 << 6;
        /// Toggle the follow camera
        const CAMERA_MODE_FOLLOW = 1 << 7;
        /// Toggle the interior camera
        const CAMERA_MODE_INTERIOR = 1 << 8;
        /// Move the free-fly camera forward
        const CAM_MOVE_FORWARD = 1 << 9;
        /// Move the free-fly camera backward
        const CAM_MOVE_BACK = 1 << 10;
        /// Strafe the free-fly camera left
        const CAM_MOVE_LEFT = 1 << 11;
        /// Strafe the free-fly camera right
        const CAM_MOVE_RIGHT = 1 << 12;
        /// Raise the free-fly camera
        const CAM_MOVE_UP = 1 << 13;
        /// Lower the free-fly camera
        const CAM_MOVE_DOWN = 1 << 14;
    }
}

/// Everything the simulation needs from the outside world for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IntentSet {
    /// Boolean intents
    pub controls: Intents,
    /// Free-look yaw change in degrees
    pub yaw_delta: f32,
    /// Free-look pitch change in degrees (positive looks up)
    pub pitch_delta: f32,
}

impl IntentSet {
    /// Intent set with only boolean controls
    pub fn from_controls(controls: Intents) -> Self {
        Self {
            controls,
            ..Self::default()
        }
    }

    /// No input at all
    pub fn idle() -> Self {
        Self::default()
    }

    /// Whether `flag` is set
    pub fn has(&self, flag: Intents) -> bool {
        self.controls.contains(flag)
    }
}

impl From<Intents> for IntentSet {
    fn from(controls: Intents) -> Self {
        Self::from_controls(controls)
    }
}
