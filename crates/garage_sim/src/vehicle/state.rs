//! Vehicle state owned by the simulation

use serde::{Serialize, Deserialize};

use crate::animation::Animated;
use crate::foundation::math::{Vec2, utils};

/// Complete kinematic and cosmetic state of the vehicle
///
/// Position is on the ground plane; the vehicle's height is fixed. Angles are
/// in degrees. `heading` and `wheel_rotation` always lie in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VehicleState {
    /// Ground-plane X
    pub x: f32,
    /// Ground-plane Z
    pub z: f32,
    /// Heading in degrees; 0 faces +Z, 90 faces +X
    pub heading: f32,
    /// Signed speed along the heading, units per second
    pub speed: f32,
    /// Steering angle in degrees; positive turns left
    pub steering_angle: f32,
    /// Cosmetic front wheel spin in degrees
    pub wheel_rotation: f32,
    /// Left door open amount and target
    pub left_door: Animated,
    /// Right door open amount and target
    pub right_door: Animated,
}

impl VehicleState {
    /// Vehicle parked at `(x, z)` facing `heading`
    pub fn parked_at(x: f32, z: f32, heading: f32) -> Self {
        Self {
            x,
            z,
            heading: utils::wrap_degrees(heading),
            ..Self::default()
        }
    }

    /// Ground-plane position
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }

    /// Unit vector along the heading on the ground plane
    pub fn forward(&self) -> Vec2 {
        utils::heading_vector(self.heading)
    }

    /// Left door open amount in `[0, 1]`
    pub fn left_door_open(&self) -> f32 {
        self.left_door.value
    }

    /// Right door open amount in `[0, 1]`
    pub fn right_door_open(&self) -> f32 {
        self.right_door.value
    }

    /// Left door target, 0 or 1
    pub fn left_door_target(&self) -> f32 {
        self.left_door.target
    }

    /// Right door target, 0 or 1
    pub fn right_door_target(&self) -> f32 {
        self.right_door.target
    }
}
