//! Renderer-facing poses derived from simulation snapshots
//!
//! Nothing here holds state. Given the vehicle and garage door snapshots,
//! [`ScenePoses::derive`] produces the transforms a renderer needs for each
//! articulated part. Vehicle parts are local to the vehicle; combine them
//! with [`ScenePoses::vehicle`] through [`ScenePoses::to_world`].

use crate::config::VehicleTuning;
use crate::doors::GarageDoorState;
use crate::foundation::math::{Quat, Transform, Vec3, utils};
use crate::physics::world::{GARAGE_DOOR_HINGE_Y, GARAGE_DOOR_Z};
use crate::vehicle::VehicleState;

/// Full door swing in degrees
pub const DOOR_SWING_DEGREES: f32 = 70.0;
/// Full garage door swing in degrees about X
pub const GARAGE_DOOR_SWING_DEGREES: f32 = -85.0;
/// Steering wheel turns per degree of road-wheel steering
pub const STEERING_WHEEL_RATIO: f32 = 4.0;

const FRONT_WHEEL_OFFSET: [f32; 3] = [0.78, 0.26, 1.05];
const REAR_WHEEL_OFFSET: [f32; 3] = [0.78, 0.33, -1.05];
const DOOR_HINGE_OFFSET: [f32; 3] = [0.75, 0.6, 0.8];
const STEERING_WHEEL_OFFSET: [f32; 3] = [0.30, 0.92, 0.9];

/// Index into [`ScenePoses::wheels`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wheel {
    /// Front, -X side
    FrontLeft = 0,
    /// Front, +X side
    FrontRight = 1,
    /// Rear, -X side
    RearLeft = 2,
    /// Rear, +X side
    RearRight = 3,
}

/// Transforms for every moving part in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePoses {
    /// Vehicle body in world space
    pub vehicle: Transform,
    /// Wheel hubs, vehicle-local, indexed by [`Wheel`]
    pub wheels: [Transform; 4],
    /// Left door hinge, vehicle-local
    pub left_door: Transform,
    /// Right door hinge, vehicle-local
    pub right_door: Transform,
    /// Steering wheel, vehicle-local
    pub steering_wheel: Transform,
    /// Garage door hinge line in world space
    pub garage_door: Transform,
}

fn offset(base: [f32; 3], side: f32) -> Vec3 {
    Vec3::new(base[0] * side, base[1], base[2])
}

fn about_x(degrees: f32) -> Quat {
    Quat::from_axis_angle(&Vec3::x_axis(), utils::deg_to_rad(degrees))
}

fn about_y(degrees: f32) -> Quat {
    Quat::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(degrees))
}

fn about_z(degrees: f32) -> Quat {
    Quat::from_axis_angle(&Vec3::z_axis(), utils::deg_to_rad(degrees))
}

impl ScenePoses {
    /// Derive every pose from the current snapshots
    pub fn derive(vehicle: &VehicleState, garage: &GarageDoorState, tuning: &VehicleTuning) -> Self {
        let body = Transform::from_position_rotation(Vec3::new(vehicle.x, 0.0, vehicle.z), about_y(vehicle.heading));

        let front_spin = vehicle.wheel_rotation;
        let rear_spin = if tuning.rear_wheel_radius > f32::EPSILON {
            vehicle.wheel_rotation * tuning.front_wheel_radius / tuning.rear_wheel_radius
        } else {
            0.0
        };
        let steer = about_y(vehicle.steering_angle);
        let front = |side| {
            Transform::from_position_rotation(offset(FRONT_WHEEL_OFFSET, side), steer * about_x(front_spin))
        };
        let rear = |side| Transform::from_position_rotation(offset(REAR_WHEEL_OFFSET, side), about_x(rear_spin));

        let door = |side: f32, open: f32| {
            Transform::from_position_rotation(
                offset(DOOR_HINGE_OFFSET, side),
                about_y(-open * DOOR_SWING_DEGREES * side),
            )
        };

        Self {
            vehicle: body,
            wheels: [front(-1.0), front(1.0), rear(-1.0), rear(1.0)],
            left_door: door(-1.0, vehicle.left_door_open()),
            right_door: door(1.0, vehicle.right_door_open()),
            steering_wheel: Transform::from_position_rotation(
                offset(STEERING_WHEEL_OFFSET, 1.0),
                about_z(-vehicle.steering_angle * STEERING_WHEEL_RATIO),
            ),
            garage_door: Transform::from_position_rotation(
                Vec3::new(0.0, GARAGE_DOOR_HINGE_Y, GARAGE_DOOR_Z),
                about_x(garage.open() * GARAGE_DOOR_SWING_DEGREES),
            ),
        }
    }

    /// Wheel hub transform
    pub fn wheel(&self, wheel: Wheel) -> &Transform {
        &self.wheels[wheel as usize]
    }

    /// Bring a vehicle-local transform into world space
    pub fn to_world(&self, local: &Transform) -> Transform {
        self.vehicle.combine(local)
    }
}
