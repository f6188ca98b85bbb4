//! Tuning tables for each simulation subsystem

use serde::{Serialize, Deserialize};

use super::{Config, ConfigError};
use crate::input::KeyBindings;

/// # Vehicle Tuning
///
/// Speed, steering and wheel constants used by the kinematic integrator.
/// Angles are in degrees, speeds in units per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleTuning {
    /// Speed change per second while accelerating or braking
    pub accel_rate: f32,
    /// Forward speed limit
    pub max_speed: f32,
    /// Reverse speed limit (negative)
    pub min_speed: f32,
    /// Per-tick multiplier applied to speed and steering with no input
    pub decay_factor: f32,
    /// Speeds below this magnitude snap to zero and count as stationary
    pub speed_dead_band: f32,
    /// Steering change in degrees per second while a steer intent is held
    pub steer_rate: f32,
    /// Steering lock in degrees (symmetric)
    pub max_steering_angle: f32,
    /// Steering angles below this magnitude snap to zero when released
    pub steering_dead_band: f32,
    /// Converts normalized steering times speed into degrees per second
    pub turn_gain: f32,
    /// Front wheel radius, drives the reported wheel spin
    pub front_wheel_radius: f32,
    /// Rear wheel radius, used only for rear wheel poses
    pub rear_wheel_radius: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            accel_rate: 2.0,
            max_speed: 8.0,
            min_speed: -4.0,
            decay_factor: 0.9,
            speed_dead_band: 0.1,
            steer_rate: 60.0,
            max_steering_angle: 30.0,
            steering_dead_band: 1.0,
            turn_gain: 18.0,
            front_wheel_radius: 0.22,
            rear_wheel_radius: 0.28,
        }
    }
}

/// # Collision Tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    /// Distance from the vehicle center to each bumper along the heading
    pub bumper_offset: f32,
    /// Radius of the bumper disc tested against tree trunks
    pub bumper_radius: f32,
    /// Garage door open amount at which the gate stops blocking
    pub gate_passable_threshold: f32,
    /// Upper bound on bumper-versus-trunk relaxation passes per tree
    pub relaxation_passes: u32,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            bumper_offset: 1.5,
            bumper_radius: 0.6,
            gate_passable_threshold: 0.95,
            relaxation_passes: 4,
        }
    }
}

/// # Door Tuning
///
/// Open-amount rates in fractions of full travel per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorTuning {
    /// Rate for both vehicle doors
    pub vehicle_door_rate: f32,
    /// Rate for the garage door
    pub garage_door_rate: f32,
}

impl Default for DoorTuning {
    fn default() -> Self {
        Self {
            vehicle_door_rate: 2.5,
            garage_door_rate: 1.5,
        }
    }
}

/// # Camera Tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Initial free-fly eye position
    pub start_position: [f32; 3],
    /// Initial pitch in degrees (positive looks up)
    pub start_pitch: f32,
    /// Initial yaw in degrees (0 looks down -Z)
    pub start_yaw: f32,
    /// Pitch clamp in degrees (symmetric)
    pub pitch_limit: f32,
    /// Free-fly translation speed in units per second
    pub move_speed: f32,
    /// Follow camera distance behind the vehicle
    pub follow_distance: f32,
    /// Height of the follow camera's look point
    pub follow_look_height: f32,
    /// Interior eye and look height
    pub interior_height: f32,
    /// Interior eye offset along the heading
    pub interior_forward_offset: f32,
    /// Interior eye offset across the heading (negative is driver side)
    pub interior_lateral_offset: f32,
    /// Distance ahead of the vehicle the interior camera looks at
    pub interior_look_distance: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            start_position: [0.0, 5.0, 15.0],
            start_pitch: -20.0,
            start_yaw: 0.0,
            pitch_limit: 89.0,
            move_speed: 6.0,
            follow_distance: 8.0,
            follow_look_height: 1.0,
            interior_height: 1.3,
            interior_forward_offset: 0.1,
            interior_lateral_offset: -0.2,
            interior_look_distance: 5.0,
        }
    }
}

/// # Simulation Configuration
///
/// Top-level configuration that encompasses all simulation subsystems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed tick length in seconds
    pub timestep: f32,
    /// Vehicle kinematics
    pub vehicle: VehicleTuning,
    /// Collision resolution
    pub collision: CollisionTuning,
    /// Door animation rates
    pub doors: DoorTuning,
    /// Camera behaviour
    pub camera: CameraTuning,
    /// Key to action bindings
    pub controls: KeyBindings,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: 0.016,
            vehicle: VehicleTuning::default(),
            collision: CollisionTuning::default(),
            doors: DoorTuning::default(),
            camera: CameraTuning::default(),
            controls: KeyBindings::default(),
        }
    }
}

impl SimulationConfig {
    /// Set the fixed tick length
    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    /// Replace the vehicle tuning
    pub fn with_vehicle(mut self, vehicle: VehicleTuning) -> Self {
        self.vehicle = vehicle;
        self
    }

    /// Replace the collision tuning
    pub fn with_collision(mut self, collision: CollisionTuning) -> Self {
        self.collision = collision;
        self
    }

    /// Replace the door tuning
    pub fn with_doors(mut self, doors: DoorTuning) -> Self {
        self.doors = doors;
        self
    }

    /// Replace the camera tuning
    pub fn with_camera(mut self, camera: CameraTuning) -> Self {
        self.camera = camera;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
            }
        }

        positive("timestep", self.timestep)?;

        let vehicle = &self.vehicle;
        positive("vehicle.accel_rate", vehicle.accel_rate)?;
        positive("vehicle.max_speed", vehicle.max_speed)?;
        positive("vehicle.steer_rate", vehicle.steer_rate)?;
        positive("vehicle.max_steering_angle", vehicle.max_steering_angle)?;
        positive("vehicle.turn_gain", vehicle.turn_gain)?;
        if vehicle.min_speed >= vehicle.max_speed {
            return Err(ConfigError::Invalid(format!(
                "vehicle.min_speed ({}) must be below vehicle.max_speed ({})",
                vehicle.min_speed, vehicle.max_speed
            )));
        }
        if !(0.0..1.0).contains(&vehicle.decay_factor) {
            return Err(ConfigError::Invalid(format!(
                "vehicle.decay_factor must be in [0, 1), got {}",
                vehicle.decay_factor
            )));
        }
        if vehicle.speed_dead_band < 0.0 || vehicle.steering_dead_band < 0.0 {
            return Err(ConfigError::Invalid("dead-bands cannot be negative".to_string()));
        }
        if vehicle.front_wheel_radius < 0.0 || vehicle.rear_wheel_radius < 0.0 {
            return Err(ConfigError::Invalid("wheel radii cannot be negative".to_string()));
        }

        let collision = &self.collision;
        positive("collision.bumper_offset", collision.bumper_offset)?;
        if collision.bumper_radius < 0.0 {
            return Err(ConfigError::Invalid("collision.bumper_radius cannot be negative".to_string()));
        }
        if !(0.0..=1.0).contains(&collision.gate_passable_threshold) {
            return Err(ConfigError::Invalid(format!(
                "collision.gate_passable_threshold must be in [0, 1], got {}",
                collision.gate_passable_threshold
            )));
        }
        if collision.relaxation_passes == 0 {
            return Err(ConfigError::Invalid("collision.relaxation_passes must be at least 1".to_string()));
        }

        positive("doors.vehicle_door_rate", self.doors.vehicle_door_rate)?;
        positive("doors.garage_door_rate", self.doors.garage_door_rate)?;

        let camera = &self.camera;
        if !(camera.pitch_limit > 0.0 && camera.pitch_limit < 90.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.pitch_limit must be in (0, 90), got {}",
                camera.pitch_limit
            )));
        }
        positive("camera.move_speed", camera.move_speed)?;
        positive("camera.follow_distance", camera.follow_distance)?;
        positive("camera.interior_look_distance", camera.interior_look_distance)?;

        Ok(())
    }
}

impl Config for SimulationConfig {}
