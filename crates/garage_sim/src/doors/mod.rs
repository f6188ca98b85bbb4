//! Door animation for the vehicle doors and the garage door
//!
//! Toggle intents only flip targets. The open amounts themselves move in
//! [`AnimatedDoors::update`], which runs once per tick after the vehicle's
//! position has been committed.

use serde::{Serialize, Deserialize};

use crate::animation::Animated;
use crate::config::DoorTuning;
use crate::vehicle::VehicleState;

/// Which door a toggle applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorId {
    /// Driver-side vehicle door
    VehicleLeft,
    /// Passenger-side vehicle door
    VehicleRight,
    /// The garage door
    Garage,
}

/// Open amount of the garage door
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GarageDoorState {
    /// Open amount and target
    pub door: Animated,
}

impl GarageDoorState {
    /// Door resting at `open`
    pub fn at(open: f32) -> Self {
        Self { door: Animated::at(open) }
    }

    /// Current open amount in `[0, 1]`
    pub fn open(&self) -> f32 {
        self.door.value
    }

    /// Target open amount, 0 or 1
    pub fn target(&self) -> f32 {
        self.door.target
    }

    /// Whether the door is open at least `threshold`
    pub fn is_open_past(&self, threshold: f32) -> bool {
        self.door.value >= threshold
    }
}

/// Advances every door toward its target
#[derive(Debug, Clone)]
pub struct AnimatedDoors {
    tuning: DoorTuning,
}

impl AnimatedDoors {
    /// Create the door animator
    pub fn new(tuning: DoorTuning) -> Self {
        Self { tuning }
    }

    /// Flip the target of one door
    pub fn toggle(&self, door: DoorId, vehicle: &mut VehicleState, garage: &mut GarageDoorState) {
        let animated = match door {
            DoorId::VehicleLeft => &mut vehicle.left_door,
            DoorId::VehicleRight => &mut vehicle.right_door,
            DoorId::Garage => &mut garage.door,
        };
        animated.toggle();
        log::info!(
            "{:?} door {}",
            door,
            if animated.target > 0.5 { "opening" } else { "closing" }
        );
    }

    /// Step every door for one tick
    pub fn update(&self, vehicle: &mut VehicleState, garage: &mut GarageDoorState, dt: f32) {
        vehicle.left_door.update(self.tuning.vehicle_door_rate, dt);
        vehicle.right_door.update(self.tuning.vehicle_door_rate, dt);
        garage.door.update(self.tuning.garage_door_rate, dt);
    }
}

impl Default for AnimatedDoors {
    fn default() -> Self {
        Self::new(DoorTuning::default())
    }
}
