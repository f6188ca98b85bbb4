//! The simulation context
//!
//! [`Simulation`] owns every piece of mutable state and runs the fixed tick:
//! toggles, camera, vehicle kinematics, collision resolution, commit, then
//! door animation. Renderers read snapshots between ticks.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::camera::{CameraModel, CameraState, ViewDescriptor};
use crate::config::{ConfigError, SimulationConfig};
use crate::doors::{AnimatedDoors, DoorId, GarageDoorState};
use crate::input::{IntentSet, Intents};
use crate::physics::{CollisionResolver, WorldLayout};
use crate::scene::ScenePoses;
use crate::vehicle::{VehicleKinematics, VehicleState};

/// Errors raised while building a [`Simulation`]
#[derive(Error, Debug)]
pub enum SimulationError {
    /// The configuration failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The world layout cannot be simulated
    #[error("Invalid world layout: {0}")]
    InvalidWorld(String),
}

/// Everything a renderer or logger reads after a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Ticks run so far
    pub ticks: u64,
    /// Vehicle state
    pub vehicle: VehicleState,
    /// Garage door state
    pub garage_door: GarageDoorState,
    /// Camera state
    pub camera: CameraState,
    /// Current view
    pub view: ViewDescriptor,
}

/// Owned simulation state and the components that advance it
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    world: WorldLayout,
    kinematics: VehicleKinematics,
    resolver: CollisionResolver,
    doors: AnimatedDoors,
    camera_model: CameraModel,
    vehicle: VehicleState,
    garage_door: GarageDoorState,
    camera: CameraState,
    ticks: u64,
}

impl Simulation {
    /// Simulation of the garage scene
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        Self::with_world(config, WorldLayout::garage_scene())
    }

    /// Simulation of an arbitrary world
    pub fn with_world(config: SimulationConfig, world: WorldLayout) -> Result<Self, SimulationError> {
        config.validate()?;

        if world.obstacles.is_empty() && world.garage_door.is_none() {
            return Err(SimulationError::InvalidWorld("world has no obstacles".to_string()));
        }
        if let Some(index) = world.first_invalid() {
            return Err(SimulationError::InvalidWorld(format!(
                "obstacle {} has degenerate geometry: {:?}",
                index, world.obstacles[index]
            )));
        }
        if !world.garage_door_is_valid() {
            return Err(SimulationError::InvalidWorld("garage door has degenerate geometry".to_string()));
        }

        let camera_model = CameraModel::new(config.camera.clone());
        let camera = camera_model.initial_state();

        log::info!(
            "Simulation created: {} obstacles, garage door {}, timestep {:.3}s",
            world.obstacles.len(),
            if world.garage_door.is_some() { "present" } else { "absent" },
            config.timestep
        );

        Ok(Self {
            kinematics: VehicleKinematics::new(config.vehicle.clone()),
            resolver: CollisionResolver::new(config.collision.clone()),
            doors: AnimatedDoors::new(config.doors.clone()),
            camera_model,
            vehicle: VehicleState::default(),
            garage_door: GarageDoorState::default(),
            camera,
            ticks: 0,
            world,
            config,
        })
    }

    /// Replace the vehicle state, for starting somewhere other than the origin
    ///
    /// Door open amounts are clamped to `[0, 1]`.
    pub fn with_vehicle(mut self, vehicle: VehicleState) -> Self {
        self.vehicle = VehicleState {
            left_door: vehicle.left_door.clamped(),
            right_door: vehicle.right_door.clamped(),
            ..vehicle
        };
        self
    }

    /// Replace the garage door state, clamping the open amount to `[0, 1]`
    pub fn with_garage_door(mut self, garage_door: GarageDoorState) -> Self {
        self.garage_door = GarageDoorState { door: garage_door.door.clamped() };
        self
    }

    /// Advance one tick of `dt` seconds
    pub fn tick(&mut self, dt: f32, intents: &IntentSet) {
        debug_assert!(dt > 0.0, "tick dt must be positive, got {dt}");

        self.apply_door_toggles(intents.controls);
        self.camera_model.update(&mut self.camera, intents, dt);

        if let Some(proposed) = self.kinematics.integrate(&mut self.vehicle, intents.controls, dt) {
            let resolution = self.resolver.resolve(
                &self.world,
                proposed,
                self.vehicle.heading,
                self.vehicle.speed.signum(),
                self.garage_door.open(),
            );
            self.kinematics.commit(&mut self.vehicle, resolution.position, resolution.is_blocked(), dt);
        }

        self.doors.update(&mut self.vehicle, &mut self.garage_door, dt);
        self.ticks += 1;

        log::trace!(
            "tick {}: pos=({:.3}, {:.3}) heading={:.2} speed={:.3} steer={:.2}",
            self.ticks,
            self.vehicle.x,
            self.vehicle.z,
            self.vehicle.heading,
            self.vehicle.speed,
            self.vehicle.steering_angle
        );
    }

    /// Advance one tick at the configured timestep
    pub fn step(&mut self, intents: &IntentSet) {
        self.tick(self.config.timestep, intents);
    }

    fn apply_door_toggles(&mut self, controls: Intents) {
        let toggles = [
            (Intents::TOGGLE_LEFT_DOOR, DoorId::VehicleLeft),
            (Intents::TOGGLE_RIGHT_DOOR, DoorId::VehicleRight),
            (Intents::TOGGLE_GATE, DoorId::Garage),
        ];
        for (flag, door) in toggles {
            if controls.contains(flag) {
                self.doors.toggle(door, &mut self.vehicle, &mut self.garage_door);
            }
        }
    }

    /// View for the active camera mode
    pub fn current_view(&self) -> ViewDescriptor {
        self.camera_model.view(&self.camera, &self.vehicle)
    }

    /// Vehicle snapshot
    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    /// Garage door snapshot
    pub fn garage_door(&self) -> &GarageDoorState {
        &self.garage_door
    }

    /// Camera snapshot
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// The static world
    pub fn world(&self) -> &WorldLayout {
        &self.world
    }

    /// The configuration in use
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Poses of every articulated part
    pub fn scene_poses(&self) -> ScenePoses {
        ScenePoses::derive(&self.vehicle, &self.garage_door, &self.config.vehicle)
    }

    /// All snapshots at once
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ticks: self.ticks,
            vehicle: self.vehicle,
            garage_door: self.garage_door,
            camera: self.camera,
            view: self.current_view(),
        }
    }
}
