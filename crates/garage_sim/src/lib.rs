//! # Garage Sim
//!
//! Fixed-timestep simulation core for a small garage scene: a drivable
//! vehicle with animated doors, a hinged garage door, static walls and
//! trees, and a camera with free-fly, chase and interior modes.
//!
//! ## Features
//!
//! - **Vehicle kinematics**: bounded speed and steering, heading from
//!   steering times speed, cosmetic wheel spin
//! - **Collision resolution**: lead-point box clamping and radial trunk
//!   push-out on the ground plane
//! - **Door animation**: constant-rate approach to toggled targets
//! - **Camera model**: free-fly, follow and interior views
//! - **Configuration**: every constant tunable from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use garage_sim::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     let mut sim = Simulation::new(SimulationConfig::default())?;
//!     let drive = IntentSet::from_controls(Intents::ACCELERATE);
//!     for _ in 0..60 {
//!         sim.step(&drive);
//!     }
//!     let view = sim.current_view();
//!     println!("eye at {:?}, vehicle at {:?}", view.eye, sim.vehicle().position());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod input;
pub mod animation;
pub mod vehicle;
pub mod physics;
pub mod doors;
pub mod camera;
pub mod scene;

mod simulation;

pub use simulation::{Simulation, SimulationError, Snapshot};

/// Common imports for simulation users
pub mod prelude {
    pub use crate::{
        Simulation, SimulationError, Snapshot,
        config::{Config, ConfigError, SimulationConfig},
        input::{InputState, IntentSet, Intents, KeyBindings, KeyCode},
        vehicle::VehicleState,
        doors::GarageDoorState,
        camera::{CameraMode, CameraState, ViewDescriptor},
        physics::{StaticObstacle, WorldLayout},
        scene::ScenePoses,
        foundation::{
            math::{Vec2, Vec3, Mat4, Transform},
            time::{FixedTimestep, Stopwatch, Timer},
        },
    };
}
