//! Vehicle state and kinematics

mod kinematics;
mod state;

pub use kinematics::VehicleKinematics;
pub use state::VehicleState;
