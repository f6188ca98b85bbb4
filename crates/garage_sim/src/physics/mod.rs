//! Static obstacles, world layout and collision resolution

pub mod obstacle;
pub mod resolver;
pub mod world;

pub use obstacle::{Axis, BoxFace, GroundBox, GroundCylinder, StaticObstacle};
pub use resolver::{BoxContact, CollisionResolver, Resolution};
pub use world::WorldLayout;
