//! Static world layout

use serde::{Serialize, Deserialize};

use super::obstacle::{GroundBox, GroundCylinder, StaticObstacle};

/// Garage footprint center on Z
pub const GARAGE_CENTER_Z: f32 = -12.0;
/// Z of the garage door plane
pub const GARAGE_DOOR_Z: f32 = -8.8;
/// Garage door slab width
pub const GARAGE_DOOR_WIDTH: f32 = 3.5;
/// Garage door slab thickness
pub const GARAGE_DOOR_THICKNESS: f32 = 0.3;
/// Garage door slab height
pub const GARAGE_DOOR_HEIGHT: f32 = 4.0;
/// Height of the garage door's hinge line
pub const GARAGE_DOOR_HINGE_Y: f32 = 4.3;
/// Half extent of the square floor
pub const FLOOR_HALF_EXTENT: f32 = 20.0;
/// Tree trunk radius
pub const TRUNK_RADIUS: f32 = 0.18;

const SIDE_WALL_X: f32 = 3.5;
const WALL_THICKNESS: f32 = 0.4;
const SIDE_WALL_DEPTH: f32 = 6.0;
const BACK_WALL_Z: f32 = -15.0;
const PERIMETER_THICKNESS: f32 = 0.5;

/// Every obstacle the vehicle can hit
///
/// The garage door is kept apart from the rest because it stops blocking
/// once it is open far enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldLayout {
    /// The garage door slab, if the world has one
    pub garage_door: Option<GroundBox>,
    /// Walls and trunks, checked in order
    pub obstacles: Vec<StaticObstacle>,
}

impl WorldLayout {
    /// World with no obstacles at all
    pub fn empty() -> Self {
        Self {
            garage_door: None,
            obstacles: Vec::new(),
        }
    }

    /// Add an obstacle
    pub fn with_obstacle(mut self, obstacle: impl Into<StaticObstacle>) -> Self {
        self.obstacles.push(obstacle.into());
        self
    }

    /// Set the garage door slab
    pub fn with_garage_door(mut self, door: GroundBox) -> Self {
        self.garage_door = Some(door);
        self
    }

    /// The garage, its surroundings and the two trees
    pub fn garage_scene() -> Self {
        let half_wall = WALL_THICKNESS * 0.5;
        let outer_x = SIDE_WALL_X + half_wall;
        // Front segments overlap the slab's ends so its side faces are never exposed
        let front_inner_x = GARAGE_DOOR_WIDTH * 0.5 - WALL_THICKNESS;
        let front_min_z = GARAGE_DOOR_Z - half_wall;
        let front_max_z = GARAGE_DOOR_Z + half_wall;

        let mut world = Self::empty().with_garage_door(GroundBox::centered(
            0.0,
            GARAGE_DOOR_Z,
            GARAGE_DOOR_WIDTH,
            GARAGE_DOOR_THICKNESS,
        ));

        // Garage shell
        for side in [-1.0_f32, 1.0] {
            world = world.with_obstacle(GroundBox::centered(
                side * SIDE_WALL_X,
                GARAGE_CENTER_Z,
                WALL_THICKNESS,
                SIDE_WALL_DEPTH,
            ));
        }
        world = world.with_obstacle(GroundBox::new(
            -outer_x + half_wall,
            outer_x - half_wall,
            BACK_WALL_Z - half_wall,
            BACK_WALL_Z + half_wall,
        ));
        world = world
            .with_obstacle(GroundBox::new(front_inner_x, outer_x, front_min_z, front_max_z))
            .with_obstacle(GroundBox::new(-outer_x, -front_inner_x, front_min_z, front_max_z));

        // Perimeter
        let edge = FLOOR_HALF_EXTENT;
        let half = PERIMETER_THICKNESS * 0.5;
        world = world
            .with_obstacle(GroundBox::new(-edge - half, edge + half, -edge - half, -edge + half))
            .with_obstacle(GroundBox::new(-edge - half, edge + half, edge - half, edge + half))
            .with_obstacle(GroundBox::new(-edge - half, -edge + half, -edge - half, edge + half))
            .with_obstacle(GroundBox::new(edge - half, edge + half, -edge - half, edge + half));

        // Trees
        for x in [-4.0, 4.0] {
            world = world.with_obstacle(GroundCylinder::new(x, -7.0, TRUNK_RADIUS));
        }

        world
    }

    /// Iterator over the box obstacles (excluding the garage door)
    pub fn boxes(&self) -> impl Iterator<Item = (usize, &GroundBox)> {
        self.obstacles.iter().enumerate().filter_map(|(i, o)| match o {
            StaticObstacle::AxisAlignedBox(aabb) => Some((i, aabb)),
            StaticObstacle::Cylinder(_) => None,
        })
    }

    /// Iterator over the cylinder obstacles
    pub fn cylinders(&self) -> impl Iterator<Item = (usize, &GroundCylinder)> {
        self.obstacles.iter().enumerate().filter_map(|(i, o)| match o {
            StaticObstacle::Cylinder(cylinder) => Some((i, cylinder)),
            StaticObstacle::AxisAlignedBox(_) => None,
        })
    }

    /// Index of the first obstacle with unusable geometry, if any
    pub fn first_invalid(&self) -> Option<usize> {
        self.obstacles.iter().position(|o| !o.is_valid())
    }

    /// Whether the garage door slab has usable geometry
    pub fn garage_door_is_valid(&self) -> bool {
        self.garage_door.map_or(true, |door| door.is_valid())
    }
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self::garage_scene()
    }
}
