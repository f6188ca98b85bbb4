//! Static ground-plane obstacles
//!
//! All obstacles are footprints on the XZ plane; height plays no part in
//! collision. Points are [`Vec2`] with `x` as world X and `y` as world Z.

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec2;

/// Ground-plane axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// World X
    X,
    /// World Z
    Z,
}

impl Axis {
    /// Component of `v` along this axis
    pub fn component(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Z => v.y,
        }
    }

    /// Overwrite the component of `v` along this axis
    pub fn set_component(self, v: &mut Vec2, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Z => v.y = value,
        }
    }
}

/// One face of a [`GroundBox`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxFace {
    /// Axis the face is perpendicular to
    pub axis: Axis,
    /// Coordinate of the face along `axis`
    pub value: f32,
}

/// Axis-aligned rectangle on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundBox {
    /// Minimum X
    pub min_x: f32,
    /// Maximum X
    pub max_x: f32,
    /// Minimum Z
    pub min_z: f32,
    /// Maximum Z
    pub max_z: f32,
}

impl GroundBox {
    /// Box from its extents
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self { min_x, max_x, min_z, max_z }
    }

    /// Box centered on `(x, z)` with full `width` along X and `depth` along Z
    pub fn centered(x: f32, z: f32, width: f32, depth: f32) -> Self {
        let (hw, hd) = (width * 0.5, depth * 0.5);
        Self::new(x - hw, x + hw, z - hd, z + hd)
    }

    /// Whether the extents are finite and non-empty
    pub fn is_valid(&self) -> bool {
        [self.min_x, self.max_x, self.min_z, self.max_z]
            .iter()
            .all(|v| v.is_finite())
            && self.min_x < self.max_x
            && self.min_z < self.max_z
    }

    /// Strict containment; points on a face are outside
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.min_x && point.x < self.max_x && point.y > self.min_z && point.y < self.max_z
    }

    /// Face closest to a point inside the box
    ///
    /// Ties go to the X faces, then the minimum side.
    pub fn nearest_face(&self, point: Vec2) -> BoxFace {
        let candidates = [
            (point.x - self.min_x, BoxFace { axis: Axis::X, value: self.min_x }),
            (self.max_x - point.x, BoxFace { axis: Axis::X, value: self.max_x }),
            (point.y - self.min_z, BoxFace { axis: Axis::Z, value: self.min_z }),
            (self.max_z - point.y, BoxFace { axis: Axis::Z, value: self.max_z }),
        ];

        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.0 < best.0 {
                best = *candidate;
            }
        }
        best.1
    }

    /// Center of the footprint
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.min_x + self.max_x) * 0.5, (self.min_z + self.max_z) * 0.5)
    }
}

/// Vertical cylinder on the ground plane, such as a tree trunk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundCylinder {
    /// Center X
    pub center_x: f32,
    /// Center Z
    pub center_z: f32,
    /// Footprint radius
    pub radius: f32,
}

impl GroundCylinder {
    /// Cylinder at `(x, z)`
    pub fn new(center_x: f32, center_z: f32, radius: f32) -> Self {
        Self { center_x, center_z, radius }
    }

    /// Center on the ground plane
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x, self.center_z)
    }

    /// Whether the center is finite and the radius non-negative
    pub fn is_valid(&self) -> bool {
        self.center_x.is_finite() && self.center_z.is_finite() && self.radius.is_finite() && self.radius >= 0.0
    }

    /// Overlap between this cylinder and a disc of `radius` at `point`
    ///
    /// Returns zero when they do not overlap.
    pub fn penetration_depth(&self, point: Vec2, radius: f32) -> f32 {
        let min_distance = self.radius + radius;
        let distance = (point - self.center()).magnitude();
        if distance < min_distance {
            min_distance - distance
        } else {
            0.0
        }
    }
}

/// Immutable piece of world geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StaticObstacle {
    /// Walls and slabs
    AxisAlignedBox(GroundBox),
    /// Trunks and posts
    Cylinder(GroundCylinder),
}

impl StaticObstacle {
    /// Whether the obstacle's geometry is usable
    pub fn is_valid(&self) -> bool {
        match self {
            StaticObstacle::AxisAlignedBox(aabb) => aabb.is_valid(),
            StaticObstacle::Cylinder(cylinder) => cylinder.is_valid(),
        }
    }
}

impl From<GroundBox> for StaticObstacle {
    fn from(aabb: GroundBox) -> Self {
        StaticObstacle::AxisAlignedBox(aabb)
    }
}

impl From<GroundCylinder> for StaticObstacle {
    fn from(cylinder: GroundCylinder) -> Self {
        StaticObstacle::Cylinder(cylinder)
    }
}
