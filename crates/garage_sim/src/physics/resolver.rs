//! Correction of proposed vehicle positions against static obstacles
//!
//! Boxes are tested with a single lead point one bumper offset ahead of the
//! vehicle in its direction of travel. Trunks are tested with discs at both
//! bumpers and pushed out nearest first. Collision is discrete: a step long
//! enough to carry the lead point clean through a thin box is not caught.

use crate::config::CollisionTuning;
use crate::foundation::math::{Vec2, utils};

use super::obstacle::{BoxFace, GroundBox, GroundCylinder};
use super::world::WorldLayout;

/// Below this distance a bumper counts as sitting on the trunk center
const MIN_SEPARATION: f32 = 1e-6;

/// What the lead point ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxContact {
    /// The closed garage door
    GarageDoor,
    /// A wall, by its index in [`WorldLayout::obstacles`]
    Wall(usize),
}

/// Output of [`CollisionResolver::resolve`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Corrected vehicle center
    pub position: Vec2,
    /// Box the lead point was inside, if any
    pub blocked_by: Option<BoxContact>,
    /// Number of trunk push-outs applied
    pub trunk_pushes: u32,
}

impl Resolution {
    /// Whether a box stopped the vehicle
    pub fn is_blocked(&self) -> bool {
        self.blocked_by.is_some()
    }
}

/// Stateless position corrector
#[derive(Debug, Clone)]
pub struct CollisionResolver {
    tuning: CollisionTuning,
}

impl CollisionResolver {
    /// Create a resolver with the given tuning
    pub fn new(tuning: CollisionTuning) -> Self {
        Self { tuning }
    }

    /// The tuning in use
    pub fn tuning(&self) -> &CollisionTuning {
        &self.tuning
    }

    /// Correct `proposed` for a vehicle facing `heading` degrees
    ///
    /// `speed_sign` is `1.0` moving forward and `-1.0` reversing; it picks
    /// which bumper leads. `garage_open` is the garage door's open amount.
    pub fn resolve(
        &self,
        world: &WorldLayout,
        proposed: Vec2,
        heading: f32,
        speed_sign: f32,
        garage_open: f32,
    ) -> Resolution {
        let direction = utils::heading_vector(heading);
        let mut resolution = Resolution {
            position: proposed,
            blocked_by: None,
            trunk_pushes: 0,
        };

        if let Some((contact, position)) = self.resolve_boxes(world, proposed, direction, speed_sign, garage_open) {
            log::debug!(
                "{:?} stopped vehicle: ({:.3}, {:.3}) -> ({:.3}, {:.3})",
                contact, proposed.x, proposed.y, position.x, position.y
            );
            resolution.position = position;
            resolution.blocked_by = Some(contact);
        }

        for (index, trunk) in world.cylinders() {
            let pushes = self.resolve_trunk(trunk, &mut resolution.position, direction);
            if pushes > 0 {
                log::debug!("Trunk {} pushed vehicle out {} time(s)", index, pushes);
                resolution.trunk_pushes += pushes;
            }
        }

        resolution
    }

    fn resolve_boxes(
        &self,
        world: &WorldLayout,
        proposed: Vec2,
        direction: Vec2,
        speed_sign: f32,
        garage_open: f32,
    ) -> Option<(BoxContact, Vec2)> {
        let lead_offset = direction * (self.tuning.bumper_offset * speed_sign);
        let lead = proposed + lead_offset;

        let door = world
            .garage_door
            .filter(|_| garage_open < self.tuning.gate_passable_threshold)
            .map(|door| (BoxContact::GarageDoor, door));
        let walls = world.boxes().map(|(i, aabb)| (BoxContact::Wall(i), *aabb));

        door.into_iter()
            .chain(walls)
            .find(|(_, aabb)| aabb.contains(lead))
            .map(|(contact, aabb)| (contact, Self::place_on_face(&aabb, proposed, lead, lead_offset)))
    }

    /// Move the center so the lead point lies on the box face nearest to it
    fn place_on_face(aabb: &GroundBox, proposed: Vec2, lead: Vec2, lead_offset: Vec2) -> Vec2 {
        let BoxFace { axis, value } = aabb.nearest_face(lead);
        let mut position = proposed;
        axis.set_component(&mut position, value - axis.component(lead_offset));
        position
    }

    /// Push the vehicle off one trunk; returns how many pushes were needed
    fn resolve_trunk(&self, trunk: &GroundCylinder, center: &mut Vec2, direction: Vec2) -> u32 {
        let offset = direction * self.tuning.bumper_offset;
        let radius = self.tuning.bumper_radius;
        let trunk_center = trunk.center();
        let mut pushes = 0;

        for _ in 0..self.tuning.relaxation_passes {
            let bumpers = [*center + offset, *center - offset];
            let nearest = bumpers
                .iter()
                .copied()
                .filter(|b| trunk.penetration_depth(*b, radius) > 0.0)
                .min_by(|a, b| {
                    let da = (a - trunk_center).magnitude_squared();
                    let db = (b - trunk_center).magnitude_squared();
                    da.total_cmp(&db)
                });

            let Some(bumper) = nearest else {
                break;
            };

            let separation = bumper - trunk_center;
            let distance = separation.magnitude();
            let normal = if distance > MIN_SEPARATION {
                separation / distance
            } else {
                // Bumper on the trunk center: push along +X
                Vec2::x()
            };
            *center += normal * trunk.penetration_depth(bumper, radius);
            pushes += 1;
        }

        pushes
    }
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new(CollisionTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn single_box() -> WorldLayout {
        WorldLayout::empty().with_obstacle(GroundBox::new(-2.0, 2.0, -11.0, -10.0))
    }

    #[test]
    fn test_clear_path_is_untouched() {
        let resolver = CollisionResolver::default();
        let proposed = Vec2::new(0.0, 0.0);
        let resolution = resolver.resolve(&single_box(), proposed, 180.0, 1.0, 0.0);
        assert_eq!(resolution.position, proposed);
        assert!(!resolution.is_blocked());
        assert_eq!(resolution.trunk_pushes, 0);
    }

    #[test]
    fn test_lead_point_lands_on_near_face() {
        let resolver = CollisionResolver::default();
        // Heading 180 faces -Z, lead point at z = -10.1.
        let resolution = resolver.resolve(&single_box(), Vec2::new(0.5, -8.6), 180.0, 1.0, 0.0);
        assert_eq!(resolution.blocked_by, Some(BoxContact::Wall(0)));
        assert_relative_eq!(resolution.position.x, 0.5);
        assert_relative_eq!(resolution.position.y, -8.5, epsilon = 1e-5);
    }

    #[test]
    fn test_reversing_leads_with_rear_bumper() {
        let resolver = CollisionResolver::default();
        // Facing +Z but reversing toward the box.
        let resolution = resolver.resolve(&single_box(), Vec2::new(0.0, -8.6), 0.0, -1.0, 0.0);
        assert!(resolution.is_blocked());
        assert_relative_eq!(resolution.position.y, -8.5, epsilon = 1e-5);

        // The same pose moving forward leads away from the box.
        let forward = resolver.resolve(&single_box(), Vec2::new(0.0, -8.6), 0.0, 1.0, 0.0);
        assert!(!forward.is_blocked());
    }

    #[test]
    fn test_garage_door_ignored_once_open() {
        let resolver = CollisionResolver::default();
        let world = WorldLayout::empty().with_garage_door(GroundBox::centered(0.0, -8.8, 3.5, 0.3));
        let proposed = Vec2::new(0.0, -7.2);

        let closed = resolver.resolve(&world, proposed, 180.0, 1.0, 0.5);
        assert_eq!(closed.blocked_by, Some(BoxContact::GarageDoor));
        assert_relative_eq!(closed.position.y, -7.15, epsilon = 1e-5);

        let open = resolver.resolve(&world, proposed, 180.0, 1.0, 0.95);
        assert!(!open.is_blocked());
        assert_eq!(open.position, proposed);
    }

    #[test]
    fn test_trunk_push_out_clears_both_bumpers() {
        let resolver = CollisionResolver::default();
        let trunk = GroundCylinder::new(4.0, -7.0, 0.18);
        let world = WorldLayout::empty().with_obstacle(trunk);

        // Heading 90 faces +X; the front bumper sits 0.3 short of the trunk.
        let resolution = resolver.resolve(&world, Vec2::new(2.2, -7.0), 90.0, 1.0, 0.0);
        assert!(resolution.trunk_pushes > 0);
        assert!(!resolution.is_blocked());

        let offset = Vec2::new(1.5, 0.0);
        for bumper in [resolution.position + offset, resolution.position - offset] {
            assert!((bumper - trunk.center()).magnitude() >= 0.78 - 1e-4);
        }
        assert_relative_eq!(resolution.position.x, 4.0 - 0.78 - 1.5, epsilon = 1e-4);
    }

    #[test]
    fn test_trunk_push_is_radial() {
        let resolver = CollisionResolver::default();
        let trunk = GroundCylinder::new(0.0, 0.0, 0.18);
        let world = WorldLayout::empty().with_obstacle(trunk);

        // Front bumper at (0.3, 0.4), distance 0.5 from the trunk.
        let resolution = resolver.resolve(&world, Vec2::new(0.3, -1.1), 0.0, 1.0, 0.0);
        let bumper = resolution.position + Vec2::new(0.0, 1.5);
        assert_relative_eq!(bumper.magnitude(), 0.78, epsilon = 1e-4);
        assert_relative_eq!(bumper.x / bumper.y, 0.75, epsilon = 1e-4);
    }

    #[test]
    fn test_bumper_on_trunk_center_uses_fallback_direction() {
        let resolver = CollisionResolver::default();
        let world = WorldLayout::empty().with_obstacle(GroundCylinder::new(0.0, 1.5, 0.18));
        let resolution = resolver.resolve(&world, Vec2::new(0.0, 0.0), 0.0, 1.0, 0.0);
        assert_relative_eq!(resolution.position.x, 0.78, epsilon = 1e-5);
        assert_relative_eq!(resolution.position.y, 0.0, epsilon = 1e-5);
    }
}
