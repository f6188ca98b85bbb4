//! Constant-speed approach-to-target interpolation
//!
//! Every animated scalar in the scene (vehicle doors, the garage door) moves
//! toward its target through [`advance`]. The primitive has no knowledge of
//! what it animates; callers pick the rate.

/// Distance below which a value snaps onto its target
pub const SNAP_EPSILON: f32 = 1e-3;

/// Move `current` toward `target` at `rate` units per second for `dt` seconds
///
/// Snaps to `target` once within [`SNAP_EPSILON`] or when the step would
/// overshoot, so repeated calls reach the target exactly in a finite number
/// of steps.
pub fn advance(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let delta = target - current;
    if delta.abs() < SNAP_EPSILON {
        return target;
    }

    let step = rate * dt;
    if delta.abs() <= step {
        return target;
    }

    current + step.copysign(delta)
}

/// A scalar paired with the value it is animating toward
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Animated {
    /// Current value
    pub value: f32,
    /// Value being approached
    pub target: f32,
}

impl Animated {
    /// Start at rest on `value`, clamped to `[0, 1]`
    pub fn at(value: f32) -> Self {
        let value = value.clamp(0.0, 1.0);
        Self { value, target: value }
    }

    /// The same pair with value and target clamped to `[0, 1]`
    pub fn clamped(self) -> Self {
        Self {
            value: self.value.clamp(0.0, 1.0),
            target: self.target.clamp(0.0, 1.0),
        }
    }

    /// Step toward the target
    pub fn update(&mut self, rate: f32, dt: f32) {
        self.value = advance(self.value, self.target, rate, dt);
    }

    /// Flip a binary target between 0 and 1
    pub fn toggle(&mut self) {
        self.target = 1.0 - self.target;
    }

    /// Whether the value has reached its target
    pub fn is_settled(&self) -> bool {
        self.value == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idempotent_at_target() {
        assert_eq!(advance(1.0, 1.0, 2.5, 0.016), 1.0);
        assert_eq!(advance(0.0, 0.0, 1.5, 0.016), 0.0);
    }

    #[test]
    fn test_snaps_within_epsilon() {
        assert_eq!(advance(0.9995, 1.0, 0.001, 0.016), 1.0);
    }

    #[test]
    fn test_constant_step_without_overshoot() {
        let next = advance(0.0, 1.0, 2.5, 0.016);
        assert!((next - 0.04).abs() < 1e-6);

        let down = advance(1.0, 0.0, 2.5, 0.016);
        assert!((down - 0.96).abs() < 1e-6);

        assert_eq!(advance(0.98, 1.0, 2.5, 0.016), 1.0);
    }

    #[test]
    fn test_converges_in_finite_steps() {
        let cases: [(f32, f32, f32, f32); 4] = [
            (0.0, 1.0, 2.5, 0.016),
            (1.0, 0.0, 1.5, 0.016),
            (-3.0, 7.0, 0.7, 0.05),
            (5.0, -5.0, 100.0, 0.5),
        ];

        for (start, target, rate, dt) in cases {
            let mut value = start;
            let bound = ((target - start) / (rate * dt)).abs().ceil() as usize + 1;
            let mut steps = 0;
            while value != target {
                let next = advance(value, target, rate, dt);
                // Never moves past the target.
                assert!((target - next).abs() <= (target - value).abs());
                assert!((next - start).abs() <= (target - start).abs() + 1e-5);
                value = next;
                steps += 1;
                assert!(steps <= bound, "did not converge from {start} to {target}");
            }
        }
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut door = Animated::at(0.0);
        door.toggle();
        assert_eq!(door.target, 1.0);
        door.toggle();
        assert_eq!(door.target, 0.0);
    }

    #[test]
    fn test_open_amounts_stay_in_unit_range() {
        assert_eq!(Animated::at(3.0), Animated { value: 1.0, target: 1.0 });
        assert_eq!(Animated::at(-0.5), Animated { value: 0.0, target: 0.0 });
        assert_eq!(Animated::at(0.4).value, 0.4);

        let wild = Animated { value: 2.0, target: -1.0 }.clamped();
        assert_eq!(wild, Animated { value: 1.0, target: 0.0 });
    }

    #[test]
    fn test_animated_settles() {
        let mut door = Animated::at(0.0);
        door.toggle();
        for _ in 0..100 {
            door.update(2.5, 0.016);
        }
        assert!(door.is_settled());
        assert_eq!(door.value, 1.0);
    }
}
