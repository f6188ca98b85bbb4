//! Per-tick kinematic integration of the vehicle
//!
//! The integrator never commits a new position on its own. It proposes one
//! from the current heading and speed, the caller runs collision resolution
//! on the proposal, and the corrected position comes back through
//! [`VehicleKinematics::commit`].

use crate::config::VehicleTuning;
use crate::foundation::math::{Vec2, constants, utils};
use crate::input::Intents;

use super::VehicleState;

/// Wheel circumferences at or below this are treated as no wheel at all
const MIN_WHEEL_CIRCUMFERENCE: f32 = 1e-6;

/// Kinematic integrator for the vehicle
#[derive(Debug, Clone)]
pub struct VehicleKinematics {
    tuning: VehicleTuning,
}

impl VehicleKinematics {
    /// Create an integrator with the given tuning
    pub fn new(tuning: VehicleTuning) -> Self {
        Self { tuning }
    }

    /// The tuning in use
    pub fn tuning(&self) -> &VehicleTuning {
        &self.tuning
    }

    /// Whether `speed` is fast enough to move and turn the vehicle
    pub fn is_moving(&self, speed: f32) -> bool {
        speed.abs() > self.tuning.speed_dead_band
    }

    /// Apply speed, steering and heading updates for one tick
    ///
    /// Returns the proposed ground-plane position, or `None` when the vehicle
    /// is stationary and there is nothing to resolve.
    pub fn integrate(&self, state: &mut VehicleState, controls: Intents, dt: f32) -> Option<Vec2> {
        debug_assert!(dt > 0.0, "tick dt must be positive, got {dt}");

        self.update_speed(state, controls, dt);
        self.update_steering(state, controls, dt);
        self.update_heading(state, dt);
        self.propose_position(state, dt)
    }

    /// Accelerate, brake or coast
    pub fn update_speed(&self, state: &mut VehicleState, controls: Intents, dt: f32) {
        let tuning = &self.tuning;
        if controls.contains(Intents::ACCELERATE) {
            state.speed = (state.speed + tuning.accel_rate * dt).min(tuning.max_speed);
        } else if controls.contains(Intents::BRAKE) {
            state.speed = (state.speed - tuning.accel_rate * dt).max(tuning.min_speed);
        } else {
            state.speed *= tuning.decay_factor;
            if state.speed.abs() < tuning.speed_dead_band {
                state.speed = 0.0;
            }
        }
    }

    /// Turn the wheel or let it return to center
    pub fn update_steering(&self, state: &mut VehicleState, controls: Intents, dt: f32) {
        let tuning = &self.tuning;
        let lock = tuning.max_steering_angle;
        if controls.contains(Intents::STEER_LEFT) {
            state.steering_angle = (state.steering_angle + tuning.steer_rate * dt).min(lock);
        } else if controls.contains(Intents::STEER_RIGHT) {
            state.steering_angle = (state.steering_angle - tuning.steer_rate * dt).max(-lock);
        } else {
            state.steering_angle *= tuning.decay_factor;
            if state.steering_angle.abs() < tuning.steering_dead_band {
                state.steering_angle = 0.0;
            }
        }
    }

    /// Turn the vehicle in proportion to steering and speed
    ///
    /// A stationary vehicle does not turn.
    pub fn update_heading(&self, state: &mut VehicleState, dt: f32) {
        if !self.is_moving(state.speed) {
            return;
        }
        let turn = state.steering_angle / self.tuning.max_steering_angle;
        let heading = state.heading + turn * state.speed * self.tuning.turn_gain * dt;
        state.heading = utils::wrap_degrees(heading);
    }

    /// Position the vehicle would reach this tick with nothing in the way
    pub fn propose_position(&self, state: &VehicleState, dt: f32) -> Option<Vec2> {
        if !self.is_moving(state.speed) {
            return None;
        }
        Some(state.position() + state.forward() * (state.speed * dt))
    }

    /// Commit a resolved position and derive wheel spin from the move
    ///
    /// `blocked` stops the vehicle dead, as when the front bumper meets a
    /// wall.
    pub fn commit(&self, state: &mut VehicleState, resolved: Vec2, blocked: bool, dt: f32) {
        state.x = resolved.x;
        state.z = resolved.y;
        if blocked {
            state.speed = 0.0;
        }
        self.update_wheel_spin(state, dt);
    }

    /// Spin the wheels by the distance travelled this tick
    pub fn update_wheel_spin(&self, state: &mut VehicleState, dt: f32) {
        let circumference = constants::TAU * self.tuning.front_wheel_radius;
        if circumference <= MIN_WHEEL_CIRCUMFERENCE {
            return;
        }
        let distance = state.speed * dt;
        let rotation = state.wheel_rotation + distance / circumference * 360.0;
        state.wheel_rotation = utils::wrap_degrees(rotation);
    }
}

impl Default for VehicleKinematics {
    fn default() -> Self {
        Self::new(VehicleTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 0.016;

    fn tick(kinematics: &VehicleKinematics, state: &mut VehicleState, controls: Intents) {
        if let Some(proposed) = kinematics.integrate(state, controls, DT) {
            kinematics.commit(state, proposed, false, DT);
        }
    }

    #[test]
    fn test_acceleration_clamps_to_max_speed() {
        let kinematics = VehicleKinematics::default();
        let mut state = VehicleState::default();
        for _ in 0..1000 {
            tick(&kinematics, &mut state, Intents::ACCELERATE);
        }
        assert_eq!(state.speed, 8.0);
    }

    #[test]
    fn test_brake_reverses_to_min_speed() {
        let kinematics = VehicleKinematics::default();
        let mut state = VehicleState::default();
        for _ in 0..1000 {
            tick(&kinematics, &mut state, Intents::BRAKE);
        }
        assert_eq!(state.speed, -4.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "dt must be positive")]
    fn test_zero_dt_asserts() {
        let kinematics = VehicleKinematics::default();
        kinematics.integrate(&mut VehicleState::default(), Intents::ACCELERATE, 0.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "dt must be positive")]
    fn test_negative_dt_asserts() {
        let kinematics = VehicleKinematics::default();
        kinematics.integrate(&mut VehicleState::default(), Intents::ACCELERATE, -0.016);
    }

    #[test]
    fn test_coasting_decays_to_exact_zero() {
        let kinematics = VehicleKinematics::default();
        let mut state = VehicleState { speed: 8.0, ..VehicleState::default() };
        for _ in 0..100 {
            tick(&kinematics, &mut state, Intents::empty());
        }
        assert_eq!(state.speed, 0.0);
    }

    #[test]
    fn test_single_decay_step() {
        let kinematics = VehicleKinematics::default();
        let mut state = VehicleState { speed: 5.0, steering_angle: 20.0, ..VehicleState::default() };
        kinematics.update_speed(&mut state, Intents::empty(), DT);
        kinematics.update_steering(&mut state, Intents::empty(), DT);
        assert_relative_eq!(state.speed, 4.5, epsilon = 1e-6);
        assert_relative_eq!(state.steering_angle, 18.0, epsilon = 1e-5);
    }

    #[test]
    fn test_steering_clamps_and_recenters() {
        let kinematics = VehicleKinematics::default();
        let mut state = VehicleState::default();
        for _ in 0..100 {
            kinematics.update_steering(&mut state, Intents::STEER_RIGHT, DT);
        }
        assert_eq!(state.steering_angle, -30.0);

        for _ in 0..100 {
            kinematics.update_steering(&mut state, Intents::empty(), DT);
        }
        assert_eq!(state.steering_angle, 0.0);
    }

    #[test]
    fn test_no_turning_while_stationary() {
        let kinematics = VehicleKinematics::default();
        let mut state = VehicleState { steering_angle: 30.0, heading: 45.0, ..VehicleState::default() };
        kinematics.update_heading(&mut state, DT);
        assert_eq!(state.heading, 45.0);
        assert!(kinematics.propose_position(&state, DT).is_none());
    }

    #[test]
    fn test_heading_rate_scales_with_speed_and_steering() {
        let kinematics = VehicleKinematics::default();
        let mut state = VehicleState { speed: 4.0, steering_angle: 15.0, ..VehicleState::default() };
        kinematics.update_heading(&mut state, 0.1);
        // 0.5 * 4 * 18 * 0.1
        assert_relative_eq!(state.heading, 3.6, epsilon = 1e-5);
    }

    #[test]
    fn test_heading_wraps_below_zero() {
        let kinematics = VehicleKinematics::default();
        let mut state = VehicleState { speed: 8.0, steering_angle: -30.0, heading: 1.0, ..VehicleState::default() };
        kinematics.update_heading(&mut state, DT);
        assert!(state.heading > 350.0 && state.heading < 360.0);
    }

    #[test]
    fn test_proposal_follows_heading() {
        let kinematics = VehicleKinematics::default();
        let state = VehicleState { speed: 5.0, heading: 90.0, ..VehicleState::default() };
        let proposed = kinematics.propose_position(&state, 0.1).unwrap();
        assert_relative_eq!(proposed.x, 0.5, epsilon = 1e-5);
        assert_relative_eq!(proposed.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_blocked_commit_stops_vehicle() {
        let kinematics = VehicleKinematics::default();
        let mut state = VehicleState { speed: 6.0, ..VehicleState::default() };
        kinematics.commit(&mut state, Vec2::new(1.0, 2.0), true, DT);
        assert_eq!(state.position(), Vec2::new(1.0, 2.0));
        assert_eq!(state.speed, 0.0);
        assert_eq!(state.wheel_rotation, 0.0);
    }

    #[test]
    fn test_wheel_spin_matches_distance() {
        let kinematics = VehicleKinematics::default();
        let circumference = constants::TAU * 0.22;
        // Travel exactly a quarter turn.
        let mut state = VehicleState { speed: circumference / 4.0, ..VehicleState::default() };
        kinematics.update_wheel_spin(&mut state, 1.0);
        assert_relative_eq!(state.wheel_rotation, 90.0, epsilon = 1e-3);

        // Reversing winds back through zero.
        state.speed = -circumference / 2.0;
        kinematics.update_wheel_spin(&mut state, 1.0);
        assert_relative_eq!(state.wheel_rotation, 270.0, epsilon = 1e-3);
    }

    #[test]
    fn test_zero_wheel_radius_skips_spin() {
        let tuning = VehicleTuning { front_wheel_radius: 0.0, ..VehicleTuning::default() };
        let kinematics = VehicleKinematics::new(tuning);
        let mut state = VehicleState { speed: 8.0, wheel_rotation: 12.0, ..VehicleState::default() };
        kinematics.update_wheel_spin(&mut state, DT);
        assert_eq!(state.wheel_rotation, 12.0);
    }

    #[test]
    fn test_bounds_hold_for_mixed_intents() {
        let kinematics = VehicleKinematics::default();
        let mut state = VehicleState::default();
        let pattern = [
            Intents::ACCELERATE | Intents::STEER_LEFT,
            Intents::ACCELERATE,
            Intents::BRAKE | Intents::STEER_RIGHT,
            Intents::empty(),
            Intents::BRAKE,
            Intents::STEER_LEFT,
        ];
        for i in 0..5000 {
            let controls = pattern[(i / 37) % pattern.len()];
            tick(&kinematics, &mut state, controls);
            assert!((-4.0..=8.0).contains(&state.speed));
            assert!((-30.0..=30.0).contains(&state.steering_angle));
            assert!((0.0..360.0).contains(&state.heading));
            assert!((0.0..360.0).contains(&state.wheel_rotation));
        }
    }
}
