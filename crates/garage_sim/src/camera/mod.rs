//! Camera modes and view derivation
//!
//! The camera owns a free-fly pose that persists across mode changes. The
//! follow and interior modes derive their eye from the vehicle each time a
//! view is requested, so switching back to free-fly returns to wherever the
//! free camera was left.

use serde::{Serialize, Deserialize};

use crate::config::CameraTuning;
use crate::foundation::math::{Mat4, Mat4Ext, Vec2, Vec3, utils};
use crate::input::{IntentSet, Intents};
use crate::vehicle::VehicleState;

/// How the view is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    /// User-controlled position and orientation
    #[default]
    FreeFly,
    /// Chase camera behind the vehicle
    FollowVehicle,
    /// Driver's seat
    InteriorView,
}

/// Free-fly pose and active mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Free-fly eye position; its height also sets the follow camera height
    pub position: Vec3,
    /// Degrees, positive looks up
    pub pitch: f32,
    /// Degrees in `[0, 360)`, 0 looks down -Z and 90 down +X
    pub yaw: f32,
    /// Active mode
    pub mode: CameraMode,
}

impl CameraState {
    /// Unit look direction from pitch and yaw
    pub fn forward(&self) -> Vec3 {
        let (pitch, yaw) = (utils::deg_to_rad(self.pitch), utils::deg_to_rad(self.yaw));
        Vec3::new(pitch.cos() * yaw.sin(), pitch.sin(), -pitch.cos() * yaw.cos())
    }

    /// Forward direction flattened onto the ground plane
    pub fn horizontal_forward(&self) -> Vec3 {
        let yaw = utils::deg_to_rad(self.yaw);
        Vec3::new(yaw.sin(), 0.0, -yaw.cos())
    }

    /// Strafe direction on the ground plane
    pub fn right(&self) -> Vec3 {
        let yaw = utils::deg_to_rad(self.yaw);
        Vec3::new(yaw.cos(), 0.0, yaw.sin())
    }
}

/// What a renderer needs to build a view matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewDescriptor {
    /// Eye position
    pub eye: Vec3,
    /// Point being looked at
    pub look_at: Vec3,
    /// Up vector
    pub up: Vec3,
}

impl ViewDescriptor {
    /// Right-handed view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.eye, self.look_at, self.up)
    }

    /// Unit vector from the eye to the look point
    pub fn direction(&self) -> Vec3 {
        (self.look_at - self.eye).normalize()
    }
}

/// Camera controller
#[derive(Debug, Clone)]
pub struct CameraModel {
    tuning: CameraTuning,
}

impl CameraModel {
    /// Create a camera controller
    pub fn new(tuning: CameraTuning) -> Self {
        Self { tuning }
    }

    /// Free-fly camera at the configured start pose
    pub fn initial_state(&self) -> CameraState {
        let [x, y, z] = self.tuning.start_position;
        CameraState {
            position: Vec3::new(x, y, z),
            pitch: self.tuning.start_pitch.clamp(-self.tuning.pitch_limit, self.tuning.pitch_limit),
            yaw: utils::wrap_degrees(self.tuning.start_yaw),
            mode: CameraMode::FreeFly,
        }
    }

    /// Apply mode toggles, then free-fly look and movement
    pub fn update(&self, state: &mut CameraState, intents: &IntentSet, dt: f32) {
        if intents.has(Intents::CAMERA_MODE_FOLLOW) {
            self.toggle_mode(state, CameraMode::FollowVehicle);
        }
        if intents.has(Intents::CAMERA_MODE_INTERIOR) {
            self.toggle_mode(state, CameraMode::InteriorView);
        }

        if state.mode != CameraMode::FreeFly {
            return;
        }
        self.look(state, intents.yaw_delta, intents.pitch_delta);
        self.fly(state, intents.controls, dt);
    }

    /// Enter `mode`, or return to free-fly if it is already active
    pub fn toggle_mode(&self, state: &mut CameraState, mode: CameraMode) {
        state.mode = if state.mode == mode { CameraMode::FreeFly } else { mode };
        log::info!("Camera mode: {:?}", state.mode);
    }

    /// Turn the free-fly camera
    pub fn look(&self, state: &mut CameraState, yaw_delta: f32, pitch_delta: f32) {
        let limit = self.tuning.pitch_limit;
        state.yaw = utils::wrap_degrees(state.yaw + yaw_delta);
        state.pitch = (state.pitch + pitch_delta).clamp(-limit, limit);
    }

    /// Translate the free-fly camera along its yaw-only axes
    pub fn fly(&self, state: &mut CameraState, controls: Intents, dt: f32) {
        let forward = state.horizontal_forward();
        let right = state.right();
        let mut motion = Vec3::zeros();

        if controls.contains(Intents::CAM_MOVE_FORWARD) {
            motion += forward;
        }
        if controls.contains(Intents::CAM_MOVE_BACK) {
            motion -= forward;
        }
        if controls.contains(Intents::CAM_MOVE_RIGHT) {
            motion += right;
        }
        if controls.contains(Intents::CAM_MOVE_LEFT) {
            motion -= right;
        }
        if controls.contains(Intents::CAM_MOVE_UP) {
            motion.y += 1.0;
        }
        if controls.contains(Intents::CAM_MOVE_DOWN) {
            motion.y -= 1.0;
        }

        state.position += motion * (self.tuning.move_speed * dt);
        log::trace!("Free-fly camera at {:?}", state.position);
    }

    /// View for the active mode
    pub fn view(&self, state: &CameraState, vehicle: &VehicleState) -> ViewDescriptor {
        match state.mode {
            CameraMode::FreeFly => ViewDescriptor {
                eye: state.position,
                look_at: state.position + state.forward(),
                up: Vec3::y(),
            },
            CameraMode::FollowVehicle => {
                let behind = utils::heading_vector(vehicle.heading + 180.0) * self.tuning.follow_distance;
                ViewDescriptor {
                    eye: Vec3::new(vehicle.x + behind.x, state.position.y, vehicle.z + behind.y),
                    look_at: Vec3::new(vehicle.x, self.tuning.follow_look_height, vehicle.z),
                    up: Vec3::y(),
                }
            }
            CameraMode::InteriorView => {
                let forward = vehicle.forward();
                let lateral = Vec2::new(-forward.y, forward.x) * self.tuning.interior_lateral_offset;
                let seat = vehicle.position() + forward * self.tuning.interior_forward_offset + lateral;
                let ahead = vehicle.position() + forward * self.tuning.interior_look_distance + lateral;
                let height = self.tuning.interior_height;
                ViewDescriptor {
                    eye: Vec3::new(seat.x, height, seat.y),
                    look_at: Vec3::new(ahead.x, height, ahead.y),
                    up: Vec3::y(),
                }
            }
        }
    }
}

impl Default for CameraModel {
    fn default() -> Self {
        Self::new(CameraTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn intents(controls: Intents) -> IntentSet {
        IntentSet::from_controls(controls)
    }

    #[test]
    fn test_initial_state() {
        let camera = CameraModel::default();
        let state = camera.initial_state();
        assert_eq!(state.mode, CameraMode::FreeFly);
        assert_eq!(state.position, Vec3::new(0.0, 5.0, 15.0));
        assert_eq!(state.pitch, -20.0);

        // Looking toward -Z and slightly down.
        let forward = state.forward();
        assert!(forward.z < 0.0 && forward.y < 0.0);
        assert_relative_eq!(forward.magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mode_toggles_are_exclusive() {
        let camera = CameraModel::default();
        let mut state = camera.initial_state();

        camera.update(&mut state, &intents(Intents::CAMERA_MODE_FOLLOW), 0.016);
        assert_eq!(state.mode, CameraMode::FollowVehicle);

        camera.update(&mut state, &intents(Intents::CAMERA_MODE_INTERIOR), 0.016);
        assert_eq!(state.mode, CameraMode::InteriorView);

        camera.update(&mut state, &intents(Intents::CAMERA_MODE_INTERIOR), 0.016);
        assert_eq!(state.mode, CameraMode::FreeFly);

        camera.update(&mut state, &intents(Intents::CAMERA_MODE_FOLLOW), 0.016);
        camera.update(&mut state, &intents(Intents::CAMERA_MODE_FOLLOW), 0.016);
        assert_eq!(state.mode, CameraMode::FreeFly);
    }

    #[test]
    fn test_pitch_clamps_and_yaw_wraps() {
        let camera = CameraModel::default();
        let mut state = camera.initial_state();
        camera.look(&mut state, -30.0, 500.0);
        assert_eq!(state.pitch, 89.0);
        assert_relative_eq!(state.yaw, 330.0, epsilon = 1e-4);

        camera.look(&mut state, 0.0, -1000.0);
        assert_eq!(state.pitch, -89.0);
    }

    #[test]
    fn test_free_fly_moves_on_yaw_axes() {
        let camera = CameraModel::default();
        let mut state = camera.initial_state();
        state.yaw = 90.0;

        camera.fly(&mut state, Intents::CAM_MOVE_FORWARD, 0.5);
        assert_relative_eq!(state.position.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(state.position.y, 5.0, epsilon = 1e-5);
        assert_relative_eq!(state.position.z, 15.0, epsilon = 1e-5);

        camera.fly(&mut state, Intents::CAM_MOVE_UP | Intents::CAM_MOVE_RIGHT, 0.5);
        assert_relative_eq!(state.position.y, 8.0, epsilon = 1e-5);
        assert_relative_eq!(state.position.z, 18.0, epsilon = 1e-5);
    }

    #[test]
    fn test_movement_ignored_outside_free_fly() {
        let camera = CameraModel::default();
        let mut state = camera.initial_state();
        state.mode = CameraMode::FollowVehicle;
        let before = state;

        let input = IntentSet {
            controls: Intents::CAM_MOVE_FORWARD,
            yaw_delta: 10.0,
            pitch_delta: 10.0,
        };
        camera.update(&mut state, &input, 0.1);
        assert_eq!(state, before);
    }

    #[test]
    fn test_follow_view_sits_behind_vehicle() {
        let camera = CameraModel::default();
        let mut state = camera.initial_state();
        state.mode = CameraMode::FollowVehicle;
        let vehicle = VehicleState::parked_at(1.0, 2.0, 0.0);

        let view = camera.view(&state, &vehicle);
        assert_relative_eq!(view.eye.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(view.eye.y, 5.0);
        assert_relative_eq!(view.eye.z, -6.0, epsilon = 1e-5);
        assert_eq!(view.look_at, Vec3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_interior_view_from_driver_seat() {
        let camera = CameraModel::default();
        let mut state = camera.initial_state();
        state.mode = CameraMode::InteriorView;
        let vehicle = VehicleState::parked_at(0.0, 0.0, 0.0);

        let view = camera.view(&state, &vehicle);
        assert_relative_eq!(view.eye.x, 0.2, epsilon = 1e-5);
        assert_relative_eq!(view.eye.y, 1.3);
        assert_relative_eq!(view.eye.z, 0.1, epsilon = 1e-5);
        assert_relative_eq!(view.look_at.x, 0.2, epsilon = 1e-5);
        assert_relative_eq!(view.look_at.z, 5.0, epsilon = 1e-5);
        assert_relative_eq!(view.direction().z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_view_matrix_maps_look_point_ahead() {
        let camera = CameraModel::default();
        let state = camera.initial_state();
        let view = camera.view(&state, &VehicleState::default());
        let matrix = view.view_matrix();
        let target = matrix * view.look_at.push(1.0);
        // Right-handed view space looks down -Z.
        assert!(target.z < 0.0);
        assert_relative_eq!(target.x, 0.0, epsilon = 1e-5);
    }
}
