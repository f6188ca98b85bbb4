//! Key to action bindings

use serde::{Serialize, Deserialize};

use super::KeyCode;

/// Controls configuration
///
/// One key per action. Vehicle controls default to WASD, free-fly camera
/// movement to IJKL plus R/F for height, look nudges to the arrow keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Accelerate forward
    pub accelerate: KeyCode,
    /// Brake, then reverse
    pub brake: KeyCode,
    /// Turn the steering wheel left
    pub steer_left: KeyCode,
    /// Turn the steering wheel right
    pub steer_right: KeyCode,
    /// Open or close the left vehicle door
    pub toggle_left_door: KeyCode,
    /// Open or close the right vehicle door
    pub toggle_right_door: KeyCode,
    /// Open or close the garage door
    pub toggle_gate: KeyCode,
    /// Toggle the follow camera
    pub camera_follow: KeyCode,
    /// Toggle the interior camera
    pub camera_interior: KeyCode,
    /// Free-fly forward
    pub camera_forward: KeyCode,
    /// Free-fly backward
    pub camera_back: KeyCode,
    /// Free-fly strafe left
    pub camera_left: KeyCode,
    /// Free-fly strafe right
    pub camera_right: KeyCode,
    /// Free-fly up
    pub camera_up: KeyCode,
    /// Free-fly down
    pub camera_down: KeyCode,
    /// Pitch the free-fly camera up one step
    pub look_up: KeyCode,
    /// Pitch the free-fly camera down one step
    pub look_down: KeyCode,
    /// Yaw the free-fly camera left one step
    pub look_left: KeyCode,
    /// Yaw the free-fly camera right one step
    pub look_right: KeyCode,
    /// Leave the application
    pub quit: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            accelerate: KeyCode::W,
            brake: KeyCode::S,
            steer_left: KeyCode::A,
            steer_right: KeyCode::D,
            toggle_left_door: KeyCode::E,
            toggle_right_door: KeyCode::Q,
            toggle_gate: KeyCode::G,
            camera_follow: KeyCode::C,
            camera_interior: KeyCode::V,
            camera_forward: KeyCode::I,
            camera_back: KeyCode::K,
            camera_left: KeyCode::J,
            camera_right: KeyCode::L,
            camera_up: KeyCode::R,
            camera_down: KeyCode::F,
            look_up: KeyCode::Up,
            look_down: KeyCode::Down,
            look_left: KeyCode::Left,
            look_right: KeyCode::Right,
            quit: KeyCode::Escape,
        }
    }
}

impl KeyBindings {
    /// Human-readable control summary, one line per action
    pub fn help_lines(&self) -> Vec<String> {
        vec![
            format!("{:?}/{:?}  accelerate / brake-reverse", self.accelerate, self.brake),
            format!("{:?}/{:?}  steer left / right", self.steer_left, self.steer_right),
            format!("{:?}/{:?}  left / right door", self.toggle_left_door, self.toggle_right_door),
            format!("{:?}      garage door", self.toggle_gate),
            format!("{:?}/{:?}  follow / interior camera", self.camera_follow, self.camera_interior),
            format!(
                "{:?}{:?}{:?}{:?} {:?}/{:?}  free-fly move",
                self.camera_forward, self.camera_left, self.camera_back, self.camera_right,
                self.camera_up, self.camera_down
            ),
            "Arrows  look around (free-fly)".to_string(),
            format!("{:?}  quit", self.quit),
        ]
    }
}
