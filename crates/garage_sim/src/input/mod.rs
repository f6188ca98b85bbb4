//! Input management system
//!
//! Turns raw key and mouse events into the per-tick [`IntentSet`] consumed by
//! [`Simulation::tick`](crate::Simulation::tick). Held keys map to continuous
//! intents (accelerate, steer, camera movement); press edges map to one-shot
//! toggles that fire exactly once per key press.

mod bindings;
mod intents;

pub use bindings::KeyBindings;
pub use intents::{Intents, IntentSet};

use std::collections::HashSet;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Degrees of pitch/yaw applied per arrow key press
const LOOK_STEP_DEGREES: f32 = 5.0;

/// Degrees of look rotation per pixel of mouse motion
const MOUSE_SENSITIVITY: f32 = 0.5;

/// Input manager
///
/// Owned by the presentation layer. Feed it window events as they arrive,
/// then call [`take_intents`](Self::take_intents) once per simulation tick.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
    yaw_delta: f32,
    pitch_delta: f32,
    quit_requested: bool,
}

impl InputState {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key input
    ///
    /// A press of a key that is not already held counts as a press edge.
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if self.held.insert(key) {
                self.pressed.insert(key);
            }
        } else {
            self.held.remove(&key);
        }
    }

    /// Handle mouse movement, in pixels since the last event
    pub fn handle_mouse_move(&mut self, dx: f32, dy: f32) {
        self.yaw_delta += dx * MOUSE_SENSITIVITY;
        self.pitch_delta -= dy * MOUSE_SENSITIVITY;
    }

    /// Whether the quit key has been pressed
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Whether `key` is currently held
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Build this tick's intents and clear one-shot state
    pub fn take_intents(&mut self, bindings: &KeyBindings) -> IntentSet {
        let mut controls = Intents::empty();

        // Opposing held intents resolve the same way every tick: accelerate
        // wins over brake, left wins over right.
        if self.is_held(bindings.accelerate) {
            controls |= Intents::ACCELERATE;
        } else if self.is_held(bindings.brake) {
            controls |= Intents::BRAKE;
        }
        if self.is_held(bindings.steer_left) {
            controls |= Intents::STEER_LEFT;
        } else if self.is_held(bindings.steer_right) {
            controls |= Intents::STEER_RIGHT;
        }

        let held_flags = [
            (bindings.camera_forward, Intents::CAM_MOVE_FORWARD),
            (bindings.camera_back, Intents::CAM_MOVE_BACK),
            (bindings.camera_left, Intents::CAM_MOVE_LEFT),
            (bindings.camera_right, Intents::CAM_MOVE_RIGHT),
            (bindings.camera_up, Intents::CAM_MOVE_UP),
            (bindings.camera_down, Intents::CAM_MOVE_DOWN),
        ];
        for (key, flag) in held_flags {
            if self.is_held(key) {
                controls |= flag;
            }
        }

        let toggle_flags = [
            (bindings.toggle_left_door, Intents::TOGGLE_LEFT_DOOR),
            (bindings.toggle_right_door, Intents::TOGGLE_RIGHT_DOOR),
            (bindings.toggle_gate, Intents::TOGGLE_GATE),
            (bindings.camera_follow, Intents::CAMERA_MODE_FOLLOW),
            (bindings.camera_interior, Intents::CAMERA_MODE_INTERIOR),
        ];
        for (key, flag) in toggle_flags {
            if self.pressed.contains(&key) {
                controls |= flag;
            }
        }

        let look_steps = [
            (bindings.look_up, 0.0, LOOK_STEP_DEGREES),
            (bindings.look_down, 0.0, -LOOK_STEP_DEGREES),
            (bindings.look_left, -LOOK_STEP_DEGREES, 0.0),
            (bindings.look_right, LOOK_STEP_DEGREES, 0.0),
        ];
        for (key, yaw, pitch) in look_steps {
            if self.pressed.contains(&key) {
                self.yaw_delta += yaw;
                self.pitch_delta += pitch;
            }
        }

        if self.pressed.contains(&bindings.quit) {
            log::info!("Quit requested");
            self.quit_requested = true;
        }

        let intents = IntentSet {
            controls,
            yaw_delta: self.yaw_delta,
            pitch_delta: self.pitch_delta,
        };

        self.pressed.clear();
        self.yaw_delta = 0.0;
        self.pitch_delta = 0.0;

        intents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_key_repeats_every_tick() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        input.handle_key_input(KeyCode::W, true);

        assert!(input.take_intents(&bindings).controls.contains(Intents::ACCELERATE));
        assert!(input.take_intents(&bindings).controls.contains(Intents::ACCELERATE));

        input.handle_key_input(KeyCode::W, false);
        assert!(input.take_intents(&bindings).controls.is_empty());
    }

    #[test]
    fn test_toggle_fires_once_per_press() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        input.handle_key_input(KeyCode::G, true);
        // Key repeat while held is not a new press.
        input.handle_key_input(KeyCode::G, true);

        assert!(input.take_intents(&bindings).controls.contains(Intents::TOGGLE_GATE));
        assert!(!input.take_intents(&bindings).controls.contains(Intents::TOGGLE_GATE));

        input.handle_key_input(KeyCode::G, false);
        input.handle_key_input(KeyCode::G, true);
        assert!(input.take_intents(&bindings).controls.contains(Intents::TOGGLE_GATE));
    }

    #[test]
    fn test_accelerate_wins_over_brake() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        input.handle_key_input(KeyCode::W, true);
        input.handle_key_input(KeyCode::S, true);
        input.handle_key_input(KeyCode::A, true);
        input.handle_key_input(KeyCode::D, true);

        let controls = input.take_intents(&bindings).controls;
        assert!(controls.contains(Intents::ACCELERATE | Intents::STEER_LEFT));
        assert!(!controls.intersects(Intents::BRAKE | Intents::STEER_RIGHT));
    }

    #[test]
    fn test_mouse_and_arrows_accumulate_look_deltas() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        input.handle_mouse_move(10.0, -4.0);
        input.handle_key_input(KeyCode::Right, true);
        input.handle_key_input(KeyCode::Up, true);

        let intents = input.take_intents(&bindings);
        assert_eq!(intents.yaw_delta, 10.0);
        assert_eq!(intents.pitch_delta, 7.0);

        let next = input.take_intents(&bindings);
        assert_eq!(next.yaw_delta, 0.0);
        assert_eq!(next.pitch_delta, 0.0);
    }

    #[test]
    fn test_escape_requests_quit() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        assert!(!input.quit_requested());
        input.handle_key_input(KeyCode::Escape, true);
        input.take_intents(&bindings);
        assert!(input.quit_requested());
    }
}
