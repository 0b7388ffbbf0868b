// Input manager - translates window events into action state

use super::action::InputSource;
use super::config::InputConfig;
use super::state::ActionState;
use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Owns the binding table, the action state and accumulated mouse motion
pub struct InputManager {
    config: InputConfig,
    state: ActionState,

    /// Sources currently held; several keys may share one action
    held: HashSet<InputSource>,

    /// Raw mouse motion since the last tick, in device units
    mouse_delta: Vec2,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self::with_config(InputConfig::default())
    }

    /// Create an input manager with a custom binding table
    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            state: ActionState::new(),
            held: HashSet::new(),
            mouse_delta: Vec2::ZERO,
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            // OS key repeat must not produce new press edges
            if event.repeat {
                return;
            }
            self.apply(InputSource::key(key_code), event.state);
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.apply(InputSource::mouse(button), state);
    }

    /// Accumulate raw mouse motion
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.mouse_delta += Vec2::new(delta.0 as f32, delta.1 as f32);
    }

    fn apply(&mut self, source: InputSource, element_state: ElementState) {
        if let Some(action) = self.config.get_action(source) {
            match element_state {
                ElementState::Pressed => {
                    self.held.insert(source);
                    self.state.press(action);
                }
                ElementState::Released => {
                    self.held.remove(&source);
                    let still_held = self
                        .held
                        .iter()
                        .any(|&other| self.config.get_action(other) == Some(action));
                    if !still_held {
                        self.state.release(action);
                    }
                }
            }
        }
    }

    /// Advance to the next tick; call once after every simulation tick
    pub fn update(&mut self) {
        self.state.update();
        self.mouse_delta = Vec2::ZERO;
    }

    /// Current action state
    pub fn state(&self) -> &ActionState {
        &self.state
    }

    /// Mouse motion accumulated since the last tick
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Drop all held keys and pending edges (focus loss, mode switch)
    pub fn reset(&mut self) {
        self.state.reset();
        self.held.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut ActionState {
        &mut self.state
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_mouse_button_maps_to_orbit() {
        let mut manager = InputManager::new();
        manager.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        assert!(manager.state().is_pressed(Action::Orbit));

        manager.process_mouse_button(MouseButton::Right, ElementState::Released);
        assert!(!manager.state().is_pressed(Action::Orbit));
    }

    #[test]
    fn test_unbound_mouse_button_is_ignored() {
        let mut manager = InputManager::new();
        manager.process_mouse_button(MouseButton::Middle, ElementState::Pressed);
        assert!(!manager.state().is_pressed(Action::Orbit));
    }

    #[test]
    fn test_mouse_motion_accumulates_until_update() {
        let mut manager = InputManager::new();
        manager.process_mouse_motion((3.0, -1.0));
        manager.process_mouse_motion((2.0, 4.0));
        assert_eq!(manager.mouse_delta(), Vec2::new(5.0, 3.0));

        manager.update();
        assert_eq!(manager.mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_update_consumes_edges() {
        let mut manager = InputManager::new();
        manager.state_mut().press(Action::Fire);
        assert!(manager.state().just_pressed(Action::Fire));

        manager.update();
        assert!(!manager.state().just_pressed(Action::Fire));
        assert!(manager.state().is_pressed(Action::Fire));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut manager = InputManager::new();
        manager.state_mut().press(Action::MoveForward);
        manager.process_mouse_motion((1.0, 1.0));
        manager.reset();

        assert!(!manager.state().is_pressed(Action::MoveForward));
        assert_eq!(manager.mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_shared_action_held_until_last_source_released() {
        let mut manager = InputManager::new();
        let digit = InputSource::key(KeyCode::Digit1);
        let numpad = InputSource::key(KeyCode::Numpad1);

        manager.apply(digit, ElementState::Pressed);
        manager.apply(numpad, ElementState::Pressed);
        manager.apply(digit, ElementState::Released);
        assert!(manager.state().is_pressed(Action::MenuOption1));

        manager.apply(numpad, ElementState::Released);
        assert!(!manager.state().is_pressed(Action::MenuOption1));
    }

    #[test]
    fn test_reset_forgets_held_sources() {
        let mut manager = InputManager::new();
        let key = InputSource::key(KeyCode::KeyW);
        manager.apply(key, ElementState::Pressed);
        manager.reset();

        // The release of a key held across the reset is harmless
        manager.apply(InputSource::key(KeyCode::KeyS), ElementState::Pressed);
        manager.apply(key, ElementState::Released);
        assert!(!manager.state().is_pressed(Action::MoveForward));
        assert!(manager.state().is_pressed(Action::MoveBackward));
    }
}
