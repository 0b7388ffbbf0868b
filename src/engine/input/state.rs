// Per-tick action state

use super::action::Action;
use std::collections::HashSet;

/// Pressed/edge state of every action, advanced once per simulation tick
#[derive(Debug, Default)]
pub struct ActionState {
    /// Actions currently held down
    pressed: HashSet<Action>,

    /// Actions pressed since the last tick (press edges)
    just_pressed: HashSet<Action>,
}

impl ActionState {
    /// Create an empty action state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was pressed since the last tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Register an action press
    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Advance to the next tick, consuming press edges
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
    }

    /// Axis value in [-1, 1] built from a negative and a positive action
    pub fn axis(&self, negative: Action, positive: Action) -> f32 {
        let mut value = 0.0;
        if self.is_pressed(negative) {
            value -= 1.0;
        }
        if self.is_pressed(positive) {
            value += 1.0;
        }
        value
    }
}
