// Input handling system
//
// Keyboard and mouse input is mapped to game actions through a binding table.
// Press edges are consumed per simulation tick rather than per rendered frame,
// so a tap that lands on a frame with no tick is still seen by the next one.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `config`: Binding table (source -> action)
// - `state`: Pressed / just-pressed action state
// - `manager`: Translates winit events and owns the above
//
// ## Usage Example
//
// ```rust
// let mut input = InputManager::new();
//
// // In the event loop
// input.process_keyboard_event(&key_event);
//
// // For every fixed tick
// if input.state().just_pressed(Action::Fire) {
//     // spawn the shell
// }
// input.update();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod state;

pub use action::{Action, LIGHT_TOGGLE_COUNT};
pub use manager::InputManager;
pub use state::ActionState;
