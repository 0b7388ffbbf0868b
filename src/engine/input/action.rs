// Game action definitions and mappings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Number of toggleable lights addressed by `Action::ToggleLight`
pub const LIGHT_TOGGLE_COUNT: usize = 5;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,

    // Combat
    Fire,

    // Lighting rig slot (0 = yellow .. 4 = purple)
    ToggleLight(usize),

    // Camera
    Orbit,

    // Menus
    MenuOption1,
    MenuOption2,
    MenuOption3,
    Back,
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default keyboard/mouse bindings
///
/// A moves the tank towards +x and D towards -x; the movement code relies on
/// these names, not on screen-relative directions.
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // Movement
        (InputSource::key(KeyCode::KeyW), Action::MoveForward),
        (InputSource::key(KeyCode::KeyS), Action::MoveBackward),
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        // Combat
        (InputSource::key(KeyCode::Space), Action::Fire),
        // Lights, in rig order
        (InputSource::key(KeyCode::KeyY), Action::ToggleLight(0)),
        (InputSource::key(KeyCode::KeyR), Action::ToggleLight(1)),
        (InputSource::key(KeyCode::KeyG), Action::ToggleLight(2)),
        (InputSource::key(KeyCode::KeyB), Action::ToggleLight(3)),
        (InputSource::key(KeyCode::KeyP), Action::ToggleLight(4)),
        // Camera
        (InputSource::mouse(MouseButton::Right), Action::Orbit),
        // Menus
        (InputSource::key(KeyCode::Digit1), Action::MenuOption1),
        (InputSource::key(KeyCode::Digit2), Action::MenuOption2),
        (InputSource::key(KeyCode::Digit3), Action::MenuOption3),
        (InputSource::key(KeyCode::Numpad1), Action::MenuOption1),
        (InputSource::key(KeyCode::Numpad2), Action::MenuOption2),
        (InputSource::key(KeyCode::Numpad3), Action::MenuOption3),
        (InputSource::key(KeyCode::Escape), Action::Back),
    ]
}
