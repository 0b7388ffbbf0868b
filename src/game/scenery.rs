// Pieces shared by the game and the model viewer: light rig, gizmos, help text

use super::tuning::Tuning;
use crate::engine::input::{Action, ActionState, LIGHT_TOGGLE_COUNT};
use crate::engine::renderer::{Color, Frame, LightError, LightRig};

pub const LIGHTS_HELP: &str = "Use keys [P][Y][R][G][B] to toggle lights";

/// Build the five-light rig in its starting layout
pub fn light_rig(tuning: &Tuning) -> Result<LightRig, LightError> {
    let mut rig = LightRig::new();
    for (position, color) in tuning.lights {
        rig.add(position, color)?;
    }
    Ok(rig)
}

/// Flip every light whose toggle key was pressed this tick
pub fn toggle_lights(rig: &mut LightRig, input: &ActionState) {
    for index in 0..LIGHT_TOGGLE_COUNT {
        if input.just_pressed(Action::ToggleLight(index)) {
            rig.toggle(index);
        }
    }
}

/// Solid spheres for lit lights, faint wire spheres for switched-off ones,
/// then the ground grid
pub fn draw_gizmos(frame: &mut Frame, rig: &LightRig, tuning: &Tuning) {
    for light in rig.lights() {
        if light.enabled {
            frame.sphere(
                light.position,
                tuning.gizmo_radius,
                tuning.gizmo_rings,
                tuning.gizmo_slices,
                light.color,
            );
        } else {
            frame.sphere_wires(
                light.position,
                tuning.gizmo_radius,
                tuning.gizmo_rings,
                tuning.gizmo_slices,
                light.color.with_alpha(tuning.gizmo_off_alpha),
            );
        }
    }
    frame.grid(tuning.grid_slices, tuning.grid_spacing);
}

/// FPS counter and the two help lines
pub fn draw_help(frame: &mut Frame, fps: f32, movement_help: &str) {
    frame.fps(10.0, 10.0, fps);
    frame.text(LIGHTS_HELP, 10.0, 40.0, 16.0, Color::BLACK);
    frame.text(movement_help, 10.0, 80.0, 16.0, Color::BLACK);
}
