// Gameplay tuning - every number the range plays by lives here
//
// Distances are world units, speeds are units per fixed tick (1/60 s).

use crate::engine::renderer::Color;
use glam::Vec3;

/// Gameplay constants for a session
#[derive(Debug, Clone)]
pub struct Tuning {
    // Movement
    /// Distance the tank (and the light rig) moves per tick per held key
    pub move_step: f32,

    // Shell
    /// Shell spawn point relative to the tank
    pub shell_offset: Vec3,
    /// Shell travel along +z per tick
    pub shell_speed: f32,
    /// Shell despawns once it is this far ahead of the tank
    pub shell_range: f32,

    // Hit window, relative to the enemy position (open intervals)
    pub hit_z_behind: f32,
    pub hit_z_ahead: f32,
    pub hit_half_width: f32,

    // Spawning
    /// Enemies appear at least this far ahead of the tank
    pub spawn_min_ahead: f32,
    /// Far edge of the spawn band along z
    pub spawn_z_max: f32,
    /// Spawn band along x (inclusive)
    pub spawn_x_min: f32,
    pub spawn_x_max: f32,
    /// The wave respawns every this many kills
    pub respawn_every: u32,

    // Presentation
    /// Tank model yaw so it faces down +z
    pub player_rotation_y: f32,
    pub shell_scale: f32,
    pub ground_size: f32,
    pub ground_subdivisions: u32,
    /// Third-person camera eye relative to the tank
    pub camera_offset: Vec3,
    pub camera_fovy: f32,

    // Lights
    pub lights: [(Vec3, Color); 5],
    pub gizmo_radius: f32,
    pub gizmo_rings: u32,
    pub gizmo_slices: u32,
    /// Opacity of the wire gizmo drawn for a switched-off light
    pub gizmo_off_alpha: f32,
    pub grid_slices: u32,
    pub grid_spacing: f32,
}

pub const TUNING: Tuning = Tuning {
    move_step: 0.3,

    shell_offset: Vec3::new(-0.3, 2.35, 6.4),
    shell_speed: 1.0,
    shell_range: 50.0,

    hit_z_behind: 1.0,
    hit_z_ahead: 5.0,
    hit_half_width: 2.0,

    spawn_min_ahead: 30.0,
    spawn_z_max: 80.0,
    spawn_x_min: -50.0,
    spawn_x_max: 80.0,
    respawn_every: 3,

    player_rotation_y: 3.1,
    shell_scale: 0.1,
    ground_size: 200.0,
    ground_subdivisions: 3,
    camera_offset: Vec3::new(2.0, 15.0, 6.0),
    camera_fovy: 70.0,

    lights: [
        (Vec3::new(-2.0, 2.0, -2.0), Color::YELLOW),
        (Vec3::new(2.0, 2.0, 2.0), Color::RED),
        (Vec3::new(-2.0, 2.0, 2.0), Color::GREEN),
        (Vec3::new(2.0, 2.0, -2.0), Color::BLUE),
        (Vec3::new(0.0, 4.0, 0.0), Color::PURPLE),
    ],
    gizmo_radius: 0.2,
    gizmo_rings: 8,
    gizmo_slices: 8,
    gizmo_off_alpha: 0.3,
    grid_slices: 150,
    grid_spacing: 1.0,
};

impl Default for Tuning {
    fn default() -> Self {
        TUNING
    }
}
