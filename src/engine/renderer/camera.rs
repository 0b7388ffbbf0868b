// Perspective camera and the controllers that move it

use crate::core::math::clamp;
use crate::engine::input::{Action, ActionState};
use glam::{Mat4, Vec2, Vec3};

/// Radians of rotation per pixel of mouse motion
const MOUSE_SENSITIVITY: f32 = 0.003;
/// Keep the camera off the poles so the view matrix stays well defined
const PITCH_LIMIT: f32 = 1.5;
/// Free-look movement per fixed tick
const FREE_LOOK_SPEED: f32 = 0.1;

/// 3D perspective camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Up direction
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fovy: f32,
}

impl Camera {
    pub const NEAR: f32 = 0.01;
    pub const FAR: f32 = 1000.0;

    /// Create a camera with +Y up
    pub fn new(position: Vec3, target: Vec3, fovy: f32) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            fovy,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy.to_radians(), aspect.max(0.01), Self::NEAR, Self::FAR)
    }

    /// Combined view-projection matrix for the given viewport aspect ratio
    pub fn view_proj_matrix(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

/// How a [`CameraController`] moves its camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMode {
    /// Orbit at a fixed distance around a followed target
    ThirdPerson { distance: f32 },
    /// Free camera driven by the movement actions
    FirstPerson,
}

/// Drives a [`Camera`] from input, one fixed tick at a time
///
/// The orbit only turns while [`Action::Orbit`] is held so the cursor
/// stays usable otherwise.
#[derive(Debug, Clone)]
pub struct CameraController {
    mode: CameraMode,
    yaw: f32,
    pitch: f32,
}

impl CameraController {
    /// Follow a target from `offset`, measured from the target to the eye
    pub fn third_person(offset: Vec3) -> Self {
        let distance = offset.length();
        let (yaw, pitch) = angles_of(offset);
        Self {
            mode: CameraMode::ThirdPerson { distance },
            yaw,
            pitch,
        }
    }

    /// Free-look starting from the camera's current view direction
    pub fn first_person(camera: &Camera) -> Self {
        let (yaw, pitch) = angles_of(camera.target - camera.position);
        Self {
            mode: CameraMode::FirstPerson,
            yaw,
            pitch,
        }
    }

    /// Apply one tick of input
    pub fn update(&mut self, camera: &mut Camera, state: &ActionState, mouse_delta: Vec2) {
        if state.is_pressed(Action::Orbit) {
            self.yaw -= mouse_delta.x * MOUSE_SENSITIVITY;
            let pitch_sign = match self.mode {
                CameraMode::ThirdPerson { .. } => 1.0,
                CameraMode::FirstPerson => -1.0,
            };
            self.pitch = clamp(
                self.pitch + pitch_sign * mouse_delta.y * MOUSE_SENSITIVITY,
                -PITCH_LIMIT,
                PITCH_LIMIT,
            );
        }

        match self.mode {
            CameraMode::ThirdPerson { distance } => {
                camera.position = camera.target + direction(self.yaw, self.pitch) * distance;
            }
            CameraMode::FirstPerson => {
                let forward = direction(self.yaw, self.pitch);
                let flat = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
                let right = flat.cross(Vec3::Y);

                let ahead = state.axis(Action::MoveBackward, Action::MoveForward);
                let side = state.axis(Action::MoveLeft, Action::MoveRight);
                camera.position += (flat * ahead + right * side) * FREE_LOOK_SPEED;
                camera.target = camera.position + forward;
            }
        }
    }

    /// Keep a third-person camera aimed at `target`; no-op in first person
    pub fn follow(&self, camera: &mut Camera, target: Vec3) {
        if let CameraMode::ThirdPerson { distance } = self.mode {
            camera.target = target;
            camera.position = target + direction(self.yaw, self.pitch) * distance;
        }
    }
}

/// Unit vector for a yaw about +Y (0 looks down +Z) and a pitch above the XZ plane
fn direction(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        pitch.cos() * yaw.sin(),
        pitch.sin(),
        pitch.cos() * yaw.cos(),
    )
}

fn angles_of(v: Vec3) -> (f32, f32) {
    let v = v.normalize_or_zero();
    (v.x.atan2(v.z), clamp(v.y, -1.0, 1.0).asin())
}
