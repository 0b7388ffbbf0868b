// Per-frame draw list built by the screens and consumed by the renderer

use super::shapes;
use super::{Camera, Color, ColorVertex, LightRig};
use crate::engine::assets::{ModelHandle, TextureHandle};
use glam::{Vec2, Vec3};

/// Camera and lights for the 3D part of a frame
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub lights: LightRig,
}

/// One lit model placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelDraw {
    pub model: ModelHandle,
    pub position: Vec3,
    pub scale: f32,
    /// Rotation about +Y in radians
    pub rotation_y: f32,
    pub tint: Color,
}

impl ModelDraw {
    pub fn new(model: ModelHandle, position: Vec3, scale: f32) -> Self {
        Self {
            model,
            position,
            scale,
            rotation_y: 0.0,
            tint: Color::WHITE,
        }
    }

    pub fn with_rotation_y(mut self, radians: f32) -> Self {
        self.rotation_y = radians;
        self
    }
}

/// One line of screen text
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    pub text: String,
    /// Top-left corner in pixels
    pub position: Vec2,
    /// Line height in pixels
    pub size: f32,
    pub color: Color,
}

/// Everything to draw this frame, in immediate-mode style
///
/// Order inside a frame: clear, background, 3D (models, gizmos, grid), text.
#[derive(Debug, Clone)]
pub struct Frame {
    pub clear: Color,
    pub background: Option<TextureHandle>,
    pub scene: Option<Scene>,
    pub models: Vec<ModelDraw>,
    /// Unlit triangles, world space
    pub triangles: Vec<ColorVertex>,
    /// Unlit line segments, world space
    pub lines: Vec<ColorVertex>,
    pub texts: Vec<TextDraw>,
}

impl Frame {
    pub fn new(clear: Color) -> Self {
        Self {
            clear,
            background: None,
            scene: None,
            models: Vec::new(),
            triangles: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// Draw a texture at its native size with its top-left corner at (0, 0)
    pub fn background(&mut self, texture: TextureHandle) {
        self.background = Some(texture);
    }

    /// Set the camera and lights used by every 3D draw of this frame
    pub fn scene(&mut self, camera: Camera, lights: &LightRig) {
        self.scene = Some(Scene {
            camera,
            lights: lights.clone(),
        });
    }

    pub fn model(&mut self, draw: ModelDraw) {
        self.models.push(draw);
    }

    pub fn sphere(&mut self, center: Vec3, radius: f32, rings: u32, slices: u32, color: Color) {
        shapes::sphere_triangles(
            &mut self.triangles,
            center,
            radius,
            rings,
            slices,
            color.to_linear(),
        );
    }

    pub fn sphere_wires(&mut self, center: Vec3, radius: f32, rings: u32, slices: u32, color: Color) {
        shapes::sphere_wires(
            &mut self.lines,
            center,
            radius,
            rings,
            slices,
            color.to_linear(),
        );
    }

    /// Gray reference grid on the ground plane
    pub fn grid(&mut self, slices: u32, spacing: f32) {
        shapes::grid_lines(&mut self.lines, slices, spacing);
    }

    pub fn text(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32, color: Color) {
        self.texts.push(TextDraw {
            text: text.into(),
            position: Vec2::new(x, y),
            size,
            color,
        });
    }

    /// Frames-per-second counter
    pub fn fps(&mut self, x: f32, y: f32, fps: f32) {
        self.text(format!("{} FPS", fps.round() as u32), x, y, 20.0, Color::LIME);
    }

    /// Whether anything 3D was queued
    pub fn has_3d(&self) -> bool {
        !(self.models.is_empty() && self.triangles.is_empty() && self.lines.is_empty())
    }
}
