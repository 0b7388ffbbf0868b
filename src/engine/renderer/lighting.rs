// Point light rig and the scene uniform it feeds

use super::{Camera, Color};
use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};
use thiserror::Error;

/// Lights a rig can hold; matches the array length in `lit.wgsl`
pub const MAX_LIGHTS: usize = 5;

/// Default ambient term (the shader scales it by 1/10)
pub const DEFAULT_AMBIENT: Vec4 = Vec4::new(0.1, 0.1, 0.1, 1.0);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LightError {
    #[error("light rig is full ({0} lights)")]
    RigFull(usize),
}

/// A point light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
    pub enabled: bool,
}

impl Light {
    const OFF: Light = Light {
        position: Vec3::ZERO,
        color: Color::BLACK,
        enabled: false,
    };
}

/// Fixed-capacity set of point lights with an explicit count
///
/// Each scene owns its own rig, so leaving a mode and entering another
/// starts from an empty rig again.
#[derive(Debug, Clone)]
pub struct LightRig {
    lights: [Light; MAX_LIGHTS],
    count: usize,
    pub ambient: Vec4,
}

impl LightRig {
    pub fn new() -> Self {
        Self {
            lights: [Light::OFF; MAX_LIGHTS],
            count: 0,
            ambient: DEFAULT_AMBIENT,
        }
    }

    /// Add an enabled light, returning its index
    pub fn add(&mut self, position: Vec3, color: Color) -> Result<usize, LightError> {
        if self.count == MAX_LIGHTS {
            return Err(LightError::RigFull(MAX_LIGHTS));
        }
        let index = self.count;
        self.lights[index] = Light {
            position,
            color,
            enabled: true,
        };
        self.count += 1;
        Ok(index)
    }

    /// Flip a light on or off; out-of-range indices are ignored
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.lights[..self.count].get_mut(index) {
            Some(light) => {
                light.enabled = !light.enabled;
                true
            }
            None => false,
        }
    }

    /// Move every light by the same offset
    pub fn translate(&mut self, delta: Vec3) {
        for light in &mut self.lights[..self.count] {
            light.position += delta;
        }
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights[..self.count]
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU layout of one light (std140: 32 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub enabled: u32,
    pub color: [f32; 4],
}

/// Per-frame uniform shared by the 3D pipelines (group 0)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SceneUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view_pos: [f32; 3],
    pub light_count: u32,
    pub ambient: [f32; 4],
    pub lights: [LightUniform; MAX_LIGHTS],
}

impl SceneUniform {
    pub fn new(camera: &Camera, aspect: f32, rig: &LightRig) -> Self {
        let mut lights = [LightUniform::default(); MAX_LIGHTS];
        for (slot, light) in lights.iter_mut().zip(rig.lights()) {
            *slot = LightUniform {
                position: light.position.to_array(),
                enabled: light.enabled as u32,
                color: light.color.to_linear().to_array(),
            };
        }

        Self {
            view_proj: camera.view_proj_matrix(aspect).to_cols_array_2d(),
            view_pos: camera.position.to_array(),
            light_count: rig.count() as u32,
            ambient: rig.ambient.to_array(),
            lights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_light_rig() -> LightRig {
        let mut rig = LightRig::new();
        rig.add(Vec3::new(-2.0, 2.0, -2.0), Color::YELLOW).unwrap();
        rig.add(Vec3::new(2.0, 2.0, 2.0), Color::RED).unwrap();
        rig.add(Vec3::new(-2.0, 2.0, 2.0), Color::GREEN).unwrap();
        rig.add(Vec3::new(2.0, 2.0, -2.0), Color::BLUE).unwrap();
        rig.add(Vec3::new(0.0, 4.0, 0.0), Color::PURPLE).unwrap();
        rig
    }

    #[test]
    fn test_uniform_sizes() {
        assert_eq!(std::mem::size_of::<LightUniform>(), 32);
        assert_eq!(std::mem::size_of::<SceneUniform>(), 256);
    }

    #[test]
    fn test_rig_holds_five_lights() {
        let mut rig = five_light_rig();
        assert_eq!(rig.count(), 5);
        assert!(rig.lights().iter().all(|l| l.enabled));
        assert_eq!(
            rig.add(Vec3::ZERO, Color::WHITE),
            Err(LightError::RigFull(MAX_LIGHTS))
        );
    }

    #[test]
    fn test_toggle() {
        let mut rig = five_light_rig();
        assert!(rig.toggle(4));
        assert!(!rig.lights()[4].enabled);
        assert!(rig.toggle(4));
        assert!(rig.lights()[4].enabled);
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut rig = LightRig::new();
        rig.add(Vec3::ZERO, Color::WHITE).unwrap();
        assert!(!rig.toggle(1));
        assert!(!rig.toggle(10));
    }

    #[test]
    fn test_translate_moves_all_lights() {
        let mut rig = five_light_rig();
        rig.translate(Vec3::new(0.5, 0.0, -1.0));
        assert_eq!(rig.lights()[0].position, Vec3::new(-1.5, 2.0, -3.0));
        assert_eq!(rig.lights()[4].position, Vec3::new(0.5, 4.0, -1.0));
    }

    #[test]
    fn test_scene_uniform_reflects_rig() {
        let mut rig = five_light_rig();
        rig.toggle(1);
        let camera = Camera::new(Vec3::new(2.0, 15.0, 6.0), Vec3::ZERO, 70.0);
        let uniform = SceneUniform::new(&camera, 1.5, &rig);

        assert_eq!(uniform.light_count, 5);
        assert_eq!(uniform.view_pos, [2.0, 15.0, 6.0]);
        assert_eq!(uniform.lights[0].enabled, 1);
        assert_eq!(uniform.lights[1].enabled, 0);
        assert_eq!(uniform.lights[4].position, [0.0, 4.0, 0.0]);
    }
}
