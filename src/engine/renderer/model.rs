// Models: meshes grouped with their materials

use super::Mesh;
use crate::engine::assets::TextureHandle;
use glam::Vec4;

/// One mesh of a model and the material it is drawn with
pub struct ModelPart {
    pub mesh: Mesh,
    /// Diffuse map; untextured parts sample a white texel
    pub texture: Option<TextureHandle>,
    /// Diffuse color, multiplied with the texture and the draw tint
    pub color: Vec4,
}

/// A drawable model; an empty model draws nothing
#[derive(Default)]
pub struct Model {
    parts: Vec<ModelPart>,
}

impl Model {
    pub fn new(parts: Vec<ModelPart>) -> Self {
        Self { parts }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn parts(&self) -> &[ModelPart] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Use `texture` as the diffuse map of every part
    pub fn set_texture(&mut self, texture: TextureHandle) {
        for part in &mut self.parts {
            part.texture = Some(texture);
        }
    }
}
