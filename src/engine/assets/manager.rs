// Per-mode asset cache

use super::{
    AssetError, AssetHandle, AssetId, AssetLoader, AssetType, ModelHandle, SoundHandle,
    TextureHandle,
};
use crate::engine::audio::Sound;
use crate::engine::renderer::{GpuContext, Mesh, MeshData, MeshVertex, Model, ModelPart, Texture};
use glam::{Vec2, Vec3, Vec4};
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;

/// Loads and owns the models, textures and sounds of one game mode
///
/// Loading never fails: a broken model becomes an empty model, a broken
/// texture a white texel and a broken sound silence. Each fallback is logged.
pub struct AssetManager {
    loader: AssetLoader,

    models: HashMap<AssetId, Model>,
    textures: HashMap<AssetId, Texture>,
    sounds: HashMap<AssetId, Sound>,
}

impl AssetManager {
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        Self {
            loader: AssetLoader::new(asset_path),
            models: HashMap::new(),
            textures: HashMap::new(),
            sounds: HashMap::new(),
        }
    }

    /// Load an OBJ model (and the diffuse maps its materials name)
    pub fn load_model(&mut self, gpu: &GpuContext, name: &str) -> ModelHandle {
        let id = AssetId::from_path(name);
        if !self.models.contains_key(&id) {
            let model = match self.try_load_model(gpu, name) {
                Ok(model) if model.is_empty() => {
                    warn!("Model {} has no geometry", name);
                    model
                }
                Ok(model) => {
                    info!("Loaded model {} ({} parts)", name, model.parts().len());
                    model
                }
                Err(e) => {
                    warn!("{}; drawing nothing in its place", e);
                    Model::empty()
                }
            };
            self.models.insert(id, model);
        }
        AssetHandle::new(id)
    }

    fn try_load_model(&mut self, gpu: &GpuContext, name: &str) -> Result<Model, AssetError> {
        let path = self.loader.locate(AssetType::Model, name)?;

        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let (meshes, materials) = tobj::load_obj(&path, &options).map_err(|e| AssetError::Parse {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        let materials = materials.unwrap_or_else(|e| {
            warn!("No materials for {}: {}", name, e);
            Vec::new()
        });
        let obj_dir = path.parent().unwrap_or_else(|| Path::new(""));

        let mut parts = Vec::with_capacity(meshes.len());
        for obj in &meshes {
            let data = mesh_data_from_obj(&obj.mesh);
            let Some(mesh) = Mesh::upload(gpu, &data, &obj.name) else {
                continue;
            };

            let material = obj.mesh.material_id.and_then(|i| materials.get(i));
            let color = material
                .and_then(|m| m.diffuse)
                .map(|[r, g, b]| Vec4::new(r, g, b, 1.0))
                .unwrap_or(Vec4::ONE);
            let texture = material
                .and_then(|m| m.diffuse_texture.as_deref())
                .map(|file| self.load_texture_file(gpu, &obj_dir.join(file)));

            parts.push(ModelPart {
                mesh,
                texture,
                color,
            });
        }

        Ok(Model::new(parts))
    }

    /// Register a procedurally built mesh as a single-part model
    pub fn add_mesh_model(&mut self, gpu: &GpuContext, name: &str, data: &MeshData) -> ModelHandle {
        let id = AssetId::from_path(name);
        let parts = Mesh::upload(gpu, data, name)
            .map(|mesh| ModelPart {
                mesh,
                texture: None,
                color: Vec4::ONE,
            })
            .into_iter()
            .collect();
        self.models.insert(id, Model::new(parts));
        AssetHandle::new(id)
    }

    /// Use `texture` as the diffuse map of every part of `model`
    pub fn set_model_texture(&mut self, model: ModelHandle, texture: TextureHandle) {
        if let Some(model) = self.models.get_mut(&model.id()) {
            model.set_texture(texture);
        }
    }

    /// Load a texture from the textures directory
    pub fn load_texture(&mut self, gpu: &GpuContext, name: &str) -> TextureHandle {
        let path = self.loader.resolve_path(AssetType::Texture, name);
        self.load_texture_file(gpu, &path)
    }

    fn load_texture_file(&mut self, gpu: &GpuContext, path: &Path) -> TextureHandle {
        let key = path.to_string_lossy();
        let id = AssetId::from_path(&key);
        if !self.textures.contains_key(&id) {
            let texture = match decode_texture(gpu, path) {
                Ok(texture) => {
                    info!("Loaded texture {} ({}x{})", key, texture.width, texture.height);
                    texture
                }
                Err(e) => {
                    warn!("{}; using a white texture", e);
                    Texture::from_color(gpu, [255, 255, 255, 255], &key)
                }
            };
            self.textures.insert(id, texture);
        }
        AssetHandle::new(id)
    }

    /// Load a sound from the sound directory
    pub fn load_sound(&mut self, name: &str) -> SoundHandle {
        let id = AssetId::from_path(name);
        if !self.sounds.contains_key(&id) {
            let sound = match self.loader.load_bytes(AssetType::Sound, name) {
                Ok(bytes) => {
                    info!("Loaded sound {} ({} bytes)", name, bytes.len());
                    Sound::new(id, bytes)
                }
                Err(e) => {
                    warn!("{}; playing silence instead", e);
                    Sound::silent(id)
                }
            };
            self.sounds.insert(id, sound);
        }
        AssetHandle::new(id)
    }

    pub fn model(&self, handle: ModelHandle) -> Option<&Model> {
        self.models.get(&handle.id())
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(&handle.id())
    }

    pub fn sound(&self, handle: SoundHandle) -> Option<&Sound> {
        self.sounds.get(&handle.id())
    }
}

impl Drop for AssetManager {
    fn drop(&mut self) {
        info!(
            "Releasing {} models, {} textures, {} sounds",
            self.models.len(),
            self.textures.len(),
            self.sounds.len()
        );
    }
}

fn decode_texture(gpu: &GpuContext, path: &Path) -> Result<Texture, AssetError> {
    let name = path.to_string_lossy().to_string();
    let bytes = std::fs::read(path).map_err(|e| AssetError::LoadError(format!("{}: {}", name, e)))?;
    Texture::from_bytes(gpu, &bytes, &name).map_err(|e| AssetError::Decode {
        name,
        reason: e.to_string(),
    })
}

/// Convert a single-index OBJ mesh into vertex data
///
/// Texture rows are flipped (OBJ puts v = 0 at the bottom) and normals are
/// generated when the file carries none.
fn mesh_data_from_obj(mesh: &tobj::Mesh) -> MeshData {
    let vertex_count = mesh.positions.len() / 3;
    let has_normals = mesh.normals.len() == mesh.positions.len();

    let vertices = (0..vertex_count)
        .map(|i| {
            let position = Vec3::new(
                mesh.positions[3 * i],
                mesh.positions[3 * i + 1],
                mesh.positions[3 * i + 2],
            );
            let normal = if has_normals {
                Vec3::new(mesh.normals[3 * i], mesh.normals[3 * i + 1], mesh.normals[3 * i + 2])
            } else {
                Vec3::ZERO
            };
            let tex_coords = if mesh.texcoords.len() >= 2 * (i + 1) {
                Vec2::new(mesh.texcoords[2 * i], 1.0 - mesh.texcoords[2 * i + 1])
            } else {
                Vec2::ZERO
            };
            MeshVertex::new(position, normal, tex_coords)
        })
        .collect();

    let indices = if mesh.indices.is_empty() {
        (0..vertex_count as u32).collect()
    } else {
        mesh.indices.clone()
    };

    let mut data = MeshData { vertices, indices };
    if !has_normals {
        data.compute_normals();
    }
    data
}
