// Type-safe asset handle system

use std::marker::PhantomData;

/// Unique identifier for an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Create a new asset ID from a string path
    pub fn from_path(path: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Type-safe handle to a loaded asset
///
/// The `T` parameter ensures handles can only be used with the correct asset type.
/// Handles are plain ids: gameplay code can hold them without touching the GPU.
#[derive(Debug)]
pub struct AssetHandle<T> {
    pub(crate) id: AssetId,
    _phantom: PhantomData<fn() -> T>,
}

// Manual impls so the marker type does not need to be Copy/Eq itself
impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AssetHandle<T> {}

impl<T> PartialEq for AssetHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for AssetHandle<T> {}

impl<T> AssetHandle<T> {
    /// Create a new asset handle
    pub(crate) fn new(id: AssetId) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Get the underlying asset ID
    pub fn id(&self) -> AssetId {
        self.id
    }
}

// Marker types for different asset types
#[derive(Debug)]
pub struct ModelAsset;
#[derive(Debug)]
pub struct TextureAsset;
#[derive(Debug)]
pub struct SoundAsset;

/// Convenience type aliases
pub type ModelHandle = AssetHandle<ModelAsset>;
pub type TextureHandle = AssetHandle<TextureAsset>;
pub type SoundHandle = AssetHandle<SoundAsset>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_from_path() {
        let id1 = AssetId::from_path("models/tank.obj");
        let id2 = AssetId::from_path("models/tank.obj");
        let id3 = AssetId::from_path("models/bullet.obj");

        assert_eq!(id1, id2, "Same paths should produce same IDs");
        assert_ne!(id1, id3, "Different paths should produce different IDs");
    }

    #[test]
    fn test_asset_handle_type_safety() {
        let id = AssetId::from_path("shared");
        let model: ModelHandle = AssetHandle::new(id);
        let texture: TextureHandle = AssetHandle::new(id);

        // Different types, same underlying id
        assert_eq!(model.id(), texture.id());
    }

    #[test]
    fn test_handles_are_copy() {
        let handle: ModelHandle = AssetHandle::new(AssetId::from_path("tank"));
        let copy = handle;
        assert_eq!(handle, copy);
    }
}
