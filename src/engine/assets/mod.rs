// Asset management system
//
// Provides path resolution, loading and caching of models, textures and
// sounds. Each game mode owns one AssetManager; dropping it releases
// everything the mode loaded.

mod atlas;
mod handle;
mod loader;
mod manager;

pub use atlas::{AtlasBuilder, AtlasRegion};
pub use handle::{AssetHandle, AssetId, ModelHandle, SoundHandle, TextureHandle};
pub use loader::{AssetLoader, AssetType, DEFAULT_ASSET_ROOT};
pub use manager::AssetManager;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Unsupported asset format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("Failed to parse {name}: {reason}")]
    Parse { name: String, reason: String },

    #[error("Failed to decode {name}: {reason}")]
    Decode { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("test.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: test.png");

        let err = AssetError::Parse {
            name: "bullet.obj".to_string(),
            reason: "unexpected end of file".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse bullet.obj: unexpected end of file"
        );
    }
}
