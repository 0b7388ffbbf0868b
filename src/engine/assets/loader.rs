// Asset path resolution and raw loading

use super::AssetError;
use std::path::{Path, PathBuf};

/// Default asset root, relative to the working directory
pub const DEFAULT_ASSET_ROOT: &str = "resources";

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Model,
    Texture,
    Sound,
    Font,
}

impl AssetType {
    /// Get the default directory for this asset type
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Model => "models",
            AssetType::Texture => "textures",
            AssetType::Sound => "sound",
            AssetType::Font => "fonts",
        }
    }

    /// Get supported file extensions for this asset type
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            AssetType::Model => &["obj"],
            AssetType::Texture => &["png", "jpg", "jpeg"],
            AssetType::Sound => &["wav", "ogg", "mp3", "flac"],
            AssetType::Font => &["ttf", "otf"],
        }
    }
}

/// Asset loader responsible for finding and reading asset files
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Resolve and validate the path of an asset
    pub fn locate(&self, asset_type: AssetType, name: &str) -> Result<PathBuf, AssetError> {
        let path = self.resolve_path(asset_type, name);

        let supported = path
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_ascii_lowercase();
                asset_type.extensions().contains(&ext.as_str())
            })
            .unwrap_or(false);
        if !supported {
            return Err(AssetError::UnsupportedFormat(name.to_string()));
        }

        if !path.is_file() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        Ok(path)
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, asset_type: AssetType, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.locate(asset_type, name)?;
        std::fs::read(&path)
            .map_err(|e| AssetError::LoadError(format!("Failed to read {}: {}", name, e)))
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new(DEFAULT_ASSET_ROOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_asset_type_directories() {
        assert_eq!(AssetType::Model.default_directory(), "models");
        assert_eq!(AssetType::Texture.default_directory(), "textures");
        assert_eq!(AssetType::Sound.default_directory(), "sound");
        assert_eq!(AssetType::Font.default_directory(), "fonts");
    }

    #[test]
    fn test_asset_type_extensions() {
        assert!(AssetType::Model.extensions().contains(&"obj"));
        assert!(AssetType::Texture.extensions().contains(&"png"));
        assert!(AssetType::Sound.extensions().contains(&"wav"));
        assert!(AssetType::Font.extensions().contains(&"ttf"));
    }

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/resources");
        let path = loader.resolve_path(AssetType::Sound, "tank_shot.wav");

        assert_eq!(
            path,
            PathBuf::from("/game/resources/sound/tank_shot.wav")
        );
    }

    #[test]
    fn test_missing_asset_is_not_found() {
        let loader = AssetLoader::new("/nonexistent/root");
        let result = loader.load_bytes(AssetType::Texture, "grass.png");
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_wrong_extension_is_rejected() {
        let loader = AssetLoader::default();
        let result = loader.locate(AssetType::Model, "tank.fbx");
        assert!(matches!(result, Err(AssetError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_load_real_file() {
        let root = std::env::temp_dir().join("tank_range_loader_test");
        let dir = root.join(AssetType::Sound.default_directory());
        std::fs::create_dir_all(&dir).unwrap();
        {
            let mut file = std::fs::File::create(dir.join("blip.wav")).unwrap();
            file.write_all(b"RIFF").unwrap();
        }

        let loader = AssetLoader::new(&root);
        let bytes = loader.load_bytes(AssetType::Sound, "blip.wav").unwrap();
        assert_eq!(bytes, b"RIFF");

        let _ = std::fs::remove_dir_all(root);
    }
}
