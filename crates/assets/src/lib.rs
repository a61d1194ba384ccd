//! Texture assets: decoding, format selection and the fixed texture manifest.
//!
//! The renderer consumes textures by `TextureSlot`, never by raw file paths.
//!
//! # Layout
//! All seven images live flat in one asset directory under fixed file names.

mod texture;

pub use texture::{DecodedTexture, PixelFormat};

use deskscene_common::TextureSlot;
use std::path::{Path, PathBuf};

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("{name}: not implemented to handle image with {channels} channels")]
    UnsupportedChannels { name: String, channels: u8 },
    #[error("failed to load texture {path}: {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: Box<AssetError>,
    },
}

/// Where each texture slot is read from.
#[derive(Debug, Clone)]
pub struct TextureManifest {
    root: PathBuf,
}

impl TextureManifest {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_name(slot: TextureSlot) -> &'static str {
        match slot {
            TextureSlot::Brick => "Brick.jpg",
            TextureSlot::Wood => "black-wood.jpg",
            TextureSlot::BatteryBody => "AmazonBattery2.png",
            TextureSlot::ChromeCap => "Chrome.jpg",
            TextureSlot::BoxTop => "BoxTop.jpg",
            TextureSlot::TapeTop => "tape_t_p2.jpg",
            TextureSlot::TapeSide => "white_plastic.png",
        }
    }

    pub fn path(&self, slot: TextureSlot) -> PathBuf {
        self.root.join(Self::file_name(slot))
    }

    pub fn load(&self, slot: TextureSlot) -> Result<DecodedTexture, AssetError> {
        let path = self.path(slot);
        DecodedTexture::load(&path).map_err(|e| AssetError::Texture {
            path,
            source: Box::new(e),
        })
    }

    /// Decode every slot in index order. Stops at the first failure.
    pub fn load_all(&self) -> Result<Vec<DecodedTexture>, AssetError> {
        TextureSlot::ALL
            .iter()
            .map(|&slot| {
                let tex = self.load(slot)?;
                tracing::debug!(slot = slot.name(), "loaded texture {}", tex.name);
                Ok(tex)
            })
            .collect()
    }
}

impl Default for TextureManifest {
    fn default() -> Self {
        Self::new("assets")
    }
}

pub fn crate_info() -> &'static str {
    "deskscene-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbImage, RgbaImage};

    fn write_all_slots(dir: &Path) {
        for slot in TextureSlot::ALL {
            let path = dir.join(TextureManifest::file_name(slot));
            if path.extension().is_some_and(|e| e == "png") {
                RgbaImage::new(4, 4).save(&path).unwrap();
            } else {
                RgbImage::new(4, 4).save(&path).unwrap();
            }
        }
    }

    #[test]
    fn manifest_paths() {
        let manifest = TextureManifest::new("/tmp/desk");
        assert_eq!(
            manifest.path(TextureSlot::Wood),
            PathBuf::from("/tmp/desk/black-wood.jpg")
        );
        assert_eq!(TextureManifest::default().root(), Path::new("assets"));
    }

    #[test]
    fn load_all_in_slot_order() {
        let dir = tempfile::tempdir().unwrap();
        write_all_slots(dir.path());

        let textures = TextureManifest::new(dir.path()).load_all().unwrap();
        assert_eq!(textures.len(), TextureSlot::COUNT);
        assert_eq!(
            textures[TextureSlot::BatteryBody.index()].format,
            PixelFormat::Rgba8
        );
        assert_eq!(textures[TextureSlot::Wood.index()].format, PixelFormat::Rgb8);
    }

    #[test]
    fn missing_texture_aborts_load() {
        let dir = tempfile::tempdir().unwrap();
        write_all_slots(dir.path());
        std::fs::remove_file(dir.path().join("Chrome.jpg")).unwrap();

        let err = TextureManifest::new(dir.path()).load_all().unwrap_err();
        assert!(err.to_string().contains("Chrome.jpg"));
    }

    #[test]
    fn unsupported_channels_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        write_all_slots(dir.path());
        GrayImage::new(4, 4)
            .save(dir.path().join("white_plastic.png"))
            .unwrap();

        let err = TextureManifest::new(dir.path())
            .load(TextureSlot::TapeSide)
            .unwrap_err();
        match err {
            AssetError::Texture { source, .. } => assert!(matches!(
                *source,
                AssetError::UnsupportedChannels { channels: 1, .. }
            )),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("assets"));
    }
}
