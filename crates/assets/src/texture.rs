use crate::AssetError;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader, RgbaImage};
use std::path::Path;

/// Source layout of a decoded texture, picked from the image's channel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// A decoded image with rows flipped so the first row is the bottom of the picture.
#[derive(Debug, Clone)]
pub struct DecodedTexture {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub pixels: Vec<u8>,
}

impl DecodedTexture {
    /// Decode an image file. The format is sniffed from the content.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let image = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|source| AssetError::Decode {
                name: name.clone(),
                source,
            })?;
        Self::from_image(name, image)
    }

    /// Accepts 3- and 4-channel images. Deeper samples are reduced to 8 bits.
    pub fn from_image(name: impl Into<String>, image: DynamicImage) -> Result<Self, AssetError> {
        let name = name.into();
        let channels = image.color().channel_count();
        let format = match channels {
            3 => PixelFormat::Rgb8,
            4 => PixelFormat::Rgba8,
            _ => return Err(AssetError::UnsupportedChannels { name, channels }),
        };

        let image = image.flipv();
        let (width, height) = (image.width(), image.height());
        let pixels = match format {
            PixelFormat::Rgb8 => image.into_rgb8().into_raw(),
            PixelFormat::Rgba8 => image.into_rgba8().into_raw(),
        };

        tracing::debug!(%name, width, height, ?format, "decoded texture");
        Ok(Self {
            name,
            width,
            height,
            format,
            pixels,
        })
    }

    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.format.channels()
    }

    /// Expand to RGBA8, alpha 255 for RGB sources.
    pub fn to_rgba8(&self) -> RgbaImage {
        let rgba = match self.format {
            PixelFormat::Rgba8 => self.pixels.clone(),
            PixelFormat::Rgb8 => self
                .pixels
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], u8::MAX])
                .collect(),
        };
        // dimensions come from the decoded image, so the buffer always fits
        RgbaImage::from_raw(self.width, self.height, rgba).unwrap_or_default()
    }

    /// Number of levels down to 1x1.
    pub fn mip_level_count(&self) -> u32 {
        u32::BITS - self.width.max(self.height).max(1).leading_zeros()
    }

    /// Full mip chain in RGBA8, level 0 first. Each level halves the previous
    /// one with a linear filter.
    pub fn mip_chain(&self) -> Vec<RgbaImage> {
        let mut levels = Vec::with_capacity(self.mip_level_count() as usize);
        levels.push(self.to_rgba8());
        for level in 1..self.mip_level_count() {
            let w = (self.width >> level).max(1);
            let h = (self.height >> level).max(1);
            let next = imageops::resize(&levels[levels.len() - 1], w, h, FilterType::Triangle);
            levels.push(next);
        }
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, GrayImage, Rgb, RgbImage, Rgba};

    #[test]
    fn three_channels_select_rgb8() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(4, 2));
        let tex = DecodedTexture::from_image("rgb", img).unwrap();
        assert_eq!(tex.format, PixelFormat::Rgb8);
        assert_eq!(tex.pixels.len(), 4 * 2 * 3);
        assert_eq!(tex.row_bytes(), 12);
    }

    #[test]
    fn four_channels_select_rgba8() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(4, 2));
        let tex = DecodedTexture::from_image("rgba", img).unwrap();
        assert_eq!(tex.format, PixelFormat::Rgba8);
        assert_eq!(tex.pixels.len(), 4 * 2 * 4);
    }

    #[test]
    fn one_or_two_channels_are_reported() {
        let gray = DynamicImage::ImageLuma8(GrayImage::new(2, 2));
        match DecodedTexture::from_image("gray", gray) {
            Err(AssetError::UnsupportedChannels { channels, name }) => {
                assert_eq!(channels, 1);
                assert_eq!(name, "gray");
            }
            other => panic!("expected UnsupportedChannels, got {other:?}"),
        }

        let gray_alpha = DynamicImage::ImageLumaA8(GrayAlphaImage::new(2, 2));
        assert!(matches!(
            DecodedTexture::from_image("gray_alpha", gray_alpha),
            Err(AssetError::UnsupportedChannels { channels: 2, .. })
        ));
    }

    #[test]
    fn rows_are_flipped() {
        let mut img = RgbImage::new(1, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        let tex = DecodedTexture::from_image("flip", DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(&tex.pixels[..3], &[0, 0, 255]);
        assert_eq!(&tex.pixels[3..], &[255, 0, 0]);
    }

    #[test]
    fn rgb_expands_with_opaque_alpha() {
        let mut img = RgbImage::new(1, 1);
        img.put_pixel(0, 0, Rgb([10, 20, 30]));
        let tex = DecodedTexture::from_image("px", DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(*tex.to_rgba8().get_pixel(0, 0), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn mip_chain_halves_down_to_one_pixel() {
        let tex =
            DecodedTexture::from_image("mips", DynamicImage::ImageRgba8(RgbaImage::new(8, 4)))
                .unwrap();
        assert_eq!(tex.mip_level_count(), 4);
        let sizes: Vec<_> = tex.mip_chain().iter().map(|l| l.dimensions()).collect();
        assert_eq!(sizes, vec![(8, 4), (4, 2), (2, 1), (1, 1)]);
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.png");
        RgbaImage::from_pixel(3, 5, Rgba([1, 2, 3, 4])).save(&path).unwrap();

        let tex = DecodedTexture::load(&path).unwrap();
        assert_eq!((tex.width, tex.height), (3, 5));
        assert_eq!(tex.format, PixelFormat::Rgba8);
        assert_eq!(tex.mip_level_count(), 3);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DecodedTexture::load(dir.path().join("nope.jpg")).unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }
}
