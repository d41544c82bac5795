//! Decoding selected files into preview images for the renderer.

use std::path::{Path, PathBuf};

use egui::ColorImage;
use image::DynamicImage;

/// Decoded preview ready to upload as a texture.
#[derive(Clone, Debug)]
pub struct ImagePreview {
    /// Pixels, downscaled to the configured maximum edge.
    pub image: ColorImage,
    /// Dimensions of the original file.
    pub source_size: [u32; 2],
}

impl ImagePreview {
    /// Preview pixel size as `[width, height]`.
    pub fn size(&self) -> [usize; 2] {
        self.image.size
    }
}

/// Reasons a selected file cannot be previewed.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The bytes are not an image format we can decode.
    #[error("Unsupported or corrupt image {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Read and decode `path`, scaling it to fit within `max_dimension`.
pub fn load_preview(path: &Path, max_dimension: u32) -> Result<ImagePreview, PreviewError> {
    let bytes = std::fs::read(path).map_err(|source| PreviewError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_preview(&bytes, max_dimension).map_err(|source| PreviewError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode in-memory bytes, guessing the format from their content.
pub fn decode_preview(bytes: &[u8], max_dimension: u32) -> Result<ImagePreview, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let source_size = [decoded.width(), decoded.height()];
    let fitted = fit_within(decoded, max_dimension);
    let rgba = fitted.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ImagePreview {
        image: ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()),
        source_size,
    })
}

fn fit_within(image: DynamicImage, max_dimension: u32) -> DynamicImage {
    if image.width() <= max_dimension && image.height() <= max_dimension {
        return image;
    }
    image.thumbnail(max_dimension, max_dimension)
}

/// File extensions offered by the picker and accepted on drop.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "ico",
];

/// Whether `path` has one of [`IMAGE_EXTENSIONS`], case-insensitively.
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn small_images_keep_their_size() {
        let preview = decode_preview(&png_bytes(8, 4), 64).unwrap();
        assert_eq!(preview.size(), [8, 4]);
        assert_eq!(preview.source_size, [8, 4]);
        assert_eq!(preview.image.pixels[0], egui::Color32::from_rgb(200, 10, 10));
    }

    #[test]
    fn large_images_are_downscaled_preserving_aspect() {
        let preview = decode_preview(&png_bytes(400, 200), 100).unwrap();
        assert_eq!(preview.size(), [100, 50]);
        assert_eq!(preview.source_size, [400, 200]);
    }

    #[test]
    fn non_image_bytes_fail_to_decode() {
        assert!(decode_preview(b"definitely not an image", 64).is_err());
    }

    #[test]
    fn load_preview_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_preview(&dir.path().join("missing.png"), 64).unwrap_err();
        assert!(matches!(err, PreviewError::Read { .. }));
    }

    #[test]
    fn recognizes_image_extensions() {
        assert!(has_image_extension(Path::new("scan.PNG")));
        assert!(has_image_extension(Path::new("dir/xray.jpeg")));
        assert!(!has_image_extension(Path::new("notes.txt")));
        assert!(!has_image_extension(Path::new("no_extension")));
    }
}
