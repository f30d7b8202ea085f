//! The decoded source image and the image-loading entry point.
//!
//! [`SourceImage`] is loaded once at startup and never modified afterwards: every
//! view transformation (zoom, flip, scale) is applied while compositing.

use crate::{PixelBuffer, PixelFormat};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or wrapping decoded image data.
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("failed to load image file '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image '{0}' has no pixels")]
    Empty(PathBuf),

    #[error("invalid pixel data: expected {expected} bytes for {width}x{height} {format}, got {actual}")]
    InvalidBuffer {
        width: u32,
        height: u32,
        format: PixelFormat,
        expected: usize,
        actual: usize,
    },
}

/// An immutable decoded image.
///
/// Pixels are stored row-major without padding, so the stride equals the width.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl SourceImage {
    /// Wraps already decoded pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`ImageLoadError::InvalidBuffer`] if `data` is not exactly
    /// `width * height * bytes_per_pixel` bytes long.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, ImageLoadError> {
        let expected = width as usize * height as usize * format.bytes_per_pixel() as usize;
        if data.len() != expected {
            return Err(ImageLoadError::InvalidBuffer {
                width,
                height,
                format,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Decodes the image file at `path`.
    ///
    /// The format is detected by the decoder; JPEG, PNG, TIFF, BMP and GIF (first
    /// frame) are supported.
    ///
    /// # Errors
    ///
    /// Returns [`ImageLoadError::Decode`] naming the file and the decoder's reason, or
    /// [`ImageLoadError::Empty`] for a zero-sized image.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ImageLoadError> {
        let path = path.as_ref();
        debug!("Loading image from {}", path.display());

        let decoded = image::open(path).map_err(|source| ImageLoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        if decoded.width() == 0 || decoded.height() == 0 {
            return Err(ImageLoadError::Empty(path.to_path_buf()));
        }

        let image = Self::from_dynamic(decoded);
        debug!(
            "Loaded {}x{} image ({})",
            image.width, image.height, image.format
        );
        Ok(image)
    }

    /// Takes ownership of a decoded image, keeping 8-bit layouts as they are and
    /// converting anything else to RGBA.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let (format, data) = match image {
            DynamicImage::ImageLuma8(buf) => (PixelFormat::Gray8, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (PixelFormat::GrayAlpha8, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (PixelFormat::Rgb8, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (PixelFormat::Rgba8, buf.into_raw()),
            other => {
                debug!("Converting {:?} pixels to RGBA", other.color());
                (PixelFormat::Rgba8, other.into_rgba8().into_raw())
            }
        };

        Self {
            width,
            height,
            format,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl PixelBuffer for SourceImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixel_format(&self) -> &PixelFormat {
        &self.format
    }

    fn stride(&self) -> usize {
        self.width as usize
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_length() {
        let err = SourceImage::new(2, 2, PixelFormat::Rgb8, vec![0; 11]).unwrap_err();
        match err {
            ImageLoadError::InvalidBuffer {
                expected, actual, ..
            } => {
                assert_eq!(expected, 12);
                assert_eq!(actual, 11);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_pixel_access() {
        let data: Vec<u8> = (0..24).collect();
        let image = SourceImage::new(3, 2, PixelFormat::Rgba8, data).unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.pixel(0, 0), &[0, 1, 2, 3]);
        assert_eq!(image.pixel(2, 1), &[20, 21, 22, 23]);
        assert_eq!(image.rgba_at(1, 1), [16, 17, 18, 19]);
    }

    #[test]
    fn test_from_dynamic_keeps_layout() {
        let gray = image::GrayImage::from_pixel(5, 3, image::Luma([42]));
        let image = SourceImage::from_dynamic(DynamicImage::ImageLuma8(gray));
        assert_eq!(image.dimensions(), (5, 3));
        assert_eq!(*image.pixel_format(), PixelFormat::Gray8);
        assert_eq!(image.rgba_at(4, 2), [42, 42, 42, 255]);
    }

    #[test]
    fn test_from_dynamic_converts_wide_formats() {
        let wide = image::ImageBuffer::from_pixel(2, 2, image::Rgb([0u16, 65535, 0]));
        let image = SourceImage::from_dynamic(DynamicImage::ImageRgb16(wide));
        assert_eq!(*image.pixel_format(), PixelFormat::Rgba8);
        assert_eq!(image.rgba_at(1, 1), [0, 255, 0, 255]);
    }
}
