//! Pixel format descriptions and conversion to RGBA.
//!
//! A decoded image keeps the channel layout the decoder produced, as long as it is
//! one of the 8-bit layouts below. Everything the compositor reads goes through
//! [`PixelFormat::to_rgba8()`], so the source buffer never has to be rewritten.
//!
//! # Example
//!
//! ```
//! use iv_pixelbuffer::PixelFormat;
//!
//! let pf = PixelFormat::GrayAlpha8;
//! assert_eq!(pf.bytes_per_pixel(), 2);
//! assert_eq!(pf.to_rgba8(&[0x40, 0x80]), [0x40, 0x40, 0x40, 0x80]);
//! ```

use std::fmt;

/// Channel layout of an 8-bit-per-channel pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Single luminance channel.
    Gray8,
    /// Luminance followed by alpha.
    GrayAlpha8,
    /// Red, green, blue.
    Rgb8,
    /// Red, green, blue, alpha.
    Rgba8,
}

impl PixelFormat {
    /// Returns the storage size of one pixel in bytes.
    pub const fn bytes_per_pixel(&self) -> u8 {
        match self {
            Self::Gray8 => 1,
            Self::GrayAlpha8 => 2,
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    /// Converts one pixel of this format to `[R, G, B, A]`.
    ///
    /// Formats without alpha produce `A = 255`.
    ///
    /// # Panics
    ///
    /// Panics if `pixel.len()` does not equal `self.bytes_per_pixel()`.
    ///
    /// # Example
    ///
    /// ```
    /// use iv_pixelbuffer::PixelFormat;
    ///
    /// assert_eq!(PixelFormat::Rgb8.to_rgba8(&[1, 2, 3]), [1, 2, 3, 255]);
    /// assert_eq!(PixelFormat::Gray8.to_rgba8(&[9]), [9, 9, 9, 255]);
    /// ```
    pub fn to_rgba8(&self, pixel: &[u8]) -> [u8; 4] {
        let bpp = self.bytes_per_pixel() as usize;
        assert_eq!(
            pixel.len(),
            bpp,
            "pixel length {} does not match bytes_per_pixel {}",
            pixel.len(),
            bpp
        );

        match self {
            Self::Gray8 => [pixel[0], pixel[0], pixel[0], 0xFF],
            Self::GrayAlpha8 => [pixel[0], pixel[0], pixel[0], pixel[1]],
            Self::Rgb8 => [pixel[0], pixel[1], pixel[2], 0xFF],
            Self::Rgba8 => [pixel[0], pixel[1], pixel[2], pixel[3]],
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gray8 => write!(f, "Gray8"),
            Self::GrayAlpha8 => write!(f, "GrayAlpha8"),
            Self::Rgb8 => write!(f, "Rgb8"),
            Self::Rgba8 => write!(f, "Rgba8"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(PixelFormat::Gray8.bytes_per_pixel(), 1);
        assert_eq!(PixelFormat::GrayAlpha8.bytes_per_pixel(), 2);
        assert_eq!(PixelFormat::Rgb8.bytes_per_pixel(), 3);
        assert_eq!(PixelFormat::Rgba8.bytes_per_pixel(), 4);
    }

    #[test]
    fn test_to_rgba8() {
        assert_eq!(PixelFormat::Rgba8.to_rgba8(&[10, 20, 30, 40]), [10, 20, 30, 40]);
        assert_eq!(PixelFormat::Rgb8.to_rgba8(&[10, 20, 30]), [10, 20, 30, 255]);
        assert_eq!(PixelFormat::GrayAlpha8.to_rgba8(&[77, 5]), [77, 77, 77, 5]);
    }

    #[test]
    #[should_panic(expected = "does not match bytes_per_pixel")]
    fn test_to_rgba8_wrong_length() {
        PixelFormat::Rgb8.to_rgba8(&[1, 2]);
    }

    #[test]
    fn test_display() {
        assert_eq!(PixelFormat::Rgba8.to_string(), "Rgba8");
        assert_eq!(PixelFormat::Gray8.to_string(), "Gray8");
    }
}
