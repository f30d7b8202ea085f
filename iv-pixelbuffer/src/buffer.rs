//! Read-only pixel buffer access.
//!
//! Stride values in this API are measured in **pixels**, not bytes. To locate a
//! pixel:
//!
//! ```text
//! byte_offset = (y * stride + x) * bytes_per_pixel
//! ```

use crate::PixelFormat;

/// Read-only access to a decoded pixel buffer.
///
/// # Example
///
/// ```
/// use iv_pixelbuffer::{PixelBuffer, PixelFormat, SourceImage};
///
/// let image = SourceImage::new(4, 2, PixelFormat::Gray8, (0..8).collect()).unwrap();
/// assert_eq!(image.stride(), 4);
/// assert_eq!(image.pixel(1, 1), &[5]);
/// assert_eq!(image.rgba_at(3, 0), [3, 3, 3, 255]);
/// ```
pub trait PixelBuffer {
    /// Returns the dimensions of the buffer as (width, height).
    fn dimensions(&self) -> (u32, u32);

    /// Returns the pixel format used by this buffer.
    fn pixel_format(&self) -> &PixelFormat;

    /// Row stride in pixels.
    fn stride(&self) -> usize;

    /// Raw bytes of the whole buffer, row-major.
    fn data(&self) -> &[u8];

    /// Returns the raw bytes of the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the buffer.
    fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let bpp = self.pixel_format().bytes_per_pixel() as usize;
        let offset = (y as usize * self.stride() + x as usize) * bpp;
        &self.data()[offset..offset + bpp]
    }

    /// Returns the pixel at (x, y) expanded to `[R, G, B, A]`.
    fn rgba_at(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixel_format().to_rgba8(self.pixel(x, y))
    }
}
