//! Pixel buffer types and image loading.
//!
//! This crate describes decoded pixel data for the viewer: the [`PixelFormat`] of a
//! buffer, the read-only [`PixelBuffer`] trait, and [`SourceImage`], the immutable
//! decoded image the viewport renders from.

pub mod buffer;
pub mod format;
pub mod source;

pub use buffer::PixelBuffer;
pub use format::PixelFormat;
pub use source::{ImageLoadError, SourceImage};
