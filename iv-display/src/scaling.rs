//! Scaling of the visible image region onto the window.
//!
//! The visible region is always stretched to exactly cover the window, independently
//! per axis. Resampling uses a [`ScaleFilter`].

use iv_common::Rect;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Filtering options for scaling operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleFilter {
    /// Nearest neighbor filtering (sharp, pixelated)
    #[default]
    Nearest,
    /// Bilinear filtering (smooth, blurred)
    Linear,
}

impl fmt::Display for ScaleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => write!(f, "Nearest"),
            Self::Linear => write!(f, "Linear"),
        }
    }
}

impl FromStr for ScaleFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "linear" | "bilinear" => Ok(Self::Linear),
            other => Err(format!("unknown scale filter '{other}'")),
        }
    }
}

/// Scale calculation results
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleParams {
    /// Window pixels per source pixel along X
    pub scale_x: f64,
    /// Window pixels per source pixel along Y
    pub scale_y: f64,
    /// Destination width in pixels
    pub dest_width: u32,
    /// Destination height in pixels
    pub dest_height: u32,
}

impl ScaleParams {
    /// Parameters that draw nothing (degenerate source or window).
    pub fn empty() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            dest_width: 0,
            dest_height: 0,
        }
    }

    /// Stretch a `src_width × src_height` region over the whole window.
    ///
    /// The source size is fractional because zoomed regions need not align to pixels.
    pub fn fill(src_width: f64, src_height: f64, window_width: u32, window_height: u32) -> Self {
        if src_width <= 0.0 || src_height <= 0.0 || window_width == 0 || window_height == 0 {
            warn!(
                "Invalid dimensions for fill scaling: {}x{} into {}x{}",
                src_width, src_height, window_width, window_height
            );
            return Self::empty();
        }

        Self {
            scale_x: window_width as f64 / src_width,
            scale_y: window_height as f64 / src_height,
            dest_width: window_width,
            dest_height: window_height,
        }
    }

    /// Window area covered by the scaled image.
    pub fn dest_rect(&self) -> Rect {
        Rect::new(0, 0, self.dest_width, self.dest_height)
    }
}
