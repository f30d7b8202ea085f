//! Monitor queries and initial window placement.
//!
//! The viewer opens its window at the image's native size when that fits; larger
//! images are shrunk (aspect ratio preserved) to the configured maximum and to the
//! monitor the window will appear on.

use std::fmt;
use tracing::debug;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    monitor::MonitorHandle,
};

/// Information about a display monitor
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorInfo {
    /// Monitor name (if available)
    pub name: Option<String>,
    /// Physical position of monitor in desktop coordinate system
    pub position: PhysicalPosition<i32>,
    /// Physical size of monitor in pixels
    pub size: PhysicalSize<u32>,
    /// DPI scale factor for this monitor
    pub scale_factor: f64,
}

impl MonitorInfo {
    /// Create MonitorInfo from a winit MonitorHandle
    pub fn from_monitor_handle(monitor: &MonitorHandle) -> Self {
        let info = Self {
            name: monitor.name(),
            position: monitor.position(),
            size: monitor.size(),
            scale_factor: monitor.scale_factor(),
        };
        debug!("Monitor detected: {}", info);
        info
    }

    /// Calculate the position that centers a window of `window_size` on this monitor
    pub fn center_window_position(&self, window_size: PhysicalSize<u32>) -> PhysicalPosition<i32> {
        PhysicalPosition::new(
            self.position.x + (self.size.width as i32 - window_size.width as i32) / 2,
            self.position.y + (self.size.height as i32 - window_size.height as i32) / 2,
        )
    }
}

impl fmt::Display for MonitorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}x{} @{:.1}x",
            self.name.as_deref().unwrap_or("Unknown"),
            self.size.width,
            self.size.height,
            self.scale_factor
        )
    }
}

/// Window size to open for an image of `image_size`.
///
/// The image size is used as-is when it fits within `max_size` and the monitor;
/// otherwise it is scaled down uniformly until it does. Each side is at least 1.
pub fn initial_window_size(
    image_size: (u32, u32),
    max_size: (u32, u32),
    monitor: Option<&MonitorInfo>,
) -> PhysicalSize<u32> {
    let (image_width, image_height) = (image_size.0.max(1), image_size.1.max(1));
    let (mut bound_width, mut bound_height) = (max_size.0.max(1), max_size.1.max(1));
    if let Some(monitor) = monitor {
        if monitor.size.width > 0 && monitor.size.height > 0 {
            bound_width = bound_width.min(monitor.size.width);
            bound_height = bound_height.min(monitor.size.height);
        }
    }

    if image_width <= bound_width && image_height <= bound_height {
        return PhysicalSize::new(image_width, image_height);
    }

    let scale = (bound_width as f64 / image_width as f64)
        .min(bound_height as f64 / image_height as f64);
    let width = ((image_width as f64 * scale).round() as u32).clamp(1, bound_width);
    let height = ((image_height as f64 * scale).round() as u32).clamp(1, bound_height);
    debug!(
        "Shrinking initial window for {}x{} image to {}x{}",
        image_width, image_height, width, height
    );
    PhysicalSize::new(width, height)
}
