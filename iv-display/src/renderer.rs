//! Window and presentation surface for the viewport engine.
//!
//! The `DisplayRenderer` owns the decoded image, the [`Viewport`] state machine, the
//! winit window and a `pixels` surface whose buffer always matches the window size.
//! Each [`DisplayRenderer::draw_image`] composites the visible image region into that
//! buffer and presents it.

use iv_pixelbuffer::{PixelBuffer, SourceImage};
use pixels::{Pixels, SurfaceTexture};
use std::time::Instant;
use tracing::{debug, info, trace};
use winit::{
    dpi::PhysicalSize,
    event_loop::EventLoopWindowTarget,
    window::{Window, WindowBuilder},
};

use crate::compositor::{compose_into, CompositeOptions};
use crate::monitor::{initial_window_size, MonitorInfo};
use crate::{DisplayError, DisplayResult, FlipMode, ScaleFilter, Viewport, ViewportConfig};

/// Default upper bound for the initial window size.
pub const DEFAULT_MAX_INITIAL_SIZE: (u32, u32) = (1600, 1000);

/// Builder for configuring a DisplayRenderer
#[derive(Debug, Clone)]
pub struct DisplayRendererBuilder {
    viewport_config: ViewportConfig,
    composite: CompositeOptions,
    max_initial_size: (u32, u32),
}

impl Default for DisplayRendererBuilder {
    fn default() -> Self {
        Self {
            viewport_config: ViewportConfig::default(),
            composite: CompositeOptions::default(),
            max_initial_size: DEFAULT_MAX_INITIAL_SIZE,
        }
    }
}

impl DisplayRendererBuilder {
    /// Set viewport configuration
    pub fn viewport_config(mut self, config: ViewportConfig) -> Self {
        self.viewport_config = config;
        self
    }

    /// Set the resampling filter
    pub fn filter(mut self, filter: ScaleFilter) -> Self {
        self.composite.filter = filter;
        self
    }

    /// Set the color shown under transparent pixels
    pub fn background(mut self, rgb: [u8; 3]) -> Self {
        self.composite.background = rgb;
        self
    }

    /// Set the largest window size used when opening the window
    pub fn max_initial_size(mut self, width: u32, height: u32) -> Self {
        self.max_initial_size = (width, height);
        self
    }

    /// Create the window and presentation surface for `image`.
    ///
    /// # Errors
    ///
    /// Fails if the viewport configuration is invalid, the window cannot be created or
    /// the `pixels` surface cannot be initialized.
    pub fn build<T: 'static>(
        self,
        event_loop: &EventLoopWindowTarget<T>,
        title: &str,
        image: SourceImage,
    ) -> DisplayResult<DisplayRenderer> {
        DisplayRenderer::initialize(event_loop, title, image, self)
    }
}

/// Viewport engine bound to a window: owns the image, the view state and the surface.
pub struct DisplayRenderer {
    /// The pixels surface for rendering; dropped before the window it draws into
    pixels: Pixels,
    /// Window being rendered to
    window: Window,
    /// View state machine
    viewport: Viewport,
    /// Decoded source image, never modified
    image: SourceImage,
    /// Filter and background used when compositing
    composite: CompositeOptions,
    /// Performance statistics
    frame_count: u64,
    last_fps_update: Instant,
}

impl DisplayRenderer {
    /// Create a new DisplayRenderer builder
    pub fn builder() -> DisplayRendererBuilder {
        DisplayRendererBuilder::default()
    }

    fn initialize<T: 'static>(
        event_loop: &EventLoopWindowTarget<T>,
        title: &str,
        image: SourceImage,
        config: DisplayRendererBuilder,
    ) -> DisplayResult<Self> {
        config.viewport_config.validate()?;

        let (image_width, image_height) = image.dimensions();
        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
            .map(|handle| MonitorInfo::from_monitor_handle(&handle));
        let initial_size = initial_window_size(
            (image_width, image_height),
            config.max_initial_size,
            monitor.as_ref(),
        );

        let mut window_builder = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(initial_size)
            .with_min_inner_size(PhysicalSize::new(1, 1));
        if let Some(monitor) = &monitor {
            window_builder =
                window_builder.with_position(monitor.center_window_position(initial_size));
        }
        let window = window_builder.build(event_loop)?;

        let window_size = window.inner_size();
        debug!(
            "Creating DisplayRenderer for window {}x{}",
            window_size.width, window_size.height
        );

        // pixels rejects zero-sized buffers; a minimized window is resized later.
        let (surface_width, surface_height) =
            (window_size.width.max(1), window_size.height.max(1));
        let surface_texture = SurfaceTexture::new(surface_width, surface_height, &window);
        let pixels = Pixels::new(surface_width, surface_height, surface_texture)
            .map_err(DisplayError::Initialization)?;

        let viewport = Viewport::new(
            config.viewport_config,
            image_width,
            image_height,
            surface_width,
            surface_height,
        );

        info!(
            "Displaying {}x{} {} image in {}x{} window",
            image_width,
            image_height,
            image.pixel_format(),
            surface_width,
            surface_height
        );

        Ok(Self {
            pixels,
            window,
            viewport,
            image,
            composite: config.composite,
            frame_count: 0,
            last_fps_update: Instant::now(),
        })
    }

    /// Handle a window resize. Resets zoom to 1.
    ///
    /// Zero-sized (minimized) windows update the view state only; the surface keeps
    /// its previous size until the window is restored.
    pub fn set_dimensions(&mut self, width: u32, height: u32) -> DisplayResult<()> {
        self.viewport.set_dimensions(width, height);

        if width == 0 || height == 0 {
            debug!("Window minimized, keeping surface size");
            return Ok(());
        }

        self.pixels.resize_surface(width, height)?;
        self.pixels.resize_buffer(width, height)?;
        Ok(())
    }

    /// Store a new orientation. Resets zoom to 1.
    pub fn set_flipping_mode(&mut self, mode: FlipMode) {
        self.viewport.set_flipping_mode(mode);
    }

    /// Zoom around the window position (`x`, `y`).
    pub fn set_zoomed_area(&mut self, x: i32, y: i32, zoom_factor: u32) -> DisplayResult<()> {
        self.viewport.set_zoomed_area(x, y, zoom_factor)
    }

    /// Stretch the whole image over the whole window. Resets zoom to 1.
    pub fn scale_image(&mut self) {
        self.viewport.scale_image();
    }

    /// Composite the current view and present it.
    ///
    /// Reads the view state without changing it, so repeated calls present identical
    /// frames. Nothing is drawn while the window has no area.
    pub fn draw_image(&mut self) -> DisplayResult<()> {
        let state = self.viewport.state();
        if state.window_width == 0 || state.window_height == 0 {
            trace!("Skipping draw for empty window");
            return Ok(());
        }

        let frame = self.pixels.frame_mut();
        compose_into(&self.image, state, &self.composite, frame)?;
        self.pixels.render().map_err(DisplayError::Present)?;

        self.update_fps_stats();
        Ok(())
    }

    /// Get viewport reference for input handling
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Update FPS statistics for performance monitoring
    fn update_fps_stats(&mut self) {
        self.frame_count += 1;

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_update);

        if elapsed.as_secs() >= 1 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            debug!("Rendering FPS: {:.1}", fps);

            self.frame_count = 0;
            self.last_fps_update = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = DisplayRendererBuilder::default();
        assert_eq!(builder.viewport_config, ViewportConfig::default());
        assert_eq!(builder.composite.filter, ScaleFilter::Nearest);
        assert_eq!(builder.composite.background, [0, 0, 0]);
        assert_eq!(builder.max_initial_size, DEFAULT_MAX_INITIAL_SIZE);
    }

    #[test]
    fn test_builder_configuration() {
        let builder = DisplayRenderer::builder()
            .viewport_config(ViewportConfig { max_zoom: 8 })
            .filter(ScaleFilter::Linear)
            .background([10, 20, 30])
            .max_initial_size(640, 480);

        assert_eq!(builder.viewport_config.max_zoom, 8);
        assert_eq!(builder.composite.filter, ScaleFilter::Linear);
        assert_eq!(builder.composite.background, [10, 20, 30]);
        assert_eq!(builder.max_initial_size, (640, 480));
    }
}
