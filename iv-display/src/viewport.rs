//! Viewport state and the zoom/pan/flip transform engine.
//!
//! The viewport maps window coordinates onto a rectangle of the source image. At zoom
//! factor 1 the whole image is visible. At zoom factor `z` (a power of two) the
//! visible rectangle is `W/z × H/z` source pixels, positioned by the zoomed origin.
//!
//! All coordinates stored here are in *oriented* image space, i.e. the image as it
//! appears after the active flip. The compositor reflects them back to source pixels.
//!
//! Zooming is incremental: [`Viewport::set_zoomed_area`] finds the image point under
//! the cursor using the *current* mapping, then positions the new rectangle so that
//! this point stays under the cursor. Callers that want factor 8 from factor 1 step
//! through 2 and 4, the way repeated wheel notches do.

use crate::{DisplayError, FlipMode, ScaleParams};
use iv_common::{Rect, RectF};
use std::fmt;
use tracing::{debug, trace};

/// Default maximum zoom factor.
pub const DEFAULT_MAX_ZOOM: u32 = 16;

/// Configuration for viewport behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportConfig {
    /// Maximum zoom factor (power of two, at least 1)
    pub max_zoom: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

impl ViewportConfig {
    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<(), DisplayError> {
        if !self.max_zoom.is_power_of_two() {
            return Err(DisplayError::InvalidArgument(format!(
                "maximum zoom factor {} is not a power of two",
                self.max_zoom
            )));
        }
        Ok(())
    }
}

/// Current view state: window size, zoom, pan origin and orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    /// Window dimensions in pixels
    pub window_width: u32,
    pub window_height: u32,
    /// Source image dimensions in pixels
    pub image_width: u32,
    pub image_height: u32,
    /// Power-of-two magnification, 1 shows the whole image
    pub zoom_factor: u32,
    /// Top-left of the visible rectangle in oriented image space
    pub zoomed_origin_x: f64,
    pub zoomed_origin_y: f64,
    /// Active orientation
    pub flip_mode: FlipMode,
    /// Whole image stretched over the whole window
    pub fit_to_window: bool,
}

impl ViewportState {
    /// Initial state: zoom 1, no flip, bound to the given window size.
    pub fn new(image_width: u32, image_height: u32, window_width: u32, window_height: u32) -> Self {
        Self {
            window_width,
            window_height,
            image_width,
            image_height,
            zoom_factor: 1,
            zoomed_origin_x: 0.0,
            zoomed_origin_y: 0.0,
            flip_mode: FlipMode::None,
            fit_to_window: false,
        }
    }

    /// Scale parameters from the visible rectangle onto the whole window.
    pub fn scale_params(&self) -> ScaleParams {
        let visible = self.visible_rect();
        ScaleParams::fill(
            visible.width,
            visible.height,
            self.window_width,
            self.window_height,
        )
    }

    /// Window area the visible rectangle is drawn into: the whole window, or an empty
    /// rectangle while the window has no area.
    pub fn destination_rect(&self) -> Rect {
        self.scale_params().dest_rect()
    }

    /// The whole image in image space.
    pub fn image_rect(&self) -> RectF {
        RectF::new(0.0, 0.0, self.image_width as f64, self.image_height as f64)
    }

    /// Size of the visible rectangle at the current zoom factor.
    pub fn visible_size(&self) -> (f64, f64) {
        let zoom = self.zoom_factor.max(1) as f64;
        (
            self.image_width as f64 / zoom,
            self.image_height as f64 / zoom,
        )
    }

    /// Region of the oriented image currently stretched over the window.
    pub fn visible_rect(&self) -> RectF {
        if self.fit_to_window || self.zoom_factor <= 1 {
            return self.image_rect();
        }
        let (width, height) = self.visible_size();
        RectF::new(self.zoomed_origin_x, self.zoomed_origin_y, width, height)
    }

    /// Convert window coordinates to oriented image coordinates.
    ///
    /// Points outside the window extrapolate linearly. With an empty window the center
    /// of the visible rectangle is returned.
    pub fn window_to_image(&self, x: f64, y: f64) -> (f64, f64) {
        let params = self.scale_params();
        let visible = self.visible_rect();
        if params.dest_rect().is_empty() {
            return visible.center();
        }

        (visible.x + x / params.scale_x, visible.y + y / params.scale_y)
    }
}

impl fmt::Display for ViewportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Viewport(win={}x{}, img={}x{}, zoom={}, origin={:.1},{:.1}, flip={}, fit={})",
            self.window_width,
            self.window_height,
            self.image_width,
            self.image_height,
            self.zoom_factor,
            self.zoomed_origin_x,
            self.zoomed_origin_y,
            self.flip_mode,
            self.fit_to_window
        )
    }
}

/// Viewport manager applying input-driven transitions to a [`ViewportState`]
#[derive(Debug, Clone)]
pub struct Viewport {
    config: ViewportConfig,
    state: ViewportState,
}

impl Viewport {
    /// Create a viewport for an image of the given size shown in a window of the
    /// given size.
    pub fn new(
        config: ViewportConfig,
        image_width: u32,
        image_height: u32,
        window_width: u32,
        window_height: u32,
    ) -> Self {
        debug!(
            "Creating viewport for {}x{} image in {}x{} window (max zoom {})",
            image_width, image_height, window_width, window_height, config.max_zoom
        );
        Self {
            config,
            state: ViewportState::new(image_width, image_height, window_width, window_height),
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Get the current viewport state
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn zoom_factor(&self) -> u32 {
        self.state.zoom_factor
    }

    pub fn flip_mode(&self) -> FlipMode {
        self.state.flip_mode
    }

    pub fn is_fit_to_window(&self) -> bool {
        self.state.fit_to_window
    }

    pub fn visible_rect(&self) -> RectF {
        self.state.visible_rect()
    }

    /// Set the window size (called on window resize). Resets zoom to 1.
    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        debug!("Viewport window size changed to {}x{}", width, height);
        self.state.window_width = width;
        self.state.window_height = height;
        self.reset_zoom();
    }

    /// Store a new orientation. Resets zoom to 1.
    pub fn set_flipping_mode(&mut self, mode: FlipMode) {
        debug!("Flip mode changed from {} to {}", self.state.flip_mode, mode);
        self.state.flip_mode = mode;
        self.reset_zoom();
    }

    /// Show the whole image stretched over the whole window. Resets zoom to 1.
    pub fn scale_image(&mut self) {
        debug!(
            "Scaling {}x{} image to fit {}x{} window",
            self.state.image_width,
            self.state.image_height,
            self.state.window_width,
            self.state.window_height
        );
        self.reset_zoom();
        self.state.fit_to_window = true;
    }

    /// Zoom to `zoom_factor` around the window position (`x`, `y`).
    ///
    /// The image point under the cursor is taken from the current mapping and kept
    /// under the cursor in the new one; the resulting origin is clamped so the visible
    /// rectangle stays inside the image. Any factor above 1 leaves fit-to-window mode.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::InvalidArgument`] if `zoom_factor` is not a power of two
    /// in `1..=max_zoom`. The state is left untouched in that case.
    pub fn set_zoomed_area(&mut self, x: i32, y: i32, zoom_factor: u32) -> Result<(), DisplayError> {
        self.validate_zoom(zoom_factor)?;

        let (cursor_x, cursor_y) = (x as f64, y as f64);
        let (anchor_x, anchor_y) = self.state.window_to_image(cursor_x, cursor_y);

        if zoom_factor == 1 {
            self.state.zoom_factor = 1;
            self.state.zoomed_origin_x = 0.0;
            self.state.zoomed_origin_y = 0.0;
            trace!("Zoom reset at ({}, {}): {}", x, y, self.state);
            return Ok(());
        }

        self.state.zoom_factor = zoom_factor;
        self.state.fit_to_window = false;

        let (visible_width, visible_height) = self.state.visible_size();
        let (window_width, window_height) = (self.state.window_width, self.state.window_height);
        let (origin_x, origin_y) = if window_width == 0 || window_height == 0 {
            (
                anchor_x - visible_width / 2.0,
                anchor_y - visible_height / 2.0,
            )
        } else {
            let u = cursor_x / window_width as f64;
            let v = cursor_y / window_height as f64;
            (anchor_x - u * visible_width, anchor_y - v * visible_height)
        };

        let max_x = self.state.image_width as f64 - visible_width;
        let max_y = self.state.image_height as f64 - visible_height;
        self.state.zoomed_origin_x = origin_x.clamp(0.0, max_x);
        self.state.zoomed_origin_y = origin_y.clamp(0.0, max_y);

        debug!(
            "Zoomed to x{} at ({}, {}), anchor ({:.1}, {:.1})",
            zoom_factor, x, y, anchor_x, anchor_y
        );
        trace!("{}", self.state);
        Ok(())
    }

    /// Zoom factor one wheel notch in, clamped at the maximum.
    pub fn zoom_in_factor(&self) -> u32 {
        self.state
            .zoom_factor
            .saturating_mul(2)
            .min(self.config.max_zoom)
    }

    /// Zoom factor one wheel notch out, clamped at 1.
    pub fn zoom_out_factor(&self) -> u32 {
        (self.state.zoom_factor / 2).max(1)
    }

    /// Check that `zoom_factor` is a power of two between 1 and the configured maximum.
    pub fn validate_zoom(&self, zoom_factor: u32) -> Result<(), DisplayError> {
        if !zoom_factor.is_power_of_two() {
            return Err(DisplayError::InvalidArgument(format!(
                "zoom factor {zoom_factor} is not a power of two"
            )));
        }
        if zoom_factor > self.config.max_zoom {
            return Err(DisplayError::InvalidArgument(format!(
                "zoom factor {} exceeds maximum {}",
                zoom_factor, self.config.max_zoom
            )));
        }
        Ok(())
    }

    fn reset_zoom(&mut self) {
        self.state.zoom_factor = 1;
        self.state.zoomed_origin_x = 0.0;
        self.state.zoomed_origin_y = 0.0;
    }
}
