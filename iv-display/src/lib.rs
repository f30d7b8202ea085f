//! # iv-display: viewport transform engine
//!
//! This crate maps a window onto a sub-rectangle of a decoded image and presents the
//! result. It is split into a headless part and a windowed part:
//!
//! - [`Viewport`] holds the [`ViewportState`] (window size, power-of-two zoom, pan
//!   origin, [`FlipMode`], fit-to-window) and applies resize, zoom, flip and fit
//!   transitions to it.
//! - [`compose_frame`] / [`compose_into`] turn an image plus a state into an RGBA frame.
//! - [`DisplayRenderer`] binds both to a winit window and a `pixels` surface.
//!
//! ## Example
//!
//! ```rust
//! use iv_display::{compose_frame, CompositeOptions, Viewport, ViewportConfig};
//! use iv_pixelbuffer::{PixelFormat, SourceImage};
//!
//! let image = SourceImage::new(4, 4, PixelFormat::Gray8, vec![0; 16]).unwrap();
//! let mut viewport = Viewport::new(ViewportConfig::default(), 4, 4, 8, 8);
//! viewport.set_zoomed_area(4, 4, 2).unwrap();
//!
//! let frame = compose_frame(&image, viewport.state(), &CompositeOptions::default());
//! assert_eq!(frame.len(), 8 * 8 * 4);
//! ```

mod compositor;
mod error;
mod flip;
mod monitor;
mod renderer;
mod scaling;
mod viewport;

pub use compositor::{compose_frame, compose_into, frame_len, CompositeOptions, FRAME_BYTES_PER_PIXEL};
pub use error::DisplayError;
pub use flip::{FlipAxes, FlipMode};
pub use monitor::{initial_window_size, MonitorInfo};
pub use renderer::{DisplayRenderer, DisplayRendererBuilder, DEFAULT_MAX_INITIAL_SIZE};
pub use scaling::{ScaleFilter, ScaleParams};
pub use viewport::{Viewport, ViewportConfig, ViewportState, DEFAULT_MAX_ZOOM};

// Re-export commonly needed types from dependencies
pub use winit::{
    event::{Event, WindowEvent},
    event_loop::{EventLoop, EventLoopWindowTarget},
    window::Window,
};

/// Common result type for display operations
pub type DisplayResult<T> = Result<T, DisplayError>;
