//! Frame composition: visible image region → RGBA window frame.
//!
//! Composition is a pure function of the source image and the [`ViewportState`]. Each
//! destination column and row is mapped to source coordinates once, flips are applied
//! by reflecting those coordinates, and the source buffer is only ever read.

use crate::{DisplayError, ScaleFilter, ViewportState};
use iv_pixelbuffer::PixelBuffer;
use tracing::trace;

/// Bytes per pixel of the presented frame (RGBA).
pub const FRAME_BYTES_PER_PIXEL: usize = 4;

/// Options applied while compositing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeOptions {
    /// Resampling filter
    pub filter: ScaleFilter,
    /// Color under transparent pixels, and of a window with nothing to draw
    pub background: [u8; 3],
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            filter: ScaleFilter::Nearest,
            background: [0, 0, 0],
        }
    }
}

/// Source indices feeding one destination column or row.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    near: u32,
    far: u32,
    /// Weight of `far`; zero for nearest-neighbour sampling.
    weight: f32,
}

/// Required frame length in bytes for the state's window size.
pub fn frame_len(state: &ViewportState) -> usize {
    state.window_width as usize * state.window_height as usize * FRAME_BYTES_PER_PIXEL
}

/// Render the current view into a newly allocated RGBA frame.
pub fn compose_frame<P: PixelBuffer>(
    image: &P,
    state: &ViewportState,
    options: &CompositeOptions,
) -> Vec<u8> {
    let mut frame = vec![0u8; frame_len(state)];
    // The buffer is sized from the same state, so composition cannot fail here.
    let _ = compose_into(image, state, options, &mut frame);
    frame
}

/// Render the current view into `frame`, an RGBA buffer of exactly the window size.
///
/// # Errors
///
/// Returns [`DisplayError::FrameSize`] if `frame` does not match the window size.
pub fn compose_into<P: PixelBuffer>(
    image: &P,
    state: &ViewportState,
    options: &CompositeOptions,
    frame: &mut [u8],
) -> Result<(), DisplayError> {
    let expected = frame_len(state);
    if frame.len() != expected {
        return Err(DisplayError::FrameSize {
            expected,
            actual: frame.len(),
        });
    }

    let (image_width, image_height) = image.dimensions();
    let params = state.scale_params();
    let dest = params.dest_rect();
    if dest.is_empty() || image_width == 0 || image_height == 0 {
        let [bg_r, bg_g, bg_b] = options.background;
        for pixel in frame.chunks_exact_mut(FRAME_BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&[bg_r, bg_g, bg_b, 0xFF]);
        }
        return Ok(());
    }

    let visible = state.visible_rect();
    let flip = state.flip_mode;
    let columns = sample_axis(
        dest.width,
        visible.x,
        1.0 / params.scale_x,
        image_width,
        options.filter,
        |x| flip.map_x(x, image_width),
    );
    let rows = sample_axis(
        dest.height,
        visible.y,
        1.0 / params.scale_y,
        image_height,
        options.filter,
        |y| flip.map_y(y, image_height),
    );

    trace!(
        "Compositing {:?} of {}x{} image into {:?} ({}, {})",
        visible,
        image_width,
        image_height,
        dest,
        options.filter,
        flip
    );

    let line_len = dest.width as usize * FRAME_BYTES_PER_PIXEL;
    for (row, line) in rows.iter().zip(frame.chunks_exact_mut(line_len)) {
        for (column, out) in columns
            .iter()
            .zip(line.chunks_exact_mut(FRAME_BYTES_PER_PIXEL))
        {
            let rgba = match options.filter {
                ScaleFilter::Nearest => image.rgba_at(column.near, row.near),
                ScaleFilter::Linear => sample_bilinear(image, column, row),
            };
            out.copy_from_slice(&over_background(rgba, options.background));
        }
    }

    Ok(())
}

/// Map each of `len` destination pixels onto source indices along one axis.
///
/// `start` is the visible span's origin in oriented image space and `step` the source
/// distance covered by one destination pixel; `reflect` maps the resulting oriented
/// indices back into source space.
fn sample_axis(
    len: u32,
    start: f64,
    step: f64,
    size: u32,
    filter: ScaleFilter,
    reflect: impl Fn(u32) -> u32,
) -> Vec<Tap> {
    let last = size.saturating_sub(1) as f64;
    let index = |pos: f64| -> u32 { reflect(pos.clamp(0.0, last) as u32) };

    (0..len)
        .map(|i| {
            let center = start + (i as f64 + 0.5) * step;
            match filter {
                ScaleFilter::Nearest => {
                    let near = index(center.floor());
                    Tap {
                        near,
                        far: near,
                        weight: 0.0,
                    }
                }
                ScaleFilter::Linear => {
                    let pos = center - 0.5;
                    let base = pos.floor();
                    Tap {
                        near: index(base),
                        far: index(base + 1.0),
                        weight: (pos - base) as f32,
                    }
                }
            }
        })
        .collect()
}

fn sample_bilinear<P: PixelBuffer>(image: &P, column: &Tap, row: &Tap) -> [u8; 4] {
    let top_left = image.rgba_at(column.near, row.near);
    let top_right = image.rgba_at(column.far, row.near);
    let bottom_left = image.rgba_at(column.near, row.far);
    let bottom_right = image.rgba_at(column.far, row.far);

    let (wx, wy) = (column.weight, row.weight);
    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = top_left[c] as f32 * (1.0 - wx) + top_right[c] as f32 * wx;
        let bottom = bottom_left[c] as f32 * (1.0 - wx) + bottom_right[c] as f32 * wx;
        out[c] = (top * (1.0 - wy) + bottom * wy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Blend a straight-alpha pixel over the opaque background.
fn over_background(rgba: [u8; 4], background: [u8; 3]) -> [u8; 4] {
    let alpha = rgba[3] as u32;
    if alpha == 0xFF {
        return [rgba[0], rgba[1], rgba[2], 0xFF];
    }

    let mix = |fg: u8, bg: u8| -> u8 {
        ((fg as u32 * alpha + bg as u32 * (0xFF - alpha) + 127) / 0xFF) as u8
    };
    [
        mix(rgba[0], background[0]),
        mix(rgba[1], background[1]),
        mix(rgba[2], background[2]),
        0xFF,
    ]
}
