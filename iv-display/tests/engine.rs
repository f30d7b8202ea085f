//! Viewport engine behaviour tests.
//!
//! Everything except the last test runs headless: the viewport state machine and the
//! compositor do not need a window system.

use iv_common::{Rect, RectF};
use iv_display::{
    compose_frame, CompositeOptions, FlipMode, ScaleFilter, Viewport, ViewportConfig,
    ViewportState, DEFAULT_MAX_ZOOM,
};
use iv_pixelbuffer::{PixelBuffer, PixelFormat, SourceImage};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const EPSILON: f64 = 1e-6;

fn patterned_image(width: u32, height: u32) -> SourceImage {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 200]);
        }
    }
    SourceImage::new(width, height, PixelFormat::Rgb8, data).unwrap()
}

fn expand_to_rgba(image: &SourceImage) -> Vec<u8> {
    image
        .data()
        .chunks_exact(3)
        .flat_map(|px| [px[0], px[1], px[2], 0xFF])
        .collect()
}

fn assert_within_image(state: &ViewportState) {
    let visible = state.visible_rect();
    let bounds = state.image_rect();
    assert!(
        visible.x >= -EPSILON && visible.y >= -EPSILON,
        "origin below zero: {}",
        state
    );
    assert!(
        visible.right() <= bounds.right() + EPSILON
            && visible.bottom() <= bounds.bottom() + EPSILON,
        "visible rectangle {:?} escapes image: {}",
        visible,
        state
    );
}

fn assert_rect_close(actual: RectF, expected: RectF) {
    let tolerance = EPSILON * expected.width.max(expected.height).max(1.0);
    assert!(
        (actual.x - expected.x).abs() <= tolerance
            && (actual.y - expected.y).abs() <= tolerance
            && (actual.width - expected.width).abs() <= tolerance
            && (actual.height - expected.height).abs() <= tolerance,
        "{:?} != {:?}",
        actual,
        expected
    );
}

#[test]
fn test_zoom_in_at_window_center() {
    let mut viewport = Viewport::new(ViewportConfig::default(), 800, 600, 400, 300);

    viewport.set_zoomed_area(200, 150, 2).unwrap();
    viewport.set_zoomed_area(200, 150, 4).unwrap();

    // The window center shows image point (400,300); see "Scenario 1" in DESIGN.md.
    let visible = viewport.visible_rect();
    assert_eq!(viewport.zoom_factor(), 4);
    assert_rect_close(visible, RectF::new(300.0, 225.0, 200.0, 150.0));
    assert_within_image(viewport.state());
}

#[test]
fn test_resize_while_zoomed_shows_full_image() {
    let image = patterned_image(800, 600);
    let mut viewport = Viewport::new(ViewportConfig::default(), 800, 600, 400, 300);
    viewport.set_zoomed_area(200, 150, 2).unwrap();
    viewport.set_zoomed_area(200, 150, 4).unwrap();

    viewport.set_dimensions(800, 600);

    assert_eq!(viewport.zoom_factor(), 1);
    assert_eq!(viewport.visible_rect(), RectF::new(0.0, 0.0, 800.0, 600.0));
    let frame = compose_frame(&image, viewport.state(), &CompositeOptions::default());
    assert!(frame == expand_to_rgba(&image), "frame differs from source image");
}

#[test]
fn test_scale_image_fills_window_and_keeps_flip() {
    let image = patterned_image(800, 600);
    let mut viewport = Viewport::new(ViewportConfig::default(), 800, 600, 500, 500);
    viewport.set_flipping_mode(FlipMode::Horizontal);
    viewport.set_zoomed_area(250, 250, 2).unwrap();

    viewport.scale_image();

    assert_eq!(viewport.zoom_factor(), 1);
    assert!(viewport.is_fit_to_window());
    assert_eq!(viewport.flip_mode(), FlipMode::Horizontal);
    assert_eq!(viewport.state().destination_rect(), Rect::new(0, 0, 500, 500));

    let background = [1, 2, 3];
    let options = CompositeOptions {
        background,
        ..CompositeOptions::default()
    };
    let frame = compose_frame(&image, viewport.state(), &options);
    assert!(frame
        .chunks_exact(4)
        .all(|px| px[..3] != background[..] && px[2] == 200));
    // Horizontally mirrored: the left edge shows the image's right edge.
    assert_eq!(frame[0], (799 % 256) as u8);
}

#[test]
fn test_draw_is_idempotent() {
    let image = patterned_image(300, 200);
    let mut viewport = Viewport::new(ViewportConfig::default(), 300, 200, 640, 480);
    viewport.set_flipping_mode(FlipMode::Both);
    viewport.set_zoomed_area(100, 300, 2).unwrap();
    viewport.set_zoomed_area(130, 310, 4).unwrap();

    for filter in [ScaleFilter::Nearest, ScaleFilter::Linear] {
        let options = CompositeOptions {
            filter,
            background: [30, 30, 30],
        };
        let before = viewport.state().clone();
        let first = compose_frame(&image, viewport.state(), &options);
        let second = compose_frame(&image, viewport.state(), &options);
        assert!(first == second, "frames differ with {filter} filter");
        assert_eq!(viewport.state(), &before);
    }
}

#[test]
fn test_flip_order_does_not_matter() {
    let image = patterned_image(64, 48);
    let options = CompositeOptions::default();
    let frame_for = |mode: FlipMode| {
        let mut state = ViewportState::new(64, 48, 128, 96);
        state.flip_mode = mode;
        compose_frame(&image, &state, &options)
    };

    let both = frame_for(FlipMode::Both);
    assert!(frame_for(FlipMode::Horizontal.then(FlipMode::Vertical)) == both);
    assert!(frame_for(FlipMode::Vertical.then(FlipMode::Horizontal)) == both);
    assert!(frame_for(FlipMode::None) != both);
}

#[test]
fn test_four_flip_toggles_restore_view() {
    let mut viewport = Viewport::new(ViewportConfig::default(), 64, 48, 64, 48);
    let initial = viewport.state().clone();

    for _ in 0..4 {
        viewport.set_zoomed_area(10, 10, 4).unwrap();
        let next = viewport.flip_mode().next();
        viewport.set_flipping_mode(next);
        assert_eq!(viewport.zoom_factor(), 1);
    }

    assert_eq!(viewport.state(), &initial);
}

#[test]
fn test_state_changes_reset_zoom() {
    let mut viewport = Viewport::new(ViewportConfig::default(), 1000, 1000, 500, 500);

    viewport.set_zoomed_area(100, 100, 8).unwrap();
    viewport.set_dimensions(600, 400);
    assert_eq!(viewport.zoom_factor(), 1);

    viewport.set_zoomed_area(100, 100, 8).unwrap();
    viewport.set_flipping_mode(FlipMode::Vertical);
    assert_eq!(viewport.zoom_factor(), 1);

    viewport.set_zoomed_area(100, 100, 8).unwrap();
    viewport.scale_image();
    assert_eq!(viewport.zoom_factor(), 1);
    assert_eq!(viewport.visible_rect(), RectF::new(0.0, 0.0, 1000.0, 1000.0));
}

#[test]
fn test_rejected_zoom_leaves_state_untouched() {
    let mut viewport = Viewport::new(ViewportConfig { max_zoom: 8 }, 640, 480, 640, 480);
    viewport.set_zoomed_area(320, 240, 2).unwrap();
    let before = viewport.state().clone();

    for factor in [0, 3, 6, 16, 1024] {
        let err = viewport.set_zoomed_area(320, 240, factor).unwrap_err();
        assert!(err.is_invalid_argument(), "{err}");
    }
    assert_eq!(viewport.state(), &before);
}

#[test]
fn test_zoomed_view_fills_window_for_any_aspect() {
    let image = patterned_image(8, 4);
    let mut viewport = Viewport::new(ViewportConfig::default(), 8, 4, 8, 8);
    viewport.set_zoomed_area(4, 4, 2).unwrap();

    assert_eq!(viewport.zoom_factor(), 2);
    assert_eq!(viewport.state().destination_rect(), Rect::new(0, 0, 8, 8));
    let options = CompositeOptions {
        background: [1, 2, 3],
        ..CompositeOptions::default()
    };
    let frame = compose_frame(&image, viewport.state(), &options);
    let background_pixels = frame
        .chunks_exact(4)
        .filter(|px| px[..3] == [1, 2, 3])
        .count();
    assert_eq!(background_pixels, 0);
}

#[derive(Debug, Clone)]
enum Op {
    Zoom { x: i32, y: i32, exponent: u32 },
    Resize { width: u32, height: u32 },
    Flip,
    Fit,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (-500i32..3000, -500i32..3000, 0u32..=4)
            .prop_map(|(x, y, exponent)| Op::Zoom { x, y, exponent }),
        1 => (0u32..2000, 0u32..2000).prop_map(|(width, height)| Op::Resize { width, height }),
        1 => Just(Op::Flip),
        1 => Just(Op::Fit),
    ]
}

proptest! {
    /// The visible rectangle stays inside the image whatever the input sequence.
    #[test]
    fn test_visible_rect_within_image(
        image_width in 1u32..3000,
        image_height in 1u32..3000,
        window_width in 1u32..2000,
        window_height in 1u32..2000,
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut viewport = Viewport::new(
            ViewportConfig::default(),
            image_width,
            image_height,
            window_width,
            window_height,
        );

        for op in ops {
            match op {
                Op::Zoom { x, y, exponent } => {
                    viewport.set_zoomed_area(x, y, 1 << exponent).unwrap();
                }
                Op::Resize { width, height } => viewport.set_dimensions(width, height),
                Op::Flip => {
                    let next = viewport.flip_mode().next();
                    viewport.set_flipping_mode(next);
                }
                Op::Fit => viewport.scale_image(),
            }

            let state = viewport.state();
            if state.window_width > 0 && state.window_height > 0 {
                prop_assert_eq!(
                    state.destination_rect(),
                    Rect::new(0, 0, state.window_width, state.window_height)
                );
            }
            prop_assert!(state.zoom_factor.is_power_of_two());
            prop_assert!(state.zoom_factor <= DEFAULT_MAX_ZOOM);
            if state.zoom_factor == 1 {
                prop_assert_eq!(state.visible_rect(), state.image_rect());
            }
            assert_within_image(state);
        }
    }

    /// Any power-of-two path at a fixed cursor inside the window ends in the same state
    /// as stepping up through each factor.
    #[test]
    fn test_zoom_path_independence(
        image_width in 1u32..3000,
        image_height in 1u32..3000,
        window_width in 1u32..2000,
        window_height in 1u32..2000,
        cursor_u in 0.0f64..1.0,
        cursor_v in 0.0f64..1.0,
        path in prop::collection::vec(0u32..=4, 1..12),
    ) {
        let config = ViewportConfig::default();
        let mut stepped = Viewport::new(
            config.clone(),
            image_width,
            image_height,
            window_width,
            window_height,
        );
        let mut wandering = stepped.clone();

        let x = (cursor_u * window_width as f64) as i32;
        let y = (cursor_v * window_height as f64) as i32;

        for exponent in &path {
            wandering.set_zoomed_area(x, y, 1 << exponent).unwrap();
        }
        let target = *path.last().unwrap();
        for exponent in 0..=target {
            stepped.set_zoomed_area(x, y, 1 << exponent).unwrap();
        }

        prop_assert_eq!(wandering.zoom_factor(), stepped.zoom_factor());
        assert_rect_close(wandering.visible_rect(), stepped.visible_rect());
    }
}

#[test]
#[ignore = "requires a window system"]
fn test_renderer_draws_in_window() {
    use iv_display::{DisplayRenderer, EventLoop};

    let event_loop = EventLoop::new();
    let image = patterned_image(320, 240);
    let mut renderer = DisplayRenderer::builder()
        .max_initial_size(640, 480)
        .build(&event_loop, "Image Viewer - test", image)
        .unwrap();

    renderer.draw_image().unwrap();
    renderer.set_zoomed_area(10, 10, 2).unwrap();
    renderer.draw_image().unwrap();
    renderer.set_dimensions(200, 100).unwrap();
    assert_eq!(renderer.viewport().zoom_factor(), 1);
    renderer.draw_image().unwrap();
}
