//! Event loop shell: feeds window events to the viewport engine and paces frames.

use crate::config::ViewerConfig;
use crate::pacing::FramePacer;
use crate::title::window_title;
use anyhow::{Context, Result};
use iv_display::{DisplayError, DisplayRenderer, FlipMode, Viewport};
use iv_input::{InputDispatcher, ViewerCommand};
use iv_pixelbuffer::SourceImage;
use std::path::Path;
use tracing::{debug, error, info};
use winit::{
    event::Event,
    event_loop::EventLoop,
    platform::run_return::EventLoopExtRunReturn,
};

/// View-state operations the shell drives.
///
/// Implemented by the windowed [`DisplayRenderer`] and by a bare [`Viewport`], which
/// lets the command mapping run without a window system.
pub trait ViewEngine {
    fn viewport(&self) -> &Viewport;
    fn set_dimensions(&mut self, width: u32, height: u32) -> Result<(), DisplayError>;
    fn set_flipping_mode(&mut self, mode: FlipMode);
    fn set_zoomed_area(&mut self, x: i32, y: i32, zoom_factor: u32) -> Result<(), DisplayError>;
    fn scale_image(&mut self);
}

impl ViewEngine for DisplayRenderer {
    fn viewport(&self) -> &Viewport {
        DisplayRenderer::viewport(self)
    }

    fn set_dimensions(&mut self, width: u32, height: u32) -> Result<(), DisplayError> {
        DisplayRenderer::set_dimensions(self, width, height)
    }

    fn set_flipping_mode(&mut self, mode: FlipMode) {
        DisplayRenderer::set_flipping_mode(self, mode)
    }

    fn set_zoomed_area(&mut self, x: i32, y: i32, zoom_factor: u32) -> Result<(), DisplayError> {
        DisplayRenderer::set_zoomed_area(self, x, y, zoom_factor)
    }

    fn scale_image(&mut self) {
        DisplayRenderer::scale_image(self)
    }
}

impl ViewEngine for Viewport {
    fn viewport(&self) -> &Viewport {
        self
    }

    fn set_dimensions(&mut self, width: u32, height: u32) -> Result<(), DisplayError> {
        Viewport::set_dimensions(self, width, height);
        Ok(())
    }

    fn set_flipping_mode(&mut self, mode: FlipMode) {
        Viewport::set_flipping_mode(self, mode)
    }

    fn set_zoomed_area(&mut self, x: i32, y: i32, zoom_factor: u32) -> Result<(), DisplayError> {
        Viewport::set_zoomed_area(self, x, y, zoom_factor)
    }

    fn scale_image(&mut self) {
        Viewport::scale_image(self)
    }
}

/// Whether the loop keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Apply one command to the engine.
///
/// Wheel commands move one zoom step at the cursor. Cursor motion while zoomed
/// replays the zoom from factor 1 up to the current factor at the new position, so
/// the window area keeps representing the whole image.
pub fn apply_command<E: ViewEngine>(engine: &mut E, command: ViewerCommand) -> Result<Flow, DisplayError> {
    match command {
        ViewerCommand::Quit => return Ok(Flow::Exit),
        ViewerCommand::Resize { width, height } => engine.set_dimensions(width, height)?,
        ViewerCommand::ZoomIn { x, y } => {
            let factor = engine.viewport().zoom_in_factor();
            engine.set_zoomed_area(x, y, factor)?;
        }
        ViewerCommand::ZoomOut { x, y } => {
            let factor = engine.viewport().zoom_out_factor();
            engine.set_zoomed_area(x, y, factor)?;
        }
        ViewerCommand::Pan { x, y } => {
            let current = engine.viewport().zoom_factor();
            if current > 1 {
                let mut factor = 1;
                while factor <= current {
                    engine.set_zoomed_area(x, y, factor)?;
                    factor <<= 1;
                }
            }
        }
        ViewerCommand::ToggleFlip => {
            let next = engine.viewport().flip_mode().next();
            engine.set_flipping_mode(next);
        }
        ViewerCommand::ScaleToFit => engine.scale_image(),
    }
    Ok(Flow::Continue)
}

/// Open `image_path` in a window and run until the user quits.
///
/// # Errors
///
/// Returns an error if the image cannot be loaded, the window cannot be created, or
/// presenting a frame fails.
pub fn run(config: &ViewerConfig, image_path: &Path) -> Result<()> {
    let image = SourceImage::open(image_path)?;
    info!(
        "Loaded {} ({}x{})",
        image_path.display(),
        image.width(),
        image.height()
    );

    let mut event_loop = EventLoop::new();
    let title = window_title(&config.display.title_prefix, image_path);
    let mut renderer = DisplayRenderer::builder()
        .viewport_config(config.viewport_config())
        .filter(config.scale_filter()?)
        .background(config.viewport.background)
        .max_initial_size(
            config.display.max_initial_width,
            config.display.max_initial_height,
        )
        .build(&event_loop, &title, image)
        .context("failed to initialize display")?;

    let mut dispatcher = InputDispatcher::with_shortcuts(config.shortcuts()?);
    let mut pacer = FramePacer::new(config.frame_period());
    let mut failure: Option<DisplayError> = None;
    let mut quitting = false;

    event_loop.run_return(|event, _, control_flow| {
        control_flow.set_poll();
        if quitting {
            control_flow.set_exit();
            return;
        }

        match event {
            Event::NewEvents(_) => pacer.begin_frame(),
            Event::WindowEvent { window_id, event } if window_id == renderer.window().id() => {
                let Some(command) = dispatcher.handle_window_event(&event) else {
                    return;
                };
                match apply_command(&mut renderer, command) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Exit) => {
                        debug!("Quit requested");
                        quitting = true;
                        control_flow.set_exit();
                    }
                    Err(e) if e.is_invalid_argument() => debug!("Ignoring {}: {}", command, e),
                    Err(e) => {
                        failure = Some(e);
                        quitting = true;
                        control_flow.set_exit();
                    }
                }
            }
            Event::MainEventsCleared => {
                if let Err(e) = renderer.draw_image() {
                    error!("Rendering failed: {}", e);
                    failure = Some(e);
                    quitting = true;
                    control_flow.set_exit();
                    return;
                }
                pacer.sleep_remaining();
            }
            _ => {}
        }
    });

    match failure {
        Some(e) => Err(e).context("display error"),
        None => {
            info!("Viewer closed");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iv_display::ViewportConfig;

    fn viewport() -> Viewport {
        Viewport::new(ViewportConfig::default(), 800, 600, 400, 300)
    }

    #[test]
    fn test_quit_exits() {
        let mut vp = viewport();
        assert_eq!(apply_command(&mut vp, ViewerCommand::Quit).unwrap(), Flow::Exit);
    }

    #[test]
    fn test_wheel_steps_zoom() {
        let mut vp = viewport();
        for expected in [2, 4, 8, 16, 16] {
            apply_command(&mut vp, ViewerCommand::ZoomIn { x: 200, y: 150 }).unwrap();
            assert_eq!(vp.zoom_factor(), expected);
        }
        for expected in [8, 4, 2, 1, 1] {
            apply_command(&mut vp, ViewerCommand::ZoomOut { x: 200, y: 150 }).unwrap();
            assert_eq!(vp.zoom_factor(), expected);
        }
    }

    #[test]
    fn test_pan_ignored_at_zoom_one() {
        let mut vp = viewport();
        let before = vp.state().clone();
        apply_command(&mut vp, ViewerCommand::Pan { x: 10, y: 10 }).unwrap();
        assert_eq!(vp.state(), &before);
    }

    #[test]
    fn test_pan_keeps_zoom_and_follows_cursor() {
        let mut vp = viewport();
        apply_command(&mut vp, ViewerCommand::ZoomIn { x: 200, y: 150 }).unwrap();
        apply_command(&mut vp, ViewerCommand::ZoomIn { x: 200, y: 150 }).unwrap();

        apply_command(&mut vp, ViewerCommand::Pan { x: 0, y: 0 }).unwrap();
        assert_eq!(vp.zoom_factor(), 4);
        let visible = vp.visible_rect();
        assert_eq!((visible.x, visible.y), (0.0, 0.0));

        apply_command(&mut vp, ViewerCommand::Pan { x: 399, y: 299 }).unwrap();
        let visible = vp.visible_rect();
        assert!(visible.right() <= 800.0 && visible.right() > 790.0);
        assert!(visible.bottom() <= 600.0 && visible.bottom() > 590.0);
    }

    #[test]
    fn test_flip_and_fit_commands() {
        let mut vp = viewport();
        apply_command(&mut vp, ViewerCommand::ZoomIn { x: 0, y: 0 }).unwrap();
        apply_command(&mut vp, ViewerCommand::ToggleFlip).unwrap();
        assert_eq!(vp.flip_mode(), FlipMode::Horizontal);
        assert_eq!(vp.zoom_factor(), 1);

        apply_command(&mut vp, ViewerCommand::ScaleToFit).unwrap();
        assert!(vp.is_fit_to_window());
        assert_eq!(vp.flip_mode(), FlipMode::Horizontal);

        apply_command(
            &mut vp,
            ViewerCommand::Resize {
                width: 640,
                height: 480,
            },
        )
        .unwrap();
        assert_eq!(vp.state().window_width, 640);
        assert_eq!(vp.zoom_factor(), 1);
    }
}
