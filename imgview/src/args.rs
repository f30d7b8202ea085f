use clap::Parser;
use std::path::PathBuf;

/// Controls listed at the end of `--help`.
pub const CONTROLS: &str = "\
Controls (default keys):
  - Mouse wheel : zoom in/zoom out.
  - Moving the mouse while the image is zoomed moves around the zoomed image
    (the window area always represents the whole image, even when zoomed).
  - f : cycle through the flipping modes (none, horizontal, vertical, both).
  - s : scale the image to fit the window.
  - q : quit.";

#[derive(Parser, Debug)]
#[command(name = "imgview")]
#[command(about = "Display an image and explore it with zoom, pan and flip")]
#[command(version)]
#[command(after_help = CONTROLS)]
pub struct Args {
    /// Image file to display (JPEG, PNG, TIFF, BMP or GIF)
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
