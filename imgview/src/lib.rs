//! imgview: interactive image viewer
//!
//! The binary parses [`args::Args`], loads a [`config::ViewerConfig`], then hands the
//! image to [`app::run`], which drives the `iv-display` viewport engine from window
//! events at a fixed frame rate.

pub mod app;
pub mod args;
pub mod config;
pub mod pacing;
pub mod title;
