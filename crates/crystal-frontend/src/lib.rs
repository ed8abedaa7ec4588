//! Native host for the crystal scene widgets
//!
//! Each widget gets an egui panel standing in for its page container. The
//! panel forwards pointer and wheel input, drives the widget's frame callback
//! once per repaint and shows the offscreen surface as an egui texture.

mod app;
pub mod config;
pub mod input;
pub mod surface;

pub use app::CrystalApp;
