//! Common utilities for the oscillator viewer
//!
//! This crate provides the window and GPU setup, the line vertex format and
//! the 2D camera used to draw the oscillator scenes.

pub mod graphics;
pub mod camera;

pub use graphics::*;
pub use camera::*;
