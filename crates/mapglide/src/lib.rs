//! # mapglide
//!
//! Interactive map viewport that flies the camera between destinations.

pub mod app;
pub mod config;
pub mod map;
pub mod render;
pub mod ui;

pub use app::App;
