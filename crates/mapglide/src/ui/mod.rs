//! UI overlays drawn on top of the map

pub mod control_panel;

pub use control_panel::{ControlPanel, PanelStatus};
