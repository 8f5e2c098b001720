//! # mapglide-core
//!
//! Camera state and eased flights for the mapglide map viewer. Nothing in here touches a
//! window or the GPU; the application crate drives [`ViewportController::tick`] once per
//! displayed frame.

pub mod controller;
pub mod credentials;
pub mod destinations;
pub mod geo;
pub mod mercator;
pub mod tweens;
pub mod viewport;

pub use controller::{TransitionSettings, ViewportController, ViewportListener};
pub use credentials::{AccessToken, CredentialError};
pub use destinations::{Destination, DestinationCatalog};
pub use geo::{bearing_between, Coordinate};
pub use tweens::{AnimatedValue, EaseType, Tweenable};
pub use viewport::{CameraPose, ResizeOverrides, ViewportState};
