//! Viewport controller: owns the camera state and flies it between destinations.
//!
//! The controller is the single writer of [`ViewportState`]. Three things change it:
//! window resizes, user gestures reported by the renderer, and the per-frame tick of an
//! in-flight transition. Every change reaches the renderer through [`ViewportListener`]
//! on the next [`ViewportController::tick`].

use serde::{Deserialize, Serialize};

use crate::geo::{bearing_between, Coordinate};
use crate::tweens::{AnimatedValue, EaseType};
use crate::viewport::{CameraPose, ResizeOverrides, ViewportState};

/// Receives viewport states published by the controller.
pub trait ViewportListener {
    fn on_viewport_change(&mut self, viewport: &ViewportState);
}

/// Records every published frame.
impl ViewportListener for Vec<ViewportState> {
    fn on_viewport_change(&mut self, viewport: &ViewportState) {
        self.push(*viewport);
    }
}

/// Shape of a camera flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionSettings {
    /// Flight duration in seconds
    pub duration_secs: f64,
    /// Zoom level every flight ends at
    pub target_zoom: f64,
    pub easing: EaseType,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            duration_secs: 10.0,
            target_zoom: 18.0,
            easing: EaseType::QuadInOut,
        }
    }
}

#[derive(Debug, Clone)]
struct Transition {
    destination: Coordinate,
    pose: AnimatedValue<CameraPose>,
}

pub struct ViewportController {
    viewport: ViewportState,
    transition: Option<Transition>,
    settings: TransitionSettings,
    /// Set when the viewport changed outside a transition and has not been published yet
    pending_publish: bool,
}

impl ViewportController {
    pub fn new(initial: ViewportState, settings: TransitionSettings) -> Self {
        Self {
            viewport: initial,
            transition: None,
            settings,
            pending_publish: true,
        }
    }

    /// Current camera state (the last state computed, published or about to be).
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn settings(&self) -> &TransitionSettings {
        &self.settings
    }

    /// Resize the viewport to the display area, or to explicit overrides.
    ///
    /// Only width and height change. An in-flight transition keeps running.
    pub fn on_resize(&mut self, display: (u32, u32), overrides: ResizeOverrides) {
        let resized = self.viewport.resized(display, overrides);
        if resized.width != self.viewport.width || resized.height != self.viewport.height {
            log::debug!(
                "Viewport resized {}x{} -> {}x{}",
                self.viewport.width,
                self.viewport.height,
                resized.width,
                resized.height
            );
            self.viewport = resized;
            self.pending_publish = true;
        }
    }

    /// Start flying toward `destination`, replacing any flight already in progress.
    ///
    /// Returns the bearing the camera will end up facing, or `None` when the destination
    /// is not a valid coordinate (the request is ignored).
    pub fn request_transition(&mut self, destination: Coordinate) -> Option<f64> {
        if !destination.is_valid() {
            log::warn!("Ignoring transition to invalid coordinate {:?}", destination);
            return None;
        }

        if let Some(previous) = self.transition.take() {
            log::debug!(
                "Cancelled transition to ({:.5}, {:.5}) at {:.0}%",
                previous.destination.latitude,
                previous.destination.longitude,
                previous.pose.progress() * 100.0
            );
        }

        let bearing = bearing_between(self.viewport.center(), destination);
        let target = CameraPose {
            latitude: destination.latitude,
            longitude: destination.longitude,
            zoom: self.settings.target_zoom,
            bearing,
        };

        let mut pose = AnimatedValue::new(self.viewport.pose());
        pose.animate_to(target, self.settings.duration_secs, self.settings.easing);

        log::info!(
            "Flying to ({:.5}, {:.5}), bearing {:.1}°, over {:.1}s",
            destination.latitude,
            destination.longitude,
            bearing,
            self.settings.duration_secs
        );

        self.transition = Some(Transition { destination, pose });
        Some(bearing)
    }

    /// Apply a viewport change coming from a user gesture on the map.
    ///
    /// A gesture takes the camera away from any flight in progress. Width and height stay
    /// under the control of [`Self::on_resize`].
    pub fn apply_user_change(&mut self, state: ViewportState) {
        if self.cancel_transition() {
            log::debug!("User gesture interrupted transition");
        }
        let next = ViewportState {
            width: self.viewport.width,
            height: self.viewport.height,
            ..state
        }
        .with_pose(state.pose());
        if next != self.viewport {
            self.viewport = next;
            self.pending_publish = true;
        }
    }

    /// Drop the in-flight transition, leaving the camera where it is.
    ///
    /// Returns whether a transition was running.
    pub fn cancel_transition(&mut self) -> bool {
        self.transition.take().is_some()
    }

    /// Advance the active transition by `dt` seconds and publish the result.
    ///
    /// Also publishes changes made by resize or gestures since the last tick. Returns
    /// `true` while a transition is still running.
    pub fn tick(&mut self, dt: f64, listener: &mut impl ViewportListener) -> bool {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let Some(transition) = self.transition.as_mut() else {
            if std::mem::take(&mut self.pending_publish) {
                listener.on_viewport_change(&self.viewport);
            }
            return false;
        };

        let running = transition.pose.update(dt);
        self.viewport = self.viewport.with_pose(transition.pose.value());
        self.pending_publish = false;

        log::trace!(
            "Transition tick: progress={:.3} lat={:.6} lon={:.6} zoom={:.2} bearing={:.1}",
            transition.pose.progress(),
            self.viewport.latitude,
            self.viewport.longitude,
            self.viewport.zoom,
            self.viewport.bearing
        );

        listener.on_viewport_change(&self.viewport);

        if !running {
            log::debug!(
                "Arrived at ({:.5}, {:.5})",
                transition.destination.latitude,
                transition.destination.longitude
            );
            self.transition = None;
        }
        running
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Un-eased progress of the active transition in [0, 1].
    pub fn transition_progress(&self) -> Option<f64> {
        self.transition.as_ref().map(|t| t.pose.progress())
    }

    /// Where the active transition ends.
    pub fn transition_target(&self) -> Option<CameraPose> {
        self.transition.as_ref().map(|t| t.pose.target())
    }

    pub fn transition_destination(&self) -> Option<Coordinate> {
        self.transition.as_ref().map(|t| t.destination)
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ViewportState::default(), TransitionSettings::default())
    }
}
