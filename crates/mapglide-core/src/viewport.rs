//! Camera state of the map viewport.

use serde::{Deserialize, Serialize};

use crate::geo::{normalize_bearing, shortest_arc, Coordinate};
use crate::tweens::Tweenable;

/// Everything the map renderer needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    /// Degrees clockwise from north, kept in [0, 360)
    pub bearing: f64,
    pub pitch: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            latitude: 38.910337,
            longitude: -77.04227,
            zoom: 18.0,
            bearing: 0.0,
            pitch: 60.0,
            width: 500,
            height: 500,
        }
    }
}

impl ViewportState {
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// The animated subset of this viewport.
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            latitude: self.latitude,
            longitude: self.longitude,
            zoom: self.zoom,
            bearing: self.bearing,
        }
    }

    /// Copy of this viewport with the animated fields replaced by `pose`.
    pub fn with_pose(&self, pose: CameraPose) -> Self {
        Self {
            latitude: pose.latitude,
            longitude: pose.longitude,
            zoom: pose.zoom,
            bearing: normalize_bearing(pose.bearing),
            ..*self
        }
    }

    /// Copy of this viewport sized to `display`, honouring any per-axis override.
    ///
    /// A zero override counts as unset.
    pub fn resized(&self, display: (u32, u32), overrides: ResizeOverrides) -> Self {
        Self {
            width: overrides.width.filter(|w| *w > 0).unwrap_or(display.0),
            height: overrides.height.filter(|h| *h > 0).unwrap_or(display.1),
            ..*self
        }
    }
}

/// Explicit dimensions that take precedence over the display area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeOverrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Latitude, longitude, zoom and bearing: the part of the viewport a flight animates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub bearing: f64,
}

impl Tweenable for CameraPose {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        // Bearing turns along the shorter arc; the rest is linear
        let turn = shortest_arc(a.bearing, b.bearing);
        Self {
            latitude: f64::lerp(a.latitude, b.latitude, t),
            longitude: f64::lerp(a.longitude, b.longitude, t),
            zoom: f64::lerp(a.zoom, b.zoom, t),
            bearing: normalize_bearing(a.bearing + turn * t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_initial_view() {
        let v = ViewportState::default();
        assert_eq!(v.latitude, 38.910337);
        assert_eq!(v.longitude, -77.04227);
        assert_eq!(v.zoom, 18.0);
        assert_eq!(v.bearing, 0.0);
        assert_eq!(v.pitch, 60.0);
        assert_eq!((v.width, v.height), (500, 500));
    }

    #[test]
    fn test_resized_uses_display_or_overrides() {
        let v = ViewportState::default();

        let r = v.resized((1280, 720), ResizeOverrides::default());
        assert_eq!((r.width, r.height), (1280, 720));

        let r = v.resized(
            (1280, 720),
            ResizeOverrides {
                width: Some(800),
                height: None,
            },
        );
        assert_eq!((r.width, r.height), (800, 720));
        assert_eq!(r.pose(), v.pose());
        assert_eq!(r.pitch, v.pitch);
    }

    #[test]
    fn test_zero_override_follows_display() {
        let v = ViewportState::default();
        let r = v.resized(
            (1024, 768),
            ResizeOverrides {
                width: Some(0),
                height: Some(0),
            },
        );
        assert_eq!((r.width, r.height), (1024, 768));
    }

    #[test]
    fn test_pose_lerp_turns_through_north() {
        let a = CameraPose {
            latitude: 0.0,
            longitude: 0.0,
            zoom: 10.0,
            bearing: 350.0,
        };
        let b = CameraPose {
            bearing: 10.0,
            ..a
        };

        let mid = CameraPose::lerp(a, b, 0.5);
        assert!(mid.bearing.abs() < 1e-9 || (mid.bearing - 360.0).abs() < 1e-9);

        let quarter = CameraPose::lerp(a, b, 0.25);
        assert!((quarter.bearing - 355.0).abs() < 1e-9);
    }

    #[test]
    fn test_with_pose_normalizes_bearing() {
        let v = ViewportState::default().with_pose(CameraPose {
            latitude: 1.0,
            longitude: 2.0,
            zoom: 3.0,
            bearing: -90.0,
        });
        assert_eq!(v.bearing, 270.0);
        assert_eq!(v.pitch, 60.0);
    }
}
