//! Web Mercator conversions between coordinates and screen pixels.
//!
//! World pixel space follows the 512-pixel tile convention: at zoom `z` the whole world is
//! `512 * 2^z` pixels wide, x grows east and y grows south.

use std::f64::consts::PI;

use crate::geo::{wrap_longitude, Coordinate};
use crate::viewport::ViewportState;

pub const TILE_SIZE: f64 = 512.0;
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Width of the world in pixels at `zoom`.
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Project a coordinate into world pixels at `zoom`.
pub fn project(coord: Coordinate, zoom: f64) -> [f64; 2] {
    let size = world_size(zoom);
    let lat = coord.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let x = (coord.longitude + 180.0) / 360.0;
    let y = (180.0 - (180.0 / PI) * (PI / 4.0 + lat * PI / 360.0).tan().ln()) / 360.0;
    [x * size, y * size]
}

/// Inverse of [`project`].
pub fn unproject(point: [f64; 2], zoom: f64) -> Coordinate {
    let size = world_size(zoom);
    let longitude = point[0] / size * 360.0 - 180.0;
    let y2 = 180.0 - point[1] / size * 360.0;
    let latitude = 360.0 / PI * (y2 * PI / 180.0).exp().atan() - 90.0;
    Coordinate::new(latitude, longitude)
}

/// Rotate a world-pixel offset into screen space for a camera facing `bearing` degrees.
fn world_to_screen_offset(offset: [f64; 2], bearing: f64) -> [f64; 2] {
    let (sin, cos) = bearing.to_radians().sin_cos();
    [
        offset[0] * cos + offset[1] * sin,
        -offset[0] * sin + offset[1] * cos,
    ]
}

fn screen_to_world_offset(offset: [f64; 2], bearing: f64) -> [f64; 2] {
    let (sin, cos) = bearing.to_radians().sin_cos();
    [
        offset[0] * cos - offset[1] * sin,
        offset[0] * sin + offset[1] * cos,
    ]
}

/// Screen position of `coord` relative to the viewport centre, in pixels.
pub fn screen_offset(viewport: &ViewportState, coord: Coordinate) -> [f64; 2] {
    let center = project(viewport.center(), viewport.zoom);
    let point = project(coord, viewport.zoom);
    world_to_screen_offset([point[0] - center[0], point[1] - center[1]], viewport.bearing)
}

/// Coordinate under a screen position given relative to the viewport centre.
pub fn coordinate_at(viewport: &ViewportState, offset: [f64; 2]) -> Coordinate {
    let center = project(viewport.center(), viewport.zoom);
    let world = screen_to_world_offset(offset, viewport.bearing);
    let coord = unproject([center[0] + world[0], center[1] + world[1]], viewport.zoom);
    Coordinate::new(
        coord.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE),
        wrap_longitude(coord.longitude),
    )
}

/// Viewport centre after the map content is dragged by `(dx, dy)` screen pixels.
pub fn pan_by_pixels(viewport: &ViewportState, dx: f64, dy: f64) -> Coordinate {
    coordinate_at(viewport, [-dx, -dy])
}

/// Zoom level after applying `delta`, clamped to `[min_zoom, max_zoom]`.
pub fn zoom_around(viewport: &ViewportState, delta: f64, min_zoom: f64, max_zoom: f64) -> f64 {
    (viewport.zoom + delta).clamp(min_zoom, max_zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport_at(latitude: f64, longitude: f64, zoom: f64, bearing: f64) -> ViewportState {
        ViewportState {
            latitude,
            longitude,
            zoom,
            bearing,
            ..ViewportState::default()
        }
    }

    #[test]
    fn test_project_origin_is_world_center() {
        let p = project(Coordinate::new(0.0, 0.0), 0.0);
        assert!((p[0] - 256.0).abs() < 1e-9);
        assert!((p[1] - 256.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_unproject_inverse() {
        let coord = Coordinate::new(38.910337, -77.04227);
        let back = unproject(project(coord, 18.0), 18.0);
        assert!((back.latitude - coord.latitude).abs() < 1e-9);
        assert!((back.longitude - coord.longitude).abs() < 1e-9);
    }

    #[test]
    fn test_screen_offset_north_up() {
        let v = viewport_at(0.0, 0.0, 4.0, 0.0);
        let east = screen_offset(&v, Coordinate::new(0.0, 1.0));
        assert!(east[0] > 0.0);
        assert!(east[1].abs() < 1e-9);

        let north = screen_offset(&v, Coordinate::new(1.0, 0.0));
        assert!(north[1] < 0.0);
    }

    #[test]
    fn test_screen_offset_facing_east_puts_east_up() {
        let v = viewport_at(0.0, 0.0, 4.0, 90.0);
        let east = screen_offset(&v, Coordinate::new(0.0, 1.0));
        assert!(east[0].abs() < 1e-9);
        assert!(east[1] < 0.0);
    }

    #[test]
    fn test_pan_moves_center_opposite_to_drag() {
        let v = viewport_at(10.0, 10.0, 8.0, 0.0);
        // Dragging the map right reveals what lies to the west
        let c = pan_by_pixels(&v, 100.0, 0.0);
        assert!(c.longitude < 10.0);
        assert!((c.latitude - 10.0).abs() < 1e-9);

        let back = pan_by_pixels(&viewport_at(c.latitude, c.longitude, 8.0, 0.0), -100.0, 0.0);
        assert!((back.longitude - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_coordinate_at_roundtrips_screen_offset() {
        let v = viewport_at(38.9, -77.0, 12.0, 33.0);
        let target = Coordinate::new(38.95, -76.98);
        let offset = screen_offset(&v, target);
        let back = coordinate_at(&v, offset);
        assert!((back.latitude - target.latitude).abs() < 1e-9);
        assert!((back.longitude - target.longitude).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let v = viewport_at(0.0, 0.0, 18.0, 0.0);
        assert_eq!(zoom_around(&v, 5.0, 0.0, 20.0), 20.0);
        assert_eq!(zoom_around(&v, -30.0, 0.0, 20.0), 0.0);
        assert_eq!(zoom_around(&v, 0.5, 0.0, 20.0), 18.5);
    }
}
