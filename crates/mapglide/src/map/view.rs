//! Schematic map view: draws the published viewport and reports user gestures.
//!
//! Tiles are out of scope; the view paints a graticule, destination markers, a compass
//! and a status line so camera motion is visible. Dragging pans and the wheel zooms;
//! there is no rotate gesture.

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use mapglide_core::mercator::{self, pan_by_pixels, zoom_around};
use mapglide_core::{AccessToken, Coordinate, DestinationCatalog, ViewportListener, ViewportState};

use crate::config::GestureConfig;

const BACKGROUND: Color32 = Color32::from_rgb(24, 28, 36);
const GRID_MINOR: Color32 = Color32::from_rgb(44, 52, 66);
const GRID_LABEL: Color32 = Color32::from_rgb(110, 120, 140);
const MARKER: Color32 = Color32::from_rgb(240, 180, 60);
const TARGET: Color32 = Color32::from_rgb(90, 200, 250);

/// Finest graticule spacing in degrees
const MIN_GRID_STEP: f64 = 1e-9;

/// Most graticule lines drawn per axis
const MAX_GRID_LINES: usize = 40;

/// Pixels of smooth scroll that count as one wheel notch
const SCROLL_PER_NOTCH: f32 = 50.0;

pub struct MapView {
    style: String,
    access_token: AccessToken,
    published: ViewportState,
    frames_published: u64,
    markers: Vec<(String, Coordinate)>,
}

impl ViewportListener for MapView {
    fn on_viewport_change(&mut self, viewport: &ViewportState) {
        self.published = *viewport;
        self.frames_published += 1;
    }
}

impl MapView {
    pub fn new(
        style: impl Into<String>,
        access_token: AccessToken,
        initial: ViewportState,
        catalog: &DestinationCatalog,
    ) -> Self {
        Self {
            style: style.into(),
            access_token,
            published: initial,
            frames_published: 0,
            markers: catalog
                .iter()
                .map(|d| (d.name.clone(), d.coordinate()))
                .collect(),
        }
    }

    /// Last viewport received from the controller.
    pub fn viewport(&self) -> &ViewportState {
        &self.published
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn frames_published(&self) -> u64 {
        self.frames_published
    }

    /// Paint the map and return a viewport change when the user dragged or zoomed.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        gestures: &GestureConfig,
        target: Option<Coordinate>,
    ) -> Option<ViewportState> {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(BACKGROUND))
            .show(ctx, |ui| {
                let size = Vec2::new(self.published.width as f32, self.published.height as f32)
                    .min(ui.available_size());
                let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
                let rect = response.rect;
                let painter = painter.with_clip_rect(rect);

                self.paint_graticule(&painter, rect);
                self.paint_markers(&painter, rect, target);
                paint_compass(&painter, rect, self.published.bearing);
                self.paint_status(&painter, rect);

                let mut changed = None;

                if response.dragged() {
                    let delta = response.drag_delta();
                    if delta != Vec2::ZERO {
                        let center =
                            pan_by_pixels(&self.published, f64::from(delta.x), f64::from(delta.y));
                        changed = Some(ViewportState {
                            latitude: center.latitude,
                            longitude: center.longitude,
                            ..self.published
                        });
                    }
                }

                let mut zoom_delta = 0.0;
                if response.hovered() {
                    let scroll = ui.input(|i| i.smooth_scroll_delta.y);
                    zoom_delta += f64::from(scroll / SCROLL_PER_NOTCH) * gestures.wheel_zoom_step;
                }
                if response.double_clicked() {
                    zoom_delta += 1.0;
                }
                if zoom_delta != 0.0 {
                    let base = changed.unwrap_or(self.published);
                    let zoom =
                        zoom_around(&base, zoom_delta, gestures.min_zoom, gestures.max_zoom);
                    if zoom != base.zoom {
                        changed = Some(ViewportState { zoom, ..base });
                    }
                }

                changed
            })
            .inner
    }

    fn to_screen(&self, rect: Rect, coord: Coordinate) -> Pos2 {
        let offset = mercator::screen_offset(&self.published, coord);
        rect.center() + Vec2::new(offset[0] as f32, offset[1] as f32)
    }

    fn paint_graticule(&self, painter: &egui::Painter, rect: Rect) {
        let v = &self.published;
        // Degrees of longitude spanned by the diagonal, enough to cover any rotation
        let diagonal = f64::from(rect.width().hypot(rect.height()));
        let span = diagonal / mercator::world_size(v.zoom) * 360.0;
        let step = grid_step(span);
        let stroke = Stroke::new(1.0, GRID_MINOR);

        let lon_min = ((v.longitude - span) / step).floor() * step;
        let lat_min = ((v.latitude - span) / step).floor() * step;
        let lat_lo = (v.latitude - span).max(-mercator::MAX_LATITUDE);
        let lat_hi = (v.latitude + span).min(mercator::MAX_LATITUDE);

        for i in 0..=MAX_GRID_LINES {
            let lon = lon_min + i as f64 * step;
            if lon > v.longitude + span {
                break;
            }
            let a = self.to_screen(rect, Coordinate::new(lat_lo, lon));
            let b = self.to_screen(rect, Coordinate::new(lat_hi, lon));
            painter.line_segment([a, b], stroke);
        }

        for i in 0..=MAX_GRID_LINES {
            let lat = lat_min + i as f64 * step;
            if lat > lat_hi {
                break;
            }
            if lat < lat_lo {
                continue;
            }
            let a = self.to_screen(rect, Coordinate::new(lat, v.longitude - span));
            let b = self.to_screen(rect, Coordinate::new(lat, v.longitude + span));
            painter.line_segment([a, b], stroke);
        }

        painter.text(
            rect.right_bottom() + Vec2::new(-8.0, -8.0),
            Align2::RIGHT_BOTTOM,
            format!("grid {}°", format_step(step)),
            FontId::monospace(11.0),
            GRID_LABEL,
        );
    }

    fn paint_markers(&self, painter: &egui::Painter, rect: Rect, target: Option<Coordinate>) {
        let visible = rect.expand(16.0);
        for (name, coord) in &self.markers {
            let pos = self.to_screen(rect, *coord);
            if !visible.contains(pos) {
                continue;
            }
            painter.circle_filled(pos, 5.0, MARKER);
            painter.text(
                pos + Vec2::new(8.0, -8.0),
                Align2::LEFT_BOTTOM,
                name,
                FontId::proportional(13.0),
                Color32::WHITE,
            );
        }

        if let Some(target) = target {
            let pos = self.to_screen(rect, target);
            if visible.contains(pos) {
                painter.circle_stroke(pos, 10.0, Stroke::new(2.0, TARGET));
            }
        }

        // Crosshair at the camera centre
        let c = rect.center();
        let cross = Stroke::new(1.5, Color32::from_white_alpha(180));
        painter.line_segment([c - Vec2::X * 8.0, c + Vec2::X * 8.0], cross);
        painter.line_segment([c - Vec2::Y * 8.0, c + Vec2::Y * 8.0], cross);
    }

    fn paint_status(&self, painter: &egui::Painter, rect: Rect) {
        let v = &self.published;
        painter.text(
            rect.left_bottom() + Vec2::new(8.0, -8.0),
            Align2::LEFT_BOTTOM,
            format!(
                "{:.6}, {:.6}  z{:.2}  bearing {:.1}°  pitch {:.0}°  {}x{}  {} ({})",
                v.latitude,
                v.longitude,
                v.zoom,
                v.bearing,
                v.pitch,
                v.width,
                v.height,
                self.style,
                self.access_token
            ),
            FontId::monospace(12.0),
            GRID_LABEL,
        );
    }
}

/// North arrow in the top-left corner, rotated against the camera bearing.
fn paint_compass(painter: &egui::Painter, rect: Rect, bearing: f64) {
    let center = rect.left_top() + Vec2::new(36.0, 36.0);
    let (sin, cos) = bearing.to_radians().sin_cos();
    let north = Vec2::new(-sin as f32, -cos as f32);

    painter.circle_stroke(center, 22.0, Stroke::new(1.0, GRID_LABEL));
    painter.arrow(center - north * 14.0, north * 28.0, Stroke::new(2.0, Color32::RED));
    painter.text(
        center + north * 30.0,
        Align2::CENTER_CENTER,
        "N",
        FontId::proportional(12.0),
        Color32::WHITE,
    );
}

/// Graticule spacing (1, 2 or 5 times a power of ten) giving a handful of lines over `span`.
fn grid_step(span: f64) -> f64 {
    if !span.is_finite() || span <= 0.0 {
        return 1.0;
    }
    let raw = span / 8.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized < 2.0 {
        1.0
    } else if normalized < 5.0 {
        2.0
    } else {
        5.0
    };
    (factor * magnitude).clamp(MIN_GRID_STEP, 30.0)
}

fn format_step(step: f64) -> String {
    let step = step.max(MIN_GRID_STEP);
    if step >= 1.0 {
        format!("{step:.0}")
    } else {
        let decimals = (-step.log10()).ceil() as usize;
        format!("{step:.decimals$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_step_is_round() {
        assert_eq!(grid_step(80.0), 10.0);
        assert_eq!(grid_step(16.0), 2.0);
        assert!((grid_step(0.0032) - 0.0002).abs() < 1e-12);
        assert_eq!(grid_step(1000.0), 30.0);
        assert_eq!(grid_step(0.0), 1.0);
        assert_eq!(grid_step(f64::MIN_POSITIVE / 4.0), MIN_GRID_STEP);
    }

    #[test]
    fn test_format_step() {
        assert_eq!(format_step(10.0), "10");
        assert_eq!(format_step(0.05), "0.05");
        assert_eq!(format_step(0.0005), "0.0005");
        assert_eq!(format_step(0.0), format_step(MIN_GRID_STEP));
        assert!(format_step(0.0).len() <= 12);
    }

    #[test]
    fn test_listener_tracks_published_state() {
        let token = AccessToken::new(Some("pk.test".into()), "test").unwrap();
        let mut view = MapView::new(
            "style",
            token,
            ViewportState::default(),
            &DestinationCatalog::built_in(),
        );
        let next = ViewportState {
            zoom: 3.0,
            ..ViewportState::default()
        };
        view.on_viewport_change(&next);
        assert_eq!(view.viewport(), &next);
        assert_eq!(view.frames_published(), 1);
        assert_eq!(view.style(), "style");
    }
}
