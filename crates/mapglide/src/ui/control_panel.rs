//! Destination picker shown over the map

use egui::{Align2, Context, RichText};
use mapglide_core::{Coordinate, DestinationCatalog, ViewportState};

/// What the panel shows about the camera this frame
pub struct PanelStatus {
    pub viewport: ViewportState,
    /// Progress of the active flight, if any
    pub progress: Option<f64>,
}

pub struct ControlPanel {
    catalog: DestinationCatalog,
    selected: Option<usize>,
    custom_latitude: String,
    custom_longitude: String,
    custom_error: Option<String>,
    show: bool,
}

impl ControlPanel {
    pub fn new(catalog: DestinationCatalog) -> Self {
        Self {
            catalog,
            selected: None,
            custom_latitude: String::new(),
            custom_longitude: String::new(),
            custom_error: None,
            show: true,
        }
    }

    /// Toggle panel visibility
    pub fn toggle(&mut self) {
        self.show = !self.show;
    }

    pub fn catalog(&self) -> &DestinationCatalog {
        &self.catalog
    }

    /// Select the destination at `index` (hotkeys), returning where to fly.
    pub fn select_index(&mut self, index: usize) -> Option<Coordinate> {
        let destination = self.catalog.iter().nth(index)?;
        self.selected = Some(index);
        Some(destination.coordinate())
    }

    /// Render the panel. Returns a destination when the user picked one this frame.
    pub fn render(&mut self, ctx: &Context, status: &PanelStatus) -> Option<Coordinate> {
        if !self.show {
            return None;
        }

        let mut picked = None;

        egui::Window::new("Destinations")
            .anchor(Align2::RIGHT_TOP, [-10.0, 10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                ui.set_width(220.0);

                for (index, destination) in self.catalog.iter().enumerate() {
                    let label = if index < 9 {
                        format!("{}  [{}]", destination.name, index + 1)
                    } else {
                        destination.name.clone()
                    };
                    if ui.radio(self.selected == Some(index), label).clicked() {
                        self.selected = Some(index);
                        picked = Some(destination.coordinate());
                    }
                }

                ui.separator();
                ui.label("Custom coordinate");
                ui.horizontal(|ui| {
                    ui.label("lat");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.custom_latitude).desired_width(70.0),
                    );
                    ui.label("lon");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.custom_longitude).desired_width(70.0),
                    );
                });
                if ui.button("Fly").clicked() {
                    match parse_coordinate(&self.custom_latitude, &self.custom_longitude) {
                        Ok(coord) => {
                            self.selected = None;
                            self.custom_error = None;
                            picked = Some(coord);
                        }
                        Err(message) => self.custom_error = Some(message),
                    }
                }
                if let Some(message) = &self.custom_error {
                    ui.label(RichText::new(message).color(egui::Color32::LIGHT_RED));
                }

                ui.separator();
                let v = &status.viewport;
                ui.monospace(format!("lat     {:>11.6}", v.latitude));
                ui.monospace(format!("lon     {:>11.6}", v.longitude));
                ui.monospace(format!("zoom    {:>11.2}", v.zoom));
                ui.monospace(format!("bearing {:>10.1}°", v.bearing));
                match status.progress {
                    Some(progress) => {
                        ui.add(egui::ProgressBar::new(progress as f32).show_percentage());
                        ui.small("Esc to stop");
                    }
                    None => {
                        ui.small("Drag to pan, scroll to zoom");
                    }
                }
            });

        picked
    }
}

/// Parse user-entered latitude/longitude text into a coordinate.
pub fn parse_coordinate(latitude: &str, longitude: &str) -> Result<Coordinate, String> {
    let latitude: f64 = latitude
        .trim()
        .parse()
        .map_err(|_| format!("Latitude '{}' is not a number", latitude.trim()))?;
    let longitude: f64 = longitude
        .trim()
        .parse()
        .map_err(|_| format!("Longitude '{}' is not a number", longitude.trim()))?;

    let coord = Coordinate::new(latitude, longitude);
    if !coord.is_valid() {
        return Err("Latitude must be within ±90 and longitude within ±180".to_string());
    }
    Ok(coord)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(
            parse_coordinate(" 40.5", "-73.25 "),
            Ok(Coordinate::new(40.5, -73.25))
        );
        assert!(parse_coordinate("north", "0").unwrap_err().contains("Latitude"));
        assert!(parse_coordinate("0", "").unwrap_err().contains("Longitude"));
        assert!(parse_coordinate("95", "0").is_err());
        assert!(parse_coordinate("NaN", "0").is_err());
    }

    #[test]
    fn test_select_index() {
        let mut panel = ControlPanel::new(DestinationCatalog::built_in());
        let first = panel.catalog().iter().next().unwrap().coordinate();
        assert_eq!(panel.select_index(0), Some(first));
        assert_eq!(panel.select_index(999), None);
    }
}
