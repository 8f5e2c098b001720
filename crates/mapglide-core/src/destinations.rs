//! Named places the camera can fly to.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Destination {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

// Largest US cities by population
const BUILT_IN: &[(&str, f64, f64)] = &[
    ("New York", 40.6643, -73.9385),
    ("Los Angeles", 34.0194, -118.4108),
    ("Chicago", 41.8376, -87.6818),
    ("Houston", 29.7805, -95.3863),
    ("Philadelphia", 40.0094, -75.1333),
    ("Phoenix", 33.5722, -112.0880),
    ("San Antonio", 29.4724, -98.5251),
    ("San Diego", 32.8153, -117.1350),
    ("Dallas", 32.7757, -96.7967),
    ("San Jose", 37.2969, -121.8193),
    ("Washington", 38.910337, -77.04227),
];

/// Ordered list of destinations offered by the control panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationCatalog {
    destinations: Vec<Destination>,
}

impl DestinationCatalog {
    /// Build a catalog, dropping entries whose coordinates are out of range.
    pub fn new(destinations: Vec<Destination>) -> Self {
        let destinations = destinations
            .into_iter()
            .filter(|d| {
                let valid = d.coordinate().is_valid();
                if !valid {
                    log::warn!("Skipping destination '{}' with invalid coordinates", d.name);
                }
                valid
            })
            .collect();
        Self { destinations }
    }

    pub fn built_in() -> Self {
        Self::new(
            BUILT_IN
                .iter()
                .map(|&(name, lat, lon)| Destination::new(name, lat, lon))
                .collect(),
        )
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&Destination> {
        let name = name.trim();
        self.destinations
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.destinations.iter()
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

impl Default for DestinationCatalog {
    fn default() -> Self {
        Self::built_in()
    }
}
