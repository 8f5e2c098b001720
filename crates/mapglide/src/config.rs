//! Application configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `mapglide.ron` file (if exists), or the file passed with `--config`
//! 3. Environment variables prefixed with `MAPGLIDE_`
//!
//! Example environment variable: `MAPGLIDE_TRANSITION__DURATION_SECS=4.5`
//!
//! The access token may also come from `MapboxAccessToken`, which is only consulted when
//! none of the layers above set one.

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use mapglide_core::{
    AccessToken, CredentialError, Destination, DestinationCatalog, EaseType, ResizeOverrides,
    TransitionSettings, ViewportState,
};
use serde::{Deserialize, Serialize};

/// Environment variable consulted last for the access token.
pub const LEGACY_TOKEN_VAR: &str = "MapboxAccessToken";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub map: MapConfig,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub initial_view: InitialViewConfig,

    #[serde(default)]
    pub transition: TransitionConfig,

    #[serde(default)]
    pub gestures: GestureConfig,

    /// Replaces the built-in destination list when set
    #[serde(default)]
    pub destinations: Option<Vec<Destination>>,
}

/// Map style and credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Style reference handed to the map view
    pub style: String,
    pub access_token: Option<String>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            style: "mapbox://styles/nbumbarg/cj5frr9wz2ktl2srxp4dvpv8o".to_string(),
            access_token: None,
        }
    }
}

/// Window and viewport sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial window width
    pub width: u32,
    /// Initial window height
    pub height: u32,
    /// Fixed viewport width; follows the window when unset
    pub override_width: Option<u32>,
    /// Fixed viewport height; follows the window when unset
    pub override_height: Option<u32>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            override_width: None,
            override_height: None,
        }
    }
}

/// Camera position at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialViewConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

impl Default for InitialViewConfig {
    fn default() -> Self {
        let v = ViewportState::default();
        Self {
            latitude: v.latitude,
            longitude: v.longitude,
            zoom: v.zoom,
            pitch: v.pitch,
        }
    }
}

/// Camera flight settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Flight duration in seconds
    pub duration_secs: f64,
    /// Zoom level every flight ends at
    pub target_zoom: f64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        let t = TransitionSettings::default();
        Self {
            duration_secs: t.duration_secs,
            target_zoom: t.target_zoom,
        }
    }
}

/// Mouse gesture settings for the map view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom levels per wheel notch
    pub wheel_zoom_step: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.0,
            max_zoom: 20.0,
            wheel_zoom_step: 0.5,
        }
    }
}

impl AppConfig {
    /// Load configuration with layered priority.
    ///
    /// `path` replaces the optional `mapglide.ron` lookup with a required file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Ron).required(true),
            None => File::with_name("mapglide")
                .format(FileFormat::Ron)
                .required(false),
        };

        let builder = Config::builder()
            // Layer 1: Compiled defaults come from the serde defaults above
            // Layer 2: Config file
            .add_source(file)
            // Layer 3: Environment variables (MAPGLIDE_MAP__ACCESS_TOKEN, etc.)
            .add_source(
                Environment::with_prefix("MAPGLIDE")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config = builder.build().context("Failed to build configuration")?;

        let mut loaded: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        if loaded.map.access_token.is_none() {
            loaded.map.access_token = std::env::var(LEGACY_TOKEN_VAR).ok();
        }

        Ok(loaded)
    }

    /// Validated access token; its absence is fatal at startup.
    pub fn access_token(&self) -> Result<AccessToken, CredentialError> {
        AccessToken::new(
            self.map.access_token.clone(),
            "MAPGLIDE_MAP__ACCESS_TOKEN, MapboxAccessToken or --access-token",
        )
    }

    pub fn initial_viewport(&self) -> ViewportState {
        ViewportState {
            latitude: self.initial_view.latitude,
            longitude: self.initial_view.longitude,
            zoom: self.initial_view.zoom,
            pitch: self.initial_view.pitch,
            ..ViewportState::default()
        }
    }

    pub fn transition_settings(&self) -> TransitionSettings {
        TransitionSettings {
            duration_secs: self.transition.duration_secs,
            target_zoom: self.transition.target_zoom,
            easing: EaseType::QuadInOut,
        }
    }

    pub fn resize_overrides(&self) -> ResizeOverrides {
        ResizeOverrides {
            width: self.window.override_width,
            height: self.window.override_height,
        }
    }

    /// Effective configuration as a RON document loadable with `--config`.
    ///
    /// The access token is left out; supply it again through the environment or CLI.
    pub fn to_ron(&self) -> Result<String> {
        let mut printable = self.clone();
        printable.map.access_token = None;
        ron::ser::to_string_pretty(&printable, ron::ser::PrettyConfig::default())
            .context("Failed to serialize configuration")
    }

    pub fn catalog(&self) -> DestinationCatalog {
        match &self.destinations {
            Some(list) => DestinationCatalog::new(list.clone()),
            None => DestinationCatalog::built_in(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.transition.duration_secs, 10.0);
        assert_eq!(config.transition.target_zoom, 18.0);
        assert_eq!(config.initial_viewport(), ViewportState::default());
        assert_eq!(config.resize_overrides(), ResizeOverrides::default());
        assert_eq!(config.catalog(), DestinationCatalog::built_in());
    }

    #[test]
    fn test_missing_token_is_reported() {
        let config = AppConfig::default();
        let err = config.access_token().unwrap_err();
        assert!(err.to_string().contains("MapboxAccessToken"));
    }

    #[test]
    fn test_load_from_ron_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".ron")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            r#"(
                map: (access_token: Some("pk.test-token")),
                window: (override_width: Some(640)),
                transition: (duration_secs: 2.5),
                destinations: Some([(name: "Boston", latitude: 42.36, longitude: -71.06)]),
            )"#
        )
        .expect("write config");

        let config = AppConfig::load(Some(file.path())).expect("load config");
        assert_eq!(config.access_token().unwrap().expose(), "pk.test-token");
        assert_eq!(config.resize_overrides().width, Some(640));
        assert_eq!(config.resize_overrides().height, None);
        assert_eq!(config.transition_settings().duration_secs, 2.5);
        // Unset fields keep their defaults
        assert_eq!(config.transition_settings().target_zoom, 18.0);
        assert_eq!(config.map.style, MapConfig::default().style);

        let catalog = config.catalog();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("boston").is_some());
    }

    #[test]
    fn test_printed_config_loads_back() {
        let mut config = AppConfig::default();
        config.map.access_token = Some("pk.printed".to_string());
        config.window.override_height = Some(480);
        config.gestures.max_zoom = 17.0;

        let mut file = tempfile::Builder::new()
            .suffix(".ron")
            .tempfile()
            .expect("temp file");
        let printed = config.to_ron().expect("serialize");
        assert!(!printed.contains("pk.printed"));
        file.write_all(printed.as_bytes()).expect("write config");

        let loaded = AppConfig::load(Some(file.path())).expect("load config");
        assert_eq!(loaded.window.override_height, Some(480));
        assert_eq!(loaded.gestures.max_zoom, 17.0);
        assert!(loaded.destinations.is_none());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/mapglide.ron"))).is_err());
    }
}
