//! Viewer configuration
//!
//! Every tunable the viewer needs lives in [`ViewConfig`]: sphere sizing,
//! grid density, input sensitivities and zoom bounds. It is built once and
//! handed to [`crate::view::ViewState`] at construction.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the sky view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Diameter of the sphere at zoom 1, as a multiple of the viewport height
    pub great_circle_size_factor: f64,
    /// Pixels between the drawn sphere and its silhouette circle
    pub great_circle_border: f64,
    /// Number of meridians in the grid (each drawn as a full great circle)
    pub meridian_count: usize,
    /// Number of parallels of declination in the grid
    pub parallel_count: usize,
    /// Pixels of mouse movement per radian of rotation
    pub movement_scale: f64,
    /// Frames of a held key per radian of rotation
    pub key_movement_scale: f64,
    /// Zoom factor applied per wheel notch
    pub wheel_scale: f64,
    /// Zoom factor applied per frame of a held zoom key
    pub key_zoom_scale: f64,
    /// Lowest allowed zoom
    pub min_zoom: f64,
    /// Highest allowed zoom, unbounded when `None`
    pub max_zoom: Option<f64>,
    /// Lowest allowed star visibility factor
    pub min_star_factor: f64,
    /// Outer extent of each crosshair stroke, in pixels from the center
    pub crosshair_size: f64,
    /// Inner gap of each crosshair stroke, in pixels from the center
    pub crosshair_space: f64,
    /// Longest great-circle segment drawn as a single straight chord, in radians
    pub max_chord_span: f64,
    /// Declination above which an unmatched pointing is in the north polar constellation
    pub north_polar_dec: f64,
    /// Declination below which an unmatched pointing is in the south polar constellation
    pub south_polar_dec: f64,
    /// Color scheme used when none is persisted
    pub default_color_scheme: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            great_circle_size_factor: 1.2,
            great_circle_border: 1.0,
            meridian_count: 6,
            parallel_count: 11,
            movement_scale: 100.0,
            key_movement_scale: 25.0,
            wheel_scale: 0.95,
            key_zoom_scale: 0.98,
            min_zoom: 0.5,
            max_zoom: None,
            min_star_factor: 0.1,
            crosshair_size: 35.0,
            crosshair_space: 7.0,
            max_chord_span: 0.05,
            north_polar_dec: 86.5,
            south_polar_dec: -82.5,
            default_color_scheme: "red".to_string(),
        }
    }
}

impl ViewConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file
    ///
    /// Missing fields take their default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: ViewConfig = serde_json::from_str(&text)?;
        log::debug!("Loaded view config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Set the zoom bounds
    pub fn with_zoom_bounds(mut self, min_zoom: f64, max_zoom: Option<f64>) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Set the grid density
    pub fn with_grid(mut self, meridian_count: usize, parallel_count: usize) -> Self {
        self.meridian_count = meridian_count;
        self.parallel_count = parallel_count;
        self
    }

    /// Set the input sensitivities
    pub fn with_movement_scales(mut self, mouse: f64, keys: f64) -> Self {
        self.movement_scale = mouse;
        self.key_movement_scale = keys;
        self
    }

    /// Set the default color scheme
    pub fn with_default_color_scheme(mut self, name: &str) -> Self {
        self.default_color_scheme = name.to_string();
        self
    }

    /// Clamp a zoom value into the configured bounds
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        let zoom = zoom.max(self.min_zoom);
        match self.max_zoom {
            Some(max) => zoom.min(max),
            None => zoom,
        }
    }
}
