//! Color schemes
//!
//! A color scheme resolves every style role the renderer uses to a CSS
//! color string. Schemes are looked up by name; an unknown name is a typed
//! error and leaves the current selection untouched.

use crate::{Result, SkyViewError};

/// Colors for every drawn role
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColorScheme {
    /// Canvas background
    pub background: String,
    /// Star fill when opacity encoding is off
    pub text: String,
    /// Base color for opacity-encoded stars; a two-digit hex alpha is appended
    pub html_text: String,
    /// Sphere outline, radii and constellation lines
    pub line: String,
    /// Meridians
    pub meridian: String,
    /// Parallels and constellation boundaries
    pub parallel: String,
    /// Star labels
    pub star: String,
    /// Lines of the constellation under the crosshairs
    pub highlight: String,
}

impl ColorScheme {
    fn monochrome(background: &str, foreground: &str, foreground_hex: &str, highlight: &str) -> Self {
        Self {
            background: background.to_string(),
            text: foreground.to_string(),
            html_text: foreground_hex.to_string(),
            line: foreground.to_string(),
            meridian: foreground.to_string(),
            parallel: foreground.to_string(),
            star: foreground.to_string(),
            highlight: highlight.to_string(),
        }
    }
}

/// Named color schemes with a current selection
#[derive(Debug, Clone)]
pub struct ColorSchemes {
    schemes: Vec<(String, ColorScheme)>,
    selected: usize,
}

impl ColorSchemes {
    /// Names of the schemes, in cycling order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemes.iter().map(|(name, _)| name.as_str())
    }

    /// Currently selected scheme
    pub fn current(&self) -> &ColorScheme {
        &self.schemes[self.selected].1
    }

    /// Name of the currently selected scheme
    pub fn current_name(&self) -> &str {
        &self.schemes[self.selected].0
    }

    /// Select a scheme by name
    pub fn select(&mut self, name: &str) -> Result<()> {
        let index = self
            .schemes
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| SkyViewError::UnknownColorScheme(name.to_string()))?;
        self.selected = index;
        Ok(())
    }

    /// Advance to the next scheme, wrapping around
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.schemes.len();
    }

    /// Go back to the previous scheme, wrapping around
    pub fn select_prev(&mut self) {
        self.selected = (self.selected + self.schemes.len() - 1) % self.schemes.len();
    }

    /// Add or replace a scheme
    pub fn insert(&mut self, name: &str, scheme: ColorScheme) {
        match self.schemes.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = scheme,
            None => self.schemes.push((name.to_string(), scheme)),
        }
    }
}

impl Default for ColorSchemes {
    fn default() -> Self {
        Self {
            schemes: vec![
                (
                    "bright".to_string(),
                    ColorScheme::monochrome("white", "black", "#000000", "blue"),
                ),
                (
                    "dark".to_string(),
                    ColorScheme::monochrome("black", "white", "#ffffff", "yellow"),
                ),
                (
                    "red".to_string(),
                    ColorScheme::monochrome("black", "red", "#ff0000", "orange"),
                ),
            ],
            selected: 0,
        }
    }
}
