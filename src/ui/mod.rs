//! Display toggles
//!
//! The set of optional overlays the user can switch on and off. Toggle names
//! are a closed enum; the persisted form is the space-separated list of
//! kebab-case names.

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::SkyViewError;

/// A single display toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UiToggle {
    StarNames,
    Crosshairs,
    StarSizes,
    ConstellationBoundaries,
    StarOpacity,
    Stars,
    Globe,
    ReversedControl,
    DecimalDisplay,
    Movie,
    ConstellationLines,
    HighlightConst,
    Stat,
    Extra,
}

impl UiToggle {
    /// All toggles, in menu order
    pub const ALL: [UiToggle; 14] = [
        UiToggle::StarNames,
        UiToggle::Crosshairs,
        UiToggle::StarSizes,
        UiToggle::ConstellationBoundaries,
        UiToggle::StarOpacity,
        UiToggle::Stars,
        UiToggle::Globe,
        UiToggle::ReversedControl,
        UiToggle::DecimalDisplay,
        UiToggle::Movie,
        UiToggle::ConstellationLines,
        UiToggle::HighlightConst,
        UiToggle::Stat,
        UiToggle::Extra,
    ];

    /// Persisted name
    pub fn name(&self) -> &'static str {
        match self {
            UiToggle::StarNames => "star-names",
            UiToggle::Crosshairs => "crosshairs",
            UiToggle::StarSizes => "star-sizes",
            UiToggle::ConstellationBoundaries => "constellation-boundaries",
            UiToggle::StarOpacity => "star-opacity",
            UiToggle::Stars => "stars",
            UiToggle::Globe => "globe",
            UiToggle::ReversedControl => "reversed-control",
            UiToggle::DecimalDisplay => "decimal-display",
            UiToggle::Movie => "movie",
            UiToggle::ConstellationLines => "constellation-lines",
            UiToggle::HighlightConst => "highlight-const",
            UiToggle::Stat => "stat",
            UiToggle::Extra => "extra",
        }
    }

    /// Menu description
    pub fn description(&self) -> &'static str {
        match self {
            UiToggle::StarNames => "Names of all stars",
            UiToggle::Crosshairs => "Crosshairs",
            UiToggle::StarSizes => "Magnitude of stars displayed via size",
            UiToggle::ConstellationBoundaries => "Constellation boundaries",
            UiToggle::StarOpacity => "Magnitude of stars displayed via opacity",
            UiToggle::Stars => "All stars",
            UiToggle::Globe => "Arcs of right ascension and declination",
            UiToggle::ReversedControl => "Reversed control",
            UiToggle::DecimalDisplay => "Decimal display",
            UiToggle::Movie => "Auto-rotate (movie)",
            UiToggle::ConstellationLines => "Constellation lines",
            UiToggle::HighlightConst => "Highlight constellation",
            UiToggle::Stat => "Location (RA/dec)",
            UiToggle::Extra => "Nearest star and constellation information",
        }
    }
}

impl FromStr for UiToggle {
    type Err = SkyViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UiToggle::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| SkyViewError::ParseError(format!("unknown display toggle {:?}", s)))
    }
}

impl std::fmt::Display for UiToggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of enabled toggles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiFlags {
    enabled: BTreeSet<UiToggle>,
}

impl UiFlags {
    /// A set with nothing enabled
    pub fn empty() -> Self {
        Self {
            enabled: BTreeSet::new(),
        }
    }

    /// Whether `toggle` is on
    pub fn has(&self, toggle: UiToggle) -> bool {
        self.enabled.contains(&toggle)
    }

    /// Flip `toggle`, returning its new state
    pub fn toggle(&mut self, toggle: UiToggle) -> bool {
        if !self.enabled.remove(&toggle) {
            self.enabled.insert(toggle);
            return true;
        }
        false
    }

    /// Force `toggle` to a state
    pub fn set(&mut self, toggle: UiToggle, on: bool) {
        if on {
            self.enabled.insert(toggle);
        } else {
            self.enabled.remove(&toggle);
        }
    }

    /// Parse the persisted form, skipping unknown names
    pub fn from_persisted(value: &str) -> Self {
        let enabled = value
            .split_whitespace()
            .filter_map(|name| match name.parse::<UiToggle>() {
                Ok(toggle) => Some(toggle),
                Err(e) => {
                    log::warn!("Dropping persisted toggle: {}", e);
                    None
                }
            })
            .collect();
        Self { enabled }
    }

    /// Space-separated persisted form
    pub fn to_persisted(&self) -> String {
        self.enabled
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Enabled toggles
    pub fn iter(&self) -> impl Iterator<Item = UiToggle> + '_ {
        self.enabled.iter().copied()
    }
}

impl Default for UiFlags {
    fn default() -> Self {
        let enabled = [
            UiToggle::Crosshairs,
            UiToggle::StarNames,
            UiToggle::StarSizes,
            UiToggle::Globe,
            UiToggle::Stars,
            UiToggle::ConstellationBoundaries,
            UiToggle::ConstellationLines,
            UiToggle::HighlightConst,
            UiToggle::Stat,
            UiToggle::Extra,
        ]
        .into_iter()
        .collect();
        Self { enabled }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for toggle in UiToggle::ALL {
            assert_eq!(toggle.name().parse::<UiToggle>().unwrap(), toggle);
        }
        assert!("sparkles".parse::<UiToggle>().is_err());
    }

    #[test]
    fn test_default_set() {
        let flags = UiFlags::default();
        assert!(flags.has(UiToggle::Globe));
        assert!(flags.has(UiToggle::Crosshairs));
        assert!(!flags.has(UiToggle::Movie));
        assert!(!flags.has(UiToggle::DecimalDisplay));
    }

    #[test]
    fn test_toggle_flips() {
        let mut flags = UiFlags::empty();
        assert!(flags.toggle(UiToggle::Movie));
        assert!(flags.has(UiToggle::Movie));
        assert!(!flags.toggle(UiToggle::Movie));
        assert!(!flags.has(UiToggle::Movie));
    }

    #[test]
    fn test_persisted_round_trip() {
        let flags = UiFlags::default();
        assert_eq!(UiFlags::from_persisted(&flags.to_persisted()), flags);
    }

    #[test]
    fn test_persisted_skips_unknown_names() {
        let flags = UiFlags::from_persisted("globe  bogus stars");
        assert!(flags.has(UiToggle::Globe));
        assert!(flags.has(UiToggle::Stars));
        assert_eq!(flags.iter().count(), 2);
    }
}
