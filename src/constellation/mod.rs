//! # Constellation Lookup
//!
//! Finds the IAU constellation containing a sky position. The official
//! boundaries are polygons whose edges run along meridians and parallels
//! of the B1875.0 equinox, so a J2000 position is precessed to B1875 first.
//!
//! ## Algorithm
//!
//! For each constellation, only its meridian edges matter: a position is
//! inside when a ray from the constellation's own starting meridian to the
//! position, along the position's declination, crosses an odd number of
//! them. Constellations are tested in alphabetical order and the first hit
//! wins, which resolves the two places near the poles where boundary data
//! overlaps (Cep over UMi, Men over Oct).
//!
//! ## Examples
//!
//! ```rust
//! use skyview::constellation::{ConstellationBoundaries, ConstellationBoundaryLine};
//!
//! let mut boundaries = ConstellationBoundaries::new();
//! boundaries.add_line("Box", ConstellationBoundaryLine::new(1.0, 0.0, 10.0));
//! boundaries.add_line("Box", ConstellationBoundaryLine::new(2.0, 0.0, 10.0));
//! assert_eq!(boundaries.locate(1.5, 5.0), Some("Box"));
//! assert_eq!(boundaries.locate(5.0, 5.0), None);
//! ```

use crate::config::ViewConfig;
use crate::constants::{
    HOURS_PER_TURN, LOADING_CONSTELLATIONS, NORTH_POLAR_CONSTELLATION,
    SOUTH_POLAR_CONSTELLATION, UNKNOWN_CONSTELLATION,
};
use crate::coordinates::angle::positive_modulo;
use crate::coordinates::RaDec;
use crate::precessionlib::precess_j2000_to_b1875;
use crate::sky::Star;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// A meridian edge of a constellation boundary, in B1875 coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstellationBoundaryLine {
    /// Right ascension in hours
    pub ra: f64,
    /// Lower declination in degrees (inclusive)
    pub dec_min: f64,
    /// Upper declination in degrees (exclusive)
    pub dec_max: f64,
}

impl ConstellationBoundaryLine {
    /// Create an edge, ordering the declinations
    pub fn new(ra: f64, dec1: f64, dec2: f64) -> Self {
        Self {
            ra,
            dec_min: dec1.min(dec2),
            dec_max: dec1.max(dec2),
        }
    }

    /// Whether a ray along `dec` crosses this edge
    pub fn contains_dec(&self, dec: f64) -> bool {
        self.dec_min <= dec && dec < self.dec_max
    }
}

/// Meridian edges of every loaded constellation, keyed by code
#[derive(Debug, Clone, Default)]
pub struct ConstellationBoundaries {
    lines: BTreeMap<String, Vec<ConstellationBoundaryLine>>,
}

impl ConstellationBoundaries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_line(&mut self, constellation: &str, line: ConstellationBoundaryLine) {
        self.lines
            .entry(constellation.to_string())
            .or_default()
            .push(line);
    }

    /// Merge another set of edges into this one
    pub fn extend(&mut self, other: ConstellationBoundaries) {
        for (code, lines) in other.lines {
            self.lines.entry(code).or_default().extend(lines);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of constellations with at least one edge
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines_for(&self, constellation: &str) -> Option<&[ConstellationBoundaryLine]> {
        self.lines.get(constellation).map(Vec::as_slice)
    }

    /// Constellation containing the B1875 position `ra` hours, `dec` degrees
    pub fn locate(&self, ra: f64, dec: f64) -> Option<&str> {
        self.lines
            .iter()
            .find(|(_, lines)| contains(lines, ra, dec))
            .map(|(code, _)| code.as_str())
    }

    /// Constellation under a J2000 position, with the fallbacks used for
    /// display
    ///
    /// Falls back to a loading message when nothing is loaded, to the polar
    /// constellations beyond the configured declinations, and to an
    /// "unknown" label otherwise.
    pub fn lookup(&self, j2000: &RaDec, config: &ViewConfig) -> String {
        let b1875 = precess_j2000_to_b1875(j2000);
        if let Some(code) = self.locate(b1875.ra, b1875.dec) {
            return code.to_string();
        }
        if self.is_empty() {
            return LOADING_CONSTELLATIONS.to_string();
        }
        if b1875.dec >= config.north_polar_dec {
            return NORTH_POLAR_CONSTELLATION.to_string();
        }
        if b1875.dec <= config.south_polar_dec {
            return SOUTH_POLAR_CONSTELLATION.to_string();
        }
        UNKNOWN_CONSTELLATION.to_string()
    }
}

/// Crossing-parity test for one constellation's edges
fn contains(lines: &[ConstellationBoundaryLine], ra: f64, dec: f64) -> bool {
    let ra_values: Vec<f64> = lines
        .iter()
        .filter(|line| line.contains_dec(dec))
        .map(|line| line.ra)
        .collect();
    if ra_values.is_empty() {
        return false;
    }

    let start = ray_start(&ra_values);
    let shifted_ra = positive_modulo(ra - start, HOURS_PER_TURN);
    let crossings = ra_values
        .iter()
        .filter(|&&v| positive_modulo(v - start, HOURS_PER_TURN) < shifted_ra)
        .count();
    crossings % 2 == 1
}

/// Meridian the crossing ray starts from
///
/// Normally the smallest RA among the edges; for a constellation that
/// straddles 0h (edges both below and above 12h, at least 12h apart) the
/// smallest RA above 12h is its western end.
fn ray_start(ra_values: &[f64]) -> f64 {
    let min_small = min_where(ra_values, |v| v <= 12.0);
    let min_large = min_where(ra_values, |v| v > 12.0);

    if min_small.is_infinite() || min_large.is_infinite() || min_large - min_small < 12.0 {
        min_where(ra_values, |_| true)
    } else {
        min_large
    }
}

fn min_where(values: &[f64], keep: impl Fn(f64) -> bool) -> f64 {
    values
        .iter()
        .copied()
        .filter(|&v| keep(v))
        .fold(f64::INFINITY, f64::min)
}

/// Pad a 3-letter constellation code with a no-break space so labels line
/// up
pub fn padded_label(label: &str) -> String {
    if label.chars().count() == 3 {
        format!("{}\u{00a0}", label)
    } else {
        label.to_string()
    }
}

/// Full names for constellation codes and Greek letter abbreviations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Abbreviations {
    /// Code to `[name, genitive]`, e.g. `"Ori": ["Orion", "Orionis"]`
    pub constellations: HashMap<String, [String; 2]>,
    /// Abbreviation to `[symbol, name]`, e.g. `"Alp": ["α", "Alpha"]`
    #[serde(rename = "greekLetters")]
    pub greek_letters: HashMap<String, [String; 2]>,
}

impl Abbreviations {
    /// Full name of a constellation code, if known
    pub fn constellation_name(&self, code: &str) -> Option<&str> {
        self.constellations.get(code).map(|names| names[0].as_str())
    }

    /// Expand a catalog star name for display
    ///
    /// A trailing constellation code becomes its genitive and a Greek
    /// letter abbreviation at the first capital letter is spelled out, so
    /// `"Alp Ori"` reads `"Alpha Orionis"`.
    pub fn full_star_name(&self, name: &str) -> String {
        let chars: Vec<char> = name.chars().collect();

        let (mut stem, genitive) = match chars.len().checked_sub(3) {
            Some(split) => {
                let code: String = chars[split..].iter().collect();
                match self.constellations.get(&code) {
                    Some(names) => (chars[..split].to_vec(), names[1].as_str()),
                    None => (chars.clone(), ""),
                }
            }
            None => (chars.clone(), ""),
        };

        if let Some(first) = stem.iter().position(|c| c.is_ascii_uppercase()) {
            let end = (first + 3).min(stem.len());
            let abbreviation: String = stem[first..end].iter().collect();
            // Proper names such as "Betelgeuse" start with a letter abbreviation too
            let whole_word = stem.get(end).map_or(true, |c| !c.is_ascii_lowercase());
            if let (true, Some(letter)) = (whole_word, self.greek_letters.get(&abbreviation)) {
                stem.splice(first..end, letter[1].chars());
            }
        }

        let mut full: String = stem.into_iter().collect();
        full.push_str(genitive);
        full
    }
}

/// Named star closest to `pointing`
pub fn nearest_named_star<'a, I>(stars: I, pointing: &RaDec) -> Option<&'a Star>
where
    I: IntoIterator<Item = &'a Star>,
{
    stars
        .into_iter()
        .filter(|s| !s.name.is_empty())
        .map(|s| (s.ra_dec.angular_distance(pointing), s))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, s)| s)
}
