//! HYG star database
//!
//! Comma-separated records with a header row. Only five columns are used:
//! Bayer/Flamsteed designation (5), proper name (6), right ascension in
//! hours (7), declination in degrees (8) and visual magnitude (10).

use std::io::BufRead;
use std::path::Path;

use super::open_catalog;
use crate::coordinates::RaDec;
use crate::sky::Star;
use crate::{Result, SkyViewError};

const BF_FIELD: usize = 5;
const PROPER_FIELD: usize = 6;
const RA_FIELD: usize = 7;
const DEC_FIELD: usize = 8;
const MAG_FIELD: usize = 10;

/// Parse one catalog record into a star
///
/// The proper name is used when present, otherwise the Bayer/Flamsteed
/// designation.
pub fn parse_star_record(line: &str) -> Result<Star> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() <= MAG_FIELD {
        return Err(SkyViewError::ParseError(format!(
            "star record has {} fields, expected at least {}",
            fields.len(),
            MAG_FIELD + 1
        )));
    }

    let number = |index: usize, what: &str| -> Result<f64> {
        fields[index].trim().parse::<f64>().map_err(|e| {
            SkyViewError::ParseError(format!("bad {} {:?}: {}", what, fields[index], e))
        })
    };

    let ra = number(RA_FIELD, "right ascension")?;
    let dec = number(DEC_FIELD, "declination")?;
    let magnitude = number(MAG_FIELD, "magnitude")?;

    let proper = fields[PROPER_FIELD].trim();
    let name = if proper.is_empty() {
        fields[BF_FIELD].trim()
    } else {
        proper
    };

    Ok(Star::new(RaDec::new(ra, dec), magnitude, name))
}

/// Read every star from a catalog stream, skipping the header row
///
/// Blank lines are ignored; any other malformed record is an error.
pub fn read_star_catalog<R: BufRead>(reader: R) -> Result<Vec<Star>> {
    let mut stars = Vec::new();
    for (index, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let star = parse_star_record(&line).map_err(|e| {
            SkyViewError::ParseError(format!("line {}: {}", index + 1, e))
        })?;
        stars.push(star);
    }
    Ok(stars)
}

/// Load a star catalog from a `.csv` or `.csv.gz` file
pub fn load_star_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Star>> {
    let stars = read_star_catalog(open_catalog(&path)?)?;
    let named = stars.iter().filter(|s| !s.name.is_empty()).count();
    log::info!(
        "Loaded {} stars ({} named) from {}",
        stars.len(),
        named,
        path.as_ref().display()
    );
    Ok(stars)
}
