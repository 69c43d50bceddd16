//! Catalog loading
//!
//! Text catalogs the viewer draws from: a HYG-style star CSV, the IAU
//! constellation boundary table, stick-figure constellation lines and the
//! abbreviation table used to spell out names. Every loader returns a
//! [`crate::Result`]; callers that prefer to carry on without the data log
//! the error and continue.
//!
//! Files ending in `.gz` are decompressed transparently.

pub mod boundaries;
pub mod hyg;
pub mod lines;

pub use boundaries::{build_boundaries, load_boundaries, parse_boundary_point, BoundaryPoint};
pub use hyg::{load_star_catalog, parse_star_record, read_star_catalog};
pub use lines::{load_abbreviations, load_constellation_lines, parse_constellation_lines};

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Open a catalog file for line-by-line reading, gunzipping `.gz` files
pub fn open_catalog<P: AsRef<Path>>(path: P) -> crate::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let is_gzip = path.extension().map_or(false, |ext| ext == "gz");
    if is_gzip {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
