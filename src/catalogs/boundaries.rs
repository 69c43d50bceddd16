//! IAU constellation boundary table
//!
//! Each record is one polygon vertex in B1875 coordinates:
//!
//! ```text
//!  1.50000 +10.00000 PSC  CET
//! ```
//!
//! right ascension in hours, declination in degrees, the constellation the
//! vertex belongs to and, for every vertex after a polygon's first, the
//! neighbouring constellation across the edge ending there. A record
//! without the second name starts a new polygon.
//!
//! Consecutive vertices at the same right ascension form a meridian edge;
//! these feed the constellation lookup and are drawn as great-circle
//! segments. Every other edge runs along a parallel of declination.

use regex::Regex;
use std::io::BufRead;
use std::path::Path;

use super::open_catalog;
use crate::constants::HOURS_PER_TURN;
use crate::constellation::{ConstellationBoundaries, ConstellationBoundaryLine};
use crate::coordinates::angle::positive_modulo;
use crate::coordinates::RaDec;
use crate::sky::{GreatCircleSegment, ParallelLineSegment, SegmentKind, SkyObject};
use crate::{Result, SkyViewError};

const BOUNDARY_RECORD: &str = r"([ \d]\d\.\d{5}) ([\+-]\d{2}\.\d{5}) (\w+)(?: {2}(\w+))?";

fn boundary_record() -> Result<Regex> {
    Regex::new(BOUNDARY_RECORD)
        .map_err(|e| SkyViewError::DataError(format!("Failed to compile boundary regex: {}", e)))
}

/// One vertex of a constellation boundary polygon
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPoint {
    /// Right ascension in hours (B1875)
    pub ra: f64,
    /// Declination in degrees (B1875)
    pub dec: f64,
    pub constellation1: String,
    /// Absent on the first vertex of a polygon
    pub constellation2: Option<String>,
}

/// Parse one boundary record
pub fn parse_boundary_point(record: &str) -> Result<BoundaryPoint> {
    parse_record(&boundary_record()?, record)
}

fn parse_record(pattern: &Regex, record: &str) -> Result<BoundaryPoint> {
    let caps = pattern.captures(record).ok_or_else(|| {
        SkyViewError::ParseError(format!("not a boundary record: {:?}", record))
    })?;

    let number = |index: usize| -> Result<f64> {
        let text = caps.get(index).map_or("", |m| m.as_str()).trim();
        text.parse::<f64>()
            .map_err(|e| SkyViewError::ParseError(format!("bad number {:?}: {}", text, e)))
    };

    Ok(BoundaryPoint {
        ra: number(1)?,
        dec: number(2)?,
        constellation1: caps.get(3).map_or("", |m| m.as_str()).to_string(),
        constellation2: caps.get(4).map(|m| m.as_str().to_string()),
    })
}

/// Read all boundary records, ignoring blank lines
pub fn read_boundary_points<R: BufRead>(reader: R) -> Result<Vec<BoundaryPoint>> {
    let pattern = boundary_record()?;
    let mut points = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        points.push(parse_record(&pattern, &line)?);
    }
    Ok(points)
}

/// Turn the vertex list into drawable edges and the lookup table
///
/// Meridian edges are owned by the constellation of their second vertex.
/// Parallel edges are oriented so that they run counter-clockwise, which
/// assumes no single edge spans more than 12 hours.
pub fn build_boundaries(points: &[BoundaryPoint]) -> (Vec<SkyObject>, ConstellationBoundaries) {
    let mut objects = Vec::new();
    let mut boundaries = ConstellationBoundaries::new();

    for pair in points.windows(2) {
        let (p1, p2) = (&pair[0], &pair[1]);
        if p2.constellation2.is_none() {
            continue;
        }

        if p1.ra == p2.ra {
            boundaries.add_line(
                &p2.constellation1,
                ConstellationBoundaryLine::new(p1.ra, p1.dec, p2.dec),
            );
            objects.push(SkyObject::GreatCircleSegment(GreatCircleSegment::new(
                &RaDec::new(p1.ra, p1.dec),
                &RaDec::new(p2.ra, p2.dec),
                SegmentKind::Boundary,
            )));
        } else {
            let (start, stop) = if positive_modulo(p2.ra - p1.ra, HOURS_PER_TURN) > 12.0 {
                (p2.ra, p1.ra)
            } else {
                (p1.ra, p2.ra)
            };
            objects.push(SkyObject::ParallelLineSegment(ParallelLineSegment::new(
                p1.dec, start, stop,
            )));
        }
    }

    (objects, boundaries)
}

/// Load and build the boundary table from a file
pub fn load_boundaries<P: AsRef<Path>>(
    path: P,
) -> Result<(Vec<SkyObject>, ConstellationBoundaries)> {
    let points = read_boundary_points(open_catalog(&path)?)?;
    let (objects, boundaries) = build_boundaries(&points);
    log::info!(
        "Loaded {} boundary vertices ({} edges, {} constellations) from {}",
        points.len(),
        objects.len(),
        boundaries.len(),
        path.as_ref().display()
    );
    Ok((objects, boundaries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const BOX: &str = " 1.00000 +00.00000 BOX
 1.00000 +10.00000 BOX  CET
 2.00000 +10.00000 BOX  PSC
 2.00000 +00.00000 BOX  ARI
 1.00000 +00.00000 BOX  TRI
23.50000 -05.00000 WRP
 0.50000 -05.00000 WRP  AQR
";

    #[test]
    fn test_parse_first_vertex() {
        let point = parse_boundary_point(" 1.50000 +10.00000 PSC").unwrap();
        assert_eq!(point.ra, 1.5);
        assert_eq!(point.dec, 10.0);
        assert_eq!(point.constellation1, "PSC");
        assert_eq!(point.constellation2, None);
    }

    #[test]
    fn test_parse_edge_vertex() {
        let point = parse_boundary_point("22.86667 -52.66667 GRU  TUC").unwrap();
        assert_eq!(point.ra, 22.86667);
        assert_eq!(point.dec, -52.66667);
        assert_eq!(point.constellation2.as_deref(), Some("TUC"));
    }

    #[test]
    fn test_boundary_record_pattern() {
        let pattern = boundary_record().unwrap();
        assert!(pattern.is_match(" 1.50000 +10.00000 PSC"));
        assert!(!pattern.is_match("1.5 +10 PSC"));
    }

    #[test]
    fn test_read_reports_bad_record() {
        let result = read_boundary_points(Cursor::new(" 1.00000 +00.00000 BOX\nnot a record\n"));
        assert!(matches!(result, Err(SkyViewError::ParseError(_))));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_boundary_point("no numbers here"),
            Err(SkyViewError::ParseError(_))
        ));
    }

    #[test]
    fn test_build_box() {
        let points = read_boundary_points(Cursor::new(BOX)).unwrap();
        assert_eq!(points.len(), 7);

        let (objects, boundaries) = build_boundaries(&points);
        // Four box edges plus the single wrapping edge; the pair crossing
        // into the new polygon is skipped
        assert_eq!(objects.len(), 5);
        let meridians = objects
            .iter()
            .filter(|o| matches!(o, SkyObject::GreatCircleSegment(_)))
            .count();
        assert_eq!(meridians, 2);

        let lines = boundaries.lines_for("BOX").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(boundaries.locate(1.5, 5.0), Some("BOX"));
        assert_eq!(boundaries.locate(3.0, 5.0), None);
    }

    #[test]
    fn test_parallel_edges_run_counter_clockwise() {
        let points = read_boundary_points(Cursor::new(BOX)).unwrap();
        let (objects, _) = build_boundaries(&points);
        let wrapping = objects
            .iter()
            .filter_map(|o| match o {
                SkyObject::ParallelLineSegment(s) => Some(s),
                _ => None,
            })
            .last()
            .unwrap();
        // 23.5h to 0.5h already runs eastward and keeps its order
        assert_eq!(*wrapping, ParallelLineSegment::new(-5.0, 23.5, 0.5));

        let backwards = vec![
            parse_boundary_point(" 2.00000 +10.00000 AAA").unwrap(),
            parse_boundary_point(" 1.00000 +10.00000 AAA  BBB").unwrap(),
        ];
        let (objects, _) = build_boundaries(&backwards);
        assert_eq!(
            objects,
            vec![SkyObject::ParallelLineSegment(ParallelLineSegment::new(
                10.0, 1.0, 2.0
            ))]
        );
    }
}
