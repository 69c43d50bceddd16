//! Constellation stick figures and name abbreviations (JSON)
//!
//! Stick figures map each constellation code to a list of polylines, each a
//! list of `[ra_hours, dec_degrees]` vertices:
//!
//! ```json
//! { "Ori": [[[5.92, 7.41], [5.42, 6.35]], [[5.60, -1.20], [5.68, -1.94]]] }
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use super::open_catalog;
use crate::constellation::Abbreviations;
use crate::coordinates::RaDec;
use crate::sky::{GreatCircleSegment, SegmentKind, SkyObject};
use crate::Result;

type Polylines = BTreeMap<String, Vec<Vec<[f64; 2]>>>;

/// Parse stick-figure JSON into one segment per consecutive vertex pair
pub fn parse_constellation_lines(json: &str) -> Result<Vec<SkyObject>> {
    let polylines: Polylines = serde_json::from_str(json)?;

    let mut objects = Vec::new();
    for (code, lines) in &polylines {
        for line in lines {
            for pair in line.windows(2) {
                let from = RaDec::new(pair[0][0], pair[0][1]);
                let to = RaDec::new(pair[1][0], pair[1][1]);
                objects.push(SkyObject::GreatCircleSegment(GreatCircleSegment::new(
                    &from,
                    &to,
                    SegmentKind::ConstellationLine(code.clone()),
                )));
            }
        }
    }
    Ok(objects)
}

fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut text = String::new();
    open_catalog(path)?.read_to_string(&mut text)?;
    Ok(text)
}

/// Load stick figures from a JSON file
pub fn load_constellation_lines<P: AsRef<Path>>(path: P) -> Result<Vec<SkyObject>> {
    let objects = parse_constellation_lines(&read_text(&path)?)?;
    log::info!(
        "Loaded {} constellation line segments from {}",
        objects.len(),
        path.as_ref().display()
    );
    Ok(objects)
}

/// Load the constellation and Greek letter abbreviation table
pub fn load_abbreviations<P: AsRef<Path>>(path: P) -> Result<Abbreviations> {
    let abbreviations: Abbreviations = serde_json::from_str(&read_text(&path)?)?;
    log::info!(
        "Loaded {} constellation names and {} Greek letters from {}",
        abbreviations.constellations.len(),
        abbreviations.greek_letters.len(),
        path.as_ref().display()
    );
    Ok(abbreviations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SkyViewError;

    #[test]
    fn test_segments_per_polyline() {
        let json = r#"{
            "Ori": [[[5.92, 7.41], [5.42, 6.35], [5.53, -0.30]], [[5.60, -1.20], [5.68, -1.94]]],
            "Cru": [[[12.44, -63.1], [12.52, -57.1]]]
        }"#;
        let objects = parse_constellation_lines(json).unwrap();
        assert_eq!(objects.len(), 4);

        let orion = objects
            .iter()
            .filter(|o| {
                matches!(o, SkyObject::GreatCircleSegment(s)
                    if *s.kind() == SegmentKind::ConstellationLine("Ori".to_string()))
            })
            .count();
        assert_eq!(orion, 3);
    }

    #[test]
    fn test_single_vertex_polyline_draws_nothing() {
        let objects = parse_constellation_lines(r#"{"Sge": [[[19.9, 18.5]]]}"#).unwrap();
        assert!(objects.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_constellation_lines(r#"{"Ori": [[5.92, 7.41]]}"#),
            Err(SkyViewError::JsonError(_))
        ));
    }

    #[test]
    fn test_load_abbreviations_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abbreviations.json");
        std::fs::write(
            &path,
            r#"{
                "constellations": {"Ori": ["Orion", "Orionis"]},
                "greekLetters": {"Alp": ["α", "Alpha"]}
            }"#,
        )
        .unwrap();

        let abbreviations = load_abbreviations(&path).unwrap();
        assert_eq!(abbreviations.constellation_name("Ori"), Some("Orion"));
        assert_eq!(abbreviations.full_star_name("Alp Ori"), "Alpha Orionis");
    }
}
