//! End-to-end checks of the sky view: catalogs loaded from files, frames
//! rendered through the public API, state persisted between sessions.

use std::path::{Path, PathBuf};

use approx::assert_abs_diff_eq;
use skyview::persist::{JsonFileStore, MemoryStore, StateStore};
use skyview::projection::Stroke;
use skyview::{DrawCommand, RaDec, SkyView, UiToggle, ViewConfig, Viewport};
use tempfile::TempDir;

const STARS: &str = "id,hip,hd,hr,gl,bf,proper,ra,dec,dist,mag
27919,27989,39801,2061,,58Alp Ori,Betelgeuse,5.919529,7.407063,152.6718,0.45
9001,,,,,Alp Box,,2.05,10.2,30.0,1.0
9002,,,,,,,2.1,9.5,80.0,5.5
";

const BOUNDARIES: &str = " 1.00000 +00.00000 Box
 1.00000 +20.00000 Box  Aaa
 3.00000 +20.00000 Box  Aaa
 3.00000 +00.00000 Box  Aaa
 1.00000 +00.00000 Box  Aaa
";

const LINES: &str = r#"{"Box": [[[1.8, 8.0], [2.2, 12.0]]]}"#;

const ABBREVIATIONS: &str = r#"{
    "constellations": {"Box": ["Boxus", "Boxis"]},
    "greekLetters": {"Alp": ["α", "Alpha"]}
}"#;

struct Catalogs {
    _dir: TempDir,
    stars: PathBuf,
    boundaries: PathBuf,
    lines: PathBuf,
    abbreviations: PathBuf,
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn catalogs() -> Catalogs {
    let dir = tempfile::tempdir().unwrap();
    Catalogs {
        stars: write(dir.path(), "hyg.csv", STARS),
        boundaries: write(dir.path(), "bound.dat", BOUNDARIES),
        lines: write(dir.path(), "lines.json", LINES),
        abbreviations: write(dir.path(), "abbreviations.json", ABBREVIATIONS),
        _dir: dir,
    }
}

fn loaded_sky(catalogs: &Catalogs) -> SkyView {
    let mut sky = SkyView::in_memory(ViewConfig::default(), Viewport::new(800.0, 600.0, 1.0));
    assert!(sky.load_star_catalog(&catalogs.stars));
    assert!(sky.load_boundaries(&catalogs.boundaries));
    assert!(sky.load_constellation_lines(&catalogs.lines));
    assert!(sky.load_abbreviations(&catalogs.abbreviations));
    sky
}

#[test]
fn test_default_view() {
    let mut sky = SkyView::in_memory(ViewConfig::default(), Viewport::new(800.0, 600.0, 1.0));
    let view = sky.view();
    assert_abs_diff_eq!(view.pointing().ra, 18.0, epsilon = 1e-9);
    assert_abs_diff_eq!(view.pointing().dec, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(view.size(), 360.0);
    assert_abs_diff_eq!(view.size_borderless(), 359.0);

    let frame = sky.frame().unwrap();
    assert_eq!(
        frame.status.as_deref(),
        Some("RA 18h 00m 00s Dec +00\u{b0} 00' 00\" | loading constellations...")
    );
}

#[test]
fn test_constellation_under_crosshairs() {
    let catalogs = catalogs();
    let mut sky = loaded_sky(&catalogs);

    sky.point_at(&RaDec::new(2.0, 10.0));
    let frame = sky.frame().unwrap();
    assert_eq!(sky.current_constellation(), "Box");
    assert!(frame.status.unwrap().ends_with("| Box\u{a0}"));
    assert_eq!(
        frame.extra.unwrap(),
        vec![
            "Constellation: Box\u{a0}| Boxus".to_string(),
            "Nearest star: \u{a0}Alpha Boxis".to_string(),
        ]
    );

    sky.point_at(&RaDec::new(5.0, 10.0));
    sky.frame();
    assert_eq!(sky.current_constellation(), "constellation unknown");

    sky.point_at(&RaDec::new(6.0, 89.0));
    sky.frame();
    assert_eq!(sky.current_constellation(), "UMi");

    sky.point_at(&RaDec::new(6.0, -85.0));
    sky.frame();
    assert_eq!(sky.current_constellation(), "Oct");
}

#[test]
fn test_current_constellation_lines_are_highlighted() {
    let catalogs = catalogs();
    let mut sky = loaded_sky(&catalogs);
    sky.point_at(&RaDec::new(2.0, 10.0));

    let highlight = sky.color_schemes().current().highlight.clone();
    let is_highlight = |c: &DrawCommand| {
        matches!(c, DrawCommand::Line { stroke: Stroke { color, width, .. }, .. }
            if *color == highlight && *width == 2.0)
    };

    let frame = sky.frame().unwrap();
    assert!(frame.commands.iter().any(is_highlight));

    sky.toggle(UiToggle::HighlightConst);
    let frame = sky.frame().unwrap();
    assert!(!frame.commands.iter().any(is_highlight));
}

#[test]
fn test_boundary_toggle() {
    let catalogs = catalogs();
    let mut sky = loaded_sky(&catalogs);
    sky.point_at(&RaDec::new(2.0, 10.0));

    let dashed = |commands: &[DrawCommand]| {
        commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Ellipse { stroke, .. } if stroke.dash.is_some()))
            .count()
    };

    let with_boundaries = dashed(&sky.frame().unwrap().commands);
    assert_eq!(with_boundaries, 2);

    sky.toggle(UiToggle::ConstellationBoundaries);
    assert_eq!(dashed(&sky.frame().unwrap().commands), 0);
}

#[test]
fn test_zoom_limits_filter_stars() {
    let catalogs = catalogs();
    let config = ViewConfig::default().with_zoom_bounds(0.5, Some(10.0));
    let mut sky = SkyView::in_memory(config, Viewport::default());
    sky.load_star_catalog(&catalogs.stars);
    sky.point_at(&RaDec::new(2.0, 10.0));

    sky.set_zoom(0.1);
    assert_eq!(sky.view().zoom(), 0.5);
    // Only stars brighter than magnitude 1 pass at zoom 0.5
    assert_eq!(sky.filtered_stars().count(), 1);

    // At the zoom ceiling every star is bright enough and all three lie
    // within the narrowed declination band
    sky.set_zoom(100.0);
    assert_eq!(sky.view().zoom(), 10.0);
    assert_eq!(sky.filtered_stars().count(), 3);

    sky.point_at(&RaDec::new(2.0, 40.0));
    assert_eq!(sky.filtered_stars().count(), 0);
}

#[test]
fn test_declination_keys_stop_short_of_the_pole() {
    let mut sky = SkyView::in_memory(ViewConfig::default(), Viewport::default());
    sky.set_pointer_locked(true);
    sky.on_key_down("w");
    for _ in 0..42 {
        sky.frame();
    }
    let pointing = sky.view().pointing();
    assert!(pointing.dec > 89.9);
    assert!(pointing.dec < 90.0);
    assert_abs_diff_eq!(pointing.ra, 18.0, epsilon = 1e-6);
}

#[test]
fn test_state_restored_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    {
        let store = JsonFileStore::open(&path).unwrap();
        let mut sky = SkyView::new(ViewConfig::default(), Viewport::default(), Box::new(store));
        sky.point_at(&RaDec::new(5.5, -5.0));
        sky.set_zoom(2.5);
        sky.set_star_factor(0.5);
        sky.toggle(UiToggle::DecimalDisplay);
        sky.next_color_scheme();
        sky.frame().unwrap();
    }

    let store = JsonFileStore::open(&path).unwrap();
    let mut sky = SkyView::new(ViewConfig::default(), Viewport::default(), Box::new(store));
    assert_abs_diff_eq!(sky.view().pointing().ra, 5.5, epsilon = 1e-9);
    assert_abs_diff_eq!(sky.view().pointing().dec, -5.0, epsilon = 1e-9);
    assert_eq!(sky.view().zoom(), 2.5);
    assert_eq!(sky.view().star_factor(), 0.5);
    assert!(sky.ui().has(UiToggle::DecimalDisplay));
    assert_eq!(sky.color_schemes().current_name(), "bright");

    let status = sky.frame().unwrap().status.unwrap();
    assert!(status.starts_with("RA 05.500000h Dec -5.000000\u{b0}"));
}

#[test]
fn test_garbage_state_is_ignored() {
    let mut store = MemoryStore::new();
    store.set("quaternion", "not,a,quaternion").unwrap();
    store.set("zoom", "-2").unwrap();
    store.set("ui", "stars bogus globe").unwrap();

    let sky = SkyView::new(ViewConfig::default(), Viewport::default(), Box::new(store));
    assert_abs_diff_eq!(sky.view().pointing().ra, 18.0, epsilon = 1e-9);
    assert_eq!(sky.view().zoom(), 1.0);
    assert!(sky.ui().has(UiToggle::Stars));
    assert!(sky.ui().has(UiToggle::Globe));
    assert!(!sky.ui().has(UiToggle::Crosshairs));
}

#[test]
fn test_frame_serializes() {
    let mut sky = SkyView::in_memory(ViewConfig::default(), Viewport::default());
    let frame = sky.frame().unwrap();
    let json = serde_json::to_value(&frame).unwrap();
    assert_eq!(json["commands"][0]["kind"], "clear");
    assert_eq!(json["commands"][0]["color"], "black");
}
