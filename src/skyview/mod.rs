//! # Sky View
//!
//! [`SkyView`] is the whole viewer minus the canvas. It owns the view
//! orientation, input state, display toggles, color schemes, the loaded sky
//! objects and catalogs, and the store the state is persisted to.
//!
//! The host feeds it input events as they arrive and calls [`SkyView::frame`]
//! once per animation tick. A frame is produced only when something changed;
//! it carries the draw list plus the status and extra text lines for the
//! overlays that are switched on.
//!
//! ## Examples
//!
//! ```rust
//! use skyview::{SkyView, ViewConfig, Viewport};
//!
//! let mut sky = SkyView::in_memory(ViewConfig::default(), Viewport::new(800.0, 600.0, 1.0));
//! let frame = sky.frame().unwrap();
//! assert!(frame.status.unwrap().starts_with("RA 18h 00m 00s Dec +00° 00' 00\""));
//! assert!(sky.frame().is_none());
//! ```

use std::path::Path;

use serde::Serialize;

use crate::catalogs;
use crate::colors::ColorSchemes;
use crate::config::ViewConfig;
use crate::constellation::{nearest_named_star, padded_label, Abbreviations, ConstellationBoundaries};
use crate::constants::LOADING_CONSTELLATIONS;
use crate::coordinates::RaDec;
use crate::persist::{MemoryStore, PersistedState, StateStore};
use crate::projection::DrawCommand;
use crate::quaternion::Quaternion;
use crate::sky::{create_meridians, create_parallels, DrawContext, SkyObject, Star};
use crate::ui::{UiFlags, UiToggle};
use crate::view::input::{key_step, InputState};
use crate::view::{ViewState, Viewport};
use crate::Result;

/// Output of one redraw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Drawing calls in paint order, starting with a background clear
    pub commands: Vec<DrawCommand>,
    /// Pointing and constellation, when the `Stat` overlay is on
    pub status: Option<String>,
    /// Constellation name and nearest star, when the `Extra` overlay is on
    pub extra: Option<Vec<String>>,
}

/// The sky viewer
pub struct SkyView {
    view: ViewState,
    input: InputState,
    ui: UiFlags,
    colors: ColorSchemes,
    objects: Vec<SkyObject>,
    stars: Vec<Star>,
    boundaries: ConstellationBoundaries,
    abbreviations: Abbreviations,
    current_constellation: String,
    store: Box<dyn StateStore>,
}

impl SkyView {
    /// Create a viewer, restoring whatever state `store` holds
    pub fn new(config: ViewConfig, viewport: Viewport, store: Box<dyn StateStore>) -> Self {
        let persisted = PersistedState::load(store.as_ref());

        let mut colors = ColorSchemes::default();
        let saved = persisted.color_scheme.as_deref().map(|name| colors.select(name));
        if !matches!(saved, Some(Ok(()))) {
            if let Some(Err(e)) = saved {
                log::warn!("Ignoring persisted color scheme: {}", e);
            }
            if let Err(e) = colors.select(&config.default_color_scheme) {
                log::warn!("{}, using {}", e, colors.current_name());
            }
        }

        let mut objects = create_meridians(config.meridian_count);
        objects.extend(create_parallels(config.parallel_count));
        objects.push(SkyObject::EarthCircle);
        objects.push(SkyObject::CrossHairs);

        let mut view = ViewState::new(config, viewport);
        view.set_quaternion(persisted.quaternion);
        view.set_zoom(persisted.zoom);
        view.set_star_factor(persisted.star_factor);

        Self {
            view,
            input: InputState::new(),
            ui: persisted.ui,
            colors,
            objects,
            stars: Vec::new(),
            boundaries: ConstellationBoundaries::new(),
            abbreviations: Abbreviations::default(),
            current_constellation: LOADING_CONSTELLATIONS.to_string(),
            store,
        }
    }

    /// Create a viewer whose state is not kept
    pub fn in_memory(config: ViewConfig, viewport: Viewport) -> Self {
        Self::new(config, viewport, Box::new(MemoryStore::new()))
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn ui(&self) -> &UiFlags {
        &self.ui
    }

    pub fn color_schemes(&self) -> &ColorSchemes {
        &self.colors
    }

    pub fn objects(&self) -> &[SkyObject] {
        &self.objects
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn boundaries(&self) -> &ConstellationBoundaries {
        &self.boundaries
    }

    /// Constellation found at the last redraw
    pub fn current_constellation(&self) -> &str {
        &self.current_constellation
    }

    // Orientation

    pub fn set_quaternion(&mut self, q: Quaternion) {
        self.view.set_quaternion(q);
    }

    pub fn point_at(&mut self, target: &RaDec) {
        self.view.point_at(target);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.view.set_zoom(zoom);
    }

    pub fn set_star_factor(&mut self, star_factor: f64) {
        self.view.set_star_factor(star_factor);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.view.resize(viewport);
    }

    // Input

    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.input.set_pointer_locked(locked);
        self.view.mark_dirty();
    }

    pub fn pointer_locked(&self) -> bool {
        self.input.pointer_locked()
    }

    pub fn on_mouse_move(&mut self, dx: f64, dy: f64) {
        let reversed = self.ui.has(UiToggle::ReversedControl);
        self.input.apply_mouse_move(dx, dy, reversed, &mut self.view);
    }

    pub fn on_wheel(&mut self, delta_y: f64) {
        self.input.apply_wheel(delta_y, &mut self.view);
    }

    pub fn on_key_down(&mut self, key: &str) {
        self.input.key_down(key);
    }

    pub fn on_key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    pub fn on_key_press(&mut self, key: &str) {
        self.input.key_press(key, &mut self.view);
    }

    // Display settings

    /// Flip a display toggle, returning whether it is now on
    pub fn toggle(&mut self, toggle: UiToggle) -> bool {
        let on = self.ui.toggle(toggle);
        log::debug!("{} {}", toggle, if on { "on" } else { "off" });
        self.view.mark_dirty();
        on
    }

    pub fn select_color_scheme(&mut self, name: &str) -> Result<()> {
        self.colors.select(name)?;
        self.view.mark_dirty();
        Ok(())
    }

    pub fn next_color_scheme(&mut self) {
        self.colors.select_next();
        self.view.mark_dirty();
    }

    pub fn prev_color_scheme(&mut self) {
        self.colors.select_prev();
        self.view.mark_dirty();
    }

    // Catalogs

    pub fn add_objects<I: IntoIterator<Item = SkyObject>>(&mut self, objects: I) {
        self.objects.extend(objects);
        self.view.mark_dirty();
    }

    pub fn add_stars<I: IntoIterator<Item = Star>>(&mut self, stars: I) {
        self.stars.extend(stars);
        self.view.mark_dirty();
    }

    pub fn add_boundaries(&mut self, boundaries: ConstellationBoundaries) {
        self.boundaries.extend(boundaries);
        self.view.mark_dirty();
    }

    pub fn set_abbreviations(&mut self, abbreviations: Abbreviations) {
        self.abbreviations = abbreviations;
        self.view.mark_dirty();
    }

    /// Load stars from a HYG-style CSV; on failure the viewer carries on
    /// without them
    pub fn load_star_catalog<P: AsRef<Path>>(&mut self, path: P) -> bool {
        match catalogs::load_star_catalog(&path) {
            Ok(stars) => {
                self.add_stars(stars);
                true
            }
            Err(e) => {
                log::warn!("Could not load stars from {}: {}", path.as_ref().display(), e);
                false
            }
        }
    }

    /// Load constellation boundaries, both drawn edges and lookup table
    pub fn load_boundaries<P: AsRef<Path>>(&mut self, path: P) -> bool {
        match catalogs::load_boundaries(&path) {
            Ok((objects, boundaries)) => {
                self.add_objects(objects);
                self.add_boundaries(boundaries);
                true
            }
            Err(e) => {
                log::warn!(
                    "Could not load constellation boundaries from {}: {}",
                    path.as_ref().display(),
                    e
                );
                false
            }
        }
    }

    pub fn load_constellation_lines<P: AsRef<Path>>(&mut self, path: P) -> bool {
        match catalogs::load_constellation_lines(&path) {
            Ok(objects) => {
                self.add_objects(objects);
                true
            }
            Err(e) => {
                log::warn!(
                    "Could not load constellation lines from {}: {}",
                    path.as_ref().display(),
                    e
                );
                false
            }
        }
    }

    pub fn load_abbreviations<P: AsRef<Path>>(&mut self, path: P) -> bool {
        match catalogs::load_abbreviations(&path) {
            Ok(abbreviations) => {
                self.set_abbreviations(abbreviations);
                true
            }
            Err(e) => {
                log::warn!(
                    "Could not load abbreviations from {}: {}",
                    path.as_ref().display(),
                    e
                );
                false
            }
        }
    }

    // Queries

    /// Stars bright enough for the current zoom and near enough to the
    /// pointing to be drawn
    pub fn filtered_stars(&self) -> impl Iterator<Item = &Star> + '_ {
        let limit = self.view.zoom() * 2.0 * self.view.star_factor();
        self.stars
            .iter()
            .filter(move |s| s.magnitude < limit && self.view.ra_dec_is_possibly_in_view(&s.ra_dec))
    }

    /// Named star nearest the crosshairs among the filtered stars
    pub fn nearest_star(&self) -> Option<&Star> {
        nearest_named_star(self.filtered_stars(), self.view.pointing())
    }

    /// Constellation under the crosshairs right now
    pub fn lookup_constellation(&self) -> String {
        self.boundaries.lookup(self.view.pointing(), self.view.config())
    }

    /// Pointing and padded constellation code
    pub fn status_line(&self) -> String {
        format!(
            "{} | {}",
            self.view
                .pointing()
                .to_display_string(self.ui.has(UiToggle::DecimalDisplay)),
            padded_label(&self.current_constellation)
        )
    }

    /// Constellation full name and nearest named star
    pub fn extra_lines(&self) -> Vec<String> {
        let constellation = self
            .abbreviations
            .constellation_name(&self.current_constellation)
            .unwrap_or("");
        let star = self
            .nearest_star()
            .map(|s| self.abbreviations.full_star_name(&s.name))
            .unwrap_or_default();
        vec![
            format!(
                "Constellation: {}| {}",
                padded_label(&self.current_constellation),
                constellation
            ),
            format!("Nearest star: \u{00a0}{}", star),
        ]
    }

    // Frames

    /// Advance one animation tick, returning a frame if anything changed
    pub fn frame(&mut self) -> Option<Frame> {
        self.input.apply_held_keys(&mut self.view);
        if self.ui.has(UiToggle::Movie) {
            let step = key_step(&self.view);
            self.view.step_ra(step);
        }

        if !self.view.take_needs_update() {
            return None;
        }
        Some(self.render())
    }

    /// Redraw unconditionally
    pub fn render(&mut self) -> Frame {
        self.save_state();
        self.current_constellation = self.lookup_constellation();

        let ctx = DrawContext {
            view: &self.view,
            ui: &self.ui,
            colors: self.colors.current(),
            pointer_locked: self.input.pointer_locked(),
            current_constellation: &self.current_constellation,
        };

        let mut commands = vec![DrawCommand::Clear {
            color: ctx.colors.background.clone(),
        }];
        for object in &self.objects {
            commands.extend(object.draw(&ctx));
        }
        if self.ui.has(UiToggle::Stars) {
            for star in self.filtered_stars() {
                commands.extend(star.draw(&ctx));
            }
        }
        log::debug!(
            "Frame at {} with {} draw commands",
            self.view.pointing(),
            commands.len()
        );

        Frame {
            commands,
            status: self.ui.has(UiToggle::Stat).then(|| self.status_line()),
            extra: self.ui.has(UiToggle::Extra).then(|| self.extra_lines()),
        }
    }

    fn save_state(&mut self) {
        let state = PersistedState {
            quaternion: *self.view.quaternion(),
            zoom: self.view.zoom(),
            star_factor: self.view.star_factor(),
            ui: self.ui.clone(),
            color_scheme: Some(self.colors.current_name().to_string()),
        };
        if let Err(e) = state.save(self.store.as_mut()) {
            log::warn!("Could not save view state: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constellation::ConstellationBoundaryLine;
    use crate::persist::{JsonFileStore, COLOR_SCHEME_KEY, ZOOM_KEY};
    use approx::assert_abs_diff_eq;

    fn sky() -> SkyView {
        SkyView::in_memory(ViewConfig::default(), Viewport::default())
    }

    #[test]
    fn test_first_frame_then_idle() {
        let mut sky = sky();
        let frame = sky.frame().unwrap();
        assert!(matches!(frame.commands[0], DrawCommand::Clear { .. }));
        assert!(sky.frame().is_none());

        sky.set_zoom(2.0);
        assert!(sky.frame().is_some());
    }

    #[test]
    fn test_default_scheme_is_red() {
        let sky = sky();
        assert_eq!(sky.color_schemes().current_name(), "red");
    }

    #[test]
    fn test_unknown_scheme_falls_back() {
        let mut store = MemoryStore::new();
        store.set(COLOR_SCHEME_KEY, "neon").unwrap();
        let sky = SkyView::new(ViewConfig::default(), Viewport::default(), Box::new(store));
        assert_eq!(sky.color_schemes().current_name(), "red");

        let config = ViewConfig::default().with_default_color_scheme("neon");
        let sky = SkyView::in_memory(config, Viewport::default());
        assert_eq!(sky.color_schemes().current_name(), "bright");
    }

    #[test]
    fn test_loading_message_until_boundaries_arrive() {
        let mut sky = sky();
        let frame = sky.frame().unwrap();
        assert!(frame.status.unwrap().ends_with("| loading constellations..."));

        let mut boundaries = ConstellationBoundaries::new();
        boundaries.add_line("Far", ConstellationBoundaryLine::new(1.0, 60.0, 70.0));
        sky.add_boundaries(boundaries);
        let frame = sky.frame().unwrap();
        assert!(frame.status.unwrap().ends_with("| constellation unknown"));
    }

    #[test]
    fn test_overlays_follow_toggles() {
        let mut sky = sky();
        sky.toggle(UiToggle::Stat);
        sky.toggle(UiToggle::Extra);
        let frame = sky.frame().unwrap();
        assert!(frame.status.is_none());
        assert!(frame.extra.is_none());
    }

    #[test]
    fn test_stars_filtered_by_magnitude_and_toggle() {
        let mut sky = sky();
        sky.add_stars(vec![
            Star::new(RaDec::new(18.0, 1.0), 1.0, "Bright"),
            Star::new(RaDec::new(18.0, -1.0), 2.5, "Faint"),
        ]);
        let names: Vec<&str> = sky.filtered_stars().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Bright"]);

        let with_stars = sky.render().commands.len();
        sky.toggle(UiToggle::Stars);
        let without_stars = sky.render().commands.len();
        assert_eq!(with_stars - without_stars, 2);
    }

    #[test]
    fn test_extra_lines_name_nearest_star() {
        let mut sky = sky();
        sky.add_stars(vec![
            Star::new(RaDec::new(18.2, 0.0), 0.5, "Alp Tst"),
            Star::new(RaDec::new(19.0, 0.0), 0.5, "Far"),
            Star::new(RaDec::new(18.0, 0.1), 0.5, ""),
        ]);
        let mut abbreviations = Abbreviations::default();
        abbreviations.constellations.insert(
            "Tst".to_string(),
            ["Testum".to_string(), "Testi".to_string()],
        );
        abbreviations
            .greek_letters
            .insert("Alp".to_string(), ["α".to_string(), "Alpha".to_string()]);
        sky.set_abbreviations(abbreviations);

        let extra = sky.frame().unwrap().extra.unwrap();
        assert_eq!(extra[1], "Nearest star: \u{00a0}Alpha Testi");
    }

    #[test]
    fn test_movie_advances_right_ascension() {
        let mut sky = sky();
        sky.frame();
        sky.toggle(UiToggle::Movie);
        sky.frame();
        let step = key_step(sky.view()).to_degrees() / 15.0;
        assert_abs_diff_eq!(sky.view().pointing().ra, 18.0 + step, epsilon = 1e-9);
        assert!(sky.frame().is_some());
    }

    #[test]
    fn test_held_keys_need_pointer_lock() {
        let mut sky = sky();
        sky.frame();
        sky.on_key_down("d");
        assert!(sky.frame().is_none());

        sky.set_pointer_locked(true);
        sky.frame();
        assert!(sky.view().pointing().ra > 18.0);
        sky.on_key_up("d");
        assert!(sky.frame().is_none());
    }

    #[test]
    fn test_state_saved_on_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        {
            let store = JsonFileStore::open(&path).unwrap();
            let mut sky = SkyView::new(ViewConfig::default(), Viewport::default(), Box::new(store));
            sky.set_zoom(3.0);
            sky.select_color_scheme("dark").unwrap();
            sky.frame();
        }
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(ZOOM_KEY).as_deref(), Some("3"));
        let sky = SkyView::new(ViewConfig::default(), Viewport::default(), Box::new(store));
        assert_eq!(sky.view().zoom(), 3.0);
        assert_eq!(sky.color_schemes().current_name(), "dark");
    }

    #[test]
    fn test_failed_load_degrades() {
        let mut sky = sky();
        assert!(!sky.load_star_catalog("/nonexistent/hyg.csv"));
        assert!(!sky.load_boundaries("/nonexistent/bound.dat"));
        assert!(sky.stars().is_empty());
        assert!(sky.boundaries().is_empty());
    }
}
