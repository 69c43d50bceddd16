//! # View State
//!
//! The complete orientation of the viewer is one unit quaternion. Every
//! derived quantity (the RA/Dec under the crosshairs, the on-screen sphere
//! radius, the field of view) is computed from it together with the zoom
//! level and the viewport size.
//!
//! Rotations come in two flavours:
//!
//! - **Local** rotations ([`ViewState::rotate_local`]) compose on the right
//!   and turn the view about its own screen axes. Mouse drags and the arrow
//!   keys use these.
//! - **World** rotations ([`ViewState::rotate_world`]) compose on the left
//!   and turn the sky about fixed celestial axes. Stepping in right
//!   ascension or declination uses these.
//!
//! The quaternion is renormalized after every change, and the pointing is
//! refreshed with it, so [`ViewState::pointing`] is never stale.

pub mod input;

use crate::config::ViewConfig;
use crate::constants::{
    DEC_STEP_POLE_FLOOR, DEC_STEP_POLE_FRACTION, HOURS2RAD, VIEW_RA_ROTATION,
};
use crate::coordinates::cartesian::Cartesian3;
use crate::coordinates::RaDec;
use crate::quaternion::Quaternion;
use nalgebra::Point2;
use std::f64::consts::FRAC_PI_2;

/// The drawing surface, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels
    pub width: f64,
    /// Height in CSS pixels
    pub height: f64,
    /// Device pixels per CSS pixel
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Canvas width in device pixels
    pub fn canvas_width(&self) -> f64 {
        self.width * self.device_pixel_ratio
    }

    /// Canvas height in device pixels
    pub fn canvas_height(&self) -> f64 {
        self.height * self.device_pixel_ratio
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0, 1.0)
    }
}

/// Orientation, zoom and viewport of the sky view
#[derive(Debug, Clone)]
pub struct ViewState {
    config: ViewConfig,
    quaternion: Quaternion,
    zoom: f64,
    star_factor: f64,
    viewport: Viewport,
    pointing: RaDec,
    needs_update: bool,
}

impl ViewState {
    /// Create a view looking at RA 18h, Dec 0° with zoom 1
    pub fn new(config: ViewConfig, viewport: Viewport) -> Self {
        let mut view = Self {
            zoom: config.clamp_zoom(1.0),
            star_factor: 1.0_f64.max(config.min_star_factor),
            config,
            quaternion: Quaternion::identity(),
            viewport,
            pointing: RaDec::new(0.0, 0.0),
            needs_update: true,
        };
        view.refresh_pointing();
        view
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn quaternion(&self) -> &Quaternion {
        &self.quaternion
    }

    /// Replace the orientation
    pub fn set_quaternion(&mut self, q: Quaternion) {
        self.quaternion = q.normalized();
        self.refresh_pointing();
        self.needs_update = true;
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom, clamped to the configured bounds
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = self.config.clamp_zoom(zoom);
        self.needs_update = true;
    }

    /// Multiply the zoom by `factor`, clamped to the configured bounds
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_zoom(self.zoom * factor);
    }

    pub fn star_factor(&self) -> f64 {
        self.star_factor
    }

    /// Set the star visibility factor, never below the configured minimum
    pub fn set_star_factor(&mut self, star_factor: f64) {
        self.star_factor = star_factor.max(self.config.min_star_factor);
        self.needs_update = true;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Adopt a new viewport size
    pub fn resize(&mut self, viewport: Viewport) {
        log::debug!(
            "Resizing view to {}x{} at {}x",
            viewport.width,
            viewport.height,
            viewport.device_pixel_ratio
        );
        self.viewport = viewport;
        self.needs_update = true;
    }

    /// RA/Dec currently under the crosshairs
    pub fn pointing(&self) -> &RaDec {
        &self.pointing
    }

    /// Recompute the pointing from the orientation
    ///
    /// The view looks along [`Cartesian3::VIEW_TARGET`]; undoing the
    /// orientation maps that direction back onto the sky.
    pub fn refresh_pointing(&mut self) {
        let direction = Cartesian3::VIEW_TARGET.transform_by_quaternion(&self.quaternion.inverse());
        self.pointing = RaDec::from_position(&direction);
    }

    /// Diameter of the sphere at zoom 1, in CSS pixels
    pub fn great_circle_size(&self) -> f64 {
        self.config.great_circle_size_factor * self.viewport.height
    }

    /// On-screen radius of the sphere, in device pixels
    pub fn size(&self) -> f64 {
        self.great_circle_size() / 2.0 * self.zoom * self.viewport.device_pixel_ratio
    }

    /// On-screen radius of the sphere inside its silhouette border
    pub fn size_borderless(&self) -> f64 {
        (self.great_circle_size() / 2.0 - self.config.great_circle_border)
            * self.zoom
            * self.viewport.device_pixel_ratio
    }

    /// Canvas center, in device pixels
    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            self.viewport.canvas_width() / 2.0,
            self.viewport.canvas_height() / 2.0,
        )
    }

    /// Angle from the view center to the canvas corner, in radians
    ///
    /// Scaled so a sphere filling exactly the half-diagonal reports π/2.
    pub fn max_field_of_view(&self) -> f64 {
        let half_diagonal = self
            .viewport
            .canvas_width()
            .hypot(self.viewport.canvas_height())
            / 2.0;
        half_diagonal / self.size() * FRAC_PI_2
    }

    /// Whether `ra_dec` might be on screen
    ///
    /// Only the declination distance to the pointing is tested, so this
    /// never rejects a visible position but accepts some that are not.
    pub fn ra_dec_is_possibly_in_view(&self, ra_dec: &RaDec) -> bool {
        (ra_dec.dec_radians() - self.pointing.dec_radians()).abs() <= self.max_field_of_view()
    }

    /// Turn the view about its own axes
    pub fn rotate_local(&mut self, rotation: &Quaternion) {
        self.set_quaternion(self.quaternion.multiply(rotation));
    }

    /// Turn the sky about fixed celestial axes
    pub fn rotate_world(&mut self, rotation: &Quaternion) {
        self.set_quaternion(self.quaternion.premultiply(rotation));
    }

    /// Move the pointing by `delta` radians of right ascension
    pub fn step_ra(&mut self, delta: f64) {
        self.rotate_world(&ra_rotation(delta));
    }

    /// Move the pointing by `delta` radians of declination
    ///
    /// A step toward a pole covers at most 70% of the remaining distance,
    /// so repeated steps approach the pole without passing it. Within
    /// [`DEC_STEP_POLE_FLOOR`] of the pole the step is dropped.
    pub fn step_dec(&mut self, delta: f64) {
        let dec = self.pointing.dec_radians();
        let remaining = if delta > 0.0 {
            FRAC_PI_2 - dec
        } else if delta < 0.0 {
            FRAC_PI_2 + dec
        } else {
            return;
        };
        if remaining < DEC_STEP_POLE_FLOOR {
            return;
        }
        let delta = delta.signum() * delta.abs().min(DEC_STEP_POLE_FRACTION * remaining);
        self.rotate_world(&dec_rotation(self.pointing.ra_radians(), delta));
    }

    /// Orient the view so `target` is under the crosshairs with north up
    pub fn point_at(&mut self, target: &RaDec) {
        let home_ra = 18.0 * HOURS2RAD;
        let q = Quaternion::identity()
            .premultiply(&ra_rotation(target.ra_radians() - home_ra))
            .premultiply(&dec_rotation(target.ra_radians(), target.dec_radians()));
        log::debug!("Pointing at {}", target);
        self.set_quaternion(q);
    }

    /// Return to the identity orientation
    pub fn reset_orientation(&mut self) {
        self.set_quaternion(Quaternion::identity());
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Request a redraw
    pub fn mark_dirty(&mut self) {
        self.needs_update = true;
    }

    /// Clear and return the redraw flag
    pub fn take_needs_update(&mut self) -> bool {
        std::mem::replace(&mut self.needs_update, false)
    }
}

/// World rotation moving the pointing `delta` radians east in RA
fn ra_rotation(delta: f64) -> Quaternion {
    Quaternion::from_axis_angle(&Cartesian3::new(0.0, 1.0, 0.0), delta)
}

/// World rotation moving a pointing at `ra` radians `delta` radians north
///
/// The axis lies on the equator a quarter turn from `ra`.
fn dec_rotation(ra: f64, delta: f64) -> Quaternion {
    let phi = ra - VIEW_RA_ROTATION;
    Quaternion::from_axis_angle(&Cartesian3::new(phi.cos(), 0.0, -phi.sin()), delta)
}
