//! Catalog stars

use super::DrawContext;
use crate::coordinates::cartesian::Cartesian3;
use crate::coordinates::RaDec;
use crate::projection::{self, DrawCommand};
use crate::ui::UiToggle;
use nalgebra::Point2;

/// Apparent radius in pixels of a magnitude 0 star
const ZERO_MAGNITUDE_RADIUS: f64 = 10.0;

/// Radius ratio between stars one magnitude apart
const MAGNITUDE_RADIUS_RATIO: f64 = 1.4;

/// Radius at which a star is drawn fully opaque
const OPAQUE_RADIUS: f64 = 6.2;

/// Radius used for every star when sizes do not encode magnitude
const FIXED_RADIUS: f64 = 3.0;

/// Label font size in pixels
const LABEL_FONT_SIZE: f64 = 28.0;

/// Label offset from the star center in pixels
const LABEL_OFFSET: f64 = 15.0;

/// A star with its view-frame position cached at load time
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub ra_dec: RaDec,
    /// Visual magnitude
    pub magnitude: f64,
    /// Display name, empty for unnamed stars
    pub name: String,
    position: Cartesian3,
}

impl Star {
    pub fn new(ra_dec: RaDec, magnitude: f64, name: &str) -> Self {
        Self {
            position: ra_dec.to_position(),
            ra_dec,
            magnitude,
            name: name.to_string(),
        }
    }

    /// Unit vector in the view frame
    pub fn position(&self) -> &Cartesian3 {
        &self.position
    }

    /// Radius in pixels encoding the magnitude
    pub fn apparent_radius(&self) -> f64 {
        ZERO_MAGNITUDE_RADIUS * MAGNITUDE_RADIUS_RATIO.powf(-self.magnitude)
    }

    /// Opacity in [0, 255] encoding the magnitude
    pub fn opacity(&self) -> u8 {
        (self.apparent_radius() / OPAQUE_RADIUS * 255.0)
            .min(255.0)
            .round() as u8
    }

    /// Drawing commands for this star in the current view
    ///
    /// Stars behind the sphere, and stars whose disc would reach past the
    /// sphere's rim, are not drawn.
    pub fn draw(&self, ctx: &DrawContext) -> Vec<DrawCommand> {
        let size = ctx.view.size();
        let center = ctx.view.center();
        let rotated = self.position.transform_by_quaternion(ctx.view.quaternion());
        if rotated.z > 0.0 {
            return Vec::new();
        }

        let radius = self.apparent_radius();
        if rotated.collapse_to_xy().magnitude() * size + radius > size {
            return Vec::new();
        }

        let color = if ctx.ui.has(UiToggle::StarOpacity) {
            format!("{}{:02x}", ctx.colors.html_text, self.opacity())
        } else {
            ctx.colors.text.clone()
        };
        let radius = if ctx.ui.has(UiToggle::StarSizes) {
            radius
        } else {
            FIXED_RADIUS
        };

        let at = projection::to_screen(&rotated, size, center);
        let mut commands = vec![DrawCommand::Disc {
            center: at,
            radius,
            color,
        }];

        if ctx.ui.has(UiToggle::StarNames) {
            commands.push(DrawCommand::Text {
                position: Point2::new(at.x + LABEL_OFFSET, at.y + LABEL_OFFSET),
                text: self.name.clone(),
                font_size: LABEL_FONT_SIZE,
                color: ctx.colors.star.clone(),
            });
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sky::tests::Fixture;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 10.0, 255)]
    #[case(2.0, 10.0 / 1.96, 210)]
    #[case(-1.0, 14.0, 255)]
    #[case(6.0, 10.0 / 7.529536, 55)]
    fn test_radius_and_opacity(#[case] mag: f64, #[case] radius: f64, #[case] opacity: u8) {
        let star = Star::new(RaDec::new(0.0, 0.0), mag, "");
        assert_abs_diff_eq!(star.apparent_radius(), radius, epsilon = 1e-5);
        assert_eq!(star.opacity(), opacity);
    }

    #[test]
    fn test_star_at_center_with_label() {
        let fixture = Fixture::new();
        let star = Star::new(RaDec::new(18.0, 0.0), 1.0, "Test");
        let commands = star.draw(&fixture.ctx());
        match &commands[..] {
            [DrawCommand::Disc { center, radius, .. }, DrawCommand::Text { position, text, font_size, .. }] =>
            {
                assert_abs_diff_eq!(center.x, 400.0, epsilon = 1e-9);
                assert_abs_diff_eq!(center.y, 300.0, epsilon = 1e-9);
                assert_abs_diff_eq!(*radius, 10.0 / 1.4, epsilon = 1e-12);
                assert_abs_diff_eq!(position.x, 415.0, epsilon = 1e-9);
                assert_eq!(text, "Test");
                assert_eq!(*font_size, 28.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_far_side_star_is_skipped() {
        let fixture = Fixture::new();
        let star = Star::new(RaDec::new(6.0, 0.0), 1.0, "Behind");
        assert!(star.draw(&fixture.ctx()).is_empty());
    }

    #[test]
    fn test_star_at_rim_is_skipped() {
        let fixture = Fixture::new();
        // On the horizon at RA 12h the disc would cross the rim
        let star = Star::new(RaDec::new(12.01, 0.0), 1.0, "Rim");
        assert!(star.draw(&fixture.ctx()).is_empty());
    }

    #[test]
    fn test_toggles_change_style() {
        let mut fixture = Fixture::new();
        fixture.ui.set(UiToggle::StarSizes, false);
        fixture.ui.set(UiToggle::StarNames, false);
        fixture.ui.set(UiToggle::StarOpacity, true);
        let star = Star::new(RaDec::new(18.0, 0.0), 2.0, "Test");
        match &star.draw(&fixture.ctx())[..] {
            [DrawCommand::Disc { radius, color, .. }] => {
                assert_eq!(*radius, 3.0);
                assert_eq!(color, &format!("{}d2", fixture.colors.html_text));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
