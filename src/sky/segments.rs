//! Constellation line and boundary segments
//!
//! Boundaries of the IAU constellations run either along meridians (constant
//! RA) or along parallels (constant Dec). Meridian pieces and the stick-figure
//! constellation lines are short great-circle arcs drawn as chords; parallel
//! pieces are arcs of a parallel ellipse, clipped to the part of the parallel
//! that faces the viewer.

use super::{parallel_projection, DrawContext};
use crate::constants::{HOURS2RAD, TAU, VIEW_RA_ROTATION};
use crate::coordinates::angle::positive_modulo;
use crate::coordinates::cartesian::Cartesian3;
use crate::coordinates::RaDec;
use crate::culling::clip_to_visible_window;
use crate::projection::{self, DrawCommand, EllipseArc, Stroke};
use crate::ui::UiToggle;

/// What a great-circle segment belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    /// A piece of a constellation boundary
    Boundary,
    /// A stick-figure line of the named constellation
    ConstellationLine(String),
}

/// The shorter great-circle arc between two sky positions
#[derive(Debug, Clone, PartialEq)]
pub struct GreatCircleSegment {
    start: Cartesian3,
    end: Cartesian3,
    /// Angular length in radians
    span: f64,
    kind: SegmentKind,
}

impl GreatCircleSegment {
    pub fn new(from: &RaDec, to: &RaDec, kind: SegmentKind) -> Self {
        let start = from.to_position();
        let end = to.to_position();
        Self {
            span: start.angle_to(&end),
            start,
            end,
            kind,
        }
    }

    pub fn kind(&self) -> &SegmentKind {
        &self.kind
    }

    pub fn span(&self) -> f64 {
        self.span
    }

    /// Unit normal of the segment's plane, `None` for degenerate segments
    pub fn normal(&self) -> Option<Cartesian3> {
        self.start.cross(&self.end).normalize()
    }

    /// Points along the arc no more than `max_span` radians apart
    ///
    /// Uses spherical interpolation, so every point lies on the great
    /// circle. Segments whose ends coincide or are antipodal have no unique
    /// arc and yield just their endpoints.
    pub fn vertices(&self, max_span: f64) -> Vec<Cartesian3> {
        let sin_span = self.span.sin();
        if self.span <= max_span || sin_span.abs() < 1e-12 || max_span <= 0.0 {
            return vec![self.start, self.end];
        }
        let pieces = (self.span / max_span).ceil() as usize;
        (0..=pieces)
            .map(|i| {
                let t = i as f64 / pieces as f64;
                let a = ((1.0 - t) * self.span).sin() / sin_span;
                let b = (t * self.span).sin() / sin_span;
                self.start * a + self.end * b
            })
            .collect()
    }

    fn stroke(&self, ctx: &DrawContext) -> Option<Stroke> {
        match &self.kind {
            SegmentKind::Boundary => {
                if !ctx.ui.has(UiToggle::ConstellationBoundaries) {
                    return None;
                }
                Some(Stroke::dashed(&ctx.colors.parallel, 1.0, [2.0, 4.0]))
            }
            SegmentKind::ConstellationLine(code) => {
                if !ctx.ui.has(UiToggle::ConstellationLines) {
                    return None;
                }
                if ctx.ui.has(UiToggle::HighlightConst) && code == ctx.current_constellation {
                    Some(Stroke::solid(&ctx.colors.highlight, 2.0))
                } else {
                    Some(Stroke::solid(&ctx.colors.line, 1.0))
                }
            }
        }
    }

    pub(crate) fn draw(&self, ctx: &DrawContext) -> Vec<DrawCommand> {
        let Some(stroke) = self.stroke(ctx) else {
            return Vec::new();
        };
        let q = ctx.view.quaternion();
        let radius = ctx.view.size_borderless();
        let center = ctx.view.center();

        let rotated: Vec<Cartesian3> = self
            .vertices(ctx.view.config().max_chord_span)
            .iter()
            .map(|v| v.transform_by_quaternion(q))
            .collect();

        rotated
            .windows(2)
            .filter_map(|pair| projection::clip_chord_to_near_side(&pair[0], &pair[1]))
            .map(|(a, b)| DrawCommand::Line {
                from: projection::to_screen(&a, radius, center),
                to: projection::to_screen(&b, radius, center),
                stroke: stroke.clone(),
            })
            .collect()
    }
}

/// A piece of a parallel between two right ascensions
///
/// Runs counter-clockwise (increasing RA) from `ra_min` to `ra_max`, and may
/// cross 0h.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelLineSegment {
    /// Declination in radians
    latitude: f64,
    /// Start angle around the polar axis, in view radians
    start: f64,
    /// End angle around the polar axis, in view radians
    stop: f64,
}

impl ParallelLineSegment {
    /// Segment along declination `dec` degrees from `ra_min` to `ra_max` hours
    pub fn new(dec: f64, ra_min: f64, ra_max: f64) -> Self {
        Self {
            latitude: dec.to_radians(),
            start: view_angle(ra_min),
            stop: view_angle(ra_max),
        }
    }

    /// Declination in radians
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Angular length around the polar axis
    pub fn length(&self) -> f64 {
        positive_modulo(self.stop - self.start, TAU)
    }

    /// Visible arcs of this segment, as ellipse arcs
    pub fn visible_arcs(&self, ctx: &DrawContext) -> Vec<EllipseArc> {
        let projected = parallel_projection(self.latitude, ctx);
        if projected.angle_subtended == 0.0 {
            return Vec::new();
        }

        let pointing = view_angle(ctx.view.pointing().ra);
        clip_to_visible_window(self.start, self.stop, pointing, projected.angle_subtended)
            .into_iter()
            .map(|(from, to)| {
                let (start_angle, stop_angle) = if projected.flipped {
                    (projected.arc.stop_angle - to, projected.arc.stop_angle - from)
                } else {
                    (projected.arc.start_angle + from, projected.arc.start_angle + to)
                };
                EllipseArc {
                    start_angle: start_angle.min(stop_angle),
                    stop_angle: start_angle.max(stop_angle),
                    ..projected.arc.clone()
                }
            })
            .collect()
    }

    pub(crate) fn draw(&self, ctx: &DrawContext) -> Vec<DrawCommand> {
        if !ctx.ui.has(UiToggle::ConstellationBoundaries) {
            return Vec::new();
        }
        self.visible_arcs(ctx)
            .into_iter()
            .map(|arc| DrawCommand::Ellipse {
                arc,
                stroke: Stroke::dashed(&ctx.colors.parallel, 1.0, [2.0, 4.0]),
            })
            .collect()
    }
}

/// Angle around the polar axis for a right ascension in hours
fn view_angle(ra: f64) -> f64 {
    positive_modulo(ra * HOURS2RAD - VIEW_RA_ROTATION, TAU)
}
