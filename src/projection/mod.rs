//! # Orthographic Projection
//!
//! Every circle on the celestial sphere projects orthographically to an
//! ellipse on screen. This module computes the parameters of those
//! ellipses for the two kinds of circle the viewer draws:
//!
//! - **Great circles** (meridians, the equator) centered on the sphere
//!   center, given by their plane normal.
//! - **Parallels of declination**, small circles whose plane is
//!   perpendicular to the polar axis, given by their latitude.
//!
//! Only the near half of the sphere (`z <= 0` after rotation) is visible,
//! so each projection also reports which parametric range of the ellipse
//! lies on that half.
//!
//! Straight sky segments drawn as chords are clipped against the same
//! horizon by [`clip_chord_to_near_side`].

pub mod primitives;

use crate::coordinates::angle::positive_modulo;
use crate::coordinates::cartesian::Cartesian3;
use crate::quaternion::Quaternion;
use nalgebra::Point2;
use std::f64::consts::{FRAC_PI_2, PI};

pub use primitives::{DrawCommand, EllipseArc, Stroke};

/// Rotation of the ellipse a great circle with screen-space normal `normal`
/// projects to, in [0, π)
///
/// Measured from [`Cartesian3::SCREEN_REFERENCE`] in the screen plane, with
/// the sign flipped when the collapsed normal points down the screen. A
/// normal along the viewing axis has no screen direction and gives 0.
pub fn ellipse_rotation(normal: &Cartesian3) -> f64 {
    let flat = normal.collapse_to_xy();
    if flat.magnitude() == 0.0 {
        return 0.0;
    }
    let negator = if flat.y > 0.0 { -1.0 } else { 1.0 };
    positive_modulo(flat.angle_to(&Cartesian3::SCREEN_REFERENCE) * negator, PI)
}

/// Ratio of minor to major axis for a circle with screen-space normal
/// `normal`
///
/// 1 when the circle faces the viewer, 0 when seen edge-on.
pub fn foreshortening(normal: &Cartesian3) -> f64 {
    normal.cosine_distance(&Cartesian3::VIEW_AXIS).abs()
}

/// Whether the near half of the ellipse lies on the `[π/2, 3π/2]` side
///
/// The default visible range is `[-π/2, π/2]`; it moves by π when the
/// normal leans toward the viewer on the same side the ellipse is rotated
/// to. Edge-on and face-on normals (`z·x == 0`) never shift.
pub fn near_half_is_shifted(normal: &Cartesian3, rotation: f64) -> bool {
    let lean = normal.z * normal.x;
    (lean > 0.0 && rotation >= FRAC_PI_2) || (lean < 0.0 && rotation < FRAC_PI_2)
}

/// Project a great circle with world-frame unit `normal`
///
/// `radius` is the on-screen radius of the sphere. The returned arc covers
/// the visible half of the circle.
pub fn great_circle_ellipse(
    normal: &Cartesian3,
    q: &Quaternion,
    radius: f64,
    center: Point2<f64>,
) -> EllipseArc {
    let transformed = normal.transform_by_quaternion(q).scale(radius);
    let minor = foreshortening(&transformed) * radius;
    let rotation = ellipse_rotation(&transformed);
    let shift = if near_half_is_shifted(&transformed, rotation) {
        PI
    } else {
        0.0
    };

    EllipseArc {
        center,
        radius_x: minor,
        radius_y: radius,
        rotation,
        start_angle: -FRAC_PI_2 + shift,
        stop_angle: FRAC_PI_2 + shift,
    }
}

/// Signed angle between the polar axis and the screen plane
///
/// Zero when the pole lies in the screen plane, -π/2 when it points
/// straight at the viewer.
pub fn axis_tilt(q: &Quaternion) -> f64 {
    let pole = Cartesian3::NORTH_POLE.transform_by_quaternion(q);
    FRAC_PI_2 - pole.angle_to(&Cartesian3::VIEW_AXIS)
}

/// Half-angle of a parallel's visible arc, measured around the polar axis
///
/// Returns 0 when the whole parallel is behind the sphere and π when the
/// whole parallel is visible.
pub fn angle_subtended(latitude: f64, tilt: f64) -> f64 {
    let cos_lat = latitude.cos();
    let versin = (latitude + tilt).cos() / tilt.cos();
    if versin < 0.0 {
        0.0
    } else if versin > 2.0 * cos_lat {
        PI
    } else {
        (1.0 - versin / cos_lat).clamp(-1.0, 1.0).acos()
    }
}

/// A projected parallel of declination
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelProjection {
    /// Visible arc of the parallel
    pub arc: EllipseArc,
    /// Half-angle of the visible arc around the polar axis
    pub angle_subtended: f64,
    /// Whether the arc runs against increasing right ascension
    pub flipped: bool,
}

/// Project the parallel at `latitude` radians
///
/// `radius` sizes the circle, `offset_radius` places its center: the
/// parallel's center is the point `-sin(latitude)` along the polar axis.
pub fn parallel_ellipse(
    latitude: f64,
    q: &Quaternion,
    radius: f64,
    offset_radius: f64,
    center: Point2<f64>,
) -> ParallelProjection {
    let cos_lat = latitude.cos();
    let normal = Cartesian3::NORTH_POLE.transform_by_quaternion(q);
    let rotation = ellipse_rotation(&normal);
    let minor = foreshortening(&normal) * cos_lat * radius;

    let offset = Cartesian3::new(0.0, -latitude.sin(), 0.0)
        .transform_by_quaternion(q)
        .scale(offset_radius);

    let tilt = FRAC_PI_2 - normal.angle_to(&Cartesian3::VIEW_AXIS);
    let subtended = angle_subtended(latitude, tilt);
    let flipped = normal.z * normal.y < 0.0;
    let shift = if flipped { PI } else { 0.0 };

    ParallelProjection {
        arc: EllipseArc {
            center: Point2::new(center.x + offset.x, center.y + offset.y),
            radius_x: minor,
            radius_y: cos_lat * radius,
            rotation,
            start_angle: -subtended + shift,
            stop_angle: subtended + shift,
        },
        angle_subtended: subtended,
        flipped,
    }
}

/// Clip the chord between two rotated points to the near hemisphere
///
/// Returns `None` when both endpoints are behind the sphere. When one
/// endpoint is behind, it is replaced by the point where the chord crosses
/// `z = 0`.
pub fn clip_chord_to_near_side(
    a: &Cartesian3,
    b: &Cartesian3,
) -> Option<(Cartesian3, Cartesian3)> {
    match (a.z > 0.0, b.z > 0.0) {
        (true, true) => None,
        (false, false) => Some((*a, *b)),
        (a_far, _) => {
            let t = a.z / (a.z - b.z);
            let crossing = *a + (*b - *a) * t;
            if a_far {
                Some((crossing, *b))
            } else {
                Some((*a, crossing))
            }
        }
    }
}

/// Screen position of a rotated unit vector
pub fn to_screen(v: &Cartesian3, radius: f64, center: Point2<f64>) -> Point2<f64> {
    Point2::new(center.x + v.x * radius, center.y + v.y * radius)
}
