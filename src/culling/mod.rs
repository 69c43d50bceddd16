//! Visibility culling
//!
//! Two cheap tests decide what is worth projecting each frame:
//!
//! - Stars are filtered by magnitude and by a conservative declination
//!   window around the pointing ([`ViewState::ra_dec_is_possibly_in_view`]).
//! - Boundary segments along parallels are clipped to the arc of the
//!   parallel that faces the viewer ([`clip_to_visible_window`]).
//!
//! Angles around the polar axis wrap at 2π, so both the visible window and
//! each segment are split into non-wrapping pieces before they are
//! intersected.
//!
//! [`ViewState::ra_dec_is_possibly_in_view`]: crate::view::ViewState::ra_dec_is_possibly_in_view

use crate::constants::TAU;
use crate::coordinates::angle::positive_modulo;
use std::f64::consts::PI;

/// Intersection of two closed intervals
///
/// Returns `None` unless the intersection has positive length.
pub fn region_overlap(a: (f64, f64), b: (f64, f64)) -> Option<(f64, f64)> {
    let start = a.0.max(b.0);
    let stop = a.1.min(b.1);
    if start >= stop {
        return None;
    }
    Some((start, stop))
}

/// A non-wrapping piece of an angular interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piece {
    /// Start angle in [0, 2π)
    pub start: f64,
    /// Stop angle in (0, 2π]
    pub stop: f64,
    /// Distance from the interval's own start to `start`
    pub base: f64,
}

/// Split the interval starting at `start` with angular `length` into pieces
/// that do not cross 0
///
/// `length` is capped at a full turn. An empty interval has no pieces.
pub fn split_interval(start: f64, length: f64) -> Vec<Piece> {
    if length <= 0.0 {
        return Vec::new();
    }
    let length = length.min(TAU);
    let start = positive_modulo(start, TAU);
    let end = start + length;

    if end <= TAU {
        return vec![Piece {
            start,
            stop: end,
            base: 0.0,
        }];
    }

    let first = TAU - start;
    vec![
        Piece {
            start,
            stop: TAU,
            base: 0.0,
        },
        Piece {
            start: 0.0,
            stop: end - TAU,
            base: first,
        },
    ]
}

/// Pieces of the visible window `center ± half_width`
///
/// Offsets in the returned pieces are measured from `center - half_width`.
pub fn visible_window(center: f64, half_width: f64) -> Vec<Piece> {
    let half_width = half_width.min(PI);
    split_interval(center - half_width, 2.0 * half_width)
}

/// Visible sub-arcs of the segment from `min` to `max`, running forward
///
/// Returns each visible sub-arc as a pair of offsets from the start of the
/// window `center ± half_width`, in increasing order.
pub fn clip_to_visible_window(
    min: f64,
    max: f64,
    center: f64,
    half_width: f64,
) -> Vec<(f64, f64)> {
    let window = visible_window(center, half_width);
    let segment = split_interval(min, positive_modulo(max - min, TAU));

    let mut visible = Vec::new();
    for w in &window {
        for s in &segment {
            if let Some((start, stop)) = region_overlap((w.start, w.stop), (s.start, s.stop)) {
                visible.push((start - w.start + w.base, stop - w.start + w.base));
            }
        }
    }
    visible.sort_by(|a, b| a.0.total_cmp(&b.0));
    visible
}
