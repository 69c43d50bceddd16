//! Drawing primitives produced by the projection engine
//!
//! These are the only output of a frame: a renderer strokes or fills each
//! command in order. Coordinates are canvas pixels with the origin at the
//! top-left corner and Y pointing down. Ellipse angles follow the HTML
//! canvas `ellipse()` convention.

use nalgebra::Point2;
use serde::Serialize;

/// An elliptical arc
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EllipseArc {
    /// Center of the ellipse
    pub center: Point2<f64>,
    /// Radius along the ellipse's own X axis (before rotation)
    pub radius_x: f64,
    /// Radius along the ellipse's own Y axis (before rotation)
    pub radius_y: f64,
    /// Rotation of the ellipse, in radians [0, π)
    pub rotation: f64,
    /// Parametric start angle of the arc
    pub start_angle: f64,
    /// Parametric stop angle of the arc
    pub stop_angle: f64,
}

impl EllipseArc {
    /// Point on the arc at parametric angle `t`
    pub fn point_at(&self, t: f64) -> Point2<f64> {
        let (sin_r, cos_r) = self.rotation.sin_cos();
        let u = self.radius_x * t.cos();
        let v = self.radius_y * t.sin();
        Point2::new(
            self.center.x + u * cos_r - v * sin_r,
            self.center.y + u * sin_r + v * cos_r,
        )
    }

    /// Angular extent of the arc
    pub fn sweep(&self) -> f64 {
        self.stop_angle - self.start_angle
    }
}

/// How a shape is outlined
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    /// CSS color
    pub color: String,
    /// Line width in pixels
    pub width: f64,
    /// Dash pattern `[dash, gap]`, solid when `None`
    pub dash: Option<[f64; 2]>,
}

impl Stroke {
    pub fn solid(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            dash: None,
        }
    }

    pub fn dashed(color: &str, width: f64, dash: [f64; 2]) -> Self {
        Self {
            color: color.to_string(),
            width,
            dash: Some(dash),
        }
    }
}

/// One drawing call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Fill the whole canvas
    Clear { color: String },
    /// Stroke an elliptical arc
    Ellipse { arc: EllipseArc, stroke: Stroke },
    /// Stroke a straight segment
    Line {
        from: Point2<f64>,
        to: Point2<f64>,
        stroke: Stroke,
    },
    /// Fill a circle
    Disc {
        center: Point2<f64>,
        radius: f64,
        color: String,
    },
    /// Draw a text label with its baseline starting at `position`
    Text {
        position: Point2<f64>,
        text: String,
        font_size: f64,
        color: String,
    },
}
