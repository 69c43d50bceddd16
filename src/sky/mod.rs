//! # Sky Objects
//!
//! Everything drawn on the sphere other than stars is a [`SkyObject`]. Each
//! object turns the current view into zero or more [`DrawCommand`]s; an
//! object whose display toggle is off, or which lies entirely behind the
//! sphere, produces nothing.
//!
//! The coordinate grid is built once by [`create_meridians`] and
//! [`create_parallels`]; constellation geometry is appended as catalogs
//! load.

pub mod segments;
pub mod star;

use crate::colors::ColorScheme;
use crate::coordinates::cartesian::Cartesian3;
use crate::projection::{self, DrawCommand, EllipseArc, Stroke};
use crate::ui::{UiFlags, UiToggle};
use crate::view::ViewState;
use nalgebra::Point2;
use std::f64::consts::{FRAC_PI_2, PI};

pub use segments::{GreatCircleSegment, ParallelLineSegment, SegmentKind};
pub use star::Star;

/// Everything an object needs to draw itself for one frame
#[derive(Debug, Clone, Copy)]
pub struct DrawContext<'a> {
    pub view: &'a ViewState,
    pub ui: &'a UiFlags,
    pub colors: &'a ColorScheme,
    pub pointer_locked: bool,
    /// Code of the constellation under the crosshairs
    pub current_constellation: &'a str,
}

/// A great circle through both poles, given by its plane normal
#[derive(Debug, Clone, PartialEq)]
pub struct SkyMeridian {
    pub normal: Cartesian3,
}

/// A parallel of declination, `latitude` radians from the equator
#[derive(Debug, Clone, PartialEq)]
pub struct SkyParallel {
    pub latitude: f64,
}

/// A straight line from the sphere center to a point on the sphere
#[derive(Debug, Clone, PartialEq)]
pub struct SkyRadius {
    pub endpoint: Cartesian3,
    /// Stroke color, the scheme's line color when `None`
    pub color: Option<String>,
}

/// A drawable object on or around the sphere
#[derive(Debug, Clone, PartialEq)]
pub enum SkyObject {
    /// Silhouette of the sphere
    EarthCircle,
    /// Crosshairs at the canvas center
    CrossHairs,
    Radius(SkyRadius),
    Meridian(SkyMeridian),
    Parallel(SkyParallel),
    GreatCircleSegment(GreatCircleSegment),
    ParallelLineSegment(ParallelLineSegment),
}

impl SkyObject {
    /// Drawing commands for this object in the current view
    pub fn draw(&self, ctx: &DrawContext) -> Vec<DrawCommand> {
        match self {
            SkyObject::EarthCircle => draw_earth_circle(ctx),
            SkyObject::CrossHairs => draw_crosshairs(ctx),
            SkyObject::Radius(radius) => radius.draw(ctx),
            SkyObject::Meridian(meridian) => meridian.draw(ctx),
            SkyObject::Parallel(parallel) => parallel.draw(ctx),
            SkyObject::GreatCircleSegment(segment) => segment.draw(ctx),
            SkyObject::ParallelLineSegment(segment) => segment.draw(ctx),
        }
    }
}

fn draw_earth_circle(ctx: &DrawContext) -> Vec<DrawCommand> {
    let radius = ctx.view.size_borderless() + 1.0;
    vec![DrawCommand::Ellipse {
        arc: EllipseArc {
            center: ctx.view.center(),
            radius_x: radius,
            radius_y: radius,
            rotation: 0.0,
            start_angle: 0.0,
            stop_angle: 2.0 * PI,
        },
        stroke: Stroke::solid(&ctx.colors.line, 2.0),
    }]
}

fn draw_crosshairs(ctx: &DrawContext) -> Vec<DrawCommand> {
    if !ctx.ui.has(UiToggle::Crosshairs) {
        return Vec::new();
    }
    let center = ctx.view.center();
    let gap = ctx.view.config().crosshair_space;
    let size = ctx.view.config().crosshair_size;
    let color = if ctx.pointer_locked { "red" } else { "gray" };

    [(0.0, -1.0), (0.0, 1.0), (-1.0, 0.0), (1.0, 0.0)]
        .iter()
        .map(|(dx, dy)| DrawCommand::Line {
            from: Point2::new(center.x + dx * gap, center.y + dy * gap),
            to: Point2::new(center.x + dx * size, center.y + dy * size),
            stroke: Stroke::solid(color, 0.5),
        })
        .collect()
}

impl SkyRadius {
    pub fn new(endpoint: Cartesian3) -> Self {
        Self {
            endpoint,
            color: None,
        }
    }

    fn draw(&self, ctx: &DrawContext) -> Vec<DrawCommand> {
        let tip = self
            .endpoint
            .transform_by_quaternion(ctx.view.quaternion());
        let width = if tip.z > 0.0 { 3.0 } else { 1.0 };
        let color = self.color.as_deref().unwrap_or(&ctx.colors.line);
        vec![DrawCommand::Line {
            from: ctx.view.center(),
            to: projection::to_screen(&tip, ctx.view.size_borderless(), ctx.view.center()),
            stroke: Stroke::solid(color, width),
        }]
    }
}

impl SkyMeridian {
    fn draw(&self, ctx: &DrawContext) -> Vec<DrawCommand> {
        if !ctx.ui.has(UiToggle::Globe) {
            return Vec::new();
        }
        let arc = projection::great_circle_ellipse(
            &self.normal,
            ctx.view.quaternion(),
            ctx.view.size_borderless(),
            ctx.view.center(),
        );
        vec![DrawCommand::Ellipse {
            arc,
            stroke: Stroke::solid(&ctx.colors.meridian, 1.0),
        }]
    }
}

impl SkyParallel {
    fn draw(&self, ctx: &DrawContext) -> Vec<DrawCommand> {
        if !ctx.ui.has(UiToggle::Globe) {
            return Vec::new();
        }
        let projected = parallel_projection(self.latitude, ctx);
        if projected.angle_subtended == 0.0 {
            return Vec::new();
        }
        vec![DrawCommand::Ellipse {
            arc: projected.arc,
            stroke: Stroke::solid(&ctx.colors.parallel, 1.0),
        }]
    }
}

/// Project the parallel at `latitude` in the context's view
pub(crate) fn parallel_projection(
    latitude: f64,
    ctx: &DrawContext,
) -> projection::ParallelProjection {
    let radius = ctx.view.size_borderless();
    projection::parallel_ellipse(
        latitude,
        ctx.view.quaternion(),
        radius,
        radius,
        ctx.view.center(),
    )
}

/// Meridians at `iπ/count` for `i` in `0..count`, each drawn as a full
/// great circle through both poles
pub fn create_meridians(count: usize) -> Vec<SkyObject> {
    (0..count)
        .map(|i| {
            let angle = i as f64 * PI / count as f64;
            SkyObject::Meridian(SkyMeridian {
                normal: Cartesian3::new(angle.cos(), 0.0, angle.sin()),
            })
        })
        .collect()
}

/// `count` parallels evenly spaced between the poles, excluding the poles
pub fn create_parallels(count: usize) -> Vec<SkyObject> {
    (1..=count)
        .map(|i| {
            let latitude = i as f64 * PI / (count + 1) as f64 - FRAC_PI_2;
            SkyObject::Parallel(SkyParallel { latitude })
        })
        .collect()
}
