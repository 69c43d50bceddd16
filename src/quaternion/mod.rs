//! Quaternion rotations for the view orientation
//!
//! The viewer's whole orientation is a single unit quaternion. Vectors are
//! rotated with [`Cartesian3::transform_by_quaternion`], and incremental
//! rotations are composed either in view space ([`Quaternion::multiply`]) or
//! in world space ([`Quaternion::premultiply`]).
//!
//! The persisted form is the plain comma-joined tuple `"x,y,z,w"`, see the
//! [`std::fmt::Display`] and [`std::str::FromStr`] impls.

use crate::coordinates::cartesian::Cartesian3;
use crate::{Result, SkyViewError};
use std::str::FromStr;

/// A rotation quaternion `x·i + y·j + z·k + w`
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Quaternion {
    /// First imaginary component (i)
    pub x: f64,
    /// Second imaginary component (j)
    pub y: f64,
    /// Third imaginary component (k)
    pub z: f64,
    /// Real/scalar component
    pub w: f64,
}

impl Quaternion {
    /// Create a new quaternion from its components
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// The identity rotation
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Create a quaternion rotating by `theta` radians about `axis`
    ///
    /// The axis is used as given; pass a unit vector to get a unit
    /// quaternion.
    pub fn from_axis_angle(axis: &Cartesian3, theta: f64) -> Self {
        let (sin_half, cos_half) = (theta / 2.0).sin_cos();
        Self::new(
            axis.x * sin_half,
            axis.y * sin_half,
            axis.z * sin_half,
            cos_half,
        )
    }

    /// Hamilton product `self · other`
    ///
    /// Not commutative: `a.multiply(&b) != b.multiply(&a)` in general.
    pub fn multiply(&self, o: &Quaternion) -> Quaternion {
        let a = self;
        Quaternion::new(
            a.x * o.w + a.w * o.x + a.y * o.z - a.z * o.y,
            a.y * o.w + a.w * o.y + a.z * o.x - a.x * o.z,
            a.z * o.w + a.w * o.z + a.x * o.y - a.y * o.x,
            a.w * o.w - a.x * o.x - a.y * o.y - a.z * o.z,
        )
    }

    /// Hamilton product `other · self`
    pub fn premultiply(&self, o: &Quaternion) -> Quaternion {
        o.multiply(self)
    }

    /// Conjugate, which is the inverse for a unit quaternion
    pub fn inverse(&self) -> Quaternion {
        Quaternion::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Norm of the quaternion
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Rescale to unit length
    ///
    /// Composition accumulates rounding error, so the view state calls this
    /// after every orientation change. A zero quaternion becomes the
    /// identity.
    pub fn normalized(&self) -> Quaternion {
        let mag = self.magnitude();
        if mag == 0.0 || !mag.is_finite() {
            return Quaternion::identity();
        }
        Quaternion::new(self.x / mag, self.y / mag, self.z / mag, self.w / mag)
    }

    /// Imaginary part as a vector
    pub fn vector_part(&self) -> Cartesian3 {
        Cartesian3::new(self.x, self.y, self.z)
    }

    /// Decompose into `(axis, angle)`
    ///
    /// Returns `None` for the identity, whose axis is undefined.
    pub fn to_axis_angle(&self) -> Option<(Cartesian3, f64)> {
        let angle = 2.0 * self.w.clamp(-1.0, 1.0).acos();
        let sin_half = (angle / 2.0).sin();
        if sin_half.abs() < 1e-12 {
            return None;
        }
        Some((self.vector_part() / sin_half, angle))
    }

    /// Parse the persisted `"x,y,z,w"` form, falling back to the identity
    ///
    /// A missing or malformed value is never an error for the caller; it
    /// silently yields the identity orientation.
    pub fn from_persisted(value: Option<&str>) -> Quaternion {
        match value.map(Quaternion::from_str) {
            Some(Ok(q)) => q.normalized(),
            Some(Err(e)) => {
                log::warn!("Ignoring persisted orientation: {}", e);
                Quaternion::identity()
            }
            None => Quaternion::identity(),
        }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::fmt::Display for Quaternion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.z, self.w)
    }
}

impl FromStr for Quaternion {
    type Err = SkyViewError;

    fn from_str(s: &str) -> Result<Self> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| SkyViewError::InvalidQuaternion(format!("{:?}: {}", s, e)))?;

        let [x, y, z, w] = parts[..] else {
            return Err(SkyViewError::InvalidQuaternion(format!(
                "{:?}: expected 4 components, found {}",
                s,
                parts.len()
            )));
        };

        let q = Quaternion::new(x, y, z, w);
        if !q.magnitude().is_finite() || q.magnitude() == 0.0 {
            return Err(SkyViewError::InvalidQuaternion(format!(
                "{:?}: not a rotation",
                s
            )));
        }
        Ok(q)
    }
}
