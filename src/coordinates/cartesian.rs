//! # Cartesian Vector Module
//!
//! This module provides the 3D vector type every other part of the viewer is
//! built on: sky positions on the unit sphere, plane normals of great
//! circles, and their rotated (screen-space) counterparts.
//!
//! ## Coordinate System Conventions
//!
//! Two frames share this type:
//!
//! - **View frame** (everything produced by [`crate::coordinates::RaDec::to_position`]):
//!   - **X-axis**: toward RA = 12h, Dec = 0°
//!   - **Y-axis**: toward the south celestial pole (screen "down")
//!   - **Z-axis**: toward RA = 6h, Dec = 0°
//!
//!   After a vector is transformed by the view orientation, X and Y are
//!   screen axes (right and down) and Z points away from the viewer, so the
//!   visible hemisphere is `z <= 0`.
//!
//! - **Equatorial frame** ([`Cartesian3::from_spherical`] and
//!   [`Cartesian3::to_spherical`]), used for precession:
//!   - **X-axis**: toward the vernal equinox (RA = 0°, Dec = 0°)
//!   - **Y-axis**: toward RA = 90°, Dec = 0°
//!   - **Z-axis**: toward the north celestial pole
//!
//! ## Examples
//!
//! ```rust
//! use skyview::coordinates::cartesian::Cartesian3;
//!
//! let x_axis = Cartesian3::new(1.0, 0.0, 0.0);
//! let y_axis = Cartesian3::new(0.0, 1.0, 0.0);
//! assert_eq!(x_axis.dot(&y_axis), 0.0);
//! assert_eq!(x_axis.cross(&y_axis), Cartesian3::new(0.0, 0.0, 1.0));
//! ```

use crate::quaternion::Quaternion;
use nalgebra::Vector3;
use std::f64::consts::PI;

/// Three-dimensional Cartesian vector
///
/// Immutable value type: every operation returns a new vector.
///
/// # Unit Vectors vs Scaled Vectors
///
/// Sky positions and plane normals are unit vectors. Projection code scales
/// them by the on-screen sphere radius, after which only the direction and
/// the X/Y components matter.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cartesian3 {
    /// X-component
    pub x: f64,
    /// Y-component
    pub y: f64,
    /// Z-component
    pub z: f64,
}

impl Cartesian3 {
    /// The viewing axis, pointing from the viewer into the screen.
    pub const VIEW_AXIS: Cartesian3 = Cartesian3 {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Screen reference direction ellipse rotations are measured from.
    pub const SCREEN_REFERENCE: Cartesian3 = Cartesian3 {
        x: -1.0,
        y: 0.0,
        z: 0.0,
    };

    /// Direction the view looks along before any rotation is applied.
    pub const VIEW_TARGET: Cartesian3 = Cartesian3 {
        x: 0.0,
        y: 0.0,
        z: -1.0,
    };

    /// North celestial pole in the view frame.
    pub const NORTH_POLE: Cartesian3 = Cartesian3 {
        x: 0.0,
        y: -1.0,
        z: 0.0,
    };

    /// Creates a new vector
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// Creates a vector in the equatorial frame from spherical coordinates
    ///
    /// # Arguments
    ///
    /// * `ra` - Right ascension in radians
    /// * `dec` - Declination in radians
    /// * `distance` - Distance from origin (1.0 for unit vectors)
    ///
    /// # Mathematical Conversion
    ///
    /// - `x = distance * cos(dec) * cos(ra)`
    /// - `y = distance * cos(dec) * sin(ra)`
    /// - `z = distance * sin(dec)`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skyview::coordinates::cartesian::Cartesian3;
    /// use std::f64::consts::PI;
    ///
    /// let north_pole = Cartesian3::from_spherical(0.0, PI / 2.0, 1.0);
    /// assert!((north_pole.z - 1.0).abs() < 1e-15);
    /// ```
    pub fn from_spherical(ra: f64, dec: f64, distance: f64) -> Self {
        let cos_dec = dec.cos();
        Cartesian3 {
            x: distance * cos_dec * ra.cos(),
            y: distance * cos_dec * ra.sin(),
            z: distance * dec.sin(),
        }
    }

    /// Converts an equatorial-frame vector to spherical coordinates
    ///
    /// Returns `(ra, dec, distance)` with right ascension normalized to
    /// [0, 2π) and declination in [-π/2, π/2]. The zero vector maps to all
    /// zeros and the poles report RA 0.
    pub fn to_spherical(&self) -> (f64, f64, f64) {
        let distance = self.magnitude();

        if distance == 0.0 {
            return (0.0, 0.0, 0.0);
        }

        let dec = (self.z / distance).clamp(-1.0, 1.0).asin();
        let ra = if self.x == 0.0 && self.y == 0.0 {
            0.0
        } else {
            self.y.atan2(self.x).rem_euclid(2.0 * PI)
        };

        (ra, dec, distance)
    }

    /// Euclidean length of the vector
    ///
    /// ```rust
    /// use skyview::coordinates::cartesian::Cartesian3;
    ///
    /// assert_eq!(Cartesian3::new(3.0, 4.0, 0.0).magnitude(), 5.0);
    /// ```
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns a unit vector in the same direction, or `None` for the zero vector
    pub fn normalize(&self) -> Option<Cartesian3> {
        let mag = self.magnitude();
        if mag == 0.0 {
            None
        } else {
            Some(*self / mag)
        }
    }

    /// Returns this vector multiplied by `r`
    pub fn scale(&self, r: f64) -> Cartesian3 {
        *self * r
    }

    /// Dot product with another vector
    pub fn dot(&self, other: &Cartesian3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another vector (right-hand rule)
    pub fn cross(&self, other: &Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Cosine of the angle between this vector and `other`
    ///
    /// Divides by the product of the lengths, so a zero-length input yields
    /// NaN.
    pub fn cosine_distance(&self, other: &Cartesian3) -> f64 {
        self.dot(other) / (self.magnitude() * other.magnitude())
    }

    /// Angle between this vector and `other`, in radians [0, π]
    ///
    /// The cosine is clamped into [-1, 1] before `acos` so rounding on
    /// (anti)parallel vectors cannot produce NaN. A zero-length input still
    /// yields NaN; callers that can see one must check first.
    ///
    /// ```rust
    /// use skyview::coordinates::cartesian::Cartesian3;
    /// use std::f64::consts::PI;
    ///
    /// let x_axis = Cartesian3::new(1.0, 0.0, 0.0);
    /// let y_axis = Cartesian3::new(0.0, 1.0, 0.0);
    /// assert!((x_axis.angle_to(&y_axis) - PI / 2.0).abs() < 1e-15);
    /// assert!(x_axis.angle_to(&Cartesian3::new(0.0, 0.0, 0.0)).is_nan());
    /// ```
    pub fn angle_to(&self, other: &Cartesian3) -> f64 {
        self.cosine_distance(other).clamp(-1.0, 1.0).acos()
    }

    /// Projection onto the screen plane (z dropped)
    pub fn collapse_to_xy(&self) -> Cartesian3 {
        Cartesian3::new(self.x, self.y, 0.0)
    }

    /// This vector as a pure quaternion (w = 0)
    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::new(self.x, self.y, self.z, 0.0)
    }

    /// Rotates this vector by `q`
    ///
    /// Computes `(q⁻¹ · v · q).vector_part()`. Every rotation in the viewer
    /// goes through this exact conjugation order; reversing it flips the
    /// handedness of all rotations.
    pub fn transform_by_quaternion(&self, q: &Quaternion) -> Cartesian3 {
        q.inverse()
            .multiply(&self.to_quaternion())
            .multiply(q)
            .vector_part()
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Cartesian3 {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }
}

impl std::fmt::Display for Cartesian3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl std::ops::Add for Cartesian3 {
    type Output = Cartesian3;

    fn add(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Cartesian3 {
    type Output = Cartesian3;

    fn sub(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Mul<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn mul(self, scalar: f64) -> Cartesian3 {
        Cartesian3 {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl std::ops::Div<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn div(self, scalar: f64) -> Cartesian3 {
        Cartesian3 {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl std::ops::Neg for Cartesian3 {
    type Output = Cartesian3;

    fn neg(self) -> Cartesian3 {
        Cartesian3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}
