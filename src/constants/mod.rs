//! Constants module for sky view calculations

use std::f64::consts::PI;

// Time constants
/// Days in a Julian century
pub const JULIAN_CENTURY_DAYS: f64 = 36_525.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Length of the tropical year in days, used for Besselian epochs
pub const TROPICAL_YEAR_DAYS: f64 = 365.242_198_781;
/// Julian date of the Besselian epoch B1900.0
pub const B1900: f64 = 2_415_020.313_52;
/// Besselian year the constellation boundaries were drawn for
pub const BOUNDARY_EPOCH_YEAR: f64 = 1875.0;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Hours of right ascension to radians
pub const HOURS2RAD: f64 = PI / 12.0;
/// Radians to hours of right ascension
pub const RAD2HOURS: f64 = 12.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;
/// Hours in a full turn of right ascension
pub const HOURS_PER_TURN: f64 = 24.0;

// View geometry
/// Offset between right ascension and the angle around the view's pole axis.
///
/// Baked into [`crate::coordinates::RaDec::to_position`] so that RA 0h sits
/// a quarter turn away from the default view direction.
pub const VIEW_RA_ROTATION: f64 = PI / 2.0;
/// Fraction of the remaining distance to a pole that one declination step may cover
pub const DEC_STEP_POLE_FRACTION: f64 = 0.7;
/// Declination steps stop once the pointing is this close to a pole (radians)
pub const DEC_STEP_POLE_FLOOR: f64 = 1e-9;

// Constellation lookup
/// Northern circumpolar constellation reported above the boundary table
pub const NORTH_POLAR_CONSTELLATION: &str = "UMi";
/// Southern circumpolar constellation reported below the boundary table
pub const SOUTH_POLAR_CONSTELLATION: &str = "Oct";
/// Label reported when no boundary contains the pointing
pub const UNKNOWN_CONSTELLATION: &str = "constellation unknown";
/// Label reported before any boundary data has been loaded
pub const LOADING_CONSTELLATIONS: &str = "loading constellations...";
