//! Precession between two fixed epochs
//!
//! The constellation boundaries are defined for the equinox of B1875.0 while
//! the viewer works in J2000. The rotation between the two uses the three
//! equatorial precession angles ζ, z and θ as polynomials in Julian
//! centuries from J2000.

use crate::constants::{
    B1900, BOUNDARY_EPOCH_YEAR, DEG2RAD, HOURS2RAD, J2000, JULIAN_CENTURY_DAYS, RAD2DEG,
    RAD2HOURS, TROPICAL_YEAR_DAYS,
};
use crate::coordinates::cartesian::Cartesian3;
use crate::coordinates::RaDec;
use nalgebra::Matrix3;

/// Julian date of a Besselian epoch such as B1875.0
pub fn besselian_to_jd(year: f64) -> f64 {
    (year - 1900.0) * TROPICAL_YEAR_DAYS + B1900
}

/// Precession angles `(ζ, z, θ)` in radians for `t` Julian centuries from J2000
pub fn precession_angles(t: f64) -> (f64, f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    let zeta_deg = 0.640_616_1 * t + 0.000_083_9 * t2 + 0.000_005_0 * t3;
    let z_deg = 0.640_616_1 * t + 0.000_304_1 * t2 + 0.000_005_1 * t3;
    let theta_deg = 0.556_753_0 * t - 0.000_118_5 * t2 - 0.000_011_6 * t3;
    (zeta_deg * DEG2RAD, z_deg * DEG2RAD, theta_deg * DEG2RAD)
}

/// Rotation matrix taking J2000 equatorial vectors to the mean equator and
/// equinox of `jd`
///
/// The transpose rotates back from `jd` to J2000.
pub fn precession_matrix(jd: f64) -> Matrix3<f64> {
    let t = (jd - J2000) / JULIAN_CENTURY_DAYS;
    let (zeta, z, theta) = precession_angles(t);

    let (sx, cx) = zeta.sin_cos();
    let (sz, cz) = z.sin_cos();
    let (st, ct) = theta.sin_cos();

    Matrix3::new(
        cx * ct * cz - sx * sz,
        -sx * ct * cz - cx * sz,
        -st * cz,
        cx * ct * sz + sx * cz,
        -sx * ct * sz + cx * cz,
        -st * sz,
        cx * st,
        -sx * st,
        ct,
    )
}

/// Apply a precession matrix to an RA/Dec position
pub fn precess(ra_dec: &RaDec, matrix: &Matrix3<f64>) -> RaDec {
    let v = Cartesian3::from_spherical(ra_dec.ra * HOURS2RAD, ra_dec.dec * DEG2RAD, 1.0);
    let rotated = Cartesian3::from_vector3(matrix * v.to_vector3());
    let (ra, dec, _) = rotated.to_spherical();
    RaDec::new(ra * RAD2HOURS, dec * RAD2DEG)
}

/// Precess a J2000 position to the B1875 boundary epoch
pub fn precess_j2000_to_b1875(ra_dec: &RaDec) -> RaDec {
    precess(ra_dec, &precession_matrix(besselian_to_jd(BOUNDARY_EPOCH_YEAR)))
}

/// Precess a B1875 position to J2000
pub fn precess_b1875_to_j2000(ra_dec: &RaDec) -> RaDec {
    precess(
        ra_dec,
        &precession_matrix(besselian_to_jd(BOUNDARY_EPOCH_YEAR)).transpose(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_besselian_epochs() {
        assert_abs_diff_eq!(besselian_to_jd(1900.0), B1900, epsilon = 1e-9);
        // B1950.0 = JD 2433282.4235
        assert_abs_diff_eq!(besselian_to_jd(1950.0), 2_433_282.423_5, epsilon = 1e-3);
    }

    #[test]
    fn test_zero_interval_is_identity() {
        let m = precession_matrix(J2000);
        assert_abs_diff_eq!(m, Matrix3::identity(), epsilon = 1e-15);
    }

    #[test]
    fn test_matrix_is_a_rotation() {
        let m = precession_matrix(besselian_to_jd(1875.0));
        assert_abs_diff_eq!(m * m.transpose(), Matrix3::identity(), epsilon = 1e-12);
        assert_abs_diff_eq!(m.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_round_trip() {
        let original = RaDec::new(5.5, -12.0);
        let there = precess_j2000_to_b1875(&original);
        let back = precess_b1875_to_j2000(&there);
        assert_abs_diff_eq!(back.ra, original.ra, epsilon = 1e-9);
        assert_abs_diff_eq!(back.dec, original.dec, epsilon = 1e-9);
    }

    #[test]
    fn test_equatorial_shift_over_125_years() {
        // Near RA 0h on the equator the equinox moves about 3.07s of RA per
        // year, so going back 125 years lowers RA by roughly 6.4 minutes.
        let j2000 = RaDec::new(1.0, 0.0);
        let b1875 = precess_j2000_to_b1875(&j2000);
        let shift_minutes = (j2000.ra - b1875.ra) * 60.0;
        assert!(shift_minutes > 5.5 && shift_minutes < 7.5, "{}", shift_minutes);
        assert!(b1875.dec < 0.0);
    }
}
