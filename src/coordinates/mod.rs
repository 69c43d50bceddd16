//! Sky coordinates: RA/Dec pairs and their view-frame unit vectors

pub mod angle;
pub mod cartesian;

use crate::constants::{DEG2RAD, HOURS2RAD, HOURS_PER_TURN, RAD2DEG, RAD2HOURS};
use angle::{positive_modulo, Sexagesimal};
use cartesian::Cartesian3;

/// A direction on the celestial sphere
///
/// Right ascension is in hours [0, 24) and declination in degrees
/// [-90, 90], the units catalogs and the readout use.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RaDec {
    /// Right ascension in hours
    pub ra: f64,
    /// Declination in degrees
    pub dec: f64,
}

impl RaDec {
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    /// Right ascension in radians
    pub fn ra_radians(&self) -> f64 {
        self.ra * HOURS2RAD
    }

    /// Declination in radians
    pub fn dec_radians(&self) -> f64 {
        self.dec * DEG2RAD
    }

    /// Unit vector in the view frame
    ///
    /// `(-cos ra · cos dec, -sin dec, sin ra · cos dec)`: the view RA
    /// rotation of π/2 is folded in, so RA 0h lies on the -X axis and the
    /// north pole on -Y.
    pub fn to_position(&self) -> Cartesian3 {
        let ra_rad = self.ra_radians();
        let dec_rad = self.dec_radians();
        let cos_dec = dec_rad.cos();
        Cartesian3::new(-ra_rad.cos() * cos_dec, -dec_rad.sin(), ra_rad.sin() * cos_dec)
    }

    /// Inverse of [`RaDec::to_position`]
    ///
    /// The vector is re-normalized first, and the declination comes from
    /// `atan2` so positions a hair away from a pole are not rounded onto it.
    /// The zero vector maps to RA 0h, Dec 0°.
    pub fn from_position(position: &Cartesian3) -> Self {
        let Some(unit) = position.normalize() else {
            return Self::new(0.0, 0.0);
        };
        let ra_rad = unit.z.atan2(-unit.x);
        let dec_rad = (-unit.y).atan2(unit.x.hypot(unit.z));
        Self {
            ra: positive_modulo(ra_rad * RAD2HOURS, HOURS_PER_TURN),
            dec: dec_rad * RAD2DEG,
        }
    }

    /// Great-circle distance to `other`, in radians
    pub fn angular_distance(&self, other: &RaDec) -> f64 {
        let a = self.to_position();
        let b = other.to_position();
        a.angle_to(&b)
    }

    /// Format as the status-line readout
    ///
    /// Sexagesimal by default (`RA 05h 35m 17s Dec -05° 23' 28"`), or six
    /// decimal places (`RA 05.588056h Dec -05.391111°`) when `decimal` is
    /// set.
    pub fn to_display_string(&self, decimal: bool) -> String {
        if decimal {
            let ra_string = format!("{:0>9}h", format!("{:.6}", self.ra));
            let dec_sign = if self.dec < 0.0 { "" } else { "+" };
            let dec_string = format!("{}{:0>9}\u{00b0}", dec_sign, format!("{:.6}", self.dec));
            return format!("RA {} Dec {}", ra_string, dec_string);
        }

        let ra = Sexagesimal::from_decimal(self.ra);
        let dec = Sexagesimal::from_decimal(self.dec.abs());
        let dec_sign = if self.dec >= 0.0 { "+" } else { "-" };

        format!(
            "RA {:02}h {:02}m {:02}s Dec {}{:02}\u{00b0} {:02}' {:02}\"",
            ra.whole, ra.minutes, ra.seconds, dec_sign, dec.whole, dec.minutes, dec.seconds
        )
    }
}

impl std::fmt::Display for RaDec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_display_string(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::distributions::{Distribution, Uniform};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0, -1.0, 0.0, 0.0)]
    #[case(6.0, 0.0, 0.0, 0.0, 1.0)]
    #[case(12.0, 0.0, 1.0, 0.0, 0.0)]
    #[case(18.0, 0.0, 0.0, 0.0, -1.0)]
    #[case(3.0, 90.0, 0.0, -1.0, 0.0)]
    #[case(3.0, -90.0, 0.0, 1.0, 0.0)]
    fn test_position_axes(
        #[case] ra: f64,
        #[case] dec: f64,
        #[case] x: f64,
        #[case] y: f64,
        #[case] z: f64,
    ) {
        let p = RaDec::new(ra, dec).to_position();
        assert_abs_diff_eq!(p.x, x, epsilon = 1e-15);
        assert_abs_diff_eq!(p.y, y, epsilon = 1e-15);
        assert_abs_diff_eq!(p.z, z, epsilon = 1e-15);
    }

    #[test]
    fn test_position_round_trip() {
        let mut rng = StdRng::seed_from_u64(1875);
        let ra_dist = Uniform::new(0.0, 24.0);
        let dec_dist = Uniform::new(-89.999, 89.999);
        for _ in 0..1000 {
            let original = RaDec::new(ra_dist.sample(&mut rng), dec_dist.sample(&mut rng));
            let back = RaDec::from_position(&original.to_position());
            let ra_diff = (back.ra - original.ra).abs();
            assert!(ra_diff.min(24.0 - ra_diff) < 1e-9, "{:?} vs {:?}", original, back);
            assert_abs_diff_eq!(back.dec, original.dec, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_from_position_renormalizes() {
        let p = RaDec::new(7.25, 41.0).to_position() * 1.000_001;
        let back = RaDec::from_position(&p);
        assert_abs_diff_eq!(back.ra, 7.25, epsilon = 1e-9);
        assert_abs_diff_eq!(back.dec, 41.0, epsilon = 1e-9);

        // Slightly beyond the pole must not produce NaN
        let beyond = RaDec::from_position(&Cartesian3::new(0.0, -1.000_000_1, 0.0));
        assert_abs_diff_eq!(beyond.dec, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_from_position_resolves_near_pole() {
        let offset = 1e-10_f64;
        let near = Cartesian3::new(0.0, -offset.cos(), -offset.sin());
        let dec = RaDec::from_position(&near).dec;
        assert!(dec < 90.0);
        assert_abs_diff_eq!(90.0 - dec, offset.to_degrees(), epsilon = 1e-12);
    }

    #[test]
    fn test_angular_distance() {
        let a = RaDec::new(0.0, 0.0);
        let b = RaDec::new(6.0, 0.0);
        assert_abs_diff_eq!(a.angular_distance(&b), std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(a.angular_distance(&a), 0.0, epsilon = 1e-7);
    }

    #[rstest]
    #[case(18.0, 0.0, "RA 18h 00m 00s Dec +00\u{00b0} 00' 00\"")]
    #[case(5.5, -5.5, "RA 05h 30m 00s Dec -05\u{00b0} 30' 00\"")]
    #[case(23.999_999_9, 89.999_999_9, "RA 24h 00m 00s Dec +90\u{00b0} 00' 00\"")]
    fn test_sexagesimal_display(#[case] ra: f64, #[case] dec: f64, #[case] expected: &str) {
        assert_eq!(RaDec::new(ra, dec).to_display_string(false), expected);
    }

    #[rstest]
    #[case(18.0, 0.0, "RA 18.000000h Dec +00.000000\u{00b0}")]
    #[case(1.5, 5.25, "RA 01.500000h Dec +05.250000\u{00b0}")]
    #[case(1.5, -5.25, "RA 01.500000h Dec -5.250000\u{00b0}")]
    #[case(12.0, -45.0, "RA 12.000000h Dec -45.000000\u{00b0}")]
    fn test_decimal_display(#[case] ra: f64, #[case] dec: f64, #[case] expected: &str) {
        assert_eq!(RaDec::new(ra, dec).to_display_string(true), expected);
    }
}
