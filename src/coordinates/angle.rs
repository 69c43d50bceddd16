//! # Angle Helpers
//!
//! Wrap-aware modular arithmetic and sexagesimal splitting for the readout.
//!
//! Right ascension is carried in hours and declination in degrees at the
//! edges of the system (catalog records, the status line) and in radians
//! everywhere in between. Both wrap: RA at 24h/0h, and every angle fed to
//! the projection at 2π.
//!
//! ## Examples
//!
//! ```rust
//! use skyview::coordinates::angle::{positive_modulo, Sexagesimal};
//!
//! assert_eq!(positive_modulo(-6.0, 24.0), 18.0);
//!
//! let split = Sexagesimal::from_decimal(12.5);
//! assert_eq!((split.whole, split.minutes, split.seconds), (12, 30, 0));
//! ```

/// Remainder of `i / n` that always has the sign of `n`
///
/// Unlike `%`, negative inputs wrap around: `positive_modulo(-1.0, 24.0)`
/// is `23.0`.
pub fn positive_modulo(i: f64, n: f64) -> f64 {
    ((i % n) + n) % n
}

/// Minutes and seconds of the fractional part of a value
///
/// Seconds are rounded to the nearest whole second, so the result can be
/// 60; [`Sexagesimal::from_decimal`] carries that over.
pub fn decimal_to_minutes_seconds(decimal: f64) -> (u32, u32) {
    let minutes = decimal * 60.0;
    let min = minutes.floor();
    let sec = ((minutes - min) * 60.0).round();
    (min as u32, sec as u32)
}

/// A non-negative value split into whole units, minutes and seconds
///
/// Used for both hours (RA) and degrees (Dec). Rounding a value like
/// 1.9999999 produces 60 seconds, which is carried into the minutes and
/// then into the whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sexagesimal {
    /// Whole hours or degrees
    pub whole: u32,
    /// Minutes [0, 60)
    pub minutes: u32,
    /// Seconds [0, 60)
    pub seconds: u32,
}

impl Sexagesimal {
    /// Split a non-negative decimal value
    pub fn from_decimal(value: f64) -> Self {
        let whole = value.floor();
        let (mut minutes, mut seconds) = decimal_to_minutes_seconds(value - whole);
        let mut whole = whole as u32;

        if seconds == 60 {
            seconds = 0;
            minutes += 1;
        }
        if minutes == 60 {
            minutes = 0;
            whole += 1;
        }

        Self {
            whole,
            minutes,
            seconds,
        }
    }
}
