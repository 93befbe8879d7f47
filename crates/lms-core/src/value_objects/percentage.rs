//! Completion percentage - a validated value in `[0, 100]`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Completion percentage of a course
///
/// Construction through [`Percentage::new`] rejects out-of-range and
/// non-finite input rather than clamping it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percentage(f64);

impl Percentage {
    pub const ZERO: Self = Self(0.0);
    pub const FULL: Self = Self(100.0);

    /// Create a percentage, failing with `InvalidPercentage` outside `[0, 100]`
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidPercentage(value))
        }
    }

    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_complete(self) -> bool {
        self.0 >= 100.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 <= 0.0
    }

    /// Apply this percentage to a whole quantity, rounding down
    pub fn of(self, total: i32) -> i32 {
        (f64::from(total) * self.0 / 100.0).floor() as i32
    }
}

impl TryFrom<f64> for Percentage {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentage> for f64 {
    fn from(p: Percentage) -> Self {
        p.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_accepted() {
        assert_eq!(Percentage::new(0.0).unwrap(), Percentage::ZERO);
        assert_eq!(Percentage::new(100.0).unwrap(), Percentage::FULL);
        assert_eq!(Percentage::new(45.5).unwrap().value(), 45.5);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            Percentage::new(100.5),
            Err(DomainError::InvalidPercentage(v)) if v == 100.5
        ));
        assert!(Percentage::new(-1.0).is_err());
        assert!(Percentage::new(f64::NAN).is_err());
        assert!(Percentage::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_of_rounds_down() {
        let half = Percentage::new(50.0).unwrap();
        assert_eq!(half.of(120), 60);

        let third = Percentage::new(33.0).unwrap();
        assert_eq!(third.of(100), 33);
        assert_eq!(third.of(10), 3);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Percentage = serde_json::from_str("80").unwrap();
        assert_eq!(ok.value(), 80.0);

        assert!(serde_json::from_str::<Percentage>("101").is_err());
    }

    #[test]
    fn test_completion_flags() {
        assert!(Percentage::FULL.is_complete());
        assert!(!Percentage::new(99.9).unwrap().is_complete());
        assert!(Percentage::ZERO.is_zero());
    }
}
