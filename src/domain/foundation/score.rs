//! Score value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A real value between 0 and 100 inclusive.
///
/// Deserialized values are range-checked, not clamped.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    /// Zero.
    pub const ZERO: Self = Self(0.0);

    /// One hundred.
    pub const HUNDRED: Self = Self(100.0);

    /// Creates a new Score, clamping to the valid range. NaN becomes zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// Creates a Score from a fraction in [0, 1].
    pub fn from_fraction(fraction: f64) -> Self {
        Self::new(fraction * 100.0)
    }

    /// Creates a Score, returning error if out of range.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !(0.0..=100.0).contains(&value) {
            return Err(ValidationError::out_of_range("score", 0.0, 100.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the value as a fraction (0.0 to 1.0).
    pub fn as_fraction(&self) -> f64 {
        self.0 / 100.0
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<f64> for Score {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_new_clamps_to_range() {
        assert_eq!(Score::new(-4.0).value(), 0.0);
        assert_eq!(Score::new(42.5).value(), 42.5);
        assert_eq!(Score::new(180.0).value(), 100.0);
    }

    #[test]
    fn score_new_maps_nan_to_zero() {
        assert_eq!(Score::new(f64::NAN), Score::ZERO);
    }

    #[test]
    fn score_try_new_rejects_out_of_range() {
        assert!(Score::try_new(100.0).is_ok());
        match Score::try_new(100.5) {
            Err(ValidationError::OutOfRange { field, actual, .. }) => {
                assert_eq!(field, "score");
                assert_eq!(actual, 100.5);
            }
            other => panic!("Expected OutOfRange error, got {:?}", other),
        }
        assert!(Score::try_new(f64::NAN).is_err());
    }

    #[test]
    fn score_from_fraction_scales() {
        assert!((Score::from_fraction(1.0 / 3.0).value() - 33.333).abs() < 0.001);
        assert!((Score::new(25.0).as_fraction() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn score_displays_one_decimal() {
        assert_eq!(format!("{}", Score::from_fraction(1.0 / 3.0)), "33.3%");
        assert_eq!(format!("{}", Score::HUNDRED), "100.0%");
    }

    #[test]
    fn score_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Score::new(12.5)).unwrap(), "12.5");
    }

    #[test]
    fn score_deserialization_rejects_out_of_range() {
        let score: Score = serde_json::from_str("12.5").unwrap();
        assert_eq!(score.value(), 12.5);

        assert!(serde_json::from_str::<Score>("100.5").is_err());
        assert!(serde_json::from_str::<Score>("-1").is_err());
    }
}
