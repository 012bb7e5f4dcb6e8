//! Output transformation for inference.
//!
//! The ensemble produces a raw margin (log-odds). [`sigmoid`] maps it to a
//! probability and [`RiskClass::from_probability`] thresholds that probability
//! into a binary decision.

use serde::Serialize;

/// Probability above which a sample is classified positive.
///
/// The comparison is strict: a probability of exactly 0.5 is negative.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Logistic sigmoid: `1 / (1 + exp(-margin))`.
///
/// Evaluated in `f64` without clamping. Large negative margins underflow to
/// exactly 0.0 and large positive margins saturate to 1.0.
#[inline]
pub fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}

/// Binary outcome of a risk prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum RiskClass {
    Negative,
    Positive,
}

impl RiskClass {
    /// Classify a probability with the strict [`DECISION_THRESHOLD`].
    #[inline]
    pub fn from_probability(probability: f64) -> Self {
        if probability > DECISION_THRESHOLD {
            RiskClass::Positive
        } else {
            RiskClass::Negative
        }
    }

    /// Class index: 0 for negative, 1 for positive.
    #[inline]
    pub fn as_u8(self) -> u8 {
        match self {
            RiskClass::Negative => 0,
            RiskClass::Positive => 1,
        }
    }

    /// Human-facing answer, "Yes" for positive.
    pub fn label(self) -> &'static str {
        match self {
            RiskClass::Negative => "No",
            RiskClass::Positive => "Yes",
        }
    }
}

impl From<RiskClass> for u8 {
    fn from(class: RiskClass) -> u8 {
        class.as_u8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // =========================================================================
    // Sigmoid tests
    // =========================================================================

    #[test]
    fn sigmoid_zero_is_half() {
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn sigmoid_known_value() {
        assert_abs_diff_eq!(sigmoid(0.1), 0.524_979_187_478_94, epsilon = 1e-15);
        assert_abs_diff_eq!(sigmoid(-0.1), 1.0 - sigmoid(0.1), epsilon = 1e-15);
    }

    #[test]
    fn sigmoid_output_in_zero_one() {
        for m in [-1e6, -800.0, -10.0, -1.0, 0.0, 1.0, 10.0, 800.0, 1e6] {
            let p = sigmoid(m);
            assert!((0.0..=1.0).contains(&p), "sigmoid({m}) = {p} not in [0,1]");
        }
    }

    #[test]
    fn sigmoid_saturates_without_nan() {
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(f64::NEG_INFINITY), 0.0);
        assert_eq!(sigmoid(f64::INFINITY), 1.0);
    }

    // =========================================================================
    // Classification tests
    // =========================================================================

    #[test]
    fn threshold_is_strict() {
        assert_eq!(RiskClass::from_probability(0.5), RiskClass::Negative);
        assert_eq!(
            RiskClass::from_probability(0.5 + f64::EPSILON),
            RiskClass::Positive
        );
        assert_eq!(RiskClass::from_probability(0.0), RiskClass::Negative);
        assert_eq!(RiskClass::from_probability(1.0), RiskClass::Positive);
    }

    #[test]
    fn serializes_as_index() {
        assert_eq!(serde_json::to_string(&RiskClass::Positive).unwrap(), "1");
        assert_eq!(serde_json::to_string(&RiskClass::Negative).unwrap(), "0");
        assert_eq!(RiskClass::Positive.label(), "Yes");
        assert_eq!(RiskClass::Negative.label(), "No");
    }
}
