// ============================================================
// Layer 3 — Prediction Result
// ============================================================
// The binary classifier answers with a class (0 or 1) and a
// probability for class 1. Class 1 is "high risk".

/// The two output classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLabel {
    /// Class 0
    Low,
    /// Class 1
    High,
}

impl RiskLabel {
    /// Numeric class as the classifier reports it
    pub fn class(self) -> u8 {
        match self {
            RiskLabel::Low  => 0,
            RiskLabel::High => 1,
        }
    }

    /// Arg-max over `[p0, p1]`; a tie goes to class 0
    pub fn from_probabilities(proba: [f64; 2]) -> Self {
        if proba[1] > proba[0] { RiskLabel::High } else { RiskLabel::Low }
    }
}

/// One inference outcome. Lives for a single render cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: RiskLabel,

    /// Probability of the positive (high-risk) class, in [0, 1],
    /// regardless of which label won
    pub probability: f64,
}
