// ============================================================
// Layer 3 — Derived Features
// ============================================================
// Two engineered features computed from the raw profile:
//
//   burnout_index = (academic_pressure * study_hours)
//                   / (study_satisfaction + 1)
//   total_stress  = financial_stress * academic_pressure
//
// Both are pure functions of the profile. study_satisfaction is
// clamped to >= 1, so the denominator is always >= 2.

use super::profile::StudentProfile;

/// The Derived Feature Set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFeatures {
    pub burnout_index: f64,
    pub total_stress:  f64,
}

impl DerivedFeatures {
    pub fn from_profile(profile: &StudentProfile) -> Self {
        let pressure     = f64::from(profile.academic_pressure());
        let hours        = f64::from(profile.study_hours());
        let satisfaction = f64::from(profile.study_satisfaction());
        let financial    = f64::from(profile.financial_stress());

        Self {
            burnout_index: (pressure * hours) / (satisfaction + 1.0),
            total_stress:  financial * pressure,
        }
    }
}
