// ============================================================
// Layer 2 — Assess Use Case
// ============================================================
// One linear pass per request:
//
//   Step 1: Derive burnout index and total stress  (Layer 3)
//   Step 2: Align raw + derived onto the schema    (Layer 4)
//   Step 3: predict + predict_proba                (Layer 5)
//
// Step 1 alone backs the always-visible metrics; the full pass
// only runs when the user asks for an analysis. Nothing is
// cached between calls.

use anyhow::{Context, Result};

use crate::application::context::AssessmentContext;
use crate::data::aligner::SchemaAligner;
use crate::domain::features::DerivedFeatures;
use crate::domain::prediction::Prediction;
use crate::domain::profile::StudentProfile;

/// Everything one analysis produces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub features:   DerivedFeatures,
    pub prediction: Prediction,
}

pub struct AssessUseCase<'a> {
    ctx: &'a AssessmentContext,
}

impl<'a> AssessUseCase<'a> {
    pub fn new(ctx: &'a AssessmentContext) -> Self {
        Self { ctx }
    }

    /// The two engineered features; cheap and always shown
    pub fn metrics(&self, profile: &StudentProfile) -> DerivedFeatures {
        DerivedFeatures::from_profile(profile)
    }

    /// Full pipeline for one profile snapshot
    pub fn assess(&self, profile: &StudentProfile) -> Result<Assessment> {
        let features = self.metrics(profile);
        let row      = SchemaAligner::new(self.ctx.schema()).align(profile, &features);

        let prediction = self
            .ctx
            .classifier()
            .classify(&row)
            .context("Classifier failed on the aligned row")?;

        tracing::debug!(
            "Assessed profile: burnout={:.2} stress={:.2} → class {} (p1={:.4})",
            features.burnout_index,
            features.total_stress,
            prediction.label.class(),
            prediction.probability,
        );
        Ok(Assessment { features, prediction })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::domain::prediction::RiskLabel;
    use crate::domain::schema::{AlignedRow, ColumnSchema};
    use crate::domain::traits::RiskClassifier;
    use crate::ml::inferencer::Inferencer;
    use crate::ml::model::{Classifier, LogisticModel, ModelArtifact};

    /// Records every row it is shown and answers p1 = 0.8
    struct RecordingClassifier {
        seen: Rc<RefCell<Vec<Vec<f64>>>>,
    }

    impl RiskClassifier for RecordingClassifier {
        fn kind(&self) -> &'static str { "recording" }
        fn n_features(&self) -> usize { 4 }
        fn predict_proba(&self, row: &AlignedRow) -> Result<[f64; 2]> {
            self.seen.borrow_mut().push(row.values().to_vec());
            Ok([0.2, 0.8])
        }
    }

    fn schema(cols: &[&str]) -> ColumnSchema {
        ColumnSchema::resolve(cols.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_classifier_sees_the_aligned_row() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let ctx  = AssessmentContext::new(
            schema(&["City_Pune", "Burnout_Index", "Academic Pressure", "Total_Stress"]),
            Box::new(RecordingClassifier { seen: Rc::clone(&seen) }),
        );
        let use_case = AssessUseCase::new(&ctx);

        let a = use_case.assess(&StudentProfile::default()).unwrap();
        assert_eq!(a.features.burnout_index, 4.5);
        assert_eq!(a.features.total_stress, 9.0);
        assert_eq!(a.prediction.label, RiskLabel::High);
        assert_eq!(a.prediction.probability, 0.8);

        // predict and predict_proba both ran on the same row
        let rows = seen.borrow();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![0.0, 4.5, 3.0, 9.0]);
        assert_eq!(rows[0], rows[1]);
    }

    #[test]
    fn test_burnout_driven_logistic_model() {
        // p1 = sigmoid(burnout - 10): only burnout matters, zero-filled city ignored
        let s = schema(&["Burnout_Index", "City_Pune"]);
        let artifact = ModelArtifact {
            feature_names: None,
            classifier: Classifier::Logistic(LogisticModel {
                coefficients: vec![1.0, 5.0],
                intercept:    -10.0,
                scaler:       None,
            }),
        };
        let inferencer = Inferencer::new(artifact, &s).unwrap();
        let ctx        = AssessmentContext::new(s, Box::new(inferencer));
        let use_case   = AssessUseCase::new(&ctx);

        // burnout 40 → high risk
        let worn_out = StudentProfile::new(5.0, 16.0, 3.0, 1.0, 3.5, 21.0);
        let high     = use_case.assess(&worn_out).unwrap();
        assert_eq!(high.features.burnout_index, 40.0);
        assert_eq!(high.prediction.label, RiskLabel::High);

        // burnout 0 → low risk
        let rested = StudentProfile::new(1.0, 0.0, 2.0, 5.0, 3.5, 21.0);
        let low    = use_case.assess(&rested).unwrap();
        assert_eq!(low.features.burnout_index, 0.0);
        assert_eq!(low.features.total_stress, 2.0);
        assert_eq!(low.prediction.label, RiskLabel::Low);
        assert!(low.prediction.probability < 0.001);
    }

    #[test]
    fn test_metrics_do_not_touch_the_classifier() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let ctx  = AssessmentContext::new(
            schema(&["Age", "CGPA", "Total_Stress", "Burnout_Index"]),
            Box::new(RecordingClassifier { seen: Rc::clone(&seen) }),
        );
        let m = AssessUseCase::new(&ctx).metrics(&StudentProfile::default());
        assert_eq!(m.burnout_index, 4.5);
        assert!(seen.borrow().is_empty());
    }
}
