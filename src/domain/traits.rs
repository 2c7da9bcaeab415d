// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer talks to "a classifier" through this
// trait and never sees the model format behind it.
//
// Implementations:
//   - Inferencer (Layer 5) → logistic regression or tree forest
//     loaded from the model artifact
//   - test doubles in the application layer's unit tests
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::prediction::{Prediction, RiskLabel};
use crate::domain::schema::AlignedRow;

// ─── RiskClassifier ───────────────────────────────────────────────────────────
/// A fitted binary classifier over aligned feature rows.
pub trait RiskClassifier {
    /// Short name of the model family, for logs ("logistic", "forest")
    fn kind(&self) -> &'static str;

    /// Number of columns the classifier reads
    fn n_features(&self) -> usize;

    /// Class probabilities `[p0, p1]` for one row
    fn predict_proba(&self, row: &AlignedRow) -> Result<[f64; 2]>;

    /// Class label for one row
    fn predict(&self, row: &AlignedRow) -> Result<RiskLabel> {
        Ok(RiskLabel::from_probabilities(self.predict_proba(row)?))
    }

    /// Both calls together, as the result screen needs them
    fn classify(&self, row: &AlignedRow) -> Result<Prediction> {
        let label = self.predict(row)?;
        let [_, p1] = self.predict_proba(row)?;
        Ok(Prediction { label, probability: p1 })
    }
}
