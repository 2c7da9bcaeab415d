// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// Everything that knows what a fitted classifier looks like.
// No other layer imports burn or the artifact format directly.
//
//   model.rs      — the JSON artifact format (logistic
//                   regression or decision-tree forest) and the
//                   load-time check against the column schema
//
//   inferencer.rs — the scoring engine; implements the domain's
//                   RiskClassifier trait
//
// Training is not part of this program: artifacts come from an
// offline process and are only ever read here.
//
// Reference: Burn Book §3 (Building Blocks)

/// Classifier artifact format and validation
pub mod model;

/// Scoring engine behind RiskClassifier
pub mod inferencer;
