// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Turns one profile snapshot into a classifier-ready row:
//
//   StudentProfile        (six clamped inputs)
//       │
//       ▼
//   DerivedFeatures       → burnout index, total stress
//       │
//       ▼
//   SchemaAligner         → one value per schema column, in
//                           schema order, zero for absent columns
//       │
//       ▼
//   AlignedRow            → handed to the classifier
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Reindexes raw + derived features onto the column schema
pub mod aligner;
