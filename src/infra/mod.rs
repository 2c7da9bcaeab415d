// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File access lives here and nowhere else:
//
//   artifacts.rs — locating, reading and decoding the two
//                  training artifacts (classifier + column
//                  list), with a typed error for each way
//                  that can fail
//
// Swapping where artifacts come from (another directory, an
// object store) only touches this layer.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling)

/// Classifier and column-list loading
pub mod artifacts;
