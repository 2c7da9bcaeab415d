// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits that define what the
// screener works with:
//
//   profile.rs    — the six bounded lifestyle inputs
//   features.rs   — the two engineered features derived from them
//   schema.rs     — the classifier's column schema, resolved into
//                   typed slots, and the aligned feature row
//   prediction.rs — the risk label and probability
//   traits.rs     — the classifier abstraction the ML layer implements
//
// Rules for this layer:
//   - NO Burn types, NO terminal types, NO file I/O
//   - Every value here is either validated on construction or
//     derived from something that was
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

/// The Raw Input Set and its per-field bounds
pub mod profile;

/// Burnout index and total stress
pub mod features;

/// Column schema, known features and the aligned row
pub mod schema;

/// Risk label + probability
pub mod prediction;

/// Core abstractions (traits) that other layers implement
pub mod traits;
