// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Wires the lower layers into the screener's workflows:
//
//   context.rs        — loads both artifacts once at startup and
//                       holds them, read-only, for the session
//   assess_use_case.rs — profile → features → aligned row →
//                       prediction
//   presenter.rs      — number and verdict formatting
//   form.rs           — the interactive form's state, the actions
//                       that change it, and the pure view derived
//                       from it
//
// Rules for this layer:
//   - No model maths (Layer 5) and no file reading (Layer 6)
//   - No terminal drawing or printing (Layer 1)
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

/// Immutable session context (schema + classifier)
pub mod context;

/// The scoring workflow
pub mod assess_use_case;

/// Output formatting shared by every front end
pub mod presenter;

/// Form state machine and view model
pub mod form;
