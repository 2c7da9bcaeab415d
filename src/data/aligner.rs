// ============================================================
// Layer 4 — Schema Aligner
// ============================================================
// The one correctness-critical step in the pipeline. Given the
// profile, its derived features and the resolved schema, emit
// exactly one value per schema column, in schema order:
//
//   ColumnSlot::Known(f) → f's value
//   ColumnSlot::Absent   → 0.0
//
// The output has no extra columns and no missing ones, whatever
// the input values are.

use crate::domain::features::DerivedFeatures;
use crate::domain::profile::StudentProfile;
use crate::domain::schema::{AlignedRow, ColumnSchema, ColumnSlot};

pub struct SchemaAligner<'a> {
    schema: &'a ColumnSchema,
}

impl<'a> SchemaAligner<'a> {
    pub fn new(schema: &'a ColumnSchema) -> Self {
        Self { schema }
    }

    /// Build the aligned row for one profile snapshot
    pub fn align(&self, profile: &StudentProfile, derived: &DerivedFeatures) -> AlignedRow {
        let values: Vec<f64> = self
            .schema
            .columns()
            .map(|(_, slot)| match slot {
                ColumnSlot::Known(feature) => feature.value(profile, derived),
                ColumnSlot::Absent         => 0.0,
            })
            .collect();

        tracing::trace!("Aligned row over {} columns", values.len());
        AlignedRow::from_values(values)
    }
}
