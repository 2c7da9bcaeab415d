// ============================================================
// Layer 3 — Column Schema and Aligned Row
// ============================================================
// The classifier was fitted on a table whose columns came in a
// specific order. Inference rows must present the same columns
// in the same order: the model reads values by position, so a
// row in the wrong order mis-predicts without any error.
//
// The training table had more columns than the form collects
// (one-hot encoded degree / city columns, for example). Only
// eight column names map onto values this program produces:
//
//   Academic Pressure, Work/Study Hours, Financial Stress,
//   Study Satisfaction, CGPA, Age          (raw inputs)
//   Burnout_Index, Total_Stress            (derived)
//
// Every other column is zero-filled, which for a one-hot column
// means "reference / absent category".
//
// The schema is resolved once, at load time, into a slot per
// column: Known(feature) or Absent. Alignment then walks the
// slots, so zero-fill is an explicit branch rather than a side
// effect of a lookup miss.

use std::collections::HashMap;
use thiserror::Error;

use super::features::DerivedFeatures;
use super::profile::StudentProfile;

/// The eight column names this program knows how to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownFeature {
    AcademicPressure,
    StudyHours,
    FinancialStress,
    StudySatisfaction,
    Cgpa,
    Age,
    BurnoutIndex,
    TotalStress,
}

impl KnownFeature {
    pub const ALL: [KnownFeature; 8] = [
        KnownFeature::AcademicPressure,
        KnownFeature::StudyHours,
        KnownFeature::FinancialStress,
        KnownFeature::StudySatisfaction,
        KnownFeature::Cgpa,
        KnownFeature::Age,
        KnownFeature::BurnoutIndex,
        KnownFeature::TotalStress,
    ];

    /// Exact column name used in the training table
    pub fn column_name(self) -> &'static str {
        match self {
            KnownFeature::AcademicPressure  => "Academic Pressure",
            KnownFeature::StudyHours        => "Work/Study Hours",
            KnownFeature::FinancialStress   => "Financial Stress",
            KnownFeature::StudySatisfaction => "Study Satisfaction",
            KnownFeature::Cgpa              => "CGPA",
            KnownFeature::Age               => "Age",
            KnownFeature::BurnoutIndex      => "Burnout_Index",
            KnownFeature::TotalStress       => "Total_Stress",
        }
    }

    /// Case-sensitive lookup by column name
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column_name() == name)
    }

    /// Pull this feature's value out of the raw + derived inputs
    pub fn value(self, profile: &StudentProfile, derived: &DerivedFeatures) -> f64 {
        match self {
            KnownFeature::AcademicPressure  => f64::from(profile.academic_pressure()),
            KnownFeature::StudyHours        => f64::from(profile.study_hours()),
            KnownFeature::FinancialStress   => f64::from(profile.financial_stress()),
            KnownFeature::StudySatisfaction => f64::from(profile.study_satisfaction()),
            KnownFeature::Cgpa              => profile.cgpa(),
            KnownFeature::Age               => f64::from(profile.age()),
            KnownFeature::BurnoutIndex      => derived.burnout_index,
            KnownFeature::TotalStress       => derived.total_stress,
        }
    }
}

/// What fills one schema column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSlot {
    /// Filled from the profile or the derived features
    Known(KnownFeature),
    /// Not produced by this program; always 0
    Absent,
}

/// Reasons a column list cannot be used as a schema
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("column list is empty")]
    Empty,

    #[error("column {index} has an empty name")]
    EmptyName { index: usize },

    #[error("column '{name}' appears twice (positions {first} and {second})")]
    Duplicate { name: String, first: usize, second: usize },
}

/// The classifier's ordered column list, resolved into slots.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    names: Vec<String>,
    slots: Vec<ColumnSlot>,
}

impl ColumnSchema {
    /// Validate a column list and resolve each name to a slot.
    ///
    /// Rejects empty lists, empty names and duplicates: with a duplicate
    /// the "value for column X" question has two answers.
    pub fn resolve(names: Vec<String>) -> Result<Self, SchemaError> {
        if names.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(SchemaError::EmptyName { index });
            }
            if let Some(&first) = seen.get(name.as_str()) {
                return Err(SchemaError::Duplicate {
                    name:   name.clone(),
                    first,
                    second: index,
                });
            }
            seen.insert(name.as_str(), index);
        }

        let slots = names
            .iter()
            .map(|name| match KnownFeature::from_column(name) {
                Some(feature) => ColumnSlot::Known(feature),
                None          => ColumnSlot::Absent,
            })
            .collect();

        Ok(Self { names, slots })
    }

    /// Number of columns the classifier expects
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// (name, slot) pairs in schema order
    pub fn columns(&self) -> impl Iterator<Item = (&str, ColumnSlot)> + '_ {
        self.names.iter().map(String::as_str).zip(self.slots.iter().copied())
    }

    /// Columns that will always be zero-filled
    pub fn absent_columns(&self) -> Vec<&str> {
        self.columns()
            .filter(|(_, slot)| *slot == ColumnSlot::Absent)
            .map(|(name, _)| name)
            .collect()
    }

    /// Known features the classifier was not trained on (their values are dropped)
    pub fn unused_features(&self) -> Vec<KnownFeature> {
        KnownFeature::ALL
            .into_iter()
            .filter(|f| !self.slots.contains(&ColumnSlot::Known(*f)))
            .collect()
    }
}

/// One inference row, positionally matching a [`ColumnSchema`].
///
/// Only the aligner builds these, so `values.len()` always equals the
/// length of the schema it was aligned against.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow {
    values: Vec<f64>,
}

impl AlignedRow {
    pub(crate) fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn names(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_known_names_round_trip() {
        for f in KnownFeature::ALL {
            assert_eq!(KnownFeature::from_column(f.column_name()), Some(f));
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(KnownFeature::from_column("cgpa"), None);
        assert_eq!(KnownFeature::from_column("Burnout Index"), None);
    }

    #[test]
    fn test_resolve_marks_known_and_absent() {
        let schema = ColumnSchema::resolve(names(&["Age", "City_Pune", "Total_Stress"])).unwrap();
        let slots: Vec<ColumnSlot> = schema.columns().map(|(_, s)| s).collect();
        assert_eq!(
            slots,
            vec![
                ColumnSlot::Known(KnownFeature::Age),
                ColumnSlot::Absent,
                ColumnSlot::Known(KnownFeature::TotalStress),
            ]
        );
        assert_eq!(schema.absent_columns(), vec!["City_Pune"]);
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn test_unused_features() {
        let schema = ColumnSchema::resolve(names(&["Age", "CGPA"])).unwrap();
        let unused = schema.unused_features();
        assert_eq!(unused.len(), 6);
        assert!(!unused.contains(&KnownFeature::Age));
        assert!(unused.contains(&KnownFeature::BurnoutIndex));
    }

    #[test]
    fn test_rejects_empty_list() {
        assert_eq!(ColumnSchema::resolve(Vec::new()), Err(SchemaError::Empty));
    }

    #[test]
    fn test_rejects_empty_name() {
        assert_eq!(
            ColumnSchema::resolve(names(&["Age", ""])),
            Err(SchemaError::EmptyName { index: 1 })
        );
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = ColumnSchema::resolve(names(&["Age", "CGPA", "Age"])).unwrap_err();
        assert_eq!(
            err,
            SchemaError::Duplicate { name: "Age".into(), first: 0, second: 2 }
        );
    }
}
