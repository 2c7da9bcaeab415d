// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `ui`, `assess` and `schema`,
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for bad values
//   - type conversion (string → f64, PathBuf)
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::domain::profile::{InputField, StudentProfile};
use crate::infra::artifacts::{ArtifactStore, DEFAULT_COLUMNS_PATH, DEFAULT_MODEL_PATH};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive screening form
    Ui(UiArgs),

    /// Score a single profile given as flags and print the result
    Assess(AssessArgs),

    /// Validate both artifacts and list the columns the classifier expects
    Schema(SchemaArgs),
}

/// Where the two artifacts live. Shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ArtifactArgs {
    /// Trained classifier (JSON)
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Ordered column list the classifier was fitted on (JSON array)
    #[arg(long, default_value = DEFAULT_COLUMNS_PATH)]
    pub columns: PathBuf,
}

/// Layer 1 → Layer 6 boundary: infra never sees clap types
impl From<&ArtifactArgs> for ArtifactStore {
    fn from(a: &ArtifactArgs) -> Self {
        ArtifactStore::new(a.model.clone(), a.columns.clone())
    }
}

#[derive(Args, Debug)]
pub struct UiArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,
}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,
}

/// All arguments for the `assess` command.
/// Defaults are the form's starting values; out-of-range values
/// are clamped, not rejected.
#[derive(Args, Debug)]
pub struct AssessArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Academic pressure, 1-5
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    pub academic_pressure: f64,

    /// Work/study hours per day, 0-16
    #[arg(long, default_value_t = 6.0, allow_negative_numbers = true)]
    pub study_hours: f64,

    /// Financial stress, 1-5
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    pub financial_stress: f64,

    /// Study satisfaction, 1-5
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    pub study_satisfaction: f64,

    /// Cumulative GPA, 0.00-10.00
    #[arg(long, default_value_t = 3.5, allow_negative_numbers = true)]
    pub cgpa: f64,

    /// Age in years, 18-35
    #[arg(long, default_value_t = 21.0, allow_negative_numbers = true)]
    pub age: f64,
}

impl AssessArgs {
    fn raw(&self) -> [(InputField, f64); 6] {
        [
            (InputField::AcademicPressure,  self.academic_pressure),
            (InputField::StudyHours,        self.study_hours),
            (InputField::FinancialStress,   self.financial_stress),
            (InputField::StudySatisfaction, self.study_satisfaction),
            (InputField::Cgpa,              self.cgpa),
            (InputField::Age,               self.age),
        ]
    }
}

/// Convert the flags into a profile, clamping each value into range
impl From<&AssessArgs> for StudentProfile {
    fn from(a: &AssessArgs) -> Self {
        let mut profile = StudentProfile::default();
        for (field, raw) in a.raw() {
            let stored = profile.set(field, raw);
            if field.spec().is_out_of_range(raw) {
                tracing::warn!("{} = {} is out of range, using {}", field.label(), raw, stored);
            }
        }
        profile
    }
}
