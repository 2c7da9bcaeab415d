// ============================================================
// Layer 3 — Student Profile (Raw Input Set)
// ============================================================
// The six numeric inputs collected from the user. Every field
// has a fixed range, a default and a step size:
//
//   Field                Min   Max   Default  Step
//   Academic Pressure      1     5        3     1
//   Work/Study Hours       0    16        6     1
//   Financial Stress       1     5        3     1
//   Study Satisfaction     1     5        3     1
//   CGPA                 0.0  10.0      3.5  0.01
//   Age                   18    35       21     1
//
// Out-of-range values are clamped to the nearest bound, the
// same way a slider stops at its end. A StudentProfile cannot
// hold an illegal value.
//
// Reference: Rust Book §5 (Structs), §6 (Enums and match)

/// Identifies one of the six input controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    AcademicPressure,
    StudyHours,
    FinancialStress,
    StudySatisfaction,
    Cgpa,
    Age,
}

impl InputField {
    /// All fields in the order they are presented in the sidebar
    pub const ALL: [InputField; 6] = [
        InputField::AcademicPressure,
        InputField::StudyHours,
        InputField::FinancialStress,
        InputField::StudySatisfaction,
        InputField::Cgpa,
        InputField::Age,
    ];

    /// Human-readable label shown next to the control
    pub fn label(self) -> &'static str {
        match self {
            InputField::AcademicPressure  => "Academic Pressure (1-5)",
            InputField::StudyHours        => "Work/Study Hours (per day)",
            InputField::FinancialStress   => "Financial Stress (1-5)",
            InputField::StudySatisfaction => "Study Satisfaction (1-5)",
            InputField::Cgpa              => "CGPA",
            InputField::Age               => "Age",
        }
    }

    /// Range, default and step for this field
    pub fn spec(self) -> FieldSpec {
        match self {
            InputField::AcademicPressure  => FieldSpec::integer(1, 5, 3),
            InputField::StudyHours        => FieldSpec::integer(0, 16, 6),
            InputField::FinancialStress   => FieldSpec::integer(1, 5, 3),
            InputField::StudySatisfaction => FieldSpec::integer(1, 5, 3),
            InputField::Cgpa              => FieldSpec::real(0.0, 10.0, 3.5, 2),
            InputField::Age               => FieldSpec::integer(18, 35, 21),
        }
    }

    /// Position of this field in [`InputField::ALL`]
    pub fn index(self) -> usize {
        match self {
            InputField::AcademicPressure  => 0,
            InputField::StudyHours        => 1,
            InputField::FinancialStress   => 2,
            InputField::StudySatisfaction => 3,
            InputField::Cgpa              => 4,
            InputField::Age               => 5,
        }
    }
}

/// Bounds and granularity of a single input control.
///
/// `decimals` is the number of fractional digits the control keeps:
/// 0 for the integer sliders, 2 for CGPA (step 0.01).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub min:      f64,
    pub max:      f64,
    pub default:  f64,
    pub decimals: u32,
}

impl FieldSpec {
    fn integer(min: i32, max: i32, default: i32) -> Self {
        Self {
            min:      min as f64,
            max:      max as f64,
            default:  default as f64,
            decimals: 0,
        }
    }

    fn real(min: f64, max: f64, default: f64, decimals: u32) -> Self {
        Self { min, max, default, decimals }
    }

    /// Size of one increment (1 for integers, 0.01 for CGPA)
    pub fn step(&self) -> f64 {
        1.0 / self.scale()
    }

    /// Snap a raw value to the field's step and clamp it into range.
    ///
    /// NaN has no nearest bound, so it falls back to the default.
    /// Infinities clamp like any other out-of-range value.
    pub fn clamp(&self, raw: f64) -> f64 {
        if raw.is_nan() {
            return self.default;
        }
        let scale   = self.scale();
        let snapped = if raw.is_finite() { (raw * scale).round() / scale } else { raw };
        snapped.clamp(self.min, self.max)
    }

    /// True if `raw` would be changed by [`FieldSpec::clamp`] because it
    /// lies outside the range (step rounding alone does not count)
    pub fn is_out_of_range(&self, raw: f64) -> bool {
        raw.is_nan() || raw < self.min || raw > self.max
    }

    /// Where `value` sits between min and max, in [0, 1]
    pub fn ratio(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    /// Render a value with the field's precision ("3", "3.50")
    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.decimals as usize, value)
    }

    fn scale(&self) -> f64 {
        10f64.powi(self.decimals as i32)
    }
}

/// A snapshot of the six input values.
///
/// Fields are private so every write goes through [`StudentProfile::set`],
/// which clamps. Integer fields are stored as `u8` (all bounds fit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentProfile {
    academic_pressure:  u8,
    study_hours:        u8,
    financial_stress:   u8,
    study_satisfaction: u8,
    cgpa:               f64,
    age:                u8,
}

impl Default for StudentProfile {
    /// The defaults every control starts from
    fn default() -> Self {
        Self {
            academic_pressure:  3,
            study_hours:        6,
            financial_stress:   3,
            study_satisfaction: 3,
            cgpa:               3.5,
            age:                21,
        }
    }
}

impl StudentProfile {
    /// Build a profile from raw values, clamping each one into range.
    pub fn new(
        academic_pressure:  f64,
        study_hours:        f64,
        financial_stress:   f64,
        study_satisfaction: f64,
        cgpa:               f64,
        age:                f64,
    ) -> Self {
        let mut profile = Self::default();
        profile.set(InputField::AcademicPressure,  academic_pressure);
        profile.set(InputField::StudyHours,        study_hours);
        profile.set(InputField::FinancialStress,   financial_stress);
        profile.set(InputField::StudySatisfaction, study_satisfaction);
        profile.set(InputField::Cgpa,              cgpa);
        profile.set(InputField::Age,               age);
        profile
    }

    pub fn academic_pressure(&self) -> u8  { self.academic_pressure }
    pub fn study_hours(&self) -> u8        { self.study_hours }
    pub fn financial_stress(&self) -> u8   { self.financial_stress }
    pub fn study_satisfaction(&self) -> u8 { self.study_satisfaction }
    pub fn cgpa(&self) -> f64              { self.cgpa }
    pub fn age(&self) -> u8                { self.age }

    /// Current value of a field as f64
    pub fn value(&self, field: InputField) -> f64 {
        match field {
            InputField::AcademicPressure  => f64::from(self.academic_pressure),
            InputField::StudyHours        => f64::from(self.study_hours),
            InputField::FinancialStress   => f64::from(self.financial_stress),
            InputField::StudySatisfaction => f64::from(self.study_satisfaction),
            InputField::Cgpa              => self.cgpa,
            InputField::Age               => f64::from(self.age),
        }
    }

    /// Write a field, clamping into range. Returns the value actually stored.
    pub fn set(&mut self, field: InputField, raw: f64) -> f64 {
        let value = field.spec().clamp(raw);
        // After clamping every integer field is within 0..=35, so the cast is exact
        match field {
            InputField::AcademicPressure  => self.academic_pressure  = value as u8,
            InputField::StudyHours        => self.study_hours        = value as u8,
            InputField::FinancialStress   => self.financial_stress   = value as u8,
            InputField::StudySatisfaction => self.study_satisfaction = value as u8,
            InputField::Cgpa              => self.cgpa               = value,
            InputField::Age               => self.age                = value as u8,
        }
        value
    }

    /// Move a field by `steps` increments (negative moves down).
    /// Stops at the bounds. Returns the value actually stored.
    pub fn nudge(&mut self, field: InputField, steps: i32) -> f64 {
        let spec = field.spec();
        self.set(field, self.value(field) + f64::from(steps) * spec.step())
    }

    /// Restore every field to its default
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
