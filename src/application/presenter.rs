// ============================================================
// Layer 2 — Result Presenter
// ============================================================
// Formatting shared by the terminal form and the one-shot
// `assess` command, so both say exactly the same thing:
//
//   metrics      → two decimals            ("4.50")
//   probability  → percent, two decimals   ("73.21%")
//   verdict      → one of two states, picked by the label;
//                  the probability shown is always P(high risk)
//
// The one-shot reports return their lines so the CLI only prints.

use crate::application::assess_use_case::Assessment;
use crate::domain::prediction::{Prediction, RiskLabel};
use crate::domain::schema::{ColumnSchema, ColumnSlot};
use crate::domain::traits::RiskClassifier;

pub const TITLE: &str = "🧠 Student Mental Health Screening Tool";

pub fn format_metric(value: f64) -> String {
    format!("{value:.2}")
}

pub fn format_probability(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

/// The two mutually exclusive result states
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    HighRisk { probability: f64 },
    LowRisk { probability: f64 },
}

impl From<Prediction> for Verdict {
    fn from(p: Prediction) -> Self {
        match p.label {
            RiskLabel::High => Verdict::HighRisk { probability: p.probability },
            RiskLabel::Low  => Verdict::LowRisk { probability: p.probability },
        }
    }
}

impl Verdict {
    pub fn is_high_risk(&self) -> bool {
        matches!(self, Verdict::HighRisk { .. })
    }

    pub fn message(&self) -> String {
        match *self {
            Verdict::HighRisk { probability } => format!(
                "⚠️ High Risk Detected (Probability: {})",
                format_probability(probability)
            ),
            Verdict::LowRisk { probability } => format!(
                "✅ Low Risk (Probability: {})",
                format_probability(probability)
            ),
        }
    }
}

/// Text slider: `width` cells, the knob placed at `ratio` (0..=1)
pub fn slider_bar(ratio: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let knob = (ratio.clamp(0.0, 1.0) * (width - 1) as f64).round() as usize;
    (0..width)
        .map(|i| match i.cmp(&knob) {
            std::cmp::Ordering::Less    => '━',
            std::cmp::Ordering::Equal   => '●',
            std::cmp::Ordering::Greater => '─',
        })
        .collect()
}

/// Output of the `assess` command: title, both metrics, the verdict
pub fn assessment_report(assessment: &Assessment) -> Vec<String> {
    vec![
        TITLE.to_string(),
        String::new(),
        format!("Burnout Index: {}", format_metric(assessment.features.burnout_index)),
        format!("Total Stress:  {}", format_metric(assessment.features.total_stress)),
        String::new(),
        Verdict::from(assessment.prediction).message(),
    ]
}

/// Output of the `schema` command: one line per column, marked
/// collected or zero-filled, then any inputs the classifier ignores
pub fn schema_report(schema: &ColumnSchema, classifier: &dyn RiskClassifier) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Classifier: {} over {} columns",
            classifier.kind(),
            classifier.n_features()
        ),
        String::new(),
    ];

    for (i, (name, slot)) in schema.columns().enumerate() {
        let source = match slot {
            ColumnSlot::Known(_) => "collected",
            ColumnSlot::Absent   => "zero-filled",
        };
        lines.push(format!("{i:>4}  {name:<40} {source}"));
    }

    let unused = schema.unused_features();
    if !unused.is_empty() {
        lines.push(String::new());
        lines.push("Not used by this classifier:".to_string());
        for feature in unused {
            lines.push(format!("      {}", feature.column_name()));
        }
    }
    lines
}
