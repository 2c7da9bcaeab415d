// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Wraps a validated classifier artifact behind RiskClassifier.
//
// The logistic head runs through Burn on the CPU ndarray
// backend in f64: the weight vector is uploaded once as a
// [n, 1] tensor, and each call does one [1, n] x [n, 1] matmul
// plus the intercept. The logistic function is applied to that
// f64 logit, so the label follows the sign of the logit exactly.
// The forest is walked directly in f64.
use anyhow::{anyhow, Result};
use burn::backend::ndarray::NdArrayDevice;
use burn::backend::NdArray;
use burn::tensor::{Tensor, TensorData};

use crate::domain::schema::{AlignedRow, ColumnSchema};
use crate::domain::traits::RiskClassifier;
use crate::ml::model::{Classifier, ForestModel, ModelArtifact, ModelError, StandardScaler};

type InferBackend = NdArray<f64>;

enum Engine {
    Logistic {
        weights:   Tensor<InferBackend, 2>,
        intercept: f64,
        scaler:    Option<StandardScaler>,
    },
    Forest(ForestModel),
}

pub struct Inferencer {
    engine:     Engine,
    n_features: usize,
    device:     NdArrayDevice,
}

impl Inferencer {
    /// Check the artifact against the schema, then prepare it for scoring.
    pub fn new(artifact: ModelArtifact, schema: &ColumnSchema) -> Result<Self, ModelError> {
        artifact.check_against(schema)?;

        let device     = NdArrayDevice::default();
        let n_features = schema.len();
        let engine = match artifact.classifier {
            Classifier::Logistic(model) => {
                let weights = Tensor::<InferBackend, 2>::from_data(
                    TensorData::new(model.coefficients, [n_features, 1]),
                    &device,
                );
                Engine::Logistic {
                    weights,
                    intercept: model.intercept,
                    scaler:    model.scaler,
                }
            }
            Classifier::Forest(model) => Engine::Forest(model),
        };

        tracing::debug!("Inferencer ready over {} columns", n_features);
        Ok(Self { engine, n_features, device })
    }

    fn logistic_p1(
        &self,
        weights:   &Tensor<InferBackend, 2>,
        intercept: f64,
        scaler:    Option<&StandardScaler>,
        row:       &[f64],
    ) -> Result<f64> {
        let inputs: Vec<f64> = match scaler {
            Some(s) => s.transform(row),
            None    => row.to_vec(),
        };

        let x = Tensor::<InferBackend, 2>::from_data(
            TensorData::new(inputs, [1, self.n_features]),
            &self.device,
        );
        let logits: Vec<f64> = x
            .matmul(weights.clone())
            .add_scalar(intercept)
            .into_data()
            .to_vec::<f64>()
            .map_err(|e| anyhow!("Reading classifier output: {e:?}"))?;

        let logit = logits
            .first()
            .copied()
            .ok_or_else(|| anyhow!("Classifier produced no output"))?;
        Ok(sigmoid(logit))
    }
}

/// 1 / (1 + e^-z), written so neither branch overflows
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl RiskClassifier for Inferencer {
    fn kind(&self) -> &'static str {
        match self.engine {
            Engine::Logistic { .. } => "logistic",
            Engine::Forest(_)       => "forest",
        }
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, row: &AlignedRow) -> Result<[f64; 2]> {
        if row.len() != self.n_features {
            return Err(anyhow!(
                "Row has {} values but the classifier expects {}",
                row.len(),
                self.n_features
            ));
        }

        let proba = match &self.engine {
            Engine::Logistic { weights, intercept, scaler } => {
                let p1 = self.logistic_p1(weights, *intercept, scaler.as_ref(), row.values())?;
                [1.0 - p1, p1]
            }
            Engine::Forest(forest) => forest.predict_proba(row.values()),
        };

        tracing::debug!("predict_proba = [{:.4}, {:.4}]", proba[0], proba[1]);
        Ok(proba)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prediction::RiskLabel;
    use crate::ml::model::{DecisionTree, LogisticModel, TreeNode};

    fn schema(n: usize) -> ColumnSchema {
        ColumnSchema::resolve((0..n).map(|i| format!("col_{i}")).collect()).unwrap()
    }

    fn logistic(coefficients: Vec<f64>, intercept: f64, scaler: Option<StandardScaler>) -> ModelArtifact {
        ModelArtifact {
            feature_names: None,
            classifier: Classifier::Logistic(LogisticModel { coefficients, intercept, scaler }),
        }
    }

    fn sigmoid64(z: f64) -> f64 {
        1.0 / (1.0 + (-z).exp())
    }

    #[test]
    fn test_logistic_matches_closed_form() {
        let s   = schema(3);
        let inf = Inferencer::new(logistic(vec![0.4, -0.2, 0.05], -0.3, None), &s).unwrap();
        let row = AlignedRow::from_values(vec![3.0, 6.0, 21.0]);

        let [p0, p1] = inf.predict_proba(&row).unwrap();
        let expected = sigmoid64(0.4 * 3.0 - 0.2 * 6.0 + 0.05 * 21.0 - 0.3);
        assert!((p1 - expected).abs() < 1e-12, "{p1} vs {expected}");
        assert!((p0 + p1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_logistic_applies_scaler() {
        let s      = schema(2);
        let scaler = StandardScaler { mean: vec![3.0, 10.0], scale: vec![2.0, 0.0] };
        let inf    = Inferencer::new(logistic(vec![1.0, 0.5], 0.0, Some(scaler)), &s).unwrap();
        let row    = AlignedRow::from_values(vec![5.0, 12.0]);

        // x' = [(5-3)/2, (12-10)/1] = [1, 2] → z = 1 + 1 = 2
        let [_, p1] = inf.predict_proba(&row).unwrap();
        assert!((p1 - sigmoid64(2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_logistic_labels() {
        let s   = schema(1);
        let inf = Inferencer::new(logistic(vec![2.0], -5.0, None), &s).unwrap();

        let high = inf.classify(&AlignedRow::from_values(vec![5.0])).unwrap();
        assert_eq!(high.label, RiskLabel::High);
        assert!(high.probability > 0.5);

        let low = inf.classify(&AlignedRow::from_values(vec![0.0])).unwrap();
        assert_eq!(low.label, RiskLabel::Low);
        assert!(low.probability < 0.5);
    }

    #[test]
    fn test_tiny_positive_logit_is_high_risk() {
        // logit = 1.0 * 1.0 + (-1.0 + 1e-9) = +1e-9
        let inf  = Inferencer::new(logistic(vec![1.0], -1.0 + 1e-9, None), &schema(1)).unwrap();
        let pred = inf.classify(&AlignedRow::from_values(vec![1.0])).unwrap();
        assert_eq!(pred.label, RiskLabel::High);
        assert!(pred.probability > 0.5);
    }

    #[test]
    fn test_tiny_negative_logit_is_low_risk() {
        let inf  = Inferencer::new(logistic(vec![1.0], -1.0 - 1e-9, None), &schema(1)).unwrap();
        let pred = inf.classify(&AlignedRow::from_values(vec![1.0])).unwrap();
        assert_eq!(pred.label, RiskLabel::Low);
        assert!(pred.probability < 0.5);
    }

    #[test]
    fn test_extreme_logits_stay_finite() {
        let inf = Inferencer::new(logistic(vec![1.0], 0.0, None), &schema(1)).unwrap();
        let [p0, p1] = inf.predict_proba(&AlignedRow::from_values(vec![-800.0])).unwrap();
        assert_eq!((p0, p1), (1.0, 0.0));
        let [p0, p1] = inf.predict_proba(&AlignedRow::from_values(vec![800.0])).unwrap();
        assert_eq!((p0, p1), (0.0, 1.0));
    }

    #[test]
    fn test_forest_probabilities_and_tie() {
        let s    = schema(1);
        let tree = DecisionTree {
            nodes: vec![
                TreeNode::Split { feature: 0, threshold: 0.5, left: 1, right: 2 },
                TreeNode::Leaf { value: [5.0, 5.0] },
                TreeNode::Leaf { value: [1.0, 9.0] },
            ],
        };
        let artifact = ModelArtifact {
            feature_names: None,
            classifier:    Classifier::Forest(ForestModel { trees: vec![tree] }),
        };
        let inf = Inferencer::new(artifact, &s).unwrap();
        assert_eq!(inf.kind(), "forest");

        let tie = inf.classify(&AlignedRow::from_values(vec![0.0])).unwrap();
        assert_eq!(tie.label, RiskLabel::Low);
        assert_eq!(tie.probability, 0.5);

        let high = inf.classify(&AlignedRow::from_values(vec![1.0])).unwrap();
        assert_eq!(high.label, RiskLabel::High);
        assert!((high.probability - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_mismatched_artifact() {
        let err = Inferencer::new(logistic(vec![1.0; 2], 0.0, None), &schema(5)).err();
        assert_eq!(err, Some(ModelError::CoefficientCount { expected: 5, found: 2 }));
    }

    #[test]
    fn test_wrong_row_length_is_an_error() {
        let inf = Inferencer::new(logistic(vec![1.0; 2], 0.0, None), &schema(2)).unwrap();
        assert!(inf.predict_proba(&AlignedRow::from_values(vec![1.0])).is_err());
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let inf = Inferencer::new(logistic(vec![0.3, 0.7], 0.1, None), &schema(2)).unwrap();
        let row = AlignedRow::from_values(vec![4.5, 9.0]);
        let a   = inf.predict_proba(&row).unwrap();
        let b   = inf.predict_proba(&row).unwrap();
        assert_eq!(a[1].to_bits(), b[1].to_bits());
    }
}
