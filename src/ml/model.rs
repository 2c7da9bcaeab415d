// ============================================================
// Layer 5 — Classifier Artifact Format
// ============================================================
// The offline training process exports the fitted classifier
// as JSON. Two model families are supported, selected by the
// "kind" tag:
//
//   {"kind": "logistic",
//    "coefficients": [...], "intercept": -1.2,
//    "scaler": {"mean": [...], "scale": [...]}}      ← optional
//
//   {"kind": "forest",
//    "trees": [{"nodes": [
//        {"feature": 6, "threshold": 3.5, "left": 1, "right": 2},
//        {"value": [0.8, 0.2]},
//        {"value": [0.3, 0.7]}]}]}
//
// Either may also carry "feature_names", the column list the
// model was fitted on. When present it must match the column
// schema exactly.
//
// Nothing here is trusted until `check_against` has compared it
// with the column schema. After that, evaluation cannot index
// out of bounds or loop.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::schema::ColumnSchema;

/// Why a classifier artifact does not fit the column schema
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("classifier has {found} coefficients but the column schema has {expected} columns")]
    CoefficientCount { expected: usize, found: usize },

    #[error("scaler {part} has {found} entries but the column schema has {expected} columns")]
    ScalerLength { part: &'static str, expected: usize, found: usize },

    #[error("classifier parameter '{what}' is not a finite number")]
    NonFinite { what: String },

    #[error("classifier was fitted on columns {declared:?}, which differ from the column schema")]
    FeatureNames { declared: Vec<String> },

    #[error("forest has no trees")]
    EmptyForest,

    #[error("tree {tree} has no nodes")]
    EmptyTree { tree: usize },

    #[error("tree {tree} node {node} splits on feature {feature}, but the column schema has {n_features} columns")]
    FeatureOutOfRange { tree: usize, node: usize, feature: usize, n_features: usize },

    #[error("tree {tree} node {node} points to child {child}, which is not a later node of the tree")]
    BadChild { tree: usize, node: usize, child: usize },

    #[error("tree {tree} leaf {node} must hold two non-negative class weights with a positive sum")]
    BadLeaf { tree: usize, node: usize },
}

/// Top-level artifact: the classifier plus optional provenance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelArtifact {
    /// Columns the model was fitted on, if the exporter recorded them
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,

    #[serde(flatten)]
    pub classifier: Classifier,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    Logistic(LogisticModel),
    Forest(ForestModel),
}

/// Binary logistic regression: p1 = sigmoid(w · x' + b)
/// where x' is x standardized by the optional scaler.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept:    f64,
    #[serde(default)]
    pub scaler:       Option<StandardScaler>,
}

/// Per-column standardization: (x - mean) / scale
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StandardScaler {
    pub mean:  Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Standardize one row. A zero scale means the column was constant
    /// during fitting; it is left unscaled (divided by 1).
    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect()
    }
}

/// Bag of decision trees; probabilities are averaged across trees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForestModel {
    pub trees: Vec<DecisionTree>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

/// A node is a split or a leaf; the JSON shape tells them apart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go left when `row[feature] <= threshold`
    Split { feature: usize, threshold: f64, left: usize, right: usize },
    /// Class weights `[w0, w1]` (counts or fractions)
    Leaf { value: [f64; 2] },
}

impl ModelArtifact {
    /// Family name used in logs
    pub fn kind(&self) -> &'static str {
        match self.classifier {
            Classifier::Logistic(_) => "logistic",
            Classifier::Forest(_)   => "forest",
        }
    }

    /// Verify this artifact can score rows aligned to `schema`.
    pub fn check_against(&self, schema: &ColumnSchema) -> Result<(), ModelError> {
        if let Some(declared) = &self.feature_names {
            if declared.as_slice() != schema.names() {
                return Err(ModelError::FeatureNames { declared: declared.clone() });
            }
        }

        match &self.classifier {
            Classifier::Logistic(model) => model.check(schema.len()),
            Classifier::Forest(model)   => model.check(schema.len()),
        }
    }
}

impl LogisticModel {
    fn check(&self, n_features: usize) -> Result<(), ModelError> {
        if self.coefficients.len() != n_features {
            return Err(ModelError::CoefficientCount {
                expected: n_features,
                found:    self.coefficients.len(),
            });
        }
        if let Some(i) = self.coefficients.iter().position(|w| !w.is_finite()) {
            return Err(ModelError::NonFinite { what: format!("coefficients[{i}]") });
        }
        if !self.intercept.is_finite() {
            return Err(ModelError::NonFinite { what: "intercept".into() });
        }

        if let Some(scaler) = &self.scaler {
            for (part, values) in [("mean", &scaler.mean), ("scale", &scaler.scale)] {
                if values.len() != n_features {
                    return Err(ModelError::ScalerLength {
                        part,
                        expected: n_features,
                        found:    values.len(),
                    });
                }
                if let Some(i) = values.iter().position(|v| !v.is_finite()) {
                    return Err(ModelError::NonFinite { what: format!("scaler.{part}[{i}]") });
                }
            }
        }
        Ok(())
    }
}

impl ForestModel {
    fn check(&self, n_features: usize) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::EmptyForest);
        }
        for (t, tree) in self.trees.iter().enumerate() {
            tree.check(t, n_features)?;
        }
        Ok(())
    }

    /// Mean of the per-tree leaf distributions
    pub fn predict_proba(&self, row: &[f64]) -> [f64; 2] {
        let mut sum = [0.0f64; 2];
        for tree in &self.trees {
            let [p0, p1] = tree.leaf_distribution(row);
            sum[0] += p0;
            sum[1] += p1;
        }
        let n = self.trees.len() as f64;
        [sum[0] / n, sum[1] / n]
    }
}

impl DecisionTree {
    // Children must come strictly after their parent (the order tree
    // exporters write nodes in), so every walk from the root terminates.
    fn check(&self, tree: usize, n_features: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::EmptyTree { tree });
        }
        for (node, n) in self.nodes.iter().enumerate() {
            match *n {
                TreeNode::Split { feature, threshold, left, right } => {
                    if feature >= n_features {
                        return Err(ModelError::FeatureOutOfRange { tree, node, feature, n_features });
                    }
                    if threshold.is_nan() {
                        return Err(ModelError::NonFinite {
                            what: format!("trees[{tree}].nodes[{node}].threshold"),
                        });
                    }
                    for child in [left, right] {
                        if child <= node || child >= self.nodes.len() {
                            return Err(ModelError::BadChild { tree, node, child });
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    let valid = value.iter().all(|w| w.is_finite() && *w >= 0.0)
                        && value[0] + value[1] > 0.0;
                    if !valid {
                        return Err(ModelError::BadLeaf { tree, node });
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf and return its normalized weights
    fn leaf_distribution(&self, row: &[f64]) -> [f64; 2] {
        let mut i = 0;
        loop {
            match self.nodes[i] {
                TreeNode::Split { feature, threshold, left, right } => {
                    i = if row[feature] <= threshold { left } else { right };
                }
                TreeNode::Leaf { value } => {
                    let total = value[0] + value[1];
                    return [value[0] / total, value[1] / total];
                }
            }
        }
    }
}
