// ============================================================
// Layer 2 — Assessment Context
// ============================================================
// Built once before anything is shown to the user and passed
// explicitly to whatever needs it. Holds:
//
//   - the resolved column schema
//   - the classifier, already checked against that schema
//
// If either artifact is missing or they disagree with each
// other, construction fails and the session never starts.

use crate::domain::schema::ColumnSchema;
use crate::domain::traits::RiskClassifier;
use crate::infra::artifacts::{ArtifactError, ArtifactStore};
use crate::ml::inferencer::Inferencer;

pub struct AssessmentContext {
    schema:     ColumnSchema,
    classifier: Box<dyn RiskClassifier>,
}

impl AssessmentContext {
    /// Load, decode and cross-check both artifacts.
    pub fn load(store: &ArtifactStore) -> Result<Self, ArtifactError> {
        let artifact = store.load_model()?;
        let schema   = store.load_columns()?;

        let inferencer = Inferencer::new(artifact, &schema)
            .map_err(|source| ArtifactError::SchemaMismatch {
                path: store.model_path().to_path_buf(),
                source,
            })?;

        let unused = schema.unused_features();
        if !unused.is_empty() {
            let names: Vec<&str> = unused.iter().map(|f| f.column_name()).collect();
            tracing::warn!(
                "Classifier was not trained on {:?}; those inputs do not affect the prediction",
                names
            );
        }
        tracing::debug!("Zero-filled columns: {:?}", schema.absent_columns());

        Ok(Self::new(schema, Box::new(inferencer)))
    }

    pub fn new(schema: ColumnSchema, classifier: Box<dyn RiskClassifier>) -> Self {
        Self { schema, classifier }
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn classifier(&self) -> &dyn RiskClassifier {
        self.classifier.as_ref()
    }
}
