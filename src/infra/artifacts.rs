// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Reads the two files the offline training process leaves
// behind:
//
//   depression_model.json  ← the fitted classifier
//   model_columns.json     ← the ordered column list it was
//                            fitted on
//
// Both are required. A missing file is the one failure the
// screener expects to meet in practice (someone forgot to
// export the artifacts), so it gets its own error variant and a
// message that says what to do about it.
//
// Reference: Rust Book §9 (Error Handling)

use std::{fs, io, path::{Path, PathBuf}};
use thiserror::Error;

use crate::domain::schema::{ColumnSchema, SchemaError};
use crate::ml::model::{ModelArtifact, ModelError};

pub const DEFAULT_MODEL_PATH:   &str = "depression_model.json";
pub const DEFAULT_COLUMNS_PATH: &str = "model_columns.json";

/// Everything that can go wrong before the form is shown
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("🚨 {what} not found at '{}'. Export the trained model and its column list before starting the screener.", path.display())]
    Missing { what: &'static str, path: PathBuf },

    #[error("cannot read {what} at '{}': {source}", path.display())]
    Unreadable {
        what:   &'static str,
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{what} at '{}' is not valid JSON for this format: {source}", path.display())]
    Malformed {
        what:   &'static str,
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("column list at '{}' is invalid: {source}", path.display())]
    InvalidSchema {
        path:   PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("classifier at '{}' does not match the column list: {source}", path.display())]
    SchemaMismatch {
        path:   PathBuf,
        #[source]
        source: ModelError,
    },
}

/// Knows where the two artifacts live and how to decode them.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    model_path:   PathBuf,
    columns_path: PathBuf,
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_PATH, DEFAULT_COLUMNS_PATH)
    }
}

impl ArtifactStore {
    pub fn new(model_path: impl Into<PathBuf>, columns_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path:   model_path.into(),
            columns_path: columns_path.into(),
        }
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn columns_path(&self) -> &Path {
        &self.columns_path
    }

    /// Read and decode the classifier. Not yet checked against a schema.
    pub fn load_model(&self) -> Result<ModelArtifact, ArtifactError> {
        const WHAT: &str = "trained model";
        let json = read_artifact(WHAT, &self.model_path)?;
        let artifact: ModelArtifact = serde_json::from_str(&json)
            .map_err(|source| ArtifactError::Malformed {
                what: WHAT,
                path: self.model_path.clone(),
                source,
            })?;

        tracing::info!(
            "Loaded {} classifier from '{}'",
            artifact.kind(),
            self.model_path.display()
        );
        Ok(artifact)
    }

    /// Read the column list and resolve it into a schema.
    pub fn load_columns(&self) -> Result<ColumnSchema, ArtifactError> {
        const WHAT: &str = "column list";
        let json = read_artifact(WHAT, &self.columns_path)?;
        let names: Vec<String> = serde_json::from_str(&json)
            .map_err(|source| ArtifactError::Malformed {
                what: WHAT,
                path: self.columns_path.clone(),
                source,
            })?;

        let schema = ColumnSchema::resolve(names)
            .map_err(|source| ArtifactError::InvalidSchema {
                path: self.columns_path.clone(),
                source,
            })?;

        tracing::info!(
            "Loaded {} columns from '{}'",
            schema.len(),
            self.columns_path.display()
        );
        Ok(schema)
    }
}

/// Read a whole artifact file, telling "absent" apart from other I/O failures
fn read_artifact(what: &'static str, path: &Path) -> Result<String, ArtifactError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ArtifactError::Missing { what, path: path.to_path_buf() }
        } else {
            ArtifactError::Unreadable { what, path: path.to_path_buf(), source }
        }
    })
}
