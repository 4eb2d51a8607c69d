//! Snapshot adapter - loads a semantic snapshot exported as JSON.
//!
//! The snapshot is produced by an external indexer running against the host
//! compiler; this adapter only reads and validates it. It is the one place
//! the crate performs file IO.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::domain::ports::WorkspaceSource;
use crate::domain::semantic::SemanticModel;

/// Workspace source backed by a semantic snapshot JSON file.
pub struct JsonSnapshotSource {
    snapshot_path: PathBuf,
}

impl JsonSnapshotSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            snapshot_path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl WorkspaceSource for JsonSnapshotSource {
    fn cache_key(&self) -> PathBuf {
        self.snapshot_path.clone()
    }

    async fn load(&self) -> Result<SemanticModel> {
        let text = tokio::fs::read_to_string(&self.snapshot_path)
            .await
            .with_context(|| {
                format!(
                    "failed to read semantic snapshot: {}",
                    self.snapshot_path.display()
                )
            })?;
        let model: SemanticModel = serde_json::from_str(&text).with_context(|| {
            format!(
                "failed to parse semantic snapshot: {}",
                self.snapshot_path.display()
            )
        })?;
        tracing::info!(
            snapshot = %self.snapshot_path.display(),
            documents = model.documents.len(),
            symbols = model.symbols.len(),
            references = model.references.len(),
            "semantic snapshot loaded"
        );
        Ok(model)
    }
}
