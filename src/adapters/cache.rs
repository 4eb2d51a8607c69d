//! Workspace cache - explicit, scoped sharing of loaded workspaces.
//!
//! One extractor invocation owns its workspace exclusively; across
//! invocations the cache hands out read-only `Arc<Workspace>` handles keyed
//! by the source's solution path. `close` releases an entry; the workspace
//! itself is freed when the last handle drops.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::domain::error::{ExtractError, Result};
use crate::domain::ports::WorkspaceSource;
use crate::domain::workspace::Workspace;

pub struct WorkspaceCache {
    source: Arc<dyn WorkspaceSource>,
    entries: RwLock<HashMap<PathBuf, Arc<Workspace>>>,
}

impl WorkspaceCache {
    pub fn new(source: Arc<dyn WorkspaceSource>) -> Self {
        Self {
            source,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Hand out the cached workspace for the source's build unit, loading it
    /// on first use. Load failures surface as `WorkspaceLoad`.
    pub async fn open(&self) -> Result<Arc<Workspace>> {
        let key = self.source.cache_key();
        if let Some(workspace) = self.entries.read().unwrap().get(&key) {
            return Ok(workspace.clone());
        }

        let model = self
            .source
            .load()
            .await
            .map_err(|e| ExtractError::WorkspaceLoad(format!("{e:#}")))?;
        let workspace = Arc::new(Workspace::build(model));

        let mut entries = self.entries.write().unwrap();
        // A concurrent open may have raced us; keep the first entry.
        let entry = entries.entry(key).or_insert_with(|| workspace.clone());
        Ok(entry.clone())
    }

    /// Release a cached workspace. Existing handles stay valid.
    pub fn close(&self, key: &Path) -> bool {
        self.entries.write().unwrap().remove(key).is_some()
    }

    /// The source's solution path, i.e. the key its workspace is cached under.
    pub fn source_key(&self) -> PathBuf {
        self.source.cache_key()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}
