//! Mock implementations for integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use context_slice::app::dto::SliceOptions;
use context_slice::app::engine::SliceEngine;
use context_slice::domain::ports::WorkspaceSource;
use context_slice::domain::semantic::SemanticModel;

/// Workspace source serving a prebuilt in-memory model.
pub struct InMemorySource {
    model: SemanticModel,
    key: PathBuf,
}

impl InMemorySource {
    pub fn new(model: SemanticModel) -> Self {
        Self {
            model,
            key: PathBuf::from("mem/App.sln"),
        }
    }
}

#[async_trait]
impl WorkspaceSource for InMemorySource {
    fn cache_key(&self) -> PathBuf {
        self.key.clone()
    }

    async fn load(&self) -> anyhow::Result<SemanticModel> {
        Ok(self.model.clone())
    }
}

/// Workspace source that always fails to load.
pub struct FailingSource;

#[async_trait]
impl WorkspaceSource for FailingSource {
    fn cache_key(&self) -> PathBuf {
        PathBuf::from("mem/Broken.sln")
    }

    async fn load(&self) -> anyhow::Result<SemanticModel> {
        Err(anyhow!("solution has no loadable projects"))
    }
}

/// Engine over an in-memory model with default options.
pub fn engine(model: SemanticModel) -> SliceEngine {
    engine_with(model, SliceOptions::default())
}

pub fn engine_with(model: SemanticModel, options: SliceOptions) -> SliceEngine {
    SliceEngine::new(Arc::new(InMemorySource::new(model)), options)
}
