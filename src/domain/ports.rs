//! Ports implemented by infrastructure.

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::semantic::SemanticModel;

/// Semantic snapshot source port (implemented by infrastructure).
///
/// Loading is the extractor's IO suspension point; everything after the
/// snapshot is in memory. Failures surface to callers as `WorkspaceLoad`.
#[async_trait]
pub trait WorkspaceSource: Send + Sync {
    /// Solution/snapshot path identifying the build unit; workspaces are
    /// cached under this key.
    fn cache_key(&self) -> PathBuf;

    async fn load(&self) -> Result<SemanticModel>;
}
