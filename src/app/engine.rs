//! SliceEngine - the facade orchestrating workspace loading, crawling,
//! aggregation and emission.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::adapters::cache::WorkspaceCache;
use crate::app::dto::{ExplainMode, FileSlice, SliceOptions};
use crate::domain::aggregate;
use crate::domain::crawler::{CrawlConfig, Crawler};
use crate::domain::emit::Emitter;
use crate::domain::error::{ExtractError, Result};
use crate::domain::keep_set::{KeepSet, NamespaceFilter};
use crate::domain::ports::WorkspaceSource;
use crate::domain::workspace::Workspace;

pub struct SliceEngine {
    cache: WorkspaceCache,
    filter: NamespaceFilter,
}

impl SliceEngine {
    pub fn new(source: Arc<dyn WorkspaceSource>, options: SliceOptions) -> Self {
        Self {
            cache: WorkspaceCache::new(source),
            filter: NamespaceFilter::new(options.excluded_namespace_prefixes),
        }
    }

    /// Full walk ignoring minimisation: every declaration reachable within
    /// `depth` cross-type hops, types emitted whole.
    pub async fn find_all_definitions(
        &self,
        root_file: &str,
        depth: i32,
        cancel: &CancellationToken,
    ) -> Result<Vec<FileSlice>> {
        let depth = validate_depth(depth)?;
        let workspace = self.workspace(cancel).await?;
        let document = locate(&workspace, root_file)?.clone();

        let crawler = Crawler::new(&workspace, &self.filter, cancel);
        let keep = crawler.crawl_full(&document, depth)?;
        Ok(Emitter::new(&workspace, ExplainMode::None).emit(&keep))
    }

    /// Minimal slice: the smallest member subset explaining every non-local
    /// symbol the root document references, up to `depth`.
    pub async fn find_minimal_definitions(
        &self,
        root_file: &str,
        depth: i32,
        explain_mode: ExplainMode,
        exclude_root_definitions: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<FileSlice>> {
        let depth = validate_depth(depth)?;
        let workspace = self.workspace(cancel).await?;
        let document = locate(&workspace, root_file)?.clone();

        let crawler = Crawler::new(&workspace, &self.filter, cancel);
        let keep = crawler.crawl(
            &document,
            &CrawlConfig {
                depth,
                exclude_root_definitions,
            },
        )?;
        Ok(Emitter::new(&workspace, explain_mode).emit(&keep))
    }

    /// Minimal slices of several entry documents merged into one result.
    /// `exclude_root_definitions` applies independently per document: a
    /// document's own declarations are suppressed in its crawl yet still
    /// appear when another entry document references them.
    pub async fn find_aggregated_minimal_definitions(
        &self,
        root_files: &[String],
        depth: i32,
        explain_mode: ExplainMode,
        exclude_root_definitions: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<FileSlice>> {
        if root_files.is_empty() {
            return Err(ExtractError::InvalidArgument(
                "aggregation requires at least one root file".into(),
            ));
        }
        let depth = validate_depth(depth)?;
        let workspace = self.workspace(cancel).await?;

        let mut parts: Vec<KeepSet> = Vec::with_capacity(root_files.len());
        for root_file in root_files {
            let document = locate(&workspace, root_file)?.clone();
            let crawler = Crawler::new(&workspace, &self.filter, cancel);
            parts.push(crawler.crawl(
                &document,
                &CrawlConfig {
                    depth,
                    exclude_root_definitions,
                },
            )?);
        }

        let merged = aggregate::merge(parts);
        Ok(Emitter::new(&workspace, explain_mode).emit(&merged))
    }

    /// Release the cached workspace for this engine's build unit.
    pub fn release_workspace(&self) -> bool {
        self.cache.close(&self.cache.source_key())
    }

    async fn workspace(&self, cancel: &CancellationToken) -> Result<Arc<Workspace>> {
        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }
        let workspace = self.cache.open().await?;
        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }
        Ok(workspace)
    }
}

fn validate_depth(depth: i32) -> Result<u32> {
    u32::try_from(depth)
        .map_err(|_| ExtractError::InvalidArgument(format!("depth must be non-negative, got {depth}")))
}

fn locate<'w>(
    workspace: &'w Workspace,
    root_file: &str,
) -> Result<&'w crate::domain::semantic::DocumentModel> {
    workspace
        .locate_document(root_file)
        .ok_or_else(|| ExtractError::NotFound(format!("root file not in workspace: {root_file}")))
}
