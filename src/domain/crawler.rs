//! Reachability crawler - bounded breadth-first walk over the reference graph.
//!
//! Starting from the use sites of one root document, the crawl discovers the
//! owner types and members that explain every non-local symbol the document
//! touches, up to a cross-type hop budget. Same-type hops are free; cross-type
//! hops cost one. Each frontier carries the accumulated inclusion path that
//! will annotate the member it registers.
//!
//! Per-symbol states are monotonic: Unseen -> Queued -> Processed. Duplicate
//! enqueues are harmless; dedup happens at dequeue, so the first path seen
//! wins for registration while mandatory inclusion runs once per type.

use std::collections::{HashSet, VecDeque};

use tokio_util::sync::CancellationToken;

use crate::domain::error::{ExtractError, Result};
use crate::domain::identity::SymbolKey;
use crate::domain::keep_set::{KeepSet, NamespaceFilter, Registry};
use crate::domain::semantic::{DocumentModel, SymbolInfo};
use crate::domain::workspace::Workspace;

/// Crawl parameters for one root document.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Cross-type hop budget from the root document
    pub depth: u32,
    /// Suppress the root document's own declarations while still crawling
    /// outward from its use sites
    pub exclude_root_definitions: bool,
}

/// BFS work item.
#[derive(Debug, Clone)]
struct Frontier {
    symbol: SymbolKey,
    depth_left: u32,
    path: String,
}

pub struct Crawler<'a> {
    workspace: &'a Workspace,
    filter: &'a NamespaceFilter,
    cancel: &'a CancellationToken,
}

impl<'a> Crawler<'a> {
    pub fn new(
        workspace: &'a Workspace,
        filter: &'a NamespaceFilter,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            workspace,
            filter,
            cancel,
        }
    }

    /// Minimal crawl: keep only the members actually reached.
    pub fn crawl(&self, root: &DocumentModel, config: &CrawlConfig) -> Result<KeepSet> {
        let registry = self.run(root, config)?;
        Ok(registry.into_keep_set())
    }

    /// Full crawl: reach the same types, then widen every kept type to its
    /// complete member list.
    pub fn crawl_full(&self, root: &DocumentModel, depth: u32) -> Result<KeepSet> {
        let config = CrawlConfig {
            depth,
            exclude_root_definitions: false,
        };
        let mut registry = self.run(root, &config)?;
        let kept: Vec<SymbolKey> = registry
            .keep()
            .iter()
            .map(|e| e.type_symbol.clone())
            .collect();
        for type_key in kept {
            let display = match self.workspace.resolve(&type_key) {
                Some(info) => info.display.clone(),
                None => continue,
            };
            registry.register_with_members(&type_key, &format!("member of {display}"))?;
        }
        Ok(registry.into_keep_set())
    }

    fn run(&self, root: &DocumentModel, config: &CrawlConfig) -> Result<Registry<'a>> {
        let mut registry = Registry::new(self.workspace, self.filter);
        self.seed_root_types(root, config, &mut registry)?;

        let mut queue: VecDeque<Frontier> = VecDeque::new();
        self.seed_use_sites(root, config.depth, &mut queue);

        let mut processed: HashSet<SymbolKey> = HashSet::new();

        while let Some(frontier) = queue.pop_front() {
            if self.cancel.is_cancelled() {
                return Err(ExtractError::Cancelled);
            }
            if !processed.insert(frontier.symbol.clone()) {
                continue;
            }

            let ws = self.workspace;
            let Some(info) = ws.resolve(&frontier.symbol) else {
                tracing::warn!(symbol = %frontier.symbol, "no semantic model for symbol, skipping");
                continue;
            };
            if info.is_error || info.kind.is_never_tracked() {
                continue;
            }
            if !info.has_source_declaration() {
                tracing::debug!(symbol = %frontier.symbol, "metadata-only symbol, skipping");
                continue;
            }

            let Some(owner) = self.owner_of(info, &frontier.symbol) else {
                tracing::warn!(symbol = %frontier.symbol, "owner type missing, skipping");
                continue;
            };

            let owner_in_root = ws
                .resolve(&owner)
                .is_some_and(|o| o.declared_in(&root.path));
            if config.exclude_root_definitions && owner_in_root {
                // Root declarations contribute nothing new; their use sites
                // already seeded the crawl.
                continue;
            }

            registry.register(&owner, &frontier.symbol, frontier.path.clone())?;

            for child in ws.referenced_symbols(&frontier.symbol) {
                let Some(child_info) = ws.resolve(&child) else {
                    tracing::debug!(symbol = %child, "referenced symbol unknown, not followed");
                    continue;
                };
                if child_info.is_error || child_info.kind.is_never_tracked() {
                    continue;
                }
                if self.filter.excludes(&child_info.namespace) {
                    continue;
                }
                let Some(child_owner) = self.owner_of(child_info, &child) else {
                    continue;
                };

                // Same-type hops are free; cross-type hops cost one.
                let depth_left = if child_owner == owner {
                    frontier.depth_left
                } else if frontier.depth_left == 0 {
                    continue;
                } else {
                    frontier.depth_left - 1
                };

                queue.push_back(Frontier {
                    symbol: child,
                    depth_left,
                    path: format!("{} -> {}", frontier.path, child_info.signature_with_line()),
                });
            }
        }

        Ok(registry)
    }

    /// Step 1: every type declared in the root document becomes a root type;
    /// unless suppressed, it is registered whole, along with its transitive
    /// implemented interfaces.
    fn seed_root_types(
        &self,
        root: &DocumentModel,
        config: &CrawlConfig,
        registry: &mut Registry<'a>,
    ) -> Result<()> {
        let ws = self.workspace;
        for declared in ws.declared_types(root) {
            let key = ws.canonicalize(&declared.id);
            registry.mark_root(key.clone());
            if config.exclude_root_definitions {
                continue;
            }

            registry.register_with_members(&key, &format!("declared in {}", root.path))?;

            // Interface members register at zero depth cost; their bodies are
            // not followed.
            for iface in ws.interface_closure(&key) {
                let Some(iface_info) = ws.resolve(&iface) else {
                    continue;
                };
                let path = format!("{} implements {}", declared.display, iface_info.display);
                registry.register_with_members(&iface, &path)?;
            }
        }
        Ok(())
    }

    /// Step 2: seed one frontier per use site. The hop from the root document
    /// to the used symbol is free when the symbol's owner is itself declared
    /// in the root document, and costs one otherwise; a zero budget therefore
    /// never reaches foreign types.
    fn seed_use_sites(&self, root: &DocumentModel, depth: u32, queue: &mut VecDeque<Frontier>) {
        let ws = self.workspace;
        for (info, site) in ws.use_site_symbols(root) {
            if info.is_error || info.kind.is_never_tracked() {
                continue;
            }
            if self.filter.excludes(&info.namespace) {
                continue;
            }
            let key = ws.canonicalize(&info.id);
            let Some(target) = ws.resolve(&key) else {
                continue;
            };
            let Some(owner) = self.owner_of(target, &key) else {
                continue;
            };
            let owner_in_root = ws
                .resolve(&owner)
                .is_some_and(|o| o.declared_in(&root.path));

            let depth_left = if owner_in_root {
                depth
            } else if depth == 0 {
                continue;
            } else {
                depth - 1
            };

            let location = &site.location;
            queue.push_back(Frontier {
                symbol: key,
                depth_left,
                path: format!(
                    "{}:{}: {}",
                    location.file,
                    location.line,
                    location.line_text.trim()
                ),
            });
        }
    }

    /// Owner type: the symbol itself when it is a type (a nested type used as
    /// an expression registers against itself), else its containing type.
    fn owner_of(&self, info: &SymbolInfo, key: &SymbolKey) -> Option<SymbolKey> {
        if info.kind.is_type() {
            Some(key.clone())
        } else {
            info.containing_type
                .as_deref()
                .map(|ct| self.workspace.canonicalize(ct))
        }
    }
}
