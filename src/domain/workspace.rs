//! Workspace - the semantic surface served to the crawler and emitter.
//!
//! Built once from a [`SemanticModel`] snapshot; the only place the host
//! build unit's data is indexed. Everything downstream (crawler, aggregator,
//! emitter) is agnostic of where the snapshot came from.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};

use crate::domain::identity::{SymbolIndex, SymbolKey};
use crate::domain::semantic::{DocumentModel, SemanticModel, SymbolId, SymbolInfo, UseSite};
use crate::domain::syntax::DeclaringSyntax;

#[derive(Debug)]
pub struct Workspace {
    project_root: String,
    documents: Vec<DocumentModel>,

    /// Raw id -> declaration, including non-canonical instantiations
    symbols: HashMap<SymbolId, SymbolInfo>,

    index: SymbolIndex,

    /// Reference graph over canonical ids: `from` mentions `to` in its body
    refs: DiGraph<SymbolId, ()>,
    ref_nodes: HashMap<SymbolId, NodeIndex>,
}

impl Workspace {
    /// Index a semantic snapshot. Loader warnings are forwarded to the log;
    /// they never abort the build.
    pub fn build(model: SemanticModel) -> Self {
        for warning in &model.warnings {
            tracing::warn!(warning = %warning, "workspace loader warning");
        }

        let index = SymbolIndex::build(&model.symbols);

        let mut refs: DiGraph<SymbolId, ()> = DiGraph::new();
        let mut ref_nodes: HashMap<SymbolId, NodeIndex> = HashMap::new();
        let mut seen: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();

        for edge in &model.references {
            let from = index.canonicalize(&edge.from);
            let to = index.canonicalize(&edge.to);
            let fi = *ref_nodes
                .entry(from.as_str().to_string())
                .or_insert_with(|| refs.add_node(from.as_str().to_string()));
            let ti = *ref_nodes
                .entry(to.as_str().to_string())
                .or_insert_with(|| refs.add_node(to.as_str().to_string()));
            // referenced_symbols is a set; collapse duplicate mentions here
            if seen.insert((fi, ti)) {
                refs.add_edge(fi, ti, ());
            }
        }

        let symbols = model.symbols.into_iter().map(|s| (s.id.clone(), s)).collect();

        Self {
            project_root: model.project_root,
            documents: model.documents,
            symbols,
            index,
            refs,
            ref_nodes,
        }
    }

    pub fn project_root(&self) -> &str {
        &self.project_root
    }

    /// Case-insensitive full-path match; `None` when the document is not part
    /// of this workspace.
    pub fn locate_document(&self, path: &str) -> Option<&DocumentModel> {
        self.documents
            .iter()
            .find(|d| d.path.eq_ignore_ascii_case(path))
    }

    /// Every type, enum and delegate declared in the document.
    pub fn declared_types<'a>(
        &'a self,
        document: &'a DocumentModel,
    ) -> impl Iterator<Item = &'a SymbolInfo> + 'a {
        document
            .declared_types
            .iter()
            .filter_map(|id| self.symbol(id))
    }

    /// Every non-declaration occurrence in the document that resolved to a
    /// known symbol.
    pub fn use_site_symbols<'a>(
        &'a self,
        document: &'a DocumentModel,
    ) -> impl Iterator<Item = (&'a SymbolInfo, &'a UseSite)> + 'a {
        document.use_sites.iter().filter_map(|site| {
            let info = self.symbol(&site.symbol);
            if info.is_none() {
                tracing::debug!(symbol = %site.symbol, "use site resolved to unknown symbol");
            }
            info.map(|i| (i, site))
        })
    }

    /// Look up by raw id (instantiations included).
    pub fn symbol(&self, id: &str) -> Option<&SymbolInfo> {
        self.symbols.get(id)
    }

    /// Look up the original definition behind a canonical key.
    pub fn resolve(&self, key: &SymbolKey) -> Option<&SymbolInfo> {
        self.symbols.get(key.as_str())
    }

    pub fn canonicalize(&self, id: &str) -> SymbolKey {
        self.index.canonicalize(id)
    }

    pub fn display_key<'a>(&'a self, key: &'a SymbolKey) -> &'a str {
        self.index.display_key(key)
    }

    /// Symbols directly referenced by the body/initializer of `key`. Empty for
    /// symbols that have no body. Sorted for deterministic traversal.
    pub fn referenced_symbols(&self, key: &SymbolKey) -> Vec<SymbolKey> {
        let Some(&node) = self.ref_nodes.get(key.as_str()) else {
            return Vec::new();
        };
        let mut out: Vec<SymbolKey> = self
            .refs
            .neighbors_directed(node, petgraph::Direction::Outgoing)
            .map(|n| self.index.canonicalize(&self.refs[n]))
            .collect();
        out.sort();
        out
    }

    /// Declaring syntax of a symbol, one node per partial declaration. Empty
    /// for metadata-only symbols.
    pub fn declaring_syntax(&self, key: &SymbolKey) -> &[DeclaringSyntax] {
        self.resolve(key)
            .map(|info| info.syntax.as_slice())
            .unwrap_or(&[])
    }

    /// Transitive implemented-interface set of a type, breadth-first, unique.
    pub fn interface_closure(&self, type_key: &SymbolKey) -> Vec<SymbolKey> {
        let mut out = Vec::new();
        let mut visited: HashSet<SymbolKey> = HashSet::new();
        let mut queue: Vec<SymbolKey> = match self.resolve(type_key) {
            Some(info) => info
                .interfaces
                .iter()
                .map(|id| self.canonicalize(id))
                .collect(),
            None => Vec::new(),
        };

        let mut cursor = 0;
        while cursor < queue.len() {
            let current = queue[cursor].clone();
            cursor += 1;
            if !visited.insert(current.clone()) {
                continue;
            }
            if let Some(info) = self.resolve(&current) {
                for parent in &info.interfaces {
                    queue.push(self.canonicalize(parent));
                }
            }
            out.push(current);
        }
        out
    }
}
