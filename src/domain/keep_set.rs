//! Keep-set - the crawl's result: owner type -> members chosen for emission.
//!
//! Registration goes through [`Registry`], an explicit collaborator carrying
//! the namespace exclusion policy as data. The registry is the single gate
//! into the keep-set, so the exclusion and containing-type invariants hold for
//! every entry no matter which crawl phase produced it.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::domain::error::{ExtractError, Result};
use crate::domain::identity::SymbolKey;
use crate::domain::workspace::Workspace;

/// A member chosen to be kept, with the reference paths that caused it.
#[derive(Debug, Clone)]
pub struct MemberInfo {
    pub symbol: SymbolKey,
    /// Unique inclusion paths; insertion order irrelevant
    pub paths: BTreeSet<String>,
}

/// Members retained for one owner type, keyed by member display key.
#[derive(Debug, Clone)]
pub struct TypeEntry {
    pub type_symbol: SymbolKey,
    members: HashMap<String, MemberInfo>,
}

impl TypeEntry {
    pub fn contains(&self, display_key: &str) -> bool {
        self.members.contains_key(display_key)
    }

    pub fn member(&self, display_key: &str) -> Option<&MemberInfo> {
        self.members.get(display_key)
    }

    pub fn members(&self) -> impl Iterator<Item = (&String, &MemberInfo)> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Owner type -> member map, plus the set of root types.
///
/// Every symbol stored here is an original definition; iteration follows
/// first-registration order so emission is deterministic.
#[derive(Debug, Clone, Default)]
pub struct KeepSet {
    types: HashMap<SymbolKey, TypeEntry>,
    order: Vec<SymbolKey>,
    roots: HashSet<SymbolKey>,
}

impl KeepSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A type is root iff it is declared in an entry document, regardless of
    /// whether any of its members survive.
    pub fn mark_root(&mut self, key: SymbolKey) {
        self.roots.insert(key);
    }

    pub fn is_root(&self, key: &SymbolKey) -> bool {
        self.roots.contains(key)
    }

    pub fn roots(&self) -> &HashSet<SymbolKey> {
        &self.roots
    }

    pub fn entry(&self, key: &SymbolKey) -> Option<&TypeEntry> {
        self.types.get(key)
    }

    /// Entries in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeEntry> {
        self.order.iter().filter_map(|k| self.types.get(k))
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Low-level insert; callers outside the registry are the aggregator and
    /// tests. Paths only accumulate, they are never replaced.
    pub fn insert(
        &mut self,
        owner: SymbolKey,
        member_display_key: String,
        member: SymbolKey,
        path: String,
    ) {
        let entry = self.types.entry(owner.clone()).or_insert_with(|| {
            self.order.push(owner.clone());
            TypeEntry {
                type_symbol: owner,
                members: HashMap::new(),
            }
        });
        entry
            .members
            .entry(member_display_key)
            .or_insert_with(|| MemberInfo {
                symbol: member,
                paths: BTreeSet::new(),
            })
            .paths
            .insert(path);
    }
}

/// Namespace exclusion policy as data: a symbol whose containing namespace
/// begins with any configured token never registers and never contributes
/// edges.
#[derive(Debug, Clone, Default)]
pub struct NamespaceFilter {
    prefixes: Vec<String>,
}

impl NamespaceFilter {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    pub fn excludes(&self, namespace: &str) -> bool {
        self.prefixes.iter().any(|p| namespace.starts_with(p.as_str()))
    }
}

/// The single gate into a keep-set during a crawl.
pub struct Registry<'a> {
    workspace: &'a Workspace,
    filter: &'a NamespaceFilter,
    keep: KeepSet,
    /// Types whose mandatory members were already pulled in
    expanded: HashSet<SymbolKey>,
}

impl<'a> Registry<'a> {
    pub fn new(workspace: &'a Workspace, filter: &'a NamespaceFilter) -> Self {
        Self {
            workspace,
            filter,
            keep: KeepSet::new(),
            expanded: HashSet::new(),
        }
    }

    pub fn keep(&self) -> &KeepSet {
        &self.keep
    }

    pub fn into_keep_set(self) -> KeepSet {
        self.keep
    }

    pub fn mark_root(&mut self, key: SymbolKey) {
        self.keep.mark_root(key);
    }

    /// Register `member` under `owner` with one inclusion path, then ensure
    /// the owner's mandatory members are present. Filtered, never-tracked and
    /// undeclared symbols are dropped silently; a member claiming a different
    /// containing type is a semantic-surface contract violation.
    pub fn register(&mut self, owner: &SymbolKey, member: &SymbolKey, path: String) -> Result<()> {
        let ws = self.workspace;

        let Some(owner_info) = ws.resolve(owner) else {
            tracing::warn!(owner = %owner, "cannot resolve owner type, skipping registration");
            return Ok(());
        };
        let Some(member_info) = ws.resolve(member) else {
            tracing::warn!(member = %member, "cannot resolve member symbol, skipping registration");
            return Ok(());
        };

        if self.filter.excludes(&owner_info.namespace) || self.filter.excludes(&member_info.namespace)
        {
            tracing::debug!(member = %member, "namespace excluded, not registered");
            return Ok(());
        }
        if member_info.is_error || member_info.kind.is_never_tracked() {
            return Ok(());
        }
        if !member_info.has_source_declaration() {
            tracing::debug!(member = %member, "metadata-only symbol, not registered");
            return Ok(());
        }

        if member != owner {
            match &member_info.containing_type {
                Some(ct) if ws.canonicalize(ct) == *owner => {}
                Some(ct) => {
                    return Err(ExtractError::Internal(format!(
                        "member {} is contained by {}, registered under {}",
                        member_info.display, ct, owner
                    )));
                }
                None => {
                    return Err(ExtractError::Internal(format!(
                        "containing type missing for member {}",
                        member_info.display
                    )));
                }
            }
        }

        let display = ws.display_key(member).to_string();
        self.keep.insert(owner.clone(), display, member.clone(), path);
        self.ensure_mandatory(owner);
        Ok(())
    }

    /// Register a type together with every one of its declared members, all
    /// under the same path. Used for root-document types, the implemented
    /// interface rule, and full (non-minimised) extraction.
    pub fn register_with_members(&mut self, type_key: &SymbolKey, path: &str) -> Result<()> {
        self.register(type_key, type_key, path.to_string())?;
        let member_ids: Vec<String> = match self.workspace.resolve(type_key) {
            Some(info) => info.members.clone(),
            None => return Ok(()),
        };
        for id in member_ids {
            let member = self.workspace.canonicalize(&id);
            self.register(type_key, &member, path.to_string())?;
        }
        Ok(())
    }

    /// Mandatory inclusion: static constructors and const/static-readonly
    /// fields of a registered type survive even when never directly
    /// referenced. Runs once per type.
    fn ensure_mandatory(&mut self, owner: &SymbolKey) {
        if !self.expanded.insert(owner.clone()) {
            return;
        }
        let ws = self.workspace;
        let Some(info) = ws.resolve(owner) else {
            return;
        };
        let path = format!("static initialization of {}", info.display);
        let mandatory: Vec<SymbolKey> = info
            .members
            .iter()
            .map(|id| ws.canonicalize(id))
            .filter(|key| {
                ws.resolve(key)
                    .is_some_and(|m| m.is_mandatory_member() && m.has_source_declaration())
            })
            .collect();
        for key in mandatory {
            let display = ws.display_key(&key).to_string();
            self.keep.insert(owner.clone(), display, key, path.clone());
        }
    }
}
