//! Symbol identity across partial declarations and generic instantiations.
//!
//! Raw symbol ids are never hashed directly by the crawl: every id is first
//! canonicalised to its original definition, so `U.Do<int>` and `U.Do<string>`
//! collapse to one `U.Do<T>` entry and all partials of a type share one
//! identity.

use std::collections::HashMap;
use std::fmt;

use crate::domain::semantic::{SymbolId, SymbolInfo};

/// Canonical symbol identity: the original-definition id, minted only by
/// [`SymbolIndex::canonicalize`]. Value equality and hashing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolKey(SymbolId);

impl SymbolKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves symbols to their original definition and provides the stable
/// display key used inside keep-set member maps.
#[derive(Debug)]
pub struct SymbolIndex {
    /// id -> original-definition id, for ids that are not self-canonical
    canonical: HashMap<SymbolId, SymbolId>,
    /// canonical id -> display string of the original definition
    display: HashMap<SymbolId, String>,
}

// Guards malformed original_definition cycles in snapshot data.
const MAX_CANONICAL_HOPS: usize = 32;

impl SymbolIndex {
    pub fn build(symbols: &[SymbolInfo]) -> Self {
        let direct: HashMap<&str, &str> = symbols
            .iter()
            .filter_map(|s| {
                s.original_definition
                    .as_deref()
                    .filter(|od| *od != s.id)
                    .map(|od| (s.id.as_str(), od))
            })
            .collect();

        let mut canonical = HashMap::new();
        for s in symbols {
            let mut current = s.id.as_str();
            let mut hops = 0;
            while let Some(&next) = direct.get(current) {
                hops += 1;
                if hops > MAX_CANONICAL_HOPS {
                    tracing::warn!(symbol = %s.id, "original-definition chain too deep, truncating");
                    break;
                }
                current = next;
            }
            if current != s.id {
                canonical.insert(s.id.clone(), current.to_string());
            }
        }

        let display = symbols
            .iter()
            .filter(|s| !canonical.contains_key(&s.id))
            .map(|s| (s.id.clone(), s.display.clone()))
            .collect();

        Self { canonical, display }
    }

    /// Canonicalising constructor for [`SymbolKey`]: follows the
    /// original-definition chain to its fixpoint.
    pub fn canonicalize(&self, id: &str) -> SymbolKey {
        SymbolKey(
            self.canonical
                .get(id)
                .cloned()
                .unwrap_or_else(|| id.to_string()),
        )
    }

    /// Display string of the original definition; the member-map key.
    /// Falls back to the raw id for symbols the build unit never declared.
    pub fn display_key<'a>(&'a self, key: &'a SymbolKey) -> &'a str {
        self.display
            .get(key.as_str())
            .map(String::as_str)
            .unwrap_or_else(|| key.as_str())
    }
}
