//! Aggregation of per-document crawls into one joint keep-set.

use crate::domain::keep_set::KeepSet;

/// Merge per-document keep-sets: root-type sets are unioned, and for every
/// `(type, member)` pair seen anywhere the merged path set is the union of the
/// per-document path sets. First-discovery order across the inputs is kept so
/// emission stays deterministic.
pub fn merge(parts: Vec<KeepSet>) -> KeepSet {
    let mut merged = KeepSet::new();
    for part in parts {
        for root in part.roots() {
            merged.mark_root(root.clone());
        }
        for entry in part.iter() {
            for (display_key, info) in entry.members() {
                for path in &info.paths {
                    merged.insert(
                        entry.type_symbol.clone(),
                        display_key.clone(),
                        info.symbol.clone(),
                        path.clone(),
                    );
                }
            }
        }
    }
    merged
}
