//! Facade-level configuration and re-exported output types.

use serde::{Deserialize, Serialize};

pub use crate::domain::emit::{Definition, ExplainMode, FileSlice};

/// Engine-wide configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SliceOptions {
    /// Symbols whose containing namespace starts with any of these tokens are
    /// filtered from the crawl and the output (platform/standard-library
    /// roots, typically).
    #[serde(default)]
    pub excluded_namespace_prefixes: Vec<String>,
}
