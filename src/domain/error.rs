//! Error taxonomy for slice extraction.
//!
//! All recoverable per-node conditions (missing semantic info, metadata-only
//! symbols, unrecognised syntax shapes) are logged and swallowed at the site
//! where they occur; only the kinds below abort a call. Callers never receive
//! a partial definition set alongside an error.

use thiserror::Error;

/// Unrecoverable failure kinds surfaced to the caller.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Negative depth, empty root-file list for aggregation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Root file not present in the workspace.
    #[error("not found: {0}")]
    NotFound(String),

    /// The workspace/solution could not be opened.
    #[error("workspace load failed: {0}")]
    WorkspaceLoad(String),

    /// Cooperative cancellation observed at a suspension point.
    #[error("operation cancelled")]
    Cancelled,

    /// Contract violation in the semantic surface.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
