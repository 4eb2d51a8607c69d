//! context-slice library — minimal dependency slices for object-oriented
//! codebases: given entry-point source files and a cross-type hop budget,
//! extract the smallest set of type and member declarations that explains
//! every non-local symbol they reference.

pub mod adapters;
pub mod app;
pub mod domain;
