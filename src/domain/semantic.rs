//! SemanticModel - Intermediate representation of one build unit's semantics
//!
//! Responsibility: Provide a language-agnostic view of symbols, documents and
//! references as a contract between workspace sources (infrastructure) and the
//! crawler/emitter (domain).
//!
//! Principles:
//! 1. Only describe "what is declared and what references what", not "how to
//!    slice it"
//! 2. Preserve raw reference information; the workspace decides how edges are
//!    indexed
//! 3. Explicitly express the concepts the crawl depends on (symbol kinds,
//!    canonical definitions, declaring locations)

use serde::{Deserialize, Serialize};

use crate::domain::syntax::DeclaringSyntax;

/// Globally unique symbol identifier (source generates, format flexible).
pub type SymbolId = String;

/// Semantic snapshot of a single build unit.
///
/// Produced by a `WorkspaceSource`; the only structure infrastructure hands to
/// the domain. Use sites exclude declaration occurrences by construction: a
/// syntax node that declares the symbol it resolves to is not a use site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticModel {
    /// Project root directory
    pub project_root: String,

    /// Documents (files) covered by this build unit
    pub documents: Vec<DocumentModel>,

    /// All symbol declarations known to the build unit
    pub symbols: Vec<SymbolInfo>,

    /// Directed body references: `from` mentions `to` in its body/initializer
    #[serde(default)]
    pub references: Vec<ReferenceEdge>,

    /// Loader diagnostics; forwarded to the log, never abort
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Semantic information for a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentModel {
    /// Full path as known to the workspace
    pub path: String,

    /// Types, enums and delegates declared in this document
    #[serde(default)]
    pub declared_types: Vec<SymbolId>,

    /// Non-declaration syntax nodes that resolve to a symbol
    #[serde(default)]
    pub use_sites: Vec<UseSite>,
}

/// One occurrence of a symbol at a non-declaration site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseSite {
    pub symbol: SymbolId,
    pub location: SourceLocation,
}

/// Source location with the text of the line it sits on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    /// 1-based
    pub line: u32,
    /// 1-based
    pub column: u32,
    #[serde(default)]
    pub line_text: String,
}

/// Directed reference edge between two symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEdge {
    pub from: SymbolId,
    pub to: SymbolId,
}

/// Symbol kind - classification the crawl and emitter depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    // Named types
    Class,
    Struct,
    Interface,
    Record,
    Enum,
    Delegate,

    // Members
    Method,
    Constructor,
    StaticConstructor,
    Property,
    Accessor,
    Field,
    Event,

    // Kinds that never enter a keep-set
    Parameter,
    Local,
    RangeVariable,
    Label,
    TypeParameter,

    Unknown,
}

impl SymbolKind {
    /// Named types register against themselves as owner.
    pub fn is_type(self) -> bool {
        matches!(
            self,
            SymbolKind::Class
                | SymbolKind::Struct
                | SymbolKind::Interface
                | SymbolKind::Record
                | SymbolKind::Enum
                | SymbolKind::Delegate
        )
    }

    /// Kinds excluded from seeding and from registration.
    pub fn is_never_tracked(self) -> bool {
        matches!(
            self,
            SymbolKind::Parameter
                | SymbolKind::Local
                | SymbolKind::RangeVariable
                | SymbolKind::Label
                | SymbolKind::TypeParameter
        )
    }
}

/// Member modifiers relevant to mandatory inclusion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberModifiers {
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_readonly: bool,
    #[serde(default)]
    pub is_const: bool,
}

/// Symbol declaration - unified representation of types and members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub id: SymbolId,

    pub kind: SymbolKind,

    /// Short name (without path)
    pub name: String,

    /// Display string (may include signature, e.g. "B.g()")
    pub display: String,

    /// Dotted concatenation of containing namespaces
    #[serde(default)]
    pub namespace: String,

    /// Enclosing named type, if any
    #[serde(default)]
    pub containing_type: Option<SymbolId>,

    /// Canonical un-substituted, un-instantiated form; `None` means this
    /// symbol is its own original definition
    #[serde(default)]
    pub original_definition: Option<SymbolId>,

    /// Error-type symbols never register and never enqueue children
    #[serde(default)]
    pub is_error: bool,

    #[serde(default)]
    pub modifiers: MemberModifiers,

    /// Declaring source locations, one per partial declaration; empty means
    /// the symbol is metadata-only (no in-source declaration)
    #[serde(default)]
    pub locations: Vec<SourceLocation>,

    /// Declared members (types only)
    #[serde(default)]
    pub members: Vec<SymbolId>,

    /// Directly implemented interfaces (types only)
    #[serde(default)]
    pub interfaces: Vec<SymbolId>,

    /// Declaring syntax, one node per partial declaration
    #[serde(default)]
    pub syntax: Vec<DeclaringSyntax>,
}

impl SymbolInfo {
    pub fn new(
        id: impl Into<String>,
        kind: SymbolKind,
        name: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            display: display.into(),
            namespace: String::new(),
            containing_type: None,
            original_definition: None,
            is_error: false,
            modifiers: MemberModifiers::default(),
            locations: Vec::new(),
            members: Vec::new(),
            interfaces: Vec::new(),
            syntax: Vec::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_containing_type(mut self, id: impl Into<String>) -> Self {
        self.containing_type = Some(id.into());
        self
    }

    pub fn with_original_definition(mut self, id: impl Into<String>) -> Self {
        self.original_definition = Some(id.into());
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.locations.push(location);
        self
    }

    pub fn with_members(mut self, members: Vec<SymbolId>) -> Self {
        self.members = members;
        self
    }

    pub fn with_interfaces(mut self, interfaces: Vec<SymbolId>) -> Self {
        self.interfaces = interfaces;
        self
    }

    pub fn with_modifiers(mut self, modifiers: MemberModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_syntax(mut self, syntax: DeclaringSyntax) -> Self {
        self.syntax.push(syntax);
        self
    }

    pub fn as_error(mut self) -> Self {
        self.is_error = true;
        self
    }

    /// Metadata-only symbols have no declaring location.
    pub fn has_source_declaration(&self) -> bool {
        !self.locations.is_empty()
    }

    /// Whether any partial declaration of this symbol lives in `path`
    /// (case-insensitive full-path match).
    pub fn declared_in(&self, path: &str) -> bool {
        self.locations
            .iter()
            .any(|l| l.file.eq_ignore_ascii_case(path))
    }

    /// Static constructors and const/static-readonly fields survive whenever
    /// their type is registered: constructing or initializing the type
    /// implicitly depends on them.
    pub fn is_mandatory_member(&self) -> bool {
        self.kind == SymbolKind::StaticConstructor
            || self.modifiers.is_const
            || (self.modifiers.is_static && self.modifiers.is_readonly)
    }

    /// Display string suffixed with the first declaring location, used for
    /// inclusion-path segments.
    pub fn signature_with_line(&self) -> String {
        match self.locations.first() {
            Some(l) => format!("{} [{}:{}]", self.display, l.file, l.line),
            None => self.display.clone(),
        }
    }
}
