//! Emitter - renders the keep-set back into per-file source definitions.
//!
//! For each retained type the original declaring syntax is preserved and only
//! its member list is replaced by the kept subset. Presentation (inclusion
//! path comments) is decoupled from minimisation through the [`PathAdorner`]:
//! the emitter hands it a node's indent and path set and receives the
//! annotation lines back.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::domain::keep_set::{KeepSet, TypeEntry};
use crate::domain::syntax::{
    minify_left_margin, CompoundSyntax, DeclaringSyntax, LeafSyntax, MemberSyntax, SyntaxNode,
};
use crate::domain::workspace::Workspace;

/// Whether emitted declarations carry inclusion-path comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ExplainMode {
    #[default]
    None,
    ReasonForInclusion,
}

/// Path set shown for a compound type that was reached but contributes no
/// members of its own.
const NO_MEMBERS_PATH: &str = "(type kept, but no members directly used)";

/// One emitted declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    /// `<file>:<type-display-string>`
    pub key: String,
    /// Type display string
    pub symbol: String,
    /// Dotted concatenation of containing namespaces
    pub namespace: String,
    /// Left-margin-minified source fragment
    pub code: String,
}

/// All definitions emitted for one touched source file, in keep-set discovery
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSlice {
    pub file_path: String,
    pub definitions: Vec<Definition>,
}

/// Injects `// path: <p>` trivia ahead of emitted nodes.
struct PathAdorner {
    mode: ExplainMode,
}

impl PathAdorner {
    fn annotate<'p>(
        &self,
        indent: &str,
        paths: impl IntoIterator<Item = &'p String>,
        out: &mut String,
    ) {
        if self.mode != ExplainMode::ReasonForInclusion {
            return;
        }
        for path in paths {
            out.push_str(indent);
            out.push_str("// path: ");
            out.push_str(path);
            out.push('\n');
        }
    }
}

pub struct Emitter<'a> {
    workspace: &'a Workspace,
    adorner: PathAdorner,
}

impl<'a> Emitter<'a> {
    pub fn new(workspace: &'a Workspace, mode: ExplainMode) -> Self {
        Self {
            workspace,
            adorner: PathAdorner { mode },
        }
    }

    /// Render one definition per kept type, grouped per touched file.
    /// Never fails: types without declaring syntax are logged and skipped,
    /// unrecognised syntax forms are emitted as-is.
    pub fn emit(&self, keep: &KeepSet) -> Vec<FileSlice> {
        let mut file_order: Vec<String> = Vec::new();
        let mut by_file: HashMap<String, Vec<Definition>> = HashMap::new();

        for entry in keep.iter() {
            let Some(info) = self.workspace.resolve(&entry.type_symbol) else {
                tracing::warn!(symbol = %entry.type_symbol, "kept type has no semantic info, skipping");
                continue;
            };
            let syntax = self.workspace.declaring_syntax(&entry.type_symbol);
            // Representative declaration: the first partial.
            let Some(first) = syntax.first() else {
                tracing::warn!(symbol = %entry.type_symbol, "kept type has no declaring syntax, skipping");
                continue;
            };

            let type_display = self.workspace.display_key(&entry.type_symbol).to_string();
            let body = match &first.node {
                SyntaxNode::Compound(compound) => self.render_compound(
                    entry,
                    syntax,
                    compound,
                    &type_display,
                    keep.is_root(&entry.type_symbol),
                ),
                SyntaxNode::Enum(leaf) | SyntaxNode::Delegate(leaf) | SyntaxNode::Other(leaf) => {
                    self.render_leaf(entry, leaf, &type_display)
                }
            };

            let definition = Definition {
                key: format!("{}:{}", first.file, type_display),
                symbol: type_display,
                namespace: info.namespace.clone(),
                code: minify_left_margin(&body),
            };

            let file = first.file.clone();
            if !by_file.contains_key(&file) {
                file_order.push(file.clone());
            }
            by_file.entry(file).or_default().push(definition);
        }

        file_order
            .into_iter()
            .map(|file_path| {
                let definitions = by_file.remove(&file_path).unwrap_or_default();
                FileSlice {
                    file_path,
                    definitions,
                }
            })
            .collect()
    }

    /// Compound declaration: kept members from every partial, in their
    /// original syntactic order, spliced into the representative node.
    fn render_compound(
        &self,
        entry: &TypeEntry,
        syntax: &[DeclaringSyntax],
        representative: &CompoundSyntax,
        type_display: &str,
        is_root: bool,
    ) -> String {
        let mut kept: Vec<&MemberSyntax> = Vec::new();
        for declaration in syntax {
            if let SyntaxNode::Compound(compound) = &declaration.node {
                for member in &compound.members {
                    if self.is_kept(entry, member) {
                        kept.push(member);
                    }
                }
            }
        }

        let mut type_paths: Vec<String> = entry
            .member(type_display)
            .map(|m| m.paths.iter().cloned().collect())
            .unwrap_or_default();
        if kept.is_empty() && !is_root {
            type_paths = vec![NO_MEMBERS_PATH.to_string()];
        }

        let mut text = String::new();
        self.adorner
            .annotate(&representative.indent, type_paths.iter(), &mut text);
        text.push_str(&representative.header);
        for member in &kept {
            text.push('\n');
            let paths = self.member_paths(entry, member);
            self.adorner.annotate(&member.indent, paths.iter(), &mut text);
            text.push_str(&member.text);
        }
        text.push('\n');
        text.push_str(&representative.footer);
        text
    }

    /// Enums, delegates and unrecognised forms are emitted unchanged.
    fn render_leaf(&self, entry: &TypeEntry, leaf: &LeafSyntax, type_display: &str) -> String {
        let mut text = String::new();
        if let Some(info) = entry.member(type_display) {
            self.adorner.annotate(&leaf.indent, info.paths.iter(), &mut text);
        }
        text.push_str(&leaf.text);
        text
    }

    /// A member survives iff any of the symbols it declares is in the member
    /// map. Root-type-ness does not override this: it only affects what the
    /// crawl put into the map.
    fn is_kept(&self, entry: &TypeEntry, member: &MemberSyntax) -> bool {
        member.declared_symbols.iter().any(|id| {
            let key = self.workspace.canonicalize(id);
            let display = self.workspace.display_key(&key);
            entry.contains(display)
        })
    }

    /// Paths from every declared symbol that matched the member map; a
    /// property's accessors fold into the property's key here.
    fn member_paths(&self, entry: &TypeEntry, member: &MemberSyntax) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        for id in &member.declared_symbols {
            let key = self.workspace.canonicalize(id);
            let display = self.workspace.display_key(&key).to_string();
            if let Some(info) = entry.member(&display) {
                out.extend(info.paths.iter().cloned());
            }
        }
        out
    }
}
