//! Declaring syntax - the textual shape of a declaration, per partial.
//!
//! The emitter never re-parses or reflows source: a declaration is carried as
//! exact source fragments (header, members, footer) so the member list can be
//! replaced while everything kept stays byte-identical to the original.

use serde::{Deserialize, Serialize};

use crate::domain::semantic::SymbolId;

/// One partial declaration of a symbol: the file it lives in plus its node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclaringSyntax {
    pub file: String,
    pub node: SyntaxNode,
}

/// Syntactic form of a type declaration.
///
/// Unrecognised forms land in `Other` and are emitted as-is; the emitter never
/// fails on a shape it does not understand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum SyntaxNode {
    /// Class, struct, interface or record: a member list can be re-written.
    Compound(CompoundSyntax),
    /// Enum declaration, emitted unchanged.
    Enum(LeafSyntax),
    /// Delegate declaration, emitted unchanged.
    Delegate(LeafSyntax),
    /// Anything else, emitted unchanged.
    Other(LeafSyntax),
}

/// A declaration whose body is a member list enclosed in braces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundSyntax {
    /// Leading whitespace of the declaration line
    #[serde(default)]
    pub indent: String,

    /// Everything from the first attribute/modifier through the open brace,
    /// exact source text
    pub header: String,

    #[serde(default)]
    pub members: Vec<MemberSyntax>,

    /// The close brace line, exact source text
    pub footer: String,
}

/// One member declaration inside a compound type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSyntax {
    /// Leading whitespace of the member's first line
    #[serde(default)]
    pub indent: String,

    /// Exact source text of the member, every line carrying its original
    /// indentation
    pub text: String,

    /// Symbols this member declaration binds: a field or event-field
    /// declaration may bind several variable symbols; a property contributes
    /// the property symbol and its accessor symbols
    pub declared_symbols: Vec<SymbolId>,
}

/// A declaration emitted verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeafSyntax {
    #[serde(default)]
    pub indent: String,
    pub text: String,
}

/// Left-margin minification: strip the minimum leading-whitespace count over
/// all non-blank lines from every line, then trim surrounding blank lines.
/// Tokens are never rewritten.
pub fn minify_left_margin(text: &str) -> String {
    let margin = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    let lines: Vec<String> = text
        .lines()
        .map(|l| {
            let mut stripped = 0;
            l.chars()
                .skip_while(|c| {
                    if stripped < margin && c.is_whitespace() {
                        stripped += 1;
                        true
                    } else {
                        false
                    }
                })
                .collect()
        })
        .collect();

    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}
