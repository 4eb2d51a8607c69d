//! Test fixture generators for integration tests.
//!
//! Models mirror small C#-style projects: each fixture builds the semantic
//! snapshot an indexer would export for them, declaring syntax included.
#![allow(dead_code)]

use context_slice::app::dto::{Definition, FileSlice};
use context_slice::domain::semantic::{
    DocumentModel, MemberModifiers, ReferenceEdge, SemanticModel, SourceLocation, SymbolInfo,
    SymbolKind, UseSite,
};
use context_slice::domain::syntax::{
    CompoundSyntax, DeclaringSyntax, LeafSyntax, MemberSyntax, SyntaxNode,
};

pub fn loc(file: &str, line: u32) -> SourceLocation {
    SourceLocation {
        file: file.into(),
        line,
        column: 1,
        line_text: String::new(),
    }
}

pub fn use_site(symbol: &str, file: &str, line: u32, line_text: &str) -> UseSite {
    UseSite {
        symbol: symbol.into(),
        location: SourceLocation {
            file: file.into(),
            line,
            column: 13,
            line_text: line_text.into(),
        },
    }
}

pub fn reference(from: &str, to: &str) -> ReferenceEdge {
    ReferenceEdge {
        from: from.into(),
        to: to.into(),
    }
}

pub fn member_syntax(text: &str, declared: &[&str]) -> MemberSyntax {
    MemberSyntax {
        indent: "        ".into(),
        text: format!("        {text}"),
        declared_symbols: declared.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn class_decl(file: &str, name: &str, members: Vec<MemberSyntax>) -> DeclaringSyntax {
    DeclaringSyntax {
        file: file.into(),
        node: SyntaxNode::Compound(CompoundSyntax {
            indent: "    ".into(),
            header: format!("    public class {name}\n    {{"),
            members,
            footer: "    }".into(),
        }),
    }
}

pub fn interface_decl(file: &str, name: &str, members: Vec<MemberSyntax>) -> DeclaringSyntax {
    DeclaringSyntax {
        file: file.into(),
        node: SyntaxNode::Compound(CompoundSyntax {
            indent: "    ".into(),
            header: format!("    public interface {name}\n    {{"),
            members,
            footer: "    }".into(),
        }),
    }
}

pub fn enum_decl(file: &str, text: &str) -> DeclaringSyntax {
    DeclaringSyntax {
        file: file.into(),
        node: SyntaxNode::Enum(LeafSyntax {
            indent: "    ".into(),
            text: format!("    {text}"),
        }),
    }
}

pub fn method(id: &str, name: &str, containing: &str, file: &str, line: u32) -> SymbolInfo {
    SymbolInfo::new(id, SymbolKind::Method, name, format!("{id}()"))
        .with_namespace("App")
        .with_containing_type(containing)
        .with_location(loc(file, line))
}

pub fn class(id: &str, file: &str, members: Vec<&str>) -> SymbolInfo {
    SymbolInfo::new(id, SymbolKind::Class, id, id)
        .with_namespace("App")
        .with_location(loc(file, 3))
        .with_members(members.iter().map(|m| m.to_string()).collect())
}

pub fn document(path: &str, declared_types: Vec<&str>, use_sites: Vec<UseSite>) -> DocumentModel {
    DocumentModel {
        path: path.into(),
        declared_types: declared_types.iter().map(|t| t.to_string()).collect(),
        use_sites,
    }
}

pub fn model(
    documents: Vec<DocumentModel>,
    symbols: Vec<SymbolInfo>,
    references: Vec<ReferenceEdge>,
) -> SemanticModel {
    SemanticModel {
        project_root: "/repo".into(),
        documents,
        symbols,
        references,
        warnings: Vec::new(),
    }
}

/// File A declares `class A { void f() { B.g(); } }`; file B declares
/// `class B { static void g(); static void h(); }`.
pub fn two_class_model() -> SemanticModel {
    model(
        vec![
            document(
                "src/A.cs",
                vec!["A"],
                vec![use_site("B.g", "src/A.cs", 7, "B.g();")],
            ),
            document("src/B.cs", vec!["B"], Vec::new()),
        ],
        vec![
            class("A", "src/A.cs", vec!["A.f"]).with_syntax(class_decl(
                "src/A.cs",
                "A",
                vec![member_syntax(
                    "public void f()\n        {\n            B.g();\n        }",
                    &["A.f"],
                )],
            )),
            method("A.f", "f", "A", "src/A.cs", 5),
            class("B", "src/B.cs", vec!["B.g", "B.h"]).with_syntax(class_decl(
                "src/B.cs",
                "B",
                vec![
                    member_syntax("public static void g() { }", &["B.g"]),
                    member_syntax("public static void h() { }", &["B.h"]),
                ],
            )),
            method("B.g", "g", "B", "src/B.cs", 5),
            method("B.h", "h", "B", "src/B.cs", 6),
        ],
        vec![reference("A.f", "B.g")],
    )
}

/// `class A { void f() { new C(); } }`; `C` has a constructor, a const field
/// `K` and a method `m` not called by `A`.
pub fn ctor_model() -> SemanticModel {
    model(
        vec![
            document(
                "src/A.cs",
                vec!["A"],
                vec![use_site("C..ctor", "src/A.cs", 7, "new C();")],
            ),
            document("src/C.cs", vec!["C"], Vec::new()),
        ],
        vec![
            class("A", "src/A.cs", vec!["A.f"]).with_syntax(class_decl(
                "src/A.cs",
                "A",
                vec![member_syntax(
                    "public void f()\n        {\n            new C();\n        }",
                    &["A.f"],
                )],
            )),
            method("A.f", "f", "A", "src/A.cs", 5),
            class("C", "src/C.cs", vec!["C..ctor", "C.K", "C.m"]).with_syntax(class_decl(
                "src/C.cs",
                "C",
                vec![
                    member_syntax("public const int K = 42;", &["C.K"]),
                    member_syntax("public C() { }", &["C..ctor"]),
                    member_syntax("public void m() { }", &["C.m"]),
                ],
            )),
            SymbolInfo::new("C..ctor", SymbolKind::Constructor, "C", "C.C()")
                .with_namespace("App")
                .with_containing_type("C")
                .with_location(loc("src/C.cs", 6)),
            SymbolInfo::new("C.K", SymbolKind::Field, "K", "C.K")
                .with_namespace("App")
                .with_containing_type("C")
                .with_location(loc("src/C.cs", 5))
                .with_modifiers(MemberModifiers {
                    is_const: true,
                    ..Default::default()
                }),
            method("C.m", "m", "C", "src/C.cs", 7),
        ],
        vec![reference("A.f", "C..ctor")],
    )
}

/// File A references generic method `U.Do<int>()`; `U` declares `Do<T>` once.
pub fn generic_model() -> SemanticModel {
    model(
        vec![
            document(
                "src/A.cs",
                vec!["A"],
                vec![
                    use_site("U.Do<int>", "src/A.cs", 7, "U.Do<int>();"),
                    use_site("U.Do<string>", "src/A.cs", 8, "U.Do<string>();"),
                ],
            ),
            document("src/U.cs", vec!["U"], Vec::new()),
        ],
        vec![
            class("A", "src/A.cs", vec!["A.f"]).with_syntax(class_decl(
                "src/A.cs",
                "A",
                vec![member_syntax(
                    "public void f()\n        {\n            U.Do<int>();\n            U.Do<string>();\n        }",
                    &["A.f"],
                )],
            )),
            method("A.f", "f", "A", "src/A.cs", 5),
            class("U", "src/U.cs", vec!["U.Do<T>"]).with_syntax(class_decl(
                "src/U.cs",
                "U",
                vec![member_syntax(
                    "public static void Do<T>() { }",
                    &["U.Do<T>"],
                )],
            )),
            SymbolInfo::new("U.Do<T>", SymbolKind::Method, "Do", "U.Do<T>()")
                .with_namespace("App")
                .with_containing_type("U")
                .with_location(loc("src/U.cs", 5)),
            SymbolInfo::new("U.Do<int>", SymbolKind::Method, "Do", "U.Do<int>()")
                .with_namespace("App")
                .with_containing_type("U")
                .with_original_definition("U.Do<T>"),
            SymbolInfo::new("U.Do<string>", SymbolKind::Method, "Do", "U.Do<string>()")
                .with_namespace("App")
                .with_containing_type("U")
                .with_original_definition("U.Do<T>"),
        ],
        vec![reference("A.f", "U.Do<int>"), reference("A.f", "U.Do<string>")],
    )
}

/// `A.f` uses `X.p`; `B.g` uses `X.q`; `X` declares both.
pub fn shared_type_model() -> SemanticModel {
    model(
        vec![
            document(
                "src/A.cs",
                vec!["A"],
                vec![use_site("X.p", "src/A.cs", 7, "X.p();")],
            ),
            document(
                "src/B.cs",
                vec!["B"],
                vec![use_site("X.q", "src/B.cs", 7, "X.q();")],
            ),
            document("src/X.cs", vec!["X"], Vec::new()),
        ],
        vec![
            class("A", "src/A.cs", vec!["A.f"]).with_syntax(class_decl(
                "src/A.cs",
                "A",
                vec![member_syntax(
                    "public void f()\n        {\n            X.p();\n        }",
                    &["A.f"],
                )],
            )),
            method("A.f", "f", "A", "src/A.cs", 5),
            class("B", "src/B.cs", vec!["B.g"]).with_syntax(class_decl(
                "src/B.cs",
                "B",
                vec![member_syntax(
                    "public void g()\n        {\n            X.q();\n        }",
                    &["B.g"],
                )],
            )),
            method("B.g", "g", "B", "src/B.cs", 5),
            class("X", "src/X.cs", vec!["X.p", "X.q"]).with_syntax(class_decl(
                "src/X.cs",
                "X",
                vec![
                    member_syntax("public static void p() { }", &["X.p"]),
                    member_syntax("public static void q() { }", &["X.q"]),
                ],
            )),
            method("X.p", "p", "X", "src/X.cs", 5),
            method("X.q", "q", "X", "src/X.cs", 6),
        ],
        vec![reference("A.f", "X.p"), reference("B.g", "X.q")],
    )
}

/// `A` uses both `Sys.Logger.Log` (platform namespace) and `B.g` (own code).
pub fn platform_model() -> SemanticModel {
    let mut base = two_class_model();
    base.documents[0]
        .use_sites
        .push(use_site("Logger.Log", "src/A.cs", 8, "Logger.Log(\"hi\");"));
    base.symbols.push(
        SymbolInfo::new("Logger", SymbolKind::Class, "Logger", "Sys.Logger")
            .with_namespace("Sys")
            .with_location(loc("platform/Logger.cs", 3))
            .with_members(vec!["Logger.Log".into()])
            .with_syntax(class_decl(
                "platform/Logger.cs",
                "Logger",
                vec![member_syntax(
                    "public static void Log(string message) { }",
                    &["Logger.Log"],
                )],
            )),
    );
    base.symbols.push(
        SymbolInfo::new("Logger.Log", SymbolKind::Method, "Log", "Sys.Logger.Log()")
            .with_namespace("Sys")
            .with_containing_type("Logger")
            .with_location(loc("platform/Logger.cs", 5)),
    );
    base.references.push(reference("A.f", "Logger.Log"));
    base
}

/// Cross-type chain `A.f -> B.g -> C.h`.
pub fn chain_model() -> SemanticModel {
    let mut base = two_class_model();
    base.documents.push(document("src/C.cs", vec!["C"], Vec::new()));
    base.symbols.push(
        class("C", "src/C.cs", vec!["C.h"]).with_syntax(class_decl(
            "src/C.cs",
            "C",
            vec![member_syntax("public static void h() { }", &["C.h"])],
        )),
    );
    base.symbols.push(method("C.h", "h", "C", "src/C.cs", 5));
    base.references.push(reference("B.g", "C.h"));
    base
}

pub fn find_slice<'a>(slices: &'a [FileSlice], file: &str) -> Option<&'a FileSlice> {
    slices.iter().find(|s| s.file_path == file)
}

pub fn find_def<'a>(slices: &'a [FileSlice], file: &str, symbol: &str) -> Option<&'a Definition> {
    find_slice(slices, file)?
        .definitions
        .iter()
        .find(|d| d.symbol == symbol)
}

pub fn all_keys(slices: &[FileSlice]) -> Vec<String> {
    slices
        .iter()
        .flat_map(|s| s.definitions.iter().map(|d| d.key.clone()))
        .collect()
}
