//! Owned view of ES import declarations.
//!
//! The tracker and the codemod engine both work from this representation
//! rather than from the borrowed oxc nodes, so it can outlive the arena and
//! be constructed by hand in tests.

use oxc_ast::ast::{ImportDeclaration, ImportDeclarationSpecifier, Program, Statement};
use oxc_span::Span;
use serde::Serialize;

/// A binding that only carries a local name (`import D`, `import * as ns`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalBinding {
    pub local: String,
    #[serde(skip)]
    pub span: Span,
}

/// `{ imported as local }`, optionally `type`-qualified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedSpecifier {
    pub imported: String,
    pub local: String,
    pub type_only: bool,
    #[serde(skip)]
    pub span: Span,
}

/// The shapes an import clause can take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ImportClause {
    /// `import 'polyfill'`
    SideEffectOnly,
    /// `import D from 'mod'`
    Default(LocalBinding),
    /// `import * as ns from 'mod'`, optionally `import D, * as ns from 'mod'`
    Namespace {
        default: Option<LocalBinding>,
        namespace: LocalBinding,
    },
    /// `import { a, b as c } from 'mod'`, optionally preceded by a default
    /// binding. `specifiers` is empty for `import {} from 'mod'`.
    Named {
        default: Option<LocalBinding>,
        specifiers: Vec<NamedSpecifier>,
    },
}

/// One import declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportStatement {
    pub source: String,
    /// `import type ...`
    pub type_only: bool,
    pub clause: ImportClause,
    #[serde(skip)]
    pub span: Span,
}

impl ImportStatement {
    pub fn from_declaration(decl: &ImportDeclaration<'_>) -> Self {
        let mut default = None;
        let mut namespace = None;
        let mut named = Vec::new();
        let mut has_brace_list = false;

        if let Some(specifiers) = &decl.specifiers {
            for spec in specifiers {
                match spec {
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                        default = Some(LocalBinding {
                            local: s.local.name.to_string(),
                            span: s.span,
                        });
                    }
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                        namespace = Some(LocalBinding {
                            local: s.local.name.to_string(),
                            span: s.span,
                        });
                    }
                    ImportDeclarationSpecifier::ImportSpecifier(s) => {
                        named.push(NamedSpecifier {
                            imported: s.imported.name().to_string(),
                            local: s.local.name.to_string(),
                            type_only: s.import_kind.is_type(),
                            span: s.span,
                        });
                    }
                }
            }
            // `import {} from 'mod'` has specifiers but no bindings
            has_brace_list = specifiers.is_empty();
        }

        let clause = match (default, namespace, named.is_empty()) {
            (default, Some(namespace), _) => ImportClause::Namespace { default, namespace },
            (default, None, false) => ImportClause::Named {
                default,
                specifiers: named,
            },
            (Some(default), None, true) => ImportClause::Default(default),
            (None, None, true) if has_brace_list => ImportClause::Named {
                default: None,
                specifiers: Vec::new(),
            },
            (None, None, true) => ImportClause::SideEffectOnly,
        };

        Self {
            source: decl.source.value.to_string(),
            type_only: decl.import_kind.is_type(),
            clause,
            span: decl.span,
        }
    }

    /// All top-level import declarations of a program, in source order.
    pub fn collect(program: &Program<'_>) -> Vec<Self> {
        program
            .body
            .iter()
            .filter_map(|stmt| match stmt {
                Statement::ImportDeclaration(decl) => Some(Self::from_declaration(decl)),
                _ => None,
            })
            .collect()
    }

    pub fn has_namespace(&self) -> bool {
        matches!(self.clause, ImportClause::Namespace { .. })
    }

    /// Whether the export `name` is in scope as `name` at the value level.
    ///
    /// A namespace binding does not count: it exposes `ns.name`, not `name`.
    /// Neither does an alias: `{ name as other }` leaves `name` unbound.
    pub fn binds_value(&self, name: &str) -> bool {
        if self.type_only {
            return false;
        }
        match &self.clause {
            ImportClause::Named { specifiers, .. } => specifiers
                .iter()
                .any(|s| s.imported == name && s.local == name && !s.type_only),
            _ => false,
        }
    }

    /// Whether this statement declares a local binding called `local`,
    /// whatever it imports.
    pub fn declares_local(&self, local: &str) -> bool {
        match &self.clause {
            ImportClause::SideEffectOnly => false,
            ImportClause::Default(binding) => binding.local == local,
            ImportClause::Namespace { default, namespace } => {
                namespace.local == local || default.as_ref().is_some_and(|d| d.local == local)
            }
            ImportClause::Named { default, specifiers } => {
                default.as_ref().is_some_and(|d| d.local == local)
                    || specifiers.iter().any(|s| s.local == local)
            }
        }
    }
}
