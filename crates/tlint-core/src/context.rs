//! What a check sees while it runs over one file.

use oxc_ast::AstKind;
use oxc_span::Span;
use serde::Serialize;

use crate::codemod::{PendingEdit, TextEdit, ensure_import, serialize_span};
use crate::import::ImportStatement;
use crate::session::SessionState;
use crate::subtree::FlatTree;

/// A finding reported by a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub rule: String,
    pub message: String,
    #[serde(serialize_with = "serialize_span")]
    pub span: Span,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<TextEdit>,
}

impl Diagnostic {
    pub fn new(rule: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
            span,
            fix: None,
        }
    }

    pub fn with_fix(mut self, fix: impl Into<Option<TextEdit>>) -> Self {
        self.fix = fix.into();
        self
    }
}

/// Per-callback view of the file being linted.
pub struct RuleContext<'r, 'a> {
    pub(crate) rule: &'r str,
    pub(crate) path: &'r str,
    pub(crate) source_text: &'r str,
    pub(crate) imports: &'r [ImportStatement],
    pub(crate) tree: &'r FlatTree<'a>,
    pub(crate) session: &'r mut SessionState,
    pub(crate) diagnostics: &'r mut Vec<Diagnostic>,
}

impl<'r, 'a> RuleContext<'r, 'a> {
    /// Name of the running check.
    pub fn rule(&self) -> &str {
        self.rule
    }

    pub fn path(&self) -> &str {
        self.path
    }

    pub fn source_text(&self) -> &str {
        self.source_text
    }

    /// Top-level imports of the file, in source order.
    pub fn imports(&self) -> &[ImportStatement] {
        self.imports
    }

    /// A diagnostic attributed to the running check.
    pub fn diagnostic(&self, message: impl Into<String>, span: Span) -> Diagnostic {
        Diagnostic::new(self.rule, message, span)
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Report unless this check already reported `key` during the run.
    ///
    /// Returns whether the diagnostic was recorded.
    pub fn report_once(&mut self, key: &str, diagnostic: Diagnostic) -> bool {
        if !self.session.first_report(self.rule, key) {
            return false;
        }
        self.diagnostics.push(diagnostic);
        true
    }

    /// Edit that makes `specifier` importable from `source` in this file.
    pub fn ensure_import(&self, source: &str, specifier: &str) -> PendingEdit {
        ensure_import(self.source_text, self.imports, source, specifier)
    }

    /// Whether `node` or anything under it matches `predicate`, not looking
    /// into nested functions.
    pub fn any_within(&self, node: AstKind<'a>, predicate: impl FnMut(AstKind<'a>) -> bool) -> bool {
        self.tree
            .find(node)
            .is_some_and(|id| self.tree.any_within_function(id, predicate))
    }

    /// Nearest enclosing node of `node`.
    pub fn parent(&self, node: AstKind<'a>) -> Option<AstKind<'a>> {
        let id = self.tree.find(node)?;
        self.tree.kind(self.tree.parent(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codemod::EditKind;

    #[test]
    fn diagnostics_serialize_without_empty_fix() {
        let diagnostic = Diagnostic::new("no-date", "use workflow time", Span::new(4, 12));
        let value = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(value["rule"], "no-date");
        assert_eq!(value["span"]["end"], 12);
        assert!(value.get("fix").is_none());
    }

    #[test]
    fn fixes_attach() {
        let fix = TextEdit::insert(0, "import { a } from 'M';\n", EditKind::InsertStatement);
        let diagnostic = Diagnostic::new("r", "m", Span::default()).with_fix(fix.clone());
        assert_eq!(diagnostic.fix, Some(fix));

        let pending = PendingEdit::NoEdit;
        let diagnostic = Diagnostic::new("r", "m", Span::default()).with_fix(pending.into_edit());
        assert!(diagnostic.fix.is_none());
    }
}
