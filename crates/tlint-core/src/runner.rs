//! Drives gated checks over parsed programs.

use oxc_ast::{AstKind, ast::Program};
use oxc_ast_visit::Visit;
use serde::Serialize;
use tlint_config::TlintConfig;

use crate::context::{Diagnostic, RuleContext};
use crate::dispatch::{Applicability, GatedVisitors, Phase, VisitorKey, VisitorMap, gate};
use crate::error::{LintError, Result};
use crate::import::ImportStatement;
use crate::resolver::ContextResolver;
use crate::session::SessionState;
use crate::subtree::FlatTree;

/// A single-purpose inspection over the syntax tree.
pub trait Check {
    /// Stable rule name used in diagnostics.
    fn name(&self) -> &str;

    fn applicability(&self) -> Applicability;

    /// Fresh callbacks for one file.
    fn visitors(&self) -> VisitorMap<'_>;
}

/// Findings for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintReport {
    pub path: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Runs a set of checks over files, one at a time.
///
/// ```rust
/// use tlint_core::{Linter, TlintConfig};
///
/// let mut linter = Linter::new(&TlintConfig::default())?;
/// linter.begin_run();
/// let report = linter.lint_source("src/workflows/order.ts", "export const x = 1;")?;
/// assert!(report.is_clean());
/// # Ok::<(), tlint_core::LintError>(())
/// ```
pub struct Linter {
    resolver: ContextResolver,
    checks: Vec<Box<dyn Check>>,
    session: SessionState,
}

impl Linter {
    pub fn new(config: &TlintConfig) -> Result<Self> {
        Ok(Self {
            resolver: ContextResolver::new(&config.context)?,
            checks: Vec::new(),
            session: SessionState::new(),
        })
    }

    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        self.add_check(Box::new(check));
        self
    }

    pub fn add_check(&mut self, check: Box<dyn Check>) {
        tracing::debug!(check = check.name(), "registered check");
        self.checks.push(check);
    }

    pub fn resolver(&self) -> &ContextResolver {
        &self.resolver
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Start a new run, forgetting run-scoped state such as reported-once keys.
    pub fn begin_run(&mut self) {
        self.session.reset();
    }

    /// Run every check over `program`, parsed from `source_text` at `path`.
    ///
    /// The first error raised by a check stops dispatch and is returned as is.
    pub fn lint_program(
        &mut self,
        path: &str,
        source_text: &str,
        program: &Program<'_>,
    ) -> Result<LintReport> {
        let imports = ImportStatement::collect(program);
        let tree = FlatTree::build(program);
        let gated = self
            .checks
            .iter()
            .map(|check| (check.name(), gate(check.visitors(), check.applicability())))
            .collect();

        let mut dispatcher = Dispatcher {
            gated,
            resolver: &self.resolver,
            session: &mut self.session,
            path,
            source_text,
            imports: &imports,
            tree: &tree,
            diagnostics: Vec::new(),
            error: None,
        };
        dispatcher.visit_program(program);

        if let Some(err) = dispatcher.error {
            return Err(err);
        }
        tracing::debug!(
            path,
            diagnostics = dispatcher.diagnostics.len(),
            "linted file"
        );
        Ok(LintReport {
            path: path.to_string(),
            diagnostics: dispatcher.diagnostics,
        })
    }

    /// Parse `source_text` and lint it.
    #[cfg(feature = "parser")]
    pub fn lint_source(&mut self, path: &str, source_text: &str) -> Result<LintReport> {
        let allocator = oxc_allocator::Allocator::default();
        let program = crate::parser::parse_program(&allocator, path, source_text)?;
        self.lint_program(path, source_text, &program)
    }
}

struct Dispatcher<'d, 'a> {
    gated: Vec<(&'d str, GatedVisitors<'d>)>,
    resolver: &'d ContextResolver,
    session: &'d mut SessionState,
    path: &'d str,
    source_text: &'d str,
    imports: &'d [ImportStatement],
    tree: &'d FlatTree<'a>,
    diagnostics: Vec<Diagnostic>,
    error: Option<LintError>,
}

impl<'a> Dispatcher<'_, 'a> {
    fn dispatch(&mut self, key: VisitorKey, node: AstKind<'a>) {
        if self.error.is_some() {
            return;
        }
        for (rule, gated) in &mut self.gated {
            if !gated.wants(key) {
                continue;
            }
            let mut ctx = RuleContext {
                rule: *rule,
                path: self.path,
                source_text: self.source_text,
                imports: self.imports,
                tree: self.tree,
                session: &mut *self.session,
                diagnostics: &mut self.diagnostics,
            };
            if let Err(err) = gated.handle(key, node, self.resolver, &mut ctx) {
                tracing::trace!(rule = *rule, "check returned an error");
                self.error = Some(err);
                return;
            }
        }
    }
}

impl<'a> Visit<'a> for Dispatcher<'_, 'a> {
    fn enter_node(&mut self, kind: AstKind<'a>) {
        self.dispatch(
            VisitorKey {
                ty: kind.ty(),
                phase: Phase::Enter,
            },
            kind,
        );
    }

    fn leave_node(&mut self, kind: AstKind<'a>) {
        self.dispatch(
            VisitorKey {
                ty: kind.ty(),
                phase: Phase::Exit,
            },
            kind,
        );
    }
}
