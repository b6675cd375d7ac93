//! # tlint-core
//!
//! Shared infrastructure for Temporal TypeScript lint checks.
//!
//! - [`ContextResolver`] decides whether a file is workflow, activity,
//!   worker, client, test or shared code, from its imports first and its
//!   path second.
//! - [`gate`] wraps a check's visitor callbacks so they only run on files of
//!   the category the check applies to.
//! - [`ensure_import`] computes the smallest idempotent edit that makes a
//!   named binding importable, whatever shape the existing imports have.
//! - [`Linter`] ties these together over parsed oxc programs.
//!
//! ## Example
//!
//! ```rust
//! use tlint_core::oxc::{AstType, GetSpan};
//! use tlint_core::{
//!     Applicability, Category, Check, Linter, TlintConfig, VisitorMap,
//! };
//!
//! struct NoConsole;
//!
//! impl Check for NoConsole {
//!     fn name(&self) -> &str {
//!         "no-console-in-workflow"
//!     }
//!
//!     fn applicability(&self) -> Applicability {
//!         Applicability::new(Category::Workflow)
//!     }
//!
//!     fn visitors(&self) -> VisitorMap<'_> {
//!         VisitorMap::new().on_enter(AstType::CallExpression, |ctx, node| {
//!             let diagnostic = ctx.diagnostic("use the workflow logger", node.span());
//!             ctx.report(diagnostic);
//!             Ok(())
//!         })
//!     }
//! }
//!
//! let mut linter = Linter::new(&TlintConfig::default())?.with_check(NoConsole);
//! let report = linter.lint_source(
//!     "src/workflows/order.ts",
//!     "import { sleep } from '@temporalio/workflow';\nconsole.log('hi');\n",
//! )?;
//! assert_eq!(report.diagnostics.len(), 1);
//!
//! let report = linter.lint_source("src/activities/pay.ts", "console.log('hi');\n")?;
//! assert!(report.is_clean());
//! # Ok::<(), tlint_core::LintError>(())
//! ```

pub mod category;
pub mod codemod;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod glob;
pub mod import;
#[cfg(feature = "logging")]
pub mod logging;
#[cfg(feature = "parser")]
pub mod parser;
pub mod path_classifier;
pub mod resolver;
pub mod runner;
pub mod session;
pub mod subtree;
pub mod tracker;

pub use category::{Category, ClassificationResult, Provenance};
pub use codemod::{EditKind, PendingEdit, TextEdit, ensure_import};
pub use context::{Diagnostic, RuleContext};
pub use dispatch::{
    Activation, Applicability, ClassificationSession, GatedVisitors, Handler, Phase, VisitorKey,
    VisitorMap, gate,
};
pub use error::{LintError, Result};
pub use glob::{GlobPattern, normalize_path};
pub use import::{ImportClause, ImportStatement, LocalBinding, NamedSpecifier};
#[cfg(feature = "parser")]
pub use parser::parse_program;
pub use path_classifier::{CategoryPatterns, classify};
pub use resolver::ContextResolver;
pub use runner::{Check, LintReport, Linter};
pub use session::SessionState;
pub use subtree::{FlatTree, is_function_boundary};
pub use tracker::{ImportTracker, Imported, ImportedName, ModuleImportRecord};

pub use tlint_config::{ContextConfig, ModuleSources, PathPatterns, TlintConfig};

pub mod oxc {
    //! oxc types that appear in the public API, re-exported so hosts build
    //! against the same versions.

    pub use oxc_allocator::Allocator;

    pub use oxc_ast::{AstKind, AstType, ast};

    pub use oxc_ast_visit::Visit;

    pub use oxc_span::{GetSpan, SourceType, Span};

    #[cfg(feature = "parser")]
    pub use oxc_parser::Parser;
}
