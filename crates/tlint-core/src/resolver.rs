//! Context resolution: imports first, path second.

use oxc_ast::ast::Program;
use tlint_config::{ContextConfig, ModuleSources};

use crate::category::{Category, ClassificationResult};
use crate::error::Result;
use crate::import::ImportStatement;
use crate::path_classifier::{CategoryPatterns, classify};
use crate::tracker::{ImportTracker, Imported};

/// Decides a file's [`Category`] from its imports and its path.
///
/// Import evidence is checked in a fixed order: testing, workflow, activity,
/// worker (only when the entry symbol is bound), client, then shared (type
/// imports count). Path globs are consulted only when none of those hit,
/// in the order test, workflow, activity, worker, client.
#[derive(Debug, Clone)]
pub struct ContextResolver {
    modules: ModuleSources,
    patterns: CategoryPatterns,
}

impl ContextResolver {
    pub fn new(config: &ContextConfig) -> Result<Self> {
        let paths = &config.paths;
        let mut patterns = CategoryPatterns::new();
        patterns.push_globs(Category::Test, &paths.test)?;
        patterns.push_globs(Category::Workflow, &paths.workflow)?;
        patterns.push_globs(Category::Activity, &paths.activity)?;
        patterns.push_globs(Category::Worker, &paths.worker)?;
        patterns.push_globs(Category::Client, &paths.client)?;

        Ok(Self {
            modules: config.modules.clone(),
            patterns,
        })
    }

    pub fn modules(&self) -> &ModuleSources {
        &self.modules
    }

    pub fn resolve(&self, tracker: &ImportTracker, path: &str) -> ClassificationResult {
        let result = self.resolve_inner(tracker, path);
        tracing::debug!(
            path,
            category = %result.category,
            provenance = ?result.provenance,
            "resolved file context"
        );
        result
    }

    /// Resolve with every top-level import of `program` as evidence.
    pub fn resolve_program(&self, program: &Program<'_>, path: &str) -> ClassificationResult {
        let statements = ImportStatement::collect(program);
        self.resolve(&ImportTracker::from_statements(&statements), path)
    }

    fn resolve_inner(&self, tracker: &ImportTracker, path: &str) -> ClassificationResult {
        let m = &self.modules;

        if tracker.has_value_import(&m.testing) {
            return ClassificationResult::from_imports(Category::Test);
        }
        if tracker.has_value_import(&m.workflow) {
            return ClassificationResult::from_imports(Category::Workflow);
        }
        if tracker.has_value_import(&m.activity) {
            return ClassificationResult::from_imports(Category::Activity);
        }
        if self.binds_worker_entry(tracker) {
            return ClassificationResult::from_imports(Category::Worker);
        }
        if tracker.has_value_import(&m.client) {
            return ClassificationResult::from_imports(Category::Client);
        }
        if tracker.has_any_import(&m.shared) {
            return ClassificationResult::from_imports(Category::Shared);
        }

        match classify(path, &self.patterns) {
            Some(category) => ClassificationResult::from_path(category),
            None => ClassificationResult::unknown(),
        }
    }

    // Importing only helpers (bundleWorkflowCode, NativeConnection, ...) from
    // the worker package does not make a file worker bootstrap code.
    fn binds_worker_entry(&self, tracker: &ImportTracker) -> bool {
        let entry = self.modules.worker_entry_symbol.as_str();
        tracker
            .value_bindings(&self.modules.worker)
            .iter()
            .any(|binding| match &binding.imported {
                Imported::Named(name) => name == entry,
                Imported::Namespace => true,
                Imported::Default => false,
            })
    }
}
