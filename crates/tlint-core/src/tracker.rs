//! Per-file record of what each module source contributes.
//!
//! Multiple statements from the same source merge into one
//! [`ModuleImportRecord`]. A record stays type-only only while every
//! statement that contributed to it was `import type`.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::import::{ImportClause, ImportStatement};

/// What a binding pulls out of its module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "camelCase")]
pub enum Imported {
    Named(String),
    Default,
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedName {
    pub imported: Imported,
    pub local: String,
    pub is_type_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleImportRecord {
    pub source: String,
    /// Bindings in first-appearance order; `imported` is unique.
    pub specifiers: Vec<ImportedName>,
    pub is_type_only: bool,
}

impl ModuleImportRecord {
    fn new(source: &str, is_type_only: bool) -> Self {
        Self {
            source: source.to_string(),
            specifiers: Vec::new(),
            is_type_only,
        }
    }

    fn merge(&mut self, binding: ImportedName) {
        match self
            .specifiers
            .iter_mut()
            .find(|existing| existing.imported == binding.imported)
        {
            Some(existing) => {
                if existing.is_type_only && !binding.is_type_only {
                    existing.is_type_only = false;
                    existing.local = binding.local;
                }
            }
            None => self.specifiers.push(binding),
        }
    }

    fn binding(&self, imported: &Imported) -> Option<&ImportedName> {
        self.specifiers.iter().find(|b| &b.imported == imported)
    }
}

/// Import evidence for one file.
#[derive(Debug, Clone, Default)]
pub struct ImportTracker {
    records: FxHashMap<String, ModuleImportRecord>,
    order: Vec<String>,
}

impl ImportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tracker that has seen every statement in `statements`.
    pub fn from_statements<'s>(statements: impl IntoIterator<Item = &'s ImportStatement>) -> Self {
        let mut tracker = Self::new();
        for statement in statements {
            tracker.observe(statement);
        }
        tracker
    }

    pub fn observe(&mut self, statement: &ImportStatement) {
        let source = statement.source.as_str();
        if !self.records.contains_key(source) {
            self.order.push(source.to_string());
        }
        let record = self
            .records
            .entry(source.to_string())
            .or_insert_with(|| ModuleImportRecord::new(source, statement.type_only));
        if !statement.type_only {
            record.is_type_only = false;
        }

        for binding in bindings_of(statement) {
            record.merge(binding);
        }

        tracing::trace!(
            source,
            bindings = record.specifiers.len(),
            type_only = record.is_type_only,
            "observed import"
        );
    }

    pub fn record(&self, source: &str) -> Option<&ModuleImportRecord> {
        self.records.get(source)
    }

    /// Records in first-observation order.
    pub fn records(&self) -> impl Iterator<Item = &ModuleImportRecord> {
        self.order.iter().filter_map(|source| self.records.get(source))
    }

    /// Local name bound to `imported` from `source`.
    ///
    /// Only named bindings answer; a namespace import binds `ns`, not `imported`.
    pub fn query(&self, source: &str, imported: &str) -> Option<&str> {
        self.record(source)?
            .binding(&Imported::Named(imported.to_string()))
            .map(|b| b.local.as_str())
    }

    /// Local name of a namespace import of `source`, if any.
    pub fn namespace_local(&self, source: &str) -> Option<&str> {
        self.record(source)?
            .binding(&Imported::Namespace)
            .map(|b| b.local.as_str())
    }

    pub fn is_type_only_binding(&self, source: &str, imported: &str) -> bool {
        self.record(source)
            .and_then(|r| r.binding(&Imported::Named(imported.to_string())))
            .is_some_and(|b| b.is_type_only)
    }

    /// Whether anything at all was imported from `source`, `import type` and
    /// side-effect imports included.
    pub fn has_any_import(&self, source: &str) -> bool {
        self.records.contains_key(source)
    }

    /// Whether `source` contributes something at runtime.
    pub fn has_value_import(&self, source: &str) -> bool {
        self.record(source).is_some_and(|r| {
            !r.is_type_only
                && (r.specifiers.is_empty() || r.specifiers.iter().any(|b| !b.is_type_only))
        })
    }

    pub fn value_bindings(&self, source: &str) -> Vec<&ImportedName> {
        match self.record(source) {
            Some(record) if !record.is_type_only => record
                .specifiers
                .iter()
                .filter(|b| !b.is_type_only)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Clear all evidence, ready for the next file.
    pub fn clear(&mut self) {
        self.records.clear();
        self.order.clear();
    }
}

fn bindings_of(statement: &ImportStatement) -> Vec<ImportedName> {
    let whole = statement.type_only;
    let plain = |imported: Imported, local: &str| ImportedName {
        imported,
        local: local.to_string(),
        is_type_only: whole,
    };

    match &statement.clause {
        ImportClause::SideEffectOnly => Vec::new(),
        ImportClause::Default(binding) => vec![plain(Imported::Default, &binding.local)],
        ImportClause::Namespace { default, namespace } => default
            .iter()
            .map(|d| plain(Imported::Default, &d.local))
            .chain(std::iter::once(plain(Imported::Namespace, &namespace.local)))
            .collect(),
        ImportClause::Named {
            default,
            specifiers,
        } => default
            .iter()
            .map(|d| plain(Imported::Default, &d.local))
            .chain(specifiers.iter().map(|s| ImportedName {
                imported: Imported::Named(s.imported.clone()),
                local: s.local.clone(),
                is_type_only: whole || s.type_only,
            }))
            .collect(),
    }
}
