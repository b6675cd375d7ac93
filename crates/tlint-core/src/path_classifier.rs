//! Path-based classification.
//!
//! The classifier knows nothing about which category is "more specific";
//! callers hand it categories in priority order and the first category with a
//! matching pattern wins.

use crate::category::Category;
use crate::error::Result;
use crate::glob::{GlobPattern, normalize_path};

/// Ordered `(category, patterns)` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatterns {
    entries: Vec<(Category, Vec<GlobPattern>)>,
}

impl CategoryPatterns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category after those already present.
    pub fn push(&mut self, category: Category, patterns: Vec<GlobPattern>) {
        self.entries.push((category, patterns));
    }

    /// Compile and append a category's raw glob strings.
    pub fn push_globs<S: AsRef<str>>(&mut self, category: Category, globs: &[S]) -> Result<()> {
        let patterns = globs
            .iter()
            .map(|g| GlobPattern::new(g.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.push(category, patterns);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[GlobPattern])> {
        self.entries.iter().map(|(c, p)| (*c, p.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Classify `path` against the table, in table order.
pub fn classify(path: &str, patterns: &CategoryPatterns) -> Option<Category> {
    let normalized = normalize_path(path);
    patterns.iter().find_map(|(category, globs)| {
        globs
            .iter()
            .any(|glob| glob.is_match(&normalized))
            .then_some(category)
    })
}
