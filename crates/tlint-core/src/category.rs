//! Operational categories a source file can belong to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The runtime environment a file is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Deterministic workflow code, run inside the workflow sandbox
    Workflow,
    /// Activity implementations
    Activity,
    /// Worker bootstrap code
    Worker,
    /// Code that starts or signals workflows through a client
    Client,
    /// Test code
    Test,
    /// Code shared between the other categories
    Shared,
    /// Nothing decided the file
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Workflow => "workflow",
            Category::Activity => "activity",
            Category::Worker => "worker",
            Category::Client => "client",
            Category::Test => "test",
            Category::Shared => "shared",
            Category::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which kind of evidence produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Provenance {
    FromImports,
    FromPath,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub provenance: Provenance,
}

impl ClassificationResult {
    pub fn from_imports(category: Category) -> Self {
        Self {
            category,
            provenance: Provenance::FromImports,
        }
    }

    pub fn from_path(category: Category) -> Self {
        Self {
            category,
            provenance: Provenance::FromPath,
        }
    }

    pub fn unknown() -> Self {
        Self {
            category: Category::Unknown,
            provenance: Provenance::None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.category != Category::Unknown
    }
}
