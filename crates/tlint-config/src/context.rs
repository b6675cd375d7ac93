//! Classification inputs: which package defines each category, and which
//! path globs stand in for it when a file's imports are inconclusive.

use serde::{Deserialize, Serialize};

pub const DEFAULT_WORKFLOW_MODULE: &str = "@temporalio/workflow";
pub const DEFAULT_ACTIVITY_MODULE: &str = "@temporalio/activity";
pub const DEFAULT_WORKER_MODULE: &str = "@temporalio/worker";
pub const DEFAULT_CLIENT_MODULE: &str = "@temporalio/client";
pub const DEFAULT_TESTING_MODULE: &str = "@temporalio/testing";
pub const DEFAULT_SHARED_MODULE: &str = "@temporalio/common";

/// Symbol a worker module import must bind for the file to count as worker code.
pub const DEFAULT_WORKER_ENTRY_SYMBOL: &str = "Worker";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    #[serde(default)]
    pub modules: ModuleSources,

    #[serde(default)]
    pub paths: PathPatterns,
}

/// Module source strings identifying each category's defining dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleSources {
    pub workflow: String,
    pub activity: String,
    pub worker: String,
    pub client: String,
    pub testing: String,
    pub shared: String,
    pub worker_entry_symbol: String,
}

impl Default for ModuleSources {
    fn default() -> Self {
        Self {
            workflow: DEFAULT_WORKFLOW_MODULE.to_string(),
            activity: DEFAULT_ACTIVITY_MODULE.to_string(),
            worker: DEFAULT_WORKER_MODULE.to_string(),
            client: DEFAULT_CLIENT_MODULE.to_string(),
            testing: DEFAULT_TESTING_MODULE.to_string(),
            shared: DEFAULT_SHARED_MODULE.to_string(),
            worker_entry_symbol: DEFAULT_WORKER_ENTRY_SYMBOL.to_string(),
        }
    }
}

/// Glob patterns used for path-based fallback classification.
///
/// Each list is ordered; within a list the first matching pattern wins, but
/// the lists themselves are evaluated test, workflow, activity, worker, client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathPatterns {
    pub test: Vec<String>,
    pub workflow: Vec<String>,
    pub activity: Vec<String>,
    pub worker: Vec<String>,
    pub client: Vec<String>,
}

impl Default for PathPatterns {
    fn default() -> Self {
        Self {
            test: patterns(&[
                "**/*.test.ts",
                "**/*.spec.ts",
                "**/*.test.js",
                "**/*.spec.js",
                "**/__tests__/**",
                "**/test/**",
                "**/tests/**",
            ]),
            workflow: patterns(&[
                "**/workflows/**",
                "**/workflows.ts",
                "**/workflow.ts",
                "**/workflows.js",
                "**/workflow.js",
            ]),
            activity: patterns(&[
                "**/activities/**",
                "**/activities.ts",
                "**/activity.ts",
                "**/activities.js",
                "**/activity.js",
            ]),
            worker: patterns(&["**/worker.ts", "**/worker/**", "**/workers/**", "**/worker.js"]),
            client: patterns(&["**/client.ts", "**/client/**", "**/clients/**", "**/client.js"]),
        }
    }
}

fn patterns(list: &[&str]) -> Vec<String> {
    list.iter().map(|p| p.to_string()).collect()
}
