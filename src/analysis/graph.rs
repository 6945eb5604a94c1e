// Dependency graph accumulated during analysis
//
// Keys and targets are project-relative path ids (`./pkg/mod.py`).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Sorted snapshot of a dependency graph: source id → sorted target ids
pub type DependencyMap = BTreeMap<String, Vec<String>>;

/// File-level import graph.
///
/// Edges are only ever added. Adding an existing edge is a no-op, and
/// self-edges are recorded like any other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `source` imports `target`
    pub fn add(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.edges.entry(source.into()).or_default().insert(target.into());
    }

    /// Deterministic snapshot with sorted, deduplicated targets
    pub fn to_mapping(&self) -> DependencyMap {
        self.edges
            .iter()
            .map(|(source, targets)| (source.clone(), targets.iter().cloned().collect()))
            .collect()
    }

    /// Number of files with at least one resolved import
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }
}

/// Project-relative id of `path`: forward slashes, prefixed with `.`
///
/// `/project/pkg/mod.py` under `/project` becomes `./pkg/mod.py`. Paths
/// outside the root keep their full form.
pub fn path_id(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => {
            let mut id = String::from(".");
            for component in relative.components() {
                id.push('/');
                id.push_str(&component.as_os_str().to_string_lossy());
            }
            id
        }
        Err(_) => path.to_string_lossy().replace('\\', "/"),
    }
}
