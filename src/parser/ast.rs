// Import records extracted from Python source files
//
// One record per import statement. Records are consumed by the analyzer as
// soon as a file has been parsed and are never persisted.

use serde::{Deserialize, Serialize};

/// A single `import` or `from ... import` statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportRecord {
    /// Module named after `from`, dot-prefixed for relative imports.
    /// `None` for plain `import x` statements.
    pub module_reference: Option<String>,
    /// For plain imports the dotted module paths, for from-imports the
    /// imported symbol names
    pub imported_names: Vec<String>,
}

impl ImportRecord {
    /// Create a plain `import a, b.c` record
    pub fn plain<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            module_reference: None,
            imported_names: modules.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a `from module import names` record
    pub fn from_import<I, S>(module: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            module_reference: Some(module.to_string()),
            imported_names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Is this a from-import whose module starts with one or more dots?
    pub fn is_relative(&self) -> bool {
        self.relative_level() > 0
    }

    /// Number of leading dots on the module reference
    pub fn relative_level(&self) -> usize {
        self.module_reference
            .as_deref()
            .map(|m| m.len() - m.trim_start_matches('.').len())
            .unwrap_or(0)
    }
}
