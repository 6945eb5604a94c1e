// Import resolution for Python modules
//
// Maps a dotted module reference to a file on disk. Candidates for
// `pkg.sub` are `pkg/sub.py` and then `pkg/sub/__init__.py`, tested against
// every directory below the search root. Instead of walking the tree on
// every lookup, the project's files are indexed once by every path suffix.

use crate::parser::ImportRecord;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Suffix index over the project's source files.
///
/// `pkg/sub/mod.py` is indexed as `mod.py` → `<root>/pkg/sub`,
/// `sub/mod.py` → `<root>/pkg` and `pkg/sub/mod.py` → `<root>`.
#[derive(Debug, Default)]
pub struct ModuleIndex {
    suffixes: HashMap<String, Vec<PathBuf>>,
}

impl ModuleIndex {
    /// Index files located under `root`; anything outside it is skipped
    pub fn build(root: &Path, files: &[PathBuf]) -> Self {
        let mut index = Self::default();

        for file in files {
            let Ok(relative) = file.strip_prefix(root) else {
                continue;
            };
            let parts: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            if parts.is_empty() {
                continue;
            }

            for start in 0..parts.len() {
                let suffix = parts[start..].join("/");
                let base = parts[..start].iter().fold(root.to_path_buf(), |acc, p| acc.join(p));
                index.suffixes.entry(suffix).or_default().push(base);
            }
        }

        index
    }

    /// Directories that contain `relative` (a forward-slash path)
    pub fn bases(&self, relative: &str) -> &[PathBuf] {
        self.suffixes.get(relative).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Candidate relative paths for a dotted module, in priority order
pub fn module_candidates(module: &str) -> [String; 2] {
    let module_path = module.replace('.', "/");
    [
        format!("{}.py", module_path),
        format!("{}/__init__.py", module_path),
    ]
}

/// Split a dot-prefixed module reference into its base module and the
/// directory to search from.
///
/// One dot searches from the importing file's directory; each extra dot
/// ascends one more level.
pub fn relative_search_root<'a>(reference: &'a str, importing_file: &Path) -> (&'a str, PathBuf) {
    let base = reference.trim_start_matches('.');
    let level = reference.len() - base.len();

    let mut dir = importing_file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    for _ in 1..level {
        if let Some(parent) = dir.parent() {
            dir = parent.to_path_buf();
        }
    }

    (base, dir)
}

/// Resolves module references to project files
pub struct ImportResolver {
    /// Project root directory
    project_root: PathBuf,
    index: ModuleIndex,
}

impl ImportResolver {
    /// Create a resolver over the project's source files
    pub fn new(project_root: PathBuf, files: &[PathBuf]) -> Self {
        let index = ModuleIndex::build(&project_root, files);
        Self {
            project_root,
            index,
        }
    }

    /// Resolve a dotted module to a file below `search_root`.
    ///
    /// Matches hanging off shallower directories win; ties go to the
    /// lexicographically smaller directory, then to `.py` over `__init__.py`.
    pub fn resolve(&self, module: &str, search_root: &Path) -> Option<PathBuf> {
        if module.is_empty() {
            return None;
        }

        let candidates = module_candidates(module);
        let root_depth = search_root.components().count();
        let mut best: Option<(usize, &Path, usize, &str)> = None;
        let mut matches = 0;

        for (rank, candidate) in candidates.iter().enumerate() {
            for base in self.index.bases(candidate) {
                if !base.starts_with(search_root) {
                    continue;
                }
                matches += 1;
                let depth = base.components().count() - root_depth;
                let key = (depth, base.as_path(), rank, candidate.as_str());
                if best.map_or(true, |b| key < b) {
                    best = Some(key);
                }
            }
        }

        let (_, base, _, candidate) = best?;
        let resolved = base.join(candidate);
        if matches > 1 {
            tracing::debug!(
                module,
                search_root = %search_root.display(),
                matches,
                resolved = %resolved.display(),
                "ambiguous module reference"
            );
        }
        Some(resolved)
    }

    /// Resolve every module an import record refers to.
    ///
    /// Plain imports resolve each dotted name against the project root.
    /// Absolute from-imports resolve their module against the project root,
    /// relative ones against the directory their dots point at.
    pub fn resolve_record(&self, record: &ImportRecord, importing_file: &Path) -> Vec<Option<PathBuf>> {
        match record.module_reference.as_deref() {
            None => record
                .imported_names
                .iter()
                .map(|name| self.resolve(name, &self.project_root))
                .collect(),
            Some(reference) if record.is_relative() => {
                let (base, search_root) = relative_search_root(reference, importing_file);
                vec![self.resolve(base, &search_root)]
            }
            Some(reference) => vec![self.resolve(reference, &self.project_root)],
        }
    }
}
