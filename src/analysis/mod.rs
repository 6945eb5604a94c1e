// Analysis module: discovers files, extracts imports and builds the graph

pub mod files;
pub mod graph;
pub mod imports;

pub use files::*;
pub use graph::*;
pub use imports::*;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::parser::PythonParser;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Result of analyzing a project
#[derive(Debug)]
pub struct AnalysisResult {
    /// Canonical project root every id is relative to
    pub root: PathBuf,
    /// Resolved file-level imports
    pub graph: DependencyGraph,
    /// Number of source files examined
    pub files_analyzed: usize,
    /// Module references that matched no project file
    pub unresolved_imports: usize,
    /// Files skipped because they failed to parse (only when skipping is enabled)
    pub parse_errors: BTreeMap<PathBuf, String>,
}

/// Main analyzer that orchestrates the analysis pipeline
pub struct Analyzer {
    config: Config,
    parser: PythonParser,
    verbose: bool,
}

impl Analyzer {
    /// Create a new analyzer with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        let parser = PythonParser::new()?;

        Ok(Self {
            config,
            parser,
            verbose: false,
        })
    }

    /// Create analyzer with verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Analyze the project at the given path
    pub fn analyze(&mut self, root: &Path) -> Result<AnalysisResult> {
        let root = validate_root(root)?;

        // Step 1: Discover Python files
        let files = discover_source_files(&root)?;
        tracing::info!(root = %root.display(), files = files.len(), "discovered source files");

        // Step 2: Index them for module resolution
        let resolver = ImportResolver::new(root.clone(), &files);

        // Step 3: Extract, resolve and accumulate
        let mut graph = DependencyGraph::new();
        let mut parse_errors = BTreeMap::new();
        let mut unresolved_imports = 0;

        let progress = if self.verbose {
            let pb = ProgressBar::new(files.len() as u64);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .map_err(|e| Error::other(format!("Invalid progress template: {}", e)))?
                .progress_chars("#>-");
            pb.set_style(style);
            Some(pb)
        } else {
            None
        };

        for file in &files {
            if let Some(ref pb) = progress {
                let msg = file.file_name().unwrap_or_default().to_string_lossy().to_string();
                pb.set_message(msg);
                pb.inc(1);
            }

            let records = match self.parser.parse_file(file) {
                Ok(records) => records,
                Err(e @ Error::Parse { .. }) if self.config.analysis.skip_unparseable => {
                    tracing::warn!(file = %file.display(), error = %e, "skipping unparseable file");
                    parse_errors.insert(file.clone(), e.to_string());
                    continue;
                }
                Err(e) => {
                    if let Some(pb) = progress {
                        pb.abandon();
                    }
                    return Err(e);
                }
            };

            let source_id = path_id(&root, file);
            for record in &records {
                for resolved in resolver.resolve_record(record, file) {
                    match resolved {
                        Some(target) => graph.add(source_id.clone(), path_id(&root, &target)),
                        None => {
                            unresolved_imports += 1;
                            tracing::debug!(file = %source_id, import = ?record, "unresolved import");
                        }
                    }
                }
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("Analysis complete");
        }

        Ok(AnalysisResult {
            root,
            graph,
            files_analyzed: files.len(),
            unresolved_imports,
            parse_errors,
        })
    }
}

/// Reject missing and non-directory roots, then canonicalize
fn validate_root(root: &Path) -> Result<PathBuf> {
    if !root.exists() {
        return Err(Error::PathNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(Error::InvalidPath(root.to_path_buf()));
    }
    Ok(root.canonicalize()?)
}
