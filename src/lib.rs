//! pydepgraph - Map file-level import dependencies in Python projects
//!
//! Resolves the imports of every Python file in a project to the files
//! they name, accumulates a dependency graph, and renders it as an
//! interactive page grouped by directory.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod parser;

// Re-export main types
pub use analysis::{AnalysisResult, Analyzer, DependencyGraph, DependencyMap, ImportResolver};
pub use config::Config;
pub use error::{Error, Result};
pub use output::{DiagramGenerator, GraphData, GraphLayout, HtmlConfig, HtmlGenerator};
pub use parser::{ImportRecord, PythonParser};
