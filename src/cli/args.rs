//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Analyze Python file dependencies in a project and generate a dependency graph
#[derive(Parser, Debug)]
#[command(name = "pydepgraph")]
#[command(about = "Analyze Python file dependencies in a project and generate a dependency graph")]
#[command(version)]
pub struct Args {
    /// Path to the Python project to analyze
    #[arg(default_value = ".")]
    pub project_path: PathBuf,

    /// Disable HTML visualization generation
    #[arg(long)]
    pub no_visual: bool,

    /// Output path for the visualization (default: dependency_graph.html in the project)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the dependency graph as JSON to stdout
    #[arg(short, long)]
    pub json: bool,

    /// Save the dependency graph as JSON to this file
    #[arg(long)]
    pub json_file: Option<PathBuf>,

    /// Save a Mermaid flowchart of the graph to this file
    #[arg(long)]
    pub mermaid: Option<PathBuf>,

    /// Config file path (default: pydepgraph.toml in the project)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip files that fail to parse instead of aborting
    #[arg(long)]
    pub skip_errors: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
