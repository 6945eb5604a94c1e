//! CLI module for pydepgraph

mod args;

pub use args::Args;

use crate::analysis::Analyzer;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::{Error, Result};
use crate::output::{DiagramGenerator, GraphLayout, HtmlConfig, HtmlGenerator};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();
    crate::logging::initialize(args.verbose);

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Status lines go to stdout unless stdout carries the JSON graph
struct Status {
    to_stderr: bool,
}

impl Status {
    fn line(&self, msg: impl AsRef<str>) {
        if self.to_stderr {
            eprintln!("{}", msg.as_ref());
        } else {
            println!("{}", msg.as_ref());
        }
    }
}

fn execute(args: Args) -> Result<()> {
    let status = Status { to_stderr: args.json };
    let path = args.project_path;

    if !path.exists() {
        return Err(Error::PathNotFound(path));
    }
    if !path.is_dir() {
        return Err(Error::InvalidPath(path));
    }

    // Load config file if it exists
    let mut cfg = match &args.config {
        Some(config_path) => Config::load(config_path)?,
        None => Config::load_or_default(&path.join(DEFAULT_CONFIG_FILE)),
    };

    // Merge CLI arguments (CLI takes precedence)
    cfg.merge_cli(args.output, args.no_visual, args.skip_errors);

    if args.verbose {
        status.line(format!("Analyzing: {}", path.display()));
        status.line(format!("Visualization: {}", cfg.output.visual));
        status.line(format!("Skip unparseable: {}", cfg.analysis.skip_unparseable));
    }

    let mut analyzer = Analyzer::new(cfg.clone())?.with_verbose(args.verbose);
    let analysis = analyzer.analyze(&path)?;
    let mapping = analysis.graph.to_mapping();

    if args.verbose {
        status.line(format!(
            "Analyzed {} files: {} imports resolved, {} unresolved",
            analysis.files_analyzed,
            analysis.graph.edge_count(),
            analysis.unresolved_imports
        ));
    }

    if !analysis.parse_errors.is_empty() {
        status.line(format!("\nSkipped unparseable files ({}):", analysis.parse_errors.len()));
        for (file, err) in analysis.parse_errors.iter().take(5) {
            status.line(format!("  {}: {}", file.display(), err));
        }
        if analysis.parse_errors.len() > 5 {
            status.line(format!("  ... and {} more", analysis.parse_errors.len() - 5));
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&mapping)?);
    }

    if let Some(json_path) = &args.json_file {
        write_file(json_path, &serde_json::to_string_pretty(&mapping)?)?;
        status.line(format!("JSON saved to {}", json_path.display()));
    }

    if cfg.output.visual {
        let html_config = HtmlConfig {
            output_path: cfg.html_path(&analysis.root),
            title: cfg.output.title.clone(),
            layout: cfg.layout.clone(),
        };
        let generator = HtmlGenerator::new(html_config)?;
        let report = generator.generate(&mapping)?;

        if args.verbose {
            status.line(report.summary());
        }
        status.line(format!("Visualization written to {}", report.output_path.display()));
    }

    if let Some(mermaid_path) = &args.mermaid {
        let data = GraphLayout::new(cfg.layout.clone()).build(&mapping);
        let diagram = DiagramGenerator::new().generate_dependency_graph(&data);
        write_file(mermaid_path, &diagram)?;
        status.line(format!("Mermaid diagram saved to {}", mermaid_path.display()));
    }

    status.line(format!(
        "Analysis completed. Found {} Python files with dependencies.",
        analysis.graph.len()
    ));

    Ok(())
}

/// Write a file, creating parent directories as needed
fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)?;
    Ok(())
}
