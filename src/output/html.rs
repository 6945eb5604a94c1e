// HTML visualization writer
//
// Lays out the dependency mapping and writes a single self-contained page
// that hands the positioned data to the graph renderer.

use crate::analysis::DependencyMap;
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::output::layout::{GraphData, GraphLayout};
use crate::output::templates::TemplateEngine;
use std::fs;
use std::path::PathBuf;

/// Configuration for HTML generation
#[derive(Debug, Clone)]
pub struct HtmlConfig {
    /// Output file
    pub output_path: PathBuf,
    /// Document title
    pub title: String,
    /// Layout constants
    pub layout: LayoutConfig,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("dependency_graph.html"),
            title: "Python Dependency Graph".to_string(),
            layout: LayoutConfig::default(),
        }
    }
}

/// HTML visualization generator
pub struct HtmlGenerator {
    config: HtmlConfig,
    template_engine: TemplateEngine,
}

impl HtmlGenerator {
    /// Create a new HTML generator
    pub fn new(config: HtmlConfig) -> Result<Self> {
        let template_engine = TemplateEngine::new()?;
        Ok(Self {
            config,
            template_engine,
        })
    }

    /// Build the positioned graph data for a mapping
    pub fn build_graph(&self, mapping: &DependencyMap) -> GraphData {
        GraphLayout::new(self.config.layout.clone()).build(mapping)
    }

    /// Write the page, creating parent directories as needed
    pub fn generate(&self, mapping: &DependencyMap) -> Result<GenerationReport> {
        let data = self.build_graph(mapping);
        let html = self.template_engine.render_graph(&data, &self.config.title)?;

        if let Some(parent) = self.config.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.config.output_path, html)?;

        tracing::info!(path = %self.config.output_path.display(), "wrote visualization");

        Ok(GenerationReport {
            output_path: self.config.output_path.clone(),
            nodes: data.nodes.len(),
            edges: data.edges.len(),
            combos: data.combos.len(),
        })
    }
}

/// Report of what was generated
#[derive(Debug)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub nodes: usize,
    pub edges: usize,
    pub combos: usize,
}

impl GenerationReport {
    pub fn summary(&self) -> String {
        format!(
            "Rendered {} files, {} imports, {} directories",
            self.nodes, self.edges, self.combos
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_mapping() -> DependencyMap {
        let mut map = DependencyMap::new();
        map.insert(
            "./main.py".to_string(),
            vec!["./pkg/__init__.py".to_string(), "./util.py".to_string()],
        );
        map
    }

    #[test]
    fn test_html_config_default() {
        let config = HtmlConfig::default();
        assert_eq!(config.output_path, PathBuf::from("dependency_graph.html"));
        assert_eq!(config.title, "Python Dependency Graph");
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = TempDir::new().unwrap();
        let config = HtmlConfig {
            output_path: dir.path().join("out/nested/graph.html"),
            ..Default::default()
        };

        let generator = HtmlGenerator::new(config).unwrap();
        let report = generator.generate(&sample_mapping()).unwrap();

        let html = std::fs::read_to_string(&report.output_path).unwrap();
        assert!(html.contains("./pkg/__init__.py"));
        assert_eq!(report.nodes, 3);
        assert_eq!(report.edges, 2);
        assert_eq!(report.combos, 2);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let config = HtmlConfig {
            output_path: dir.path().join("graph.html"),
            ..Default::default()
        };
        let generator = HtmlGenerator::new(config).unwrap();

        let first = generator.generate(&sample_mapping()).unwrap();
        let first = std::fs::read_to_string(&first.output_path).unwrap();
        let second = generator.generate(&sample_mapping()).unwrap();
        let second = std::fs::read_to_string(&second.output_path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generation_report_summary() {
        let report = GenerationReport {
            output_path: PathBuf::from("graph.html"),
            nodes: 5,
            edges: 7,
            combos: 2,
        };

        let summary = report.summary();
        assert!(summary.contains("5 files"));
        assert!(summary.contains("7 imports"));
    }
}
