use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the project root when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "pydepgraph.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
    pub layout: LayoutConfig,
}

/// Analysis settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Record unparseable files and keep going instead of aborting the run
    pub skip_unparseable: bool,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write the HTML visualization
    pub visual: bool,
    /// Visualization path; `<project>/dependency_graph.html` when unset
    pub html_path: Option<PathBuf>,
    /// Document title of the visualization
    pub title: String,
}

/// Coordinate constants for the hierarchical layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical distance between nodes sharing a combo
    pub node_spacing: f64,
    /// Vertical distance between combos at the same depth
    pub combo_spacing: f64,
    /// Horizontal distance between depth levels
    pub depth_spacing: f64,
    /// Viewport center the finished layout is translated onto
    pub center_x: f64,
    pub center_y: f64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            visual: true,
            html_path: None,
            title: "Python Dependency Graph".to_string(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_spacing: 80.0,
            combo_spacing: 200.0,
            depth_spacing: 300.0,
            center_x: 800.0,
            center_y: 400.0,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    ///
    /// A missing file is silent; a file that exists but fails to load is
    /// reported and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(&mut self, output: Option<PathBuf>, no_visual: bool, skip_errors: bool) {
        if let Some(out) = output {
            self.output.html_path = Some(out);
        }

        if no_visual {
            self.output.visual = false;
        }

        if skip_errors {
            self.analysis.skip_unparseable = true;
        }
    }

    /// Where the visualization lands for a given project root
    pub fn html_path(&self, project_root: &Path) -> PathBuf {
        self.output
            .html_path
            .clone()
            .unwrap_or_else(|| project_root.join("dependency_graph.html"))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let spacings = [
            ("node_spacing", self.layout.node_spacing),
            ("combo_spacing", self.layout.combo_spacing),
            ("depth_spacing", self.layout.depth_spacing),
        ];
        for (name, value) in spacings {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::config_validation(format!(
                    "{} must be a positive number",
                    name
                )));
            }
        }

        if !self.layout.center_x.is_finite() || !self.layout.center_y.is_finite() {
            return Err(Error::config_validation("layout center must be finite"));
        }

        if self.output.title.trim().is_empty() {
            return Err(Error::config_validation("output title cannot be empty"));
        }

        Ok(())
    }
}
