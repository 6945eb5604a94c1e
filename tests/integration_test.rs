// Integration tests for pydepgraph

use assert_cmd::Command;
use predicates::prelude::*;
use pydepgraph::{Analyzer, Config, DependencyMap, GraphLayout, HtmlConfig, HtmlGenerator};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixtures_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

// Helper to create an analyzer with default config
fn create_analyzer() -> Analyzer {
    Analyzer::new(Config::default()).expect("Failed to create analyzer")
}

fn expected_sample_mapping() -> DependencyMap {
    let edges: &[(&str, &[&str])] = &[
        ("./app/__init__.py", &["./app/models.py"]),
        ("./app/models.py", &["./app/base.py"]),
        ("./app/services/users.py", &["./app/base.py", "./app/models.py"]),
        ("./main.py", &["./app/__init__.py", "./app/models.py"]),
    ];
    edges
        .iter()
        .map(|(source, targets)| {
            (source.to_string(), targets.iter().map(|t| t.to_string()).collect())
        })
        .collect()
}

fn write_project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
    }
    dir
}

fn pydepgraph() -> Command {
    Command::cargo_bin("pydepgraph").unwrap()
}

// ============================================================================
// Analysis Tests
// ============================================================================

#[test]
fn test_analyze_sample_project() {
    let mut analyzer = create_analyzer();
    let result = analyzer
        .analyze(&fixtures_path("sample_project"))
        .expect("Analysis failed");

    assert_eq!(result.graph.to_mapping(), expected_sample_mapping());
    assert_eq!(result.files_analyzed, 6);
    assert!(result.parse_errors.is_empty());
    // os, requests, dataclasses and `from . import helpers`
    assert_eq!(result.unresolved_imports, 4);
}

#[test]
fn test_analyze_ignores_build_directories() {
    let dir = write_project(&[
        ("main.py", "import generated\nimport cached\n"),
        ("build/generated.py", ""),
        ("__pycache__/cached.py", ""),
        ("src/.git/hooks.py", ""),
    ]);

    let result = create_analyzer().analyze(dir.path()).unwrap();
    assert!(result.graph.is_empty());
    assert_eq!(result.files_analyzed, 1);
}

#[test]
fn test_sample_layout_is_complete() {
    let mut analyzer = create_analyzer();
    let result = analyzer.analyze(&fixtures_path("sample_project")).unwrap();
    let data = GraphLayout::default().build(&result.graph.to_mapping());

    assert_eq!(data.nodes.len(), 5);
    assert_eq!(data.edges.len(), 6);

    let combo_ids: Vec<&str> = data.combos.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(combo_ids, vec![".", "./app", "./app/services"]);

    for node in &data.nodes {
        let combo = node.combo.as_deref().expect("node without combo");
        assert_eq!(data.combos.iter().filter(|c| c.id == combo).count(), 1);
    }
    for combo in &data.combos {
        if let Some(parent) = &combo.combo {
            assert!(combo_ids.contains(&parent.as_str()));
        }
    }
}

// ============================================================================
// HTML Generation Tests
// ============================================================================

#[test]
fn test_html_generation() {
    let mut analyzer = create_analyzer();
    let result = analyzer.analyze(&fixtures_path("sample_project")).unwrap();

    let output_dir = TempDir::new().unwrap();
    let html_config = HtmlConfig {
        output_path: output_dir.path().join("graph.html"),
        title: "Sample".to_string(),
        ..Default::default()
    };

    let generator = HtmlGenerator::new(html_config).unwrap();
    let report = generator.generate(&result.graph.to_mapping()).unwrap();

    let html = fs::read_to_string(&report.output_path).unwrap();
    assert!(html.contains("<title>Sample</title>"));
    assert!(html.contains("./app/services/users.py->./app/base.py"));
    assert!(html.contains("\"combo\": \"./app\""));
}

// ============================================================================
// CLI Tests
// ============================================================================

#[test]
fn test_cli_json_stdout() {
    let output = pydepgraph()
        .arg(fixtures_path("sample_project"))
        .args(["--json", "--no-visual"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let mapping: DependencyMap = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(mapping, expected_sample_mapping());
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Found 4 Python files with dependencies"));
}

#[test]
fn test_cli_output_is_deterministic() {
    let run = || {
        pydepgraph()
            .arg(fixtures_path("sample_project"))
            .args(["--json", "--no-visual"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_cli_writes_visualization() {
    let out = TempDir::new().unwrap();
    let html_path = out.path().join("viz/deps.html");

    pydepgraph()
        .arg(fixtures_path("sample_project"))
        .arg("--output")
        .arg(&html_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Visualization written to"));

    let html = fs::read_to_string(&html_path).unwrap();
    assert!(html.contains("new G6.Graph"));
    assert!(html.contains("./main.py->./app/__init__.py"));
}

#[test]
fn test_cli_default_visualization_in_project() {
    let dir = write_project(&[("a.py", "import b\n"), ("b.py", "")]);

    pydepgraph().arg(dir.path()).assert().success();

    assert!(dir.path().join("dependency_graph.html").exists());
}

#[test]
fn test_cli_json_file_and_mermaid() {
    let dir = write_project(&[("a.py", "import pkg.b\n"), ("pkg/__init__.py", ""), ("pkg/b.py", "")]);
    let out = TempDir::new().unwrap();
    let json_path = out.path().join("nested/graph.json");
    let mermaid_path = out.path().join("graph.mmd");

    pydepgraph()
        .arg(dir.path())
        .arg("--no-visual")
        .arg("--json-file")
        .arg(&json_path)
        .arg("--mermaid")
        .arg(&mermaid_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("JSON saved to"));

    let json = fs::read_to_string(&json_path).unwrap();
    assert_eq!(json, "{\n  \"./a.py\": [\n    \"./pkg/b.py\"\n  ]\n}");

    let mermaid = fs::read_to_string(&mermaid_path).unwrap();
    assert!(mermaid.starts_with("flowchart LR"));
    assert!(mermaid.contains("subgraph"));
    assert!(!dir.path().join("dependency_graph.html").exists());
}

#[test]
fn test_cli_missing_path() {
    pydepgraph()
        .arg("/nonexistent/project/path")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_cli_path_is_file() {
    let file = fixtures_path("sample_project").join("main.py");
    pydepgraph()
        .arg(&file)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn test_cli_unparseable_file_aborts() {
    let dir = write_project(&[("a.py", "import b\n"), ("b.py", "class (:\n")]);

    pydepgraph()
        .arg(dir.path())
        .args(["--json", "--no-visual"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn test_cli_skip_errors() {
    let dir = write_project(&[("a.py", "import b\n"), ("b.py", "class (:\n")]);

    pydepgraph()
        .arg(dir.path())
        .args(["--no-visual", "--skip-errors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped unparseable files (1)"));
}

#[test]
fn test_cli_skip_errors_covers_undecodable_files() {
    let dir = write_project(&[("a.py", "import b\n"), ("legacy.py", "print \"hi\"\n")]);
    fs::write(dir.path().join("b.py"), b"name = '\xe9'\n").unwrap();

    pydepgraph()
        .arg(dir.path())
        .arg("--no-visual")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Parse error"));

    pydepgraph()
        .arg(dir.path())
        .args(["--no-visual", "--skip-errors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped unparseable files (2)"))
        .stdout(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn test_cli_config_file() {
    let dir = write_project(&[
        ("a.py", "import b\n"),
        ("b.py", ""),
        ("pydepgraph.toml", "[output]\nvisual = false\n"),
    ]);

    pydepgraph().arg(dir.path()).assert().success();
    assert!(!dir.path().join("dependency_graph.html").exists());
}

#[test]
fn test_cli_invalid_explicit_config() {
    let dir = write_project(&[("a.py", ""), ("bad.toml", "[layout]\nnode_spacing = 0.0\n")]);

    pydepgraph()
        .arg(dir.path())
        .arg("--config")
        .arg(dir.path().join("bad.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("node_spacing"));
}

#[test]
fn test_relative_import_beyond_root_is_unresolved() {
    let dir = write_project(&[("pkg/mod.py", "from .....outside import x\n")]);
    let result = create_analyzer().analyze(dir.path()).unwrap();
    assert!(result.graph.is_empty());
    assert_eq!(result.unresolved_imports, 1);
}
