// Python import extraction using tree-sitter

use crate::error::{Error, Result};
use crate::parser::ast::ImportRecord;
use std::io::ErrorKind;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Extracts import statements from Python source files
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    /// Create a new Python parser
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
        parser
            .set_language(&language)
            .map_err(|e| Error::Parser(format!("Failed to set Python language: {}", e)))?;
        Ok(Self { parser })
    }

    /// Read a Python file and extract its imports
    pub fn parse_file(&mut self, path: &Path) -> Result<Vec<ImportRecord>> {
        let source = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::InvalidData => Error::parse(path, "file is not valid UTF-8"),
            kind => Error::Io(std::io::Error::new(kind, format!("{}: {}", path.display(), e))),
        })?;

        self.extract(&source)
            .map_err(|e| match e {
                Error::Parser(message) => Error::parse(path, message),
                other => other,
            })
    }

    /// Extract every import statement in source order, including ones nested
    /// inside functions, classes and conditional blocks.
    ///
    /// Source with syntax errors is rejected, and so are Python 2 `print`
    /// and `exec` statements, which the grammar still accepts.
    pub fn extract(&mut self, source: &str) -> Result<Vec<ImportRecord>> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::parser("Failed to parse source"))?;

        let root = tree.root_node();
        if let Some(message) = find_syntax_error(&root) {
            return Err(Error::parser(message));
        }

        let source = source.as_bytes();
        let mut records = Vec::new();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            match node.kind() {
                "import_statement" => {
                    if let Some(record) = parse_import(&node, source) {
                        records.push(record);
                    }
                }
                "import_from_statement" => {
                    if let Some(record) = parse_import_from(&node, source) {
                        records.push(record);
                    }
                }
                "future_import_statement" => {
                    records.push(parse_future_import(&node, source));
                }
                _ => {
                    let mut cursor = node.walk();
                    let children: Vec<Node> = node.children(&mut cursor).collect();
                    stack.extend(children.into_iter().rev());
                }
            }
        }

        Ok(records)
    }
}

/// Statement kinds the grammar keeps for Python 2 source
const PYTHON2_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

/// Describe the position of the first error, missing or Python 2 node
fn find_syntax_error(root: &Node) -> Option<String> {
    let mut stack = vec![*root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() || PYTHON2_STATEMENTS.contains(&node.kind()) {
            let pos = node.start_position();
            return Some(format!(
                "invalid syntax at line {}, column {}",
                pos.row + 1,
                pos.column + 1
            ));
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    root.has_error().then(|| "invalid syntax".to_string())
}

/// Parse an import statement: `import x`, `import x.y as z, w`
fn parse_import(node: &Node, source: &[u8]) -> Option<ImportRecord> {
    let mut names = Vec::new();

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "dotted_name" => {
                names.push(child.utf8_text(source).ok()?.to_string());
            }
            "aliased_import" => {
                if let Some(name) = aliased_name(&child, source) {
                    names.push(name);
                }
            }
            _ => {}
        }
    }

    if names.is_empty() {
        return None;
    }

    Some(ImportRecord::plain(names))
}

/// Parse an import-from statement: `from x import y`, `from ..x import (y as z)`
fn parse_import_from(node: &Node, source: &[u8]) -> Option<ImportRecord> {
    let mut module = String::new();
    let mut names = Vec::new();
    let mut seen_import_keyword = false;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "relative_import" => {
                // Prefix dots and the optional module name, e.g. `..utils`
                module = child.utf8_text(source).ok()?.split_whitespace().collect();
            }
            "dotted_name" => {
                let text = child.utf8_text(source).ok()?;
                if !seen_import_keyword {
                    module = text.to_string();
                } else {
                    names.push(text.to_string());
                }
            }
            "import" => {
                seen_import_keyword = true;
            }
            "wildcard_import" => {
                names.push("*".to_string());
            }
            "aliased_import" => {
                if let Some(name) = aliased_name(&child, source) {
                    names.push(name);
                }
            }
            _ => {}
        }
    }

    if module.is_empty() {
        return None;
    }

    Some(ImportRecord::from_import(&module, names))
}

/// `from __future__ import x` has its own node kind in the grammar
fn parse_future_import(node: &Node, source: &[u8]) -> ImportRecord {
    let mut names = Vec::new();

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "dotted_name" => {
                if let Ok(text) = child.utf8_text(source) {
                    names.push(text.to_string());
                }
            }
            "aliased_import" => {
                if let Some(name) = aliased_name(&child, source) {
                    names.push(name);
                }
            }
            _ => {}
        }
    }

    ImportRecord::from_import("__future__", names)
}

/// The imported name of `name as alias`; the alias is dropped
fn aliased_name(node: &Node, source: &[u8]) -> Option<String> {
    if let Some(name) = node.child_by_field_name("name") {
        return name.utf8_text(source).ok().map(str::to_string);
    }

    let mut cursor = node.walk();
    let first = node
        .children(&mut cursor)
        .find(|c| matches!(c.kind(), "dotted_name" | "identifier"))?;
    first.utf8_text(source).ok().map(str::to_string)
}
