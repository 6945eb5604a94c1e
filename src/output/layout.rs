//! Hierarchical layout of the dependency graph.
//!
//! Files become nodes grouped into combos, one combo per directory. Every
//! ancestor directory of a node gets a combo of its own so the rendered
//! groups nest like the file tree. Positions are assigned deterministically:
//!
//! 1. Combos are placed in columns by depth, sorted by id within a column
//!    and centered vertically.
//! 2. Nodes stack vertically around their combo's position.
//! 3. The whole drawing is translated so its bounding box is centered on
//!    the configured viewport center.

use crate::analysis::DependencyMap;
use crate::config::LayoutConfig;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Id of the synthetic combo for the project root
pub const ROOT_COMBO: &str = ".";

/// Label shown for the root combo
const ROOT_LABEL: &str = "root";

/// Position hint read by the renderer at load time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A file in the rendered graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualNode {
    pub id: String,
    /// File name shown on the node
    pub text: String,
    /// Directory combo containing the node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Position>,
}

/// An import edge, `source->target`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// A directory group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualCombo {
    pub id: String,
    pub text: String,
    /// Enclosing directory combo; top-level directories have none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Position>,
}

/// Data contract consumed by the graph renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphData {
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
    pub combos: Vec<VisualCombo>,
}

impl GraphData {
    /// Every position hint, combos after nodes
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.nodes
            .iter()
            .filter_map(|n| n.style)
            .chain(self.combos.iter().filter_map(|c| c.style))
    }
}

/// Builds positioned graph data from a dependency mapping
pub struct GraphLayout {
    config: LayoutConfig,
}

impl GraphLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, mapping: &DependencyMap) -> GraphData {
        let mut node_ids = BTreeSet::new();
        let mut edges = Vec::new();

        for (source, targets) in mapping {
            node_ids.insert(source.as_str());
            for target in targets {
                node_ids.insert(target.as_str());
                edges.push(VisualEdge {
                    id: format!("{}->{}", source, target),
                    source: source.clone(),
                    target: target.clone(),
                });
            }
        }

        let nodes: Vec<VisualNode> = node_ids
            .iter()
            .map(|id| VisualNode {
                id: id.to_string(),
                text: node_label(id),
                combo: node_combo(id),
                style: None,
            })
            .collect();

        let mut dirs: BTreeSet<String> = BTreeSet::new();
        dirs.insert(ROOT_COMBO.to_string());
        for id in &node_ids {
            dirs.extend(ancestor_dirs(id));
        }

        let mut ordered: Vec<&String> = dirs.iter().collect();
        ordered.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        let combos: Vec<VisualCombo> = ordered
            .into_iter()
            .map(|dir| VisualCombo {
                id: dir.clone(),
                text: combo_label(dir),
                combo: parent_combo(dir).filter(|p| dirs.contains(p)),
                style: None,
            })
            .collect();

        let mut data = GraphData {
            nodes,
            edges,
            combos,
        };
        self.assign_positions(&mut data);
        data
    }

    fn assign_positions(&self, data: &mut GraphData) {
        let cfg = &self.config;

        // Combos: one column per depth
        let mut by_depth: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (i, combo) in data.combos.iter().enumerate() {
            by_depth.entry(combo_depth(&combo.id)).or_default().push(i);
        }

        for (depth, mut members) in by_depth {
            members.sort_by(|&a, &b| data.combos[a].id.cmp(&data.combos[b].id));
            let x = cfg.center_x + (depth as f64 - 1.0) * cfg.depth_spacing;
            let start_y = cfg.center_y - (members.len() as f64 - 1.0) * cfg.combo_spacing / 2.0;
            for (slot, &i) in members.iter().enumerate() {
                data.combos[i].style = Some(Position {
                    x,
                    y: start_y + slot as f64 * cfg.combo_spacing,
                });
            }
        }

        // Nodes: stacked around their combo
        let combo_positions: HashMap<&str, Position> = data
            .combos
            .iter()
            .filter_map(|c| c.style.map(|p| (c.id.as_str(), p)))
            .collect();

        let mut by_combo: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, node) in data.nodes.iter().enumerate() {
            let combo = node.combo.clone().unwrap_or_else(|| ROOT_COMBO.to_string());
            by_combo.entry(combo).or_default().push(i);
        }

        let mut node_positions = Vec::new();
        for (combo_id, mut members) in by_combo {
            let Some(anchor) = combo_positions.get(combo_id.as_str()) else {
                continue;
            };
            members.sort_by(|&a, &b| data.nodes[a].id.cmp(&data.nodes[b].id));
            let offset = -(members.len() as f64 - 1.0) * cfg.node_spacing / 2.0;
            for (slot, &i) in members.iter().enumerate() {
                node_positions.push((
                    i,
                    Position {
                        x: anchor.x,
                        y: anchor.y + offset + slot as f64 * cfg.node_spacing,
                    },
                ));
            }
        }
        for (i, position) in node_positions {
            data.nodes[i].style = Some(position);
        }

        self.center(data);
    }

    /// Move the bounding box center onto the viewport center
    fn center(&self, data: &mut GraphData) {
        let mut positions = data.positions();
        let Some(first) = positions.next() else {
            return;
        };
        let (min_x, max_x, min_y, max_y) = positions.fold(
            (first.x, first.x, first.y, first.y),
            |(min_x, max_x, min_y, max_y), p| {
                (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
            },
        );

        let dx = self.config.center_x - (min_x + max_x) / 2.0;
        let dy = self.config.center_y - (min_y + max_y) / 2.0;

        let styles = data
            .nodes
            .iter_mut()
            .filter_map(|n| n.style.as_mut())
            .chain(data.combos.iter_mut().filter_map(|c| c.style.as_mut()));
        for style in styles {
            style.x += dx;
            style.y += dy;
        }
    }
}

impl Default for GraphLayout {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

/// Portion of `path` before its last `/`, empty when there is none
fn dirname(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Portion of `path` after its last `/`
fn basename(path: &str) -> &str {
    path.rsplit_once('/').map(|(_, name)| name).unwrap_or(path)
}

/// Give relative directory paths the `./` prefix ids use
fn dir_id(dir: &str) -> String {
    if dir.starts_with('/') || dir.starts_with("./") || dir == ROOT_COMBO {
        dir.to_string()
    } else {
        format!("./{}", dir)
    }
}

/// Node label: the file name, or the whole id when it has none
pub fn node_label(id: &str) -> String {
    let name = basename(id);
    if name.is_empty() {
        id.to_string()
    } else {
        name.to_string()
    }
}

/// Combo of a node: its parent directory, `.` for files at the root
pub fn node_combo(id: &str) -> Option<String> {
    match dirname(id) {
        "" => None,
        ROOT_COMBO => Some(ROOT_COMBO.to_string()),
        dir => Some(dir_id(dir)),
    }
}

/// Every directory above `id`, innermost first, excluding the root
pub fn ancestor_dirs(id: &str) -> Vec<String> {
    let mut dirs = Vec::new();
    let mut path = id.strip_prefix("./").unwrap_or(id).trim_end_matches('/');
    loop {
        path = dirname(path);
        if path.is_empty() || path == ROOT_COMBO {
            break;
        }
        dirs.push(dir_id(path));
    }
    dirs
}

/// Enclosing combo of a directory; top-level directories have none
fn parent_combo(dir: &str) -> Option<String> {
    match dirname(dir) {
        "" | ROOT_COMBO => None,
        parent => Some(dir_id(parent)),
    }
}

fn combo_label(dir: &str) -> String {
    match basename(dir) {
        "" | ROOT_COMBO => ROOT_LABEL.to_string(),
        name => name.to_string(),
    }
}

/// Path segments between the root and a combo; the root itself is 0
pub fn combo_depth(id: &str) -> usize {
    if id == ROOT_COMBO {
        return 0;
    }
    let path = id.strip_prefix("./").unwrap_or(id);
    path.matches('/').count() + 1
}
