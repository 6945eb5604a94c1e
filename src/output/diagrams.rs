// Mermaid diagram generation
//
// Renders the same positioned graph data as the HTML page as a Mermaid
// flowchart, nesting a `subgraph` per directory combo.

use crate::output::layout::{GraphData, ROOT_COMBO};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Diagram generator for creating Mermaid diagrams
pub struct DiagramGenerator {
    /// Maximum file nodes before collapsing to a directory-level graph
    max_nodes: usize,
    /// Layout direction (TB, LR, BT, RL)
    direction: String,
}

impl DiagramGenerator {
    /// Create a new diagram generator
    pub fn new() -> Self {
        Self {
            max_nodes: 100,
            direction: "LR".to_string(),
        }
    }

    /// File-level flowchart with nested directory subgraphs
    pub fn generate_dependency_graph(&self, data: &GraphData) -> String {
        if data.nodes.len() > self.max_nodes {
            return self.generate_directory_graph(data);
        }

        let mut lines = vec![format!("flowchart {}", self.direction)];

        let node_ids: HashMap<&str, String> = data
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), format!("n{}", i)))
            .collect();

        let mut nodes_by_combo: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (i, node) in data.nodes.iter().enumerate() {
            let combo = node.combo.as_deref().unwrap_or(ROOT_COMBO);
            nodes_by_combo.entry(combo).or_default().push(i);
        }

        let mut children: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (i, combo) in data.combos.iter().enumerate() {
            if combo.id == ROOT_COMBO {
                continue;
            }
            let parent = combo.combo.as_deref().unwrap_or(ROOT_COMBO);
            children.entry(parent).or_default().push(i);
        }

        let tree = ComboTree {
            data,
            node_ids: &node_ids,
            nodes_by_combo: &nodes_by_combo,
            children: &children,
        };
        tree.render(ROOT_COMBO, 1, &mut lines);

        for edge in &data.edges {
            if let (Some(from), Some(to)) = (
                node_ids.get(edge.source.as_str()),
                node_ids.get(edge.target.as_str()),
            ) {
                lines.push(format!("    {} --> {}", from, to));
            }
        }

        lines.join("\n")
    }

    /// Directory-level flowchart: one node per combo, edges between the
    /// directories of imported files
    pub fn generate_directory_graph(&self, data: &GraphData) -> String {
        let mut lines = vec![format!("flowchart {}", self.direction)];

        let combo_ids: HashMap<&str, String> = data
            .combos
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.as_str(), format!("c{}", i)))
            .collect();

        let mut file_counts: HashMap<&str, usize> = HashMap::new();
        for node in &data.nodes {
            *file_counts
                .entry(node.combo.as_deref().unwrap_or(ROOT_COMBO))
                .or_default() += 1;
        }

        for combo in &data.combos {
            let count = file_counts.get(combo.id.as_str()).copied().unwrap_or(0);
            lines.push(format!(
                "    {}[\"{}<br/>({} files)\"]",
                combo_ids[combo.id.as_str()],
                escape_label(&combo.id),
                count
            ));
        }

        let node_combo: HashMap<&str, &str> = data
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), n.combo.as_deref().unwrap_or(ROOT_COMBO)))
            .collect();

        let mut directory_edges = BTreeSet::new();
        for edge in &data.edges {
            if let (Some(&from), Some(&to)) = (
                node_combo.get(edge.source.as_str()),
                node_combo.get(edge.target.as_str()),
            ) {
                if from != to {
                    directory_edges.insert((from, to));
                }
            }
        }

        for (from, to) in directory_edges {
            if let (Some(from_id), Some(to_id)) = (combo_ids.get(from), combo_ids.get(to)) {
                lines.push(format!("    {} --> {}", from_id, to_id));
            }
        }

        lines.join("\n")
    }
}

impl Default for DiagramGenerator {
    fn default() -> Self {
        Self::new()
    }
}

struct ComboTree<'a> {
    data: &'a GraphData,
    node_ids: &'a HashMap<&'a str, String>,
    nodes_by_combo: &'a BTreeMap<&'a str, Vec<usize>>,
    children: &'a BTreeMap<&'a str, Vec<usize>>,
}

impl ComboTree<'_> {
    fn render(&self, combo: &str, level: usize, lines: &mut Vec<String>) {
        let indent = "    ".repeat(level);

        if let Some(members) = self.nodes_by_combo.get(combo) {
            for &i in members {
                let node = &self.data.nodes[i];
                lines.push(format!(
                    "{}{}[\"{}\"]",
                    indent,
                    self.node_ids[node.id.as_str()],
                    escape_label(&node.text)
                ));
            }
        }

        if let Some(subcombos) = self.children.get(combo) {
            for &i in subcombos {
                let sub = &self.data.combos[i];
                lines.push(format!(
                    "{}subgraph c{}[\"{}\"]",
                    indent,
                    i,
                    escape_label(&sub.text)
                ));
                self.render(&sub.id, level + 1, lines);
                lines.push(format!("{}end", indent));
            }
        }
    }
}

/// Escape a label for use inside a quoted Mermaid string
fn escape_label(s: &str) -> String {
    s.replace('"', "#quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::DependencyMap;
    use crate::output::layout::GraphLayout;

    fn sample() -> GraphData {
        let mut map = DependencyMap::new();
        map.insert(
            "./main.py".to_string(),
            vec!["./api/routes.py".to_string(), "./api/v1/users.py".to_string()],
        );
        map.insert("./api/routes.py".to_string(), vec!["./util.py".to_string()]);
        GraphLayout::default().build(&map)
    }

    #[test]
    fn test_diagram_generator_new() {
        let gen = DiagramGenerator::new();
        assert_eq!(gen.max_nodes, 100);
        assert_eq!(gen.direction, "LR");
    }

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("plain.py"), "plain.py");
        assert_eq!(escape_label("a\"b"), "a#quot;b");
    }

    #[test]
    fn test_dependency_graph_nests_subgraphs() {
        let data = sample();
        let mermaid = DiagramGenerator::new().generate_dependency_graph(&data);
        let lines: Vec<&str> = mermaid.lines().collect();

        assert_eq!(lines[0], "flowchart LR");
        // nodes: ./api/routes.py, ./api/v1/users.py, ./main.py, ./util.py
        assert!(lines.contains(&"    n2[\"main.py\"]"));
        assert!(lines.contains(&"    subgraph c1[\"api\"]"));
        assert!(lines.contains(&"        n0[\"routes.py\"]"));
        assert!(lines.contains(&"        subgraph c2[\"v1\"]"));
        assert!(lines.contains(&"            n1[\"users.py\"]"));
        assert!(lines.contains(&"    n2 --> n0"));
        assert!(lines.contains(&"    n0 --> n3"));
        assert_eq!(mermaid.matches("subgraph").count(), 2);
        assert_eq!(mermaid.matches("end").count(), 2);
    }

    #[test]
    fn test_collapses_to_directory_graph() {
        let data = sample();
        let gen = DiagramGenerator {
            max_nodes: 2,
            ..DiagramGenerator::new()
        };
        let mermaid = gen.generate_dependency_graph(&data);

        assert!(mermaid.contains("c0[\".<br/>(2 files)\"]"));
        assert!(mermaid.contains("c1[\"./api<br/>(1 files)\"]"));
        // main.py -> api, api -> root, main.py -> api/v1
        assert!(mermaid.contains("    c0 --> c1"));
        assert!(mermaid.contains("    c1 --> c0"));
        assert!(mermaid.contains("    c0 --> c2"));
        assert!(!mermaid.contains("n0"));
    }
}
