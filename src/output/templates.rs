// Template engine for the visualization document

use crate::error::Result;
use crate::output::layout::GraphData;
use tera::{Context, Tera};

const GRAPH_TEMPLATE: &str = "graph.html";

/// Template engine wrapping Tera with the embedded graph page
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Create a new template engine with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(GRAPH_TEMPLATE, include_str!("../../templates/graph.html.tera"))?;
        Ok(Self { tera })
    }

    /// Render the graph page with `data` embedded as a script literal
    pub fn render_graph(&self, data: &GraphData, title: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("data", &embed_json(data)?);

        Ok(self.tera.render(GRAPH_TEMPLATE, &context)?)
    }
}

/// Pretty JSON that is safe inside a `<script>` element
pub fn embed_json(data: &GraphData) -> Result<String> {
    let json = serde_json::to_string_pretty(data)?;
    Ok(json.replace("</", "<\\/"))
}
