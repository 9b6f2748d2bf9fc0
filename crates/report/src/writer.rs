use crate::config::ReportConfig;
use crate::diff::{escape_html, html_diff};
use crate::error::{ReportError, Result};
use crate::template::{PageTemplate, TemplateKind};
use docline_archetype::TokenSequence;
use docline_graph::{CommentGraph, Component, NodeId};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const STYLESHEET: &str = include_str!("../templates/style.css");
const RENDERER: &str = include_str!("../templates/graph.js");

/// Row of the report index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub min_id: NodeId,
    pub size: usize,
    pub archetype: String,
}

/// Page file of the component whose lowest node id is `min_id`
pub fn page_file_name(min_id: NodeId) -> String {
    format!("{min_id:04}.html")
}

/// Renders and writes report pages into one output directory
pub struct ReportWriter {
    config: ReportConfig,
    component_template: PageTemplate,
    index_template: PageTemplate,
}

impl ReportWriter {
    pub fn new(config: ReportConfig) -> Result<Self> {
        let component_template =
            PageTemplate::load(TemplateKind::Component, config.template.as_deref())?;
        let index_template =
            PageTemplate::load(TemplateKind::Index, config.index_template.as_deref())?;
        Ok(Self {
            config,
            component_template,
            index_template,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// Create the output directory and write the stylesheet and graph renderer
    pub fn prepare(&self) -> Result<()> {
        let dir = &self.config.output_dir;
        std::fs::create_dir_all(dir).map_err(|e| ReportError::io(dir, e))?;
        self.write_file(&self.config.stylesheet_name, STYLESHEET)?;
        self.write_file(&self.config.renderer_name, RENDERER)?;
        Ok(())
    }

    pub fn render_component(
        &self,
        graph: &CommentGraph,
        component: &Component,
        archetype: &TokenSequence,
    ) -> Result<String> {
        let members = graph.members(component)?;
        let title = format!("Component {:04}", component.min_id());

        // DOT goes inside a <script> block, so it is escaped for DOT only.
        let mut nodes = String::new();
        for node in &members {
            let _ = writeln!(
                nodes,
                r##"node_{id} [shape="rectangle", label="{label}", href="#node_{id}"];"##,
                id = node.id,
                label = escape_dot(&node.label),
            );
        }

        let mut edges = String::new();
        for edge in &component.edges {
            let _ = writeln!(
                edges,
                r##"node_{u} -> node_{v} [label="diff", href="#edge_{u}_{v}"];"##,
                u = edge.source,
                v = edge.target,
            );
        }

        let archetype_text = archetype.joined();
        let mut codes = String::new();
        let _ = writeln!(
            codes,
            "<section class=\"archetype\">\n<h2>Archetype</h2>\n<p class=\"archetype-text\">{}</p>\n</section>",
            escape_html(&archetype_text)
        );

        codes.push_str("<section class=\"members\">\n<h2>Members</h2>\n");
        for node in &members {
            let _ = writeln!(
                codes,
                "<div class=\"member\" id=\"node_{}\">\n<h3>{}</h3>\n<p class=\"comment\">{}</p>\n</div>",
                node.id,
                escape_html(&node.label),
                html_diff(&archetype_text, &node.comment)
            );
        }
        codes.push_str("</section>\n");

        if !component.edges.is_empty() {
            codes.push_str("<section class=\"links\">\n<h2>Links</h2>\n");
            for edge in &component.edges {
                let (Some(source), Some(target)) = (graph.node(edge.source), graph.node(edge.target))
                else {
                    continue;
                };
                let _ = writeln!(
                    codes,
                    "<div class=\"link\" id=\"edge_{}_{}\">\n<h3>{} &rarr; {}</h3>\n<p class=\"comment\">{}</p>\n</div>",
                    edge.source,
                    edge.target,
                    escape_html(&source.label),
                    escape_html(&target.label),
                    html_diff(&source.comment, &target.comment)
                );
            }
            codes.push_str("</section>\n");
        }

        let stylesheet = escape_html(&self.config.stylesheet_name);
        let renderer = escape_html(&self.config.renderer_name);
        self.component_template.render(|key| match key {
            "title" => Some(title.as_str()),
            "stylesheet" => Some(stylesheet.as_str()),
            "renderer" => Some(renderer.as_str()),
            "nodes" => Some(nodes.as_str()),
            "edges" => Some(edges.as_str()),
            "codes" => Some(codes.as_str()),
            _ => None,
        })
    }

    /// Render and write one component page; returns its path
    pub fn write_component(
        &self,
        graph: &CommentGraph,
        component: &Component,
        archetype: &TokenSequence,
    ) -> Result<PathBuf> {
        let html = self.render_component(graph, component, archetype)?;
        self.write_file(&page_file_name(component.min_id()), &html)
    }

    pub fn render_index(&self, entries: &[IndexEntry]) -> Result<String> {
        let mut rows = String::new();
        for entry in entries {
            let file = page_file_name(entry.min_id);
            let _ = writeln!(
                rows,
                "<tr><td><a href=\"{file}\">{:04}</a></td><td>{}</td><td>{}</td></tr>",
                entry.min_id,
                entry.size,
                escape_html(&entry.archetype)
            );
        }

        let stylesheet = escape_html(&self.config.stylesheet_name);
        self.index_template.render(|key| match key {
            "title" => Some("Duplicate comments"),
            "stylesheet" => Some(stylesheet.as_str()),
            "rows" => Some(rows.as_str()),
            _ => None,
        })
    }

    pub fn write_index(&self, entries: &[IndexEntry]) -> Result<PathBuf> {
        let html = self.render_index(entries)?;
        self.write_file("index.html", &html)
    }

    fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.config.output_dir.join(name);
        std::fs::write(&path, contents).map_err(|e| ReportError::io(&path, e))?;
        log::debug!("Wrote {}", path.display());
        Ok(path)
    }
}

/// Escape a DOT string; `<` becomes `\u003c` so no `</script>` can close the block
fn escape_dot(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for ch in label.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '<' => out.push_str("\\u003c"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use docline_graph::GraphLoader;

    fn sample_graph() -> CommentGraph {
        GraphLoader::default()
            .load_str(
                r#"{"digraph": [
                    {"vertexName": "a", "comment": "Gets the current user", "vertexLabel": "get<\"user\">",
                     "children": [{"name": "b"}]},
                    {"vertexName": "b", "comment": "Gets the current session", "vertexLabel": "session"}
                ]}"#,
            )
            .unwrap()
    }

    #[test]
    fn component_page_contains_graph_archetype_and_diffs() {
        let graph = sample_graph();
        let component = &graph.components()[0];
        let writer = ReportWriter::new(ReportConfig::default()).unwrap();
        let archetype = TokenSequence::from_text("Gets the current");

        let html = writer.render_component(&graph, component, &archetype).unwrap();

        assert!(html.contains("<title>Component 0000</title>"));
        assert!(html.contains(r##"node_0 -> node_1 [label="diff", href="#edge_0_1"];"##));
        assert!(html.contains(r#"label="get\u003c\"user\">""#));
        assert!(html.contains(r#"<p class="archetype-text">Gets the current</p>"#));
        assert!(html.contains(
            r#"Gets the current <span class="diffplus modeldiffplus">user</span>"#
        ));
        assert!(html.contains(r#"id="edge_0_1""#));
        assert!(html.contains(
            "<script type=\"text/vnd.graphviz\" id=\"component-graph\">digraph component {\n"
        ));
        assert!(html.contains(r#"<div class="graph" data-graph="component-graph">"#));
        assert!(html.contains(r#"<script src="graph.js"></script>"#));
    }

    #[test]
    fn dot_labels_cannot_close_the_script_block() {
        let escaped = escape_dot(r#"</script> "a" \ b"#);
        assert_eq!(escaped, r#"\u003c/script> \"a\" \\ b"#);
        assert!(!escaped.contains("</"));
    }

    #[test]
    fn prepare_writes_renderer_next_to_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(ReportConfig {
            output_dir: dir.path().join("out"),
            ..Default::default()
        })
        .unwrap();
        writer.prepare().unwrap();

        let script = std::fs::read_to_string(dir.path().join("out/graph.js")).unwrap();
        assert!(script.contains("text/vnd.graphviz"));
        assert!(dir.path().join("out/style.css").is_file());
    }

    #[test]
    fn index_links_pages() {
        let writer = ReportWriter::new(ReportConfig::default()).unwrap();
        let html = writer
            .render_index(&[IndexEntry {
                min_id: 12,
                size: 3,
                archetype: "a <b>".to_string(),
            }])
            .unwrap();
        assert!(html.contains(r#"<a href="0012.html">0012</a>"#));
        assert!(html.contains("a &lt;b&gt;"));
    }

    #[test]
    fn page_names_are_zero_padded() {
        assert_eq!(page_file_name(7), "0007.html");
        assert_eq!(page_file_name(12345), "12345.html");
    }
}
