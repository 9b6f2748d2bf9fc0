use docline_archetype::{ArchetypeConfig, ArchetypeSearch};
use docline_graph::GraphLoader;
use docline_report::{IndexEntry, ReportConfig, ReportError, ReportWriter};
use std::fs;
use tempfile::tempdir;

const RECORDS: &str = r#"{"digraph": [
    {"vertexName": "a", "comment": "Returns the number of rows", "vertexLabel": "rows()",
     "children": [{"name": "b"}]},
    {"vertexName": "b", "comment": "Returns the number of columns", "vertexLabel": "cols()"},
    {"vertexName": "c", "comment": "Closes the file", "vertexLabel": "close()"}
]}"#;

#[test]
fn writes_stylesheet_pages_and_index() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("report");
    let writer = ReportWriter::new(ReportConfig {
        output_dir: out.clone(),
        ..Default::default()
    })
    .expect("writer");
    writer.prepare().expect("prepare");

    let graph = GraphLoader::default().load_str(RECORDS).expect("graph");
    let search = ArchetypeSearch::new(&ArchetypeConfig::for_batch()).expect("search");

    let mut entries = Vec::new();
    for component in graph.components() {
        let cluster = graph.cluster(&component).expect("cluster");
        let archetype = search.extract_archetype(cluster);
        writer
            .write_component(&graph, &component, &archetype)
            .expect("write page");
        entries.push(IndexEntry {
            min_id: component.min_id(),
            size: component.len(),
            archetype: archetype.joined(),
        });
    }
    writer.write_index(&entries).expect("write index");

    assert!(out.join("style.css").exists());
    assert!(out.join("graph.js").exists());
    assert!(out.join("0002.html").exists());
    let page = fs::read_to_string(out.join("0000.html")).expect("page");
    assert!(page.contains("Returns the number of"));
    let index = fs::read_to_string(out.join("index.html")).expect("index");
    assert!(index.contains(r#"<a href="0000.html">0000</a>"#));
    assert!(index.contains("Closes the file"));
}

#[test]
fn custom_template_overrides_builtin() {
    let dir = tempdir().expect("tempdir");
    let template = dir.path().join("page.html");
    fs::write(&template, "<h1>{title}</h1>{codes}").expect("write template");

    let writer = ReportWriter::new(ReportConfig {
        output_dir: dir.path().join("out"),
        template: Some(template),
        ..Default::default()
    })
    .expect("writer");

    let graph = GraphLoader::default().load_str(RECORDS).expect("graph");
    let component = &graph.components()[1];
    let html = writer
        .render_component(&graph, component, &docline_archetype::TokenSequence::empty())
        .expect("render");
    assert!(html.starts_with("<h1>Component 0002</h1>"));
}

#[test]
fn invalid_custom_template_fails_early() {
    let dir = tempdir().expect("tempdir");
    let template = dir.path().join("page.html");
    fs::write(&template, "<h1>{heading}</h1>").expect("write template");

    let result = ReportWriter::new(ReportConfig {
        template: Some(template),
        ..Default::default()
    });
    assert!(matches!(result, Err(ReportError::Template(_))));
}
