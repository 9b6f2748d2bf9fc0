use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where and how the HTML report is written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output directory, created if missing
    pub output_dir: PathBuf,

    /// Component page template overriding the built-in one
    pub template: Option<PathBuf>,

    /// Index page template overriding the built-in one
    pub index_template: Option<PathBuf>,

    /// File name of the stylesheet written next to the pages
    pub stylesheet_name: String,

    /// File name of the script that draws component graphs in the browser
    pub renderer_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("report"),
            template: None,
            index_template: None,
            stylesheet_name: "style.css".to_string(),
            renderer_name: "graph.js".to_string(),
        }
    }
}
