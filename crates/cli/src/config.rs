use anyhow::{Context, Result};
use docline_archetype::ArchetypeConfig;
use docline_graph::GraphConfig;
use docline_report::ReportConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of a `docline.toml` file.
///
/// Every table is optional. Without an `[archetype]` table the search uses
/// never-evicting caches, which suits a one-shot report run. Either way each
/// cluster tries at most `max_orders` fold orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoclineConfig {
    pub archetype: ArchetypeConfig,
    pub graph: GraphConfig,
    pub report: ReportConfig,

    /// Worker threads for archetype extraction
    pub jobs: Option<usize>,
}

impl Default for DoclineConfig {
    fn default() -> Self {
        Self {
            archetype: ArchetypeConfig::for_batch(),
            graph: GraphConfig::default(),
            report: ReportConfig::default(),
            jobs: None,
        }
    }
}

impl DoclineConfig {
    /// Load from `path`, or defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.archetype.validate()?;
        self.graph.validate()?;
        Ok(())
    }
}
