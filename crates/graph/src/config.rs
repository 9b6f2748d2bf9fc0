use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};

/// Graph loading options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Only the first `vertex_limit` records become nodes
    pub vertex_limit: usize,

    /// Encoding of the input file
    pub input_encoding: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            vertex_limit: 500,
            input_encoding: "utf-8".to_string(),
        }
    }
}

impl GraphConfig {
    pub fn validate(&self) -> Result<()> {
        if self.vertex_limit == 0 {
            return Err(GraphError::InvalidConfig(
                "vertex_limit must be > 0".to_string(),
            ));
        }
        if !is_utf8_label(&self.input_encoding) {
            return Err(GraphError::UnsupportedEncoding(
                self.input_encoding.clone(),
            ));
        }
        Ok(())
    }
}

fn is_utf8_label(label: &str) -> bool {
    matches!(
        label.trim().to_ascii_lowercase().as_str(),
        "utf-8" | "utf8"
    )
}
