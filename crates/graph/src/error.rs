use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed graph JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported input encoding: {0} (only utf-8 is supported)")]
    UnsupportedEncoding(String),

    #[error("Input is not valid {encoding}: {path}")]
    InvalidText { path: String, encoding: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Node not found: {0}")]
    NodeNotFound(usize),
}
