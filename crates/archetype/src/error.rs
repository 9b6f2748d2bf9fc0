use thiserror::Error;

/// Result type for archetype operations
pub type Result<T> = std::result::Result<T, ArchetypeError>;

/// Errors raised at the boundary of the archetype engine.
///
/// The extraction itself is total over well-formed sequences; these errors only
/// reject malformed input before it reaches the matcher or the memo cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArchetypeError {
    /// A token is empty or contains whitespace
    #[error("Invalid token at position {position}: {reason}")]
    InvalidToken {
        position: usize,
        reason: &'static str,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ArchetypeError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
