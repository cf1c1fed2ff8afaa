//! Error types for the swarm core

use thiserror::Error;

/// Errors surfaced by the registry and the coordinator
#[derive(Error, Debug)]
pub enum SwarmError {
    #[error("Unknown mode: {name}. Pick from {valid:?}")]
    UnknownMode { name: String, valid: Vec<String> },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Mode table parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SwarmError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SwarmError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SwarmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_mode_lists_valid_names() {
        let err = SwarmError::UnknownMode {
            name: "flood".to_string(),
            valid: vec!["earthquake".to_string(), "wildfire".to_string()],
        };

        let msg = err.to_string();
        assert!(msg.contains("flood"));
        assert!(msg.contains("earthquake"));
        assert!(msg.contains("wildfire"));
    }
}
