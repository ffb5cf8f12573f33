//! Error types for the recommendation engine and its data loaders.

use std::path::PathBuf;

/// Result type for engine entry points.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Failures the engine propagates to callers.
///
/// Only a missing effect bundle is fatal; unknown officers, unviable captains
/// and empty rosters are absorbed into zero scores, penalties or advisory text.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Scoring or ranking was invoked without effect data.
    #[error("effect bundle is required for {operation}; refusing to score without effect data")]
    MissingBundle { operation: &'static str },
}

/// Failures while reading a bundle or roster file from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported file format for {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf },
}

impl LoadError {
    /// True when the file does not exist, as opposed to being unreadable or malformed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_bundle_message_names_the_bundle_and_operation() {
        let err = EngineError::MissingBundle {
            operation: "crew ranking",
        };
        let message = err.to_string();
        assert!(message.contains("effect bundle is required"));
        assert!(message.contains("crew ranking"));
    }

    #[test]
    fn only_missing_files_count_as_not_found() {
        let missing = LoadError::Read {
            path: PathBuf::from("roster.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let denied = LoadError::Read {
            path: PathBuf::from("roster.json"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let unsupported = LoadError::UnsupportedFormat {
            path: PathBuf::from("roster.txt"),
        };

        assert!(missing.is_not_found());
        assert!(!denied.is_not_found());
        assert!(!unsupported.is_not_found());
    }
}
