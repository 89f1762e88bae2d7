//! Error handling for buildcmp-store
//!
//! Wraps buildcmp-core ExError with store-specific helpers

use buildcmp_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a file store collision error
pub fn store_collision(relative_path: &str) -> ExError {
    ExError::new(ExErrorKind::FileStoreCollision)
        .with_op("file_store_write")
        .with_message(format!(
            "File store collision at {}: existing content differs",
            relative_path
        ))
}

/// Create a file store missing file error
pub fn store_missing(relative_path: &str) -> ExError {
    ExError::new(ExErrorKind::FileStoreMissing)
        .with_op("file_store_read")
        .with_message(format!("No stored file at {}", relative_path))
}

/// Create an error for a store whose directory disappeared after files were stored
pub fn store_vanished(root: &std::path::Path) -> ExError {
    ExError::new(ExErrorKind::FileStoreMissing)
        .with_op("file_store_move")
        .with_message(format!(
            "File store at {} was removed after files were stored in it",
            root.display()
        ))
}

/// Create an outcome model validation error
pub fn model_invalid(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidModel)
        .with_op("model_parse")
        .with_message(reason.to_string())
}

/// Create a configuration validation error
pub fn config_invalid(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidConfig)
        .with_op("config_parse")
        .with_message(reason.to_string())
}

/// Create a tool version parse error
pub fn version_invalid(version: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidVersion)
        .with_op("parse_tool_version")
        .with_version(version.to_string())
        .with_message(format!("'{}' is not a valid tool version", version))
}

/// Create a build execution error
pub fn execution_failed(project_dir: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::BuildExecutionFailed)
        .with_op("execute_build")
        .with_message(format!(
            "Build of project at {} failed: {}",
            project_dir, reason
        ))
}
