//! Error handling for modelmgmt-engine
//!
//! Wraps modelmgmt-core ExError with engine-specific helpers

use modelmgmt_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Wrap a failure reported by the model source or persistence
pub fn source_error(op: &str, err: ExError) -> ExError {
    ExError::new(ExErrorKind::ExternalService)
        .with_op(op.to_string())
        .with_message(format!("External collaborator failed during {}", op))
        .with_source(err)
}

/// Create a missing model error
pub fn not_found(op: &str, id: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op(op.to_string())
        .with_node_id(id.to_string())
        .with_message(format!("Model {} is not provided by the source", id))
}

/// Create a configuration error from config::ConfigError
pub fn config_error(err: config::ConfigError) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op("load_config")
        .with_message(err.to_string())
}
