use modelmgmt_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using ModelError
pub type Result<T> = std::result::Result<T, ModelError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that external callers (the REST
/// adapter, tests) can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    InvalidPath,
    NotFound,
    UnexpectedKind,
    AlreadyExists,

    // Inheritance / actions
    MissingReference,
    ContractViolation,

    // Integration/IO
    Serialization,
    ExternalService,
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidPath => "ERR_INVALID_PATH",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::UnexpectedKind => "ERR_UNEXPECTED_KIND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::MissingReference => "ERR_MISSING_REFERENCE",
            ExErrorKind::ContractViolation => "ERR_CONTRACT_VIOLATION",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context about where the
/// failure happened (operation, node, model path selector, correlation ids).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    node_id: Option<String>,
    selector: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            node_id: None,
            selector: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add node context
    pub fn with_node_id(mut self, id: impl Into<String>) -> Self {
        self.node_id = Some(id.into());
        self
    }

    /// Add model path context (string form of a ModelPath)
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn node_id(&self) -> Option<&str> {
        self.node_id.as_deref()
    }

    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(node_id) = &self.node_id {
            write!(f, " (node: {})", node_id)?;
        }
        if let Some(selector) = &self.selector {
            write!(f, " (selector: {})", selector)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for the model management engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    // ===== Structural Errors =====
    /// Node handle does not point into the graph
    #[error("Node not found: {node}")]
    NodeNotFound { node: String },

    /// Node exists but is not of the kind the operation requires
    #[error("Node {node} is a {actual}, expected {expected}")]
    UnexpectedKind {
        node: String,
        expected: String,
        actual: String,
    },

    /// A node with the same id already sits in the target collection
    #[error("Node {id} already exists in {context}")]
    DuplicateNode { id: String, context: String },

    // ===== Path Errors =====
    /// Model path string does not follow `type=value('/'type=value)*`
    #[error("Invalid model path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Model path is well formed but does not address any node
    #[error("Model path does not resolve: {selector}")]
    PathNotResolved { selector: String },

    // ===== Inheritance / Action Errors =====
    /// Restore-inherited requested on a node that has no ancestor reference
    #[error("Node {node} has no inherited reference to restore")]
    MissingReference { node: String },

    /// restore() called without a matching execute(), or with mismatched state
    #[error("Action {action} contract violated: {reason}")]
    ActionContractViolation { action: String, reason: String },

    // ===== Input Errors =====
    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: String },

    // ===== Internal Errors =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ModelError {
    pub(crate) fn contract(action: &str, reason: impl Into<String>) -> Self {
        ModelError::ActionContractViolation {
            action: action.to_string(),
            reason: reason.into(),
        }
    }
}

/// Classify domain errors into the canonical taxonomy
impl From<ModelError> for ExError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::NodeNotFound { node } => ExError::new(ExErrorKind::NotFound)
                .with_node_id(node)
                .with_message("Node not found"),

            ModelError::UnexpectedKind {
                node,
                expected,
                actual,
            } => ExError::new(ExErrorKind::UnexpectedKind)
                .with_node_id(node)
                .with_message(format!("Expected {}, found {}", expected, actual)),

            ModelError::DuplicateNode { id, context } => ExError::new(ExErrorKind::AlreadyExists)
                .with_node_id(id)
                .with_message(format!("Already exists in {}", context)),

            ModelError::InvalidPath { path, reason } => ExError::new(ExErrorKind::InvalidPath)
                .with_selector(path)
                .with_message(reason),

            ModelError::PathNotResolved { selector } => ExError::new(ExErrorKind::NotFound)
                .with_selector(selector)
                .with_message("Model path does not resolve to a node"),

            ModelError::MissingReference { node } => {
                ExError::new(ExErrorKind::MissingReference)
                    .with_node_id(node)
                    .with_message("Node has no inherited reference")
            }

            ModelError::ActionContractViolation { action, reason } => {
                ExError::new(ExErrorKind::ContractViolation)
                    .with_op(action)
                    .with_message(reason)
            }

            ModelError::InvalidPayload { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            ModelError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            ModelError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_stable() {
        let cases = [
            (ExErrorKind::InvalidPath, "ERR_INVALID_PATH"),
            (ExErrorKind::MissingReference, "ERR_MISSING_REFERENCE"),
            (ExErrorKind::ContractViolation, "ERR_CONTRACT_VIOLATION"),
            (ExErrorKind::Config, "ERR_CONFIG"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_contract_violation_maps_to_op() {
        let err: ExError = ModelError::contract("restore_inherited_field", "not executed").into();
        assert_eq!(err.kind(), ExErrorKind::ContractViolation);
        assert_eq!(err.op(), Some("restore_inherited_field"));
        assert_eq!(err.message(), "not executed");
    }

    #[test]
    fn test_display_includes_selector() {
        let err: ExError = ModelError::PathNotResolved {
            selector: "definition=PR0001/field=title".to_string(),
        }
        .into();
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_NOT_FOUND]"));
        assert!(rendered.contains("selector: definition=PR0001/field=title"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        use std::error::Error;

        let inner = ExError::new(ExErrorKind::ExternalService).with_message("timeout");
        let outer = ExError::new(ExErrorKind::Internal).with_source(inner);
        assert!(outer.source().is_some());
        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(ExErrorKind::ExternalService)
        );
    }
}
