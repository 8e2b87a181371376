//! Canonical schema constants for structured logging and events
//!
//! These constants keep log fields and error reporting consistent between
//! the domain engine and the service layer.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Node addressing
pub const FIELD_NODE_ID: &str = "node_id";
pub const FIELD_NODE_KIND: &str = "node_kind";
pub const FIELD_SELECTOR: &str = "selector";
pub const FIELD_ACTION: &str = "action";

// Collection sizes
pub const FIELD_ROOT_COUNT: &str = "root_count";
pub const FIELD_NODE_COUNT: &str = "node_count";
pub const FIELD_CHANGE_SET_COUNT: &str = "change_set_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
