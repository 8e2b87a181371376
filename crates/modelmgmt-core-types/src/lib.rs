//! Core types shared across the model management crates
//!
//! - **Correlation types**: RequestId, TraceId carried on structured errors
//! - **Schema constants**: Canonical field keys and event names for logging

pub mod correlation;
pub mod schema;

pub use correlation::{RequestId, TraceId};
