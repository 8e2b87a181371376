//! Structured logging for model loading, linking and edits
//!
//! `init(profile)` installs the subscriber once per process. The core logs
//! through `log_op_start!`, `log_op_end!`, `log_op_error!` and
//! `log_op_result!`; the engine crate uses the same macros so a load or save
//! and the graph operations under it share one field vocabulary
//! (`modelmgmt_core_types::schema`).
//!
//! ```rust
//! use modelmgmt_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

use std::time::Instant;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

/// Whole milliseconds since `start`, as logged in `duration_ms`
pub fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
