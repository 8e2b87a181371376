//! Operation boundary macros
//!
//! Graph-level operations (`build_hierarchy`, `link_model`,
//! `link_inheritance`, `execute_action`, `restore_action`) and the service
//! calls built on them log one start event and exactly one end or end_error
//! event, keyed by `op`.

/// Log the start of an operation
///
/// ```
/// # use modelmgmt_core::log_op_start;
/// log_op_start!("build_hierarchy");
/// log_op_start!("execute_action", action = "create_field");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use modelmgmt_core::log_op_end;
/// log_op_end!("link_model", duration_ms = 3, node_count = 12);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log a failed operation
///
/// Takes a `ModelError` or an `ExError`. Besides kind and code, the node id
/// and model path selector of the error are recorded when it has them.
///
/// ```
/// # use modelmgmt_core::{log_op_error, errors::ModelError};
/// let err = ModelError::PathNotResolved { selector: "definition=media/field=x".to_string() };
/// log_op_error!("resolve_path", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            node_id = ex_err.node_id(),
            selector = ex_err.selector(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            node_id = ex_err.node_id(),
            selector = ex_err.selector(),
            $($field)*
        );
    }};
}

/// Close an operation from its `Result`, yielding the result unchanged
///
/// Logs the end event on `Ok` and the end_error event on `Err`, with the
/// duration measured from `start`. Extra fields go on either event.
///
/// ```
/// # use modelmgmt_core::{log_op_result, errors::ModelError};
/// let start = std::time::Instant::now();
/// let result: Result<u32, ModelError> = Ok(3);
/// let count = log_op_result!("collect_change_sets", start, result, node_id = "media");
/// assert_eq!(count, Ok(3));
/// ```
#[macro_export]
macro_rules! log_op_result {
    ($op:expr, $start:expr, $result:expr $(, $($field:tt)*)?) => {{
        let duration_ms = $crate::logging_facility::elapsed_ms($start);
        match $result {
            Ok(value) => {
                $crate::log_op_end!($op, duration_ms = duration_ms $(, $($field)*)?);
                Ok(value)
            }
            Err(err) => {
                $crate::log_op_error!($op, err.clone(), duration_ms = duration_ms $(, $($field)*)?);
                Err(err)
            }
        }
    }};
}
