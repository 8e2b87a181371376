//! Model Management Engine - asynchronous boundary
//!
//! Connects the synchronous core to the external model collaborator:
//! - `ModelSource` / `ModelPersistence` traits for fetching payloads and
//!   persisting change sets
//! - `ModelManagementService` with load-once caching of the hierarchy,
//!   meta-data, properties and code lists
//! - `EngineConfig` loading from file and environment

pub mod config;
pub mod errors;
pub mod service;
pub mod session;
pub mod source;

pub use crate::config::EngineConfig;
pub use errors::Result;
pub use service::ModelManagementService;
pub use session::ModelSession;
pub use source::{CodeList, CodeValue, ModelPersistence, ModelSource, RawCodeValue};
