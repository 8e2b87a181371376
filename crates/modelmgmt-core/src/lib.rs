//! Model Management Core - in-memory definition model engine
//!
//! This crate holds the synchronous part of model management:
//! - Node arena for classes, definitions and their elements, with
//!   parent and inheritance references
//! - Model paths addressing any node, with string form
//! - Hierarchy builder and payload linkers
//! - Change sets turning edits into persistable deltas
//! - Undoable action processors for structural edits

pub mod actions;
pub mod changeset;
pub mod config;
pub mod errors;
pub mod hierarchy;
pub mod linkers;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod path;
pub mod payload;

pub use modelmgmt_core_types as core_types;

// Re-export commonly used types
pub use actions::{ActionProcessor, ModelAction};
pub use changeset::{ChangeValue, ModelChangeSet, ModelOperation};
pub use config::LanguageConfig;
pub use errors::{ExError, ExErrorKind, ModelError, Result};
pub use hierarchy::{HierarchyBuilder, ModelHierarchy};
pub use linkers::{DescriptionLinker, ModelLinker};
pub use model::{ModelKind, ModelList, NodeId};
pub use ops::{InheritanceState, ModelGraph};
pub use path::{ModelPath, PathSegment};
