//! Undoable structural edits
//!
//! Each edit is a plain action value plus a stateless processor. The
//! processor's `execute` applies the edit, `restore` reverses it given the
//! same action, and `changeset` reports what to persist. Whatever `restore`
//! needs is captured into the action before `execute` runs.
//!
//! ## Example
//!
//! ```
//! use modelmgmt_core::actions::{CreateAction, ModelAction};
//! use modelmgmt_core::linkers::ModelLinker;
//! use modelmgmt_core::model::{ModelKind, ModelsMetaData, NodeData};
//! use modelmgmt_core::ops::ModelGraph;
//!
//! let mut graph = ModelGraph::new();
//! let definition = graph.add_base_node("PR0001", NodeData::empty(ModelKind::Definition));
//! let create = CreateAction::prepare(
//!     &mut graph,
//!     &ModelLinker::default(),
//!     definition,
//!     ModelKind::Field,
//!     "title",
//!     &ModelsMetaData::default(),
//! )
//! .unwrap();
//!
//! let action = ModelAction::CreateField(create);
//! action.execute(&mut graph).unwrap();
//! assert!(graph.child(definition, ModelKind::Field, "title").is_some());
//!
//! action.restore(&mut graph).unwrap();
//! assert!(graph.child(definition, ModelKind::Field, "title").is_none());
//! ```

pub mod create;
pub mod overriding;
pub mod restore;

pub use create::{CreateAction, CreateProcessor, RemoveAction, RemoveProcessor};
pub use overriding::{OverrideInheritedAction, OverrideInheritedProcessor};
pub use restore::{RestoreInheritedAction, RestoreInheritedProcessor};

use crate::changeset::ModelChangeSet;
use crate::errors::Result;
use crate::model::ModelKind;
use crate::ops::ModelGraph;
use crate::{log_op_result, log_op_start};

/// Symmetric do/undo over a graph
pub trait ActionProcessor {
    type Action;

    /// Apply the edit
    ///
    /// # Errors
    ///
    /// Returns `ActionContractViolation` if the graph is not in the state the
    /// action was prepared against.
    fn execute(&self, graph: &mut ModelGraph, action: &Self::Action) -> Result<()>;

    /// Undo a previous `execute` of the same action
    ///
    /// # Errors
    ///
    /// Returns `ActionContractViolation` if `execute` did not run first.
    fn restore(&self, graph: &mut ModelGraph, action: &Self::Action) -> Result<()>;

    /// Change sets persisting the current state of the action's target
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` or `UnexpectedKind` for bad handles.
    fn changeset(&self, graph: &ModelGraph, action: &Self::Action) -> Result<Vec<ModelChangeSet>>;
}

/// Every supported edit
#[derive(Debug, Clone, PartialEq)]
pub enum ModelAction {
    CreateField(CreateAction),
    CreateProperty(CreateAction),
    CreateControl(CreateAction),
    RemoveControl(RemoveAction),
    RestoreInheritedAttribute(RestoreInheritedAction),
    RestoreInheritedControl(RestoreInheritedAction),
    RestoreInheritedField(RestoreInheritedAction),
    RestoreInheritedRegion(RestoreInheritedAction),
    RestoreInheritedHeader(RestoreInheritedAction),
    OverrideInheritedAttribute(OverrideInheritedAction),
    OverrideInheritedField(OverrideInheritedAction),
}

macro_rules! dispatch {
    ($action:expr, $processor:ident, $inner:ident => $body:expr) => {
        match $action {
            ModelAction::CreateField($inner) => {
                let $processor = CreateProcessor::new(ModelKind::Field);
                $body
            }
            ModelAction::CreateProperty($inner) => {
                let $processor = CreateProcessor::new(ModelKind::Property);
                $body
            }
            ModelAction::CreateControl($inner) => {
                let $processor = CreateProcessor::new(ModelKind::Control);
                $body
            }
            ModelAction::RemoveControl($inner) => {
                let $processor = RemoveProcessor::new(ModelKind::Control);
                $body
            }
            ModelAction::RestoreInheritedAttribute($inner) => {
                let $processor = RestoreInheritedProcessor::new(ModelKind::Attribute);
                $body
            }
            ModelAction::RestoreInheritedControl($inner) => {
                let $processor = RestoreInheritedProcessor::new(ModelKind::Control);
                $body
            }
            ModelAction::RestoreInheritedField($inner) => {
                let $processor = RestoreInheritedProcessor::new(ModelKind::Field);
                $body
            }
            ModelAction::RestoreInheritedRegion($inner) => {
                let $processor = RestoreInheritedProcessor::new(ModelKind::Region);
                $body
            }
            ModelAction::RestoreInheritedHeader($inner) => {
                let $processor = RestoreInheritedProcessor::new(ModelKind::Header);
                $body
            }
            ModelAction::OverrideInheritedAttribute($inner) => {
                let $processor = OverrideInheritedProcessor::new(ModelKind::Attribute);
                $body
            }
            ModelAction::OverrideInheritedField($inner) => {
                let $processor = OverrideInheritedProcessor::new(ModelKind::Field);
                $body
            }
        }
    };
}

impl ModelAction {
    pub fn name(&self) -> &'static str {
        match self {
            ModelAction::CreateField(_) => "create_field",
            ModelAction::CreateProperty(_) => "create_property",
            ModelAction::CreateControl(_) => "create_control",
            ModelAction::RemoveControl(_) => "remove_control",
            ModelAction::RestoreInheritedAttribute(_) => "restore_inherited_attribute",
            ModelAction::RestoreInheritedControl(_) => "restore_inherited_control",
            ModelAction::RestoreInheritedField(_) => "restore_inherited_field",
            ModelAction::RestoreInheritedRegion(_) => "restore_inherited_region",
            ModelAction::RestoreInheritedHeader(_) => "restore_inherited_header",
            ModelAction::OverrideInheritedAttribute(_) => "override_inherited_attribute",
            ModelAction::OverrideInheritedField(_) => "override_inherited_field",
        }
    }

    /// Apply the action
    ///
    /// # Errors
    ///
    /// See [`ActionProcessor::execute`]. The graph is unchanged on error.
    pub fn execute(&self, graph: &mut ModelGraph) -> Result<()> {
        let start = std::time::Instant::now();
        log_op_start!("execute_action", action = self.name());

        let result = dispatch!(self, processor, action => processor.execute(graph, action));

        log_op_result!("execute_action", start, result, action = self.name())
    }

    /// Undo the action
    ///
    /// # Errors
    ///
    /// See [`ActionProcessor::restore`]. The graph is unchanged on error.
    pub fn restore(&self, graph: &mut ModelGraph) -> Result<()> {
        let start = std::time::Instant::now();
        log_op_start!("restore_action", action = self.name());

        let result = dispatch!(self, processor, action => processor.restore(graph, action));

        log_op_result!("restore_action", start, result, action = self.name())
    }

    /// Change sets for the action's target
    ///
    /// # Errors
    ///
    /// See [`ActionProcessor::changeset`].
    pub fn changeset(&self, graph: &ModelGraph) -> Result<Vec<ModelChangeSet>> {
        dispatch!(self, processor, action => processor.changeset(graph, action))
    }
}
