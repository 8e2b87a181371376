use crate::model::{ModelKind, NodeId};

use super::graph::ModelGraph;

/// Where a node stands relative to the ancestor it was linked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InheritanceState {
    /// No ancestor counterpart
    Owned,
    /// Mirrors its ancestor without local content
    Inherited,
    /// Has an ancestor counterpart and local content
    Overridden,
}

impl ModelGraph {
    /// Whether `child` is structurally owned by `owner`
    pub fn is_owned_by(&self, child: NodeId, owner: NodeId) -> bool {
        self.parent(child) == Some(owner)
    }

    /// Entries of `owner`'s collection that `owner` actually owns
    pub fn owned_children(&self, owner: NodeId, kind: ModelKind) -> Vec<NodeId> {
        self.children(owner, kind)
            .into_iter()
            .filter(|c| self.is_owned_by(*c, owner))
            .collect()
    }

    fn owned_subnodes(&self, owner: NodeId) -> Vec<NodeId> {
        let kinds = match self.get(owner) {
            Some(node) => node.kind().child_kinds(),
            None => return Vec::new(),
        };
        kinds
            .iter()
            .flat_map(|kind| self.owned_children(owner, *kind))
            .collect()
    }

    /// Whether any owned attribute (recursively) has uncommitted changes
    ///
    /// Inherited entries do not count: their changes belong to the ancestor.
    pub fn is_dirty(&self, node: NodeId) -> bool {
        match self.get(node) {
            Some(found) if found.kind() == ModelKind::Attribute => found
                .attribute_data()
                .is_some_and(|data| data.value.is_dirty()),
            Some(_) => self
                .owned_subnodes(node)
                .into_iter()
                .any(|child| self.is_dirty(child)),
            None => false,
        }
    }

    /// Whether the node's own attributes and its dirty owned children are valid
    ///
    /// Clean children are taken as delivered, so an untouched field with an
    /// empty mandatory attribute does not invalidate its definition.
    pub fn is_valid(&self, node: NodeId) -> bool {
        match self.get(node) {
            Some(found) if found.kind() == ModelKind::Attribute => self.is_attribute_valid(node),
            Some(_) => {
                self.owned_children(node, ModelKind::Attribute)
                    .into_iter()
                    .all(|attribute| self.is_attribute_valid(attribute))
                    && self
                        .owned_subnodes(node)
                        .into_iter()
                        .filter(|child| self.kind(*child).is_ok_and(|kind| kind != ModelKind::Attribute))
                        .filter(|child| self.is_dirty(*child))
                        .all(|child| self.is_valid(child))
            }
            None => false,
        }
    }

    /// An attribute is invalid only when mandatory and empty
    pub fn is_attribute_valid(&self, attribute: NodeId) -> bool {
        let Some(data) = self.get(attribute).and_then(|n| n.attribute_data()) else {
            return false;
        };
        let mandatory = data.meta.as_ref().is_some_and(|m| m.is_mandatory());
        !(mandatory && data.value.is_empty())
    }

    pub fn has_local_attributes(&self, node: NodeId) -> bool {
        !self.owned_children(node, ModelKind::Attribute).is_empty()
    }

    /// Whether `node` owns any non-attribute child
    pub fn has_local_children(&self, node: NodeId) -> bool {
        let Some(found) = self.get(node) else {
            return false;
        };
        found
            .kind()
            .child_kinds()
            .iter()
            .filter(|kind| **kind != ModelKind::Attribute)
            .any(|kind| !self.owned_children(node, *kind).is_empty())
    }

    /// Whether `node` carries its own content
    ///
    /// True when it has no ancestor reference at all, or when it owns
    /// attributes or children of its own.
    pub fn is_owning(&self, node: NodeId) -> bool {
        self.reference(node).is_none()
            || self.has_local_attributes(node)
            || self.has_local_children(node)
    }

    pub fn is_inherited(&self, node: NodeId) -> bool {
        !self.is_owning(node)
    }

    /// Whether `node`, as listed under `context`, comes from an ancestor
    pub fn is_inherited_in(&self, node: NodeId, context: NodeId) -> bool {
        !self.is_owned_by(node, context) || self.is_inherited(node)
    }

    pub fn inheritance_state(&self, node: NodeId) -> InheritanceState {
        if self.reference(node).is_none() {
            InheritanceState::Owned
        } else if self.is_owning(node) {
            InheritanceState::Overridden
        } else {
            InheritanceState::Inherited
        }
    }
}
