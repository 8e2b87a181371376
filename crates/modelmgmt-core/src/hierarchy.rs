//! Class and definition trees from flat parent-pointer listings

use std::collections::{HashMap, HashSet};

use crate::errors::Result;
use crate::linkers::DescriptionLinker;
use crate::model::{DefinitionData, ModelKind, NodeData, NodeId};
use crate::ops::ModelGraph;
use crate::payload::{ClassDescriptor, DefinitionDescriptor, HierarchyDescriptor};
use crate::logging_facility::elapsed_ms;
use crate::{log_op_end, log_op_start};

/// Shape of one tree over descriptor positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arranged {
    pub index: usize,
    pub children: Vec<Arranged>,
}

impl Arranged {
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Arranged::size).sum::<usize>()
    }
}

/// Arrange descriptors into a forest, in declaration order
///
/// A descriptor is a root when its parent id is missing, empty, its own id,
/// or names nothing in `items`. Children are collected by scanning `items`
/// in order. Descriptors left over after that (members of parent cycles)
/// become roots too, so every descriptor appears exactly once.
pub fn arrange<D: HierarchyDescriptor>(items: &[D]) -> Vec<Arranged> {
    let ids: HashSet<&str> = items.iter().map(|d| d.id()).collect();
    let mut visited = vec![false; items.len()];
    let mut roots = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let is_root = match item.parent_id() {
            None => true,
            Some(parent) => parent.is_empty() || parent == item.id() || !ids.contains(parent),
        };
        if is_root && !visited[index] {
            roots.push(grow(items, index, &mut visited));
        }
    }
    for index in 0..items.len() {
        if !visited[index] {
            roots.push(grow(items, index, &mut visited));
        }
    }
    roots
}

fn grow<D: HierarchyDescriptor>(items: &[D], index: usize, visited: &mut [bool]) -> Arranged {
    visited[index] = true;
    let id = items[index].id();
    let mut children = Vec::new();
    for (candidate, item) in items.iter().enumerate() {
        if !visited[candidate] && item.parent_id() == Some(id) {
            children.push(grow(items, candidate, visited));
        }
    }
    Arranged { index, children }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionHierarchy {
    pub root: NodeId,
    pub children: Vec<DefinitionHierarchy>,
}

impl DefinitionHierarchy {
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(DefinitionHierarchy::size).sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassHierarchy {
    pub root: NodeId,
    pub children: Vec<ClassHierarchy>,
    /// Definition forest of this class
    pub definitions: Vec<DefinitionHierarchy>,
}

impl ClassHierarchy {
    /// Classes and definitions in this subtree
    pub fn size(&self) -> usize {
        1 + self.definitions.iter().map(DefinitionHierarchy::size).sum::<usize>()
            + self.children.iter().map(ClassHierarchy::size).sum::<usize>()
    }
}

/// Result of building the hierarchy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelHierarchy {
    pub classes: Vec<ClassHierarchy>,
    class_index: HashMap<String, NodeId>,
    definition_index: HashMap<String, NodeId>,
}

impl ModelHierarchy {
    pub fn class(&self, id: &str) -> Option<NodeId> {
        self.class_index.get(id).copied()
    }

    pub fn definition(&self, id: &str) -> Option<NodeId> {
        self.definition_index.get(id).copied()
    }

    /// Nodes built, counting every class and definition once
    pub fn node_count(&self) -> usize {
        self.classes.iter().map(ClassHierarchy::size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Builds class and definition nodes from the hierarchy listing
#[derive(Debug, Clone)]
pub struct HierarchyBuilder<'a> {
    descriptions: &'a DescriptionLinker,
}

impl<'a> HierarchyBuilder<'a> {
    pub fn new(descriptions: &'a DescriptionLinker) -> Self {
        Self { descriptions }
    }

    /// Build the class forest and each class's definition forest
    ///
    /// A definition whose parent was filed under another class is still
    /// linked to that parent through `parent`; the tree shape stays per class.
    ///
    /// # Errors
    ///
    /// Only fails on graph corruption; malformed parent ids never error.
    pub fn build(&self, graph: &mut ModelGraph, descriptors: &[ClassDescriptor]) -> Result<ModelHierarchy> {
        let start = std::time::Instant::now();
        log_op_start!("build_hierarchy", root_count = descriptors.len());

        let mut hierarchy = ModelHierarchy::default();
        let mut pending_parents: Vec<(NodeId, String)> = Vec::new();

        for arranged in arrange(descriptors) {
            let class = self.build_class(graph, descriptors, &arranged, None, &mut hierarchy, &mut pending_parents)?;
            hierarchy.classes.push(class);
        }

        for (definition, parent_id) in pending_parents {
            if let Some(parent) = hierarchy.definition(&parent_id) {
                if parent != definition {
                    graph.set_parent(definition, Some(parent))?;
                }
            }
        }

        log_op_end!(
            "build_hierarchy",
            duration_ms = elapsed_ms(start),
            node_count = hierarchy.node_count()
        );
        Ok(hierarchy)
    }

    fn build_class(
        &self,
        graph: &mut ModelGraph,
        descriptors: &[ClassDescriptor],
        arranged: &Arranged,
        parent: Option<NodeId>,
        hierarchy: &mut ModelHierarchy,
        pending_parents: &mut Vec<(NodeId, String)>,
    ) -> Result<ClassHierarchy> {
        let descriptor = &descriptors[arranged.index];
        let root = graph.add_base_node(descriptor.id.clone(), NodeData::Class);
        graph.set_parent(root, parent)?;
        self.descriptions
            .insert_descriptions(graph, root, descriptor.labels.as_ref())?;
        hierarchy.class_index.insert(descriptor.id.clone(), root);

        let mut definitions = Vec::new();
        for tree in arrange(&descriptor.sub_types) {
            definitions.push(self.build_definition(
                graph,
                &descriptor.sub_types,
                &tree,
                root,
                None,
                hierarchy,
                pending_parents,
            )?);
        }

        let mut children = Vec::new();
        for child in &arranged.children {
            children.push(self.build_class(graph, descriptors, child, Some(root), hierarchy, pending_parents)?);
        }

        Ok(ClassHierarchy {
            root,
            children,
            definitions,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn build_definition(
        &self,
        graph: &mut ModelGraph,
        descriptors: &[DefinitionDescriptor],
        arranged: &Arranged,
        class: NodeId,
        parent: Option<NodeId>,
        hierarchy: &mut ModelHierarchy,
        pending_parents: &mut Vec<(NodeId, String)>,
    ) -> Result<DefinitionHierarchy> {
        let descriptor = &descriptors[arranged.index];
        let root = graph.add_base_node(
            descriptor.id.clone(),
            NodeData::Definition(DefinitionData {
                is_abstract: descriptor.is_abstract,
                class: Some(class),
            }),
        );
        graph.set_parent(root, parent)?;
        self.descriptions
            .insert_descriptions(graph, root, descriptor.labels.as_ref())?;
        hierarchy.definition_index.insert(descriptor.id.clone(), root);

        if parent.is_none() {
            if let Some(parent_id) = descriptor.parent_id.as_deref().filter(|p| !p.is_empty()) {
                pending_parents.push((root, parent_id.to_string()));
            }
        }

        let mut children = Vec::new();
        for child in &arranged.children {
            children.push(self.build_definition(
                graph,
                descriptors,
                child,
                class,
                Some(root),
                hierarchy,
                pending_parents,
            )?);
        }

        Ok(DefinitionHierarchy { root, children })
    }
}

impl ModelGraph {
    /// Class a definition is filed under
    pub fn definition_class(&self, definition: NodeId) -> Option<NodeId> {
        match &self.get(definition)?.data {
            NodeData::Definition(data) => data.class,
            _ => None,
        }
    }

    /// Parent definition, if the node is a definition with one
    pub fn parent_definition(&self, definition: NodeId) -> Option<NodeId> {
        let parent = self.parent(definition)?;
        (self.get(parent)?.kind() == ModelKind::Definition).then_some(parent)
    }
}
