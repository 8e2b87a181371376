use crate::errors::Result;
use crate::{log_op_result, log_op_start};
use crate::model::{ModelKind, NodeId};

use super::graph::ModelGraph;

/// Merge `ancestor`'s content into `descendant`
///
/// For every collection of the node kind:
/// - an ancestor entry the descendant lacks is listed in the descendant's
///   collection as is, keeping the ancestor as its parent
/// - an entry present on both sides gets its `reference` pointed at the
///   ancestor's node, and the pair is merged recursively
///
/// Running it twice is harmless: already shared entries are skipped.
///
/// # Errors
///
/// Returns `NodeNotFound` for foreign handles, `UnexpectedKind` when the
/// two nodes are of different kinds.
pub fn link_inheritance(graph: &mut ModelGraph, descendant: NodeId, ancestor: NodeId) -> Result<()> {
    let kind = graph.expect_kind(descendant, graph.kind(ancestor)?)?.kind();
    let start = std::time::Instant::now();
    log_op_start!("link_inheritance", node_kind = %kind);

    let result = merge(graph, descendant, ancestor, kind);

    log_op_result!("link_inheritance", start, result)
}

fn merge(graph: &mut ModelGraph, descendant: NodeId, ancestor: NodeId, kind: ModelKind) -> Result<()> {
    for child_kind in kind.child_kinds() {
        let inherited: Vec<(String, NodeId)> = graph
            .collection(ancestor, *child_kind)
            .map(|list| list.iter().map(|(id, n)| (id.to_string(), *n)).collect())
            .unwrap_or_default();

        for (id, ancestor_child) in inherited {
            match graph.child(descendant, *child_kind, &id) {
                None => {
                    graph.insert_child(descendant, ancestor_child)?;
                }
                Some(local) if local == ancestor_child => {}
                Some(local) => {
                    graph.set_reference(local, Some(ancestor_child))?;
                    merge(graph, local, ancestor_child, *child_kind)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeData;

    fn owned(graph: &mut ModelGraph, owner: NodeId, id: &str, kind: ModelKind) -> NodeId {
        let node = graph.add_node(id, NodeData::empty(kind));
        graph.set_parent(node, Some(owner)).unwrap();
        graph.insert_child(owner, node).unwrap();
        node
    }

    #[test]
    fn test_missing_entries_are_shared() {
        let mut graph = ModelGraph::new();
        let entity = graph.add_base_node("entity", NodeData::empty(ModelKind::Definition));
        let media = graph.add_base_node("media", NodeData::empty(ModelKind::Definition));
        let field = owned(&mut graph, entity, "created", ModelKind::Field);

        link_inheritance(&mut graph, media, entity).unwrap();

        assert_eq!(graph.child(media, ModelKind::Field, "created"), Some(field));
        assert_eq!(graph.parent(field), Some(entity));
        assert!(graph.is_inherited_in(field, media));
    }

    #[test]
    fn test_shared_ids_get_reference() {
        let mut graph = ModelGraph::new();
        let entity = graph.add_base_node("entity", NodeData::empty(ModelKind::Definition));
        let media = graph.add_base_node("media", NodeData::empty(ModelKind::Definition));
        let ancestor_field = owned(&mut graph, entity, "title", ModelKind::Field);
        let ancestor_label = owned(&mut graph, ancestor_field, "label", ModelKind::Attribute);
        let local_field = owned(&mut graph, media, "title", ModelKind::Field);

        link_inheritance(&mut graph, media, entity).unwrap();

        assert_eq!(graph.reference(local_field), Some(ancestor_field));
        assert_eq!(graph.attribute(local_field, "label"), Some(ancestor_label));
        assert!(graph.is_inherited(local_field));
    }

    #[test]
    fn test_linking_twice_is_idempotent() {
        let mut graph = ModelGraph::new();
        let entity = graph.add_base_node("entity", NodeData::empty(ModelKind::Definition));
        let media = graph.add_base_node("media", NodeData::empty(ModelKind::Definition));
        owned(&mut graph, entity, "created", ModelKind::Field);

        link_inheritance(&mut graph, media, entity).unwrap();
        let before = graph.children(media, ModelKind::Field);
        link_inheritance(&mut graph, media, entity).unwrap();

        assert_eq!(graph.children(media, ModelKind::Field), before);
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let mut graph = ModelGraph::new();
        let class = graph.add_base_node("Document", NodeData::Class);
        let def = graph.add_base_node("PR0001", NodeData::empty(ModelKind::Definition));
        assert!(link_inheritance(&mut graph, def, class).is_err());
    }
}
