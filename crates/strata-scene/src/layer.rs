// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Nodes, edges and the two layer flavors.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    EdgeAttributes, EdgeKey, LayerId, NodeAttributes, NodeId, NodeSymbol, Place2dAttributes,
    PlaceAttributes, SemanticAttributes,
};

/// Graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node identifier.
    pub id: NodeId,
    /// Owning layer.
    pub layer: LayerId,
    /// Pose and payload.
    pub attributes: NodeAttributes,
}

impl Node {
    /// World position.
    pub fn position(&self) -> Vec3 {
        self.attributes.position
    }

    /// See [`NodeAttributes::semantic_attributes`].
    pub fn semantic(&self) -> Option<&SemanticAttributes> {
        self.attributes.semantic_attributes()
    }

    /// See [`NodeAttributes::place_attributes`].
    pub fn place(&self) -> Option<&PlaceAttributes> {
        self.attributes.place_attributes()
    }

    /// See [`NodeAttributes::place_2d_attributes`].
    pub fn place_2d(&self) -> Option<&Place2dAttributes> {
        self.attributes.place_2d_attributes()
    }

    /// Symbol view of the id.
    pub fn symbol(&self) -> NodeSymbol {
        NodeSymbol::from(self.id)
    }
}

/// Graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node (parent for inter-layer edges).
    pub source: NodeId,
    /// Target node.
    pub target: NodeId,
    /// Edge attributes.
    pub info: EdgeAttributes,
}

impl Edge {
    /// Canonical key of the endpoint pair.
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.source, self.target)
    }
}

/// Static layer: nodes and intra-layer edges, both iterated in key order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneGraphLayer {
    id: LayerId,
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<EdgeKey, Edge>,
}

impl SceneGraphLayer {
    /// Empty layer.
    pub fn new(id: LayerId) -> Self {
        Self {
            id,
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
        }
    }

    /// Layer id.
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Edges in key order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    /// Node lookup.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Whether the layer owns `id`.
    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Node count.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Edge count.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn insert_node(&mut self, node: Node) {
        self.nodes.insert(node.id, node);
    }

    pub(crate) fn insert_edge(&mut self, edge: Edge) {
        self.edges.insert(edge.key(), edge);
    }

    pub(crate) fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let removed = self.nodes.remove(&id)?;
        self.edges.retain(|key, _| key.first() != id && key.second() != id);
        Some(removed)
    }
}

/// Time-ordered trajectory layer.
///
/// Node `i` has id `NodeSymbol::new(prefix, i)`. Removed nodes leave a vacant
/// slot so sequence indices stay stable.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicLayer {
    id: LayerId,
    prefix: char,
    nodes: Vec<Option<Node>>,
    edges: BTreeMap<EdgeKey, Edge>,
}

impl DynamicLayer {
    /// Empty dynamic layer.
    pub fn new(id: LayerId, prefix: char) -> Self {
        Self {
            id,
            prefix,
            nodes: Vec::new(),
            edges: BTreeMap::new(),
        }
    }

    /// Layer id.
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Symbol category shared by every node of this layer.
    pub fn prefix(&self) -> char {
        self.prefix
    }

    /// Present nodes in time order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().flatten()
    }

    /// Edges in key order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    /// Number of sequence slots, vacated ones included.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Node at sequence index `index`, if present.
    pub fn node_by_index(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index).and_then(Option::as_ref)
    }

    /// Node lookup by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        let symbol = NodeSymbol::from(id);
        if symbol.category() != self.prefix {
            return None;
        }
        usize::try_from(symbol.index())
            .ok()
            .and_then(|index| self.node_by_index(index))
    }

    /// Whether the layer owns `id`.
    pub fn has_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Position of node `id`.
    pub fn position(&self, id: NodeId) -> Option<Vec3> {
        self.node(id).map(Node::position)
    }

    /// Position of the node at sequence index `index`.
    pub fn position_by_index(&self, index: usize) -> Option<Vec3> {
        self.node_by_index(index).map(Node::position)
    }

    /// Position of the newest present node.
    pub fn latest_position(&self) -> Option<Vec3> {
        self.nodes.iter().rev().flatten().next().map(Node::position)
    }

    pub(crate) fn push_node(&mut self, attributes: NodeAttributes) -> NodeId {
        let id = NodeSymbol::new(self.prefix, self.nodes.len() as u64).id();
        self.nodes.push(Some(Node {
            id,
            layer: self.id,
            attributes,
        }));
        id
    }

    pub(crate) fn insert_edge(&mut self, edge: Edge) {
        self.edges.insert(edge.key(), edge);
    }

    pub(crate) fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let index = usize::try_from(NodeSymbol::from(id).index()).ok()?;
        let removed = self.nodes.get_mut(index)?.take()?;
        self.edges.retain(|key, _| key.first() != id && key.second() != id);
        Some(removed)
    }
}
