// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Layered scene graph container.

use core::fmt;
use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::{
    DynamicLayer, Edge, EdgeAttributes, EdgeKey, LayerId, Mesh, Node, NodeAttributes, NodeId,
    NodeSymbol, SceneGraphLayer,
};

/// Error type for scene graph construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The layer was never registered.
    #[error("unknown layer: {0}")]
    UnknownLayer(LayerId),
    /// A node with this id already exists.
    #[error("node already exists: {0}")]
    DuplicateNode(NodeSymbol),
    /// An edge endpoint does not exist.
    #[error("missing node: {0}")]
    MissingNode(NodeSymbol),
    /// Both edge endpoints are the same node.
    #[error("self edge on node: {0}")]
    SelfEdge(NodeSymbol),
    /// Dynamic layer prefixes must be printable ASCII to fit a node symbol.
    #[error("invalid dynamic layer prefix: {0:?}")]
    InvalidPrefix(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeLocation {
    Static(LayerId),
    Dynamic(LayerId, char),
}

/// Layered scene graph: static layers, dynamic layers, cross-layer edges and an
/// optional surface mesh.
///
/// Every collection iterates in key order so traversals are deterministic.
#[derive(Clone, Default)]
pub struct SceneGraph {
    layers: BTreeMap<LayerId, SceneGraphLayer>,
    dynamic_layers: BTreeMap<LayerId, BTreeMap<char, DynamicLayer>>,
    locations: BTreeMap<NodeId, NodeLocation>,
    interlayer_edges: BTreeMap<EdgeKey, Edge>,
    dynamic_interlayer_edges: BTreeMap<EdgeKey, Edge>,
    mesh: Option<Arc<dyn Mesh + Send + Sync>>,
}

impl fmt::Debug for SceneGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneGraph")
            .field("layers", &self.layers)
            .field("dynamic_layers", &self.dynamic_layers)
            .field("interlayer_edges", &self.interlayer_edges)
            .field("dynamic_interlayer_edges", &self.dynamic_interlayer_edges)
            .field("has_mesh", &self.mesh.is_some())
            .finish_non_exhaustive()
    }
}

impl SceneGraph {
    /// Graph with the given static layers and nothing else.
    pub fn new(layer_ids: impl IntoIterator<Item = LayerId>) -> Self {
        Self {
            layers: layer_ids
                .into_iter()
                .map(|id| (id, SceneGraphLayer::new(id)))
                .collect(),
            ..Self::default()
        }
    }

    /// Inserts a node into a static layer.
    pub fn insert_node(
        &mut self,
        id: NodeId,
        layer: LayerId,
        attributes: NodeAttributes,
    ) -> Result<(), SceneError> {
        if self.locations.contains_key(&id) {
            return Err(SceneError::DuplicateNode(id.into()));
        }
        let target = self
            .layers
            .get_mut(&layer)
            .ok_or(SceneError::UnknownLayer(layer))?;
        target.insert_node(Node {
            id,
            layer,
            attributes,
        });
        self.locations.insert(id, NodeLocation::Static(layer));
        Ok(())
    }

    /// Appends a node to the dynamic layer `(layer, prefix)`, creating the
    /// layer on first use. With `link_previous`, an edge from the newest
    /// present node (skipping vacated slots) is added. Returns the new node id.
    ///
    /// `prefix` becomes the symbol category of every node id in the layer, so
    /// it must be printable ASCII.
    pub fn insert_dynamic_node(
        &mut self,
        layer: LayerId,
        prefix: char,
        attributes: NodeAttributes,
        link_previous: bool,
    ) -> Result<NodeId, SceneError> {
        if !prefix.is_ascii_graphic() {
            return Err(SceneError::InvalidPrefix(prefix));
        }
        let dynamic = self
            .dynamic_layers
            .entry(layer)
            .or_default()
            .entry(prefix)
            .or_insert_with(|| DynamicLayer::new(layer, prefix));
        let previous = dynamic.nodes().last().map(|node| node.id);
        let id = dynamic.push_node(attributes);
        if self.locations.contains_key(&id) {
            dynamic.remove_node(id);
            return Err(SceneError::DuplicateNode(id.into()));
        }
        if let Some(previous) = previous.filter(|_| link_previous) {
            dynamic.insert_edge(Edge {
                source: previous,
                target: id,
                info: EdgeAttributes::default(),
            });
        }
        self.locations
            .insert(id, NodeLocation::Dynamic(layer, prefix));
        Ok(id)
    }

    /// Inserts an edge, routing it to the owning layer (intra-layer), the
    /// inter-layer set, or the dynamic inter-layer set.
    ///
    /// For inter-layer edges `source` is treated as the parent.
    pub fn insert_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        info: EdgeAttributes,
    ) -> Result<(), SceneError> {
        if source == target {
            return Err(SceneError::SelfEdge(source.into()));
        }
        let source_loc = *self
            .locations
            .get(&source)
            .ok_or(SceneError::MissingNode(source.into()))?;
        let target_loc = *self
            .locations
            .get(&target)
            .ok_or(SceneError::MissingNode(target.into()))?;
        let edge = Edge {
            source,
            target,
            info,
        };

        match (source_loc, target_loc) {
            (NodeLocation::Static(a), NodeLocation::Static(b)) if a == b => {
                if let Some(layer) = self.layers.get_mut(&a) {
                    layer.insert_edge(edge);
                }
            }
            (NodeLocation::Static(_), NodeLocation::Static(_)) => {
                self.interlayer_edges.insert(edge.key(), edge);
            }
            (NodeLocation::Dynamic(a, p), NodeLocation::Dynamic(b, q)) if a == b && p == q => {
                if let Some(layer) = self
                    .dynamic_layers
                    .get_mut(&a)
                    .and_then(|layers| layers.get_mut(&p))
                {
                    layer.insert_edge(edge);
                }
            }
            _ => {
                self.dynamic_interlayer_edges.insert(edge.key(), edge);
            }
        }
        Ok(())
    }

    /// Removes a node together with every incident edge.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let location = self.locations.remove(&id)?;
        self.interlayer_edges
            .retain(|key, _| key.first() != id && key.second() != id);
        self.dynamic_interlayer_edges
            .retain(|key, _| key.first() != id && key.second() != id);
        match location {
            NodeLocation::Static(layer) => self.layers.get_mut(&layer)?.remove_node(id),
            NodeLocation::Dynamic(layer, prefix) => self
                .dynamic_layers
                .get_mut(&layer)?
                .get_mut(&prefix)?
                .remove_node(id),
        }
    }

    /// Attaches the surface mesh.
    pub fn set_mesh(&mut self, mesh: impl Mesh + Send + Sync + 'static) {
        self.mesh = Some(Arc::new(mesh));
    }

    /// Surface mesh, if any.
    pub fn mesh(&self) -> Option<&(dyn Mesh + Send + Sync)> {
        self.mesh.as_deref()
    }

    /// Static layer lookup.
    pub fn layer(&self, id: LayerId) -> Option<&SceneGraphLayer> {
        self.layers.get(&id)
    }

    /// Dynamic layer lookup.
    pub fn dynamic_layer(&self, layer: LayerId, prefix: char) -> Option<&DynamicLayer> {
        self.dynamic_layers.get(&layer)?.get(&prefix)
    }

    /// All dynamic layers ordered by `(layer, prefix)`.
    pub fn dynamic_layers(&self) -> impl Iterator<Item = &DynamicLayer> + '_ {
        self.dynamic_layers.values().flat_map(BTreeMap::values)
    }

    /// Node lookup across static and dynamic layers.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        match *self.locations.get(&id)? {
            NodeLocation::Static(layer) => self.layers.get(&layer)?.node(id),
            NodeLocation::Dynamic(layer, prefix) => self.dynamic_layer(layer, prefix)?.node(id),
        }
    }

    /// Whether the graph holds `id`.
    pub fn has_node(&self, id: NodeId) -> bool {
        self.locations.contains_key(&id)
    }

    /// Whether `id` lives in a dynamic layer.
    pub fn is_dynamic(&self, id: NodeId) -> bool {
        matches!(self.locations.get(&id), Some(NodeLocation::Dynamic(..)))
    }

    /// Total node count.
    pub fn num_nodes(&self) -> usize {
        self.locations.len()
    }

    /// Static-to-static edges crossing layers, in key order.
    pub fn interlayer_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.interlayer_edges.values()
    }

    /// Edges with at least one dynamic endpoint crossing layers, in key order.
    pub fn dynamic_interlayer_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.dynamic_interlayer_edges.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn edges_are_routed_by_endpoint_layers() {
        let mut graph = SceneGraph::new([1, 2]);
        graph
            .insert_node(1, 1, NodeAttributes::generic(Vec3::ZERO))
            .unwrap();
        graph
            .insert_node(2, 1, NodeAttributes::generic(Vec3::X))
            .unwrap();
        graph
            .insert_node(3, 2, NodeAttributes::generic(Vec3::Y))
            .unwrap();
        let agent = graph
            .insert_dynamic_node(2, 'a', NodeAttributes::generic(Vec3::Z), true)
            .unwrap();

        graph.insert_edge(1, 2, EdgeAttributes::default()).unwrap();
        graph.insert_edge(3, 1, EdgeAttributes::default()).unwrap();
        graph
            .insert_edge(agent, 3, EdgeAttributes::default())
            .unwrap();

        assert_eq!(graph.layer(1).unwrap().num_edges(), 1);
        assert_eq!(graph.interlayer_edges().count(), 1);
        assert_eq!(graph.dynamic_interlayer_edges().count(), 1);
        assert!(graph.is_dynamic(agent));
        assert!(!graph.is_dynamic(3));
    }

    #[test]
    fn insertion_errors_are_reported() {
        let mut graph = SceneGraph::new([1]);
        assert_eq!(
            graph.insert_node(1, 9, NodeAttributes::default()),
            Err(SceneError::UnknownLayer(9))
        );
        graph.insert_node(1, 1, NodeAttributes::default()).unwrap();
        assert_eq!(
            graph.insert_node(1, 1, NodeAttributes::default()),
            Err(SceneError::DuplicateNode(1.into()))
        );
        assert_eq!(
            graph.insert_edge(1, 5, EdgeAttributes::default()),
            Err(SceneError::MissingNode(5.into()))
        );
        assert_eq!(
            graph.insert_edge(1, 1, EdgeAttributes::default()),
            Err(SceneError::SelfEdge(1.into()))
        );
    }

    #[test]
    fn dynamic_prefix_must_be_printable_ascii() {
        let mut graph = SceneGraph::new([2]);
        for prefix in ['é', 'ü', ' ', '\0'] {
            assert_eq!(
                graph.insert_dynamic_node(2, prefix, NodeAttributes::default(), true),
                Err(SceneError::InvalidPrefix(prefix))
            );
        }
        assert_eq!(graph.dynamic_layers().count(), 0);
        assert_eq!(graph.num_nodes(), 0);
    }

    #[test]
    fn linking_skips_a_vacated_tail() {
        let mut graph = SceneGraph::new([2]);
        let first = graph
            .insert_dynamic_node(2, 'a', NodeAttributes::default(), true)
            .unwrap();
        let second = graph
            .insert_dynamic_node(2, 'a', NodeAttributes::default(), true)
            .unwrap();
        graph.remove_node(second).unwrap();
        let third = graph
            .insert_dynamic_node(2, 'a', NodeAttributes::default(), true)
            .unwrap();

        let layer = graph.dynamic_layer(2, 'a').unwrap();
        let edges: Vec<_> = layer.edges().map(|e| (e.source, e.target)).collect();
        assert_eq!(edges, vec![(first, third)]);
    }

    #[test]
    fn dynamic_layers_iterate_by_layer_then_prefix() {
        let mut graph = SceneGraph::default();
        for (layer, prefix) in [(3, 'b'), (2, 'z'), (3, 'a')] {
            graph
                .insert_dynamic_node(layer, prefix, NodeAttributes::default(), false)
                .unwrap();
        }
        let order: Vec<_> = graph
            .dynamic_layers()
            .map(|layer| (layer.id(), layer.prefix()))
            .collect();
        assert_eq!(order, vec![(2, 'z'), (3, 'a'), (3, 'b')]);
    }

    #[test]
    fn removing_a_node_drops_incident_edges() {
        let mut graph = SceneGraph::new([1, 2]);
        graph.insert_node(1, 1, NodeAttributes::default()).unwrap();
        graph.insert_node(2, 2, NodeAttributes::default()).unwrap();
        graph.insert_edge(2, 1, EdgeAttributes::default()).unwrap();

        assert!(graph.remove_node(1).is_some());
        assert_eq!(graph.interlayer_edges().count(), 0);
        assert!(graph.node(1).is_none());
    }
}
