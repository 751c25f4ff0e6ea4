// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene graph builders for tests.

use std::f32::consts::TAU;

use glam::Vec3;
use strata_scene::{
    BoundingBox, Color, EdgeAttributes, LayerId, NodeAttributes, NodeId, Place2dAttributes,
    PlaceAttributes, SceneError, SceneGraph, SemanticAttributes, TriangleMesh,
};

/// Layer id conventionally used for objects in fixtures.
pub const OBJECTS: LayerId = 2;
/// Layer id conventionally used for places in fixtures.
pub const PLACES: LayerId = 3;
/// Layer id conventionally used for rooms in fixtures.
pub const ROOMS: LayerId = 4;
/// Layer id conventionally used for agent trajectories in fixtures.
pub const AGENTS: LayerId = 2;

/// `count` points evenly spaced on a horizontal circle.
pub fn ring(center: Vec3, radius: f32, count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let t = i as f32 * TAU / count as f32;
            center + Vec3::new(radius * t.cos(), radius * t.sin(), 0.0)
        })
        .collect()
}

/// Fluent scene graph construction.
///
/// The first failing insertion is remembered and returned by
/// [`build`](Self::build); later calls are ignored.
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use strata_dry_tests::{SceneBuilder, OBJECTS, PLACES};
///
/// let graph = SceneBuilder::new([OBJECTS, PLACES])
///     .object(1, OBJECTS, Vec3::ZERO)
///     .place(2, PLACES, Vec3::Z, 1.0)
///     .edge(2, 1)
///     .build()
///     .unwrap();
/// assert_eq!(graph.interlayer_edges().count(), 1);
/// ```
#[derive(Debug)]
pub struct SceneBuilder {
    graph: SceneGraph,
    error: Option<SceneError>,
}

impl SceneBuilder {
    /// Builder over a graph with the given static layers.
    pub fn new(layers: impl IntoIterator<Item = LayerId>) -> Self {
        Self {
            graph: SceneGraph::new(layers),
            error: None,
        }
    }

    fn apply(mut self, op: impl FnOnce(&mut SceneGraph) -> Result<(), SceneError>) -> Self {
        if self.error.is_none() {
            if let Err(err) = op(&mut self.graph) {
                self.error = Some(err);
            }
        }
        self
    }

    /// Adds a node with explicit attributes.
    pub fn node(self, id: NodeId, layer: LayerId, attributes: NodeAttributes) -> Self {
        self.apply(|graph| graph.insert_node(id, layer, attributes))
    }

    /// Adds a semantic object with a unit bounding box centered on it.
    pub fn object(self, id: NodeId, layer: LayerId, position: Vec3) -> Self {
        self.colored_object(id, layer, position, Color::WHITE)
    }

    /// Adds a semantic object with the given color.
    pub fn colored_object(self, id: NodeId, layer: LayerId, position: Vec3, color: Color) -> Self {
        let semantic = SemanticAttributes {
            name: format!("O({id})"),
            color,
            bounding_box: BoundingBox::axis_aligned(position, Vec3::ONE),
            semantic_label: 0,
        };
        self.node(id, layer, NodeAttributes::semantic(position, semantic))
    }

    /// Adds a real place with obstacle distance `distance`.
    pub fn place(self, id: NodeId, layer: LayerId, position: Vec3, distance: f32) -> Self {
        let place = PlaceAttributes {
            distance,
            ..PlaceAttributes::default()
        };
        self.node(id, layer, NodeAttributes::place(position, place))
    }

    /// Adds a frontier (non-real) place with the given ellipsoid scale.
    pub fn frontier(self, id: NodeId, layer: LayerId, position: Vec3, scale: Vec3) -> Self {
        let place = PlaceAttributes {
            real_place: false,
            frontier_scale: scale,
            ..PlaceAttributes::default()
        };
        self.node(id, layer, NodeAttributes::place(position, place))
    }

    /// Adds a 2D place with the given boundary points.
    pub fn place_2d(self, id: NodeId, layer: LayerId, position: Vec3, boundary: Vec<Vec3>) -> Self {
        let place = Place2dAttributes {
            boundary,
            ellipse_centroid: position.truncate(),
            ..Place2dAttributes::default()
        };
        self.node(id, layer, NodeAttributes::place_2d(position, place))
    }

    /// Adds a 2D place connected to the given mesh vertices.
    pub fn meshed_place_2d(
        self,
        id: NodeId,
        layer: LayerId,
        position: Vec3,
        mesh_connections: Vec<usize>,
    ) -> Self {
        let place = Place2dAttributes {
            mesh_connections,
            ..Place2dAttributes::default()
        };
        self.node(id, layer, NodeAttributes::place_2d(position, place))
    }

    /// Adds an edge with unit weight.
    pub fn edge(self, source: NodeId, target: NodeId) -> Self {
        self.weighted_edge(source, target, 1.0)
    }

    /// Adds an edge with the given weight.
    pub fn weighted_edge(self, source: NodeId, target: NodeId, weight: f32) -> Self {
        self.apply(|graph| graph.insert_edge(source, target, EdgeAttributes::with_weight(weight)))
    }

    /// Appends one pose per position to the dynamic layer `(layer, prefix)`,
    /// linking consecutive poses.
    pub fn trajectory(
        self,
        layer: LayerId,
        prefix: char,
        positions: impl IntoIterator<Item = Vec3>,
    ) -> Self {
        self.apply(|graph| {
            for position in positions {
                graph.insert_dynamic_node(layer, prefix, NodeAttributes::generic(position), true)?;
            }
            Ok(())
        })
    }

    /// Attaches a surface mesh with the given vertices and no faces.
    pub fn mesh(mut self, vertices: Vec<Vec3>) -> Self {
        self.graph.set_mesh(TriangleMesh::new(vertices, Vec::new()));
        self
    }

    /// Finishes the graph, or reports the first insertion error.
    pub fn build(self) -> Result<SceneGraph, SceneError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.graph),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_scene::NodeSymbol;

    #[test]
    fn first_error_wins() {
        let result = SceneBuilder::new([OBJECTS])
            .object(1, OBJECTS, Vec3::ZERO)
            .object(1, OBJECTS, Vec3::ONE)
            .edge(1, 99)
            .build();
        assert!(matches!(result, Err(SceneError::DuplicateNode(_))));
    }

    #[test]
    fn trajectory_creates_linked_poses() {
        let graph = SceneBuilder::new([AGENTS])
            .trajectory(AGENTS, 'a', [Vec3::ZERO, Vec3::X, Vec3::Y])
            .build()
            .unwrap();
        let layer = graph.dynamic_layer(AGENTS, 'a').unwrap();
        assert_eq!(layer.num_nodes(), 3);
        assert_eq!(layer.edges().len(), 2);
        assert!(graph.has_node(NodeSymbol::new('a', 2).id()));
    }

    #[test]
    fn ring_has_requested_size() {
        let points = ring(Vec3::Z, 2.0, 6);
        assert_eq!(points.len(), 6);
        assert!(points.iter().all(|p| (p.truncate().length() - 2.0).abs() < 1e-5));
    }
}
