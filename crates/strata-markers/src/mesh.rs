// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fans from 2D places down to the surface mesh vertices they cover.

use glam::Vec3;
use strata_scene::{Color, SceneGraph, SceneGraphLayer};

use crate::color::Rgba;
use crate::config::{LayerConfig, VisualizerConfig};
use crate::marker::{Header, Marker};
use crate::offset::z_offset;

/// Star of segments from each place-2d node to its mesh connections.
///
/// Per node with at least one connection: the raised centroid joins a break
/// point at `mesh_edge_break_ratio` of the layer offset, and the break point
/// joins every `(interlayer_edge_insertion_skip + 1)`-th connected mesh vertex.
/// Connections past the end of the mesh are dropped. Without a mesh the
/// marker is empty.
pub fn mesh_edges_marker(
    header: &Header,
    config: &LayerConfig,
    visualizer_config: &VisualizerConfig,
    graph: &SceneGraph,
    layer: &SceneGraphLayer,
    ns: &str,
) -> Marker {
    let mut marker = Marker::line_list(header, ns, 0, config.interlayer_edge_scale);
    let Some(mesh) = graph.mesh() else {
        return marker;
    };

    let layer_offset = z_offset(config, visualizer_config);
    let mesh_lift = if visualizer_config.collapse_layers {
        Vec3::ZERO
    } else {
        Vec3::Z * visualizer_config.mesh_layer_offset
    };
    let stride = config.interlayer_edge_insertion_skip + 1;

    for node in layer.nodes() {
        let Some(attrs) = node.place_2d() else {
            continue;
        };
        if attrs.mesh_connections.is_empty() {
            continue;
        }

        let base = if config.interlayer_edge_use_color {
            attrs.semantic.color
        } else {
            Color::default()
        };
        let color = Rgba::from_color(base, config.interlayer_edge_alpha);

        let break_point =
            node.position() + Vec3::Z * (visualizer_config.mesh_edge_break_ratio * layer_offset);
        marker.push_segment(node.position() + Vec3::Z * layer_offset, break_point, color);

        for &index in attrs.mesh_connections.iter().step_by(stride) {
            if let Some(vertex) = mesh.position(index) {
                marker.push_segment(break_point, vertex + mesh_lift, color);
            }
        }
    }
    marker
}
