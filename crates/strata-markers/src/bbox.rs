// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bounding-box geometry: wireframes, radial fans from node centroids, and
//! solid boxes.

use glam::Vec3;
use strata_scene::{BoundingBox, Node, SceneGraphLayer, SemanticAttributes};

use crate::callbacks::{accepts, ColorFn, FilterFn};
use crate::color::Rgba;
use crate::config::{LayerConfig, VisualizerConfig};
use crate::marker::{Header, Marker, MarkerKind, Pose};
use crate::offset::{feature_offset, z_offset};

/// Number of edges in a box wireframe.
pub const WIREFRAME_EDGE_COUNT: usize = 12;

/// Corners of the top face (`+z`).
pub const TOP_CORNERS: [usize; 4] = [4, 5, 6, 7];

/// Corner index pairs forming a box wireframe.
///
/// Each corner `c` is joined to `c | bit` for every axis bit that is not
/// already set in `c`, which yields every one-bit-apart pair exactly once.
pub const WIREFRAME_EDGES: [(usize, usize); WIREFRAME_EDGE_COUNT] = wireframe_edges();

const fn wireframe_edges() -> [(usize, usize); WIREFRAME_EDGE_COUNT] {
    let mut edges = [(0, 0); WIREFRAME_EDGE_COUNT];
    let mut next = 0;
    let mut corner = 0;
    while corner < 8 {
        let mut bit = 1;
        while bit < 8 {
            if corner | bit != corner {
                edges[next] = (corner, corner | bit);
                next += 1;
            }
            bit <<= 1;
        }
        corner += 1;
    }
    edges
}

/// Appends the 12 wireframe segments of a box.
pub fn push_wireframe(marker: &mut Marker, corners: &[Vec3; 8], color: Rgba) {
    for (a, b) in WIREFRAME_EDGES {
        marker.push_segment(corners[a], corners[b], color);
    }
}

fn boxed_nodes<'a>(
    layer: &'a SceneGraphLayer,
    filter: Option<FilterFn<'a>>,
) -> impl Iterator<Item = (&'a Node, &'a SemanticAttributes)> + 'a {
    layer
        .nodes()
        .filter(move |node| accepts(filter, node))
        .filter_map(|node| node.semantic().map(|attrs| (node, attrs)))
}

/// Wireframes of every semantic node's bounding box in a layer.
///
/// Corners are in world space; the layer offset goes on the pose unless
/// `collapse_bounding_box` is set.
pub fn layer_wireframe_bounding_boxes(
    header: &Header,
    config: &LayerConfig,
    layer: &SceneGraphLayer,
    visualizer_config: &VisualizerConfig,
    ns: &str,
    color_fn: ColorFn<'_>,
    filter: Option<FilterFn<'_>>,
) -> Marker {
    let mut marker = Marker::line_list(header, ns, 0, config.bbox_wireframe_scale);
    marker.pose = Pose::lifted(feature_offset(
        config.collapse_bounding_box,
        config,
        visualizer_config,
    ));
    marker.points.reserve(2 * WIREFRAME_EDGE_COUNT * layer.num_nodes());
    marker.colors.reserve(2 * WIREFRAME_EDGE_COUNT * layer.num_nodes());

    for (node, attrs) in boxed_nodes(layer, filter) {
        let color = Rgba::from_color(color_fn(node), config.bounding_box_alpha);
        push_wireframe(&mut marker, &attrs.bounding_box.corners(), color);
    }
    marker
}

/// Fans from each node's centroid to the top corners of its bounding box.
///
/// Per node: one segment from the raised centroid down to a break point at
/// `mesh_edge_break_ratio` of the layer offset, then one segment from the
/// break point to each of the four top corners. Corners stay at their world
/// position, so the fan reaches down to the object itself.
pub fn edges_to_bounding_boxes(
    header: &Header,
    config: &LayerConfig,
    layer: &SceneGraphLayer,
    visualizer_config: &VisualizerConfig,
    ns: &str,
    color_fn: ColorFn<'_>,
    filter: Option<FilterFn<'_>>,
) -> Marker {
    let mut marker = Marker::line_list(header, ns, 0, config.bbox_wireframe_edge_scale);
    let layer_offset = z_offset(config, visualizer_config);
    marker.points.reserve(10 * layer.num_nodes());
    marker.colors.reserve(10 * layer.num_nodes());

    for (node, attrs) in boxed_nodes(layer, filter) {
        let color = Rgba::from_color(color_fn(node), config.bounding_box_alpha);
        let centroid = node.position() + Vec3::Z * layer_offset;
        let break_point =
            node.position() + Vec3::Z * (visualizer_config.mesh_edge_break_ratio * layer_offset);
        marker.push_segment(centroid, break_point, color);

        let corners = attrs.bounding_box.corners();
        for corner in TOP_CORNERS {
            marker.push_segment(break_point, corners[corner], color);
        }
    }
    marker
}

/// Solid box for one node, or `None` when the node has no bounding box.
pub fn bounding_box_marker(
    header: &Header,
    config: &LayerConfig,
    node: &Node,
    visualizer_config: &VisualizerConfig,
    ns: &str,
    color_fn: ColorFn<'_>,
) -> Option<Marker> {
    let bbox: &BoundingBox = &node.semantic()?.bounding_box;
    let mut marker = Marker::new(header, MarkerKind::Cube, ns, node.id);
    marker.color = Rgba::from_color(color_fn(node), config.bounding_box_alpha);
    let lift = feature_offset(config.collapse_bounding_box, config, visualizer_config);
    marker.pose = Pose::new(bbox.center + Vec3::Z * lift, bbox.rotation);
    marker.scale = bbox.dimensions;
    Some(marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callbacks::semantic_color;
    use glam::Quat;
    use std::collections::BTreeSet;
    use strata_scene::{Color, NodeAttributes, SceneGraph};

    #[test]
    fn wireframe_pairs_differ_in_one_bit() {
        let unique: BTreeSet<_> = WIREFRAME_EDGES.iter().copied().collect();
        assert_eq!(unique.len(), 12);
        for (a, b) in WIREFRAME_EDGES {
            assert!(a < b);
            assert_eq!((a ^ b).count_ones(), 1);
        }
    }

    #[test]
    fn top_corners_share_the_z_bit() {
        assert!(TOP_CORNERS.iter().all(|c| c & 0b100 != 0));
    }

    fn boxed_node() -> Node {
        let bbox = BoundingBox::new(
            Vec3::new(1.0, 2.0, 1.0),
            Quat::from_rotation_z(0.5),
            Vec3::new(2.0, 1.0, 1.0),
        );
        Node {
            id: 7,
            layer: 2,
            attributes: NodeAttributes::semantic(
                bbox.center,
                SemanticAttributes {
                    color: Color::new(0, 255, 0),
                    bounding_box: bbox,
                    ..SemanticAttributes::default()
                },
            ),
        }
    }

    fn lifted_config(collapse_bounding_box: bool) -> LayerConfig {
        LayerConfig {
            z_offset_scale: 1.0,
            collapse_bounding_box,
            ..LayerConfig::default()
        }
    }

    #[test]
    fn cube_copies_box_pose_and_dimensions() {
        let node = boxed_node();
        let visualizer = VisualizerConfig::default();
        let marker = bounding_box_marker(
            &Header::default(),
            &lifted_config(false),
            &node,
            &visualizer,
            "boxes",
            &semantic_color,
        )
        .unwrap();
        assert_eq!(marker.kind, MarkerKind::Cube);
        assert_eq!(marker.id, 7);
        assert_eq!(marker.scale, Vec3::new(2.0, 1.0, 1.0));
        assert_eq!(marker.pose.orientation, Quat::from_rotation_z(0.5));
        assert_eq!(marker.pose.position, Vec3::new(1.0, 2.0, 6.0));
        assert_eq!(marker.color, Rgba::new(0.0, 1.0, 0.0, 0.5));
    }

    #[test]
    fn collapsed_boxes_stay_at_ground_level() {
        let node = boxed_node();
        let visualizer = VisualizerConfig::default();
        let config = lifted_config(true);
        let cube = bounding_box_marker(
            &Header::default(),
            &config,
            &node,
            &visualizer,
            "boxes",
            &semantic_color,
        )
        .unwrap();
        assert_eq!(cube.pose.position, Vec3::new(1.0, 2.0, 1.0));

        let mut graph = SceneGraph::new([2]);
        graph.insert_node(node.id, 2, node.attributes).unwrap();
        for (collapse, lift) in [(false, 5.0), (true, 0.0)] {
            let marker = layer_wireframe_bounding_boxes(
                &Header::default(),
                &lifted_config(collapse),
                graph.layer(2).unwrap(),
                &visualizer,
                "wireframes",
                &semantic_color,
                None,
            );
            assert_eq!(marker.pose, Pose::lifted(lift));
            assert_eq!(marker.num_segments(), WIREFRAME_EDGE_COUNT);
        }
    }

    #[test]
    fn nodes_without_boxes_have_no_cube() {
        let node = Node {
            id: 1,
            layer: 2,
            attributes: NodeAttributes::generic(Vec3::ZERO),
        };
        assert!(bounding_box_marker(
            &Header::default(),
            &LayerConfig::default(),
            &node,
            &VisualizerConfig::default(),
            "boxes",
            &semantic_color,
        )
        .is_none());
    }
}
