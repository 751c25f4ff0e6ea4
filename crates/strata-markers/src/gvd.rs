// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Wireframe of a free-space graph (places layer): node spheres plus edges,
//! drawn at true height.

use glam::Vec3;
use strata_scene::{Node, SceneGraphLayer};

use crate::callbacks::ColorFn;
use crate::color::{distance_color, Colormap, Rgba};
use crate::config::{LayerConfig, VisualizerConfig};
use crate::marker::{Header, Marker, MarkerKind};

/// Node and edge batches (`{ns}_nodes`, `{ns}_edges`) for a layer.
///
/// An empty layer yields no markers; a layer without edges yields only the
/// node batch. Edge vertices take the color of the node they touch.
pub fn gvd_wireframe(
    header: &Header,
    config: &LayerConfig,
    layer: &SceneGraphLayer,
    ns: &str,
    color_fn: ColorFn<'_>,
    marker_id: u64,
) -> Vec<Marker> {
    if layer.num_nodes() == 0 {
        return Vec::new();
    }

    let node_color = |node: &Node| Rgba::from_color(color_fn(node), config.marker_alpha);

    let mut nodes = Marker::new(header, MarkerKind::SphereList, format!("{ns}_nodes"), marker_id);
    nodes.scale = Vec3::splat(config.intralayer_edge_scale);
    for node in layer.nodes() {
        nodes.push_point(node.position(), node_color(node));
    }

    if layer.num_edges() == 0 {
        return vec![nodes];
    }

    let mut edges = Marker::line_list(
        header,
        format!("{ns}_edges"),
        marker_id,
        config.intralayer_edge_scale,
    );
    for edge in layer.edges() {
        let (Some(source), Some(target)) = (layer.node(edge.source), layer.node(edge.target))
        else {
            continue;
        };
        edges.push_segment_colored(
            source.position(),
            node_color(source),
            target.position(),
            node_color(target),
        );
    }
    vec![nodes, edges]
}

/// [`gvd_wireframe`] colored by each place's obstacle distance. Nodes without
/// place attributes count as distance 0.
pub fn gvd_wireframe_by_distance(
    header: &Header,
    config: &LayerConfig,
    visualizer_config: &VisualizerConfig,
    layer: &SceneGraphLayer,
    ns: &str,
    colormap: &Colormap,
    marker_id: u64,
) -> Vec<Marker> {
    gvd_wireframe(
        header,
        config,
        layer,
        ns,
        &|node| {
            let distance = node.place().map_or(0.0, |place| place.distance);
            distance_color(visualizer_config, colormap, distance)
        },
        marker_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_scene::{Color, EdgeAttributes, NodeAttributes, SceneGraph};

    #[test]
    fn empty_layer_has_no_markers() {
        let graph = SceneGraph::new([3]);
        let markers = gvd_wireframe(
            &Header::default(),
            &LayerConfig::default(),
            graph.layer(3).unwrap(),
            "gvd",
            &|_| Color::WHITE,
            0,
        );
        assert!(markers.is_empty());
    }

    #[test]
    fn edgeless_layer_has_only_nodes() {
        let mut graph = SceneGraph::new([3]);
        graph.insert_node(1, 3, NodeAttributes::generic(Vec3::ONE)).unwrap();
        let markers = gvd_wireframe(
            &Header::default(),
            &LayerConfig::default(),
            graph.layer(3).unwrap(),
            "gvd",
            &|_| Color::WHITE,
            4,
        );
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].ns, "gvd_nodes");
        assert_eq!(markers[0].id, 4);
        assert_eq!(markers[0].points, vec![Vec3::ONE]);
    }

    #[test]
    fn edges_follow_nodes() {
        let mut graph = SceneGraph::new([3]);
        graph.insert_node(1, 3, NodeAttributes::generic(Vec3::ZERO)).unwrap();
        graph.insert_node(2, 3, NodeAttributes::generic(Vec3::X)).unwrap();
        graph.insert_edge(1, 2, EdgeAttributes::default()).unwrap();
        let markers = gvd_wireframe_by_distance(
            &Header::default(),
            &LayerConfig::default(),
            &VisualizerConfig::default(),
            graph.layer(3).unwrap(),
            "gvd",
            &Colormap::default(),
            0,
        );
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[1].ns, "gvd_edges");
        assert_eq!(markers[1].points, vec![Vec3::ZERO, Vec3::X]);
        assert_eq!(markers[1].colors.len(), 2);
    }
}
