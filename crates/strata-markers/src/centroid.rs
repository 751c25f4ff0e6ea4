// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Node centroid point clouds and frontier ellipsoids.

use glam::Vec3;
use strata_scene::{Node, PlaceAttributes, SceneGraphLayer};

use crate::callbacks::{accepts, ColorFn, FilterFn};
use crate::color::Rgba;
use crate::config::{LayerConfig, VisualizerConfig};
use crate::marker::{Header, Marker, MarkerKind, Pose};
use crate::offset::z_offset;

fn centroid_cloud<'a>(
    header: &Header,
    config: &LayerConfig,
    visualizer_config: &VisualizerConfig,
    ns: &str,
    nodes: impl Iterator<Item = &'a Node>,
    color_fn: ColorFn<'_>,
) -> Marker {
    let mut marker = Marker::point_list(
        header,
        ns,
        0,
        config.use_sphere_marker,
        config.marker_scale,
    );
    let lift = Vec3::Z * z_offset(config, visualizer_config);
    for node in nodes {
        marker.push_point(
            node.position() + lift,
            Rgba::from_color(color_fn(node), config.marker_alpha),
        );
    }
    marker
}

/// One point per node of `layer` that passes `filter`, raised by the layer
/// offset.
pub fn centroid_markers(
    header: &Header,
    config: &LayerConfig,
    layer: &SceneGraphLayer,
    visualizer_config: &VisualizerConfig,
    ns: &str,
    color_fn: ColorFn<'_>,
    filter: Option<FilterFn<'_>>,
) -> Marker {
    centroid_cloud(
        header,
        config,
        visualizer_config,
        ns,
        layer.nodes().filter(|node| accepts(filter, node)),
        color_fn,
    )
}

fn places_by_reality(
    layer: &SceneGraphLayer,
    real: bool,
) -> impl Iterator<Item = (&Node, &PlaceAttributes)> + '_ {
    layer
        .nodes()
        .filter_map(|node| node.place().map(|attrs| (node, attrs)))
        .filter(move |(_, attrs)| attrs.real_place == real)
}

/// Centroids of the real places in `layer`. Frontier places are left to
/// [`frontier_ellipsoid_markers`].
pub fn place_centroid_markers(
    header: &Header,
    config: &LayerConfig,
    layer: &SceneGraphLayer,
    visualizer_config: &VisualizerConfig,
    ns: &str,
    color_fn: ColorFn<'_>,
) -> Marker {
    centroid_cloud(
        header,
        config,
        visualizer_config,
        ns,
        places_by_reality(layer, true).map(|(node, _)| node),
        color_fn,
    )
}

/// One ellipsoid per frontier (non-real) place, sized by its
/// `frontier_scale`. Ids count up from 0 in node order.
pub fn frontier_ellipsoid_markers(
    header: &Header,
    config: &LayerConfig,
    layer: &SceneGraphLayer,
    visualizer_config: &VisualizerConfig,
    ns: &str,
    color_fn: ColorFn<'_>,
) -> Vec<Marker> {
    let lift = Vec3::Z * z_offset(config, visualizer_config);
    places_by_reality(layer, false)
        .zip(0u64..)
        .map(|((node, attrs), id)| {
            let mut marker = Marker::new(header, MarkerKind::Sphere, ns, id);
            marker.scale = attrs.frontier_scale;
            marker.pose = Pose::new(node.position() + lift, node.attributes.orientation);
            marker.color = Rgba::from_color(color_fn(node), config.marker_alpha);
            marker
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_scene::{Color, NodeAttributes, SceneGraph};

    fn place(real_place: bool, distance: f32) -> NodeAttributes {
        NodeAttributes::place(
            Vec3::new(distance, 0.0, 0.0),
            PlaceAttributes {
                distance,
                real_place,
                frontier_scale: Vec3::new(1.0, 2.0, 3.0),
                ..PlaceAttributes::default()
            },
        )
    }

    fn places() -> SceneGraph {
        let mut graph = SceneGraph::new([3]);
        graph.insert_node(1, 3, place(true, 1.0)).unwrap();
        graph.insert_node(2, 3, place(false, 2.0)).unwrap();
        graph.insert_node(3, 3, place(true, 3.0)).unwrap();
        graph.insert_node(4, 3, place(false, 4.0)).unwrap();
        graph
    }

    #[test]
    fn real_and_frontier_places_partition_the_layer() {
        let graph = places();
        let layer = graph.layer(3).unwrap();
        let config = LayerConfig::default();
        let visualizer = VisualizerConfig::default();
        let header = Header::default();
        let white = |_: &Node| Color::WHITE;

        let centroids =
            place_centroid_markers(&header, &config, layer, &visualizer, "places", &white);
        let frontiers =
            frontier_ellipsoid_markers(&header, &config, layer, &visualizer, "frontiers", &white);

        assert_eq!(centroids.points.len(), 2);
        assert_eq!(frontiers.len(), 2);
        assert_eq!(frontiers[0].id, 0);
        assert_eq!(frontiers[1].id, 1);
        assert_eq!(frontiers[1].pose.position.x, 4.0);
        assert_eq!(frontiers[0].scale, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(frontiers[0].kind, MarkerKind::Sphere);
    }

    #[test]
    fn filter_and_offset_apply_to_centroids() {
        let graph = places();
        let config = LayerConfig {
            z_offset_scale: 2.0,
            use_sphere_marker: true,
            ..LayerConfig::default()
        };
        let keep_far = |node: &Node| node.position().x > 1.5;
        let marker = centroid_markers(
            &Header::default(),
            &config,
            graph.layer(3).unwrap(),
            &VisualizerConfig::default(),
            "centroids",
            &|_| Color::WHITE,
            Some(&keep_far),
        );
        assert_eq!(marker.kind, MarkerKind::SphereList);
        assert_eq!(marker.points.len(), 3);
        assert!(marker.points.iter().all(|p| p.z == 10.0));
        assert_eq!(marker.colors.len(), marker.points.len());
    }
}
