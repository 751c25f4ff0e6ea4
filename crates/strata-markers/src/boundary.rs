// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Boundary curves of 2D places: fitted ellipses, stored polygons, and the
//! radial edges tying a polygon to its node.
//!
//! Nodes without a place-2d payload or with a boundary of at most one point
//! are skipped. Boundary geometry is drawn at the node's own height; the layer
//! offset goes on the marker pose unless `collapse_boundary` is set.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use strata_scene::{Color, Node, Place2dAttributes, SceneGraphLayer};

use crate::color::Rgba;
use crate::config::{LayerConfig, VisualizerConfig};
use crate::marker::{Header, Marker, Pose};
use crate::offset::{feature_offset, z_offset};

fn drawable_boundaries(
    layer: &SceneGraphLayer,
) -> impl Iterator<Item = (&Node, &Place2dAttributes)> + '_ {
    layer
        .nodes()
        .filter_map(|node| node.place_2d().map(|attrs| (node, attrs)))
        .filter(|(_, attrs)| attrs.boundary.len() > 1)
}

fn at_height(point: Vec2, z: f32) -> Vec3 {
    point.extend(z)
}

/// Closed ellipse per place-2d node, tessellated into
/// [`LayerConfig::ellipse_samples`] segments.
pub fn layer_ellipse_boundaries(
    header: &Header,
    config: &LayerConfig,
    layer: &SceneGraphLayer,
    visualizer_config: &VisualizerConfig,
    ns: &str,
) -> Marker {
    let mut marker = Marker::line_list(header, ns, 0, config.boundary_wireframe_scale);
    marker.pose = Pose::lifted(feature_offset(
        config.collapse_boundary,
        config,
        visualizer_config,
    ));

    let samples = config.ellipse_samples;
    for (node, attrs) in drawable_boundaries(layer) {
        let color = Rgba::from_color(attrs.semantic.color, config.boundary_ellipse_alpha);
        let z = node.position().z;
        let sample = |i: usize| {
            let t = i as f32 * TAU / samples as f32;
            at_height(
                attrs.ellipse_matrix * Vec2::new(t.cos(), t.sin()) + attrs.ellipse_centroid,
                z,
            )
        };

        let mut last = sample(0);
        for i in 1..=samples {
            let next = sample(i);
            marker.push_segment(last, next, color);
            last = next;
        }
    }
    marker
}

/// Closed loop through each node's stored boundary points.
pub fn layer_polygon_boundaries(
    header: &Header,
    config: &LayerConfig,
    layer: &SceneGraphLayer,
    visualizer_config: &VisualizerConfig,
    ns: &str,
) -> Marker {
    let mut marker = Marker::line_list(header, ns, 0, config.boundary_wireframe_scale);
    marker.pose = Pose::lifted(feature_offset(
        config.collapse_boundary,
        config,
        visualizer_config,
    ));

    for (node, attrs) in drawable_boundaries(layer) {
        let base = if config.boundary_use_node_color {
            attrs.semantic.color
        } else {
            Color::default()
        };
        let color = Rgba::from_color(base, config.boundary_alpha);
        let z = node.position().z;

        let mut last = attrs.boundary[attrs.boundary.len() - 1].truncate().extend(z);
        for point in &attrs.boundary {
            let next = point.truncate().extend(z);
            marker.push_segment(last, next, color);
            last = next;
        }
    }
    marker
}

/// One segment from every boundary point up to its node's centroid.
///
/// The centroid end is raised by the layer offset; the boundary end is raised
/// by the boundary offset, so the edges meet the curves drawn by
/// [`layer_polygon_boundaries`].
pub fn layer_polygon_edges(
    header: &Header,
    config: &LayerConfig,
    layer: &SceneGraphLayer,
    visualizer_config: &VisualizerConfig,
    ns: &str,
) -> Marker {
    let mut marker = Marker::line_list(header, ns, 0, config.boundary_wireframe_scale);
    let layer_offset = z_offset(config, visualizer_config);
    let boundary_offset = feature_offset(config.collapse_boundary, config, visualizer_config);

    for (node, attrs) in drawable_boundaries(layer) {
        let color = Rgba::from_color(attrs.semantic.color, config.boundary_alpha);
        let z = node.position().z;
        let centroid = node.position() + Vec3::Z * layer_offset;
        for point in &attrs.boundary {
            let boundary_point = point.truncate().extend(z + boundary_offset);
            marker.push_segment(boundary_point, centroid, color);
        }
    }
    marker
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Mat2;
    use strata_scene::{NodeAttributes, SceneGraph};

    fn square_place() -> NodeAttributes {
        NodeAttributes::place_2d(
            Vec3::new(0.0, 0.0, 1.0),
            Place2dAttributes {
                boundary: vec![
                    Vec3::new(-1.0, -1.0, 0.0),
                    Vec3::new(1.0, -1.0, 0.0),
                    Vec3::new(1.0, 1.0, 0.0),
                    Vec3::new(-1.0, 1.0, 0.0),
                ],
                ellipse_matrix: Mat2::from_diagonal(Vec2::new(2.0, 1.0)),
                ellipse_centroid: Vec2::new(0.5, 0.0),
                ..Place2dAttributes::default()
            },
        )
    }

    #[test]
    fn ellipse_closes_on_its_first_sample() {
        let mut graph = SceneGraph::new([3]);
        graph.insert_node(1, 3, square_place()).unwrap();
        let config = LayerConfig {
            ellipse_samples: 8,
            ..LayerConfig::default()
        };
        let marker = layer_ellipse_boundaries(
            &Header::default(),
            &config,
            graph.layer(3).unwrap(),
            &VisualizerConfig::default(),
            "ellipses",
        );
        assert_eq!(marker.num_segments(), 8);
        let first = marker.points[0];
        let last = marker.points[marker.points.len() - 1];
        assert_relative_eq!(first.x, 2.5);
        assert_relative_eq!(first.x, last.x, epsilon = 1e-5);
        assert_relative_eq!(first.y, last.y, epsilon = 1e-5);
        assert!(marker.points.iter().all(|p| p.z == 1.0));
    }

    #[test]
    fn polygon_loop_starts_from_last_vertex() {
        let mut graph = SceneGraph::new([3]);
        graph.insert_node(1, 3, square_place()).unwrap();
        let marker = layer_polygon_boundaries(
            &Header::default(),
            &LayerConfig::default(),
            graph.layer(3).unwrap(),
            &VisualizerConfig::default(),
            "polygons",
        );
        assert_eq!(marker.num_segments(), 4);
        assert_eq!(marker.points[0], Vec3::new(-1.0, 1.0, 1.0));
        assert_eq!(marker.points[1], Vec3::new(-1.0, -1.0, 1.0));
    }

    #[test]
    fn polygon_default_color_when_node_color_disabled() {
        let mut graph = SceneGraph::new([3]);
        let mut attrs = square_place();
        if let strata_scene::NodePayload::Place2d(place) = &mut attrs.payload {
            place.semantic.color = Color::new(255, 0, 0);
        }
        graph.insert_node(1, 3, attrs).unwrap();
        let config = LayerConfig {
            boundary_use_node_color: false,
            boundary_alpha: 0.3,
            ..LayerConfig::default()
        };
        let marker = layer_polygon_boundaries(
            &Header::default(),
            &config,
            graph.layer(3).unwrap(),
            &VisualizerConfig::default(),
            "polygons",
        );
        assert!(marker
            .colors
            .iter()
            .all(|c| *c == Rgba::new(0.0, 0.0, 0.0, 0.3)));
    }

    #[test]
    fn boundary_pose_follows_collapse_flag() {
        let mut graph = SceneGraph::new([3]);
        graph.insert_node(1, 3, square_place()).unwrap();
        let layer = graph.layer(3).unwrap();
        let visualizer = VisualizerConfig::default();
        for (collapse, lift) in [(false, 10.0), (true, 0.0)] {
            let config = LayerConfig {
                z_offset_scale: 2.0,
                collapse_boundary: collapse,
                ..LayerConfig::default()
            };
            let ellipses =
                layer_ellipse_boundaries(&Header::default(), &config, layer, &visualizer, "e");
            let polygons =
                layer_polygon_boundaries(&Header::default(), &config, layer, &visualizer, "p");
            for marker in [&ellipses, &polygons] {
                assert_eq!(marker.pose, Pose::lifted(lift));
                assert!(marker.points.iter().all(|p| p.z == 1.0));
            }
        }
    }

    #[test]
    fn polygon_edges_raise_centroid_by_layer_offset() {
        let mut graph = SceneGraph::new([3]);
        graph.insert_node(1, 3, square_place()).unwrap();
        let config = LayerConfig {
            z_offset_scale: 1.0,
            collapse_boundary: true,
            ..LayerConfig::default()
        };
        let marker = layer_polygon_edges(
            &Header::default(),
            &config,
            graph.layer(3).unwrap(),
            &VisualizerConfig::default(),
            "polygon_edges",
        );
        assert_eq!(marker.num_segments(), 4);
        for pair in marker.points.chunks(2) {
            assert_eq!(pair[0].z, 1.0);
            assert_eq!(pair[1], Vec3::new(0.0, 0.0, 6.0));
        }
    }
}
