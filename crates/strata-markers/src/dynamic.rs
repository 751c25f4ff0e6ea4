// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Trajectory (dynamic layer) markers.

use glam::{Quat, Vec3};
use strata_scene::{Color, DynamicLayer};

use crate::callbacks::ColorFn;
use crate::color::Rgba;
use crate::config::{DynamicLayerConfig, VisualizerConfig};
use crate::marker::{Header, Marker, MarkerKind, Pose};
use crate::offset::z_offset_for_scale;

/// One point per present node in time order, raised by
/// `layer_offset_scale` layer steps.
pub fn dynamic_centroid_markers(
    header: &Header,
    config: &DynamicLayerConfig,
    layer: &DynamicLayer,
    layer_offset_scale: f32,
    visualizer_config: &VisualizerConfig,
    ns: &str,
    color_fn: ColorFn<'_>,
    marker_id: u64,
) -> Marker {
    let mut marker = Marker::point_list(
        header,
        ns,
        marker_id,
        config.node_use_sphere,
        config.node_scale,
    );
    let lift = Vec3::Z * z_offset_for_scale(layer_offset_scale, visualizer_config);
    marker.points.reserve(layer.num_nodes());
    marker.colors.reserve(layer.num_nodes());
    for node in layer.nodes() {
        marker.push_point(
            node.position() + lift,
            Rgba::from_color(color_fn(node), config.node_alpha),
        );
    }
    marker
}

/// [`dynamic_centroid_markers`] in one color at the layer's own offset.
pub fn dynamic_centroid_markers_uniform(
    header: &Header,
    config: &DynamicLayerConfig,
    layer: &DynamicLayer,
    visualizer_config: &VisualizerConfig,
    color: Color,
    ns: &str,
    marker_id: u64,
) -> Marker {
    dynamic_centroid_markers(
        header,
        config,
        layer,
        config.z_offset_scale,
        visualizer_config,
        ns,
        &|_| color,
        marker_id,
    )
}

/// Trajectory edges of a dynamic layer in one uniform color.
///
/// Edges with a vacated endpoint are left out.
pub fn dynamic_edge_markers(
    header: &Header,
    config: &DynamicLayerConfig,
    layer: &DynamicLayer,
    visualizer_config: &VisualizerConfig,
    color: Color,
    ns: &str,
    marker_id: u64,
) -> Marker {
    let mut marker = Marker::line_list(header, ns, marker_id, config.edge_scale);
    marker.color = Rgba::from_color(color, config.edge_alpha);
    let lift = Vec3::Z * z_offset_for_scale(config.z_offset_scale, visualizer_config);
    for edge in layer.edges() {
        if let (Some(source), Some(target)) =
            (layer.position(edge.source), layer.position(edge.target))
        {
            marker.push_uncolored_segment(source + lift, target + lift);
        }
    }
    marker
}

/// Label above the newest node of a dynamic layer, or `None` when the layer
/// has no nodes.
pub fn dynamic_label_marker(
    header: &Header,
    config: &DynamicLayerConfig,
    layer: &DynamicLayer,
    visualizer_config: &VisualizerConfig,
    ns: &str,
    marker_id: u64,
) -> Option<Marker> {
    let latest = layer.latest_position()?;
    let mut marker = Marker::new(header, MarkerKind::TextViewFacing, ns, marker_id);
    marker.text.clone_from(&config.label_text);
    marker.scale.z = config.label_scale;
    marker.color = Rgba::opaque(Color::default());
    let z = z_offset_for_scale(config.z_offset_scale, visualizer_config) + config.label_height;
    marker.pose = Pose::new(latest + Vec3::Z * z, Quat::IDENTITY);
    Some(marker)
}
