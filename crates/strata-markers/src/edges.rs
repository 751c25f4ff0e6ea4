// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Edge batches.
//!
//! Inter-layer aggregators walk every cross-layer edge of the graph and group
//! the drawn segments into one line list per `(source layer, target layer)`
//! pair, named `{prefix}{source}_{target}`. Density is reduced with an
//! [`InsertionSampler`] per pair; pairs with no drawn edge produce no marker.
//!
//! The intra-layer builder produces one line list per layer and thins it with
//! a stride over the edge sequence instead.

use std::collections::BTreeMap;

use glam::Vec3;
use strata_scene::{Color, Edge, LayerId, Node, SceneGraph, SceneGraphLayer};
use tracing::{debug, instrument};

use crate::callbacks::{accepts, EdgeColorFn, EdgeEnd, FilterFn};
use crate::color::{distance_color, Colormap, Rgba};
use crate::config::{DynamicLayerConfig, LayerConfig, VisualizerConfig};
use crate::marker::{Header, Marker};
use crate::offset::{z_offset, z_offset_for_scale};
use crate::sampling::InsertionSampler;

type LayerPair = (LayerId, LayerId);

fn pair_namespace(prefix: &str, (source, target): LayerPair) -> String {
    format!("{prefix}{source}_{target}")
}

fn endpoints<'g>(graph: &'g SceneGraph, edge: &Edge) -> Option<(&'g Node, &'g Node)> {
    Some((graph.node(edge.source)?, graph.node(edge.target)?))
}

/// Inter-layer edges between static layers.
///
/// An edge is drawn when both endpoints pass `filter` and both endpoint layers
/// have a visible config. Skip count and style come from the source layer's
/// config. When `interlayer_edge_use_color` is set, the segment takes the
/// semantic color of the source (or target, per `use_edge_source`) endpoint;
/// both vertices get that same color.
///
/// Alpha is the source layer's `interlayer_edge_alpha`. Older renderers applied
/// `intralayer_edge_alpha` here, so settings tuned for them may need the
/// inter-layer value raised to match.
#[instrument(skip_all, fields(prefix = ns_prefix))]
pub fn graph_edge_markers(
    header: &Header,
    graph: &SceneGraph,
    configs: &BTreeMap<LayerId, LayerConfig>,
    visualizer_config: &VisualizerConfig,
    ns_prefix: &str,
    filter: Option<FilterFn<'_>>,
) -> Vec<Marker> {
    let mut batches: BTreeMap<LayerPair, Marker> = BTreeMap::new();
    let mut sampler = InsertionSampler::new();
    let mut considered = 0usize;

    for edge in graph.interlayer_edges() {
        let Some((source, target)) = endpoints(graph, edge) else {
            continue;
        };
        if !accepts(filter, source) || !accepts(filter, target) {
            continue;
        }
        let (Some(source_config), Some(target_config)) =
            (configs.get(&source.layer), configs.get(&target.layer))
        else {
            continue;
        };
        if !source_config.visualize || !target_config.visualize {
            continue;
        }
        considered += 1;

        let pair = (source.layer, target.layer);
        if !sampler.admit(pair, source_config.interlayer_edge_insertion_skip) {
            continue;
        }

        let marker = batches.entry(pair).or_insert_with(|| {
            Marker::line_list(
                header,
                pair_namespace(ns_prefix, pair),
                0,
                source_config.interlayer_edge_scale,
            )
        });

        let base = if source_config.interlayer_edge_use_color {
            let end = if source_config.use_edge_source {
                source
            } else {
                target
            };
            end.semantic().map(|s| s.color).unwrap_or_default()
        } else {
            Color::default()
        };
        let color = Rgba::from_color(base, source_config.interlayer_edge_alpha);
        marker.push_segment(
            source.position() + Vec3::Z * z_offset(source_config, visualizer_config),
            target.position() + Vec3::Z * z_offset(target_config, visualizer_config),
            color,
        );
    }

    debug!(
        considered,
        batches = batches.len(),
        "built inter-layer edge markers"
    );
    batches.into_values().collect()
}

enum EndpointStyle<'c> {
    Static(&'c LayerConfig),
    Dynamic(&'c DynamicLayerConfig),
}

impl EndpointStyle<'_> {
    fn offset(&self, visualizer_config: &VisualizerConfig) -> f32 {
        match self {
            Self::Static(config) => z_offset(config, visualizer_config),
            Self::Dynamic(config) => z_offset_for_scale(config.z_offset_scale, visualizer_config),
        }
    }
}

fn visible_style<'c>(
    graph: &SceneGraph,
    node: &Node,
    configs: &'c BTreeMap<LayerId, LayerConfig>,
    dynamic_configs: &'c BTreeMap<LayerId, DynamicLayerConfig>,
) -> Option<EndpointStyle<'c>> {
    if graph.is_dynamic(node.id) {
        dynamic_configs
            .get(&node.layer)
            .filter(|config| config.visualize && config.visualize_interlayer_edges)
            .map(EndpointStyle::Dynamic)
    } else {
        configs
            .get(&node.layer)
            .filter(|config| config.visualize)
            .map(EndpointStyle::Static)
    }
}

/// Inter-layer edges with at least one endpoint in a dynamic layer.
///
/// A dynamic endpoint is visible when its dynamic config has both `visualize`
/// and `visualize_interlayer_edges`; a static endpoint when its layer config
/// has `visualize`. The dynamic endpoint's config (the source's, if both are
/// dynamic) governs sampling and alpha. Batches have a uniform color and no
/// per-vertex colors.
#[instrument(skip_all, fields(prefix = ns_prefix))]
pub fn dynamic_graph_edge_markers(
    header: &Header,
    graph: &SceneGraph,
    configs: &BTreeMap<LayerId, LayerConfig>,
    dynamic_configs: &BTreeMap<LayerId, DynamicLayerConfig>,
    visualizer_config: &VisualizerConfig,
    ns_prefix: &str,
) -> Vec<Marker> {
    let mut batches: BTreeMap<LayerPair, Marker> = BTreeMap::new();
    let mut sampler = InsertionSampler::new();

    for edge in graph.dynamic_interlayer_edges() {
        let Some((source, target)) = endpoints(graph, edge) else {
            continue;
        };
        let Some(source_style) = visible_style(graph, source, configs, dynamic_configs) else {
            continue;
        };
        let Some(target_style) = visible_style(graph, target, configs, dynamic_configs) else {
            continue;
        };
        let governing = match (&source_style, &target_style) {
            (EndpointStyle::Dynamic(config), _) | (_, EndpointStyle::Dynamic(config)) => *config,
            _ => continue,
        };

        let pair = (source.layer, target.layer);
        if !sampler.admit(pair, governing.interlayer_edge_insertion_skip) {
            continue;
        }

        let marker = batches.entry(pair).or_insert_with(|| {
            let width = configs
                .get(&source.layer)
                .map_or(governing.edge_scale, |c| c.interlayer_edge_scale);
            let mut marker =
                Marker::line_list(header, pair_namespace(ns_prefix, pair), 0, width);
            marker.color = Rgba::from_color(Color::default(), governing.edge_alpha);
            marker
        });
        marker.push_uncolored_segment(
            source.position() + Vec3::Z * source_style.offset(visualizer_config),
            target.position() + Vec3::Z * target_style.offset(visualizer_config),
        );
    }

    debug!(batches = batches.len(), "built dynamic inter-layer edge markers");
    batches.into_values().collect()
}

/// Edges within one layer.
///
/// After each drawn edge the next `intralayer_edge_insertion_skip` edges are
/// passed over; an edge rejected by `filter` (or with an endpoint missing from
/// the layer) only advances past itself. Each drawn edge asks `color_fn` for
/// its source-side and target-side colors separately.
pub fn layer_edge_markers(
    header: &Header,
    config: &LayerConfig,
    layer: &SceneGraphLayer,
    visualizer_config: &VisualizerConfig,
    ns: &str,
    color_fn: EdgeColorFn<'_>,
    filter: Option<FilterFn<'_>>,
) -> Marker {
    let mut marker = Marker::line_list(header, ns, 0, config.intralayer_edge_scale);
    let lift = Vec3::Z * z_offset(config, visualizer_config);
    let skip = config.intralayer_edge_insertion_skip;

    let mut edges = layer.edges();
    while let Some(edge) = edges.next() {
        let (Some(source), Some(target)) = (layer.node(edge.source), layer.node(edge.target))
        else {
            continue;
        };
        if !accepts(filter, source) || !accepts(filter, target) {
            continue;
        }

        marker.push_segment_colored(
            source.position() + lift,
            Rgba::from_color(
                color_fn(source, target, edge, EdgeEnd::Source),
                config.intralayer_edge_alpha,
            ),
            target.position() + lift,
            Rgba::from_color(
                color_fn(source, target, edge, EdgeEnd::Target),
                config.intralayer_edge_alpha,
            ),
        );
        if skip > 0 {
            edges.nth(skip - 1);
        }
    }
    marker
}

/// [`layer_edge_markers`] with one color for every edge.
pub fn layer_edge_markers_uniform(
    header: &Header,
    config: &LayerConfig,
    layer: &SceneGraphLayer,
    visualizer_config: &VisualizerConfig,
    color: Color,
    ns: &str,
    filter: Option<FilterFn<'_>>,
) -> Marker {
    layer_edge_markers(
        header,
        config,
        layer,
        visualizer_config,
        ns,
        &|_, _, _, _| color,
        filter,
    )
}

/// [`layer_edge_markers`] colored by edge weight through `colormap`.
pub fn layer_edge_markers_by_weight(
    header: &Header,
    config: &LayerConfig,
    layer: &SceneGraphLayer,
    visualizer_config: &VisualizerConfig,
    colormap: &Colormap,
    ns: &str,
    filter: Option<FilterFn<'_>>,
) -> Marker {
    layer_edge_markers(
        header,
        config,
        layer,
        visualizer_config,
        ns,
        &|_, _, edge, _| distance_color(visualizer_config, colormap, edge.info.weight),
        filter,
    )
}
