// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Marker builders for layered scene graphs.
//!
//! Every builder is a plain function of `(header, configs, scene data)` that
//! returns freshly allocated [`Marker`] batches. Nothing here mutates the
//! graph or keeps state between calls; per-call state such as the edge skip
//! counters lives on the stack of the aggregating function.
//!
//! Degenerate input (short boundaries, a missing mesh, out-of-range mesh
//! indices, nodes whose payload lacks the needed attributes) yields empty or
//! default-colored output rather than errors.
//!
//! # Layout
//!
//! | Module | Builds |
//! |---|---|
//! | [`boundary`] | ellipse and polygon outlines of 2D places |
//! | [`bbox`] | bounding-box wireframes, fans and solid boxes |
//! | [`centroid`] | centroid point clouds and frontier ellipsoids |
//! | [`edges`] | intra-layer and inter-layer edge batches |
//! | [`gvd`] | free-space graph wireframes |
//! | [`mesh`] | place-to-mesh fans |
//! | [`label`] | text labels |
//! | [`dynamic`] | trajectory points, edges and labels |

#![forbid(unsafe_code)]

pub mod bbox;
pub mod boundary;
mod callbacks;
pub mod centroid;
mod color;
mod config;
pub mod dynamic;
pub mod edges;
pub mod gvd;
pub mod label;
mod marker;
pub mod mesh;
mod offset;
mod sampling;

pub use bbox::{
    bounding_box_marker, edges_to_bounding_boxes, layer_wireframe_bounding_boxes, push_wireframe,
    WIREFRAME_EDGES,
};
pub use boundary::{layer_ellipse_boundaries, layer_polygon_boundaries, layer_polygon_edges};
pub use callbacks::{semantic_color, ColorFn, EdgeColorFn, EdgeEnd, FilterFn};
pub use centroid::{centroid_markers, frontier_ellipsoid_markers, place_centroid_markers};
pub use color::{distance_color, distance_ratio, Colormap, Rgba};
pub use config::{ConfigIssue, DynamicLayerConfig, LayerConfig, MarkerSettings, VisualizerConfig};
pub use dynamic::{
    dynamic_centroid_markers, dynamic_centroid_markers_uniform, dynamic_edge_markers,
    dynamic_label_marker,
};
pub use edges::{
    dynamic_graph_edge_markers, graph_edge_markers, layer_edge_markers,
    layer_edge_markers_by_weight, layer_edge_markers_uniform,
};
pub use gvd::{gvd_wireframe, gvd_wireframe_by_distance};
pub use label::{
    instance_id, semantic_text_marker, text_marker, text_marker_with_rng, LabelName, LabelNames,
    UNKNOWN_LABEL,
};
pub use marker::{delete_marker, Header, Marker, MarkerAction, MarkerKind, Pose};
pub use mesh::mesh_edges_marker;
pub use offset::{z_offset, z_offset_for_scale};
pub use sampling::InsertionSampler;
