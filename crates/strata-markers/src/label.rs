// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Text labels for nodes.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use glam::{Quat, Vec3};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strata_scene::{Color, Node};
use tracing::warn;

use crate::color::Rgba;
use crate::config::{LayerConfig, VisualizerConfig};
use crate::marker::{Header, Marker, MarkerKind, Pose};
use crate::offset::z_offset;

/// Text shown when a semantic label has no registered name.
pub const UNKNOWN_LABEL: &str = "Unknown";

fn label_text(node: &Node) -> String {
    match node.semantic() {
        Some(attrs) if !attrs.name.is_empty() => attrs.name.clone(),
        _ => node.symbol().label(),
    }
}

fn text_at(header: &Header, ns: &str, node: &Node, text: String, scale: f32, z: f32) -> Marker {
    let mut marker = Marker::new(header, MarkerKind::TextViewFacing, ns, node.id);
    marker.text = text;
    marker.scale.z = scale;
    marker.color = Rgba::opaque(Color::default());
    marker.pose = Pose::new(node.position() + Vec3::Z * z, Quat::IDENTITY);
    marker
}

/// Label above `node`: its semantic name, or its symbol (`O(12)`) when it has
/// none.
///
/// With `add_label_jitter` the label is moved along z by a uniform draw from
/// `[-label_jitter_scale, label_jitter_scale]` taken from `rng`.
pub fn text_marker_with_rng<R>(
    header: &Header,
    config: &LayerConfig,
    node: &Node,
    visualizer_config: &VisualizerConfig,
    ns: &str,
    rng: &mut R,
) -> Marker
where
    R: Rng,
{
    let mut z = z_offset(config, visualizer_config) + config.label_height;
    if config.add_label_jitter {
        z += config.label_jitter_scale * rng.gen_range(-1.0f32..=1.0);
    }
    text_at(header, ns, node, label_text(node), config.label_scale, z)
}

/// [`text_marker_with_rng`] drawing jitter from the thread-local generator.
pub fn text_marker(
    header: &Header,
    config: &LayerConfig,
    node: &Node,
    visualizer_config: &VisualizerConfig,
    ns: &str,
) -> Marker {
    text_marker_with_rng(
        header,
        config,
        node,
        visualizer_config,
        ns,
        &mut rand::thread_rng(),
    )
}

/// Display names for semantic label ids.
pub trait LabelNames {
    /// Name registered for `semantic_label`, if any.
    fn label_name(&self, semantic_label: u32) -> Option<&str>;
}

impl LabelNames for BTreeMap<u32, String> {
    fn label_name(&self, semantic_label: u32) -> Option<&str> {
        self.get(&semantic_label).map(String::as_str)
    }
}

/// One `label → name` entry, as stored in label tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelName {
    /// Semantic label id.
    pub label: u32,
    /// Display name.
    pub name: String,
}

impl LabelNames for [LabelName] {
    fn label_name(&self, semantic_label: u32) -> Option<&str> {
        self.iter()
            .find(|entry| entry.label == semantic_label)
            .map(|entry| entry.name.as_str())
    }
}

impl LabelNames for Vec<LabelName> {
    fn label_name(&self, semantic_label: u32) -> Option<&str> {
        self.as_slice().label_name(semantic_label)
    }
}

fn instance_id_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\w\((\d+)\)").ok())
        .as_ref()
}

/// Number inside a `X(123)` style name, if present.
pub fn instance_id(name: &str) -> Option<&str> {
    instance_id_pattern()?
        .captures(name)?
        .get(1)
        .map(|m| m.as_str())
}

/// Label reading `"{class name}({instance id})"`, anchored `label_height`
/// above the node's true position (no layer offset).
///
/// The class name comes from `names` keyed by the node's semantic label and
/// falls back to [`UNKNOWN_LABEL`]. The instance id is the number inside the
/// node name; when the name has none, the whole name is used.
pub fn semantic_text_marker(
    header: &Header,
    config: &LayerConfig,
    node: &Node,
    ns: &str,
    names: &(impl LabelNames + ?Sized),
) -> Marker {
    let full_name = label_text(node);
    let instance = match instance_id(&full_name) {
        Some(id) => id.to_owned(),
        None => {
            warn!(name = %full_name, "no instance id in node name");
            full_name.clone()
        }
    };

    let semantic_label = node.semantic().map_or(0, |attrs| attrs.semantic_label);
    let class = names.label_name(semantic_label).unwrap_or_else(|| {
        warn!(semantic_label, "no name registered for semantic label");
        UNKNOWN_LABEL
    });

    text_at(
        header,
        ns,
        node,
        format!("{class}({instance})"),
        config.label_scale,
        config.label_height,
    )
}
