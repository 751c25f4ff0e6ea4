// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rendering settings consumed by the builders.
//!
//! All structs are plain values with `#[serde(default)]`, so a partial JSON
//! document yields a complete config. Builders only ever read them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strata_config::{ConfigError, ConfigService, ConfigStore};
use strata_scene::LayerId;
use thiserror::Error;
use tracing::warn;

use crate::color::Colormap;

/// Per-layer rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    /// Draw this layer at all.
    pub visualize: bool,
    /// Multiplier on [`VisualizerConfig::layer_z_step`].
    pub z_offset_scale: f32,
    /// Centroid point size.
    pub marker_scale: f32,
    /// Centroid alpha.
    pub marker_alpha: f32,
    /// Spheres instead of cubes for centroids.
    pub use_sphere_marker: bool,
    /// Label height above the node.
    pub label_height: f32,
    /// Label text size.
    pub label_scale: f32,
    /// Jitter labels vertically to reduce overlap.
    pub add_label_jitter: bool,
    /// Maximum vertical label jitter.
    pub label_jitter_scale: f32,
    /// Draw bounding boxes at ground level instead of the layer height.
    pub collapse_bounding_box: bool,
    /// Bounding-box wireframe line width.
    pub bbox_wireframe_scale: f32,
    /// Line width of edges from centroids to bounding boxes.
    pub bbox_wireframe_edge_scale: f32,
    /// Bounding-box alpha.
    pub bounding_box_alpha: f32,
    /// Draw boundaries at ground level instead of the layer height.
    pub collapse_boundary: bool,
    /// Boundary line width.
    pub boundary_wireframe_scale: f32,
    /// Boundary polygon alpha.
    pub boundary_alpha: f32,
    /// Boundary ellipse alpha.
    pub boundary_ellipse_alpha: f32,
    /// Color boundaries by node color (otherwise the default color).
    pub boundary_use_node_color: bool,
    /// Segments per fitted ellipse.
    pub ellipse_samples: usize,
    /// Intra-layer edge line width.
    pub intralayer_edge_scale: f32,
    /// Intra-layer edge alpha.
    pub intralayer_edge_alpha: f32,
    /// Intra-layer edges skipped after each drawn edge.
    pub intralayer_edge_insertion_skip: usize,
    /// Inter-layer edge line width.
    pub interlayer_edge_scale: f32,
    /// Inter-layer edge alpha.
    pub interlayer_edge_alpha: f32,
    /// Inter-layer edges skipped after each drawn edge.
    pub interlayer_edge_insertion_skip: usize,
    /// Color inter-layer edges by an endpoint's node color.
    pub interlayer_edge_use_color: bool,
    /// Use the source endpoint's color (otherwise the target's).
    pub use_edge_source: bool,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            visualize: true,
            z_offset_scale: 0.0,
            marker_scale: 0.1,
            marker_alpha: 1.0,
            use_sphere_marker: false,
            label_height: 1.0,
            label_scale: 0.25,
            add_label_jitter: false,
            label_jitter_scale: 0.2,
            collapse_bounding_box: false,
            bbox_wireframe_scale: 0.1,
            bbox_wireframe_edge_scale: 0.01,
            bounding_box_alpha: 0.5,
            collapse_boundary: false,
            boundary_wireframe_scale: 0.1,
            boundary_alpha: 0.5,
            boundary_ellipse_alpha: 0.5,
            boundary_use_node_color: true,
            ellipse_samples: 20,
            intralayer_edge_scale: 0.03,
            intralayer_edge_alpha: 1.0,
            intralayer_edge_insertion_skip: 0,
            interlayer_edge_scale: 0.03,
            interlayer_edge_alpha: 1.0,
            interlayer_edge_insertion_skip: 0,
            interlayer_edge_use_color: true,
            use_edge_source: true,
        }
    }
}

/// Settings shared by all layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Vertical distance between stacked layers.
    pub layer_z_step: f32,
    /// Draw every layer at its true height.
    pub collapse_layers: bool,
    /// Fraction of the layer offset at which radial edges break.
    pub mesh_edge_break_ratio: f32,
    /// Vertical offset of surface mesh vertices.
    pub mesh_layer_offset: f32,
    /// Distance mapped to the start of the colormap.
    pub places_colormap_min_distance: f32,
    /// Distance mapped to the end of the colormap.
    pub places_colormap_max_distance: f32,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            layer_z_step: 5.0,
            collapse_layers: false,
            mesh_edge_break_ratio: 0.5,
            mesh_layer_offset: 0.0,
            places_colormap_min_distance: 0.0,
            places_colormap_max_distance: 2.5,
        }
    }
}

/// Settings for one dynamic (trajectory) layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicLayerConfig {
    /// Draw this layer at all.
    pub visualize: bool,
    /// Node point size.
    pub node_scale: f32,
    /// Node alpha.
    pub node_alpha: f32,
    /// Spheres instead of cubes for nodes.
    pub node_use_sphere: bool,
    /// Edge line width.
    pub edge_scale: f32,
    /// Edge alpha.
    pub edge_alpha: f32,
    /// Multiplier on [`VisualizerConfig::layer_z_step`].
    pub z_offset_scale: f32,
    /// Label height above the newest node.
    pub label_height: f32,
    /// Label text size.
    pub label_scale: f32,
    /// Label text.
    pub label_text: String,
    /// Draw edges between this layer and static layers.
    pub visualize_interlayer_edges: bool,
    /// Inter-layer edges skipped after each drawn edge.
    pub interlayer_edge_insertion_skip: usize,
}

impl Default for DynamicLayerConfig {
    fn default() -> Self {
        Self {
            visualize: true,
            node_scale: 0.2,
            node_alpha: 0.9,
            node_use_sphere: false,
            edge_scale: 0.1,
            edge_alpha: 0.5,
            z_offset_scale: 0.0,
            label_height: 1.0,
            label_scale: 0.5,
            label_text: "Agent".to_owned(),
            visualize_interlayer_edges: false,
            interlayer_edge_insertion_skip: 0,
        }
    }
}

/// Configuration that is self-evidently wrong for drawing.
///
/// Builders never fail on these; they substitute safe defaults. Callers that
/// want to surface the problem call the `validate` methods.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigIssue {
    /// Colormap range is empty or inverted; distance colors fall back to the default color.
    #[error("colormap range is empty or inverted: min {min} >= max {max}")]
    InvertedColormapRange {
        /// Configured minimum distance.
        min: f32,
        /// Configured maximum distance.
        max: f32,
    },
    /// An alpha lies outside `[0, 1]`.
    #[error("{field} = {value} is outside [0, 1]")]
    AlphaOutOfRange {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: f32,
    },
    /// A scalar that must be finite is not.
    #[error("{field} is not finite")]
    NonFinite {
        /// Offending field.
        field: &'static str,
    },
}

impl VisualizerConfig {
    /// Reports the first configuration problem, if any.
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        for (field, value) in [
            ("layer_z_step", self.layer_z_step),
            ("mesh_edge_break_ratio", self.mesh_edge_break_ratio),
            ("mesh_layer_offset", self.mesh_layer_offset),
        ] {
            if !value.is_finite() {
                return Err(ConfigIssue::NonFinite { field });
            }
        }
        let (min, max) = (
            self.places_colormap_min_distance,
            self.places_colormap_max_distance,
        );
        if max <= min || !min.is_finite() || !max.is_finite() {
            return Err(ConfigIssue::InvertedColormapRange { min, max });
        }
        Ok(())
    }
}

fn check_alpha(field: &'static str, value: f32) -> Result<(), ConfigIssue> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigIssue::AlphaOutOfRange { field, value })
    }
}

impl LayerConfig {
    /// Reports the first configuration problem, if any.
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        check_alpha("marker_alpha", self.marker_alpha)?;
        check_alpha("bounding_box_alpha", self.bounding_box_alpha)?;
        check_alpha("boundary_alpha", self.boundary_alpha)?;
        check_alpha("boundary_ellipse_alpha", self.boundary_ellipse_alpha)?;
        check_alpha("intralayer_edge_alpha", self.intralayer_edge_alpha)?;
        check_alpha("interlayer_edge_alpha", self.interlayer_edge_alpha)?;
        if !self.z_offset_scale.is_finite() {
            return Err(ConfigIssue::NonFinite {
                field: "z_offset_scale",
            });
        }
        Ok(())
    }
}

impl DynamicLayerConfig {
    /// Reports the first configuration problem, if any.
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        check_alpha("node_alpha", self.node_alpha)?;
        check_alpha("edge_alpha", self.edge_alpha)?;
        if !self.z_offset_scale.is_finite() {
            return Err(ConfigIssue::NonFinite {
                field: "z_offset_scale",
            });
        }
        Ok(())
    }
}

/// Everything a full marker pass needs, loadable as one JSON document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSettings {
    /// Global settings.
    pub visualizer: VisualizerConfig,
    /// Colormap for distance coloring.
    pub colormap: Colormap,
    /// Per static layer settings; layers without an entry are not drawn.
    pub layers: BTreeMap<LayerId, LayerConfig>,
    /// Per dynamic layer settings.
    pub dynamic_layers: BTreeMap<LayerId, DynamicLayerConfig>,
}

impl MarkerSettings {
    /// Loads settings stored under `key`, falling back to defaults when the
    /// key is missing. Validation problems are logged, not returned.
    pub fn load<S>(service: &ConfigService<S>, key: &str) -> Result<Self, ConfigError>
    where
        S: ConfigStore,
    {
        let settings: Self = service.load_or_default(key)?;
        for issue in settings.issues() {
            warn!(key, %issue, "marker settings issue; builders will substitute defaults");
        }
        Ok(settings)
    }

    /// Persists settings under `key`.
    pub fn save<S>(&self, service: &ConfigService<S>, key: &str) -> Result<(), ConfigError>
    where
        S: ConfigStore,
    {
        service.save(key, self)
    }

    /// Every validation problem across all contained configs.
    pub fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.visualizer.validate().err());
        issues.extend(self.layers.values().filter_map(|c| c.validate().err()));
        issues.extend(
            self.dynamic_layers
                .values()
                .filter_map(|c| c.validate().err()),
        );
        issues
    }

    /// Config for static layer `id`.
    pub fn layer(&self, id: LayerId) -> Option<&LayerConfig> {
        self.layers.get(&id)
    }

    /// Config for dynamic layer `id`.
    pub fn dynamic_layer(&self, id: LayerId) -> Option<&DynamicLayerConfig> {
        self.dynamic_layers.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(VisualizerConfig::default().validate(), Ok(()));
        assert_eq!(LayerConfig::default().validate(), Ok(()));
        assert_eq!(DynamicLayerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn inverted_colormap_range_is_reported() {
        let config = VisualizerConfig {
            places_colormap_min_distance: 2.0,
            places_colormap_max_distance: 2.0,
            ..VisualizerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigIssue::InvertedColormapRange { min: 2.0, max: 2.0 })
        );
    }

    #[test]
    fn alpha_out_of_range_is_reported() {
        let config = LayerConfig {
            boundary_alpha: 1.5,
            ..LayerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigIssue::AlphaOutOfRange {
                field: "boundary_alpha",
                ..
            })
        ));
    }
}
