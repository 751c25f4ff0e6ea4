// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Vertical layer stacking.

use crate::config::{LayerConfig, VisualizerConfig};

/// Height at which a layer with `scale` is drawn.
///
/// Zero when the visualizer collapses layers.
pub fn z_offset_for_scale(scale: f32, visualizer_config: &VisualizerConfig) -> f32 {
    if visualizer_config.collapse_layers {
        0.0
    } else {
        scale * visualizer_config.layer_z_step
    }
}

/// Height at which a static layer is drawn.
pub fn z_offset(config: &LayerConfig, visualizer_config: &VisualizerConfig) -> f32 {
    z_offset_for_scale(config.z_offset_scale, visualizer_config)
}

/// Offset for a feature that can be collapsed to ground level on its own.
pub(crate) fn feature_offset(
    collapse: bool,
    config: &LayerConfig,
    visualizer_config: &VisualizerConfig,
) -> f32 {
    if collapse {
        0.0
    } else {
        z_offset(config, visualizer_config)
    }
}
