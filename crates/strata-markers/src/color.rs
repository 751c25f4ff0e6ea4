// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Color resolution: RGBA composition, HLS colormaps, distance coloring.

use serde::{Deserialize, Serialize};
use strata_scene::Color;

use crate::config::VisualizerConfig;

/// Floating-point RGBA in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// RGBA from components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Composes an 8-bit color with `alpha`.
    pub fn from_color(color: Color, alpha: f32) -> Self {
        Self {
            r: f32::from(color.r) / 255.0,
            g: f32::from(color.g) / 255.0,
            b: f32::from(color.b) / 255.0,
            a: alpha,
        }
    }

    /// Opaque version of `color`.
    pub fn opaque(color: Color) -> Self {
        Self::from_color(color, 1.0)
    }
}

/// Linear colormap in HLS space.
///
/// Hue, luminance and saturation are interpolated independently between the
/// `min_*` (ratio 0) and `max_*` (ratio 1) endpoints. Hue is a fraction of a
/// full turn.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Colormap {
    /// Hue at ratio 0.
    pub min_hue: f32,
    /// Hue at ratio 1.
    pub max_hue: f32,
    /// Luminance at ratio 0.
    pub min_luminance: f32,
    /// Luminance at ratio 1.
    pub max_luminance: f32,
    /// Saturation at ratio 0.
    pub min_saturation: f32,
    /// Saturation at ratio 1.
    pub max_saturation: f32,
}

impl Default for Colormap {
    fn default() -> Self {
        Self {
            min_hue: 0.0,
            max_hue: 0.7,
            min_luminance: 0.5,
            max_luminance: 0.5,
            min_saturation: 0.8,
            max_saturation: 0.8,
        }
    }
}

impl Colormap {
    /// Color at `ratio`; the ratio is clamped to `[0, 1]` and NaN maps to 0.
    pub fn interpolate(&self, ratio: f32) -> Color {
        let t = if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        };
        let hue = lerp(self.min_hue, self.max_hue, t);
        let luminance = lerp(self.min_luminance, self.max_luminance, t);
        let saturation = lerp(self.min_saturation, self.max_saturation, t);
        hls_to_rgb(hue, luminance, saturation)
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn hls_to_rgb(hue: f32, luminance: f32, saturation: f32) -> Color {
    let l = luminance.clamp(0.0, 1.0);
    let s = saturation.clamp(0.0, 1.0);
    if s <= 0.0 {
        let v = to_byte(l);
        return Color::new(v, v, v);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    Color::new(
        to_byte(hue_channel(m1, m2, hue + 1.0 / 3.0)),
        to_byte(hue_channel(m1, m2, hue)),
        to_byte(hue_channel(m1, m2, hue - 1.0 / 3.0)),
    )
}

fn hue_channel(m1: f32, m2: f32, hue: f32) -> f32 {
    let h = hue.rem_euclid(1.0);
    if h < 1.0 / 6.0 {
        m1 + (m2 - m1) * h * 6.0
    } else if h < 0.5 {
        m2
    } else if h < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - h) * 6.0
    } else {
        m1
    }
}

#[allow(clippy::cast_sign_loss)]
fn to_byte(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Normalized position of `value` in `[min, max]`.
///
/// Non-finite ratios (including `min == max`) become 0; the result is clamped
/// to `[0, 1]`.
pub fn distance_ratio(min: f32, max: f32, value: f32) -> f32 {
    let ratio = (value - min) / (max - min);
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Colormap color for an obstacle distance.
///
/// When `places_colormap_max_distance <= places_colormap_min_distance` the
/// range is degenerate and `Color::default()` is returned for every distance;
/// [`VisualizerConfig::validate`] reports that case to callers.
pub fn distance_color(config: &VisualizerConfig, colormap: &Colormap, distance: f32) -> Color {
    let min = config.places_colormap_min_distance;
    let max = config.places_colormap_max_distance;
    if max <= min {
        return Color::default();
    }
    colormap.interpolate(distance_ratio(min, max, distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_scales_channels_and_keeps_alpha() {
        let rgba = Rgba::from_color(Color::new(255, 0, 51), 0.25);
        assert_eq!(rgba, Rgba::new(1.0, 0.0, 0.2, 0.25));
    }

    #[test]
    fn hls_primaries() {
        assert_eq!(hls_to_rgb(0.0, 0.5, 1.0), Color::new(255, 0, 0));
        assert_eq!(hls_to_rgb(1.0 / 3.0, 0.5, 1.0), Color::new(0, 255, 0));
        assert_eq!(hls_to_rgb(2.0 / 3.0, 0.5, 1.0), Color::new(0, 0, 255));
        assert_eq!(hls_to_rgb(0.3, 0.5, 0.0), Color::new(128, 128, 128));
    }

    #[test]
    fn ratio_guards_degenerate_inputs() {
        assert_eq!(distance_ratio(0.0, 2.0, 1.0), 0.5);
        assert_eq!(distance_ratio(0.0, 2.0, -5.0), 0.0);
        assert_eq!(distance_ratio(0.0, 2.0, 50.0), 1.0);
        assert_eq!(distance_ratio(1.0, 1.0, 1.0), 0.0);
        assert_eq!(distance_ratio(0.0, 2.0, f32::NAN), 0.0);
    }

    #[test]
    fn inverted_range_returns_default_color() {
        let config = VisualizerConfig {
            places_colormap_min_distance: 3.0,
            places_colormap_max_distance: 1.0,
            ..VisualizerConfig::default()
        };
        let colormap = Colormap::default();
        for d in [-1.0, 0.0, 2.0, 10.0] {
            assert_eq!(distance_color(&config, &colormap, d), Color::default());
        }
    }
}
