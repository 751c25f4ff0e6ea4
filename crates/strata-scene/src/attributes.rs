// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Node and edge attribute payloads.
//!
//! Every node carries a pose plus one [`NodePayload`] variant. Builders never
//! match on the variant directly; they ask for a capability through
//! [`NodeAttributes::semantic`], [`NodeAttributes::place`] or
//! [`NodeAttributes::place_2d`] and skip the node when the answer is `None`.

use glam::{Mat2, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::{BoundingBox, Color};

/// Attribute set shared by every semantic node kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SemanticAttributes {
    /// Display name (may be empty).
    pub name: String,
    /// Node color.
    pub color: Color,
    /// Object extent.
    pub bounding_box: BoundingBox,
    /// Semantic class id.
    pub semantic_label: u32,
}

/// Free-space place with an obstacle distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceAttributes {
    /// Semantic base attributes.
    pub semantic: SemanticAttributes,
    /// Distance to the nearest obstacle (meters).
    pub distance: f32,
    /// `false` marks a frontier (not yet observed) place.
    pub real_place: bool,
    /// Ellipsoid extents used to draw frontier places.
    pub frontier_scale: Vec3,
}

impl Default for PlaceAttributes {
    fn default() -> Self {
        Self {
            semantic: SemanticAttributes::default(),
            distance: 0.0,
            real_place: true,
            frontier_scale: Vec3::ONE,
        }
    }
}

/// Planar place described by a boundary polygon and a fitted ellipse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place2dAttributes {
    /// Semantic base attributes.
    pub semantic: SemanticAttributes,
    /// Boundary polygon vertices, in order.
    pub boundary: Vec<Vec3>,
    /// Maps the unit circle onto the fitted ellipse.
    pub ellipse_matrix: Mat2,
    /// Ellipse center in the xy-plane.
    pub ellipse_centroid: Vec2,
    /// Indices into the surface mesh vertices covered by this place.
    pub mesh_connections: Vec<usize>,
}

impl Default for Place2dAttributes {
    fn default() -> Self {
        Self {
            semantic: SemanticAttributes::default(),
            boundary: Vec::new(),
            ellipse_matrix: Mat2::IDENTITY,
            ellipse_centroid: Vec2::ZERO,
            mesh_connections: Vec::new(),
        }
    }
}

/// Kind-specific node payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum NodePayload {
    /// Position-only node.
    #[default]
    Generic,
    /// Object or region with semantic attributes.
    Semantic(SemanticAttributes),
    /// Place with an obstacle distance.
    Place(PlaceAttributes),
    /// Planar place with a boundary polygon.
    Place2d(Place2dAttributes),
}

/// Pose plus payload of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeAttributes {
    /// World position.
    pub position: Vec3,
    /// World orientation.
    pub orientation: Quat,
    /// Kind-specific payload.
    pub payload: NodePayload,
}

impl Default for NodeAttributes {
    fn default() -> Self {
        Self::generic(Vec3::ZERO)
    }
}

impl NodeAttributes {
    /// Position-only attributes.
    pub fn generic(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            payload: NodePayload::Generic,
        }
    }

    /// Semantic node at `position`.
    pub fn semantic(position: Vec3, semantic: SemanticAttributes) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            payload: NodePayload::Semantic(semantic),
        }
    }

    /// Place node at `position`.
    pub fn place(position: Vec3, place: PlaceAttributes) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            payload: NodePayload::Place(place),
        }
    }

    /// Planar place node at `position`.
    pub fn place_2d(position: Vec3, place: Place2dAttributes) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            payload: NodePayload::Place2d(place),
        }
    }

    /// Returns a copy with the given orientation.
    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    /// Semantic attributes of any semantic kind (semantic, place, 2D place).
    pub fn semantic_attributes(&self) -> Option<&SemanticAttributes> {
        match &self.payload {
            NodePayload::Generic => None,
            NodePayload::Semantic(attrs) => Some(attrs),
            NodePayload::Place(attrs) => Some(&attrs.semantic),
            NodePayload::Place2d(attrs) => Some(&attrs.semantic),
        }
    }

    /// Place attributes, if this is a place node.
    pub fn place_attributes(&self) -> Option<&PlaceAttributes> {
        match &self.payload {
            NodePayload::Place(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// 2D place attributes, if this is a planar place node.
    pub fn place_2d_attributes(&self) -> Option<&Place2dAttributes> {
        match &self.payload {
            NodePayload::Place2d(attrs) => Some(attrs),
            _ => None,
        }
    }
}

/// Edge attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeAttributes {
    /// Scalar weight (e.g. traversal cost or clearance).
    pub weight: f32,
}

impl Default for EdgeAttributes {
    fn default() -> Self {
        Self { weight: 1.0 }
    }
}

impl EdgeAttributes {
    /// Attributes with the given weight.
    pub const fn with_weight(weight: f32) -> Self {
        Self { weight }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_accessors_follow_payload_kind() {
        let generic = NodeAttributes::generic(Vec3::ZERO);
        assert!(generic.semantic_attributes().is_none());
        assert!(generic.place_attributes().is_none());

        let place = NodeAttributes::place(Vec3::ZERO, PlaceAttributes::default());
        assert!(place.semantic_attributes().is_some());
        assert!(place.place_attributes().is_some());
        assert!(place.place_2d_attributes().is_none());

        let place_2d = NodeAttributes::place_2d(Vec3::ZERO, Place2dAttributes::default());
        assert!(place_2d.semantic_attributes().is_some());
        assert!(place_2d.place_attributes().is_none());
        assert!(place_2d.place_2d_attributes().is_some());
    }
}
