// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Layered scene graph model for Strata.
//!
//! This crate holds the data the marker builders read: nodes grouped into
//! layers, time-ordered dynamic layers, cross-layer edges, and a surface mesh.
//! Builders treat everything here as read-only.
//!
//! # Design Principles
//!
//! - **Deterministic traversal**: every collection iterates in key order.
//! - **No panicking lookups**: attribute accessors return `Option` when the
//!   node's payload kind does not match the request.
//! - **Mesh behind a port**: the surface mesh is reached through [`Mesh`].

#![forbid(unsafe_code)]

mod attributes;
/// Oriented bounding boxes.
pub mod bbox;
mod color;
mod graph;
mod ids;
mod layer;
mod mesh;

pub use attributes::{
    EdgeAttributes, NodeAttributes, NodePayload, Place2dAttributes, PlaceAttributes,
    SemanticAttributes,
};
pub use bbox::BoundingBox;
pub use color::Color;
pub use graph::{SceneError, SceneGraph};
pub use ids::{EdgeKey, LayerId, NodeId, NodeSymbol};
pub use layer::{DynamicLayer, Edge, Node, SceneGraphLayer};
pub use mesh::{Mesh, TriangleMesh};

/// Re-exported math types used throughout the scene API.
pub use glam::{Mat2, Quat, Vec2, Vec3};
