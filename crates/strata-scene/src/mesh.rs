// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Surface mesh port.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Index-based vertex lookup into a triangulated surface mesh.
pub trait Mesh {
    /// Number of vertices.
    fn num_vertices(&self) -> usize;

    /// Position of vertex `index`, or `None` when out of range.
    fn position(&self, index: usize) -> Option<Vec3>;
}

/// Plain vertex/face mesh.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Vec3>,
    /// Triangles as vertex index triples.
    pub faces: Vec<[usize; 3]>,
}

impl TriangleMesh {
    /// Mesh from vertices and faces.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<[usize; 3]>) -> Self {
        Self { vertices, faces }
    }
}

impl Mesh for TriangleMesh {
    fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    fn position(&self, index: usize) -> Option<Vec3> {
        self.vertices.get(index).copied()
    }
}
