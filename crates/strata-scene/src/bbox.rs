// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Oriented bounding box in world coordinates.
///
/// Corner convention: bit 0, 1 and 2 of a corner index select the `+` side of
/// the local x, y and z axis respectively. Corner 0 is `(-x, -y, -z)`, corner 7
/// is `(+x, +y, +z)`, and corners 4..=7 form the top face. Two corners share a
/// wireframe edge iff their indices differ in exactly one bit.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Full extents along the local axes (meters).
    pub dimensions: Vec3,
    /// Center in world space.
    pub center: Vec3,
    /// Rotation from the box frame to the world frame.
    pub rotation: Quat,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            dimensions: Vec3::ZERO,
            center: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl BoundingBox {
    /// Axis-aligned box with the given center and full extents.
    pub fn axis_aligned(center: Vec3, dimensions: Vec3) -> Self {
        Self {
            dimensions,
            center,
            rotation: Quat::IDENTITY,
        }
    }

    /// Oriented box.
    pub fn new(center: Vec3, rotation: Quat, dimensions: Vec3) -> Self {
        Self {
            dimensions,
            center,
            rotation,
        }
    }

    /// The eight world-space corners, ordered by the bit convention above.
    pub fn corners(&self) -> [Vec3; 8] {
        let half = self.dimensions * 0.5;
        let mut corners = [Vec3::ZERO; 8];
        for (index, corner) in corners.iter_mut().enumerate() {
            let local = Vec3::new(
                if index & 0b001 == 0 { -half.x } else { half.x },
                if index & 0b010 == 0 { -half.y } else { half.y },
                if index & 0b100 == 0 { -half.z } else { half.z },
            );
            *corner = self.center + self.rotation * local;
        }
        corners
    }
}
