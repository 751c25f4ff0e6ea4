// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Output batch types.
//!
//! A [`Marker`] is one drawable batch addressed by `(ns, id)`. Builders create
//! markers fresh on every call and hand them over by value.

use glam::{Quat, Vec3};

use crate::color::Rgba;

/// Frame and timestamp stamped onto every marker of one build call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    /// Reference frame the marker geometry is expressed in.
    pub frame_id: String,
    /// Timestamp in nanoseconds.
    pub stamp_ns: u64,
}

impl Header {
    /// Header for `frame_id` at `stamp_ns`.
    pub fn new(frame_id: impl Into<String>, stamp_ns: u64) -> Self {
        Self {
            frame_id: frame_id.into(),
            stamp_ns,
        }
    }
}

/// Primitive shape of a marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    /// Independent segments; `points[2i]..points[2i + 1]`.
    LineList,
    /// One sphere per point.
    SphereList,
    /// One cube per point.
    CubeList,
    /// A single sphere/ellipsoid at the pose.
    Sphere,
    /// A single box at the pose.
    Cube,
    /// Camera-facing text at the pose.
    TextViewFacing,
}

/// Whether the marker adds/replaces geometry or removes a previous marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerAction {
    /// Insert or replace the marker with this `(ns, id)`.
    Add,
    /// Remove the marker with this `(ns, id)`.
    Delete,
}

/// Rigid pose applied to all marker points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Translation.
    pub position: Vec3,
    /// Rotation.
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Zero translation, identity rotation. Used for markers whose points are
    /// already in world coordinates.
    pub const fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }

    /// Pose at `position` with `orientation`.
    pub const fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Identity pose lifted by `z`.
    pub fn lifted(z: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, z),
            orientation: Quat::IDENTITY,
        }
    }
}

/// One drawable batch.
///
/// Invariants kept by every builder:
/// - `LineList` markers hold an even number of points.
/// - `colors` is empty or parallel to `points`; when empty, `color` applies to
///   the whole batch.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// Frame and stamp.
    pub header: Header,
    /// Namespace; together with `id` addresses the marker.
    pub ns: String,
    /// Identifier unique within `ns`.
    pub id: u64,
    /// Primitive shape.
    pub kind: MarkerKind,
    /// Add or delete.
    pub action: MarkerAction,
    /// Pose applied to `points`.
    pub pose: Pose,
    /// Shape scale; `x` is the line width for line lists, `z` the text height.
    pub scale: Vec3,
    /// Uniform color, used when `colors` is empty.
    pub color: Rgba,
    /// Vertices.
    pub points: Vec<Vec3>,
    /// Per-vertex colors.
    pub colors: Vec<Rgba>,
    /// Text for `TextViewFacing` markers.
    pub text: String,
}

impl Marker {
    /// Empty `Add` marker with identity pose and zero scale.
    pub fn new(header: &Header, kind: MarkerKind, ns: impl Into<String>, id: u64) -> Self {
        Self {
            header: header.clone(),
            ns: ns.into(),
            id,
            kind,
            action: MarkerAction::Add,
            pose: Pose::identity(),
            scale: Vec3::ZERO,
            color: Rgba::default(),
            points: Vec::new(),
            colors: Vec::new(),
            text: String::new(),
        }
    }

    /// Empty line list with line width `width`.
    pub fn line_list(header: &Header, ns: impl Into<String>, id: u64, width: f32) -> Self {
        let mut marker = Self::new(header, MarkerKind::LineList, ns, id);
        marker.scale.x = width;
        marker
    }

    /// Empty sphere or cube point list with uniform point size.
    pub fn point_list(
        header: &Header,
        ns: impl Into<String>,
        id: u64,
        use_sphere: bool,
        size: f32,
    ) -> Self {
        let kind = if use_sphere {
            MarkerKind::SphereList
        } else {
            MarkerKind::CubeList
        };
        let mut marker = Self::new(header, kind, ns, id);
        marker.scale = Vec3::splat(size);
        marker
    }

    /// Appends a segment whose endpoints share `color`.
    pub fn push_segment(&mut self, start: Vec3, end: Vec3, color: Rgba) {
        self.push_segment_colored(start, color, end, color);
    }

    /// Appends a segment with distinct endpoint colors.
    pub fn push_segment_colored(
        &mut self,
        start: Vec3,
        start_color: Rgba,
        end: Vec3,
        end_color: Rgba,
    ) {
        self.points.push(start);
        self.colors.push(start_color);
        self.points.push(end);
        self.colors.push(end_color);
    }

    /// Appends a segment colored by the uniform marker color.
    pub fn push_uncolored_segment(&mut self, start: Vec3, end: Vec3) {
        self.points.push(start);
        self.points.push(end);
    }

    /// Appends a colored point.
    pub fn push_point(&mut self, point: Vec3, color: Rgba) {
        self.points.push(point);
        self.colors.push(color);
    }

    /// Number of segments for line lists (`points.len() / 2`).
    pub fn num_segments(&self) -> usize {
        self.points.len() / 2
    }

    /// Whether the marker has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Marker asking the renderer to remove the earlier marker `(ns, id)`.
pub fn delete_marker(header: &Header, id: u64, ns: impl Into<String>) -> Marker {
    let mut marker = Marker::new(header, MarkerKind::LineList, ns, id);
    marker.action = MarkerAction::Delete;
    marker
}
