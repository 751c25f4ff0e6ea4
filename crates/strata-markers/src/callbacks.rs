// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Caller-supplied coloring and filtering hooks.

use strata_scene::{Color, Edge, Node};

/// Picks a color for a node.
pub type ColorFn<'a> = &'a dyn Fn(&Node) -> Color;

/// Decides whether a node takes part in a build. `None` accepts every node.
pub type FilterFn<'a> = &'a dyn Fn(&Node) -> bool;

/// Which endpoint of an edge a color is requested for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeEnd {
    /// The edge's source endpoint.
    Source,
    /// The edge's target endpoint.
    Target,
}

/// Picks a color for one endpoint of an edge: `(source, target, edge, end)`.
pub type EdgeColorFn<'a> = &'a dyn Fn(&Node, &Node, &Edge, EdgeEnd) -> Color;

pub(crate) fn accepts(filter: Option<FilterFn<'_>>, node: &Node) -> bool {
    filter.is_none_or(|f| f(node))
}

/// Color function returning each node's semantic color, or the default color.
pub fn semantic_color(node: &Node) -> Color {
    node.semantic().map(|s| s.color).unwrap_or_default()
}
