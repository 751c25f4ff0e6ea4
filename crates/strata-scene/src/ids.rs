// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Identifier types for nodes, layers and edges.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Unique node identifier.
pub type NodeId = u64;

/// Layer identifier (objects, places, rooms, ...).
pub type LayerId = u32;

const CATEGORY_SHIFT: u32 = 56;
const INDEX_MASK: u64 = (1 << CATEGORY_SHIFT) - 1;

/// Node id that packs an ASCII category into the top byte and an index into
/// the low 56 bits.
///
/// Symbols are how nodes get a readable fallback label: `NodeSymbol::new('O', 12)`
/// renders as `O(12)`.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeSymbol(NodeId);

impl NodeSymbol {
    /// Builds a symbol from a category character and an index.
    ///
    /// Non-ASCII categories are folded to `'?'`; indices are truncated to 56 bits.
    pub fn new(category: char, index: u64) -> Self {
        let byte = if category.is_ascii() { category as u8 } else { b'?' };
        Self((u64::from(byte) << CATEGORY_SHIFT) | (index & INDEX_MASK))
    }

    /// Category character stored in the top byte.
    pub fn category(self) -> char {
        char::from((self.0 >> CATEGORY_SHIFT) as u8)
    }

    /// Index stored in the low 56 bits.
    pub fn index(self) -> u64 {
        self.0 & INDEX_MASK
    }

    /// Raw node id.
    pub fn id(self) -> NodeId {
        self.0
    }

    /// Human-readable label, e.g. `O(12)`.
    ///
    /// Ids without a printable category (plain integers) render as the bare
    /// number.
    pub fn label(self) -> String {
        let category = self.category();
        if category.is_ascii_graphic() {
            format!("{category}({})", self.index())
        } else {
            self.0.to_string()
        }
    }
}

impl From<NodeId> for NodeSymbol {
    fn from(id: NodeId) -> Self {
        Self(id)
    }
}

impl From<NodeSymbol> for NodeId {
    fn from(symbol: NodeSymbol) -> Self {
        symbol.0
    }
}

impl fmt::Display for NodeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.category(), self.index())
    }
}

/// Key for an unordered node pair; `k1 <= k2` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    k1: NodeId,
    k2: NodeId,
}

impl EdgeKey {
    /// Builds the canonical key for the pair `(a, b)` in either order.
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { k1: a, k2: b }
        } else {
            Self { k1: b, k2: a }
        }
    }

    /// Smaller endpoint id.
    pub fn first(&self) -> NodeId {
        self.k1
    }

    /// Larger endpoint id.
    pub fn second(&self) -> NodeId {
        self.k2
    }
}
