//! Child-map backends
//!
//! Three interchangeable encodings of the mapping `(node, byte) -> target`:
//!
//! - [`MapVec`]: one ordered map per node; the only mutable backend, used by
//!   the reference trie and as the intermediate form of every transform.
//! - [`SortedArrayMap`]: per-node byte-sorted runs in one contiguous array,
//!   delimited by a succinct bit vector with rank/select.
//! - [`DoubleArrayMap`]: `base + label` indexed cells with a check byte.
//!
//! Targets are packed `u32` values; bit 31 marks an offset into a tail pool
//! (see [`Target`](crate::index::Target)). The frozen backends have no
//! mutation API at all, so freezing is enforced by the type system.

pub mod double_array;
pub mod sorted_array;
pub mod vec_map;

pub use double_array::DoubleArrayMap;
pub use sorted_array::SortedArrayMap;
pub use vec_map::MapVec;

use crate::StateId;

/// Flattened adjacency: for each node, its `(label, packed target)` edges
/// in ascending label order.
pub type AdjacencyList = Vec<Vec<(u8, u32)>>;

/// Common lookup contract of all child-map backends
pub trait ChildMap {
    /// Look up the outgoing edge of `node` labelled `label`
    ///
    /// Returns the packed target, or `None` when no such edge exists.
    fn search(&self, node: StateId, label: u8) -> Option<u32>;
}
