//! Sorted-array child map with succinct offsets
//!
//! All edges live in one contiguous array, concatenated per node in
//! ascending label order. A delimiter bit vector of length
//! `num_edges + num_nodes + 1` carries a 1-bit at each node boundary and a
//! trailing 1-bit; rank/select over the 1-bits recovers each node's range.

use crate::maps::{AdjacencyList, ChildMap};
use crate::succinct::{BitVector, RankSelect};
use crate::StateId;

/// Ranges at or below this size are scanned linearly.
const LINEAR_SEARCH_BORDER: usize = 5;

/// Frozen sorted-array encoding of a child map
#[derive(Debug, Clone)]
pub struct SortedArrayMap {
    elms: Vec<(u8, u32)>,
    delim: RankSelect,
}

impl SortedArrayMap {
    /// Build the sorted-array encoding of an adjacency list
    pub fn construct(data: &AdjacencyList) -> Self {
        let total: usize = data.iter().map(|edges| edges.len()).sum();
        let mut elms = Vec::with_capacity(total);
        let mut bits = BitVector::with_capacity(total + data.len() + 1);
        for edges in data {
            bits.push(true);
            let mut run: Vec<(u8, u32)> = edges.clone();
            run.sort_unstable_by_key(|&(label, _)| label);
            for pair in run {
                elms.push(pair);
                bits.push(false);
            }
        }
        bits.push(true);
        debug_assert_eq!(bits.len(), total + data.len() + 1);

        Self {
            elms,
            delim: RankSelect::new(bits),
        }
    }

    /// Total number of edges
    #[inline]
    pub fn len(&self) -> usize {
        self.elms.len()
    }

    /// Check whether the map has no edges
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elms.is_empty()
    }

    /// Number of nodes covered by the delimiter vector
    pub fn node_count(&self) -> usize {
        self.delim.count_ones() - 1
    }

    /// The edge range of `node` in the element array
    fn range(&self, node: StateId) -> Option<(usize, usize)> {
        let s = self.delim.select1(node as usize)?;
        let l = s - self.delim.rank1(s);
        let e = self.delim.select1(node as usize + 1)?;
        let r = e - self.delim.rank1(e);
        Some((l, r))
    }
}

impl ChildMap for SortedArrayMap {
    fn search(&self, node: StateId, label: u8) -> Option<u32> {
        let (mut l, mut r) = self.range(node)?;
        while r - l > LINEAR_SEARCH_BORDER {
            let mid = (l + r) >> 1;
            let (b, target) = self.elms[mid];
            if b == label {
                return Some(target);
            } else if b < label {
                l = mid;
            } else {
                r = mid;
            }
        }
        for &(b, target) in &self.elms[l..r] {
            if b == label {
                return Some(target);
            }
            if label < b {
                return None;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AdjacencyList {
        vec![
            vec![(b'a', 1), (b'c', 3), (b'b', 2)],
            vec![(b'z', 4)],
            vec![],
            vec![(b'm', 5), (b'n', 6)],
            vec![],
            vec![],
            vec![],
        ]
    }

    #[test]
    fn test_search_hits_and_misses() {
        let maps = SortedArrayMap::construct(&sample());
        assert_eq!(maps.search(0, b'a'), Some(1));
        assert_eq!(maps.search(0, b'b'), Some(2));
        assert_eq!(maps.search(0, b'c'), Some(3));
        assert_eq!(maps.search(0, b'd'), None);
        assert_eq!(maps.search(1, b'z'), Some(4));
        assert_eq!(maps.search(2, b'z'), None);
        assert_eq!(maps.search(3, b'n'), Some(6));
    }

    #[test]
    fn test_delimiter_invariant() {
        let data = sample();
        let maps = SortedArrayMap::construct(&data);
        // one 1-bit per node plus the trailing delimiter
        assert_eq!(maps.delim.count_ones(), data.len() + 1);
        assert_eq!(maps.delim.len(), maps.len() + data.len() + 1);
        assert_eq!(maps.node_count(), data.len());
    }

    #[test]
    fn test_runs_are_label_ascending() {
        let maps = SortedArrayMap::construct(&sample());
        for node in 0..maps.node_count() as StateId {
            let (l, r) = maps.range(node).unwrap();
            for w in maps.elms[l..r].windows(2) {
                assert!(w[0].0 < w[1].0);
            }
        }
    }

    #[test]
    fn test_binary_search_over_wide_fanout() {
        // one node with every printable label, enough to leave the linear path
        let edges: Vec<(u8, u32)> = (32u8..127).map(|b| (b, b as u32)).collect();
        let data: AdjacencyList = vec![edges.clone(), vec![]];
        let maps = SortedArrayMap::construct(&data);
        for &(b, t) in &edges {
            assert_eq!(maps.search(0, b), Some(t));
        }
        assert_eq!(maps.search(0, 10), None);
        assert_eq!(maps.search(0, 200), None);
    }
}
