//! Tail compaction
//!
//! Nodes on a unary chain down to a leaf carry no branching information.
//! [`TailTrie`] keeps only nodes with more than one accepting descendant
//! and replaces each leaf-ward unary chain by a single edge into a shared
//! tail pool; the edge's packed target carries the pool offset with
//! [`TAIL_FLAG`](crate::index::TAIL_FLAG) set. The root is kept
//! unconditionally so that singleton dictionaries still build.

use crate::error::Result;
use crate::index::trie::BaseTrie;
use crate::index::{longest_common_prefix, PatternIndex, Target, TAIL_FLAG};
use crate::maps::{AdjacencyList, ChildMap, DoubleArrayMap, MapVec, SortedArrayMap};
use crate::StateId;

/// Tail-compacted trie over the mutable map backend
#[derive(Debug, Clone)]
pub struct TailTrie {
    tail: Vec<u8>,
    maps: MapVec,
}

impl TailTrie {
    /// Compact a reference trie
    pub fn from_trie(base: &BaseTrie) -> Result<Self> {
        let data = base.to_adjacency();
        let n = data.len();

        let mut paths_to_leaf = vec![0u32; n];
        for i in (0..n).rev() {
            if data[i].is_empty() {
                paths_to_leaf[i] = 1;
            }
            for &(_, to) in &data[i] {
                paths_to_leaf[i] += paths_to_leaf[to as usize];
            }
        }

        let kept = |i: usize| i == 0 || paths_to_leaf[i] > 1;
        let mut mapping = vec![u32::MAX; n];
        let mut kept_count = 0u32;
        for (i, slot) in mapping.iter_mut().enumerate() {
            if kept(i) {
                *slot = kept_count;
                kept_count += 1;
            }
        }

        let mut tail = Vec::new();
        let mut maps = MapVec::with_len(kept_count as usize);
        for i in 0..n {
            if !kept(i) {
                continue;
            }
            let from = mapping[i];
            for &(label, to) in &data[i] {
                let to = to as usize;
                if paths_to_leaf[to] > 1 {
                    maps.insert(from, label, mapping[to])?;
                } else {
                    // fold the unary chain, edge label included, into the pool
                    let offset = tail.len() as u32;
                    tail.push(label);
                    let mut cur = to;
                    while let Some(&(chain_label, chain_to)) = data[cur].first() {
                        tail.push(chain_label);
                        cur = chain_to as usize;
                    }
                    maps.insert(from, label, offset | TAIL_FLAG)?;
                }
            }
        }
        log::debug!(
            "TailTrie built: {} kept nodes of {}, {} tail bytes",
            kept_count,
            n,
            tail.len()
        );
        Ok(Self { tail, maps })
    }

    /// Number of kept nodes
    #[inline]
    pub fn node_count(&self) -> usize {
        self.maps.len()
    }

    /// The shared tail pool
    #[inline]
    pub fn tail_bytes(&self) -> &[u8] {
        &self.tail
    }

    /// Export the light adjacency (tail flags preserved in the targets)
    pub fn to_adjacency(&self) -> AdjacencyList {
        self.maps.to_adjacency()
    }
}

/// Walk step shared by the tail-compacted searches: consume the rest of the
/// pattern against the pool once a tail edge is taken.
#[inline]
fn tail_matches(tail: &[u8], offset: u32, pattern: &[u8], consumed: usize) -> bool {
    let rest = pattern.len() - consumed;
    longest_common_prefix(&tail[offset as usize..], &pattern[consumed..], rest) == rest
}

impl PatternIndex for TailTrie {
    fn search(&self, pattern: &[u8]) -> bool {
        let mut node: StateId = 0;
        for (i, &label) in pattern.iter().enumerate() {
            match self.maps.search(node, label) {
                None => return false,
                Some(raw) => match Target::from_packed(raw) {
                    Target::Node(next) => node = next,
                    Target::Tail(offset) => return tail_matches(&self.tail, offset, pattern, i),
                },
            }
        }
        true
    }

    fn name(&self) -> &'static str {
        "TailTrie"
    }
}

/// Tail-compacted trie over the double-array backend
///
/// Kept-node targets stay logical ids; the `next` table translates them to
/// double-array bases at each step.
#[derive(Debug, Clone)]
pub struct TailDoubleArrayTrie {
    tail: Vec<u8>,
    next: Vec<u32>,
    maps: DoubleArrayMap,
}

impl TailDoubleArrayTrie {
    /// Re-encode a tail-compacted trie
    pub fn from_tail(base: &TailTrie) -> Self {
        let light = base.to_adjacency();
        let (maps, bases) = DoubleArrayMap::construct_without_reindexing(&light);
        Self {
            tail: base.tail_bytes().to_vec(),
            next: bases,
            maps,
        }
    }
}

impl PatternIndex for TailDoubleArrayTrie {
    fn search(&self, pattern: &[u8]) -> bool {
        let mut node: StateId = 0;
        for (i, &label) in pattern.iter().enumerate() {
            match self.maps.search(self.next[node as usize], label) {
                None => return false,
                Some(raw) => match Target::from_packed(raw) {
                    Target::Node(next) => node = next,
                    Target::Tail(offset) => return tail_matches(&self.tail, offset, pattern, i),
                },
            }
        }
        true
    }

    fn name(&self) -> &'static str {
        "TailDoubleArrayTrie"
    }

    fn memory_usage(&self) -> usize {
        std::mem::size_of::<StateId>()
            + self.tail.len()
            + std::mem::size_of::<StateId>() * self.next.len()
            + (std::mem::size_of::<u8>() + std::mem::size_of::<StateId>()) * self.maps.len()
    }
}

/// Tail-compacted trie over the sorted-array backend
#[derive(Debug, Clone)]
pub struct TailBinarySearchTrie {
    tail: Vec<u8>,
    maps: SortedArrayMap,
}

impl TailBinarySearchTrie {
    /// Re-encode a tail-compacted trie
    pub fn from_tail(base: &TailTrie) -> Self {
        Self {
            tail: base.tail_bytes().to_vec(),
            maps: SortedArrayMap::construct(&base.to_adjacency()),
        }
    }
}

impl PatternIndex for TailBinarySearchTrie {
    fn search(&self, pattern: &[u8]) -> bool {
        let mut node: StateId = 0;
        for (i, &label) in pattern.iter().enumerate() {
            match self.maps.search(node, label) {
                None => return false,
                Some(raw) => match Target::from_packed(raw) {
                    Target::Node(next) => node = next,
                    Target::Tail(offset) => return tail_matches(&self.tail, offset, pattern, i),
                },
            }
        }
        true
    }

    fn name(&self) -> &'static str {
        "TailBinarySearchTrie"
    }

    fn memory_usage(&self) -> usize {
        std::mem::size_of::<StateId>()
            + self.tail.len()
            + (std::mem::size_of::<u8>() + std::mem::size_of::<StateId>() + 1) * self.maps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::EOW;

    fn patterns(words: &[&str]) -> Vec<Vec<u8>> {
        words
            .iter()
            .map(|w| {
                let mut p = w.as_bytes().to_vec();
                p.push(EOW);
                p
            })
            .collect()
    }

    fn tail_trie(words: &[&str]) -> (Vec<Vec<u8>>, TailTrie) {
        let data = patterns(words);
        let base = BaseTrie::from_patterns(&data).unwrap();
        let tail = TailTrie::from_trie(&base).unwrap();
        (data, tail)
    }

    #[test]
    fn test_kept_nodes_and_pool() {
        // hello/help/helm keep root, h, he, hel; the three chains move into
        // the pool in label order off the 'hel' node
        let (data, tail) = tail_trie(&["hello", "help", "helm"]);
        assert_eq!(tail.node_count(), 4);
        assert_eq!(tail.tail_bytes(), b"lo\x01m\x01p\x01");
        for p in &data {
            assert!(tail.search(p), "{p:?}");
        }
        assert!(!tail.search(&patterns(&["hel"])[0]));
        assert!(!tail.search(&patterns(&["hells"])[0]));
        assert!(!tail.search(&patterns(&["helmo"])[0]));
    }

    #[test]
    fn test_singleton_dictionary_keeps_root() {
        let (data, tail) = tail_trie(&["x"]);
        assert_eq!(tail.node_count(), 1);
        assert_eq!(tail.tail_bytes(), b"x\x01");
        assert!(tail.search(&data[0]));
        assert!(!tail.search(&patterns(&["y"])[0]));
        assert!(!tail.search(&patterns(&["xx"])[0]));
        assert!(!tail.search(&patterns(&[""])[0]));
    }

    #[test]
    fn test_partial_tail_match_rejected() {
        let (_, tail) = tail_trie(&["hello", "hex"]);
        assert!(!tail.search(&patterns(&["hell"])[0]));
        assert!(!tail.search(&patterns(&["helloo"])[0]));
        assert!(tail.search(&patterns(&["hello"])[0]));
        assert!(tail.search(&patterns(&["hex"])[0]));
    }

    #[test]
    fn test_double_array_tail_agrees() {
        let (data, tail) = tail_trie(&["hello", "help", "helm", "x", ""]);
        let da = TailDoubleArrayTrie::from_tail(&tail);
        for p in &data {
            assert!(da.search(p), "{p:?}");
        }
        for miss in ["hel", "helps", "y", "xx"] {
            assert!(!da.search(&patterns(&[miss])[0]), "{miss}");
        }
        assert!(da.memory_usage() > 0);
    }

    #[test]
    fn test_binary_search_tail_agrees() {
        let (data, tail) = tail_trie(&["hello", "help", "helm", "x", ""]);
        let bs = TailBinarySearchTrie::from_tail(&tail);
        for p in &data {
            assert!(bs.search(p), "{p:?}");
        }
        for miss in ["hel", "helps", "y", "xx"] {
            assert!(!bs.search(&patterns(&[miss])[0]), "{miss}");
        }
        assert!(bs.memory_usage() > 0);
    }

    #[test]
    fn test_round_trip_reconstruction() {
        // DFS over kept nodes, expanding tail edges from the pool, must
        // yield exactly the stored dictionary
        let (mut data, tail) = tail_trie(&["hello", "help", "helm", "she", "shell", "x", ""]);
        let adjacency = tail.to_adjacency();
        let pool = tail.tail_bytes();

        let mut found: Vec<Vec<u8>> = Vec::new();
        let mut stack: Vec<(StateId, Vec<u8>)> = vec![(0, Vec::new())];
        while let Some((node, prefix)) = stack.pop() {
            for &(label, raw) in &adjacency[node as usize] {
                match Target::from_packed(raw) {
                    Target::Node(next) => {
                        let mut p = prefix.clone();
                        p.push(label);
                        stack.push((next, p));
                    }
                    Target::Tail(offset) => {
                        let mut p = prefix.clone();
                        let mut at = offset as usize;
                        loop {
                            p.push(pool[at]);
                            if pool[at] == EOW {
                                break;
                            }
                            at += 1;
                        }
                        found.push(p);
                    }
                }
            }
        }
        found.sort();
        data.sort();
        assert_eq!(found, data);
    }
}
