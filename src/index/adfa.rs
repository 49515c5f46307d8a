//! Minimal acyclic deterministic finite automaton
//!
//! [`BaseAdfa`] is the quotient of the reference trie under bottom-up
//! signature equivalence: two nodes merge when their byte-sorted edge sets,
//! rewritten to class representatives, are identical. Classes are
//! renumbered so the root becomes id 0 and the unique sink (the empty
//! signature) becomes the last id, which makes every edge point at a
//! strictly larger id.

use std::collections::HashMap;

use crate::error::Result;
use crate::index::trie::BaseTrie;
use crate::index::PatternIndex;
use crate::maps::{AdjacencyList, ChildMap, DoubleArrayMap, MapVec, SortedArrayMap};
use crate::StateId;

/// The minimal ADFA over the mutable map backend
#[derive(Debug, Clone)]
pub struct BaseAdfa {
    maps: MapVec,
}

impl BaseAdfa {
    /// Minimize a reference trie
    pub fn from_trie(base: &BaseTrie) -> Result<Self> {
        let data = base.to_adjacency();

        // bottom-up signature hashing; children are already label-sorted
        let mut class_of: HashMap<Vec<(u8, u32)>, u32> = HashMap::new();
        let mut class_sigs: Vec<Vec<(u8, u32)>> = Vec::new();
        let mut ids = vec![0u32; data.len()];
        for i in (0..data.len()).rev() {
            let sig: Vec<(u8, u32)> = data[i]
                .iter()
                .map(|&(label, to)| (label, ids[to as usize]))
                .collect();
            let id = match class_of.get(&sig) {
                Some(&id) => id,
                None => {
                    let id = class_sigs.len() as u32;
                    class_of.insert(sig.clone(), id);
                    class_sigs.push(sig);
                    id
                }
            };
            ids[i] = id;
        }

        // children are discovered before their parents, so reversing the
        // class ids puts the root (last class) at 0, the sink (first class,
        // the empty signature) at the end, and every edge ascending
        let n = class_sigs.len() as u32;
        let mut maps = MapVec::with_len(n as usize);
        for (class_id, sig) in class_sigs.iter().enumerate() {
            let from = n - 1 - class_id as u32;
            for &(label, to_class) in sig {
                let to = n - 1 - to_class;
                debug_assert!(from < to, "edge ({from}, {to}) breaks topological order");
                maps.insert(from, label, to)?;
            }
        }
        log::debug!(
            "BaseADFA built: {} states, {} edges (from {} trie nodes)",
            maps.len(),
            maps.edge_count(),
            data.len()
        );
        Ok(Self { maps })
    }

    /// Number of states
    #[inline]
    pub fn state_count(&self) -> usize {
        self.maps.len()
    }

    /// Number of edges
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.maps.edge_count()
    }

    /// The unique sink state
    #[inline]
    pub fn sink(&self) -> StateId {
        (self.maps.len() - 1) as StateId
    }

    /// Export the adjacency list for a derived index
    pub fn to_adjacency(&self) -> AdjacencyList {
        self.maps.to_adjacency()
    }
}

impl PatternIndex for BaseAdfa {
    fn search(&self, pattern: &[u8]) -> bool {
        let mut node: StateId = 0;
        for &label in pattern {
            match self.maps.search(node, label) {
                Some(next) => node = next,
                None => return false,
            }
        }
        node == self.sink()
    }

    fn name(&self) -> &'static str {
        "BaseADFA"
    }
}

/// Frozen ADFA over the double-array backend
#[derive(Debug, Clone)]
pub struct DoubleArrayAdfa {
    sink: StateId,
    maps: DoubleArrayMap,
}

impl DoubleArrayAdfa {
    /// Re-encode a minimal ADFA
    pub fn from_adfa(base: &BaseAdfa) -> Result<Self> {
        let data = base.to_adjacency();
        let (maps, bases) = DoubleArrayMap::construct_with_reindexing(&data);
        if bases.first().copied() != Some(0) {
            return Err(crate::error::StringdexError::build(
                "ADFA root displaced from base 0",
            ));
        }
        let sink = *bases.last().expect("nonempty automaton");
        Ok(Self { sink, maps })
    }
}

impl PatternIndex for DoubleArrayAdfa {
    fn search(&self, pattern: &[u8]) -> bool {
        let mut node: StateId = 0;
        for &label in pattern {
            match self.maps.search(node, label) {
                Some(next) => node = next,
                None => return false,
            }
        }
        node == self.sink
    }

    fn name(&self) -> &'static str {
        "DoubleArrayADFA"
    }

    fn memory_usage(&self) -> usize {
        std::mem::size_of::<StateId>()
            + (std::mem::size_of::<u8>() + std::mem::size_of::<StateId>()) * self.maps.len()
    }
}

/// Frozen ADFA over the sorted-array backend
#[derive(Debug, Clone)]
pub struct BinarySearchAdfa {
    sink: StateId,
    maps: SortedArrayMap,
}

impl BinarySearchAdfa {
    /// Re-encode a minimal ADFA
    pub fn from_adfa(base: &BaseAdfa) -> Self {
        Self {
            sink: base.sink(),
            maps: SortedArrayMap::construct(&base.to_adjacency()),
        }
    }
}

impl PatternIndex for BinarySearchAdfa {
    fn search(&self, pattern: &[u8]) -> bool {
        let mut node: StateId = 0;
        for &label in pattern {
            match self.maps.search(node, label) {
                Some(next) => node = next,
                None => return false,
            }
        }
        node == self.sink
    }

    fn name(&self) -> &'static str {
        "BinarySearchADFA"
    }

    fn memory_usage(&self) -> usize {
        std::mem::size_of::<StateId>()
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

    fn adfa(words: &[&str]) -> (Vec<Vec<u8>>, BaseAdfa) {
        let data = patterns(words);
        let base = BaseTrie::from_patterns(&data).unwrap();
        let adfa = BaseAdfa::from_trie(&base).unwrap();
        (data, adfa)
    }

    #[test]
    fn test_chain_dictionary_states() {
        // a / ab / abc: root, after-a, after-ab, after-abc, sink --
        // the EOW edges share the single pre-sink class where possible
        let (data, adfa) = adfa(&["a", "ab", "abc"]);
        assert_eq!(adfa.state_count(), 5);
        for p in &data {
            assert!(adfa.search(p));
        }
        assert!(!adfa.search(&patterns(&[""])[0]));
        assert!(!adfa.search(&patterns(&["b"])[0]));
        assert!(!adfa.search(&patterns(&["abcd"])[0]));
    }

    #[test]
    fn test_suffix_sharing_merges_states() {
        // all three words share the suffix automaton below the branch
        let (_, adfa) = adfa(&["bake", "cake", "lake"]);
        // root, merged first-letter class, shared a/k/e spine, pre-sink, sink
        let base = BaseTrie::from_patterns(&patterns(&["bake", "cake", "lake"])).unwrap();
        assert!(adfa.state_count() < base.node_count());
        assert_eq!(adfa.state_count(), 6);
    }

    #[test]
    fn test_disjoint_paths_share_presink() {
        // ab / ba: both paths funnel into the shared EOW pre-sink state
        let (data, adfa) = adfa(&["ab", "ba"]);
        assert_eq!(adfa.state_count(), 5);
        for p in &data {
            assert!(adfa.search(p));
        }
        assert!(!adfa.search(&patterns(&["aa"])[0]));
        assert!(!adfa.search(&patterns(&["bb"])[0]));
    }

    #[test]
    fn test_topological_order_and_unique_sink() {
        let (_, adfa) = adfa(&["hello", "help", "helm", "x"]);
        let data = adfa.to_adjacency();
        let sink = adfa.sink() as usize;
        assert!(data[sink].is_empty());
        for (u, edges) in data.iter().enumerate() {
            // only the sink has no outgoing edges
            assert_eq!(edges.is_empty(), u == sink);
            for &(_, v) in edges {
                assert!((u as u32) < v, "edge ({u}, {v}) not ascending");
            }
        }
    }

    #[test]
    fn test_minimality_no_duplicate_signatures() {
        let (_, adfa) = adfa(&["hello", "help", "helm", "shell", "shelf"]);
        let data = adfa.to_adjacency();
        let mut seen = std::collections::HashSet::new();
        for edges in &data {
            assert!(seen.insert(edges.clone()), "duplicate signature {edges:?}");
        }
    }

    #[test]
    fn test_double_array_adfa_agrees() {
        let (data, adfa) = adfa(&["hello", "help", "helm", "x", ""]);
        let da = DoubleArrayAdfa::from_adfa(&adfa).unwrap();
        for p in &data {
            assert!(da.search(p), "{p:?}");
        }
        for miss in ["hel", "helps", "y"] {
            assert!(!da.search(&patterns(&[miss])[0]), "{miss}");
        }
        assert!(da.memory_usage() > 0);
    }

    #[test]
    fn test_binary_search_adfa_agrees() {
        let (data, adfa) = adfa(&["hello", "help", "helm", "x", ""]);
        let bs = BinarySearchAdfa::from_adfa(&adfa);
        for p in &data {
            assert!(bs.search(p), "{p:?}");
        }
        for miss in ["hel", "helps", "y"] {
            assert!(!bs.search(&patterns(&[miss])[0]), "{miss}");
        }
        assert!(bs.memory_usage() > 0);
    }
}
