//! Reference trie and its frozen re-encodings
//!
//! [`BaseTrie`] is the only mutable index: strings are inserted one by one,
//! each creating fresh sequentially-numbered nodes along its path. A node
//! accepts exactly when it has no outgoing edges, which holds exactly for
//! the nodes reached by consuming a final [`EOW`](crate::index::EOW) byte.
//! [`DoubleArrayTrie`] and [`BinarySearchTrie`] re-encode its adjacency
//! into the frozen backends.

use crate::error::{Result, StringdexError};
use crate::index::{PatternIndex, NULL_CHAR};
use crate::maps::{AdjacencyList, ChildMap, DoubleArrayMap, MapVec, SortedArrayMap};
use crate::succinct::BitVector;
use crate::StateId;

/// The mutable reference trie
///
/// # Examples
///
/// ```
/// use stringdex::{BaseTrie, PatternIndex, EOW};
///
/// let mut patterns: Vec<Vec<u8>> = vec![b"cat".to_vec(), b"car".to_vec()];
/// for p in &mut patterns {
///     p.push(EOW);
/// }
/// let trie = BaseTrie::from_patterns(&patterns)?;
/// assert!(trie.search(&patterns[0]));
/// assert!(!trie.search(b"ca\x01"));
/// # Ok::<(), stringdex::StringdexError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BaseTrie {
    maps: MapVec,
    key_count: usize,
}

impl BaseTrie {
    /// Create an empty trie containing only the root
    pub fn new() -> Self {
        Self {
            maps: MapVec::with_len(1),
            key_count: 0,
        }
    }

    /// Build a trie by inserting every pattern
    ///
    /// Patterns must be distinct and EOW-terminated; both are the caller's
    /// responsibility (the dataset loader guarantees them).
    pub fn from_patterns(patterns: &[Vec<u8>]) -> Result<Self> {
        let mut trie = Self::new();
        for pattern in patterns {
            trie.insert(pattern)?;
        }
        log::debug!(
            "BaseTrie built: {} keys, {} nodes, {} edges",
            trie.key_count,
            trie.node_count(),
            trie.edge_count()
        );
        Ok(trie)
    }

    /// Insert one pattern, creating nodes as needed
    pub fn insert(&mut self, pattern: &[u8]) -> Result<()> {
        let mut node: StateId = 0;
        for &label in pattern {
            if label == NULL_CHAR {
                return Err(StringdexError::invalid_data(
                    "patterns must not contain the reserved NULL byte",
                ));
            }
            node = match self.maps.search(node, label) {
                Some(child) => child,
                None => {
                    let child = self.maps.push_node();
                    self.maps.insert(node, label, child)?;
                    child
                }
            };
        }
        self.key_count += 1;
        Ok(())
    }

    /// Number of inserted patterns
    #[inline]
    pub fn key_count(&self) -> usize {
        self.key_count
    }

    /// Number of nodes, including the root
    #[inline]
    pub fn node_count(&self) -> usize {
        self.maps.len()
    }

    /// Number of edges
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.maps.edge_count()
    }

    /// Export the adjacency list for a derived index
    pub fn to_adjacency(&self) -> AdjacencyList {
        self.maps.to_adjacency()
    }
}

impl Default for BaseTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternIndex for BaseTrie {
    fn search(&self, pattern: &[u8]) -> bool {
        let mut node: StateId = 0;
        for &label in pattern {
            match self.maps.search(node, label) {
                Some(child) => node = child,
                None => return false,
            }
        }
        self.maps.out_degree(node) == 0
    }

    fn name(&self) -> &'static str {
        "BaseTrie"
    }
}

/// Frozen trie over the double-array backend
///
/// Nodes are re-identified by their double-array base, so a transition's
/// result is directly the next lookup position.
#[derive(Debug, Clone)]
pub struct DoubleArrayTrie {
    is_leaf: BitVector,
    maps: DoubleArrayMap,
}

impl DoubleArrayTrie {
    /// Re-encode a reference trie
    pub fn from_trie(base: &BaseTrie) -> Result<Self> {
        let data = base.to_adjacency();
        let (maps, bases) = DoubleArrayMap::construct_with_reindexing(&data);
        if bases.first().copied() != Some(0) {
            return Err(StringdexError::build("trie root displaced from base 0"));
        }
        // a trailing leaf's base can land one past the last written cell
        let marks = maps.len().max(*bases.last().expect("nonempty") as usize + 1);
        let mut is_leaf = BitVector::with_size(marks, false);
        for (i, edges) in data.iter().enumerate() {
            if edges.is_empty() {
                is_leaf.set(bases[i] as usize, true)?;
            }
        }
        Ok(Self { is_leaf, maps })
    }
}

impl PatternIndex for DoubleArrayTrie {
    fn search(&self, pattern: &[u8]) -> bool {
        let mut node: StateId = 0;
        for &label in pattern {
            match self.maps.search(node, label) {
                Some(next) => node = next,
                None => return false,
            }
        }
        self.is_leaf.get(node as usize) == Some(true)
    }

    fn name(&self) -> &'static str {
        "DoubleArrayTrie"
    }

    fn memory_usage(&self) -> usize {
        self.is_leaf.len() / 8
            + (std::mem::size_of::<u8>() + std::mem::size_of::<StateId>()) * self.maps.len()
    }
}

/// Frozen trie over the sorted-array backend
#[derive(Debug, Clone)]
pub struct BinarySearchTrie {
    is_leaf: BitVector,
    maps: SortedArrayMap,
}

impl BinarySearchTrie {
    /// Re-encode a reference trie
    pub fn from_trie(base: &BaseTrie) -> Result<Self> {
        let data = base.to_adjacency();
        // node ids are unchanged here, so marks index by logical id
        let mut is_leaf = BitVector::with_size(data.len(), false);
        for (i, edges) in data.iter().enumerate() {
            if edges.is_empty() {
                is_leaf.set(i, true)?;
            }
        }
        Ok(Self {
            is_leaf,
            maps: SortedArrayMap::construct(&data),
        })
    }
}

impl PatternIndex for BinarySearchTrie {
    fn search(&self, pattern: &[u8]) -> bool {
        let mut node: StateId = 0;
        for &label in pattern {
            match self.maps.search(node, label) {
                Some(next) => node = next,
                None => return false,
            }
        }
        self.is_leaf.get(node as usize) == Some(true)
    }

    fn name(&self) -> &'static str {
        "BinarySearchTrie"
    }

    fn memory_usage(&self) -> usize {
        self.is_leaf.len() / 8
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

    fn pattern(word: &str) -> Vec<u8> {
        let mut p = word.as_bytes().to_vec();
        p.push(EOW);
        p
    }

    #[test]
    fn test_base_trie_membership() {
        let data = patterns(&["a", "ab", "abc"]);
        let trie = BaseTrie::from_patterns(&data).unwrap();

        for p in &data {
            assert!(trie.search(p));
        }
        assert!(!trie.search(&pattern("")));
        assert!(!trie.search(&pattern("b")));
        assert!(!trie.search(&pattern("abcd")));
        // prefixes without EOW never end at a leaf
        assert!(!trie.search(b"ab"));
    }

    #[test]
    fn test_base_trie_node_count() {
        // root + 'a' + EOW-leaf per string along a shared spine:
        // a, ab, abc -> root, a, b, c plus one EOW leaf each
        let trie = BaseTrie::from_patterns(&patterns(&["a", "ab", "abc"])).unwrap();
        assert_eq!(trie.node_count(), 7);
        assert_eq!(trie.edge_count(), 6);
        assert_eq!(trie.key_count(), 3);
    }

    #[test]
    fn test_null_byte_rejected() {
        let mut trie = BaseTrie::new();
        assert!(trie.insert(&[b'a', 0, EOW]).is_err());
    }

    #[test]
    fn test_double_array_trie_agrees() {
        let data = patterns(&["hello", "help", "helm", "x", ""]);
        let base = BaseTrie::from_patterns(&data).unwrap();
        let da = DoubleArrayTrie::from_trie(&base).unwrap();

        for p in &data {
            assert!(da.search(p), "{p:?}");
        }
        for miss in ["hel", "helps", "y", "hellop"] {
            assert!(!da.search(&pattern(miss)), "{miss}");
        }
        assert!(!da.search(b""));
        assert!(da.memory_usage() > 0);
    }

    #[test]
    fn test_binary_search_trie_agrees() {
        let data = patterns(&["hello", "help", "helm", "x", ""]);
        let base = BaseTrie::from_patterns(&data).unwrap();
        let bs = BinarySearchTrie::from_trie(&base).unwrap();

        for p in &data {
            assert!(bs.search(p), "{p:?}");
        }
        for miss in ["hel", "helps", "y", "hellop"] {
            assert!(!bs.search(&pattern(miss)), "{miss}");
        }
        assert!(!bs.search(b""));
        assert!(bs.memory_usage() > 0);
    }

    #[test]
    fn test_empty_string_membership() {
        // bare EOW in the dictionary: empty input accepted only with EOW
        let data = patterns(&["", "a"]);
        let base = BaseTrie::from_patterns(&data).unwrap();
        assert!(base.search(&[EOW]));
        assert!(!base.search(&[]));

        let da = DoubleArrayTrie::from_trie(&base).unwrap();
        assert!(da.search(&[EOW]));
        assert!(!da.search(&[]));
    }
}
