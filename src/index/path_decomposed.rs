//! Heavy-path decomposition of the trie
//!
//! Each node's heavy child is the one with the most accepting descendants
//! (ties keep the first seen in label order). Nodes are renumbered so that
//! a heavy child is physically the next id, which concatenates every heavy
//! path's labels into one byte array; `heavy_str[v]` is the label of the
//! heavy edge leaving `v`, or [`NULL_CHAR`] when `v` terminates its path.
//! Search advances along `heavy_str` by LCP and only consults the light
//! edge map at mismatch points. Input never contains `NULL_CHAR`, so the
//! path separators cannot be matched.

use crate::error::Result;
use crate::index::trie::BaseTrie;
use crate::index::{longest_common_prefix, PatternIndex, NULL_CHAR};
use crate::maps::{AdjacencyList, ChildMap, DoubleArrayMap, MapVec, SortedArrayMap};
use crate::succinct::BitVector;
use crate::StateId;

/// Heavy-path-decomposed trie over the mutable map backend
#[derive(Debug, Clone)]
pub struct PathDecomposedTrie {
    is_leaf: BitVector,
    heavy_str: Vec<u8>,
    maps: MapVec,
}

impl PathDecomposedTrie {
    /// Decompose a reference trie
    pub fn from_trie(base: &BaseTrie) -> Result<Self> {
        let data = base.to_adjacency();
        let n = data.len();

        // paths-to-leaf and heavy-child selection in one reverse sweep;
        // children carry higher ids, so their counts are already final
        let mut paths_to_leaf = vec![0u32; n];
        let mut heavy_child: Vec<Option<usize>> = vec![None; n];
        let mut light: AdjacencyList = vec![Vec::new(); n];
        for i in (0..n).rev() {
            if data[i].is_empty() {
                paths_to_leaf[i] = 1;
            }
            for (j, &(label, to)) in data[i].iter().enumerate() {
                let count = paths_to_leaf[to as usize];
                match heavy_child[i] {
                    None => heavy_child[i] = Some(j),
                    Some(h) if count > paths_to_leaf[data[i][h].1 as usize] => {
                        light[i].push(data[i][h]);
                        heavy_child[i] = Some(j);
                    }
                    Some(_) => light[i].push((label, to)),
                }
                paths_to_leaf[i] += count;
            }
        }

        // greedy path extraction; each node contributes exactly one byte
        let mut heavy_str = Vec::with_capacity(n);
        let mut order: Vec<u32> = Vec::with_capacity(n);
        let mut on_path = vec![false; n];
        for i in 0..n {
            if on_path[i] {
                continue;
            }
            let mut cur = i;
            loop {
                order.push(cur as u32);
                on_path[cur] = true;
                match heavy_child[cur] {
                    None => {
                        heavy_str.push(NULL_CHAR);
                        break;
                    }
                    Some(j) => {
                        let (label, to) = data[cur][j];
                        heavy_str.push(label);
                        cur = to as usize;
                    }
                }
            }
        }
        debug_assert_eq!(order.len(), n);

        let mut new_id = vec![0u32; n];
        for (pos, &orig) in order.iter().enumerate() {
            new_id[orig as usize] = pos as u32;
        }

        let mut is_leaf = BitVector::with_size(n, false);
        let mut light_edges: AdjacencyList = vec![Vec::new(); n];
        for i in 0..n {
            if data[i].is_empty() {
                is_leaf.set(new_id[i] as usize, true)?;
            }
            for &(label, to) in &light[i] {
                light_edges[new_id[i] as usize].push((label, new_id[to as usize]));
            }
        }

        Ok(Self {
            is_leaf,
            heavy_str,
            maps: MapVec::from_adjacency(&light_edges)?,
        })
    }

    /// Number of nodes
    #[inline]
    pub fn node_count(&self) -> usize {
        self.heavy_str.len()
    }

    /// Concatenated heavy-path labels, one byte per node
    #[inline]
    pub fn heavy_bytes(&self) -> &[u8] {
        &self.heavy_str
    }

    /// Accepting marks over the renumbered nodes
    #[inline]
    pub fn leaf_marks(&self) -> &BitVector {
        &self.is_leaf
    }

    /// Export the light adjacency for a derived index
    pub fn to_adjacency(&self) -> AdjacencyList {
        self.maps.to_adjacency()
    }
}

impl PatternIndex for PathDecomposedTrie {
    fn search(&self, pattern: &[u8]) -> bool {
        let mut node = 0usize;
        let mut i = 0;
        while i < pattern.len() {
            let l = longest_common_prefix(&self.heavy_str[node..], &pattern[i..], pattern.len() - i);
            node += l;
            i += l;
            if i == pattern.len() {
                break;
            }
            match self.maps.search(node as StateId, pattern[i]) {
                Some(next) => node = next as usize,
                None => return false,
            }
            i += 1;
        }
        self.is_leaf.get(node) == Some(true)
    }

    fn name(&self) -> &'static str {
        "PathDecomposedTrie"
    }
}

/// Heavy-path-decomposed trie over the double-array backend
#[derive(Debug, Clone)]
pub struct PathDecomposedDoubleArrayTrie {
    is_leaf: BitVector,
    heavy_str: Vec<u8>,
    next: Vec<u32>,
    maps: DoubleArrayMap,
}

impl PathDecomposedDoubleArrayTrie {
    /// Re-encode a decomposed trie
    pub fn from_decomposed(base: &PathDecomposedTrie) -> Self {
        let light = base.to_adjacency();
        let (maps, bases) = DoubleArrayMap::construct_without_reindexing(&light);
        Self {
            is_leaf: base.leaf_marks().clone(),
            heavy_str: base.heavy_bytes().to_vec(),
            next: bases,
            maps,
        }
    }
}

impl PatternIndex for PathDecomposedDoubleArrayTrie {
    fn search(&self, pattern: &[u8]) -> bool {
        let mut node = 0usize;
        let mut i = 0;
        while i < pattern.len() {
            let l = longest_common_prefix(&self.heavy_str[node..], &pattern[i..], pattern.len() - i);
            node += l;
            i += l;
            if i == pattern.len() {
                break;
            }
            match self.maps.search(self.next[node], pattern[i]) {
                Some(next) => node = next as usize,
                None => return false,
            }
            i += 1;
        }
        self.is_leaf.get(node) == Some(true)
    }

    fn name(&self) -> &'static str {
        "PathDecomposedDoubleArrayTrie"
    }

    fn memory_usage(&self) -> usize {
        2 * std::mem::size_of::<StateId>()
            + self.heavy_str.len()
            + std::mem::size_of::<StateId>() * self.next.len()
            + (std::mem::size_of::<u8>() + std::mem::size_of::<StateId>()) * self.maps.len()
    }
}

/// Heavy-path-decomposed trie over the sorted-array backend
#[derive(Debug, Clone)]
pub struct PathDecomposedBinarySearchTrie {
    is_leaf: BitVector,
    heavy_str: Vec<u8>,
    maps: SortedArrayMap,
}

impl PathDecomposedBinarySearchTrie {
    /// Re-encode a decomposed trie
    pub fn from_decomposed(base: &PathDecomposedTrie) -> Self {
        Self {
            is_leaf: base.leaf_marks().clone(),
            heavy_str: base.heavy_bytes().to_vec(),
            maps: SortedArrayMap::construct(&base.to_adjacency()),
        }
    }
}

impl PatternIndex for PathDecomposedBinarySearchTrie {
    fn search(&self, pattern: &[u8]) -> bool {
        let mut node = 0usize;
        let mut i = 0;
        while i < pattern.len() {
            let l = longest_common_prefix(&self.heavy_str[node..], &pattern[i..], pattern.len() - i);
            node += l;
            i += l;
            if i == pattern.len() {
                break;
            }
            match self.maps.search(node as StateId, pattern[i]) {
                Some(next) => node = next as usize,
                None => return false,
            }
            i += 1;
        }
        self.is_leaf.get(node) == Some(true)
    }

    fn name(&self) -> &'static str {
        "PathDecomposedBinarySearchTrie"
    }

    fn memory_usage(&self) -> usize {
        2 * std::mem::size_of::<StateId>()
            + self.heavy_str.len()
            + (std::mem::size_of::<u8>() + std::mem::size_of::<StateId>() + 1) * self.maps.len()
    }
}
