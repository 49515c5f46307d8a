//! Heavy-path decomposition of the minimal ADFA
//!
//! The automaton is a DAG, so heavy paths need two passes. A forward pass
//! marks at most one provisionally heavy out-edge per node (the target with
//! the most paths to the sink). A backward pass then keeps, for each node,
//! only the heavy in-edge whose source has the most paths from the root,
//! demoting the rest. The surviving heavy edges form disjoint paths, which
//! are extracted and renumbered exactly as in the trie case.

use crate::error::Result;
use crate::index::adfa::BaseAdfa;
use crate::index::{longest_common_prefix, PatternIndex, NULL_CHAR};
use crate::maps::{AdjacencyList, ChildMap, DoubleArrayMap, MapVec, SortedArrayMap};
use crate::StateId;

/// Heavy-path-decomposed ADFA over the mutable map backend
#[derive(Debug, Clone)]
pub struct PathDecomposedAdfa {
    root: StateId,
    sink: StateId,
    heavy_str: Vec<u8>,
    maps: MapVec,
}

impl PathDecomposedAdfa {
    /// Decompose a minimal ADFA
    pub fn from_adfa(base: &BaseAdfa) -> Result<Self> {
        let data = base.to_adjacency();
        let n = data.len();
        let mut is_heavy: Vec<Vec<bool>> = data.iter().map(|e| vec![true; e.len()]).collect();

        // forward pass: one provisionally heavy out-edge per node
        let mut paths_to_sink = vec![0u32; n];
        paths_to_sink[n - 1] = 1;
        for i in (0..n).rev() {
            for &(_, to) in &data[i] {
                paths_to_sink[i] += paths_to_sink[to as usize];
            }
        }
        for i in 0..n {
            let mut max: (usize, u32) = (0, 0);
            for (j, &(_, to)) in data[i].iter().enumerate() {
                if paths_to_sink[to as usize] > max.1 {
                    max = (j, paths_to_sink[to as usize]);
                }
            }
            for j in 0..data[i].len() {
                if j != max.0 {
                    is_heavy[i][j] = false;
                }
            }
        }

        // backward pass: one heavy in-edge per node
        let mut paths_from_root = vec![0u32; n];
        paths_from_root[0] = 1;
        for i in 0..n {
            for &(_, to) in &data[i] {
                paths_from_root[to as usize] += paths_from_root[i];
            }
        }
        let mut heavy_pred: Vec<Option<(usize, usize)>> = vec![None; n];
        for i in (0..n).rev() {
            for (j, &(_, to)) in data[i].iter().enumerate() {
                if !is_heavy[i][j] {
                    continue;
                }
                let to = to as usize;
                match heavy_pred[to] {
                    None => heavy_pred[to] = Some((i, j)),
                    Some((pi, pj)) if paths_from_root[i] > paths_from_root[pi] => {
                        is_heavy[pi][pj] = false;
                        heavy_pred[to] = Some((i, j));
                    }
                    Some(_) => is_heavy[i][j] = false,
                }
            }
        }

        // surviving heavy edges form disjoint paths; extract them greedily.
        // edges ascend, so a path head is always visited before its tail
        let mut heavy_str = Vec::with_capacity(n);
        let mut order: Vec<u32> = Vec::with_capacity(n);
        let mut on_path = vec![false; n];
        for i in 0..n {
            if on_path[i] {
                continue;
            }
            on_path[i] = true;
            order.push(i as u32);
            let mut cur = i;
            loop {
                let mut advanced = false;
                for (j, &(label, to)) in data[cur].iter().enumerate() {
                    if is_heavy[cur][j] {
                        debug_assert!(!on_path[to as usize]);
                        heavy_str.push(label);
                        order.push(to);
                        on_path[to as usize] = true;
                        cur = to as usize;
                        advanced = true;
                        break;
                    }
                }
                if !advanced {
                    break;
                }
            }
            heavy_str.push(NULL_CHAR);
        }
        debug_assert_eq!(order.len(), n);
        debug_assert_eq!(heavy_str.len(), n);

        let mut new_id = vec![0u32; n];
        for (pos, &orig) in order.iter().enumerate() {
            new_id[orig as usize] = pos as u32;
        }

        let mut light: AdjacencyList = vec![Vec::new(); n];
        for i in 0..n {
            for (j, &(label, to)) in data[i].iter().enumerate() {
                if !is_heavy[i][j] {
                    light[new_id[i] as usize].push((label, new_id[to as usize]));
                }
            }
        }

        Ok(Self {
            root: new_id[0],
            sink: new_id[n - 1],
            heavy_str,
            maps: MapVec::from_adjacency(&light)?,
        })
    }

    /// Number of states
    #[inline]
    pub fn state_count(&self) -> usize {
        self.heavy_str.len()
    }

    /// The renumbered root state
    #[inline]
    pub fn root(&self) -> StateId {
        self.root
    }

    /// The renumbered sink state
    #[inline]
    pub fn sink(&self) -> StateId {
        self.sink
    }

    /// Concatenated heavy-path labels, one byte per state
    #[inline]
    pub fn heavy_bytes(&self) -> &[u8] {
        &self.heavy_str
    }

    /// Export the light adjacency for a derived index
    pub fn to_adjacency(&self) -> AdjacencyList {
        self.maps.to_adjacency()
    }
}

impl PatternIndex for PathDecomposedAdfa {
    fn search(&self, pattern: &[u8]) -> bool {
        let mut node = self.root as usize;
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
        node == self.sink as usize
    }

    fn name(&self) -> &'static str {
        "PathDecomposedADFA"
    }
}

/// Heavy-path-decomposed ADFA over the double-array backend
#[derive(Debug, Clone)]
pub struct PathDecomposedDoubleArrayAdfa {
    root: StateId,
    sink: StateId,
    heavy_str: Vec<u8>,
    next: Vec<u32>,
    maps: DoubleArrayMap,
}

impl PathDecomposedDoubleArrayAdfa {
    /// Re-encode a decomposed ADFA
    pub fn from_decomposed(base: &PathDecomposedAdfa) -> Self {
        let light = base.to_adjacency();
        let (maps, bases) = DoubleArrayMap::construct_without_reindexing(&light);
        Self {
            root: base.root(),
            sink: base.sink(),
            heavy_str: base.heavy_bytes().to_vec(),
            next: bases,
            maps,
        }
    }
}

impl PatternIndex for PathDecomposedDoubleArrayAdfa {
    fn search(&self, pattern: &[u8]) -> bool {
        let mut node = self.root as usize;
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
        node == self.sink as usize
    }

    fn name(&self) -> &'static str {
        "PathDecomposedDoubleArrayADFA"
    }

    fn memory_usage(&self) -> usize {
        2 * std::mem::size_of::<StateId>()
            + self.heavy_str.len()
            + std::mem::size_of::<StateId>() * self.next.len()
            + (std::mem::size_of::<u8>() + std::mem::size_of::<StateId>()) * self.maps.len()
    }
}

/// Heavy-path-decomposed ADFA over the sorted-array backend
#[derive(Debug, Clone)]
pub struct PathDecomposedBinarySearchAdfa {
    root: StateId,
    sink: StateId,
    heavy_str: Vec<u8>,
    maps: SortedArrayMap,
}

impl PathDecomposedBinarySearchAdfa {
    /// Re-encode a decomposed ADFA
    pub fn from_decomposed(base: &PathDecomposedAdfa) -> Self {
        Self {
            root: base.root(),
            sink: base.sink(),
            heavy_str: base.heavy_bytes().to_vec(),
            maps: SortedArrayMap::construct(&base.to_adjacency()),
        }
    }
}

impl PatternIndex for PathDecomposedBinarySearchAdfa {
    fn search(&self, pattern: &[u8]) -> bool {
        let mut node = self.root as usize;
        let mut i = 0;
        while i < pattern.len() {
            let l = longest_common_prefix(&self.heavy_str[node..], &pattern[i..], pattern.len() - i);
            node += l;
            i += l;
            if i == pattern.len() || node == self.sink as usize {
                break;
            }
            match self.maps.search(node as StateId, pattern[i]) {
                Some(next) => node = next as usize,
                None => return false,
            }
            i += 1;
        }
        node == self.sink as usize
    }

    fn name(&self) -> &'static str {
        "PathDecomposedBinarySearchADFA"
    }

    fn memory_usage(&self) -> usize {
        2 * std::mem::size_of::<StateId>()
            + self.heavy_str.len()
            + (std::mem::size_of::<u8>() + std::mem::size_of::<StateId>() + 1) * self.maps.len()
    }
}
