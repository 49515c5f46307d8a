//! Mutable map-per-node backend
//!
//! One ordered map per node, keyed by edge label. This is the only backend
//! that supports insertion; the reference trie is built on it and every
//! transform uses it as the intermediate form before re-encoding.

use std::collections::BTreeMap;

use crate::error::{Result, StringdexError};
use crate::maps::{AdjacencyList, ChildMap};
use crate::StateId;

/// A vector of per-node ordered edge maps
#[derive(Debug, Clone, Default)]
pub struct MapVec {
    maps: Vec<BTreeMap<u8, u32>>,
}

impl MapVec {
    /// Create an empty map vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map vector with `len` empty nodes
    pub fn with_len(len: usize) -> Self {
        Self {
            maps: vec![BTreeMap::new(); len],
        }
    }

    /// Rebuild a map vector from a flattened adjacency list
    pub fn from_adjacency(data: &AdjacencyList) -> Result<Self> {
        let mut maps = Self::with_len(data.len());
        for (node, edges) in data.iter().enumerate() {
            for &(label, target) in edges {
                maps.insert(node as StateId, label, target)?;
            }
        }
        Ok(maps)
    }

    /// Number of nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// Check whether there are no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Append a new node with no edges and return its id
    pub fn push_node(&mut self) -> StateId {
        self.maps.push(BTreeMap::new());
        (self.maps.len() - 1) as StateId
    }

    /// Insert an edge `(node, label) -> target`
    ///
    /// Inserting a second edge with the same label out of the same node is a
    /// construction bug and reported as an error.
    pub fn insert(&mut self, node: StateId, label: u8, target: u32) -> Result<()> {
        let len = self.maps.len();
        let map = self
            .maps
            .get_mut(node as usize)
            .ok_or_else(|| StringdexError::out_of_bounds(node as usize, len))?;
        if map.insert(label, target).is_some() {
            return Err(StringdexError::build(format!(
                "duplicate edge label {label:#04x} out of node {node}"
            )));
        }
        Ok(())
    }

    /// Number of outgoing edges of `node`
    #[inline]
    pub fn out_degree(&self, node: StateId) -> usize {
        self.maps[node as usize].len()
    }

    /// Total number of edges across all nodes
    pub fn edge_count(&self) -> usize {
        self.maps.iter().map(|m| m.len()).sum()
    }

    /// Export the adjacency list, per node in ascending label order
    ///
    /// This is a one-shot handover: the receiving constructor owns the
    /// result and no references back into this map survive.
    pub fn to_adjacency(&self) -> AdjacencyList {
        self.maps
            .iter()
            .map(|m| m.iter().map(|(&label, &target)| (label, target)).collect())
            .collect()
    }
}

impl ChildMap for MapVec {
    #[inline]
    fn search(&self, node: StateId, label: u8) -> Option<u32> {
        self.maps.get(node as usize)?.get(&label).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_search() {
        let mut maps = MapVec::with_len(1);
        let child = maps.push_node();
        maps.insert(0, b'a', child).unwrap();

        assert_eq!(maps.search(0, b'a'), Some(child));
        assert_eq!(maps.search(0, b'b'), None);
        assert_eq!(maps.search(child, b'a'), None);
        assert_eq!(maps.out_degree(0), 1);
        assert_eq!(maps.out_degree(child), 0);
    }

    #[test]
    fn test_duplicate_label_is_error() {
        let mut maps = MapVec::with_len(2);
        maps.insert(0, b'x', 1).unwrap();
        assert!(maps.insert(0, b'x', 1).is_err());
    }

    #[test]
    fn test_adjacency_is_label_sorted() {
        let mut maps = MapVec::with_len(4);
        maps.insert(0, b'c', 3).unwrap();
        maps.insert(0, b'a', 1).unwrap();
        maps.insert(0, b'b', 2).unwrap();

        let adj = maps.to_adjacency();
        assert_eq!(adj[0], vec![(b'a', 1), (b'b', 2), (b'c', 3)]);
        assert!(adj[1].is_empty());
    }

    #[test]
    fn test_from_adjacency_round_trip() {
        let mut maps = MapVec::with_len(3);
        maps.insert(0, b'a', 1).unwrap();
        maps.insert(0, b'b', 2).unwrap();
        maps.insert(1, b'z', 2).unwrap();

        let rebuilt = MapVec::from_adjacency(&maps.to_adjacency()).unwrap();
        assert_eq!(rebuilt.to_adjacency(), maps.to_adjacency());
        assert_eq!(rebuilt.edge_count(), 3);
    }
}
