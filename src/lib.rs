//! # stringdex: static string-dictionary indices
//!
//! A library and benchmark harness for read-only pattern-matching indices
//! over a fixed dictionary of byte strings. Each index answers one query,
//! "is this exact string in the dictionary?", and the family spans the
//! design space of trie and minimal-ADFA structures crossed with two
//! path-compression transforms and three child-map encodings:
//!
//! - **Base forms**: [`BaseTrie`] (mutable, insertion-only) and
//!   [`BaseAdfa`] (the minimal acyclic DFA derived from it).
//! - **Path compression**: tail compaction ([`TailTrie`]) folds unary leaf
//!   chains into a shared byte pool; heavy-path decomposition
//!   ([`PathDecomposedTrie`], [`PathDecomposedAdfa`]) renumbers nodes so
//!   heavy children are physically adjacent and whole paths compare via a
//!   word-wise LCP.
//! - **Child maps**: an ordered map per node (mutable), a sorted array with
//!   succinct offsets, and a double array; every compacted form is
//!   re-encoded with the latter two.
//!
//! Every stored string is terminated by the [`EOW`] byte (value 1); the
//! NULL byte is reserved. All frozen indices are deeply immutable and
//! freely shareable across threads for concurrent read-only search.
//!
//! ## Quick start
//!
//! ```
//! use stringdex::{BaseTrie, DoubleArrayTrie, PatternIndex, EOW};
//!
//! let mut patterns: Vec<Vec<u8>> = ["cat", "car", "cart"]
//!     .iter()
//!     .map(|w| w.as_bytes().to_vec())
//!     .collect();
//! for p in &mut patterns {
//!     p.push(EOW);
//! }
//!
//! let trie = BaseTrie::from_patterns(&patterns)?;
//! let frozen = DoubleArrayTrie::from_trie(&trie)?;
//! assert!(frozen.search(&patterns[0]));
//! assert!(!frozen.search(b"ca\x01"));
//! # Ok::<(), stringdex::StringdexError>(())
//! ```

#![warn(missing_docs)]

pub mod dataset;
pub mod error;
pub mod index;
pub mod maps;
pub mod report;
pub mod succinct;

pub use error::{Result, StringdexError};
pub use index::{
    longest_common_prefix, BaseAdfa, BaseTrie, BinarySearchAdfa, BinarySearchTrie,
    DoubleArrayAdfa, DoubleArrayTrie, PathDecomposedAdfa, PathDecomposedBinarySearchAdfa,
    PathDecomposedBinarySearchTrie, PathDecomposedDoubleArrayAdfa, PathDecomposedDoubleArrayTrie,
    PathDecomposedTrie, PatternIndex, TailBinarySearchTrie, TailDoubleArrayTrie, TailTrie, Target,
    EOW, NULL_CHAR,
};
pub use maps::{ChildMap, DoubleArrayMap, MapVec, SortedArrayMap};
pub use succinct::{BitVector, RankSelect};

/// State identifier used by every index and child-map backend
pub type StateId = u32;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
