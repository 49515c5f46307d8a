//! Succinct bit vectors with rank and select support
//!
//! This module provides the packed bit vector used for leaf/sink marks and
//! the static rank/select structure backing the sorted-array child map.

pub mod bit_vector;
pub mod rank_select;

pub use bit_vector::BitVector;
pub use rank_select::RankSelect;
