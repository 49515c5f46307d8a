//! Word-wise longest-common-prefix primitive
//!
//! Compares eight bytes at a time as little-endian `u64` words; on mismatch
//! the differing byte index is the trailing zero count of the xor divided by
//! eight. The sub-word remainder is compared byte by byte, so neither input
//! needs trailing slack bytes.

const WORD: usize = 8;

/// Length of the longest common prefix of `a` and `b`, capped at `max_len`
///
/// The cap is additionally clamped to both slice lengths.
pub fn longest_common_prefix(a: &[u8], b: &[u8], max_len: usize) -> usize {
    let limit = max_len.min(a.len()).min(b.len());
    let (a, b) = (&a[..limit], &b[..limit]);

    let mut i = 0;
    let mut chunks_a = a.chunks_exact(WORD);
    let mut chunks_b = b.chunks_exact(WORD);
    for (ca, cb) in chunks_a.by_ref().zip(chunks_b.by_ref()) {
        let wa = u64::from_le_bytes(ca.try_into().expect("exact chunk"));
        let wb = u64::from_le_bytes(cb.try_into().expect("exact chunk"));
        let diff = wa ^ wb;
        if diff != 0 {
            return i + diff.trailing_zeros() as usize / 8;
        }
        i += WORD;
    }
    for (&x, &y) in chunks_a.remainder().iter().zip(chunks_b.remainder()) {
        if x != y {
            break;
        }
        i += 1;
    }
    i
}
