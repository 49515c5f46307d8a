//! Dataset loading and splitting
//!
//! A dataset is a file of newline-separated byte strings. Loading appends
//! the [`EOW`] terminator to every line, stops once the byte budget is
//! exceeded, and sorts + deduplicates, so the index constructors can assume
//! distinct EOW-terminated patterns.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::Result;
use crate::index::EOW;

/// Load, terminate, and deduplicate a dataset file
///
/// Lines are read as raw bytes; the line that crosses `byte_budget` and
/// everything after it are dropped.
pub fn load_dataset(path: &Path, byte_budget: usize) -> Result<Vec<Vec<u8>>> {
    log::info!("loading dataset {}", path.display());
    let mut reader = BufReader::new(File::open(path)?);

    let mut patterns: Vec<Vec<u8>> = Vec::new();
    let mut total_bytes = 0usize;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        total_bytes += buf.len();
        if total_bytes >= byte_budget {
            break;
        }
        let mut pattern = buf.clone();
        pattern.push(EOW);
        patterns.push(pattern);
    }
    let loaded = patterns.len();

    patterns.sort_unstable();
    patterns.dedup();
    let total_bytes: usize = patterns.iter().map(|p| p.len()).sum();

    let mut occurs = [false; 256];
    for pattern in &patterns {
        for &b in pattern {
            occurs[b as usize] = true;
        }
    }
    let distinct_bytes = occurs.iter().filter(|&&o| o).count();

    log::info!(
        "loaded {} lines ({} distinct), {} bytes, {} distinct byte values, avg length {:.2}",
        loaded,
        patterns.len(),
        total_bytes,
        distinct_bytes,
        if patterns.is_empty() {
            0.0
        } else {
            total_bytes as f64 / patterns.len() as f64
        }
    );
    Ok(patterns)
}

/// Deterministically split patterns into positive and negative sets
///
/// Shuffles with a seeded generator and takes the leading
/// `positive_ratio` fraction as the positive (indexed) set; the remainder
/// becomes the negative probe set.
pub fn split_patterns(
    patterns: &[Vec<u8>],
    seed: u64,
    positive_ratio: f64,
) -> (Vec<Vec<u8>>, Vec<Vec<u8>>) {
    let mut shuffled = patterns.to_vec();
    let mut rng = SmallRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);
    let take = ((shuffled.len() as f64 * positive_ratio) as usize).min(shuffled.len());
    let negative = shuffled.split_off(take);
    (shuffled, negative)
}
