//! Benchmark harness
//!
//! Builds every index variant from one dataset, verifies membership over
//! the positive/negative split, times the query batch, and appends one CSV
//! record per index.

use std::hint::black_box;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;

use stringdex::dataset::{load_dataset, split_patterns};
use stringdex::report::CsvReporter;
use stringdex::{
    BaseAdfa, BaseTrie, BinarySearchAdfa, BinarySearchTrie, DoubleArrayAdfa, DoubleArrayTrie,
    PathDecomposedAdfa, PathDecomposedBinarySearchAdfa, PathDecomposedBinarySearchTrie,
    PathDecomposedDoubleArrayAdfa, PathDecomposedDoubleArrayTrie, PathDecomposedTrie,
    PatternIndex, TailBinarySearchTrie, TailDoubleArrayTrie, TailTrie,
};

#[derive(Parser)]
#[command(name = "stringdex-bench")]
#[command(about = "Query-latency and memory benchmark over the static dictionary index family")]
struct Cli {
    /// Dataset file name under the data directory
    dataset: String,

    /// Stop loading once this many bytes have been read
    #[arg(default_value_t = usize::MAX)]
    byte_budget: usize,

    /// Directory containing dataset files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// CSV file results are appended to
    #[arg(long, default_value = "result.csv")]
    out: PathBuf,

    /// Shuffle seed for the positive/negative split
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Fraction of the dataset indexed as the positive set
    #[arg(long, default_value_t = 1.0)]
    positive_ratio: f64,
}

/// Verify membership over both sets, then record elapsed time and memory.
/// A wrong answer is a bug in the index under test and aborts the run.
fn bench_search<I: PatternIndex>(
    index: &I,
    positive: &[Vec<u8>],
    negative: &[Vec<u8>],
    writer: &mut CsvReporter,
) -> Result<()> {
    let start = Instant::now();
    for pattern in positive {
        if !black_box(index.search(pattern)) {
            bail!("{}: stored pattern rejected: {:?}", index.name(), pattern);
        }
    }
    for pattern in negative {
        if black_box(index.search(pattern)) {
            bail!("{}: unknown pattern accepted: {:?}", index.name(), pattern);
        }
    }
    let nanos = start.elapsed().as_nanos();
    let memory = index.memory_usage();

    eprintln!(
        "{:<34} {:>14} ns {:>12} bytes",
        index.name(),
        nanos,
        memory
    );
    writer.record(index.name(), nanos, memory)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = cli.data_dir.join(&cli.dataset);
    let data = load_dataset(&path, cli.byte_budget)
        .with_context(|| format!("failed to load dataset {}", path.display()))?;
    let (positive, negative) = split_patterns(&data, cli.seed, cli.positive_ratio);
    let total_length: usize = positive.iter().map(|p| p.len()).sum();

    eprintln!(
        "dataset {}: {} positive / {} negative patterns, {} bytes",
        cli.dataset,
        positive.len(),
        negative.len(),
        total_length
    );

    let mut writer = CsvReporter::open(&cli.out, &cli.dataset, positive.len(), total_length)?;

    let trie = BaseTrie::from_patterns(&positive)?;
    eprintln!(
        "BaseTrie: {} nodes, {} edges",
        trie.node_count(),
        trie.edge_count()
    );
    bench_search(&trie, &positive, &negative, &mut writer)?;

    {
        let index = DoubleArrayTrie::from_trie(&trie)?;
        bench_search(&index, &positive, &negative, &mut writer)?;
    }
    {
        let index = BinarySearchTrie::from_trie(&trie)?;
        bench_search(&index, &positive, &negative, &mut writer)?;
    }

    {
        let tail = TailTrie::from_trie(&trie)?;
        bench_search(&tail, &positive, &negative, &mut writer)?;
        {
            let index = TailDoubleArrayTrie::from_tail(&tail);
            bench_search(&index, &positive, &negative, &mut writer)?;
        }
        {
            let index = TailBinarySearchTrie::from_tail(&tail);
            bench_search(&index, &positive, &negative, &mut writer)?;
        }
    }

    {
        let decomposed = PathDecomposedTrie::from_trie(&trie)?;
        bench_search(&decomposed, &positive, &negative, &mut writer)?;
        {
            let index = PathDecomposedDoubleArrayTrie::from_decomposed(&decomposed);
            bench_search(&index, &positive, &negative, &mut writer)?;
        }
        {
            let index = PathDecomposedBinarySearchTrie::from_decomposed(&decomposed);
            bench_search(&index, &positive, &negative, &mut writer)?;
        }
    }

    {
        let adfa = BaseAdfa::from_trie(&trie)?;
        eprintln!(
            "BaseADFA: {} states, {} edges",
            adfa.state_count(),
            adfa.edge_count()
        );
        bench_search(&adfa, &positive, &negative, &mut writer)?;
        {
            let index = DoubleArrayAdfa::from_adfa(&adfa)?;
            bench_search(&index, &positive, &negative, &mut writer)?;
        }
        {
            let index = BinarySearchAdfa::from_adfa(&adfa);
            bench_search(&index, &positive, &negative, &mut writer)?;
        }
        {
            let decomposed = PathDecomposedAdfa::from_adfa(&adfa)?;
            bench_search(&decomposed, &positive, &negative, &mut writer)?;
            {
                let index = PathDecomposedDoubleArrayAdfa::from_decomposed(&decomposed);
                bench_search(&index, &positive, &negative, &mut writer)?;
            }
            {
                let index = PathDecomposedBinarySearchAdfa::from_decomposed(&decomposed);
                bench_search(&index, &positive, &negative, &mut writer)?;
            }
        }
    }

    Ok(())
}
