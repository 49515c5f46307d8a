//! Benchmark result reporting
//!
//! Results are appended to a CSV file shared across runs; the header is
//! written only when the file is first created.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::Local;

use crate::error::Result;

const HEADER: &str = "timestamp,dataset,lines,total_length,method,time_nanoseconds,memory_bytes";

/// Append-only CSV writer for benchmark records
pub struct CsvReporter {
    out: File,
    dataset: String,
    lines: usize,
    total_length: usize,
}

impl CsvReporter {
    /// Open (or create) the result file for one dataset run
    pub fn open(path: &Path, dataset: &str, lines: usize, total_length: usize) -> Result<Self> {
        let exists = path.exists();
        let mut out = OpenOptions::new().create(true).append(true).open(path)?;
        if !exists {
            writeln!(out, "{HEADER}")?;
        }
        Ok(Self {
            out,
            dataset: dataset.to_string(),
            lines,
            total_length,
        })
    }

    /// Append one record
    pub fn record(&mut self, method: &str, time_nanoseconds: u128, memory_bytes: usize) -> Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(
            self.out,
            "{},{},{},{},{},{},{}",
            timestamp, self.dataset, self.lines, self.total_length, method, time_nanoseconds, memory_bytes
        )?;
        Ok(())
    }
}
