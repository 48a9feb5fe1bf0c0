//! Timed measurement passes over a loaded buffer.
//!
//! Every pass opens a fresh stream over the same immutable buffer, so no
//! parser or stream state survives from one run into the next. One timing
//! convention everywhere: the timed interval covers the streaming pass
//! only — loading happens before it, the bulk output write after it, in
//! both measurement modes.

use anyhow::Result;
use std::time::{Duration, Instant};

use crate::filter;
use crate::lines::LineRange;
use crate::ondemand::DocumentStream;
use crate::output::OutputBuf;

/// Stage-1 batch hint handed to every stream; 1 MiB keeps the framing
/// window cache-resident.
pub const BATCH_SIZE: usize = 1 << 20;

/// Field name guaranteed absent from well-formed inputs. Tokenizer mode
/// looks it up in every document to force framing plus the minimal
/// stage-2 scan, without ever hitting.
pub const SENTINEL_FIELD: &str = "__nj__";

/// Counters for one timed pass. Created fresh per run; nothing carries
/// over to the next run.
#[derive(Debug, Clone, Copy)]
pub struct RunStats {
    pub docs: u64,
    pub matched: u64,
    pub elapsed: Duration,
}

impl RunStats {
    /// Throughput over `input_len` bytes, in GB/s.
    pub fn gb_per_sec(&self, input_len: usize) -> f64 {
        gbps(input_len, self.elapsed)
    }
}

/// `bytes / seconds / 1e9`.
pub fn gbps(bytes: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs == 0.0 {
        return 0.0;
    }
    bytes as f64 / secs / 1e9
}

/// One filter-mode pass: field lookup, strict-`>` predicate, and
/// conditional output accumulation per document.
///
/// Output reconstruction maps the i-th document to the i-th line range;
/// documents beyond the index (a stream that framed more documents than
/// the input has non-empty lines) still count as matches but emit nothing.
pub fn filter_pass(
    buf: &[u8],
    json_len: usize,
    index: &[LineRange],
    field: &str,
    threshold: f64,
    out: &mut OutputBuf,
) -> Result<RunStats> {
    let stream = DocumentStream::open(buf, json_len, BATCH_SIZE)?;
    let mut docs = 0u64;
    let mut matched = 0u64;
    let start = Instant::now();
    for doc in stream {
        if filter::matches(doc.find_field_f64(field), threshold) {
            matched += 1;
            if let Some(range) = index.get(docs as usize) {
                out.push_line(range.slice(buf));
            }
        }
        docs += 1;
    }
    let elapsed = start.elapsed();
    Ok(RunStats {
        docs,
        matched,
        elapsed,
    })
}

/// One tokenizer-mode pass: frame every document and resolve the sentinel
/// field, which always misses. `matched` counts sentinel hits and must come
/// back zero on well-formed input.
pub fn tokenizer_pass(buf: &[u8], json_len: usize) -> Result<RunStats> {
    let stream = DocumentStream::open(buf, json_len, BATCH_SIZE)?;
    let mut docs = 0u64;
    let mut matched = 0u64;
    let start = Instant::now();
    for doc in stream {
        if !doc.find_field_f64(SENTINEL_FIELD).is_miss() {
            matched += 1;
        }
        docs += 1;
    }
    let elapsed = start.elapsed();
    Ok(RunStats {
        docs,
        matched,
        elapsed,
    })
}

/// One untimed warmup pass, then `iters` timed tokenizer passes, each over
/// a fresh stream.
pub fn run_tokenizer(buf: &[u8], json_len: usize, iters: usize) -> Result<Vec<RunStats>> {
    tokenizer_pass(buf, json_len)?;
    let mut runs = Vec::with_capacity(iters);
    for _ in 0..iters {
        runs.push(tokenizer_pass(buf, json_len)?);
    }
    Ok(runs)
}

/// Best (minimum) elapsed time across runs — the headline number.
pub fn best_elapsed(runs: &[RunStats]) -> Duration {
    runs.iter().map(|r| r.elapsed).min().unwrap_or(Duration::ZERO)
}

/// Mean elapsed time across runs.
pub fn avg_elapsed(runs: &[RunStats]) -> Duration {
    if runs.is_empty() {
        return Duration::ZERO;
    }
    let total: Duration = runs.iter().map(|r| r.elapsed).sum();
    total / runs.len() as u32
}
