//! Line-boundary index over a raw NDJSON buffer.
//!
//! Built once per input, before any timed region. Output reconstruction
//! slices the original buffer through these ranges, so emitted records are
//! byte-identical to the input lines.

use memchr::memchr_iter;

/// Byte span of one non-empty line, end exclusive. The trailing newline (and
/// nothing else) is excluded; a `\r` before the newline stays inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    /// The line's bytes within `buf`.
    #[inline]
    pub fn slice<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.start..self.end]
    }
}

/// Scans `data` once and returns one range per non-empty line, in file
/// order. Empty segments (consecutive newlines, leading or trailing blanks)
/// produce nothing. A trailing partial line with no final newline is still
/// emitted. Cannot fail; an empty buffer yields an empty index.
pub fn build_line_index(data: &[u8]) -> Vec<LineRange> {
    // ~64-byte average record guess keeps reallocation off the hot path.
    let mut index = Vec::with_capacity(data.len() / 64 + 1);
    let mut start = 0usize;
    for nl in memchr_iter(b'\n', data) {
        if nl > start {
            index.push(LineRange { start, end: nl });
        }
        start = nl + 1;
    }
    if start < data.len() {
        index.push(LineRange { start, end: data.len() });
    }
    index
}
