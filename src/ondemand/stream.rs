//! Lazy, forward-only document stream over a padded NDJSON buffer.
//!
//! Stage 1 (framing) runs unconditionally for every document: find where it
//! ends, touching only structural characters. Stage 2 (field resolution)
//! runs only when a field is actually requested, and only far enough into
//! the document to find or rule out that one top-level key. Nothing is ever
//! materialized into a value tree.

use anyhow::{Result, bail};

use super::buffer::PADDING;
use super::scan::{frame_value, parse_number_token, scan_string, skip_scalar, skip_ws};

/// Outcome of a single-field lookup: a numeric hit, or a miss (key absent,
/// value not numeric, or document malformed). Misses are ordinary values,
/// never errors — a bad record must not abort a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldLookup {
    Number(f64),
    Miss,
}

impl FieldLookup {
    #[inline]
    pub fn is_miss(&self) -> bool {
        matches!(self, FieldLookup::Miss)
    }
}

/// Forward-only document stream. Yields one [`Document`] per JSON value in
/// the buffer, in file order; exhausts exactly once and is not restartable —
/// every pass opens a fresh stream.
pub struct DocumentStream<'a> {
    buf: &'a [u8],
    json_len: usize,
    pos: usize,
}

impl<'a> DocumentStream<'a> {
    /// Open a stream over `json_len` logical bytes of `buf`.
    ///
    /// `buf` must carry at least [`PADDING`] bytes past `json_len`; a buffer
    /// without its padding tail or a zero `batch_hint` is a setup error.
    /// Beyond validation the hint does not influence this scalar scanner.
    /// Empty input opens successfully and yields an empty stream.
    pub fn open(buf: &'a [u8], json_len: usize, batch_hint: usize) -> Result<Self> {
        if batch_hint == 0 {
            bail!("batch size hint must be non-zero");
        }
        if buf.len() < json_len + PADDING {
            bail!(
                "stream buffer holds {} bytes but needs {} ({} of input + {} padding)",
                buf.len(),
                json_len + PADDING,
                json_len,
                PADDING
            );
        }
        Ok(Self {
            buf,
            json_len,
            pos: 0,
        })
    }
}

impl<'a> Iterator for DocumentStream<'a> {
    type Item = Document<'a>;

    fn next(&mut self) -> Option<Document<'a>> {
        let start = skip_ws(self.buf, self.pos, self.json_len);
        if start >= self.json_len {
            self.pos = self.json_len;
            return None;
        }
        let end = frame_value(self.buf, start, self.json_len);
        self.pos = end;
        Some(Document {
            raw: &self.buf[start..end],
            offset: start,
        })
    }
}

/// One framed document: the exact byte span the stream consumed for it,
/// surrounding whitespace excluded. Nothing inside has been decoded.
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    raw: &'a [u8],
    offset: usize,
}

impl<'a> Document<'a> {
    /// The document's raw source bytes.
    #[inline]
    pub fn source(&self) -> &'a [u8] {
        self.raw
    }

    /// Consumed byte range within the stream's buffer.
    #[inline]
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.raw.len()
    }

    /// Resolve one top-level field as a number.
    ///
    /// Walks the object's members in order, comparing keys by raw bytes (an
    /// escaped spelling of the key does not match) and skipping non-matching
    /// values structurally. Stops at the first match or at the closing brace
    /// that proves the key absent. Misses on non-object documents, on any
    /// malformation hit before the key is resolved, and on non-numeric
    /// values. Idempotent; never touches the stream cursor.
    pub fn find_field_f64(&self, key: &str) -> FieldLookup {
        let buf = self.raw;
        let end = buf.len();
        if end == 0 || buf[0] != b'{' {
            return FieldLookup::Miss;
        }
        let needle = key.as_bytes();
        let mut i = 1;
        loop {
            i = skip_ws(buf, i, end);
            if i >= end {
                return FieldLookup::Miss;
            }
            match buf[i] {
                b'}' => return FieldLookup::Miss,
                b',' => {
                    i += 1;
                    continue;
                }
                b'"' => {}
                _ => return FieldLookup::Miss,
            }
            let key_start = i + 1;
            let key_close = scan_string(buf, i, end);
            if key_close >= end {
                return FieldLookup::Miss;
            }
            let hit = &buf[key_start..key_close] == needle;
            i = skip_ws(buf, key_close + 1, end);
            if i >= end || buf[i] != b':' {
                return FieldLookup::Miss;
            }
            i = skip_ws(buf, i + 1, end);
            if i >= end {
                return FieldLookup::Miss;
            }
            if hit {
                return match parse_number_token(buf, i, end) {
                    Some(v) => FieldLookup::Number(v),
                    None => FieldLookup::Miss,
                };
            }
            // Containers and strings frame to their closing delimiter; bare
            // scalars must stop at the member's own `,` or `}`.
            i = match buf[i] {
                b'{' | b'[' | b'"' => frame_value(buf, i, end),
                _ => skip_scalar(buf, i, end),
            };
        }
    }
}
