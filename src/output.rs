//! Match-output accumulation.
//!
//! Matching records accumulate in memory as exact original bytes; the sink
//! sees one bulk write after the pass, so write syscalls never land inside
//! the timed region.

use std::io::{self, Write};

/// What a run does with matching records. Selected once per run; the modes
/// are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Accumulate matching lines and emit them verbatim (default).
    Emit,
    /// Count matches only (`--count`) — no byte accumulation, no output.
    CountOnly,
    /// Evaluate every match but never accumulate or write (`--quiet`).
    Suppress,
}

impl OutputMode {
    /// Mode tag used in run reports.
    pub fn describe(&self) -> &'static str {
        match self {
            OutputMode::Emit => "filter+output",
            OutputMode::CountOnly => "count",
            OutputMode::Suppress => "filter(no-output)",
        }
    }
}

/// Pre-reserved emit capacity, so large outputs grow without reallocation
/// dominating the measurement.
const EMIT_RESERVE: usize = 64 * 1024 * 1024;

/// Growable accumulator for matching lines.
pub struct OutputBuf {
    mode: OutputMode,
    buf: Vec<u8>,
}

impl OutputBuf {
    pub fn new(mode: OutputMode) -> Self {
        let buf = match mode {
            OutputMode::Emit => Vec::with_capacity(EMIT_RESERVE),
            OutputMode::CountOnly | OutputMode::Suppress => Vec::new(),
        };
        Self { mode, buf }
    }

    /// Append one matching line: the exact original bytes followed by one
    /// newline byte. No re-serialization, ever. No-op outside emit mode.
    #[inline]
    pub fn push_line(&mut self, line: &[u8]) {
        if self.mode == OutputMode::Emit {
            self.buf.extend_from_slice(line);
            self.buf.push(b'\n');
        }
    }

    /// Bytes accumulated so far.
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// The single bulk write. Writes nothing when nothing accumulated.
    pub fn flush_to(&self, out: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            out.write_all(&self.buf)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_mode_appends_exact_bytes_plus_newline() {
        let mut out = OutputBuf::new(OutputMode::Emit);
        out.push_line(b"{\"age\":35}");
        out.push_line(b"{ \"age\" : 99 }");
        assert_eq!(out.bytes(), b"{\"age\":35}\n{ \"age\" : 99 }\n");
    }

    #[test]
    fn count_and_suppress_modes_accumulate_nothing() {
        for mode in [OutputMode::CountOnly, OutputMode::Suppress] {
            let mut out = OutputBuf::new(mode);
            out.push_line(b"{\"age\":35}");
            assert!(out.bytes().is_empty());
        }
    }

    #[test]
    fn flush_writes_accumulated_bytes_verbatim() {
        let mut out = OutputBuf::new(OutputMode::Emit);
        out.push_line(b"{\"a\":1}\r");
        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"{\"a\":1}\r\n");
    }

    #[test]
    fn flush_of_empty_accumulator_writes_nothing() {
        let out = OutputBuf::new(OutputMode::Emit);
        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn mode_tags_for_reports() {
        assert_eq!(OutputMode::Emit.describe(), "filter+output");
        assert_eq!(OutputMode::CountOnly.describe(), "count");
        assert_eq!(OutputMode::Suppress.describe(), "filter(no-output)");
    }
}
