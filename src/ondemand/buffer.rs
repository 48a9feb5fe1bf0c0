//! Padded-buffer construction for the document stream.

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Zeroed tail bytes every stream buffer carries past its logical length, so
/// framing lookahead near the end of the input never reads out of bounds.
pub const PADDING: usize = 64;

/// Create a padded copy of an in-memory slice.
pub fn pad_buffer(data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(data.len() + PADDING);
    buf.extend_from_slice(data);
    buf.resize(data.len() + PADDING, 0);
    buf
}

/// Read a file directly into a padded buffer — single allocation, no copy.
///
/// Returns `(buffer, json_len)` where `buffer` holds `json_len` bytes of
/// input followed by `PADDING` zeroed bytes.
pub fn read_padded_file(path: &Path) -> Result<(Vec<u8>, usize)> {
    let meta = fs::metadata(path).with_context(|| format!("cannot stat {}", path.display()))?;
    let file_len = meta.len() as usize;
    let mut buf = vec![0u8; file_len + PADDING];
    let mut f = fs::File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    f.read_exact(&mut buf[..file_len])
        .with_context(|| format!("cannot read {}", path.display()))?;
    // Tail bytes are already zeroed from vec! initialization.
    Ok((buf, file_len))
}
