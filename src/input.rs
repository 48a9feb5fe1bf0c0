//! Input loading: path → padded stream buffer.
//!
//! Plain files are read straight into a single padded allocation; `.gz` and
//! `.zst` files are decompressed to memory first and padded afterwards. A
//! UTF-8 BOM is stripped before any offsets are taken, so line ranges and
//! document spans always point at record content. Loading happens once per
//! process, before any timer starts.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::ondemand::{self, PADDING};

const BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Returns true if the file path has a recognized compressed extension.
pub fn is_compressed(path: &str) -> bool {
    path.ends_with(".gz")
        || path.ends_with(".gzip")
        || path.ends_with(".zst")
        || path.ends_with(".zstd")
}

/// Decompress a whole file to memory, dispatching on its extension. Callers
/// must have checked `is_compressed` first.
fn decompress_file(path: &str) -> Result<Vec<u8>> {
    let file = std::fs::File::open(path).with_context(|| format!("cannot open {path}"))?;
    let mut data = Vec::new();
    if path.ends_with(".gz") || path.ends_with(".gzip") {
        flate2::read::GzDecoder::new(file)
            .read_to_end(&mut data)
            .with_context(|| format!("cannot decompress gzip {path}"))?;
    } else if path.ends_with(".zst") || path.ends_with(".zstd") {
        zstd::Decoder::new(file)
            .with_context(|| format!("cannot initialize zstd decoder for {path}"))?
            .read_to_end(&mut data)
            .with_context(|| format!("cannot decompress zstd {path}"))?;
    } else {
        unreachable!("decompress_file called on non-compressed path: {path}")
    }
    Ok(data)
}

/// Load an NDJSON input into a padded stream buffer.
///
/// Returns `(buffer, json_len)`: `json_len` logical bytes followed by
/// [`PADDING`] zeroed bytes. Decompression counts as loading and stays
/// outside every timed region.
pub fn load_padded(path: &str) -> Result<(Vec<u8>, usize)> {
    let (mut buf, mut json_len) = if is_compressed(path) {
        let mut data = decompress_file(path)?;
        let len = data.len();
        data.resize(len + PADDING, 0);
        (data, len)
    } else {
        ondemand::read_padded_file(Path::new(path))?
    };
    if buf.starts_with(BOM) {
        // Shift content down in place, keeping the padding tail zeroed.
        buf.copy_within(BOM.len()..json_len, 0);
        json_len -= BOM.len();
        buf[json_len..json_len + BOM.len()].fill(0);
    }
    Ok((buf, json_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn detect_gz() {
        assert!(is_compressed("data.ndjson.gz"));
        assert!(is_compressed("/path/to/file.gz"));
        assert!(is_compressed("data.json.gzip"));
    }

    #[test]
    fn detect_zst() {
        assert!(is_compressed("data.ndjson.zst"));
        assert!(is_compressed("data.ndjson.zstd"));
    }

    #[test]
    fn detect_uncompressed() {
        assert!(!is_compressed("data.ndjson"));
        assert!(!is_compressed("data.json"));
        assert!(!is_compressed("file.txt"));
    }

    #[test]
    fn load_plain_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"{\"age\":35}\n").unwrap();
        let (buf, len) = load_padded(tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(len, 11);
        assert_eq!(&buf[..len], b"{\"age\":35}\n");
        assert!(buf[len..].iter().all(|&b| b == 0));
        assert_eq!(buf.len(), len + PADDING);
    }

    #[test]
    fn load_strips_utf8_bom() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(&[0xEF, 0xBB, 0xBF]).unwrap();
        tmp.write_all(b"{\"age\":35}\n").unwrap();
        let (buf, len) = load_padded(tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(len, 11);
        assert_eq!(&buf[..len], b"{\"age\":35}\n");
        assert!(buf[len..].iter().all(|&b| b == 0));
    }

    #[test]
    fn load_bom_only_file_is_empty() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(&[0xEF, 0xBB, 0xBF]).unwrap();
        let (buf, len) = load_padded(tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(len, 0);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn load_gzip_file() {
        let data = b"{\"age\":25}\n{\"age\":35}\n";
        let tmp = tempfile::Builder::new().suffix(".gz").tempfile().unwrap();
        let mut enc =
            flate2::write::GzEncoder::new(tmp.reopen().unwrap(), flate2::Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap();
        let (buf, len) = load_padded(tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(&buf[..len], data);
        assert_eq!(buf.len(), len + PADDING);
    }

    #[test]
    fn load_zstd_file() {
        let data = b"{\"age\":25}\n{\"age\":35}\n";
        let compressed = zstd::encode_all(&data[..], 0).unwrap();
        let mut tmp = tempfile::Builder::new().suffix(".zst").tempfile().unwrap();
        tmp.write_all(&compressed).unwrap();
        let (buf, len) = load_padded(tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(&buf[..len], data);
    }

    #[test]
    fn load_missing_file_errors() {
        assert!(load_padded("/no/such/file.ndjson").is_err());
        assert!(load_padded("/no/such/file.ndjson.gz").is_err());
    }
}
