//! Structural scanning primitives: locate value boundaries without decoding
//! anything. Framing honors string quoting and escape sequences, so braces
//! inside string literals never confuse depth tracking.

use memchr::memchr2;

/// JSON insignificant whitespace.
#[inline]
pub(crate) fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// First index at or after `i` (capped at `end`) holding a non-whitespace byte.
#[inline]
pub(crate) fn skip_ws(buf: &[u8], mut i: usize, end: usize) -> usize {
    while i < end && is_ws(buf[i]) {
        i += 1;
    }
    i
}

/// Index of the closing quote of the string opening at `open` (`buf[open]`
/// must be `"`), or `end` if the string never terminates.
pub(crate) fn scan_string(buf: &[u8], open: usize, end: usize) -> usize {
    let mut i = open + 1;
    while i < end {
        match memchr2(b'"', b'\\', &buf[i..end]) {
            Some(off) => {
                let j = i + off;
                if buf[j] == b'"' {
                    return j;
                }
                // Skip the backslash and whatever byte it escapes.
                i = j + 2;
            }
            None => break,
        }
    }
    end
}

/// Exclusive end of the JSON value starting at `start` (`buf[start]` must be
/// non-whitespace). Containers are framed by depth counting; scalar tokens
/// run to the next whitespace byte, as in batched on-demand streams. A value
/// that never closes consumes everything up to `end`.
pub(crate) fn frame_value(buf: &[u8], start: usize, end: usize) -> usize {
    match buf[start] {
        b'{' | b'[' => {
            let mut depth = 0usize;
            let mut i = start;
            while i < end {
                match buf[i] {
                    b'{' | b'[' => depth += 1,
                    b'}' | b']' => {
                        depth -= 1;
                        if depth == 0 {
                            return i + 1;
                        }
                    }
                    b'"' => i = scan_string(buf, i, end),
                    _ => {}
                }
                i += 1;
            }
            end
        }
        b'"' => {
            let close = scan_string(buf, start, end);
            if close < end { close + 1 } else { end }
        }
        _ => {
            let mut i = start;
            while i < end && !is_ws(buf[i]) {
                i += 1;
            }
            i
        }
    }
}

/// Exclusive end of the scalar token starting at `i`, stopping at whitespace
/// or at a structural byte (`,`, `}`, `]`). Member skipping needs the
/// structural stops: inside a compact record the token sits directly against
/// the object's own punctuation, which [`frame_value`]'s whitespace-only rule
/// for top-level scalars would run straight past.
#[inline]
pub(crate) fn skip_scalar(buf: &[u8], start: usize, end: usize) -> usize {
    let mut i = start;
    while i < end && !is_ws(buf[i]) && !matches!(buf[i], b',' | b'}' | b']') {
        i += 1;
    }
    i
}

/// Parse the number token starting at `i` as an `f64`, or `None` when the
/// leading byte cannot start a JSON number or the token fails to parse.
pub(crate) fn parse_number_token(buf: &[u8], i: usize, end: usize) -> Option<f64> {
    if i >= end || !matches!(buf[i], b'-' | b'0'..=b'9') {
        return None;
    }
    let mut j = i + 1;
    while j < end && matches!(buf[j], b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-') {
        j += 1;
    }
    std::str::from_utf8(&buf[i..j]).ok()?.parse::<f64>().ok()
}
