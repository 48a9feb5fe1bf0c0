#![no_main]
use libfuzzer_sys::fuzz_target;
use nj::lines::build_line_index;

// Differential check of the line index against a straightforward split
// oracle: one range per non-empty line, in order, with exact boundaries.
fuzz_target!(|data: &[u8]| {
    let index = build_line_index(data);

    let mut expected = Vec::new();
    let mut start = 0usize;
    for (i, &b) in data.iter().enumerate() {
        if b == b'\n' {
            if i > start {
                expected.push((start, i));
            }
            start = i + 1;
        }
    }
    if start < data.len() {
        expected.push((start, data.len()));
    }

    assert_eq!(index.len(), expected.len());
    for (range, &(start, end)) in index.iter().zip(&expected) {
        assert_eq!((range.start, range.end), (start, end));
        assert!(!range.slice(data).contains(&b'\n'));
    }
});
